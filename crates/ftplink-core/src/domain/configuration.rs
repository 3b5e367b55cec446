use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::time::Duration;
use tracing::trace;
use url::Url;
use zeroize::Zeroizing;

use crate::error::{ConfigurationError, EndpointResult};

/// Default control port for plain FTP
pub const DEFAULT_FTP_PORT: u16 = 21;
/// Default control port for FTPS (implicit/explicit TLS)
pub const DEFAULT_FTPS_PORT: u16 = 2222;

/// Path separator used when building remote file names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PathSeparator {
    #[default]
    Unix,
    Windows,
    Auto,
}

impl PathSeparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unix => "Unix",
            Self::Windows => "Windows",
            Self::Auto => "Auto",
        }
    }
}

impl std::str::FromStr for PathSeparator {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unix" => Ok(Self::Unix),
            "windows" => Ok(Self::Windows),
            "auto" => Ok(Self::Auto),
            _ => Err(ConfigurationError::InvalidValue {
                value: s.to_string(),
                expected: "PathSeparator (Unix, Windows, Auto)",
            }),
        }
    }
}

/// Password taken from the URI or the `password` option.
///
/// Never printed, and wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Connection configuration of one FTP endpoint.
///
/// Parsed from the base URI (the part before `?`) and then refined by the
/// endpoint factory: the directory is normalized, `site_command` is resolved,
/// and generic options are bound onto the remaining fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FtpConfiguration {
    base_uri: Url,
    protocol: String,
    host: String,
    port: u16,
    username: Option<String>,
    password: Option<Secret>,
    directory: String,
    initial_directory: String,
    site_command: Option<String>,

    pub account: Option<String>,
    pub binary: bool,
    pub passive_mode: bool,
    pub connect_timeout: Duration,
    pub so_timeout: Duration,
    pub data_timeout: Duration,
    pub stepwise: bool,
    pub disconnect: bool,
    pub separator: PathSeparator,
    pub maximum_reconnect_attempts: u32,
    pub reconnect_delay: Duration,
}

impl FtpConfiguration {
    /// Parse a configuration from a base URI such as `ftp://user:pw@host:2121/inbox`.
    ///
    /// The URI must not carry the option suffix; `?` and everything after it
    /// is the caller's business.
    pub fn from_uri(base_uri: &str) -> EndpointResult<Self> {
        // Error messages only ever carry this form
        let printable = redact_password(base_uri);

        let mut uri = Url::parse(base_uri).map_err(|e| ConfigurationError::InvalidUri {
            uri: printable.to_string(),
            reason: e.to_string(),
        })?;

        let host = match uri.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => return Err(ConfigurationError::MissingHost(printable.to_string()).into()),
        };

        let protocol = uri.scheme().to_string();
        let port = uri.port().unwrap_or_else(|| default_port(&protocol));

        let username = Some(decode(&printable, uri.username())?).filter(|u| !u.is_empty());
        let password = uri
            .password()
            .map(|p| decode(&printable, p))
            .transpose()?
            .map(Secret::new);

        let directory = decode(&printable, uri.path())?;

        // The password lives in `Secret`; keep it out of the stored URI
        if password.is_some() {
            uri.set_password(None)
                .map_err(|()| ConfigurationError::InvalidUri {
                    uri: printable.to_string(),
                    reason: "password cannot be removed from this URI".to_string(),
                })?;
        }

        trace!(
            "[FtpConfiguration] Parsed {}://{}:{} directory '{}'",
            protocol,
            host,
            port,
            directory
        );

        Ok(Self {
            protocol,
            host,
            port,
            username,
            password,
            initial_directory: directory.clone(),
            directory,
            site_command: None,
            account: None,
            binary: false,
            passive_mode: false,
            connect_timeout: Duration::from_millis(10_000),
            so_timeout: Duration::from_millis(300_000),
            data_timeout: Duration::from_millis(30_000),
            stepwise: true,
            disconnect: false,
            separator: PathSeparator::default(),
            maximum_reconnect_attempts: 3,
            reconnect_delay: Duration::from_millis(1_000),
            base_uri: uri,
        })
    }

    /// Base URI with the password removed
    pub fn base_uri(&self) -> &Url {
        &self.base_uri
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = Some(username.into());
    }

    pub fn password(&self) -> Option<&Secret> {
        self.password.as_ref()
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = Some(Secret::new(password));
    }

    /// Working directory on the server
    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn set_directory(&mut self, directory: impl Into<String>) {
        self.directory = directory.into();
    }

    /// Directory exactly as it appeared in the URI, before normalization
    pub fn initial_directory(&self) -> &str {
        &self.initial_directory
    }

    /// Strip leading path separators so the directory is relative to the login directory.
    ///
    /// Returns `true` when the directory changed.
    pub fn ensure_relative_directory(&mut self) -> bool {
        let relative = strip_leading_separators(&self.directory);
        if relative.len() == self.directory.len() {
            return false;
        }

        trace!(
            "[FtpConfiguration] Stripping leading separator from directory: {} to: {}",
            self.directory,
            relative
        );
        self.directory = relative.to_string();
        true
    }

    pub fn site_command(&self) -> Option<&str> {
        self.site_command.as_deref()
    }

    pub fn set_site_command(&mut self, command: impl Into<String>) {
        self.site_command = Some(command.into());
    }

    /// Individual SITE commands; several can be given separated by newlines
    pub fn site_commands(&self) -> impl Iterator<Item = &str> {
        self.site_command
            .as_deref()
            .unwrap_or_default()
            .lines()
            .map(str::trim)
            .filter(|cmd| !cmd.is_empty())
    }
}

/// The URI with the password part of its user-info replaced by `***`.
///
/// Works on the raw text, so it also covers URIs that fail to parse.
pub fn redact_password(uri: &str) -> Cow<'_, str> {
    let Some(scheme_end) = uri.find("://") else {
        return Cow::Borrowed(uri);
    };
    let authority_start = scheme_end + 3;
    let rest = &uri[authority_start..];
    let authority = &rest[..rest.find(['/', '?', '#']).unwrap_or(rest.len())];

    let Some(at) = authority.rfind('@') else {
        return Cow::Borrowed(uri);
    };
    let Some(colon) = authority[..at].find(':') else {
        return Cow::Borrowed(uri);
    };

    Cow::Owned(format!(
        "{}***{}",
        &uri[..authority_start + colon + 1],
        &uri[authority_start + at..]
    ))
}

fn default_port(protocol: &str) -> u16 {
    if protocol.eq_ignore_ascii_case("ftps") {
        DEFAULT_FTPS_PORT
    } else {
        DEFAULT_FTP_PORT
    }
}

fn decode(uri: &str, raw: &str) -> EndpointResult<String> {
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| {
            ConfigurationError::InvalidUri {
                uri: uri.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
}

fn strip_leading_separators(path: &str) -> &str {
    path.trim_start_matches(['/', '\\'])
}
