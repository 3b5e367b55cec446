//! Component settings
//!
//! Settings that apply to every endpoint a factory builds. They can be
//! deserialized from JSON, e.g. `{"relativeDirectories": true, "lenientProperties": false}`.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::{ConfigurationError, EndpointResult};

// =============================================================================
// Option Keys (centralized constants)
// =============================================================================

/// Parameter key constants.
pub mod keys {
    /// Prefix of options forwarded to the FTP client configuration
    pub const FTP_CLIENT_CONFIG_PREFIX: &str = "ftpClientConfig.";
    /// Prefix of options forwarded to the FTP client itself
    pub const FTP_CLIENT_PREFIX: &str = "ftpClient.";
    /// SITE command(s) sent after login; supports `#reference` values
    pub const SITE_COMMAND: &str = "siteCommand";

    /// Generic endpoint options
    pub mod options {
        pub const ACCOUNT: &str = "account";
        pub const BINARY: &str = "binary";
        pub const PASSIVE_MODE: &str = "passiveMode";
        /// Milliseconds
        pub const CONNECT_TIMEOUT: &str = "connectTimeout";
        /// Milliseconds
        pub const SO_TIMEOUT: &str = "soTimeout";
        /// Data timeout in milliseconds
        pub const TIMEOUT: &str = "timeout";
        pub const STEPWISE: &str = "stepwise";
        pub const DISCONNECT: &str = "disconnect";
        pub const SEPARATOR: &str = "separator";
        pub const MAXIMUM_RECONNECT_ATTEMPTS: &str = "maximumReconnectAttempts";
        /// Milliseconds
        pub const RECONNECT_DELAY: &str = "reconnectDelay";
        pub const USERNAME: &str = "username";
        pub const PASSWORD: &str = "password";
    }
}

// =============================================================================
// ComponentSettings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ComponentSettings {
    /// Strip leading separators from the URI directory (FTP paths are relative to the login directory)
    pub relative_directories: bool,
    /// Leave unknown options in the parameter store instead of failing
    pub lenient_properties: bool,
}

impl Default for ComponentSettings {
    fn default() -> Self {
        Self {
            relative_directories: true,
            lenient_properties: false,
        }
    }
}

impl ComponentSettings {
    pub fn from_json_str(json: &str) -> EndpointResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ConfigurationError::InvalidSettings(e.to_string()).into())
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> EndpointResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        info!("[Settings] Loaded component settings from {}", path.display());
        Ok(settings)
    }
}
