use std::fmt;
use uuid::Uuid;

use super::{redact_password, FtpConfiguration, ParameterStore};

/// Options forwarded verbatim to the wrapped FTP client when it is created.
///
/// `None` means the group was never requested, which is different from a
/// group that was requested but carries no entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientParameterBundle {
    /// Options originally prefixed `ftpClientConfig.` (prefix stripped)
    pub client_config: Option<ParameterStore>,
    /// Options originally prefixed `ftpClient.` (prefix stripped)
    pub client: Option<ParameterStore>,
}

impl ClientParameterBundle {
    /// True when neither group was requested
    pub fn is_unset(&self) -> bool {
        self.client_config.is_none() && self.client.is_none()
    }
}

/// A fully configured FTP endpoint
#[derive(Clone)]
pub struct FtpEndpoint {
    id: Uuid,
    uri: String,
    configuration: FtpConfiguration,
    client_bundle: ClientParameterBundle,
}

impl FtpEndpoint {
    pub fn new(uri: impl Into<String>, configuration: FtpConfiguration) -> Self {
        Self {
            id: Uuid::new_v4(),
            uri: uri.into(),
            configuration,
            client_bundle: ClientParameterBundle::default(),
        }
    }

    /// Unique per construction, even for identical URIs
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The full endpoint URI including options
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn configuration(&self) -> &FtpConfiguration {
        &self.configuration
    }

    pub fn configuration_mut(&mut self) -> &mut FtpConfiguration {
        &mut self.configuration
    }

    pub fn client_bundle(&self) -> &ClientParameterBundle {
        &self.client_bundle
    }

    pub fn client_config_parameters(&self) -> Option<&ParameterStore> {
        self.client_bundle.client_config.as_ref()
    }

    pub fn set_client_config_parameters(&mut self, parameters: ParameterStore) {
        self.client_bundle.client_config = Some(parameters);
    }

    pub fn client_parameters(&self) -> Option<&ParameterStore> {
        self.client_bundle.client.as_ref()
    }

    pub fn set_client_parameters(&mut self, parameters: ParameterStore) {
        self.client_bundle.client = Some(parameters);
    }

    /// Hand the client options over to whoever creates the FTP client
    pub fn take_client_bundle(&mut self) -> ClientParameterBundle {
        std::mem::take(&mut self.client_bundle)
    }
}

impl fmt::Debug for FtpEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FtpEndpoint")
            .field("id", &self.id)
            .field("uri", &redact_password(&self.uri))
            .field("configuration", &self.configuration)
            .field("client_bundle", &self.client_bundle)
            .finish()
    }
}
