use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};
use crate::identity::{Identity, StaticIdentity};
use crate::store::BackendConfig;
use crate::transform::TransformKind;
use crate::upload::UploadSettings;

/// Application configuration, stored as TOML.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub transform: TransformKind,
    #[serde(default)]
    pub backend: BackendConfig,
    /// Signed-in user. Obtaining it (sign-in) happens outside this crate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
    #[serde(default)]
    pub upload: UploadSettings,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ScanError::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ScanError::Config(e.to_string()))
    }

    /// Default config with a placeholder identity, for `config` output.
    pub fn example() -> Self {
        Self {
            identity: Some(Identity::new("local-user")),
            ..Self::default()
        }
    }

    pub fn identity_provider(&self) -> StaticIdentity {
        match &self.identity {
            Some(identity) => StaticIdentity::signed_in(identity.clone()),
            None => StaticIdentity::anonymous(),
        }
    }
}
