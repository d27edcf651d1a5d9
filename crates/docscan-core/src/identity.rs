use serde::{Deserialize, Serialize};

/// The signed-in user as seen by the upload flow and the gallery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Identity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Name shown in status lines: the email when known, the id otherwise.
    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.user_id)
    }
}

/// Source of the current identity.
///
/// Callers read the identity here and pass it explicitly to the upload
/// sequencer and gallery query; neither reads ambient state.
pub trait IdentityProvider: Send + Sync {
    fn current(&self) -> Option<Identity>;

    fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }
}

/// Fixed identity, typically taken from configuration.
#[derive(Clone, Debug, Default)]
pub struct StaticIdentity {
    identity: Option<Identity>,
}

impl StaticIdentity {
    pub fn signed_in(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn anonymous() -> Self {
        Self { identity: None }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current(&self) -> Option<Identity> {
        self.identity.clone()
    }
}
