//! Who performed a moderation action, and from where

use serde::{Deserialize, Serialize};

/// Moderator descriptor supplied by the auth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl Actor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
            name: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Request origin, recorded for forensics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Explicit context threaded into every moderation operation.
///
/// `actor: None` means the action was taken by the system or an anonymous caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionContext {
    pub actor: Option<Actor>,
    pub request: RequestMeta,
}

impl ActionContext {
    pub fn new(actor: Option<Actor>, request: RequestMeta) -> Self {
        Self { actor, request }
    }

    pub fn system() -> Self {
        Self::default()
    }

    pub fn moderator(actor: Actor) -> Self {
        Self {
            actor: Some(actor),
            request: RequestMeta::default(),
        }
    }

    pub fn actor_id(&self) -> Option<&str> {
        self.actor.as_ref().map(|a| a.id.as_str())
    }
}
