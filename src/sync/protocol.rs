//! Wire format shared by the client, the relay and the spreadsheet backend.
//!
//! Every call is a JSON POST of the form
//! `{secret, action?, data?, id?}` answered with `{ok, error?, data?}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// What the backend should do with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Delete,
    List,
}

impl Action {
    /// Reads an action name; anything missing or unknown means `create`.
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value {
            Some("delete") => Action::Delete,
            Some("list") => Action::List,
            _ => Action::Create,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Create => write!(f, "create"),
            Action::Delete => write!(f, "delete"),
            Action::List => write!(f, "list"),
        }
    }
}

/// Request envelope.
///
/// Fields are optional on the way in because the relay accepts whatever the
/// caller sends and only checks the secret.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl RemoteRequest {
    pub fn create(secret: &str, data: Value) -> Self {
        Self {
            secret: Some(secret.to_string()),
            action: Some(Action::Create.to_string()),
            data: Some(data),
            id: None,
        }
    }

    pub fn delete(secret: &str, id: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.to_string()),
            action: Some(Action::Delete.to_string()),
            data: None,
            id: Some(id.into()),
        }
    }

    pub fn list(secret: &str) -> Self {
        Self {
            secret: Some(secret.to_string()),
            action: Some(Action::List.to_string()),
            data: None,
            id: None,
        }
    }

    /// Parses a request body, treating anything that is not a JSON object
    /// of the expected shape as an empty request.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn action(&self) -> Action {
        Action::parse_lenient(self.action.as_deref())
    }

    /// The normalized payload passed on to the backend.
    ///
    /// Only the fields that belong to the action are kept.
    pub fn forwarded(&self) -> Self {
        let secret = self.secret.as_deref().unwrap_or_default();
        match self.action() {
            Action::Create => Self {
                data: self.data.clone(),
                ..Self::create(secret, Value::Null)
            },
            Action::Delete => Self {
                id: self.id.clone(),
                ..Self::delete(secret, String::new())
            },
            Action::List => Self::list(secret),
        }
    }
}

/// Response envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RemoteReply {
    pub fn ok() -> Self {
        Self {
            ok: true,
            ..Self::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(message.into()),
        }
    }
}
