// Wire records exchanged with the actions service. Field names follow
// the JSON the backend produces and accepts.

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};

/// Timestamp layout the backend expects, e.g. `2024-03-01T09:15:02.123`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// A journal entry. `id` is assigned by the server and is left out of
/// the request body when creating a new action.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Action {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub result: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub timestamp: String,
}

/// JSON `null` reads as an empty string, same as a missing key.
fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(d).map(Option::unwrap_or_default)
}

impl Action {
    /// New action stamped with the current local time.
    pub fn new(description: impl Into<String>, result: impl Into<String>) -> Self {
        Action {
            id: None,
            description: description.into(),
            result: result.into(),
            timestamp: format_timestamp(&Local::now()),
        }
    }

    /// Same as `new` but targeting an existing server-side record.
    pub fn with_id(id: impl Into<String>, description: impl Into<String>, result: impl Into<String>) -> Self {
        Action {
            id: Some(id.into()),
            ..Action::new(description, result)
        }
    }

    /// The backend answers with an all-empty object when nothing matched.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.description.is_empty() && self.result.is_empty() && self.timestamp.is_empty()
    }
}

pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Credentials for both `/auth` and `/register`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

/// Login response. The backend capitalises the field; lower case is
/// accepted as well.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct AuthResponse {
    #[serde(rename = "Token", alias = "token", default, deserialize_with = "null_as_empty")]
    pub token: String,
}

/// Error body returned on 400 responses. Only `message` and `error` are
/// read; the rest vary in type between backends.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct ErrorResponse {
    #[serde(alias = "Timestamp")]
    pub timestamp: Option<serde_json::Value>,
    #[serde(alias = "Path")]
    pub path: Option<serde_json::Value>,
    #[serde(alias = "Status")]
    pub status: Option<serde_json::Value>,
    #[serde(alias = "Error")]
    pub error: Option<String>,
    #[serde(alias = "Message")]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// Best human-readable text: `message`, then `error`, then nothing.
    pub fn text(&self) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .or(self.error.as_deref())
            .unwrap_or_default()
            .to_string()
    }
}

/// Single filter accepted by `GET /api/item`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParam {
    Description(String),
    Result(String),
    Date(String),
    Id(String),
}

impl QueryParam {
    pub fn name(&self) -> &'static str {
        match self {
            QueryParam::Description(_) => "description",
            QueryParam::Result(_) => "result",
            QueryParam::Date(_) => "date",
            QueryParam::Id(_) => "id",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            QueryParam::Description(v) | QueryParam::Result(v) | QueryParam::Date(v) | QueryParam::Id(v) => v,
        }
    }
}
