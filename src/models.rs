use rocket::http::Status;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id:         i64,
    pub first_name: String,
    pub last_name:  String,
    pub email:      String,
}

impl Employee {
    /// A record that has not been saved yet; the store assigns its id.
    pub fn draft(first_name: impl Into<String>, last_name: impl Into<String>, email: impl Into<String>) -> Self {
        Employee {
            id:         0,
            first_name: first_name.into(),
            last_name:  last_name.into(),
            email:      email.into(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }
}

/// Uniform response wrapper used by every route except the list route.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(rename = "Message")]
    pub message:     String,
    #[serde(rename = "HttpStatus")]
    pub http_status: String,
    #[serde(rename = "Data")]
    pub data:        Option<T>,
}

impl<T> Envelope<T> {
    pub fn new(status: Status, message: impl Into<String>, data: Option<T>) -> Self {
        Envelope {
            message:     message.into(),
            http_status: status_name(status),
            data,
        }
    }
}

/// Upper-snake name of a status, e.g. `Status::NotFound` -> `NOT_FOUND`.
pub fn status_name(status: Status) -> String {
    match status.reason() {
        Some(reason) => reason
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect(),
        None => status.code.to_string(),
    }
}
