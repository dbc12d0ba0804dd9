//! The uniform reply wrapper returned by every endpoint.
//!
//! Success and failure alike serialize to `{"status": <int>, "data": ...,
//! "message": ...}`, with `data` and `message` omitted when absent. The
//! `status` field always matches the HTTP status of the response.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Envelope<T> {
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// A 200 reply carrying data.
    pub fn ok(data: T) -> Self {
        Envelope {
            status: 200,
            data: Some(data),
            message: None,
        }
    }

    /// A 200 reply carrying data and a human-readable note.
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Envelope {
            status: 200,
            data: Some(data),
            message: Some(message.into()),
        }
    }

    /// A 200 reply with a note and no data.
    pub fn message(message: impl Into<String>) -> Self {
        Envelope {
            status: 200,
            data: None,
            message: Some(message.into()),
        }
    }

    /// A failure reply; `status` is the mapped transport code.
    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Envelope {
            status,
            data: None,
            message: Some(message.into()),
        }
    }
}
