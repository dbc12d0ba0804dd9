//! The crate-wide error type and its mapping onto transport status codes.
//!
//! Every fallible operation in the entity and persistence layers returns
//! `ApiError`. The error carries a kind tag and a user-facing message; the
//! translation from kind to HTTP status happens in exactly one place
//! (`ApiError::status`), so the validation/persistence core never reasons
//! about HTTP.

use std::io::Cursor;

use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::{self, Responder, Response};

use crate::envelope::Envelope;

/// What went wrong, independent of how it is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A field-level contract violation, local to one field.
    Validation,
    /// A storage-layer contract violation: malformed key, duplicate key,
    /// constraint failure, connection failure.
    Persistence,
    /// The caller's identity does not grant access to the resource.
    Authorization,
    /// A well-identified resource that does not exist.
    NotFound,
}

#[derive(Debug)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError {
            kind: ErrorKind::Validation,
            message: message.into(),
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        ApiError {
            kind: ErrorKind::Persistence,
            message: message.into(),
        }
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        ApiError {
            kind: ErrorKind::Authorization,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError {
            kind: ErrorKind::NotFound,
            message: message.into(),
        }
    }

    /// The one explicit kind-to-status mapping in the crate.
    pub fn status(&self) -> Status {
        match self.kind {
            ErrorKind::Validation => Status::UnprocessableEntity,
            ErrorKind::Persistence => Status::InternalServerError,
            ErrorKind::Authorization => Status::Forbidden,
            ErrorKind::NotFound => Status::NotFound,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<diesel::result::Error> for ApiError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => ApiError::not_found("no matching row"),
            other => ApiError::persistence(other.to_string()),
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, _req: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        let envelope: Envelope<()> = Envelope::error(status.code, self.message);
        let body = serde_json::to_string(&envelope)
            .unwrap_or_else(|_| format!("{{\"status\":{}}}", status.code));
        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}
