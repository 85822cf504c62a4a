use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use strum_macros::AsRefStr;

use super::types::DataParsingError;
use crate::store;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("invalid subscriber: {0}")]
    InvalidHuman(#[from] DataParsingError),
    #[error("malformed request body: {0}")]
    MalformedRequest(#[from] serde_json::Error),

    #[error("store error: {0}")]
    Store(#[from] store::Error),
}

impl Error {
    /// Every server error maps to exactly one status and client facing error.
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        match self {
            Error::InvalidHuman(_) | Error::MalformedRequest(_) => {
                (StatusCode::BAD_REQUEST, ClientError::InvalidHuman)
            }
            Error::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, ClientError::ServiceError),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a placeholder response, `response_mapper` replaces it.
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that it can be retrieved later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

/// What the client gets to see, rendered as a plain text body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, derive_more::Display)]
pub enum ClientError {
    #[display("Invalid Human")]
    InvalidHuman,
    #[display("Service Error")]
    ServiceError,
}
