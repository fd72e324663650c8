//! Centralized request-error handling.
//!
//! Every handler returns `Result<_, ServerError>`; the `IntoResponse`
//! impl below is the single place a rejection becomes an HTTP response.
//! Handlers never build error responses themselves, so no rejection can
//! escape one unhandled.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use parley_protocol::{ErrorBody, RoomId};

/// Ways a request can be rejected.
#[derive(Debug, Error)]
pub enum ServerError {
    /// No user identity on the request, or an unknown one.
    #[error("authentication required")]
    Unauthorized,

    /// Only the creator may delete a room.
    #[error("you are not the owner of this room")]
    NotOwner,

    /// Only participants may post to a room.
    #[error("you are not a participant of this room")]
    NotParticipant,

    #[error("room not found: {0}")]
    RoomNotFound(RoomId),

    #[error("message content cannot be empty")]
    EmptyMessage,
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotOwner | Self::NotParticipant => StatusCode::FORBIDDEN,
            Self::RoomNotFound(_) => StatusCode::NOT_FOUND,
            Self::EmptyMessage => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(%status, error = %self, "request rejected");
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
