//! Wire shapes shared by the HTTP client and server.
//!
//! Every successful response is wrapped in the `{ "data": ... }` envelope;
//! rejections use [`ErrorBody`]. Request bodies use camelCase field names
//! (`roomId`).

use serde::{Deserialize, Serialize};

use crate::ids::RoomId;

/// Header carrying the requesting user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The `{ "data": ... }` wrapper used by all successful responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Body emitted by the server's centralized error handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Body for join / leave / delete, which act on a single room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAction {
    pub room_id: RoomId,
}

/// Body for posting a message to a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessage {
    pub room_id: RoomId,
    pub content: String,
}

/// Body for creating a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRoom {
    pub name: String,
}
