//! HTTP client for the chat-room API.
//!
//! One method per remote operation, each returning the unwrapped payload
//! or a tagged [`ApiError`]. No retry, timeout, or backoff policy: a
//! failed call surfaces to the caller as-is.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use parley_protocol::{
    CreateRoom, Envelope, Message, Room, RoomAction, RoomId, SendMessage, USER_ID_HEADER, User,
    UserId,
};

/// How an API call failed.
///
/// Status-derived variants let callers distinguish an authorization
/// failure (e.g. deleting a room they do not own) from a network failure
/// instead of collapsing everything into one generic message.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// 401: no user identity, or an unknown one.
    #[error("not logged in")]
    Unauthorized,

    /// 403: the server refused the operation for this user.
    #[error("operation not permitted")]
    Forbidden,

    /// 404: the room (or other resource) does not exist.
    #[error("no such resource")]
    NotFound,

    /// Any other non-success status.
    #[error("unexpected status: {0}")]
    Status(StatusCode),

    /// The response body did not match the `{ "data": ... }` envelope.
    #[error("could not decode response body")]
    Decode(#[source] reqwest::Error),
}

/// The remote operations the room view depends on.
///
/// Implemented by [`ApiClient`]; tests implement it with an in-memory
/// fake so view behavior can be exercised without a server.
pub trait RoomsApi {
    async fn current_user(&self) -> Result<User, ApiError>;
    async fn rooms(&self) -> Result<Vec<Room>, ApiError>;
    async fn create_room(&self, name: &str) -> Result<Room, ApiError>;
    async fn join_room(&self, room_id: &RoomId) -> Result<(), ApiError>;
    async fn leave_room(&self, room_id: &RoomId) -> Result<(), ApiError>;
    async fn delete_room(&self, room_id: &RoomId) -> Result<(), ApiError>;
    async fn messages(&self, room_id: &RoomId) -> Result<Vec<Message>, ApiError>;
    async fn send_message(&self, room_id: &RoomId, content: &str) -> Result<Message, ApiError>;
}

/// Client for a chat-room server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    user_id: Option<UserId>,
}

impl ApiClient {
    /// Create a client for the server at `base_url` (no trailing slash
    /// required).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
            user_id: None,
        }
    }

    /// Attach a user identity; sent on every request.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(UserId::new(user_id));
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut request = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(user_id) = &self.user_id {
            request = request.header(USER_ID_HEADER, user_id.as_str());
        }
        request
    }

    fn check(status: StatusCode) -> Result<(), ApiError> {
        if status.is_success() {
            Ok(())
        } else if status == StatusCode::UNAUTHORIZED {
            Err(ApiError::Unauthorized)
        } else if status == StatusCode::FORBIDDEN {
            Err(ApiError::Forbidden)
        } else if status == StatusCode::NOT_FOUND {
            Err(ApiError::NotFound)
        } else {
            Err(ApiError::Status(status))
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        Self::check(response.status())?;
        let envelope: Envelope<T> = response.json().await.map_err(ApiError::Decode)?;
        Ok(envelope.data)
    }

    /// Send a mutating call whose response body is unused beyond
    /// success/failure.
    async fn fire(&self, method: Method, path: &str, room_id: &RoomId) -> Result<(), ApiError> {
        let response = self
            .request(method, path)
            .json(&RoomAction {
                room_id: room_id.clone(),
            })
            .send()
            .await?;
        Self::check(response.status())
    }
}

impl RoomsApi for ApiClient {
    async fn current_user(&self) -> Result<User, ApiError> {
        let response = self.request(Method::GET, "/api/user/getUser").send().await?;
        Self::decode(response).await
    }

    async fn rooms(&self) -> Result<Vec<Room>, ApiError> {
        let response = self.request(Method::GET, "/api/room").send().await?;
        Self::decode(response).await
    }

    async fn create_room(&self, name: &str) -> Result<Room, ApiError> {
        let response = self
            .request(Method::POST, "/api/room")
            .json(&CreateRoom {
                name: name.to_string(),
            })
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn join_room(&self, room_id: &RoomId) -> Result<(), ApiError> {
        self.fire(Method::POST, "/api/room/join", room_id).await
    }

    async fn leave_room(&self, room_id: &RoomId) -> Result<(), ApiError> {
        self.fire(Method::POST, "/api/room/leave", room_id).await
    }

    async fn delete_room(&self, room_id: &RoomId) -> Result<(), ApiError> {
        self.fire(Method::DELETE, "/api/room", room_id).await
    }

    async fn messages(&self, room_id: &RoomId) -> Result<Vec<Message>, ApiError> {
        let response = self
            .request(Method::GET, &format!("/api/messages/{room_id}"))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn send_message(&self, room_id: &RoomId, content: &str) -> Result<Message, ApiError> {
        let response = self
            .request(Method::POST, "/api/messages/send")
            .json(&SendMessage {
                room_id: room_id.clone(),
                content: content.to_string(),
            })
            .send()
            .await?;
        Self::decode(response).await
    }
}
