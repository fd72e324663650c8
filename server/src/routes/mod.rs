mod messages;
mod rooms;
mod users;

use axum::Router;
use axum::http::HeaderMap;

use parley_protocol::{USER_ID_HEADER, User, UserId};

use crate::error::ServerError;
use crate::state::{AppState, SharedState};

/// Assemble the full API router.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .merge(users::routes())
        .merge(rooms::routes())
        .merge(messages::routes())
        .with_state(state)
}

/// Resolve the requesting user from the identity header.
pub(crate) async fn require_user(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<User, ServerError> {
    let user_id = headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(ServerError::Unauthorized)?;
    state
        .user(&UserId::from(user_id))
        .await
        .ok_or(ServerError::Unauthorized)
}
