use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};

use parley_protocol::{Envelope, Message, RoomId, SendMessage};

use crate::error::ServerError;
use crate::routes::require_user;
use crate::state::SharedState;

pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/api/messages/{room_id}", get(list))
        .route("/api/messages/send", post(send))
}

async fn list(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(room_id): Path<RoomId>,
) -> Result<Json<Envelope<Vec<Message>>>, ServerError> {
    require_user(&state, &headers).await?;
    Ok(Json(Envelope::new(state.messages(&room_id).await?)))
}

async fn send(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<SendMessage>,
) -> Result<Json<Envelope<Message>>, ServerError> {
    let user = require_user(&state, &headers).await?;
    if body.content.trim().is_empty() {
        return Err(ServerError::EmptyMessage);
    }
    let message = state
        .append_message(&body.room_id, user, &body.content)
        .await?;
    Ok(Json(Envelope::new(message)))
}
