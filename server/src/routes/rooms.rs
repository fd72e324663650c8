use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};

use parley_protocol::{CreateRoom, Envelope, Room, RoomAction};

use crate::error::ServerError;
use crate::routes::require_user;
use crate::state::SharedState;

pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/api/room", get(list).post(create).delete(remove))
        .route("/api/room/join", post(join))
        .route("/api/room/leave", post(leave))
}

async fn list(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<Envelope<Vec<Room>>>, ServerError> {
    require_user(&state, &headers).await?;
    Ok(Json(Envelope::new(state.rooms().await)))
}

async fn create(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<CreateRoom>,
) -> Result<Json<Envelope<Room>>, ServerError> {
    let user = require_user(&state, &headers).await?;
    let room = state.create_room(body.name.trim(), user).await;
    tracing::info!(room = %room.id, name = %room.name, "room created");
    Ok(Json(Envelope::new(room)))
}

async fn join(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<RoomAction>,
) -> Result<Json<Envelope<Room>>, ServerError> {
    let user = require_user(&state, &headers).await?;
    let room = state.join(&body.room_id, user).await?;
    Ok(Json(Envelope::new(room)))
}

async fn leave(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<RoomAction>,
) -> Result<Json<Envelope<Room>>, ServerError> {
    let user = require_user(&state, &headers).await?;
    let room = state.leave(&body.room_id, &user.id).await?;
    Ok(Json(Envelope::new(room)))
}

async fn remove(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<RoomAction>,
) -> Result<Json<Envelope<()>>, ServerError> {
    let user = require_user(&state, &headers).await?;
    state.delete(&body.room_id, &user.id).await?;
    tracing::info!(room = %body.room_id, "room deleted");
    Ok(Json(Envelope::new(())))
}
