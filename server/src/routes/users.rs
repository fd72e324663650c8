use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};

use parley_protocol::{Envelope, User};

use crate::error::ServerError;
use crate::routes::require_user;
use crate::state::SharedState;

pub fn routes() -> Router<SharedState> {
    Router::new().route("/api/user/getUser", get(get_user))
}

async fn get_user(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<Envelope<User>>, ServerError> {
    let user = require_user(&state, &headers).await?;
    Ok(Json(Envelope::new(user)))
}
