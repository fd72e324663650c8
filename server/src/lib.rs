pub mod error;
pub mod routes;
pub mod state;

pub use error::ServerError;
pub use routes::router;
pub use state::{AppState, SharedState};
