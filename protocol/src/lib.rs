pub mod ids;
pub mod model;
pub mod wire;

pub use ids::{MessageId, RoomId, UserId};
pub use model::{Message, Room, User};
pub use wire::{CreateRoom, Envelope, ErrorBody, RoomAction, SendMessage, USER_ID_HEADER};
