mod api;
mod handler;
mod store;
mod view;

pub use api::{ApiClient, ApiError, RoomsApi};
pub use handler::{Notice, ViewHandler};
pub use store::RoomStore;
pub use view::{MessagesRequest, ModalAction, RoomView};

pub use parley_protocol::{Message, MessageId, Room, RoomId, User, UserId};
