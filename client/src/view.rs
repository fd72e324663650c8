//! Room view controller.
//!
//! Maps the UI events of the room screen (select a room, join/leave/
//! delete through the action modal, type and send a message, press Enter)
//! to API calls and store updates. State updates are applied only after
//! the server confirms an operation, so there is never anything to roll
//! back; failures surface as notices through the [`ViewHandler`].

use parley_protocol::{Message, Room, RoomId, User};

use crate::api::{ApiError, RoomsApi};
use crate::handler::{Notice, ViewHandler};
use crate::store::RoomStore;

/// Which action the room modal offers besides delete, derived from
/// whether the current user is a participant of the selected room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    Join,
    Leave,
}

/// An in-flight message fetch.
///
/// Each fetch is stamped with the view's generation at the time it
/// started; a result whose stamp is stale by the time it completes (the
/// user re-selected or the room went away) is discarded, never applied.
#[derive(Debug)]
pub struct MessagesRequest {
    pub room_id: RoomId,
    generation: u64,
}

/// The room screen: room list, selected-room detail, message feed,
/// draft input, and the two modal flags.
pub struct RoomView<A, H> {
    api: A,
    handler: H,
    store: RoomStore,
    current_user: Option<User>,
    messages: Vec<Message>,
    draft: String,
    action_modal_open: bool,
    create_modal_open: bool,
    fetch_generation: u64,
}

impl<A: RoomsApi, H: ViewHandler> RoomView<A, H> {
    pub fn new(api: A, handler: H) -> Self {
        Self {
            api,
            handler,
            store: RoomStore::new(),
            current_user: None,
            messages: Vec::new(),
            draft: String::new(),
            action_modal_open: false,
            create_modal_open: false,
            fetch_generation: 0,
        }
    }

    /// Fetch the current user and the room list once, at startup.
    ///
    /// Either fetch failing is logged and leaves prior state unchanged;
    /// no loading or error state is surfaced to the caller.
    pub async fn load(&mut self) {
        match self.api.current_user().await {
            Ok(user) => self.current_user = Some(user),
            Err(error) => tracing::error!(%error, "failed to fetch current user"),
        }
        self.refresh_rooms().await;
    }

    /// Re-fetch the room list on demand.
    pub async fn refresh_rooms(&mut self) {
        match self.api.rooms().await {
            Ok(rooms) => self.store.replace_all(rooms),
            Err(error) => tracing::error!(%error, "failed to fetch room list"),
        }
    }

    /// Select a room and fetch its messages, replacing the message list.
    pub async fn select_room(&mut self, room_id: &RoomId) {
        let Some(request) = self.begin_select(room_id) else {
            return;
        };
        let result = self.api.messages(&request.room_id).await;
        self.finish_select(request, result);
    }

    /// Set the selection and start a message fetch.
    ///
    /// Returns `None` if the room is unknown. Callers driving fetches
    /// themselves (a UI task per request) pass the ticket back through
    /// [`Self::finish_select`]; [`Self::select_room`] does both steps.
    pub fn begin_select(&mut self, room_id: &RoomId) -> Option<MessagesRequest> {
        if !self.store.select(room_id) {
            return None;
        }
        self.fetch_generation += 1;
        Some(MessagesRequest {
            room_id: room_id.clone(),
            generation: self.fetch_generation,
        })
    }

    /// Apply the outcome of a message fetch, unless it is stale.
    pub fn finish_select(
        &mut self,
        request: MessagesRequest,
        result: Result<Vec<Message>, ApiError>,
    ) {
        if request.generation != self.fetch_generation {
            tracing::debug!(room = %request.room_id, "discarding stale message fetch");
            return;
        }
        match result {
            Ok(messages) => {
                self.messages = messages;
                self.handler.on_messages_replaced(&self.messages);
            }
            Err(error) => {
                tracing::warn!(%error, room = %request.room_id, "failed to fetch messages");
            }
        }
    }

    /// Open the join-or-delete / leave-or-delete modal for the selected
    /// room (clicking the chat header). No-op without a selection.
    pub fn open_action_modal(&mut self) {
        if self.store.selected().is_some() {
            self.action_modal_open = true;
        }
    }

    pub fn close_action_modal(&mut self) {
        self.action_modal_open = false;
    }

    pub fn open_create_modal(&mut self) {
        self.create_modal_open = true;
    }

    pub fn close_create_modal(&mut self) {
        self.create_modal_open = false;
    }

    /// Join the selected room. On success the current user is added to
    /// the room's single store record (at most once), the modal closes,
    /// and a success notice is emitted.
    pub async fn join(&mut self) {
        let Some(room_id) = self.store.selected_id().cloned() else {
            return;
        };
        let Some(user) = self.current_user.clone() else {
            return;
        };
        match self.api.join_room(&room_id).await {
            Ok(()) => {
                if let Some(room) = self.store.get_mut(&room_id) {
                    room.add_participant(user);
                }
                self.action_modal_open = false;
                self.notify(Notice::Success("You Joined The Room".to_string()));
            }
            Err(error) => {
                tracing::warn!(%error, room = %room_id, "join failed");
                self.notify(Notice::Warning("Error while joining the room".to_string()));
            }
        }
    }

    /// Leave the selected room; mirror image of [`Self::join`].
    pub async fn leave(&mut self) {
        let Some(room_id) = self.store.selected_id().cloned() else {
            return;
        };
        let Some(user) = self.current_user.clone() else {
            return;
        };
        match self.api.leave_room(&room_id).await {
            Ok(()) => {
                if let Some(room) = self.store.get_mut(&room_id) {
                    room.remove_participant(&user.id);
                }
                self.action_modal_open = false;
                self.notify(Notice::Success("You Left The Room".to_string()));
            }
            Err(error) => {
                tracing::warn!(%error, room = %room_id, "leave failed");
                self.notify(Notice::Warning("Error While Leaving The Room".to_string()));
            }
        }
    }

    /// Delete the selected room.
    ///
    /// On success the modal closes, the selection is cleared, and the
    /// room is removed from the store so the list no longer shows it. On
    /// failure the modal still closes and the selection is kept; the
    /// warning wording depends on whether the server said Forbidden
    /// (non-owner) or something else went wrong.
    pub async fn delete(&mut self) {
        let Some(room_id) = self.store.selected_id().cloned() else {
            return;
        };
        match self.api.delete_room(&room_id).await {
            Ok(()) => {
                self.action_modal_open = false;
                self.store.remove(&room_id);
                self.messages.clear();
                self.notify(Notice::Success("Room Deleted".to_string()));
            }
            Err(ApiError::Forbidden) => {
                self.action_modal_open = false;
                self.notify(Notice::Warning("You Are Not The Owner".to_string()));
            }
            Err(error) => {
                tracing::warn!(%error, room = %room_id, "delete failed");
                self.action_modal_open = false;
                self.notify(Notice::Warning("Could Not Delete The Room".to_string()));
            }
        }
    }

    /// Send the draft to the selected room.
    ///
    /// A blank or whitespace-only draft is a no-op: no API call is made.
    /// On success the returned message is appended and the draft cleared;
    /// on failure the draft is kept and an error notice emitted.
    pub async fn send_message(&mut self) {
        if self.draft.trim().is_empty() {
            return;
        }
        let Some(room_id) = self.store.selected_id().cloned() else {
            return;
        };
        match self.api.send_message(&room_id, &self.draft).await {
            Ok(message) => {
                self.messages.push(message);
                self.draft.clear();
            }
            Err(error) => {
                tracing::warn!(%error, room = %room_id, "send failed");
                self.notify(Notice::Error("Message Not Sent".to_string()));
            }
        }
    }

    /// Enter in the input field: sends only when the current user is a
    /// participant of the selected room, otherwise silently does nothing.
    pub async fn press_enter(&mut self) {
        if self.is_participant() {
            self.send_message().await;
        }
    }

    /// Create a room and add it to the list. Whitespace-only names are
    /// rejected locally without an API call.
    pub async fn create_room(&mut self, name: &str) {
        if name.trim().is_empty() {
            return;
        }
        match self.api.create_room(name).await {
            Ok(room) => {
                self.store.insert(room);
                self.create_modal_open = false;
                self.notify(Notice::Success("Room Created".to_string()));
            }
            Err(error) => {
                tracing::warn!(%error, "create failed");
                self.notify(Notice::Warning("Could Not Create The Room".to_string()));
            }
        }
    }

    /// Whether the current user is in the selected room's participant
    /// list. Gates the message input and picks the modal action.
    pub fn is_participant(&self) -> bool {
        match (&self.current_user, self.store.selected()) {
            (Some(user), Some(room)) => room.has_participant(&user.id),
            _ => false,
        }
    }

    /// The non-delete action the modal offers, if a room is selected.
    pub fn modal_action(&self) -> Option<ModalAction> {
        self.store.selected()?;
        Some(if self.is_participant() {
            ModalAction::Leave
        } else {
            ModalAction::Join
        })
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.store.rooms()
    }

    pub fn selected_room(&self) -> Option<&Room> {
        self.store.selected()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn action_modal_open(&self) -> bool {
        self.action_modal_open
    }

    pub fn create_modal_open(&self) -> bool {
        self.create_modal_open
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    fn notify(&mut self, notice: Notice) {
        self.handler.on_notice(notice);
    }
}
