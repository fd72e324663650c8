//! In-memory application state.
//!
//! Users, rooms, and per-room message logs behind one `RwLock`; each
//! operation takes the lock exactly once, so individual updates are
//! atomic. Messages are append-only and the `Vec` order is the display
//! order.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::RwLock;
use uuid::Uuid;

use parley_protocol::{Message, MessageId, Room, RoomId, User, UserId};

use crate::error::ServerError;

pub type SharedState = Arc<AppState>;

#[derive(Debug, Default)]
pub struct AppState {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<UserId, User>,
    rooms: HashMap<RoomId, Room>,
    /// Creation order, for a stable room list.
    room_order: Vec<RoomId>,
    messages: HashMap<RoomId, Vec<Message>>,
}

impl AppState {
    pub fn new() -> SharedState {
        Arc::new(Self::default())
    }

    /// State with a few known users and a starter room, for the demo
    /// binary and tests.
    pub async fn seeded() -> SharedState {
        let state = Self::new();
        let bob = User::new("u2", "bob");
        state.add_user(User::new("u1", "alice")).await;
        state.add_user(bob.clone()).await;
        state.add_user(User::new("u3", "carol")).await;
        state.create_room("Lobby", bob).await;
        state
    }

    pub async fn add_user(&self, user: User) {
        let mut inner = self.inner.write().await;
        inner.users.insert(user.id.clone(), user);
    }

    pub async fn user(&self, user_id: &UserId) -> Option<User> {
        self.inner.read().await.users.get(user_id).cloned()
    }

    /// All rooms, in creation order.
    pub async fn rooms(&self) -> Vec<Room> {
        let inner = self.inner.read().await;
        inner
            .room_order
            .iter()
            .filter_map(|id| inner.rooms.get(id).cloned())
            .collect()
    }

    /// Create a room; the creator starts as its only participant.
    pub async fn create_room(&self, name: &str, creator: User) -> Room {
        let room = Room::new(RoomId::new(Uuid::new_v4().to_string()), name, creator);
        let mut inner = self.inner.write().await;
        inner.room_order.push(room.id.clone());
        inner.messages.insert(room.id.clone(), Vec::new());
        inner.rooms.insert(room.id.clone(), room.clone());
        room
    }

    /// Add a user to a room's participant list.
    ///
    /// A duplicate join still succeeds but changes nothing, so a user
    /// appears at most once.
    pub async fn join(&self, room_id: &RoomId, user: User) -> Result<Room, ServerError> {
        let mut inner = self.inner.write().await;
        let room = inner
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| ServerError::RoomNotFound(room_id.clone()))?;
        room.add_participant(user);
        Ok(room.clone())
    }

    /// Remove a user from a room's participant list. Leaving a room the
    /// user is not in succeeds and changes nothing.
    pub async fn leave(&self, room_id: &RoomId, user_id: &UserId) -> Result<Room, ServerError> {
        let mut inner = self.inner.write().await;
        let room = inner
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| ServerError::RoomNotFound(room_id.clone()))?;
        room.remove_participant(user_id);
        Ok(room.clone())
    }

    /// Delete a room and its message log. Only the creator may delete.
    pub async fn delete(&self, room_id: &RoomId, user_id: &UserId) -> Result<(), ServerError> {
        let mut inner = self.inner.write().await;
        let room = inner
            .rooms
            .get(room_id)
            .ok_or_else(|| ServerError::RoomNotFound(room_id.clone()))?;
        if !room.is_creator(user_id) {
            return Err(ServerError::NotOwner);
        }
        inner.rooms.remove(room_id);
        inner.room_order.retain(|id| id != room_id);
        inner.messages.remove(room_id);
        Ok(())
    }

    /// A room's messages, oldest first.
    pub async fn messages(&self, room_id: &RoomId) -> Result<Vec<Message>, ServerError> {
        let inner = self.inner.read().await;
        inner
            .messages
            .get(room_id)
            .cloned()
            .ok_or_else(|| ServerError::RoomNotFound(room_id.clone()))
    }

    /// Append a message; the sender must be a participant.
    pub async fn append_message(
        &self,
        room_id: &RoomId,
        sender: User,
        content: &str,
    ) -> Result<Message, ServerError> {
        let mut inner = self.inner.write().await;
        let room = inner
            .rooms
            .get(room_id)
            .ok_or_else(|| ServerError::RoomNotFound(room_id.clone()))?;
        if !room.has_participant(&sender.id) {
            return Err(ServerError::NotParticipant);
        }
        let message = Message {
            id: MessageId::new(Uuid::new_v4().to_string()),
            room_id: room_id.clone(),
            sender,
            content: content.to_string(),
            sent_at: now_millis(),
        };
        inner
            .messages
            .entry(room_id.clone())
            .or_default()
            .push(message.clone());
        Ok(message)
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_join_changes_nothing() {
        let state = AppState::new();
        let alice = User::new("u1", "alice");
        let bob = User::new("u2", "bob");
        let room = state.create_room("Lobby", alice).await;

        state.join(&room.id, bob.clone()).await.unwrap();
        let after = state.join(&room.id, bob).await.unwrap();

        assert_eq!(after.participants.len(), 2);
    }

    #[tokio::test]
    async fn delete_refuses_non_creator() {
        let state = AppState::new();
        let room = state.create_room("Lobby", User::new("u1", "alice")).await;

        let result = state.delete(&room.id, &UserId::from("u2")).await;
        assert!(matches!(result, Err(ServerError::NotOwner)));
        assert_eq!(state.rooms().await.len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_room_and_log() {
        let state = AppState::new();
        let alice = User::new("u1", "alice");
        let room = state.create_room("Lobby", alice.clone()).await;
        state.append_message(&room.id, alice, "hi").await.unwrap();

        state.delete(&room.id, &UserId::from("u1")).await.unwrap();

        assert!(state.rooms().await.is_empty());
        assert!(matches!(
            state.messages(&room.id).await,
            Err(ServerError::RoomNotFound(_))
        ));
    }

    #[tokio::test]
    async fn messages_keep_append_order() {
        let state = AppState::new();
        let alice = User::new("u1", "alice");
        let room = state.create_room("Lobby", alice.clone()).await;

        for content in ["one", "two", "three"] {
            state
                .append_message(&room.id, alice.clone(), content)
                .await
                .unwrap();
        }

        let log = state.messages(&room.id).await.unwrap();
        let contents: Vec<&str> = log.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["one", "two", "three"]);
    }

    #[tokio::test]
    async fn non_participant_cannot_post() {
        let state = AppState::new();
        let room = state.create_room("Lobby", User::new("u1", "alice")).await;

        let result = state
            .append_message(&room.id, User::new("u2", "bob"), "hi")
            .await;
        assert!(matches!(result, Err(ServerError::NotParticipant)));
    }
}
