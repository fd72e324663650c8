//! Domain model: users, rooms, messages.

use serde::{Deserialize, Serialize};

use crate::ids::{MessageId, RoomId, UserId};

/// A user account. Immutable from the client's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            username: username.into(),
        }
    }
}

/// A named chat room with a creator and an ordered participant set.
///
/// Participants behave as an ordered set: join order is preserved for
/// display, and a user appears at most once. `add_participant` enforces
/// the at-most-once invariant rather than trusting callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    #[serde(rename = "creatorId")]
    pub creator: User,
    pub participants: Vec<User>,
}

impl Room {
    /// Create a room; the creator starts as its only participant.
    pub fn new(id: RoomId, name: impl Into<String>, creator: User) -> Self {
        Self {
            id,
            name: name.into(),
            participants: vec![creator.clone()],
            creator,
        }
    }

    pub fn has_participant(&self, user_id: &UserId) -> bool {
        self.participants.iter().any(|p| &p.id == user_id)
    }

    /// Add a user to the participant list.
    ///
    /// Returns false (and leaves the list untouched) if the user is
    /// already a participant.
    pub fn add_participant(&mut self, user: User) -> bool {
        if self.has_participant(&user.id) {
            return false;
        }
        self.participants.push(user);
        true
    }

    /// Remove a user from the participant list.
    ///
    /// Returns false if the user was not a participant.
    pub fn remove_participant(&mut self, user_id: &UserId) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| &p.id != user_id);
        self.participants.len() != before
    }

    pub fn is_creator(&self, user_id: &UserId) -> bool {
        &self.creator.id == user_id
    }
}

/// A single chat message. Append-only: never edited or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub room_id: RoomId,
    pub sender: User,
    pub content: String,
    /// Unix-millis timestamp assigned when the server accepts the message.
    /// Display order is the server's append order, not this field.
    pub sent_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> User {
        User::new(id, format!("user-{id}"))
    }

    #[test]
    fn creator_is_first_participant() {
        let room = Room::new(RoomId::from("r1"), "Lobby", user("u1"));

        assert_eq!(room.participants.len(), 1);
        assert!(room.has_participant(&UserId::from("u1")));
        assert!(room.is_creator(&UserId::from("u1")));
    }

    #[test]
    fn duplicate_join_is_rejected() {
        let mut room = Room::new(RoomId::from("r1"), "Lobby", user("u1"));

        assert!(room.add_participant(user("u2")));
        assert!(!room.add_participant(user("u2")));
        assert_eq!(room.participants.len(), 2);
    }

    #[test]
    fn join_order_is_preserved() {
        let mut room = Room::new(RoomId::from("r1"), "Lobby", user("u1"));
        room.add_participant(user("u3"));
        room.add_participant(user("u2"));

        let ids: Vec<&str> = room.participants.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["u1", "u3", "u2"]);
    }

    #[test]
    fn remove_participant_reports_membership() {
        let mut room = Room::new(RoomId::from("r1"), "Lobby", user("u1"));
        room.add_participant(user("u2"));

        assert!(room.remove_participant(&UserId::from("u2")));
        assert!(!room.remove_participant(&UserId::from("u2")));
        assert!(!room.has_participant(&UserId::from("u2")));
    }
}
