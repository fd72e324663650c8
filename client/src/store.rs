//! Normalized room store.
//!
//! Rooms live in a single `RoomId -> Room` map; the selected room is a
//! lookup into that map, never a second copy. A join or leave therefore
//! mutates exactly one record, and the list view and detail view cannot
//! drift apart.

use std::collections::HashMap;

use parley_protocol::{Room, RoomId};

#[derive(Debug, Default)]
pub struct RoomStore {
    rooms: HashMap<RoomId, Room>,
    /// Display order (server order on load, append order after).
    order: Vec<RoomId>,
    selected: Option<RoomId>,
}

impl RoomStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole room list, e.g. after a refresh.
    ///
    /// The selection is kept when the selected room still exists and
    /// cleared otherwise.
    pub fn replace_all(&mut self, rooms: Vec<Room>) {
        self.order = rooms.iter().map(|room| room.id.clone()).collect();
        self.rooms = rooms.into_iter().map(|room| (room.id.clone(), room)).collect();
        if let Some(selected) = &self.selected
            && !self.rooms.contains_key(selected)
        {
            self.selected = None;
        }
    }

    /// Rooms in display order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.order.iter().filter_map(|id| self.rooms.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn get_mut(&mut self, room_id: &RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(room_id)
    }

    pub fn insert(&mut self, room: Room) {
        if !self.rooms.contains_key(&room.id) {
            self.order.push(room.id.clone());
        }
        self.rooms.insert(room.id.clone(), room);
    }

    /// Remove a room; clears the selection if it pointed at the room.
    pub fn remove(&mut self, room_id: &RoomId) -> Option<Room> {
        self.order.retain(|id| id != room_id);
        if self.selected.as_ref() == Some(room_id) {
            self.selected = None;
        }
        self.rooms.remove(room_id)
    }

    /// Select a room. Returns false if no such room is known.
    pub fn select(&mut self, room_id: &RoomId) -> bool {
        if self.rooms.contains_key(room_id) {
            self.selected = Some(room_id.clone());
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&RoomId> {
        self.selected.as_ref()
    }

    pub fn selected(&self) -> Option<&Room> {
        self.selected.as_ref().and_then(|id| self.rooms.get(id))
    }

    pub fn selected_mut(&mut self) -> Option<&mut Room> {
        match &self.selected {
            Some(id) => self.rooms.get_mut(id),
            None => None,
        }
    }
}
