//! Ephemeral per-user booking dialog state.
//!
//! Absence of an entry is the idle/terminal state. Collected data rides in
//! the state variant itself, so a session can never be in a state whose
//! inputs were not gathered. Nothing here is persisted.

use std::collections::HashMap;
use std::sync::Mutex;

/// Active step of the booking dialog, with the data collected so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingState {
    /// Waiting for the visitor's full name.
    AskName,
    /// Name collected, waiting for a date choice.
    AskDate { name: String },
    /// Name and date collected, waiting for a time choice.
    AskTime { name: String, date: String },
}

/// In-memory map of active booking dialogs, keyed by user id.
#[derive(Default)]
pub struct SessionMap {
    inner: Mutex<HashMap<i64, BookingState>>,
}

impl SessionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state for a user, if a dialog is in flight.
    pub fn get(&self, user_id: i64) -> Option<BookingState> {
        self.inner.lock().unwrap().get(&user_id).cloned()
    }

    /// Enter or advance a user's dialog.
    pub fn set(&self, user_id: i64, state: BookingState) {
        self.inner.lock().unwrap().insert(user_id, state);
    }

    /// Reset a user's dialog to idle. Returns the superseded state, if any.
    pub fn clear(&self, user_id: i64) -> Option<BookingState> {
        self.inner.lock().unwrap().remove(&user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_by_default() {
        let sessions = SessionMap::new();
        assert_eq!(sessions.get(1), None);
    }

    #[test]
    fn test_advance_carries_collected_data() {
        let sessions = SessionMap::new();
        sessions.set(1, BookingState::AskName);
        sessions.set(
            1,
            BookingState::AskDate {
                name: "Іван Іванов".to_string(),
            },
        );

        match sessions.get(1) {
            Some(BookingState::AskDate { name }) => assert_eq!(name, "Іван Іванов"),
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn test_clear_returns_superseded_state() {
        let sessions = SessionMap::new();
        sessions.set(1, BookingState::AskName);
        assert_eq!(sessions.clear(1), Some(BookingState::AskName));
        assert_eq!(sessions.get(1), None);
        assert_eq!(sessions.clear(1), None);
    }

    #[test]
    fn test_sessions_are_per_user() {
        let sessions = SessionMap::new();
        sessions.set(1, BookingState::AskName);
        sessions.set(
            2,
            BookingState::AskTime {
                name: "a".to_string(),
                date: "2026-09-01".to_string(),
            },
        );

        sessions.clear(1);
        assert!(sessions.get(2).is_some());
    }
}
