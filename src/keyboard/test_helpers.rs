//! Shared test utilities for keyboard and rule tests

use super::{KeyCode, KeyEvent, KeyboardState};

pub fn down(key: KeyCode) -> KeyEvent {
    KeyEvent::down(key)
}

pub fn up(key: KeyCode) -> KeyEvent {
    KeyEvent::up(key)
}

pub fn hold(key: KeyCode) -> KeyEvent {
    KeyEvent::hold(key)
}

/// Builds a state by applying `events` in order
pub fn state_from(events: &[KeyEvent]) -> KeyboardState {
    let mut state = KeyboardState::new();
    for event in events {
        state.apply(event);
    }
    state
}

/// Builds a state from Down presses of `keys`, oldest first
pub fn pressed(keys: &[KeyCode]) -> KeyboardState {
    let events: Vec<KeyEvent> = keys.iter().map(|&k| down(k)).collect();
    state_from(&events)
}
