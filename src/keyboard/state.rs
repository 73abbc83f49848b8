//! Keyboard state tracking

use super::{KeyCode, KeyEvent, KeyEventType};
use std::collections::VecDeque;

/// Number of keystrokes kept in history.
///
/// Kept small so the history never holds a full password.
pub const HISTORY_LEN: usize = 6;

/// Rolling view of recent keystrokes and shift state
///
/// Shift flags are only accurate once a real press or release of that shift
/// key has been observed, since capture starts mid-session.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    /// Left shift currently held
    left_shift_down: bool,
    /// Right shift currently held
    right_shift_down: bool,
    /// Down/Hold key codes, newest first
    recent_keys: VecDeque<KeyCode>,
    /// Total events applied
    total_events: u64,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self {
            left_shift_down: false,
            right_shift_down: false,
            recent_keys: VecDeque::with_capacity(HISTORY_LEN + 1),
            total_events: 0,
        }
    }

    /// Apply a key event and update state
    pub fn apply(&mut self, event: &KeyEvent) {
        self.total_events += 1;

        // Up events stay out of history so held keys don't skew repetition checks
        if event.event_type.is_keystroke() {
            self.recent_keys.push_front(event.key);
            self.recent_keys.truncate(HISTORY_LEN);
        }

        let held = match event.event_type {
            KeyEventType::Down => true,
            KeyEventType::Up => false,
            KeyEventType::Hold => return,
        };

        if event.key == KeyCode::LEFT_SHIFT {
            self.left_shift_down = held;
        } else if event.key == KeyCode::RIGHT_SHIFT {
            self.right_shift_down = held;
        }
    }

    pub fn left_shift_down(&self) -> bool {
        self.left_shift_down
    }

    pub fn right_shift_down(&self) -> bool {
        self.right_shift_down
    }

    /// Recorded keys, newest first
    pub fn recent_keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.recent_keys.iter().copied()
    }

    /// Number of keys currently in history
    pub fn history_len(&self) -> usize {
        self.recent_keys.len()
    }

    /// Most recently pressed key
    pub fn last_key(&self) -> Option<KeyCode> {
        self.recent_keys.front().copied()
    }

    /// Get total event count
    pub fn total_events(&self) -> u64 {
        self.total_events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::test_helpers::{down, hold, up};

    #[test]
    fn starts_empty() {
        let state = KeyboardState::new();
        assert_eq!(state.history_len(), 0);
        assert_eq!(state.last_key(), None);
        assert!(!state.left_shift_down());
        assert!(!state.right_shift_down());
    }

    #[test]
    fn down_and_hold_are_prepended() {
        let mut state = KeyboardState::new();
        state.apply(&down(KeyCode::A));
        state.apply(&hold(KeyCode::A));
        state.apply(&down(KeyCode::B));

        let keys: Vec<_> = state.recent_keys().collect();
        assert_eq!(keys, vec![KeyCode::B, KeyCode::A, KeyCode::A]);
        assert_eq!(state.last_key(), Some(KeyCode::B));
    }

    #[test]
    fn up_events_do_not_change_history() {
        let mut state = KeyboardState::new();
        state.apply(&down(KeyCode::A));
        state.apply(&up(KeyCode::A));
        state.apply(&up(KeyCode::S));

        assert_eq!(state.history_len(), 1);
        assert_eq!(state.last_key(), Some(KeyCode::A));
        assert_eq!(state.total_events(), 3);
    }

    #[test]
    fn history_is_capped() {
        let mut state = KeyboardState::new();
        for code in 16..40u16 {
            state.apply(&down(KeyCode(code)));
            assert!(state.history_len() <= HISTORY_LEN);
        }

        let keys: Vec<_> = state.recent_keys().map(|k| k.0).collect();
        assert_eq!(keys, vec![39, 38, 37, 36, 35, 34]);
    }

    #[test]
    fn shift_flags_follow_down_and_up() {
        let mut state = KeyboardState::new();

        state.apply(&down(KeyCode::LEFT_SHIFT));
        assert!(state.left_shift_down());
        assert!(!state.right_shift_down());

        state.apply(&down(KeyCode::RIGHT_SHIFT));
        assert!(state.right_shift_down());

        state.apply(&up(KeyCode::LEFT_SHIFT));
        assert!(!state.left_shift_down());
        assert!(state.right_shift_down());

        state.apply(&up(KeyCode::RIGHT_SHIFT));
        assert!(!state.right_shift_down());
    }

    #[test]
    fn hold_does_not_change_shift_flags() {
        let mut state = KeyboardState::new();
        state.apply(&hold(KeyCode::LEFT_SHIFT));
        assert!(!state.left_shift_down());

        state.apply(&down(KeyCode::LEFT_SHIFT));
        state.apply(&hold(KeyCode::LEFT_SHIFT));
        assert!(state.left_shift_down());
    }

    #[test]
    fn other_keys_do_not_touch_shift_flags() {
        let mut state = KeyboardState::new();
        state.apply(&down(KeyCode::LEFT_SHIFT));
        state.apply(&up(KeyCode::LEFT_CTRL));
        state.apply(&up(KeyCode::A));
        assert!(state.left_shift_down());
    }

    #[test]
    fn left_shift_tracks_last_transition_over_sequence() {
        let mut state = KeyboardState::new();
        let sequence = [
            down(KeyCode::LEFT_SHIFT),
            down(KeyCode::A),
            hold(KeyCode::LEFT_SHIFT),
            up(KeyCode::A),
            up(KeyCode::LEFT_SHIFT),
            down(KeyCode::S),
            down(KeyCode::LEFT_SHIFT),
        ];

        let mut expected = false;
        for event in &sequence {
            state.apply(event);
            if event.key == KeyCode::LEFT_SHIFT {
                match event.event_type {
                    KeyEventType::Down => expected = true,
                    KeyEventType::Up => expected = false,
                    KeyEventType::Hold => {}
                }
            }
            assert_eq!(state.left_shift_down(), expected);
        }
    }
}
