//! Keyboard event types

use super::KeyCode;

/// Type of keyboard event, matching the `value` field of a kernel key record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEventType {
    /// Key was released
    Up,
    /// Key was pressed down
    Down,
    /// Key is held and the kernel emitted an autorepeat
    Hold,
}

impl KeyEventType {
    /// Raw value used by the kernel for this event type
    pub fn as_raw(&self) -> i32 {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Hold => 2,
        }
    }

    /// Whether the event type counts as a keystroke for history purposes
    pub fn is_keystroke(&self) -> bool {
        matches!(self, Self::Down | Self::Hold)
    }
}

impl TryFrom<i32> for KeyEventType {
    type Error = i32;

    /// Converts a raw record value, handing back the value if it is not 0, 1 or 2
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Up),
            1 => Ok(Self::Down),
            2 => Ok(Self::Hold),
            other => Err(other),
        }
    }
}

/// A decoded keyboard event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code
    pub key: KeyCode,
    /// Type of event (up/down/hold)
    pub event_type: KeyEventType,
}

impl KeyEvent {
    pub fn new(key: KeyCode, event_type: KeyEventType) -> Self {
        Self { key, event_type }
    }

    pub fn down(key: KeyCode) -> Self {
        Self::new(key, KeyEventType::Down)
    }

    pub fn up(key: KeyCode) -> Self {
        Self::new(key, KeyEventType::Up)
    }

    pub fn hold(key: KeyCode) -> Self {
        Self::new(key, KeyEventType::Hold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_from_raw_values() {
        assert_eq!(KeyEventType::try_from(0), Ok(KeyEventType::Up));
        assert_eq!(KeyEventType::try_from(1), Ok(KeyEventType::Down));
        assert_eq!(KeyEventType::try_from(2), Ok(KeyEventType::Hold));
    }

    #[test]
    fn event_type_rejects_unknown_values() {
        assert_eq!(KeyEventType::try_from(3), Err(3));
        assert_eq!(KeyEventType::try_from(-1), Err(-1));
    }

    #[test]
    fn event_type_raw_matches_conversion() {
        for ty in [KeyEventType::Up, KeyEventType::Down, KeyEventType::Hold] {
            assert_eq!(KeyEventType::try_from(ty.as_raw()), Ok(ty));
        }
    }

    #[test]
    fn only_down_and_hold_are_keystrokes() {
        assert!(KeyEventType::Down.is_keystroke());
        assert!(KeyEventType::Hold.is_keystroke());
        assert!(!KeyEventType::Up.is_keystroke());
    }
}
