//! Right shift paired with a right-hand key

use super::{last_key_or_fail, Rule, RuleError, Violation, ViolationKind};
use crate::keyboard::{KeyCode, KeyboardState};

/// Keys typed by the right hand on a standard layout
const RIGHT_HAND_KEYS: &[KeyCode] = &[
    KeyCode::KEY_6,
    KeyCode::KEY_7,
    KeyCode::KEY_8,
    KeyCode::KEY_9,
    KeyCode::KEY_0,
    KeyCode::MINUS,
    KeyCode::EQUAL,
    KeyCode::U,
    KeyCode::I,
    KeyCode::O,
    KeyCode::P,
    KeyCode::LEFT_BRACE,
    KeyCode::RIGHT_BRACE,
    KeyCode::H,
    KeyCode::J,
    KeyCode::K,
    KeyCode::L,
    KeyCode::SEMICOLON,
    KeyCode::APOSTROPHE,
    KeyCode::N,
    KeyCode::M,
    KeyCode::COMMA,
    KeyCode::DOT,
    KeyCode::SLASH,
];

/// Flags the right shift key used together with a key on the right half
#[derive(Debug, Clone, Copy, Default)]
pub struct RightShiftRule;

impl RightShiftRule {
    pub fn is_right_hand_key(key: KeyCode) -> bool {
        RIGHT_HAND_KEYS.contains(&key)
    }
}

impl Rule for RightShiftRule {
    fn name(&self) -> &'static str {
        "right-shift"
    }

    fn description(&self) -> &'static str {
        "Right shift used with a key on the right side of the keyboard"
    }

    fn kind(&self) -> ViolationKind {
        ViolationKind::RightShift
    }

    fn evaluate(&self, state: &KeyboardState) -> Result<Option<Violation>, RuleError> {
        let last = last_key_or_fail(state, self.name())?;
        if state.right_shift_down() && Self::is_right_hand_key(last) {
            return Ok(Some(Violation::new(self.kind(), self.description())));
        }
        Ok(None)
    }
}
