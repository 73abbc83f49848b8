//! Left shift paired with a left-hand key

use super::{last_key_or_fail, Rule, RuleError, Violation, ViolationKind};
use crate::keyboard::{KeyCode, KeyboardState};

/// Keys typed by the left hand on a standard layout
const LEFT_HAND_KEYS: &[KeyCode] = &[
    KeyCode::GRAVE,
    KeyCode::KEY_1,
    KeyCode::KEY_2,
    KeyCode::KEY_3,
    KeyCode::KEY_4,
    KeyCode::KEY_5,
    KeyCode::Q,
    KeyCode::W,
    KeyCode::E,
    KeyCode::R,
    KeyCode::T,
    KeyCode::A,
    KeyCode::S,
    KeyCode::D,
    KeyCode::F,
    KeyCode::G,
    KeyCode::KEY_102ND,
    KeyCode::Z,
    KeyCode::X,
    KeyCode::C,
    KeyCode::V,
];

/// Flags the left shift key used together with a key on the left half.
///
/// Shifted left-hand keys should be typed with the right shift.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeftShiftRule;

impl LeftShiftRule {
    pub fn is_left_hand_key(key: KeyCode) -> bool {
        LEFT_HAND_KEYS.contains(&key)
    }
}

impl Rule for LeftShiftRule {
    fn name(&self) -> &'static str {
        "left-shift"
    }

    fn description(&self) -> &'static str {
        "Left shift used with a key on the left side of the keyboard"
    }

    fn kind(&self) -> ViolationKind {
        ViolationKind::LeftShift
    }

    fn evaluate(&self, state: &KeyboardState) -> Result<Option<Violation>, RuleError> {
        let last = last_key_or_fail(state, self.name())?;
        if state.left_shift_down() && Self::is_left_hand_key(last) {
            return Ok(Some(Violation::new(self.kind(), self.description())));
        }
        Ok(None)
    }
}
