//! Repeated presses of a navigation key

use super::{last_key_or_fail, Rule, RuleError, Violation, ViolationKind};
use crate::keyboard::{KeyCode, KeyboardState, HISTORY_LEN};

/// Consecutive presses of the same watched key that count as a violation
pub const DEFAULT_REPEAT_LIMIT: usize = 5;

/// Vim-style navigation keys; hammering them usually means a motion was missed
const WATCHED_KEYS: &[KeyCode] = &[KeyCode::H, KeyCode::J, KeyCode::K, KeyCode::L];

/// Flags one of H, J, K, L pressed `limit` times in a row.
///
/// The check re-fires on every further press while the streak lasts.
#[derive(Debug, Clone, Copy)]
pub struct RepeatedKeypressRule {
    limit: usize,
}

impl RepeatedKeypressRule {
    /// `limit` is clamped to `1..=HISTORY_LEN`, since older presses are never kept
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.clamp(1, HISTORY_LEN),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn is_watched(key: KeyCode) -> bool {
        WATCHED_KEYS.contains(&key)
    }
}

impl Default for RepeatedKeypressRule {
    fn default() -> Self {
        Self::new(DEFAULT_REPEAT_LIMIT)
    }
}

impl Rule for RepeatedKeypressRule {
    fn name(&self) -> &'static str {
        "repeated-keypress"
    }

    fn description(&self) -> &'static str {
        "Repetition of keys H, J, K, L was detected"
    }

    fn kind(&self) -> ViolationKind {
        ViolationKind::RepeatedKeypress
    }

    fn evaluate(&self, state: &KeyboardState) -> Result<Option<Violation>, RuleError> {
        let last = last_key_or_fail(state, self.name())?;
        if !Self::is_watched(last) {
            return Ok(None);
        }

        let streak = state.recent_keys().take_while(|&k| k == last).count();
        if streak >= self.limit {
            return Ok(Some(Violation::new(self.kind(), self.description())));
        }
        Ok(None)
    }
}
