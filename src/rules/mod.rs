//! Keyboard habit rules
//!
//! Each rule is a pure check over the current [`KeyboardState`]. The
//! [`RuleEngine`] runs every enabled rule in registration order and collects
//! the violations; rules never see each other's results.

mod left_shift;
mod repeated_keypress;
mod right_shift;

pub use left_shift::LeftShiftRule;
pub use repeated_keypress::{RepeatedKeypressRule, DEFAULT_REPEAT_LIMIT};
pub use right_shift::RightShiftRule;

use crate::config::RulesConfig;
use crate::keyboard::{KeyCode, KeyboardState};
use log::debug;
use std::fmt;
use thiserror::Error;

/// Kinds of violation the built-in rules report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViolationKind {
    LeftShift,
    RightShift,
    RepeatedKeypress,
}

impl ViolationKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LeftShift => "left-shift misuse",
            Self::RightShift => "right-shift misuse",
            Self::RepeatedKeypress => "repeated keypress",
        }
    }

    pub fn all() -> &'static [ViolationKind] {
        &[Self::LeftShift, Self::RightShift, Self::RepeatedKeypress]
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One detected instance of a bad habit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Error evaluating a rule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The rule ran before any keystroke was recorded
    #[error("{rule} rule ran before any keystroke was recorded")]
    FailedPrecondition { rule: &'static str },
}

/// Common trait for all rules
pub trait Rule {
    /// Name of the rule
    fn name(&self) -> &'static str;

    /// Short description
    fn description(&self) -> &'static str;

    /// Kind of violation this rule reports
    fn kind(&self) -> ViolationKind;

    /// Check the current state.
    ///
    /// Must not depend on any other rule having run first.
    fn evaluate(&self, state: &KeyboardState) -> Result<Option<Violation>, RuleError>;
}

/// Returns the newest recorded key, or the precondition error for `rule`
pub(crate) fn last_key_or_fail(
    state: &KeyboardState,
    rule: &'static str,
) -> Result<KeyCode, RuleError> {
    state
        .last_key()
        .ok_or(RuleError::FailedPrecondition { rule })
}

/// Ordered registry of enabled rules
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleEngine {
    /// Engine with no rules
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Engine with all built-in rules at their default settings
    pub fn with_default_rules() -> Self {
        Self::from_config(&RulesConfig::default())
    }

    /// Engine with the built-in rules enabled in `config`
    pub fn from_config(config: &RulesConfig) -> Self {
        let mut engine = Self::empty();
        if config.left_shift {
            engine.register(LeftShiftRule);
        }
        if config.right_shift {
            engine.register(RightShiftRule);
        }
        if config.repeated_keypress {
            engine.register(RepeatedKeypressRule::new(config.repeat_limit));
        }
        engine
    }

    /// Append a rule; it runs after those already registered
    pub fn register(&mut self, rule: impl Rule + 'static) {
        self.rules.push(Box::new(rule));
    }

    /// Names of registered rules in evaluation order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule against `state`.
    ///
    /// A rule whose precondition fails is skipped; the others still run.
    pub fn evaluate(&self, state: &KeyboardState) -> Vec<Violation> {
        let mut violations = Vec::new();
        for rule in &self.rules {
            match rule.evaluate(state) {
                Ok(Some(violation)) => {
                    debug!("{} rule triggered", rule.name());
                    violations.push(violation);
                }
                Ok(None) => {}
                Err(e) => debug!("Skipping {} rule: {}", rule.name(), e),
            }
        }
        violations
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::test_helpers::{down, pressed, state_from};

    /// Rule that always fires, used to check engine plumbing
    struct AlwaysRule;

    impl Rule for AlwaysRule {
        fn name(&self) -> &'static str {
            "always"
        }

        fn description(&self) -> &'static str {
            "Fires on every evaluation"
        }

        fn kind(&self) -> ViolationKind {
            ViolationKind::RepeatedKeypress
        }

        fn evaluate(&self, state: &KeyboardState) -> Result<Option<Violation>, RuleError> {
            last_key_or_fail(state, self.name())?;
            Ok(Some(Violation::new(self.kind(), "always")))
        }
    }

    #[test]
    fn default_engine_has_builtin_rules_in_order() {
        let engine = RuleEngine::with_default_rules();
        assert_eq!(
            engine.rule_names(),
            vec!["left-shift", "right-shift", "repeated-keypress"]
        );
    }

    #[test]
    fn config_flags_disable_rules() {
        let config = RulesConfig {
            left_shift: false,
            repeated_keypress: false,
            ..RulesConfig::default()
        };
        let engine = RuleEngine::from_config(&config);
        assert_eq!(engine.rule_names(), vec!["right-shift"]);
    }

    #[test]
    fn empty_history_yields_no_violations() {
        let engine = RuleEngine::with_default_rules();
        let state = KeyboardState::new();
        assert!(engine.evaluate(&state).is_empty());
    }

    #[test]
    fn every_builtin_rule_fails_precondition_on_empty_history() {
        let state = KeyboardState::new();
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(LeftShiftRule),
            Box::new(RightShiftRule),
            Box::new(RepeatedKeypressRule::default()),
        ];
        for rule in rules {
            assert_eq!(
                rule.evaluate(&state),
                Err(RuleError::FailedPrecondition { rule: rule.name() })
            );
        }
    }

    #[test]
    fn custom_rules_can_be_registered() {
        let mut engine = RuleEngine::empty();
        engine.register(AlwaysRule);
        assert_eq!(engine.len(), 1);

        let violations = engine.evaluate(&pressed(&[KeyCode::A]));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "always");
    }

    #[test]
    fn engine_collects_violations_from_several_rules() {
        let mut engine = RuleEngine::with_default_rules();
        engine.register(AlwaysRule);

        let state = state_from(&[down(KeyCode::LEFT_SHIFT), down(KeyCode::A)]);
        let kinds: Vec<_> = engine.evaluate(&state).into_iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![ViolationKind::LeftShift, ViolationKind::RepeatedKeypress]
        );
    }

    #[test]
    fn precondition_error_message_names_rule() {
        let err = RuleError::FailedPrecondition { rule: "left-shift" };
        assert_eq!(
            err.to_string(),
            "left-shift rule ran before any keystroke was recorded"
        );
    }

    #[test]
    fn violation_display() {
        let v = Violation::new(ViolationKind::RightShift, "oops");
        assert_eq!(v.to_string(), "right-shift misuse: oops");
    }
}
