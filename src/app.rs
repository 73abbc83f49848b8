//! Capture loop tying state, rules and reporting together

use crate::keyboard::{DecodeError, EventDecoder, KeyEvent, KeyEventType, KeyboardState};
use crate::report::ViolationReporter;
use crate::rules::{RuleEngine, Violation};
use log::{info, trace, warn};
use std::io::{Read, Stdout, Write};
use std::time::Instant;

/// Main application
///
/// Owns every piece of mutable state; the loop runs on a single thread.
pub struct App<W: Write = Stdout> {
    /// Keyboard state tracker
    pub keyboard_state: KeyboardState,
    /// Enabled rules
    pub engine: RuleEngine,
    /// Violation counters and summaries
    pub reporter: ViolationReporter<W>,
    /// Application start time
    pub start_time: Instant,
}

impl<W: Write> App<W> {
    pub fn new(engine: RuleEngine, reporter: ViolationReporter<W>) -> Self {
        Self {
            keyboard_state: KeyboardState::new(),
            engine,
            reporter,
            start_time: Instant::now(),
        }
    }

    /// Process a key event and return the violations it produced.
    ///
    /// Rules only run on Down events.
    pub fn process_event(&mut self, event: &KeyEvent) -> Vec<Violation> {
        trace!("{:?} {}", event.event_type, event.key);
        self.keyboard_state.apply(event);

        if event.event_type != KeyEventType::Down {
            return Vec::new();
        }

        let violations = self.engine.evaluate(&self.keyboard_state);
        for violation in &violations {
            self.reporter.record(violation);
        }
        violations
    }

    /// Emit a summary if the throttle allows it; write failures are logged
    pub fn tick(&mut self, now: Instant) {
        if let Err(e) = self.reporter.maybe_emit_summary(now) {
            warn!("Failed to write summary: {}", e);
        }
    }

    /// Read and process events until the device fails.
    ///
    /// Only returns on a decode failure; there is no retry.
    pub fn run<R: Read>(&mut self, decoder: &mut EventDecoder<R>) -> Result<(), DecodeError> {
        info!("Listening with rules: {}", self.engine.rule_names().join(", "));
        loop {
            let event = match decoder.read_next() {
                Ok(event) => event,
                Err(e) => {
                    info!(
                        "Stopped after {} key events in {:.0}s, {} violation(s)",
                        self.keyboard_state.total_events(),
                        self.start_time.elapsed().as_secs_f64(),
                        self.reporter.total()
                    );
                    return Err(e);
                }
            };
            if let Some(event) = event {
                self.process_event(&event);
            }
            self.tick(Instant::now());
        }
    }
}
