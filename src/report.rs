//! Violation counting and throttled summaries

use crate::alert::{AlertSink, NoAlert};
use crate::rules::{Violation, ViolationKind};
use chrono::Local;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

/// Default minimum spacing between summaries
pub const DEFAULT_SUMMARY_INTERVAL: Duration = Duration::from_secs(120);

/// Counts violations and periodically writes a summary.
///
/// Counters only ever grow; they reset when the process restarts. The
/// summary throttle is shared by all violation kinds.
pub struct ViolationReporter<W: Write = Stdout> {
    counts: BTreeMap<ViolationKind, u64>,
    last_summary: Option<Instant>,
    interval: Duration,
    alert: Box<dyn AlertSink>,
    out: W,
}

impl ViolationReporter<Stdout> {
    /// Reporter printing to stdout
    pub fn stdout(interval: Duration, alert: Box<dyn AlertSink>) -> Self {
        Self::new(interval, alert, io::stdout())
    }
}

impl<W: Write> ViolationReporter<W> {
    pub fn new(interval: Duration, alert: Box<dyn AlertSink>, out: W) -> Self {
        Self {
            counts: BTreeMap::new(),
            last_summary: None,
            interval,
            alert,
            out,
        }
    }

    /// Reporter without alerts, using the default interval
    pub fn silent(out: W) -> Self {
        Self::new(DEFAULT_SUMMARY_INTERVAL, Box::new(NoAlert), out)
    }

    /// Count a violation and fire the alert sink
    pub fn record(&mut self, violation: &Violation) {
        *self.counts.entry(violation.kind).or_insert(0) += 1;
        debug!("Violation: {}", violation);

        if let Err(e) = self.alert.alert(violation) {
            warn!("Alert failed: {}", e);
        }
    }

    /// Write a summary unless one was written less than `interval` before `now`.
    ///
    /// Returns whether a summary was written. The first call always writes.
    /// A failed write still counts as an attempt, so a broken output is
    /// retried at most once per interval.
    pub fn maybe_emit_summary(&mut self, now: Instant) -> io::Result<bool> {
        if let Some(last) = self.last_summary {
            if now.saturating_duration_since(last) < self.interval {
                return Ok(false);
            }
        }

        self.last_summary = Some(now);
        self.write_summary()?;
        Ok(true)
    }

    fn write_summary(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "[{}] Vimprover summary",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        for kind in ViolationKind::all() {
            writeln!(self.out, "  {}: {}", kind, self.count(*kind))?;
        }
        self.out.flush()
    }

    /// Occurrences recorded for `kind`
    pub fn count(&self, kind: ViolationKind) -> u64 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Occurrences recorded across all kinds
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Output written so far
    pub fn output(&self) -> &W {
        &self.out
    }
}
