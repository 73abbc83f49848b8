//! Side effects fired on each violation
//!
//! Alerts are fire-and-forget: the capture loop never waits on them and a
//! failing alert is only logged.

use crate::rules::Violation;
use log::{debug, warn};
use std::io;
use std::process::{Command, Stdio};
use std::thread;
use thiserror::Error;

/// Error raised by an alert sink
#[derive(Error, Debug)]
pub enum AlertError {
    #[error("alert command is empty")]
    EmptyCommand,

    #[error("failed to start alert command `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Receives a notification for every recorded violation.
///
/// Implementations must return promptly; anything slow belongs on another
/// thread or process.
pub trait AlertSink {
    fn alert(&mut self, violation: &Violation) -> Result<(), AlertError>;
}

/// Sink that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAlert;

impl AlertSink for NoAlert {
    fn alert(&mut self, _violation: &Violation) -> Result<(), AlertError> {
        Ok(())
    }
}

/// Runs an external command, e.g. a sound player, for each violation
#[derive(Debug, Clone)]
pub struct CommandAlert {
    program: String,
    args: Vec<String>,
}

impl CommandAlert {
    /// Build from `[program, args...]`
    pub fn new(command: &[String]) -> Result<Self, AlertError> {
        let (program, args) = command.split_first().ok_or(AlertError::EmptyCommand)?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl AlertSink for CommandAlert {
    fn alert(&mut self, violation: &Violation) -> Result<(), AlertError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| AlertError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        debug!("Started `{}` for {}", self.program, violation.kind);

        // Reap the child off the capture thread
        let program = self.program.clone();
        thread::spawn(move || match child.wait() {
            Ok(status) if !status.success() => warn!("Alert `{}` exited with {}", program, status),
            Ok(_) => {}
            Err(e) => warn!("Failed to wait for alert `{}`: {}", program, e),
        });

        Ok(())
    }
}

/// Build the sink described by `command`; an empty command means no alerts
pub fn from_command(command: &[String]) -> Box<dyn AlertSink> {
    match CommandAlert::new(command) {
        Ok(alert) => Box::new(alert),
        Err(_) => Box::new(NoAlert),
    }
}
