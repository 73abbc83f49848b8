//! Top-level error type

use crate::config::ConfigError;
use crate::keyboard::{DecodeError, LocateError};
use std::io;
use thiserror::Error;

/// Errors that stop Vimprover from starting or keep it from running
#[derive(Error, Debug)]
pub enum Error {
    /// Not allowed to read raw input devices
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// No usable keyboard device
    #[error(transparent)]
    Locate(#[from] LocateError),

    /// The device stream broke
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
