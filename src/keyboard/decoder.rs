//! Raw evdev record decoding
//!
//! An input device node yields a stream of fixed-size `struct input_event`
//! records in native byte order. Only `EV_KEY` records are turned into
//! [`KeyEvent`]s; everything else (sync markers, LED state, scan codes) is
//! skipped.

use super::{KeyCode, KeyEvent, KeyEventType};
use log::{trace, warn};
use nix::libc;
use std::fs::File;
use std::io::{self, Read};
use std::mem;
use std::path::Path;
use thiserror::Error;

/// Event class tag for key events
pub const EV_KEY: u16 = 0x01;

/// Size of one kernel input record (24 bytes on 64-bit Linux)
pub const INPUT_EVENT_SIZE: usize = mem::size_of::<libc::input_event>();

const TYPE_OFFSET: usize = mem::offset_of!(libc::input_event, type_);
const CODE_OFFSET: usize = mem::offset_of!(libc::input_event, code);
const VALUE_OFFSET: usize = mem::offset_of!(libc::input_event, value);

/// Error reading records from an input device
///
/// Both variants are fatal: the stream is fixed-width, so once a read comes
/// back short there is no way to find the next record boundary.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The device returned fewer bytes than one record (including end of stream)
    #[error("short read from input device: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    /// The read itself failed
    #[error("failed to read from input device: {0}")]
    Io(#[from] io::Error),
}

/// A raw input record with the timestamp stripped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawInputEvent {
    pub event_type: u16,
    pub code: u16,
    pub value: i32,
}

impl RawInputEvent {
    /// Build a key record for the given key and event type
    pub fn key(key: KeyCode, event_type: KeyEventType) -> Self {
        Self {
            event_type: EV_KEY,
            code: key.as_u16(),
            value: event_type.as_raw(),
        }
    }

    /// Parse a record from its native-endian byte layout
    pub fn from_bytes(bytes: &[u8; INPUT_EVENT_SIZE]) -> Self {
        Self {
            event_type: u16::from_ne_bytes([bytes[TYPE_OFFSET], bytes[TYPE_OFFSET + 1]]),
            code: u16::from_ne_bytes([bytes[CODE_OFFSET], bytes[CODE_OFFSET + 1]]),
            value: i32::from_ne_bytes([
                bytes[VALUE_OFFSET],
                bytes[VALUE_OFFSET + 1],
                bytes[VALUE_OFFSET + 2],
                bytes[VALUE_OFFSET + 3],
            ]),
        }
    }

    /// Serialize to the kernel layout with a zero timestamp
    pub fn to_bytes(&self) -> [u8; INPUT_EVENT_SIZE] {
        let mut bytes = [0u8; INPUT_EVENT_SIZE];
        bytes[TYPE_OFFSET..TYPE_OFFSET + 2].copy_from_slice(&self.event_type.to_ne_bytes());
        bytes[CODE_OFFSET..CODE_OFFSET + 2].copy_from_slice(&self.code.to_ne_bytes());
        bytes[VALUE_OFFSET..VALUE_OFFSET + 4].copy_from_slice(&self.value.to_ne_bytes());
        bytes
    }

    pub fn is_key(&self) -> bool {
        self.event_type == EV_KEY
    }

    /// Convert to a key event.
    ///
    /// Returns `None` for non-key records and for key records whose value is
    /// not one of up (0), down (1) or hold (2). The latter are logged and
    /// dropped rather than treated as fatal.
    pub fn to_key_event(&self) -> Option<KeyEvent> {
        if !self.is_key() {
            return None;
        }
        match KeyEventType::try_from(self.value) {
            Ok(event_type) => Some(KeyEvent::new(KeyCode(self.code), event_type)),
            Err(value) => {
                warn!(
                    "Dropping key record for code {} with unknown value {}",
                    self.code, value
                );
                None
            }
        }
    }
}

/// Reads key events from an input device, one record per call
pub struct EventDecoder<R> {
    reader: R,
    buffer: [u8; INPUT_EVENT_SIZE],
    records_read: u64,
}

impl EventDecoder<File> {
    /// Open a device node for reading
    pub fn open(path: &Path) -> io::Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> EventDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: [0u8; INPUT_EVENT_SIZE],
            records_read: 0,
        }
    }

    /// Block until the next record arrives and decode it.
    ///
    /// `Ok(None)` means a record was read but was not a usable key event;
    /// the caller should simply read again.
    pub fn read_next(&mut self) -> Result<Option<KeyEvent>, DecodeError> {
        let raw = self.read_record()?;
        Ok(raw.to_key_event())
    }

    /// Read one raw record without filtering
    pub fn read_record(&mut self) -> Result<RawInputEvent, DecodeError> {
        loop {
            match self.reader.read(&mut self.buffer) {
                Ok(n) if n == INPUT_EVENT_SIZE => break,
                Ok(n) => {
                    return Err(DecodeError::ShortRead {
                        expected: INPUT_EVENT_SIZE,
                        actual: n,
                    })
                }
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(DecodeError::Io(e)),
            }
        }

        self.records_read += 1;
        let raw = RawInputEvent::from_bytes(&self.buffer);
        trace!(
            "record #{}: type={} code={} value={}",
            self.records_read,
            raw.event_type,
            raw.code,
            raw.value
        );
        Ok(raw)
    }

    /// Number of complete records read so far
    pub fn records_read(&self) -> u64 {
        self.records_read
    }
}
