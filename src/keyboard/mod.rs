//! Keyboard event capture and state management

mod event;
mod state;
pub mod decoder;
pub mod keymap;
pub mod locator;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use decoder::{DecodeError, EventDecoder, RawInputEvent, EV_KEY, INPUT_EVENT_SIZE};
pub use event::{KeyEvent, KeyEventType};
pub use keymap::{get_key_info, KeyCode, KeyInfo, KEYMAP};
pub use locator::{Device, DeviceChooser, DeviceLocator, LocateError};
pub use state::{KeyboardState, HISTORY_LEN};
