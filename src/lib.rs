//! Vimprover - passive keystroke observer
//!
//! Reads raw key events from a Linux input device, keeps a short rolling
//! history plus shift state, and flags avoidable habits such as pressing
//! left shift with a left-hand key. Input is never intercepted or altered.

#[cfg(not(target_os = "linux"))]
compile_error!("vimprover reads evdev devices and only works on Linux");

pub mod alert;
pub mod app;
pub mod config;
pub mod error;
pub mod keyboard;
pub mod report;
pub mod rules;

pub use app::App;
pub use config::Config;
pub use error::Error;
