//! Key code definitions and names
//!
//! Codes follow the Linux keycode table from
//! `include/uapi/linux/input-event-codes.h`.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Represents a physical key code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const ESC: KeyCode = KeyCode(1);
    pub const KEY_1: KeyCode = KeyCode(2);
    pub const KEY_2: KeyCode = KeyCode(3);
    pub const KEY_3: KeyCode = KeyCode(4);
    pub const KEY_4: KeyCode = KeyCode(5);
    pub const KEY_5: KeyCode = KeyCode(6);
    pub const KEY_6: KeyCode = KeyCode(7);
    pub const KEY_7: KeyCode = KeyCode(8);
    pub const KEY_8: KeyCode = KeyCode(9);
    pub const KEY_9: KeyCode = KeyCode(10);
    pub const KEY_0: KeyCode = KeyCode(11);
    pub const MINUS: KeyCode = KeyCode(12);
    pub const EQUAL: KeyCode = KeyCode(13);
    pub const BACKSPACE: KeyCode = KeyCode(14);
    pub const TAB: KeyCode = KeyCode(15);
    pub const Q: KeyCode = KeyCode(16);
    pub const W: KeyCode = KeyCode(17);
    pub const E: KeyCode = KeyCode(18);
    pub const R: KeyCode = KeyCode(19);
    pub const T: KeyCode = KeyCode(20);
    pub const Y: KeyCode = KeyCode(21);
    pub const U: KeyCode = KeyCode(22);
    pub const I: KeyCode = KeyCode(23);
    pub const O: KeyCode = KeyCode(24);
    pub const P: KeyCode = KeyCode(25);
    pub const LEFT_BRACE: KeyCode = KeyCode(26);
    pub const RIGHT_BRACE: KeyCode = KeyCode(27);
    pub const ENTER: KeyCode = KeyCode(28);
    pub const LEFT_CTRL: KeyCode = KeyCode(29);
    pub const A: KeyCode = KeyCode(30);
    pub const S: KeyCode = KeyCode(31);
    pub const D: KeyCode = KeyCode(32);
    pub const F: KeyCode = KeyCode(33);
    pub const G: KeyCode = KeyCode(34);
    pub const H: KeyCode = KeyCode(35);
    pub const J: KeyCode = KeyCode(36);
    pub const K: KeyCode = KeyCode(37);
    pub const L: KeyCode = KeyCode(38);
    pub const SEMICOLON: KeyCode = KeyCode(39);
    pub const APOSTROPHE: KeyCode = KeyCode(40);
    pub const GRAVE: KeyCode = KeyCode(41);
    pub const LEFT_SHIFT: KeyCode = KeyCode(42);
    pub const BACKSLASH: KeyCode = KeyCode(43);
    pub const Z: KeyCode = KeyCode(44);
    pub const X: KeyCode = KeyCode(45);
    pub const C: KeyCode = KeyCode(46);
    pub const V: KeyCode = KeyCode(47);
    pub const B: KeyCode = KeyCode(48);
    pub const N: KeyCode = KeyCode(49);
    pub const M: KeyCode = KeyCode(50);
    pub const COMMA: KeyCode = KeyCode(51);
    pub const DOT: KeyCode = KeyCode(52);
    pub const SLASH: KeyCode = KeyCode(53);
    pub const RIGHT_SHIFT: KeyCode = KeyCode(54);
    pub const LEFT_ALT: KeyCode = KeyCode(56);
    pub const SPACE: KeyCode = KeyCode(57);
    pub const CAPS_LOCK: KeyCode = KeyCode(58);
    /// The extra key between left shift and Z on ISO layouts
    pub const KEY_102ND: KeyCode = KeyCode(86);
    pub const RIGHT_CTRL: KeyCode = KeyCode(97);
    pub const RIGHT_ALT: KeyCode = KeyCode(100);
    pub const UP: KeyCode = KeyCode(103);
    pub const LEFT: KeyCode = KeyCode(105);
    pub const RIGHT: KeyCode = KeyCode(106);
    pub const DOWN: KeyCode = KeyCode(108);
    pub const LEFT_META: KeyCode = KeyCode(125);
    pub const RIGHT_META: KeyCode = KeyCode(126);

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Display name of the key, `"Unknown"` for codes outside the keymap
    pub fn name(&self) -> &'static str {
        get_key_info(*self).name
    }
}

impl From<u16> for KeyCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.0)
    }
}

/// Information about a key
#[derive(Debug, Clone)]
pub struct KeyInfo {
    /// Display name for the key
    pub name: &'static str,
}

impl KeyInfo {
    const fn new(name: &'static str) -> Self {
        Self { name }
    }
}

/// Static keymap for the main block of a standard layout
pub static KEYMAP: LazyLock<HashMap<KeyCode, KeyInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    map.insert(KeyCode::ESC, KeyInfo::new("Escape"));

    // Number row
    map.insert(KeyCode::GRAVE, KeyInfo::new("Grave"));
    map.insert(KeyCode::KEY_1, KeyInfo::new("1"));
    map.insert(KeyCode::KEY_2, KeyInfo::new("2"));
    map.insert(KeyCode::KEY_3, KeyInfo::new("3"));
    map.insert(KeyCode::KEY_4, KeyInfo::new("4"));
    map.insert(KeyCode::KEY_5, KeyInfo::new("5"));
    map.insert(KeyCode::KEY_6, KeyInfo::new("6"));
    map.insert(KeyCode::KEY_7, KeyInfo::new("7"));
    map.insert(KeyCode::KEY_8, KeyInfo::new("8"));
    map.insert(KeyCode::KEY_9, KeyInfo::new("9"));
    map.insert(KeyCode::KEY_0, KeyInfo::new("0"));
    map.insert(KeyCode::MINUS, KeyInfo::new("Minus"));
    map.insert(KeyCode::EQUAL, KeyInfo::new("Equals"));
    map.insert(KeyCode::BACKSPACE, KeyInfo::new("Backspace"));

    // Top letter row
    map.insert(KeyCode::TAB, KeyInfo::new("Tab"));
    map.insert(KeyCode::Q, KeyInfo::new("Q"));
    map.insert(KeyCode::W, KeyInfo::new("W"));
    map.insert(KeyCode::E, KeyInfo::new("E"));
    map.insert(KeyCode::R, KeyInfo::new("R"));
    map.insert(KeyCode::T, KeyInfo::new("T"));
    map.insert(KeyCode::Y, KeyInfo::new("Y"));
    map.insert(KeyCode::U, KeyInfo::new("U"));
    map.insert(KeyCode::I, KeyInfo::new("I"));
    map.insert(KeyCode::O, KeyInfo::new("O"));
    map.insert(KeyCode::P, KeyInfo::new("P"));
    map.insert(KeyCode::LEFT_BRACE, KeyInfo::new("LeftBracket"));
    map.insert(KeyCode::RIGHT_BRACE, KeyInfo::new("RightBracket"));
    map.insert(KeyCode::BACKSLASH, KeyInfo::new("Backslash"));

    // Home row
    map.insert(KeyCode::CAPS_LOCK, KeyInfo::new("CapsLock"));
    map.insert(KeyCode::A, KeyInfo::new("A"));
    map.insert(KeyCode::S, KeyInfo::new("S"));
    map.insert(KeyCode::D, KeyInfo::new("D"));
    map.insert(KeyCode::F, KeyInfo::new("F"));
    map.insert(KeyCode::G, KeyInfo::new("G"));
    map.insert(KeyCode::H, KeyInfo::new("H"));
    map.insert(KeyCode::J, KeyInfo::new("J"));
    map.insert(KeyCode::K, KeyInfo::new("K"));
    map.insert(KeyCode::L, KeyInfo::new("L"));
    map.insert(KeyCode::SEMICOLON, KeyInfo::new("Semicolon"));
    map.insert(KeyCode::APOSTROPHE, KeyInfo::new("Apostrophe"));
    map.insert(KeyCode::ENTER, KeyInfo::new("Enter"));

    // Bottom letter row
    map.insert(KeyCode::LEFT_SHIFT, KeyInfo::new("LeftShift"));
    map.insert(KeyCode::KEY_102ND, KeyInfo::new("102nd"));
    map.insert(KeyCode::Z, KeyInfo::new("Z"));
    map.insert(KeyCode::X, KeyInfo::new("X"));
    map.insert(KeyCode::C, KeyInfo::new("C"));
    map.insert(KeyCode::V, KeyInfo::new("V"));
    map.insert(KeyCode::B, KeyInfo::new("B"));
    map.insert(KeyCode::N, KeyInfo::new("N"));
    map.insert(KeyCode::M, KeyInfo::new("M"));
    map.insert(KeyCode::COMMA, KeyInfo::new("Comma"));
    map.insert(KeyCode::DOT, KeyInfo::new("Period"));
    map.insert(KeyCode::SLASH, KeyInfo::new("Slash"));
    map.insert(KeyCode::RIGHT_SHIFT, KeyInfo::new("RightShift"));

    // Bottom row (modifiers + space)
    map.insert(KeyCode::LEFT_CTRL, KeyInfo::new("LeftCtrl"));
    map.insert(KeyCode::LEFT_META, KeyInfo::new("LeftMeta"));
    map.insert(KeyCode::LEFT_ALT, KeyInfo::new("LeftAlt"));
    map.insert(KeyCode::SPACE, KeyInfo::new("Space"));
    map.insert(KeyCode::RIGHT_ALT, KeyInfo::new("RightAlt"));
    map.insert(KeyCode::RIGHT_META, KeyInfo::new("RightMeta"));
    map.insert(KeyCode::RIGHT_CTRL, KeyInfo::new("RightCtrl"));

    // Arrow keys
    map.insert(KeyCode::UP, KeyInfo::new("Up"));
    map.insert(KeyCode::LEFT, KeyInfo::new("Left"));
    map.insert(KeyCode::DOWN, KeyInfo::new("Down"));
    map.insert(KeyCode::RIGHT, KeyInfo::new("Right"));

    map
});

/// Get key info by code, returns a default if not found
pub fn get_key_info(code: KeyCode) -> KeyInfo {
    KEYMAP
        .get(&code)
        .cloned()
        .unwrap_or_else(|| KeyInfo::new("Unknown"))
}
