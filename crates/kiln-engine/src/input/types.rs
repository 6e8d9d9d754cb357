use std::fmt;

use winit::keyboard::KeyCode;

/// A key scripts can query.
///
/// Scripts address keys by integer code; the codes follow GLFW numbering so
/// existing scripts keep working (`A` is 65, `Escape` is 256).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
}

const LETTERS: [Key; 26] = [
    Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
    Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
    Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
];

impl Key {
    /// Every key with a script-visible code.
    pub const ALL: [Key; 33] = [
        Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
        Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
        Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
        Key::Escape, Key::Space, Key::Enter,
        Key::ArrowUp, Key::ArrowDown, Key::ArrowLeft, Key::ArrowRight,
    ];

    pub fn code(self) -> i64 {
        match self {
            Key::Space => 32,
            Key::Escape => 256,
            Key::Enter => 257,
            Key::ArrowRight => 262,
            Key::ArrowLeft => 263,
            Key::ArrowDown => 264,
            Key::ArrowUp => 265,
            letter => {
                let offset = LETTERS.iter().position(|k| *k == letter).unwrap_or(0);
                65 + offset as i64
            }
        }
    }

    pub fn from_code(code: i64) -> Option<Key> {
        match code {
            32 => Some(Key::Space),
            256 => Some(Key::Escape),
            257 => Some(Key::Enter),
            262 => Some(Key::ArrowRight),
            263 => Some(Key::ArrowLeft),
            264 => Some(Key::ArrowDown),
            265 => Some(Key::ArrowUp),
            65..=90 => Some(LETTERS[(code - 65) as usize]),
            _ => None,
        }
    }

    /// Name of the script global that carries this key's code.
    pub fn global_name(self) -> String {
        match self {
            Key::Escape => "KEY_ESC".to_string(),
            Key::Enter => "KEY_ENTER".to_string(),
            Key::Space => "KEY_SPACE".to_string(),
            Key::ArrowUp => "KEY_UP".to_string(),
            Key::ArrowDown => "KEY_DOWN".to_string(),
            Key::ArrowLeft => "KEY_LEFT".to_string(),
            Key::ArrowRight => "KEY_RIGHT".to_string(),
            letter => format!("KEY_{letter:?}"),
        }
    }

    pub fn from_key_code(code: KeyCode) -> Option<Key> {
        let key = match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
            KeyCode::Space => Key::Space,

            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,

            KeyCode::KeyA => Key::A,
            KeyCode::KeyB => Key::B,
            KeyCode::KeyC => Key::C,
            KeyCode::KeyD => Key::D,
            KeyCode::KeyE => Key::E,
            KeyCode::KeyF => Key::F,
            KeyCode::KeyG => Key::G,
            KeyCode::KeyH => Key::H,
            KeyCode::KeyI => Key::I,
            KeyCode::KeyJ => Key::J,
            KeyCode::KeyK => Key::K,
            KeyCode::KeyL => Key::L,
            KeyCode::KeyM => Key::M,
            KeyCode::KeyN => Key::N,
            KeyCode::KeyO => Key::O,
            KeyCode::KeyP => Key::P,
            KeyCode::KeyQ => Key::Q,
            KeyCode::KeyR => Key::R,
            KeyCode::KeyS => Key::S,
            KeyCode::KeyT => Key::T,
            KeyCode::KeyU => Key::U,
            KeyCode::KeyV => Key::V,
            KeyCode::KeyW => Key::W,
            KeyCode::KeyX => Key::X,
            KeyCode::KeyY => Key::Y,
            KeyCode::KeyZ => Key::Z,

            _ => return None,
        };
        Some(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Platform-agnostic input events emitted by the window platform.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InputEvent {
    Key { key: Key, state: KeyState },

    /// Window focus change.
    Focused(bool),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_codes_match_ascii() {
        assert_eq!(Key::A.code(), 65);
        assert_eq!(Key::M.code(), 77);
        assert_eq!(Key::Z.code(), 90);
        assert_eq!(Key::Escape.code(), 256);
    }

    #[test]
    fn codes_round_trip() {
        for key in Key::ALL {
            assert_eq!(Key::from_code(key.code()), Some(key), "{key}");
        }
    }

    #[test]
    fn unknown_codes_map_to_none() {
        for code in [-1, 0, 64, 91, 255, 300] {
            assert_eq!(Key::from_code(code), None);
        }
    }

    #[test]
    fn global_names() {
        assert_eq!(Key::A.global_name(), "KEY_A");
        assert_eq!(Key::Z.global_name(), "KEY_Z");
        assert_eq!(Key::Escape.global_name(), "KEY_ESC");
        assert_eq!(Key::ArrowLeft.global_name(), "KEY_LEFT");
    }

    #[test]
    fn winit_letters_translate() {
        assert_eq!(Key::from_key_code(KeyCode::KeyQ), Some(Key::Q));
        assert_eq!(Key::from_key_code(KeyCode::Escape), Some(Key::Escape));
        assert_eq!(Key::from_key_code(KeyCode::F5), None);
    }
}
