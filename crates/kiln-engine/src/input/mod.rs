//! Input subsystem.
//!
//! Public API is platform-agnostic apart from [`Key::from_key_code`], which the
//! window platform uses to translate winit key events.

mod state;
mod types;

pub use state::InputState;
pub use types::{InputEvent, Key, KeyState};
