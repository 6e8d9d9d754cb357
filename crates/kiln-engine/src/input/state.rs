use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyState};

/// Current input state for a single window.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    pub fn apply_event(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // Release events are not delivered once focus is gone.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state } => match state {
                KeyState::Pressed => {
                    self.keys_down.insert(key);
                }
                KeyState::Released => {
                    self.keys_down.remove(&key);
                }
            },
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Queries by script key code; unknown codes read as released.
    pub fn code_down(&self, code: i64) -> bool {
        Key::from_code(code).is_some_and(|k| self.key_down(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: Key) -> InputEvent {
        InputEvent::Key { key, state: KeyState::Pressed }
    }

    fn release(key: Key) -> InputEvent {
        InputEvent::Key { key, state: KeyState::Released }
    }

    #[test]
    fn press_and_release() {
        let mut s = InputState::default();
        s.apply_event(press(Key::W));
        assert!(s.key_down(Key::W));
        assert!(s.code_down(87));

        s.apply_event(release(Key::W));
        assert!(!s.key_down(Key::W));
    }

    #[test]
    fn repeated_press_is_idempotent() {
        let mut s = InputState::default();
        s.apply_event(press(Key::Space));
        s.apply_event(press(Key::Space));
        s.apply_event(release(Key::Space));
        assert!(!s.key_down(Key::Space));
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut s = InputState::default();
        s.apply_event(InputEvent::Focused(true));
        s.apply_event(press(Key::A));
        s.apply_event(press(Key::Escape));

        s.apply_event(InputEvent::Focused(false));
        assert!(!s.focused);
        assert!(s.keys_down.is_empty());
    }

    #[test]
    fn unknown_code_reads_released() {
        let s = InputState::default();
        assert!(!s.code_down(1000));
    }
}
