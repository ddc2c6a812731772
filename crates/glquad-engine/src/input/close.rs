use super::types::{InputEvent, Key, KeyState};

/// The window's close-request flag.
///
/// Set by an OS close request or an Escape key press. Once set it never
/// clears; the runtime checks it before every frame.
#[derive(Debug, Default)]
pub struct CloseFlag {
    requested: bool,
}

impl CloseFlag {
    #[inline]
    pub fn request(&mut self) {
        self.requested = true;
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.requested
    }

    /// Applies the key bindings to `ev`. Returns true if this event set the flag.
    pub fn apply(&mut self, ev: &InputEvent) -> bool {
        if self.requested || !requests_close(ev) {
            return false;
        }
        self.requested = true;
        true
    }
}

/// The only bindings: Escape press and the OS close button.
pub fn requests_close(ev: &InputEvent) -> bool {
    matches!(
        ev,
        InputEvent::CloseRequested
            | InputEvent::Key {
                key: Key::Escape,
                state: KeyState::Pressed,
                ..
            }
    )
}
