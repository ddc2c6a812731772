/// Keyboard key identifier.
///
/// Only keys with a binding get a variant. Everything else is carried as
/// `Key::Other` with the platform key code so logs stay meaningful.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Other(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Platform-agnostic input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        repeat: bool,
    },

    /// The OS asked the window to close (title-bar button, Alt+F4, ...).
    CloseRequested,
}
