//! Input events: [`Msg`], [`Key`], [`MouseAction`].

use pathlab_core::Point;

/// A keyboard key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    /// A printable character, space included.
    Char(char),
}

/// A mouse action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// Primary (left) button pressed.
    Main,
    /// Mouse moved with the primary button held.
    Drag,
    /// Primary button released.
    Release,
}

/// A message delivered to the application model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    /// A key was pressed.
    KeyDown { key: Key },
    /// A mouse event at a screen position.
    Mouse { action: MouseAction, pos: Point },
    /// The terminal was resized.
    Screen { width: i32, height: i32 },
    /// A timer requested through [`Effect::Tick`](crate::Effect::Tick) fired.
    Tick,
    /// Sent once when the application starts.
    Init,
    /// Request to quit.
    Quit,
}

impl Msg {
    /// Convenience: a `KeyDown` for `key`.
    pub fn key(key: Key) -> Self {
        Self::KeyDown { key }
    }

    /// Convenience: a primary-button click at `(x, y)`.
    pub fn click(x: i32, y: i32) -> Self {
        Self::Mouse {
            action: MouseAction::Main,
            pos: Point::new(x, y),
        }
    }
}
