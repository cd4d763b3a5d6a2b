//! Key bindings for the snackbar component.

use crate::key::Binding;
use crossterm::event::KeyCode;

/// Keys the snackbar reacts to while open.
///
/// `close` only applies when `close_on_escape` is set. `action` and
/// `dismiss` only apply while the matching control is shown; the model
/// keeps their enabled flag in sync with the control labels.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Close with reason `dismiss`.
    pub close: Binding,
    /// Activate the action control.
    pub action: Binding,
    /// Activate the dismiss control.
    pub dismiss: Binding,
}

/// The default bindings: `esc` closes, `enter` activates the action, `x`
/// activates the dismiss control.
pub fn default_key_map() -> KeyMap {
    let mut action = Binding::new(vec![KeyCode::Enter]).with_help("enter", "action");
    let mut dismiss = Binding::new(vec![KeyCode::Char('x')]).with_help("x", "dismiss");
    action.set_enabled(false);
    dismiss.set_enabled(false);

    KeyMap {
        close: Binding::new(vec![KeyCode::Esc]).with_help("esc", "close"),
        action,
        dismiss,
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        default_key_map()
    }
}
