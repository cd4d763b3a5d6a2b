//! Key bindings for the snackbar.
//!
//! A [`Binding`] pairs one or more key codes with the short help text shown
//! in a help bar. Bindings can be disabled without being removed, which the
//! snackbar uses to ignore control keys when the matching control is absent.

use bubbletea_rs::KeyMsg;
use crossterm::event::KeyCode;

/// Help text attached to a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// The key as it should be displayed, e.g. `"esc"`.
    pub key: String,
    /// What the key does, e.g. `"close"`.
    pub desc: String,
}

/// A set of keys that trigger the same action.
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyCode>,
    help: Help,
    enabled: bool,
}

impl Binding {
    /// Creates an enabled binding for the given keys.
    pub fn new(keys: Vec<KeyCode>) -> Self {
        Self {
            keys,
            help: Help::default(),
            enabled: true,
        }
    }

    /// Sets the help text.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Returns the bound key codes.
    pub fn keys(&self) -> &[KeyCode] {
        &self.keys
    }

    /// Returns the help text.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Enables or disables the binding. A disabled binding never matches.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns whether the binding is enabled.
    pub fn enabled(&self) -> bool {
        self.enabled && !self.keys.is_empty()
    }

    /// Reports whether `key_msg` triggers this binding.
    pub fn matches(&self, key_msg: &KeyMsg) -> bool {
        self.enabled() && self.keys.contains(&key_msg.key)
    }
}

/// Something that can describe its key bindings for a help view.
pub trait KeyMap {
    /// Bindings for a compact, single-line help view.
    fn short_help(&self) -> Vec<&Binding>;

    /// Bindings grouped into columns for an expanded help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_binding_matches_any_of_its_keys() {
        let binding = Binding::new(vec![KeyCode::Esc, KeyCode::Char('q')]).with_help("esc", "close");

        assert!(binding.matches(&key(KeyCode::Esc)));
        assert!(binding.matches(&key(KeyCode::Char('q'))));
        assert!(!binding.matches(&key(KeyCode::Enter)));
        assert_eq!(binding.help().key, "esc");
        assert_eq!(binding.help().desc, "close");
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut binding = Binding::new(vec![KeyCode::Enter]);
        binding.set_enabled(false);

        assert!(!binding.enabled());
        assert!(!binding.matches(&key(KeyCode::Enter)));

        binding.set_enabled(true);
        assert!(binding.matches(&key(KeyCode::Enter)));
    }

    #[test]
    fn test_binding_without_keys_is_inert() {
        let binding = Binding::new(vec![]);
        assert!(!binding.enabled());
        assert!(!binding.matches(&key(KeyCode::Esc)));
    }
}
