//! Core types for the snackbar component.

use bubbletea_rs::Msg;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Visibility state of a snackbar.
///
/// `Opening` lasts until the next frame message is applied. `Closing` only
/// exists for the duration of a close call and is never observed between
/// calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// Not visible. Initial state, and the state after every close.
    #[default]
    Closed,
    /// `open()` was called and the bar is waiting for the next frame.
    Opening,
    /// Fully visible.
    Open,
    /// Tearing down inside a close call.
    Closing,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                State::Closed => "closed",
                State::Opening => "opening",
                State::Open => "open",
                State::Closing => "closing",
            }
        )
    }
}

/// Why a snackbar closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CloseReason {
    /// Timed out, or the dismiss control or Escape was used.
    Dismiss,
    /// The action control was used.
    Action,
    /// Closed programmatically with no particular reason.
    #[default]
    Unspecified,
}

impl CloseReason {
    /// Wire form of the reason: `"dismiss"`, `"action"` or `""`.
    pub fn as_str(&self) -> &'static str {
        match self {
            CloseReason::Dismiss => "dismiss",
            CloseReason::Action => "action",
            CloseReason::Unspecified => "",
        }
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known close reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown close reason {0:?}")]
pub struct ParseReasonError(pub String);

impl FromStr for CloseReason {
    type Err = ParseReasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dismiss" => Ok(CloseReason::Dismiss),
            "action" => Ok(CloseReason::Action),
            "" => Ok(CloseReason::Unspecified),
            other => Err(ParseReasonError(other.to_string())),
        }
    }
}

/// Sent by the host when the action control of snackbar `id` is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionMsg {
    /// Target snackbar.
    pub id: usize,
}

/// Sent by the host when the dismiss control of snackbar `id` is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissMsg {
    /// Target snackbar.
    pub id: usize,
}

/// Delivered one frame after `open()` to finish the open transition.
#[derive(Debug, Clone, Copy)]
pub struct FrameMsg {
    /// The snackbar that scheduled this frame.
    pub id: usize,
    tag: usize,
}

impl FrameMsg {
    pub(crate) fn new(id: usize, tag: usize) -> Self {
        Self { id, tag }
    }

    pub(crate) fn tag(&self) -> usize {
        self.tag
    }
}

/// Delivered when the auto-close timeout elapses.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutMsg {
    /// The snackbar that started this timeout.
    pub id: usize,
    tag: usize,
}

impl TimeoutMsg {
    pub(crate) fn new(id: usize, tag: usize) -> Self {
        Self { id, tag }
    }

    pub(crate) fn tag(&self) -> usize {
        self.tag
    }
}

impl From<ActionMsg> for Msg {
    fn from(msg: ActionMsg) -> Self {
        Box::new(msg) as Msg
    }
}

impl From<DismissMsg> for Msg {
    fn from(msg: DismissMsg) -> Self {
        Box::new(msg) as Msg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_wire_strings() {
        assert_eq!(CloseReason::Dismiss.as_str(), "dismiss");
        assert_eq!(CloseReason::Action.as_str(), "action");
        assert_eq!(CloseReason::Unspecified.as_str(), "");
        assert_eq!(CloseReason::default(), CloseReason::Unspecified);
    }

    #[test]
    fn test_reason_parsing() {
        assert_eq!("dismiss".parse::<CloseReason>(), Ok(CloseReason::Dismiss));
        assert_eq!("action".parse::<CloseReason>(), Ok(CloseReason::Action));
        assert_eq!("".parse::<CloseReason>(), Ok(CloseReason::Unspecified));

        let err = "swipe".parse::<CloseReason>().unwrap_err();
        assert_eq!(err, ParseReasonError("swipe".to_string()));
        assert_eq!(err.to_string(), "unknown close reason \"swipe\"");
    }

    #[test]
    fn test_state_display() {
        assert_eq!(State::default(), State::Closed);
        assert_eq!(State::Opening.to_string(), "opening");
        assert_eq!(State::Open.to_string(), "open");
    }
}
