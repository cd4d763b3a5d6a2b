#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-snackbar/")]

//! # bubbletea-snackbar
//!
//! A snackbar widget for terminal applications built with
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs): a transient
//! message with optional action and dismiss controls, an auto-close timeout
//! and optional Escape handling.
//!
//! ## Overview
//!
//! The widget follows the Elm Architecture pattern used by the other
//! bubbletea components, with `update()` and `view()` methods and deferred
//! work returned as commands. Its core is a small visibility state machine:
//!
//! | State | Entered by | Left by |
//! |-------|------------|---------|
//! | `Closed` | start, any close | `open()` |
//! | `Opening` | `open()` | next frame, any close |
//! | `Open` | next frame | any close |
//!
//! Lifecycle events (`Opening`, `Opened`, `Closed { reason }`) are delivered
//! synchronously to registered observers.
//!
//! ## Scheduling
//!
//! The frame that completes an open and the auto-close timeout both go
//! through a [`Scheduler`](scheduler::Scheduler) injected at construction.
//! Running programs use the default [`TickScheduler`](scheduler::TickScheduler);
//! tests use [`ManualScheduler`](scheduler::ManualScheduler) to step virtual
//! time:
//!
//! ```rust
//! use bubbletea_snackbar::prelude::*;
//! use std::time::Duration;
//!
//! let scheduler = ManualScheduler::new();
//! let mut bar = Snackbar::new().with_scheduler(scheduler.clone());
//! bar.set_label_text("Link copied");
//!
//! let _cmd = bar.open();
//! for msg in scheduler.advance_frame() {
//!     bar.update(&msg);
//! }
//! assert!(bar.is_open());
//!
//! // The default timeout is five seconds.
//! for msg in scheduler.advance(Duration::from_secs(5)) {
//!     bar.update(&msg);
//! }
//! assert!(!bar.is_open());
//! ```
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! bubbletea-snackbar = "0.1.0"
//! bubbletea-rs = "0.0.7"
//! crossterm = "0.29"
//! ```

pub mod key;
pub mod scheduler;
pub mod snackbar;

pub use key::{Binding, Help as KeyHelp, KeyMap};
pub use scheduler::{Deferral, ManualScheduler, Scheduler, TickScheduler};
pub use snackbar::{
    new as snackbar_new, ActionMsg as SnackbarActionMsg, CloseReason, Config as SnackbarConfig,
    ConfigError, DismissMsg as SnackbarDismissMsg, Event as SnackbarEvent, Model as Snackbar,
    State as SnackbarState, Styles as SnackbarStyles, Timeout,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_snackbar::prelude::*;
///
/// let bar = snackbar_new();
/// assert_eq!(bar.state(), SnackbarState::Closed);
/// ```
pub mod prelude {
    pub use crate::key::{Binding, KeyMap};
    pub use crate::scheduler::{Deferral, ManualScheduler, Scheduler, TickScheduler};
    pub use crate::snackbar::{
        new as snackbar_new, ActionMsg as SnackbarActionMsg, CloseReason,
        Config as SnackbarConfig, ConfigError, DismissMsg as SnackbarDismissMsg,
        Event as SnackbarEvent, Model as Snackbar, State as SnackbarState,
        Styles as SnackbarStyles, Timeout,
    };
}
