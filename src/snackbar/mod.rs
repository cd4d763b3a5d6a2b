//! Snackbar component for Bubble Tea applications.
//!
//! A snackbar shows a short message at the edge of the screen, optionally
//! with an action control ("Undo") and a dismiss control. It closes itself
//! after a timeout, when a control is activated, or on Escape if
//! `close_on_escape` is set, and reports why it closed.
//!
//! # Lifecycle
//!
//! `open()` moves the bar to [`State::Opening`] and fires
//! [`Event::Opening`]. One frame later the bar is [`State::Open`] and
//! [`Event::Opened`] fires. The frame delay lets the first render show the
//! pre-open style before the open style is applied. Closing is immediate and
//! fires [`Event::Closed`] with a [`CloseReason`].
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//! use bubbletea_snackbar::snackbar::{self, CloseReason};
//!
//! struct App {
//!     snackbar: snackbar::Model,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut snackbar = snackbar::new();
//!         snackbar.set_label_text("Draft saved");
//!         snackbar.set_action_label(Some("Undo".into()));
//!         snackbar.set_close_on_escape(true);
//!         snackbar.on_closed(|reason| {
//!             if reason == CloseReason::Action {
//!                 // restore the draft
//!             }
//!         });
//!         let cmd = snackbar.open();
//!         (Self { snackbar }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.snackbar.update(&msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.snackbar.view()
//!     }
//! }
//! ```

pub mod config;
pub mod events;
pub mod keymap;
pub mod model;
pub mod types;
pub mod view;


pub use config::{
    Config, ConfigError, Timeout, DEFAULT_TIMEOUT_MS, MAX_TIMEOUT_MS, MIN_TIMEOUT_MS,
    TIMEOUT_DISABLED_MS,
};
pub use events::{Event, Observer, SubscriptionId};
pub use keymap::{default_key_map, KeyMap};
pub use model::{new, Model};
pub use types::{
    ActionMsg, CloseReason, DismissMsg, FrameMsg, ParseReasonError, State, TimeoutMsg,
};
pub use view::Styles;
