//! Core model and visibility state machine for the snackbar component.

use super::config::{Config, ConfigError, Timeout};
use super::events::{Event, Observer, Observers, SubscriptionId};
use super::keymap::{default_key_map, KeyMap};
use super::types::{ActionMsg, CloseReason, DismissMsg, FrameMsg, State, TimeoutMsg};
use super::view::Styles;
use crate::key;
use crate::scheduler::{Deferral, Scheduler, TickScheduler};
use bubbletea_rs::{batch, Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};

// Used to ensure that frame and timeout messages are only received by the
// snackbar that scheduled them.
static LAST_ID: AtomicUsize = AtomicUsize::new(0);

fn next_id() -> usize {
    LAST_ID.fetch_add(1, Ordering::Relaxed) + 1
}

/// A snackbar: one transient message with optional action and dismiss
/// controls.
///
/// The model owns its visibility state and its two deferrals, the frame that
/// completes an open and the auto-close timeout. Both are scheduled through
/// the injected [`Scheduler`] and come back as messages through
/// [`update`](Self::update). Every deferral carries this snackbar's id and a
/// tag; closing forgets the pending tags, which cancels anything still in
/// flight.
///
/// # Examples
///
/// ```rust
/// use bubbletea_snackbar::scheduler::ManualScheduler;
/// use bubbletea_snackbar::snackbar::{CloseReason, Model};
///
/// let scheduler = ManualScheduler::new();
/// let mut bar = Model::new().with_scheduler(scheduler.clone());
/// bar.set_label_text("Photo deleted");
///
/// let _cmd = bar.open();
/// assert!(!bar.is_open()); // waits for the next frame
///
/// for msg in scheduler.advance_frame() {
///     bar.update(&msg);
/// }
/// assert!(bar.is_open());
///
/// bar.close_with(CloseReason::Action);
/// assert!(!bar.is_open());
/// ```
///
/// Cloning copies the options and the scheduler but not the identity: the
/// clone gets a fresh id, starts closed and has no observers.
#[derive(Debug)]
pub struct Model {
    /// Styles used by [`view`](Self::view).
    pub styles: Styles,
    /// Width of the area the bar is laid out in. Zero fits the content.
    pub width: usize,

    id: usize,
    state: State,
    timeout: Timeout,
    close_on_escape: bool,
    label_text: String,
    action_label: Option<String>,
    dismiss_label: Option<String>,
    stacked: bool,
    leading: bool,
    keymap: KeyMap,

    // Last tag handed out; pending deferrals hold the tag they were sent with.
    tag: usize,
    pending_frame: Option<usize>,
    pending_timeout: Option<usize>,

    scheduler: Arc<dyn Scheduler>,
    observers: Observers,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            styles: Styles::default(),
            width: 0,
            id: next_id(),
            state: State::Closed,
            timeout: Timeout::default(),
            close_on_escape: false,
            label_text: String::new(),
            action_label: None,
            dismiss_label: None,
            stacked: false,
            leading: false,
            keymap: default_key_map(),
            tag: 0,
            pending_frame: None,
            pending_timeout: None,
            scheduler: Arc::new(TickScheduler::new()),
            observers: Observers::default(),
        }
    }
}

impl Clone for Model {
    fn clone(&self) -> Self {
        Self {
            styles: self.styles.clone(),
            width: self.width,
            id: next_id(),
            state: State::Closed,
            timeout: self.timeout,
            close_on_escape: self.close_on_escape,
            label_text: self.label_text.clone(),
            action_label: self.action_label.clone(),
            dismiss_label: self.dismiss_label.clone(),
            stacked: self.stacked,
            leading: self.leading,
            keymap: self.keymap.clone(),
            tag: 0,
            pending_frame: None,
            pending_timeout: None,
            scheduler: Arc::clone(&self.scheduler),
            observers: Observers::default(),
        }
    }
}

impl Model {
    /// Creates a closed snackbar with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a closed snackbar from a [`Config`].
    ///
    /// An out-of-range `timeout_ms` is clamped and logged, as with
    /// [`set_timeout_ms`](Self::set_timeout_ms).
    pub fn from_config(config: Config) -> Self {
        let mut model = Self::new();
        // The clamped value is kept and the warning already logged.
        let _ = model.set_timeout_ms(config.timeout_ms);
        model.close_on_escape = config.close_on_escape;
        model.label_text = config.label_text;
        model.stacked = config.stacked;
        model.leading = config.leading;
        model.set_action_label(config.action_label);
        model.set_dismiss_label(config.dismiss_label);
        model
    }

    /// Replaces the scheduler used for frame and timeout deferrals.
    pub fn with_scheduler(mut self, scheduler: impl Scheduler + 'static) -> Self {
        self.scheduler = Arc::new(scheduler);
        self
    }

    /// Unique identifier of this snackbar.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Current visibility state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Whether the bar is fully open. False while still waiting for the
    /// opening frame.
    pub fn is_open(&self) -> bool {
        self.state == State::Open
    }

    /// Whether an auto-close timeout is pending.
    pub fn has_pending_timeout(&self) -> bool {
        self.pending_timeout.is_some()
    }

    /// Whether the opening frame is pending.
    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Registers an observer for every lifecycle event.
    ///
    /// Observers run synchronously, in registration order, from inside the
    /// call that caused the event.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.observers.subscribe(Arc::new(observer) as Observer)
    }

    /// Registers an observer that only hears about closes.
    pub fn on_closed<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: Fn(CloseReason) + Send + Sync + 'static,
    {
        self.subscribe(move |event| {
            if let Event::Closed { reason } = event {
                observer(*reason);
            }
        })
    }

    /// Removes an observer. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Opens the snackbar.
    ///
    /// Does nothing while opening or open. Otherwise moves to
    /// [`State::Opening`], fires [`Event::Opening`] and returns a command that
    /// delivers the opening frame and, unless auto-close is disabled, the
    /// timeout.
    pub fn open(&mut self) -> Option<Cmd> {
        if self.state != State::Closed {
            debug!(snackbar_id = self.id, state = %self.state, "open ignored");
            return None;
        }

        self.pending_timeout = None;
        self.state = State::Opening;
        debug!(snackbar_id = self.id, "snackbar opening");
        self.observers.emit(&Event::Opening);

        let mut cmds = vec![self.schedule_frame()];
        if let Some(delay) = self.timeout.duration() {
            cmds.push(self.schedule_timeout(delay));
        }
        Some(batch(cmds))
    }

    /// Closes the snackbar with [`CloseReason::Unspecified`].
    pub fn close(&mut self) {
        self.close_with(CloseReason::Unspecified);
    }

    /// Closes the snackbar.
    ///
    /// Does nothing while closed. Otherwise cancels the pending frame and
    /// timeout, moves to [`State::Closed`] and fires [`Event::Closed`].
    pub fn close_with(&mut self, reason: CloseReason) {
        if matches!(self.state, State::Closed | State::Closing) {
            debug!(snackbar_id = self.id, %reason, "close ignored");
            return;
        }

        self.state = State::Closing;
        self.pending_frame = None;
        self.pending_timeout = None;
        self.state = State::Closed;
        debug!(snackbar_id = self.id, %reason, "snackbar closed");
        self.observers.emit(&Event::Closed { reason });
    }

    /// Activates the action control, closing with [`CloseReason::Action`].
    pub fn activate_action(&mut self) {
        self.close_with(CloseReason::Action);
    }

    /// Activates the dismiss control, closing with [`CloseReason::Dismiss`].
    pub fn activate_dismiss(&mut self) {
        self.close_with(CloseReason::Dismiss);
    }

    /// Handles frame, timeout, control and key messages.
    ///
    /// Frame and timeout messages are ignored unless they were scheduled by
    /// this snackbar during the current cycle. Never returns a command; the
    /// return type matches the other components.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(frame) = msg.downcast_ref::<FrameMsg>() {
            if frame.id != self.id || self.pending_frame != Some(frame.tag()) {
                trace!(snackbar_id = self.id, tag = frame.tag(), "stale frame discarded");
                return None;
            }
            self.pending_frame = None;
            self.state = State::Open;
            debug!(snackbar_id = self.id, "snackbar opened");
            self.observers.emit(&Event::Opened);
            return None;
        }

        if let Some(timeout) = msg.downcast_ref::<TimeoutMsg>() {
            if timeout.id != self.id || self.pending_timeout != Some(timeout.tag()) {
                trace!(snackbar_id = self.id, tag = timeout.tag(), "stale timeout discarded");
                return None;
            }
            self.pending_timeout = None;
            self.close_with(CloseReason::Dismiss);
            return None;
        }

        if let Some(action) = msg.downcast_ref::<ActionMsg>() {
            if action.id == self.id {
                self.activate_action();
            }
            return None;
        }

        if let Some(dismiss) = msg.downcast_ref::<DismissMsg>() {
            if dismiss.id == self.id {
                self.activate_dismiss();
            }
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            self.handle_key(key_msg);
        }

        None
    }

    fn handle_key(&mut self, key_msg: &KeyMsg) {
        if !self.is_open() {
            return;
        }
        if self.close_on_escape && self.keymap.close.matches(key_msg) {
            self.close_with(CloseReason::Dismiss);
        } else if self.keymap.action.matches(key_msg) {
            self.activate_action();
        } else if self.keymap.dismiss.matches(key_msg) {
            self.activate_dismiss();
        }
    }

    fn next_tag(&mut self) -> usize {
        self.tag += 1;
        self.tag
    }

    fn schedule_frame(&mut self) -> Cmd {
        let id = self.id;
        let tag = self.next_tag();
        self.pending_frame = Some(tag);
        self.scheduler.schedule(
            Deferral::NextFrame,
            Box::new(move || Box::new(FrameMsg::new(id, tag)) as Msg),
        )
    }

    fn schedule_timeout(&mut self, delay: Duration) -> Cmd {
        let id = self.id;
        let tag = self.next_tag();
        self.pending_timeout = Some(tag);
        self.scheduler.schedule(
            Deferral::After(delay),
            Box::new(move || Box::new(TimeoutMsg::new(id, tag)) as Msg),
        )
    }

    /// The auto-close setting.
    pub fn timeout(&self) -> Timeout {
        self.timeout
    }

    /// The auto-close delay in milliseconds, `-1` when disabled.
    pub fn timeout_ms(&self) -> i64 {
        self.timeout.as_millis()
    }

    /// Sets the auto-close delay in milliseconds.
    ///
    /// Accepts `-1` or a value in `[4000, 10000]`. Anything else is clamped
    /// into range, logged, and reported as an error; the clamped value is
    /// still applied. The new value takes effect on the next `open()`.
    pub fn set_timeout_ms(&mut self, ms: i64) -> Result<(), ConfigError> {
        match Timeout::from_millis(ms) {
            Ok(timeout) => {
                self.timeout = timeout;
                Ok(())
            }
            Err(err) => {
                self.timeout = err.fallback_timeout();
                warn!(snackbar_id = self.id, timeout_ms = ms, error = %err, "invalid snackbar timeout");
                Err(err)
            }
        }
    }

    /// Whether Escape closes the open snackbar.
    pub fn close_on_escape(&self) -> bool {
        self.close_on_escape
    }

    /// Sets whether Escape closes the open snackbar.
    pub fn set_close_on_escape(&mut self, close_on_escape: bool) {
        self.close_on_escape = close_on_escape;
    }

    /// The message text.
    pub fn label_text(&self) -> &str {
        &self.label_text
    }

    /// Replaces the message text. Safe while open; the next view shows it.
    pub fn set_label_text(&mut self, label_text: impl Into<String>) {
        self.label_text = label_text.into();
    }

    /// Text of the action control, if shown.
    pub fn action_label(&self) -> Option<&str> {
        self.action_label.as_deref()
    }

    /// Shows an action control with the given text, or hides it with `None`.
    pub fn set_action_label(&mut self, label: Option<String>) {
        self.keymap.action.set_enabled(label.is_some());
        self.action_label = label;
    }

    /// Text of the dismiss control, if shown.
    pub fn dismiss_label(&self) -> Option<&str> {
        self.dismiss_label.as_deref()
    }

    /// Shows a dismiss control with the given text, or hides it with `None`.
    pub fn set_dismiss_label(&mut self, label: Option<String>) {
        self.keymap.dismiss.set_enabled(label.is_some());
        self.dismiss_label = label;
    }

    /// Whether the controls are laid out below the label.
    pub fn stacked(&self) -> bool {
        self.stacked
    }

    /// Lays the controls out below the label.
    pub fn set_stacked(&mut self, stacked: bool) {
        self.stacked = stacked;
    }

    /// Key bindings handled by [`update`](Self::update).
    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    /// Replaces the key bindings.
    ///
    /// The `action` and `dismiss` bindings are enabled only while their
    /// control is shown, whatever the flags on `keymap` say.
    pub fn set_keymap(&mut self, keymap: KeyMap) {
        self.keymap = keymap;
        self.keymap.action.set_enabled(self.action_label.is_some());
        self.keymap.dismiss.set_enabled(self.dismiss_label.is_some());
    }

    /// Whether the bar is aligned to the leading edge.
    pub fn leading(&self) -> bool {
        self.leading
    }

    /// Aligns the bar to the leading edge instead of centring it.
    pub fn set_leading(&mut self, leading: bool) {
        self.leading = leading;
    }
}

impl key::KeyMap for Model {
    fn short_help(&self) -> Vec<&key::Binding> {
        let mut bindings = Vec::new();
        if self.keymap.action.enabled() {
            bindings.push(&self.keymap.action);
        }
        if self.keymap.dismiss.enabled() {
            bindings.push(&self.keymap.dismiss);
        }
        if self.close_on_escape && self.keymap.close.enabled() {
            bindings.push(&self.keymap.close);
        }
        bindings
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![self.short_help()]
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        (Self::new(), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(&msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

/// Creates a closed snackbar with default options.
pub fn new() -> Model {
    Model::new()
}
