//! Modal Controller
//!
//! Open/close state machine for every dialog on the page.
//! Timers are supplied by a [`ModalTimers`] host so transitions can be
//! driven by the browser or by a test clock.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Delay between removing the "show" class and hiding the dialog
pub const CLOSE_TRANSITION: Duration = Duration::from_millis(220);

/// hidden → opening → shown → closing → hidden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Hidden,
    /// In the layout, waiting one frame before the "show" class
    Opening,
    Shown,
    /// "show" class removed, hide timer pending
    Closing,
}

impl DialogState {
    /// Dialog takes part in layout (not `hidden`)
    pub fn is_visible(&self) -> bool {
        !matches!(self, DialogState::Hidden)
    }

    /// Dialog carries the "show" visual class
    pub fn is_shown(&self) -> bool {
        matches!(self, DialogState::Shown)
    }
}

/// Deferred callbacks the controller needs.
///
/// The host calls back [`ModalController::frame_ready`] and
/// [`ModalController::hide_elapsed`] when they fire.
pub trait ModalTimers {
    type Handle;

    /// Run `frame_ready(dialog)` on the next paint
    fn request_frame(&self, dialog: &str);

    /// Run `hide_elapsed(dialog)` after `delay`
    fn schedule_hide(&self, dialog: &str, delay: Duration) -> Self::Handle;

    fn cancel(&self, handle: Self::Handle);
}

pub struct ModalController<T: ModalTimers> {
    dialogs: BTreeMap<String, DialogState>,
    pending_hide: HashMap<String, T::Handle>,
    timers: T,
}

impl<T: ModalTimers> ModalController<T> {
    pub fn new(timers: T) -> Self {
        Self {
            dialogs: BTreeMap::new(),
            pending_hide: HashMap::new(),
            timers,
        }
    }

    /// Register a dialog (starts hidden)
    pub fn register(&mut self, id: impl Into<String>) {
        self.dialogs.entry(id.into()).or_default();
    }

    pub fn state(&self, id: &str) -> DialogState {
        self.dialogs.get(id).copied().unwrap_or_default()
    }

    /// Body scrolling stays suspended while this is true
    pub fn scroll_locked(&self) -> bool {
        self.dialogs.values().any(DialogState::is_visible)
    }

    fn cancel_pending(&mut self, id: &str) {
        if let Some(handle) = self.pending_hide.remove(id) {
            self.timers.cancel(handle);
        }
    }

    /// Returns true if state changed
    pub fn open(&mut self, id: &str) -> bool {
        let Some(state) = self.dialogs.get(id).copied() else {
            return false;
        };
        self.cancel_pending(id);
        if state.is_shown() {
            return false;
        }
        self.dialogs.insert(id.to_string(), DialogState::Opening);
        if state != DialogState::Opening {
            self.timers.request_frame(id);
        }
        true
    }

    /// Paint frame after `open`
    pub fn frame_ready(&mut self, id: &str) -> bool {
        match self.dialogs.get_mut(id) {
            Some(state) if *state == DialogState::Opening => {
                *state = DialogState::Shown;
                true
            }
            _ => false,
        }
    }

    /// Returns true if state changed or the hide timer restarted
    pub fn close(&mut self, id: &str) -> bool {
        match self.dialogs.get(id) {
            None | Some(DialogState::Hidden) => return false,
            Some(_) => {}
        }
        self.cancel_pending(id);
        self.dialogs.insert(id.to_string(), DialogState::Closing);
        let handle = self.timers.schedule_hide(id, CLOSE_TRANSITION);
        self.pending_hide.insert(id.to_string(), handle);
        true
    }

    /// Close timer fired
    pub fn hide_elapsed(&mut self, id: &str) -> bool {
        self.pending_hide.remove(id);
        match self.dialogs.get_mut(id) {
            Some(state) if *state == DialogState::Closing => {
                *state = DialogState::Hidden;
                true
            }
            _ => false,
        }
    }

    /// Escape key: close every opening or shown dialog
    pub fn close_all_open(&mut self) -> usize {
        let open: Vec<String> = self
            .dialogs
            .iter()
            .filter(|(_, s)| matches!(s, DialogState::Opening | DialogState::Shown))
            .map(|(id, _)| id.clone())
            .collect();
        for id in &open {
            self.close(id);
        }
        open.len()
    }
}
