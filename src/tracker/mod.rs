mod commands;
mod directory;
mod strut;
mod watcher;

use crate::session::XConn;

/// The window-tracking core of the dock.
///
/// Owns the session for its whole lifetime. `session` being `None` means
/// the core is disabled: every query returns empty/absent and every request
/// reports failure, so a dock without an X server degrades to an empty
/// taskbar instead of crashing. Disablement happens in exactly two places,
/// a failed connection open and a lost connection mid-run.
pub struct WindowTracker<S: XConn> {
    session: Option<S>,
    change_callback: Option<Box<dyn FnMut()>>,
}

impl<S: XConn> WindowTracker<S> {
    pub fn new(session: S) -> Self {
        Self {
            session: Some(session),
            change_callback: None,
        }
    }

    /// A tracker with no session behind it.
    #[allow(dead_code)]
    pub fn disabled() -> Self {
        Self {
            session: None,
            change_callback: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&S> {
        self.session.as_ref()
    }

    /// Register the closure invoked after the window set or the active
    /// window changes. Registering again silently replaces the previous
    /// closure; there is one slot.
    ///
    /// The closure gets no arguments: callers re-query through
    /// [`Self::list_windows`] and [`Self::active_window`] to learn what
    /// changed.
    pub fn register_change_callback<F: FnMut() + 'static>(&mut self, callback: F) {
        self.change_callback = Some(Box::new(callback));
    }

    fn disable(&mut self) {
        self.session = None;
        self.change_callback = None;
    }
}
