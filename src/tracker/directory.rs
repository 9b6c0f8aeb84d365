use x11rb::protocol::xproto::{AtomEnum, Window};

use super::WindowTracker;
use crate::session::XConn;

impl<S: XConn> WindowTracker<S> {
    /// The top-level windows, in the order the window manager reports them.
    ///
    /// An empty list means "nothing to show" whether the property is unset,
    /// the lookup failed, or the core is disabled; callers are not supposed
    /// to tell those apart.
    pub fn list_windows(&self) -> Vec<Window> {
        let session = match &self.session {
            Some(session) => session,
            None => return Vec::new(),
        };
        session
            .property32(
                session.root(),
                session.atoms().net_client_list,
                AtomEnum::WINDOW.into(),
            )
            .unwrap_or_default()
    }

    /// The application class of `window`, lower-cased.
    ///
    /// `None` when the window vanished between enumeration and this call,
    /// or never had a class hint. The race is routine, not an error.
    pub fn resolve_class(&self, window: Window) -> Option<String> {
        let session = self.session.as_ref()?;
        let raw = session.property8(window, AtomEnum::WM_CLASS.into(), AtomEnum::STRING.into())?;

        // WM_CLASS holds two NUL-terminated strings: instance, then class
        let mut fields = raw.split(|byte| *byte == 0);
        let _instance = fields.next()?;
        let class = fields.next()?;
        if class.is_empty() {
            return None;
        }
        Some(String::from_utf8_lossy(class).to_lowercase())
    }

    /// The currently focused window, if the window manager reports one.
    pub fn active_window(&self) -> Option<Window> {
        let session = self.session.as_ref()?;
        let value = session.property32(
            session.root(),
            session.atoms().net_active_window,
            AtomEnum::WINDOW.into(),
        )?;
        match value.into_iter().next() {
            None | Some(0) => None,
            Some(window) => Some(window),
        }
    }
}
