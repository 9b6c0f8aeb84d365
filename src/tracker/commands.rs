use x11rb::protocol::xproto::{EventMask, Window};

use super::WindowTracker;
use crate::session::XConn;

/// _NET_ACTIVE_WINDOW source indicator for a normal application.
const SOURCE_APPLICATION: u32 = 2;
/// ICCCM WM_CHANGE_STATE iconic state.
const ICONIC_STATE: u32 = 3;

impl<S: XConn> WindowTracker<S> {
    /// Ask the window manager to raise and focus `window`.
    ///
    /// Fire-and-forget: `true` means the request went out, not that the
    /// window manager honored it. The protocol has no acknowledgement.
    pub fn activate(&self, window: Window) -> bool {
        let session = match &self.session {
            Some(session) => session,
            None => return false,
        };
        let sent = session.send_client_message(
            window,
            session.atoms().net_active_window,
            [SOURCE_APPLICATION, 0, 0, 0, 0],
            u32::from(EventMask::SUBSTRUCTURE_REDIRECT | EventMask::SUBSTRUCTURE_NOTIFY),
        );
        if sent {
            session.flush();
        }
        sent
    }

    /// Ask the window manager to iconify `window`.
    pub fn minimize(&self, window: Window) -> bool {
        let session = match &self.session {
            Some(session) => session,
            None => return false,
        };
        let sent = session.send_client_message(
            window,
            session.atoms().wm_change_state,
            [ICONIC_STATE, 0, 0, 0, 0],
            u32::from(EventMask::SUBSTRUCTURE_REDIRECT | EventMask::SUBSTRUCTURE_NOTIFY),
        );
        if sent {
            session.flush();
        }
        sent
    }
}
