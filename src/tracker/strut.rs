use x11rb::protocol::xproto::Window;

use super::WindowTracker;
use crate::{errors::StrutError, session::XConn};

impl<S: XConn> WindowTracker<S> {
    /// Reserve `thickness` pixels along the bottom screen edge for
    /// `window`, spanning `start..end` horizontally.
    ///
    /// Publishes both the legacy 4-word strut and the 12-word partial
    /// variant; window managers read whichever they support. This layer
    /// does not watch for geometry changes: callers re-invoke it whenever
    /// the dock's width or the screen changes.
    pub fn reserve(
        &self,
        window: Window,
        thickness: u32,
        start: u32,
        end: u32,
    ) -> Result<(), StrutError> {
        if end < start {
            return Err(StrutError::InvertedRange { start, end });
        }
        let session = match &self.session {
            Some(session) => session,
            None => return Ok(()),
        };
        let (screen_width, _) = session.screen_size();
        if end > u32::from(screen_width) {
            return Err(StrutError::OutOfScreen { end, screen_width });
        }

        // left, right, top, bottom
        let legacy = [0, 0, 0, thickness];
        // ... plus start/end pairs per edge; only the bottom pair is used
        let partial = [0, 0, 0, thickness, 0, 0, 0, 0, 0, 0, start, end];

        let atoms = session.atoms();
        session.replace_cardinals(window, atoms.net_wm_strut_partial, &partial);
        session.replace_cardinals(window, atoms.net_wm_strut, &legacy);
        session.flush();
        Ok(())
    }
}
