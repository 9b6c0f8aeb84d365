use x11rb::protocol::{xproto::Atom, Event};

use super::WindowTracker;
use crate::session::XConn;

impl<S: XConn> WindowTracker<S> {
    /// Subscribe to property changes on the root window. Call once after
    /// construction; the subscription lives until the session dies.
    pub fn subscribe(&self) -> bool {
        match &self.session {
            Some(session) => session.watch_root_properties(),
            None => false,
        }
    }

    /// Drain every queued event from the connection.
    ///
    /// The drain stops exactly when the queue is empty: reading one event
    /// per readiness wake leaves the loop spinning on a still-ready source,
    /// reading past the buffer would block. The change callback fires at
    /// most once per drain however many watched properties changed in the
    /// batch (login can land a burst of them at once). Events the tracker
    /// does not consume are returned for the caller to handle.
    ///
    /// A transport error here means the connection is gone: the core
    /// disables itself and goes quiet instead of taking the host loop down.
    pub fn dispatch_pending(&mut self) -> Vec<Event> {
        let mut leftover = Vec::new();
        let mut changed = false;

        loop {
            let polled = match &self.session {
                Some(session) => session.poll_event(),
                None => return leftover,
            };
            match polled {
                Ok(Some(Event::PropertyNotify(event))) if self.is_watched(event.atom) => {
                    changed = true;
                }
                Ok(Some(Event::Error(error))) => {
                    log::warn!("X11 error event: {:?}", error);
                }
                Ok(Some(event)) => leftover.push(event),
                Ok(None) => break,
                Err(error) => {
                    log::warn!("Lost the X server connection: {}", error);
                    self.disable();
                    break;
                }
            }
        }

        if changed && self.session.is_some() {
            if let Some(callback) = &mut self.change_callback {
                callback();
            }
        }
        leftover
    }

    fn is_watched(&self, atom: Atom) -> bool {
        match &self.session {
            Some(session) => {
                let atoms = session.atoms();
                atom == atoms.net_client_list || atom == atoms.net_active_window
            }
            None => false,
        }
    }
}
