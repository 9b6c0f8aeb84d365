use anyhow::Context;
use x11rb::{
    connection::Connection,
    errors::ConnectionError,
    protocol::{xproto::*, Event},
    rust_connection::{DefaultStream, RustConnection},
    wrapper::ConnectionExt as _,
};

/// Protocol identifiers interned once when the session is opened.
///
/// `CARDINAL`, `WINDOW`, `STRING` and `WM_CLASS` are predefined and come
/// from [`AtomEnum`] instead.
#[derive(Debug)]
pub struct Atoms {
    pub net_client_list: Atom,
    pub net_active_window: Atom,
    pub wm_change_state: Atom,
    pub net_wm_strut: Atom,
    pub net_wm_strut_partial: Atom,
    pub net_wm_window_type: Atom,
    pub net_wm_window_type_dock: Atom,
    pub net_wm_name: Atom,
    pub utf8_string: Atom,
}

impl Atoms {
    fn new(conn: &RustConnection) -> anyhow::Result<Self> {
        let intern = |name: &str| -> anyhow::Result<Atom> {
            Ok(conn.intern_atom(false, name.as_bytes())?.reply()?.atom)
        };

        Ok(Self {
            net_client_list: intern("_NET_CLIENT_LIST")?,
            net_active_window: intern("_NET_ACTIVE_WINDOW")?,
            wm_change_state: intern("WM_CHANGE_STATE")?,
            net_wm_strut: intern("_NET_WM_STRUT")?,
            net_wm_strut_partial: intern("_NET_WM_STRUT_PARTIAL")?,
            net_wm_window_type: intern("_NET_WM_WINDOW_TYPE")?,
            net_wm_window_type_dock: intern("_NET_WM_WINDOW_TYPE_DOCK")?,
            net_wm_name: intern("_NET_WM_NAME")?,
            utf8_string: intern("UTF8_STRING")?,
        })
    }
}

/// The X11 operations the window-tracking core is built on.
///
/// [`XSession`] implements this over a live connection; tests substitute a
/// recording fake. Every method fails softly: queries return `None`,
/// requests return `false`. The one place a hard error surfaces is
/// [`XConn::poll_event`], because a broken transport there means the whole
/// session is gone and callers have to stop relying on it.
pub trait XConn {
    fn root(&self) -> Window;

    /// Width and height of the screen in pixels.
    fn screen_size(&self) -> (u16, u16);

    fn atoms(&self) -> &Atoms;

    /// A 32-bit formatted property of `window`, or `None` if the window or
    /// the property is gone.
    fn property32(&self, window: Window, property: Atom, ty: Atom) -> Option<Vec<u32>>;

    /// An 8-bit formatted property of `window`.
    fn property8(&self, window: Window, property: Atom, ty: Atom) -> Option<Vec<u8>>;

    /// Sends a client message about `window`, addressed to the root window
    /// so the window manager picks it up.
    fn send_client_message(
        &self,
        window: Window,
        message_type: Atom,
        data: [u32; 5],
        event_mask: u32,
    ) -> bool;

    /// Replaces a CARDINAL array property on `window`.
    fn replace_cardinals(&self, window: Window, property: Atom, values: &[u32]) -> bool;

    /// Asks the server for PropertyNotify events on the root window.
    fn watch_root_properties(&self) -> bool;

    /// The next already-buffered event, `Ok(None)` when the queue is empty.
    fn poll_event(&self) -> Result<Option<Event>, ConnectionError>;

    /// Forces queued requests out to the server. The window manager only
    /// reacts to requests that actually arrive, and under a cooperative
    /// event loop a buffered request can otherwise sit unsent indefinitely.
    fn flush(&self);
}

/// Exclusive owner of the connection to the X server.
///
/// Not thread-safe; every caller lives on the thread that opened it. The
/// connection closes when the session drops, on every exit path.
#[derive(Debug)]
pub struct XSession {
    conn: RustConnection,
    screen_num: usize,
    atoms: Atoms,
}

impl XSession {
    /// Connect to the display and intern the protocol atoms.
    ///
    /// This is the single fatal failure point of the core: callers that
    /// cannot get a session run with a disabled tracker instead of
    /// crashing.
    pub fn open(dpy_name: Option<&str>) -> anyhow::Result<Self> {
        let (conn, screen_num) =
            RustConnection::connect(dpy_name).context("Failed to connect to the X server")?;
        let atoms = Atoms::new(&conn).context("Failed to intern atoms")?;

        Ok(Self {
            conn,
            screen_num,
            atoms,
        })
    }

    pub fn conn(&self) -> &RustConnection {
        &self.conn
    }

    pub fn screen(&self) -> &Screen {
        &self.conn.setup().roots[self.screen_num]
    }

    /// The readable end registered with the event loop.
    pub fn stream(&self) -> &DefaultStream {
        self.conn.stream()
    }
}

impl XConn for XSession {
    fn root(&self) -> Window {
        self.screen().root
    }

    fn screen_size(&self) -> (u16, u16) {
        let screen = self.screen();
        (screen.width_in_pixels, screen.height_in_pixels)
    }

    fn atoms(&self) -> &Atoms {
        &self.atoms
    }

    fn property32(&self, window: Window, property: Atom, ty: Atom) -> Option<Vec<u32>> {
        let reply = self
            .conn
            .get_property(false, window, property, ty, 0, u32::MAX)
            .ok()?
            .reply()
            .ok()?;
        let values = reply.value32()?.collect();
        Some(values)
    }

    fn property8(&self, window: Window, property: Atom, ty: Atom) -> Option<Vec<u8>> {
        let reply = self
            .conn
            .get_property(false, window, property, ty, 0, u32::MAX)
            .ok()?
            .reply()
            .ok()?;
        let values = reply.value8()?.collect();
        Some(values)
    }

    fn send_client_message(
        &self,
        window: Window,
        message_type: Atom,
        data: [u32; 5],
        event_mask: u32,
    ) -> bool {
        let event = ClientMessageEvent {
            response_type: CLIENT_MESSAGE_EVENT,
            format: 32,
            sequence: 0,
            window,
            type_: message_type,
            data: ClientMessageData::from(data),
        };

        match self.conn.send_event(false, self.root(), event_mask, event) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Failed to send a client message for window {}: {}", window, e);
                false
            }
        }
    }

    fn replace_cardinals(&self, window: Window, property: Atom, values: &[u32]) -> bool {
        let result = self.conn.change_property32(
            PropMode::REPLACE,
            window,
            property,
            AtomEnum::CARDINAL,
            values,
        );
        match result {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Failed to set property {} on window {}: {}", property, window, e);
                false
            }
        }
    }

    fn watch_root_properties(&self) -> bool {
        let change =
            ChangeWindowAttributesAux::new().event_mask(u32::from(EventMask::PROPERTY_CHANGE));
        let subscribed = match self.conn.change_window_attributes(self.root(), &change) {
            Ok(cookie) => cookie.check().is_ok(),
            Err(_) => false,
        };
        if !subscribed {
            log::warn!("Failed to subscribe to root window property changes");
        }
        subscribed
    }

    fn poll_event(&self) -> Result<Option<Event>, ConnectionError> {
        self.conn.poll_for_event()
    }

    fn flush(&self) {
        if let Err(e) = self.conn.flush() {
            log::warn!("Failed to flush the connection: {}", e);
        }
    }
}
