use anyhow::Context;
use x11rb::{
    connection::Connection,
    protocol::xproto::*,
    wrapper::ConnectionExt as _,
    COPY_DEPTH_FROM_PARENT,
};

use crate::{
    config::Config,
    session::{XConn, XSession},
};

/// The dock's own window: undecorated, bottom-centered, declared as a dock
/// so the window manager keeps it above others and out of taskbars and
/// pagers.
#[derive(Debug)]
pub struct Panel {
    window: Window,
    x: i16,
    y: i16,
    width: u16,
    height: u16,
}

impl Panel {
    pub fn create(session: &XSession, config: &Config) -> anyhow::Result<Self> {
        let conn = session.conn();
        let screen = session.screen();
        let (screen_width, screen_height) = session.screen_size();

        let width = ((f64::from(screen_width) * config.width_ratio) as u16)
            .min(screen_width)
            .max(1);
        let height = config.height.max(1);
        let x = (screen_width.saturating_sub(width) / 2) as i16;
        let y = screen_height.saturating_sub(height) as i16;

        let window = conn.generate_id().context("Failed to allocate a window id")?;
        let aux = CreateWindowAux::new()
            .event_mask(
                EventMask::BUTTON_PRESS | EventMask::EXPOSURE | EventMask::STRUCTURE_NOTIFY,
            )
            .background_pixel(screen.black_pixel);
        conn.create_window(
            COPY_DEPTH_FROM_PARENT,
            window,
            screen.root,
            x,
            y,
            width,
            height,
            0,
            WindowClass::INPUT_OUTPUT,
            0, // visual: copy from parent
            &aux,
        )
        .context("Failed to create the dock window")?;

        let atoms = session.atoms();
        // instance and class halves of WM_CLASS
        let class = format!("{}\0{}\0", config.class_name, config.class_name);
        conn.change_property8(
            PropMode::REPLACE,
            window,
            AtomEnum::WM_CLASS,
            AtomEnum::STRING,
            class.as_bytes(),
        )?;
        conn.change_property8(
            PropMode::REPLACE,
            window,
            atoms.net_wm_name,
            atoms.utf8_string,
            config.class_name.as_bytes(),
        )?;
        conn.change_property32(
            PropMode::REPLACE,
            window,
            atoms.net_wm_window_type,
            AtomEnum::ATOM,
            &[atoms.net_wm_window_type_dock],
        )?;

        conn.map_window(window).context("Failed to map the dock window")?;
        session.flush();

        Ok(Self {
            window,
            x,
            y,
            width,
            height,
        })
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Horizontal span of the dock, for the partial strut.
    pub fn span(&self) -> (u32, u32) {
        let left = self.x.max(0) as u32;
        (left, left + u32::from(self.width))
    }

    /// Re-assert the dock's position and stacking. Window managers that
    /// auto-place new windows can move the dock between the map request and
    /// the first configure.
    pub fn align(&self, session: &XSession) {
        let aux = ConfigureWindowAux::new()
            .x(i32::from(self.x))
            .y(i32::from(self.y))
            .width(u32::from(self.width))
            .height(u32::from(self.height))
            .stack_mode(StackMode::ABOVE);
        if let Err(e) = session.conn().configure_window(self.window, &aux) {
            log::warn!("Failed to reposition the dock window: {}", e);
        }
        session.flush();
    }
}
