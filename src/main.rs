mod config;
mod errors;
mod panel;
mod session;
mod taskbar;
mod tracker;
mod utils;

use std::{cell::Cell, path::PathBuf, rc::Rc};

use anyhow::Context;
use structopt::StructOpt;
use x11rb::protocol::Event;

use config::Config;
use panel::Panel;
use session::{XConn, XSession};
use taskbar::Taskbar;
use tracker::WindowTracker;

/// Poller key for the X connection.
const X11_SOURCE: usize = 1;

#[derive(StructOpt, Debug)]
struct Opt {
    /// Optional path to a config file
    config: Option<PathBuf>,
    /// Prints the default configuration in stdout and exits
    #[structopt(short, long)]
    print: bool,
}

fn main() -> anyhow::Result<()> {
    let options: Opt = Opt::from_args();
    if options.print {
        let config = Config::default();
        println!("{}", toml::to_string(&config)?);
        return Ok(());
    }

    let _logger = flexi_logger::Logger::try_with_env_or_str("info")
        .context("Failed to build the logger")?
        .start()
        .context("Failed to start the logger")?;

    let mut config = Config::default();
    config
        .load(options.config.clone())
        .with_context(|| format!("Failed to load configuration file {:?}", options.config))?;

    // Without a display there is nothing the dock could show; a toolkit
    // embedding the tracker would construct WindowTracker::disabled()
    // here and keep going with an empty taskbar.
    let session = XSession::open(None).context("Cannot open the X display")?;
    let panel = Panel::create(&session, &config).context("Failed to create the dock window")?;
    let mut tracker = WindowTracker::new(session);

    if !tracker.subscribe() {
        log::warn!("Window change notifications unavailable; the taskbar will not refresh");
    }

    let dirty = Rc::new(Cell::new(false));
    {
        let dirty = Rc::clone(&dirty);
        tracker.register_change_callback(move || dirty.set(true));
    }

    let (strut_start, strut_end) = panel.span();
    if let Err(e) = tracker.reserve(
        panel.window(),
        u32::from(panel.height()),
        strut_start,
        strut_end,
    ) {
        log::warn!("Could not reserve screen space for the dock: {}", e);
    }

    let mut taskbar = Taskbar::new(&config);
    taskbar.refresh(&tracker);
    log::info!("Tracking {} windows", taskbar.len());

    let poller = polling::Poller::new().context("Failed to create the event poller")?;
    if let Some(session) = tracker.session() {
        poller
            .add(session.stream(), polling::Event::readable(X11_SOURCE))
            .context("Failed to register the X connection with the poller")?;
    }
    let mut poll_events = Vec::new();

    // Main loop
    loop {
        {
            let session = match tracker.session() {
                Some(session) => session,
                None => break,
            };
            session.flush();
            poller.wait(&mut poll_events, None).context("Poller wait failed")?;
            // The poller disarms a source once it fires, so re-arm it
            for poll_event in poll_events.drain(..) {
                if poll_event.key == X11_SOURCE {
                    poller.modify(session.stream(), polling::Event::readable(X11_SOURCE))?;
                }
            }
        }

        for event in tracker.dispatch_pending() {
            match event {
                Event::ButtonPress(press) if press.event == panel.window() => {
                    if let Some(entry) = taskbar.entry_at(press.event_x, panel.width()) {
                        let sent = match press.detail {
                            1 => tracker.activate(entry.window),
                            2 | 3 => tracker.minimize(entry.window),
                            _ => continue,
                        };
                        if !sent {
                            log::debug!("Request for window {} was not sent", entry.window);
                        }
                    }
                }
                Event::MapNotify(map) if map.window == panel.window() => {
                    // Some window managers auto-place fresh windows; put the
                    // dock back and re-publish its strut
                    if let Some(session) = tracker.session() {
                        panel.align(session);
                    }
                    let (start, end) = panel.span();
                    if let Err(e) =
                        tracker.reserve(panel.window(), u32::from(panel.height()), start, end)
                    {
                        log::warn!("Could not reserve screen space for the dock: {}", e);
                    }
                }
                _ => {}
            }
        }

        if !tracker.is_enabled() {
            log::error!("The X server connection is gone; shutting down");
            break;
        }

        if dirty.replace(false) {
            taskbar.refresh(&tracker);
            log::debug!(
                "Taskbar refreshed: {} windows, active {:?}",
                taskbar.len(),
                taskbar.active()
            );
        }
    }

    Ok(())
}
