use x11rb::protocol::xproto::Window;

use crate::{config::Config, session::XConn, tracker::WindowTracker};

/// One taskbar button: a window and the class naming its application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    pub window: Window,
    pub class: String,
}

/// The filtered window list the dock displays.
///
/// Filtering is policy and deliberately lives above the tracker: the
/// tracker reports every top-level window, this type decides which of them
/// deserve a button. The dock itself and desktop chrome (other panels, the
/// desktop background, the shell) are excluded.
#[derive(Debug)]
pub struct Taskbar {
    own_class: String,
    deny_classes: Vec<String>,
    entries: Vec<TaskEntry>,
    active: Option<Window>,
}

impl Taskbar {
    pub fn new(config: &Config) -> Self {
        Self {
            own_class: config.class_name.to_lowercase(),
            deny_classes: config
                .deny_classes
                .iter()
                .map(|class| class.to_lowercase())
                .collect(),
            entries: Vec::new(),
            active: None,
        }
    }

    /// Rebuild the entry list from a fresh enumeration.
    ///
    /// Windows can vanish between enumeration and the class query; those
    /// drop out silently.
    pub fn refresh<S: XConn>(&mut self, tracker: &WindowTracker<S>) {
        let mut entries = Vec::new();
        for window in tracker.list_windows() {
            let class = match tracker.resolve_class(window) {
                Some(class) => class,
                None => continue,
            };
            if class.contains(&self.own_class) || self.deny_classes.contains(&class) {
                continue;
            }
            entries.push(TaskEntry { window, class });
        }
        self.active = tracker.active_window();
        self.entries = entries;
    }

    pub fn entries(&self) -> &[TaskEntry] {
        &self.entries
    }

    pub fn active(&self) -> Option<Window> {
        self.active
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Map a click x-coordinate on the dock to the entry under it, with
    /// every entry getting an equal share of the dock's width.
    pub fn entry_at(&self, x: i16, panel_width: u16) -> Option<&TaskEntry> {
        if self.entries.is_empty() || x < 0 || panel_width == 0 {
            return None;
        }
        let cell = (usize::from(panel_width) / self.entries.len()).max(1);
        self.entries.get(usize::from(x as u16) / cell)
    }
}
