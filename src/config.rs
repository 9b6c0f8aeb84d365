use std::{fs, path::PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::utils::{default_config_path, expand_tilde};

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Height of the dock in pixels
    pub(crate) height: u16,
    /// Dock width as a fraction of the screen width, 0.0 to 1.0
    pub(crate) width_ratio: f64,
    /// The WM_CLASS the dock claims for its own window
    pub(crate) class_name: String,
    /// Window classes that never get a taskbar button
    pub(crate) deny_classes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            height: 60, // pixels
            width_ratio: 1.0,
            class_name: "rdock".to_owned(),
            deny_classes: vec![
                "desktop_window".to_owned(),
                "dock".to_owned(),
                "gnome-shell".to_owned(),
                "xfce4-panel".to_owned(),
            ],
        }
    }
}

impl Config {
    /// Load the configuration from `path`, or from the default location if
    /// a file exists there. Keeps the defaults otherwise.
    pub fn load(&mut self, path: Option<PathBuf>) -> anyhow::Result<()> {
        let path = match path {
            Some(path) => expand_tilde(&path),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(()),
            },
        };

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        *self = toml::from_str(&raw)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(())
    }
}
