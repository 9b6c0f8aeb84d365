use std::path::{Path, PathBuf};

/// Expand a leading `~` to the user's home directory.
pub(crate) fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(mut home) => {
                home.push(rest);
                home
            }
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

/// Where the config file lives unless the user points somewhere else.
pub(crate) fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rdock").join("config.toml"))
}
