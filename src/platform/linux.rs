// navpanel platform paths for Linux
// Config:    ~/.config/navpanel
// Downloads: ~/Downloads

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// `$XDG_CONFIG_HOME/navpanel` if set, otherwise `~/.config/navpanel`.
pub fn get_config_dir() -> PathBuf {
    config_dir_from(env::var("XDG_CONFIG_HOME").ok(), home_dir())
}

/// `$XDG_DOWNLOAD_DIR` if set, otherwise `~/Downloads`.
pub fn get_download_dir() -> PathBuf {
    download_dir_from(env::var("XDG_DOWNLOAD_DIR").ok(), home_dir())
}

fn config_dir_from(xdg: Option<String>, home: PathBuf) -> PathBuf {
    match xdg.filter(|v| !v.is_empty()) {
        Some(xdg) => PathBuf::from(xdg).join("navpanel"),
        None => home.join(".config").join("navpanel"),
    }
}

fn download_dir_from(xdg: Option<String>, home: PathBuf) -> PathBuf {
    match xdg.filter(|v| !v.is_empty()) {
        Some(xdg) => PathBuf::from(xdg),
        None => home.join("Downloads"),
    }
}
