// navpanel platform paths
// Where the config file lives and where exports land by default, per OS.
//
// Uses `cfg(target_os)` to pick the implementation at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the configuration directory for navpanel.
///
/// - **Linux**: `~/.config/navpanel` (or `$XDG_CONFIG_HOME/navpanel`)
/// - **macOS**: `~/Library/Application Support/NavPanel`
/// - **Windows**: `%APPDATA%/NavPanel`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the directory backups are exported to when none is configured.
///
/// - **Linux**: `$XDG_DOWNLOAD_DIR`, else `~/Downloads`
/// - **macOS**: `~/Downloads`
/// - **Windows**: `%USERPROFILE%/Downloads`
pub fn get_download_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_download_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_download_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_download_dir()
    }
}

/// Path of the JSON config file inside [`get_config_dir`].
pub fn get_config_file() -> PathBuf {
    get_config_dir().join("config.json")
}
