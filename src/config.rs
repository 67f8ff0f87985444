use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "FrontDesk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    "info,frontdesk=debug".to_string()
}

/// Get the application data directory
/// ~/FrontDesk/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("FrontDesk")
}

/// Get the directory holding the JSON storage slots
pub fn storage_dir() -> PathBuf {
    app_data_dir().join("data")
}
