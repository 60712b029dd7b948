//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Public REST test API serving `/posts`, `/users` and `/photos`
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Posts tab shows only the first few articles
pub const DEFAULT_POST_LIMIT: usize = 10;

/// `/photos` returns thousands of records
pub const DEFAULT_PHOTO_LIMIT: usize = 25;

pub const DEFAULT_LOG_FILE: &str = "fetchdeck.log";

/// Directory under the home directory holding `config.yaml`
pub const CONFIG_DIR_NAME: &str = ".fetchdeck";

pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Application name
pub const APP_NAME: &str = "Fetchdeck";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
