//! Process-wide environment bootstrap
//!
//! Loads `.env` files once at startup: the global one from the user's home
//! directory first, then a local one from the working directory so local
//! values take precedence. Missing files are not an error.

use std::path::PathBuf;
use tracing::debug;

/// Load environment defaults from `$HOME/.env` and `./.env`
///
/// Both files are optional. Values already present in the process
/// environment are never overwritten by `dotenvy`.
pub fn load_env() {
    if let Some(home) = std::env::var_os("HOME") {
        let global = PathBuf::from(home).join(".env");
        if dotenvy::from_path(&global).is_ok() {
            debug!("Loaded environment from {}", global.display());
        }
    }

    if dotenvy::dotenv().is_ok() {
        debug!("Loaded environment from local .env");
    }
}
