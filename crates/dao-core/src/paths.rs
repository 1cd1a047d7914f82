use crate::error::{DaoError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const DATA_DIR: &str = ".dao";
pub const STORE_DIR: &str = "store";
pub const CONFIG_FILE: &str = "config.yaml";
pub const BLOB_EXT: &str = "json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// `~/.dao`, the default data directory.
pub fn default_root() -> Result<PathBuf> {
    home::home_dir()
        .map(|h| h.join(DATA_DIR))
        .ok_or(DaoError::HomeNotFound)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn store_dir(root: &Path) -> PathBuf {
    root.join(STORE_DIR)
}

/// File backing a store key. Characters outside `[A-Za-z0-9_-]` become `.`
/// so namespaced keys stay portable file names.
pub fn blob_path(root: &Path, key: &str) -> PathBuf {
    let file: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '.'
            }
        })
        .collect();
    store_dir(root).join(format!("{file}.{BLOB_EXT}"))
}

// ---------------------------------------------------------------------------
// User id validation
// ---------------------------------------------------------------------------

static USER_RE: OnceLock<Regex> = OnceLock::new();

fn user_re() -> &'static Regex {
    USER_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9_\-]*$").unwrap())
}

pub fn validate_user_id(user: &str) -> Result<()> {
    if user.is_empty() || user.len() > 64 || !user_re().is_match(user) {
        return Err(DaoError::InvalidUserId(user.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
