//! API key storage: load and persist the Gemini API key in the config directory.
//!
//! The key is stored in a dedicated file with restrictive permissions (0o600 on Unix).

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use crate::core::paths;

const KEY_FILE: &str = "api-key";

/// Errors when loading or storing the API key.
#[derive(Debug, thiserror::Error)]
pub enum ApiKeyError {
    #[error("No config directory available")]
    NoConfigDir,
    #[error("API key is empty")]
    Empty,
    #[error("Failed to store API key: {0}")]
    Io(#[from] io::Error),
}

/// Path to the API key file in the config directory.
pub fn credentials_path() -> Option<PathBuf> {
    paths::config_dir().map(|d| d.join(KEY_FILE))
}

/// Load the API key from the config directory.
/// Returns `None` if the file is absent, empty, or unreadable.
pub fn load_api_key() -> Option<String> {
    load_api_key_from(&paths::config_dir()?)
}

/// Store the API key in the config directory. Returns the file path written.
pub fn store_api_key(key: &str) -> Result<PathBuf, ApiKeyError> {
    let dir = paths::config_dir().ok_or(ApiKeyError::NoConfigDir)?;
    store_api_key_in(&dir, key)
}

pub(crate) fn load_api_key_from(dir: &Path) -> Option<String> {
    let content = fs::read_to_string(dir.join(KEY_FILE)).ok()?;
    let key = content.trim().to_string();
    if key.is_empty() { None } else { Some(key) }
}

/// Creates `dir` if needed. On Unix, sets file permissions to 0o600.
pub(crate) fn store_api_key_in(dir: &Path, key: &str) -> Result<PathBuf, ApiKeyError> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err(ApiKeyError::Empty);
    }
    fs::create_dir_all(dir)?;

    let path = dir.join(KEY_FILE);
    let mut file = fs::File::create(&path)?;
    file.write_all(trimmed.as_bytes())?;
    file.write_all(b"\n")?;

    #[cfg(unix)]
    {
        let mut perms = file.metadata()?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(path)
}
