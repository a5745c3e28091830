//! Remembered-username store
//!
//! Small key-value contract behind the "remember my username" checkbox.
//! The portal frontend kept this in browser storage; here it is a single
//! line in a file under the configured data directory.

use crate::core::error::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Persistence contract for the last-used username
pub trait UsernameStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, username: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

const REMEMBERED_USERNAME_FILE: &str = "remembered_username";

/// File-backed username store
pub struct FileUsernameStore {
    path: PathBuf,
}

impl FileUsernameStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(REMEMBERED_USERNAME_FILE),
        }
    }
}

impl UsernameStore for FileUsernameStore {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let username = content.trim();
                if username.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(username.to_string()))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, username: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, username.trim())?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
