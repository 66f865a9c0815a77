// src/prefs.rs
// User preferences for the client, read once at startup.
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::ItemsPerPage;
use crate::state::{LockoutPolicy, SessionPolicy};
use crate::storage::StorageError;

const PREFS_FILE_NAME: &str = ".black_market_prefs.json";
const DATA_DIR_NAME: &str = ".black_market";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Prefs {
    pub session_timeout_minutes: u64,
    pub session_warning_minutes: u64,
    pub auto_logout: bool,
    pub max_login_attempts: u32,
    pub lockout_minutes: u64,
    pub attempt_reset_minutes: u64,
    pub items_per_page: ItemsPerPage,
    pub data_dir: Option<PathBuf>,
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            session_timeout_minutes: 30,
            session_warning_minutes: 5,
            auto_logout: true,
            max_login_attempts: 5,
            lockout_minutes: 15,
            attempt_reset_minutes: 60,
            items_per_page: ItemsPerPage::Ten,
            data_dir: None,
        }
    }
}

fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
}

impl Prefs {
    pub fn config_path() -> PathBuf {
        home_dir().join(PREFS_FILE_NAME)
    }

    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Missing or unreadable files fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        let Ok(data) = fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&data) {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed preferences");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), StorageError> {
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| home_dir().join(DATA_DIR_NAME))
    }

    pub fn session_policy(&self) -> SessionPolicy {
        SessionPolicy {
            session_timeout: Duration::from_secs(self.session_timeout_minutes * 60),
            warning_time: Duration::from_secs(self.session_warning_minutes * 60),
            auto_logout: self.auto_logout,
        }
    }

    pub fn lockout_policy(&self) -> LockoutPolicy {
        LockoutPolicy {
            max_attempts: self.max_login_attempts,
            lockout_duration: Duration::from_secs(self.lockout_minutes * 60),
            reset_duration: Duration::from_secs(self.attempt_reset_minutes * 60),
        }
    }
}
