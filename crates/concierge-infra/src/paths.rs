//! Data directory layout.
//!
//! All durable state lives in one flat directory: three JSON snapshot files
//! plus an optional `config.toml`.

use std::path::{Path, PathBuf};

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `CONCIERGE_DATA_DIR` environment variable
/// 2. `~/.concierge`
/// 3. `./.concierge` as a last resort
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CONCIERGE_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".concierge");
    }

    PathBuf::from(".concierge")
}

/// Path of the chat-id index file.
pub fn chat_ids_path(data_dir: &Path) -> PathBuf {
    data_dir.join("chat_ids.json")
}

/// Path of the full-history snapshot file.
pub fn chat_histories_path(data_dir: &Path) -> PathBuf {
    data_dir.join("chat_histories.json")
}

/// Path of the contact log file.
pub fn user_data_path(data_dir: &Path) -> PathBuf {
    data_dir.join("user_data.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_paths() {
        let data_dir = PathBuf::from("/srv/concierge");
        assert_eq!(
            chat_ids_path(&data_dir),
            PathBuf::from("/srv/concierge/chat_ids.json")
        );
        assert_eq!(
            chat_histories_path(&data_dir),
            PathBuf::from("/srv/concierge/chat_histories.json")
        );
        assert_eq!(
            user_data_path(&data_dir),
            PathBuf::from("/srv/concierge/user_data.json")
        );
    }

    #[test]
    fn test_resolve_data_dir_from_env() {
        // SAFETY: This test is single-threaded and restores the env var immediately.
        unsafe {
            std::env::set_var("CONCIERGE_DATA_DIR", "/tmp/test-concierge");
        }
        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-concierge"));
        unsafe {
            std::env::remove_var("CONCIERGE_DATA_DIR");
        }
    }
}
