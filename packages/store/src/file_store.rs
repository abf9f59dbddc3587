//! # Filesystem-backed key/value storage
//!
//! [`FileStorage`] keeps each key in its own file under a base directory. It is
//! used on desktop and mobile to retain the signed-in identity across restarts.
//!
//! ```text
//! <base_dir>/
//! └── <key>          # raw value, e.g. the serialised session user
//! ```
//!
//! Keys are sanitised to `[A-Za-z0-9_-]`; any other character becomes `_`.

use std::path::PathBuf;

use crate::storage::KeyValueStorage;

/// Filesystem-backed storage for desktop and mobile persistence.
#[derive(Clone, Debug)]
pub struct FileStorage {
    base: PathBuf,
}

impl FileStorage {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base.join(name)
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.base) {
            tracing::warn!("Failed to create storage dir {}: {}", self.base.display(), e);
            return;
        }
        if let Err(e) = std::fs::write(self.key_path(key), value) {
            tracing::warn!("Failed to write storage key {}: {}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        let path = self.key_path(key);
        if path.exists() {
            if let Err(e) = std::fs::remove_file(path) {
                tracing::warn!("Failed to remove storage key {}: {}", key, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = std::env::temp_dir().join(format!("recipes_storage_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let storage = FileStorage::new(dir.clone());
        storage.set("recipems_user", r#"{"id":1}"#);

        // Re-open from same directory
        let reopened = FileStorage::new(dir.clone());
        assert_eq!(reopened.get("recipems_user").as_deref(), Some(r#"{"id":1}"#));

        reopened.remove("recipems_user");
        assert!(storage.get("recipems_user").is_none());

        // Removing a missing key is a no-op
        reopened.remove("recipems_user");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_key_is_sanitised() {
        let storage = FileStorage::new(PathBuf::from("/tmp/base"));
        assert_eq!(storage.key_path("../etc/passwd"), PathBuf::from("/tmp/base/___etc_passwd"));
    }
}
