use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const WASEND_DIR: &str = ".wasend";
pub const CONFIG_FILE: &str = ".wasend/config.yaml";

/// Extension of the per-key blobs written by `storage::FileStore`.
pub const BLOB_EXT: &str = "json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn wasend_dir(root: &Path) -> PathBuf {
    root.join(WASEND_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn blob_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{key}.{BLOB_EXT}"))
}

pub fn is_initialized(root: &Path) -> bool {
    wasend_dir(root).is_dir()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/shop");
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/shop/.wasend/config.yaml")
        );
        assert_eq!(
            blob_path(&wasend_dir(root), "waBulkContacts"),
            PathBuf::from("/tmp/shop/.wasend/waBulkContacts.json")
        );
    }

    #[test]
    fn uninitialized_without_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(!is_initialized(dir.path()));
        std::fs::create_dir_all(dir.path().join(WASEND_DIR)).unwrap();
        assert!(is_initialized(dir.path()));
    }
}
