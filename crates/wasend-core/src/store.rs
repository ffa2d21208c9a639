//! Contact store persistence. The whole list lives under one key.
//!
//! Writes always replace the full collection; there is no incremental update
//! and no format version. Recovery from a corrupt blob is the caller's call:
//! `load_contacts` reports it as `Parse` and `app::App` falls back to an
//! empty list.

use crate::contact::Contact;
use crate::error::{Result, WasendError};
use crate::storage::KeyValueStore;

pub const CONTACTS_KEY: &str = "waBulkContacts";
pub const TEMPLATE_KEY: &str = "messageTemplate";

pub fn load_contacts(kv: &dyn KeyValueStore) -> Result<Vec<Contact>> {
    let Some(blob) = kv.get(CONTACTS_KEY)? else {
        return Ok(Vec::new());
    };
    if blob.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&blob).map_err(|e| WasendError::Parse(e.to_string()))
}

pub fn save_contacts(kv: &mut dyn KeyValueStore, contacts: &[Contact]) -> Result<()> {
    let blob = serde_json::to_string(contacts)?;
    kv.set(CONTACTS_KEY, &blob)?;
    tracing::debug!(count = contacts.len(), "contacts persisted");
    Ok(())
}

/// Saved message template; empty when none was stored or the blob is unreadable.
pub fn load_template(kv: &dyn KeyValueStore) -> Result<String> {
    let Some(blob) = kv.get(TEMPLATE_KEY)? else {
        return Ok(String::new());
    };
    match serde_json::from_str::<String>(&blob) {
        Ok(t) => Ok(t),
        Err(e) => {
            tracing::warn!(error = %e, "stored template unreadable, ignoring");
            Ok(String::new())
        }
    }
}

pub fn save_template(kv: &mut dyn KeyValueStore, template: &str) -> Result<()> {
    let blob = serde_json::to_string(template)?;
    kv.set(TEMPLATE_KEY, &blob)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};
    use crate::types::Category;

    fn sample() -> Vec<Contact> {
        vec![
            Contact {
                first_name: "Ana".into(),
                last_name: "Ruiz".into(),
                phone: "+5491155550001".into(),
                category: Category::Project,
                project_info: "Kitchen remodel".into(),
            },
            Contact {
                first_name: "Luis".into(),
                last_name: String::new(),
                phone: "5491155550002".into(),
                category: Category::Top,
                project_info: String::new(),
            },
        ]
    }

    #[test]
    fn missing_key_loads_empty() {
        let kv = MemoryStore::new();
        assert!(load_contacts(&kv).unwrap().is_empty());
    }

    #[test]
    fn blank_blob_loads_empty() {
        let kv = MemoryStore::new().with_entry(CONTACTS_KEY, "  \n");
        assert!(load_contacts(&kv).unwrap().is_empty());
    }

    #[test]
    fn corrupt_blob_is_parse_error() {
        let kv = MemoryStore::new().with_entry(CONTACTS_KEY, "[{\"firstName\":");
        assert!(matches!(load_contacts(&kv), Err(WasendError::Parse(_))));
    }

    #[test]
    fn wrong_shape_is_parse_error() {
        let kv = MemoryStore::new().with_entry(CONTACTS_KEY, "{\"contacts\":[]}");
        assert!(matches!(load_contacts(&kv), Err(WasendError::Parse(_))));
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut kv = MemoryStore::new();
        let contacts = sample();
        save_contacts(&mut kv, &contacts).unwrap();
        assert_eq!(load_contacts(&kv).unwrap(), contacts);
    }

    #[test]
    fn file_backed_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut kv = FileStore::for_root(dir.path());
        save_contacts(&mut kv, &sample()).unwrap();

        let reopened = FileStore::for_root(dir.path());
        assert_eq!(load_contacts(&reopened).unwrap(), sample());
    }

    #[test]
    fn clear_then_load_is_empty() {
        let mut kv = MemoryStore::new();
        save_contacts(&mut kv, &sample()).unwrap();
        save_contacts(&mut kv, &[]).unwrap();
        assert!(load_contacts(&kv).unwrap().is_empty());
    }

    #[test]
    fn failed_write_leaves_previous_blob() {
        let mut kv = MemoryStore::new();
        save_contacts(&mut kv, &sample()).unwrap();
        kv.reject_writes(true);
        let err = save_contacts(&mut kv, &[]).unwrap_err();
        assert!(matches!(err, WasendError::StorageWrite(_)));
        assert_eq!(load_contacts(&kv).unwrap().len(), 2);
    }

    #[test]
    fn template_round_trip_and_default() {
        let mut kv = MemoryStore::new();
        assert_eq!(load_template(&kv).unwrap(), "");
        save_template(&mut kv, "Hola {{firstName}}\n¿Cómo estás?").unwrap();
        assert_eq!(load_template(&kv).unwrap(), "Hola {{firstName}}\n¿Cómo estás?");
    }
}
