//! Confirmation gate for destructive actions.
//!
//! A delete or clear-all is first registered as a `PendingConfirmation` and
//! only applied when that confirmation is resolved as accepted. Each pending
//! item captures the phone it targets, never a list position. Pending items
//! never expire and several may be open at once.
//!
//! Layout:
//!   .wasend/pendingConfirmations.json: `{ last_issued, items }`, the open
//!   confirmations in request order
//!
//! IDs are sequential: P1, P2, P3, … A number is never issued twice, even
//! after every open confirmation has been resolved.

use crate::error::{Result, WasendError};
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PENDING_KEY: &str = "pendingConfirmations";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingAction {
    DeleteContact { phone: String, name: String },
    ClearAll { count: usize },
}

impl PendingAction {
    pub fn prompt(&self) -> String {
        match self {
            PendingAction::DeleteContact { name, .. } => {
                format!("Are you sure you want to delete {name}?")
            }
            PendingAction::ClearAll { count } => {
                format!("Are you sure you want to delete all {count} saved contacts?")
            }
        }
    }
}

impl fmt::Display for PendingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingAction::DeleteContact { phone, .. } => write!(f, "delete:{phone}"),
            PendingAction::ClearAll { .. } => f.write_str("clear_all"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingConfirmation {
    pub id: String,
    pub action: PendingAction,
    pub prompt: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// ConfirmationQueue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationQueue {
    #[serde(default)]
    last_issued: u64,
    #[serde(default)]
    items: Vec<PendingConfirmation>,
}

impl ConfirmationQueue {
    /// Read the open confirmations. An unreadable blob is dropped with a warning.
    pub fn load(kv: &dyn KeyValueStore) -> Result<Self> {
        let Some(blob) = kv.get(PENDING_KEY)? else {
            return Ok(Self::default());
        };
        if blob.trim().is_empty() {
            return Ok(Self::default());
        }
        match serde_json::from_str(&blob) {
            Ok(queue) => Ok(queue),
            Err(e) => {
                tracing::warn!(error = %e, "pending confirmations unreadable, starting empty");
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, kv: &mut dyn KeyValueStore) -> Result<()> {
        let blob = serde_json::to_string(self)?;
        kv.set(PENDING_KEY, &blob)
    }

    fn next_id(&mut self) -> String {
        let open_max = self
            .items
            .iter()
            .filter_map(|p| p.id.strip_prefix('P')?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        self.last_issued = self.last_issued.max(open_max) + 1;
        format!("P{}", self.last_issued)
    }

    /// Register `action` and return the new pending confirmation.
    pub fn request(&mut self, action: PendingAction) -> PendingConfirmation {
        let pending = PendingConfirmation {
            id: self.next_id(),
            prompt: action.prompt(),
            action,
            created_at: Utc::now(),
        };
        self.items.push(pending.clone());
        pending
    }

    /// Remove and return the confirmation with `id`.
    pub fn take(&mut self, id: &str) -> Result<PendingConfirmation> {
        let pos = self
            .items
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| WasendError::ConfirmationNotFound(id.to_string()))?;
        Ok(self.items.remove(pos))
    }

    pub fn list(&self) -> &[PendingConfirmation] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn delete(phone: &str) -> PendingAction {
        PendingAction::DeleteContact {
            phone: phone.to_string(),
            name: "Ana Ruiz".to_string(),
        }
    }

    #[test]
    fn request_assigns_sequential_ids() {
        let mut q = ConfirmationQueue::default();
        let a = q.request(delete("1"));
        let b = q.request(PendingAction::ClearAll { count: 3 });
        assert_eq!(a.id, "P1");
        assert_eq!(b.id, "P2");
        assert_eq!(q.list().len(), 2);
    }

    #[test]
    fn prompts_are_human_readable() {
        assert_eq!(
            delete("1").prompt(),
            "Are you sure you want to delete Ana Ruiz?"
        );
        assert_eq!(
            PendingAction::ClearAll { count: 4 }.prompt(),
            "Are you sure you want to delete all 4 saved contacts?"
        );
    }

    #[test]
    fn take_removes_only_that_item() {
        let mut q = ConfirmationQueue::default();
        q.request(delete("1"));
        q.request(delete("2"));
        let taken = q.take("P1").unwrap();
        assert_eq!(taken.action, delete("1"));
        let ids: Vec<_> = q.list().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["P2"]);
    }

    #[test]
    fn take_unknown_id_fails() {
        let mut q = ConfirmationQueue::default();
        assert!(matches!(
            q.take("P9"),
            Err(WasendError::ConfirmationNotFound(id)) if id == "P9"
        ));
    }

    #[test]
    fn lower_id_taken_keeps_sequence() {
        let mut q = ConfirmationQueue::default();
        q.request(delete("1"));
        q.request(delete("2"));
        q.take("P1").unwrap();
        assert_eq!(q.request(delete("3")).id, "P3");
    }

    #[test]
    fn ids_not_reused_after_queue_empties() {
        let mut q = ConfirmationQueue::default();
        let first = q.request(delete("1"));
        q.take(&first.id).unwrap();
        let second = q.request(delete("2"));
        assert_eq!(first.id, "P1");
        assert_eq!(second.id, "P2");
    }

    #[test]
    fn ids_not_reused_after_highest_taken_across_reload() {
        let mut kv = MemoryStore::new();
        let mut q = ConfirmationQueue::default();
        q.request(delete("1"));
        q.request(delete("2"));
        q.take("P2").unwrap();
        q.save(&mut kv).unwrap();

        let mut reloaded = ConfirmationQueue::load(&kv).unwrap();
        assert_eq!(reloaded.request(delete("3")).id, "P3");
    }

    #[test]
    fn persists_across_loads() {
        let mut kv = MemoryStore::new();
        let mut q = ConfirmationQueue::default();
        q.request(delete("+15551234567"));
        q.save(&mut kv).unwrap();

        let reloaded = ConfirmationQueue::load(&kv).unwrap();
        assert_eq!(reloaded, q);
    }

    #[test]
    fn corrupt_blob_loads_empty() {
        let kv = MemoryStore::new().with_entry(PENDING_KEY, "not json");
        assert!(ConfirmationQueue::load(&kv).unwrap().is_empty());
    }
}
