//! Mutations over the contact list with their uniqueness and capacity rules.
//!
//! These functions work on a borrowed `Vec<Contact>` and never persist;
//! `app::App` saves after every successful call. Positions are looked up by
//! phone on every call and never cached, since deletes shift them.

use crate::contact::{normalize_phone, Contact, ContactInput};
use crate::error::{Result, WasendError};

/// Maximum number of stored contacts. Only adds are checked against it.
pub const MAX_CONTACTS: usize = 100;

// ---------------------------------------------------------------------------
// EditSession
// ---------------------------------------------------------------------------

/// At most one contact is being edited at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    None,
    Editing { phone: String },
}

impl EditSession {
    pub fn editing(phone: impl Into<String>) -> Self {
        EditSession::Editing {
            phone: phone.into(),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing { .. })
    }

    pub fn phone(&self) -> Option<&str> {
        match self {
            EditSession::None => None,
            EditSession::Editing { phone } => Some(phone),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Added(Contact),
    Updated(Contact),
}

impl SaveOutcome {
    pub fn contact(&self) -> &Contact {
        match self {
            SaveOutcome::Added(c) | SaveOutcome::Updated(c) => c,
        }
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

pub fn find_by_phone(contacts: &[Contact], phone: &str) -> Option<usize> {
    contacts.iter().position(|c| c.phone == phone)
}

/// Begin editing the contact with `phone`. Any previous session is simply replaced.
pub fn start_edit(contacts: &[Contact], phone: &str) -> Result<EditSession> {
    find_by_phone(contacts, phone)
        .map(|_| EditSession::editing(phone))
        .ok_or_else(|| WasendError::NotFound(phone.to_string()))
}

/// Validate `input` and either append it or replace the contact under edit.
///
/// Checks run in a fixed order: required fields, capacity (adds only), then
/// phone uniqueness against every contact except the one being edited.
/// `contacts` is left untouched when any check fails.
pub fn add_or_update(
    contacts: &mut Vec<Contact>,
    input: &ContactInput,
    session: &EditSession,
) -> Result<SaveOutcome> {
    let first_name = input.first_name.trim();
    let raw_phone = input.phone.trim();
    if first_name.is_empty() {
        return Err(WasendError::Validation("first name".to_string()));
    }
    if raw_phone.is_empty() {
        return Err(WasendError::Validation("phone".to_string()));
    }

    let phone = normalize_phone(raw_phone);
    if phone.is_empty() {
        return Err(WasendError::Validation("phone digits".to_string()));
    }

    let editing = match session {
        EditSession::None => None,
        EditSession::Editing { phone: target } => Some(
            find_by_phone(contacts, target)
                .ok_or_else(|| WasendError::NotFound(target.clone()))?,
        ),
    };

    if editing.is_none() && contacts.len() >= MAX_CONTACTS {
        return Err(WasendError::Capacity(MAX_CONTACTS));
    }

    let duplicate = contacts
        .iter()
        .enumerate()
        .any(|(i, c)| c.phone == phone && Some(i) != editing);
    if duplicate {
        return Err(WasendError::Duplicate(phone));
    }

    let project_info = if input.category.keeps_project_info() {
        input.project_info.trim().to_string()
    } else {
        String::new()
    };
    let record = Contact {
        first_name: first_name.to_string(),
        last_name: input.last_name.trim().to_string(),
        phone,
        category: input.category,
        project_info,
    };

    match editing {
        Some(pos) => {
            contacts[pos] = record.clone();
            Ok(SaveOutcome::Updated(record))
        }
        None => {
            contacts.push(record.clone());
            Ok(SaveOutcome::Added(record))
        }
    }
}

/// Remove the single contact whose phone matches. Returns it if found.
pub fn remove_by_phone(contacts: &mut Vec<Contact>, phone: &str) -> Option<Contact> {
    find_by_phone(contacts, phone).map(|pos| contacts.remove(pos))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn add(contacts: &mut Vec<Contact>, first: &str, phone: &str) -> Result<SaveOutcome> {
        add_or_update(contacts, &ContactInput::new(first, phone), &EditSession::None)
    }

    fn filled(n: usize) -> Vec<Contact> {
        let mut contacts = Vec::new();
        for i in 0..n {
            add(&mut contacts, &format!("C{i}"), &format!("{}", 1000 + i)).unwrap();
        }
        contacts
    }

    #[test]
    fn add_normalizes_and_appends() {
        let mut contacts = Vec::new();
        let out = add_or_update(
            &mut contacts,
            &ContactInput::new("  Ana ", "+1 (555) 123-4567").last_name(" Ruiz "),
            &EditSession::None,
        )
        .unwrap();
        assert!(matches!(out, SaveOutcome::Added(_)));
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].first_name, "Ana");
        assert_eq!(contacts[0].last_name, "Ruiz");
        assert_eq!(contacts[0].phone, "+15551234567");
        assert_eq!(contacts[0].category, Category::Cartera);
    }

    #[test]
    fn missing_first_name_or_phone_is_validation_error() {
        let mut contacts = Vec::new();
        assert!(matches!(
            add(&mut contacts, "   ", "123"),
            Err(WasendError::Validation(_))
        ));
        assert!(matches!(
            add(&mut contacts, "Ana", "  "),
            Err(WasendError::Validation(_))
        ));
        assert!(matches!(
            add(&mut contacts, "Ana", "n/a"),
            Err(WasendError::Validation(_))
        ));
        assert!(contacts.is_empty());
    }

    #[test]
    fn duplicate_after_normalization_rejected() {
        let mut contacts = Vec::new();
        add(&mut contacts, "Ana", "+1 555 123 4567").unwrap();
        let before = contacts.clone();
        let err = add(&mut contacts, "Otra", "+1-555-123-4567").unwrap_err();
        assert!(matches!(err, WasendError::Duplicate(p) if p == "+15551234567"));
        assert_eq!(contacts, before);
    }

    #[test]
    fn capacity_blocks_adds_only() {
        let mut contacts = filled(MAX_CONTACTS);
        let before = contacts.clone();
        let err = add(&mut contacts, "Extra", "999999").unwrap_err();
        assert!(matches!(err, WasendError::Capacity(MAX_CONTACTS)));
        assert_eq!(contacts, before);

        let session = start_edit(&contacts, "1005").unwrap();
        let out = add_or_update(
            &mut contacts,
            &ContactInput::new("Renamed", "1005"),
            &session,
        )
        .unwrap();
        assert!(matches!(out, SaveOutcome::Updated(_)));
        assert_eq!(contacts.len(), MAX_CONTACTS);
        assert_eq!(contacts[5].first_name, "Renamed");
    }

    #[test]
    fn capacity_checked_before_duplicates() {
        let mut contacts = filled(MAX_CONTACTS);
        let err = add(&mut contacts, "Dup", "1000").unwrap_err();
        assert!(matches!(err, WasendError::Capacity(_)));
    }

    #[test]
    fn edit_may_keep_its_own_phone() {
        let mut contacts = filled(3);
        let session = start_edit(&contacts, "1001").unwrap();
        add_or_update(
            &mut contacts,
            &ContactInput::new("Same", "1001").category(Category::Top),
            &session,
        )
        .unwrap();
        assert_eq!(contacts[1].first_name, "Same");
        assert_eq!(contacts[1].category, Category::Top);
    }

    #[test]
    fn edit_cannot_take_another_contacts_phone() {
        let mut contacts = filled(3);
        let before = contacts.clone();
        let session = start_edit(&contacts, "1001").unwrap();
        let err = add_or_update(&mut contacts, &ContactInput::new("X", "1002"), &session)
            .unwrap_err();
        assert!(matches!(err, WasendError::Duplicate(_)));
        assert_eq!(contacts, before);
    }

    #[test]
    fn edit_can_change_phone_in_place() {
        let mut contacts = filled(3);
        let session = start_edit(&contacts, "1001").unwrap();
        add_or_update(&mut contacts, &ContactInput::new("Moved", "2001"), &session).unwrap();
        assert_eq!(contacts[1].phone, "2001");
        assert_eq!(find_by_phone(&contacts, "1001"), None);
    }

    #[test]
    fn edit_of_vanished_contact_is_not_found() {
        let mut contacts = filled(2);
        let session = start_edit(&contacts, "1000").unwrap();
        remove_by_phone(&mut contacts, "1000");
        let err = add_or_update(&mut contacts, &ContactInput::new("X", "3000"), &session)
            .unwrap_err();
        assert!(matches!(err, WasendError::NotFound(p) if p == "1000"));
        assert_eq!(contacts.len(), 1);
    }

    #[test]
    fn start_edit_unknown_phone() {
        let contacts = filled(1);
        assert!(matches!(
            start_edit(&contacts, "42"),
            Err(WasendError::NotFound(_))
        ));
    }

    #[test]
    fn project_info_cleared_outside_project() {
        let mut contacts = Vec::new();
        add_or_update(
            &mut contacts,
            &ContactInput::new("Ana", "1")
                .category(Category::Recover)
                .project_info("ignored"),
            &EditSession::None,
        )
        .unwrap();
        add_or_update(
            &mut contacts,
            &ContactInput::new("Bea", "2")
                .category(Category::Project)
                .project_info("  Roof  "),
            &EditSession::None,
        )
        .unwrap();
        assert_eq!(contacts[0].project_info, "");
        assert_eq!(contacts[1].project_info, "Roof");
    }

    #[test]
    fn remove_takes_exactly_one_and_keeps_order() {
        let mut contacts = filled(5);
        let removed = remove_by_phone(&mut contacts, "1002").unwrap();
        assert_eq!(removed.first_name, "C2");
        let phones: Vec<_> = contacts.iter().map(|c| c.phone.as_str()).collect();
        assert_eq!(phones, ["1000", "1001", "1003", "1004"]);
        assert!(remove_by_phone(&mut contacts, "1002").is_none());
    }

    #[test]
    fn session_accessors() {
        assert!(!EditSession::None.is_editing());
        let s = EditSession::editing("123");
        assert!(s.is_editing());
        assert_eq!(s.phone(), Some("123"));
    }
}
