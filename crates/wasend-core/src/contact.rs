use crate::types::Category;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

/// A stored contact. The normalized phone is the record's identity.
///
/// Field names are camelCase on disk so the persisted blob keeps the
/// `firstName, lastName, phone, category, projectInfo` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub phone: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub project_info: String,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

// ---------------------------------------------------------------------------
// ContactInput
// ---------------------------------------------------------------------------

/// Raw field values as typed into a form, before trimming or normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInput {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub category: Category,
    pub project_info: String,
}

impl ContactInput {
    pub fn new(first_name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            phone: phone.into(),
            ..Self::default()
        }
    }

    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = last_name.into();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn project_info(mut self, info: impl Into<String>) -> Self {
        self.project_info = info.into();
        self
    }
}

impl From<&Contact> for ContactInput {
    fn from(c: &Contact) -> Self {
        Self {
            first_name: c.first_name.clone(),
            last_name: c.last_name.clone(),
            phone: c.phone.clone(),
            category: c.category,
            project_info: c.project_info.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Phone normalization
// ---------------------------------------------------------------------------

static NON_PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn non_phone_re() -> &'static Regex {
    NON_PHONE_RE.get_or_init(|| Regex::new(r"[^0-9+]").expect("static regex"))
}

/// Strip every character that is not an ASCII digit or `+`.
pub fn normalize_phone(raw: &str) -> String {
    non_phone_re().replace_all(raw, "").into_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_formatting() {
        assert_eq!(normalize_phone("+1 (555) 123-4567"), "+15551234567");
        assert_eq!(normalize_phone("  56 9.8765.4321 "), "56987654321");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["+1 (555) 123-4567", "abc", "0044 20 7946 0018", "++12"] {
            let once = normalize_phone(raw);
            assert_eq!(normalize_phone(&once), once, "not idempotent for {raw}");
        }
    }

    #[test]
    fn normalize_drops_non_ascii_digits() {
        assert_eq!(normalize_phone("٣٤٥ 12"), "12");
    }

    #[test]
    fn full_name_without_last_name() {
        let c = Contact {
            first_name: "Ana".into(),
            last_name: String::new(),
            phone: "1".into(),
            category: Category::Top,
            project_info: String::new(),
        };
        assert_eq!(c.full_name(), "Ana");
    }

    #[test]
    fn deserializes_persisted_layout() {
        let json = r#"{"firstName":"Ana","lastName":"Ruiz","phone":"+5491100","category":"project","projectInfo":"Kitchen"}"#;
        let c: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(c.first_name, "Ana");
        assert_eq!(c.category, Category::Project);
        assert_eq!(c.project_info, "Kitchen");
        let back = serde_json::to_string(&c).unwrap();
        assert_eq!(back, json);
    }

    #[test]
    fn missing_optional_fields_default() {
        let c: Contact = serde_json::from_str(r#"{"firstName":"Luis","phone":"42"}"#).unwrap();
        assert_eq!(c.last_name, "");
        assert_eq!(c.category, Category::Cartera);
        assert_eq!(c.project_info, "");
    }
}
