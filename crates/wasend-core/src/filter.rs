use crate::contact::Contact;
use crate::repository::MAX_CONTACTS;
use crate::types::CategoryFilter;

/// Current list filter inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub filter: CategoryFilter,
    pub search: String,
}

/// Derived list view: category filter first, then a case-insensitive
/// substring match on first or last name. Source order is preserved.
pub fn compute_view(contacts: &[Contact], filter: &CategoryFilter, search: &str) -> Vec<Contact> {
    let needle = search.trim().to_lowercase();
    contacts
        .iter()
        .filter(|c| filter.matches(c.category))
        .filter(|c| {
            needle.is_empty()
                || c.first_name.to_lowercase().contains(&needle)
                || c.last_name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

pub fn count_summary(shown: usize, total: usize) -> String {
    format!("{shown} / {MAX_CONTACTS} (total: {total})")
}
