//! Narrow interfaces the core talks to instead of a concrete UI.

use crate::confirm::PendingConfirmation;
use crate::contact::{Contact, ContactInput};
use crate::error::Result;
use crate::types::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FirstName,
    LastName,
    Phone,
    Category,
    ProjectInfo,
}

/// Current input field values, read on demand.
pub trait FormSource {
    fn value(&self, field: FormField) -> String;
    fn set_value(&mut self, field: FormField, value: &str);
}

/// Receives the filtered list after every load and save.
pub trait Renderer {
    fn render(&mut self, contacts: &[Contact], total: usize);
}

/// Shows a yes/no prompt. The answer comes back later via `App::resolve`.
pub trait ConfirmationUi {
    fn ask(&mut self, pending: &PendingConfirmation);
}

/// User-visible status lines.
pub trait Feedback {
    fn append(&mut self, message: &str, is_error: bool);
}

/// Opens a chat link. Nothing about the outcome is awaited.
pub trait LinkOpener {
    fn open(&mut self, url: &str) -> Result<()>;
}

pub struct Collaborators {
    pub renderer: Box<dyn Renderer>,
    pub confirmations: Box<dyn ConfirmationUi>,
    pub feedback: Box<dyn Feedback>,
    pub opener: Box<dyn LinkOpener>,
}

/// Build a `ContactInput` from the form. An unknown category falls back to the default.
pub fn read_contact_input(form: &dyn FormSource) -> ContactInput {
    let category = form
        .value(FormField::Category)
        .trim()
        .parse()
        .unwrap_or_default();
    ContactInput {
        first_name: form.value(FormField::FirstName),
        last_name: form.value(FormField::LastName),
        phone: form.value(FormField::Phone),
        category,
        project_info: form.value(FormField::ProjectInfo),
    }
}

pub fn fill_form(form: &mut dyn FormSource, contact: &Contact) {
    form.set_value(FormField::FirstName, &contact.first_name);
    form.set_value(FormField::LastName, &contact.last_name);
    form.set_value(FormField::Phone, &contact.phone);
    form.set_value(FormField::Category, contact.category.as_str());
    form.set_value(FormField::ProjectInfo, &contact.project_info);
}

pub fn clear_form(form: &mut dyn FormSource) {
    form.set_value(FormField::FirstName, "");
    form.set_value(FormField::LastName, "");
    form.set_value(FormField::Phone, "");
    form.set_value(FormField::Category, Category::default().as_str());
    form.set_value(FormField::ProjectInfo, "");
}

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------
