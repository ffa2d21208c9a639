//! Terminal implementations of the core collaborator traits.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasend_core::collab::{ConfirmationUi, Feedback, FormField, FormSource, LinkOpener, Renderer};
use wasend_core::confirm::PendingConfirmation;
use wasend_core::contact::Contact;

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// Form fields populated from command-line flags.
#[derive(Debug, Default)]
pub struct ArgsForm {
    fields: HashMap<FormField, String>,
}

impl ArgsForm {
    /// Set `field` only when the flag was given.
    pub fn overlay(&mut self, field: FormField, value: Option<String>) {
        if let Some(v) = value {
            self.fields.insert(field, v);
        }
    }
}

impl FormSource for ArgsForm {
    fn value(&self, field: FormField) -> String {
        self.fields.get(&field).cloned().unwrap_or_default()
    }

    fn set_value(&mut self, field: FormField, value: &str) {
        self.fields.insert(field, value.to_string());
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct Snapshot {
    pub contacts: Vec<Contact>,
    pub total: usize,
}

/// Keeps the latest rendered view; commands print it once they are done.
#[derive(Clone, Default)]
pub struct SnapshotRenderer(Rc<RefCell<Snapshot>>);

impl SnapshotRenderer {
    pub fn take(&self) -> Snapshot {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

impl Renderer for SnapshotRenderer {
    fn render(&mut self, contacts: &[Contact], total: usize) {
        *self.0.borrow_mut() = Snapshot {
            contacts: contacts.to_vec(),
            total,
        };
    }
}

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

/// Status lines go to stdout, errors to stderr. With `--json` everything goes
/// to stderr so stdout stays machine-readable.
pub struct TerminalFeedback {
    pub json: bool,
}

impl Feedback for TerminalFeedback {
    fn append(&mut self, message: &str, is_error: bool) {
        if is_error {
            tracing::debug!(message, "reported error");
            eprintln!("{message}");
        } else if self.json {
            eprintln!("{message}");
        } else {
            println!("{message}");
        }
    }
}

// ---------------------------------------------------------------------------
// Confirmation prompt
// ---------------------------------------------------------------------------

/// Prints the prompt with the follow-up commands that answer it.
pub struct PromptConfirmation {
    pub quiet: bool,
}

impl ConfirmationUi for PromptConfirmation {
    fn ask(&mut self, pending: &PendingConfirmation) {
        if self.quiet {
            return;
        }
        println!("[{}] {}", pending.id, pending.prompt);
        println!("  confirm: wasend pending confirm {}", pending.id);
        println!("  cancel:  wasend pending dismiss {}", pending.id);
    }
}

// ---------------------------------------------------------------------------
// Link opener
// ---------------------------------------------------------------------------

pub struct BrowserOpener;

impl LinkOpener for BrowserOpener {
    fn open(&mut self, url: &str) -> wasend_core::Result<()> {
        tracing::info!(url, "opening chat link");
        open::that(url)?;
        Ok(())
    }
}
