//! The controller that ties the contact store, the repository rules, the
//! list view and the personalizer to the collaborator interfaces.
//!
//! Every mutation persists the whole list and re-renders the view before
//! returning. Errors are reported through `Feedback` with the error flag and
//! also returned; corrupt storage and failed writes are reported only.

use crate::collab::{clear_form, fill_form, read_contact_input, Collaborators, FormSource};
use crate::config::Config;
use crate::confirm::{ConfirmationQueue, PendingAction, PendingConfirmation};
use crate::contact::Contact;
use crate::error::{Result, WasendError};
use crate::filter::{compute_view, ViewState};
use crate::personalize::{build_link_with_base, personalize};
use crate::repository::{self, EditSession, SaveOutcome};
use crate::storage::KeyValueStore;
use crate::store;
use crate::types::CategoryFilter;

/// What happened when a pending confirmation was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Dismissed,
    Deleted(Contact),
    /// The contact vanished between the prompt and the answer.
    AlreadyGone { phone: String },
    Cleared { removed: usize },
}

/// A built chat link and whether the opener actually launched it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sent {
    pub url: String,
    pub opened: bool,
}

pub struct App<S: KeyValueStore> {
    storage: S,
    config: Config,
    contacts: Vec<Contact>,
    session: EditSession,
    view: ViewState,
    pending: ConfirmationQueue,
    collab: Collaborators,
    write_failures: usize,
}

impl<S: KeyValueStore> App<S> {
    /// Load contacts and pending confirmations from `storage` and render once.
    pub fn open(storage: S, config: Config, collab: Collaborators) -> Result<Self> {
        let pending = ConfirmationQueue::load(&storage)?;
        let view = ViewState {
            filter: config.list.filter(),
            search: String::new(),
        };
        let mut app = Self {
            storage,
            config,
            contacts: Vec::new(),
            session: EditSession::None,
            view,
            pending,
            collab,
            write_failures: 0,
        };
        app.load()?;
        Ok(app)
    }

    // -----------------------------------------------------------------------
    // Store
    // -----------------------------------------------------------------------

    /// Re-read the contact list. Unreadable data is reported and replaced by an empty list.
    pub fn load(&mut self) -> Result<()> {
        self.contacts = match store::load_contacts(&self.storage) {
            Ok(contacts) => contacts,
            Err(e) if !e.is_blocking() => {
                tracing::warn!(error = %e, "contact store corrupt, starting empty");
                self.report(&format!("Error loading contacts from storage: {e}"), true);
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        self.refresh();
        Ok(())
    }

    fn persist(&mut self) {
        if let Err(e) = store::save_contacts(&mut self.storage, &self.contacts) {
            self.write_failures += 1;
            self.report(&format!("Error saving contacts: {e}"), true);
        }
        self.refresh();
    }

    fn persist_pending(&mut self) {
        if let Err(e) = self.pending.save(&mut self.storage) {
            self.write_failures += 1;
            self.report(&format!("Error saving pending confirmations: {e}"), true);
        }
    }

    fn refresh(&mut self) {
        let view = self.view();
        self.collab.renderer.render(&view, self.contacts.len());
    }

    fn report(&mut self, message: &str, is_error: bool) {
        self.collab.feedback.append(message, is_error);
    }

    fn fail<T>(&mut self, err: WasendError) -> Result<T> {
        self.report(&format!("Error: {err}"), true);
        Err(err)
    }

    // -----------------------------------------------------------------------
    // Add / edit
    // -----------------------------------------------------------------------

    /// Save the form as a new contact, or as the contact under edit.
    pub fn save_from_form(&mut self, form: &mut dyn FormSource) -> Result<SaveOutcome> {
        let input = read_contact_input(form);
        let outcome = match repository::add_or_update(&mut self.contacts, &input, &self.session) {
            Ok(outcome) => outcome,
            Err(e) => return self.fail(e),
        };
        self.persist();

        let contact = outcome.contact();
        let verb = match outcome {
            SaveOutcome::Added(_) => "Contact saved",
            SaveOutcome::Updated(_) => "Contact updated",
        };
        let message = format!(
            "{verb}: {} (category: {})",
            contact.full_name(),
            contact.category.label()
        );
        self.report(&message, false);

        if matches!(outcome, SaveOutcome::Updated(_)) {
            self.session = EditSession::None;
        }
        clear_form(form);
        Ok(outcome)
    }

    /// Load the contact into the form and make it the one being edited.
    /// A previous edit session is discarded.
    pub fn start_edit(&mut self, phone: &str, form: &mut dyn FormSource) -> Result<()> {
        let session = match repository::start_edit(&self.contacts, phone) {
            Ok(session) => session,
            Err(e) => return self.fail(e),
        };
        if let Some(pos) = repository::find_by_phone(&self.contacts, phone) {
            fill_form(form, &self.contacts[pos]);
        }
        self.session = session;
        Ok(())
    }

    pub fn cancel_edit(&mut self, form: &mut dyn FormSource) {
        self.session = EditSession::None;
        clear_form(form);
    }

    // -----------------------------------------------------------------------
    // Delete / clear (two-phase)
    // -----------------------------------------------------------------------

    pub fn request_delete(&mut self, phone: &str) -> Result<PendingConfirmation> {
        let Some(pos) = repository::find_by_phone(&self.contacts, phone) else {
            return self.fail(WasendError::NotFound(phone.to_string()));
        };
        let name = self.contacts[pos].full_name();
        Ok(self.enqueue(PendingAction::DeleteContact {
            phone: phone.to_string(),
            name,
        }))
    }

    pub fn request_clear(&mut self) -> PendingConfirmation {
        let count = self.contacts.len();
        self.enqueue(PendingAction::ClearAll { count })
    }

    fn enqueue(&mut self, action: PendingAction) -> PendingConfirmation {
        let pending = self.pending.request(action);
        self.persist_pending();
        self.collab.confirmations.ask(&pending);
        pending
    }

    /// Apply or drop a pending confirmation.
    ///
    /// Deletes look the phone up again at this point; the list may have
    /// changed since the prompt was raised.
    pub fn resolve(&mut self, id: &str, accepted: bool) -> Result<Resolution> {
        let pending = match self.pending.take(id) {
            Ok(p) => p,
            Err(e) => return self.fail(e),
        };
        self.persist_pending();

        if !accepted {
            self.report(&format!("Cancelled: {}", pending.prompt), false);
            return Ok(Resolution::Dismissed);
        }

        match pending.action {
            PendingAction::DeleteContact { phone, name } => {
                match repository::remove_by_phone(&mut self.contacts, &phone) {
                    Some(removed) => {
                        self.persist();
                        self.report(&format!("Contact deleted: {name}"), false);
                        Ok(Resolution::Deleted(removed))
                    }
                    None => {
                        self.report(
                            &format!("Warning: {name} was already deleted or could not be found"),
                            false,
                        );
                        Ok(Resolution::AlreadyGone { phone })
                    }
                }
            }
            PendingAction::ClearAll { .. } => {
                let removed = self.contacts.len();
                self.contacts.clear();
                self.persist();
                self.report("Contact list cleared", false);
                Ok(Resolution::Cleared { removed })
            }
        }
    }

    // -----------------------------------------------------------------------
    // Send
    // -----------------------------------------------------------------------

    /// Personalize `template` for the contact, build its chat link and hand it
    /// to the opener. A failed open is reported and leaves `opened` false.
    pub fn send(&mut self, phone: &str, template: &str) -> Result<Sent> {
        let Some(pos) = repository::find_by_phone(&self.contacts, phone) else {
            return self.fail(WasendError::NotFound(phone.to_string()));
        };
        let contact = self.contacts[pos].clone();
        let message = match personalize(template, &contact) {
            Ok(m) => m,
            Err(e) => return self.fail(e),
        };
        let url = build_link_with_base(&self.config.link.base_url, &contact.phone, &message);

        self.report(
            &format!("Opening chat for {} ({})...", contact.first_name, contact.phone),
            false,
        );
        let mut opened = false;
        if self.config.link.open_browser {
            match self.collab.opener.open(&url) {
                Ok(()) => {
                    opened = true;
                    self.report(
                        "Chat opened. Remember to press Send in the chat window.",
                        false,
                    );
                }
                Err(e) => {
                    tracing::warn!(error = %e, "chat link could not be opened");
                    self.report(&format!("Error opening chat link: {e}"), true);
                }
            }
        }
        Ok(Sent { url, opened })
    }

    pub fn saved_template(&self) -> Result<String> {
        store::load_template(&self.storage)
    }

    pub fn save_template(&mut self, template: &str) -> Result<()> {
        store::save_template(&mut self.storage, template)
    }

    /// `send` using the stored template.
    pub fn send_saved(&mut self, phone: &str) -> Result<Sent> {
        let template = match self.saved_template() {
            Ok(t) => t,
            Err(e) => return self.fail(e),
        };
        self.send(phone, &template)
    }

    // -----------------------------------------------------------------------
    // View
    // -----------------------------------------------------------------------

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.view.filter = filter;
        self.refresh();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.view.search = search.into();
        self.refresh();
    }

    pub fn view(&self) -> Vec<Contact> {
        compute_view(&self.contacts, &self.view.filter, &self.view.search)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn find(&self, phone: &str) -> Option<&Contact> {
        repository::find_by_phone(&self.contacts, phone).map(|pos| &self.contacts[pos])
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn pending(&self) -> &[PendingConfirmation] {
        self.pending.list()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Number of writes that failed since `open`. The in-memory state stays authoritative.
    pub fn write_failures(&self) -> usize {
        self.write_failures
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
