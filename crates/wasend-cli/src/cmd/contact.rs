use crate::cmd::{finish, open_app, open_app_with, reported, Opened};
use crate::output::{print_json, print_table, truncate_chars};
use crate::terminal::ArgsForm;
use anyhow::Context;
use clap::{Args, Subcommand};
use std::path::Path;
use wasend_core::{
    app::Resolution,
    collab::FormField,
    config::Config,
    contact::{normalize_phone, Contact},
    filter::count_summary,
    repository::MAX_CONTACTS,
    types::CategoryFilter,
    WasendError,
};

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Args, Debug, Default)]
pub struct ContactFields {
    /// First name (required for new contacts)
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    /// Phone number; spaces, dashes and brackets are stripped
    #[arg(long)]
    phone: Option<String>,
    /// cartera, top, occasional, recover, or project
    #[arg(long)]
    category: Option<String>,
    /// Notes kept only for project contacts
    #[arg(long)]
    project_info: Option<String>,
}

impl ContactFields {
    fn apply(self, form: &mut ArgsForm) -> anyhow::Result<()> {
        if let Some(c) = &self.category {
            c.parse::<wasend_core::types::Category>()?;
        }
        form.overlay(FormField::FirstName, self.first_name);
        form.overlay(FormField::LastName, self.last_name);
        form.overlay(FormField::Phone, self.phone);
        form.overlay(FormField::Category, self.category);
        form.overlay(FormField::ProjectInfo, self.project_info);
        Ok(())
    }
}

#[derive(Subcommand)]
pub enum ContactSubcommand {
    /// Add a new contact
    Add {
        #[command(flatten)]
        fields: ContactFields,
    },
    /// Edit a contact; only the given fields change
    Edit {
        /// Phone of the contact to edit
        #[arg(id = "target_phone", value_name = "PHONE")]
        phone: String,
        #[command(flatten)]
        fields: ContactFields,
    },
    /// List contacts, optionally filtered by category and name
    List {
        /// all or a category name (default: list.default_filter from config)
        #[arg(long)]
        category: Option<String>,
        /// Case-insensitive match on first or last name
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one contact
    Show { phone: String },
    /// Delete a contact (asks for confirmation)
    Delete {
        phone: String,
        /// Confirm immediately instead of leaving a pending confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Delete every contact (asks for confirmation)
    Clear {
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: ContactSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ContactSubcommand::Add { fields } => add(root, fields, json),
        ContactSubcommand::Edit { phone, fields } => edit(root, &phone, fields, json),
        ContactSubcommand::List { category, search } => {
            list(root, category.as_deref(), search.as_deref(), json)
        }
        ContactSubcommand::Show { phone } => show(root, &phone, json),
        ContactSubcommand::Delete { phone, yes } => delete(root, &phone, yes, json),
        ContactSubcommand::Clear { yes } => clear(root, yes, json),
    }
}

// ---------------------------------------------------------------------------
// add / edit
// ---------------------------------------------------------------------------

fn add(root: &Path, fields: ContactFields, json: bool) -> anyhow::Result<()> {
    let Opened { mut app, .. } = open_app(root, json)?;
    let mut form = ArgsForm::default();
    fields.apply(&mut form)?;

    let outcome = app.save_from_form(&mut form).map_err(reported)?;
    finish(&app)?;

    if json {
        print_json(outcome.contact())?;
    }
    Ok(())
}

fn edit(root: &Path, phone: &str, fields: ContactFields, json: bool) -> anyhow::Result<()> {
    let Opened { mut app, .. } = open_app(root, json)?;
    let mut form = ArgsForm::default();

    app.start_edit(&normalize_phone(phone), &mut form)
        .map_err(reported)?;
    fields.apply(&mut form)?;

    let outcome = app.save_from_form(&mut form).map_err(reported)?;
    finish(&app)?;

    if json {
        print_json(outcome.contact())?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// list / show
// ---------------------------------------------------------------------------

fn list(
    root: &Path,
    category: Option<&str>,
    search: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let Opened { mut app, view } = open_app(root, json)?;

    if let Some(c) = category {
        let filter: CategoryFilter = c
            .parse()
            .with_context(|| format!("unknown category filter '{c}'"))?;
        app.set_filter(filter);
    }
    if let Some(s) = search {
        app.set_search(s);
    }

    let snapshot = view.take();
    if json {
        print_json(&serde_json::json!({
            "contacts": snapshot.contacts,
            "shown": snapshot.contacts.len(),
            "max": MAX_CONTACTS,
            "total": snapshot.total,
        }))?;
        return Ok(());
    }

    println!("Showing {}", count_summary(snapshot.contacts.len(), snapshot.total));
    if snapshot.contacts.is_empty() {
        println!("No contacts match the filters.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = snapshot.contacts.iter().map(row).collect();
    print_table(&["NAME", "PHONE", "CATEGORY", "PROJECT"], rows);
    Ok(())
}

fn row(c: &Contact) -> Vec<String> {
    vec![
        c.full_name(),
        c.phone.clone(),
        c.category.label().to_string(),
        truncate_chars(&c.project_info, 30),
    ]
}

fn show(root: &Path, phone: &str, json: bool) -> anyhow::Result<()> {
    let Opened { app, .. } = open_app(root, json)?;
    let phone = normalize_phone(phone);
    let contact = app
        .find(&phone)
        .ok_or_else(|| WasendError::NotFound(phone.clone()))?;

    if json {
        print_json(contact)?;
        return Ok(());
    }

    println!("Name:     {}", contact.full_name());
    println!("Phone:    {}", contact.phone);
    println!(
        "Category: {} ({})",
        contact.category.label(),
        contact.category
    );
    if !contact.project_info.is_empty() {
        println!("Project:  {}", contact.project_info);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// delete / clear
// ---------------------------------------------------------------------------

fn delete(root: &Path, phone: &str, yes: bool, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let Opened { mut app, .. } = open_app_with(root, config, json, json || yes)?;

    let pending = app
        .request_delete(&normalize_phone(phone))
        .map_err(reported)?;
    if !yes {
        finish(&app)?;
        if json {
            print_json(&pending)?;
        }
        return Ok(());
    }

    let resolution = app.resolve(&pending.id, true).map_err(reported)?;
    finish(&app)?;
    if json {
        print_resolution(&pending.id, &resolution)?;
    }
    Ok(())
}

fn clear(root: &Path, yes: bool, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let Opened { mut app, .. } = open_app_with(root, config, json, json || yes)?;

    let pending = app.request_clear();
    if !yes {
        finish(&app)?;
        if json {
            print_json(&pending)?;
        }
        return Ok(());
    }

    let resolution = app.resolve(&pending.id, true).map_err(reported)?;
    finish(&app)?;
    if json {
        print_resolution(&pending.id, &resolution)?;
    }
    Ok(())
}

pub fn print_resolution(id: &str, resolution: &Resolution) -> anyhow::Result<()> {
    let value = match resolution {
        Resolution::Dismissed => serde_json::json!({ "id": id, "outcome": "dismissed" }),
        Resolution::Deleted(c) => {
            serde_json::json!({ "id": id, "outcome": "deleted", "contact": c })
        }
        Resolution::AlreadyGone { phone } => {
            serde_json::json!({ "id": id, "outcome": "already_gone", "phone": phone })
        }
        Resolution::Cleared { removed } => {
            serde_json::json!({ "id": id, "outcome": "cleared", "removed": removed })
        }
    };
    print_json(&value)
}
