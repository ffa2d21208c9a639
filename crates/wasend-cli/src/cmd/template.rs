use crate::cmd::{open_app, Opened};
use crate::output::print_json;
use anyhow::Context;
use clap::{Subcommand, ValueEnum};
use std::io::Read;
use std::path::Path;
use wasend_core::personalize::{
    insert_placeholder, FIRST_NAME_PLACEHOLDER, LAST_NAME_PLACEHOLDER, PLACEHOLDERS,
};

#[derive(Subcommand)]
pub enum TemplateSubcommand {
    /// Print the saved message template
    Show,
    /// Replace the saved message template
    Set {
        /// Template text (reads from stdin if omitted)
        text: Option<String>,
    },
    /// Insert a placeholder into the saved template
    Insert {
        #[arg(value_enum)]
        placeholder: Placeholder,
        /// Char offset to insert at (default: end of template)
        #[arg(long)]
        at: Option<usize>,
    },
    /// List the placeholders a template may use
    Placeholders,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Placeholder {
    FirstName,
    LastName,
}

impl Placeholder {
    fn token(self) -> &'static str {
        match self {
            Placeholder::FirstName => FIRST_NAME_PLACEHOLDER,
            Placeholder::LastName => LAST_NAME_PLACEHOLDER,
        }
    }
}

pub fn run(root: &Path, subcmd: TemplateSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        TemplateSubcommand::Show => show(root, json),
        TemplateSubcommand::Set { text } => set(root, text, json),
        TemplateSubcommand::Insert { placeholder, at } => insert(root, placeholder, at, json),
        TemplateSubcommand::Placeholders => placeholders(json),
    }
}

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let Opened { app, .. } = open_app(root, json)?;
    let template = app.saved_template().context("failed to read template")?;
    if json {
        print_json(&serde_json::json!({ "template": template }))?;
    } else if template.trim().is_empty() {
        println!("No template saved. Set one with `wasend template set`.");
    } else {
        println!("{template}");
    }
    Ok(())
}

fn set(root: &Path, text: Option<String>, json: bool) -> anyhow::Result<()> {
    let text = match text {
        Some(t) => t,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read template from stdin")?;
            buf
        }
    };
    if text.trim().is_empty() {
        tracing::warn!("saving an empty template; send will refuse to use it");
    }

    let Opened { mut app, .. } = open_app(root, json)?;
    app.save_template(&text).context("failed to save template")?;
    if json {
        print_json(&serde_json::json!({ "template": text }))?;
    } else {
        println!("Template saved.");
    }
    Ok(())
}

fn insert(
    root: &Path,
    placeholder: Placeholder,
    at: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let Opened { mut app, .. } = open_app(root, json)?;
    let current = app.saved_template().context("failed to read template")?;
    let pos = at.unwrap_or_else(|| current.chars().count());
    let (updated, cursor) = insert_placeholder(&current, pos, pos, placeholder.token());
    app.save_template(&updated)
        .context("failed to save template")?;

    if json {
        print_json(&serde_json::json!({ "template": updated, "cursor": cursor }))?;
    } else {
        println!("{updated}");
    }
    Ok(())
}

fn placeholders(json: bool) -> anyhow::Result<()> {
    if json {
        print_json(&PLACEHOLDERS)?;
    } else {
        for p in PLACEHOLDERS {
            println!("{p}");
        }
    }
    Ok(())
}
