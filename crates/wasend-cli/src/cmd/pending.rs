use crate::cmd::contact::print_resolution;
use crate::cmd::{finish, open_app, reported, Opened};
use crate::output::{print_json, print_table};
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum PendingSubcommand {
    /// List confirmations waiting for an answer
    List,
    /// Accept a pending confirmation and apply it
    Confirm { id: String },
    /// Drop a pending confirmation without applying it
    Dismiss { id: String },
}

pub fn run(root: &Path, subcmd: PendingSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        PendingSubcommand::List => list(root, json),
        PendingSubcommand::Confirm { id } => resolve(root, &id, true, json),
        PendingSubcommand::Dismiss { id } => resolve(root, &id, false, json),
    }
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let Opened { app, .. } = open_app(root, json)?;
    let pending = app.pending();

    if json {
        print_json(&pending)?;
        return Ok(());
    }

    if pending.is_empty() {
        println!("No pending confirmations.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = pending
        .iter()
        .map(|p| {
            vec![
                p.id.clone(),
                p.action.to_string(),
                p.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
                p.prompt.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "ACTION", "CREATED", "PROMPT"], rows);
    Ok(())
}

fn resolve(root: &Path, id: &str, accepted: bool, json: bool) -> anyhow::Result<()> {
    let Opened { mut app, .. } = open_app(root, json)?;
    let resolution = app.resolve(id, accepted).map_err(reported)?;
    finish(&app)?;
    if json {
        print_resolution(id, &resolution)?;
    }
    Ok(())
}
