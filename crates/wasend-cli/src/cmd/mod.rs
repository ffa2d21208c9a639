pub mod categories;
pub mod config;
pub mod contact;
pub mod init;
pub mod pending;
pub mod send;
pub mod template;

use crate::terminal::{BrowserOpener, PromptConfirmation, SnapshotRenderer, TerminalFeedback};
use anyhow::Context;
use std::path::Path;
use wasend_core::{
    app::App, collab::Collaborators, config::Config, paths, storage::FileStore, WasendError,
};

/// A failure the feedback channel has already shown to the user.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct Reported(pub String);

pub fn reported(err: WasendError) -> anyhow::Error {
    anyhow::Error::new(Reported(err.to_string()))
}

pub struct Opened {
    pub app: App<FileStore>,
    pub view: SnapshotRenderer,
}

pub fn open_app(root: &Path, json: bool) -> anyhow::Result<Opened> {
    let config = Config::load(root).context("failed to load config")?;
    open_app_with(root, config, json, json)
}

/// Open the contact store with an explicit config. `quiet_prompts` suppresses
/// the confirmation text when the caller resolves it right away.
pub fn open_app_with(
    root: &Path,
    config: Config,
    json: bool,
    quiet_prompts: bool,
) -> anyhow::Result<Opened> {
    if !paths::is_initialized(root) {
        return Err(WasendError::NotInitialized.into());
    }
    let view = SnapshotRenderer::default();
    let collab = Collaborators {
        renderer: Box::new(view.clone()),
        confirmations: Box::new(PromptConfirmation {
            quiet: quiet_prompts,
        }),
        feedback: Box::new(TerminalFeedback { json }),
        opener: Box::new(BrowserOpener),
    };
    let app = App::open(FileStore::for_root(root), config, collab)
        .context("failed to open contact store")?;
    Ok(Opened { app, view })
}

/// Fail the command if any write was lost; the messages are already printed.
pub fn finish(app: &App<FileStore>) -> anyhow::Result<()> {
    if app.write_failures() > 0 {
        return Err(anyhow::Error::new(Reported(
            "changes could not be saved".to_string(),
        )));
    }
    Ok(())
}
