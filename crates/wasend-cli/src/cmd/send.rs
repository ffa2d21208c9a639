use crate::cmd::{open_app_with, reported, Opened, Reported};
use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use wasend_core::{config::Config, contact::normalize_phone};

/// Build the chat link for one contact and open it unless `no_open` is set.
/// The link is printed even when opening it fails; the command then exits non-zero.
pub fn run(
    root: &Path,
    phone: &str,
    message: Option<&str>,
    no_open: bool,
    json: bool,
) -> anyhow::Result<()> {
    let mut config = Config::load(root).context("failed to load config")?;
    if no_open {
        config.link.open_browser = false;
    }
    let wants_open = config.link.open_browser;
    let Opened { mut app, .. } = open_app_with(root, config, json, json)?;

    let phone = normalize_phone(phone);
    let sent = match message {
        Some(m) => app.send(&phone, m),
        None => app.send_saved(&phone),
    }
    .map_err(reported)?;

    if json {
        print_json(&serde_json::json!({
            "phone": phone,
            "url": sent.url,
            "opened": sent.opened,
        }))?;
    } else {
        println!("{}", sent.url);
    }

    if wants_open && !sent.opened {
        return Err(anyhow::Error::new(Reported(
            "chat link could not be opened".to_string(),
        )));
    }
    Ok(())
}
