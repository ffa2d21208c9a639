use anyhow::Context;
use std::path::Path;
use wasend_core::{config::Config, io, paths, store::CONTACTS_KEY};

pub fn run(root: &Path) -> anyhow::Result<()> {
    println!("Initializing wasend in: {}", root.display());

    let dir = paths::wasend_dir(root);
    io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let config_path = paths::config_path(root);
    if !config_path.exists() {
        Config::default()
            .save(root)
            .context("failed to write config.yaml")?;
        println!("  created: .wasend/config.yaml");
    } else {
        println!("  exists:  .wasend/config.yaml");
    }

    let contacts_path = paths::blob_path(&dir, CONTACTS_KEY);
    let name = contacts_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if io::write_if_missing(&contacts_path, b"[]").context("failed to seed contact list")? {
        println!("  created: .wasend/{name}");
    } else {
        println!("  exists:  .wasend/{name}");
    }

    Ok(())
}
