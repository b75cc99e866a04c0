use crate::output::print_json;
use anyhow::Context;
use parayan_core::{config::Config, group::GroupBook, paths};
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let dir = paths::parayan_dir(root);
    std::fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let config_created = if paths::config_path(root).exists() {
        false
    } else {
        Config::default()
            .save(root)
            .context("failed to write config.yaml")?;
        true
    };

    // Loading migrates a legacy roster or seeds the starter group.
    let groups_created = !paths::groups_path(root).exists();
    if groups_created {
        GroupBook::load(root)
            .and_then(|book| book.save(root))
            .context("failed to write groups file")?;
    }

    if json {
        print_json(&serde_json::json!({
            "root": root.display().to_string(),
            "config_created": config_created,
            "groups_created": groups_created,
        }))?;
        return Ok(());
    }

    println!("Initializing parayan in: {}", root.display());
    for (created, file) in [
        (config_created, paths::CONFIG_FILE),
        (groups_created, paths::GROUPS_FILE),
    ] {
        if created {
            println!("  created: {file}");
        } else {
            println!("  exists:  {file}");
        }
    }
    Ok(())
}
