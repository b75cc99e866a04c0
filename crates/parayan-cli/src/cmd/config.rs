use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use parayan_core::config::{Config, ConfigWarning, WarnLevel};
use parayan_core::group::GroupBook;
use parayan_core::ParayanError;
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the effective configuration
    Show,

    /// Check the config and stored groups for problems
    Validate,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(root, json),
        ConfigSubcommand::Validate => validate(root, json),
    }
}

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    if json {
        print_json(&config)?;
    } else {
        print!("{}", serde_yaml::to_string(&config)?);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let mut warnings = config.validate();
    // Group checks need a usable ring size. Read only: no migration or fallback.
    if !Config::has_errors(&warnings) {
        match GroupBook::inspect(root) {
            Ok(groups) => warnings.extend(groups.validate(&config.engine())),
            Err(ParayanError::Json(e)) => {
                warnings.push(ConfigWarning::error(format!("groups file is unreadable: {e}")))
            }
            Err(e) => return Err(e).context("failed to read groups"),
        }
    }

    if json {
        let value = serde_json::json!({
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("Config and groups are valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if Config::has_errors(&warnings) {
        anyhow::bail!("validation found errors");
    }

    Ok(())
}
