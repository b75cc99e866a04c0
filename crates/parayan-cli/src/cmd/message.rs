use super::{open_session, save_session, today_or};
use crate::clipboard;
use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum MessageSubcommand {
    /// Render the weekly message for the active group
    Generate {
        /// Reference date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Also copy the message to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Print the last generated message
    Show,
    /// Copy the last generated message to the clipboard
    Copy,
    /// Replace the generated message with edited text
    Set {
        /// Read the text from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

pub fn run(
    root: &Path,
    subcmd: MessageSubcommand,
    group: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    match subcmd {
        MessageSubcommand::Generate { date, copy } => {
            generate(root, group, date.as_deref(), copy, json)
        }
        MessageSubcommand::Show => show(root, group, json),
        MessageSubcommand::Copy => copy_cached(root, group, json),
        MessageSubcommand::Set { file } => set(root, group, file.as_deref(), json),
    }
}

fn generate(
    root: &Path,
    group: Option<&str>,
    date: Option<&str>,
    copy: bool,
    json: bool,
) -> anyhow::Result<()> {
    let today = today_or(date)?;
    let mut session = open_session(root, group)?;
    let name = session.active_group()?.name.clone();
    let text = session
        .generate(today)
        .with_context(|| format!("cannot generate a message for '{name}'"))?
        .to_string();
    save_session(root, &session)?;

    // Saved first: a clipboard failure leaves the cached message in place.
    let copied_with = if copy {
        Some(clipboard::copy(&text)?)
    } else {
        None
    };

    if json {
        print_json(&serde_json::json!({
            "group": name,
            "message": text,
            "copied": copied_with.is_some(),
        }))?;
    } else {
        println!("{text}");
        if let Some(program) = copied_with {
            eprintln!("Message copied to clipboard ({program}).");
        }
    }
    Ok(())
}

fn show(root: &Path, group: Option<&str>, json: bool) -> anyhow::Result<()> {
    let session = open_session(root, group)?;
    let text = session
        .message()
        .context("no message generated yet: run 'parayan message generate'")?;

    if json {
        print_json(&serde_json::json!({ "message": text }))?;
    } else {
        println!("{text}");
    }
    Ok(())
}

fn copy_cached(root: &Path, group: Option<&str>, json: bool) -> anyhow::Result<()> {
    let session = open_session(root, group)?;
    let text = session
        .message()
        .context("no message generated yet: run 'parayan message generate'")?;
    let program = clipboard::copy(text).context("failed to copy message")?;

    if json {
        print_json(&serde_json::json!({ "copied": true, "tool": program }))?;
    } else {
        println!("Message copied to clipboard.");
    }
    Ok(())
}

fn set(root: &Path, group: Option<&str>, file: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read message from stdin")?;
            buf
        }
    };
    if text.trim().is_empty() {
        anyhow::bail!("message text is empty");
    }

    let mut session = open_session(root, group)?;
    session.set_message(text);
    save_session(root, &session)?;

    if json {
        print_json(&serde_json::json!({ "updated": true }))?;
    } else {
        println!("Message updated.");
    }
    Ok(())
}
