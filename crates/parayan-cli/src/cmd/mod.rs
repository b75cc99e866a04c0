pub mod config;
pub mod group;
pub mod init;
pub mod member;
pub mod message;
pub mod rotate;
pub mod status;

use anyhow::Context;
use parayan_core::session::Session;
use std::path::Path;

/// Open the session for `root` with the selected group active.
pub fn open_session(root: &Path, group: Option<&str>) -> anyhow::Result<Session> {
    Session::open(root, group)
        .with_context(|| format!("failed to open roster in {}", root.display()))
}

pub fn save_session(root: &Path, session: &Session) -> anyhow::Result<()> {
    session.save(root).context("failed to save groups")
}

/// Destructive commands need an explicit `--yes`.
pub fn require_confirmation(yes: bool, action: &str) -> anyhow::Result<()> {
    if !yes {
        anyhow::bail!("refusing to {action} without --yes (this cannot be undone)");
    }
    Ok(())
}

/// Today in local time, or the date given as `YYYY-MM-DD`.
pub fn today_or(date: Option<&str>) -> anyhow::Result<chrono::NaiveDate> {
    match date {
        Some(d) => chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{d}': expected YYYY-MM-DD")),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
