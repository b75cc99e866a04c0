use super::{open_session, today_or};
use crate::output::print_json;
use parayan_core::schedule;
use std::path::Path;

pub fn run(root: &Path, group: Option<&str>, json: bool) -> anyhow::Result<()> {
    let session = open_session(root, group)?;
    let today = today_or(None)?;
    let reading_day = session.config().reading_day;
    let reading = schedule::reading_date(today, reading_day);
    let active = session.active_group()?;

    if json {
        print_json(&serde_json::json!({
            "today": schedule::format_date(today),
            "reading_date": schedule::format_date(reading),
            "reading_day": reading_day.to_string(),
            "group": { "id": active.id, "name": active.name },
            "members": active.members.len(),
            "max_members": session.config().max_members,
            "message_ready": session.message().is_some(),
        }))?;
        return Ok(());
    }

    println!("Group:          {}", active.name);
    println!("Today:          {}", schedule::format_date(today));
    println!(
        "Reading ({}):  {}",
        reading_day,
        schedule::format_date(reading)
    );
    println!(
        "Members:        {} / {}",
        active.members.len(),
        session.config().max_members
    );
    println!(
        "Message:        {}",
        if session.message().is_some() {
            "ready"
        } else {
            "not generated"
        }
    );
    Ok(())
}
