use super::{open_session, require_confirmation, save_session};
use crate::output::print_json;
use std::path::Path;

pub fn run(root: &Path, group: Option<&str>, yes: bool, json: bool) -> anyhow::Result<()> {
    let mut session = open_session(root, group)?;
    let name = session.active_group()?.name.clone();

    if session.members().is_empty() {
        if json {
            print_json(&serde_json::json!({ "group": name, "rotated": 0 }))?;
        } else {
            println!("No members in '{name}'; nothing to rotate.");
        }
        return Ok(());
    }

    require_confirmation(yes, &format!("rotate chapters for '{name}'"))?;
    session.rotate()?;
    save_session(root, &session)?;

    if json {
        print_json(&serde_json::json!({
            "group": name,
            "rotated": session.members().len(),
            "members": session.members(),
        }))?;
    } else {
        println!(
            "Rotated {} members in '{name}' to their next chapter.",
            session.members().len()
        );
    }
    Ok(())
}
