use super::{open_session, require_confirmation, save_session};
use crate::output::{print_json, print_table};
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum GroupSubcommand {
    /// List all groups
    List,
    /// Create a group (named "पारायण गृप N" when no name is given)
    Add {
        /// Group name
        name: Vec<String>,
    },
    /// Rename a group
    Rename {
        /// Group id or current name
        group: String,
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Delete a group and all of its members
    Delete {
        /// Group id or name
        group: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(
    root: &Path,
    subcmd: GroupSubcommand,
    active: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    match subcmd {
        GroupSubcommand::List => list(root, active, json),
        GroupSubcommand::Add { name } => add(root, &name.join(" "), json),
        GroupSubcommand::Rename { group, name } => rename(root, &group, &name.join(" "), json),
        GroupSubcommand::Delete { group, yes } => delete(root, &group, yes, json),
    }
}

fn list(root: &Path, active: Option<&str>, json: bool) -> anyhow::Result<()> {
    let session = open_session(root, active)?;
    let active_id = session.active_group()?.id.clone();
    let groups = &session.groups().groups;

    if json {
        print_json(groups)?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = groups
        .iter()
        .map(|g| {
            vec![
                if g.id == active_id { "*" } else { "" }.to_string(),
                g.id.clone(),
                g.name.clone(),
                g.members.len().to_string(),
            ]
        })
        .collect();
    print_table(&["", "ID", "NAME", "MEMBERS"], rows);
    Ok(())
}

fn add(root: &Path, name: &str, json: bool) -> anyhow::Result<()> {
    let mut session = open_session(root, None)?;
    let name = if name.trim().is_empty() {
        None
    } else {
        Some(name)
    };
    let group = session.add_group(name)?.clone();
    save_session(root, &session)?;

    if json {
        print_json(&group)?;
    } else {
        println!("Added group [{}]: {}", group.id, group.name);
    }
    Ok(())
}

fn rename(root: &Path, selector: &str, name: &str, json: bool) -> anyhow::Result<()> {
    let mut session = open_session(root, None)?;
    let id = session.groups().find(selector)?.id.clone();
    session.rename_group(&id, name)?;
    save_session(root, &session)?;

    let group = session.groups().find(&id)?;
    if json {
        print_json(&serde_json::json!({ "id": group.id, "name": group.name }))?;
    } else {
        println!("Renamed group [{}] to: {}", group.id, group.name);
    }
    Ok(())
}

fn delete(root: &Path, selector: &str, yes: bool, json: bool) -> anyhow::Result<()> {
    let mut session = open_session(root, None)?;
    let target = session.groups().find(selector)?.name.clone();
    require_confirmation(yes, &format!("delete group '{target}' and all its members"))?;

    let removed = session.delete_group(selector)?;
    save_session(root, &session)?;

    if json {
        print_json(&serde_json::json!({
            "id": removed.id,
            "name": removed.name,
            "members_removed": removed.members.len(),
        }))?;
    } else {
        println!(
            "Deleted group [{}]: {} ({} members)",
            removed.id,
            removed.name,
            removed.members.len()
        );
    }
    Ok(())
}
