use super::{open_session, require_confirmation, save_session};
use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use parayan_core::{member::Member, session::Session};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum MemberSubcommand {
    /// List members in roster order
    List,
    /// Add a member
    Add {
        #[arg(required = true)]
        name: Vec<String>,
        /// Starting chapter (default: one after the last member's)
        #[arg(long, short = 'c')]
        chapter: Option<u32>,
    },
    /// Add many members, one name per line; chapters are assigned in sequence
    Bulk {
        /// Read names from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Change a member's name or chapter
    Edit {
        /// Member id or exact name
        member: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, short = 'c')]
        chapter: Option<u32>,
        /// Only change this member; by default later members are renumbered to follow it
        #[arg(long)]
        no_sync: bool,
    },
    /// Remove a member
    Delete {
        /// Member id or exact name
        member: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(
    root: &Path,
    subcmd: MemberSubcommand,
    group: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    match subcmd {
        MemberSubcommand::List => list(root, group, json),
        MemberSubcommand::Add { name, chapter } => add(root, group, &name.join(" "), chapter, json),
        MemberSubcommand::Bulk { file } => bulk(root, group, file.as_deref(), json),
        MemberSubcommand::Edit {
            member,
            name,
            chapter,
            no_sync,
        } => edit(
            root,
            group,
            &member,
            name.as_deref(),
            chapter,
            !no_sync,
            json,
        ),
        MemberSubcommand::Delete { member, yes } => delete(root, group, &member, yes, json),
    }
}

/// Resolve a member by id, then by exact name.
fn resolve<'a>(session: &'a Session, selector: &str) -> anyhow::Result<&'a Member> {
    let members = session.members();
    if let Some(m) = members.iter().find(|m| m.id == selector) {
        return Ok(m);
    }
    let mut by_name = members.iter().filter(|m| m.name == selector);
    match (by_name.next(), by_name.next()) {
        (Some(m), None) => Ok(m),
        (Some(_), Some(_)) => {
            anyhow::bail!("more than one member is named '{selector}'; use the member id")
        }
        (None, _) => anyhow::bail!(
            "member '{selector}' not found in group '{}'",
            session.active_group()?.name
        ),
    }
}

fn list(root: &Path, group: Option<&str>, json: bool) -> anyhow::Result<()> {
    let session = open_session(root, group)?;
    let active = session.active_group()?;

    if json {
        print_json(&active.members)?;
        return Ok(());
    }

    if active.members.is_empty() {
        println!(
            "No members in '{}' yet. Add up to {}.",
            active.name,
            session.config().max_members
        );
        return Ok(());
    }

    println!(
        "{} ({} / {})",
        active.name,
        active.members.len(),
        session.config().max_members
    );
    println!();

    let rows: Vec<Vec<String>> = active
        .members
        .iter()
        .enumerate()
        .map(|(i, m)| {
            vec![
                (i + 1).to_string(),
                m.id.clone(),
                m.name.clone(),
                m.current_chapter.to_string(),
            ]
        })
        .collect();
    print_table(&["#", "ID", "NAME", "CHAPTER"], rows);
    Ok(())
}

fn add(
    root: &Path,
    group: Option<&str>,
    name: &str,
    chapter: Option<u32>,
    json: bool,
) -> anyhow::Result<()> {
    let mut session = open_session(root, group)?;
    let chapter = chapter.unwrap_or_else(|| session.engine().next_chapter(session.members()));
    let member = session.add_member(name, chapter)?.clone();
    save_session(root, &session)?;

    if json {
        print_json(&member)?;
    } else {
        println!(
            "Added member [{}]: {} (chapter {})",
            member.id, member.name, member.current_chapter
        );
    }
    Ok(())
}

fn bulk(root: &Path, group: Option<&str>, file: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let input = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read names from stdin")?;
            buf
        }
    };
    let names: Vec<&str> = input
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut session = open_session(root, group)?;
    let added = session.bulk_add(&names)?;
    let dropped = names.len() - added;
    save_session(root, &session)?;

    let members = session.members();
    let new_members = &members[members.len() - added..];

    if json {
        print_json(&serde_json::json!({
            "added": new_members,
            "dropped": dropped,
        }))?;
        return Ok(());
    }

    println!("Added {added} members to '{}'.", session.active_group()?.name);
    for m in new_members {
        println!("  [{}] {} (chapter {})", m.id, m.name, m.current_chapter);
    }
    if dropped > 0 {
        println!(
            "Skipped {dropped} names: group limit is {} members.",
            session.config().max_members
        );
    }
    Ok(())
}

fn edit(
    root: &Path,
    group: Option<&str>,
    selector: &str,
    name: Option<&str>,
    chapter: Option<u32>,
    cascade: bool,
    json: bool,
) -> anyhow::Result<()> {
    let mut session = open_session(root, group)?;
    let current = resolve(&session, selector)?.clone();
    let name = name.unwrap_or(&current.name);
    let chapter = chapter.unwrap_or(current.current_chapter);

    session.edit_member(&current.id, name, chapter, cascade)?;
    save_session(root, &session)?;

    if json {
        print_json(&serde_json::json!({
            "id": current.id,
            "synced": cascade,
            "members": session.members(),
        }))?;
    } else if cascade {
        println!(
            "Updated member [{}]; later members renumbered from chapter {chapter}",
            current.id
        );
    } else {
        println!("Updated member [{}]", current.id);
    }
    Ok(())
}

fn delete(
    root: &Path,
    group: Option<&str>,
    selector: &str,
    yes: bool,
    json: bool,
) -> anyhow::Result<()> {
    let mut session = open_session(root, group)?;
    let target = resolve(&session, selector)?.clone();
    require_confirmation(yes, &format!("delete member '{}'", target.name))?;

    session.delete_member(&target.id)?;
    save_session(root, &session)?;

    if json {
        print_json(&serde_json::json!({ "id": target.id, "deleted": true }))?;
    } else {
        println!("Deleted member [{}]: {}", target.id, target.name);
    }
    Ok(())
}
