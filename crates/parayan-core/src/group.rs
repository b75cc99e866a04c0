use crate::config::ConfigWarning;
use crate::cycle;
use crate::error::{ParayanError, Result};
use crate::member::{new_id, Member};
use crate::paths;
use crate::roster::{validate_name, RosterEngine};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Name prefix for groups created without an explicit name.
pub const DEFAULT_GROUP_PREFIX: &str = "पारायण गृप";

// ---------------------------------------------------------------------------
// Group
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            members: Vec::new(),
        }
    }
}

/// `पारायण गृप {n}` with `n` in Devanagari digits.
pub fn default_group_name(n: usize) -> String {
    format!("{DEFAULT_GROUP_PREFIX} {}", devanagari_digits(n))
}

fn devanagari_digits(n: usize) -> String {
    n.to_string()
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(0x0966 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// GroupBook
// ---------------------------------------------------------------------------

/// All groups, in tab order. Never empty once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupBook {
    pub groups: Vec<Group>,
}

impl GroupBook {
    /// Data a brand-new install starts with.
    pub fn seeded() -> Self {
        Self {
            groups: vec![Group {
                id: "default-1".to_string(),
                name: default_group_name(1),
                members: vec![
                    Member::with_id("1", "Member 1", 1),
                    Member::with_id("2", "Member 2", 2),
                ],
            }],
        }
    }

    pub fn first(&self) -> Option<&Group> {
        self.groups.first()
    }

    pub fn get(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.id == id)
    }

    /// Look a group up by id, falling back to an exact name match.
    pub fn find(&self, selector: &str) -> Result<&Group> {
        self.get(selector)
            .or_else(|| self.groups.iter().find(|g| g.name == selector))
            .ok_or_else(|| ParayanError::GroupNotFound(selector.to_string()))
    }

    /// Append a group and return its id.
    pub fn add_group(&mut self, name: Option<&str>) -> Result<String> {
        let name = match name {
            Some(n) => validate_name(n)?.to_string(),
            None => default_group_name(self.groups.len() + 1),
        };
        let group = Group::new(name);
        let id = group.id.clone();
        self.groups.push(group);
        Ok(id)
    }

    pub fn rename_group(&mut self, id: &str, name: &str) -> Result<()> {
        let name = validate_name(name)?.to_string();
        let group = self
            .get_mut(id)
            .ok_or_else(|| ParayanError::GroupNotFound(id.to_string()))?;
        group.name = name;
        Ok(())
    }

    /// Remove a group and its roster. The last group cannot be removed.
    pub fn delete_group(&mut self, id: &str) -> Result<Group> {
        let index = self
            .groups
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| ParayanError::GroupNotFound(id.to_string()))?;
        if self.groups.len() <= 1 {
            return Err(ParayanError::LastGroupDeletion);
        }
        Ok(self.groups.remove(index))
    }

    /// Replace a group's roster wholesale.
    pub fn set_members(&mut self, id: &str, members: Vec<Member>) -> Result<()> {
        let group = self
            .get_mut(id)
            .ok_or_else(|| ParayanError::GroupNotFound(id.to_string()))?;
        group.members = members;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Report stored data that no engine operation would have produced.
    pub fn validate(&self, engine: &RosterEngine) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.groups.is_empty() {
            warnings.push(ConfigWarning::error("no groups stored"));
        }

        let mut group_ids = HashSet::new();
        for group in &self.groups {
            if !group_ids.insert(group.id.as_str()) {
                warnings.push(ConfigWarning::error(format!(
                    "duplicate group id '{}'",
                    group.id
                )));
            }
            if group.members.len() > engine.capacity {
                warnings.push(ConfigWarning::warning(format!(
                    "group '{}' has {} members (limit {})",
                    group.name,
                    group.members.len(),
                    engine.capacity
                )));
            }

            let mut member_ids = HashSet::new();
            for member in &group.members {
                if !member_ids.insert(member.id.as_str()) {
                    warnings.push(ConfigWarning::error(format!(
                        "group '{}' has duplicate member id '{}'",
                        group.name, member.id
                    )));
                }
                if member.name.trim().is_empty() {
                    warnings.push(ConfigWarning::warning(format!(
                        "group '{}' has a member with an empty name (id '{}')",
                        group.name, member.id
                    )));
                }
                if !cycle::contains(member.current_chapter, engine.chapters) {
                    warnings.push(ConfigWarning::warning(format!(
                        "member '{}' in group '{}' is on chapter {} (expected 1-{})",
                        member.name, group.name, member.current_chapter, engine.chapters
                    )));
                }
            }
        }

        warnings
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Load groups, migrating or seeding when there is nothing usable on disk.
    ///
    /// An unreadable groups blob is renamed to a `.bak` sibling and replaced by
    /// the seeded book, so the tool always starts with at least one group and
    /// the next save cannot overwrite the user's data.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::groups_path(root);
        if path.exists() {
            let data = std::fs::read_to_string(&path)?;
            return match serde_json::from_str::<GroupBook>(&data) {
                Ok(book) if book.groups.is_empty() => {
                    tracing::warn!(path = %path.display(), "groups file is empty, using defaults");
                    Ok(Self::seeded())
                }
                Ok(book) => Ok(book),
                Err(e) => {
                    let backup = crate::io::move_aside(&path)?;
                    tracing::warn!(
                        path = %path.display(),
                        backup = %backup.display(),
                        error = %e,
                        "unreadable groups file moved aside, using defaults"
                    );
                    Ok(Self::seeded())
                }
            };
        }

        let legacy = paths::legacy_members_path(root);
        if legacy.exists() {
            return Self::migrate_legacy(root, &legacy);
        }

        Ok(Self::seeded())
    }

    /// Read what is stored without migrating, seeding or moving anything.
    ///
    /// Parse failures are returned as [`ParayanError::Json`] rather than
    /// replaced by defaults.
    pub fn inspect(root: &Path) -> Result<Self> {
        let path = paths::groups_path(root);
        if path.exists() {
            let data = std::fs::read_to_string(&path)?;
            return Ok(serde_json::from_str(&data)?);
        }

        let legacy = paths::legacy_members_path(root);
        if legacy.exists() {
            let data = std::fs::read_to_string(&legacy)?;
            return Ok(Self::from_legacy(serde_json::from_str(&data)?));
        }

        Ok(Self::seeded())
    }

    fn from_legacy(members: Vec<Member>) -> Self {
        Self {
            groups: vec![Group {
                id: new_id(),
                name: default_group_name(1),
                members,
            }],
        }
    }

    fn migrate_legacy(root: &Path, legacy: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(legacy)?;
        let members: Vec<Member> = match serde_json::from_str(&data) {
            Ok(m) => m,
            Err(e) => {
                let backup = crate::io::move_aside(legacy)?;
                tracing::warn!(
                    path = %legacy.display(),
                    backup = %backup.display(),
                    error = %e,
                    "unreadable legacy roster moved aside, using defaults"
                );
                return Ok(Self::seeded());
            }
        };

        let book = Self::from_legacy(members);
        book.save(root)?;
        crate::io::remove_if_exists(legacy)?;
        tracing::info!(
            members = book.groups[0].members.len(),
            "migrated legacy roster into first group"
        );
        Ok(book)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::groups_path(root);
        let data = serde_json::to_string_pretty(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
