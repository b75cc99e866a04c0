//! Presentation view-model over the persisted groups.
//!
//! A [`Session`] carries the state a front end keeps between user actions:
//! which group is active and the last rendered message. The message is tagged
//! with the group it was rendered for and is only visible while that group is
//! active. Roster mutations go through the [`RosterEngine`] and any successful
//! one drops the group's cached message, so a stale roster can never be shared.

use crate::config::Config;
use crate::error::{ParayanError, Result};
use crate::group::{Group, GroupBook};
use crate::member::Member;
use crate::message;
use crate::paths;
use crate::roster::RosterEngine;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Persisted form of the cached message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedMessage {
    pub group: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
    groups: GroupBook,
    active: String,
    message: Option<CachedMessage>,
}

impl Session {
    /// Build a session from in-memory state. `active` defaults to the first group.
    pub fn new(config: Config, groups: GroupBook, active: Option<&str>) -> Result<Self> {
        let warnings = config.validate();
        if Config::has_errors(&warnings) {
            let reasons: Vec<_> = warnings.into_iter().map(|w| w.message).collect();
            return Err(ParayanError::InvalidConfig(reasons.join("; ")));
        }

        let active = match active {
            Some(selector) => groups.find(selector)?.id.clone(),
            None => groups
                .first()
                .map(|g| g.id.clone())
                .ok_or_else(|| ParayanError::GroupNotFound("(none)".to_string()))?,
        };

        Ok(Self {
            config,
            groups,
            active,
            message: None,
        })
    }

    /// Load config, groups and any cached message from `root`.
    pub fn open(root: &Path, active: Option<&str>) -> Result<Self> {
        let config = Config::load(root)?;
        let groups = GroupBook::load(root)?;
        let mut session = Self::new(config, groups, active)?;

        let message_path = paths::message_path(root);
        if message_path.exists() {
            let data = std::fs::read_to_string(&message_path)?;
            match serde_json::from_str::<CachedMessage>(&data) {
                Ok(cached) if session.groups.get(&cached.group).is_some() => {
                    session.message = Some(cached);
                }
                Ok(cached) => {
                    tracing::debug!(group = %cached.group, "dropping message for a removed group");
                }
                Err(e) => {
                    tracing::warn!(path = %message_path.display(), error = %e, "unreadable cached message, ignoring");
                }
            }
        }
        Ok(session)
    }

    /// Persist groups and the cached message (removing a stale one).
    pub fn save(&self, root: &Path) -> Result<()> {
        self.groups.save(root)?;
        let message_path = paths::message_path(root);
        match &self.message {
            Some(cached) => {
                let data = serde_json::to_string_pretty(cached)?;
                crate::io::atomic_write(&message_path, data.as_bytes())
            }
            None => crate::io::remove_if_exists(&message_path),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn groups(&self) -> &GroupBook {
        &self.groups
    }

    pub fn engine(&self) -> RosterEngine {
        self.config.engine()
    }

    pub fn active_group(&self) -> Result<&Group> {
        self.groups
            .get(&self.active)
            .ok_or_else(|| ParayanError::GroupNotFound(self.active.clone()))
    }

    /// The active roster, empty if the active group is gone.
    pub fn members(&self) -> &[Member] {
        self.groups
            .get(&self.active)
            .map(|g| g.members.as_slice())
            .unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Roster mutations
    // -----------------------------------------------------------------------

    pub fn add_member(&mut self, name: &str, chapter: u32) -> Result<&Member> {
        let next = self.engine().add(self.members(), name, chapter)?;
        self.replace_roster(next)?;
        self.last_member()
    }

    /// Returns how many names were added.
    pub fn bulk_add<S: AsRef<str>>(&mut self, names: &[S]) -> Result<usize> {
        let before = self.members().len();
        let next = self.engine().bulk_add(self.members(), names)?;
        let added = next.len() - before;
        self.replace_roster(next)?;
        Ok(added)
    }

    pub fn edit_member(&mut self, id: &str, name: &str, chapter: u32, cascade: bool) -> Result<()> {
        let next = self
            .engine()
            .edit(self.members(), id, name, chapter, cascade)?;
        self.replace_roster(next)
    }

    pub fn delete_member(&mut self, id: &str) -> Result<()> {
        let next = self.engine().delete(self.members(), id)?;
        self.replace_roster(next)
    }

    /// Advance every member of the active group. No-op on an empty roster.
    pub fn rotate(&mut self) -> Result<()> {
        if self.members().is_empty() {
            return Ok(());
        }
        let next = self.engine().rotate_all(self.members());
        self.replace_roster(next)
    }

    fn replace_roster(&mut self, members: Vec<Member>) -> Result<()> {
        self.groups.set_members(&self.active, members)?;
        self.invalidate_message();
        tracing::debug!(group = %self.active, members = self.members().len(), "roster updated");
        Ok(())
    }

    fn last_member(&self) -> Result<&Member> {
        self.members()
            .last()
            .ok_or(ParayanError::EmptyRoster)
    }

    // -----------------------------------------------------------------------
    // Group management
    // -----------------------------------------------------------------------

    /// Create a group and make it active.
    pub fn add_group(&mut self, name: Option<&str>) -> Result<&Group> {
        let id = self.groups.add_group(name)?;
        self.active = id;
        self.active_group()
    }

    pub fn rename_group(&mut self, selector: &str, name: &str) -> Result<()> {
        let id = self.groups.find(selector)?.id.clone();
        self.groups.rename_group(&id, name)
    }

    /// Delete a group. If it was active, the first remaining group becomes active.
    pub fn delete_group(&mut self, selector: &str) -> Result<Group> {
        let id = self.groups.find(selector)?.id.clone();
        let removed = self.groups.delete_group(&id)?;
        if self.active == id {
            if let Some(first) = self.groups.first() {
                self.active = first.id.clone();
            }
        }
        if self.message.as_ref().is_some_and(|m| m.group == id) {
            self.message = None;
        }
        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // Message
    // -----------------------------------------------------------------------

    /// Render the active roster for `today` and cache the text.
    pub fn generate(&mut self, today: NaiveDate) -> Result<&str> {
        let text = message::render(self.members(), today, self.config.reading_day)?;
        let cached = self.message.insert(CachedMessage {
            group: self.active.clone(),
            text,
        });
        Ok(cached.text.as_str())
    }

    /// The cached message, if it was rendered for the active group.
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_ref()
            .filter(|m| m.group == self.active)
            .map(|m| m.text.as_str())
    }

    /// Replace the cached message with hand-edited text for the active group.
    pub fn set_message(&mut self, text: impl Into<String>) {
        self.message = Some(CachedMessage {
            group: self.active.clone(),
            text: text.into(),
        });
    }

    /// Drop the active group's cached message. Another group's is kept.
    pub fn invalidate_message(&mut self) {
        if self.message.as_ref().is_some_and(|m| m.group == self.active) {
            self.message = None;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
