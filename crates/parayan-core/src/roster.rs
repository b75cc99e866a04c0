use crate::cycle::{self, TOTAL_CHAPTERS};
use crate::error::{ParayanError, Result};
use crate::member::Member;

/// Default soft limit on members per group.
pub const MAX_MEMBERS: usize = 21;

/// Rules for mutating an ordered roster.
///
/// Every operation borrows the current roster and returns a new one, or an
/// error with nothing changed. Roster order is display order and is never
/// reshuffled by chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterEngine {
    pub chapters: u32,
    pub capacity: usize,
}

impl Default for RosterEngine {
    fn default() -> Self {
        Self {
            chapters: TOTAL_CHAPTERS,
            capacity: MAX_MEMBERS,
        }
    }
}

impl RosterEngine {
    pub fn new(chapters: u32, capacity: usize) -> Self {
        Self { chapters, capacity }
    }

    /// Append a single member.
    pub fn add(&self, roster: &[Member], name: &str, chapter: u32) -> Result<Vec<Member>> {
        if roster.len() >= self.capacity {
            return Err(ParayanError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        let name = validate_name(name)?;
        self.validate_chapter(chapter)?;

        let mut next = roster.to_vec();
        next.push(Member::new(name, chapter));
        Ok(next)
    }

    /// Append many members, assigning chapters sequentially.
    ///
    /// The sequence continues from the last member in roster order (not the
    /// highest chapter), so a fresh roster starts at chapter 1. Names past the
    /// free capacity are dropped.
    pub fn bulk_add<S: AsRef<str>>(&self, roster: &[Member], names: &[S]) -> Result<Vec<Member>> {
        let names: Vec<&str> = names
            .iter()
            .map(|n| n.as_ref().trim())
            .filter(|n| !n.is_empty())
            .collect();

        let available = self.capacity.saturating_sub(roster.len());
        if available == 0 {
            return Err(ParayanError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        if names.is_empty() {
            return Err(ParayanError::InvalidName);
        }

        let mut chapter = roster.last().map(|m| m.current_chapter).unwrap_or(0);
        let mut next = roster.to_vec();
        for name in names.into_iter().take(available) {
            chapter = cycle::advance(chapter, self.chapters);
            next.push(Member::new(name, chapter));
        }
        Ok(next)
    }

    /// Replace a member's name and chapter.
    ///
    /// With `cascade`, every later member in roster order is renumbered into a
    /// contiguous run following the new chapter, wrapping at the ring size.
    pub fn edit(
        &self,
        roster: &[Member],
        id: &str,
        name: &str,
        chapter: u32,
        cascade: bool,
    ) -> Result<Vec<Member>> {
        let index = position(roster, id)?;
        let name = validate_name(name)?;
        self.validate_chapter(chapter)?;

        let mut next = roster.to_vec();
        next[index].name = name.to_string();
        next[index].current_chapter = chapter;

        if cascade {
            let mut current = chapter;
            for member in next.iter_mut().skip(index + 1) {
                current = cycle::advance(current, self.chapters);
                member.current_chapter = current;
            }
        }
        Ok(next)
    }

    /// Remove a member. Remaining chapters are left alone.
    pub fn delete(&self, roster: &[Member], id: &str) -> Result<Vec<Member>> {
        let index = position(roster, id)?;
        let mut next = roster.to_vec();
        next.remove(index);
        Ok(next)
    }

    /// Advance every member one chapter.
    pub fn rotate_all(&self, roster: &[Member]) -> Vec<Member> {
        roster
            .iter()
            .map(|m| Member {
                current_chapter: cycle::advance(m.current_chapter, self.chapters),
                ..m.clone()
            })
            .collect()
    }

    /// Chapter suggested for the next single add.
    pub fn next_chapter(&self, roster: &[Member]) -> u32 {
        cycle::advance(
            roster.last().map(|m| m.current_chapter).unwrap_or(0),
            self.chapters,
        )
    }

    pub fn validate_chapter(&self, chapter: u32) -> Result<()> {
        if !cycle::contains(chapter, self.chapters) {
            return Err(ParayanError::InvalidChapter {
                chapter,
                max: self.chapters,
            });
        }
        Ok(())
    }
}

/// Trim a display name, rejecting blanks.
pub fn validate_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ParayanError::InvalidName);
    }
    Ok(trimmed)
}

fn position(roster: &[Member], id: &str) -> Result<usize> {
    roster
        .iter()
        .position(|m| m.id == id)
        .ok_or_else(|| ParayanError::MemberNotFound(id.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
