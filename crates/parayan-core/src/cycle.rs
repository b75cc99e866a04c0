//! Chapter ring arithmetic.
//!
//! Chapters live on a ring `1..=n`. Every "next chapter" in the crate
//! (weekly rotation, bulk-add assignment, cascade re-sync) goes through
//! [`advance`].

/// Number of chapters in a full reading cycle.
pub const TOTAL_CHAPTERS: u32 = 21;

/// Next chapter on a ring of `n`: `n` wraps to 1, anything else steps by one.
///
/// Total for any input with `n > 0`: an out-of-range chapter read back from
/// disk still lands inside `1..=n`.
pub fn advance(chapter: u32, n: u32) -> u32 {
    debug_assert!(n > 0, "chapter ring must not be empty");
    (chapter % n) + 1
}

/// Whether `chapter` is a valid position on a ring of `n`.
pub fn contains(chapter: u32, n: u32) -> bool {
    (1..=n).contains(&chapter)
}
