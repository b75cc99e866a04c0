use crate::error::{ParayanError, Result};
use crate::member::Member;
use crate::schedule;
use chrono::{NaiveDate, Weekday};

/// Width of the name column, in UTF-16 code units.
pub const NAME_COLUMN_WIDTH: usize = 21;

const GREETING: &str = "जय गजानन!";
const TITLE: &str = "*पारायण गृप*";
const HEADER_ROW: &str = "*भक्ताचे नांव*           *अध्याय*";
const CLOSING: &str = "अध्याय वाचल्यानंतर गृपवर त्वरित कळविणे आवश्यक आहे.";

/// Render the weekly WhatsApp message for `roster`.
///
/// Members are listed by ascending chapter; equal chapters keep roster
/// order. The roster itself is not reordered.
pub fn render(roster: &[Member], today: NaiveDate, reading_day: Weekday) -> Result<String> {
    if roster.is_empty() {
        return Err(ParayanError::EmptyRoster);
    }

    let member_list = sorted_by_chapter(roster)
        .into_iter()
        .map(|m| format!("{} {}", pad_end(&m.name, NAME_COLUMN_WIDTH), m.current_chapter))
        .collect::<Vec<_>>()
        .join("\n");

    let date_label = schedule::reading_date_label(today, reading_day);

    Ok(format!(
        "{GREETING}\n{TITLE}\n\n*{date_label}* ला वाचावयाचे अध्याय खाली दिले आहे.\n\n{HEADER_ROW}\n\n{member_list}\n\n{CLOSING}"
    ))
}

/// Display copy of the roster ordered by chapter (stable).
pub fn sorted_by_chapter(roster: &[Member]) -> Vec<&Member> {
    let mut sorted: Vec<&Member> = roster.iter().collect();
    sorted.sort_by_key(|m| m.current_chapter);
    sorted
}

/// Column width of `text` as the message counts it: UTF-16 code units.
pub fn display_width(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Right-pad with spaces to `width` display units. Longer text is kept whole.
pub fn pad_end(text: &str, width: usize) -> String {
    let len = display_width(text);
    let mut out = String::with_capacity(text.len() + width.saturating_sub(len));
    out.push_str(text);
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
    out
}
