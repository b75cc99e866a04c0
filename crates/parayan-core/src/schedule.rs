use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Day of the week the group reads on.
pub const DEFAULT_READING_DAY: Weekday = Weekday::Thu;

/// The reading date that applies on `today`: today itself when it already is
/// `reading_day`, otherwise the next such day (1–6 days ahead).
pub fn reading_date(today: NaiveDate, reading_day: Weekday) -> NaiveDate {
    let ahead = (7 + reading_day.num_days_from_monday() - today.weekday().num_days_from_monday()) % 7;
    today + Duration::days(i64::from(ahead))
}

/// `dd/MM/yyyy`, the format used in the shared message.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn marathi_weekday(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "सोमवार",
        Weekday::Tue => "मंगळवार",
        Weekday::Wed => "बुधवार",
        Weekday::Thu => "गुरुवार",
        Weekday::Fri => "शुक्रवार",
        Weekday::Sat => "शनिवार",
        Weekday::Sun => "रविवार",
    }
}

/// Date line fragment, e.g. `दि. 19/02/2026 गुरुवार`.
pub fn reading_date_label(today: NaiveDate, reading_day: Weekday) -> String {
    let date = reading_date(today, reading_day);
    format!(
        "दि. {} {}",
        format_date(date),
        marathi_weekday(reading_day)
    )
}
