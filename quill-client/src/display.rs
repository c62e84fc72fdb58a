use crate::api::Time;

pub const EDITED_MARKER: &str = "(Edited)";

pub fn pluralize(n: u64, singular: &str, plural: &str) -> String {
    match n {
        1 => format!("{n} {singular}"),
        _ => format!("{n} {plural}"),
    }
}

/// Human-readable age of `date`, as seen at `now`
///
/// Anything older than a week is shown as a calendar date instead.
pub fn format_relative_date(now: Time, date: Time) -> String {
    let age = now - date;
    if age < chrono::Duration::minutes(1) {
        return String::from("just now");
    }
    if age < chrono::Duration::hours(1) {
        return format!("{} ago", pluralize(age.num_minutes() as u64, "minute", "minutes"));
    }
    if age < chrono::Duration::days(1) {
        return format!("{} ago", pluralize(age.num_hours() as u64, "hour", "hours"));
    }
    if age < chrono::Duration::weeks(1) {
        return format!("{} ago", pluralize(age.num_days() as u64, "day", "days"));
    }
    date.format("%b %-d, %Y").to_string()
}
