use chrono::{DateTime, Utc};

/// Relative age label shown next to an entry, e.g. "5 minutes ago".
pub fn format_time_ago(created_at_ms: i64, now_ms: i64) -> String {
    let (Some(created), Some(now)) = (
        DateTime::<Utc>::from_timestamp_millis(created_at_ms),
        DateTime::<Utc>::from_timestamp_millis(now_ms),
    ) else {
        return String::new();
    };
    let elapsed = now.signed_duration_since(created);

    if elapsed.num_minutes() < 1 {
        "just now".to_string()
    } else if elapsed.num_hours() < 1 {
        plural(elapsed.num_minutes(), "minute")
    } else if elapsed.num_days() < 1 {
        plural(elapsed.num_hours(), "hour")
    } else {
        plural(elapsed.num_days(), "day")
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}
