use chrono::{DateTime, Utc};

/// Format a timestamp relative to `now` (e.g., "5m", "2h", "3d")
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - timestamp).num_seconds();

    match diff {
        i64::MIN..=59 => "just now".to_string(),
        60..=3599 => format!("{}m", diff / 60),
        3600..=86399 => format!("{}h", diff / 3600),
        86400..=604799 => format!("{}d", diff / 86400),
        // Older than a week shows the date
        _ => timestamp.format("%b %d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_relative_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        assert_eq!(format_relative_time(now - Duration::seconds(30), now), "just now");
        assert_eq!(format_relative_time(now + Duration::seconds(30), now), "just now");
        assert_eq!(format_relative_time(now - Duration::minutes(5), now), "5m");
        assert_eq!(format_relative_time(now - Duration::hours(2), now), "2h");
        assert_eq!(format_relative_time(now - Duration::days(3), now), "3d");
        assert_eq!(format_relative_time(now - Duration::days(30), now), "Feb 14");
    }
}
