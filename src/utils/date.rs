// Date expression parsing and display formatting

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use anyhow::Result;

/// Parse a date expression and return a Unix timestamp (UTC).
/// Accepts absolute dates (2026-08-24, 2026-08-24T14:30) and the
/// relative keywords today / yesterday.
pub fn parse_date_expr(expr: &str) -> Result<i64> {
    if let Ok(date) = NaiveDate::parse_from_str(expr, "%Y-%m-%d") {
        let datetime = date.and_hms_opt(0, 0, 0)
            .ok_or_else(|| anyhow::anyhow!("Invalid date"))?;
        let local_dt = Local.from_local_datetime(&datetime)
            .single()
            .ok_or_else(|| anyhow::anyhow!("Ambiguous date"))?;
        return Ok(local_dt.timestamp());
    }

    if let Ok(datetime) = NaiveDateTime::parse_from_str(expr, "%Y-%m-%dT%H:%M") {
        let local_dt = Local.from_local_datetime(&datetime)
            .single()
            .ok_or_else(|| anyhow::anyhow!("Ambiguous datetime"))?;
        return Ok(local_dt.timestamp());
    }

    let now = Local::now();
    match expr {
        "today" => {
            let today = now.date_naive().and_hms_opt(0, 0, 0)
                .ok_or_else(|| anyhow::anyhow!("Invalid date"))?;
            let local_dt = Local.from_local_datetime(&today)
                .single()
                .ok_or_else(|| anyhow::anyhow!("Ambiguous date"))?;
            Ok(local_dt.timestamp())
        }
        "yesterday" => {
            let yesterday = (now.date_naive() - chrono::Duration::days(1))
                .and_hms_opt(0, 0, 0)
                .ok_or_else(|| anyhow::anyhow!("Invalid date"))?;
            let local_dt = Local.from_local_datetime(&yesterday)
                .single()
                .ok_or_else(|| anyhow::anyhow!("Ambiguous date"))?;
            Ok(local_dt.timestamp())
        }
        _ => anyhow::bail!("Unsupported date expression: {}", expr),
    }
}

/// Format a timestamp relative to now (e.g., "2h ago", "3d ago")
pub fn format_relative_time(ts: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let diff = now - ts;

    if diff < 60 {
        format!("{}s ago", diff.max(0))
    } else if diff < 3600 {
        format!("{}m ago", diff / 60)
    } else if diff < 86400 {
        format!("{}h ago", diff / 3600)
    } else {
        format!("{}d ago", diff / 86400)
    }
}

/// Format a timestamp as a local calendar date (board cards, list tables)
pub fn format_date(ts: i64) -> String {
    match Local.timestamp_opt(ts, 0).single() {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_absolute_date() {
        let ts = parse_date_expr("2026-08-24").unwrap();
        assert!(ts > 0);
        assert_eq!(format_date(ts), "2026-08-24");
    }

    #[test]
    fn test_parse_keywords() {
        let today = parse_date_expr("today").unwrap();
        let yesterday = parse_date_expr("yesterday").unwrap();
        assert_eq!(today - yesterday, 86400);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_date_expr("next tuesday-ish").is_err());
    }

    #[test]
    fn test_format_relative_time() {
        let now = chrono::Utc::now().timestamp();
        assert!(format_relative_time(now).ends_with("s ago"));
        assert_eq!(format_relative_time(now - 120), "2m ago");
        assert_eq!(format_relative_time(now - 7200), "2h ago");
        assert_eq!(format_relative_time(now - 172800), "2d ago");
    }
}
