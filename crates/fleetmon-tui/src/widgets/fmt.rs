//! Cell formatting for list renderers.
//!
//! Every missing optional renders as its literal placeholder token —
//! `Unassigned`, `Unknown`, `Never`, or `-` — never as an empty cell.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Placeholder for missing report fields.
pub const DASH: &str = "-";

/// Optional string cell with the `-` placeholder.
pub fn dash_cell(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_owned(),
        _ => DASH.into(),
    }
}

/// Customer cell: the assigned name or `Unassigned`.
pub fn customer_cell(customer: Option<&str>) -> String {
    match customer {
        Some(c) if !c.trim().is_empty() => c.to_owned(),
        _ => "Unassigned".into(),
    }
}

/// Battery cell: `85%` or `Unknown`.
pub fn battery_cell(pct: Option<u8>) -> String {
    pct.map_or_else(|| "Unknown".into(), |p| format!("{p}%"))
}

/// Last-seen cell: a rounded age (`5m ago`) or `Never`.
pub fn last_seen_cell(ts: Option<DateTime<Utc>>) -> String {
    ts.map_or_else(|| "Never".into(), |t| age_str(t, Utc::now()))
}

/// Age relative to `now`, rounded to the largest sensible unit.
fn age_str(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - ts).num_seconds();
    if secs < 60 {
        return "just now".into();
    }
    #[allow(clippy::cast_sign_loss)]
    let rounded = if secs < 3_600 {
        secs - secs % 60
    } else if secs < 86_400 {
        secs - secs % 3_600
    } else {
        secs - secs % 86_400
    } as u64;
    format!("{} ago", humantime::format_duration(Duration::from_secs(rounded)))
}

/// Truncate long payloads for table cells.
pub fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_owned();
    }
    let mut out: String = value.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::TimeZone;

    use super::*;

    #[test]
    fn placeholders_for_missing_values() {
        assert_eq!(dash_cell(None), "-");
        assert_eq!(dash_cell(Some("")), "-");
        assert_eq!(customer_cell(None), "Unassigned");
        assert_eq!(customer_cell(Some(" ")), "Unassigned");
        assert_eq!(customer_cell(Some("DHL")), "DHL");
        assert_eq!(battery_cell(None), "Unknown");
        assert_eq!(battery_cell(Some(85)), "85%");
        assert_eq!(last_seen_cell(None), "Never");
    }

    #[test]
    fn ages_round_to_largest_unit() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let at = |secs: i64| now - chrono::Duration::seconds(secs);

        assert_eq!(age_str(at(5), now), "just now");
        assert_eq!(age_str(at(330), now), "5m ago");
        assert_eq!(age_str(at(7_500), now), "2h ago");
        assert_eq!(age_str(at(200_000), now), "2days ago");
    }

    #[test]
    fn truncate_marks_clipped_payloads() {
        assert_eq!(truncate("7E0110", 10), "7E0110");
        assert_eq!(truncate("7E0110AABBCCDD", 8), "7E0110A…");
    }
}
