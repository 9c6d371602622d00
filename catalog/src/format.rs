//! Display helpers for counts, publish times, and video durations.

use jiff::{Span, Timestamp};

/// Renders a counter compactly: `950`, `1.2K`, `3.4M`, `1.1B`.
pub fn count(n: u64) -> String {
    const UNITS: [(u64, &str); 3] = [
        (1_000, "K"),
        (1_000_000, "M"),
        (1_000_000_000, "B"),
    ];
    if n < 1_000 {
        return n.to_string();
    }
    let render = |(scale, suffix): (u64, &'static str)| (format!("{:.1}", n as f64 / scale as f64), suffix);
    // take the smallest unit that still rounds below 1000, so 999_999 is 1M and not 1000K
    let (rendered, unit) = UNITS
        .into_iter()
        .map(render)
        .find(|(rendered, _)| rendered.parse::<f64>().is_ok_and(|scaled| scaled < 1_000.0))
        .unwrap_or_else(|| render(UNITS[UNITS.len() - 1]));
    let rendered = rendered.strip_suffix(".0").unwrap_or(&rendered);
    format!("{rendered}{unit}")
}

/// Like [`count`], but `-` for counters the API didn't report.
pub fn optional_count(n: Option<u64>) -> String {
    n.map(count).unwrap_or_else(|| "-".to_string())
}

/// How long ago `published` was, relative to `now`: `"3 days ago"`.
pub fn published(published: Timestamp, now: Timestamp) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;
    const MONTH: i64 = 30 * DAY;
    const YEAR: i64 = 365 * DAY;

    let secs = now.duration_since(published).as_secs();
    if secs < MINUTE {
        return "just now".to_string();
    }
    let (n, unit) = match secs {
        s if s < HOUR => (s / MINUTE, "minute"),
        s if s < DAY => (s / HOUR, "hour"),
        s if s < MONTH => (s / DAY, "day"),
        s if s < YEAR => (s / MONTH, "month"),
        s => (s / YEAR, "year"),
    };
    let plural = if n == 1 { "" } else { "s" };
    format!("{n} {unit}{plural} ago")
}

/// Parses an ISO 8601 video duration (`PT1H2M3S`) into whole seconds.
pub fn duration_secs(raw: &str) -> Option<i64> {
    let span: Span = raw.trim().parse().ok()?;
    if span.get_years() != 0 || span.get_months() != 0 || span.get_weeks() != 0 {
        return None;
    }
    Some(
        i64::from(span.get_days()) * 86_400
            + i64::from(span.get_hours()) * 3_600
            + span.get_minutes() * 60
            + span.get_seconds(),
    )
}

/// Renders an ISO 8601 duration as a clock: `PT4M13S` → `4:13`, `PT1H2M3S` → `1:02:03`.
pub fn duration(raw: &str) -> Option<String> {
    let secs = duration_secs(raw)?;
    let (h, m, s) = (secs / 3_600, (secs % 3_600) / 60, secs % 60);
    Some(if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    })
}
