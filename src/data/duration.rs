use chrono::TimeDelta;

use anyhow::{bail, Result};

/// Suffix to seconds multiplier
const UNITS: &[(&str, i64)] = &[("d", 86_400), ("h", 3_600), ("m", 60), ("s", 1)];

/// Parse span strings like "7d", "36h", "90m", "45s"
pub fn parse_span(s: &str) -> Result<TimeDelta> {
    let s = s.trim();

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: i64 = val_str.trim().parse()?;
            let Some(span) = val.checked_mul(*multiplier).and_then(TimeDelta::try_seconds) else {
                bail!("Span out of range: {}", s);
            };
            return Ok(span);
        }
    }

    bail!("Unknown span format: {}", s)
}

/// Format a span as "Xd Yh Zm", dropping seconds. Negative spans show as zero.
pub fn format_span(d: TimeDelta) -> String {
    let total = d.num_seconds().max(0);
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    format!("{}d {}h {}m", days, hours, minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_days() {
        assert_eq!(parse_span("7d").unwrap(), TimeDelta::days(7));
    }

    #[test]
    fn test_parse_hours_and_minutes() {
        assert_eq!(parse_span("36h").unwrap(), TimeDelta::hours(36));
        assert_eq!(parse_span(" 90m ").unwrap(), TimeDelta::minutes(90));
    }

    #[test]
    fn test_parse_rejects_unknown_suffix() {
        assert!(parse_span("3w").is_err());
        assert!(parse_span("d").is_err());
    }

    #[test]
    fn test_format_span() {
        let d = TimeDelta::days(2) + TimeDelta::hours(5) + TimeDelta::minutes(7) + TimeDelta::seconds(59);
        assert_eq!(format_span(d), "2d 5h 7m");
        assert_eq!(format_span(TimeDelta::zero()), "0d 0h 0m");
        assert_eq!(format_span(TimeDelta::minutes(-5)), "0d 0h 0m");
    }
}
