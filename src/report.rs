//! Rendering of availability statistics.

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::collector::LookbackWindow;
use crate::data::duration::format_span;
use crate::data::EntityStats;

/// A finished analysis, ready to print.
#[derive(Debug, Clone)]
pub struct Report {
    /// Where the alerts were read from (channel id or source description).
    pub source: String,
    pub window: LookbackWindow,
    pub generated_at: DateTime<Utc>,
    /// Entities, best uptime first.
    pub entities: Vec<EntityStats>,
}

impl Report {
    pub fn new(
        source: impl Into<String>,
        window: LookbackWindow,
        generated_at: DateTime<Utc>,
        entities: Vec<EntityStats>,
    ) -> Self {
        Self {
            source: source.into(),
            window,
            generated_at,
            entities,
        }
    }

    /// Human-readable rendition.
    pub fn render_text(&self) -> String {
        self.to_string()
    }

    /// Machine-readable rendition. Durations are whole seconds.
    pub fn to_json(&self) -> Value {
        let entities: Vec<Value> = self
            .entities
            .iter()
            .map(|s| {
                json!({
                    "entity": s.entity(),
                    "uptime_percentage": s.uptime_percentage,
                    "tier": format!("{:?}", s.tier()),
                    "total_ups": s.total_ups,
                    "total_downs": s.total_downs,
                    "time_up_secs": s.time_up.num_seconds(),
                    "time_down_secs": s.time_down.num_seconds(),
                    "current_status": status_label(s.current_status),
                })
            })
            .collect();

        json!({
            "source": self.source,
            "window": self.window.label(),
            "window_secs": self.window.span().num_seconds(),
            "generated_at": self.generated_at.to_rfc3339(),
            "total_services": self.entities.len(),
            "entities": entities,
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let window = self.window.label();

        writeln!(f, "📊 Gatus Uptime Metrics")?;
        writeln!(f, "Analysis for the last {} in {}", window, self.source)?;
        writeln!(f, "Generated at {}", self.generated_at.to_rfc3339())?;
        writeln!(f)?;
        writeln!(f, "📈 Overview")?;
        writeln!(f, "  Total Services: {}", self.entities.len())?;
        writeln!(f, "  Analysis Period: {}", window)?;

        if self.entities.is_empty() {
            writeln!(f)?;
            writeln!(f, "ℹ️ No Data")?;
            return writeln!(f, "  No Gatus alerts found in the specified time period.");
        }

        for stats in &self.entities {
            writeln!(f)?;
            writeln!(f, "{} {}", stats.tier().symbol(), stats.entity())?;
            writeln!(f, "  Uptime: {:.5}%", stats.uptime_percentage)?;
            writeln!(f, "  Total Ups: {}", stats.total_ups)?;
            writeln!(f, "  Total Downs: {}", stats.total_downs)?;
            writeln!(f, "  Time Up: {}", format_span(stats.time_up))?;
            writeln!(f, "  Time Down: {}", format_span(stats.time_down))?;
            writeln!(f, "  Current Status: {}", status_label(stats.current_status))?;
        }

        Ok(())
    }
}

fn status_label(up: bool) -> &'static str {
    if up {
        "Up"
    } else {
        "Down"
    }
}
