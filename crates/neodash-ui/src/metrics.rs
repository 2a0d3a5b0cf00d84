//! Dashboard overview figures and their demo source.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use neodash_hooks::format::{NumberFormat, format_currency, format_number, format_percentage, format_relative_time};
use serde::{Deserialize, Serialize};

/// Headline numbers on the dashboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    /// Open leads.
    pub active_leads: u32,
    /// Leads converted to sales, as a percentage.
    pub conversion_rate: f64,
    /// Revenue this month in `currency`.
    pub monthly_revenue: f64,
    /// ISO 4217 code of `monthly_revenue`.
    pub currency: String,
    /// Unread customer messages.
    pub unread_messages: u32,
    /// When the figures were computed.
    pub updated_at: DateTime<Utc>,
}

/// One rendered figure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricTile {
    /// Caption.
    pub label: &'static str,
    /// Formatted value.
    pub value: String,
}

impl DashboardMetrics {
    /// Tiles in display order.
    #[must_use]
    pub fn tiles(&self) -> Vec<MetricTile> {
        vec![
            MetricTile {
                label: "Active leads",
                value: format_number(f64::from(self.active_leads), &NumberFormat::default()),
            },
            MetricTile {
                label: "Conversion rate",
                value: format_percentage(self.conversion_rate),
            },
            MetricTile {
                label: "Monthly revenue",
                value: format_currency(self.monthly_revenue, &self.currency),
            },
            MetricTile {
                label: "Unread messages",
                value: format_number(f64::from(self.unread_messages), &NumberFormat::default()),
            },
        ]
    }

    /// "Updated ..." caption relative to `now`.
    #[must_use]
    pub fn freshness(&self, now: DateTime<Utc>) -> String {
        format!("Updated {}", format_relative_time(self.updated_at, now))
    }
}

/// Failure of the metrics source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MetricsError {
    /// The source did not answer.
    Unavailable {
        /// Attempt that failed.
        attempt: u32,
    },
}

impl fmt::Display for MetricsError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { attempt } => {
                write!(formatter, "metrics service unavailable (attempt {attempt})")
            }
        }
    }
}

impl std::error::Error for MetricsError {}

/// Deterministic stand-in for the metrics API.
///
/// Every third attempt fails so the error state can be exercised.
///
/// # Errors
///
/// Returns [`MetricsError::Unavailable`] when `attempt % 3 == 2`.
pub fn demo_metrics(attempt: u32, now: DateTime<Utc>) -> Result<DashboardMetrics, MetricsError> {
    if attempt % 3 == 2 {
        return Err(MetricsError::Unavailable { attempt });
    }
    let bump = attempt.saturating_mul(7);
    Ok(DashboardMetrics {
        active_leads: 1_284_u32.saturating_add(bump),
        conversion_rate: 12.4 + f64::from(attempt) * 0.3,
        monthly_revenue: 482_950.5 + f64::from(bump) * 1_000.0,
        currency: "USD".to_string(),
        unread_messages: 23_u32.saturating_add(attempt),
        updated_at: now - Duration::seconds(20),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0)
            .single()
            .unwrap_or_default()
    }

    #[test]
    fn first_attempt_renders_formatted_tiles() -> anyhow::Result<()> {
        let metrics = demo_metrics(0, now())?;
        let tiles = metrics.tiles();
        let values: Vec<&str> = tiles.iter().map(|tile| tile.value.as_str()).collect();
        assert_eq!(values, vec!["1,284", "12.4%", "$482,950.50", "23"]);
        assert_eq!(metrics.freshness(now()), "Updated less than a minute ago");
        Ok(())
    }

    #[test]
    fn every_third_attempt_fails() {
        assert!(demo_metrics(1, now()).is_ok());
        let err = demo_metrics(2, now()).err();
        assert_eq!(err, Some(MetricsError::Unavailable { attempt: 2 }));
        assert_eq!(
            err.map(|err| err.to_string()).as_deref(),
            Some("metrics service unavailable (attempt 2)")
        );
        assert!(demo_metrics(5, now()).is_err());
    }
}
