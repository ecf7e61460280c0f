//! Derived cross-platform dashboard shapes.

use serde::{Deserialize, Serialize};

/// Day-of-week labels for the engagement trend series, in render order.
pub const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Cross-platform totals shown on the dashboard header cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedMetrics {
    pub total_impressions: u64,
    /// Percent, rounded to 2 decimal places.
    pub engagement_rate: f64,
    pub total_comments: u64,
    pub total_shares: u64,
    pub growth_rate: f64,
}

impl Default for UnifiedMetrics {
    fn default() -> Self {
        Self {
            total_impressions: 0,
            engagement_rate: 0.0,
            total_comments: 0,
            total_shares: 0,
            growth_rate: 12.5,
        }
    }
}

/// One day of the engagement trend chart. A platform's value is `None` when
/// it contributes nothing for that day (not connected / no snapshot).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<f64>,
}
