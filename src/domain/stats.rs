//! Admin dashboard statistics.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminStats {
    pub businesses: u64,
    pub invoices: u64,
    pub pending_templates: u64,
    pub missing_templates: u64,
    pub users: u64,
    pub charts: StatsCharts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsCharts {
    /// Invoices generated per day
    pub invoice_timeline: Vec<TimelinePoint>,
    /// Businesses per template status
    pub template_distribution: Vec<DistributionSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TimelinePoint {
    #[schema(example = "2024-03-01")]
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DistributionSlice {
    #[schema(example = "ACTIVE")]
    pub label: String,
    pub value: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_stats_default_missing_fields() {
        let stats: AdminStats = serde_json::from_str(r#"{"businesses": 3, "pendingTemplates": 1}"#).unwrap();
        assert_eq!(stats.businesses, 3);
        assert_eq!(stats.pending_templates, 1);
        assert_eq!(stats.invoices, 0);
        assert!(stats.charts.invoice_timeline.is_empty());
    }

    #[test]
    fn test_chart_series() {
        let stats: AdminStats = serde_json::from_value(serde_json::json!({
            "charts": {
                "invoiceTimeline": [{"date": "2024-03-01", "count": 4}],
                "templateDistribution": [{"label": "PENDING", "value": 2}]
            }
        }))
        .unwrap();
        assert_eq!(stats.charts.invoice_timeline[0].count, 4);
        assert_eq!(stats.charts.template_distribution[0].label, "PENDING");
    }
}
