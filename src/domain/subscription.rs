//! Subscription plans and business subscriptions (admin only).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::business::Business;
use crate::config::PRICING_PLAN_ORDER;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlan {
    #[schema(example = 1)]
    pub subscription_plan_id: i64,
    #[schema(example = "Annual")]
    pub subscription_plan_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_months: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[schema(example = 12)]
    pub subscription_id: i64,
    pub business_id: i64,
    pub subscription_plan_id: i64,
    pub subscription_start_date: DateTime<Utc>,
    pub subscription_end_date: DateTime<Utc>,
    #[serde(default)]
    pub subscription_status: bool,
    #[serde(default)]
    pub auto_renew: bool,
}

/// Create or update payload for a subscription
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_period", skip_on_field_errors = false))]
pub struct SubscriptionForm {
    #[validate(range(min = 1, message = "Business is required"))]
    pub business_id: i64,
    #[validate(range(min = 1, message = "Plan is required"))]
    pub subscription_plan_id: i64,
    pub subscription_start_date: DateTime<Utc>,
    pub subscription_end_date: DateTime<Utc>,
    #[serde(default = "enabled")]
    pub subscription_status: bool,
    #[serde(default = "enabled")]
    pub auto_renew: bool,
}

fn enabled() -> bool {
    true
}

fn validate_period(form: &SubscriptionForm) -> Result<(), ValidationError> {
    if form.subscription_end_date < form.subscription_start_date {
        let mut error = ValidationError::new("period");
        error.message = Some("End date must not be before start date".into());
        return Err(error);
    }
    Ok(())
}

impl SubscriptionPlan {
    /// Order plans for the pricing page: known tiers first, the rest after,
    /// keeping backend order within a rank.
    pub fn sort_for_pricing(mut plans: Vec<SubscriptionPlan>) -> Vec<SubscriptionPlan> {
        plans.sort_by_key(|plan| plan.pricing_rank());
        plans
    }

    fn pricing_rank(&self) -> usize {
        let name = self.subscription_plan_name.to_lowercase();
        PRICING_PLAN_ORDER
            .iter()
            .position(|tier| name.contains(tier))
            .unwrap_or(PRICING_PLAN_ORDER.len())
    }
}

/// Subscription with the names the admin grid displays.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRow {
    #[serde(flatten)]
    pub subscription: Subscription,
    pub business_name: String,
    pub plan_name: String,
}

impl SubscriptionRow {
    /// Attach business and plan names, falling back to `ID: <n>`.
    pub fn enrich(
        subscriptions: Vec<Subscription>,
        businesses: &[Business],
        plans: &[SubscriptionPlan],
    ) -> Vec<Self> {
        subscriptions
            .into_iter()
            .map(|subscription| {
                let business_name = businesses
                    .iter()
                    .find(|b| b.business_id == subscription.business_id)
                    .map(|b| b.business_name.clone())
                    .unwrap_or_else(|| format!("ID: {}", subscription.business_id));
                let plan_name = plans
                    .iter()
                    .find(|p| p.subscription_plan_id == subscription.subscription_plan_id)
                    .map(|p| p.subscription_plan_name.clone())
                    .unwrap_or_else(|| format!("ID: {}", subscription.subscription_plan_id));

                Self {
                    subscription,
                    business_name,
                    plan_name,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::business::tests::business;
    use crate::domain::TemplateStatus;

    fn subscription(id: i64, business_id: i64, plan_id: i64) -> Subscription {
        Subscription {
            subscription_id: id,
            business_id,
            subscription_plan_id: plan_id,
            subscription_start_date: "2024-01-01T00:00:00Z".parse().unwrap(),
            subscription_end_date: "2025-01-01T00:00:00Z".parse().unwrap(),
            subscription_status: true,
            auto_renew: false,
        }
    }

    fn plan(id: i64, name: &str) -> SubscriptionPlan {
        SubscriptionPlan {
            subscription_plan_id: id,
            subscription_plan_name: name.to_string(),
            price: None,
            duration_months: None,
        }
    }

    #[test]
    fn test_pricing_order() {
        let plans = vec![
            plan(1, "Premium Yearly"),
            plan(2, "Enterprise"),
            plan(3, "Basic"),
            plan(4, "Free Trial"),
            plan(5, "Standard"),
        ];
        let ids: Vec<i64> = SubscriptionPlan::sort_for_pricing(plans)
            .iter()
            .map(|p| p.subscription_plan_id)
            .collect();
        assert_eq!(ids, vec![4, 3, 5, 1, 2]);
    }

    #[test]
    fn test_enrich_names() {
        let businesses = vec![business(5, "Corner Bakery", TemplateStatus::Active)];
        let plans = vec![SubscriptionPlan {
            subscription_plan_id: 2,
            subscription_plan_name: "Annual".to_string(),
            price: Some(99.0),
            duration_months: Some(12),
        }];

        let rows = SubscriptionRow::enrich(
            vec![subscription(1, 5, 2), subscription(2, 8, 3)],
            &businesses,
            &plans,
        );

        assert_eq!(rows[0].business_name, "Corner Bakery");
        assert_eq!(rows[0].plan_name, "Annual");
        assert_eq!(rows[1].business_name, "ID: 8");
        assert_eq!(rows[1].plan_name, "ID: 3");
    }

    #[test]
    fn test_row_serializes_flat() {
        let rows = SubscriptionRow::enrich(vec![subscription(1, 5, 2)], &[], &[]);
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["subscriptionId"], 1);
        assert_eq!(json["businessName"], "ID: 5");
    }

    #[test]
    fn test_form_defaults_and_period() {
        let form: SubscriptionForm = serde_json::from_value(serde_json::json!({
            "businessId": 5,
            "subscriptionPlanId": 2,
            "subscriptionStartDate": "2024-01-01T00:00:00Z",
            "subscriptionEndDate": "2025-01-01T00:00:00Z"
        }))
        .unwrap();
        assert!(form.subscription_status);
        assert!(form.auto_renew);
        assert!(form.validate().is_ok());

        let reversed = SubscriptionForm {
            subscription_start_date: form.subscription_end_date,
            subscription_end_date: form.subscription_start_date,
            ..form
        };
        assert!(reversed.validate().is_err());
    }
}
