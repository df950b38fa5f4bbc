//! Dashboard statistics, chart series and the grouped settings payload.

use crate::requests::{GeneralSettingsUpdate, NotificationSettingsUpdate};
use crate::EntityId;
use serde::{Deserialize, Deserializer, Serialize};

/// `GET /api/automation/stats`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationStats {
    #[serde(default)]
    pub total_companies: u64,
    #[serde(default)]
    pub total_campaigns: u64,
    #[serde(default)]
    pub messages_sent: u64,
    #[serde(default)]
    pub messages_scheduled: u64,
    #[serde(default)]
    pub email_opens: u64,
    #[serde(default)]
    pub total_qualified_leads: u64,
    #[serde(default)]
    pub total_replies: u64,
    #[serde(default)]
    pub replies_last_7_days: u64,
    #[serde(default)]
    pub total_unsubscribed: u64,
    #[serde(default)]
    pub unsubscribed_last_7_days: u64,
}

/// One day of the seven-day activity chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Short weekday label.
    pub name: String,
    pub date: String,
    #[serde(default)]
    pub sent: u64,
    #[serde(default)]
    pub replies: u64,
}

// ============================================================================
// DETAILED ANALYTICS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySummary {
    #[serde(default)]
    pub total_sent: u64,
    #[serde(default)]
    pub email_sent: u64,
    #[serde(default)]
    pub whatsapp_sent: u64,
    #[serde(default)]
    pub email_opens: u64,
    #[serde(default)]
    pub unique_opens: u64,
    #[serde(default)]
    pub total_replies: u64,
    #[serde(default)]
    pub email_replies: u64,
    #[serde(default)]
    pub whatsapp_replies: u64,
}

/// Percentages, already rounded to two places by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateSummary {
    #[serde(default)]
    pub email_open_rate: f64,
    #[serde(default)]
    pub email_reply_rate: f64,
    #[serde(default)]
    pub whatsapp_reply_rate: f64,
    #[serde(default)]
    pub overall_reply_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub date: String,
    pub name: String,
    #[serde(default)]
    pub email_sent: u64,
    #[serde(default)]
    pub whatsapp_sent: u64,
    #[serde(default)]
    pub opens: u64,
    #[serde(default)]
    pub replies: u64,
}

impl DailyActivity {
    pub fn total_sent(&self) -> u64 {
        self.email_sent + self.whatsapp_sent
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryBreakdown {
    pub industry: String,
    #[serde(default)]
    pub replies: u64,
    #[serde(default)]
    pub companies: u64,
}

/// `GET /api/analytics/detailed?days=N`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailedAnalytics {
    #[serde(default)]
    pub period_days: u32,
    #[serde(default)]
    pub summary: ActivitySummary,
    #[serde(default)]
    pub rates: RateSummary,
    #[serde(default)]
    pub daily_data: Vec<DailyActivity>,
    #[serde(default)]
    pub industry_breakdown: Vec<IndustryBreakdown>,
}

impl DetailedAnalytics {
    pub fn open_rate_label(&self) -> String {
        percent_label(self.rates.email_open_rate)
    }

    pub fn reply_rate_label(&self) -> String {
        percent_label(self.rates.overall_reply_rate)
    }

    /// Industries ordered by replies, most first.
    pub fn top_industries(&self, limit: usize) -> Vec<&IndustryBreakdown> {
        let mut rows: Vec<_> = self.industry_breakdown.iter().collect();
        rows.sort_by(|a, b| b.replies.cmp(&a.replies).then_with(|| a.industry.cmp(&b.industry)));
        rows.truncate(limit);
        rows
    }
}

pub fn percent_label(value: f64) -> String {
    format!("{:.1}%", value)
}

// ============================================================================
// PRODUCTS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFunnel {
    #[serde(default)]
    pub fetched: u64,
    #[serde(default)]
    pub contacted: u64,
    #[serde(default)]
    pub opened: u64,
    #[serde(default)]
    pub replied: u64,
    #[serde(default)]
    pub qualified: u64,
}

impl ProductFunnel {
    /// Stages in funnel order with their labels.
    pub fn stages(&self) -> [(&'static str, u64); 5] {
        [
            ("Fetched", self.fetched),
            ("Contacted", self.contacted),
            ("Opened", self.opened),
            ("Replied", self.replied),
            ("Qualified", self.qualified),
        ]
    }
}

/// `GET /api/products/{id}/analytics`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAnalytics {
    pub product_id: EntityId,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub companies_fetched: u64,
    #[serde(default)]
    pub messages_sent: u64,
    #[serde(default)]
    pub emails_opened: u64,
    #[serde(default)]
    pub replies_received: u64,
    #[serde(default)]
    pub hot_leads: u64,
    #[serde(default)]
    pub warm_leads: u64,
    #[serde(default)]
    pub cold_leads: u64,
    #[serde(default)]
    pub unsubscribes: u64,
    #[serde(default)]
    pub brochure_downloads: u64,
    #[serde(default)]
    pub conversion_rate: f64,
    #[serde(default)]
    pub funnel: ProductFunnel,
}

// ============================================================================
// SETTINGS
// ============================================================================

/// Email group of `GET /api/settings`. Values are stored as text server-side,
/// so the port can arrive as either a string or a number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSettings {
    #[serde(default)]
    pub smtp_server: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub smtp_port: String,
    #[serde(default)]
    pub smtp_username: String,
    /// Masked by the backend.
    #[serde(default)]
    pub smtp_password: String,
    #[serde(default)]
    pub from_email: String,
    #[serde(default)]
    pub from_name: String,
}

/// `GET /api/settings`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsBundle {
    #[serde(default)]
    pub general: GeneralSettingsUpdate,
    #[serde(default)]
    pub email: EmailSettings,
    #[serde(default)]
    pub notifications: NotificationSettingsUpdate,
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Null => Ok(String::new()),
        other => Ok(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stats_tolerate_extra_and_missing_keys() {
        let stats: AutomationStats = serde_json::from_value(json!({
            "total_companies": 12,
            "messages_sent": 40,
            "last_7_days": 3,
            "unsubscribed_last_30_days": 1
        }))
        .unwrap();
        assert_eq!(stats.total_companies, 12);
        assert_eq!(stats.total_qualified_leads, 0);
    }

    #[test]
    fn test_detailed_analytics_labels() {
        let analytics: DetailedAnalytics = serde_json::from_value(json!({
            "period_days": 30,
            "summary": {"total_sent": 100, "email_sent": 80, "whatsapp_sent": 20},
            "rates": {"email_open_rate": 42.5, "overall_reply_rate": 7.24},
            "daily_data": [],
            "industry_breakdown": [
                {"industry": "Retail", "replies": 2, "companies": 10},
                {"industry": "Finance", "replies": 5, "companies": 3},
                {"industry": "Energy", "replies": 5, "companies": 1}
            ]
        }))
        .unwrap();
        assert_eq!(analytics.open_rate_label(), "42.5%");
        assert_eq!(analytics.reply_rate_label(), "7.2%");
        let top: Vec<_> = analytics
            .top_industries(2)
            .iter()
            .map(|r| r.industry.as_str())
            .collect();
        assert_eq!(top, vec!["Energy", "Finance"]);
    }

    #[test]
    fn test_settings_bundle_accepts_text_port() {
        let bundle: SettingsBundle = serde_json::from_value(json!({
            "general": {"company_name": "Acme", "timezone": "UTC"},
            "email": {"smtp_server": "smtp.acme.io", "smtp_port": "587"},
            "notifications": {"daily_reports": false}
        }))
        .unwrap();
        assert_eq!(bundle.email.smtp_port, "587");
        assert_eq!(bundle.general.company_name.as_deref(), Some("Acme"));
        assert_eq!(bundle.notifications.daily_reports, Some(false));

        let numeric: EmailSettings = serde_json::from_value(json!({"smtp_port": 465})).unwrap();
        assert_eq!(numeric.smtp_port, "465");
    }

    #[test]
    fn test_funnel_stage_order() {
        let funnel = ProductFunnel {
            fetched: 10,
            contacted: 8,
            opened: 4,
            replied: 2,
            qualified: 1,
        };
        let labels: Vec<_> = funnel.stages().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["Fetched", "Contacted", "Opened", "Replied", "Qualified"]);
    }
}
