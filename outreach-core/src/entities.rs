//! Records served by the outreach backend.
//!
//! The client never derives invariants over these. Optional and collection
//! fields default when absent so that list endpoints returning trimmed rows
//! still decode.

use crate::enums::{AutomationStatus, IntentType, MessageStage, MessageStatus, MessageType};
use crate::{timestamp, EntityId, Identified, Timestamp};
use serde::{Deserialize, Serialize};

/// Implements [`Identified`] from the named id field.
macro_rules! impl_identified {
    ($type:ty, $field:ident) => {
        impl Identified for $type {
            fn id(&self) -> EntityId {
                self.$field
            }
        }
    };
}

// ============================================================================
// COMPANIES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: EntityId,
    pub name: String,
    pub industry: String,
    pub country: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub replies: Vec<ReplyRecord>,
    #[serde(default)]
    pub phones: Vec<CompanyPhone>,
}

impl Company {
    pub fn has_replies(&self) -> bool {
        !self.replies.is_empty()
    }

    pub fn display_email(&self) -> &str {
        display_or_dash(&self.email)
    }

    pub fn display_phone(&self) -> &str {
        self.phones
            .iter()
            .find(|p| p.is_primary)
            .map(|p| p.phone.as_str())
            .unwrap_or_else(|| display_or_dash(&self.phone))
    }

    pub fn display_website(&self) -> &str {
        display_or_dash(&self.website)
    }
}

/// Phone record, including WhatsApp verification state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyPhone {
    pub id: EntityId,
    pub phone: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
}

/// Reply tracked against a company, nested in company detail payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyRecord {
    pub id: EntityId,
    pub company_id: EntityId,
    #[serde(default)]
    pub campaign_id: Option<EntityId>,
    #[serde(default)]
    pub message_id: Option<EntityId>,
    pub from_email: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub reply_content: Option<String>,
    #[serde(with = "timestamp")]
    pub replied_at: Timestamp,
}

impl ReplyRecord {
    /// WhatsApp replies are stored with a `whatsapp:` sender prefix.
    pub fn is_whatsapp(&self) -> bool {
        self.from_email.starts_with("whatsapp:")
    }
}

/// Company that opened at least one tracked email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenedCompany {
    pub id: EntityId,
    pub name: String,
    pub industry: String,
    pub country: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    #[serde(default)]
    pub open_count: u64,
    #[serde(default, with = "timestamp::option")]
    pub first_opened_at: Option<Timestamp>,
    #[serde(default, with = "timestamp::option")]
    pub last_opened_at: Option<Timestamp>,
    #[serde(default)]
    pub has_reply: bool,
}

/// Company excluded from further sends, either because it replied or unsubscribed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoppedCompany {
    pub company_id: EntityId,
    pub company_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub reason: String,
    #[serde(default)]
    pub status: String,
}

// ============================================================================
// MESSAGING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(with = "timestamp")]
    pub occurred_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: EntityId,
    pub company_id: EntityId,
    #[serde(default)]
    pub campaign_id: Option<EntityId>,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub stage: MessageStage,
    pub content: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub scheduled_for: Option<Timestamp>,
    #[serde(default)]
    pub status: MessageStatus,
    #[serde(default, with = "timestamp::option")]
    pub sent_at: Option<Timestamp>,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    #[serde(default)]
    pub interactions: Vec<Interaction>,
    /// Joined by the list endpoint only.
    #[serde(default)]
    pub company_name: Option<String>,
}

impl Message {
    pub fn company_label(&self) -> String {
        self.company_name
            .clone()
            .unwrap_or_else(|| format!("Company #{}", self.company_id))
    }

    /// First line of the body, bounded to `max` characters.
    pub fn preview(&self, max: usize) -> String {
        let first = self.content.lines().next().unwrap_or_default();
        if first.chars().count() <= max {
            first.to_string()
        } else {
            let cut: String = first.chars().take(max.saturating_sub(3)).collect();
            format!("{}...", cut)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: EntityId,
    pub name: String,
    pub industry: String,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Campaign {
    pub fn count_with_status(&self, status: MessageStatus) -> usize {
        self.messages.iter().filter(|m| m.status == status).count()
    }

    pub fn sent_count(&self) -> usize {
        self.messages.iter().filter(|m| m.status.is_outbound()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub template_type: MessageType,
    #[serde(default)]
    pub subject: Option<String>,
    pub content: String,
    #[serde(default)]
    pub variables: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
}

// ============================================================================
// LEADS
// ============================================================================

/// Row of the replies inbox (`/api/replies`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyEntry {
    pub id: EntityId,
    pub company_id: EntityId,
    pub company_name: String,
    #[serde(default)]
    pub company_industry: Option<String>,
    #[serde(default)]
    pub company_country: Option<String>,
    pub source: String,
    #[serde(rename = "from")]
    pub sender: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub reply_content: Option<String>,
    #[serde(with = "timestamp")]
    pub replied_at: Timestamp,
    #[serde(default)]
    pub is_qualified_lead: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestReply {
    pub source: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(with = "timestamp")]
    pub replied_at: Timestamp,
}

/// Company that replied and did not unsubscribe (`/api/leads/qualified`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSummary {
    pub company_id: EntityId,
    pub company_name: String,
    pub industry: String,
    pub country: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub total_replies: u64,
    #[serde(default)]
    pub latest_reply: Option<LatestReply>,
    #[serde(default)]
    pub status: String,
}

/// Intent-classified lead scoped to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifiedLead {
    pub id: EntityId,
    pub company_id: EntityId,
    #[serde(default)]
    pub product_id: Option<EntityId>,
    #[serde(default)]
    pub campaign_id: Option<EntityId>,
    pub intent: IntentType,
    #[serde(default)]
    pub intent_confidence: f64,
    #[serde(default)]
    pub intent_reasons: Option<Vec<String>>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub notified_at: Option<Timestamp>,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    #[serde(default)]
    pub company: Option<Company>,
}

// ============================================================================
// PRODUCTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub long_description: Option<String>,
    #[serde(default)]
    pub industry_tags: Vec<String>,
    #[serde(default)]
    pub default_filters: Option<serde_json::Value>,
    #[serde(default)]
    pub brochure_url: Option<String>,
    #[serde(default)]
    pub asset_urls: Option<Vec<String>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub companies_count: u64,
    #[serde(default)]
    pub campaigns_count: u64,
    #[serde(default)]
    pub qualified_leads_count: u64,
    #[serde(default)]
    pub messages_sent: u64,
}

impl Product {
    pub fn tags_label(&self) -> String {
        if self.industry_tags.is_empty() {
            "-".to_string()
        } else {
            self.industry_tags.join(", ")
        }
    }
}

/// Company associated with a product, with its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCompany {
    pub id: EntityId,
    pub company_id: EntityId,
    pub product_id: EntityId,
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default)]
    pub score_reasons: Option<Vec<String>>,
    #[serde(with = "timestamp")]
    pub fetched_at: Timestamp,
    #[serde(default)]
    pub company: Option<Company>,
}

// ============================================================================
// AUTOMATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationConfig {
    pub id: EntityId,
    #[serde(default)]
    pub name: Option<String>,
    pub industry: String,
    pub country: String,
    #[serde(default = "default_daily_limit")]
    pub daily_limit: i64,
    #[serde(default)]
    pub is_active: bool,
    /// Kept verbatim so an unrecognised status still renders.
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_send_hour")]
    pub send_time_hour: i64,
    #[serde(default)]
    pub send_time_minute: i64,
    #[serde(default = "default_followup_1")]
    pub followup_day_1: i64,
    #[serde(default = "default_followup_2")]
    pub followup_day_2: i64,
    #[serde(default = "default_duration")]
    pub run_duration_days: i64,
    #[serde(default, with = "timestamp::option")]
    pub start_date: Option<Timestamp>,
    #[serde(default, with = "timestamp::option")]
    pub end_date: Option<Timestamp>,
    #[serde(default)]
    pub total_companies_fetched: i64,
    #[serde(default)]
    pub total_messages_sent: i64,
    #[serde(default)]
    pub total_replies: i64,
    #[serde(default)]
    pub days_completed: i64,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<Timestamp>,
    #[serde(default, with = "timestamp::option")]
    pub last_run_at: Option<Timestamp>,
}

impl AutomationConfig {
    /// Parsed status, `None` when the backend sent a value this client does not know.
    pub fn status(&self) -> Option<AutomationStatus> {
        self.status.parse().ok()
    }

    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => format!("{} / {}", self.industry, self.country),
        }
    }

    pub fn send_time_label(&self) -> String {
        format!("{:02}:{:02}", self.send_time_hour, self.send_time_minute)
    }

    /// Days run out of the configured duration, e.g. `3/7`.
    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.days_completed, self.run_duration_days)
    }
}

// ============================================================================
// SETTINGS
// ============================================================================

/// Key/value system setting. Secrets arrive masked by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSetting {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAccount {
    pub id: EntityId,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub daily_limit: i64,
    #[serde(default)]
    pub emails_sent_today: i64,
    #[serde(default, with = "timestamp::option")]
    pub last_used_at: Option<Timestamp>,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
}

impl_identified!(Company, id);
impl_identified!(OpenedCompany, id);
impl_identified!(StoppedCompany, company_id);
impl_identified!(Message, id);
impl_identified!(Campaign, id);
impl_identified!(Template, id);
impl_identified!(ReplyEntry, id);
impl_identified!(LeadSummary, company_id);
impl_identified!(QualifiedLead, id);
impl_identified!(Product, id);
impl_identified!(ProductCompany, id);
impl_identified!(AutomationConfig, id);
impl_identified!(EmailAccount, id);

fn display_or_dash(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => v,
        _ => "-",
    }
}

fn default_true() -> bool {
    true
}

fn default_daily_limit() -> i64 {
    30
}

fn default_status() -> String {
    AutomationStatus::Draft.as_str().to_string()
}

fn default_send_hour() -> i64 {
    10
}

fn default_followup_1() -> i64 {
    3
}

fn default_followup_2() -> i64 {
    7
}

fn default_duration() -> i64 {
    7
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_company_decodes_list_row_without_nested_collections() {
        let company: Company = serde_json::from_value(json!({
            "id": 7,
            "name": "Acme",
            "industry": "Technology",
            "country": "USA",
            "email": null,
            "created_at": "2024-05-01T10:00:00.000001"
        }))
        .unwrap();
        assert_eq!(company.id(), 7);
        assert!(company.messages.is_empty());
        assert!(!company.has_replies());
        assert_eq!(company.display_email(), "-");
    }

    #[test]
    fn test_primary_phone_wins_over_legacy_field() {
        let company: Company = serde_json::from_value(json!({
            "id": 1,
            "name": "Acme",
            "industry": "Technology",
            "country": "USA",
            "phone": "+1 000",
            "created_at": "2024-05-01T10:00:00",
            "phones": [
                {"id": 1, "phone": "+1 111", "is_primary": false, "is_verified": false, "created_at": "2024-05-01T10:00:00"},
                {"id": 2, "phone": "+1 222", "is_primary": true, "is_verified": true, "created_at": "2024-05-01T10:00:00"}
            ]
        }))
        .unwrap();
        assert_eq!(company.display_phone(), "+1 222");
    }

    #[test]
    fn test_message_list_row_carries_company_name() {
        let message: Message = serde_json::from_value(json!({
            "id": 3,
            "company_id": 9,
            "campaign_id": 2,
            "type": "WHATSAPP",
            "stage": "FOLLOWUP_1",
            "content": "Hello there\nsecond line",
            "status": "FAILED",
            "scheduled_for": "2024-05-02T10:00:00",
            "created_at": "2024-05-01T10:00:00",
            "company_name": "Acme"
        }))
        .unwrap();
        assert_eq!(message.message_type, MessageType::Whatsapp);
        assert_eq!(message.stage, MessageStage::Followup1);
        assert_eq!(message.company_label(), "Acme");
        assert_eq!(message.preview(40), "Hello there");
    }

    #[test]
    fn test_message_preview_truncates_long_lines() {
        let mut message: Message = serde_json::from_value(json!({
            "id": 3,
            "company_id": 9,
            "type": "EMAIL",
            "stage": "INITIAL",
            "content": "",
            "created_at": "2024-05-01T10:00:00"
        }))
        .unwrap();
        message.content = "abcdefghijklmnop".to_string();
        assert_eq!(message.preview(8), "abcde...");
        assert_eq!(message.company_label(), "Company #9");
    }

    #[test]
    fn test_automation_config_unknown_status_is_kept() {
        let config: AutomationConfig = serde_json::from_value(json!({
            "id": 1,
            "industry": "Retail",
            "country": "India",
            "status": "archived"
        }))
        .unwrap();
        assert_eq!(config.status, "archived");
        assert!(config.status().is_none());
        assert_eq!(config.display_name(), "Retail / India");
        assert_eq!(config.send_time_label(), "10:00");
    }

    #[test]
    fn test_automation_config_defaults_match_backend_columns() {
        let config: AutomationConfig = serde_json::from_value(json!({
            "id": 1,
            "industry": "Retail",
            "country": "India"
        }))
        .unwrap();
        assert_eq!(config.status(), Some(AutomationStatus::Draft));
        assert_eq!(config.daily_limit, 30);
        assert_eq!(config.followup_day_1, 3);
        assert_eq!(config.followup_day_2, 7);
        assert_eq!(config.run_duration_days, 7);
    }

    #[test]
    fn test_reply_entry_reads_from_field() {
        let entry: ReplyEntry = serde_json::from_value(json!({
            "id": 1,
            "company_id": 2,
            "company_name": "Acme",
            "source": "WhatsApp",
            "from": "whatsapp:+91999",
            "replied_at": "2024-05-01T10:00:00+05:30"
        }))
        .unwrap();
        assert_eq!(entry.sender, "whatsapp:+91999");
    }

    #[test]
    fn test_campaign_counts_outbound_messages() {
        let campaign: Campaign = serde_json::from_value(json!({
            "id": 1,
            "name": "Spring",
            "industry": "Retail",
            "created_at": "2024-05-01T10:00:00",
            "messages": [
                {"id": 1, "company_id": 1, "type": "EMAIL", "stage": "INITIAL", "content": "a", "status": "SENT", "created_at": "2024-05-01T10:00:00"},
                {"id": 2, "company_id": 1, "type": "EMAIL", "stage": "FOLLOWUP_1", "content": "b", "status": "DRAFT", "created_at": "2024-05-01T10:00:00"},
                {"id": 3, "company_id": 2, "type": "WHATSAPP", "stage": "INITIAL", "content": "c", "status": "READ", "created_at": "2024-05-01T10:00:00"}
            ]
        }))
        .unwrap();
        assert_eq!(campaign.sent_count(), 2);
        assert_eq!(campaign.count_with_status(MessageStatus::Draft), 1);
    }
}
