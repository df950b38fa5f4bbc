//! Request payloads and query parameters.
//!
//! Payloads validate the bounds the backend enforces so that an invalid form
//! is rejected before a request is made.

use crate::entities::Company;
use crate::enums::{IntentType, MessageStatus, MessageType};
use crate::error::{ValidationError, ValidationResult};
use crate::pagination::PageRequest;
use crate::EntityId;
use serde::{Deserialize, Serialize};

/// Trim and turn blank text into `None`.
fn blank_to_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ============================================================================
// COMPANIES
// ============================================================================

/// `POST /api/fetch-companies`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchCompaniesRequest {
    pub industry: String,
    pub country: String,
    pub count: i64,
}

impl FetchCompaniesRequest {
    pub const MAX_COUNT: i64 = 30;

    pub fn new(industry: impl Into<String>, country: impl Into<String>, count: i64) -> Self {
        Self {
            industry: industry.into(),
            country: country.into(),
            count,
        }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        ValidationError::check_required("industry", &self.industry)?;
        ValidationError::check_required("country", &self.country)?;
        ValidationError::check_range("count", self.count, 1, Self::MAX_COUNT)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FetchCompaniesResponse {
    pub message: String,
    pub companies_fetched: u64,
    #[serde(default)]
    pub companies: Vec<Company>,
}

/// Edit form for a company, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyForm {
    pub name: String,
    pub industry: String,
    pub country: String,
    pub email: String,
    pub phone: String,
    pub website: String,
}

impl CompanyForm {
    pub fn from_company(company: &Company) -> Self {
        Self {
            name: company.name.clone(),
            industry: company.industry.clone(),
            country: company.country.clone(),
            email: company.email.clone().unwrap_or_default(),
            phone: company.phone.clone().unwrap_or_default(),
            website: company.website.clone().unwrap_or_default(),
        }
    }
}

/// Partial `PUT /api/companies/{id}` body. Absent fields are sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

impl CompanyUpdate {
    pub fn from_form(form: &CompanyForm) -> Self {
        Self {
            name: blank_to_none(&form.name),
            industry: blank_to_none(&form.industry),
            country: blank_to_none(&form.country),
            email: blank_to_none(&form.email),
            phone: blank_to_none(&form.phone),
            website: blank_to_none(&form.website),
        }
    }
}

/// Body of every batch endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchIds {
    pub ids: Vec<EntityId>,
}

impl BatchIds {
    pub fn new(ids: Vec<EntityId>) -> ValidationResult<Self> {
        if ids.is_empty() {
            return Err(ValidationError::RequiredFieldMissing { field: "ids" });
        }
        Ok(Self { ids })
    }
}

/// Plain `{"message": ...}` acknowledgement returned by mutations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub message: String,
}

// ============================================================================
// CAMPAIGNS AND MESSAGES
// ============================================================================

/// `POST /api/campaigns/generate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateCampaignRequest {
    pub industry: String,
    pub campaign_name: String,
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_template_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_template_id: Option<EntityId>,
    pub campaign_type: String,
    /// `YYYY-MM-DD`, restricts targets to companies fetched that day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_on: Option<String>,
}

impl GenerateCampaignRequest {
    pub fn new(industry: impl Into<String>, campaign_name: impl Into<String>) -> Self {
        Self {
            industry: industry.into(),
            campaign_name: campaign_name.into(),
            limit: 10,
            email_template_id: None,
            whatsapp_template_id: None,
            campaign_type: "SALES".to_string(),
            fetched_on: None,
        }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        ValidationError::check_required("industry", &self.industry)?;
        ValidationError::check_required("campaign_name", &self.campaign_name)?;
        ValidationError::check_range("limit", self.limit, 1, 100)?;
        check_fetched_on(self.fetched_on.as_deref())
    }
}

fn check_fetched_on(day: Option<&str>) -> ValidationResult<()> {
    match day {
        Some(day) if chrono::NaiveDate::parse_from_str(day, "%Y-%m-%d").is_err() => {
            Err(ValidationError::InvalidValue {
                field: "fetched_on",
                reason: format!("expected YYYY-MM-DD, got {}", day),
            })
        }
        _ => Ok(()),
    }
}

/// Outcome of `start-now` and `send-batch` on a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BatchSendSummary {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub sent_count: u64,
    #[serde(default)]
    pub failed_count: u64,
    #[serde(default)]
    pub total: u64,
}

impl BatchSendSummary {
    pub fn label(&self) -> String {
        format!("Sent {} of {} ({} failed)", self.sent_count, self.total, self.failed_count)
    }
}

/// Result of a single-message send.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendOutcome {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<MessageStatus>,
}

/// `GET /api/messages` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListMessagesQuery {
    #[serde(flatten)]
    pub page: PageRequest,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub message_type: Option<MessageType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MessageStatus>,
}

// ============================================================================
// LEADS AND PRODUCTS
// ============================================================================

/// `GET /api/products/{id}/leads` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListLeadsQuery {
    #[serde(flatten)]
    pub page: PageRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<IntentType>,
}

/// `GET /api/products` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListProductsQuery {
    #[serde(flatten)]
    pub page: PageRequest,
    pub active_only: bool,
}

/// Create or update body for a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    pub industry_tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brochure_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ProductRequest {
    /// Build from form text; tags are comma separated.
    pub fn from_form(name: &str, short_description: &str, tags: &str, brochure_url: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            short_description: blank_to_none(short_description),
            long_description: None,
            industry_tags: tags
                .split(',')
                .filter_map(blank_to_none)
                .collect(),
            brochure_url: blank_to_none(brochure_url),
            is_active: None,
        }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        ValidationError::check_required("name", &self.name)
    }
}

/// `POST /api/products/{id}/fetch-clients`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchClientsRequest {
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl FetchClientsRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        ValidationError::check_range("limit", self.limit, 1, 50)
    }
}

/// `POST /api/products/{id}/campaigns/generate`. Targets are the companies
/// already matched to the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateProductCampaignRequest {
    /// Backend picks a dated name when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_name: Option<String>,
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_template_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_template_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_on: Option<String>,
    pub attach_brochure: bool,
}

impl Default for GenerateProductCampaignRequest {
    fn default() -> Self {
        Self {
            campaign_name: None,
            limit: 10,
            email_template_id: None,
            whatsapp_template_id: None,
            fetched_on: None,
            attach_brochure: true,
        }
    }
}

impl GenerateProductCampaignRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        ValidationError::check_range("limit", self.limit, 1, 100)?;
        check_fetched_on(self.fetched_on.as_deref())
    }
}

// ============================================================================
// AUTOMATION
// ============================================================================

/// Create or update body for an automation config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutomationConfigRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub industry: String,
    pub country: String,
    pub daily_limit: i64,
    pub send_time_hour: i64,
    pub send_time_minute: i64,
    pub followup_day_1: i64,
    pub followup_day_2: i64,
    pub run_duration_days: i64,
}

// ============================================================================
// TEMPLATES AND SETTINGS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub template_type: MessageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<String>,
}

impl TemplateRequest {
    pub fn new(
        name: &str,
        template_type: MessageType,
        subject: &str,
        content: &str,
        variables: &str,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            template_type,
            subject: blank_to_none(subject),
            content: content.to_string(),
            variables: blank_to_none(variables),
        }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        ValidationError::check_required("name", &self.name)?;
        ValidationError::check_required("content", &self.content)?;
        if self.template_type == MessageType::Email && self.subject.is_none() {
            return Err(ValidationError::RequiredFieldMissing { field: "subject" });
        }
        Ok(())
    }
}

/// `POST /api/settings/email/test` reply. Delivery failure is reported in the
/// body rather than as an HTTP error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TestEmailResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl TestEmailResult {
    pub fn summary(&self) -> String {
        match (&self.error, self.success) {
            (Some(error), false) => format!("{}: {}", self.message, error),
            _ => self.message.clone(),
        }
    }
}

/// Key/value setting write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingUpsert {
    pub key: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralSettingsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSettingsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_username: Option<String>,
    /// Only sent when changed; the backend returns it masked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettingsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_notifications: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_notifications: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_reports: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_reports: Option<bool>,
}
