//! REST client for the outreach backend.
//!
//! `OutreachApi` is the seam between page controllers and the network; the
//! dashboard runs against `RestClient`, tests against an in-memory backend.

use crate::config::TuiConfig;
use async_trait::async_trait;
use outreach_core::{
    Acknowledgement, AutomationAction, AutomationConfig, AutomationConfigRequest, AutomationStats,
    BatchIds, BatchSendSummary, Campaign, ChartPoint, Company, CompanyUpdate, DetailedAnalytics,
    EmailAccount, EmailSettingsUpdate, EntityId, FetchClientsRequest, FetchCompaniesRequest,
    FetchCompaniesResponse, GenerateCampaignRequest, GenerateProductCampaignRequest,
    GeneralSettingsUpdate, LeadSummary, ListLeadsQuery, ListMessagesQuery, ListProductsQuery,
    Message, MessageType, NotificationSettingsUpdate, OpenedCompany, Page, PageRequest, Product,
    ProductAnalytics, ProductCompany, ProductRequest, QualifiedLead, ReplyEntry, SendOutcome,
    SettingUpsert, SettingsBundle, StoppedCompany, SystemSetting, Template, TemplateRequest,
    TestEmailResult,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status}: {}", .detail.as_deref().unwrap_or("request failed"))]
    Status { status: u16, detail: Option<String> },
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(String),
}

impl ApiClientError {
    /// Text for an alert: the backend's `detail` when it sent one.
    pub fn user_message(&self) -> String {
        match self {
            ApiClientError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            other => other.to_string(),
        }
    }

    /// Timeouts, refused connections and server errors may succeed on a
    /// second attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiClientError::Http(err) => err.is_timeout() || err.is_connect(),
            ApiClientError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// FastAPI error body. `detail` is a string for raised errors and a list of
/// field errors for request validation failures.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

fn detail_from_body(text: &str) -> Option<String> {
    let body: ErrorBody = serde_json::from_str(text).ok()?;
    match body.detail {
        serde_json::Value::String(detail) => Some(detail),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

// ============================================================================
// CSV EXPORTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Companies,
    Messages,
    Leads,
}

impl ExportKind {
    pub fn path(&self) -> &'static str {
        match self {
            ExportKind::Companies => "/api/companies/export",
            ExportKind::Messages => "/api/messages/export",
            ExportKind::Leads => "/api/leads/export",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ExportKind::Companies => "companies.csv",
            ExportKind::Messages => "messages.csv",
            ExportKind::Leads => "qualified_leads.csv",
        }
    }
}

/// Write an export body to `dir`, returning the file written.
pub fn save_export(dir: &Path, kind: ExportKind, bytes: &[u8]) -> Result<PathBuf, ApiClientError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(kind.file_name());
    std::fs::write(&path, bytes)?;
    Ok(path)
}

// ============================================================================
// API SEAM
// ============================================================================

/// Every backend operation the dashboard uses.
#[async_trait]
pub trait OutreachApi: Send + Sync {
    // Companies
    async fn list_companies(&self, page: &PageRequest) -> Result<Page<Company>, ApiClientError>;
    async fn get_company(&self, id: EntityId) -> Result<Company, ApiClientError>;
    async fn update_company(
        &self,
        id: EntityId,
        update: &CompanyUpdate,
    ) -> Result<Company, ApiClientError>;
    async fn fetch_companies(
        &self,
        request: &FetchCompaniesRequest,
    ) -> Result<FetchCompaniesResponse, ApiClientError>;
    async fn delete_companies(&self, ids: &BatchIds) -> Result<Acknowledgement, ApiClientError>;
    async fn stopped_companies(
        &self,
        page: &PageRequest,
    ) -> Result<Page<StoppedCompany>, ApiClientError>;
    async fn opened_companies(
        &self,
        page: &PageRequest,
    ) -> Result<Page<OpenedCompany>, ApiClientError>;
    async fn export_csv(&self, kind: ExportKind) -> Result<Vec<u8>, ApiClientError>;

    // Campaigns
    async fn list_campaigns(&self) -> Result<Vec<Campaign>, ApiClientError>;
    async fn get_campaign(&self, id: EntityId) -> Result<Campaign, ApiClientError>;
    async fn generate_campaign(
        &self,
        request: &GenerateCampaignRequest,
    ) -> Result<Campaign, ApiClientError>;
    async fn start_campaign_now(&self, id: EntityId) -> Result<BatchSendSummary, ApiClientError>;
    async fn send_campaign_batch(&self, id: EntityId) -> Result<BatchSendSummary, ApiClientError>;
    async fn delete_campaigns(&self, ids: &BatchIds) -> Result<Acknowledgement, ApiClientError>;

    // Messages
    async fn list_messages(
        &self,
        query: &ListMessagesQuery,
    ) -> Result<Page<Message>, ApiClientError>;
    async fn send_message(&self, id: EntityId) -> Result<SendOutcome, ApiClientError>;
    async fn send_whatsapp(&self, id: EntityId) -> Result<SendOutcome, ApiClientError>;
    async fn delete_messages(&self, ids: &BatchIds) -> Result<Acknowledgement, ApiClientError>;
    async fn retry_messages(&self, ids: &BatchIds) -> Result<Acknowledgement, ApiClientError>;

    // Leads
    async fn list_replies(&self) -> Result<Vec<ReplyEntry>, ApiClientError>;
    async fn qualified_leads(&self) -> Result<Vec<LeadSummary>, ApiClientError>;

    // Automation
    async fn list_automations(&self) -> Result<Vec<AutomationConfig>, ApiClientError>;
    async fn get_automation(&self, id: EntityId) -> Result<AutomationConfig, ApiClientError>;
    async fn create_automation(
        &self,
        request: &AutomationConfigRequest,
    ) -> Result<AutomationConfig, ApiClientError>;
    async fn update_automation(
        &self,
        id: EntityId,
        request: &AutomationConfigRequest,
    ) -> Result<AutomationConfig, ApiClientError>;
    async fn delete_automation(&self, id: EntityId) -> Result<Acknowledgement, ApiClientError>;
    async fn automation_action(
        &self,
        id: EntityId,
        action: AutomationAction,
    ) -> Result<Acknowledgement, ApiClientError>;
    async fn automation_stats(&self) -> Result<AutomationStats, ApiClientError>;

    // Analytics
    async fn chart_data(&self) -> Result<Vec<ChartPoint>, ApiClientError>;
    async fn detailed_analytics(&self, days: u32) -> Result<DetailedAnalytics, ApiClientError>;

    // Templates
    async fn list_templates(
        &self,
        template_type: Option<MessageType>,
    ) -> Result<Vec<Template>, ApiClientError>;
    async fn create_template(&self, request: &TemplateRequest) -> Result<Template, ApiClientError>;
    async fn update_template(
        &self,
        id: EntityId,
        request: &TemplateRequest,
    ) -> Result<Template, ApiClientError>;
    async fn delete_template(&self, id: EntityId) -> Result<Acknowledgement, ApiClientError>;
    async fn sync_templates(&self) -> Result<Acknowledgement, ApiClientError>;

    // Settings
    async fn get_settings(&self) -> Result<SettingsBundle, ApiClientError>;
    async fn update_general_settings(
        &self,
        update: &GeneralSettingsUpdate,
    ) -> Result<Acknowledgement, ApiClientError>;
    async fn update_email_settings(
        &self,
        update: &EmailSettingsUpdate,
    ) -> Result<Acknowledgement, ApiClientError>;
    async fn update_notification_settings(
        &self,
        update: &NotificationSettingsUpdate,
    ) -> Result<Acknowledgement, ApiClientError>;
    async fn send_test_email(&self, address: &str) -> Result<TestEmailResult, ApiClientError>;
    async fn upsert_setting(&self, setting: &SettingUpsert)
        -> Result<SystemSetting, ApiClientError>;
    async fn list_email_accounts(
        &self,
        page: &PageRequest,
    ) -> Result<Page<EmailAccount>, ApiClientError>;

    // Products
    async fn list_products(
        &self,
        query: &ListProductsQuery,
    ) -> Result<Page<Product>, ApiClientError>;
    async fn get_product(&self, id: EntityId) -> Result<Product, ApiClientError>;
    async fn create_product(&self, request: &ProductRequest) -> Result<Product, ApiClientError>;
    async fn update_product(
        &self,
        id: EntityId,
        request: &ProductRequest,
    ) -> Result<Product, ApiClientError>;
    async fn delete_product(&self, id: EntityId) -> Result<Acknowledgement, ApiClientError>;
    async fn product_companies(
        &self,
        id: EntityId,
        page: &PageRequest,
    ) -> Result<Page<ProductCompany>, ApiClientError>;
    async fn product_campaigns(
        &self,
        id: EntityId,
        page: &PageRequest,
    ) -> Result<Page<Campaign>, ApiClientError>;
    async fn generate_product_campaign(
        &self,
        id: EntityId,
        request: &GenerateProductCampaignRequest,
    ) -> Result<Campaign, ApiClientError>;
    async fn product_leads(
        &self,
        id: EntityId,
        query: &ListLeadsQuery,
    ) -> Result<Page<QualifiedLead>, ApiClientError>;
    async fn product_analytics(&self, id: EntityId) -> Result<ProductAnalytics, ApiClientError>;
    async fn fetch_product_clients(
        &self,
        id: EntityId,
        request: &FetchClientsRequest,
    ) -> Result<FetchCompaniesResponse, ApiClientError>;
}

// ============================================================================
// REST CLIENT
// ============================================================================

#[derive(Deserialize)]
struct RepliesEnvelope {
    #[serde(default)]
    replies: Vec<ReplyEntry>,
}

#[derive(Deserialize)]
struct QualifiedEnvelope {
    #[serde(default)]
    leads: Vec<LeadSummary>,
}

#[derive(Serialize)]
struct TypeQuery {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    template_type: Option<MessageType>,
}

#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
    /// Extra attempts for GET requests.
    retries: u32,
}

impl RestClient {
    pub fn new(config: &TuiConfig) -> Result<Self, ApiClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            retries: config.query_retries,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET with retry on transport errors and 5xx responses.
    async fn get_json<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        with_retries(self.retries, path, || {
            let mut request = self.client.get(self.url(path));
            if let Some(query) = query {
                request = request.query(query);
            }
            async move { parse_response(request.send().await?).await }
        })
        .await
    }

    async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiClientError> {
        with_retries(self.retries, path, || {
            let request = self.client.get(self.url(path));
            async move { read_bytes(request.send().await?).await }
        })
        .await
    }

    async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        parse_response(response).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiClientError> {
        let response = self.client.post(self.url(path)).send().await?;
        parse_response(response).await
    }

    async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        parse_response(response).await
    }

    async fn delete_json<T, B>(&self, path: &str, body: Option<&B>) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = self.client.delete(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        parse_response(response).await
    }
}

/// Pause before retry number `attempt`, counting from one.
pub fn retry_delay(attempt: u32) -> Duration {
    Duration::from_millis(200 * u64::from(attempt))
}

/// Run `send` until it succeeds, fails for good, or `retries` extra attempts
/// are spent.
async fn with_retries<T, F, Fut>(
    retries: u32,
    path: &str,
    mut send: F,
) -> Result<T, ApiClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiClientError>>,
{
    let mut attempt = 0;
    loop {
        match send().await {
            Err(err) if err.is_retryable() && attempt < retries => {
                attempt += 1;
                tracing::debug!(path, attempt, error = %err, "retrying GET");
                tokio::time::sleep(retry_delay(attempt)).await;
            }
            other => return other,
        }
    }
}

async fn status_error(response: reqwest::Response) -> ApiClientError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    ApiClientError::Status {
        status,
        detail: detail_from_body(&text),
    }
}

async fn parse_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiClientError> {
    if !response.status().is_success() {
        return Err(status_error(response).await);
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn read_bytes(response: reqwest::Response) -> Result<Vec<u8>, ApiClientError> {
    if !response.status().is_success() {
        return Err(status_error(response).await);
    }
    Ok(response.bytes().await?.to_vec())
}

const NO_BODY: Option<&()> = None;

#[async_trait]
impl OutreachApi for RestClient {
    async fn list_companies(&self, page: &PageRequest) -> Result<Page<Company>, ApiClientError> {
        self.get_json("/api/companies", Some(page)).await
    }

    async fn get_company(&self, id: EntityId) -> Result<Company, ApiClientError> {
        self.get_json(&format!("/api/companies/{}", id), NO_BODY).await
    }

    async fn update_company(
        &self,
        id: EntityId,
        update: &CompanyUpdate,
    ) -> Result<Company, ApiClientError> {
        self.put_json(&format!("/api/companies/{}", id), update).await
    }

    async fn fetch_companies(
        &self,
        request: &FetchCompaniesRequest,
    ) -> Result<FetchCompaniesResponse, ApiClientError> {
        self.post_json("/api/fetch-companies", request).await
    }

    async fn delete_companies(&self, ids: &BatchIds) -> Result<Acknowledgement, ApiClientError> {
        self.delete_json("/api/companies/batch", Some(ids)).await
    }

    async fn stopped_companies(
        &self,
        page: &PageRequest,
    ) -> Result<Page<StoppedCompany>, ApiClientError> {
        self.get_json("/api/companies/stopped", Some(page)).await
    }

    async fn opened_companies(
        &self,
        page: &PageRequest,
    ) -> Result<Page<OpenedCompany>, ApiClientError> {
        self.get_json("/api/companies/opened", Some(page)).await
    }

    async fn export_csv(&self, kind: ExportKind) -> Result<Vec<u8>, ApiClientError> {
        self.get_bytes(kind.path()).await
    }

    async fn list_campaigns(&self) -> Result<Vec<Campaign>, ApiClientError> {
        self.get_json("/api/campaigns", NO_BODY).await
    }

    async fn get_campaign(&self, id: EntityId) -> Result<Campaign, ApiClientError> {
        self.get_json(&format!("/api/campaigns/{}", id), NO_BODY).await
    }

    async fn generate_campaign(
        &self,
        request: &GenerateCampaignRequest,
    ) -> Result<Campaign, ApiClientError> {
        self.post_json("/api/campaigns/generate", request).await
    }

    async fn start_campaign_now(&self, id: EntityId) -> Result<BatchSendSummary, ApiClientError> {
        self.post_empty(&format!("/api/campaigns/{}/start-now", id)).await
    }

    async fn send_campaign_batch(&self, id: EntityId) -> Result<BatchSendSummary, ApiClientError> {
        self.post_empty(&format!("/api/campaigns/{}/send-batch", id)).await
    }

    async fn delete_campaigns(&self, ids: &BatchIds) -> Result<Acknowledgement, ApiClientError> {
        self.delete_json("/api/campaigns/batch", Some(ids)).await
    }

    async fn list_messages(
        &self,
        query: &ListMessagesQuery,
    ) -> Result<Page<Message>, ApiClientError> {
        self.get_json("/api/messages", Some(query)).await
    }

    async fn send_message(&self, id: EntityId) -> Result<SendOutcome, ApiClientError> {
        self.post_empty(&format!("/api/messages/{}/send", id)).await
    }

    async fn send_whatsapp(&self, id: EntityId) -> Result<SendOutcome, ApiClientError> {
        self.post_empty(&format!("/api/messages/{}/send-whatsapp", id)).await
    }

    async fn delete_messages(&self, ids: &BatchIds) -> Result<Acknowledgement, ApiClientError> {
        self.delete_json("/api/messages/batch", Some(ids)).await
    }

    async fn retry_messages(&self, ids: &BatchIds) -> Result<Acknowledgement, ApiClientError> {
        self.post_json("/api/messages/batch/retry", ids).await
    }

    async fn list_replies(&self) -> Result<Vec<ReplyEntry>, ApiClientError> {
        let envelope: RepliesEnvelope = self.get_json("/api/replies", NO_BODY).await?;
        Ok(envelope.replies)
    }

    async fn qualified_leads(&self) -> Result<Vec<LeadSummary>, ApiClientError> {
        let envelope: QualifiedEnvelope = self.get_json("/api/leads/qualified", NO_BODY).await?;
        Ok(envelope.leads)
    }

    async fn list_automations(&self) -> Result<Vec<AutomationConfig>, ApiClientError> {
        self.get_json("/api/automation/config", NO_BODY).await
    }

    async fn get_automation(&self, id: EntityId) -> Result<AutomationConfig, ApiClientError> {
        self.get_json(&format!("/api/automation/config/{}", id), NO_BODY)
            .await
    }

    async fn create_automation(
        &self,
        request: &AutomationConfigRequest,
    ) -> Result<AutomationConfig, ApiClientError> {
        self.post_json("/api/automation/config", request).await
    }

    async fn update_automation(
        &self,
        id: EntityId,
        request: &AutomationConfigRequest,
    ) -> Result<AutomationConfig, ApiClientError> {
        self.put_json(&format!("/api/automation/config/{}", id), request)
            .await
    }

    async fn delete_automation(&self, id: EntityId) -> Result<Acknowledgement, ApiClientError> {
        self.delete_json(&format!("/api/automation/config/{}", id), NO_BODY)
            .await
    }

    async fn automation_action(
        &self,
        id: EntityId,
        action: AutomationAction,
    ) -> Result<Acknowledgement, ApiClientError> {
        self.post_empty(&format!("/api/automation/{}/{}", id, action.endpoint()))
            .await
    }

    async fn automation_stats(&self) -> Result<AutomationStats, ApiClientError> {
        self.get_json("/api/automation/stats", NO_BODY).await
    }

    async fn chart_data(&self) -> Result<Vec<ChartPoint>, ApiClientError> {
        self.get_json("/api/analytics/charts", NO_BODY).await
    }

    async fn detailed_analytics(&self, days: u32) -> Result<DetailedAnalytics, ApiClientError> {
        self.get_json("/api/analytics/detailed", Some(&[("days", days)]))
            .await
    }

    async fn list_templates(
        &self,
        template_type: Option<MessageType>,
    ) -> Result<Vec<Template>, ApiClientError> {
        self.get_json("/api/templates", Some(&TypeQuery { template_type }))
            .await
    }

    async fn create_template(&self, request: &TemplateRequest) -> Result<Template, ApiClientError> {
        self.post_json("/api/templates", request).await
    }

    async fn update_template(
        &self,
        id: EntityId,
        request: &TemplateRequest,
    ) -> Result<Template, ApiClientError> {
        self.put_json(&format!("/api/templates/{}", id), request).await
    }

    async fn delete_template(&self, id: EntityId) -> Result<Acknowledgement, ApiClientError> {
        self.delete_json(&format!("/api/templates/{}", id), NO_BODY)
            .await
    }

    async fn sync_templates(&self) -> Result<Acknowledgement, ApiClientError> {
        self.post_empty("/api/templates/sync").await
    }

    async fn get_settings(&self) -> Result<SettingsBundle, ApiClientError> {
        self.get_json("/api/settings", NO_BODY).await
    }

    async fn update_general_settings(
        &self,
        update: &GeneralSettingsUpdate,
    ) -> Result<Acknowledgement, ApiClientError> {
        self.put_json("/api/settings/general", update).await
    }

    async fn update_email_settings(
        &self,
        update: &EmailSettingsUpdate,
    ) -> Result<Acknowledgement, ApiClientError> {
        self.put_json("/api/settings/email", update).await
    }

    async fn update_notification_settings(
        &self,
        update: &NotificationSettingsUpdate,
    ) -> Result<Acknowledgement, ApiClientError> {
        self.put_json("/api/settings/notifications", update).await
    }

    async fn send_test_email(&self, address: &str) -> Result<TestEmailResult, ApiClientError> {
        let response = self
            .client
            .post(self.url("/api/settings/email/test"))
            .query(&[("test_email", address)])
            .send()
            .await?;
        parse_response(response).await
    }

    async fn upsert_setting(
        &self,
        setting: &SettingUpsert,
    ) -> Result<SystemSetting, ApiClientError> {
        self.post_json("/api/settings", setting).await
    }

    async fn list_email_accounts(
        &self,
        page: &PageRequest,
    ) -> Result<Page<EmailAccount>, ApiClientError> {
        self.get_json("/api/email-accounts", Some(page)).await
    }

    async fn list_products(
        &self,
        query: &ListProductsQuery,
    ) -> Result<Page<Product>, ApiClientError> {
        self.get_json("/api/products", Some(query)).await
    }

    async fn get_product(&self, id: EntityId) -> Result<Product, ApiClientError> {
        self.get_json(&format!("/api/products/{}", id), NO_BODY).await
    }

    async fn create_product(&self, request: &ProductRequest) -> Result<Product, ApiClientError> {
        self.post_json("/api/products", request).await
    }

    async fn update_product(
        &self,
        id: EntityId,
        request: &ProductRequest,
    ) -> Result<Product, ApiClientError> {
        self.put_json(&format!("/api/products/{}", id), request).await
    }

    async fn delete_product(&self, id: EntityId) -> Result<Acknowledgement, ApiClientError> {
        self.delete_json(&format!("/api/products/{}", id), NO_BODY)
            .await
    }

    async fn product_companies(
        &self,
        id: EntityId,
        page: &PageRequest,
    ) -> Result<Page<ProductCompany>, ApiClientError> {
        self.get_json(&format!("/api/products/{}/companies", id), Some(page))
            .await
    }

    async fn product_campaigns(
        &self,
        id: EntityId,
        page: &PageRequest,
    ) -> Result<Page<Campaign>, ApiClientError> {
        self.get_json(&format!("/api/products/{}/campaigns", id), Some(page))
            .await
    }

    async fn generate_product_campaign(
        &self,
        id: EntityId,
        request: &GenerateProductCampaignRequest,
    ) -> Result<Campaign, ApiClientError> {
        self.post_json(&format!("/api/products/{}/campaigns/generate", id), request)
            .await
    }

    async fn product_leads(
        &self,
        id: EntityId,
        query: &ListLeadsQuery,
    ) -> Result<Page<QualifiedLead>, ApiClientError> {
        self.get_json(&format!("/api/products/{}/leads", id), Some(query))
            .await
    }

    async fn product_analytics(&self, id: EntityId) -> Result<ProductAnalytics, ApiClientError> {
        self.get_json(&format!("/api/products/{}/analytics", id), NO_BODY)
            .await
    }

    async fn fetch_product_clients(
        &self,
        id: EntityId,
        request: &FetchClientsRequest,
    ) -> Result<FetchCompaniesResponse, ApiClientError> {
        self.post_json(&format!("/api/products/{}/fetch-clients", id), request)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string_is_extracted() {
        assert_eq!(
            detail_from_body(r#"{"detail": "Company not found"}"#).as_deref(),
            Some("Company not found")
        );
        assert_eq!(detail_from_body("<html>bad gateway</html>"), None);
    }

    #[test]
    fn test_validation_detail_is_kept_as_json() {
        let detail = detail_from_body(r#"{"detail": [{"loc": ["body", "count"]}]}"#).unwrap();
        assert!(detail.contains("count"));
    }

    #[test]
    fn test_user_message_prefers_detail() {
        let err = ApiClientError::Status {
            status: 404,
            detail: Some("Config not found".to_string()),
        };
        assert_eq!(err.user_message(), "Config not found");
        assert!(!err.is_retryable());

        let err = ApiClientError::Status {
            status: 502,
            detail: None,
        };
        assert_eq!(err.user_message(), "HTTP 502: request failed");
        assert!(err.is_retryable());
    }

    #[test]
    fn test_save_export_writes_into_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_export(dir.path(), ExportKind::Messages, b"ID,Company\n1,Acme\n").unwrap();
        assert_eq!(path, dir.path().join("messages.csv"));
        assert_eq!(std::fs::read(path).unwrap(), b"ID,Company\n1,Acme\n");
    }

    #[test]
    fn test_rest_client_trims_base_url() {
        let config = TuiConfig {
            api_base_url: "http://localhost:8000/".to_string(),
            ..TuiConfig::default()
        };
        let client = RestClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/api/companies"), "http://localhost:8000/api/companies");
    }

    fn unavailable() -> ApiClientError {
        ApiClientError::Status {
            status: 503,
            detail: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_back_off_until_success() {
        let start = tokio::time::Instant::now();
        let mut calls = 0u32;
        let result = with_retries(3, "/api/stats", || {
            calls += 1;
            let attempt = calls;
            async move {
                if attempt < 3 {
                    Err(unavailable())
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls, 3);
        assert!(start.elapsed() >= retry_delay(1) + retry_delay(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_give_up_after_limit() {
        let mut calls = 0u32;
        let result: Result<(), _> = with_retries(2, "/api/companies/export", || {
            calls += 1;
            async { Err(unavailable()) }
        })
        .await;

        assert!(matches!(result, Err(ApiClientError::Status { status: 503, .. })));
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let mut calls = 0u32;
        let result: Result<(), _> = with_retries(3, "/api/companies", || {
            calls += 1;
            async {
                Err(ApiClientError::Status {
                    status: 422,
                    detail: Some("count must be positive".to_string()),
                })
            }
        })
        .await;

        assert_eq!(result.unwrap_err().user_message(), "count must be positive");
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_malformed_request_is_not_retryable() {
        let err = reqwest::Client::new().get("http://").build().unwrap_err();
        assert!(!ApiClientError::from(err).is_retryable());
        assert!(!ApiClientError::Config("no base url".to_string()).is_retryable());
    }

    #[tokio::test]
    async fn test_refused_connection_is_retryable() {
        let config = TuiConfig {
            api_base_url: "http://127.0.0.1:1".to_string(),
            query_retries: 0,
            ..TuiConfig::default()
        };
        let client = RestClient::new(&config).unwrap();
        let err = client.get_bytes(ExportKind::Leads.path()).await.unwrap_err();
        assert!(matches!(err, ApiClientError::Http(_)));
        assert!(err.is_retryable());
    }
}
