//! In-memory backend and event-loop driver for app tests.

#![allow(dead_code)]

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use outreach_core::{
    Acknowledgement, AutomationAction, AutomationConfig, AutomationConfigRequest, AutomationStats,
    BatchIds, BatchSendSummary, Campaign, ChartPoint, Company, CompanyUpdate, DetailedAnalytics,
    EmailAccount, EmailSettingsUpdate, EntityId, FetchClientsRequest, FetchCompaniesRequest,
    FetchCompaniesResponse, GenerateCampaignRequest, GenerateProductCampaignRequest,
    GeneralSettingsUpdate, LeadSummary, ListLeadsQuery, ListMessagesQuery, ListProductsQuery,
    Message, MessageType, NotificationSettingsUpdate, OpenedCompany, Page, PageRequest, Product,
    ProductAnalytics, ProductCompany, ProductFunnel, ProductRequest, QualifiedLead, ReplyEntry,
    SendOutcome, SettingUpsert, SettingsBundle, StoppedCompany, SystemSetting, Template,
    TemplateRequest, TestEmailResult,
};
use outreach_test_utils::fixtures;
use outreach_tui::api_client::{ApiClientError, ExportKind, OutreachApi};
use outreach_tui::config::TuiConfig;
use outreach_tui::events::TuiEvent;
use outreach_tui::state::App;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Default)]
pub struct FakeState {
    pub companies: Vec<Company>,
    pub messages: Vec<Message>,
    pub automations: Vec<AutomationConfig>,
    pub products: Vec<Product>,
    /// Campaigns keyed by the product they were generated for.
    pub product_campaigns: Vec<(EntityId, Campaign)>,
    pub chart: Vec<ChartPoint>,
    /// Every list endpoint fails while set.
    pub fail_reads: bool,
    /// Mutations fail with this detail while set.
    pub reject_writes: Option<String>,
    pub calls: Vec<String>,
    pub searches: Vec<Option<String>>,
    next_id: EntityId,
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    pub state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub fn with_companies(count: EntityId) -> Self {
        let backend = FakeBackend::default();
        {
            let mut state = backend.state.lock().unwrap();
            state.companies = (1..=count)
                .map(|id| fixtures::company(id, "Retail", "UK"))
                .collect();
            state.next_id = count + 1;
        }
        backend
    }

    pub fn set<F: FnOnce(&mut FakeState)>(&self, f: F) {
        f(&mut self.state.lock().unwrap());
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, call: impl Into<String>) -> Result<(), ApiClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call.into());
        match &state.reject_writes {
            Some(detail) => Err(ApiClientError::Status {
                status: 400,
                detail: Some(detail.clone()),
            }),
            None => Ok(()),
        }
    }

    fn read_guard(&self) -> Result<(), ApiClientError> {
        if self.state.lock().unwrap().fail_reads {
            Err(ApiClientError::Status {
                status: 503,
                detail: None,
            })
        } else {
            Ok(())
        }
    }
}

fn unsupported<T>(name: &str) -> Result<T, ApiClientError> {
    Err(ApiClientError::Config(format!("{} is not served by the fake backend", name)))
}

fn ack(message: &str) -> Acknowledgement {
    Acknowledgement {
        message: message.to_string(),
    }
}

fn paginate<T: Clone>(items: &[T], request: &PageRequest) -> Page<T> {
    let size = request.page_size.max(1) as usize;
    let start = (request.page.max(1) as usize - 1) * size;
    let slice: Vec<T> = items.iter().skip(start).take(size).cloned().collect();
    fixtures::page_of(slice, request.page.max(1), request.page_size, items.len() as u64)
}

#[async_trait]
impl OutreachApi for FakeBackend {
    async fn list_companies(&self, page: &PageRequest) -> Result<Page<Company>, ApiClientError> {
        self.read_guard()?;
        let mut state = self.state.lock().unwrap();
        state.searches.push(page.search.clone());
        let term = page.search.clone().unwrap_or_default().to_lowercase();
        let matching: Vec<Company> = state
            .companies
            .iter()
            .filter(|c| term.is_empty() || c.name.to_lowercase().contains(&term))
            .cloned()
            .collect();
        Ok(paginate(&matching, page))
    }

    async fn get_company(&self, id: EntityId) -> Result<Company, ApiClientError> {
        self.read_guard()?;
        let state = self.state.lock().unwrap();
        state
            .companies
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(ApiClientError::Status {
                status: 404,
                detail: Some("Company not found".to_string()),
            })
    }

    async fn update_company(
        &self,
        id: EntityId,
        update: &CompanyUpdate,
    ) -> Result<Company, ApiClientError> {
        self.record(format!("update_company {}", id))?;
        let mut state = self.state.lock().unwrap();
        let company = state
            .companies
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ApiClientError::Status {
                status: 404,
                detail: Some("Company not found".to_string()),
            })?;
        if let Some(name) = &update.name {
            company.name = name.clone();
        }
        Ok(company.clone())
    }

    async fn fetch_companies(
        &self,
        request: &FetchCompaniesRequest,
    ) -> Result<FetchCompaniesResponse, ApiClientError> {
        self.record(format!(
            "fetch_companies {} {} {}",
            request.industry, request.country, request.count
        ))?;
        let mut state = self.state.lock().unwrap();
        let mut added = Vec::new();
        for _ in 0..request.count {
            let id = state.next_id;
            state.next_id += 1;
            added.push(fixtures::company(id, &request.industry, &request.country));
        }
        state.companies.extend(added.iter().cloned());
        Ok(FetchCompaniesResponse {
            message: format!("Fetched {} companies", added.len()),
            companies_fetched: added.len() as u64,
            companies: added,
        })
    }

    async fn delete_companies(&self, ids: &BatchIds) -> Result<Acknowledgement, ApiClientError> {
        self.record(format!("delete_companies {:?}", ids.ids))?;
        let mut state = self.state.lock().unwrap();
        state.companies.retain(|c| !ids.ids.contains(&c.id));
        Ok(ack(&format!("Deleted {} companies", ids.ids.len())))
    }

    async fn stopped_companies(
        &self,
        page: &PageRequest,
    ) -> Result<Page<StoppedCompany>, ApiClientError> {
        self.read_guard()?;
        Ok(paginate(&[], page))
    }

    async fn opened_companies(
        &self,
        page: &PageRequest,
    ) -> Result<Page<OpenedCompany>, ApiClientError> {
        self.read_guard()?;
        Ok(paginate(&[], page))
    }

    async fn export_csv(&self, kind: ExportKind) -> Result<Vec<u8>, ApiClientError> {
        self.record(format!("export {}", kind.file_name()))?;
        Ok(b"id,name\n1,Company 1\n".to_vec())
    }

    async fn list_campaigns(&self) -> Result<Vec<Campaign>, ApiClientError> {
        self.read_guard()?;
        Ok(Vec::new())
    }

    async fn get_campaign(&self, _id: EntityId) -> Result<Campaign, ApiClientError> {
        unsupported("get_campaign")
    }

    async fn generate_campaign(
        &self,
        _request: &GenerateCampaignRequest,
    ) -> Result<Campaign, ApiClientError> {
        unsupported("generate_campaign")
    }

    async fn start_campaign_now(&self, _id: EntityId) -> Result<BatchSendSummary, ApiClientError> {
        unsupported("start_campaign_now")
    }

    async fn send_campaign_batch(&self, _id: EntityId) -> Result<BatchSendSummary, ApiClientError> {
        unsupported("send_campaign_batch")
    }

    async fn delete_campaigns(&self, _ids: &BatchIds) -> Result<Acknowledgement, ApiClientError> {
        unsupported("delete_campaigns")
    }

    async fn list_messages(
        &self,
        query: &ListMessagesQuery,
    ) -> Result<Page<Message>, ApiClientError> {
        self.read_guard()?;
        let state = self.state.lock().unwrap();
        let matching: Vec<Message> = state
            .messages
            .iter()
            .filter(|m| query.message_type.map_or(true, |t| m.message_type == t))
            .filter(|m| query.status.map_or(true, |s| m.status == s))
            .cloned()
            .collect();
        Ok(paginate(&matching, &query.page))
    }

    async fn send_message(&self, id: EntityId) -> Result<SendOutcome, ApiClientError> {
        self.record(format!("send_message {}", id))?;
        Ok(SendOutcome {
            message: String::new(),
            status: None,
        })
    }

    async fn send_whatsapp(&self, id: EntityId) -> Result<SendOutcome, ApiClientError> {
        self.record(format!("send_whatsapp {}", id))?;
        Ok(SendOutcome {
            message: String::new(),
            status: None,
        })
    }

    async fn delete_messages(&self, ids: &BatchIds) -> Result<Acknowledgement, ApiClientError> {
        self.record(format!("delete_messages {:?}", ids.ids))?;
        let mut state = self.state.lock().unwrap();
        state.messages.retain(|m| !ids.ids.contains(&m.id));
        Ok(ack("Messages deleted"))
    }

    async fn retry_messages(&self, ids: &BatchIds) -> Result<Acknowledgement, ApiClientError> {
        self.record(format!("retry_messages {:?}", ids.ids))?;
        Ok(ack(""))
    }

    async fn list_replies(&self) -> Result<Vec<ReplyEntry>, ApiClientError> {
        self.read_guard()?;
        Ok(Vec::new())
    }

    async fn qualified_leads(&self) -> Result<Vec<LeadSummary>, ApiClientError> {
        self.read_guard()?;
        Ok(Vec::new())
    }

    async fn list_automations(&self) -> Result<Vec<AutomationConfig>, ApiClientError> {
        self.read_guard()?;
        Ok(self.state.lock().unwrap().automations.clone())
    }

    async fn get_automation(&self, _id: EntityId) -> Result<AutomationConfig, ApiClientError> {
        unsupported("get_automation")
    }

    async fn create_automation(
        &self,
        request: &AutomationConfigRequest,
    ) -> Result<AutomationConfig, ApiClientError> {
        self.record(format!(
            "create_automation {} {} {}",
            request.industry, request.country, request.daily_limit
        ))?;
        let mut state = self.state.lock().unwrap();
        let id = state.automations.len() as EntityId + 1;
        let mut config = fixtures::automation_config(id, outreach_core::AutomationStatus::Draft);
        config.name = request.name.clone();
        config.industry = request.industry.clone();
        config.country = request.country.clone();
        config.daily_limit = request.daily_limit;
        state.automations.push(config.clone());
        Ok(config)
    }

    async fn update_automation(
        &self,
        _id: EntityId,
        _request: &AutomationConfigRequest,
    ) -> Result<AutomationConfig, ApiClientError> {
        unsupported("update_automation")
    }

    async fn delete_automation(&self, _id: EntityId) -> Result<Acknowledgement, ApiClientError> {
        unsupported("delete_automation")
    }

    async fn automation_action(
        &self,
        id: EntityId,
        action: AutomationAction,
    ) -> Result<Acknowledgement, ApiClientError> {
        self.record(format!("{} {}", action.endpoint(), id))?;
        Ok(ack(""))
    }

    async fn automation_stats(&self) -> Result<AutomationStats, ApiClientError> {
        self.read_guard()?;
        let state = self.state.lock().unwrap();
        Ok(AutomationStats {
            total_companies: state.companies.len() as u64,
            ..AutomationStats::default()
        })
    }

    async fn chart_data(&self) -> Result<Vec<ChartPoint>, ApiClientError> {
        self.read_guard()?;
        Ok(self.state.lock().unwrap().chart.clone())
    }

    async fn detailed_analytics(&self, days: u32) -> Result<DetailedAnalytics, ApiClientError> {
        self.read_guard()?;
        self.state.lock().unwrap().calls.push(format!("analytics {}", days));
        Ok(DetailedAnalytics {
            period_days: days,
            ..DetailedAnalytics::default()
        })
    }

    async fn list_templates(
        &self,
        _template_type: Option<MessageType>,
    ) -> Result<Vec<Template>, ApiClientError> {
        self.read_guard()?;
        Ok(Vec::new())
    }

    async fn create_template(&self, _request: &TemplateRequest) -> Result<Template, ApiClientError> {
        unsupported("create_template")
    }

    async fn update_template(
        &self,
        _id: EntityId,
        _request: &TemplateRequest,
    ) -> Result<Template, ApiClientError> {
        unsupported("update_template")
    }

    async fn delete_template(&self, _id: EntityId) -> Result<Acknowledgement, ApiClientError> {
        unsupported("delete_template")
    }

    async fn sync_templates(&self) -> Result<Acknowledgement, ApiClientError> {
        unsupported("sync_templates")
    }

    async fn get_settings(&self) -> Result<SettingsBundle, ApiClientError> {
        self.read_guard()?;
        Ok(SettingsBundle::default())
    }

    async fn update_general_settings(
        &self,
        _update: &GeneralSettingsUpdate,
    ) -> Result<Acknowledgement, ApiClientError> {
        unsupported("update_general_settings")
    }

    async fn update_email_settings(
        &self,
        _update: &EmailSettingsUpdate,
    ) -> Result<Acknowledgement, ApiClientError> {
        unsupported("update_email_settings")
    }

    async fn update_notification_settings(
        &self,
        _update: &NotificationSettingsUpdate,
    ) -> Result<Acknowledgement, ApiClientError> {
        unsupported("update_notification_settings")
    }

    async fn send_test_email(&self, address: &str) -> Result<TestEmailResult, ApiClientError> {
        self.record(format!("test_email {}", address))?;
        Ok(TestEmailResult {
            success: false,
            message: "Test email failed".to_string(),
            error: Some("SMTP authentication failed".to_string()),
        })
    }

    async fn upsert_setting(
        &self,
        _setting: &SettingUpsert,
    ) -> Result<SystemSetting, ApiClientError> {
        unsupported("upsert_setting")
    }

    async fn list_email_accounts(
        &self,
        page: &PageRequest,
    ) -> Result<Page<EmailAccount>, ApiClientError> {
        self.read_guard()?;
        Ok(paginate(&[], page))
    }

    async fn list_products(
        &self,
        query: &ListProductsQuery,
    ) -> Result<Page<Product>, ApiClientError> {
        self.read_guard()?;
        let products = self.state.lock().unwrap().products.clone();
        Ok(paginate(&products, &query.page))
    }

    async fn get_product(&self, _id: EntityId) -> Result<Product, ApiClientError> {
        unsupported("get_product")
    }

    async fn create_product(&self, _request: &ProductRequest) -> Result<Product, ApiClientError> {
        unsupported("create_product")
    }

    async fn update_product(
        &self,
        _id: EntityId,
        _request: &ProductRequest,
    ) -> Result<Product, ApiClientError> {
        unsupported("update_product")
    }

    async fn delete_product(&self, _id: EntityId) -> Result<Acknowledgement, ApiClientError> {
        unsupported("delete_product")
    }

    async fn product_companies(
        &self,
        _id: EntityId,
        page: &PageRequest,
    ) -> Result<Page<ProductCompany>, ApiClientError> {
        Ok(paginate(&[], page))
    }

    async fn product_campaigns(
        &self,
        id: EntityId,
        page: &PageRequest,
    ) -> Result<Page<Campaign>, ApiClientError> {
        self.read_guard()?;
        let state = self.state.lock().unwrap();
        let campaigns: Vec<Campaign> = state
            .product_campaigns
            .iter()
            .filter(|(product_id, _)| *product_id == id)
            .map(|(_, campaign)| campaign.clone())
            .collect();
        Ok(paginate(&campaigns, page))
    }

    async fn generate_product_campaign(
        &self,
        id: EntityId,
        request: &GenerateProductCampaignRequest,
    ) -> Result<Campaign, ApiClientError> {
        self.record(format!(
            "generate_product_campaign {} {} {}",
            id, request.limit, request.attach_brochure
        ))?;
        let mut state = self.state.lock().unwrap();
        let next = state.product_campaigns.len() as EntityId + 1;
        let mut campaign = fixtures::campaign(next, "Technology", Vec::new());
        if let Some(name) = &request.campaign_name {
            campaign.name = name.clone();
        }
        state.product_campaigns.push((id, campaign.clone()));
        Ok(campaign)
    }

    async fn product_leads(
        &self,
        _id: EntityId,
        query: &ListLeadsQuery,
    ) -> Result<Page<QualifiedLead>, ApiClientError> {
        Ok(paginate(&[], &query.page))
    }

    async fn product_analytics(&self, id: EntityId) -> Result<ProductAnalytics, ApiClientError> {
        self.read_guard()?;
        Ok(ProductAnalytics {
            product_id: id,
            product_name: format!("Product {}", id),
            companies_fetched: 40,
            messages_sent: 30,
            emails_opened: 12,
            replies_received: 5,
            hot_leads: 2,
            warm_leads: 2,
            cold_leads: 1,
            unsubscribes: 0,
            brochure_downloads: 3,
            conversion_rate: 5.0,
            funnel: ProductFunnel {
                fetched: 40,
                contacted: 30,
                opened: 12,
                replied: 5,
                qualified: 2,
            },
        })
    }

    async fn fetch_product_clients(
        &self,
        _id: EntityId,
        _request: &FetchClientsRequest,
    ) -> Result<FetchCompaniesResponse, ApiClientError> {
        unsupported("fetch_product_clients")
    }
}

pub struct Harness {
    pub app: App,
    pub backend: FakeBackend,
    events: mpsc::Receiver<TuiEvent>,
}

impl Harness {
    pub fn new(backend: FakeBackend) -> Self {
        Self::with_config(backend, TuiConfig::default())
    }

    pub fn with_config(backend: FakeBackend, config: TuiConfig) -> Self {
        let (tx, rx) = mpsc::channel(64);
        let api: Arc<dyn OutreachApi> = Arc::new(backend.clone());
        Self {
            app: App::new(config, api, tx),
            backend,
            events: rx,
        }
    }

    /// Apply results until the backend has been quiet for a moment.
    pub async fn settle(&mut self) {
        while let Ok(Some(event)) =
            tokio::time::timeout(Duration::from_millis(100), self.events.recv()).await
        {
            self.app.handle_event(event);
        }
    }

    pub fn press(&mut self, code: KeyCode) -> bool {
        self.app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyCode::Char(c));
        }
    }
}
