//! Event types for the TUI event loop.
//!
//! Fetches and mutations run on tokio tasks and report back through the same
//! channel as terminal input. Every list result carries the ticket it was
//! started with so the page can drop superseded responses.

use crate::api_client::ApiClientError;
use crate::controller::LoadTicket;
use crate::nav::View;
use crossterm::event::KeyEvent;
use outreach_core::{
    AutomationConfig, AutomationStats, Campaign, ChartPoint, Company, DetailedAnalytics,
    EmailAccount, LeadSummary, Message, OpenedCompany, Page, Product, ProductAnalytics,
    ProductCompany, QualifiedLead, ReplyEntry, SettingsBundle, StoppedCompany, Template,
    TestEmailResult,
};
use std::path::PathBuf;

pub type ApiResult<T> = Result<T, ApiClientError>;

#[derive(Debug)]
pub enum TuiEvent {
    Input(KeyEvent),
    Tick,
    Resize { width: u16, height: u16 },
    Loaded(Box<Loaded>),
    Mutated(Box<Mutated>),
}

/// Dashboard cards and chart, fetched together.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub stats: AutomationStats,
    pub chart: Vec<ChartPoint>,
}

#[derive(Debug)]
pub enum Loaded {
    Overview(u64, ApiResult<Overview>),
    Companies(LoadTicket, ApiResult<Page<Company>>),
    CompanyDetail(u64, ApiResult<Company>),
    Campaigns(LoadTicket, ApiResult<Page<Campaign>>),
    CampaignDetail(u64, ApiResult<Campaign>),
    Messages(LoadTicket, ApiResult<Page<Message>>),
    Replies(u64, ApiResult<Vec<ReplyEntry>>),
    QualifiedLeads(u64, ApiResult<Vec<LeadSummary>>),
    OpenedCompanies(LoadTicket, ApiResult<Page<OpenedCompany>>),
    StoppedCompanies(LoadTicket, ApiResult<Page<StoppedCompany>>),
    Automations(LoadTicket, ApiResult<Page<AutomationConfig>>),
    Products(LoadTicket, ApiResult<Page<Product>>),
    ProductCompanies(LoadTicket, ApiResult<Page<ProductCompany>>),
    ProductCampaigns(LoadTicket, ApiResult<Page<Campaign>>),
    ProductLeads(LoadTicket, ApiResult<Page<QualifiedLead>>),
    ProductAnalytics(u64, ApiResult<ProductAnalytics>),
    Templates(LoadTicket, ApiResult<Page<Template>>),
    Settings(u64, ApiResult<SettingsBundle>),
    EmailAccounts(LoadTicket, ApiResult<Page<EmailAccount>>),
    Analytics(u64, ApiResult<DetailedAnalytics>),
}

/// Result of a create, update, delete or trigger request.
#[derive(Debug)]
pub struct Mutated {
    pub view: View,
    /// Label for the alert title when the request fails.
    pub action: &'static str,
    pub result: ApiResult<MutationOutput>,
}

#[derive(Debug)]
pub enum MutationOutput {
    /// Toast and reload the page.
    Done(String),
    /// Toast, clear the row selection and reload the page.
    Batch(String),
    CompanyUpdated(Company),
    Exported(PathBuf),
    TestEmail(TestEmailResult),
}
