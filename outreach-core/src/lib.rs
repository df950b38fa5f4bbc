//! Outreach Core - Entity Types
//!
//! Data structures shared by the console and its tests: the records served by
//! the outreach backend, the pagination envelope, client-side filters, row
//! selection and the automation action table. This crate performs no I/O.

use chrono::NaiveDateTime;

pub mod analytics;
pub mod automation;
pub mod entities;
pub mod enums;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod requests;
pub mod selection;
pub mod timestamp;

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Backend primary key. Every record served by the API carries an integer id.
pub type EntityId = i64;

/// Timestamps are written by the backend in its local zone without an offset.
pub type Timestamp = NaiveDateTime;

/// A record with a stable identity, used for selection and detail merging.
pub trait Identified {
    fn id(&self) -> EntityId;
}

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use analytics::{
    percent_label, ActivitySummary, AutomationStats, ChartPoint, DailyActivity,
    DetailedAnalytics, EmailSettings, IndustryBreakdown, ProductAnalytics, ProductFunnel,
    RateSummary, SettingsBundle,
};
pub use automation::{
    actions_for, AutomationAction, AutomationWizard, CampaignEstimate, WizardNav, WizardStep,
    MESSAGES_PER_COMPANY,
};
pub use entities::{
    AutomationConfig, Campaign, Company, CompanyPhone, EmailAccount, Interaction, LatestReply,
    LeadSummary, Message, OpenedCompany, Product, ProductCompany, QualifiedLead, ReplyEntry,
    ReplyRecord, StoppedCompany, SystemSetting, Template,
};
pub use enums::{AutomationStatus, IntentType, MessageStage, MessageStatus, MessageType};
pub use error::{ParseEnumError, ValidationError, ValidationResult};
pub use filter::{
    distinct_values, CompanyFilter, ItemFilter, LeadFilter, MessageFilter, NoFilter,
    ReplyPresence, ReplySource,
};
pub use pagination::{
    page_window, Page, PageRequest, PageSlot, PaginationState, MAX_PAGE_SIZE, MAX_WINDOW,
};
pub use requests::{
    Acknowledgement, AutomationConfigRequest, BatchIds, BatchSendSummary, CompanyForm, CompanyUpdate,
    EmailSettingsUpdate, FetchClientsRequest, FetchCompaniesRequest, FetchCompaniesResponse,
    GenerateCampaignRequest, GenerateProductCampaignRequest, GeneralSettingsUpdate, ListLeadsQuery, ListMessagesQuery,
    ListProductsQuery, NotificationSettingsUpdate, ProductRequest, SendOutcome,
    SettingUpsert, TemplateRequest, TestEmailResult,
};
pub use selection::Selection;
