//! Application state for the TUI.
//!
//! `App` is the composition root: it owns every page's state, the modal
//! stack and the toast centre, and turns key actions into fetches and
//! mutations on the loader. Results come back as events and are applied
//! here, on the UI task only.

use crate::api_client::{save_export, ApiClientError, ExportKind, OutreachApi};
use crate::config::TuiConfig;
use crate::controller::{ListController, LoadOutcome, LoadTicket, Resource};
use crate::debounce::SearchDebouncer;
use crate::events::{Loaded, Mutated, MutationOutput, Overview, TuiEvent};
use crate::forms::{Form, Submission, WizardForm};
use crate::keys::{map_key, Action};
use crate::loader::Loader;
use crate::nav::View;
use crate::notifications::{NotificationCenter, NotificationLevel};
use crate::theme::SynthBruteTheme;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use outreach_core::{
    actions_for, Acknowledgement, AutomationAction, AutomationConfig, AutomationWizard, BatchIds,
    Campaign, Company, CompanyFilter, DetailedAnalytics, EmailAccount, EntityId, Identified,
    IntentType, ItemFilter, LeadFilter, LeadSummary, ListLeadsQuery, ListMessagesQuery,
    ListProductsQuery, Message, MessageFilter, MessageType, NoFilter, OpenedCompany, Page,
    Product, ProductAnalytics, ProductCompany, QualifiedLead, ReplyEntry, ReplySource,
    SettingsBundle, StoppedCompany, Template, WizardNav,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tui_textarea::TextArea;

/// Action label of the wizard's create/update request.
const SAVE_AUTOMATION: &str = "Save automation";

/// Reporting periods offered on the analytics page, in days.
pub const ANALYTICS_PERIODS: [u32; 3] = [7, 30, 90];

// ============================================================================
// PAGE STATE
// ============================================================================

#[derive(Debug, Default)]
pub struct DashboardState {
    pub overview: Resource<Overview>,
}

#[derive(Debug)]
pub struct CompaniesState {
    pub list: ListController<Company, CompanyFilter>,
    pub detail: Resource<Company>,
}

#[derive(Debug)]
pub struct CampaignsState {
    pub list: ListController<Campaign, NoFilter>,
    pub detail: Resource<Campaign>,
}

#[derive(Debug)]
pub struct MessagesState {
    pub list: ListController<Message, MessageFilter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadsTab {
    Replies,
    Qualified,
    Opened,
    Stopped,
}

impl LeadsTab {
    pub fn title(&self) -> &'static str {
        match self {
            LeadsTab::Replies => "Replies",
            LeadsTab::Qualified => "Qualified",
            LeadsTab::Opened => "Opened",
            LeadsTab::Stopped => "Stopped",
        }
    }

    pub fn all() -> &'static [LeadsTab] {
        &[
            LeadsTab::Replies,
            LeadsTab::Qualified,
            LeadsTab::Opened,
            LeadsTab::Stopped,
        ]
    }
}

#[derive(Debug)]
pub struct LeadsState {
    pub tab: LeadsTab,
    pub filter: LeadFilter,
    pub replies: Resource<Vec<ReplyEntry>>,
    pub qualified: Resource<Vec<LeadSummary>>,
    pub opened: ListController<OpenedCompany, NoFilter>,
    pub stopped: ListController<StoppedCompany, NoFilter>,
    /// Cursor for the replies and qualified tabs.
    pub cursor: usize,
}

impl LeadsState {
    pub fn visible_replies(&self) -> Vec<&ReplyEntry> {
        match &self.replies.data {
            Some(replies) => ItemFilter::<ReplyEntry>::apply(&self.filter, replies),
            None => Vec::new(),
        }
    }

    pub fn visible_qualified(&self) -> Vec<&LeadSummary> {
        match &self.qualified.data {
            Some(leads) => ItemFilter::<LeadSummary>::apply(&self.filter, leads),
            None => Vec::new(),
        }
    }

    fn move_cursor(&mut self, down: bool) {
        match self.tab {
            LeadsTab::Opened => step(&mut self.opened, down),
            LeadsTab::Stopped => step(&mut self.stopped, down),
            LeadsTab::Replies | LeadsTab::Qualified => {
                let len = match self.tab {
                    LeadsTab::Replies => self.visible_replies().len(),
                    _ => self.visible_qualified().len(),
                };
                self.cursor = wrap(self.cursor, len, down);
            }
        }
    }

    /// Source filter cycles all → Email → WhatsApp.
    fn cycle_source(&mut self) {
        self.filter.source = match self.filter.source {
            None => Some(ReplySource::Email),
            Some(ReplySource::Email) => Some(ReplySource::WhatsApp),
            Some(ReplySource::WhatsApp) => None,
        };
        self.cursor = 0;
    }
}

#[derive(Debug)]
pub struct AutomationState {
    pub list: ListController<AutomationConfig, NoFilter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductTab {
    Companies,
    Campaigns,
    Leads,
    Analytics,
}

impl ProductTab {
    pub fn title(&self) -> &'static str {
        match self {
            ProductTab::Companies => "Companies",
            ProductTab::Campaigns => "Campaigns",
            ProductTab::Leads => "Leads",
            ProductTab::Analytics => "Analytics",
        }
    }

    pub fn all() -> &'static [ProductTab] {
        &[
            ProductTab::Companies,
            ProductTab::Campaigns,
            ProductTab::Leads,
            ProductTab::Analytics,
        ]
    }
}

#[derive(Debug)]
pub struct ProductsState {
    pub list: ListController<Product, NoFilter>,
    pub active_only: bool,
    pub tab: ProductTab,
    /// Product whose companies, campaigns, leads and analytics are shown.
    pub focused: Option<EntityId>,
    pub companies: ListController<ProductCompany, NoFilter>,
    pub campaigns: ListController<Campaign, NoFilter>,
    pub leads: ListController<QualifiedLead, LeadFilter>,
    pub analytics: Resource<ProductAnalytics>,
}

impl ProductsState {
    pub fn focused_product(&self) -> Option<&Product> {
        let id = self.focused?;
        self.list.items.iter().find(|p| p.id == id)
    }
}

#[derive(Debug)]
pub struct TemplatesState {
    pub list: ListController<Template, NoFilter>,
    pub type_filter: Option<MessageType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsTab {
    General,
    Email,
    Notifications,
    Accounts,
}

impl SettingsTab {
    pub fn title(&self) -> &'static str {
        match self {
            SettingsTab::General => "General",
            SettingsTab::Email => "Email",
            SettingsTab::Notifications => "Notifications",
            SettingsTab::Accounts => "Email accounts",
        }
    }

    pub fn all() -> &'static [SettingsTab] {
        &[
            SettingsTab::General,
            SettingsTab::Email,
            SettingsTab::Notifications,
            SettingsTab::Accounts,
        ]
    }
}

#[derive(Debug)]
pub struct SettingsState {
    pub tab: SettingsTab,
    pub bundle: Resource<SettingsBundle>,
    pub accounts: ListController<EmailAccount, NoFilter>,
}

#[derive(Debug)]
pub struct AnalyticsState {
    pub days: u32,
    pub data: Resource<DetailedAnalytics>,
}

// ============================================================================
// MODALS
// ============================================================================

/// Destructive request waiting for confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    DeleteCompanies(BatchIds),
    DeleteCampaigns(BatchIds),
    DeleteMessages(BatchIds),
    DeleteAutomation(EntityId),
    DeleteTemplate(EntityId),
    DeleteProduct(EntityId),
}

pub enum Modal {
    Help,
    Alert { title: String, message: String },
    Confirm {
        title: String,
        message: String,
        action: PendingAction,
    },
    CompanyDetail,
    CampaignDetail,
    Form(Form),
    Wizard(WizardForm),
}

/// What to do with the top modal after a key.
enum ModalStep {
    Keep,
    Close,
    /// Keep the current modal and open another above it.
    Stack(Modal),
}

/// Search box open over a list page.
pub struct SearchBox {
    pub view: View,
    pub input: TextArea<'static>,
}

impl SearchBox {
    pub fn text(&self) -> String {
        self.input.lines().join(" ")
    }
}

// ============================================================================
// APP
// ============================================================================

pub struct App {
    pub config: TuiConfig,
    pub theme: SynthBruteTheme,
    pub active_view: View,
    pub loader: Loader,
    pub notifications: NotificationCenter,
    pub modals: Vec<Modal>,
    pub search: Option<SearchBox>,
    pub debouncer: SearchDebouncer,
    search_target: View,
    pub dashboard: DashboardState,
    pub companies: CompaniesState,
    pub campaigns: CampaignsState,
    pub messages: MessagesState,
    pub leads: LeadsState,
    pub automation: AutomationState,
    pub products: ProductsState,
    pub templates: TemplatesState,
    pub settings: SettingsState,
    pub analytics: AnalyticsState,
}

impl App {
    pub fn new(config: TuiConfig, api: Arc<dyn OutreachApi>, events: mpsc::Sender<TuiEvent>) -> Self {
        let page_size = config.page_size;
        Self {
            theme: SynthBruteTheme::synthbrute(),
            active_view: View::Dashboard,
            loader: Loader::new(api, events),
            notifications: NotificationCenter::new(config.toast_ttl()),
            modals: Vec::new(),
            search: None,
            debouncer: SearchDebouncer::new(config.search_debounce()),
            search_target: View::Companies,
            dashboard: DashboardState::default(),
            companies: CompaniesState {
                list: ListController::new(page_size),
                detail: Resource::default(),
            },
            campaigns: CampaignsState {
                list: ListController::new(page_size),
                detail: Resource::default(),
            },
            messages: MessagesState {
                list: ListController::new(page_size),
            },
            leads: LeadsState {
                tab: LeadsTab::Replies,
                filter: LeadFilter::default(),
                replies: Resource::default(),
                qualified: Resource::default(),
                opened: ListController::new(page_size),
                stopped: ListController::new(page_size),
                cursor: 0,
            },
            automation: AutomationState {
                list: ListController::new(page_size),
            },
            products: ProductsState {
                list: ListController::new(page_size),
                active_only: false,
                tab: ProductTab::Companies,
                focused: None,
                companies: ListController::new(page_size),
                campaigns: ListController::new(page_size),
                leads: ListController::new(page_size),
                analytics: Resource::default(),
            },
            templates: TemplatesState {
                list: ListController::new(page_size),
                type_filter: None,
            },
            settings: SettingsState {
                tab: SettingsTab::General,
                bundle: Resource::default(),
                accounts: ListController::new(page_size),
            },
            analytics: AnalyticsState {
                days: ANALYTICS_PERIODS[1],
                data: Resource::default(),
            },
            config,
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(level, message);
    }

    pub fn alert(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.modals.push(Modal::Alert {
            title: title.into(),
            message: message.into(),
        });
    }

    /// Switch to `view` and fetch its data.
    pub fn open(&mut self, view: View) {
        if self.active_view != view {
            self.search = None;
        }
        self.active_view = view;
        tracing::debug!(path = view.path(), "opening view");
        self.refresh(view);
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    /// Apply one event. Returns true when the app should exit.
    pub fn handle_event(&mut self, event: TuiEvent) -> bool {
        match event {
            TuiEvent::Input(key) => return self.handle_key(key),
            TuiEvent::Tick => self.on_tick(Instant::now()),
            TuiEvent::Resize { .. } => {}
            TuiEvent::Loaded(loaded) => self.apply_loaded(*loaded),
            TuiEvent::Mutated(mutated) => self.apply_mutation(*mutated),
        }
        false
    }

    /// Fire a due search and expire toasts.
    pub fn on_tick(&mut self, now: Instant) {
        if let Some(term) = self.debouncer.poll(now) {
            self.apply_search(self.search_target, &term);
        }
        self.notifications.prune(now);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        if !self.modals.is_empty() {
            self.handle_modal_key(key);
            return false;
        }
        if self.search.is_some() {
            self.handle_search_key(key, Instant::now());
            return false;
        }
        match map_key(key) {
            Some(action) => self.handle_action(action),
            None => false,
        }
    }

    pub fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::NextView => self.open(self.active_view.next()),
            Action::PrevView => self.open(self.active_view.previous()),
            Action::SwitchView(index) => {
                if let Some(view) = View::from_index(index) {
                    self.open(view);
                }
            }
            Action::OpenHelp => self.modals.push(Modal::Help),
            Action::Refresh => self.refresh(self.active_view),
            Action::OpenSearch => self.open_search(),
            other => self.page_action(other),
        }
        false
    }

    // ------------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------------

    fn open_search(&mut self) {
        let current = match self.active_view {
            View::Companies => self.companies.list.search.clone(),
            View::Messages => self.messages.list.search.clone(),
            View::Products => self.products.list.search.clone(),
            _ => return,
        };
        let mut input = TextArea::new(vec![current]);
        input.move_cursor(tui_textarea::CursorMove::End);
        self.search = Some(SearchBox {
            view: self.active_view,
            input,
        });
    }

    /// Typing schedules a debounced search; Enter searches at once.
    pub fn handle_search_key(&mut self, key: KeyEvent, now: Instant) {
        let Some(search) = self.search.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.debouncer.cancel();
                self.search = None;
            }
            KeyCode::Enter => {
                let (view, term) = (search.view, search.text());
                self.debouncer.cancel();
                self.search = None;
                self.apply_search(view, &term);
            }
            _ => {
                if search.input.input(key) {
                    self.search_target = search.view;
                    self.debouncer.input(search.text(), now);
                }
            }
        }
    }

    pub fn apply_search(&mut self, view: View, term: &str) {
        tracing::debug!(view = view.title(), term, "search");
        match view {
            View::Companies => {
                let ticket = self.companies.list.search(term);
                self.load_companies(ticket);
            }
            View::Messages => {
                let ticket = self.messages.list.search(term);
                self.load_messages(ticket);
            }
            View::Products => {
                let ticket = self.products.list.search(term);
                self.load_products(ticket);
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------------
    // Page actions
    // ------------------------------------------------------------------------

    fn page_action(&mut self, action: Action) {
        match self.active_view {
            View::Dashboard | View::Analytics => self.analytics_action(action),
            View::Companies => self.companies_action(action),
            View::Campaigns => self.campaigns_action(action),
            View::Messages => self.messages_action(action),
            View::Leads => self.leads_action(action),
            View::Automation => self.automation_action(action),
            View::Products => self.products_action(action),
            View::Templates => self.templates_action(action),
            View::Settings => self.settings_action(action),
        }
    }

    fn companies_action(&mut self, action: Action) {
        let list = &mut self.companies.list;
        match action {
            Action::MoveUp => list.move_up(),
            Action::MoveDown => list.move_down(),
            Action::ToggleRow => {
                list.toggle_row();
            }
            Action::SelectAll => list.toggle_select_all(),
            Action::PrevPage => {
                if let Some(ticket) = list.prev_page() {
                    self.load_companies(ticket);
                }
            }
            Action::NextPage => {
                if let Some(ticket) = list.next_page() {
                    self.load_companies(ticket);
                }
            }
            Action::Confirm => self.open_company_detail(),
            Action::EditItem => {
                if let Some(company) = list.selected() {
                    let form = Form::edit_company(company);
                    self.modals.push(Modal::Form(form));
                }
            }
            Action::NewItem => self.modals.push(Modal::Form(Form::fetch_companies())),
            Action::OpenFilters => {
                let form = Form::company_filter(&list.filter);
                self.modals.push(Modal::Form(form));
            }
            Action::DeleteSelected => match list.batch_targets() {
                Ok(ids) => self.confirm(
                    "Delete companies",
                    format!("Delete {} selected companies and their messages?", ids.ids.len()),
                    PendingAction::DeleteCompanies(ids),
                ),
                Err(_) => self.notify(NotificationLevel::Warning, "Select companies first"),
            },
            Action::Export => self.export(View::Companies, ExportKind::Companies),
            Action::Cancel => {
                if !list.selection.is_empty() {
                    list.selection.clear();
                } else {
                    list.set_filter(CompanyFilter::default());
                }
            }
            _ => {}
        }
    }

    fn campaigns_action(&mut self, action: Action) {
        let list = &mut self.campaigns.list;
        match action {
            Action::MoveUp => list.move_up(),
            Action::MoveDown => list.move_down(),
            Action::ToggleRow => {
                list.toggle_row();
            }
            Action::SelectAll => list.toggle_select_all(),
            Action::Confirm => self.open_campaign_detail(),
            Action::NewItem => self.modals.push(Modal::Form(Form::generate_campaign())),
            Action::Start | Action::Send => {
                let Some(id) = list.selected_id() else {
                    return;
                };
                let now = action == Action::Start;
                let label = if now { "Start campaign" } else { "Send campaign batch" };
                self.loader.mutate(View::Campaigns, label, move |api| async move {
                    let summary = if now {
                        api.start_campaign_now(id).await?
                    } else {
                        api.send_campaign_batch(id).await?
                    };
                    Ok::<_, ApiClientError>(MutationOutput::Done(summary.label()))
                });
            }
            Action::DeleteSelected => match list.batch_targets() {
                Ok(ids) => self.confirm(
                    "Delete campaigns",
                    format!("Delete {} selected campaigns?", ids.ids.len()),
                    PendingAction::DeleteCampaigns(ids),
                ),
                Err(_) => self.notify(NotificationLevel::Warning, "Select campaigns first"),
            },
            Action::Cancel => list.selection.clear(),
            _ => {}
        }
    }

    fn messages_action(&mut self, action: Action) {
        let list = &mut self.messages.list;
        match action {
            Action::MoveUp => list.move_up(),
            Action::MoveDown => list.move_down(),
            Action::ToggleRow => {
                list.toggle_row();
            }
            Action::SelectAll => list.toggle_select_all(),
            Action::PrevPage => {
                if let Some(ticket) = list.prev_page() {
                    self.load_messages(ticket);
                }
            }
            Action::NextPage => {
                if let Some(ticket) = list.next_page() {
                    self.load_messages(ticket);
                }
            }
            Action::OpenFilters => {
                let form = Form::message_filter(&list.filter);
                self.modals.push(Modal::Form(form));
            }
            Action::Send => {
                let Some(message) = list.selected() else {
                    return;
                };
                let (id, kind) = (message.id, message.message_type);
                self.loader.mutate(View::Messages, "Send message", move |api| async move {
                    let outcome = match kind {
                        MessageType::Whatsapp => api.send_whatsapp(id).await?,
                        _ => api.send_message(id).await?,
                    };
                    let text = if outcome.message.is_empty() {
                        format!("Message {} sent", id)
                    } else {
                        outcome.message
                    };
                    Ok::<_, ApiClientError>(MutationOutput::Done(text))
                });
            }
            Action::RetrySelected => match list.batch_targets() {
                Ok(ids) => self.loader.mutate(View::Messages, "Retry messages", move |api| async move {
                    let ack = api.retry_messages(&ids).await?;
                    Ok::<_, ApiClientError>(MutationOutput::Batch(ack_text(ack, "Retry queued")))
                }),
                Err(_) => self.notify(NotificationLevel::Warning, "Select messages first"),
            },
            Action::DeleteSelected => match list.batch_targets() {
                Ok(ids) => self.confirm(
                    "Delete messages",
                    format!("Delete {} selected messages?", ids.ids.len()),
                    PendingAction::DeleteMessages(ids),
                ),
                Err(_) => self.notify(NotificationLevel::Warning, "Select messages first"),
            },
            Action::Export => self.export(View::Messages, ExportKind::Messages),
            Action::Cancel => list.selection.clear(),
            _ => {}
        }
    }

    fn leads_action(&mut self, action: Action) {
        let leads = &mut self.leads;
        match action {
            Action::MoveUp => leads.move_cursor(false),
            Action::MoveDown => leads.move_cursor(true),
            Action::MoveLeft | Action::MoveRight => {
                let tabs = LeadsTab::all();
                let index = tabs.iter().position(|t| *t == leads.tab).unwrap_or(0);
                leads.tab = tabs[cycle(index, tabs.len(), action == Action::MoveRight)];
                leads.cursor = 0;
            }
            Action::OpenFilters => leads.cycle_source(),
            Action::PrevPage | Action::NextPage => {
                let forward = action == Action::NextPage;
                match leads.tab {
                    LeadsTab::Opened => {
                        if let Some(ticket) = page(&mut leads.opened, forward) {
                            self.load_opened(ticket);
                        }
                    }
                    LeadsTab::Stopped => {
                        if let Some(ticket) = page(&mut leads.stopped, forward) {
                            self.load_stopped(ticket);
                        }
                    }
                    _ => {}
                }
            }
            Action::Export => self.export(View::Leads, ExportKind::Leads),
            _ => {}
        }
    }

    fn automation_action(&mut self, action: Action) {
        let list = &mut self.automation.list;
        let trigger = match action {
            Action::Start => Some(AutomationAction::Start),
            Action::Pause => Some(AutomationAction::Pause),
            Action::Resume => Some(AutomationAction::Resume),
            Action::RunNow => Some(AutomationAction::RunNow),
            Action::Restart => Some(AutomationAction::Restart),
            _ => None,
        };
        if let Some(trigger) = trigger {
            if let Some(config) = list.selected().cloned() {
                self.run_automation(&config, trigger);
            }
            return;
        }
        match action {
            Action::MoveUp => list.move_up(),
            Action::MoveDown => list.move_down(),
            Action::NewItem => {
                let wizard = WizardForm::new(AutomationWizard::new());
                self.modals.push(Modal::Wizard(wizard));
            }
            Action::EditItem | Action::Confirm => {
                if let Some(config) = list.selected() {
                    let wizard = WizardForm::new(AutomationWizard::edit(config));
                    self.modals.push(Modal::Wizard(wizard));
                }
            }
            Action::DeleteSelected => {
                if let Some(config) = list.selected() {
                    let message = format!("Delete automation {}?", config.display_name());
                    let id = config.id;
                    self.confirm("Delete automation", message, PendingAction::DeleteAutomation(id));
                }
            }
            _ => {}
        }
    }

    /// Call the action's endpoint when the config's status offers it.
    pub fn run_automation(&mut self, config: &AutomationConfig, action: AutomationAction) {
        if !actions_for(&config.status).contains(&action) {
            self.notify(
                NotificationLevel::Warning,
                format!("{} is not available for a {} automation", action, config.status),
            );
            return;
        }
        let id = config.id;
        self.loader.mutate(View::Automation, action.label(), move |api| async move {
            api.automation_action(id, action).await?;
            Ok::<_, ApiClientError>(MutationOutput::Done(action.done_message().to_string()))
        });
    }

    fn products_action(&mut self, action: Action) {
        let products = &mut self.products;
        match action {
            Action::MoveUp => products.list.move_up(),
            Action::MoveDown => products.list.move_down(),
            Action::MoveLeft | Action::MoveRight => {
                let tabs = ProductTab::all();
                let index = tabs.iter().position(|t| *t == products.tab).unwrap_or(0);
                products.tab = tabs[cycle(index, tabs.len(), action == Action::MoveRight)];
            }
            Action::PrevPage | Action::NextPage => {
                if let Some(ticket) = page(&mut products.list, action == Action::NextPage) {
                    self.load_products(ticket);
                }
            }
            Action::Confirm => {
                if let Some(id) = products.list.selected_id() {
                    self.focus_product(id);
                }
            }
            Action::OpenFilters => {
                if products.tab == ProductTab::Leads && products.focused.is_some() {
                    products.leads.filter.intent = next_intent(products.leads.filter.intent);
                    let ticket = products.leads.begin_load(1, None);
                    self.load_product_leads(ticket);
                } else {
                    products.active_only = !products.active_only;
                    let ticket = products.list.begin_load(1, Some(&products.list.search.clone()));
                    self.load_products(ticket);
                }
            }
            Action::NewItem => match products.focused {
                Some(id) if products.tab == ProductTab::Campaigns => {
                    let name = products
                        .focused_product()
                        .map(|p| p.name.clone())
                        .unwrap_or_else(|| format!("product #{}", id));
                    let form = Form::generate_product_campaign(id, &name);
                    self.modals.push(Modal::Form(form));
                }
                _ => self.modals.push(Modal::Form(Form::new_product())),
            },
            Action::EditItem => {
                if let Some(product) = products.list.selected() {
                    let form = Form::edit_product(product);
                    self.modals.push(Modal::Form(form));
                }
            }
            Action::Send => {
                if let Some(product) = products.list.selected() {
                    let form = Form::fetch_clients(product);
                    self.modals.push(Modal::Form(form));
                }
            }
            Action::DeleteSelected => {
                if let Some(product) = products.list.selected() {
                    let message = format!("Delete product {}?", product.name);
                    let id = product.id;
                    self.confirm("Delete product", message, PendingAction::DeleteProduct(id));
                }
            }
            _ => {}
        }
    }

    fn templates_action(&mut self, action: Action) {
        let templates = &mut self.templates;
        match action {
            Action::MoveUp => templates.list.move_up(),
            Action::MoveDown => templates.list.move_down(),
            Action::OpenFilters => {
                templates.type_filter = match templates.type_filter {
                    None => Some(MessageType::Email),
                    Some(MessageType::Email) => Some(MessageType::Whatsapp),
                    Some(_) => None,
                };
                let ticket = templates.list.begin_load(1, None);
                self.load_templates(ticket);
            }
            Action::NewItem => self.modals.push(Modal::Form(Form::new_template())),
            Action::EditItem | Action::Confirm => {
                if let Some(template) = templates.list.selected() {
                    let form = Form::edit_template(template);
                    self.modals.push(Modal::Form(form));
                }
            }
            Action::DeleteSelected => {
                if let Some(template) = templates.list.selected() {
                    let message = format!("Delete template {}?", template.name);
                    let id = template.id;
                    self.confirm("Delete template", message, PendingAction::DeleteTemplate(id));
                }
            }
            Action::Sync => self.loader.mutate(View::Templates, "Sync templates", |api| async move {
                let ack = api.sync_templates().await?;
                Ok::<_, ApiClientError>(MutationOutput::Done(ack_text(ack, "Templates synced")))
            }),
            _ => {}
        }
    }

    fn settings_action(&mut self, action: Action) {
        let settings = &mut self.settings;
        match action {
            Action::MoveLeft | Action::MoveRight => {
                let tabs = SettingsTab::all();
                let index = tabs.iter().position(|t| *t == settings.tab).unwrap_or(0);
                settings.tab = tabs[cycle(index, tabs.len(), action == Action::MoveRight)];
            }
            Action::MoveUp if settings.tab == SettingsTab::Accounts => settings.accounts.move_up(),
            Action::MoveDown if settings.tab == SettingsTab::Accounts => {
                settings.accounts.move_down()
            }
            Action::PrevPage | Action::NextPage if settings.tab == SettingsTab::Accounts => {
                if let Some(ticket) = page(&mut settings.accounts, action == Action::NextPage) {
                    self.load_email_accounts(ticket);
                }
            }
            Action::EditItem | Action::Confirm => {
                let Some(bundle) = settings.bundle.data.as_ref() else {
                    return;
                };
                let form = match settings.tab {
                    SettingsTab::General => Form::general_settings(bundle),
                    SettingsTab::Email => Form::email_settings(bundle),
                    SettingsTab::Notifications => Form::notification_settings(bundle),
                    SettingsTab::Accounts => return,
                };
                self.modals.push(Modal::Form(form));
            }
            Action::TestEmail => self.modals.push(Modal::Form(Form::test_email())),
            Action::NewItem => self.modals.push(Modal::Form(Form::upsert_setting())),
            _ => {}
        }
    }

    /// The dashboard only refreshes; analytics also cycles its period.
    fn analytics_action(&mut self, action: Action) {
        if self.active_view != View::Analytics {
            return;
        }
        if let Action::MoveLeft | Action::MoveRight = action {
            let index = ANALYTICS_PERIODS
                .iter()
                .position(|d| *d == self.analytics.days)
                .unwrap_or(0);
            let next = cycle(index, ANALYTICS_PERIODS.len(), action == Action::MoveRight);
            self.analytics.days = ANALYTICS_PERIODS[next];
            self.load_analytics();
        }
    }

    fn confirm(&mut self, title: &str, message: String, action: PendingAction) {
        self.modals.push(Modal::Confirm {
            title: title.to_string(),
            message,
            action,
        });
    }

    fn open_company_detail(&mut self) {
        let Some(id) = self.companies.list.selected_id() else {
            return;
        };
        let detail = &mut self.companies.detail;
        if detail.data.as_ref().map(Identified::id) != Some(id) {
            detail.data = None;
        }
        let generation = detail.begin();
        self.modals.push(Modal::CompanyDetail);
        self.loader.load(
            move |api| async move { api.get_company(id).await },
            move |result| Loaded::CompanyDetail(generation, result),
        );
    }

    fn open_campaign_detail(&mut self) {
        let Some(id) = self.campaigns.list.selected_id() else {
            return;
        };
        let detail = &mut self.campaigns.detail;
        if detail.data.as_ref().map(Identified::id) != Some(id) {
            detail.data = None;
        }
        let generation = detail.begin();
        self.modals.push(Modal::CampaignDetail);
        self.loader.load(
            move |api| async move { api.get_campaign(id).await },
            move |result| Loaded::CampaignDetail(generation, result),
        );
    }

    fn focus_product(&mut self, id: EntityId) {
        self.products.focused = Some(id);
        let ticket = self.products.companies.begin_load(1, None);
        self.load_product_companies(ticket);
        let ticket = self.products.campaigns.begin_load(1, None);
        self.load_product_campaigns(ticket);
        let ticket = self.products.leads.begin_load(1, None);
        self.load_product_leads(ticket);
        let generation = self.products.analytics.begin();
        self.loader.load(
            move |api| async move { api.product_analytics(id).await },
            move |result| Loaded::ProductAnalytics(generation, result),
        );
    }

    fn export(&self, view: View, kind: ExportKind) {
        let dir = PathBuf::from(&self.config.export_dir);
        self.loader.mutate(view, "Export", move |api| async move {
            let bytes = api.export_csv(kind).await?;
            let path = save_export(&dir, kind, &bytes)?;
            Ok::<_, ApiClientError>(MutationOutput::Exported(path))
        });
    }

    // ------------------------------------------------------------------------
    // Modals
    // ------------------------------------------------------------------------

    fn handle_modal_key(&mut self, key: KeyEvent) {
        let Some(mut modal) = self.modals.pop() else {
            return;
        };
        match self.modal_key(&mut modal, key) {
            ModalStep::Keep => self.modals.push(modal),
            ModalStep::Close => {}
            ModalStep::Stack(next) => {
                self.modals.push(modal);
                self.modals.push(next);
            }
        }
    }

    fn modal_key(&mut self, modal: &mut Modal, key: KeyEvent) -> ModalStep {
        let closing = matches!(key.code, KeyCode::Esc | KeyCode::Char('q'));
        match modal {
            Modal::Help | Modal::Alert { .. } => match key.code {
                KeyCode::Enter => ModalStep::Close,
                _ if closing => ModalStep::Close,
                _ => ModalStep::Keep,
            },
            Modal::Confirm { action, .. } => match key.code {
                KeyCode::Enter | KeyCode::Char('y') => {
                    self.execute(action.clone());
                    ModalStep::Close
                }
                KeyCode::Char('n') => ModalStep::Close,
                _ if closing => ModalStep::Close,
                _ => ModalStep::Keep,
            },
            Modal::CompanyDetail => match key.code {
                KeyCode::Char('e') => match self.companies.detail.data.as_ref() {
                    Some(company) => ModalStep::Stack(Modal::Form(Form::edit_company(company))),
                    None => ModalStep::Keep,
                },
                KeyCode::Enter => ModalStep::Close,
                _ if closing => ModalStep::Close,
                _ => ModalStep::Keep,
            },
            Modal::CampaignDetail => match key.code {
                KeyCode::Enter => ModalStep::Close,
                _ if closing => ModalStep::Close,
                _ => ModalStep::Keep,
            },
            Modal::Form(form) => match key.code {
                KeyCode::Esc => ModalStep::Close,
                KeyCode::Tab | KeyCode::Down => {
                    form.focus_next();
                    ModalStep::Keep
                }
                KeyCode::BackTab | KeyCode::Up => {
                    form.focus_prev();
                    ModalStep::Keep
                }
                KeyCode::Enter => match form.submission() {
                    Ok(submission) => {
                        self.submit(submission);
                        ModalStep::Close
                    }
                    Err(err) => {
                        form.error = Some(err.to_string());
                        ModalStep::Keep
                    }
                },
                _ => {
                    form.input(key);
                    ModalStep::Keep
                }
            },
            Modal::Wizard(wizard) => self.wizard_key(wizard, key),
        }
    }

    fn wizard_key(&mut self, wizard: &mut WizardForm, key: KeyEvent) -> ModalStep {
        // Input is frozen until the save result arrives.
        if wizard.wizard.is_submitting() {
            return ModalStep::Keep;
        }
        match key.code {
            KeyCode::Esc => match wizard.back() {
                WizardNav::Cancelled => ModalStep::Close,
                _ => ModalStep::Keep,
            },
            KeyCode::Tab | KeyCode::Down => {
                wizard.form.focus_next();
                ModalStep::Keep
            }
            KeyCode::BackTab | KeyCode::Up => {
                wizard.form.focus_prev();
                ModalStep::Keep
            }
            KeyCode::Enter => {
                wizard.form.error = None;
                match wizard.next() {
                    Ok(WizardNav::Submit) => match wizard.wizard.begin_submit() {
                        Ok(request) => {
                            let editing = wizard.wizard.editing;
                            self.loader.mutate(View::Automation, SAVE_AUTOMATION, move |api| async move {
                                let saved = match editing {
                                    Some(id) => api.update_automation(id, &request).await?,
                                    None => api.create_automation(&request).await?,
                                };
                                Ok::<_, ApiClientError>(MutationOutput::Done(format!(
                                    "Automation {} saved",
                                    saved.display_name()
                                )))
                            });
                        }
                        Err(err) => wizard.form.error = Some(err.to_string()),
                    },
                    Ok(_) => {}
                    Err(err) => wizard.form.error = Some(err.to_string()),
                }
                ModalStep::Keep
            }
            _ => {
                wizard.form.input(key);
                ModalStep::Keep
            }
        }
    }

    /// Act on a validated form.
    pub fn submit(&mut self, submission: Submission) {
        match submission {
            Submission::UpdateCompany(id, update) => {
                self.loader.mutate(View::Companies, "Update company", move |api| async move {
                    api.update_company(id, &update)
                        .await
                        .map(MutationOutput::CompanyUpdated)
                })
            }
            Submission::FetchCompanies(request) => {
                self.loader.mutate(View::Companies, "Fetch companies", move |api| async move {
                    let response = api.fetch_companies(&request).await?;
                    Ok::<_, ApiClientError>(MutationOutput::Done(format!(
                        "Fetched {} companies",
                        response.companies_fetched
                    )))
                })
            }
            Submission::CompanyFilter(filter) => self.companies.list.set_filter(filter),
            Submission::MessageFilter(filter) => {
                let list = &mut self.messages.list;
                list.set_filter(filter);
                let search = list.search.clone();
                let ticket = list.begin_load(1, Some(&search));
                self.load_messages(ticket);
            }
            Submission::GenerateCampaign(request) => {
                self.loader.mutate(View::Campaigns, "Generate campaign", move |api| async move {
                    let campaign = api.generate_campaign(&request).await?;
                    Ok::<_, ApiClientError>(MutationOutput::Done(format!(
                        "Campaign {} generated",
                        campaign.name
                    )))
                })
            }
            Submission::CreateTemplate(request) => {
                self.loader.mutate(View::Templates, "Create template", move |api| async move {
                    let template = api.create_template(&request).await?;
                    Ok::<_, ApiClientError>(MutationOutput::Done(format!(
                        "Template {} created",
                        template.name
                    )))
                })
            }
            Submission::UpdateTemplate(id, request) => {
                self.loader.mutate(View::Templates, "Update template", move |api| async move {
                    let template = api.update_template(id, &request).await?;
                    Ok::<_, ApiClientError>(MutationOutput::Done(format!(
                        "Template {} updated",
                        template.name
                    )))
                })
            }
            Submission::CreateProduct(request) => {
                self.loader.mutate(View::Products, "Create product", move |api| async move {
                    let product = api.create_product(&request).await?;
                    Ok::<_, ApiClientError>(MutationOutput::Done(format!(
                        "Product {} created",
                        product.name
                    )))
                })
            }
            Submission::UpdateProduct(id, request) => {
                self.loader.mutate(View::Products, "Update product", move |api| async move {
                    let product = api.update_product(id, &request).await?;
                    Ok::<_, ApiClientError>(MutationOutput::Done(format!(
                        "Product {} updated",
                        product.name
                    )))
                })
            }
            Submission::GenerateProductCampaign(id, request) => {
                self.loader.mutate(View::Products, "Generate campaign", move |api| async move {
                    let campaign = api.generate_product_campaign(id, &request).await?;
                    Ok::<_, ApiClientError>(MutationOutput::Done(format!(
                        "Campaign {} generated with {} messages",
                        campaign.name,
                        campaign.messages.len()
                    )))
                })
            }
            Submission::FetchClients(id, request) => {
                self.loader.mutate(View::Products, "Fetch clients", move |api| async move {
                    let response = api.fetch_product_clients(id, &request).await?;
                    Ok::<_, ApiClientError>(MutationOutput::Done(format!(
                        "Fetched {} companies",
                        response.companies_fetched
                    )))
                })
            }
            Submission::GeneralSettings(update) => {
                self.loader.mutate(View::Settings, "Save settings", move |api| async move {
                    let ack = api.update_general_settings(&update).await?;
                    Ok::<_, ApiClientError>(MutationOutput::Done(ack_text(ack, "Settings saved")))
                })
            }
            Submission::EmailSettings(update) => {
                self.loader.mutate(View::Settings, "Save settings", move |api| async move {
                    let ack = api.update_email_settings(&update).await?;
                    Ok::<_, ApiClientError>(MutationOutput::Done(ack_text(ack, "Settings saved")))
                })
            }
            Submission::NotificationSettings(update) => {
                self.loader.mutate(View::Settings, "Save settings", move |api| async move {
                    let ack = api.update_notification_settings(&update).await?;
                    Ok::<_, ApiClientError>(MutationOutput::Done(ack_text(ack, "Settings saved")))
                })
            }
            Submission::TestEmail(address) => {
                self.loader.mutate(View::Settings, "Test email", move |api| async move {
                    api.send_test_email(&address)
                        .await
                        .map(MutationOutput::TestEmail)
                })
            }
            Submission::UpsertSetting(setting) => {
                self.loader.mutate(View::Settings, "Save setting", move |api| async move {
                    let saved = api.upsert_setting(&setting).await?;
                    Ok::<_, ApiClientError>(MutationOutput::Done(format!("Saved {}", saved.key)))
                })
            }
        }
    }

    /// Run a confirmed destructive request.
    pub fn execute(&mut self, action: PendingAction) {
        match action {
            PendingAction::DeleteCompanies(ids) => {
                self.loader.mutate(View::Companies, "Delete companies", move |api| async move {
                    let ack = api.delete_companies(&ids).await?;
                    Ok::<_, ApiClientError>(MutationOutput::Batch(ack_text(ack, "Companies deleted")))
                })
            }
            PendingAction::DeleteCampaigns(ids) => {
                self.loader.mutate(View::Campaigns, "Delete campaigns", move |api| async move {
                    let ack = api.delete_campaigns(&ids).await?;
                    Ok::<_, ApiClientError>(MutationOutput::Batch(ack_text(ack, "Campaigns deleted")))
                })
            }
            PendingAction::DeleteMessages(ids) => {
                self.loader.mutate(View::Messages, "Delete messages", move |api| async move {
                    let ack = api.delete_messages(&ids).await?;
                    Ok::<_, ApiClientError>(MutationOutput::Batch(ack_text(ack, "Messages deleted")))
                })
            }
            PendingAction::DeleteAutomation(id) => {
                self.loader.mutate(View::Automation, "Delete automation", move |api| async move {
                    let ack = api.delete_automation(id).await?;
                    Ok::<_, ApiClientError>(MutationOutput::Done(ack_text(ack, "Automation deleted")))
                })
            }
            PendingAction::DeleteTemplate(id) => {
                self.loader.mutate(View::Templates, "Delete template", move |api| async move {
                    let ack = api.delete_template(id).await?;
                    Ok::<_, ApiClientError>(MutationOutput::Done(ack_text(ack, "Template deleted")))
                })
            }
            PendingAction::DeleteProduct(id) => {
                if self.products.focused == Some(id) {
                    self.products.focused = None;
                }
                self.loader.mutate(View::Products, "Delete product", move |api| async move {
                    let ack = api.delete_product(id).await?;
                    Ok::<_, ApiClientError>(MutationOutput::Done(ack_text(ack, "Product deleted")))
                })
            }
        }
    }

    // ------------------------------------------------------------------------
    // Results
    // ------------------------------------------------------------------------

    pub fn apply_loaded(&mut self, loaded: Loaded) {
        match loaded {
            Loaded::Overview(generation, result) => {
                self.dashboard.overview.complete(generation, result);
            }
            Loaded::Companies(ticket, result) => {
                self.companies.list.complete_load(&ticket, result);
            }
            Loaded::CompanyDetail(generation, result) => {
                if self.companies.detail.complete(generation, result) == LoadOutcome::Applied {
                    if let Some(company) = self.companies.detail.data.clone() {
                        self.companies.list.merge(company);
                    }
                }
            }
            Loaded::Campaigns(ticket, result) => {
                self.campaigns.list.complete_load(&ticket, result);
            }
            Loaded::CampaignDetail(generation, result) => {
                if self.campaigns.detail.complete(generation, result) == LoadOutcome::Applied {
                    if let Some(campaign) = self.campaigns.detail.data.clone() {
                        self.campaigns.list.merge(campaign);
                    }
                }
            }
            Loaded::Messages(ticket, result) => {
                self.messages.list.complete_load(&ticket, result);
            }
            Loaded::Replies(generation, result) => {
                self.leads.replies.complete(generation, result);
            }
            Loaded::QualifiedLeads(generation, result) => {
                self.leads.qualified.complete(generation, result);
            }
            Loaded::OpenedCompanies(ticket, result) => {
                self.leads.opened.complete_load(&ticket, result);
            }
            Loaded::StoppedCompanies(ticket, result) => {
                self.leads.stopped.complete_load(&ticket, result);
            }
            Loaded::Automations(ticket, result) => {
                self.automation.list.complete_load(&ticket, result);
            }
            Loaded::Products(ticket, result) => {
                self.products.list.complete_load(&ticket, result);
            }
            Loaded::ProductCompanies(ticket, result) => {
                self.products.companies.complete_load(&ticket, result);
            }
            Loaded::ProductCampaigns(ticket, result) => {
                self.products.campaigns.complete_load(&ticket, result);
            }
            Loaded::ProductLeads(ticket, result) => {
                self.products.leads.complete_load(&ticket, result);
            }
            Loaded::ProductAnalytics(generation, result) => {
                self.products.analytics.complete(generation, result);
            }
            Loaded::Templates(ticket, result) => {
                self.templates.list.complete_load(&ticket, result);
            }
            Loaded::Settings(generation, result) => {
                self.settings.bundle.complete(generation, result);
            }
            Loaded::EmailAccounts(ticket, result) => {
                self.settings.accounts.complete_load(&ticket, result);
            }
            Loaded::Analytics(generation, result) => {
                self.analytics.data.complete(generation, result);
            }
        }
    }

    /// Successes toast and reload; failures raise a blocking alert.
    pub fn apply_mutation(&mut self, mutated: Mutated) {
        let Mutated {
            view,
            action,
            result,
        } = mutated;
        if action == SAVE_AUTOMATION {
            self.finish_wizard(result.is_ok());
        }
        match result {
            Ok(MutationOutput::Done(message)) => {
                self.notifications.success(message);
                self.reload_after(view, false);
            }
            Ok(MutationOutput::Batch(message)) => {
                self.notifications.success(message);
                self.reload_after(view, true);
            }
            Ok(MutationOutput::CompanyUpdated(company)) => {
                self.notifications.success(format!("{} updated", company.name));
                if self.companies.detail.data.as_ref().map(Identified::id) == Some(company.id) {
                    self.companies.detail.data = Some(company.clone());
                }
                self.companies.list.merge(company);
            }
            Ok(MutationOutput::Exported(path)) => {
                tracing::info!(path = %path.display(), "export written");
                self.notifications
                    .success(format!("Exported to {}", path.display()));
            }
            Ok(MutationOutput::TestEmail(outcome)) => {
                if outcome.success {
                    self.notifications.success(outcome.summary());
                } else {
                    self.alert("Test email failed", outcome.summary());
                }
            }
            Err(err) => {
                tracing::error!(view = view.title(), action, error = %err, "request failed");
                self.alert(format!("{} failed", action), err.user_message());
            }
        }
    }

    /// Close the wizard after a save, or re-enable it after a failure.
    fn finish_wizard(&mut self, saved: bool) {
        if saved {
            self.modals.retain(|m| !matches!(m, Modal::Wizard(_)));
            return;
        }
        for modal in self.modals.iter_mut() {
            if let Modal::Wizard(wizard) = modal {
                wizard.wizard.finish_submit();
            }
        }
    }

    fn reload_after(&mut self, view: View, batch: bool) {
        match view {
            View::Companies => {
                let ticket = reload(&mut self.companies.list, batch);
                self.load_companies(ticket);
            }
            View::Campaigns => {
                let ticket = reload(&mut self.campaigns.list, batch);
                self.load_campaigns(ticket);
            }
            View::Messages => {
                let ticket = reload(&mut self.messages.list, batch);
                self.load_messages(ticket);
            }
            other => self.refresh(other),
        }
    }

    // ------------------------------------------------------------------------
    // Fetches
    // ------------------------------------------------------------------------

    /// Fetch everything `view` shows, keeping its current page and search.
    pub fn refresh(&mut self, view: View) {
        match view {
            View::Dashboard => self.load_overview(),
            View::Companies => {
                let ticket = self.companies.list.reload();
                self.load_companies(ticket);
            }
            View::Campaigns => {
                let ticket = self.campaigns.list.reload();
                self.load_campaigns(ticket);
            }
            View::Messages => {
                let ticket = self.messages.list.reload();
                self.load_messages(ticket);
            }
            View::Leads => self.load_leads(),
            View::Automation => {
                let ticket = self.automation.list.reload();
                self.load_automations(ticket);
            }
            View::Products => {
                let ticket = self.products.list.reload();
                self.load_products(ticket);
                if let Some(id) = self.products.focused {
                    self.focus_product(id);
                }
            }
            View::Templates => {
                let ticket = self.templates.list.reload();
                self.load_templates(ticket);
            }
            View::Settings => {
                let generation = self.settings.bundle.begin();
                self.loader.load(
                    |api| async move { api.get_settings().await },
                    move |result| Loaded::Settings(generation, result),
                );
                let ticket = self.settings.accounts.reload();
                self.load_email_accounts(ticket);
            }
            View::Analytics => self.load_analytics(),
        }
    }

    /// Stats and chart are joined; either failing drops both.
    fn load_overview(&mut self) {
        let generation = self.dashboard.overview.begin();
        self.loader.load(
            |api| async move {
                let (stats, chart) = tokio::try_join!(api.automation_stats(), api.chart_data())?;
                Ok::<_, ApiClientError>(Overview { stats, chart })
            },
            move |result| Loaded::Overview(generation, result),
        );
    }

    fn load_companies(&self, ticket: LoadTicket) {
        let request = ticket.request.clone();
        self.loader.load(
            move |api| async move { api.list_companies(&request).await },
            move |result| Loaded::Companies(ticket, result),
        );
    }

    fn load_campaigns(&self, ticket: LoadTicket) {
        self.loader.load(
            |api| async move { api.list_campaigns().await.map(Page::single) },
            move |result| Loaded::Campaigns(ticket, result),
        );
    }

    fn load_messages(&self, ticket: LoadTicket) {
        let filter = self.messages.list.filter;
        let query = ListMessagesQuery {
            page: ticket.request.clone(),
            message_type: filter.message_type,
            status: filter.status,
        };
        self.loader.load(
            move |api| async move { api.list_messages(&query).await },
            move |result| Loaded::Messages(ticket, result),
        );
    }

    fn load_leads(&mut self) {
        let generation = self.leads.replies.begin();
        self.loader.load(
            |api| async move { api.list_replies().await },
            move |result| Loaded::Replies(generation, result),
        );
        let generation = self.leads.qualified.begin();
        self.loader.load(
            |api| async move { api.qualified_leads().await },
            move |result| Loaded::QualifiedLeads(generation, result),
        );
        let ticket = self.leads.opened.reload();
        self.load_opened(ticket);
        let ticket = self.leads.stopped.reload();
        self.load_stopped(ticket);
    }

    fn load_opened(&self, ticket: LoadTicket) {
        let request = ticket.request.clone();
        self.loader.load(
            move |api| async move { api.opened_companies(&request).await },
            move |result| Loaded::OpenedCompanies(ticket, result),
        );
    }

    fn load_stopped(&self, ticket: LoadTicket) {
        let request = ticket.request.clone();
        self.loader.load(
            move |api| async move { api.stopped_companies(&request).await },
            move |result| Loaded::StoppedCompanies(ticket, result),
        );
    }

    fn load_automations(&self, ticket: LoadTicket) {
        self.loader.load(
            |api| async move { api.list_automations().await.map(Page::single) },
            move |result| Loaded::Automations(ticket, result),
        );
    }

    fn load_products(&self, ticket: LoadTicket) {
        let query = ListProductsQuery {
            page: ticket.request.clone(),
            active_only: self.products.active_only,
        };
        self.loader.load(
            move |api| async move { api.list_products(&query).await },
            move |result| Loaded::Products(ticket, result),
        );
    }

    fn load_product_companies(&self, ticket: LoadTicket) {
        let Some(id) = self.products.focused else {
            return;
        };
        let request = ticket.request.clone();
        self.loader.load(
            move |api| async move { api.product_companies(id, &request).await },
            move |result| Loaded::ProductCompanies(ticket, result),
        );
    }

    fn load_product_campaigns(&self, ticket: LoadTicket) {
        let Some(id) = self.products.focused else {
            return;
        };
        let request = ticket.request.clone();
        self.loader.load(
            move |api| async move { api.product_campaigns(id, &request).await },
            move |result| Loaded::ProductCampaigns(ticket, result),
        );
    }

    fn load_product_leads(&self, ticket: LoadTicket) {
        let Some(id) = self.products.focused else {
            return;
        };
        let query = ListLeadsQuery {
            page: ticket.request.clone(),
            intent: self.products.leads.filter.intent,
        };
        self.loader.load(
            move |api| async move { api.product_leads(id, &query).await },
            move |result| Loaded::ProductLeads(ticket, result),
        );
    }

    fn load_templates(&self, ticket: LoadTicket) {
        let kind = self.templates.type_filter;
        self.loader.load(
            move |api| async move { api.list_templates(kind).await.map(Page::single) },
            move |result| Loaded::Templates(ticket, result),
        );
    }

    fn load_email_accounts(&self, ticket: LoadTicket) {
        let request = ticket.request.clone();
        self.loader.load(
            move |api| async move { api.list_email_accounts(&request).await },
            move |result| Loaded::EmailAccounts(ticket, result),
        );
    }

    fn load_analytics(&mut self) {
        let generation = self.analytics.data.begin();
        let days = self.analytics.days;
        self.loader.load(
            move |api| async move { api.detailed_analytics(days).await },
            move |result| Loaded::Analytics(generation, result),
        );
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn ack_text(ack: Acknowledgement, fallback: &str) -> String {
    if ack.message.trim().is_empty() {
        fallback.to_string()
    } else {
        ack.message
    }
}

fn cycle(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        0
    } else if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

fn wrap(cursor: usize, len: usize, down: bool) -> usize {
    if len == 0 {
        0
    } else {
        cycle(cursor.min(len - 1), len, down)
    }
}

fn step<T: Identified, F: ItemFilter<T>>(list: &mut ListController<T, F>, down: bool) {
    if down {
        list.move_down();
    } else {
        list.move_up();
    }
}

fn page<T, F>(list: &mut ListController<T, F>, forward: bool) -> Option<LoadTicket> {
    if forward {
        list.next_page()
    } else {
        list.prev_page()
    }
}

fn reload<T: Identified, F>(list: &mut ListController<T, F>, clear_selection: bool) -> LoadTicket {
    if clear_selection {
        list.after_batch()
    } else {
        list.reload()
    }
}

fn next_intent(current: Option<IntentType>) -> Option<IntentType> {
    match current {
        None => Some(IntentType::Hot),
        Some(IntentType::Hot) => Some(IntentType::Warm),
        Some(IntentType::Warm) => Some(IntentType::Cold),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps_both_ways() {
        assert_eq!(cycle(3, 4, true), 0);
        assert_eq!(cycle(0, 4, false), 3);
        assert_eq!(cycle(0, 0, true), 0);
    }

    #[test]
    fn test_wrap_clamps_stale_cursor() {
        assert_eq!(wrap(9, 3, true), 0);
        assert_eq!(wrap(9, 3, false), 1);
        assert_eq!(wrap(2, 0, true), 0);
    }

    #[test]
    fn test_intent_filter_cycle_returns_to_all() {
        let mut intent = None;
        let mut seen = Vec::new();
        for _ in 0..4 {
            intent = next_intent(intent);
            seen.push(intent);
        }
        assert_eq!(
            seen,
            vec![
                Some(IntentType::Hot),
                Some(IntentType::Warm),
                Some(IntentType::Cold),
                None
            ]
        );
    }

    #[test]
    fn test_ack_text_falls_back_when_blank() {
        let blank = Acknowledgement {
            message: " ".to_string(),
        };
        assert_eq!(ack_text(blank, "Done"), "Done");
    }
}
