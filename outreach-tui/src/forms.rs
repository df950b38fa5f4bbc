//! Modal forms.
//!
//! A form is a column of labelled single-line inputs. `submission()` turns
//! the typed text into a validated request; forms never call the backend.

use crossterm::event::KeyEvent;
use outreach_core::{
    AutomationWizard, Company, CompanyFilter, CompanyForm, CompanyUpdate, EmailSettingsUpdate, EntityId,
    FetchClientsRequest, FetchCompaniesRequest, GenerateCampaignRequest,
    GenerateProductCampaignRequest, GeneralSettingsUpdate,
    MessageFilter, MessageType, NotificationSettingsUpdate, ParseEnumError, Product,
    ProductRequest, ReplyPresence, SettingUpsert, SettingsBundle, Template, TemplateRequest,
    ValidationError, ValidationResult, WizardNav, WizardStep,
};
use chrono::NaiveDate;
use std::str::FromStr;
use tui_textarea::TextArea;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    EditCompany(EntityId),
    FetchCompanies,
    CompanyFilter,
    MessageFilter,
    GenerateCampaign,
    NewTemplate,
    EditTemplate(EntityId),
    NewProduct,
    EditProduct(EntityId),
    FetchClients(EntityId),
    GenerateProductCampaign(EntityId),
    GeneralSettings,
    EmailSettings,
    NotificationSettings,
    TestEmail,
    UpsertSetting,
    /// Step inputs of the automation wizard, submitted through the wizard.
    AutomationWizard,
}

/// Validated outcome of a submitted form.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    UpdateCompany(EntityId, CompanyUpdate),
    FetchCompanies(FetchCompaniesRequest),
    CompanyFilter(CompanyFilter),
    MessageFilter(MessageFilter),
    GenerateCampaign(GenerateCampaignRequest),
    CreateTemplate(TemplateRequest),
    UpdateTemplate(EntityId, TemplateRequest),
    CreateProduct(ProductRequest),
    UpdateProduct(EntityId, ProductRequest),
    FetchClients(EntityId, FetchClientsRequest),
    GenerateProductCampaign(EntityId, GenerateProductCampaignRequest),
    GeneralSettings(GeneralSettingsUpdate),
    EmailSettings(EmailSettingsUpdate),
    NotificationSettings(NotificationSettingsUpdate),
    TestEmail(String),
    UpsertSetting(SettingUpsert),
}

pub struct FormField {
    pub label: &'static str,
    pub input: TextArea<'static>,
}

impl FormField {
    fn new(label: &'static str, value: &str) -> Self {
        let mut input = TextArea::new(vec![value.to_string()]);
        input.move_cursor(tui_textarea::CursorMove::End);
        Self { label, input }
    }

    fn masked(label: &'static str) -> Self {
        let mut field = Self::new(label, "");
        field.input.set_mask_char('*');
        field
    }

    pub fn text(&self) -> String {
        self.input.lines().join(" ").trim().to_string()
    }
}

pub struct Form {
    pub kind: FormKind,
    pub title: String,
    pub fields: Vec<FormField>,
    pub focus: usize,
    /// Validation message from the last submit attempt.
    pub error: Option<String>,
}

impl Form {
    fn new(kind: FormKind, title: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self {
            kind,
            title: title.into(),
            fields,
            focus: 0,
            error: None,
        }
    }

    fn plain(kind: FormKind, title: &str, fields: &[(&'static str, &str)]) -> Self {
        let fields = fields
            .iter()
            .map(|&(label, value)| FormField::new(label, value))
            .collect();
        Self::new(kind, title, fields)
    }

    pub fn edit_company(company: &Company) -> Self {
        let form = CompanyForm::from_company(company);
        Self::plain(
            FormKind::EditCompany(company.id),
            &format!("Edit {}", company.name),
            &[
                ("Name", form.name.as_str()),
                ("Industry", form.industry.as_str()),
                ("Country", form.country.as_str()),
                ("Email", form.email.as_str()),
                ("Phone", form.phone.as_str()),
                ("Website", form.website.as_str()),
            ],
        )
    }

    pub fn fetch_companies() -> Self {
        Self::plain(
            FormKind::FetchCompanies,
            "Fetch companies",
            &[("Industry", ""), ("Country", ""), ("Count", "10")],
        )
    }

    pub fn company_filter(current: &CompanyFilter) -> Self {
        let from = current.created_from.map(|d| d.to_string()).unwrap_or_default();
        let to = current.created_to.map(|d| d.to_string()).unwrap_or_default();
        Self::plain(
            FormKind::CompanyFilter,
            "Filter companies (this page)",
            &[
                ("Industry", current.industry.as_deref().unwrap_or_default()),
                ("Country", current.country.as_deref().unwrap_or_default()),
                ("Created from", from.as_str()),
                ("Created to", to.as_str()),
                ("Replies (any/replied/none)", current.replies.label()),
            ],
        )
    }

    pub fn message_filter(current: &MessageFilter) -> Self {
        let label = |v: Option<String>| v.unwrap_or_default();
        let kind = label(current.message_type.map(|t| t.to_string()));
        let status = label(current.status.map(|s| s.to_string()));
        let stage = label(current.stage.map(|s| s.to_string()));
        Self::plain(
            FormKind::MessageFilter,
            "Filter messages",
            &[("Type", kind.as_str()), ("Status", status.as_str()), ("Stage", stage.as_str())],
        )
    }

    pub fn generate_campaign() -> Self {
        Self::plain(
            FormKind::GenerateCampaign,
            "Generate campaign",
            &[
                ("Campaign name", ""),
                ("Industry", ""),
                ("Limit", "10"),
                ("Fetched on (YYYY-MM-DD)", ""),
            ],
        )
    }

    pub fn new_template() -> Self {
        Self::plain(
            FormKind::NewTemplate,
            "New template",
            &[
                ("Name", ""),
                ("Type", "EMAIL"),
                ("Subject", ""),
                ("Content", ""),
                ("Variables", ""),
            ],
        )
    }

    pub fn edit_template(template: &Template) -> Self {
        Self::plain(
            FormKind::EditTemplate(template.id),
            &format!("Edit {}", template.name),
            &[
                ("Name", template.name.as_str()),
                ("Type", template.template_type.as_str()),
                ("Subject", template.subject.as_deref().unwrap_or_default()),
                ("Content", template.content.as_str()),
                ("Variables", template.variables.as_deref().unwrap_or_default()),
            ],
        )
    }

    pub fn new_product() -> Self {
        Self::plain(
            FormKind::NewProduct,
            "New product",
            &[
                ("Name", ""),
                ("Short description", ""),
                ("Industry tags (comma separated)", ""),
                ("Brochure URL", ""),
            ],
        )
    }

    pub fn edit_product(product: &Product) -> Self {
        let tags = product.industry_tags.join(", ");
        Self::plain(
            FormKind::EditProduct(product.id),
            &format!("Edit {}", product.name),
            &[
                ("Name", product.name.as_str()),
                ("Short description", product.short_description.as_deref().unwrap_or_default()),
                ("Industry tags (comma separated)", tags.as_str()),
                ("Brochure URL", product.brochure_url.as_deref().unwrap_or_default()),
            ],
        )
    }

    pub fn fetch_clients(product: &Product) -> Self {
        Self::plain(
            FormKind::FetchClients(product.id),
            &format!("Fetch clients for {}", product.name),
            &[("Limit", "10"), ("Country", "")],
        )
    }

    pub fn generate_product_campaign(product_id: EntityId, product_name: &str) -> Self {
        Self::plain(
            FormKind::GenerateProductCampaign(product_id),
            &format!("Generate campaign for {}", product_name),
            &[
                ("Campaign name (optional)", ""),
                ("Limit", "10"),
                ("Email template id", ""),
                ("WhatsApp template id", ""),
                ("Fetched on (YYYY-MM-DD)", ""),
                ("Attach brochure (yes/no)", "yes"),
            ],
        )
    }

    pub fn general_settings(bundle: &SettingsBundle) -> Self {
        let g = &bundle.general;
        let v = |value: &Option<String>| value.clone().unwrap_or_default();
        Self::plain(
            FormKind::GeneralSettings,
            "General settings",
            &[
                ("Company name", v(&g.company_name).as_str()),
                ("Company website", v(&g.company_website).as_str()),
                ("Company description", v(&g.company_description).as_str()),
                ("Sender name", v(&g.sender_name).as_str()),
                ("Sender position", v(&g.sender_position).as_str()),
                ("Timezone", v(&g.timezone).as_str()),
                ("Language", v(&g.language).as_str()),
                ("Theme", v(&g.theme).as_str()),
            ],
        )
    }

    /// The stored password is masked server-side, so the field starts empty
    /// and is only sent when typed.
    pub fn email_settings(bundle: &SettingsBundle) -> Self {
        let e = &bundle.email;
        let fields = vec![
            FormField::new("SMTP server", &e.smtp_server),
            FormField::new("SMTP port", &e.smtp_port),
            FormField::new("SMTP username", &e.smtp_username),
            FormField::masked("SMTP password"),
            FormField::new("From email", &e.from_email),
            FormField::new("From name", &e.from_name),
        ];
        Self::new(FormKind::EmailSettings, "Email settings", fields)
    }

    pub fn notification_settings(bundle: &SettingsBundle) -> Self {
        let n = &bundle.notifications;
        let flag = |value: Option<bool>| match value {
            Some(true) => "yes",
            Some(false) => "no",
            None => "",
        };
        Self::plain(
            FormKind::NotificationSettings,
            "Notification settings",
            &[
                ("Email notifications", flag(n.email_notifications)),
                ("Reply notifications", flag(n.reply_notifications)),
                ("Daily reports", flag(n.daily_reports)),
                ("Weekly reports", flag(n.weekly_reports)),
            ],
        )
    }

    pub fn test_email() -> Self {
        Self::plain(FormKind::TestEmail, "Send test email", &[("Recipient", "")])
    }

    pub fn upsert_setting() -> Self {
        Self::plain(
            FormKind::UpsertSetting,
            "Set system value",
            &[("Key", ""), ("Value", ""), ("Description", "")],
        )
    }

    pub fn value(&self, index: usize) -> String {
        self.fields.get(index).map(FormField::text).unwrap_or_default()
    }

    /// Replace the text of field `index`.
    pub fn set_value(&mut self, index: usize, value: &str) {
        if let Some(field) = self.fields.get_mut(index) {
            *field = FormField::new(field.label, value);
        }
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Forward a key to the focused input.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        match self.fields.get_mut(self.focus) {
            Some(field) => field.input.input(key),
            None => false,
        }
    }

    pub fn submission(&self) -> ValidationResult<Submission> {
        let v = |i: usize| self.value(i);
        let submission = match self.kind {
            FormKind::EditCompany(id) => {
                let form = CompanyForm {
                    name: v(0),
                    industry: v(1),
                    country: v(2),
                    email: v(3),
                    phone: v(4),
                    website: v(5),
                };
                ValidationError::check_required("name", form.name.as_str())?;
                Submission::UpdateCompany(id, CompanyUpdate::from_form(&form))
            }
            FormKind::FetchCompanies => {
                let request = FetchCompaniesRequest::new(v(0), v(1), parse_int("count", &v(2))?);
                request.validate()?;
                Submission::FetchCompanies(request)
            }
            FormKind::CompanyFilter => {
                let mut filter = CompanyFilter::default().created_between(
                    parse_date("created_from", &v(2))?,
                    parse_date("created_to", &v(3))?,
                );
                filter.industry = non_blank(v(0));
                filter.country = non_blank(v(1));
                filter.replies = parse_presence(&v(4))?;
                if let (Some(from), Some(to)) = (filter.created_from, filter.created_to) {
                    if from > to {
                        return Err(ValidationError::InvalidOrder {
                            reason: format!("{} is after {}", from, to),
                        });
                    }
                }
                Submission::CompanyFilter(filter)
            }
            FormKind::MessageFilter => Submission::MessageFilter(MessageFilter {
                message_type: parse_enum("type", &v(0))?,
                status: parse_enum("status", &v(1))?,
                stage: parse_enum("stage", &v(2))?,
            }),
            FormKind::GenerateCampaign => {
                let mut request = GenerateCampaignRequest::new(v(1), v(0));
                request.limit = parse_int("limit", &v(2))?;
                request.fetched_on = non_blank(v(3));
                request.validate()?;
                Submission::GenerateCampaign(request)
            }
            FormKind::NewTemplate | FormKind::EditTemplate(_) => {
                let kind: MessageType = parse_enum("type", &v(1))?
                    .ok_or(ValidationError::RequiredFieldMissing { field: "type" })?;
                let request = TemplateRequest::new(&v(0), kind, &v(2), &v(3), &v(4));
                request.validate()?;
                match self.kind {
                    FormKind::EditTemplate(id) => Submission::UpdateTemplate(id, request),
                    _ => Submission::CreateTemplate(request),
                }
            }
            FormKind::NewProduct | FormKind::EditProduct(_) => {
                let request = ProductRequest::from_form(&v(0), &v(1), &v(2), &v(3));
                request.validate()?;
                match self.kind {
                    FormKind::EditProduct(id) => Submission::UpdateProduct(id, request),
                    _ => Submission::CreateProduct(request),
                }
            }
            FormKind::FetchClients(id) => {
                let request = FetchClientsRequest {
                    limit: parse_int("limit", &v(0))?,
                    country: non_blank(v(1)),
                };
                request.validate()?;
                Submission::FetchClients(id, request)
            }
            FormKind::GenerateProductCampaign(id) => {
                let request = GenerateProductCampaignRequest {
                    campaign_name: non_blank(v(0)),
                    limit: parse_int("limit", &v(1))?,
                    email_template_id: parse_id("email_template_id", &v(2))?,
                    whatsapp_template_id: parse_id("whatsapp_template_id", &v(3))?,
                    fetched_on: non_blank(v(4)),
                    attach_brochure: parse_flag("attach_brochure", &v(5))?.unwrap_or(true),
                };
                request.validate()?;
                Submission::GenerateProductCampaign(id, request)
            }
            FormKind::GeneralSettings => Submission::GeneralSettings(GeneralSettingsUpdate {
                company_name: non_blank(v(0)),
                company_website: non_blank(v(1)),
                company_description: non_blank(v(2)),
                sender_name: non_blank(v(3)),
                sender_position: non_blank(v(4)),
                timezone: non_blank(v(5)),
                language: non_blank(v(6)),
                theme: non_blank(v(7)),
            }),
            FormKind::EmailSettings => {
                let port = match non_blank(v(1)) {
                    Some(raw) => {
                        let port = parse_int("smtp_port", &raw)?;
                        ValidationError::check_range("smtp_port", port, 1, i64::from(u16::MAX))?;
                        Some(port as u16)
                    }
                    None => None,
                };
                Submission::EmailSettings(EmailSettingsUpdate {
                    smtp_server: non_blank(v(0)),
                    smtp_port: port,
                    smtp_username: non_blank(v(2)),
                    smtp_password: non_blank(v(3)),
                    from_email: non_blank(v(4)),
                    from_name: non_blank(v(5)),
                })
            }
            FormKind::NotificationSettings => {
                Submission::NotificationSettings(NotificationSettingsUpdate {
                    email_notifications: parse_flag("email_notifications", &v(0))?,
                    reply_notifications: parse_flag("reply_notifications", &v(1))?,
                    daily_reports: parse_flag("daily_reports", &v(2))?,
                    weekly_reports: parse_flag("weekly_reports", &v(3))?,
                })
            }
            FormKind::TestEmail => {
                let address = v(0);
                ValidationError::check_required("recipient", &address)?;
                if !address.contains('@') {
                    return Err(ValidationError::InvalidValue {
                        field: "recipient",
                        reason: format!("{} is not an email address", address),
                    });
                }
                Submission::TestEmail(address)
            }
            FormKind::UpsertSetting => {
                let key = v(0);
                ValidationError::check_required("key", &key)?;
                Submission::UpsertSetting(SettingUpsert {
                    key,
                    value: v(1),
                    description: non_blank(v(2)),
                })
            }
            FormKind::AutomationWizard => {
                return Err(ValidationError::InvalidValue {
                    field: "wizard",
                    reason: "wizard steps are submitted by the wizard".to_string(),
                })
            }
        };
        Ok(submission)
    }
}

// ============================================================================
// AUTOMATION WIZARD
// ============================================================================

/// The automation wizard with inputs for its current step.
pub struct WizardForm {
    pub wizard: AutomationWizard,
    pub form: Form,
}

impl WizardForm {
    pub fn new(wizard: AutomationWizard) -> Self {
        let form = Self::step_form(&wizard);
        Self { wizard, form }
    }

    fn step_form(wizard: &AutomationWizard) -> Form {
        let title = match wizard.editing {
            Some(_) => "Edit automation",
            None => "New automation",
        };
        let fields: Vec<(&'static str, String)> = match wizard.step() {
            WizardStep::Target => vec![
                ("Name", wizard.name.clone()),
                ("Industry", wizard.industry.clone()),
                ("Country", wizard.country.clone()),
                ("Companies per day", wizard.daily_limit.to_string()),
            ],
            WizardStep::Schedule => vec![
                ("Send hour", wizard.send_time_hour.to_string()),
                ("Send minute", wizard.send_time_minute.to_string()),
                ("Run for days", wizard.run_duration_days.to_string()),
                ("First follow-up day", wizard.followup_day_1.to_string()),
                ("Second follow-up day", wizard.followup_day_2.to_string()),
            ],
            WizardStep::Review => Vec::new(),
        };
        let fields = fields
            .into_iter()
            .map(|(label, value)| FormField::new(label, value.as_str()))
            .collect();
        Form::new(FormKind::AutomationWizard, title, fields)
    }

    /// Copy the inputs of the current step into the wizard.
    fn store(&mut self) -> ValidationResult<()> {
        let v = |i: usize| self.form.value(i);
        match self.wizard.step() {
            WizardStep::Target => {
                self.wizard.name = v(0);
                self.wizard.industry = v(1);
                self.wizard.country = v(2);
                self.wizard.daily_limit = parse_int("daily_limit", &v(3))?;
            }
            WizardStep::Schedule => {
                self.wizard.send_time_hour = parse_int("send_time_hour", &v(0))?;
                self.wizard.send_time_minute = parse_int("send_time_minute", &v(1))?;
                self.wizard.run_duration_days = parse_int("run_duration_days", &v(2))?;
                self.wizard.followup_day_1 = parse_int("followup_day_1", &v(3))?;
                self.wizard.followup_day_2 = parse_int("followup_day_2", &v(4))?;
            }
            WizardStep::Review => {}
        }
        Ok(())
    }

    pub fn next(&mut self) -> ValidationResult<WizardNav> {
        self.store()?;
        let nav = self.wizard.next()?;
        if let WizardNav::Moved(_) = nav {
            self.form = Self::step_form(&self.wizard);
        }
        Ok(nav)
    }

    /// Unparseable input is dropped when stepping back.
    pub fn back(&mut self) -> WizardNav {
        if let Err(err) = self.store() {
            tracing::debug!(error = %err, "discarding wizard input on back");
        }
        let nav = self.wizard.back();
        if let WizardNav::Moved(_) = nav {
            self.form = Self::step_form(&self.wizard);
        }
        nav
    }
}

// ============================================================================
// PARSING
// ============================================================================

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_int(field: &'static str, raw: &str) -> ValidationResult<i64> {
    raw.trim().parse::<i64>().map_err(|_| ValidationError::InvalidValue {
        field,
        reason: format!("expected a whole number, got '{}'", raw.trim()),
    })
}

fn parse_id(field: &'static str, raw: &str) -> ValidationResult<Option<EntityId>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_int(field, raw).map(Some)
}

fn parse_enum<T>(field: &'static str, raw: &str) -> ValidationResult<Option<T>>
where
    T: FromStr<Err = ParseEnumError>,
{
    if raw.trim().is_empty() {
        return Ok(None);
    }
    raw.parse::<T>()
        .map(Some)
        .map_err(|err| ValidationError::InvalidValue {
            field,
            reason: err.to_string(),
        })
}

fn parse_date(field: &'static str, raw: &str) -> ValidationResult<Option<NaiveDate>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::InvalidValue {
            field,
            reason: format!("expected YYYY-MM-DD, got {}", raw.trim()),
        })
}

fn parse_flag(field: &'static str, raw: &str) -> ValidationResult<Option<bool>> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "yes" | "y" | "true" | "on" => Ok(Some(true)),
        "no" | "n" | "false" | "off" => Ok(Some(false)),
        other => Err(ValidationError::InvalidValue {
            field,
            reason: format!("expected yes or no, got {}", other),
        }),
    }
}

fn parse_presence(raw: &str) -> ValidationResult<ReplyPresence> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "any" => Ok(ReplyPresence::Any),
        "replied" | "yes" | "with" => Ok(ReplyPresence::WithReplies),
        "none" | "no reply" | "no" | "without" => Ok(ReplyPresence::WithoutReplies),
        other => Err(ValidationError::InvalidValue {
            field: "replies",
            reason: format!("expected any, replied or none, got {}", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outreach_core::{MessageStage, MessageStatus};
    use outreach_test_utils::fixtures;

    #[test]
    fn test_company_edit_blanks_become_null() {
        let mut company = fixtures::company(4, "Retail", "UK");
        company.email = Some("sales@acme.test".to_string());
        let mut form = Form::edit_company(&company);
        form.set_value(3, "   ");

        match form.submission().unwrap() {
            Submission::UpdateCompany(id, update) => {
                assert_eq!(id, 4);
                assert_eq!(update.email, None);
                assert_eq!(update.industry.as_deref(), Some("Retail"));
            }
            other => panic!("unexpected submission {:?}", other),
        }
    }

    #[test]
    fn test_fetch_companies_bounds_count() {
        let mut form = Form::fetch_companies();
        form.set_value(0, "Technology");
        form.set_value(1, "USA");
        form.set_value(2, "5");
        assert_eq!(
            form.submission().unwrap(),
            Submission::FetchCompanies(FetchCompaniesRequest::new("Technology", "USA", 5))
        );

        form.set_value(2, "31");
        assert!(matches!(
            form.submission(),
            Err(ValidationError::OutOfRange { field: "count", .. })
        ));

        form.set_value(2, "lots");
        assert!(matches!(
            form.submission(),
            Err(ValidationError::InvalidValue { field: "count", .. })
        ));
    }

    #[test]
    fn test_product_campaign_form_defaults_and_ids() {
        let mut form = Form::generate_product_campaign(3, "Ledger");
        assert_eq!(
            form.submission().unwrap(),
            Submission::GenerateProductCampaign(3, GenerateProductCampaignRequest::default())
        );

        form.set_value(0, "Q3 push");
        form.set_value(2, "12");
        form.set_value(5, "no");
        match form.submission().unwrap() {
            Submission::GenerateProductCampaign(id, request) => {
                assert_eq!(id, 3);
                assert_eq!(request.campaign_name.as_deref(), Some("Q3 push"));
                assert_eq!(request.email_template_id, Some(12));
                assert_eq!(request.whatsapp_template_id, None);
                assert!(!request.attach_brochure);
            }
            other => panic!("unexpected submission {:?}", other),
        }

        form.set_value(3, "first");
        assert!(matches!(
            form.submission(),
            Err(ValidationError::InvalidValue { field: "whatsapp_template_id", .. })
        ));
    }

    #[test]
    fn test_company_filter_form_parses_every_field() {
        let mut form = Form::company_filter(&CompanyFilter::default());
        form.set_value(0, "Retail");
        form.set_value(2, "2024-01-01");
        form.set_value(4, "replied");

        let Submission::CompanyFilter(filter) = form.submission().unwrap() else {
            panic!("expected a company filter");
        };
        assert_eq!(filter.industry.as_deref(), Some("Retail"));
        assert_eq!(filter.country, None);
        assert_eq!(filter.created_from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(filter.replies, ReplyPresence::WithReplies);
    }

    #[test]
    fn test_company_filter_rejects_reversed_dates() {
        let mut form = Form::company_filter(&CompanyFilter::default());
        form.set_value(2, "2024-03-01");
        form.set_value(3, "2024-01-01");
        assert!(matches!(
            form.submission(),
            Err(ValidationError::InvalidOrder { .. })
        ));
    }

    #[test]
    fn test_message_filter_roundtrips_current_values() {
        let current = MessageFilter {
            message_type: Some(MessageType::Whatsapp),
            status: Some(MessageStatus::Failed),
            stage: Some(MessageStage::Followup1),
        };
        let form = Form::message_filter(&current);
        assert_eq!(form.submission().unwrap(), Submission::MessageFilter(current));
    }

    #[test]
    fn test_email_template_requires_subject() {
        let mut form = Form::new_template();
        form.set_value(0, "Intro");
        form.set_value(3, "Hello {company_name}");
        assert!(matches!(
            form.submission(),
            Err(ValidationError::RequiredFieldMissing { field: "subject" })
        ));

        form.set_value(1, "whatsapp");
        assert!(matches!(
            form.submission().unwrap(),
            Submission::CreateTemplate(TemplateRequest {
                template_type: MessageType::Whatsapp,
                ..
            })
        ));
    }

    #[test]
    fn test_email_settings_password_only_sent_when_typed() {
        let mut bundle = SettingsBundle::default();
        bundle.email.smtp_port = "587".to_string();
        bundle.email.smtp_password = "********".to_string();
        let form = Form::email_settings(&bundle);

        let Submission::EmailSettings(update) = form.submission().unwrap() else {
            panic!("expected email settings");
        };
        assert_eq!(update.smtp_port, Some(587));
        assert_eq!(update.smtp_password, None);
    }

    #[test]
    fn test_notification_flags() {
        let mut form = Form::notification_settings(&SettingsBundle::default());
        form.set_value(0, "yes");
        form.set_value(3, "off");
        let Submission::NotificationSettings(update) = form.submission().unwrap() else {
            panic!("expected notification settings");
        };
        assert_eq!(update.email_notifications, Some(true));
        assert_eq!(update.reply_notifications, None);
        assert_eq!(update.weekly_reports, Some(false));

        form.set_value(1, "maybe");
        assert!(form.submission().is_err());
    }

    #[test]
    fn test_test_email_needs_an_address() {
        let mut form = Form::test_email();
        form.set_value(0, "ops");
        assert!(form.submission().is_err());
        form.set_value(0, "ops@example.com");
        assert_eq!(
            form.submission().unwrap(),
            Submission::TestEmail("ops@example.com".to_string())
        );
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = Form::fetch_companies();
        form.focus_prev();
        assert_eq!(form.focus, 2);
        form.focus_next();
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn test_wizard_steps_through_inputs() {
        let mut wizard = WizardForm::new(AutomationWizard::new());
        wizard.form.set_value(1, "Technology");
        wizard.form.set_value(2, "USA");
        wizard.form.set_value(3, "10");
        assert_eq!(wizard.next().unwrap(), WizardNav::Moved(WizardStep::Schedule));
        assert_eq!(wizard.form.fields.len(), 5);

        wizard.form.set_value(2, "7");
        assert_eq!(wizard.next().unwrap(), WizardNav::Moved(WizardStep::Review));
        assert!(wizard.form.fields.is_empty());

        let estimate = wizard.wizard.estimates();
        assert_eq!(estimate.companies, 70);
        assert_eq!(estimate.messages, 420);
        assert_eq!(wizard.next().unwrap(), WizardNav::Submit);
    }

    #[test]
    fn test_wizard_rejects_step_with_bad_number() {
        let mut wizard = WizardForm::new(AutomationWizard::new());
        wizard.form.set_value(1, "Technology");
        wizard.form.set_value(2, "USA");
        wizard.form.set_value(3, "ten");
        assert!(wizard.next().is_err());
        assert_eq!(wizard.wizard.step(), WizardStep::Target);
    }

    #[test]
    fn test_wizard_back_from_first_step_cancels() {
        let mut wizard = WizardForm::new(AutomationWizard::new());
        assert_eq!(wizard.back(), WizardNav::Cancelled);
    }
}
