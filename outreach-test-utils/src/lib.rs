//! Outreach Test Utilities
//!
//! Shared test infrastructure for the outreach workspace:
//! - Proptest generators for entities and filters
//! - Fixtures for common records and list envelopes
//! - Assertions over validation results and row identity

pub use outreach_core::{
    AutomationConfig, AutomationStatus, Campaign, Company, CompanyFilter, CompanyPhone, EntityId,
    Identified, IntentType, LatestReply, LeadSummary, Message, MessageFilter, MessageStage,
    MessageStatus, MessageType, Page, Product, ReplyEntry, ReplyPresence, ReplyRecord, Template,
    Timestamp, ValidationError, ValidationResult,
};

use chrono::{NaiveDate, NaiveDateTime};

/// Midnight on the given date. Panics on an invalid date, which is a test bug.
pub fn day(year: i32, month: u32, day: u32) -> Timestamp {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_else(|| panic!("invalid fixture date {}-{}-{}", year, month, day))
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for outreach records.

    use super::*;
    use proptest::prelude::*;

    pub const INDUSTRIES: &[&str] = &["Technology", "Retail", "Finance", "Healthcare"];
    pub const COUNTRIES: &[&str] = &["USA", "India", "UK"];

    /// Timestamp within 2024, second precision.
    pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
        (1_704_067_200i64..1_735_689_600i64).prop_map(|secs| {
            chrono::DateTime::from_timestamp(secs, 0)
                .map(|dt| dt.naive_utc())
                .unwrap_or_else(|| day(2024, 1, 1))
        })
    }

    pub fn arb_date() -> impl Strategy<Value = NaiveDate> {
        arb_timestamp().prop_map(|ts| ts.date())
    }

    pub fn arb_industry() -> impl Strategy<Value = String> {
        prop::sample::select(INDUSTRIES).prop_map(str::to_string)
    }

    pub fn arb_country() -> impl Strategy<Value = String> {
        prop::sample::select(COUNTRIES).prop_map(str::to_string)
    }

    pub fn arb_message_type() -> impl Strategy<Value = MessageType> {
        prop::sample::select(MessageType::all())
    }

    pub fn arb_message_stage() -> impl Strategy<Value = MessageStage> {
        prop::sample::select(MessageStage::all())
    }

    pub fn arb_message_status() -> impl Strategy<Value = MessageStatus> {
        prop::sample::select(MessageStatus::all())
    }

    pub fn arb_automation_status() -> impl Strategy<Value = AutomationStatus> {
        prop::sample::select(AutomationStatus::all())
    }

    pub fn arb_reply_presence() -> impl Strategy<Value = ReplyPresence> {
        prop_oneof![
            Just(ReplyPresence::Any),
            Just(ReplyPresence::WithReplies),
            Just(ReplyPresence::WithoutReplies),
        ]
    }

    /// Company with the given id; replies are present about half the time.
    pub fn arb_company(id: EntityId) -> impl Strategy<Value = Company> {
        (arb_industry(), arb_country(), arb_timestamp(), any::<bool>()).prop_map(
            move |(industry, country, created_at, replied)| {
                let mut company = fixtures::company(id, &industry, &country);
                company.created_at = created_at;
                if replied {
                    company.replies.push(fixtures::reply_record(id * 10, id));
                }
                company
            },
        )
    }

    /// Page of companies with distinct ids `1..=n`.
    pub fn arb_companies(max: usize) -> impl Strategy<Value = Vec<Company>> {
        (0..=max).prop_flat_map(|n| {
            (1..=n as EntityId)
                .map(arb_company)
                .collect::<Vec<_>>()
        })
    }

    pub fn arb_message(id: EntityId) -> impl Strategy<Value = Message> {
        (arb_message_type(), arb_message_status(), arb_message_stage()).prop_map(
            move |(message_type, status, stage)| {
                let mut message = fixtures::message(id, id % 5 + 1, status);
                message.message_type = message_type;
                message.stage = stage;
                message
            },
        )
    }

    pub fn arb_messages(max: usize) -> impl Strategy<Value = Vec<Message>> {
        (0..=max).prop_flat_map(|n| (1..=n as EntityId).map(arb_message).collect::<Vec<_>>())
    }

    pub fn arb_company_filter() -> impl Strategy<Value = CompanyFilter> {
        (
            prop::option::of(arb_industry()),
            prop::option::of(arb_country()),
            prop::option::of(arb_date()),
            prop::option::of(arb_date()),
            arb_reply_presence(),
        )
            .prop_map(|(industry, country, created_from, created_to, replies)| CompanyFilter {
                industry,
                country,
                created_from,
                created_to,
                replies,
            })
    }

    pub fn arb_message_filter() -> impl Strategy<Value = MessageFilter> {
        (
            prop::option::of(arb_message_type()),
            prop::option::of(arb_message_status()),
            prop::option::of(arb_message_stage()),
        )
            .prop_map(|(message_type, status, stage)| MessageFilter {
                message_type,
                status,
                stage,
            })
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built records for common scenarios.

    use super::*;

    pub fn created() -> NaiveDateTime {
        day(2024, 5, 1)
    }

    pub fn company(id: EntityId, industry: &str, country: &str) -> Company {
        Company {
            id,
            name: format!("Company {}", id),
            industry: industry.to_string(),
            country: country.to_string(),
            email: Some(format!("hello@company{}.example", id)),
            phone: None,
            website: Some(format!("https://company{}.example", id)),
            created_at: created(),
            messages: Vec::new(),
            replies: Vec::new(),
            phones: Vec::new(),
        }
    }

    pub fn company_phone(id: EntityId, phone: &str, is_primary: bool) -> CompanyPhone {
        CompanyPhone {
            id,
            phone: phone.to_string(),
            is_primary,
            is_verified: false,
            created_at: created(),
        }
    }

    pub fn reply_record(id: EntityId, company_id: EntityId) -> ReplyRecord {
        ReplyRecord {
            id,
            company_id,
            campaign_id: None,
            message_id: None,
            from_email: format!("hello@company{}.example", company_id),
            subject: Some("Re: Introduction".to_string()),
            reply_content: Some("Sounds interesting, tell me more.".to_string()),
            replied_at: day(2024, 5, 3),
        }
    }

    pub fn message(id: EntityId, company_id: EntityId, status: MessageStatus) -> Message {
        Message {
            id,
            company_id,
            campaign_id: Some(1),
            message_type: MessageType::Email,
            stage: MessageStage::Initial,
            content: format!("Hello from message {}", id),
            subject: Some("Introduction".to_string()),
            scheduled_for: Some(day(2024, 5, 2)),
            status,
            sent_at: None,
            created_at: created(),
            interactions: Vec::new(),
            company_name: Some(format!("Company {}", company_id)),
        }
    }

    pub fn campaign(id: EntityId, industry: &str, messages: Vec<Message>) -> Campaign {
        Campaign {
            id,
            name: format!("Campaign {}", id),
            industry: industry.to_string(),
            created_at: created(),
            messages,
        }
    }

    pub fn template(id: EntityId, template_type: MessageType) -> Template {
        Template {
            id,
            name: format!("Template {}", id),
            template_type,
            subject: (template_type == MessageType::Email).then(|| "Hello {company}".to_string()),
            content: "Hi {company}, we help teams like yours.".to_string(),
            variables: Some("company".to_string()),
            created_at: created(),
        }
    }

    pub fn automation_config(id: EntityId, status: AutomationStatus) -> AutomationConfig {
        AutomationConfig {
            id,
            name: Some(format!("Automation {}", id)),
            industry: "Technology".to_string(),
            country: "USA".to_string(),
            daily_limit: 10,
            is_active: status == AutomationStatus::Running,
            status: status.as_str().to_string(),
            send_time_hour: 10,
            send_time_minute: 30,
            followup_day_1: 3,
            followup_day_2: 7,
            run_duration_days: 7,
            start_date: None,
            end_date: None,
            total_companies_fetched: 0,
            total_messages_sent: 0,
            total_replies: 0,
            days_completed: 0,
            created_at: Some(created()),
            last_run_at: None,
        }
    }

    pub fn product(id: EntityId, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            short_description: Some(format!("{} for growing teams", name)),
            long_description: None,
            industry_tags: vec!["Technology".to_string()],
            default_filters: None,
            brochure_url: None,
            asset_urls: None,
            is_active: true,
            created_at: created(),
            updated_at: None,
            companies_count: 0,
            campaigns_count: 0,
            qualified_leads_count: 0,
            messages_sent: 0,
        }
    }

    pub fn reply_entry(id: EntityId, company_id: EntityId, source: &str) -> ReplyEntry {
        ReplyEntry {
            id,
            company_id,
            company_name: format!("Company {}", company_id),
            company_industry: Some("Technology".to_string()),
            company_country: Some("USA".to_string()),
            source: source.to_string(),
            sender: format!("hello@company{}.example", company_id),
            subject: Some("Re: Introduction".to_string()),
            reply_content: Some("Interested".to_string()),
            replied_at: day(2024, 5, 3),
            is_qualified_lead: true,
        }
    }

    pub fn lead_summary(company_id: EntityId, source: &str) -> LeadSummary {
        LeadSummary {
            company_id,
            company_name: format!("Company {}", company_id),
            industry: "Technology".to_string(),
            country: "USA".to_string(),
            email: Some(format!("hello@company{}.example", company_id)),
            phone: None,
            website: None,
            total_replies: 1,
            latest_reply: Some(LatestReply {
                source: source.to_string(),
                content: Some("Interested".to_string()),
                replied_at: day(2024, 5, 3),
            }),
            status: "QUALIFIED".to_string(),
        }
    }

    /// Envelope holding `items` as page `page` of `total` rows.
    pub fn page_of<T>(items: Vec<T>, page: u32, page_size: u32, total: u64) -> Page<T> {
        let size = u64::from(page_size.max(1));
        Page {
            items,
            total,
            page,
            page_size,
            total_pages: total.div_ceil(size) as u32,
        }
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions for outreach-specific validation.

    use super::*;

    /// Assert that a validation failed on the named field.
    #[track_caller]
    pub fn assert_invalid_field<T: std::fmt::Debug>(result: &ValidationResult<T>, field: &str) {
        match result {
            Err(ValidationError::RequiredFieldMissing { field: f })
            | Err(ValidationError::OutOfRange { field: f, .. })
            | Err(ValidationError::InvalidValue { field: f, .. }) => {
                assert_eq!(*f, field, "validation failed on the wrong field");
            }
            other => panic!("Expected a validation error on {}, got: {:?}", field, other),
        }
    }

    /// Assert the ids of `items`, in order.
    #[track_caller]
    pub fn assert_ids<T: Identified>(items: &[T], expected: &[EntityId]) {
        let ids: Vec<EntityId> = items.iter().map(Identified::id).collect();
        assert_eq!(ids, expected, "unexpected row ids");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_of_computes_total_pages() {
        let page = fixtures::page_of(vec![1, 2], 1, 10, 21);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_automation_fixture_status_parses() {
        let config = fixtures::automation_config(1, AutomationStatus::Paused);
        assert_eq!(config.status(), Some(AutomationStatus::Paused));
    }

    #[test]
    fn test_assert_ids() {
        let rows = vec![
            fixtures::company(3, "Retail", "UK"),
            fixtures::company(1, "Retail", "UK"),
        ];
        assertions::assert_ids(&rows, &[3, 1]);
    }
}
