//! Client-side filters applied over the currently loaded page.
//!
//! Filters never reach the server, so they only narrow the rows already
//! fetched. Every field left unset matches everything, and a filter with
//! several fields set matches the intersection of the single-field filters.

use crate::entities::{Company, LeadSummary, Message, QualifiedLead, ReplyEntry};
use crate::enums::{IntentType, MessageStage, MessageStatus, MessageType};
use crate::error::ParseEnumError;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Predicate over one row type.
pub trait ItemFilter<T> {
    fn matches(&self, item: &T) -> bool;

    /// True when no field is set and every row matches.
    fn is_empty(&self) -> bool;

    fn apply<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

/// Filter for pages that offer none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoFilter;

impl<T> ItemFilter<T> for NoFilter {
    fn matches(&self, _item: &T) -> bool {
        true
    }

    fn is_empty(&self) -> bool {
        true
    }
}

/// Sorted distinct values of one text column, for filter pickers.
pub fn distinct_values<T>(items: &[T], column: impl Fn(&T) -> &str) -> Vec<String> {
    items
        .iter()
        .map(column)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ============================================================================
// COMPANIES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyPresence {
    #[default]
    Any,
    WithReplies,
    WithoutReplies,
}

impl ReplyPresence {
    pub fn label(&self) -> &'static str {
        match self {
            ReplyPresence::Any => "any",
            ReplyPresence::WithReplies => "replied",
            ReplyPresence::WithoutReplies => "no reply",
        }
    }

    pub fn cycle(&self) -> Self {
        match self {
            ReplyPresence::Any => ReplyPresence::WithReplies,
            ReplyPresence::WithReplies => ReplyPresence::WithoutReplies,
            ReplyPresence::WithoutReplies => ReplyPresence::Any,
        }
    }

    fn admits(&self, has_replies: bool) -> bool {
        match self {
            ReplyPresence::Any => true,
            ReplyPresence::WithReplies => has_replies,
            ReplyPresence::WithoutReplies => !has_replies,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompanyFilter {
    pub industry: Option<String>,
    pub country: Option<String>,
    /// Inclusive lower bound on the creation date.
    pub created_from: Option<NaiveDate>,
    /// Inclusive upper bound on the creation date.
    pub created_to: Option<NaiveDate>,
    pub replies: ReplyPresence,
}

impl CompanyFilter {
    pub fn industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn created_between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.created_from = from;
        self.created_to = to;
        self
    }

    pub fn replies(mut self, replies: ReplyPresence) -> Self {
        self.replies = replies;
        self
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Short description of the active fields for the filter bar.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(industry) = &self.industry {
            parts.push(format!("industry={}", industry));
        }
        if let Some(country) = &self.country {
            parts.push(format!("country={}", country));
        }
        match (self.created_from, self.created_to) {
            (Some(from), Some(to)) => parts.push(format!("created {}..{}", from, to)),
            (Some(from), None) => parts.push(format!("created >= {}", from)),
            (None, Some(to)) => parts.push(format!("created <= {}", to)),
            (None, None) => {}
        }
        if self.replies != ReplyPresence::Any {
            parts.push(self.replies.label().to_string());
        }
        parts.join(", ")
    }
}

impl ItemFilter<Company> for CompanyFilter {
    fn matches(&self, company: &Company) -> bool {
        if let Some(industry) = &self.industry {
            if &company.industry != industry {
                return false;
            }
        }
        if let Some(country) = &self.country {
            if &company.country != country {
                return false;
            }
        }
        let created = company.created_at.date();
        if self.created_from.is_some_and(|from| created < from) {
            return false;
        }
        if self.created_to.is_some_and(|to| created > to) {
            return false;
        }
        self.replies.admits(company.has_replies())
    }

    fn is_empty(&self) -> bool {
        self.industry.is_none()
            && self.country.is_none()
            && self.created_from.is_none()
            && self.created_to.is_none()
            && self.replies == ReplyPresence::Any
    }
}

// ============================================================================
// MESSAGES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MessageFilter {
    pub message_type: Option<MessageType>,
    pub status: Option<MessageStatus>,
    pub stage: Option<MessageStage>,
}

impl ItemFilter<Message> for MessageFilter {
    fn matches(&self, message: &Message) -> bool {
        self.message_type.map_or(true, |t| message.message_type == t)
            && self.status.map_or(true, |s| message.status == s)
            && self.stage.map_or(true, |s| message.stage == s)
    }

    fn is_empty(&self) -> bool {
        self.message_type.is_none() && self.status.is_none() && self.stage.is_none()
    }
}

// ============================================================================
// LEADS
// ============================================================================

/// Channel a reply arrived on, as labelled by the replies endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplySource {
    Email,
    WhatsApp,
}

impl ReplySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplySource::Email => "Email",
            ReplySource::WhatsApp => "WhatsApp",
        }
    }
}

impl fmt::Display for ReplySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReplySource {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(ReplySource::Email),
            "whatsapp" => Ok(ReplySource::WhatsApp),
            _ => Err(ParseEnumError {
                kind: "reply source",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LeadFilter {
    pub source: Option<ReplySource>,
    pub intent: Option<IntentType>,
}

impl LeadFilter {
    pub fn is_empty(&self) -> bool {
        self.source.is_none() && self.intent.is_none()
    }

    fn admits_source(&self, raw: Option<&str>) -> bool {
        match self.source {
            None => true,
            Some(wanted) => raw.and_then(|r| r.parse::<ReplySource>().ok()) == Some(wanted),
        }
    }
}

impl ItemFilter<ReplyEntry> for LeadFilter {
    /// Replies carry no intent, so only the source applies.
    fn matches(&self, reply: &ReplyEntry) -> bool {
        self.admits_source(Some(&reply.source))
    }

    fn is_empty(&self) -> bool {
        self.source.is_none()
    }
}

impl ItemFilter<LeadSummary> for LeadFilter {
    fn matches(&self, lead: &LeadSummary) -> bool {
        self.admits_source(lead.latest_reply.as_ref().map(|r| r.source.as_str()))
    }

    fn is_empty(&self) -> bool {
        self.source.is_none()
    }
}

impl ItemFilter<QualifiedLead> for LeadFilter {
    fn matches(&self, lead: &QualifiedLead) -> bool {
        self.intent.map_or(true, |i| lead.intent == i)
    }

    fn is_empty(&self) -> bool {
        self.intent.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::parse_timestamp;

    fn company(id: i64, industry: &str, country: &str, created: &str) -> Company {
        Company {
            id,
            name: format!("Company {}", id),
            industry: industry.to_string(),
            country: country.to_string(),
            email: None,
            phone: None,
            website: None,
            created_at: parse_timestamp(created).unwrap(),
            messages: Vec::new(),
            replies: Vec::new(),
            phones: Vec::new(),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let rows = vec![
            company(1, "Retail", "India", "2024-01-01"),
            company(2, "Technology", "USA", "2024-02-01"),
        ];
        let filter = CompanyFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&rows).len(), 2);
    }

    #[test]
    fn test_industry_equality_is_exact() {
        let rows = vec![
            company(1, "Technology", "USA", "2024-01-01"),
            company(2, "technology", "USA", "2024-01-01"),
        ];
        let filter = CompanyFilter::default().industry("Technology");
        let ids: Vec<_> = filter.apply(&rows).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_date_range_is_inclusive_on_calendar_days() {
        let rows = vec![
            company(1, "Retail", "India", "2024-03-01T23:59:00"),
            company(2, "Retail", "India", "2024-03-02T00:00:00"),
            company(3, "Retail", "India", "2024-03-05T08:00:00"),
        ];
        let filter = CompanyFilter::default().created_between(
            NaiveDate::from_ymd_opt(2024, 3, 1),
            NaiveDate::from_ymd_opt(2024, 3, 2),
        );
        let ids: Vec<_> = filter.apply(&rows).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_reply_presence() {
        let mut replied = company(1, "Retail", "India", "2024-01-01");
        replied.replies.push(crate::entities::ReplyRecord {
            id: 1,
            company_id: 1,
            campaign_id: None,
            message_id: None,
            from_email: "a@b.c".to_string(),
            subject: None,
            reply_content: None,
            replied_at: parse_timestamp("2024-01-02").unwrap(),
        });
        let rows = vec![replied, company(2, "Retail", "India", "2024-01-01")];
        let with = CompanyFilter::default().replies(ReplyPresence::WithReplies);
        let without = CompanyFilter::default().replies(ReplyPresence::WithoutReplies);
        assert_eq!(with.apply(&rows)[0].id, 1);
        assert_eq!(without.apply(&rows)[0].id, 2);
    }

    #[test]
    fn test_summary_lists_active_fields() {
        let filter = CompanyFilter::default()
            .industry("Retail")
            .replies(ReplyPresence::WithoutReplies);
        assert_eq!(filter.summary(), "industry=Retail, no reply");
    }

    #[test]
    fn test_distinct_values_are_sorted_and_unique() {
        let rows = vec![
            company(1, "Retail", "India", "2024-01-01"),
            company(2, "Finance", "USA", "2024-01-01"),
            company(3, "Retail", "UK", "2024-01-01"),
        ];
        assert_eq!(
            distinct_values(&rows, |c| c.industry.as_str()),
            vec!["Finance".to_string(), "Retail".to_string()]
        );
    }

    #[test]
    fn test_reply_source_parses_backend_labels() {
        assert_eq!("WhatsApp".parse::<ReplySource>().unwrap(), ReplySource::WhatsApp);
        assert_eq!("Email".parse::<ReplySource>().unwrap(), ReplySource::Email);
        assert!("sms".parse::<ReplySource>().is_err());
    }
}
