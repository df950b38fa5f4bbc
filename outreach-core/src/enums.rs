//! Enum types for outreach records
//!
//! Wire spellings follow the backend exactly: message enums and intents are
//! upper-case, automation status is lower-case.

use crate::error::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Implements `as_str`, `all`, `Display` and a case-insensitive `FromStr` for a
/// fieldless enum from its wire spellings.
macro_rules! impl_wire_enum {
    ($type:ident, $kind:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $type {
            /// Wire representation as written by the backend.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($type::$variant => $wire,)+
                }
            }

            pub fn all() -> &'static [$type] {
                &[$($type::$variant),+]
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $type {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($wire) {
                        return Ok($type::$variant);
                    }
                )+
                Err(ParseEnumError {
                    kind: $kind,
                    value: s.to_string(),
                })
            }
        }
    };
}

// ============================================================================
// MESSAGING
// ============================================================================

/// Delivery channel of an outbound message or template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageType {
    Email,
    Whatsapp,
    Rcs,
}

impl_wire_enum!(MessageType, "message type", {
    Email => "EMAIL",
    Whatsapp => "WHATSAPP",
    Rcs => "RCS",
});

/// Position of a message within the follow-up sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageStage {
    Initial,
    #[serde(rename = "FOLLOWUP_1")]
    Followup1,
    #[serde(rename = "FOLLOWUP_2")]
    Followup2,
}

impl_wire_enum!(MessageStage, "message stage", {
    Initial => "INITIAL",
    Followup1 => "FOLLOWUP_1",
    Followup2 => "FOLLOWUP_2",
});

/// Delivery status of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageStatus {
    #[default]
    Draft,
    Sent,
    Delivered,
    Read,
    Failed,
    Cancelled,
    Skipped,
}

impl_wire_enum!(MessageStatus, "message status", {
    Draft => "DRAFT",
    Sent => "SENT",
    Delivered => "DELIVERED",
    Read => "READ",
    Failed => "FAILED",
    Cancelled => "CANCELLED",
    Skipped => "SKIPPED",
});

impl MessageStatus {
    /// Only failed messages are eligible for the batch retry endpoint.
    pub fn is_retryable(&self) -> bool {
        matches!(self, MessageStatus::Failed)
    }

    /// Whether the message has left the outbox.
    pub fn is_outbound(&self) -> bool {
        matches!(
            self,
            MessageStatus::Sent | MessageStatus::Delivered | MessageStatus::Read
        )
    }
}

// ============================================================================
// LEADS
// ============================================================================

/// Classified intent of a reply, computed upstream by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IntentType {
    Hot,
    Warm,
    Cold,
    Unsubscribe,
}

impl_wire_enum!(IntentType, "intent", {
    Hot => "HOT",
    Warm => "WARM",
    Cold => "COLD",
    Unsubscribe => "UNSUBSCRIBE",
});

// ============================================================================
// AUTOMATION
// ============================================================================

/// Lifecycle status of an automation config. Transitions happen server-side;
/// the client only maps each status to the actions it may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AutomationStatus {
    #[default]
    Draft,
    Scheduled,
    Running,
    Paused,
    Completed,
}

impl_wire_enum!(AutomationStatus, "automation status", {
    Draft => "draft",
    Scheduled => "scheduled",
    Running => "running",
    Paused => "paused",
    Completed => "completed",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_stage_wire_format() {
        let json = serde_json::to_string(&MessageStage::Followup1).unwrap();
        assert_eq!(json, "\"FOLLOWUP_1\"");
        let parsed: MessageStage = serde_json::from_str("\"FOLLOWUP_2\"").unwrap();
        assert_eq!(parsed, MessageStage::Followup2);
    }

    #[test]
    fn test_automation_status_is_lowercase_on_the_wire() {
        let json = serde_json::to_string(&AutomationStatus::Paused).unwrap();
        assert_eq!(json, "\"paused\"");
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("whatsapp".parse::<MessageType>().unwrap(), MessageType::Whatsapp);
        assert_eq!(" Running ".parse::<AutomationStatus>().unwrap(), AutomationStatus::Running);
        assert_eq!("hot".parse::<IntentType>().unwrap(), IntentType::Hot);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "archived".parse::<AutomationStatus>().unwrap_err();
        assert_eq!(err.kind, "automation status");
        assert_eq!(err.value, "archived");
    }

    #[test]
    fn test_display_roundtrips_through_from_str() {
        for status in MessageStatus::all() {
            assert_eq!(status.to_string().parse::<MessageStatus>().unwrap(), *status);
        }
    }

    #[test]
    fn test_only_failed_is_retryable() {
        let retryable: Vec<_> = MessageStatus::all()
            .iter()
            .filter(|s| s.is_retryable())
            .collect();
        assert_eq!(retryable, vec![&MessageStatus::Failed]);
    }
}
