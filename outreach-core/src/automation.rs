//! Automation actions and the create/edit wizard.
//!
//! Status transitions happen on the server. The client only decides which
//! actions each status offers and which endpoint each action calls.

use crate::entities::AutomationConfig;
use crate::enums::AutomationStatus;
use crate::error::{ValidationError, ValidationResult};
use crate::requests::AutomationConfigRequest;
use std::fmt;

/// Messages sent per company over a full sequence, across both channels.
pub const MESSAGES_PER_COMPANY: i64 = 6;

// ============================================================================
// ACTIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutomationAction {
    Start,
    Pause,
    Resume,
    RunNow,
    Restart,
}

impl AutomationAction {
    /// Path segment under `/api/automation/{id}/`.
    pub fn endpoint(&self) -> &'static str {
        match self {
            AutomationAction::Start | AutomationAction::Restart => "start",
            AutomationAction::Pause => "stop",
            AutomationAction::Resume => "resume",
            AutomationAction::RunNow => "run-now",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AutomationAction::Start => "Start",
            AutomationAction::Pause => "Pause",
            AutomationAction::Resume => "Resume",
            AutomationAction::RunNow => "Run now",
            AutomationAction::Restart => "Restart",
        }
    }

    /// Past-tense confirmation shown after the call succeeds.
    pub fn done_message(&self) -> &'static str {
        match self {
            AutomationAction::Start => "Automation started",
            AutomationAction::Pause => "Automation paused",
            AutomationAction::Resume => "Automation resumed",
            AutomationAction::RunNow => "Automation run triggered",
            AutomationAction::Restart => "Automation restarted",
        }
    }
}

impl fmt::Display for AutomationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl AutomationStatus {
    /// Actions offered for a config in this status.
    pub fn actions(&self) -> &'static [AutomationAction] {
        use AutomationAction::*;
        match self {
            AutomationStatus::Draft => &[Start, RunNow],
            AutomationStatus::Scheduled => &[RunNow],
            AutomationStatus::Running => &[Pause, RunNow],
            AutomationStatus::Paused => &[Resume],
            AutomationStatus::Completed => &[Restart],
        }
    }

    pub fn allows(&self, action: AutomationAction) -> bool {
        self.actions().contains(&action)
    }
}

/// Actions for a raw status string; unknown statuses offer none.
pub fn actions_for(status: &str) -> &'static [AutomationAction] {
    status
        .parse::<AutomationStatus>()
        .map(|s| s.actions())
        .unwrap_or(&[])
}

// ============================================================================
// WIZARD
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Target,
    Schedule,
    Review,
}

impl WizardStep {
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Target => "Target",
            WizardStep::Schedule => "Schedule",
            WizardStep::Review => "Review",
        }
    }

    /// 1-based position, for "Step n of 3".
    pub fn number(&self) -> usize {
        match self {
            WizardStep::Target => 1,
            WizardStep::Schedule => 2,
            WizardStep::Review => 3,
        }
    }
}

/// Outcome of moving through the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardNav {
    Moved(WizardStep),
    /// Back was pressed on the first step.
    Cancelled,
    /// Next was pressed on the review step.
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignEstimate {
    pub companies: i64,
    pub messages: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomationWizard {
    step: WizardStep,
    /// Set when editing an existing config.
    pub editing: Option<i64>,
    pub name: String,
    pub industry: String,
    pub country: String,
    pub daily_limit: i64,
    pub send_time_hour: i64,
    pub send_time_minute: i64,
    pub run_duration_days: i64,
    pub followup_day_1: i64,
    pub followup_day_2: i64,
    submitting: bool,
}

impl Default for AutomationWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl AutomationWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Target,
            editing: None,
            name: String::new(),
            industry: String::new(),
            country: String::new(),
            daily_limit: 30,
            send_time_hour: 10,
            send_time_minute: 0,
            run_duration_days: 7,
            followup_day_1: 3,
            followup_day_2: 7,
            submitting: false,
        }
    }

    /// Wizard pre-filled from an existing config.
    pub fn edit(config: &AutomationConfig) -> Self {
        Self {
            editing: Some(config.id),
            name: config.name.clone().unwrap_or_default(),
            industry: config.industry.clone(),
            country: config.country.clone(),
            daily_limit: config.daily_limit,
            send_time_hour: config.send_time_hour,
            send_time_minute: config.send_time_minute,
            run_duration_days: config.run_duration_days,
            followup_day_1: config.followup_day_1,
            followup_day_2: config.followup_day_2,
            ..Self::new()
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate the current step and advance.
    pub fn next(&mut self) -> ValidationResult<WizardNav> {
        match self.step {
            WizardStep::Target => {
                self.validate_target()?;
                self.step = WizardStep::Schedule;
                Ok(WizardNav::Moved(self.step))
            }
            WizardStep::Schedule => {
                self.validate_schedule()?;
                self.step = WizardStep::Review;
                Ok(WizardNav::Moved(self.step))
            }
            WizardStep::Review => Ok(WizardNav::Submit),
        }
    }

    pub fn back(&mut self) -> WizardNav {
        match self.step {
            WizardStep::Target => WizardNav::Cancelled,
            WizardStep::Schedule => {
                self.step = WizardStep::Target;
                WizardNav::Moved(self.step)
            }
            WizardStep::Review => {
                self.step = WizardStep::Schedule;
                WizardNav::Moved(self.step)
            }
        }
    }

    pub fn estimates(&self) -> CampaignEstimate {
        let companies = self.daily_limit * self.run_duration_days;
        CampaignEstimate {
            companies,
            messages: companies * MESSAGES_PER_COMPANY,
        }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        self.validate_target()?;
        self.validate_schedule()
    }

    fn validate_target(&self) -> ValidationResult<()> {
        ValidationError::check_required("industry", &self.industry)?;
        ValidationError::check_required("country", &self.country)?;
        ValidationError::check_range("daily_limit", self.daily_limit, 1, 100)
    }

    fn validate_schedule(&self) -> ValidationResult<()> {
        ValidationError::check_range("send_time_hour", self.send_time_hour, 0, 23)?;
        ValidationError::check_range("send_time_minute", self.send_time_minute, 0, 59)?;
        ValidationError::check_range("run_duration_days", self.run_duration_days, 1, 365)?;
        if self.followup_day_1 < 1 {
            return Err(ValidationError::OutOfRange {
                field: "followup_day_1",
                min: 1,
                max: i64::MAX,
                value: self.followup_day_1,
            });
        }
        if self.followup_day_2 <= self.followup_day_1 {
            return Err(ValidationError::InvalidOrder {
                reason: format!(
                    "second follow-up (day {}) must come after the first (day {})",
                    self.followup_day_2, self.followup_day_1
                ),
            });
        }
        Ok(())
    }

    /// Mark a submit as in flight. Fails while one already is, or when invalid.
    pub fn begin_submit(&mut self) -> ValidationResult<AutomationConfigRequest> {
        if self.submitting {
            return Err(ValidationError::InvalidValue {
                field: "wizard",
                reason: "a save is already in progress".to_string(),
            });
        }
        self.validate()?;
        self.submitting = true;
        Ok(self.to_request())
    }

    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }

    pub fn to_request(&self) -> AutomationConfigRequest {
        let name = self.name.trim();
        AutomationConfigRequest {
            name: (!name.is_empty()).then(|| name.to_string()),
            industry: self.industry.trim().to_string(),
            country: self.country.trim().to_string(),
            daily_limit: self.daily_limit,
            send_time_hour: self.send_time_hour,
            send_time_minute: self.send_time_minute,
            followup_day_1: self.followup_day_1,
            followup_day_2: self.followup_day_2,
            run_duration_days: self.run_duration_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> AutomationWizard {
        let mut wizard = AutomationWizard::new();
        wizard.industry = "Technology".to_string();
        wizard.country = "USA".to_string();
        wizard
    }

    #[test]
    fn test_action_table() {
        use AutomationAction::*;
        assert_eq!(AutomationStatus::Draft.actions(), &[Start, RunNow]);
        assert_eq!(AutomationStatus::Scheduled.actions(), &[RunNow]);
        assert_eq!(AutomationStatus::Running.actions(), &[Pause, RunNow]);
        assert_eq!(AutomationStatus::Paused.actions(), &[Resume]);
        assert_eq!(AutomationStatus::Completed.actions(), &[Restart]);
        assert!(!AutomationStatus::Paused.allows(Pause));
    }

    #[test]
    fn test_action_endpoints() {
        assert_eq!(AutomationAction::Pause.endpoint(), "stop");
        assert_eq!(AutomationAction::Restart.endpoint(), "start");
        assert_eq!(AutomationAction::RunNow.endpoint(), "run-now");
    }

    #[test]
    fn test_unknown_status_has_no_actions() {
        assert!(actions_for("archived").is_empty());
        assert_eq!(actions_for("running").len(), 2);
    }

    #[test]
    fn test_estimates() {
        let mut wizard = filled();
        wizard.daily_limit = 10;
        wizard.run_duration_days = 7;
        let estimate = wizard.estimates();
        assert_eq!(estimate.companies, 70);
        assert_eq!(estimate.messages, 420);
    }

    #[test]
    fn test_next_validates_target() {
        let mut wizard = AutomationWizard::new();
        assert_eq!(
            wizard.next(),
            Err(ValidationError::RequiredFieldMissing { field: "industry" })
        );
        assert_eq!(wizard.step(), WizardStep::Target);
    }

    #[test]
    fn test_walk_forward_and_back() {
        let mut wizard = filled();
        assert_eq!(wizard.next().unwrap(), WizardNav::Moved(WizardStep::Schedule));
        assert_eq!(wizard.next().unwrap(), WizardNav::Moved(WizardStep::Review));
        assert_eq!(wizard.next().unwrap(), WizardNav::Submit);
        assert_eq!(wizard.back(), WizardNav::Moved(WizardStep::Schedule));
        assert_eq!(wizard.back(), WizardNav::Moved(WizardStep::Target));
        assert_eq!(wizard.back(), WizardNav::Cancelled);
    }

    #[test]
    fn test_followups_must_be_ordered() {
        let mut wizard = filled();
        wizard.followup_day_1 = 5;
        wizard.followup_day_2 = 5;
        wizard.next().unwrap();
        assert!(matches!(
            wizard.next(),
            Err(ValidationError::InvalidOrder { .. })
        ));
    }

    #[test]
    fn test_schedule_bounds() {
        let mut wizard = filled();
        wizard.send_time_hour = 24;
        wizard.next().unwrap();
        assert!(matches!(
            wizard.next(),
            Err(ValidationError::OutOfRange { field: "send_time_hour", .. })
        ));
    }

    #[test]
    fn test_submit_is_blocked_while_in_flight() {
        let mut wizard = filled();
        assert!(wizard.begin_submit().is_ok());
        assert!(wizard.is_submitting());
        assert!(wizard.begin_submit().is_err());
        wizard.finish_submit();
        assert!(wizard.begin_submit().is_ok());
    }

    #[test]
    fn test_request_drops_blank_name() {
        let mut wizard = filled();
        wizard.name = "   ".to_string();
        wizard.industry = " Technology ".to_string();
        let request = wizard.to_request();
        assert!(request.name.is_none());
        assert_eq!(request.industry, "Technology");
    }
}
