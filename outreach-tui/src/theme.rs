//! SynthBrute theme and status colours.

use outreach_core::{IntentType, MessageStatus, MessageType};
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct SynthBruteTheme {
    pub bg: Color,
    pub bg_secondary: Color,
    pub bg_highlight: Color,
    pub primary: Color,
    pub primary_dim: Color,
    pub secondary: Color,
    pub secondary_dim: Color,
    pub tertiary: Color,
    pub tertiary_dim: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub text_muted: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl Default for SynthBruteTheme {
    fn default() -> Self {
        Self::synthbrute()
    }
}

impl SynthBruteTheme {
    pub fn synthbrute() -> Self {
        Self {
            bg: Color::Rgb(10, 10, 10),
            bg_secondary: Color::Rgb(26, 26, 26),
            bg_highlight: Color::Rgb(42, 42, 42),
            primary: Color::Rgb(0, 255, 255),
            primary_dim: Color::Rgb(0, 136, 136),
            secondary: Color::Rgb(255, 0, 255),
            secondary_dim: Color::Rgb(136, 0, 136),
            tertiary: Color::Rgb(255, 255, 0),
            tertiary_dim: Color::Rgb(136, 136, 0),
            success: Color::Rgb(0, 255, 0),
            warning: Color::Rgb(255, 255, 0),
            error: Color::Rgb(255, 0, 0),
            info: Color::Rgb(0, 255, 255),
            text: Color::Rgb(255, 255, 255),
            text_dim: Color::Rgb(136, 136, 136),
            text_muted: Color::Rgb(68, 68, 68),
            border: Color::Rgb(68, 68, 68),
            border_focus: Color::Rgb(0, 255, 255),
        }
    }
}

pub fn message_status_color(status: MessageStatus, theme: &SynthBruteTheme) -> Color {
    match status {
        MessageStatus::Draft => theme.text_dim,
        MessageStatus::Sent => theme.primary,
        MessageStatus::Delivered => theme.primary_dim,
        MessageStatus::Read => theme.success,
        MessageStatus::Failed => theme.error,
        MessageStatus::Cancelled | MessageStatus::Skipped => theme.text_muted,
    }
}

pub fn message_type_color(kind: MessageType, theme: &SynthBruteTheme) -> Color {
    match kind {
        MessageType::Email => theme.primary,
        MessageType::Whatsapp => theme.success,
        MessageType::Rcs => theme.tertiary,
    }
}

/// Automation status arrives as a raw string; unknown values are dimmed.
pub fn automation_status_color(status: &str, theme: &SynthBruteTheme) -> Color {
    match status.trim().to_ascii_lowercase().as_str() {
        "draft" => theme.text_dim,
        "scheduled" => theme.tertiary,
        "running" => theme.success,
        "paused" => theme.warning,
        "completed" => theme.primary_dim,
        _ => theme.text_muted,
    }
}

pub fn intent_color(intent: IntentType, theme: &SynthBruteTheme) -> Color {
    match intent {
        IntentType::Hot => theme.error,
        IntentType::Warm => theme.warning,
        IntentType::Cold => theme.primary_dim,
        IntentType::Unsubscribe => theme.text_muted,
    }
}

/// Open and reply rates: green above 20%, yellow above 5%.
pub fn rate_color(percent: f64, theme: &SynthBruteTheme) -> Color {
    if percent >= 20.0 {
        theme.success
    } else if percent >= 5.0 {
        theme.warning
    } else {
        theme.text_dim
    }
}
