//! Outreach console library exports.

pub mod api_client;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod events;
pub mod forms;
pub mod keys;
pub mod loader;
pub mod logging;
pub mod nav;
pub mod notifications;
pub mod state;
pub mod theme;
pub mod views;
pub mod widgets;
