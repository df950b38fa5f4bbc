//! View routing.
//!
//! Each page has a route path. There are no guards; unknown paths land on the
//! dashboard.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    Dashboard,
    Companies,
    Campaigns,
    Messages,
    Leads,
    Automation,
    Products,
    Templates,
    Settings,
    Analytics,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Companies => "Companies",
            View::Campaigns => "Campaigns",
            View::Messages => "Messages",
            View::Leads => "Leads",
            View::Automation => "Automation",
            View::Products => "Products",
            View::Templates => "Templates",
            View::Settings => "Settings",
            View::Analytics => "Analytics",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            View::Dashboard => "/",
            View::Companies => "/companies",
            View::Campaigns => "/campaigns",
            View::Messages => "/messages",
            View::Leads => "/leads",
            View::Automation => "/automation",
            View::Products => "/products",
            View::Templates => "/templates",
            View::Settings => "/settings",
            View::Analytics => "/analytics",
        }
    }

    /// Exact route match, ignoring a trailing slash.
    pub fn parse_path(path: &str) -> Option<View> {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        Self::all().iter().copied().find(|v| v.path() == normalized)
    }

    pub fn from_path(path: &str) -> View {
        Self::parse_path(path).unwrap_or(View::Dashboard)
    }

    pub fn all() -> &'static [View] {
        &[
            View::Dashboard,
            View::Companies,
            View::Campaigns,
            View::Messages,
            View::Leads,
            View::Automation,
            View::Products,
            View::Templates,
            View::Settings,
            View::Analytics,
        ]
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|v| v == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<View> {
        Self::all().get(index).copied()
    }

    pub fn next(&self) -> View {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> View {
        let all = Self::all();
        let idx = self.index();
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        all[prev]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_view_routes_to_itself() {
        for view in View::all() {
            assert_eq!(View::from_path(view.path()), *view);
        }
    }

    #[test]
    fn test_unknown_paths_route_to_dashboard() {
        assert_eq!(View::from_path("/companies/"), View::Companies);
        assert_eq!(View::from_path("/reports"), View::Dashboard);
        assert_eq!(View::parse_path("/reports"), None);
    }

    #[test]
    fn test_wraparound() {
        assert_eq!(View::Analytics.next(), View::Dashboard);
        assert_eq!(View::Dashboard.previous(), View::Analytics);
    }
}
