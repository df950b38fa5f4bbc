//! Reusable widget components.

pub mod badge;
pub mod card;
pub mod chart;
pub mod detail;
pub mod filter;
pub mod form;
pub mod gauge;
pub mod modal;
pub mod pagination;
pub mod table;

pub use badge::Badge;
pub use card::StatCard;
pub use chart::DailyChart;
pub use detail::DetailPanel;
pub use filter::{FilterBar, FilterOption};
pub use form::FormView;
pub use gauge::RateGauge;
pub use modal::{centered_rect, ModalFrame};
pub use pagination::PaginationBar;
pub use table::{Column, DataTable};
