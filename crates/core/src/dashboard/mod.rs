//! Dashboard read models.

pub mod service;
pub mod types;


pub use service::DashboardService;
pub use types::{
    BaseStats, CategorySpending, DashboardQuery, DashboardStats, MonthSummary, MonthlyOverview,
    UNCATEGORIZED_LABEL,
};
