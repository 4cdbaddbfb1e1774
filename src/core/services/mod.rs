pub mod budget_service;
pub mod report_service;

pub use budget_service::BudgetService;
pub use report_service::{DashboardReport, HistoryReport, ReportService, StatsReport, TransactionRow};
