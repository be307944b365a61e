pub mod pnl;

pub use pnl::{CommissionStats, ExpenseRecord, ExpenseShare, OperationalMetrics, ProfitAndLoss};
