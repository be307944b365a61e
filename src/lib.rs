pub mod amortization;
pub mod application;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod format;
pub mod reporting;
pub mod types;

// re-export key types
pub use amortization::{
    compute_schedule, AmortizationCalculator, AmortizationResult, LoanTerms, PeriodEntry,
};
pub use application::{Customer, FormField, GroupMember, LoanApplication, LoanSubmission};
pub use config::LenderConfig;
pub use decimal::{Money, Rate};
pub use errors::{LoanError, Result, ValidationErrors};
pub use events::{Event, EventStore};
pub use format::{format_money, format_percentage, CurrencyFormat};
pub use reporting::{ExpenseRecord, OperationalMetrics, ProfitAndLoss};
pub use types::{
    ApplicationId, ApplicationStatus, CreatorType, InterestMethod, LoanCategory, LoanType,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
