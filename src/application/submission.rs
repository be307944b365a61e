use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::group::GroupMember;
use crate::amortization::AmortizationResult;
use crate::decimal::Money;
use crate::types::{
    ApplicationId, ApplicationStatus, CreatorType, InterestMethod, LoanCategory, LoanType,
};

/// typed loan application handed to the loan-creation backend
///
/// Derived figures are `None` when the calculator never ran, e.g. for a
/// zero interest rate which passes validation but not the calculator gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSubmission {
    pub application_id: ApplicationId,
    pub loan_type: LoanType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    pub group_members: Vec<GroupMember>,

    pub loan_category: LoanCategory,
    pub loan_amount: Money,
    /// annual percentage as entered, e.g. 15 for 15%
    pub interest_rate: Decimal,
    pub duration: u32,
    pub interest_method: InterestMethod,

    pub request_date: NaiveDate,
    pub disbursement_date: Option<NaiveDate>,
    pub maturity_date: Option<NaiveDate>,

    pub disbursed_amount: Money,
    pub monthly_payment: Option<Money>,
    pub total_payable: Option<Money>,
    pub total_interest: Option<Money>,

    pub collateral: Option<String>,
    pub collateral_value: Option<Money>,
    pub guarantor: String,
    pub guarantor_phone: String,
    pub guarantor_address: Option<String>,
    pub guarantor_relationship: Option<String>,

    pub purpose: String,
    pub description: Option<String>,

    pub created_by: Uuid,
    pub company_id: Uuid,
    pub created_by_type: CreatorType,
    pub status: ApplicationStatus,
    pub amount_paid: Money,
    /// negative while the borrower owes
    pub outstanding_balance: Money,

    pub calculations: Option<AmortizationResult>,
    pub submitted_at: DateTime<Utc>,
}

impl LoanSubmission {
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn is_group(&self) -> bool {
        self.loan_type == LoanType::Group
    }
}
