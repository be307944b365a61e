use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::group::GroupMember;
use crate::amortization::calendar;
use crate::config::LenderConfig;
use crate::types::{ApplicationStatus, CreatorType, InterestMethod, LoanType};

/// raw form state, as typed by staff
///
/// Numeric and date inputs stay as strings until submission; an empty string
/// means the field has not been filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanFormData {
    // classification
    pub loan_type: LoanType,
    pub customer_id: String,
    pub group_name: String,
    pub group_members: Vec<GroupMember>,

    // loan details
    pub loan_category: String,
    pub loan_amount: String,
    pub interest_rate: String,
    pub duration: String,
    pub interest_method: InterestMethod,

    // dates
    pub request_date: String,
    pub disbursement_date: String,
    pub maturity_date: String,

    // financials, derived by the calculator except disbursed_amount
    pub disbursed_amount: String,
    pub monthly_payment: String,
    pub total_payable: String,
    pub total_interest: String,

    // security
    pub collateral: String,
    pub collateral_value: String,
    pub guarantor: String,
    pub guarantor_phone: String,
    pub guarantor_address: String,
    pub guarantor_relationship: String,

    pub purpose: String,
    pub description: String,

    // system fields
    pub created_by: Uuid,
    pub company_id: Uuid,
    pub created_by_type: CreatorType,
    pub status: ApplicationStatus,
    pub amount_paid: String,
    pub outstanding_balance: String,
}

impl LoanFormData {
    /// blank form dated `today`
    pub fn new(config: &LenderConfig, today: NaiveDate) -> Self {
        Self {
            loan_type: LoanType::Individual,
            customer_id: String::new(),
            group_name: String::new(),
            group_members: Vec::new(),
            loan_category: String::new(),
            loan_amount: String::new(),
            interest_rate: String::new(),
            duration: String::new(),
            interest_method: config.default_interest_method,
            request_date: calendar::to_iso_date(today),
            disbursement_date: String::new(),
            maturity_date: String::new(),
            disbursed_amount: String::new(),
            monthly_payment: String::new(),
            total_payable: String::new(),
            total_interest: String::new(),
            collateral: String::new(),
            collateral_value: String::new(),
            guarantor: String::new(),
            guarantor_phone: String::new(),
            guarantor_address: String::new(),
            guarantor_relationship: String::new(),
            purpose: String::new(),
            description: String::new(),
            created_by: config.user_id,
            company_id: config.company_id,
            created_by_type: config.creator_type(),
            status: ApplicationStatus::Pending,
            amount_paid: "0".to_string(),
            outstanding_balance: "0".to_string(),
        }
    }

    /// drop everything the calculator wrote
    pub(crate) fn clear_derived(&mut self) {
        self.maturity_date.clear();
        self.monthly_payment.clear();
        self.total_payable.clear();
        self.total_interest.clear();
        self.outstanding_balance = "0".to_string();
    }
}

/// editable text inputs of the application form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    CustomerId,
    GroupName,
    LoanCategory,
    LoanAmount,
    InterestRate,
    Duration,
    RequestDate,
    DisbursementDate,
    DisbursedAmount,
    Collateral,
    CollateralValue,
    Guarantor,
    GuarantorPhone,
    GuarantorAddress,
    GuarantorRelationship,
    Purpose,
    Description,
}

impl FormField {
    /// key used for validation messages
    pub fn key(&self) -> &'static str {
        match self {
            FormField::CustomerId => "customer_id",
            FormField::GroupName => "group_name",
            FormField::LoanCategory => "loan_category",
            FormField::LoanAmount => "loan_amount",
            FormField::InterestRate => "interest_rate",
            FormField::Duration => "duration",
            FormField::RequestDate => "request_date",
            FormField::DisbursementDate => "disbursement_date",
            FormField::DisbursedAmount => "disbursed_amount",
            FormField::Collateral => "collateral",
            FormField::CollateralValue => "collateral_value",
            FormField::Guarantor => "guarantor",
            FormField::GuarantorPhone => "guarantor_phone",
            FormField::GuarantorAddress => "guarantor_address",
            FormField::GuarantorRelationship => "guarantor_relationship",
            FormField::Purpose => "purpose",
            FormField::Description => "description",
        }
    }

    /// inputs of the amortization calculator
    pub fn affects_schedule(&self) -> bool {
        matches!(
            self,
            FormField::LoanAmount
                | FormField::InterestRate
                | FormField::Duration
                | FormField::RequestDate
        )
    }

    pub(crate) fn slot<'a>(&self, form: &'a mut LoanFormData) -> &'a mut String {
        match self {
            FormField::CustomerId => &mut form.customer_id,
            FormField::GroupName => &mut form.group_name,
            FormField::LoanCategory => &mut form.loan_category,
            FormField::LoanAmount => &mut form.loan_amount,
            FormField::InterestRate => &mut form.interest_rate,
            FormField::Duration => &mut form.duration,
            FormField::RequestDate => &mut form.request_date,
            FormField::DisbursementDate => &mut form.disbursement_date,
            FormField::DisbursedAmount => &mut form.disbursed_amount,
            FormField::Collateral => &mut form.collateral,
            FormField::CollateralValue => &mut form.collateral_value,
            FormField::Guarantor => &mut form.guarantor,
            FormField::GuarantorPhone => &mut form.guarantor_phone,
            FormField::GuarantorAddress => &mut form.guarantor_address,
            FormField::GuarantorRelationship => &mut form.guarantor_relationship,
            FormField::Purpose => &mut form.purpose,
            FormField::Description => &mut form.description,
        }
    }
}

/// trimmed value, `None` when blank
pub(crate) fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
