use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::LoanError;

/// unique identifier for a loan application
pub type ApplicationId = uuid::Uuid;

/// interest accrual policy for a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InterestMethod {
    /// one flat charge of principal * rate, independent of term
    #[default]
    Fixed,
    /// equal monthly installments, interest on the declining balance
    Reducing,
    /// principal * rate pro-rated by term in years
    Flat,
}

impl InterestMethod {
    pub const ALL: [InterestMethod; 3] = [
        InterestMethod::Fixed,
        InterestMethod::Reducing,
        InterestMethod::Flat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InterestMethod::Fixed => "fixed",
            InterestMethod::Reducing => "reducing",
            InterestMethod::Flat => "flat",
        }
    }
}

impl fmt::Display for InterestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterestMethod {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(InterestMethod::Fixed),
            "reducing" => Ok(InterestMethod::Reducing),
            "flat" => Ok(InterestMethod::Flat),
            other => Err(LoanError::ParseError {
                field: "interest_method".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// borrower classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoanType {
    /// single borrower
    #[default]
    Individual,
    /// shared loan across at least two members
    Group,
}

/// loan product categories offered to customers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanCategory {
    #[serde(rename = "Business Loan")]
    Business,
    #[serde(rename = "Personal Loan")]
    Personal,
    #[serde(rename = "Agricultural Loan")]
    Agricultural,
    #[serde(rename = "Mortgage")]
    Mortgage,
    #[serde(rename = "Education Loan")]
    Education,
    #[serde(rename = "Auto Loan")]
    Auto,
    #[serde(rename = "Emergency Loan")]
    Emergency,
}

impl LoanCategory {
    pub const ALL: [LoanCategory; 7] = [
        LoanCategory::Business,
        LoanCategory::Personal,
        LoanCategory::Agricultural,
        LoanCategory::Mortgage,
        LoanCategory::Education,
        LoanCategory::Auto,
        LoanCategory::Emergency,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LoanCategory::Business => "Business Loan",
            LoanCategory::Personal => "Personal Loan",
            LoanCategory::Agricultural => "Agricultural Loan",
            LoanCategory::Mortgage => "Mortgage",
            LoanCategory::Education => "Education Loan",
            LoanCategory::Auto => "Auto Loan",
            LoanCategory::Emergency => "Emergency Loan",
        }
    }
}

impl fmt::Display for LoanCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LoanCategory {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        LoanCategory::ALL
            .iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| LoanError::ParseError {
                field: "loan_category".to_string(),
                value: wanted.to_string(),
            })
    }
}

/// application status as held by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Disbursed,
}

/// who captured the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatorType {
    /// the company account itself
    Company,
    /// a staff member acting for the company
    Staff,
}

impl CreatorType {
    /// company when the acting user is the company account
    pub fn for_user(user_id: uuid::Uuid, company_id: uuid::Uuid) -> Self {
        if user_id == company_id {
            CreatorType::Company
        } else {
            CreatorType::Staff
        }
    }
}
