use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::amortization::MAX_TERM_MONTHS;
use crate::errors::{LoanError, Result};
use crate::format::CurrencyFormat;
use crate::types::{CreatorType, InterestMethod};

/// loan durations offered on the application form, in months
pub const DEFAULT_DURATIONS: [u32; 7] = [3, 6, 12, 18, 24, 36, 60];

/// lender-wide settings shared by every application captured in a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LenderConfig {
    pub company_id: Uuid,
    /// the signed-in user; equal to `company_id` for the company account
    pub user_id: Uuid,
    #[serde(default)]
    pub currency: CurrencyFormat,
    #[serde(default = "default_durations")]
    pub allowed_durations: Vec<u32>,
    #[serde(default)]
    pub default_interest_method: InterestMethod,
}

fn default_durations() -> Vec<u32> {
    DEFAULT_DURATIONS.to_vec()
}

impl LenderConfig {
    /// configuration for the company account acting on its own behalf
    pub fn for_company(company_id: Uuid) -> Self {
        Self::for_staff(company_id, company_id)
    }

    /// configuration for a staff member acting for a company
    pub fn for_staff(company_id: Uuid, user_id: Uuid) -> Self {
        Self {
            company_id,
            user_id,
            currency: CurrencyFormat::default(),
            allowed_durations: default_durations(),
            default_interest_method: InterestMethod::default(),
        }
    }

    /// load and validate from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.currency.code.trim().is_empty() {
            return Err(LoanError::InvalidConfiguration {
                message: "currency code must not be empty".to_string(),
            });
        }
        if self.allowed_durations.is_empty() {
            return Err(LoanError::InvalidConfiguration {
                message: "at least one loan duration must be offered".to_string(),
            });
        }
        if self.allowed_durations.contains(&0) {
            return Err(LoanError::InvalidConfiguration {
                message: "loan durations must be positive".to_string(),
            });
        }
        if let Some(months) = self.allowed_durations.iter().find(|&&m| m > MAX_TERM_MONTHS) {
            return Err(LoanError::InvalidConfiguration {
                message: format!("{months} months exceeds the {MAX_TERM_MONTHS} month limit"),
            });
        }
        Ok(())
    }

    pub fn creator_type(&self) -> CreatorType {
        CreatorType::for_user(self.user_id, self.company_id)
    }

    pub fn is_offered_duration(&self, months: u32) -> bool {
        self.allowed_durations.contains(&months)
    }
}
