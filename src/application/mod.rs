pub mod form;
pub mod group;
pub mod submission;

use std::str::FromStr;

use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use log::{debug, info, warn};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::amortization::{
    calendar, compute_schedule, AmortizationResult, LoanTerms, MAX_TERM_MONTHS,
};
use crate::config::LenderConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result, ValidationErrors};
use crate::events::{Event, EventStore};
use crate::types::{ApplicationId, InterestMethod, LoanCategory, LoanType};

pub use form::{FormField, LoanFormData};
pub use group::{Customer, GroupMember};
pub use submission::LoanSubmission;

use form::non_empty;

/// key for group membership messages
pub const GROUP_MEMBER_KEY: &str = "group_member";

/// a loan application being captured by staff
///
/// Holds the raw form, keeps the amortization result in step with the
/// calculator inputs, and turns a valid form into a [`LoanSubmission`].
///
/// Every calculator edit records an [`Event`], and the store outlives
/// [`reset`](Self::reset). A long-lived application must be drained with
/// [`take_events`](Self::take_events), typically after each submission.
pub struct LoanApplication {
    id: ApplicationId,
    config: LenderConfig,
    time: SafeTimeProvider,
    form: LoanFormData,
    errors: ValidationErrors,
    calculations: Option<AmortizationResult>,
    events: EventStore,
}

impl LoanApplication {
    pub fn new(config: LenderConfig, time: &SafeTimeProvider) -> Self {
        let form = LoanFormData::new(&config, time.now().date_naive());
        Self {
            id: Uuid::new_v4(),
            config,
            time: time.clone(),
            form,
            errors: ValidationErrors::new(),
            calculations: None,
            events: EventStore::new(),
        }
    }

    pub fn id(&self) -> ApplicationId {
        self.id
    }

    pub fn form(&self) -> &LoanFormData {
        &self.form
    }

    pub fn config(&self) -> &LenderConfig {
        &self.config
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// latest schedule, `None` while the calculator inputs are incomplete
    pub fn calculations(&self) -> Option<&AmortizationResult> {
        self.calculations.as_ref()
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    /// set a text input
    ///
    /// Clears the field's validation message, fills the disbursed amount
    /// from the loan amount while it is blank, and recalculates when a
    /// calculator input changed.
    pub fn update(&mut self, field: FormField, value: impl Into<String>) {
        *field.slot(&mut self.form) = value.into();
        self.errors.clear_field(field.key());

        if field == FormField::LoanAmount
            && non_empty(&self.form.loan_amount).is_some()
            && non_empty(&self.form.disbursed_amount).is_none()
        {
            self.form.disbursed_amount = self.form.loan_amount.clone();
        }

        if field.affects_schedule() {
            self.recalculate();
        }
    }

    pub fn set_loan_type(&mut self, loan_type: LoanType) {
        self.form.loan_type = loan_type;
        self.errors.clear_field("loan_type");
    }

    pub fn set_interest_method(&mut self, method: InterestMethod) {
        self.form.interest_method = method;
        self.recalculate();
    }

    /// calculator terms from the current inputs
    ///
    /// Fails when an input is missing, unparsable, or outside the
    /// calculator's preconditions.
    pub fn terms(&self) -> Result<LoanTerms> {
        let amount = parse_money("loan_amount", &self.form.loan_amount)?;
        let rate = parse_decimal("interest_rate", &self.form.interest_rate)?;
        let months = parse_months(&self.form.duration)?;
        let start = parse_date("request_date", &self.form.request_date)?;

        LoanTerms::new(
            amount,
            Rate::from_percent(rate),
            months,
            start,
            self.form.interest_method,
        )
    }

    /// rerun the calculator if its inputs are complete and valid
    ///
    /// On success the derived form fields are rewritten. Otherwise any
    /// previous result is dropped, so no stale schedule survives an edit.
    pub fn recalculate(&mut self) -> Option<&AmortizationResult> {
        match self.terms() {
            Ok(terms) => {
                let result = compute_schedule(&terms);
                self.write_derived(&result);
                self.events.emit(Event::ScheduleCalculated {
                    application_id: self.id,
                    method: terms.method(),
                    monthly_payment: result.monthly_payment,
                    total_interest: result.total_interest,
                    maturity_date: result.maturity_date,
                });
                self.calculations = Some(result);
            }
            Err(reason) => {
                debug!("application {}: calculation skipped: {}", self.id, reason);
                self.form.clear_derived();
                self.calculations = None;
                self.events.emit(Event::CalculationSkipped {
                    application_id: self.id,
                    reason: reason.to_string(),
                });
            }
        }
        self.calculations.as_ref()
    }

    fn write_derived(&mut self, result: &AmortizationResult) {
        self.form.maturity_date = calendar::to_iso_date(result.maturity_date);
        self.form.monthly_payment = result.monthly_payment.to_string();
        self.form.total_payable = result.total_repayment.to_string();
        self.form.total_interest = result.total_interest.to_string();
        self.form.outstanding_balance = (-result.total_repayment).to_string();
    }

    /// add a customer to the group with the given share
    pub fn add_group_member(
        &mut self,
        available: &[Customer],
        customer_id: &str,
        loan_share: &str,
    ) -> Result<GroupMember> {
        let (Some(customer_id), Some(share)) = (non_empty(customer_id), non_empty(loan_share))
        else {
            self.errors
                .insert(GROUP_MEMBER_KEY, "Please select a customer and enter loan share");
            return Err(LoanError::MemberSelectionMissing);
        };

        let share = match Money::from_str(share) {
            Ok(share) if share.is_positive() => share,
            _ => {
                self.errors
                    .insert(GROUP_MEMBER_KEY, "Loan share must be greater than 0");
                return Err(LoanError::ParseError {
                    field: "loan_share".to_string(),
                    value: share.to_string(),
                });
            }
        };
        if self.total_group_share().checked_add(share).is_none() {
            self.errors.insert(GROUP_MEMBER_KEY, "Loan share is too large");
            return Err(LoanError::OutOfRange {
                field: "loan_share".to_string(),
                message: format!("{share} takes the group total out of range"),
            });
        }

        let customer = available
            .iter()
            .find(|c| c.id == customer_id)
            .ok_or_else(|| LoanError::CustomerNotFound {
                id: customer_id.to_string(),
            })?;

        if self
            .form
            .group_members
            .iter()
            .any(|m| m.customer_id == customer.id)
        {
            self.errors
                .insert(GROUP_MEMBER_KEY, "Customer already added to group");
            return Err(LoanError::DuplicateMember {
                id: customer.id.clone(),
            });
        }

        let member = GroupMember::from_customer(customer, share);
        self.form.group_members.push(member.clone());
        self.errors.clear_field(GROUP_MEMBER_KEY);
        self.events.emit(Event::GroupMemberAdded {
            application_id: self.id,
            customer_id: customer.id.clone(),
            loan_share: share,
        });

        Ok(member)
    }

    pub fn remove_group_member(&mut self, customer_id: &str) -> Option<GroupMember> {
        let idx = self
            .form
            .group_members
            .iter()
            .position(|m| m.customer_id == customer_id)?;
        let removed = self.form.group_members.remove(idx);
        self.events.emit(Event::GroupMemberRemoved {
            application_id: self.id,
            customer_id: removed.customer_id.clone(),
        });
        Some(removed)
    }

    pub fn total_group_share(&self) -> Money {
        group::total_share(&self.form.group_members)
    }

    /// check every field, replacing the stored messages
    pub fn validate(&mut self) -> Result<()> {
        let errors = validate_form(&self.form, &self.config);
        self.errors = errors.clone();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(LoanError::Validation(errors))
        }
    }

    /// validate, build the submission and reset the form
    ///
    /// A failed validation leaves the form untouched.
    pub fn submit(&mut self) -> Result<LoanSubmission> {
        if let Err(err) = self.validate() {
            warn!("application {} rejected: {}", self.id, err);
            self.events.emit(Event::ValidationFailed {
                application_id: self.id,
                fields: self.errors.iter().map(|(k, _)| k.to_string()).collect(),
                timestamp: self.time.now(),
            });
            return Err(err);
        }

        let submission = self.build_submission()?;
        info!(
            "application {} submitted: {}",
            self.id,
            serde_json::to_string(&submission)?
        );
        self.events.emit(Event::ApplicationSubmitted {
            application_id: self.id,
            loan_type: submission.loan_type,
            amount: submission.loan_amount,
            timestamp: submission.submitted_at,
        });

        self.reset();
        Ok(submission)
    }

    fn build_submission(&self) -> Result<LoanSubmission> {
        let form = &self.form;
        let loan_amount = parse_money("loan_amount", &form.loan_amount)?;
        let calculations = self.calculations.clone();

        let (customer_id, group_name, group_members) = match form.loan_type {
            LoanType::Individual => (non_empty(&form.customer_id).map(String::from), None, Vec::new()),
            LoanType::Group => (
                None,
                non_empty(&form.group_name).map(String::from),
                form.group_members.clone(),
            ),
        };

        let disbursed_amount = match non_empty(&form.disbursed_amount) {
            Some(s) => parse_money("disbursed_amount", s)?,
            None => loan_amount,
        };

        let collateral_value = non_empty(&form.collateral_value)
            .map(|s| parse_money("collateral_value", s))
            .transpose()?;

        let disbursement_date = non_empty(&form.disbursement_date)
            .map(|s| parse_date("disbursement_date", s))
            .transpose()?;

        Ok(LoanSubmission {
            application_id: self.id,
            loan_type: form.loan_type,
            customer_id,
            group_name,
            group_members,
            loan_category: LoanCategory::from_str(&form.loan_category)?,
            loan_amount,
            interest_rate: parse_decimal("interest_rate", &form.interest_rate)?,
            duration: parse_months(&form.duration)?,
            interest_method: form.interest_method,
            request_date: parse_date("request_date", &form.request_date)?,
            disbursement_date,
            maturity_date: calculations.as_ref().map(|c| c.maturity_date),
            disbursed_amount,
            monthly_payment: calculations.as_ref().map(|c| c.monthly_payment),
            total_payable: calculations.as_ref().map(|c| c.total_repayment),
            total_interest: calculations.as_ref().map(|c| c.total_interest),
            collateral: non_empty(&form.collateral).map(String::from),
            collateral_value,
            guarantor: form.guarantor.trim().to_string(),
            guarantor_phone: form.guarantor_phone.trim().to_string(),
            guarantor_address: non_empty(&form.guarantor_address).map(String::from),
            guarantor_relationship: non_empty(&form.guarantor_relationship).map(String::from),
            purpose: form.purpose.trim().to_string(),
            description: non_empty(&form.description).map(String::from),
            created_by: form.created_by,
            company_id: form.company_id,
            created_by_type: form.created_by_type,
            status: form.status,
            amount_paid: parse_money("amount_paid", &form.amount_paid)?,
            outstanding_balance: calculations
                .as_ref()
                .map(|c| -c.total_repayment)
                .unwrap_or(Money::ZERO),
            calculations,
            submitted_at: self.time.now(),
        })
    }

    /// restore a blank form for the next application
    pub fn reset(&mut self) {
        info!("application {} reset", self.id);
        self.events.emit(Event::FormReset {
            application_id: self.id,
            timestamp: self.time.now(),
        });

        self.id = Uuid::new_v4();
        self.form = LoanFormData::new(&self.config, self.time.now().date_naive());
        self.errors.clear();
        self.calculations = None;
    }
}

/// per-field messages for a form
///
/// The duration must be one the lender offers, and figures that parse but
/// cannot be scheduled are reported against the field at fault.
pub fn validate_form(form: &LoanFormData, config: &LenderConfig) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    match form.loan_type {
        LoanType::Individual => {
            if non_empty(&form.customer_id).is_none() {
                errors.insert("customer_id", "Please select a customer");
            }
        }
        LoanType::Group => {
            if non_empty(&form.group_name).is_none() {
                errors.insert("group_name", "Please enter a group name");
            }
            if form.group_members.len() < 2 {
                errors.insert("group_members", "Group loan requires at least 2 members");
            }
        }
    }

    if LoanCategory::from_str(&form.loan_category).is_err() {
        errors.insert("loan_category", "Please select loan category");
    }
    if !parse_money("loan_amount", &form.loan_amount).is_ok_and(|m| m.is_positive()) {
        errors.insert("loan_amount", "Loan amount must be greater than 0");
    }
    if !parse_decimal("interest_rate", &form.interest_rate).is_ok_and(|r| r >= Decimal::ZERO) {
        errors.insert("interest_rate", "Please enter a valid interest rate");
    }
    match parse_months(&form.duration) {
        Ok(months) if months > 0 && config.is_offered_duration(months) => {}
        Ok(months) if months > 0 => {
            errors.insert("duration", "Please select one of the offered durations");
        }
        _ => errors.insert("duration", "Duration must be greater than 0"),
    }
    if parse_date("request_date", &form.request_date).is_err() {
        errors.insert("request_date", "Please select request date");
    }
    if non_empty(&form.disbursement_date)
        .is_some_and(|s| parse_date("disbursement_date", s).is_err())
    {
        errors.insert("disbursement_date", "Please enter a valid disbursement date");
    }
    if non_empty(&form.disbursed_amount)
        .is_some_and(|s| !parse_money("disbursed_amount", s).is_ok_and(|m| !m.is_negative()))
    {
        errors.insert("disbursed_amount", "Please enter a valid disbursed amount");
    }
    if non_empty(&form.collateral_value)
        .is_some_and(|s| !parse_money("collateral_value", s).is_ok_and(|m| !m.is_negative()))
    {
        errors.insert("collateral_value", "Please enter a valid collateral value");
    }
    if let Err(err) = schedule_terms(form) {
        match err {
            LoanError::OutOfRange { field, .. } if field == "annual_rate" => {
                errors.insert("interest_rate", "Interest rate is too high");
            }
            LoanError::OutOfRange { .. } => {
                errors.insert("loan_amount", "Loan amount is too large");
            }
            _ => {}
        }
    }
    if non_empty(&form.purpose).is_none() {
        errors.insert("purpose", "Please enter loan purpose");
    }
    if non_empty(&form.guarantor).is_none() {
        errors.insert("guarantor", "Please enter guarantor name");
    }
    if non_empty(&form.guarantor_phone).is_none() {
        errors.insert("guarantor_phone", "Please enter guarantor phone");
    }

    errors
}

/// calculator terms for figures that pass the field checks
fn schedule_terms(form: &LoanFormData) -> Result<Option<LoanTerms>> {
    let (Ok(amount), Ok(rate), Ok(months), Ok(start)) = (
        parse_money("loan_amount", &form.loan_amount),
        parse_decimal("interest_rate", &form.interest_rate),
        parse_months(&form.duration),
        parse_date("request_date", &form.request_date),
    ) else {
        return Ok(None);
    };
    if !amount.is_positive() || rate <= Decimal::ZERO || months == 0 || months > MAX_TERM_MONTHS {
        return Ok(None);
    }

    LoanTerms::new(amount, Rate::from_percent(rate), months, start, form.interest_method).map(Some)
}

fn parse_error(field: &str, value: &str) -> LoanError {
    LoanError::ParseError {
        field: field.to_string(),
        value: value.to_string(),
    }
}

fn parse_money(field: &str, value: &str) -> Result<Money> {
    let s = non_empty(value).ok_or_else(|| parse_error(field, value))?;
    Money::from_str(s).map_err(|_| parse_error(field, value))
}

fn parse_decimal(field: &str, value: &str) -> Result<Decimal> {
    let s = non_empty(value).ok_or_else(|| parse_error(field, value))?;
    Decimal::from_str(s).map_err(|_| parse_error(field, value))
}

fn parse_months(value: &str) -> Result<u32> {
    let s = non_empty(value).ok_or_else(|| parse_error("duration", value))?;
    s.parse::<u32>().map_err(|_| parse_error("duration", value))
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    calendar::parse_iso_date(value).ok_or_else(|| LoanError::InvalidDate {
        message: format!("{field}: {value:?} is not a YYYY-MM-DD date"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::TimeSource;

    fn time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2025, 1, 1, 9, 30, 0).unwrap(),
        ))
    }

    fn application() -> LoanApplication {
        LoanApplication::new(LenderConfig::for_company(Uuid::new_v4()), &time())
    }

    fn customers() -> Vec<Customer> {
        vec![
            Customer::new("c-1", "Kofi Boateng", "0241111111"),
            Customer::new("c-2", "Abena Owusu", "0242222222"),
            Customer::new("c-3", "Yaw Asante", "0243333333"),
        ]
    }

    fn fill_individual(app: &mut LoanApplication) {
        app.update(FormField::CustomerId, "c-1");
        app.update(FormField::LoanCategory, "Business Loan");
        app.update(FormField::LoanAmount, "10000");
        app.update(FormField::InterestRate, "15");
        app.update(FormField::Duration, "12");
        app.update(FormField::Purpose, "Restock provisions shop");
        app.update(FormField::Guarantor, "Esi Mensah");
        app.update(FormField::GuarantorPhone, "0209999999");
    }

    #[test]
    fn test_request_date_defaults_to_today() {
        let app = application();
        assert_eq!(app.form().request_date, "2025-01-01");
        assert!(app.calculations().is_none());
    }

    #[test]
    fn test_calculation_waits_for_all_inputs() {
        let mut app = application();
        app.update(FormField::LoanAmount, "10000");
        app.update(FormField::InterestRate, "15");
        assert!(app.calculations().is_none());
        assert!(app.form().monthly_payment.is_empty());

        app.update(FormField::Duration, "12");
        let result = app.calculations().expect("all inputs present");
        assert_eq!(result.total_interest, Money::from_major(1_500));

        assert_eq!(app.form().monthly_payment, "958.33");
        assert_eq!(app.form().total_payable, "11500.00");
        assert_eq!(app.form().total_interest, "1500.00");
        assert_eq!(app.form().outstanding_balance, "-11500.00");
        assert_eq!(app.form().maturity_date, "2026-01-01");
    }

    #[test]
    fn test_method_change_recalculates() {
        let mut app = application();
        app.update(FormField::LoanAmount, "10000");
        app.update(FormField::InterestRate, "12");
        app.update(FormField::Duration, "12");
        assert_eq!(app.form().monthly_payment, "933.33");

        app.set_interest_method(InterestMethod::Reducing);
        assert_eq!(app.form().monthly_payment, "888.49");
        assert_eq!(app.form().total_interest, "661.85");
    }

    #[test]
    fn test_invalid_input_drops_previous_result() {
        let mut app = application();
        app.update(FormField::LoanAmount, "5000");
        app.update(FormField::InterestRate, "10");
        app.update(FormField::Duration, "6");
        assert!(app.calculations().is_some());

        app.update(FormField::Duration, "0");
        assert!(app.calculations().is_none());
        assert!(app.form().monthly_payment.is_empty());
        assert_eq!(app.form().outstanding_balance, "0");

        app.update(FormField::Duration, "six");
        assert!(app.calculations().is_none());
        assert!(matches!(
            app.events().last(),
            Some(Event::CalculationSkipped { .. })
        ));
    }

    #[test]
    fn test_zero_rate_is_valid_but_not_calculated() {
        let mut app = application();
        fill_individual(&mut app);
        app.update(FormField::InterestRate, "0");
        assert!(app.calculations().is_none());

        let submission = app.submit().unwrap();
        assert_eq!(submission.interest_rate, Decimal::ZERO);
        assert_eq!(submission.monthly_payment, None);
        assert_eq!(submission.outstanding_balance, Money::ZERO);
    }

    #[test]
    fn test_disbursed_amount_follows_loan_amount_once() {
        let mut app = application();
        app.update(FormField::LoanAmount, "2000");
        assert_eq!(app.form().disbursed_amount, "2000");

        app.update(FormField::DisbursedAmount, "1800");
        app.update(FormField::LoanAmount, "2500");
        assert_eq!(app.form().disbursed_amount, "1800");
    }

    #[test]
    fn test_group_membership() {
        let mut app = application();
        app.set_loan_type(LoanType::Group);
        let available = customers();

        assert!(matches!(
            app.add_group_member(&available, "", "100"),
            Err(LoanError::MemberSelectionMissing)
        ));
        assert_eq!(
            app.errors().get(GROUP_MEMBER_KEY),
            Some("Please select a customer and enter loan share")
        );

        app.add_group_member(&available, "c-1", "600").unwrap();
        assert!(!app.errors().contains(GROUP_MEMBER_KEY));

        assert!(matches!(
            app.add_group_member(&available, "c-1", "50"),
            Err(LoanError::DuplicateMember { .. })
        ));
        assert_eq!(app.errors().get(GROUP_MEMBER_KEY), Some("Customer already added to group"));

        assert!(matches!(
            app.add_group_member(&available, "c-9", "50"),
            Err(LoanError::CustomerNotFound { .. })
        ));
        assert!(app.add_group_member(&available, "c-2", "-5").is_err());

        app.add_group_member(&available, "c-2", "400").unwrap();
        assert_eq!(app.total_group_share(), Money::from_major(1_000));

        let removed = app.remove_group_member("c-1").unwrap();
        assert_eq!(removed.customer_name, "Kofi Boateng");
        assert!(app.remove_group_member("c-1").is_none());
        assert_eq!(app.total_group_share(), Money::from_major(400));
    }

    #[test]
    fn test_validation_messages() {
        let mut app = application();
        let err = app.validate().unwrap_err();
        let LoanError::Validation(errors) = err else {
            panic!("expected validation error");
        };

        assert_eq!(errors.get("customer_id"), Some("Please select a customer"));
        assert_eq!(errors.get("loan_category"), Some("Please select loan category"));
        assert_eq!(errors.get("loan_amount"), Some("Loan amount must be greater than 0"));
        assert_eq!(errors.get("interest_rate"), Some("Please enter a valid interest rate"));
        assert_eq!(errors.get("duration"), Some("Duration must be greater than 0"));
        assert_eq!(errors.get("purpose"), Some("Please enter loan purpose"));
        assert_eq!(errors.get("guarantor"), Some("Please enter guarantor name"));
        assert_eq!(errors.get("guarantor_phone"), Some("Please enter guarantor phone"));
        // defaulted to today
        assert!(!errors.contains("request_date"));

        // editing a field clears its message
        app.update(FormField::Purpose, "School fees");
        assert!(!app.errors().contains("purpose"));
        assert!(app.errors().contains("guarantor"));
    }

    #[test]
    fn test_group_validation() {
        let mut app = application();
        fill_individual(&mut app);
        app.set_loan_type(LoanType::Group);
        app.add_group_member(&customers(), "c-1", "5000").unwrap();

        let LoanError::Validation(errors) = app.validate().unwrap_err() else {
            panic!("expected validation error");
        };
        assert_eq!(errors.get("group_name"), Some("Please enter a group name"));
        assert_eq!(errors.get("group_members"), Some("Group loan requires at least 2 members"));
        assert!(!errors.contains("customer_id"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut app = application();
        fill_individual(&mut app);
        app.update(FormField::InterestRate, "-1");
        assert!(app.validate().is_err());
        assert!(app.errors().contains("interest_rate"));
    }

    #[test]
    fn test_submit_builds_payload_and_resets() {
        let mut app = application();
        let first_id = app.id();
        fill_individual(&mut app);
        app.update(FormField::CollateralValue, "4000");

        let submission = app.submit().unwrap();
        assert_eq!(submission.application_id, first_id);
        assert_eq!(submission.customer_id.as_deref(), Some("c-1"));
        assert_eq!(submission.loan_category, LoanCategory::Business);
        assert_eq!(submission.loan_amount, Money::from_major(10_000));
        assert_eq!(submission.disbursed_amount, Money::from_major(10_000));
        assert_eq!(submission.duration, 12);
        assert_eq!(submission.total_interest, Some(Money::from_major(1_500)));
        assert_eq!(submission.outstanding_balance, Money::from_major(-11_500));
        assert_eq!(submission.collateral_value, Some(Money::from_major(4_000)));
        assert_eq!(submission.created_by_type, crate::types::CreatorType::Company);
        assert!(submission.calculations.is_some());

        let json = submission.to_json().unwrap();
        assert!(json.contains("\"loanAmount\""));
        assert!(json.contains("\"interestMethod\": \"fixed\""));

        // form is blank again under a new id
        assert_ne!(app.id(), first_id);
        assert!(app.form().loan_amount.is_empty());
        assert!(app.calculations().is_none());
        assert!(app
            .events()
            .iter()
            .any(|e| matches!(e, Event::ApplicationSubmitted { .. })));
        assert!(matches!(app.events().last(), Some(Event::FormReset { .. })));
    }

    #[test]
    fn test_oversized_figures_skip_calculation() {
        let mut app = application();
        app.update(FormField::InterestRate, "15");
        app.update(FormField::Duration, "12");
        app.update(FormField::LoanAmount, "10000000000000000000000000000");
        assert!(app.calculations().is_none());
        assert!(matches!(
            app.events().last(),
            Some(Event::CalculationSkipped { .. })
        ));

        app.update(FormField::LoanAmount, "100000000000000000");
        assert!(app.calculations().is_some());
        app.update(FormField::InterestRate, "150000000000000");
        assert!(app.calculations().is_none());
        assert!(app.form().monthly_payment.is_empty());
    }

    #[test]
    fn test_oversized_figures_fail_validation() {
        let mut app = application();
        fill_individual(&mut app);
        app.update(FormField::LoanAmount, "10000000000000000000000000000");
        assert!(app.validate().is_err());
        assert_eq!(app.errors().get("loan_amount"), Some("Loan amount is too large"));

        app.update(FormField::LoanAmount, "10000");
        app.update(FormField::InterestRate, "79228162514264337593543950335");
        assert!(matches!(app.submit(), Err(LoanError::Validation(_))));
        assert_eq!(app.errors().get("interest_rate"), Some("Interest rate is too high"));
        assert!(!app.errors().contains("loan_amount"));
    }

    #[test]
    fn test_oversized_group_share_rejected() {
        let mut app = application();
        app.set_loan_type(LoanType::Group);
        let available = customers();

        app.add_group_member(&available, "c-1", "79228162514264337593543950335")
            .unwrap();
        assert!(matches!(
            app.add_group_member(&available, "c-2", "79228162514264337593543950335"),
            Err(LoanError::OutOfRange { .. })
        ));
        assert_eq!(app.errors().get(GROUP_MEMBER_KEY), Some("Loan share is too large"));
        assert_eq!(app.form().group_members.len(), 1);
    }

    #[test]
    fn test_duration_must_be_offered() {
        let mut app = application();
        fill_individual(&mut app);
        app.update(FormField::Duration, "700");

        assert!(matches!(app.submit(), Err(LoanError::Validation(_))));
        assert_eq!(
            app.errors().get("duration"),
            Some("Please select one of the offered durations")
        );

        app.update(FormField::Duration, "7");
        assert!(app.calculations().is_some());
        assert!(app.validate().is_err());

        let mut config = LenderConfig::for_company(Uuid::new_v4());
        config.allowed_durations = vec![7];
        let mut custom = LoanApplication::new(config, &time());
        fill_individual(&mut custom);
        custom.update(FormField::Duration, "7");
        assert!(custom.validate().is_ok());
    }

    #[test]
    fn test_events_drained_between_applications() {
        let mut app = application();
        fill_individual(&mut app);
        app.submit().unwrap();

        let first = app.take_events();
        assert!(first
            .iter()
            .any(|e| matches!(e, Event::ApplicationSubmitted { .. })));
        assert!(app.events().is_empty());

        fill_individual(&mut app);
        app.submit().unwrap();
        let second = app.take_events();
        let submitted = second
            .iter()
            .filter(|e| matches!(e, Event::ApplicationSubmitted { .. }))
            .count();
        assert_eq!(submitted, 1);
    }

    #[test]
    fn test_failed_submit_keeps_form() {
        let mut app = application();
        app.update(FormField::LoanAmount, "300");

        assert!(matches!(app.submit(), Err(LoanError::Validation(_))));
        assert_eq!(app.form().loan_amount, "300");
        assert!(matches!(
            app.events().last(),
            Some(Event::ValidationFailed { .. })
        ));
    }
}
