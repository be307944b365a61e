/// loan application - capture a form, watch the schedule follow it, submit
use susu_loans::chrono::{TimeZone, Utc};
use susu_loans::{format_money, FormField, InterestMethod, LenderConfig, LoanApplication};
use susu_loans::{SafeTimeProvider, TimeSource, Uuid};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
    ));
    let config = LenderConfig::for_company(Uuid::new_v4());
    let cedi = config.currency.clone();
    let mut app = LoanApplication::new(config, &time);

    app.update(FormField::CustomerId, "cust-0042");
    app.update(FormField::LoanCategory, "Agricultural Loan");
    app.update(FormField::LoanAmount, "15000");
    app.update(FormField::InterestRate, "18");
    app.update(FormField::Duration, "12");
    app.set_interest_method(InterestMethod::Reducing);
    app.update(FormField::Purpose, "Irrigation pump for maize farm");
    app.update(FormField::Guarantor, "Adwoa Sarpong");
    app.update(FormField::GuarantorPhone, "0277000111");

    if let Some(result) = app.calculations() {
        println!("month  payment        principal      interest       balance");
        for p in &result.schedule {
            println!(
                "{:>5}  {:>13}  {:>13}  {:>13}  {:>13}",
                p.month,
                format_money(p.payment, &cedi),
                format_money(p.principal_portion, &cedi),
                format_money(p.interest_portion, &cedi),
                format_money(p.balance_after, &cedi),
            );
        }
    }

    let submission = app.submit()?;
    println!("{}", submission.to_json()?);

    Ok(())
}
