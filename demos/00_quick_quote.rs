/// quick quote - compare the three interest methods for one loan
use susu_loans::chrono::NaiveDate;
use susu_loans::{compute_schedule, format_money, format_percentage, CurrencyFormat};
use susu_loans::{InterestMethod, LoanTerms, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let start = NaiveDate::from_ymd_opt(2025, 1, 1).ok_or("bad start date")?;
    let terms = LoanTerms::new(
        Money::from_major(10_000),
        Rate::from_percentage(15),
        12,
        start,
        InterestMethod::Fixed,
    )?;
    let cedi = CurrencyFormat::ghana_cedi();

    for method in InterestMethod::ALL {
        let result = compute_schedule(&terms.clone().with_method(method));
        println!(
            "{:<9} monthly {:>12}  interest {:>12}  total {:>12}  effective {:>7}  matures {}",
            method.to_string(),
            format_money(result.monthly_payment, &cedi),
            format_money(result.total_interest, &cedi),
            format_money(result.total_repayment, &cedi),
            format_percentage(result.effective_rate, 2),
            result.maturity_date,
        );
    }

    Ok(())
}
