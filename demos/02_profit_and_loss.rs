/// profit and loss - monthly statement with expense breakdown
use susu_loans::reporting::CommissionStats;
use susu_loans::{format_money, format_percentage, CurrencyFormat};
use susu_loans::{ExpenseRecord, Money, OperationalMetrics, ProfitAndLoss};

fn main() {
    env_logger::init();

    let metrics = OperationalMetrics {
        monthly_revenue: Money::from_major(48_000),
        monthly_expenses: Money::from_major(33_000),
    };
    let commission = CommissionStats {
        this_month_amount: Money::from_major(4_200),
    };
    let expenses = vec![
        ExpenseRecord::new("Salaries", Money::from_major(21_000)),
        ExpenseRecord::new("Rent", Money::from_major(6_000)),
        ExpenseRecord::new("Transport", Money::from_major(3_500)),
        ExpenseRecord::uncategorized(Money::from_major(2_500)),
    ];

    let pnl = ProfitAndLoss::calculate(&metrics, Some(&commission), &expenses);
    let cedi = CurrencyFormat::ghana_cedi();

    println!("total income   {}", format_money(pnl.total_income, &cedi));
    println!("total expenses {}", format_money(pnl.total_expenses, &cedi));
    println!("net profit     {}", format_money(pnl.gross_profit, &cedi));
    println!("margin         {}", format_percentage(pnl.net_profit_margin, 1));
    println!();
    for share in pnl.expense_breakdown() {
        println!(
            "{:<12} {:>14} {:>6}%",
            share.category,
            format_money(share.amount, &cedi),
            share.percentage.round_dp(1)
        );
    }
}
