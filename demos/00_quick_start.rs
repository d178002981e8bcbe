/// quick start - minimal example to get started
use loan_schedule_rs::{calculate, LoanTerms, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 100,000 borrowed at 5% over one year
    let terms = LoanTerms::new(Money::from_major(100_000), Rate::from_percentage(5), 12)?;
    let schedule = calculate(&terms)?;

    println!("monthly payment: {}", schedule.monthly_payment().to_plain_string());
    for record in &schedule {
        println!(
            "{:>3}  principal {:>10}  interest {:>8}  balance {:>10}",
            record.month,
            record.principal_portion.to_plain_string(),
            record.interest_portion.to_plain_string(),
            record.remaining_balance.to_plain_string(),
        );
    }

    Ok(())
}
