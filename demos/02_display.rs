/// display - locale formatted rows and the principal/interest split
use loan_schedule_rs::{calculate, render, LoanTerms, NumberFormat};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let terms = LoanTerms::parse("100000", "5.0", "120")?;
    let schedule = calculate(&terms)?;

    let model = render(&schedule, &NumberFormat::czech());
    for row in model.rows.iter().take(3) {
        println!("{:>3} | {:>10} | {:>8} | {:>10} | {:>12}", row.month, row.principal, row.interest, row.total, row.balance);
    }
    println!("...");

    println!("monthly payment: {}", model.monthly_payment);
    println!("total paid:      {}", model.total_paid);
    println!("total interest:  {}", model.total_interest);
    println!("split:           {} principal / {} interest", model.split.principal, model.split.interest);

    // the same schedule as json
    println!("\n{}", schedule.json().lines().take(8).collect::<Vec<_>>().join("\n"));

    Ok(())
}
