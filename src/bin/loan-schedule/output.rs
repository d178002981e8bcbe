use loan_schedule_rs::DisplayModel;
use tabled::{builder::Builder, Table};

/// Render the display model as a text table followed by the summary.
pub fn table(model: &DisplayModel) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Month", "Principal", "Interest", "Total", "Balance"]);
    for row in &model.rows {
        builder.push_record([
            row.month.to_string(),
            row.principal.clone(),
            row.interest.clone(),
            row.total.clone(),
            row.balance.clone(),
        ]);
    }
    let table = Table::from(builder);

    format!(
        "{}\n\nMonthly payment: {}\nTotal paid: {}\nTotal interest: {}\n",
        table, model.monthly_payment, model.total_paid, model.total_interest
    )
}
