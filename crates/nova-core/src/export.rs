//! Two-section CSV report (income, then expenses) preceded by a short summary.

use std::fmt::Write;

use chrono::NaiveDate;

use nova_domain::Transaction;

pub const CSV_HEADER: &str = "Date,Description,Category,Account,Amount";
const FILE_PREFIX: &str = "nova_report_";

/// Renders the report. `total_balance` is expected to cover the full collection.
pub fn render_csv(
    transactions: &[Transaction],
    total_balance: f64,
    generated_on: NaiveDate,
) -> String {
    let mut out = String::new();

    out.push_str("FINANCIAL SUMMARY\n");
    let _ = writeln!(out, "Total Balance,{total_balance:.2}");
    let _ = writeln!(out, "Generated Date,{generated_on}");
    out.push('\n');

    out.push_str("INCOME REPORT\n");
    write_section(&mut out, transactions.iter().filter(|txn| txn.is_income()));
    out.push('\n');

    out.push_str("EXPENSE REPORT\n");
    write_section(&mut out, transactions.iter().filter(|txn| txn.is_expense()));
    out
}

pub fn default_file_name(date: NaiveDate) -> String {
    format!("{FILE_PREFIX}{}.csv", date.format("%Y-%m-%d"))
}

fn write_section<'a>(out: &mut String, rows: impl Iterator<Item = &'a Transaction>) {
    out.push_str(CSV_HEADER);
    out.push('\n');
    for txn in rows {
        let _ = writeln!(
            out,
            "{},{},{},{},{}",
            txn.date,
            quote(&txn.description),
            txn.category,
            escape_field(&txn.account_name),
            txn.amount
        );
    }
}

/// Always wraps the value in double quotes, doubling embedded quotes.
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Quotes only when the value would otherwise break the row.
fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        quote(value)
    } else {
        value.to_string()
    }
}
