use std::path::PathBuf;

use nova_core::export;
use nova_domain::{CurrencyCode, FilterRange, Prediction};
use nova_storage_json::write_text_atomic;

use crate::cli::commands::parse_value;
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "range",
            "Show or set the dashboard time range",
            "range [week|month|year]",
            cmd_range,
        ),
        CommandEntry::new(
            "search",
            "Filter by description, category or account; no text clears it",
            "search [text]",
            cmd_search,
        ),
        CommandEntry::new(
            "summary",
            "Income, expenses and balance for the current filters",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "breakdown",
            "Totals per category for the current filters",
            "breakdown",
            cmd_breakdown,
        ),
        CommandEntry::new(
            "trend",
            "Income and expenses for the last six months",
            "trend",
            cmd_trend,
        ),
        CommandEntry::new(
            "alert",
            "Show the upcoming recurring bill, if any",
            "alert",
            cmd_alert,
        ),
        CommandEntry::new(
            "dismiss",
            "Hide the bill alert until transactions change",
            "dismiss",
            cmd_dismiss,
        ),
        CommandEntry::new(
            "export",
            "Write the CSV report for all transactions",
            "export [file|directory]",
            cmd_export,
        ),
    ]
}

/// Prints the alert banner when a bill is due soon and not dismissed.
pub(crate) fn announce_alert(context: &ShellContext) {
    let Some(ledger) = context.ledger.as_ref() else {
        return;
    };
    if let Some(prediction) = ledger.alert() {
        io::print_warning(alert_message(prediction, ledger.profile().currency));
    }
}

pub(crate) fn alert_message(prediction: &Prediction, currency: CurrencyCode) -> String {
    let when = match prediction.days_remaining {
        0 => "due today".to_string(),
        1 => "due in 1 day".to_string(),
        days => format!("due in {days} days"),
    };
    format!(
        "Upcoming bill: `{}` {when} ({}), about {}.",
        prediction.description,
        prediction.predicted_date,
        currency.format_amount(prediction.avg_amount)
    )
}

fn cmd_range(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (_, _, ledger) = context.ledger_parts()?;
    match args.first() {
        Some(raw) => {
            let range = parse_value::<FilterRange>(raw)?;
            ledger.set_range(range);
            io::print_success(format!("Range set to {range}."));
        }
        None => {
            let options: Vec<&str> = FilterRange::ALL.iter().map(|range| range.as_str()).collect();
            io::print_info(format!(
                "Range: {} (options: {})",
                ledger.query().range,
                options.join(", ")
            ));
        }
    }
    Ok(())
}

fn cmd_search(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (_, _, ledger) = context.ledger_parts()?;
    let text = args.join(" ");
    ledger.set_search(text.as_str());
    if text.is_empty() {
        io::print_success("Search cleared.");
    } else {
        io::print_success(format!("Searching for `{text}`."));
    }
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ledger = context.ledger()?;
    let view = ledger.dashboard(context.clock.as_ref());
    let currency = ledger.profile().currency;

    output::section(format!("Summary ({})", ledger.query().range));
    io::println_text(format!("  Income  : {}", currency.format_amount(view.stats.income)));
    io::println_text(format!("  Expenses: {}", currency.format_amount(view.stats.expense)));
    io::println_text(format!("  Balance : {}", currency.format_amount(view.stats.balance)));
    io::println_text(format!("  Count   : {}", view.transactions.len()));
    if let Some(prediction) = ledger.alert() {
        io::print_warning(alert_message(prediction, currency));
    }
    Ok(())
}

fn cmd_breakdown(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ledger = context.ledger()?;
    let view = ledger.dashboard(context.clock.as_ref());
    let currency = ledger.profile().currency;

    if view.breakdown.is_empty() {
        io::print_info("No expenses in the current range.");
        return Ok(());
    }

    let total: f64 = view.breakdown.iter().map(|entry| entry.total).sum();
    let mut table = Table::new(
        Some(format!("Expenses by category ({})", ledger.query().range)),
        vec![
            TableColumn::left("Category"),
            TableColumn::right("Total"),
            TableColumn::right("Share"),
        ],
    );
    for entry in &view.breakdown {
        let share = if total > 0.0 {
            entry.total / total * 100.0
        } else {
            0.0
        };
        table.add_row(vec![
            entry.category.to_string(),
            currency.format_amount(entry.total),
            format!("{share:.1}%"),
        ]);
    }
    table.print();
    Ok(())
}

fn cmd_trend(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ledger = context.ledger()?;
    let view = ledger.dashboard(context.clock.as_ref());
    let currency = ledger.profile().currency;

    let mut table = Table::new(
        Some("Monthly trend".into()),
        vec![
            TableColumn::left("Month"),
            TableColumn::right("Income"),
            TableColumn::right("Expenses"),
            TableColumn::right("Net"),
        ],
    );
    for bucket in &view.trend {
        table.add_row(vec![
            format!("{} {}", bucket.label, bucket.year),
            currency.format_amount(bucket.income),
            currency.format_amount(bucket.expense),
            currency.format_amount(bucket.net()),
        ]);
    }
    table.print();
    Ok(())
}

fn cmd_alert(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ledger = context.ledger()?;
    match ledger.alert() {
        Some(prediction) => {
            io::print_warning(alert_message(prediction, ledger.profile().currency))
        }
        None => io::print_info("No upcoming recurring bills."),
    }
    Ok(())
}

fn cmd_dismiss(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let (_, _, ledger) = context.ledger_parts()?;
    if ledger.dismiss_alert() {
        io::print_success("Alert dismissed until transactions change.");
    } else {
        io::print_info("There is no alert to dismiss.");
    }
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let ledger = context.ledger()?;
    let clock = context.clock.as_ref();
    let file_name = export::default_file_name(clock.today());

    let path = match args.first() {
        Some(raw) => {
            let path = PathBuf::from(raw);
            if path.is_dir() {
                path.join(&file_name)
            } else {
                path
            }
        }
        None => context.config.resolve_export_dir().join(&file_name),
    };

    let csv = ledger.export_csv(clock);
    write_text_atomic(&path, &csv).map_err(CommandError::from)?;
    io::print_success(format!(
        "Exported {} transactions to {}.",
        ledger.transactions().len(),
        path.display()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn prediction(days_remaining: i64) -> Prediction {
        Prediction {
            description: "Netflix".into(),
            predicted_date: NaiveDate::from_ymd_opt(2025, 4, 3).unwrap(),
            days_remaining,
            avg_amount: 15.99,
        }
    }

    #[test]
    fn alert_wording_tracks_days_remaining() {
        assert_eq!(
            alert_message(&prediction(2), CurrencyCode::USD),
            "Upcoming bill: `Netflix` due in 2 days (2025-04-03), about $15.99."
        );
        assert!(alert_message(&prediction(1), CurrencyCode::USD).contains("due in 1 day "));
        assert!(alert_message(&prediction(0), CurrencyCode::EUR).contains("due today"));
    }
}
