use std::path::PathBuf;

use nova_config::Config;
use nova_domain::{CurrencyCode, FilterRange, MonthOverflow};

use crate::cli::commands::parse_value;
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;

const USAGE: &str = "usage: config [show|set <key> <value>|backup [note]|backups|restore <name|number>]";

pub(crate) const CONFIG_SUBCOMMANDS: [&str; 5] = ["show", "set", "backup", "backups", "restore"];

pub(crate) const CONFIG_KEYS: [&str; 9] = [
    "currency",
    "default_range",
    "ui_color_enabled",
    "export_dir",
    "prediction.min_transactions",
    "prediction.min_gap_days",
    "prediction.max_gap_days",
    "prediction.horizon_days",
    "prediction.month_overflow",
];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and manage preferences",
        "config [show|set <key> <value>|backup [note]|backups|restore <name|number>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(action) = args.first().map(|action| action.to_lowercase()) else {
        show_config(&context.config);
        return Ok(());
    };

    match action.as_str() {
        "show" => {
            show_config(&context.config);
            Ok(())
        }
        "set" => {
            let [key, value @ ..] = &args[1..] else {
                return Err(CommandError::InvalidArguments(
                    "usage: config set <key> <value>".into(),
                ));
            };
            if value.is_empty() {
                return Err(CommandError::InvalidArguments(
                    "usage: config set <key> <value>".into(),
                ));
            }
            let mut updated = context.config.clone();
            set_value(&mut updated, key, value.join(" ").trim())?;
            context.config_manager.save(&updated)?;
            apply(context, updated);
            io::print_success(format!("Updated {key}."));
            Ok(())
        }
        "backup" => {
            let note = (args.len() > 1).then(|| args[1..].join(" "));
            let saved = context.config_manager.backup(
                &context.config,
                note.as_deref(),
                context.clock.now(),
            )?;
            io::print_success(format!("Configuration backup saved: {}", saved.file_name));
            Ok(())
        }
        "backups" => {
            let backups = context.config_manager.list_backups()?;
            if backups.is_empty() {
                io::print_warning("No configuration backups found.");
                return Ok(());
            }
            io::print_info("Available configuration backups:");
            for (idx, backup) in backups.iter().enumerate() {
                let stamp = backup
                    .created_at
                    .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "unknown time".into());
                let note = backup.note.as_deref().unwrap_or("-");
                io::println_text(format!(
                    "  {:>2}. {stamp}  {note:<20} {}",
                    idx + 1,
                    backup.file_name
                ));
            }
            Ok(())
        }
        "restore" => {
            let reference = args.get(1).ok_or_else(|| {
                CommandError::InvalidArguments("usage: config restore <name|number>".into())
            })?;
            let name = resolve_backup(context, reference)?;
            let restored = context.config_manager.restore(&name)?;
            apply(context, restored);
            io::print_success(format!("Configuration restored from {name}."));
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(USAGE.into())),
    }
}

fn show_config(config: &Config) {
    output_section("Configuration");
    io::println_text(format!("  currency                    : {}", config.currency));
    io::println_text(format!("  default_range               : {}", config.default_range));
    io::println_text(format!(
        "  ui_color_enabled            : {}",
        config.ui_color_enabled
    ));
    io::println_text(format!(
        "  export_dir                  : {}",
        config.resolve_export_dir().display()
    ));
    let prediction = &config.prediction;
    io::println_text(format!(
        "  prediction.min_transactions : {}",
        prediction.min_transactions
    ));
    io::println_text(format!(
        "  prediction.min_gap_days     : {}",
        prediction.min_gap_days
    ));
    io::println_text(format!(
        "  prediction.max_gap_days     : {}",
        prediction.max_gap_days
    ));
    io::println_text(format!(
        "  prediction.horizon_days     : {}",
        prediction.horizon_days
    ));
    io::println_text(format!(
        "  prediction.month_overflow   : {}",
        prediction.month_overflow
    ));
}

fn set_value(config: &mut Config, key: &str, value: &str) -> CommandResult {
    match key.to_lowercase().as_str() {
        "currency" => config.currency = parse_value::<CurrencyCode>(value)?,
        "default_range" => config.default_range = parse_value::<FilterRange>(value)?,
        "ui_color_enabled" => config.ui_color_enabled = parse_switch(value)?,
        "export_dir" => {
            config.export_dir = if value.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(PathBuf::from(value))
            }
        }
        "prediction.min_transactions" => {
            config.prediction.min_transactions = parse_number(key, value)?
        }
        "prediction.min_gap_days" => config.prediction.min_gap_days = parse_number(key, value)?,
        "prediction.max_gap_days" => config.prediction.max_gap_days = parse_number(key, value)?,
        "prediction.horizon_days" => config.prediction.horizon_days = parse_number(key, value)?,
        "prediction.month_overflow" => {
            config.prediction.month_overflow = parse_value::<MonthOverflow>(value)?
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown key `{other}` (expected one of: {})",
                CONFIG_KEYS.join(", ")
            )))
        }
    }
    Ok(())
}

fn parse_switch(value: &str) -> Result<bool, CommandError> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(CommandError::InvalidArguments(format!(
            "expected on or off, got `{value}`"
        ))),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, CommandError> {
    value
        .parse::<T>()
        .map_err(|_| CommandError::InvalidArguments(format!("{key} must be a whole number")))
}

/// Accepts a backup file name or its 1-based position in `config backups`.
fn resolve_backup(context: &ShellContext, reference: &str) -> Result<String, CommandError> {
    let backups = context.config_manager.list_backups()?;
    if let Ok(index) = reference.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|idx| backups.get(idx))
            .map(|backup| backup.file_name.clone())
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!("no configuration backup #{index}"))
            });
    }
    Ok(reference.to_string())
}

/// Makes `config` active: output styling, and predictor thresholds of the open ledger.
fn apply(context: &mut ShellContext, config: Config) {
    io::apply_config(&config);
    if let Some(ledger) = context.ledger.as_mut() {
        let policy = config.prediction.policy();
        if *ledger.policy() != policy {
            ledger.set_policy(policy, context.clock.as_ref());
        }
    }
    context.config = config;
}
