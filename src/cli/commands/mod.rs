pub mod config;
pub mod profile;
pub mod report;
pub mod system;
pub mod transaction;

use std::collections::HashMap;

use crate::cli::context::CommandError;
use crate::cli::registry::CommandRegistry;

pub fn register_all(registry: &mut CommandRegistry) {
    for entry in system::definitions()
        .into_iter()
        .chain(profile::definitions())
        .chain(transaction::definitions())
        .chain(report::definitions())
        .chain(config::definitions())
    {
        registry.register(entry);
    }
}

/// Positional arguments plus `--flag value` pairs.
#[derive(Debug, Default)]
pub(crate) struct ParsedArgs<'a> {
    pub positional: Vec<&'a str>,
    pub flags: HashMap<&'static str, &'a str>,
}

impl<'a> ParsedArgs<'a> {
    pub fn flag(&self, name: &str) -> Option<&'a str> {
        self.flags.get(name).copied()
    }
}

/// Splits `args` into positionals and the flags named in `known`.
pub(crate) fn parse_flags<'a>(
    args: &[&'a str],
    known: &[&'static str],
) -> Result<ParsedArgs<'a>, CommandError> {
    let mut parsed = ParsedArgs::default();
    let mut iter = args.iter().copied();
    while let Some(arg) = iter.next() {
        let Some(name) = arg.strip_prefix("--") else {
            parsed.positional.push(arg);
            continue;
        };
        let Some(flag) = known.iter().copied().find(|flag| *flag == name) else {
            return Err(CommandError::InvalidArguments(format!(
                "unknown option `--{name}`"
            )));
        };
        let value = iter.next().ok_or_else(|| {
            CommandError::InvalidArguments(format!("option `--{flag}` needs a value"))
        })?;
        parsed.flags.insert(flag, value);
    }
    Ok(parsed)
}

pub(crate) fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid amount `{raw}`")))
}

pub(crate) fn parse_value<T>(raw: &str) -> Result<T, CommandError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_split_from_positionals() {
        let args = ["expense", "12", "Lunch", "--category", "Food", "--account", "Card"];
        let parsed = parse_flags(&args, &["category", "account"]).expect("parse");
        assert_eq!(parsed.positional, vec!["expense", "12", "Lunch"]);
        assert_eq!(parsed.flag("category"), Some("Food"));
        assert_eq!(parsed.flag("account"), Some("Card"));
        assert_eq!(parsed.flag("amount"), None);
    }

    #[test]
    fn unknown_or_dangling_flags_are_rejected() {
        assert!(parse_flags(&["--colour", "red"], &["category"]).is_err());
        assert!(parse_flags(&["--category"], &["category"]).is_err());
    }

    #[test]
    fn amounts_must_be_numeric() {
        assert_eq!(parse_amount(" 15.99 ").expect("amount"), 15.99);
        assert!(parse_amount("ten").is_err());
    }
}
