//! Line-editor helper: command and argument completion plus usage hints.

use std::{borrow::Cow, collections::HashMap};

use colored::Colorize;
use rustyline::{
    completion::{Completer, Pair},
    highlight::Highlighter,
    hint::Hinter,
    validate::{ValidationContext, ValidationResult, Validator},
    Context as ReadlineContext, Helper,
};

use nova_domain::{Category, CurrencyCode, FilterRange};

use crate::cli::commands::config::{CONFIG_KEYS, CONFIG_SUBCOMMANDS};
use crate::cli::output;
use crate::cli::registry::CommandRegistry;

const KINDS: [&str; 2] = ["income", "expense"];
const SWITCHES: [&str; 2] = ["on", "off"];
const OVERFLOW_POLICIES: [&str; 2] = ["clamp", "roll"];
const ADD_FLAGS: [&str; 2] = ["--category", "--account"];
const EDIT_FLAGS: [&str; 5] = ["--type", "--amount", "--description", "--category", "--account"];

pub(crate) struct LedgerHelper {
    commands: Vec<String>,
    usages: HashMap<&'static str, &'static str>,
}

impl LedgerHelper {
    pub(crate) fn new(registry: &CommandRegistry) -> Self {
        let mut commands: Vec<String> = registry.names().map(str::to_ascii_lowercase).collect();
        commands.sort();
        commands.dedup();

        let mut usages = HashMap::new();
        for entry in registry.list() {
            for name in std::iter::once(entry.name).chain(entry.aliases.iter().copied()) {
                usages.insert(name, entry.usage);
            }
        }
        Self { commands, usages }
    }

    /// Values that may follow the already typed `words`.
    fn candidates(&self, words: &[&str], partial: &str) -> Vec<String> {
        let Some(first) = words.first() else {
            return self.commands.clone();
        };
        let command = first.to_ascii_lowercase();

        if partial.starts_with("--") {
            return match command.as_str() {
                "add" => owned(&ADD_FLAGS),
                "edit" => owned(&EDIT_FLAGS),
                _ => Vec::new(),
            };
        }

        let previous = words.last().map(|word| word.to_ascii_lowercase());
        match previous.as_deref() {
            Some("--category") => return categories(),
            Some("--type") => return owned(&KINDS),
            _ => {}
        }

        match (command.as_str(), words.len()) {
            ("add", 1) => owned(&KINDS),
            ("help", 1) => self.commands.clone(),
            ("range", 1) => ranges(),
            ("currency", 1) | ("profile-new", 2) => currencies(),
            ("config", 1) => owned(&CONFIG_SUBCOMMANDS),
            ("config", 2) if words[1].eq_ignore_ascii_case("set") => owned(&CONFIG_KEYS),
            ("config", 3) if words[1].eq_ignore_ascii_case("set") => {
                match words[2].to_ascii_lowercase().as_str() {
                    "currency" => currencies(),
                    "default_range" => ranges(),
                    "ui_color_enabled" => owned(&SWITCHES),
                    "prediction.month_overflow" => owned(&OVERFLOW_POLICIES),
                    _ => Vec::new(),
                }
            }
            _ => Vec::new(),
        }
    }

    /// Argument synopsis for a bare command followed by a space.
    fn usage_hint(&self, line: &str) -> Option<String> {
        if !line.ends_with(' ') {
            return None;
        }
        let command = line.trim();
        if command.is_empty() || command.contains(char::is_whitespace) {
            return None;
        }
        let usage = self.usages.get(command.to_ascii_lowercase().as_str())?;
        usage.split_once(' ').map(|(_, args)| args.to_string())
    }
}

impl Helper for LedgerHelper {}

impl Completer for LedgerHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let mut words: Vec<&str> = prefix.split_whitespace().collect();
        let partial = if prefix.ends_with(char::is_whitespace) {
            ""
        } else {
            words.pop().unwrap_or("")
        };
        let start = pos - partial.len();
        let needle = partial.to_ascii_lowercase();

        let matches = self
            .candidates(&words, partial)
            .into_iter()
            .filter(|candidate| candidate.to_ascii_lowercase().starts_with(&needle))
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, matches))
    }
}

impl Hinter for LedgerHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        self.usage_hint(line)
    }
}

impl Highlighter for LedgerHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        if output::preferences().color_enabled {
            Cow::Owned(hint.dimmed().to_string())
        } else {
            Cow::Borrowed(hint)
        }
    }
}

impl Validator for LedgerHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn categories() -> Vec<String> {
    Category::ALL
        .iter()
        .map(|category| category.as_str().to_string())
        .collect()
}

fn ranges() -> Vec<String> {
    FilterRange::ALL
        .iter()
        .map(|range| range.as_str().to_string())
        .collect()
}

fn currencies() -> Vec<String> {
    CurrencyCode::ALL
        .iter()
        .map(|code| code.code().to_string())
        .collect()
}
