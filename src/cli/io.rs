use std::fmt;

use nova_config::Config;

use crate::cli::output::{self, OutputPreferences};

/// Pushes the display preferences of `config` into the output helpers.
pub fn apply_config(config: &Config) {
    let current = output::preferences();
    output::set_preferences(OutputPreferences {
        color_enabled: config.ui_color_enabled,
        ..current
    });
}

pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

pub fn print_hint(message: impl fmt::Display) {
    output::hint(message);
}

pub fn println_text(message: impl fmt::Display) {
    output::plain(message);
}
