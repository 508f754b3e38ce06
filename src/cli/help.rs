use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Available commands");
    for entry in registry.list() {
        io::println_text(format!("  {:<12} {}", entry.name, entry.description));
    }
    io::print_info("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("Help: {}", entry.name));
    io::println_text(format!("  Description: {}", entry.description));
    io::println_text(format!("  Usage: {}", entry.usage));
    if !entry.aliases.is_empty() {
        io::println_text(format!("  Aliases: {}", entry.aliases.join(", ")));
    }
}
