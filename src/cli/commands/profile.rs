use nova_core::ProfileService;
use nova_domain::{CurrencyCode, Profile};

use crate::cli::commands::{parse_value, report};
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("profiles", "List local profiles", "profiles", cmd_profiles),
        CommandEntry::new(
            "profile-new",
            "Create a profile and sign in to it",
            "profile-new <name> [currency]",
            cmd_profile_new,
        ),
        CommandEntry::new(
            "login",
            "Sign in to an existing profile",
            "login <name|uid>",
            cmd_login,
        ),
        CommandEntry::new("logout", "Sign out of the current profile", "logout", cmd_logout),
        CommandEntry::new("whoami", "Show the signed-in profile", "whoami", cmd_whoami),
        CommandEntry::new(
            "currency",
            "Show or change the display currency of the signed-in profile",
            "currency [USD|INR|EUR|GBP|JPY]",
            cmd_currency,
        ),
    ]
}

fn cmd_profiles(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let profiles = ProfileService::list(&context.store)?;
    if profiles.is_empty() {
        io::print_info("No profiles yet. Use `profile-new <name> [currency]` to create one.");
        return Ok(());
    }

    let active = context.ledger.as_ref().map(|ledger| ledger.profile().uid);
    let mut table = Table::new(
        Some("Profiles".into()),
        vec![
            TableColumn::left(" "),
            TableColumn::left("Name"),
            TableColumn::left("Currency"),
            TableColumn::left("Id"),
        ],
    );
    for profile in profiles {
        let marker = if Some(profile.uid) == active { "*" } else { "" };
        table.add_row(vec![
            marker.into(),
            profile.display_name.clone(),
            profile.currency.to_string(),
            profile.uid.to_string(),
        ]);
    }
    table.print();
    Ok(())
}

fn cmd_profile_new(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (name, currency) = match args {
        [name] => (*name, context.config.currency),
        [name, currency] => (*name, parse_value::<CurrencyCode>(currency)?),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: profile-new <name> [currency]".into(),
            ))
        }
    };

    let profile = ProfileService::create(&context.store, name, currency)?;
    io::print_success(format!(
        "Profile `{}` created ({}).",
        profile.display_name, profile.currency
    ));
    sign_in(context, profile)
}

fn cmd_login(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: login <name|uid>".into()));
    }
    let needle = args.join(" ");
    let profile = ProfileService::resolve(&context.store, &needle)?;
    sign_in(context, profile)
}

fn sign_in(context: &mut ShellContext, profile: Profile) -> CommandResult {
    ProfileService::login(&context.store, context.clock.as_ref(), profile.uid)?;
    let name = profile.display_name.clone();
    context.open_ledger(profile)?;
    io::print_success(format!("Signed in as {name}."));
    report::announce_alert(context);
    Ok(())
}

fn cmd_logout(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    ProfileService::logout(&context.store)?;
    match context.ledger.take() {
        Some(ledger) => io::print_success(format!(
            "Signed out of {}.",
            ledger.profile().display_name
        )),
        None => io::print_info("No profile was signed in."),
    }
    Ok(())
}

fn cmd_whoami(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let profile = context.ledger()?.profile();
    io::println_text(format!("  Name    : {}", profile.display_name));
    io::println_text(format!("  Id      : {}", profile.uid));
    io::println_text(format!(
        "  Currency: {} ({})",
        profile.currency,
        profile.currency.display_name()
    ));
    if let Some(email) = &profile.email {
        io::println_text(format!("  Email   : {email}"));
    }
    if let Some(avatar) = &profile.avatar_url {
        io::println_text(format!("  Avatar  : {avatar}"));
    }
    Ok(())
}

fn cmd_currency(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        let current = context.ledger()?.profile().currency;
        io::print_info(format!(
            "Display currency: {current} ({})",
            current.display_name()
        ));
        let available: Vec<&str> = CurrencyCode::ALL.iter().map(|code| code.code()).collect();
        io::print_hint(format!("Available: {}", available.join(", ")));
        return Ok(());
    };

    let currency = parse_value::<CurrencyCode>(raw)?;
    let (store, _, ledger) = context.ledger_parts()?;
    let updated = ProfileService::update_currency(store, ledger.profile().uid, currency)?;
    ledger.set_profile(updated);
    io::print_success(format!(
        "Display currency set to {currency}. Stored amounts are not converted."
    ));
    Ok(())
}
