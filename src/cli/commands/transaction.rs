use nova_domain::{
    Category, CurrencyCode, Displayable, Identifiable, Transaction, TransactionDraft,
    TransactionKind, DEFAULT_ACCOUNT_NAME,
};

use crate::cli::commands::{parse_amount, parse_flags, parse_value, report};
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};

const DEFAULT_CATEGORY: Category = Category::Housing;
const SHORT_ID_LEN: usize = 8;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record an income or expense dated today",
            "add <income|expense> <amount> <description> [--category C] [--account A]",
            cmd_add,
        ),
        CommandEntry::new(
            "edit",
            "Change fields of a transaction; its date is kept",
            "edit <id> [--type T] [--amount N] [--description D] [--category C] [--account A]",
            cmd_edit,
        ),
        CommandEntry::new("delete", "Delete a transaction", "delete <id>", cmd_delete)
            .with_aliases(&["rm"]),
        CommandEntry::new(
            "list",
            "List transactions matching the current range and search",
            "list [limit]",
            cmd_list,
        )
        .with_aliases(&["ls"]),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_flags(args, &["category", "account"])?;
    let [kind, amount, description @ ..] = parsed.positional.as_slice() else {
        return Err(CommandError::InvalidArguments(
            "usage: add <income|expense> <amount> <description>".into(),
        ));
    };
    if description.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: add <income|expense> <amount> <description>".into(),
        ));
    }

    let kind = parse_value::<TransactionKind>(kind)?;
    let amount = parse_amount(amount)?;
    let category = match parsed.flag("category") {
        Some(raw) => parse_value::<Category>(raw)?,
        None => DEFAULT_CATEGORY,
    };
    let account = parsed.flag("account").unwrap_or(DEFAULT_ACCOUNT_NAME);
    let draft =
        TransactionDraft::new(kind, amount, description.join(" "), category).with_account(account);

    let (store, clock, ledger) = context.ledger_parts()?;
    let created = ledger.add(store, clock, draft)?;
    let currency = ledger.profile().currency;
    io::print_success(format!(
        "Added {} `{}` for {} on {} (id {}).",
        created.kind,
        created.description,
        currency.format_amount(created.amount),
        created.date,
        short_id(&created)
    ));
    report::announce_alert(context);
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_flags(
        args,
        &["type", "amount", "description", "category", "account"],
    )?;
    let [needle] = parsed.positional.as_slice() else {
        return Err(CommandError::InvalidArguments(
            "usage: edit <id> [--type T] [--amount N] [--description D] [--category C] [--account A]"
                .into(),
        ));
    };
    if parsed.flags.is_empty() {
        return Err(CommandError::InvalidArguments(
            "nothing to change; pass at least one option".into(),
        ));
    }

    let existing = find(context, needle)?;
    let mut draft = TransactionDraft::new(
        existing.kind,
        existing.amount,
        existing.description.clone(),
        existing.category,
    )
    .with_account(existing.account_name.clone());
    if let Some(raw) = parsed.flag("type") {
        draft.kind = parse_value(raw)?;
    }
    if let Some(raw) = parsed.flag("amount") {
        draft.amount = parse_amount(raw)?;
    }
    if let Some(raw) = parsed.flag("description") {
        draft.description = raw.to_string();
    }
    if let Some(raw) = parsed.flag("category") {
        draft.category = parse_value(raw)?;
    }
    if let Some(raw) = parsed.flag("account") {
        draft.account_name = raw.to_string();
    }

    let (store, clock, ledger) = context.ledger_parts()?;
    let updated = ledger.edit(store, clock, existing.id, draft)?;
    io::print_success(format!(
        "Updated `{}` (id {}).",
        updated.description,
        short_id(&updated)
    ));
    report::announce_alert(context);
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [needle] = args else {
        return Err(CommandError::InvalidArguments("usage: delete <id>".into()));
    };
    let existing = find(context, needle)?;
    let (store, clock, ledger) = context.ledger_parts()?;
    ledger.remove(store, clock, existing.id)?;
    io::print_success(format!("Deleted {}.", existing.display_label()));
    report::announce_alert(context);
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let limit = match args.first() {
        Some(raw) => Some(raw.parse::<usize>().map_err(|_| {
            CommandError::InvalidArguments(format!("invalid limit `{raw}`"))
        })?),
        None => None,
    };

    let ledger = context.ledger()?;
    let view = ledger.dashboard(context.clock.as_ref());
    let query = ledger.query();
    let currency = ledger.profile().currency;

    let mut title = format!("Transactions ({})", query.range);
    if !query.search.is_empty() {
        title.push_str(&format!(", search `{}`", query.search));
    }
    if view.transactions.is_empty() {
        io::print_info(format!("{title}: no transactions match the current filters."));
        return Ok(());
    }

    let mut table = Table::new(
        Some(title),
        vec![
            TableColumn::left("Id"),
            TableColumn::left("Date"),
            TableColumn::left("Type"),
            TableColumn::left("Description"),
            TableColumn::left("Category"),
            TableColumn::left("Account"),
            TableColumn::right("Amount"),
        ],
    );
    let shown = limit.unwrap_or(view.transactions.len());
    for txn in view.transactions.iter().take(shown) {
        table.add_row(vec![
            short_id(txn),
            txn.date.to_string(),
            txn.kind.to_string(),
            txn.description.clone(),
            txn.category.to_string(),
            txn.account_name.clone(),
            signed_amount(txn, currency),
        ]);
    }
    table.print();
    if shown < view.transactions.len() {
        io::print_hint(format!(
            "Showing {shown} of {} transactions.",
            view.transactions.len()
        ));
    }
    Ok(())
}

fn find(context: &ShellContext, needle: &str) -> Result<Transaction, CommandError> {
    context
        .ledger()?
        .lookup(needle)
        .cloned()
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "no single transaction matches id `{needle}`; use `list` to see ids"
            ))
        })
}

fn short_id(entity: &impl Identifiable) -> String {
    entity.id().to_string().chars().take(SHORT_ID_LEN).collect()
}

fn signed_amount(txn: &Transaction, currency: CurrencyCode) -> String {
    let formatted = currency.format_amount(txn.amount);
    if txn.is_expense() {
        format!("-{formatted}")
    } else {
        format!("+{formatted}")
    }
}
