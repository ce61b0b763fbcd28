//! Command handlers. Each one edits the controller and prints a projection of
//! the resulting state.

use std::path::Path;

use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{chart_renderer::render_chart, ledger_view::rows_table};
use crate::cli::{help, io, output};
use crate::core::services::row_service::{parse_optional_amount, parse_optional_date};
use crate::core::services::{Granularity, RowPatch};
use crate::ledger::{Category, EntryType, MonthKey, Row};
use crate::storage::legacy::parse_legacy_document;
use crate::utils::build_info;

const CHART_WIDTH: usize = 40;
/// Placeholder for "leave unset" in positional arguments.
const UNSET: &str = "-";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help),
        CommandEntry::new(
            "month",
            "Show or switch the active month",
            "month [YYYY-MM|next|prev]",
            cmd_month,
        ),
        CommandEntry::new(
            "add",
            "Add a row to the active month",
            "add <date|-> <income|expense> <amount> [category|-] [description...]",
            cmd_add,
        ),
        CommandEntry::new("new", "Append a blank row to fill with `set`", "new", cmd_new),
        CommandEntry::new(
            "set",
            "Change one field of a row",
            "set <row#> <date|description|category|type|amount|recurring|payment> [value...]",
            cmd_set,
        ),
        CommandEntry::new("delete", "Delete a row", "delete <row#>", cmd_delete),
        CommandEntry::new("list", "Show the rows of the active month", "list", cmd_list),
        CommandEntry::new(
            "totals",
            "Show income, expense and balance",
            "totals",
            cmd_totals,
        ),
        CommandEntry::new(
            "chart",
            "Chart spending per day or month",
            "chart [day|month]",
            cmd_chart,
        ),
        CommandEntry::new("months", "List months with saved rows", "months", cmd_months),
        CommandEntry::new(
            "clear",
            "Delete every row of the active month",
            "clear [--yes]",
            cmd_clear,
        ),
        CommandEntry::new(
            "import-legacy",
            "Import a single-list expense export",
            "import-legacy <file>",
            cmd_import_legacy,
        ),
        CommandEntry::new(
            "config",
            "Show or change saved preferences",
            "config [show|set <locale|currency|chart> <value>]",
            cmd_config,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        Some(name) => match context.command(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        },
        None => help::print_overview(context.registry()),
    }
    Ok(())
}

fn cmd_month(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let manager = context.manager_mut();
    match args.first().map(|arg| arg.to_ascii_lowercase()).as_deref() {
        None => {}
        Some("next") => {
            manager.next_month();
        }
        Some("prev") | Some("previous") => {
            manager.previous_month();
        }
        Some(raw) => {
            let month: MonthKey = raw.parse()?;
            manager.open_month(month);
        }
    }
    output::info(format!(
        "Active month: {} ({} rows)",
        manager.month(),
        manager.rows().len()
    ));
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [date, kind, amount, rest @ ..] = args else {
        return Err(usage("add"));
    };
    let mut row = Row::new();
    row.date = optional_arg(date)
        .map(parse_optional_date)
        .transpose()?
        .flatten();
    row.kind = EntryType::parse(kind).ok_or_else(|| {
        CommandError::InvalidArguments(format!("`{kind}` is not income or expense"))
    })?;
    row.amount = parse_optional_amount(amount)?;
    if let Some((category, description)) = rest.split_first() {
        row.category = optional_arg(category)
            .map(|raw| raw.parse::<Category>())
            .transpose()
            .map_err(CommandError::InvalidArguments)?;
        row.description = description.join(" ");
    }

    let total = context.manager().rows().len() + 1;
    context.manager_mut().add_row(row)?;
    output::success(format!("Added row {total}."));
    Ok(())
}

fn cmd_new(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.manager_mut().add_blank_row();
    let number = context.manager().rows().len();
    output::success(format!(
        "Added blank row {number}; fill it with `set {number} <field> <value>`."
    ));
    Ok(())
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [row, field, value @ ..] = args else {
        return Err(usage("set"));
    };
    let id = context.row_id_from_arg(row)?;
    let patch = RowPatch::from_field(field, &value.join(" "))?;
    context.manager_mut().update_row(&id, patch)?;
    output::success(format!("Updated row {row}."));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [row] = args else {
        return Err(usage("delete"));
    };
    let id = context.row_id_from_arg(row)?;
    context.manager_mut().delete_row(&id)?;
    output::success(format!("Deleted row {row}."));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let manager = context.manager();
    output::section(format!("Rows for {}", manager.month()));
    if manager.rows().is_empty() {
        output::info("No rows yet. Use `add` or `new`.");
        return Ok(());
    }
    let locale = context.config().locale_config();
    output::block(&rows_table(manager.rows(), &locale).render());
    Ok(())
}

fn cmd_totals(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let totals = context.manager().totals();
    output::section(format!("Totals for {}", context.manager().month()));
    output::info(format!("  Income : {}", context.format_money(totals.income)));
    output::info(format!("  Expense: {}", context.format_money(totals.expense)));
    output::info(format!("  Balance: {}", context.format_money(totals.balance)));
    Ok(())
}

fn cmd_chart(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let granularity = match args.first() {
        Some(raw) => Granularity::parse(raw).ok_or_else(|| {
            CommandError::InvalidArguments(format!("`{raw}` is not day or month"))
        })?,
        None => context.config().chart_granularity,
    };
    let series = context.manager().chart(granularity);
    let rendered = render_chart(&series, CHART_WIDTH, |value| context.format_plain(value));
    output::block(&rendered);
    Ok(())
}

fn cmd_months(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let months = context.manager().months();
    if months.is_empty() {
        output::info("No saved months.");
        return Ok(());
    }
    let active = context.manager().month();
    for month in months {
        let marker = if month == active { "*" } else { " " };
        output::info(format!("{marker} {month}"));
    }
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let forced = args.iter().any(|arg| matches!(*arg, "--yes" | "-y"));
    let month = context.manager().month();
    if !forced {
        if context.mode() == CliMode::Script {
            return Err(CommandError::InvalidArguments(
                "`clear` needs --yes in script mode".into(),
            ));
        }
        let prompt = format!("Delete every row of {month}?");
        if !io::confirm_action(context.theme(), &prompt, false)? {
            output::info("Nothing cleared.");
            return Ok(());
        }
    }
    context.manager_mut().clear_month()?;
    output::success(format!("Cleared {month}."));
    Ok(())
}

fn cmd_import_legacy(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [path] = args else {
        return Err(usage("import-legacy"));
    };
    let raw = io::read_input_file(Path::new(path))?;
    let report = context
        .manager_mut()
        .import_legacy(parse_legacy_document(&raw))?;
    output::success(format!(
        "Imported {} rows into {} months ({} skipped).",
        report.imported,
        report.months.len(),
        report.skipped
    ));
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            let config = context.config();
            output::section("Configuration");
            output::info(format!("  locale  : {}", config.locale));
            output::info(format!("  currency: {}", config.currency_code().as_str()));
            output::info(format!("  chart   : {:?}", config.chart_granularity).to_lowercase());
            output::info(format!("  store   : {}", config.storage_key));
            Ok(())
        }
        ["set", key, value @ ..] if !value.is_empty() => {
            context.set_config_value(key, &value.join(" "))?;
            output::success(format!("Updated {key}."));
            Ok(())
        }
        _ => Err(usage("config")),
    }
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Expense Core {}", meta.version));
    output::info(format!("  Build hash: {} ({})", meta.git_hash, meta.git_status));
    output::info(format!("  Built at  : {}", meta.timestamp));
    output::info(format!("  Profile   : {}", meta.profile));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

fn optional_arg<'a>(raw: &'a str) -> Option<&'a str> {
    (raw != UNSET).then_some(raw)
}

fn usage(command: &str) -> CommandError {
    let usage = crate::cli::registry::REGISTRY
        .get(command)
        .map(|entry| entry.usage)
        .unwrap_or(command);
    CommandError::InvalidArguments(format!("usage: {usage}"))
}
