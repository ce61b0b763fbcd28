//! Shell context, dispatch and error types shared by the CLI commands.

use std::io;

use dialoguer::theme::ColorfulTheme;
use thiserror::Error;

use crate::{
    config::{Config, ConfigManager},
    core::ledger_manager::LedgerManager,
    currency::{format_amount, format_currency_value, FormatOptions},
    errors::LedgerError,
    ledger::RowId,
    storage::{JsonFileStore, MonthStore},
};

use super::output;
use super::registry::{CommandEntry, CommandRegistry, REGISTRY};
use super::shell::parse_command_line;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// State owned by one shell session: the controller, configuration and the
/// command table.
pub struct ShellContext {
    mode: CliMode,
    registry: &'static CommandRegistry,
    manager: LedgerManager,
    config: Config,
    config_manager: Option<ConfigManager>,
    theme: ColorfulTheme,
    pub(crate) running: bool,
}

impl ShellContext {
    /// Opens the current month from the file store under the data directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new();
        let config = config_manager.load()?;
        let store = JsonFileStore::new(config.store_dir(config_manager.base_dir()))?;
        let month_store = MonthStore::with_storage_key(Box::new(store), config.storage_key.clone());
        let manager = LedgerManager::for_current_month(month_store);
        tracing::debug!(mode = ?mode, "shell context ready");
        let mut context = Self::with_manager(mode, manager, config);
        context.config_manager = Some(config_manager);
        Ok(context)
    }

    pub fn with_manager(mode: CliMode, manager: LedgerManager, config: Config) -> Self {
        Self {
            mode,
            registry: &REGISTRY,
            manager,
            config,
            config_manager: None,
            theme: ColorfulTheme::default(),
            running: true,
        }
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn manager(&self) -> &LedgerManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut LedgerManager {
        &mut self.manager
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Applies one setting and saves the configuration file when the context
    /// has one. Contexts built with [`ShellContext::with_manager`] keep the
    /// change in memory.
    pub(crate) fn set_config_value(&mut self, key: &str, value: &str) -> CommandResult {
        let mut updated = self.config.clone();
        updated.set_value(key, value)?;
        if let Some(manager) = &self.config_manager {
            manager.save(&updated)?;
        }
        self.config = updated;
        Ok(())
    }

    pub(crate) fn theme(&self) -> &ColorfulTheme {
        &self.theme
    }

    pub(crate) fn registry(&self) -> &'static CommandRegistry {
        self.registry
    }

    pub(crate) fn command(&self, name: &str) -> Option<&'static CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        format!("expenses {}> ", self.manager.month())
    }

    pub(crate) fn format_money(&self, amount: f64) -> String {
        format_currency_value(
            amount,
            &self.config.currency_code(),
            &self.config.locale_config(),
            &FormatOptions::default(),
        )
    }

    pub(crate) fn format_plain(&self, amount: f64) -> String {
        format_amount(&self.config.locale_config(), amount)
    }

    /// Resolves a 1-based row number as shown by `list`.
    pub(crate) fn row_id_from_arg(&self, raw: &str) -> Result<RowId, CommandError> {
        let number: usize = raw.parse().map_err(|_| {
            CommandError::InvalidArguments(format!("`{raw}` is not a row number"))
        })?;
        number
            .checked_sub(1)
            .and_then(|index| self.manager.row_id_at(index))
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "row {raw} does not exist (the month has {} rows)",
                    self.manager.rows().len()
                ))
            })
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    /// Tokenizes and dispatches one input line.
    pub fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        tracing::trace!(command = %command, "dispatching");
        let control = self.dispatch(&command, raw, &args)?;
        if control == LoopControl::Exit {
            self.running = false;
        }
        Ok(control)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        if let Some(best) = self.registry.suggest(input) {
            output::hint(format!("Did you mean `{best}`?"));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        super::io::confirm_action(&self.theme, "Exit shell?", true).map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            other => output::error(other),
        }
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("Input error: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Input(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}

#[cfg(test)]
pub(crate) fn script_context(month: &str) -> ShellContext {
    use crate::storage::MemoryStore;

    let store = MonthStore::new(Box::new(MemoryStore::new()));
    let month = month.parse().unwrap_or_else(|_| crate::ledger::MonthKey::current());
    ShellContext::with_manager(
        CliMode::Script,
        LedgerManager::new(store, month),
        Config::default(),
    )
}
