//! Shell state, command dispatch and error reporting.

use std::{io, sync::Arc};

use strsim::levenshtein;
use thiserror::Error;
use tracing::debug;

use nova_config::{Config, ConfigError, ConfigManager};
use nova_core::{Clock, CoreError, DashboardQuery, LedgerSession, ProfileService};
use nova_domain::{NamedEntity, Profile};
use nova_storage_json::JsonStore;

use crate::cli::{commands, io as cli_io, registry::CommandRegistry, system_clock};
use crate::errors::{CliError, NovaError};
use crate::utils::paths;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("No profile is signed in. Use `login <name>` or `profile-new <name>` first.")]
    NotSignedIn,
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] NovaError),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoActiveSession => CommandError::NotSignedIn,
            other => CommandError::Core(NovaError::from(other)),
        }
    }
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        CommandError::Core(NovaError::from(err))
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(inner) => CliError::Core(inner),
            CommandError::InvalidArguments(message) => CliError::Input(message),
            other => CliError::Command(other.to_string()),
        }
    }
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: JsonStore,
    pub clock: Arc<dyn Clock>,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub ledger: Option<LedgerSession>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let store = JsonStore::new(paths::data_dir())?;
        let config_manager = ConfigManager::with_base_dir(&paths::app_data_dir())?;
        let config = config_manager.load()?;
        cli_io::apply_config(&config);

        let mut context = ShellContext {
            mode,
            registry,
            store,
            clock: system_clock::clock_from_env(),
            config_manager,
            config,
            ledger: None,
            last_command: None,
            running: true,
        };
        context.resume_session()?;
        Ok(context)
    }

    /// Reopens the ledger of the profile that was signed in when the shell last ran.
    fn resume_session(&mut self) -> Result<(), CliError> {
        if let Some(profile) = ProfileService::current(&self.store)? {
            debug!(uid = %profile.uid, "resuming session");
            self.open_ledger(profile)?;
        }
        Ok(())
    }

    /// Loads `profile`'s collection with the configured range and predictor thresholds.
    pub(crate) fn open_ledger(&mut self, profile: Profile) -> Result<(), CoreError> {
        let query = DashboardQuery::new(self.config.default_range);
        let policy = self.config.prediction.policy();
        let ledger =
            LedgerSession::open(&self.store, self.clock.as_ref(), profile, query, policy)?;
        self.ledger = Some(ledger);
        Ok(())
    }

    /// Split borrow of the pieces a ledger command needs.
    pub(crate) fn ledger_parts(
        &mut self,
    ) -> Result<(&JsonStore, &dyn Clock, &mut LedgerSession), CommandError> {
        let ledger = self.ledger.as_mut().ok_or(CommandError::NotSignedIn)?;
        Ok((&self.store, self.clock.as_ref(), ledger))
    }

    pub(crate) fn ledger(&self) -> Result<&LedgerSession, CommandError> {
        self.ledger.as_ref().ok_or(CommandError::NotSignedIn)
    }

    pub(crate) fn prompt(&self) -> String {
        match &self.ledger {
            Some(ledger) => format!("nova({})> ", ledger.profile().name()),
            None => "nova> ".into(),
        }
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

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));

        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, input), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{name}`?"));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::NotSignedIn => {
                cli_io::print_error(CommandError::NotSignedIn);
                cli_io::print_hint("Try `profile-new Alex USD` to get started.");
            }
            other => cli_io::print_error(other),
        }
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }
}
