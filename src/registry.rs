//! Name to command mapping used for resolution and help listings

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, instrument};

use crate::command::{Command, Context, FnCommand};
use crate::errors::{DispatchError, DispatchResult};
use crate::exitcode::ExitCode;
use crate::flags::FlagSet;

/// Registered commands, iterated in name order.
///
/// Populated before dispatch and read-only while a command runs.
#[derive(Default)]
pub struct Registry {
    commands: BTreeMap<String, Box<dyn Command>>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.commands.keys()).finish()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `command` under `name`, replacing any previous entry.
    ///
    /// Names are not validated; empty names are accepted. The replaced
    /// command, if any, is returned.
    // NOTE: silent overwrite keeps the last registration; callers that need
    // duplicate detection can check `contains` first.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        command: impl Command + 'static,
    ) -> Option<Box<dyn Command>> {
        let name = name.into();
        let previous = self.commands.insert(name.clone(), Box::new(command));
        if previous.is_some() {
            debug!(command = %name, "registration replaced existing command");
        }
        previous
    }

    /// Register a command built from closures.
    pub fn register_fn<S, D, E>(
        &mut self,
        name: impl Into<String>,
        summary: S,
        declare: D,
        execute: E,
    ) -> Option<Box<dyn Command>>
    where
        S: Fn() -> String + 'static,
        D: Fn(clap::Command) -> clap::Command + 'static,
        E: Fn(&FlagSet, &mut Context<'_>) -> ExitCode + 'static,
    {
        self.register(name, FnCommand::new(summary, declare, execute))
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|command| command.as_ref())
    }

    /// Resolve `name`, failing with an unknown-command error that names
    /// `program` and points at `<program> help`.
    #[instrument(level = "debug", skip(self))]
    pub fn lookup(&self, program: &str, name: &str) -> DispatchResult<&dyn Command> {
        self.get(name).ok_or_else(|| DispatchError::UnknownCommand {
            program: program.to_string(),
            name: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Command names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Entries in lexicographic name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Command)> {
        self.commands
            .iter()
            .map(|(name, command)| (name.as_str(), command.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
