//! Phase-scoped flag parsing on top of clap
//!
//! A `FlagSet` holds the result of one parse phase: either the global
//! arguments before the command name, or one command's own arguments.
//! Parsing stops at the first positional token; it and everything after it
//! are kept verbatim as positional arguments.

use std::any::Any;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing::trace;

/// Id of the catch-all positional that collects leftover arguments.
pub const ARGS_ID: &str = "__subdispatch_args";

/// Id of the `-h`/`--help` flag added to every scope.
pub const HELP_ID: &str = "__subdispatch_help";

/// Parsed flags and positional arguments of one phase.
#[derive(Debug, Clone)]
pub struct FlagSet {
    name: String,
    matches: ArgMatches,
    args: Vec<String>,
}

/// Empty clap command for a scope, ready for flag declarations.
///
/// The binary name is not part of the parsed input; clap's own help and
/// version flags are replaced by the dispatcher's usage rendering.
pub fn scope(name: &str) -> Command {
    Command::new(name.to_string())
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
}

/// Add `-h`/`--help` to `cmd`, leaving out whatever part the scope
/// already declares itself. With both taken, no help flag is added.
fn with_help_flag(cmd: Command, action: ArgAction) -> Command {
    let short_taken = cmd.get_arguments().any(|arg| arg.get_short() == Some('h'));
    let long_taken = cmd.get_arguments().any(|arg| arg.get_long() == Some("help"));
    if short_taken && long_taken {
        return cmd;
    }

    let mut help = Arg::new(HELP_ID).action(action).hide(true);
    if !short_taken {
        help = help.short('h');
    }
    if !long_taken {
        help = help.long("help");
    }
    cmd.arg(help)
}

impl FlagSet {
    /// Parse a command's arguments against its declared flags.
    ///
    /// `-h`/`--help` surfaces as a `DisplayHelp` error so the caller can
    /// render the per-command usage, unless the command claims `-h` or
    /// `--help` for a flag of its own.
    pub fn parse(cmd: Command, args: &[String]) -> Result<Self, clap::Error> {
        let cmd = with_help_flag(cmd, ArgAction::Help).arg(
            Arg::new(ARGS_ID)
                .num_args(0..)
                .trailing_var_arg(true)
                .value_parser(value_parser!(String))
                .hide(true),
        );
        let name = cmd.get_name().to_string();
        let matches = cmd.try_get_matches_from(args)?;
        let args = matches
            .get_many::<String>(ARGS_ID)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        trace!(scope = %name, ?args, "parsed command flags");
        Ok(Self {
            name,
            matches,
            args,
        })
    }

    /// Parse the global phase: flags up to the command name.
    ///
    /// The command name and everything after it end up in `args()`.
    pub fn parse_global(cmd: Command, args: &[String]) -> Result<Self, clap::Error> {
        let cmd = with_help_flag(cmd, ArgAction::SetTrue)
            .disable_help_subcommand(true)
            .allow_external_subcommands(true)
            .external_subcommand_value_parser(value_parser!(String));
        let name = cmd.get_name().to_string();
        let matches = cmd.try_get_matches_from(args)?;
        let args = match matches.subcommand() {
            Some((command, rest)) => std::iter::once(command.to_string())
                .chain(
                    rest.get_many::<String>("")
                        .into_iter()
                        .flatten()
                        .cloned(),
                )
                .collect(),
            None => Vec::new(),
        };
        trace!(scope = %name, ?args, "parsed global flags");
        Ok(Self {
            name,
            matches,
            args,
        })
    }

    /// Scope name: the program name for globals, the command name otherwise.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Positional arguments left after flag parsing.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn narg(&self) -> usize {
        self.args.len()
    }

    pub fn arg(&self, i: usize) -> Option<&str> {
        self.args.get(i).map(String::as_str)
    }

    /// True when the scope's own `-h`/`--help` was given in the global phase.
    pub fn help_requested(&self) -> bool {
        self.get_flag(HELP_ID)
    }

    /// Value of a boolean flag; false when the id is unknown.
    pub fn get_flag(&self, id: &str) -> bool {
        self.get_one::<bool>(id).copied().unwrap_or(false)
    }

    /// Typed value of a flag; `None` when absent, unknown, or of another type.
    pub fn get_one<T: Any + Clone + Send + Sync + 'static>(&self, id: &str) -> Option<&T> {
        self.matches.try_get_one::<T>(id).ok().flatten()
    }

    /// All values of a multi-valued flag.
    pub fn get_many<T: Any + Clone + Send + Sync + 'static>(&self, id: &str) -> Vec<&T> {
        self.matches
            .try_get_many::<T>(id)
            .ok()
            .flatten()
            .map(|values| values.collect())
            .unwrap_or_default()
    }

    /// Raw clap matches for anything the accessors above don't cover.
    pub fn matches(&self) -> &ArgMatches {
        &self.matches
    }
}
