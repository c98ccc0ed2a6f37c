//! Command capability and the closure-based adapter

use std::fmt;
use std::io::Write;

use crate::config::AppInfo;
use crate::exitcode::ExitCode;
use crate::flags::FlagSet;
use crate::registry::Registry;

/// One named subcommand: its summary, its flags, and what it does.
pub trait Command {
    /// One-line summary shown in the top-level usage.
    fn summary(&self) -> String;

    /// Declare this command's flags on the scope the dispatcher hands in.
    ///
    /// The default declares nothing.
    fn declare_flags(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Run the command against its parsed flags.
    ///
    /// Failures are reported through `ctx` and the returned `ExitCode`;
    /// the dispatcher passes the code through unchanged.
    fn execute(&self, flags: &FlagSet, ctx: &mut Context<'_>) -> ExitCode;
}

/// What a command sees while it runs besides its own flags.
pub struct Context<'a> {
    app: &'a AppInfo,
    registry: &'a Registry,
    globals: &'a FlagSet,
    /// Output stream
    pub out: &'a mut dyn Write,
    /// Error stream
    pub err: &'a mut dyn Write,
}

impl<'a> Context<'a> {
    pub fn new(
        app: &'a AppInfo,
        registry: &'a Registry,
        globals: &'a FlagSet,
        out: &'a mut dyn Write,
        err: &'a mut dyn Write,
    ) -> Self {
        Self {
            app,
            registry,
            globals,
            out,
            err,
        }
    }

    pub fn app(&self) -> &'a AppInfo {
        self.app
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Flags parsed before the command name.
    pub fn globals(&self) -> &'a FlagSet {
        self.globals
    }
}

type SummaryFn = Box<dyn Fn() -> String>;
type DeclareFn = Box<dyn Fn(clap::Command) -> clap::Command>;
type ExecuteFn = Box<dyn Fn(&FlagSet, &mut Context<'_>) -> ExitCode>;

/// Command assembled from three closures, for registering without a type.
pub struct FnCommand {
    summary: SummaryFn,
    declare: DeclareFn,
    execute: ExecuteFn,
}

impl FnCommand {
    pub fn new<S, D, E>(summary: S, declare: D, execute: E) -> Self
    where
        S: Fn() -> String + 'static,
        D: Fn(clap::Command) -> clap::Command + 'static,
        E: Fn(&FlagSet, &mut Context<'_>) -> ExitCode + 'static,
    {
        Self {
            summary: Box::new(summary),
            declare: Box::new(declare),
            execute: Box::new(execute),
        }
    }
}

impl fmt::Debug for FnCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCommand")
            .field("summary", &(self.summary)())
            .finish_non_exhaustive()
    }
}

impl Command for FnCommand {
    fn summary(&self) -> String {
        (self.summary)()
    }

    fn declare_flags(&self, cmd: clap::Command) -> clap::Command {
        (self.declare)(cmd)
    }

    fn execute(&self, flags: &FlagSet, ctx: &mut Context<'_>) -> ExitCode {
        (self.execute)(flags, ctx)
    }
}

/// Fresh flag scope for `name` with `command`'s flags declared on it.
pub fn scope_for(name: &str, command: &dyn Command) -> clap::Command {
    command.declare_flags(crate::flags::scope(name))
}
