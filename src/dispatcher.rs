//! Entry point: global flags, command resolution, command flags, execution

use std::io::{self, Write};

use clap::error::ErrorKind;
use clap::Arg;
use tracing::{debug, instrument, warn};

use crate::builtins::{written, HelpCommand, VersionCommand, HELP, VERSION};
use crate::command::{scope_for, Command, Context};
use crate::config::AppInfo;
use crate::errors::DispatchError;
use crate::exitcode::ExitCode;
use crate::flags::{self, FlagSet};
use crate::registry::Registry;
use crate::usage::{write_command_usage, write_usage};

/// What happens when a command's flags fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorHandling {
    /// Report the error and usage, then return `ExitCode::UsageError`.
    #[default]
    Continue,
    /// Report the error and usage, then terminate the process with status 2.
    Exit,
}

/// Owns the registry and display settings; runs one invocation.
#[derive(Debug)]
pub struct Dispatcher {
    app: AppInfo,
    registry: Registry,
    global_args: Vec<Arg>,
    error_handling: ErrorHandling,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(AppInfo::default())
    }
}

impl Dispatcher {
    pub fn new(app: AppInfo) -> Self {
        Self {
            app,
            registry: Registry::new(),
            global_args: Vec::new(),
            error_handling: ErrorHandling::default(),
        }
    }

    pub fn app(&self) -> &AppInfo {
        &self.app
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Register `command` under `name`; a later registration of the same
    /// name wins.
    pub fn register(&mut self, name: impl Into<String>, command: impl Command + 'static) -> &mut Self {
        self.registry.register(name, command);
        self
    }

    /// Register a command built from closures.
    pub fn register_fn<S, D, E>(
        &mut self,
        name: impl Into<String>,
        summary: S,
        declare: D,
        execute: E,
    ) -> &mut Self
    where
        S: Fn() -> String + 'static,
        D: Fn(clap::Command) -> clap::Command + 'static,
        E: Fn(&FlagSet, &mut Context<'_>) -> ExitCode + 'static,
    {
        self.registry.register_fn(name, summary, declare, execute);
        self
    }

    /// Declare a flag accepted before the command name.
    ///
    /// Global args must be flags or options; positionals would swallow
    /// the command name.
    pub fn global_arg(&mut self, arg: Arg) -> &mut Self {
        self.global_args.push(arg);
        self
    }

    pub fn error_handling(&mut self, policy: ErrorHandling) -> &mut Self {
        self.error_handling = policy;
        self
    }

    /// Dispatch the process arguments to stdout/stderr.
    pub fn execute(&mut self) -> ExitCode {
        let args = std::env::args_os()
            .skip(1)
            .map(|arg| arg.to_string_lossy().into_owned());
        let mut out = io::stdout().lock();
        let mut err = io::stderr().lock();
        self.run_from(args, &mut out, &mut err)
    }

    /// Dispatch `args` (without the program name) and return the outcome.
    ///
    /// Both streams are flushed before returning.
    #[instrument(skip_all, fields(program = %self.app.name))]
    pub fn run_from<I, T>(&mut self, args: I, out: &mut dyn Write, err: &mut dyn Write) -> ExitCode
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        debug!(?args, "dispatching");

        self.register_builtins();
        let code = self.dispatch(&args, out, err);

        let flushed = out.flush().and_then(|()| err.flush());
        let code = written(flushed, code);
        debug!(code = code.code(), "dispatch finished");
        code
    }

    fn register_builtins(&mut self) {
        self.registry.register(HELP, HelpCommand);
        if self.app.has_version() {
            self.registry.register(VERSION, VersionCommand);
        }
    }

    fn dispatch(&self, args: &[String], out: &mut dyn Write, err: &mut dyn Write) -> ExitCode {
        let global_scope = self
            .global_args
            .iter()
            .cloned()
            .fold(flags::scope(&self.app.name), |cmd, arg| cmd.arg(arg));

        let globals = match FlagSet::parse_global(global_scope, args) {
            Ok(globals) => globals,
            Err(e) => {
                let e = DispatchError::from(e);
                let result = report(err, &e, |w| write_usage(w, &self.app, &self.registry));
                return written(result, e.exit_code());
            }
        };

        let Some(name) = globals.arg(0) else {
            let result = write_usage(err, &self.app, &self.registry);
            return written(result, ExitCode::UsageError);
        };
        if globals.help_requested() {
            let result = write_usage(err, &self.app, &self.registry);
            return written(result, ExitCode::UsageError);
        }

        let command = match self.registry.lookup(&self.app.name, name) {
            Ok(command) => command,
            Err(e) => {
                let result = writeln!(err, "{}", e);
                return written(result, e.exit_code());
            }
        };

        let flags = match FlagSet::parse(scope_for(name, command), &globals.args()[1..]) {
            Ok(flags) => flags,
            Err(e) if e.kind() == ErrorKind::DisplayHelp => {
                let result = write_command_usage(out, &self.app, name, scope_for(name, command));
                return written(result, ExitCode::Success);
            }
            Err(e) => return self.flag_error(name, command, e, err),
        };

        debug!(command = name, args = ?flags.args(), "executing");
        let mut ctx = Context::new(&self.app, &self.registry, &globals, out, err);
        command.execute(&flags, &mut ctx)
    }

    fn flag_error(
        &self,
        name: &str,
        command: &dyn Command,
        e: clap::Error,
        err: &mut dyn Write,
    ) -> ExitCode {
        let e = DispatchError::from(e);
        warn!(command = name, "invalid arguments");
        let result = report(err, &e, |w| {
            write_command_usage(w, &self.app, name, scope_for(name, command))
        });
        let code = written(result, e.exit_code());

        if self.error_handling == ErrorHandling::Exit {
            let _ = err.flush();
            std::process::exit(code.code());
        }
        code
    }
}

/// Write a one-line dispatch error followed by the relevant usage text.
fn report<F>(err: &mut dyn Write, e: &DispatchError, usage: F) -> io::Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    writeln!(err, "error: {}", e)?;
    usage(err)
}
