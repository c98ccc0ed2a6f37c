//! Built-in `help` and `version` commands

use std::io;

use tracing::{debug, error};

use crate::command::{scope_for, Command, Context};
use crate::exitcode::ExitCode;
use crate::flags::FlagSet;
use crate::usage::{write_command_usage, write_usage};

pub const HELP: &str = "help";
pub const VERSION: &str = "version";

/// Map a failed write on an output stream to `ExitCode::Error`.
pub(crate) fn written(result: io::Result<()>, code: ExitCode) -> ExitCode {
    match result {
        Ok(()) => code,
        Err(e) => {
            error!("write failed: {}", e);
            ExitCode::Error
        }
    }
}

/// `help` lists all commands, `help <command>` shows that command's flags.
///
/// The target command is only asked to declare its flags; it never runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct HelpCommand;

impl Command for HelpCommand {
    fn summary(&self) -> String {
        "Show help information".to_string()
    }

    fn execute(&self, flags: &FlagSet, ctx: &mut Context<'_>) -> ExitCode {
        let app = ctx.app();
        let registry = ctx.registry();
        let Some(topic) = flags.arg(0) else {
            let result = write_usage(ctx.out, app, registry);
            return written(result, ExitCode::Success);
        };

        let command = match registry.lookup(&app.name, topic) {
            Ok(command) => command,
            Err(e) => {
                let result = writeln!(ctx.err, "{}", e);
                return written(result, e.exit_code());
            }
        };
        debug!(topic, "rendering command usage");
        let scope = scope_for(topic, command);
        let result = write_command_usage(ctx.out, app, topic, scope);
        written(result, ExitCode::Success)
    }
}

/// `version` prints the configured version string.
#[derive(Debug, Default, Clone, Copy)]
pub struct VersionCommand;

impl Command for VersionCommand {
    fn summary(&self) -> String {
        "Show version information".to_string()
    }

    fn execute(&self, _flags: &FlagSet, ctx: &mut Context<'_>) -> ExitCode {
        let version = &ctx.app().version;
        let result = writeln!(ctx.out, "{}", version);
        written(result, ExitCode::Success)
    }
}
