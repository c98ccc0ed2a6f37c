use std::io;

use clap::{Arg, ArgAction};
use tracing::{debug, instrument};

use crate::cli::output;
use crate::command::{Command, Context};
use crate::dispatcher::Dispatcher;
use crate::exitcode::ExitCode;
use crate::flags::FlagSet;

/// Global flag read by the sample commands.
pub const VERBOSE: &str = "verbose";

/// Register the sample commands and the `--verbose` global flag.
pub fn register_all(app: &mut Dispatcher) {
    app.global_arg(
        Arg::new(VERBOSE)
            .short('v')
            .long("verbose")
            .action(ArgAction::SetTrue)
            .help("Enable verbose output"),
    )
    .register("greet", GreetCommand)
    .register_fn("sum", || "Add integers".to_string(), declare_sum, sum);
}

fn exit_code(result: io::Result<()>, code: ExitCode) -> ExitCode {
    match result {
        Ok(()) => code,
        Err(_) => ExitCode::Error,
    }
}

/// Prints a greeting.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreetCommand;

impl Command for GreetCommand {
    fn summary(&self) -> String {
        "Print a greeting".to_string()
    }

    fn declare_flags(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .value_name("NAME")
                .default_value("world")
                .help("Who to greet"),
        )
        .arg(
            Arg::new("shout")
                .long("shout")
                .action(ArgAction::SetTrue)
                .help("Print the greeting in upper case"),
        )
    }

    #[instrument(skip_all)]
    fn execute(&self, flags: &FlagSet, ctx: &mut Context<'_>) -> ExitCode {
        let name = flags
            .get_one::<String>("name")
            .map(String::as_str)
            .unwrap_or("world");
        if ctx.globals().get_flag(VERBOSE) {
            let result = output::info(ctx.err, &format!("greeting {}", name));
            if result.is_err() {
                return exit_code(result, ExitCode::Success);
            }
        }
        debug!(name, "greeting");

        let mut greeting = format!("Hello, {}!", name);
        if flags.get_flag("shout") {
            greeting = greeting.to_uppercase();
        }
        exit_code(output::info(ctx.out, &greeting), ExitCode::Success)
    }
}

fn declare_sum(cmd: clap::Command) -> clap::Command {
    cmd.arg(
        Arg::new("quiet")
            .short('q')
            .long("quiet")
            .action(ArgAction::SetTrue)
            .help("Print only the total"),
    )
}

#[instrument(skip_all)]
fn sum(flags: &FlagSet, ctx: &mut Context<'_>) -> ExitCode {
    if flags.narg() == 0 {
        let result = output::error(ctx.err, "sum needs at least one number");
        return exit_code(result, ExitCode::UsageError);
    }

    let mut total: i64 = 0;
    for arg in flags.args() {
        let value = match arg.parse::<i64>() {
            Ok(value) => value,
            Err(e) => {
                let result = output::error(ctx.err, &format!("not a number: {}: {}", arg, e));
                return exit_code(result, ExitCode::Error);
            }
        };
        total = match total.checked_add(value) {
            Some(total) => total,
            None => {
                let result = output::error(ctx.err, "sum overflows a 64-bit integer");
                return exit_code(result, ExitCode::Error);
            }
        };
    }
    debug!(total, "sum computed");

    let result = if flags.get_flag("quiet") {
        output::info(ctx.out, &total)
    } else {
        output::success(ctx.out, &format!("total: {}", total))
    };
    exit_code(result, ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppInfo;

    fn run(args: &[&str]) -> (ExitCode, String, String) {
        let mut app = Dispatcher::new(AppInfo::new("demo"));
        register_all(&mut app);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = app.run_from(args.iter().copied(), &mut out, &mut err);
        (
            code,
            String::from_utf8(out).expect("utf8"),
            String::from_utf8(err).expect("utf8"),
        )
    }

    #[test]
    fn given_greet_with_flags_when_run_then_prints_greeting() {
        let (code, out, _) = run(&["greet", "--name", "Ada", "--shout"]);
        assert_eq!(code, ExitCode::Success);
        assert_eq!(out, "HELLO, ADA!\n");
    }

    #[test]
    fn given_verbose_global_when_greet_then_reports_on_error_stream() {
        let (code, out, err) = run(&["-v", "greet"]);
        assert_eq!(code, ExitCode::Success);
        assert_eq!(out, "Hello, world!\n");
        assert!(err.contains("greeting world"));
    }

    /// Rejects every write; flushing has nothing to lose.
    struct BrokenPipe;

    impl std::io::Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn given_failing_error_stream_when_verbose_greet_then_error_code() {
        let mut app = Dispatcher::new(AppInfo::new("demo"));
        register_all(&mut app);
        let mut out = Vec::new();
        let code = app.run_from(["-v", "greet"], &mut out, &mut BrokenPipe);
        assert_eq!(code, ExitCode::Error);
        assert!(out.is_empty());
    }

    #[test]
    fn given_numbers_when_sum_quiet_then_prints_total() {
        let (code, out, _) = run(&["sum", "-q", "1", "2", "-3"]);
        assert_eq!(code, ExitCode::Success);
        assert_eq!(out, "0\n");
    }

    #[test]
    fn given_non_number_when_sum_then_error_code() {
        let (code, out, err) = run(&["sum", "1", "two"]);
        assert_eq!(code, ExitCode::Error);
        assert!(out.is_empty());
        assert!(err.contains("not a number: two"));
    }

    #[test]
    fn given_no_numbers_when_sum_then_usage_error() {
        let (code, _, err) = run(&["sum"]);
        assert_eq!(code, ExitCode::UsageError);
        assert!(err.contains("at least one number"));
    }
}
