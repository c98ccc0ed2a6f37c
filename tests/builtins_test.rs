//! Integration tests for the built-in `help` and `version` commands.

use std::cell::Cell;
use std::io::Write;
use std::rc::Rc;

use rstest::{fixture, rstest};
use subdispatch::util::testing;
use subdispatch::{AppInfo, Dispatcher, ExitCode};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn run(app: &mut Dispatcher, args: &[&str]) -> (ExitCode, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = app.run_from(args.iter().copied(), &mut out, &mut err);
    (
        code,
        String::from_utf8(out).expect("utf8 stdout"),
        String::from_utf8(err).expect("utf8 stderr"),
    )
}

fn with_commands(app: AppInfo) -> Dispatcher {
    let mut dispatcher = Dispatcher::new(app);
    dispatcher
        .register_fn(
            "build",
            || "Build the project".to_string(),
            |cmd| {
                cmd.arg(
                    clap::Arg::new("release")
                        .long("release")
                        .action(clap::ArgAction::SetTrue)
                        .help("Build with optimizations"),
                )
            },
            |_, _| ExitCode::Success,
        )
        .register_fn(
            "test",
            || "Run tests".to_string(),
            |cmd| cmd,
            |_, _| ExitCode::Success,
        );
    dispatcher
}

#[fixture]
fn app() -> Dispatcher {
    with_commands(AppInfo::new("prog").with_summary("Prog builds things"))
}

#[rstest]
fn given_help_without_args_when_run_then_lists_every_command(mut app: Dispatcher) {
    let (code, out, err) = run(&mut app, &["help"]);

    assert_eq!(code, ExitCode::Success);
    assert!(err.is_empty());
    assert_eq!(
        out,
        "Prog builds things\n\
         \n\
         Usage:\n\
         \n\
         \x20 prog <command> [arguments]\n\
         \n\
         The commands are:\n\
         \n\
         \x20 build  Build the project\n\
         \x20 help   Show help information\n\
         \x20 test   Run tests\n\
         \n\
         Use \"prog help <command>\" for more information about a command.\n\
         \n"
    );
}

#[rstest]
fn given_help_for_command_when_run_then_renders_its_flags(mut app: Dispatcher) {
    let (code, out, _) = run(&mut app, &["help", "build"]);

    assert_eq!(code, ExitCode::Success);
    assert!(out.starts_with("\nUsage:\n\n  prog build [arguments]\n\nThe flags are:\n\n"));
    assert!(out.contains("--release"));
    assert!(out.contains("Build with optimizations"));
}

#[rstest]
fn given_help_for_unknown_command_when_run_then_usage_error(mut app: Dispatcher) {
    let (code, out, err) = run(&mut app, &["help", "deploy"]);

    assert_eq!(code, ExitCode::UsageError);
    assert!(out.is_empty());
    assert!(err.contains("deploy"));
    assert!(err.contains("unknown command"));
}

#[test]
fn given_help_for_command_when_run_then_target_never_executes() {
    let ran = Rc::new(Cell::new(false));
    let flag = Rc::clone(&ran);
    let mut app = Dispatcher::new(AppInfo::new("prog"));
    app.register_fn(
        "danger",
        || "Do something irreversible".to_string(),
        |cmd| cmd,
        move |_, _| {
            flag.set(true);
            ExitCode::Success
        },
    );

    let (code, _, _) = run(&mut app, &["help", "danger"]);

    assert_eq!(code, ExitCode::Success);
    assert!(!ran.get());
}

#[rstest]
fn given_no_version_when_dispatched_then_version_absent(mut app: Dispatcher) {
    let (_, listing, _) = run(&mut app, &["help"]);
    assert!(!listing.contains("version"));
    assert!(!app.registry().contains("version"));

    let (code, _, err) = run(&mut app, &["version"]);
    assert_eq!(code, ExitCode::UsageError);
    assert!(err.contains("unknown command"));
}

#[test]
fn given_version_when_dispatched_then_version_command_prints_it() {
    let mut app = with_commands(AppInfo::new("prog").with_version("1.4.2"));

    let (code, out, _) = run(&mut app, &["version"]);
    assert_eq!(code, ExitCode::Success);
    assert_eq!(out, "1.4.2\n");

    let (_, listing, _) = run(&mut app, &["help"]);
    assert!(listing.contains("  version  Show version information\n"));
}

#[test]
fn given_user_help_command_when_dispatched_then_builtin_replaces_it() {
    let mut app = Dispatcher::new(AppInfo::new("prog"));
    app.register_fn(
        "help",
        || "custom".to_string(),
        |cmd| cmd,
        |_, ctx| {
            let _ = writeln!(ctx.out, "custom help");
            ExitCode::Error
        },
    );

    let (code, out, _) = run(&mut app, &["help"]);
    assert_eq!(code, ExitCode::Success);
    assert!(out.contains("Show help information"));
}
