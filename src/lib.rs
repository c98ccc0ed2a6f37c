//! Minimal subcommand dispatcher.
//!
//! Register named commands, each declaring its own flags and execution,
//! then hand the process arguments to [`Dispatcher`]. Flags before the
//! command name are parsed globally; the rest belongs to the command.
//! `help` is always available, `version` when a version string is set.
//!
//! ```no_run
//! use std::io::Write;
//! use subdispatch::{AppInfo, Dispatcher, ExitCode};
//!
//! let mut app = Dispatcher::new(AppInfo::new("tool").with_version("1.0.0"));
//! app.register_fn(
//!     "hello",
//!     || "Say hello".to_string(),
//!     |cmd| cmd,
//!     |_flags, ctx| match writeln!(ctx.out, "hello") {
//!         Ok(()) => ExitCode::Success,
//!         Err(_) => ExitCode::Error,
//!     },
//! );
//! std::process::exit(app.execute().code());
//! ```

pub mod builtins;
pub mod cli;
pub mod command;
pub mod config;
pub mod dispatcher;
pub mod errors;
pub mod exitcode;
pub mod flags;
pub mod registry;
pub mod usage;
pub mod util;

pub use command::{Command, Context, FnCommand};
pub use config::AppInfo;
pub use dispatcher::{Dispatcher, ErrorHandling};
pub use errors::{DispatchError, DispatchResult};
pub use exitcode::ExitCode;
pub use flags::FlagSet;
pub use registry::Registry;
