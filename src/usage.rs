//! Usage text rendering
//!
//! Both renderings are pure functions of the app info, the registry, and a
//! command's declared flags. They write to whatever stream the caller passes.

use std::io::{self, Write};

use crate::config::AppInfo;
use crate::registry::Registry;

const INDENT: &str = "  ";
const PADDING: usize = 2;

/// Top-level usage: summary, invocation line, sorted command table, hint.
pub fn write_usage(w: &mut dyn Write, app: &AppInfo, registry: &Registry) -> io::Result<()> {
    writeln!(w, "{}", app.summary)?;
    writeln!(w)?;
    writeln!(w, "Usage:")?;
    writeln!(w)?;
    writeln!(w, "{INDENT}{} <command> [arguments]", app.name)?;
    writeln!(w)?;
    writeln!(w, "The commands are:")?;
    writeln!(w)?;

    let width = registry
        .names()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0)
        + PADDING;
    for (name, command) in registry.iter() {
        let line = format!("{INDENT}{name:<width$}{}", command.summary());
        writeln!(w, "{}", line.trim_end())?;
    }

    writeln!(w)?;
    writeln!(
        w,
        "Use \"{} help <command>\" for more information about a command.",
        app.name
    )?;
    writeln!(w)
}

/// Per-command usage: invocation line and the flag table rendered by clap.
///
/// `scope` is the command's flag scope with its flags already declared.
pub fn write_command_usage(
    w: &mut dyn Write,
    app: &AppInfo,
    name: &str,
    scope: clap::Command,
) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "Usage:")?;
    writeln!(w)?;
    writeln!(w, "{INDENT}{} {name} [arguments]", app.name)?;
    writeln!(w)?;
    writeln!(w, "The flags are:")?;
    writeln!(w)?;

    let defaults = flag_defaults(scope);
    if !defaults.is_empty() {
        writeln!(w, "{defaults}")?;
    }
    writeln!(w)
}

/// clap's rendering of the declared options, without any heading.
fn flag_defaults(scope: clap::Command) -> String {
    let mut scope = scope.help_template("{options}");
    scope.render_help().to_string().trim_end().to_string()
}
