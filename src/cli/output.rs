//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::fmt::Display;
use std::io::{self, Write};

use colored::Colorize;

/// Print error (red bold "error:" prefix)
pub fn error(w: &mut dyn Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(w, "{}: {}", "error".red().bold(), msg)
}

/// Print success status (green checkmark)
pub fn success(w: &mut dyn Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(w, "{} {}", "✓".green(), msg)
}

/// Print plain output (no color)
pub fn info(w: &mut dyn Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(w, "{}", msg)
}
