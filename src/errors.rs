//! Dispatch errors

use clap::error::{ContextKind, ErrorKind};
use thiserror::Error;

use crate::exitcode::ExitCode;

/// Errors the dispatcher reports before handing control to a command.
/// Failures inside a command's own logic are never wrapped here; the
/// command returns its own `ExitCode`.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("{program} {name}: unknown command\nRun '{program} help' for usage")]
    UnknownCommand { program: String, name: String },

    #[error("{}", describe_clap_error(.0))]
    InvalidArgs(#[from] clap::Error),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(String),
}

impl DispatchError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get the exit code the dispatcher returns for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            DispatchError::UnknownCommand { .. } | DispatchError::InvalidArgs(_) => {
                ExitCode::UsageError
            }
            DispatchError::Io { .. } | DispatchError::Config(_) => ExitCode::Error,
        }
    }
}

/// One-line description of a clap parse error.
///
/// clap's own rendering carries a usage block; the dispatcher prints its
/// own usage, so only the kind and the offending argument/value are kept.
fn describe_clap_error(e: &clap::Error) -> String {
    let mut message = e
        .kind()
        .as_str()
        .unwrap_or("invalid arguments")
        .to_string();
    if let Some(arg) = e.get(ContextKind::InvalidArg) {
        message.push_str(&format!(": '{}'", arg));
    }
    if let Some(value) = e.get(ContextKind::InvalidValue) {
        let value = value.to_string();
        if !value.is_empty() {
            message.push_str(&format!(" (value '{}')", value));
        }
    }
    if e.kind() == ErrorKind::ValueValidation {
        if let Some(source) = std::error::Error::source(e) {
            message.push_str(&format!(": {}", source));
        }
    }
    message
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_unknown_command_when_displayed_then_contains_name_and_hint() {
        let err = DispatchError::UnknownCommand {
            program: "tool".into(),
            name: "deploy".into(),
        };
        assert_eq!(
            err.to_string(),
            "tool deploy: unknown command\nRun 'tool help' for usage"
        );
        assert_eq!(err.exit_code(), ExitCode::UsageError);
    }

    #[test]
    fn given_clap_error_when_displayed_then_single_line_without_usage() {
        let err = clap::Command::new("c")
            .no_binary_name(true)
            .try_get_matches_from(["--bogus"])
            .unwrap_err();
        let err = DispatchError::from(err);

        let message = err.to_string();
        assert!(message.contains("'--bogus'"), "{}", message);
        assert!(!message.contains("Usage:"));
        assert!(!message.contains('\n'));
        assert_eq!(err.exit_code(), ExitCode::UsageError);
    }

    #[test]
    fn given_io_error_when_mapped_then_generic_error() {
        let err = DispatchError::io(
            "write usage",
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"),
        );
        assert_eq!(err.exit_code(), ExitCode::Error);
        assert!(err.to_string().contains("write usage"));
    }
}
