//! Process exit codes returned by the dispatcher

/// Outcome of a dispatch. The caller turns it into the process status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitCode {
    /// Successful termination
    Success,
    /// Generic failure inside a command
    Error,
    /// Malformed invocation (unknown command, bad flags, no command)
    UsageError,
}

impl ExitCode {
    /// Numeric process status for this outcome.
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => 0,
            ExitCode::Error => 1,
            ExitCode::UsageError => 2,
        }
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Success
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.code()
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        // codes are 0..=2, always fit in a u8
        std::process::ExitCode::from(code.code() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_exit_codes_when_converted_then_match_process_status() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::Error.code(), 1);
        assert_eq!(ExitCode::UsageError.code(), 2);
        assert_eq!(i32::from(ExitCode::UsageError), 2);
    }

    #[test]
    fn given_success_when_checked_then_only_success_is_success() {
        assert!(ExitCode::Success.is_success());
        assert!(!ExitCode::Error.is_success());
        assert!(!ExitCode::UsageError.is_success());
    }
}
