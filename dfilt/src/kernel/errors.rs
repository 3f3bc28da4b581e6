use core::fmt;

use dfilt_core::Error;

/// Validation errors raised at filter construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required coefficient list or configuration field is empty.
    EmptyInput {
        /// Name of the argument that is empty.
        arg: &'static str,
    },
    /// A configuration argument value is invalid.
    InvalidArgument {
        /// Name of the argument.
        arg: &'static str,
        /// Human readable reason.
        reason: &'static str,
    },
    /// A coefficient list did not have the length the design requires.
    LengthMismatch {
        /// Name of the argument.
        arg: &'static str,
        /// Required length.
        expected: usize,
        /// Received length.
        got: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyInput { arg } => write!(f, "Input `{arg}` was empty."),
            ConfigError::InvalidArgument { arg, reason } => {
                write!(f, "Invalid argument `{arg}`: {reason}")
            }
            ConfigError::LengthMismatch { arg, expected, got } => {
                write!(
                    f,
                    "Length mismatch on `{arg}`. Expected {expected}, got {got}."
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(value: ConfigError) -> Self {
        match value {
            ConfigError::EmptyInput { arg } => Error::invalid_arg(arg, "must not be empty"),
            ConfigError::InvalidArgument { arg, reason } => Error::invalid_arg(arg, reason),
            ConfigError::LengthMismatch { arg, expected, got } => {
                Error::invalid_arg(arg, format!("expected length {expected}, got {got}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_become_invalid_arguments() {
        let err: Error = ConfigError::InvalidArgument {
            arg: "length",
            reason: "window length must be positive",
        }
        .into();
        assert_eq!(
            err,
            Error::InvalidArg {
                arg: "length".into(),
                reason: "window length must be positive".into()
            }
        );

        let err: Error = ConfigError::LengthMismatch {
            arg: "cutoff",
            expected: 2,
            got: 1,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Invalid argument `cutoff`: expected length 2, got 1"
        );
    }
}
