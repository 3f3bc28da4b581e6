use core::{error, fmt};

/// Errors raised whilst constructing or running dfilt filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input is shorter than a filter warmup or a padding policy requires.
    InsufficientLength {
        /// Minimum number of rows required.
        required: usize,
        /// Number of rows received.
        got: usize,
        /// Which operation rejected the input.
        reason: String,
    },
    /// Padding was requested on an empty matrix, or the padding policy is unknown.
    InvalidPadding {
        /// Explaining why the padding is invalid.
        reason: String,
    },
    /// A filter chain description could not be turned into filters.
    Configuration {
        /// Explaining what part of the description is invalid.
        reason: String,
    },
    /// Argument parsed into function were invalid.
    InvalidArg {
        /// The invalid arg
        arg: String,
        /// Explaining why arg is invalid.
        reason: String,
    },
    /// Convolution failed.
    Conv {
        /// Explaining why the convolution failed.
        reason: String,
    },
    /// A coefficient file could not be read or parsed.
    Io {
        /// Path of the offending file.
        path: String,
        /// Underlying failure.
        reason: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InsufficientLength {
                required,
                got,
                reason,
            } => write!(
                f,
                "Insufficient length: {reason} requires at least {required} rows, got {got}."
            ),
            Error::InvalidPadding { reason } => write!(f, "Invalid padding: {reason}"),
            Error::Configuration { reason } => write!(f, "Configuration error: {reason}"),
            Error::InvalidArg { arg, reason } => {
                write!(f, "Invalid argument `{arg}`: {reason}")
            }
            Error::Conv { reason } => write!(f, "Convolution error: {reason}"),
            Error::Io { path, reason } => write!(f, "Could not read `{path}`: {reason}"),
        }
    }
}

impl error::Error for Error {}

impl Error {
    /// Shorthand for [`Error::InvalidArg`].
    pub fn invalid_arg(arg: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidArg {
            arg: arg.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`Error::InsufficientLength`].
    pub fn insufficient_length(required: usize, got: usize, reason: impl Into<String>) -> Self {
        Error::InsufficientLength {
            required,
            got,
            reason: reason.into(),
        }
    }
}

/// Result type used throughout dfilt.
pub type Result<T, E = Error> = core::result::Result<T, E>;
