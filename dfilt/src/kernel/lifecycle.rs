use super::ConfigError;

/// Validating constructor of a filter kind.
///
/// `Config` is the plain (usually serde) description of the filter. All parameter checks
/// happen here, so a constructed filter only fails on input shorter than its warmup.
pub trait KernelLifecycle: Sized {
    /// Filter config type.
    type Config;

    /// Construct a validated filter from config.
    fn try_new(config: Self::Config) -> Result<Self, ConfigError>;
}
