/// Filter engine, padding, chains and filter kinds
pub mod filter;

/// Frequency responses and spectral filtering
pub mod spectral;

/// Filter trait interfaces
pub mod traits;
