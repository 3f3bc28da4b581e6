//! ARMA filter engine, padding policies, filter chains and the configurable filter kinds.

///
/// Coefficient design: Butterworth, stencils, CRN taps, wavelets, Yule-Walker
///
pub mod design;

mod arma;
mod block_filter;
mod chain;
mod config;
mod pad;

pub use arma::*;
pub use block_filter::*;
pub use chain::*;
pub use config::*;
pub use pad::*;

pub(crate) use arma::delegate_to_arma;

mod butterworth;
mod coefficient_file;
mod correlation;
mod decorrelation;
mod derivative;
mod grace_lowpass;
mod integral;
mod lag;
mod moving_average;
mod moving_median;
mod notch;
mod reduce_output;
mod wavelet;

pub use butterworth::*;
pub use coefficient_file::*;
pub use correlation::*;
pub use decorrelation::*;
pub use derivative::*;
pub use grace_lowpass::*;
pub use integral::*;
pub use lag::*;
pub use moving_average::*;
pub use moving_median::*;
pub use notch::*;
pub use reduce_output::*;
pub use wavelet::*;
