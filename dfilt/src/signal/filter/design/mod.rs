//! Coefficient design for the built-in filter kinds.
//!
//! Each function returns plain coefficient vectors; wrapping them into an
//! [ArmaFilter](super::ArmaFilter) is left to the filter kinds.

mod butter;
mod relative_degree;
mod stencil;
mod wavelet;
mod window;
mod yule_walker;

pub use butter::*;
pub(crate) use relative_degree::*;
pub use stencil::*;
pub use wavelet::*;
pub use window::*;
pub use yule_walker::*;
