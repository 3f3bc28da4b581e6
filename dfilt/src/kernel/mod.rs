//! Shared kernel substrate.
//!
//! Every filter is built from a plain config value through [`KernelLifecycle::try_new`],
//! which validates the parameters once so that filtering itself only fails on bad input.

mod errors;
mod lifecycle;

pub use errors::*;
pub use lifecycle::*;
