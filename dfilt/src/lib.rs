//! Composable digital filters for equidistant multi-column time series.
//!
//! Filters are configured from JSON, built once and then applied to any number of arcs
//! (matrices with one row per epoch and one column per channel). Most kinds reduce to an
//! ARMA recursion that runs either in the time domain or by spectral multiplication.
//!
//! ```
//! use dfilt::signal::filter::chain_from_json;
//! use dfilt::signal::traits::DigitalFilter;
//! use ndarray::array;
//!
//! let chain = chain_from_json(r#"[{"type": "movingAverage", "length": 3, "padType": "zero"}]"#)
//!     .unwrap();
//! let y = chain.filter(array![[1.], [2.], [3.], [4.], [5.]].view()).unwrap();
//! assert!((y[[2, 0]] - 3.0).abs() < 1e-12);
//! ```

#![deny(unsafe_code)]

/// Numeric text tables and arcs
pub mod io;

/// Constructor validation shared by the filter kinds
pub mod kernel;

/// Digital filtering
pub mod signal;

/// Order statistics
pub mod stats;

pub use dfilt_core::{Complex, Error, Result};
