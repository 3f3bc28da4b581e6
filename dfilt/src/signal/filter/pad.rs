use core::fmt;
use core::str::FromStr;

use dfilt_core::{Error, Result};
use ndarray::{s, Array2, ArrayView2};
use serde::{Deserialize, Serialize};

/// Boundary extension applied before filtering and removed afterwards.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PadType {
    /// No extension. The filter starts from rest.
    #[default]
    None,
    /// Extend with zeros.
    Zero,
    /// Repeat the first and last row.
    Constant,
    /// Wrap around from the opposite end.
    Periodic,
    /// Mirror around the first and last row, which are not repeated.
    Symmetric,
}

impl PadType {
    /// All policies, in the order they are documented.
    pub const ALL: [PadType; 5] = [
        PadType::None,
        PadType::Zero,
        PadType::Constant,
        PadType::Periodic,
        PadType::Symmetric,
    ];

    /// Configuration name of the policy.
    pub const fn name(&self) -> &'static str {
        match self {
            PadType::None => "none",
            PadType::Zero => "zero",
            PadType::Constant => "constant",
            PadType::Periodic => "periodic",
            PadType::Symmetric => "symmetric",
        }
    }

    /// Extend `input` by `length` rows at each end, plus `time_shift` zero rows at the end.
    ///
    /// The input lands at rows `[length, length + input.nrows())`. For [PadType::None] no
    /// extension takes place: the input stays at the top and only the `time_shift` zero rows are
    /// appended.
    ///
    /// # Errors
    /// * [Error::InvalidPadding] when `input` has no rows and the policy extends it.
    /// * [Error::InsufficientLength] when a periodic extension needs more than `input.nrows()`
    ///   rows, or a symmetric one more than `input.nrows() - 1`.
    pub fn pad(&self, input: ArrayView2<f64>, length: usize, time_shift: usize) -> Result<Array2<f64>> {
        let rows = input.nrows();
        if matches!(self, PadType::None) {
            let mut padded = Array2::<f64>::zeros((rows + time_shift, input.ncols()));
            padded.slice_mut(s![..rows, ..]).assign(&input);
            return Ok(padded);
        }

        if rows < 1 {
            return Err(Error::InvalidPadding {
                reason: format!(
                    "cannot apply {} padding to an empty matrix ({} x {})",
                    self.name(),
                    rows,
                    input.ncols()
                ),
            });
        }

        let mut padded = Array2::<f64>::zeros((2 * length + rows + time_shift, input.ncols()));
        padded.slice_mut(s![length..length + rows, ..]).assign(&input);

        match self {
            PadType::None | PadType::Zero => {}
            PadType::Constant => {
                for k in 0..length {
                    padded.row_mut(k).assign(&input.row(0));
                    padded.row_mut(rows + length + k).assign(&input.row(rows - 1));
                }
            }
            PadType::Periodic => {
                if rows < length {
                    return Err(Error::insufficient_length(length, rows, "periodic padding"));
                }
                padded
                    .slice_mut(s![..length, ..])
                    .assign(&input.slice(s![rows - length.., ..]));
                padded
                    .slice_mut(s![rows + length..rows + 2 * length, ..])
                    .assign(&input.slice(s![..length, ..]));
            }
            PadType::Symmetric => {
                if rows < length + 1 {
                    return Err(Error::insufficient_length(
                        length + 1,
                        rows,
                        "symmetric padding",
                    ));
                }
                for k in 0..length {
                    padded.row_mut(length - 1 - k).assign(&input.row(k + 1));
                    padded.row_mut(rows + length + k).assign(&input.row(rows - 2 - k));
                }
            }
        }
        Ok(padded)
    }

    /// Remove what [PadType::pad] added, skipping `time_shift` further rows at the start.
    ///
    /// Keeps rows `[length + time_shift, nrows - length)`; for [PadType::None] drops the
    /// first `time_shift` rows.
    pub fn trim(&self, input: ArrayView2<f64>, length: usize, time_shift: usize) -> Result<Array2<f64>> {
        let rows = input.nrows();
        let (start, end) = match self {
            PadType::None => (time_shift, rows),
            _ => (length + time_shift, rows.saturating_sub(length)),
        };
        if start > end {
            return Err(Error::insufficient_length(start, rows, "trimming"));
        }
        Ok(input.slice(s![start..end, ..]).to_owned())
    }
}

impl fmt::Display for PadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PadType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PadType::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| Error::InvalidPadding {
                reason: format!("unknown pad type `{s}`"),
            })
    }
}
