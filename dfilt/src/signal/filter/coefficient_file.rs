use std::path::{Path, PathBuf};

use dfilt_core::{Error, Result};
use serde::{Deserialize, Serialize};

use super::{delegate_to_arma, ArmaConfig, ArmaFilter, ArmaOptions, MAX_TAPS};
use crate::io::{parse_table, read_table};
use crate::kernel::{ConfigError, KernelLifecycle};

/// Configuration of a filter read from a coefficient file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    /// Text file with rows `index bn an`.
    #[serde(rename = "inputfile")]
    pub input_file: PathBuf,
    /// Direction, domain and padding.
    #[serde(flatten)]
    pub options: ArmaOptions,
}

impl FileConfig {
    /// Read the coefficient table named by `inputfile`.
    pub fn read(&self) -> Result<FileCoefficients> {
        let rows = read_table(&self.input_file)?;
        FileCoefficients::from_rows(rows, self.options).map_err(|e| Error::Io {
            path: self.input_file.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Coefficient taps `(index, bn, an)` as listed in a coefficient file.
///
/// Negative indices are taps on future epochs. They may carry `bn` only.
#[derive(Debug, Clone, PartialEq)]
pub struct FileCoefficients {
    /// `(index, bn, an)` rows.
    pub taps: Vec<(i64, f64, f64)>,
    /// Direction, domain and padding.
    pub options: ArmaOptions,
}

impl FileCoefficients {
    /// Parse the text of a coefficient file.
    pub fn parse(text: &str, options: ArmaOptions) -> Result<Self> {
        Self::from_rows(parse_table(text)?, options)
    }

    /// Read a coefficient file.
    pub fn read(path: &Path, options: ArmaOptions) -> Result<Self> {
        FileConfig {
            input_file: path.to_path_buf(),
            options,
        }
        .read()
    }

    fn from_rows(rows: Vec<Vec<f64>>, options: ArmaOptions) -> Result<Self> {
        let taps = rows
            .into_iter()
            .enumerate()
            .map(|(n, row)| match row[..] {
                [index, bn, an] if index.fract() == 0.0 && index.abs() < 1e15 => {
                    Ok((index as i64, bn, an))
                }
                [index, _, _] => Err(Error::invalid_arg(
                    format!("row {}", n + 1),
                    format!("index {index} is not an integer"),
                )),
                _ => Err(Error::invalid_arg(
                    format!("row {}", n + 1),
                    format!("expected `index bn an`, got {} columns", row.len()),
                )),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { taps, options })
    }
}

/// ARMA filter with coefficients read from a file.
#[derive(Debug, Clone)]
pub struct FileFilter {
    arma: ArmaFilter,
}

impl KernelLifecycle for FileFilter {
    type Config = FileCoefficients;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        let lowest = config
            .taps
            .iter()
            .map(|t| t.0)
            .min()
            .ok_or(ConfigError::EmptyInput { arg: "inputfile" })?
            .min(0);
        let highest = config.taps.iter().map(|t| t.0).max().unwrap_or(0).max(0);
        let span = highest
            .checked_sub(lowest)
            .and_then(|span| usize::try_from(span).ok())
            .filter(|&span| span < MAX_TAPS)
            .ok_or(ConfigError::InvalidArgument {
                arg: "inputfile",
                reason: "tap indices span too far",
            })?;

        let start = lowest.unsigned_abs() as usize;
        let mut bn = vec![0.0; span + 1];
        let mut an = vec![0.0; highest as usize + 1];
        let mut seen = vec![false; span + 1];
        for &(index, b, a) in &config.taps {
            let slot = (index - lowest) as usize;
            if std::mem::replace(&mut seen[slot], true) {
                return Err(ConfigError::InvalidArgument {
                    arg: "inputfile",
                    reason: "tap index listed twice",
                });
            }
            bn[slot] = b;
            if index >= 0 {
                an[index as usize] = a;
            } else if a != 0.0 {
                return Err(ConfigError::InvalidArgument {
                    arg: "an",
                    reason: "autoregressive taps must not act on future epochs",
                });
            }
        }

        let arma = ArmaFilter::try_new(ArmaConfig {
            bn,
            an,
            bn_start_index: start,
            options: config.options,
        })?;
        Ok(Self { arma })
    }
}

delegate_to_arma!(FileFilter);
