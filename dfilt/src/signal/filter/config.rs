//! JSON description of filter chains.
//!
//! A chain is an array of objects tagged by `"type"`:
//!
//! ```
//! use dfilt::signal::filter::chain_from_json;
//!
//! let chain = chain_from_json(
//!     r#"[
//!         {"type": "movingAverage", "length": 3, "padType": "constant"},
//!         {"type": "lag", "lag": -1}
//!     ]"#,
//! )
//! .unwrap();
//! assert_eq!(chain.len(), 2);
//! ```

use core::fmt;
use core::str::FromStr;

use dfilt_core::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::*;
use crate::kernel::KernelLifecycle;
use crate::signal::traits::DigitalFilter;

/// Constructor config for [`ReduceFilterOutput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReduceFilterOutputConfig {
    /// Chain whose output is subtracted from the input.
    #[serde(default)]
    pub filter: Vec<FilterConfig>,
}

/// One configured filter of a chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FilterConfig {
    MovingAverage(MovingAverageConfig),
    MovingMedian(MovingMedianConfig),
    Derivative(DerivativeConfig),
    Integral(IntegralConfig),
    Correlation(CorrelationConfig),
    GraceLowpass(GraceLowpassConfig),
    Butterworth(ButterworthConfig),
    File(FileConfig),
    Wavelet(WaveletConfig),
    Notch(NotchConfig),
    Decorrelation(DecorrelationConfig),
    Lag(LagConfig),
    ReduceFilterOutput(ReduceFilterOutputConfig),
}

/// Selector of a filter kind, as written in the `"type"` field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FilterKind {
    MovingAverage,
    MovingMedian,
    Derivative,
    Integral,
    Correlation,
    GraceLowpass,
    Butterworth,
    File,
    Wavelet,
    Notch,
    Decorrelation,
    Lag,
    ReduceFilterOutput,
}

impl FilterKind {
    /// Every kind a chain description may use.
    pub const ALL: [FilterKind; 13] = [
        FilterKind::MovingAverage,
        FilterKind::MovingMedian,
        FilterKind::Derivative,
        FilterKind::Integral,
        FilterKind::Correlation,
        FilterKind::GraceLowpass,
        FilterKind::Butterworth,
        FilterKind::File,
        FilterKind::Wavelet,
        FilterKind::Notch,
        FilterKind::Decorrelation,
        FilterKind::Lag,
        FilterKind::ReduceFilterOutput,
    ];

    /// Value of the `"type"` field.
    pub const fn name(&self) -> &'static str {
        match self {
            FilterKind::MovingAverage => "movingAverage",
            FilterKind::MovingMedian => "movingMedian",
            FilterKind::Derivative => "derivative",
            FilterKind::Integral => "integral",
            FilterKind::Correlation => "correlation",
            FilterKind::GraceLowpass => "graceLowpass",
            FilterKind::Butterworth => "butterworth",
            FilterKind::File => "file",
            FilterKind::Wavelet => "wavelet",
            FilterKind::Notch => "notch",
            FilterKind::Decorrelation => "decorrelation",
            FilterKind::Lag => "lag",
            FilterKind::ReduceFilterOutput => "reduceFilterOutput",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::Configuration {
                reason: format!("unknown filter type `{s}`"),
            })
    }
}

impl FilterConfig {
    /// Kind of the configured filter.
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterConfig::MovingAverage(_) => FilterKind::MovingAverage,
            FilterConfig::MovingMedian(_) => FilterKind::MovingMedian,
            FilterConfig::Derivative(_) => FilterKind::Derivative,
            FilterConfig::Integral(_) => FilterKind::Integral,
            FilterConfig::Correlation(_) => FilterKind::Correlation,
            FilterConfig::GraceLowpass(_) => FilterKind::GraceLowpass,
            FilterConfig::Butterworth(_) => FilterKind::Butterworth,
            FilterConfig::File(_) => FilterKind::File,
            FilterConfig::Wavelet(_) => FilterKind::Wavelet,
            FilterConfig::Notch(_) => FilterKind::Notch,
            FilterConfig::Decorrelation(_) => FilterKind::Decorrelation,
            FilterConfig::Lag(_) => FilterKind::Lag,
            FilterConfig::ReduceFilterOutput(_) => FilterKind::ReduceFilterOutput,
        }
    }

    /// Construct the configured filter, reading coefficient files where the kind names one.
    pub fn build(&self) -> Result<Box<dyn DigitalFilter>> {
        debug!("building {} filter", self.kind());
        let filter: Box<dyn DigitalFilter> = match self {
            FilterConfig::MovingAverage(c) => Box::new(MovingAverage::try_new(c.clone())?),
            FilterConfig::MovingMedian(c) => Box::new(MovingMedian::try_new(c.clone())?),
            FilterConfig::Derivative(c) => Box::new(Derivative::try_new(c.clone())?),
            FilterConfig::Integral(c) => Box::new(Integral::try_new(c.clone())?),
            FilterConfig::Correlation(c) => Box::new(Correlation::try_new(c.clone())?),
            FilterConfig::GraceLowpass(c) => Box::new(GraceLowpass::try_new(c.clone())?),
            FilterConfig::Butterworth(c) => Box::new(Butterworth::try_new(c.clone())?),
            FilterConfig::File(c) => Box::new(FileFilter::try_new(c.read()?)?),
            FilterConfig::Wavelet(c) => Box::new(Wavelet::try_new(c.clone().resolve()?)?),
            FilterConfig::Notch(c) => Box::new(Notch::try_new(c.clone())?),
            FilterConfig::Decorrelation(c) => {
                Box::new(Decorrelation::try_new(c.clone().resolve()?)?)
            }
            FilterConfig::Lag(c) => Box::new(Lag::try_new(c.clone())?),
            FilterConfig::ReduceFilterOutput(c) => {
                Box::new(ReduceFilterOutput::try_new(build_chain(&c.filter)?)?)
            }
        };
        Ok(filter)
    }
}

/// Build the filters of `configs` into a chain, in order.
pub fn build_chain(configs: &[FilterConfig]) -> Result<DigitalFilterChain> {
    configs.iter().map(FilterConfig::build).collect()
}

fn check_kinds(value: &Value) -> Result<()> {
    match value {
        Value::Array(items) => items.iter().try_for_each(check_kinds),
        Value::Object(fields) => {
            let kind = fields
                .get("type")
                .and_then(Value::as_str)
                .ok_or_else(|| Error::Configuration {
                    reason: "filter entry without a `type` string".into(),
                })?
                .parse::<FilterKind>()?;
            match (kind, fields.get("filter")) {
                (FilterKind::ReduceFilterOutput, Some(inner)) => check_kinds(inner),
                _ => Ok(()),
            }
        }
        other => Err(Error::Configuration {
            reason: format!("expected a filter object or an array of them, got `{other}`"),
        }),
    }
}

/// Parse a chain description: a JSON array of filter objects, or a single object.
///
/// # Errors
/// [Error::Configuration] for malformed JSON, unknown `"type"` values and parameters that do
/// not fit their kind.
pub fn parse_configs(text: &str) -> Result<Vec<FilterConfig>> {
    let configuration = |e: serde_json::Error| Error::Configuration {
        reason: e.to_string(),
    };
    let value: Value = serde_json::from_str(text).map_err(configuration)?;
    check_kinds(&value)?;
    let value = match value {
        Value::Object(_) => Value::Array(vec![value]),
        array => array,
    };
    serde_json::from_value(value).map_err(configuration)
}

/// Parse and build a chain description in one step.
pub fn chain_from_json(text: &str) -> Result<DigitalFilterChain> {
    let configs = parse_configs(text)?;
    debug!(
        "chain of {} filters: {}",
        configs.len(),
        configs
            .iter()
            .map(|c| c.kind().name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    build_chain(&configs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::filter::design::FilterBandType;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2};

    #[test]
    fn parses_every_kind() {
        let configs = parse_configs(
            r#"[
                {"type": "movingAverage", "length": 5},
                {"type": "movingMedian", "length": 3, "padType": "symmetric"},
                {"type": "derivative", "polynomialDegree": 2, "sampling": 5},
                {"type": "integral", "polynomialDegree": 1},
                {"type": "correlation", "correlation": 0.3},
                {"type": "graceLowpass"},
                {"type": "butterworth", "order": 3, "filterType": "highpass", "cutoff": 0.1},
                {"type": "file", "inputfile": "taps.txt", "backward": true},
                {"type": "wavelet", "coefficients": [1, 1], "level": 2},
                {"type": "notch", "frequency": 0.2, "bandwidth": 0.01},
                {"type": "decorrelation", "covariance": [2, 1]},
                {"type": "lag", "lag": -3, "inFrequencyDomain": true},
                {"type": "reduceFilterOutput", "filter": [{"type": "lag", "lag": 1}]}
            ]"#,
        )
        .unwrap();
        let kinds: Vec<FilterKind> = configs.iter().map(FilterConfig::kind).collect();
        assert_eq!(kinds, FilterKind::ALL);

        match &configs[6] {
            FilterConfig::Butterworth(c) => {
                assert_eq!(c.filter_type, FilterBandType::Highpass);
                assert_eq!(c.cutoff, Cutoff::Single(0.1));
            }
            other => panic!("unexpected {other:?}"),
        }
        match &configs[11] {
            FilterConfig::Lag(c) => {
                assert_eq!(c.lag, -3);
                assert!(c.options.in_frequency_domain);
                assert_eq!(c.options.pad_type, PadType::None);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn single_object_is_a_chain_of_one() {
        let chain = chain_from_json(r#"{"type": "lag", "lag": 1}"#).unwrap();
        assert_eq!(chain.len(), 1);
        let x = array![[1.], [2.], [3.]];
        assert_eq!(chain.filter(x.view()).unwrap(), array![[0.], [1.], [2.]]);
    }

    #[test]
    fn unknown_kinds_are_configuration_errors() {
        for text in [
            r#"[{"type": "kalman"}]"#,
            r#"[{"type": "reduceFilterOutput", "filter": [{"type": "kalman"}]}]"#,
            r#"[{"length": 3}]"#,
            r#"[3]"#,
            r#"[{"type": "movingAverage"}]"#,
            r#"[{"type": "lag", "lag": 1,"#,
        ] {
            assert!(
                matches!(parse_configs(text), Err(Error::Configuration { .. })),
                "{text}"
            );
        }
        assert!(matches!(
            "kalman".parse::<FilterKind>(),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn invalid_parameters_fail_at_build() {
        let err = chain_from_json(r#"[{"type": "movingAverage", "length": 0}]"#).unwrap_err();
        assert!(matches!(err, Error::InvalidArg { .. }));
        let err =
            chain_from_json(r#"[{"type": "file", "inputfile": "/nonexistent/taps.txt"}]"#)
                .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn nested_residual_chain() {
        let chain = chain_from_json(
            r#"[{"type": "reduceFilterOutput", "filter": [
                {"type": "movingAverage", "length": 3, "padType": "constant"}
            ]}]"#,
        )
        .unwrap();
        let x = Array2::from_elem((10, 2), 4.0);
        for v in chain.filter(x.view()).unwrap().iter() {
            assert_abs_diff_eq!(*v, 0.0, epsilon = 1e-12);
        }
        let h = chain.frequency_response(10).unwrap();
        assert_abs_diff_eq!(h[0].norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn kind_names_round_trip() {
        for kind in FilterKind::ALL {
            assert_eq!(kind.name().parse::<FilterKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.name());
        }
    }
}
