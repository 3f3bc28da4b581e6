use dfilt_core::{Complex, Result};
use log::debug;
use ndarray::{Array2, ArrayView2};

use crate::signal::spectral::unit_response;
use crate::signal::traits::DigitalFilter;

/// Ordered sequence of filters applied one after another.
///
/// The chain owns its members. An empty chain is the identity.
#[derive(Debug, Default)]
pub struct DigitalFilterChain {
    filters: Vec<Box<dyn DigitalFilter>>,
}

impl DigitalFilterChain {
    /// Chain of `filters`, applied in order.
    pub fn new(filters: Vec<Box<dyn DigitalFilter>>) -> Self {
        Self { filters }
    }

    /// Append `filter` to the end of the chain.
    pub fn push(&mut self, filter: Box<dyn DigitalFilter>) {
        self.filters.push(filter);
    }

    /// Number of member filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// True for the identity chain.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Member filters in application order.
    pub fn filters(&self) -> &[Box<dyn DigitalFilter>] {
        &self.filters
    }
}

impl DigitalFilter for DigitalFilterChain {
    fn filter(&self, input: ArrayView2<f64>) -> Result<Array2<f64>> {
        let mut output = input.to_owned();
        for (stage, filter) in self.filters.iter().enumerate() {
            debug!("filter chain stage {}/{}: {:?}", stage + 1, self.filters.len(), filter);
            output = filter.filter(output.view())?;
        }
        Ok(output)
    }

    fn frequency_response(&self, length: usize) -> Result<Vec<Complex<f64>>> {
        let mut response = unit_response(length);
        for filter in &self.filters {
            let h = filter.frequency_response(length)?;
            response.iter_mut().zip(h).for_each(|(r, h)| *r *= h);
        }
        Ok(response)
    }
}

impl FromIterator<Box<dyn DigitalFilter>> for DigitalFilterChain {
    fn from_iter<I: IntoIterator<Item = Box<dyn DigitalFilter>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::KernelLifecycle;
    use crate::signal::filter::{ArmaConfig, ArmaFilter, ArmaOptions, PadType};
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn boxed(bn: &[f64], an: &[f64], s: usize) -> Box<dyn DigitalFilter> {
        Box::new(
            ArmaFilter::try_new(ArmaConfig {
                bn: bn.to_vec(),
                an: an.to_vec(),
                bn_start_index: s,
                options: ArmaOptions {
                    pad_type: PadType::Zero,
                    ..Default::default()
                },
            })
            .unwrap(),
        )
    }

    #[test]
    fn empty_chain_is_identity() {
        let chain = DigitalFilterChain::default();
        let x = array![[1., 2.], [3., 4.], [5., 6.]];
        assert_eq!(chain.filter(x.view()).unwrap(), x);
        let h = chain.frequency_response(10).unwrap();
        assert_eq!(h.len(), 6);
        assert!(h.iter().all(|v| *v == Complex::new(1.0, 0.0)));
    }

    #[test]
    fn response_is_product_of_members() {
        let chain = DigitalFilterChain::new(vec![
            boxed(&[0.5, 0.5], &[1.0], 0),
            boxed(&[1.0], &[1.0, -0.3], 0),
            boxed(&[0.25, 0.5, 0.25], &[1.0], 1),
        ]);
        for length in [16, 17] {
            let h = chain.frequency_response(length).unwrap();
            let mut expected = unit_response(length);
            for f in chain.filters() {
                for (e, v) in expected.iter_mut().zip(f.frequency_response(length).unwrap()) {
                    *e *= v;
                }
            }
            for (a, b) in h.iter().zip(&expected) {
                assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-14);
                assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn members_apply_in_order() {
        let first = boxed(&[1.0, 1.0], &[1.0], 0);
        let second = boxed(&[2.0], &[1.0], 0);
        let x = array![[1.], [2.], [3.], [4.]];
        let expected = second
            .filter(first.filter(x.view()).unwrap().view())
            .unwrap();

        let chain: DigitalFilterChain = vec![first, second].into_iter().collect();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.filter(x.view()).unwrap(), expected);
    }

    #[test]
    fn chains_nest() {
        let mut inner = DigitalFilterChain::default();
        inner.push(boxed(&[3.0], &[1.0], 0));
        let inner: Box<dyn DigitalFilter> = Box::new(inner);
        let outer = DigitalFilterChain::new(vec![inner, boxed(&[0.5], &[1.0], 0)]);
        let x = array![[2.], [4.], [6.]];
        assert_eq!(outer.filter(x.view()).unwrap(), array![[3.], [6.], [9.]]);
    }

    #[test]
    fn member_errors_propagate() {
        let chain = DigitalFilterChain::new(vec![boxed(&[1.0], &[1.0, -0.5, 0.1], 0)]);
        let x = Array2::<f64>::zeros((3, 1));
        assert!(chain.filter(x.view()).is_err());
        assert!(chain.frequency_response(2).is_err());
    }
}
