use dfilt_core::{Error, Result};
use log::trace;
use nalgebra::DMatrix;
use ndarray::linalg::general_mat_mul;
use ndarray::{s, Array2, ArrayView2};

/// Rows processed per block by [arma_filter_blocked].
pub const BLOCK_SIZE: usize = 64;

/// Filter every column of `input` with the causal recursion
///
/// `an[0] y[n] = Σ_k bn[k] x[n-k] - Σ_{k≥1} an[k] y[n-k]`
///
/// starting from rest (all samples before the first row are zero).
///
/// Rows are handled in blocks of [BLOCK_SIZE]: the moving-average part is one banded
/// matrix product per block, the autoregressive part subtracts the feedback of the already
/// solved outputs and then solves the banded lower-triangular system of the block.
///
/// # Errors
/// Either coefficient sequence is empty, or `an[0]` is zero.
///
/// ```
/// use dfilt::signal::filter::arma_filter_blocked;
/// use ndarray::array;
///
/// let x = array![[1.], [1.], [1.], [1.]];
/// let y = arma_filter_blocked(&[1.], &[1., -1.], x.view()).unwrap();
/// assert_eq!(y, array![[1.], [2.], [3.], [4.]]);
/// ```
pub fn arma_filter_blocked(bn: &[f64], an: &[f64], input: ArrayView2<f64>) -> Result<Array2<f64>> {
    if bn.is_empty() {
        return Err(Error::invalid_arg("bn", "must not be empty"));
    }
    if an.is_empty() {
        return Err(Error::invalid_arg("an", "must not be empty"));
    }
    if an[0] == 0.0 {
        return Err(Error::invalid_arg("an", "leading coefficient must be non-zero"));
    }

    let rows = input.nrows();
    let mut output = Array2::<f64>::zeros(input.raw_dim());
    if rows == 0 {
        return Ok(output);
    }
    let block = BLOCK_SIZE.min(rows);
    trace!(
        "blocked ARMA: {rows} rows in {} blocks of {block}",
        rows.div_ceil(block)
    );

    // moving average: B[k + i, k] = bn[i]
    let mut band = Array2::<f64>::zeros((bn.len() + block - 1, block));
    for k in 0..block {
        band.slice_mut(s![k..k + bn.len(), k])
            .iter_mut()
            .zip(bn)
            .for_each(|(b, &c)| *b = c);
    }
    for start in (0..rows).step_by(block) {
        let cols = block.min(rows - start);
        let count = band.nrows().min(rows - start);
        general_mat_mul(
            1.0,
            &band.slice(s![..count, ..cols]),
            &input.slice(s![start..start + cols, ..]),
            1.0,
            &mut output.slice_mut(s![start..start + count, ..]),
        );
    }

    if an.len() == 1 {
        if an[0] != 1.0 {
            output.mapv_inplace(|v| v / an[0]);
        }
        return Ok(output);
    }

    autoregress(an, block, &mut output)?;
    Ok(output)
}

/// Solve the autoregressive part in place, block by block.
fn autoregress(an: &[f64], block: usize, output: &mut Array2<f64>) -> Result<()> {
    let order = an.len() - 1;
    let rows = output.nrows();
    let channels = output.ncols();

    // feedback of the last `order` outputs onto the first rows of a block
    let mut feedback = Array2::<f64>::zeros((order, order));
    for r in 0..order {
        for c in r..order {
            feedback[[r, c]] = an[order + r - c];
        }
    }

    let lower = DMatrix::<f64>::from_fn(block, block, |r, c| {
        if r >= c && r - c <= order {
            an[r - c]
        } else {
            0.0
        }
    });

    for start in (0..rows).step_by(block) {
        let cols = block.min(rows - start);
        if start > 0 {
            let history = start.min(order);
            let affected = order.min(cols);
            let past = output.slice(s![start - history..start, ..]).to_owned();
            general_mat_mul(
                -1.0,
                &feedback.slice(s![..affected, order - history..]),
                &past,
                1.0,
                &mut output.slice_mut(s![start..start + affected, ..]),
            );
        }

        let mut rhs = DMatrix::<f64>::from_fn(cols, channels, |r, c| output[[start + r, c]]);
        if !lower
            .view((0, 0), (cols, cols))
            .solve_lower_triangular_mut(&mut rhs)
        {
            return Err(Error::invalid_arg("an", "singular recursion matrix"));
        }
        for r in 0..cols {
            for c in 0..channels {
                output[[start + r, c]] = rhs[(r, c)];
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Sample-by-sample reference of the recursion.
    fn scalar_recursion(bn: &[f64], an: &[f64], x: &[f64]) -> Vec<f64> {
        let mut y = vec![0.0; x.len()];
        for n in 0..x.len() {
            let mut acc = 0.0;
            for (k, &b) in bn.iter().enumerate() {
                if n >= k {
                    acc += b * x[n - k];
                }
            }
            for (k, &a) in an.iter().enumerate().skip(1) {
                if n >= k {
                    acc -= a * y[n - k];
                }
            }
            y[n] = acc / an[0];
        }
        y
    }

    fn random_matrix(rows: usize, cols: usize, seed: u64) -> Array2<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        Array2::from_shape_fn((rows, cols), |_| rng.random_range(-1.0..1.0))
    }

    #[test]
    fn integrator_accumulates() {
        let x = array![[1.], [1.], [1.], [1.]];
        let y = arma_filter_blocked(&[1.], &[1., -1.], x.view()).unwrap();
        assert_eq!(y, array![[1.], [2.], [3.], [4.]]);
    }

    #[test]
    fn fir_matches_direct_convolution() {
        let x = array![[1.], [2.], [3.], [4.], [3.], [5.], [6.]];
        let y = arma_filter_blocked(&[5., 4., 1., 2.], &[1.], x.view()).unwrap();
        let expected = [5., 14., 24., 36., 38., 47., 61.];
        for (r, e) in y.column(0).iter().zip(expected) {
            assert_relative_eq!(*r, e, max_relative = 1e-12);
        }
    }

    #[test]
    fn blocks_match_scalar_recursion() {
        let bn = [0.3, -0.2, 0.15, 0.05];
        let an = [1.2, -0.5, 0.25, -0.1, 0.02];
        for rows in [1, 5, 63, 64, 65, 200, 257] {
            let x = random_matrix(rows, 3, rows as u64);
            let y = arma_filter_blocked(&bn, &an, x.view()).unwrap();
            for c in 0..3 {
                let expected = scalar_recursion(&bn, &an, &x.column(c).to_vec());
                for (r, e) in y.column(c).iter().zip(&expected) {
                    assert_relative_eq!(*r, *e, epsilon = 1e-12, max_relative = 1e-10);
                }
            }
        }
    }

    #[test]
    fn long_feedback_spans_blocks() {
        // an longer than one block
        let an: Vec<f64> = (0..80).map(|k| if k == 0 { 1.0 } else { 0.5f64.powi(k) * 0.1 }).collect();
        let bn = [1.0, 0.5];
        let x = random_matrix(300, 1, 11);
        let y = arma_filter_blocked(&bn, &an, x.view()).unwrap();
        let expected = scalar_recursion(&bn, &an, &x.column(0).to_vec());
        for (r, e) in y.column(0).iter().zip(&expected) {
            assert_relative_eq!(*r, *e, epsilon = 1e-12, max_relative = 1e-10);
        }
    }

    #[test]
    fn leading_coefficient_scales_fir() {
        let x = array![[2.], [4.]];
        let y = arma_filter_blocked(&[1.], &[2.], x.view()).unwrap();
        assert_eq!(y, array![[1.], [2.]]);
    }

    #[test]
    fn invalid_coefficients_are_rejected() {
        let x = array![[1.]];
        assert!(arma_filter_blocked(&[], &[1.], x.view()).is_err());
        assert!(arma_filter_blocked(&[1.], &[0., 1.], x.view()).is_err());
    }
}
