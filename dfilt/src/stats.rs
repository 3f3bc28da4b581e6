//! Order statistics used by the nonlinear filters.

// Quick select finds the `k`th smallest element with 2N comparisons
fn quickselect(y: &[f64], k: usize) -> f64 {
    let n = y.len();
    if n == 1 {
        return y[0];
    }

    let pivot = y[n / 2];
    let lower = y.iter().copied().filter(|&v| v < pivot).collect::<Vec<_>>();
    let lowers = lower.len();
    let upper = y.iter().copied().filter(|&v| v > pivot).collect::<Vec<_>>();
    let uppers = upper.len();
    let pivots = n - lowers - uppers;

    if k < lowers {
        quickselect(&lower, k)
    } else if k < lowers + pivots || uppers == 0 {
        pivot
    } else {
        quickselect(&upper, k - lowers - pivots)
    }
}

///
/// Compute the median of the window `y`
///
/// Return the median and the number of points in the window. An even window yields the mean
/// of its two middle values, an empty window `(0, 0)`.
///
/// ```
/// use approx::assert_relative_eq;
/// use dfilt::stats::median;
///
/// let y = [1., 2., 3., 4., 5.];
/// assert_relative_eq!(3f64, median(&y).0);
///
/// let y = [1., 2., 3., 4.];
/// assert_relative_eq!(2.5f64, median(&y).0);
///
/// let y = [3., 1., 4., 2., 3., 5.];
/// assert_relative_eq!(3f64, median(&y).0);
///
/// assert_eq!((0f64, 0), median(&[]));
/// ```
///
pub fn median(y: &[f64]) -> (f64, usize) {
    let n = y.len();
    if n == 0 {
        (0.0, 0)
    } else if n % 2 == 1 {
        (quickselect(y, n / 2), n)
    } else {
        (
            0.5 * (quickselect(y, n / 2 - 1) + quickselect(y, n / 2)),
            n,
        )
    }
}
