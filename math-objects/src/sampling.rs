//! Evenly spaced sequences and grid expansion on top of `nalgebra` storage.

use nalgebra::{DMatrix, DVector};

/// Returns `num` evenly spaced values over `[start, stop]`, both ends included.
///
/// The last value is set to `stop` exactly instead of being accumulated from the step, so the
/// endpoint does not drift. With `num == 1` the result is `[start]`.
pub fn linspace(start: f64, stop: f64, num: usize) -> DVector<f64> {
    if num < 2 {
        return DVector::from_element(num, start);
    }

    let step = (stop - start) / (num - 1) as f64;
    DVector::from_fn(num, |i, _| {
        if i == num - 1 {
            stop
        } else {
            start + i as f64 * step
        }
    })
}

/// Returns `cells` values splitting `[start, start + extent)` into cells of equal size.
///
/// Generated as `cells + 1` inclusive points with the last one dropped, so the spacing is
/// consistent with dividing the whole extent evenly.
pub fn cell_starts(start: f64, extent: f64, cells: usize) -> DVector<f64> {
    linspace(start, start + extent, cells + 1)
        .rows(0, cells)
        .into_owned()
}

/// Expands two axis sequences into coordinate matrices.
///
/// Both matrices have `y.len()` rows and `x.len()` columns. `xv[(j, i)] == x[i]` and
/// `yv[(j, i)] == y[j]`.
pub fn meshgrid(x: &DVector<f64>, y: &DVector<f64>) -> (DMatrix<f64>, DMatrix<f64>) {
    let xv = DMatrix::from_fn(y.len(), x.len(), |_, i| x[i]);
    let yv = DMatrix::from_fn(y.len(), x.len(), |j, _| y[j]);
    (xv, yv)
}
