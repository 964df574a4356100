extern crate ndarray;

use ndarray::*;

///Builds the `a.len() x b.len()` matrix whose `(i, j)` entry is `f(a[i], b[j])`.
///The pairwise analogue of `np.outer` for arbitrary kernels.
pub fn outer_with<F>(a : ArrayView1<f64>, b : ArrayView1<f64>, f : F) -> Array2<f64>
    where F : Fn(f64, f64) -> f64 {
    Array2::from_shape_fn((a.len(), b.len()), |(i, j)| f(a[[i,]], b[[j,]]))
}

///Computes the bilinear form `l^T K r`
pub fn bilinear(left : ArrayView1<f64>, kernel : ArrayView2<f64>, right : ArrayView1<f64>) -> f64 {
    left.dot(&kernel.dot(&right))
}

///Scales the columns of `a` by the respective factors in `b`
pub fn scale_columns(a : ArrayView2<f64>, b : ArrayView1<f64>) -> Array2<f64> {
    let mut result = a.to_owned();
    for (mut column, scale) in result.columns_mut().into_iter().zip(b.iter()) {
        column *= *scale;
    }
    result
}
