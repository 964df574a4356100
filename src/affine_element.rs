extern crate ndarray;

use ndarray::*;
use std::f64::consts::PI;
use serde::{Serialize, Deserialize};

use crate::algebra_map::*;
use crate::element::*;
use crate::func_vector_error::*;
use crate::linalg_utils::*;
use crate::param_key::*;
use crate::sin_element::*;

///A ramp `s (x - a)_+` anchored at `a` with slope `s`, represented by the Riesz
///representer of `f -> 3 s int_a^1 (x - a) f(x) dx`, which is
///`s/2 (x (1 - a)^3 - (x - a)_+^3)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AffineElement;

///Validated `(anchor, slope)` columns of every ramp in `params`
pub fn affine_anchors_and_slopes(params : &ParamMap) -> Result<(Array1<f64>, Array1<f64>)> {
    AffineElement.check_params(params)?;
    params.pair_keys()
}

///The slope-free part of the representer of a ramp anchored at `a`
pub fn ramp_response(a : f64, x : f64) -> f64 {
    let mut result = x * (1.0 - a).powi(3);
    if (x > a) {
        result -= (x - a).powi(3);
    }
    0.5 * result
}

///Raw inner product of ramps `(a, m)` and `(b, n)`. Only valid for `a <= b`;
///see [`affine_kernel`] for the symmetric version.
pub fn ordered_affine_dot(a : f64, m : f64, b : f64, n : f64) -> f64 {
    let quintic = 0.20 * (1.0 - b.powi(5)) - 0.5 * (a + b) * (1.0 - b.powi(4))
                  + (a * a + 4.0 * a * b + b * b) * (1.0 - b.powi(3)) / 3.0
                  - a * b * (a + b) * (1.0 - b * b) + a * a * b * b * (1.0 - b);
    0.25 * m * n * (9.0 * quintic - (1.0 - a).powi(3) * (1.0 - b).powi(3))
}

///Raw inner product of two ramps in either order
pub fn affine_kernel(a : f64, m : f64, b : f64, n : f64) -> f64 {
    if (a <= b) {
        ordered_affine_dot(a, m, b, n)
    } else {
        ordered_affine_dot(b, n, a, m)
    }
}

///Normalizer of a single ramp
pub fn ramp_normalizer(a : f64, s : f64) -> f64 {
    1.0 / ordered_affine_dot(a, s, a, s).sqrt()
}

impl H1Element for AffineElement {
    fn name(&self) -> &'static str {
        "Affine"
    }

    fn param_shape(&self) -> KeyShape {
        KeyShape::Pair
    }

    fn check_param(&self, key : &ParamKey) -> Result<()> {
        if (!key.is_finite()) {
            return Err(FuncVectorError::domain(self.name(), key, "parameter must be finite"));
        }
        let (a, s) = key.as_pair()?;
        if (a < 0.0 || a >= 1.0) {
            return Err(FuncVectorError::domain(self.name(), key, "anchor must lie in [0, 1)"));
        }
        if (s == 0.0) {
            return Err(FuncVectorError::domain(self.name(), key, "slope must be nonzero"));
        }
        Ok(())
    }

    fn normalizer(&self, params : &ParamMap) -> Result<Array1<f64>> {
        let (a, s) = affine_anchors_and_slopes(params)?;
        Ok(Zip::from(&a).and(&s).map_collect(|&a, &s| ramp_normalizer(a, s)))
    }

    fn evaluate(&self, params : &ParamMap, x : ArrayView1<f64>) -> Result<Array2<f64>> {
        let (a, s) = affine_anchors_and_slopes(params)?;
        let w = weights(self, params)?;
        let values = Array2::from_shape_fn((x.len(), a.len()), |(i, j)| s[[j,]] * ramp_response(a[[j,]], x[[i,]]));
        Ok(scale_columns(values.view(), w.view()))
    }
}

pub fn affine_affine_dot(left_params : &ParamMap, right_params : &ParamMap) -> Result<f64> {
    let (a, m) = affine_anchors_and_slopes(left_params)?;
    let (b, n) = affine_anchors_and_slopes(right_params)?;
    let lw = weights(&AffineElement, left_params)?;
    let rw = weights(&AffineElement, right_params)?;

    let kernel = Array2::from_shape_fn((a.len(), b.len()), |(i, j)| {
        affine_kernel(a[[i,]], m[[i,]], b[[j,]], n[[j,]])
    });
    Ok(bilinear(lw.view(), kernel.view(), rw.view()))
}

pub fn sin_affine_dot(sin_params : &ParamMap, affine_params : &ParamMap) -> Result<f64> {
    let lw = weights(&SinElement, sin_params)?;
    let m = sin_params.scalar_keys()?;

    let (a, s) = affine_anchors_and_slopes(affine_params)?;
    let rw = weights(&AffineElement, affine_params)?;

    let kernel = Array2::from_shape_fn((m.len(), a.len()), |(i, j)| {
        let k = m[[i,]] * PI;
        let parity = if (m[[i,]] % 2.0 == 0.0) { 1.0 } else { -1.0 };
        s[[j,]] * 3.0 * ((a[[j,]] - 1.0) * parity - (k * a[[j,]]).sin() / k) / k
    });
    Ok(bilinear(lw.view(), kernel.view(), rw.view()))
}
