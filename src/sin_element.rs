extern crate ndarray;

use ndarray::*;
use std::f64::consts::{PI, SQRT_2};
use serde::{Serialize, Deserialize};

use crate::algebra_map::*;
use crate::element::*;
use crate::func_vector_error::*;
use crate::linalg_utils::*;
use crate::param_key::*;
use crate::avg_element::*;

///`sin(m pi x)` for positive integer frequencies `m`. Distinct frequencies are
///orthogonal, so after normalization the family is orthonormal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SinElement;

impl SinElement {
    fn frequencies(&self, params : &ParamMap) -> Result<Array1<f64>> {
        self.check_params(params)?;
        params.scalar_keys()
    }
}

impl H1Element for SinElement {
    fn name(&self) -> &'static str {
        "Sin"
    }

    fn param_shape(&self) -> KeyShape {
        KeyShape::Scalar
    }

    fn check_param(&self, key : &ParamKey) -> Result<()> {
        if (!key.is_finite()) {
            return Err(FuncVectorError::domain(self.name(), key, "parameter must be finite"));
        }
        let m = key.as_scalar()?;
        if (m < 1.0 || m.fract() != 0.0) {
            return Err(FuncVectorError::domain(self.name(), key, "frequency must be a positive integer"));
        }
        Ok(())
    }

    fn normalizer(&self, params : &ParamMap) -> Result<Array1<f64>> {
        let m = self.frequencies(params)?;
        Ok(m.mapv(|m| SQRT_2 / (PI * m)))
    }

    fn evaluate(&self, params : &ParamMap, x : ArrayView1<f64>) -> Result<Array2<f64>> {
        let m = self.frequencies(params)?;
        let w = weights(self, params)?;
        let values = outer_with(x, m.view(), |x, m| (PI * m * x).sin());
        Ok(scale_columns(values.view(), w.view()))
    }
}

///Normalized sines are orthonormal: only matching frequencies contribute
pub fn sin_sin_dot(left_params : &ParamMap, right_params : &ParamMap) -> Result<f64> {
    let lm = SinElement.frequencies(left_params)?;
    let rm = SinElement.frequencies(right_params)?;
    let lc = left_params.values_array();
    let rc = right_params.values_array();

    let same_frequency = outer_with(lm.view(), rm.view(), |m, n| if (m == n) { 1.0 } else { 0.0 });
    Ok(bilinear(lc.view(), same_frequency.view(), rc.view()))
}

///The local average of each sine over each interval
pub fn sin_avg_dot(sin_params : &ParamMap, avg_params : &ParamMap) -> Result<f64> {
    let m = SinElement.frequencies(sin_params)?;
    let lw = weights(&SinElement, sin_params)?;

    let (a, b) = avg_intervals(avg_params)?;
    let rw = weights(&AvgElement, avg_params)?;

    let kernel = Array2::from_shape_fn((m.len(), a.len()), |(i, j)| {
        let k = PI * m[[i,]];
        ((k * a[[j,]]).cos() - (k * b[[j,]]).cos()) / (k * (b[[j,]] - a[[j,]]))
    });
    Ok(bilinear(lw.view(), kernel.view(), rw.view()))
}
