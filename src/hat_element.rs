extern crate ndarray;

use ndarray::*;
use serde::{Serialize, Deserialize};

use crate::algebra_map::*;
use crate::element::*;
use crate::func_vector_error::*;
use crate::linalg_utils::*;
use crate::param_key::*;
use crate::affine_element::*;

///A triangular bump on `(a, b)`, built from three ramps anchored at `a`, the
///midpoint and `b`, all with slope `4 / (b - a)^2` and weights `(1, -2, 1)`.
///Every operation on a hat is the corresponding combination of ramp operations.
///
///The 3x3 ramp sums cancel heavily as the hat narrows, so unit norm degrades
///for widths below about 1e-5 (a width of 1e-7 gives a self-dot near 1.004).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HatElement;

///`(anchor, slope, weight)` of the three ramps making up the hat on `(a, b)`
fn constituents(a : f64, b : f64) -> [(f64, f64, f64); 3] {
    let slope = 4.0 / ((b - a) * (b - a));
    [(a, slope, 1.0), (0.5 * (a + b), slope, -2.0), (b, slope, 1.0)]
}

///Sum of the 3x3 raw ramp inner products, i.e. the squared norm of the unnormalized hat
fn raw_energy(a : f64, b : f64) -> f64 {
    let parts = constituents(a, b);
    let mut energy = 0.0;
    for (p, m, w) in parts.iter() {
        for (q, n, v) in parts.iter() {
            energy += w * v * affine_kernel(*p, *m, *q, *n);
        }
    }
    energy
}

fn hat_normalizer(a : f64, b : f64) -> f64 {
    1.0 / raw_energy(a, b).sqrt()
}

pub fn hat_intervals(params : &ParamMap) -> Result<(Array1<f64>, Array1<f64>)> {
    HatElement.check_params(params)?;
    params.pair_keys()
}

///Rewrites a table of hats as the equivalent table of ramps, with the hat
///normalizer and coefficient folded into the ramp coefficients. A ramp
///anchored at 1 vanishes identically, so it is dropped.
pub fn hats_to_affine(params : &ParamMap) -> Result<ParamMap> {
    let (a, b) = hat_intervals(params)?;
    let c = params.values_array();

    let mut result = ParamMap::new();
    for i in 0..a.len() {
        let scale = c[[i,]] * hat_normalizer(a[[i,]], b[[i,]]);
        for (anchor, slope, weight) in constituents(a[[i,]], b[[i,]]).iter() {
            if (*anchor >= 1.0) {
                continue;
            }
            //Ramp coefficients multiply normalized ramps, so undo their normalizer
            let coefficient = scale * weight / ramp_normalizer(*anchor, *slope);
            result.accumulate(ParamKey::pair(*anchor, *slope), coefficient)?;
        }
    }
    Ok(result)
}

impl H1Element for HatElement {
    fn name(&self) -> &'static str {
        "Hat"
    }

    fn param_shape(&self) -> KeyShape {
        KeyShape::Pair
    }

    fn check_param(&self, key : &ParamKey) -> Result<()> {
        if (!key.is_finite()) {
            return Err(FuncVectorError::domain(self.name(), key, "parameter must be finite"));
        }
        let (a, b) = key.as_pair()?;
        if (a >= b) {
            return Err(FuncVectorError::domain(self.name(), key, "hat interval must satisfy a < b"));
        }
        if (a < 0.0 || b > 1.0) {
            return Err(FuncVectorError::domain(self.name(), key, "hat interval must lie in [0, 1]"));
        }
        Ok(())
    }

    fn normalizer(&self, params : &ParamMap) -> Result<Array1<f64>> {
        let (a, b) = hat_intervals(params)?;
        Ok(Zip::from(&a).and(&b).map_collect(|&a, &b| hat_normalizer(a, b)))
    }

    fn evaluate(&self, params : &ParamMap, x : ArrayView1<f64>) -> Result<Array2<f64>> {
        let (a, b) = hat_intervals(params)?;
        let w = weights(self, params)?;
        let values = Array2::from_shape_fn((x.len(), a.len()), |(i, j)| {
            let mut value = 0.0;
            for (anchor, slope, weight) in constituents(a[[j,]], b[[j,]]).iter() {
                value += weight * slope * ramp_response(*anchor, x[[i,]]);
            }
            value
        });
        Ok(scale_columns(values.view(), w.view()))
    }
}
