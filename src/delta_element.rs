extern crate ndarray;

use ndarray::*;
use serde::{Serialize, Deserialize};

use crate::algebra_map::*;
use crate::element::*;
use crate::func_vector_error::*;
use crate::linalg_utils::*;
use crate::param_key::*;

///Point evaluation at `x0`, represented by its Riesz representer, the Green's
///function `x (1 - x0)` left of `x0` and `(1 - x) x0` right of it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeltaElement;

impl DeltaElement {
    fn locations(&self, params : &ParamMap) -> Result<Array1<f64>> {
        self.check_params(params)?;
        params.scalar_keys()
    }
}

fn green(x : f64, x0 : f64) -> f64 {
    if (x < x0) {
        x * (1.0 - x0)
    } else {
        (1.0 - x) * x0
    }
}

impl H1Element for DeltaElement {
    fn name(&self) -> &'static str {
        "Delta"
    }

    fn param_shape(&self) -> KeyShape {
        KeyShape::Scalar
    }

    fn check_param(&self, key : &ParamKey) -> Result<()> {
        if (!key.is_finite()) {
            return Err(FuncVectorError::domain(self.name(), key, "parameter must be finite"));
        }
        let x0 = key.as_scalar()?;
        if (x0 <= 0.0 || x0 >= 1.0) {
            return Err(FuncVectorError::domain(self.name(), key, "location must lie strictly inside (0, 1)"));
        }
        Ok(())
    }

    fn normalizer(&self, params : &ParamMap) -> Result<Array1<f64>> {
        let x0 = self.locations(params)?;
        Ok(x0.mapv(|p| 1.0 / ((1.0 - p) * p).sqrt()))
    }

    fn evaluate(&self, params : &ParamMap, x : ArrayView1<f64>) -> Result<Array2<f64>> {
        let x0 = self.locations(params)?;
        let w = weights(self, params)?;
        let values = outer_with(x, x0.view(), green);
        Ok(scale_columns(values.view(), w.view()))
    }
}

///Every inner product against a delta is a point evaluation: `<f, delta_x0> = f(x0)`,
///scaled by the delta's own coefficient and normalizer.
pub fn delta_dot(delta_params : &ParamMap, other : &Element, other_params : &ParamMap) -> Result<f64> {
    let x0 = DeltaElement.locations(delta_params)?;
    let w = weights(&DeltaElement, delta_params)?;

    let values = other.evaluate(other_params, x0.view())?;
    Ok(w.dot(&values.sum_axis(Axis(1))))
}
