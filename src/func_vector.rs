extern crate ndarray;

use ndarray::*;
use std::convert::TryFrom;
use std::fmt;
use std::ops;
use serde::{Serialize, Deserialize};

use crate::algebra_map::*;
use crate::element::*;
use crate::func_vector_error::*;
use crate::param_key::*;

///A vector in H1 of the unit interval, held exactly as a sum of element families,
///each with its own table of parameters and coefficients. For instance
///
///```text
///v1 = 1.4 sin(pi x) + 3.0 sin(2 pi x) + 1.0 sin(5 pi x)
///v2 = 0.1 sin(pi x) + 1.0 sin(5 pi x)
///v1 + v2 = 1.5 sin(pi x) + 3.0 sin(2 pi x) + 2.0 sin(5 pi x)
///```
///
///Every family table is validated on the way in, deserialization included,
///so arithmetic between function vectors cannot fail.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AlgebraMap<Element, ParamMap>", into = "AlgebraMap<Element, ParamMap>")]
pub struct FuncVector {
    elements : AlgebraMap<Element, ParamMap>
}

impl FuncVector {
    pub fn new() -> FuncVector {
        FuncVector::default()
    }

    ///Wraps a prebuilt family -> (parameter -> coefficient) structure
    pub fn from_elements(elements : AlgebraMap<Element, ParamMap>) -> Result<FuncVector> {
        for (element, params) in elements.iter() {
            element.check_params(params)?;
        }
        debug!("Built function vector over {} element families", elements.len());
        Ok(FuncVector {
            elements
        })
    }

    ///Builds a vector from aligned lists: `params[i]` and `coeffs[i]` are the
    ///parameters and coefficients of family `funcs[i]`. Repeated (family, parameter)
    ///pairs accumulate. Lengths are checked before anything is accumulated.
    pub fn from_aligned(funcs : &[Element], params : &[Vec<ParamKey>], coeffs : &[Vec<f64>]) -> Result<FuncVector> {
        if (funcs.len() != params.len()) {
            return Err(FuncVectorError::Construction { expected : funcs.len(), found : params.len() });
        }
        if (funcs.len() != coeffs.len()) {
            return Err(FuncVectorError::Construction { expected : funcs.len(), found : coeffs.len() });
        }
        for (param, coeff) in params.iter().zip(coeffs.iter()) {
            if (param.len() != coeff.len()) {
                return Err(FuncVectorError::Construction { expected : param.len(), found : coeff.len() });
            }
        }

        let mut result = FuncVector::new();
        for ((func, param), coeff) in funcs.iter().zip(params.iter()).zip(coeffs.iter()) {
            for (p, c) in param.iter().zip(coeff.iter()) {
                result.add_term(*func, *p, *c)?;
            }
        }
        debug!("Built function vector over {} element families from aligned lists", result.elements.len());
        Ok(result)
    }

    ///Like [`FuncVector::from_aligned`], naming each family by string
    pub fn from_names<S : AsRef<str>>(names : &[S], params : &[Vec<ParamKey>], coeffs : &[Vec<f64>]) -> Result<FuncVector> {
        let funcs = names.iter()
                         .map(|name| name.as_ref().parse::<Element>())
                         .collect::<Result<Vec<Element>>>()?;
        FuncVector::from_aligned(&funcs, params, coeffs)
    }

    ///A vector with a single term
    pub fn single<K : Into<ParamKey>>(element : Element, key : K, coeff : f64) -> Result<FuncVector> {
        let mut result = FuncVector::new();
        result.add_term(element, key, coeff)?;
        Ok(result)
    }

    ///Adds `coeff` to the coefficient of `key` under `element`
    pub fn add_term<K : Into<ParamKey>>(&mut self, element : Element, key : K, coeff : f64) -> Result<()> {
        let key = key.into();
        element.check_param(&key)?;
        let term = AlgebraMap::from_pairs(vec![(key, coeff)])?;
        self.elements.accumulate(element, term)
    }

    pub fn elements(&self) -> &AlgebraMap<Element, ParamMap> {
        &self.elements
    }

    pub fn params(&self, element : &Element) -> Option<&ParamMap> {
        self.elements.get(element)
    }

    ///The coefficient of `key` under `element`, zero if absent
    pub fn coefficient<K : Into<ParamKey>>(&self, element : &Element, key : K) -> f64 {
        let key = key.into();
        self.params(element).map_or(0.0, |params| params.coefficient(&key))
    }

    ///Exact inner product, summed over every pair of families present in the two vectors
    pub fn dot(&self, other : &FuncVector) -> Result<f64> {
        let mut dot = 0.0;
        for (left, left_params) in self.elements.iter() {
            for (right, right_params) in other.elements.iter() {
                dot += left.dot(right, left_params, right_params)?;
            }
        }
        Ok(dot)
    }

    pub fn norm(&self) -> Result<f64> {
        let sq_norm = self.dot(self)?;
        //Clamp round-off only; a NaN must stay visible
        let sq_norm = if (sq_norm < 0.0) { 0.0 } else { sq_norm };
        Ok(sq_norm.sqrt())
    }

    ///The value of this vector at each of the points `x`
    pub fn evaluate(&self, x : ArrayView1<f64>) -> Result<Array1<f64>> {
        if x.iter().any(|p| *p < 0.0 || *p > 1.0) {
            warn!("Evaluating a function vector outside the unit interval");
        }
        let mut result = Array::zeros((x.len(),));
        for (element, params) in self.elements.iter() {
            let values = element.evaluate(params, x)?;
            result += &values.sum_axis(Axis(1));
        }
        Ok(result)
    }

    pub fn pos(&self) -> FuncVector {
        self.clone()
    }
}

impl TryFrom<AlgebraMap<Element, ParamMap>> for FuncVector {
    type Error = FuncVectorError;

    fn try_from(elements : AlgebraMap<Element, ParamMap>) -> Result<FuncVector> {
        FuncVector::from_elements(elements)
    }
}

impl From<FuncVector> for AlgebraMap<Element, ParamMap> {
    fn from(vector : FuncVector) -> AlgebraMap<Element, ParamMap> {
        vector.elements
    }
}

impl fmt::Display for FuncVector {
    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FuncVector: {{")?;
        for (i, (element, params)) in self.elements.iter().enumerate() {
            if (i > 0) {
                write!(f, ", ")?;
            }
            write!(f, "{}: {{", element)?;
            for (j, (key, coeff)) in params.iter().enumerate() {
                if (j > 0) {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", key, coeff)?;
            }
            write!(f, "}}")?;
        }
        write!(f, "}}")
    }
}

impl ops::AddAssign<&FuncVector> for FuncVector {
    fn add_assign(&mut self, other : &FuncVector) {
        self.elements.merge_scaled(&other.elements, 1.0);
    }
}

impl ops::SubAssign<&FuncVector> for FuncVector {
    fn sub_assign(&mut self, other : &FuncVector) {
        self.elements.merge_scaled(&other.elements, -1.0);
    }
}

impl ops::MulAssign<f64> for FuncVector {
    fn mul_assign(&mut self, factor : f64) {
        self.elements *= factor;
    }
}

impl ops::DivAssign<f64> for FuncVector {
    fn div_assign(&mut self, divisor : f64) {
        self.elements /= divisor;
    }
}

impl ops::Add<&FuncVector> for &FuncVector {
    type Output = FuncVector;

    fn add(self, other : &FuncVector) -> FuncVector {
        let mut result = self.clone();
        result += other;
        result
    }
}

impl ops::Add for FuncVector {
    type Output = FuncVector;

    fn add(mut self, other : FuncVector) -> FuncVector {
        self += &other;
        self
    }
}

impl ops::Sub<&FuncVector> for &FuncVector {
    type Output = FuncVector;

    fn sub(self, other : &FuncVector) -> FuncVector {
        let mut result = self.clone();
        result -= other;
        result
    }
}

impl ops::Sub for FuncVector {
    type Output = FuncVector;

    fn sub(mut self, other : FuncVector) -> FuncVector {
        self -= &other;
        self
    }
}

impl ops::Neg for &FuncVector {
    type Output = FuncVector;

    fn neg(self) -> FuncVector {
        FuncVector {
            elements : -&self.elements
        }
    }
}

impl ops::Neg for FuncVector {
    type Output = FuncVector;

    fn neg(self) -> FuncVector {
        -&self
    }
}

impl ops::Mul<f64> for &FuncVector {
    type Output = FuncVector;

    fn mul(self, factor : f64) -> FuncVector {
        FuncVector {
            elements : self.elements.scale(factor)
        }
    }
}

impl ops::Mul<f64> for FuncVector {
    type Output = FuncVector;

    fn mul(self, factor : f64) -> FuncVector {
        &self * factor
    }
}

impl ops::Mul<&FuncVector> for f64 {
    type Output = FuncVector;

    fn mul(self, vector : &FuncVector) -> FuncVector {
        vector * self
    }
}

impl ops::Mul<FuncVector> for f64 {
    type Output = FuncVector;

    fn mul(self, vector : FuncVector) -> FuncVector {
        &vector * self
    }
}

impl ops::Div<f64> for &FuncVector {
    type Output = FuncVector;

    fn div(self, divisor : f64) -> FuncVector {
        FuncVector {
            elements : self.elements.divide(divisor)
        }
    }
}

impl ops::Div<f64> for FuncVector {
    type Output = FuncVector;

    fn div(self, divisor : f64) -> FuncVector {
        &self / divisor
    }
}
