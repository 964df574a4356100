extern crate ndarray;

use ndarray::*;
use std::fmt;
use std::str::FromStr;
use enum_dispatch::*;
use serde::{Serialize, Deserialize};

use crate::algebra_map::*;
use crate::func_vector_error::*;
use crate::param_key::*;
use crate::params::*;
use crate::dot_dispatch;
use crate::sin_element::*;
use crate::delta_element::*;
use crate::avg_element::*;
use crate::affine_element::*;
use crate::hat_element::*;

///The capabilities shared by every family of basis functions in H1 of the unit interval.
///
///An element carries no per-instance data: the instances of a family, and their
///coefficients, are the entries of a [`ParamMap`] handed to each method.
#[enum_dispatch]
pub trait H1Element {
    fn name(&self) -> &'static str;

    ///The shape every parameter key of this family must have
    fn param_shape(&self) -> KeyShape;

    ///Checks a single key's shape and domain
    fn check_param(&self, key : &ParamKey) -> Result<()>;

    fn check_params(&self, params : &ParamMap) -> Result<()> {
        for key in params.keys() {
            self.check_param(key)?;
        }
        Ok(())
    }

    ///One factor per entry of `params` (in key order) making that basis
    ///function unit-norm
    fn normalizer(&self, params : &ParamMap) -> Result<Array1<f64>>;

    ///Returns the `x.len() x params.len()` matrix of coefficient-weighted,
    ///normalized values of each instance at each point. Summing over the
    ///second axis gives this family's contribution to a vector's value.
    fn evaluate(&self, params : &ParamMap, x : ArrayView1<f64>) -> Result<Array2<f64>>;

    fn dimension(&self) -> usize {
        H1_DIMENSION
    }

    fn domain(&self) -> (f64, f64) {
        UNIT_INTERVAL
    }
}

///Identity of an element family, used as the outer key of a function vector.
///Two values of the same variant are the same family, dimension and domain.
#[enum_dispatch(H1Element)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    SinElement,
    DeltaElement,
    AvgElement,
    AffineElement,
    HatElement
}

impl Element {
    pub const SIN : Element = Element::SinElement(SinElement);
    pub const DELTA : Element = Element::DeltaElement(DeltaElement);
    pub const AVG : Element = Element::AvgElement(AvgElement);
    pub const AFFINE : Element = Element::AffineElement(AffineElement);
    pub const HAT : Element = Element::HatElement(HatElement);

    pub const ALL : [Element; 5] = [Element::SIN, Element::DELTA, Element::AVG,
                                    Element::AFFINE, Element::HAT];

    ///Exact inner product between the `self`-family vector given by `left_params`
    ///and the `right`-family vector given by `right_params`
    pub fn dot(&self, right : &Element, left_params : &ParamMap, right_params : &ParamMap) -> Result<f64> {
        dot_dispatch::dot(self, right, left_params, right_params)
    }
}

impl Shaped for Element {
    fn shape(&self) -> KeyShape {
        KeyShape::Element
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Element {
    type Err = FuncVectorError;

    ///Accepts the family name, case-insensitively, with or without an `H1UI` prefix
    fn from_str(s : &str) -> Result<Element> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        let name = lower.strip_prefix("h1ui").unwrap_or(lower.as_str());
        match name {
            "sin" => Ok(Element::SIN),
            "delta" => Ok(Element::DELTA),
            "avg" => Ok(Element::AVG),
            "affine" => Ok(Element::AFFINE),
            "hat" => Ok(Element::HAT),
            _ => Err(FuncVectorError::UnknownElement(trimmed.to_owned()))
        }
    }
}

///Coefficient times normalizer for every entry of `params`
pub fn weights<E : H1Element>(element : &E, params : &ParamMap) -> Result<Array1<f64>> {
    let normalizer = element.normalizer(params)?;
    Ok(normalizer * &params.values_array())
}
