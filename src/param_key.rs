use std::fmt;
use noisy_float::prelude::*;
use serde::{Serialize, Deserialize};

use crate::func_vector_error::*;

///The shape of a key in an [`AlgebraMap`](crate::algebra_map::AlgebraMap).
///All keys of one map must share a shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyShape {
    Scalar,
    Pair,
    Element
}

impl fmt::Display for KeyShape {
    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyShape::Scalar => "scalar",
            KeyShape::Pair => "pair",
            KeyShape::Element => "element"
        };
        write!(f, "{}", name)
    }
}

///Anything usable as a key of an algebraic map reports its shape.
pub trait Shaped {
    fn shape(&self) -> KeyShape;
}

///Identifies one instance of a basis function within its family: a frequency,
///a location, an interval `(a, b)` or an `(anchor, slope)` pair.
///
///Components are [`R64`]s so keys are totally ordered and hashable. Building a key
///from a non-finite number panics, just like [`r64`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ParamKey {
    Scalar(R64),
    Pair(R64, R64)
}

impl ParamKey {
    pub fn scalar(x : f64) -> ParamKey {
        ParamKey::Scalar(r64(x))
    }

    pub fn pair(a : f64, b : f64) -> ParamKey {
        ParamKey::Pair(r64(a), r64(b))
    }

    ///Whether every component is a finite number. Keys built through [`r64`]
    ///are only checked for this in debug builds.
    pub fn is_finite(&self) -> bool {
        match self {
            ParamKey::Scalar(x) => x.raw().is_finite(),
            ParamKey::Pair(a, b) => a.raw().is_finite() && b.raw().is_finite()
        }
    }

    pub fn as_scalar(&self) -> Result<f64> {
        match self {
            ParamKey::Scalar(x) => Ok(x.raw()),
            ParamKey::Pair(_, _) => Err(FuncVectorError::Shape {
                expected : KeyShape::Scalar,
                found : KeyShape::Pair
            })
        }
    }

    pub fn as_pair(&self) -> Result<(f64, f64)> {
        match self {
            ParamKey::Pair(a, b) => Ok((a.raw(), b.raw())),
            ParamKey::Scalar(_) => Err(FuncVectorError::Shape {
                expected : KeyShape::Pair,
                found : KeyShape::Scalar
            })
        }
    }
}

impl Shaped for ParamKey {
    fn shape(&self) -> KeyShape {
        match self {
            ParamKey::Scalar(_) => KeyShape::Scalar,
            ParamKey::Pair(_, _) => KeyShape::Pair
        }
    }
}

impl From<f64> for ParamKey {
    fn from(x : f64) -> ParamKey {
        ParamKey::scalar(x)
    }
}

impl From<u32> for ParamKey {
    fn from(m : u32) -> ParamKey {
        ParamKey::scalar(m as f64)
    }
}

impl From<(f64, f64)> for ParamKey {
    fn from(pair : (f64, f64)) -> ParamKey {
        ParamKey::pair(pair.0, pair.1)
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKey::Scalar(x) => write!(f, "{}", x.raw()),
            ParamKey::Pair(a, b) => write!(f, "({}, {})", a.raw(), b.raw())
        }
    }
}
