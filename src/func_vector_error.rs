use thiserror::Error;
use crate::param_key::*;

///Everything that can go wrong when building or combining function vectors.
///All of these are caller errors; nothing here is transient.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuncVectorError {
    ///Keys in an operation are not all of one shape (e.g. scalar keys
    ///meeting interval keys)
    #[error("parameter keys are not of a consistent shape: expected {expected}, found {found}")]
    Shape {
        expected : KeyShape,
        found : KeyShape
    },

    ///A parameter lies outside the domain of its element family
    #[error("{element} parameter {param} is invalid: {reason}")]
    Domain {
        element : &'static str,
        param : String,
        reason : &'static str
    },

    ///Aligned construction lists of different lengths
    #[error("aligned construction lists differ in length: expected {expected}, found {found}")]
    Construction {
        expected : usize,
        found : usize
    },

    #[error("unknown element family `{0}`")]
    UnknownElement(String)
}

pub type Result<T> = std::result::Result<T, FuncVectorError>;

impl FuncVectorError {
    pub fn domain(element : &'static str, param : &ParamKey, reason : &'static str) -> FuncVectorError {
        FuncVectorError::Domain {
            element,
            param : param.to_string(),
            reason
        }
    }
}
