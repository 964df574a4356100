//! Exact finite-dimensional function vectors in H1_0 of the unit interval.
//!
//! A [`crate::func_vector::FuncVector`] is a finite linear combination of
//! normalized basis functions drawn from several element families (sines,
//! point evaluations, local averages, ramps and hats), each represented by the
//! Riesz representer of a linear functional. Vectors over any mix of families
//! can be added, scaled, evaluated pointwise, and dotted against each other
//! with closed-form inner products `<u, v> = int_0^1 u'(x) v'(x) dx`.
//!
//! For the families themselves, see [`crate::element::H1Element`].

#![allow(unused_parens)]

#[macro_use] extern crate log;
pub mod params;
pub mod func_vector_error;
pub mod param_key;
pub mod algebra_map;
pub mod linalg_utils;
pub mod element;
pub mod dot_dispatch;
pub mod sin_element;
pub mod delta_element;
pub mod avg_element;
pub mod affine_element;
pub mod hat_element;
pub mod func_vector;

#[cfg(test)]
pub mod test_utils;
