extern crate ndarray;

use ndarray::*;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use rand::prelude::*;
use crate::params::*;
use crate::element::*;
use crate::param_key::*;
use crate::func_vector::*;

pub fn assert_close_to_within(one : f64, two : f64, thresh : f64) {
    let diff = (one - two).abs();
    if (diff > thresh) {
        panic!("{} and {} differ by {}, more than {}", one, two, diff, thresh);
    }
}

pub fn assert_close(one : f64, two : f64) {
    assert_close_to_within(one, two, DEFAULT_TEST_THRESH);
}

///Closeness relative to the larger magnitude, for sums of many terms
pub fn assert_close_scaled(one : f64, two : f64) {
    let scale = 1.0 + one.abs().max(two.abs());
    assert_close_to_within(one, two, SCALED_TEST_THRESH * scale);
}

pub fn assert_equal_vectors(one : &Array1<f64>, two : &Array1<f64>) {
    assert_eq!(one.len(), two.len());
    let diff = one - two;
    let sq_norm = diff.dot(&diff);
    if (sq_norm.sqrt() > DEFAULT_TEST_THRESH) {
        panic!("{} and {} differ", one, two);
    }
}

pub fn assert_equal_matrices(one : &Array2<f64>, two : &Array2<f64>) {
    assert_eq!(one.shape(), two.shape());
    let diff = one - two;
    let frob_norm = diff.mapv(|x| x * x).sum().sqrt();
    if (frob_norm > DEFAULT_TEST_THRESH) {
        panic!("{} and {} differ", one, two);
    }
}

pub fn single_func_vector(element : Element, key : ParamKey, coeff : f64) -> FuncVector {
    FuncVector::single(element, key, coeff).unwrap()
}

///Points drawn uniformly from the interior of the unit interval
pub fn random_points(n : usize) -> Array1<f64> {
    Array::random((n,), Uniform::new(0.01, 0.99))
}

fn random_interval<R : Rng>(rng : &mut R) -> (f64, f64) {
    let a : f64 = rng.gen_range(0.0..0.8);
    let b = a + rng.gen_range(0.1..(1.0 - a));
    (a, b.min(1.0))
}

fn random_key<R : Rng>(element : &Element, rng : &mut R) -> ParamKey {
    match element {
        Element::SinElement(_) => ParamKey::from(rng.gen_range(1..8u32)),
        Element::DeltaElement(_) => ParamKey::scalar(rng.gen_range(0.05..0.95)),
        Element::AvgElement(_) | Element::HatElement(_) => ParamKey::from(random_interval(rng)),
        Element::AffineElement(_) => {
            let sign = if (rng.gen::<bool>()) { 1.0 } else { -1.0 };
            ParamKey::pair(rng.gen_range(0.0..0.9), sign * rng.gen_range(0.5..2.0))
        }
    }
}

///A vector with up to two terms from every family, with moderate coefficients
pub fn random_func_vector<R : Rng>(rng : &mut R) -> FuncVector {
    let mut result = FuncVector::new();
    for element in Element::ALL.iter() {
        let num_terms = rng.gen_range(0..3);
        for _ in 0..num_terms {
            let key = random_key(element, rng);
            let coeff : f64 = rng.gen_range(-2.0..2.0);
            result.add_term(*element, key, coeff).unwrap();
        }
    }
    result
}

///`int_0^1 u'(x) v'(x) dx` by forward differences of the evaluated vectors
pub fn empirical_h1_dot(u : &FuncVector, v : &FuncVector) -> f64 {
    let n = EMPIRICAL_GRID_POINTS;
    let h = 1.0 / (n as f64);
    let x = Array::from_shape_fn((n + 1,), |i| (i as f64) / (n as f64));

    let u_values = u.evaluate(x.view()).unwrap();
    let v_values = v.evaluate(x.view()).unwrap();

    let mut result = 0.0;
    for i in 0..n {
        let du = u_values[[i + 1,]] - u_values[[i,]];
        let dv = v_values[[i + 1,]] - v_values[[i,]];
        result += du * dv / h;
    }
    result
}
