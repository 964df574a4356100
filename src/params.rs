//The space every element in this crate lives in: H1_0 on the unit interval,
//with inner product <u, v> = int_0^1 u'(x) v'(x) dx
pub const UNIT_INTERVAL : (f64, f64) = (0.0, 1.0);
pub const H1_DIMENSION : usize = 1;

//Numerical test constants
pub const DEFAULT_TEST_THRESH : f64 = 1e-9;
//Relative to the magnitude of the compared values
pub const SCALED_TEST_THRESH : f64 = 1e-8;

//Finite-difference H1 inner products are only first-order accurate
pub const EMPIRICAL_DOT_THRESH : f64 = 1e-3;
pub const EMPIRICAL_GRID_POINTS : usize = 20000;
