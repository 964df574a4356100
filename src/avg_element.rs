extern crate ndarray;

use ndarray::*;
use serde::{Serialize, Deserialize};

use crate::algebra_map::*;
use crate::element::*;
use crate::func_vector_error::*;
use crate::linalg_utils::*;
use crate::param_key::*;
use crate::affine_element::*;

///The local average `f -> (1 / (b - a)) int_a^b f` over an interval `(a, b)`,
///represented by its Riesz representer.
///
///A zero-width interval `(a, a)` is the limit of shrinking averages, which is
///point evaluation at `a`. Its representer and normalizer coincide with the
///delta at `a`, so the cross formulas treat it as one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AvgElement;

///Validated interval endpoints `(a, b)` of every local average in `params`.
///Fails before any computation if an interval is reversed.
pub fn avg_intervals(params : &ParamMap) -> Result<(Array1<f64>, Array1<f64>)> {
    AvgElement.check_params(params)?;
    params.pair_keys()
}

fn representer(a : f64, b : f64, x : f64) -> f64 {
    if (x < a) {
        (1.0 - 0.5 * (a + b)) * x
    } else if (x < b) {
        (1.0 - 0.5 * (a + b)) * x - 0.5 * (a - x) * (a - x) / (b - a)
    } else {
        0.5 * (a + b) * (1.0 - x)
    }
}

///Whether any interval in `params` has zero width
pub fn has_point_averages(params : &ParamMap) -> bool {
    params.keys().any(|key| match key.as_pair() {
        Ok((a, b)) => a == b,
        Err(_) => false
    })
}

///Splits `params` into the averages over proper intervals and the zero-width
///ones, the latter rekeyed as deltas at their location with the same coefficient
pub fn split_point_averages(params : &ParamMap) -> Result<(ParamMap, ParamMap)> {
    AvgElement.check_params(params)?;
    let mut intervals = ParamMap::new();
    let mut points = ParamMap::new();
    for (key, coeff) in params.iter() {
        let (a, b) = key.as_pair()?;
        if (a == b) {
            points.accumulate(ParamKey::scalar(a), *coeff)?;
        } else {
            intervals.accumulate(*key, *coeff)?;
        }
    }
    Ok((intervals, points))
}

impl H1Element for AvgElement {
    fn name(&self) -> &'static str {
        "Avg"
    }

    fn param_shape(&self) -> KeyShape {
        KeyShape::Pair
    }

    fn check_param(&self, key : &ParamKey) -> Result<()> {
        if (!key.is_finite()) {
            return Err(FuncVectorError::domain(self.name(), key, "parameter must be finite"));
        }
        let (a, b) = key.as_pair()?;
        if (a > b) {
            return Err(FuncVectorError::domain(self.name(), key, "local-average interval is reversed, a > b"));
        }
        if (a < 0.0 || b > 1.0) {
            return Err(FuncVectorError::domain(self.name(), key, "local-average interval must lie in [0, 1]"));
        }
        if (a == b && (a <= 0.0 || a >= 1.0)) {
            return Err(FuncVectorError::domain(self.name(), key, "zero-width interval must lie strictly inside (0, 1)"));
        }
        Ok(())
    }

    fn normalizer(&self, params : &ParamMap) -> Result<Array1<f64>> {
        let (a, b) = avg_intervals(params)?;
        let result = Zip::from(&a).and(&b)
                        .map_collect(|&a, &b| 1.0 / (a + (b - a) / 3.0 - 0.25 * (a + b) * (a + b)).sqrt());
        Ok(result)
    }

    fn evaluate(&self, params : &ParamMap, x : ArrayView1<f64>) -> Result<Array2<f64>> {
        let (a, b) = avg_intervals(params)?;
        let w = weights(self, params)?;
        let values = Array2::from_shape_fn((x.len(), a.len()), |(i, j)| representer(a[[j,]], b[[j,]], x[[i,]]));
        Ok(scale_columns(values.view(), w.view()))
    }
}

//Raw inner products of two local averages, one per way the intervals can sit
fn disjoint(a : f64, b : f64, c : f64, d : f64) -> f64 {
    (1.0 - 0.5 * (c + d)) * 0.5 * (a + b)
}

fn intersecting(a : f64, b : f64, c : f64, d : f64) -> f64 {
    disjoint(a, b, c, d) - (b - c).powi(3) / (6.0 * (b - a) * (d - c))
}

//(c, d) inside (a, b)
fn contained(a : f64, b : f64, c : f64, d : f64) -> f64 {
    (1.0 / (b - a)) * ((1.0 - 0.5 * (c + d)) * 0.5 * (d * d - a * a) - (d - c) * (d - c) / 6.0
                       - 0.25 * (c + d) * ((1.0 - b) * (1.0 - b) - (1.0 - d) * (1.0 - d)))
}

///Raw (unnormalized) inner product of the averages over `(a, b)` and `(c, d)`.
///Cases are tried in order and the first match wins.
pub fn avg_kernel(a : f64, b : f64, c : f64, d : f64) -> f64 {
    if (b <= c) {
        disjoint(a, b, c, d)
    } else if (a < c && b <= d) {
        intersecting(a, b, c, d)
    } else if (a <= c && d <= b) {
        contained(a, b, c, d)
    } else if (c <= a && b <= d) {
        contained(c, d, a, b)
    } else if (d <= a) {
        disjoint(c, d, a, b)
    } else {
        intersecting(c, d, a, b)
    }
}

pub fn avg_avg_dot(left_params : &ParamMap, right_params : &ParamMap) -> Result<f64> {
    let (a, b) = avg_intervals(left_params)?;
    let (c, d) = avg_intervals(right_params)?;
    let lw = weights(&AvgElement, left_params)?;
    let rw = weights(&AvgElement, right_params)?;

    let kernel = Array2::from_shape_fn((a.len(), c.len()), |(i, j)| {
        avg_kernel(a[[i,]], b[[i,]], c[[j,]], d[[j,]])
    });
    Ok(bilinear(lw.view(), kernel.view(), rw.view()))
}

///The local average of each ramp over each interval
pub fn avg_affine_dot(avg_params : &ParamMap, affine_params : &ParamMap) -> Result<f64> {
    let (a, b) = avg_intervals(avg_params)?;
    let lw = weights(&AvgElement, avg_params)?;

    let (d, s) = affine_anchors_and_slopes(affine_params)?;
    let rw = weights(&AffineElement, affine_params)?;

    let kernel = Array2::from_shape_fn((a.len(), d.len()), |(i, j)| {
        let (a, b, d, s) = (a[[i,]], b[[i,]], d[[j,]], s[[j,]]);
        let mut integral = 0.5 * (b * b - a * a) * (1.0 - d).powi(3);
        if (d < b) {
            integral -= 0.25 * (b - d).powi(4);
        }
        if (d < a) {
            integral += 0.25 * (a - d).powi(4);
        }
        0.5 * s * integral / (b - a)
    });
    Ok(bilinear(lw.view(), kernel.view(), rw.view()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::*;
    use crate::test_utils::*;

    fn avgs(pairs : &[((f64, f64), f64)]) -> ParamMap {
        AlgebraMap::from_pairs(pairs.iter().map(|(k, c)| (ParamKey::from(*k), *c))).unwrap()
    }

    #[test]
    fn averages_are_unit_norm() {
        for interval in [(0.1, 0.4), (0.0, 1.0), (0.3, 0.31)].iter() {
            let params = avgs(&[(*interval, 1.0)]);
            assert_close(avg_avg_dot(&params, &params).unwrap(), 1.0);
        }
    }

    #[test]
    fn every_overlap_case_matches_empirical_dot() {
        let cases = [((0.1, 0.3), (0.5, 0.9)),
                     ((0.5, 0.9), (0.1, 0.3)),
                     ((0.1, 0.5), (0.5, 0.9)),
                     ((0.1, 0.6), (0.4, 0.9)),
                     ((0.4, 0.9), (0.1, 0.6)),
                     ((0.1, 0.9), (0.4, 0.6)),
                     ((0.4, 0.6), (0.1, 0.9)),
                     ((0.2, 0.5), (0.2, 0.8)),
                     ((0.4, 0.8), (0.2, 0.8))];
        for (left, right) in cases.iter() {
            let u = single_func_vector(Element::AVG, ParamKey::from(*left), 1.0);
            let v = single_func_vector(Element::AVG, ParamKey::from(*right), 1.0);
            let exact = u.dot(&v).unwrap();
            assert_close_to_within(exact, empirical_h1_dot(&u, &v), EMPIRICAL_DOT_THRESH);
            assert_close(exact, v.dot(&u).unwrap());
        }
    }

    #[test]
    fn avg_affine_matches_empirical_dot() {
        let avg = single_func_vector(Element::AVG, ParamKey::pair(0.3, 0.8), 1.5);
        //Anchors before, inside and after the interval
        for anchor in [0.1, 0.5, 0.9].iter() {
            let affine = single_func_vector(Element::AFFINE, ParamKey::pair(*anchor, 1.2), -0.5);
            let exact = avg.dot(&affine).unwrap();
            assert_close_to_within(exact, empirical_h1_dot(&avg, &affine), EMPIRICAL_DOT_THRESH);
            assert_close(exact, affine.dot(&avg).unwrap());
        }
    }

    #[test]
    fn touching_intervals_count_once() {
        let (a, b, c, d) = (0.1, 0.5, 0.5, 0.9);
        assert_close(avg_kernel(a, b, c, d), disjoint(a, b, c, d));
        assert_close(avg_kernel(c, d, a, b), disjoint(a, b, c, d));
    }

    #[test]
    fn evaluate_is_continuous_at_endpoints() {
        let params = avgs(&[((0.3, 0.6), 1.0)]);
        let eps = 1e-9;
        let x = arr1(&[0.3 - eps, 0.3, 0.6 - eps, 0.6]);
        let values = AvgElement.evaluate(&params, x.view()).unwrap();
        assert_close_to_within(values[[0, 0]], values[[1, 0]], 1e-6);
        assert_close_to_within(values[[2, 0]], values[[3, 0]], 1e-6);
    }

    #[test]
    fn zero_width_average_behaves_as_delta() {
        let point = single_func_vector(Element::AVG, ParamKey::pair(0.4, 0.4), 1.5);
        let delta = single_func_vector(Element::DELTA, ParamKey::scalar(0.4), 1.5);
        let others = [single_func_vector(Element::SIN, ParamKey::from(2u32), 1.0),
                      single_func_vector(Element::AVG, ParamKey::pair(0.3, 0.9), -1.0),
                      single_func_vector(Element::AVG, ParamKey::pair(0.4, 0.4), 0.5),
                      single_func_vector(Element::AFFINE, ParamKey::pair(0.2, 1.0), 1.0),
                      single_func_vector(Element::DELTA, ParamKey::scalar(0.7), 2.0),
                      single_func_vector(Element::HAT, ParamKey::pair(0.1, 0.5), 1.0)];
        for other in others.iter() {
            let exact = point.dot(other).unwrap();
            assert!(exact.is_finite());
            assert_close(exact, delta.dot(other).unwrap());
            assert_close(exact, other.dot(&point).unwrap());
        }
        assert_close(point.norm().unwrap(), 1.5);

        let x = arr1(&[0.1, 0.4, 0.8]);
        assert_equal_vectors(&point.evaluate(x.view()).unwrap(), &delta.evaluate(x.view()).unwrap());
    }

    #[test]
    fn mixed_zero_width_and_proper_intervals_split() {
        let params = avgs(&[((0.4, 0.4), 1.0), ((0.1, 0.3), 2.0)]);
        let (intervals, points) = split_point_averages(&params).unwrap();
        assert_eq!(intervals.coefficient(&ParamKey::pair(0.1, 0.3)), 2.0);
        assert_eq!(intervals.len(), 1);
        assert_eq!(points.coefficient(&ParamKey::scalar(0.4)), 1.0);
        assert_eq!(points.len(), 1);
        assert!(has_point_averages(&params));
        assert!(!has_point_averages(&intervals));
    }

    #[test]
    fn zero_width_intervals_at_the_boundary_are_rejected() {
        for interval in [(0.0, 0.0), (1.0, 1.0)].iter() {
            assert!(AvgElement.normalizer(&avgs(&[(*interval, 1.0)])).is_err());
        }
    }

    #[test]
    fn reversed_intervals_are_rejected() {
        let reversed = avgs(&[((0.7, 0.3), 1.0)]);
        let fine = avgs(&[((0.1, 0.3), 1.0)]);
        for result in [AvgElement.normalizer(&reversed).map(|_| 0.0),
                       avg_avg_dot(&reversed, &fine),
                       avg_avg_dot(&fine, &reversed)].iter() {
            match result {
                Err(FuncVectorError::Domain { element : "Avg", .. }) => {},
                other => panic!("unexpected {:?}", other)
            }
        }
    }
}
