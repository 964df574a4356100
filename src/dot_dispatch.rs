use crate::algebra_map::*;
use crate::element::*;
use crate::func_vector_error::*;
use crate::sin_element::*;
use crate::delta_element::*;
use crate::avg_element::*;
use crate::affine_element::*;
use crate::hat_element::*;

///Resolves the inner product of two element families to its closed form.
///
///Only one side of each cross formula exists, so the mirrored pair swaps its
///arguments. Deltas reduce to point evaluation of the other family, and hats
///reduce to their ramp expansion; both are matched before the remaining
///Sin/Avg/Affine pairs. Zero-width averages are split off as deltas first,
///so the Avg formulas only ever see proper intervals.
pub fn dot(left : &Element, right : &Element, left_params : &ParamMap, right_params : &ParamMap) -> Result<f64> {
    trace!("Dotting {} ({} terms) against {} ({} terms)", left, left_params.len(), right, right_params.len());
    match (left, right) {
        (Element::DeltaElement(_), _) => delta_dot(left_params, right, right_params),
        (_, Element::DeltaElement(_)) => delta_dot(right_params, left, left_params),

        (Element::AvgElement(_), _) if has_point_averages(left_params) => {
            let (intervals, points) = split_point_averages(left_params)?;
            Ok(dot(left, right, &intervals, right_params)? + dot(&Element::DELTA, right, &points, right_params)?)
        },
        (_, Element::AvgElement(_)) if has_point_averages(right_params) => {
            let (intervals, points) = split_point_averages(right_params)?;
            Ok(dot(left, right, left_params, &intervals)? + dot(left, &Element::DELTA, left_params, &points)?)
        },

        (Element::HatElement(_), _) => {
            let expanded = hats_to_affine(left_params)?;
            dot(&Element::AFFINE, right, &expanded, right_params)
        },
        (_, Element::HatElement(_)) => {
            let expanded = hats_to_affine(right_params)?;
            dot(left, &Element::AFFINE, left_params, &expanded)
        },

        (Element::SinElement(_), Element::SinElement(_)) => sin_sin_dot(left_params, right_params),
        (Element::SinElement(_), Element::AvgElement(_)) => sin_avg_dot(left_params, right_params),
        (Element::AvgElement(_), Element::SinElement(_)) => sin_avg_dot(right_params, left_params),
        (Element::SinElement(_), Element::AffineElement(_)) => sin_affine_dot(left_params, right_params),
        (Element::AffineElement(_), Element::SinElement(_)) => sin_affine_dot(right_params, left_params),

        (Element::AvgElement(_), Element::AvgElement(_)) => avg_avg_dot(left_params, right_params),
        (Element::AvgElement(_), Element::AffineElement(_)) => avg_affine_dot(left_params, right_params),
        (Element::AffineElement(_), Element::AvgElement(_)) => avg_affine_dot(right_params, left_params),

        (Element::AffineElement(_), Element::AffineElement(_)) => affine_affine_dot(left_params, right_params)
    }
}
