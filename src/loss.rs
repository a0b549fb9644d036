use ndarray::ArrayView1;

use crate::{error::ShapeError, Float, Vector};

/// Mean of the element-wise squares of `error`. An empty vector has zero loss.
pub fn mean_squared(error: ArrayView1<Float>) -> Float {
    error.mapv(|e| e.powi(2)).mean().unwrap_or_default()
}

pub fn softmax(x: ArrayView1<Float>) -> Vector {
    let max_element = x.iter().fold(Float::NEG_INFINITY, |v, &w| v.max(w));
    let exp_each = x.mapv(|v| (v - max_element).exp());
    let exp_sum = exp_each.sum();
    exp_each / exp_sum
}

/// Cross-entropy of `softmax(logits)` against `target`.
///
/// Returns the loss together with the error `softmax(logits) - target`, which is the gradient
/// with respect to the logits. Inject it with [`crate::network::Network::set_error`] to train a
/// classifier whose last node emits raw logits.
pub fn softmax_cross_entropy(
    logits: ArrayView1<Float>,
    target: ArrayView1<Float>,
) -> Result<(Float, Vector), ShapeError> {
    ShapeError::check("softmax cross entropy target", logits.len(), target.len())?;

    let probabilities = softmax(logits);
    let loss = -probabilities
        .iter()
        .zip(target.iter())
        .map(|(&p, &t)| t * p.max(Float::MIN_POSITIVE).ln())
        .sum::<Float>();
    Ok((loss, probabilities - &target))
}

#[cfg(test)]
mod tests {
    use crate::assert_rel_eq_vec;

    use super::*;

    use approx::assert_relative_eq;
    use ndarray::arr1;

    #[test]
    fn mean_squared_of_symmetric_error() {
        assert_relative_eq!(4.0, mean_squared(arr1(&[2.0, -2.0]).view()));
        assert_relative_eq!(
            0.35833333333333334,
            mean_squared(arr1(&[0.0, 0.5, -0.1, 0.5, -0.8, 1.0]).view()),
            max_relative = 1e-12
        );
    }

    #[test]
    fn mean_squared_of_empty_error_is_zero() {
        assert_relative_eq!(0.0, mean_squared(Vector::zeros(0).view()));
    }

    #[test]
    fn compute_softmax() {
        let x = arr1(&[1.0, 0.5, -0.1, 0.5, 0.2, 3.0]);
        assert_rel_eq_vec!(
            arr1(&[
                0.0962990589663384,
                0.058408331764559,
                0.0320551721172303,
                0.058408331764559,
                0.0432699564108081,
                0.7115591489765052
            ]),
            softmax(x.view())
        );
    }

    #[test]
    fn softmax_is_stable_for_large_logits() {
        let p = softmax(arr1(&[1000.0, 1000.0]).view());
        assert_rel_eq_vec!(arr1(&[0.5, 0.5]), p);
    }

    #[test]
    fn cross_entropy_and_error() {
        let logits = arr1(&[0.0, 0.0]);
        let target = arr1(&[1.0, 0.0]);
        let (loss, error) = softmax_cross_entropy(logits.view(), target.view()).unwrap();
        assert_relative_eq!(std::f64::consts::LN_2, loss, max_relative = 1e-12);
        assert_rel_eq_vec!(arr1(&[-0.5, 0.5]), error);
    }

    #[test]
    fn cross_entropy_rejects_mismatched_target() {
        let err = softmax_cross_entropy(arr1(&[0.0, 1.0]).view(), arr1(&[1.0]).view())
            .unwrap_err();
        assert_eq!(2, err.expected);
    }
}
