use crate::error::{Error, Result};
use crate::math::Vector;

pub struct MseLoss;

/// Mean-squared-error evaluation of one output against its target.
#[derive(Debug, Clone, PartialEq)]
pub struct Cost {
    /// `output - expected`
    pub diff: Vector,
    /// `(1/N) * diff[k]^2`
    pub per_output: Vector,
}

impl Cost {
    /// Scalar training cost, the sum of `per_output`.
    pub fn total(&self) -> f64 {
        self.per_output.sum()
    }
}

impl MseLoss {
    pub fn cost(output: &Vector, expected: &Vector) -> Result<Cost> {
        if output.is_empty() {
            return Err(Error::shape("mse cost", "at least one output", 0));
        }
        let diff = output.sub(expected)?;
        let n = output.len() as f64;
        let per_output = diff.map(|d| d * d / n);
        Ok(Cost { diff, per_output })
    }

    /// Scalar MSE: mean((output - expected)²)
    pub fn loss(output: &Vector, expected: &Vector) -> Result<f64> {
        Ok(MseLoss::cost(output, expected)?.total())
    }

    /// Per-output gradient direction: output - expected
    pub fn derivative(output: &Vector, expected: &Vector) -> Result<Vector> {
        Ok(MseLoss::cost(output, expected)?.diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn cost_components() {
        let cost = MseLoss::cost(&Vector::from([0.5, 1.0]), &Vector::from([0.75, 0.0])).unwrap();
        assert_eq!(cost.diff, Vector::from([-0.25, 1.0]));
        assert_abs_diff_eq!(cost.per_output[0], 0.03125, epsilon = 1e-12);
        assert_abs_diff_eq!(cost.per_output[1], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(cost.total(), 0.53125, epsilon = 1e-12);
    }

    #[test]
    fn empty_and_mismatched_vectors_are_errors() {
        let empty = Vector::zeros(0);
        assert!(MseLoss::cost(&empty, &empty).unwrap_err().is_shape_mismatch());

        let err = MseLoss::loss(&Vector::from([1.0]), &Vector::from([1.0, 2.0])).unwrap_err();
        assert!(err.is_shape_mismatch());
    }

    #[test]
    fn perfect_prediction_costs_nothing() {
        let v = Vector::from([0.1, 0.2, 0.3]);
        assert_eq!(MseLoss::loss(&v, &v).unwrap(), 0.0);
        assert_eq!(MseLoss::derivative(&v, &v).unwrap(), Vector::zeros(3));
    }
}
