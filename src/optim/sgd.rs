use crate::math::{Matrix, Vector};

/// Plain gradient descent: every shift is `-learning_rate * sensitivity`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    pub fn weight_shift(&self, sensitivity: &Matrix) -> Matrix {
        sensitivity.scale(-self.learning_rate)
    }

    pub fn bias_shift(&self, sensitivity: &Vector) -> Vector {
        sensitivity.scale(-self.learning_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifts_move_against_the_gradient() {
        let sgd = Sgd::new(0.5);
        let sens = Matrix::from_rows(vec![vec![2.0, -4.0]]).unwrap();
        assert_eq!(sgd.weight_shift(&sens).row(0), &[-1.0, 2.0]);
        assert_eq!(sgd.bias_shift(&Vector::from([1.0])), Vector::from([-0.5]));
    }
}
