use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};
use crate::math::{Matrix, Vector};
use crate::network::pass::LayerResult;

/// Fully connected layer: `output = sigmoid(W·input + b)`.
///
/// `weights` is `(outputs × inputs)`, `biases` has `outputs` entries. The
/// shapes never change after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    weights: Matrix,
    biases: Vector,
    activator: ActivationFunction,
}

impl Layer {
    /// Zero-filled layer mapping `input_size` values to `size` values.
    pub fn new(size: usize, input_size: usize) -> Layer {
        Layer {
            weights: Matrix::zeros(size, input_size),
            biases: Vector::zeros(size),
            activator: ActivationFunction::Sigmoid,
        }
    }

    /// Layer with literal weights and biases.
    pub fn from_parts(weights: Matrix, biases: Vector) -> Result<Layer> {
        if biases.len() != weights.rows() {
            return Err(Error::shape("layer biases", weights.rows(), biases.len()));
        }
        Ok(Layer {
            weights,
            biases,
            activator: ActivationFunction::Sigmoid,
        })
    }

    /// Layer with literal weights and all-zero biases.
    pub fn without_bias(weights: Matrix) -> Layer {
        let biases = Vector::zeros(weights.rows());
        Layer {
            weights,
            biases,
            activator: ActivationFunction::Sigmoid,
        }
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn biases(&self) -> &Vector {
        &self.biases
    }

    pub fn input_len(&self) -> usize {
        self.weights.cols()
    }

    pub fn output_len(&self) -> usize {
        self.weights.rows()
    }

    /// Computes the layer's output and the derivative cache for `input`.
    pub fn forward(&self, input: &Vector) -> Result<LayerResult> {
        let sum = self.weights.mul_vec(input)?.add(&self.biases)?;
        let output = sum.map(|x| self.activator.function(x));
        let derivative = sum.map(|x| self.activator.derivative(x));

        Ok(LayerResult {
            input: input.clone(),
            sum,
            output,
            derivative,
        })
    }

    /// Swaps in new weights and biases together. Shapes must match the
    /// current ones; on error the layer is left untouched.
    pub fn replace(&mut self, weights: Matrix, biases: Vector) -> Result<()> {
        self.check_replacement(&weights, &biases)?;
        self.weights = weights;
        self.biases = biases;
        Ok(())
    }

    pub(crate) fn check_replacement(&self, weights: &Matrix, biases: &Vector) -> Result<()> {
        if weights.shape() != self.weights.shape() {
            return Err(Error::shape(
                "layer replace weights",
                format!("{}x{}", self.weights.rows(), self.weights.cols()),
                format!("{}x{}", weights.rows(), weights.cols()),
            ));
        }
        if biases.len() != self.biases.len() {
            return Err(Error::shape("layer replace biases", self.biases.len(), biases.len()));
        }
        Ok(())
    }

    /// Overwrites every weight, then every bias, with draws from `f`.
    pub fn fill<F>(&mut self, f: &mut F)
    where
        F: FnMut() -> f64,
    {
        self.weights.fill_with(f);
        self.biases = (0..self.biases.len()).map(|_| f()).collect();
    }
}
