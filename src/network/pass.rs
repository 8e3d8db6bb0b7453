use crate::math::{Matrix, Vector};

/// Forward-pass cache for one layer, produced fresh by every
/// `Network::calculate` call.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerResult {
    /// Owned copy of the vector fed into the layer.
    pub input: Vector,
    /// Pre-activation weighted sum `W·input + b`.
    pub sum: Vector,
    /// `sigmoid(sum)`
    pub output: Vector,
    /// `sigmoid'(sum)`
    pub derivative: Vector,
}

/// Backward-pass output for one layer: the gradients and the weights and
/// biases the layer would hold after the update.
///
/// Produced by `Network::learn` and consumed by `Network::adjust`.
#[derive(Debug, Clone, PartialEq)]
pub struct Learned {
    /// Error signal at this layer.
    pub delta: Vector,
    /// `delta ⊗ input`, same shape as the layer's weights.
    pub weight_sensitivity: Matrix,
    pub bias_sensitivity: Vector,
    pub weight_shift: Matrix,
    pub bias_shift: Vector,
    /// Proposed weights, `current + weight_shift`.
    pub weights: Matrix,
    /// Proposed biases, `current + bias_shift`.
    pub biases: Vector,
}
