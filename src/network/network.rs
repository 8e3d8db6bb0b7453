use log::debug;

use crate::error::{Error, Result};
use crate::layers::dense::Layer;
use crate::loss::mse::MseLoss;
use crate::math::{Matrix, Vector};
use crate::network::pass::{LayerResult, Learned};
use crate::network::spec::{Hyperparameters, NetworkSpec};
use crate::optim::sgd::Sgd;

/// An ordered stack of sigmoid layers trained by online gradient descent.
///
/// A training step is always `calculate` → `learn` → `adjust`. The first two
/// borrow the network immutably, so every gradient in one `learn` call is
/// computed against the weights that produced its `results`; `adjust` is the
/// only way weights change after construction.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Layer>,
    hyperparameters: Hyperparameters,
}

impl Network {
    /// Builds a network for `dims = [d0, d1, ..., dk]`, where layer `i` maps
    /// `d_i` values to `d_{i+1}` values, and fills it per
    /// `hyperparameters.init`.
    pub fn construct(dims: &[usize], hyperparameters: Hyperparameters) -> Result<Network> {
        if dims.len() < 2 {
            return Err(Error::InvalidTopology(format!(
                "need at least 2 dimensions, got {dims:?}"
            )));
        }
        if let Some(pos) = dims.iter().position(|&d| d == 0) {
            return Err(Error::InvalidTopology(format!(
                "dimension {pos} of {dims:?} is zero"
            )));
        }
        hyperparameters.validate()?;

        let layers = dims
            .windows(2)
            .map(|pair| Layer::new(pair[1], pair[0]))
            .collect();
        let mut network = Network { layers, hyperparameters };
        network.initialize(hyperparameters.init.sampler()?);

        debug!("constructed network {:?} with {:?}", dims, hyperparameters);
        Ok(network)
    }

    /// Builds a network from literal layers. Adjacent layers must chain:
    /// each layer's output length is the next layer's input length.
    pub fn from_layers(layers: Vec<Layer>, hyperparameters: Hyperparameters) -> Result<Network> {
        if layers.is_empty() {
            return Err(Error::InvalidTopology("network has no layers".to_string()));
        }
        if let Some(pos) = layers
            .iter()
            .position(|l| l.input_len() == 0 || l.output_len() == 0)
        {
            return Err(Error::InvalidTopology(format!(
                "layer {pos} has a zero dimension ({}x{})",
                layers[pos].output_len(),
                layers[pos].input_len()
            )));
        }
        for (i, pair) in layers.windows(2).enumerate() {
            if pair[0].output_len() != pair[1].input_len() {
                return Err(Error::InvalidTopology(format!(
                    "layer {} outputs {} values but layer {} takes {}",
                    i,
                    pair[0].output_len(),
                    i + 1,
                    pair[1].input_len()
                )));
            }
        }
        hyperparameters.validate()?;
        Ok(Network { layers, hyperparameters })
    }

    pub fn from_spec(spec: &NetworkSpec) -> Result<Network> {
        Network::construct(&spec.dims, spec.hyperparameters)
    }

    /// Overwrites every weight and bias with successive calls to `weight_fn`.
    pub fn initialize<F>(&mut self, mut weight_fn: F)
    where
        F: FnMut() -> f64,
    {
        for layer in &mut self.layers {
            layer.fill(&mut weight_fn);
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn hyperparameters(&self) -> &Hyperparameters {
        &self.hyperparameters
    }

    /// `[d0, d1, ..., dk]`
    pub fn dims(&self) -> Vec<usize> {
        std::iter::once(self.input_len())
            .chain(self.layers.iter().map(Layer::output_len))
            .collect()
    }

    pub fn input_len(&self) -> usize {
        self.layers[0].input_len()
    }

    pub fn output_len(&self) -> usize {
        self.layers[self.layers.len() - 1].output_len()
    }

    /// Forward pass. Returns one result per layer, in layer order; the last
    /// result's `output` is the prediction.
    pub fn calculate(&self, input: &Vector) -> Result<Vec<LayerResult>> {
        if input.len() != self.input_len() {
            return Err(Error::shape("network input", self.input_len(), input.len()));
        }

        let mut results: Vec<LayerResult> = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            let next = match results.last() {
                Some(prev) => layer.forward(&prev.output)?,
                None => layer.forward(input)?,
            };
            results.push(next);
        }
        Ok(results)
    }

    /// Final output only.
    pub fn predict(&self, input: &Vector) -> Result<Vector> {
        let mut results = self.calculate(input)?;
        results
            .pop()
            .map(|r| r.output)
            .ok_or_else(|| Error::InvalidTopology("network has no layers".to_string()))
    }

    /// Backward pass. Walks the layers from output to input and returns the
    /// gradients and proposed parameters for each, indexed in layer order.
    /// No weights change until the result is passed to [`Network::adjust`].
    pub fn learn(&self, results: &[LayerResult], expected: &Vector) -> Result<Vec<Learned>> {
        self.check_results(results)?;
        if expected.len() != self.output_len() {
            return Err(Error::shape("expected output", self.output_len(), expected.len()));
        }

        let sgd = Sgd::new(self.hyperparameters.learning_rate);
        let mut learned = Vec::with_capacity(self.layers.len());
        let mut next_delta: Option<Vector> = None;

        for i in (0..self.layers.len()).rev() {
            let layer = &self.layers[i];
            let result = &results[i];

            let error = match &next_delta {
                None => MseLoss::derivative(&result.output, expected)?,
                Some(delta) => self.layers[i + 1]
                    .weights()
                    .transpose_view()
                    .mul_vec(delta)?,
            };
            let delta = error.hadamard(&result.derivative)?;

            let weight_sensitivity = Matrix::outer(&delta, &result.input);
            let bias_sensitivity = delta.clone();
            let weight_shift = sgd.weight_shift(&weight_sensitivity);
            let bias_shift = sgd.bias_shift(&bias_sensitivity);
            let weights = layer.weights().add(&weight_shift)?;
            let biases = layer.biases().add(&bias_shift)?;

            next_delta = Some(delta.clone());
            learned.push(Learned {
                delta,
                weight_sensitivity,
                bias_sensitivity,
                weight_shift,
                bias_shift,
                weights,
                biases,
            });
        }

        learned.reverse();
        Ok(learned)
    }

    /// Commits the proposed weights and biases from `learned` to every layer.
    /// Every entry is validated first, so either all layers change or none do.
    pub fn adjust(&mut self, learned: Vec<Learned>) -> Result<()> {
        if learned.len() != self.layers.len() {
            return Err(Error::shape("adjust layer count", self.layers.len(), learned.len()));
        }
        for (layer, l) in self.layers.iter().zip(&learned) {
            layer.check_replacement(&l.weights, &l.biases)?;
        }
        for (layer, l) in self.layers.iter_mut().zip(learned) {
            layer.replace(l.weights, l.biases)?;
        }
        Ok(())
    }

    /// Rejects results that this network's `calculate` could not have produced.
    fn check_results(&self, results: &[LayerResult]) -> Result<()> {
        if results.len() != self.layers.len() {
            return Err(Error::shape("results layer count", self.layers.len(), results.len()));
        }
        for (layer, r) in self.layers.iter().zip(results) {
            let n = layer.output_len();
            if r.input.len() != layer.input_len() {
                return Err(Error::shape("result input", layer.input_len(), r.input.len()));
            }
            if r.output.len() != n || r.derivative.len() != n || r.sum.len() != n {
                return Err(Error::shape(
                    "result output",
                    n,
                    format!("{}/{}/{}", r.sum.len(), r.output.len(), r.derivative.len()),
                ));
            }
        }
        Ok(())
    }
}
