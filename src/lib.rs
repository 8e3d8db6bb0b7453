pub mod activation;
pub mod error;
pub mod layers;
pub mod loss;
pub mod math;
pub mod network;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use activation::activation::ActivationFunction;
pub use error::{Error, Result};
pub use layers::dense::Layer;
pub use loss::mse::{Cost, MseLoss};
pub use math::{Matrix, Vector};
pub use network::network::Network;
pub use network::pass::{LayerResult, Learned};
pub use network::spec::{Hyperparameters, NetworkSpec, WeightInit};
pub use optim::sgd::Sgd;
pub use train::trainer::{train_samples, train_step};
