pub mod network;
pub mod pass;
pub mod spec;

pub use network::Network;
pub use pass::{LayerResult, Learned};
pub use spec::{Hyperparameters, NetworkSpec, WeightInit};
