pub mod stats;
pub mod trainer;

pub use stats::TrainStats;
pub use trainer::{train_samples, train_step};
