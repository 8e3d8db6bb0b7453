pub mod mse;

pub use mse::{Cost, MseLoss};
