use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How a freshly constructed network fills its weights and biases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeightInit {
    /// Every entry gets the same value.
    Constant { value: f64 },
    /// Independent draws from the half-open range `[low, high)`.
    Uniform { low: f64, high: f64 },
}

impl WeightInit {
    pub fn validate(&self) -> Result<()> {
        match *self {
            WeightInit::Constant { value } if !value.is_finite() => Err(Error::InvalidConfig(
                format!("constant initial weight must be finite, got {value}"),
            )),
            WeightInit::Uniform { low, high }
                if !(low.is_finite() && high.is_finite() && low < high && (high - low).is_finite()) =>
            {
                Err(Error::InvalidConfig(format!(
                    "uniform initial weights need finite low < high with a finite width, got [{low}, {high})"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Returns a closure yielding one initial value per call, backed by the
    /// thread-local RNG.
    pub fn sampler(&self) -> Result<impl FnMut() -> f64> {
        self.sampler_with(rand::thread_rng())
    }

    /// Like [`WeightInit::sampler`] but draws from `rng`, so seeded RNGs give
    /// reproducible networks.
    pub fn sampler_with<R: Rng>(&self, mut rng: R) -> Result<impl FnMut() -> f64> {
        self.validate()?;
        let (constant, uniform) = match *self {
            WeightInit::Constant { value } => (value, None),
            WeightInit::Uniform { low, high } => (low, Some(Uniform::new(low, high))),
        };
        Ok(move || match &uniform {
            Some(dist) => dist.sample(&mut rng),
            None => constant,
        })
    }
}

impl Default for WeightInit {
    fn default() -> Self {
        WeightInit::Constant { value: 0.0 }
    }
}

/// Per-network training hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hyperparameters {
    /// Step size for gradient descent. Must be positive and finite.
    pub learning_rate: f64,
    #[serde(default)]
    pub init: WeightInit,
}

impl Hyperparameters {
    pub fn new(learning_rate: f64, init: WeightInit) -> Self {
        Hyperparameters { learning_rate, init }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "learning rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }
        self.init.validate()
    }
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Hyperparameters {
            learning_rate: 0.1,
            init: WeightInit::default(),
        }
    }
}

/// A serializable description of a network's architecture and
/// hyperparameters. Trained weights are never part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name, used by drivers in log output.
    pub name: String,
    /// Layer dimensions `[d0, d1, ..., dk]`, input first.
    pub dims: Vec<usize>,
    #[serde(default)]
    pub hyperparameters: Hyperparameters,
}

impl NetworkSpec {
    pub fn new(name: impl Into<String>, dims: Vec<usize>, hyperparameters: Hyperparameters) -> Self {
        NetworkSpec {
            name: name.into(),
            dims,
            hyperparameters,
        }
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: impl AsRef<std::path::Path>) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn defaults() {
        let hp = Hyperparameters::default();
        assert_eq!(hp.learning_rate, 0.1);
        assert_eq!(hp.init, WeightInit::Constant { value: 0.0 });
        assert!(hp.validate().is_ok());
    }

    #[test]
    fn rejects_bad_learning_rates() {
        for lr in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let hp = Hyperparameters::new(lr, WeightInit::default());
            assert!(matches!(hp.validate(), Err(Error::InvalidConfig(_))), "lr = {lr}");
        }
    }

    #[test]
    fn rejects_empty_uniform_range() {
        let init = WeightInit::Uniform { low: 0.5, high: 0.5 };
        assert!(matches!(init.validate(), Err(Error::InvalidConfig(_))));
        assert!(init.sampler().is_err());
    }

    #[test]
    fn rejects_uniform_range_wider_than_f64() {
        let init = WeightInit::Uniform { low: -1e308, high: 1e308 };
        assert!(matches!(init.validate(), Err(Error::InvalidConfig(_))));
        assert!(matches!(init.sampler(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn uniform_sampler_stays_in_range_and_is_seedable() {
        let init = WeightInit::Uniform { low: 0.0, high: 0.5 };

        let mut a = init.sampler_with(StdRng::seed_from_u64(7)).unwrap();
        let mut b = init.sampler_with(StdRng::seed_from_u64(7)).unwrap();
        for _ in 0..100 {
            let x = a();
            assert!((0.0..0.5).contains(&x));
            assert_eq!(x, b());
        }
    }

    #[test]
    fn constant_sampler() {
        let mut s = WeightInit::Constant { value: 0.3 }.sampler().unwrap();
        assert_eq!(s(), 0.3);
        assert_eq!(s(), 0.3);
    }

    #[test]
    fn json_shape() {
        let spec = NetworkSpec::new(
            "tiny",
            vec![2, 3, 1],
            Hyperparameters::new(0.25, WeightInit::Uniform { low: 0.0, high: 0.5 }),
        );
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["hyperparameters"]["init"]["kind"], "uniform");

        let minimal: NetworkSpec =
            serde_json::from_str(r#"{ "name": "m", "dims": [4, 2] }"#).unwrap();
        assert_eq!(minimal.hyperparameters, Hyperparameters::default());
    }
}
