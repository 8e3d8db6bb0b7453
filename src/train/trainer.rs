use log::{debug, trace};

use crate::error::Result;
use crate::loss::mse::MseLoss;
use crate::math::Vector;
use crate::network::network::Network;
use crate::train::stats::TrainStats;

/// Runs one online training step: forward pass, cost, backward pass, commit.
///
/// Returns the cost of the prediction made *before* the update.
pub fn train_step(network: &mut Network, input: &Vector, expected: &Vector) -> Result<f64> {
    let results = network.calculate(input)?;
    let prediction = &results[results.len() - 1].output;
    let cost = MseLoss::loss(prediction, expected)?;

    let learned = network.learn(&results, expected)?;
    network.adjust(learned)?;

    trace!("train step cost={cost}");
    Ok(cost)
}

/// One pass over `samples` in order, one update per sample.
pub fn train_samples(network: &mut Network, samples: &[(Vector, Vector)]) -> Result<TrainStats> {
    let mut stats = TrainStats::default();

    for (input, expected) in samples {
        let cost = train_step(network, input, expected)?;
        stats.record(cost);
    }

    debug!(
        "trained on {} samples, mean cost={}, last cost={}",
        stats.samples, stats.mean_cost, stats.last_cost
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::spec::{Hyperparameters, WeightInit};

    #[test]
    fn train_step_commits_the_update() {
        let hp = Hyperparameters::new(0.5, WeightInit::Constant { value: 0.1 });
        let mut net = Network::construct(&[2, 2], hp).unwrap();
        let before = net.layers()[0].weights().clone();

        let input = Vector::from([1.0, 0.5]);
        let expected = Vector::from([0.0, 1.0]);
        let first = train_step(&mut net, &input, &expected).unwrap();
        let second = train_step(&mut net, &input, &expected).unwrap();

        assert_ne!(net.layers()[0].weights(), &before);
        assert!(second < first);
    }

    #[test]
    fn train_step_reports_the_pre_update_cost() {
        let hp = Hyperparameters::new(0.5, WeightInit::Constant { value: 0.2 });
        let mut net = Network::construct(&[2, 3, 2], hp).unwrap();
        let input = Vector::from([0.3, -0.7]);
        let expected = Vector::from([0.9, 0.1]);

        let prediction = net.predict(&input).unwrap();
        let before = MseLoss::loss(&prediction, &expected).unwrap();
        assert!(before > 0.0);

        assert_eq!(train_step(&mut net, &input, &expected).unwrap(), before);
    }

    #[test]
    fn train_step_propagates_shape_errors() {
        let mut net = Network::construct(&[2, 1], Hyperparameters::default()).unwrap();
        let before = net.layers().to_vec();

        let err = train_step(&mut net, &Vector::from([1.0]), &Vector::from([1.0])).unwrap_err();
        assert!(err.is_shape_mismatch());
        let err = train_step(&mut net, &Vector::from([1.0, 1.0]), &Vector::from([1.0, 0.0]))
            .unwrap_err();
        assert!(err.is_shape_mismatch());

        assert_eq!(net.layers(), &before[..]);
    }

    #[test]
    fn train_samples_reports_stats() {
        let mut net = Network::construct(&[1, 1], Hyperparameters::default()).unwrap();
        let samples = vec![
            (Vector::from([0.0]), Vector::from([1.0])),
            (Vector::from([1.0]), Vector::from([0.0])),
        ];
        let stats = train_samples(&mut net, &samples).unwrap();
        assert_eq!(stats.samples, 2);
        // Zero-initialized weights predict 0.5 on the first sample.
        assert!(stats.mean_cost > 0.0);

        let empty = train_samples(&mut net, &[]).unwrap();
        assert_eq!(empty, TrainStats::default());
    }
}
