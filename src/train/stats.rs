/// Summary of one pass of online training over a sample sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrainStats {
    /// Number of samples (and therefore weight updates) in the pass.
    pub samples: usize,
    /// Mean pre-update cost over all samples; `0.0` for an empty pass.
    pub mean_cost: f64,
    /// Pre-update cost of the final sample.
    pub last_cost: f64,
}

impl TrainStats {
    pub(crate) fn record(&mut self, cost: f64) {
        self.samples += 1;
        self.mean_cost += (cost - self.mean_cost) / self.samples as f64;
        self.last_cost = cost;
    }
}
