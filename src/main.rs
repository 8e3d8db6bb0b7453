// Demonstration driver. All network logic lives in the library; this binary
// only feeds samples and reports progress.
//
//   RUST_LOG=info cargo run --release [-- path/to/spec.json]
use std::f64::consts::PI;

use log::{error, info};
use rand::Rng;

use sigmoid_net::{
    train_step, Hyperparameters, Network, NetworkSpec, Result, Vector, WeightInit,
};

const STEPS: usize = 1_000_000;
const REPORT_EVERY: usize = 100_000;

/// `y·sin(πx)`, rescaled from [-1, 1] into the sigmoid's (0, 1) range.
fn target(x: f64, y: f64) -> f64 {
    (y * (PI * x).sin() + 1.0) / 2.0
}

fn default_spec() -> NetworkSpec {
    NetworkSpec::new(
        "surface",
        vec![2, 10, 10, 1],
        Hyperparameters::new(0.1, WeightInit::Uniform { low: 0.0, high: 0.5 }),
    )
}

fn run() -> Result<()> {
    let spec = match std::env::args().nth(1) {
        Some(path) => NetworkSpec::load_json(path)?,
        None => default_spec(),
    };
    info!("training {:?} with {:?}", spec.dims, spec.hyperparameters);

    let mut network = Network::from_spec(&spec)?;
    let mut rng = rand::thread_rng();
    let mut window_cost = 0.0;

    for step in 1..=STEPS {
        let x = rng.gen_range(-1.0..1.0);
        let y = rng.gen_range(-1.0..1.0);
        let input = Vector::from([x, y]);
        let expected = Vector::from([target(x, y)]);

        window_cost += train_step(&mut network, &input, &expected)?;

        if step % REPORT_EVERY == 0 {
            info!(
                "{}: {:.0}% mean cost={:.6}",
                spec.name,
                step as f64 * 100.0 / STEPS as f64,
                window_cost / REPORT_EVERY as f64
            );
            window_cost = 0.0;
        }
    }

    println!("x\ty\texpected\tactual");
    for i in 0..=10 {
        for j in 0..=10 {
            let x = -1.0 + 0.2 * i as f64;
            let y = -1.0 + 0.2 * j as f64;
            let out = network.predict(&Vector::from([x, y]))?;
            println!("{:.1}\t{:.1}\t{:.4}\t{:.4}", x, y, target(x, y), out[0]);
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{e}");
        std::process::exit(1);
    }
}
