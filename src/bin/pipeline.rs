//! Fragility Pipeline Binary
//!
//! Full run: build the dependency network, sweep every stress scenario
//! computing per-node Fragility Indices, then verify estimator
//! convergence.
//!
//! ## Usage
//! ```bash
//! cargo run --bin pipeline --release
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use fragility_simulation::convergence::{analyze_convergence, CONVERGENCE_SAMPLE_SIZES};
use fragility_simulation::fragility::{estimate_all, FragilityRecord, DEFAULT_N_CASCADES, RANDOM_SEED};
use fragility_simulation::stress::{StressModel, StressProvider, STRESS_LEVELS};
use fragility_simulation::synthetic::synthetic_network;

const N_ASSETS: usize = 40;
const N_EDGES: usize = 130;
const STRESS_OBSERVATIONS: usize = 120;

fn main() {
    tracing_subscriber::fmt().init();

    println!("=======================================================");
    println!("  Operational Fragility Pipeline");
    println!("  Monte Carlo Cascade Analysis");
    println!("=======================================================");
    println!();
    println!("Parameters:");
    println!("  Assets: {}, Edges: {}", N_ASSETS, N_EDGES);
    println!("  Iterations per node: {}", DEFAULT_N_CASCADES);
    println!("  Master seed: {}", RANDOM_SEED);
    println!();

    println!("[1/3] Building dependency network...");
    let graph = synthetic_network(N_ASSETS, N_EDGES, RANDOM_SEED);
    let summary = graph.summary();
    println!("      Nodes:          {}", summary.nodes);
    println!("      Edges:          {}", summary.edges);
    println!("      Density:        {}", summary.density);
    println!("      Avg out-degree: {}", summary.avg_out_degree);
    println!("      Isolated nodes: {}", summary.isolated_nodes);
    println!();

    let stress = stress_model();
    println!("      Stress multipliers:");
    for level in STRESS_LEVELS {
        println!("        {:6} -> {:.4}", level, stress.multiplier(level));
    }
    println!();

    println!("[2/3] Running Monte Carlo simulations...");
    for level in STRESS_LEVELS {
        println!();
        println!("      -- {} stress scenario --", level.to_uppercase());

        let records = estimate_all(&graph, &stress, level, DEFAULT_N_CASCADES, RANDOM_SEED)
            .expect("batch estimation failed");
        print_scenario_summary(&records);
    }
    println!();

    println!("[3/3] Running convergence test...");
    let curve = analyze_convergence(
        &graph,
        None,
        &stress,
        "medium",
        &CONVERGENCE_SAMPLE_SIZES,
        RANDOM_SEED,
    )
    .expect("convergence test failed");

    println!();
    println!("| N    | Mean    | Std     | Normalized |");
    println!("|------|---------|---------|------------|");
    for point in &curve {
        println!(
            "| {:4} | {:7.4} | {:7.4} | {:10.6} |",
            point.n_cascades, point.mean, point.std, point.normalized
        );
    }

    println!();
    println!("=======================================================");
    println!("  PIPELINE COMPLETE");
    println!("=======================================================");
}

/// Percentile-based stress model built from a seeded synthetic stress
/// series, standing in for a historical index.
fn stress_model() -> StressModel {
    let mut rng = ChaCha8Rng::seed_from_u64(RANDOM_SEED);
    let observations: Vec<f64> = (0..STRESS_OBSERVATIONS)
        .map(|_| 0.2 + rng.gen::<f64>() * 2.0)
        .collect();
    StressModel::from_observations(&observations)
}

fn print_scenario_summary(records: &[FragilityRecord]) {
    let n = records.len() as f64;
    let mean = records.iter().map(|r| r.normalized_fragility).sum::<f64>() / n;
    let top = records
        .iter()
        .max_by(|a, b| {
            a.normalized_fragility
                .partial_cmp(&b.normalized_fragility)
                .unwrap()
        })
        .unwrap();
    let min = records
        .iter()
        .map(|r| r.normalized_fragility)
        .fold(f64::INFINITY, f64::min);

    println!("      Mean fragility: {:.4}", mean);
    println!(
        "      Max fragility:  {:.4} ({})",
        top.normalized_fragility, top.node_id
    );
    println!("      Min fragility:  {:.4}", min);

    print_top_k(records, 5);
}

fn print_top_k(records: &[FragilityRecord], k: usize) {
    let mut sorted: Vec<&FragilityRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        b.normalized_fragility
            .partial_cmp(&a.normalized_fragility)
            .unwrap()
    });

    println!();
    println!("      | Asset      | Fragility | Std     | Max Impact |");
    println!("      |------------|-----------|---------|------------|");
    for rec in sorted.iter().take(k) {
        println!(
            "      | {:10} | {:9.6} | {:7.4} | {:10} |",
            rec.node_id, rec.normalized_fragility, rec.std, rec.max_impact
        );
    }
}
