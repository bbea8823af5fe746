//! Diagnostics Binary
//!
//! Sanity checks for the simulation framework:
//! 1. Graph structural properties
//! 2. Stress model consistency
//! 3. Convergence verification
//!
//! ## Usage
//! ```bash
//! cargo run --bin diagnostics --release
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use fragility_simulation::convergence::{analyze_convergence, CONVERGENCE_SAMPLE_SIZES};
use fragility_simulation::fragility::RANDOM_SEED;
use fragility_simulation::graph::AssetGraph;
use fragility_simulation::stress::{StressModel, StressProvider};
use fragility_simulation::synthetic::synthetic_network;

const N_ASSETS: usize = 40;
const N_EDGES: usize = 130;

fn main() {
    tracing_subscriber::fmt().init();

    println!("=======================================================");
    println!("  Fragility Framework Diagnostics");
    println!("=======================================================");

    let graph = synthetic_network(N_ASSETS, N_EDGES, RANDOM_SEED);
    let stress = stress_model();

    check_graph_structure(&graph);
    check_stress_model(&stress);
    check_convergence(&graph, &stress);

    println!();
    println!("Diagnostics complete.");
}

fn check_graph_structure(graph: &AssetGraph) {
    println!();
    println!("-- Graph Structure Checks --");

    let summary = graph.summary();
    println!("  nodes:          {}", summary.nodes);
    println!("  edges:          {}", summary.edges);
    println!("  density:        {}", summary.density);
    println!("  avg in-degree:  {}", summary.avg_in_degree);
    println!("  avg out-degree: {}", summary.avg_out_degree);

    if summary.isolated_nodes > 0 {
        println!("  [WARN] {} isolated nodes", summary.isolated_nodes);
    } else {
        println!("  [PASS] no isolated nodes");
    }

    println!();
    println!("  Top 5 assets by out-degree (potential cascade sources):");
    for (id, degree) in graph.top_by_out_degree(5) {
        println!("    {}: out={}", id, degree);
    }
}

fn check_stress_model(stress: &StressModel) {
    println!();
    println!("-- Stress Model Checks --");

    let t = stress.thresholds();
    println!("  observations: {}", stress.observations());
    println!("  p33:  {:.4}", t.p33);
    println!("  p66:  {:.4}", t.p66);
    println!("  min:  {:.4}", t.min);
    println!("  max:  {:.4}", t.max);
    println!("  mean: {:.4}", t.mean);

    let m_low = stress.multiplier("low");
    let m_med = stress.multiplier("medium");
    let m_high = stress.multiplier("high");

    if m_low < m_med && m_med < m_high {
        println!("  [PASS] stress ordering: low < medium < high");
    } else {
        println!(
            "  [WARN] unexpected ordering: low={}, med={}, high={}",
            m_low, m_med, m_high
        );
    }
}

fn check_convergence(graph: &AssetGraph, stress: &StressModel) {
    println!();
    println!("-- Convergence Checks --");

    let curve = analyze_convergence(
        graph,
        None,
        stress,
        "medium",
        &CONVERGENCE_SAMPLE_SIZES,
        RANDOM_SEED,
    )
    .expect("convergence test failed");

    for point in &curve {
        println!(
            "  N={:4} -> mean={:.4}, std={:.4}, se={:.4}",
            point.n_cascades,
            point.mean,
            point.std,
            point.std / (point.n_cascades as f64).sqrt(),
        );
    }

    let first = &curve[0];
    let last = &curve[curve.len() - 1];
    let se_first = first.std / (first.n_cascades as f64).sqrt();
    let se_last = last.std / (last.n_cascades as f64).sqrt();

    if se_last <= se_first {
        println!("  [PASS] standard error shrinks with sample size");
    } else {
        println!(
            "  [WARN] standard error grew: {:.4} -> {:.4}",
            se_first, se_last
        );
    }
}

fn stress_model() -> StressModel {
    let mut rng = ChaCha8Rng::seed_from_u64(RANDOM_SEED);
    let observations: Vec<f64> = (0..120).map(|_| 0.2 + rng.gen::<f64>() * 2.0).collect();
    StressModel::from_observations(&observations)
}
