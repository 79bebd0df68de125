//! Basic usage example of the scratch RNN
//!
//! This example demonstrates how to create a tanh RNN cell, step it by hand,
//! and drive it over a sequence.

use burn::backend::NdArray;
use burn::tensor::Tensor;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scratch_rnn::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Scratch RNN Basic Example ===\n");

    // Use the NdArray backend (CPU)
    type Backend = NdArray<f32>;
    let device = Default::default();
    let mut rng = StdRng::seed_from_u64(42);

    let cell = RnnCellConfig::new(20, 50).init::<Backend, _>(&mut rng, &device)?;
    println!("Created RNN cell:");
    println!("  Input size: {}", cell.input_size());
    println!("  Hidden size: {}", cell.hidden_size());
    println!();

    // Example 1: Stepping the cell by hand
    println!("Example 1: Manual steps");
    let x = Tensor::<Backend, 2>::random(
        [4, 20],
        burn::tensor::Distribution::Uniform(-1.0, 1.0),
        &device,
    );
    let h1 = cell.step(x.clone(), None)?;
    let h2 = cell.step(x, Some(h1.clone()))?;
    println!("  h1 shape: {:?}", h1.dims());
    println!("  h2 shape: {:?}", h2.dims());
    println!();

    // Example 2: Batch-first sequence [batch=4, seq=10, features=20]
    println!("Example 2: Batch-first sequence");
    let rnn = SimpleRnn::new(cell);
    let input = Tensor::<Backend, 3>::random(
        [4, 10, 20],
        burn::tensor::Distribution::Uniform(-1.0, 1.0),
        &device,
    );
    let (output, state) = rnn.forward(input, None)?;
    println!("  Input shape:  [4, 10, 20]");
    println!("  Output shape: {:?}", output.dims());
    println!("  State shape:  {:?}", state.dims());
    println!();

    // Example 3: Sequence-first input, continuing from the previous state
    println!("Example 3: Sequence-first, stateful");
    let rnn = rnn.with_batch_first(false);
    let input_seq = Tensor::<Backend, 3>::random(
        [6, 4, 20],
        burn::tensor::Distribution::Uniform(-1.0, 1.0),
        &device,
    );
    let (output_seq, _) = rnn.forward(input_seq, Some(state))?;
    println!("  Input shape:  [6, 4, 20]");
    println!("  Output shape: {:?}", output_seq.dims());
    println!();

    // Example 4: Empty step list hands the state back
    println!("Example 4: Empty sequence");
    let (outputs, state) = rnn.forward_steps(Vec::new(), None)?;
    println!("  Outputs: {}", outputs.len());
    println!("  State present: {}", state.is_some());
    println!();

    println!("=== Examples completed successfully! ===");
    Ok(())
}
