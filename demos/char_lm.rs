//! Character language model example
//!
//! Builds a character vocabulary from a short passage, initializes an
//! untrained RNN language model and greedily continues a prefix.
//! Training is left to a Burn optimizer; the model's parameters are regular
//! Burn `Param`s.

use burn::backend::NdArray;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scratch_rnn::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

const PASSAGE: &str = "The Time Traveller (for so it will be convenient to speak of him) \
was expounding a recondite matter to us. His grey eyes shone and twinkled, \
and his usually pale face was flushed and animated.";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    type Backend = NdArray<f32>;
    let device = Default::default();

    let text = preprocess(PASSAGE);
    let tokens = tokenize_chars(&text);
    let vocab = Vocab::new(&tokens, 0, &[]);
    info!(chars = tokens.len(), vocab_size = vocab.len(), "built vocabulary");

    for (token, freq) in vocab.token_freqs().iter().take(5) {
        println!("  {:?}: {}", token, freq);
    }

    let mut rng = StdRng::seed_from_u64(1234);
    let lm = RnnLmConfig::new(vocab.len(), 32).init::<Backend, _>(&mut rng, &device)?;

    // One batch of two aligned windows
    let corpus = vocab.encode(&tokens);
    let batch = vec![corpus[0..10].to_vec(), corpus[10..20].to_vec()];
    let (logits, state) = lm.forward(&batch, None)?;
    info!(
        steps = logits.len(),
        state = ?state.map(|s| s.dims()),
        "forward pass over batch"
    );

    let continuation = lm.predict("time traveller ", 20, &vocab)?;
    println!("Untrained continuation: {:?}", continuation);

    Ok(())
}
