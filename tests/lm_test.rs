//! Integration tests for the character language model and text utilities

use burn::backend::NdArray;
use burn::tensor::ElementConversion;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scratch_rnn::rnn::{RnnLm, RnnLmConfig};
use scratch_rnn::text::{preprocess, tokenize_chars, Vocab};
use scratch_rnn::RnnError;

type Backend = NdArray<f32>;

const CORPUS: &str = "The Time Traveller (for so it will be convenient to speak of him) \
                      was expounding a recondite matter to us.";

fn corpus_vocab() -> Vocab {
    Vocab::new(tokenize_chars(&preprocess(CORPUS)), 0, &[])
}

fn create_test_lm(vocab: &Vocab, seed: u64) -> RnnLm<Backend> {
    let device = Default::default();
    let mut rng = StdRng::seed_from_u64(seed);
    RnnLmConfig::new(vocab.len(), 32)
        .with_sigma(0.1)
        .init(&mut rng, &device)
        .unwrap()
}

#[test]
fn test_corpus_vocab_covers_letters_and_space() {
    let vocab = corpus_vocab();

    assert_ne!(vocab.index(" "), vocab.unk());
    assert_ne!(vocab.index("t"), vocab.unk());
    assert_eq!(vocab.index("T"), vocab.unk());
    assert_eq!(vocab.index("("), vocab.unk());
}

#[test]
fn test_encode_decode_preprocessed_text() {
    let vocab = corpus_vocab();
    let text = preprocess("Time Traveller");

    let indices = vocab.encode(tokenize_chars(&text));

    assert_eq!(indices.len(), text.chars().count());
    assert_eq!(vocab.decode(&indices), text);
}

#[test]
fn test_vocab_survives_json() {
    let vocab = corpus_vocab();

    let json = serde_json::to_string(&vocab).unwrap();
    let restored: Vocab = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, vocab);
}

#[test]
fn test_predict_without_new_tokens_returns_prefix() {
    let vocab = corpus_vocab();
    let lm = create_test_lm(&vocab, 42);

    let text = lm.predict("time tr", 0, &vocab).unwrap();

    assert_eq!(text, "time tr");
}

#[test]
fn test_predict_is_deterministic() {
    let vocab = corpus_vocab();
    let lm = create_test_lm(&vocab, 42);

    let first = lm.predict("it has", 12, &vocab).unwrap();
    let second = lm.predict("it has", 12, &vocab).unwrap();

    assert!(first.starts_with("it has"));
    assert_eq!(first, second);
}

#[test]
fn test_predict_same_seed_same_model() {
    let vocab = corpus_vocab();

    let a = create_test_lm(&vocab, 7).predict("the ", 8, &vocab).unwrap();
    let b = create_test_lm(&vocab, 7).predict("the ", 8, &vocab).unwrap();

    assert_eq!(a, b);
}

#[test]
fn test_predict_empty_prefix() {
    let vocab = corpus_vocab();
    let lm = create_test_lm(&vocab, 42);

    let result = lm.predict("", 5, &vocab);

    assert!(matches!(result, Err(RnnError::EmptyPrefix)));
}

#[test]
fn test_predict_rejects_mismatched_vocab() {
    let device = Default::default();
    let mut rng = StdRng::seed_from_u64(42);
    let lm: RnnLm<Backend> = RnnLmConfig::new(40, 8).init(&mut rng, &device).unwrap();
    let vocab = Vocab::new(["a", "b"], 0, &[]);

    let result = lm.predict("ab", 3, &vocab);

    assert!(matches!(
        result,
        Err(RnnError::ShapeMismatch {
            what: "vocabulary size",
            expected: 40,
            got: 3
        })
    ));
}

#[test]
fn test_predict_follows_argmax_of_logits() {
    let vocab = corpus_vocab();
    let lm = create_test_lm(&vocab, 3);
    let prefix = "time";
    let num_preds = 3;

    // Warm up on the whole prefix, then feed back the greedy choice each step
    let mut tokens = vocab.encode(tokenize_chars(prefix));
    let (mut logits, mut state) = lm.forward(&[tokens.clone()], None).unwrap();
    for _ in 0..num_preds {
        let last = logits.pop().unwrap();
        let next = last.argmax(1).into_scalar().elem::<i64>() as usize;
        tokens.push(next);
        let (step_logits, next_state) = lm.forward(&[vec![next]], state).unwrap();
        logits = step_logits;
        state = next_state;
    }
    let expected = vocab.decode(&tokens);

    let predicted = lm.predict(prefix, num_preds, &vocab).unwrap();

    assert_eq!(predicted.chars().count(), prefix.len() + num_preds);
    assert_eq!(predicted, expected);
}

#[test]
fn test_forward_logits_match_output_layer() {
    let vocab = corpus_vocab();
    let lm = create_test_lm(&vocab, 42);

    let tokens = vec![vocab.encode(tokenize_chars("time")), vocab.encode(tokenize_chars("trav"))];
    let (logits, state) = lm.forward(&tokens, None).unwrap();
    let state = state.unwrap();

    assert_eq!(logits.len(), 4);
    assert_eq!(state.dims(), [2, 32]);

    let expected = lm.output_layer(state).into_data().to_vec::<f32>().unwrap();
    let got = logits[3].clone().into_data().to_vec::<f32>().unwrap();
    assert_eq!(got, expected);
}
