//! Character-level RNN Language Model
//!
//! One-hot encoded tokens go through a [`SimpleRnn`] and every hidden state is
//! projected onto the vocabulary: `o = h @ W_hq + b_q`.

use crate::cells::rnn_cell::normal_matrix;
use crate::cells::RnnCellConfig;
use crate::error::RnnError;
use crate::rnn::simple::{SimpleRnn, StepOutputs};
use crate::text::{one_hot, Vocab};
use burn::config::Config;
use burn::module::{Module, Param};
use burn::tensor::backend::Backend;
use burn::tensor::{ElementConversion, Tensor};
use rand::Rng;
use rand_distr::Normal;
use tracing::debug;

/// Configuration for [`RnnLm`].
#[derive(Config, Debug)]
pub struct RnnLmConfig {
    /// Vocabulary size, which is also the one-hot input width
    pub vocab_size: usize,
    /// Number of hidden units
    pub hidden_size: usize,
    /// Standard deviation of every weight initializer
    #[config(default = 0.01)]
    pub sigma: f64,
}

impl RnnLmConfig {
    /// Initialize a new [`RnnLm`], drawing the recurrent weights first and the
    /// output projection second from the same `rng`.
    pub fn init<B: Backend, R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        device: &B::Device,
    ) -> crate::error::Result<RnnLm<B>> {
        let cell = RnnCellConfig::new(self.vocab_size, self.hidden_size)
            .with_sigma(self.sigma)
            .init(rng, device)?;

        let normal = Normal::new(0.0, self.sigma)?;
        let w_hq = normal_matrix(&normal, rng, [self.hidden_size, self.vocab_size], device);
        let b_q = Tensor::zeros([self.vocab_size], device);

        debug!(
            vocab_size = self.vocab_size,
            hidden_size = self.hidden_size,
            "initialized rnn language model"
        );

        Ok(RnnLm {
            rnn: SimpleRnn::new(cell),
            w_hq: Param::from_tensor(w_hq),
            b_q: Param::from_tensor(b_q),
            vocab_size: self.vocab_size,
        })
    }
}

/// RNN language model over one-hot token inputs
///
/// # Type Parameters
/// * `B` - The backend type
#[derive(Module, Debug)]
pub struct RnnLm<B: Backend> {
    rnn: SimpleRnn<B>,
    w_hq: Param<Tensor<B, 2>>, // [hidden_size, vocab_size]
    b_q: Param<Tensor<B, 1>>,  // [vocab_size]
    vocab_size: usize,
}

impl<B: Backend> RnnLm<B> {
    /// Get vocabulary size
    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    /// Get hidden size
    pub fn hidden_size(&self) -> usize {
        self.rnn.hidden_size()
    }

    /// The underlying sequence layer
    pub fn rnn(&self) -> &SimpleRnn<B> {
        &self.rnn
    }

    /// Project hidden states `[batch, hidden_size]` onto vocabulary logits `[batch, vocab_size]`.
    pub fn output_layer(&self, hidden: Tensor<B, 2>) -> Tensor<B, 2> {
        hidden.matmul(self.w_hq.val()) + self.b_q.val().unsqueeze::<2>()
    }

    /// Forward pass over token indices.
    ///
    /// # Arguments
    /// * `tokens` - Batch-major token indices, `tokens[b][t]`; every row has the same length
    /// * `state` - Optional initial hidden state `[batch, hidden_size]`
    ///
    /// # Returns
    /// Per-step logits `[batch, vocab_size]` in step order, and the final hidden state.
    ///
    /// # Errors
    /// [`RnnError::ShapeMismatch`] for rows of different length and
    /// [`RnnError::TokenOutOfRange`] for indices outside the vocabulary.
    pub fn forward(
        &self,
        tokens: &[Vec<usize>],
        state: Option<Tensor<B, 2>>,
    ) -> crate::error::Result<StepOutputs<B>> {
        let device = self.w_hq.val().device();
        let seq_len = tokens.first().map(Vec::len).unwrap_or(0);

        if let Some(row) = tokens.iter().find(|row| row.len() != seq_len) {
            return Err(RnnError::shape("token sequence length", seq_len, row.len()));
        }

        let steps = (0..seq_len)
            .map(|t| {
                let column: Vec<usize> = tokens.iter().map(|row| row[t]).collect();
                one_hot::<B>(&column, self.vocab_size, &device)
            })
            .collect::<crate::error::Result<Vec<_>>>()?;

        let (hidden_states, final_state) = self.rnn.forward_steps(steps, state)?;
        let logits = hidden_states
            .into_iter()
            .map(|hidden| self.output_layer(hidden))
            .collect();

        Ok((logits, final_state))
    }

    /// Continue `prefix` greedily for `num_preds` characters.
    ///
    /// The prefix is fed one character at a time to warm up the hidden state;
    /// after that each step appends the most likely next token.
    ///
    /// # Returns
    /// The prefix (as seen through `vocab`) followed by the generated characters.
    ///
    /// # Errors
    /// [`RnnError::ShapeMismatch`] if `vocab` does not have exactly `vocab_size`
    /// entries, [`RnnError::EmptyPrefix`] if `prefix` is empty.
    pub fn predict(&self, prefix: &str, num_preds: usize, vocab: &Vocab) -> crate::error::Result<String> {
        if vocab.len() != self.vocab_size {
            return Err(RnnError::shape("vocabulary size", self.vocab_size, vocab.len()));
        }

        let prefix_tokens: Vec<usize> = prefix
            .chars()
            .map(|c| vocab.index(c.encode_utf8(&mut [0u8; 4])))
            .collect();
        let mut current = *prefix_tokens.first().ok_or(RnnError::EmptyPrefix)?;

        debug!(prefix_len = prefix_tokens.len(), num_preds, "predicting continuation");

        let mut outputs = vec![current];
        let mut state = None;

        for i in 0..prefix_tokens.len() + num_preds - 1 {
            let (mut logits, next_state) = self.forward(&[vec![current]], state)?;
            state = next_state;

            current = match prefix_tokens.get(i + 1) {
                Some(&token) => token,
                None => {
                    let logits = logits.pop().ok_or(RnnError::EmptySequence)?;
                    let index: i64 = logits.argmax(1).into_scalar().elem();
                    index as usize
                }
            };
            outputs.push(current);
        }

        Ok(vocab.decode(&outputs))
    }
}
