//! # RNN Layers for Sequence Processing
//!
//! This module provides the layers that drive an [`RnnCell`](crate::cells::RnnCell)
//! across a sequence and manage the hidden state between steps.
//!
//! ## Available Layers
//!
//! | Layer | Description |
//! |-------|-------------|
//! | [`SimpleRnn`] | Tanh recurrence over step lists or stacked 3D input |
//! | [`RnnLm`] | One-hot tokens in, vocabulary logits out |
//!
//! ## Step Lists
//!
//! [`SimpleRnn::forward_steps`] takes one `[batch, features]` tensor per
//! timestep and returns the hidden state after each step plus the final state.
//! An empty list is valid and hands the initial state back untouched.
//!
//! ```ignore
//! let (states, last) = rnn.forward_steps(vec![x0, x1, x2], None)?;
//! assert_eq!(states.len(), 3);
//! ```
//!
//! ## Stacked Input
//!
//! | Format | Shape | Default |
//! |--------|-------|---------|
//! | Batch-first | `[batch, seq_len, features]` | ✓ Yes |
//! | Sequence-first | `[seq_len, batch, features]` | No |
//!
//! Output is always `[batch, seq_len, hidden_size]`.
//!
//! ```ignore
//! let rnn = SimpleRnn::new(cell).with_batch_first(false);
//! let (output, state) = rnn.forward(input, None)?;
//! ```
//!
//! ## Stateful Processing
//!
//! ```ignore
//! let (_, state) = rnn.forward(batch1, None)?;
//! let (_, state) = rnn.forward(batch2, Some(state))?;
//! ```
//!
//! ## Ragged Sequences
//!
//! Steps are not padded or masked. Every step in one call must share the same
//! batch size; anything else is a [`ShapeMismatch`](crate::RnnError::ShapeMismatch).

pub mod lm;
pub mod simple;

pub use lm::{RnnLm, RnnLmConfig};
pub use simple::{SimpleRnn, StepOutputs};
