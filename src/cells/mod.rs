//! # Recurrent Cell
//!
//! This module provides the single-timestep tanh recurrent cell. The cell
//! processes one timestep at a time and is wrapped by the sequence drivers in
//! [`crate::rnn`].
//!
//! ## Update Rule
//!
//! ```text
//! h' = tanh(x @ W_xh + h @ W_hh + b_h)
//! ```
//!
//! On the first step no previous state exists and the recurrent term is
//! dropped, which is the same as feeding an all-zero state.
//!
//! ## Tensor Shapes
//!
//! | Tensor | Shape | Description |
//! |--------|-------|-------------|
//! | `input` | `[batch, input_size]` | Input features |
//! | `state` | `[batch, hidden_size]` | Previous hidden state (optional) |
//! | `W_xh` | `[input_size, hidden_size]` | Input-to-hidden weight |
//! | `W_hh` | `[hidden_size, hidden_size]` | Hidden-to-hidden weight |
//! | `b_h` | `[hidden_size]` | Hidden bias |
//! | output | `[batch, hidden_size]` | Next hidden state |
//!
//! ## Example
//!
//! ```ignore
//! use scratch_rnn::cells::RnnCellConfig;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let cell = RnnCellConfig::new(16, 32).init::<Backend, _>(&mut rng, &device)?;
//!
//! let input: Tensor<Backend, 2> = /* [batch, 16] */;
//! let h1 = cell.step(input.clone(), None)?;
//! let h2 = cell.step(input, Some(h1))?;
//! ```

pub mod rnn_cell;

pub use rnn_cell::{RnnCell, RnnCellConfig};
