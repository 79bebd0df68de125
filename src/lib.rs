//! # scratch-rnn
//!
//! A from-scratch tanh recurrent network built on the Burn framework.
//!
//! ## Features
//!
//! - **RnnCell**: one step of `h' = tanh(x @ W_xh + h @ W_hh + b_h)`
//! - **SimpleRnn**: sequence driver over step lists or stacked 3D tensors
//! - **RnnLm**: character language model with an output projection and greedy prediction
//! - **Text utilities**: preprocessing, character tokens, vocabulary, one-hot encoding
//! - **Seeded initialization**: parameters drawn from an explicit `rand::Rng`
//!
//! ## Quick Start
//!
//! ```rust
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//! use rand::{rngs::StdRng, SeedableRng};
//! use scratch_rnn::prelude::*;
//!
//! type Backend = NdArray<f32>;
//! let device = Default::default();
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let cell = RnnCellConfig::new(16, 32)
//!     .init::<Backend, _>(&mut rng, &device)
//!     .unwrap();
//! let rnn = SimpleRnn::new(cell);
//!
//! let input = Tensor::<Backend, 3>::zeros([4, 10, 16], &device);
//! let (output, state) = rnn.forward(input, None).unwrap();
//!
//! assert_eq!(output.dims(), [4, 10, 32]);
//! assert_eq!(state.dims(), [4, 32]);
//! ```

pub mod cells;
pub mod error;
pub mod rnn;
pub mod text;

pub use error::{Result, RnnError};

pub mod prelude {
    pub use crate::cells::{RnnCell, RnnCellConfig};
    pub use crate::error::{Result, RnnError};
    pub use crate::rnn::{RnnLm, RnnLmConfig, SimpleRnn};
    pub use crate::text::{one_hot, preprocess, tokenize_chars, Vocab};
}
