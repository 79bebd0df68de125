//! Text preparation for the character language model.
//!
//! [`preprocess`] and [`tokenize_chars`] turn raw text into character tokens,
//! [`Vocab`] maps them to indices and [`one_hot`] turns index columns into
//! the float input the recurrent cell expects.

pub mod encoding;
pub mod vocab;

pub use encoding::{one_hot, one_hot_matrix, preprocess, tokenize_chars};
pub use vocab::{Vocab, UNK};
