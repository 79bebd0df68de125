//! Character preprocessing and one-hot encoding.

use burn::tensor::backend::Backend;
use burn::tensor::{Tensor, TensorData};
use ndarray::Array2;

use crate::error::{Result, RnnError};

/// Lowercase `text` and collapse every run of non-letters into one space.
pub fn preprocess(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_gap = false;

    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            out.push(c.to_ascii_lowercase());
            in_gap = false;
        } else if !in_gap {
            out.push(' ');
            in_gap = true;
        }
    }

    out
}

/// Split `text` into one token per character.
pub fn tokenize_chars(text: &str) -> Vec<String> {
    text.chars().map(String::from).collect()
}

/// One-hot rows on the host: `[indices.len(), depth]` with a single 1 per row.
///
/// # Errors
/// [`RnnError::TokenOutOfRange`] if any index is `>= depth`.
pub fn one_hot_matrix(indices: &[usize], depth: usize) -> Result<Array2<f32>> {
    let mut matrix = Array2::zeros((indices.len(), depth));

    for (row, &index) in indices.iter().enumerate() {
        if index >= depth {
            return Err(RnnError::TokenOutOfRange {
                token: index,
                vocab_size: depth,
            });
        }
        matrix[[row, index]] = 1.0;
    }

    Ok(matrix)
}

/// One-hot encode `indices` into a `[indices.len(), depth]` float tensor.
pub fn one_hot<B: Backend>(
    indices: &[usize],
    depth: usize,
    device: &B::Device,
) -> Result<Tensor<B, 2>> {
    let matrix = one_hot_matrix(indices, depth)?;
    let shape = [matrix.nrows(), matrix.ncols()];
    let data: Vec<f32> = matrix.iter().copied().collect();

    Ok(Tensor::from_data(TensorData::new(data, shape), device))
}
