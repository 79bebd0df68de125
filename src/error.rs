//! Error type shared by every layer of the crate.

/// Errors raised by the recurrent cell, the sequence drivers and the text utilities.
///
/// All checks run before any tensor operation is issued, so a returned error
/// never leaves a half-computed hidden state behind.
#[derive(Debug, thiserror::Error)]
pub enum RnnError {
    /// A tensor dimension does not match what the cell was configured for.
    #[error("shape mismatch for {what}: expected {expected}, got {got}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// The stacked-sequence driver was handed a tensor with no time steps.
    #[error("input sequence has no time steps")]
    EmptySequence,

    /// A token index does not fit in the vocabulary.
    #[error("token index {token} out of range for vocabulary of size {vocab_size}")]
    TokenOutOfRange { token: usize, vocab_size: usize },

    /// Text generation needs at least one prefix character to seed the state.
    #[error("prediction prefix is empty")]
    EmptyPrefix,

    /// Parameter initialization was given an unusable standard deviation.
    #[error("invalid initialization distribution: {0}")]
    Init(#[from] rand_distr::NormalError),
}

impl RnnError {
    pub(crate) fn shape(what: &'static str, expected: usize, got: usize) -> Self {
        RnnError::ShapeMismatch {
            what,
            expected,
            got,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RnnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_message() {
        let err = RnnError::shape("input features", 2, 5);
        assert_eq!(
            err.to_string(),
            "shape mismatch for input features: expected 2, got 5"
        );
    }

    #[test]
    fn test_init_error_from_normal() {
        let normal_err = rand_distr::Normal::<f64>::new(0.0, f64::NAN).unwrap_err();
        let err: RnnError = normal_err.into();
        assert!(matches!(err, RnnError::Init(_)));
    }
}
