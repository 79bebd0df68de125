//! Simple tanh RNN Layer
//!
//! Sequence driver that folds an [`RnnCell`] over the time axis and manages
//! the hidden state between steps.

use crate::cells::RnnCell;
use crate::error::{Result, RnnError};
use burn::module::Module;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use tracing::debug;

/// One `[batch, width]` tensor per step plus the final hidden state.
///
/// [`SimpleRnn`] fills the vector with hidden states, [`RnnLm`](crate::rnn::RnnLm)
/// with vocabulary logits.
///
/// The final state is `None` only when no steps ran and no initial state was given.
pub type StepOutputs<B> = (Vec<Tensor<B, 2>>, Option<Tensor<B, 2>>);

/// Simple RNN Layer
///
/// Processes sequences with a single [`RnnCell`]. The hidden state is owned by
/// the caller: it is passed in, threaded through the steps, and handed back.
///
/// # Type Parameters
/// * `B` - The backend type
#[derive(Module, Debug)]
pub struct SimpleRnn<B: Backend> {
    /// The cell applied at every timestep
    cell: RnnCell<B>,
    /// Whether stacked input is batch-first
    batch_first: bool,
}

impl<B: Backend> SimpleRnn<B> {
    /// Wrap a cell into a sequence layer (batch-first by default)
    pub fn new(cell: RnnCell<B>) -> Self {
        Self {
            cell,
            batch_first: true,
        }
    }

    /// Set whether stacked input is batch-first (default: true)
    pub fn with_batch_first(mut self, batch_first: bool) -> Self {
        self.batch_first = batch_first;
        self
    }

    /// The wrapped cell
    pub fn cell(&self) -> &RnnCell<B> {
        &self.cell
    }

    /// Get input size
    pub fn input_size(&self) -> usize {
        self.cell.input_size()
    }

    /// Get hidden size
    pub fn hidden_size(&self) -> usize {
        self.cell.hidden_size()
    }

    /// Whether stacked input is batch-first
    pub fn batch_first(&self) -> bool {
        self.batch_first
    }

    /// Run the recurrence over an ordered list of step inputs.
    ///
    /// # Arguments
    /// * `inputs` - One `[batch, input_size]` tensor per timestep, in order
    /// * `state` - Optional initial hidden state `[batch, hidden_size]`
    ///
    /// # Returns
    /// The hidden state after every step, in step order, and the final state.
    /// With no steps the initial state is handed back untouched.
    ///
    /// # Errors
    /// Every step shares one batch size; ragged or mis-sized steps are rejected
    /// with [`RnnError::ShapeMismatch`] before any step is computed.
    pub fn forward_steps(
        &self,
        inputs: Vec<Tensor<B, 2>>,
        state: Option<Tensor<B, 2>>,
    ) -> Result<StepOutputs<B>> {
        let state_dims = state.as_ref().map(|s| s.dims());
        let batch_size = state_dims
            .map(|[batch, _]| batch)
            .or_else(|| inputs.first().map(|x| x.dims()[0]));

        for input in &inputs {
            let dims = input.dims();
            if let Some(batch_size) = batch_size {
                if dims[0] != batch_size {
                    return Err(RnnError::shape("step batch size", batch_size, dims[0]));
                }
            }
            self.cell.check_step(dims, state_dims)?;
        }

        debug!(
            seq_len = inputs.len(),
            batch_size = batch_size.unwrap_or(0),
            hidden_size = self.cell.hidden_size(),
            "running rnn over sequence"
        );

        let mut current_state = state;
        let mut outputs: Vec<Tensor<B, 2>> = Vec::with_capacity(inputs.len());

        for input in inputs {
            let next_state = self.cell.step(input, current_state.take())?;
            outputs.push(next_state.clone());
            current_state = Some(next_state);
        }

        Ok((outputs, current_state))
    }

    /// Run the recurrence over a stacked 3D input.
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape:
    ///   - `[batch, seq, features]` if batch_first=true
    ///   - `[seq, batch, features]` if batch_first=false
    /// * `state` - Optional initial hidden state of shape `[batch, hidden_size]`
    ///
    /// # Returns
    /// Tuple of (output, final_state) where:
    /// - output: `[batch, seq, hidden_size]`
    /// - final_state: `[batch, hidden_size]`
    ///
    /// # Errors
    /// [`RnnError::EmptySequence`] when the time axis is empty, otherwise the
    /// same shape checks as [`SimpleRnn::forward_steps`].
    pub fn forward(
        &self,
        input: Tensor<B, 3>,
        state: Option<Tensor<B, 2>>,
    ) -> Result<(Tensor<B, 3>, Tensor<B, 2>)> {
        let [d0, d1, _] = input.dims();
        let (time_axis, seq_len) = if self.batch_first { (1, d1) } else { (0, d0) };

        if seq_len == 0 {
            return Err(RnnError::EmptySequence);
        }

        let steps: Vec<Tensor<B, 2>> = (0..seq_len)
            .map(|t| {
                input
                    .clone()
                    .narrow(time_axis, t, 1)
                    .squeeze::<2>(time_axis)
            })
            .collect();

        let (outputs, final_state) = self.forward_steps(steps, state)?;
        let final_state = final_state.ok_or(RnnError::EmptySequence)?;

        let output = Tensor::stack::<3>(outputs, 1); // [batch, seq, hidden_size]
        Ok((output, final_state))
    }
}
