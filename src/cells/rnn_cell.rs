use burn::config::Config;
use burn::module::{Module, Param};
use burn::tensor::backend::Backend;
use burn::tensor::{Tensor, TensorData};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::error::RnnError;

/// Configuration for [`RnnCell`].
///
/// Weights are drawn from `N(0, sigma²)` and the bias starts at zero.
#[derive(Config, Debug)]
pub struct RnnCellConfig {
    /// Number of input features per time step
    pub input_size: usize,
    /// Number of hidden units
    pub hidden_size: usize,
    /// Standard deviation of the weight initializer
    #[config(default = 0.01)]
    pub sigma: f64,
}

impl RnnCellConfig {
    /// Initialize a new [`RnnCell`].
    ///
    /// # Arguments
    /// * `rng` - Random state consumed once to draw the weights
    /// * `device` - Device to create the parameters on
    ///
    /// # Errors
    /// Returns [`RnnError::Init`] if `sigma` is not a usable standard deviation.
    pub fn init<B: Backend, R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        device: &B::Device,
    ) -> crate::error::Result<RnnCell<B>> {
        let normal = Normal::new(0.0, self.sigma)?;

        let w_xh = normal_matrix(&normal, rng, [self.input_size, self.hidden_size], device);
        let w_hh = normal_matrix(&normal, rng, [self.hidden_size, self.hidden_size], device);
        let b_h = Tensor::zeros([self.hidden_size], device);

        debug!(
            input_size = self.input_size,
            hidden_size = self.hidden_size,
            sigma = self.sigma,
            "initialized rnn cell parameters"
        );

        Ok(RnnCell {
            input_size: self.input_size,
            hidden_size: self.hidden_size,
            w_xh: Param::from_tensor(w_xh),
            w_hh: Param::from_tensor(w_hh),
            b_h: Param::from_tensor(b_h),
        })
    }
}

/// Tanh recurrent cell
///
/// Computes a single time step of
/// `h' = tanh(x @ W_xh + h @ W_hh + b_h)`.
///
/// The cell holds no state of its own; the hidden state is passed in and
/// returned by the caller on every step.
#[derive(Module, Debug)]
pub struct RnnCell<B: Backend> {
    input_size: usize,
    hidden_size: usize,
    w_xh: Param<Tensor<B, 2>>, // [input_size, hidden_size]
    w_hh: Param<Tensor<B, 2>>, // [hidden_size, hidden_size]
    b_h: Param<Tensor<B, 1>>,  // [hidden_size]
}

impl<B: Backend> RnnCell<B> {
    /// Build a cell from explicit parameter tensors.
    ///
    /// # Arguments
    /// * `w_xh` - Input-to-hidden weight of shape `[input_size, hidden_size]`
    /// * `w_hh` - Hidden-to-hidden weight of shape `[hidden_size, hidden_size]`
    /// * `b_h` - Hidden bias of shape `[hidden_size]`
    ///
    /// # Errors
    /// Returns [`RnnError::ShapeMismatch`] if `w_hh` or `b_h` disagree with the
    /// hidden size implied by `w_xh`.
    pub fn from_weights(w_xh: Tensor<B, 2>, w_hh: Tensor<B, 2>, b_h: Tensor<B, 1>) -> crate::error::Result<Self> {
        let [input_size, hidden_size] = w_xh.dims();
        let [hh_rows, hh_cols] = w_hh.dims();
        let [bias_len] = b_h.dims();

        if hh_rows != hidden_size {
            return Err(RnnError::shape("hidden-to-hidden weight rows", hidden_size, hh_rows));
        }
        if hh_cols != hidden_size {
            return Err(RnnError::shape("hidden-to-hidden weight columns", hidden_size, hh_cols));
        }
        if bias_len != hidden_size {
            return Err(RnnError::shape("hidden bias length", hidden_size, bias_len));
        }

        Ok(Self {
            input_size,
            hidden_size,
            w_xh: Param::from_tensor(w_xh),
            w_hh: Param::from_tensor(w_hh),
            b_h: Param::from_tensor(b_h),
        })
    }

    /// Get the input size
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Get the hidden size
    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Input-to-hidden weight `[input_size, hidden_size]`
    pub fn w_xh(&self) -> Tensor<B, 2> {
        self.w_xh.val()
    }

    /// Hidden-to-hidden weight `[hidden_size, hidden_size]`
    pub fn w_hh(&self) -> Tensor<B, 2> {
        self.w_hh.val()
    }

    /// Hidden bias `[hidden_size]`
    pub fn b_h(&self) -> Tensor<B, 1> {
        self.b_h.val()
    }

    /// All-zero hidden state for `batch_size` sequences.
    pub fn zero_state(&self, batch_size: usize, device: &B::Device) -> Tensor<B, 2> {
        Tensor::zeros([batch_size, self.hidden_size], device)
    }

    /// Check a step input (and optional previous state) against the cell's sizes.
    pub(crate) fn check_step(
        &self,
        input_dims: [usize; 2],
        state_dims: Option<[usize; 2]>,
    ) -> crate::error::Result<()> {
        let [batch_size, features] = input_dims;
        if features != self.input_size {
            return Err(RnnError::shape("input features", self.input_size, features));
        }

        if let Some([state_batch, state_hidden]) = state_dims {
            if state_hidden != self.hidden_size {
                return Err(RnnError::shape("hidden state width", self.hidden_size, state_hidden));
            }
            if state_batch != batch_size {
                return Err(RnnError::shape("hidden state batch", batch_size, state_batch));
            }
        }

        Ok(())
    }

    /// Perform one time step.
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape `[batch_size, input_size]`
    /// * `state` - Previous hidden state `[batch_size, hidden_size]`, or `None`
    ///   on the first step (treated as all zeros)
    ///
    /// # Returns
    /// The next hidden state of shape `[batch_size, hidden_size]`
    pub fn step(&self, input: Tensor<B, 2>, state: Option<Tensor<B, 2>>) -> crate::error::Result<Tensor<B, 2>> {
        self.check_step(input.dims(), state.as_ref().map(|s| s.dims()))?;

        let mut z = input.matmul(self.w_xh.val());
        if let Some(state) = state {
            z = z + state.matmul(self.w_hh.val());
        }
        let z = z + self.b_h.val().unsqueeze::<2>();

        Ok(z.tanh())
    }
}

/// Draw a `[rows, cols]` float tensor from `normal`.
pub(crate) fn normal_matrix<B: Backend, R: Rng + ?Sized>(
    normal: &Normal<f64>,
    rng: &mut R,
    shape: [usize; 2],
    device: &B::Device,
) -> Tensor<B, 2> {
    let values: Vec<f32> = (0..shape[0] * shape[1])
        .map(|_| normal.sample(rng) as f32)
        .collect();
    Tensor::from_data(TensorData::new(values, shape), device)
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::tensor::backend::Backend as BurnBackend;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type TestBackend = NdArray<f32>;
    type TestDevice = <TestBackend as BurnBackend>::Device;

    fn get_test_device() -> TestDevice {
        Default::default()
    }

    fn values(tensor: Tensor<TestBackend, 2>) -> Vec<f32> {
        tensor.into_data().to_vec::<f32>().unwrap()
    }

    #[test]
    fn test_rnn_cell_creation() {
        let device = get_test_device();
        let mut rng = StdRng::seed_from_u64(42);
        let cell = RnnCellConfig::new(20, 50)
            .init::<TestBackend, _>(&mut rng, &device)
            .unwrap();

        assert_eq!(cell.input_size(), 20);
        assert_eq!(cell.hidden_size(), 50);
        assert_eq!(cell.w_xh().dims(), [20, 50]);
        assert_eq!(cell.w_hh().dims(), [50, 50]);
        assert_eq!(cell.b_h().dims(), [50]);
    }

    #[test]
    fn test_rnn_cell_bias_starts_at_zero() {
        let device = get_test_device();
        let mut rng = StdRng::seed_from_u64(7);
        let cell = RnnCellConfig::new(4, 6)
            .init::<TestBackend, _>(&mut rng, &device)
            .unwrap();

        let bias_sum = cell.b_h().abs().sum().into_scalar();
        assert_eq!(bias_sum, 0.0);
    }

    #[test]
    fn test_rnn_cell_same_seed_same_weights() {
        let device = get_test_device();
        let config = RnnCellConfig::new(3, 5);

        let cell_a = config
            .init::<TestBackend, _>(&mut StdRng::seed_from_u64(1234), &device)
            .unwrap();
        let cell_b = config
            .init::<TestBackend, _>(&mut StdRng::seed_from_u64(1234), &device)
            .unwrap();

        assert_eq!(values(cell_a.w_xh()), values(cell_b.w_xh()));
        assert_eq!(values(cell_a.w_hh()), values(cell_b.w_hh()));
    }

    #[test]
    fn test_rnn_cell_sigma_scales_weights() {
        let device = get_test_device();
        let mut rng = StdRng::seed_from_u64(99);
        let cell = RnnCellConfig::new(16, 16)
            .with_sigma(0.01)
            .init::<TestBackend, _>(&mut rng, &device)
            .unwrap();

        // 512 draws from N(0, 0.01²) stay well inside ten standard deviations
        let max_abs = cell.w_xh().abs().max().into_scalar();
        assert!(max_abs < 0.1, "weights too large for sigma=0.01: {}", max_abs);
    }

    #[test]
    fn test_rnn_cell_rejects_nan_sigma() {
        let device = get_test_device();
        let mut rng = StdRng::seed_from_u64(0);
        let result = RnnCellConfig::new(2, 3)
            .with_sigma(f64::NAN)
            .init::<TestBackend, _>(&mut rng, &device);

        assert!(matches!(result, Err(RnnError::Init(_))));
    }

    #[test]
    fn test_rnn_cell_from_weights_checks_hidden_size() {
        let device = get_test_device();
        let w_xh = Tensor::<TestBackend, 2>::zeros([2, 3], &device);

        let bad_hh = Tensor::<TestBackend, 2>::zeros([3, 4], &device);
        let bias = Tensor::<TestBackend, 1>::zeros([3], &device);
        let result = RnnCell::from_weights(w_xh.clone(), bad_hh, bias);
        assert!(matches!(
            result,
            Err(RnnError::ShapeMismatch { expected: 3, got: 4, .. })
        ));

        let w_hh = Tensor::<TestBackend, 2>::zeros([3, 3], &device);
        let bad_bias = Tensor::<TestBackend, 1>::zeros([2], &device);
        let result = RnnCell::from_weights(w_xh, w_hh, bad_bias);
        assert!(matches!(
            result,
            Err(RnnError::ShapeMismatch { expected: 3, got: 2, .. })
        ));
    }

    #[test]
    fn test_rnn_cell_step_shape() {
        let device = get_test_device();
        let mut rng = StdRng::seed_from_u64(42);
        let cell = RnnCellConfig::new(20, 50)
            .init::<TestBackend, _>(&mut rng, &device)
            .unwrap();

        let input = Tensor::<TestBackend, 2>::ones([4, 20], &device);
        let first = cell.step(input.clone(), None).unwrap();
        let second = cell.step(input, Some(first.clone())).unwrap();

        assert_eq!(first.dims(), [4, 50]);
        assert_eq!(second.dims(), [4, 50]);
    }

    #[test]
    fn test_rnn_cell_step_rejects_state_batch_mismatch() {
        let device = get_test_device();
        let mut rng = StdRng::seed_from_u64(42);
        let cell = RnnCellConfig::new(2, 3)
            .init::<TestBackend, _>(&mut rng, &device)
            .unwrap();

        let input = Tensor::<TestBackend, 2>::ones([4, 2], &device);
        let state = Tensor::<TestBackend, 2>::zeros([5, 3], &device);
        let result = cell.step(input, Some(state));

        assert!(matches!(
            result,
            Err(RnnError::ShapeMismatch { what: "hidden state batch", .. })
        ));
    }

    #[test]
    fn test_rnn_cell_zero_state() {
        let device = get_test_device();
        let mut rng = StdRng::seed_from_u64(42);
        let cell = RnnCellConfig::new(2, 3)
            .init::<TestBackend, _>(&mut rng, &device)
            .unwrap();

        let state = cell.zero_state(4, &device);
        assert_eq!(state.dims(), [4, 3]);
        assert_eq!(state.abs().sum().into_scalar(), 0.0);
    }
}
