use super::activation::Activation;
use super::state::NetworkState;
use crate::error::NetworkError;
use rand::Rng;

#[derive(Debug, Clone)]
pub struct Neuron {
    weights: Vec<f64>,
    bias: f64,
    activation: Activation,
}

impl Neuron {
    fn new(fan_in: usize, activation: Activation) -> Self {
        Self {
            weights: vec![0.0; fan_in],
            bias: 0.0,
            activation,
        }
    }

    fn think(&self, inputs: &[f64]) -> f64 {
        let sum: f64 = self
            .weights
            .iter()
            .zip(inputs)
            .map(|(weight, input)| weight * input)
            .sum();
        self.activation.apply(self.bias + sum)
    }

    fn load(&mut self, weights: &[f64], bias: f64) {
        self.weights.copy_from_slice(weights);
        self.bias = bias;
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }
}

/// Fully connected feed-forward network with a fixed topology.
///
/// Hidden layers are sized by `hidden_sizes`, the final layer has `output_size` neurons
/// and every neuron carries one bias. Weights stay unset until a state is loaded.
#[derive(Debug, Clone)]
pub struct NeuralNetwork {
    activation: Activation,
    input_size: usize,
    layer_sizes: Vec<usize>,
    layers: Vec<Vec<Neuron>>,
    dimension: usize,
    state: Option<NetworkState>,
}

impl NeuralNetwork {
    pub fn new(
        activation: Activation,
        input_size: usize,
        output_size: usize,
        hidden_sizes: &[usize],
    ) -> Self {
        let mut layer_sizes = hidden_sizes.to_vec();
        layer_sizes.push(output_size);

        let mut fan_in = input_size;
        let mut layers = Vec::with_capacity(layer_sizes.len());
        for &size in &layer_sizes {
            layers.push((0..size).map(|_| Neuron::new(fan_in, activation)).collect());
            fan_in = size;
        }

        let dimension = NetworkState::dimension_of(input_size, &layer_sizes);
        log::debug!(
            "Created network: {} inputs, layers {:?}, activation {}, dimension {}",
            input_size,
            layer_sizes,
            activation.description(),
            dimension
        );

        Self {
            activation,
            input_size,
            layer_sizes,
            layers,
            dimension,
            state: None,
        }
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.layer_sizes.last().copied().unwrap_or(0)
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn neuron(&self, layer: usize, neuron: usize) -> Option<&Neuron> {
        self.layers.get(layer)?.get(neuron)
    }

    pub fn think(&self, inputs: &[f64]) -> Result<Vec<f64>, NetworkError> {
        if inputs.len() != self.input_size {
            return Err(NetworkError::InputSizeMismatch {
                expected: self.input_size,
                actual: inputs.len(),
            });
        }
        if self.state.is_none() {
            return Err(NetworkError::UninitializedState);
        }

        let mut signal = inputs.to_vec();
        for layer in &self.layers {
            signal = layer.iter().map(|neuron| neuron.think(&signal)).collect();
        }

        Ok(signal)
    }

    /// Load every weight and bias from `state`.
    ///
    /// The state must mirror this network's topology exactly; on mismatch the
    /// network is left untouched.
    pub fn set_state(&mut self, state: &NetworkState) -> Result<(), NetworkError> {
        self.check_shape(state)?;
        self.load(state);
        self.state = Some(state.clone());
        Ok(())
    }

    pub fn set_random_state<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut state = NetworkState::zeroed(self.input_size, &self.layer_sizes);
        for param in state.as_mut_slice() {
            *param = rng.gen_range(-1.0..=1.0);
        }

        self.load(&state);
        self.state = Some(state);
    }

    fn load(&mut self, state: &NetworkState) {
        for (l, layer) in self.layers.iter_mut().enumerate() {
            for (n, neuron) in layer.iter_mut().enumerate() {
                if let (Some(weights), Some(bias)) = (state.weights(l, n), state.bias(l, n)) {
                    neuron.load(weights, bias);
                }
            }
        }
    }

    pub fn state(&self) -> Result<&NetworkState, NetworkError> {
        self.state.as_ref().ok_or(NetworkError::UninitializedState)
    }

    pub fn has_state(&self) -> bool {
        self.state.is_some()
    }

    fn check_shape(&self, state: &NetworkState) -> Result<(), NetworkError> {
        if state.dimension() != self.dimension {
            return Err(NetworkError::DimensionMismatch {
                expected: self.dimension,
                actual: state.dimension(),
            });
        }

        let sizes = state.layer_sizes();
        if sizes.len() != self.layer_sizes.len() {
            return Err(NetworkError::LayerCountMismatch {
                expected: self.layer_sizes.len(),
                actual: sizes.len(),
            });
        }

        for (layer, (&expected, &actual)) in self.layer_sizes.iter().zip(sizes).enumerate() {
            if expected != actual {
                return Err(NetworkError::NeuronCountMismatch {
                    layer,
                    expected,
                    actual,
                });
            }
        }

        if state.inputs() != self.input_size {
            return Err(NetworkError::WeightCountMismatch {
                layer: 0,
                neuron: 0,
                expected: self.input_size,
                actual: state.inputs(),
            });
        }

        Ok(())
    }
}
