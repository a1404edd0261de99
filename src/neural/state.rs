use crate::error::NetworkError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Detached snapshot of every weight and bias in a network.
///
/// Parameters live in one contiguous buffer ordered layer by layer, neuron by neuron,
/// each neuron contributing its weights followed by its bias. The crossover operator
/// splits this buffer at a pivot, so the order is part of the contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkState {
    inputs: usize,
    layer_sizes: Vec<usize>,
    params: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub layer: usize,
    pub neuron: usize,
    pub param: Param,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    Weight(usize),
    Bias,
}

impl NetworkState {
    pub fn zeroed(inputs: usize, layer_sizes: &[usize]) -> Self {
        let dimension = Self::dimension_of(inputs, layer_sizes);
        Self {
            inputs,
            layer_sizes: layer_sizes.to_vec(),
            params: vec![0.0; dimension],
        }
    }

    pub fn from_flat(
        inputs: usize,
        layer_sizes: &[usize],
        params: Vec<f64>,
    ) -> Result<Self, NetworkError> {
        let expected = Self::dimension_of(inputs, layer_sizes);
        if params.len() != expected {
            return Err(NetworkError::DimensionMismatch {
                expected,
                actual: params.len(),
            });
        }

        Ok(Self {
            inputs,
            layer_sizes: layer_sizes.to_vec(),
            params,
        })
    }

    /// Build a state from `[layer][neuron][input]` weights and `[layer][neuron]` biases.
    ///
    /// The input count is taken from the first neuron; every layer must be fully
    /// connected to the one before it.
    pub fn from_nested(
        weights: &[Vec<Vec<f64>>],
        bias: &[Vec<f64>],
    ) -> Result<Self, NetworkError> {
        if bias.len() != weights.len() {
            return Err(NetworkError::LayerCountMismatch {
                expected: weights.len(),
                actual: bias.len(),
            });
        }

        let inputs = weights
            .first()
            .and_then(|layer| layer.first())
            .map(|neuron| neuron.len())
            .unwrap_or(0);

        let layer_sizes: Vec<usize> = weights.iter().map(|layer| layer.len()).collect();
        let mut params = Vec::with_capacity(Self::dimension_of(inputs, &layer_sizes));
        let mut fan_in = inputs;

        for (layer, (layer_weights, layer_bias)) in weights.iter().zip(bias).enumerate() {
            if layer_bias.len() != layer_weights.len() {
                return Err(NetworkError::NeuronCountMismatch {
                    layer,
                    expected: layer_weights.len(),
                    actual: layer_bias.len(),
                });
            }

            for (neuron, (neuron_weights, &neuron_bias)) in
                layer_weights.iter().zip(layer_bias).enumerate()
            {
                if neuron_weights.len() != fan_in {
                    return Err(NetworkError::WeightCountMismatch {
                        layer,
                        neuron,
                        expected: fan_in,
                        actual: neuron_weights.len(),
                    });
                }
                params.extend_from_slice(neuron_weights);
                params.push(neuron_bias);
            }

            fan_in = layer_weights.len();
        }

        Ok(Self {
            inputs,
            layer_sizes,
            params,
        })
    }

    pub fn dimension_of(inputs: usize, layer_sizes: &[usize]) -> usize {
        let mut fan_in = inputs;
        let mut dimension = 0;
        for &size in layer_sizes {
            dimension += size * (fan_in + 1);
            fan_in = size;
        }
        dimension
    }

    pub fn dimension(&self) -> usize {
        self.params.len()
    }

    pub fn inputs(&self) -> usize {
        self.inputs
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    pub fn fan_in(&self, layer: usize) -> Option<usize> {
        if layer >= self.layer_sizes.len() {
            return None;
        }
        Some(match layer {
            0 => self.inputs,
            _ => self.layer_sizes[layer - 1],
        })
    }

    pub fn same_shape(&self, other: &NetworkState) -> bool {
        self.inputs == other.inputs && self.layer_sizes == other.layer_sizes
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.params
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.params
    }

    pub fn weights(&self, layer: usize, neuron: usize) -> Option<&[f64]> {
        let start = self.neuron_offset(layer, neuron)?;
        self.params.get(start..start + self.fan_in(layer)?)
    }

    pub fn bias(&self, layer: usize, neuron: usize) -> Option<f64> {
        let start = self.neuron_offset(layer, neuron)?;
        self.params.get(start + self.fan_in(layer)?).copied()
    }

    /// Flat index of a parameter, or `None` if the slot lies outside this topology.
    pub fn index_of(&self, slot: Slot) -> Option<usize> {
        let start = self.neuron_offset(slot.layer, slot.neuron)?;
        let fan_in = self.fan_in(slot.layer)?;
        let offset = match slot.param {
            Param::Weight(i) if i < fan_in => i,
            Param::Weight(_) => return None,
            Param::Bias => fan_in,
        };

        Some(start + offset)
    }

    pub fn locate(&self, index: usize) -> Option<Slot> {
        let mut remaining = index;
        for (layer, &size) in self.layer_sizes.iter().enumerate() {
            let stride = self.fan_in(layer)? + 1;
            let span = stride * size;
            if remaining < span {
                let neuron = remaining / stride;
                let within = remaining % stride;
                let param = if within == stride - 1 {
                    Param::Bias
                } else {
                    Param::Weight(within)
                };
                return Some(Slot {
                    layer,
                    neuron,
                    param,
                });
            }
            remaining -= span;
        }
        None
    }

    #[cfg(test)]
    pub fn to_nested(&self) -> (Vec<Vec<Vec<f64>>>, Vec<Vec<f64>>) {
        let mut weights = Vec::with_capacity(self.layer_sizes.len());
        let mut bias = Vec::with_capacity(self.layer_sizes.len());
        let mut rest = self.params.as_slice();
        let mut fan_in = self.inputs;

        for &size in &self.layer_sizes {
            let (layer, tail) = rest.split_at(size * (fan_in + 1));
            weights.push(layer.chunks(fan_in + 1).map(|n| n[..fan_in].to_vec()).collect());
            bias.push(layer.chunks(fan_in + 1).map(|n| n[fan_in]).collect());
            rest = tail;
            fan_in = size;
        }

        (weights, bias)
    }

    fn neuron_offset(&self, layer: usize, neuron: usize) -> Option<usize> {
        if neuron >= *self.layer_sizes.get(layer)? {
            return None;
        }
        let preceding = Self::dimension_of(self.inputs, &self.layer_sizes[..layer]);
        Some(preceding + neuron * (self.fan_in(layer)? + 1))
    }
}

impl fmt::Display for NetworkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fan_in = self.inputs;
        for (layer, &size) in self.layer_sizes.iter().enumerate() {
            writeln!(
                f,
                "Layer #{}, {} Neurons [{}i, {}w, 1b]",
                layer, size, fan_in, fan_in
            )?;
            fan_in = size;
        }
        write!(f, "Total Weights and Biases: {}", self.dimension())
    }
}
