use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("mutation probability {0} is not in the range [0, 1]")]
    InvalidMutationProbability(f64),
    #[error("unknown snake species: {0}")]
    UnknownSpecies(String),
    #[error("grid {width}x{height} is too small, both sides must be at least {minimum}")]
    GridTooSmall {
        width: usize,
        height: usize,
        minimum: usize,
    },
    #[error("grid {width}x{height} does not fit the coordinate space")]
    GridTooLarge { width: usize, height: usize },
    #[error("population of {0} is too small, at least 2 snakes are required")]
    PopulationTooSmall(usize),
}

#[derive(Debug, Error, PartialEq)]
pub enum NetworkError {
    #[error("network expects {expected} inputs, received {actual}")]
    InputSizeMismatch { expected: usize, actual: usize },
    #[error("network dimension is {expected}, state provides {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("network has {expected} layers, state provides {actual}")]
    LayerCountMismatch { expected: usize, actual: usize },
    #[error("layer {layer} has {expected} neurons, state provides {actual}")]
    NeuronCountMismatch {
        layer: usize,
        expected: usize,
        actual: usize,
    },
    #[error("neuron {neuron} in layer {layer} has {expected} inputs, state provides {actual} weights")]
    WeightCountMismatch {
        layer: usize,
        neuron: usize,
        expected: usize,
        actual: usize,
    },
    #[error("no network state has been set")]
    UninitializedState,
}

#[derive(Debug, Error, PartialEq)]
pub enum PitError {
    #[error("unable to spawn generation #{generation} without parents")]
    NoMatingPool { generation: u32 },
    #[error(transparent)]
    Network(#[from] NetworkError),
}
