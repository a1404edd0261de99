pub mod activation;
pub mod neural_net;
pub mod state;

pub use activation::Activation;
pub use neural_net::NeuralNetwork;
pub use state::NetworkState;
