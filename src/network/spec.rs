use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::Result;
use crate::loss::loss_type::CostFunction;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;

/// A serializable description of a network architecture plus the
/// hyperparameters to train it with.
///
/// Only the configuration is stored; trained weights are never written out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name used as the file stem.
    pub name: String,
    /// Neurons per layer, input layer first.
    pub sizes: Vec<usize>,
    pub activation: ActivationFunction,
    pub cost: CostFunction,
    /// Hyperparameters for the batch step.
    pub optimizer: Sgd,
}

impl NetworkSpec {
    /// Builds a freshly initialized network with this architecture.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Network> {
        Network::new(&self.sizes, self.activation, self.cost, rng)
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> std::io::Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}
