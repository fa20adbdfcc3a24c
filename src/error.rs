//! Protocol-level error type.
//!
//! Engine crates keep their own error enums; this type folds them into
//! one surface for the facade and the binary.

use genesis_core::collective::CollectiveError;
use genesis_core::dna::DnaError;
use genesis_core::evolution::EvolutionError;
use genesis_core::neural::NeuralError;
use genesis_core::organism::OrganismError;
use genesis_net::NetworkError;

#[derive(Debug, thiserror::Error)]
pub enum GenesisError {
    #[error("organism not found: {0}")]
    OrganismNotFound(String),
    #[error("organism capacity reached ({0})")]
    CapacityReached(usize),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("snapshot written by protocol version {0}")]
    SnapshotVersionMismatch(String),
    #[error(transparent)]
    Organism(#[from] OrganismError),
    #[error(transparent)]
    Dna(#[from] DnaError),
    #[error(transparent)]
    Neural(#[from] NeuralError),
    #[error(transparent)]
    Evolution(#[from] EvolutionError),
    #[error(transparent)]
    Collective(#[from] CollectiveError),
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}
