//! # Genesis
//!
//! A digital-life protocol engine. Organisms carry cryptographic DNA,
//! communicate over simulated synapses, evolve under selection
//! pressure, and make collective decisions. [`GenesisProtocol`] is the
//! facade over the whole engine; the `genesis_core` and `genesis_net`
//! crates hold the organism engine and the network layer.
//!
//! ## Example
//!
//! ```
//! use genesis_lib::{GenesisConfig, GenesisProtocol};
//!
//! let mut config = GenesisConfig::default();
//! config.protocol.seed = Some(42);
//!
//! let mut protocol = GenesisProtocol::new(config)?;
//! let alpha = protocol.create_organism(None)?;
//! let beta = protocol.create_organism(None)?;
//! protocol.connect_organisms(&alpha, &beta)?;
//!
//! assert_eq!(protocol.network_stats().total_organisms, 2);
//! # Ok::<(), genesis_lib::GenesisError>(())
//! ```

/// Staged console demonstration
pub mod demo;
/// Protocol-level error type
pub mod error;
/// Gzip JSON snapshot persistence
pub mod persistence;
/// The protocol facade
pub mod protocol;

pub use error::GenesisError;
pub use protocol::{GenesisProtocol, NetworkStats, ProtocolInfo};

pub use genesis_core::config::GenesisConfig;
pub use genesis_core::dna::DigitalDna;
pub use genesis_core::metrics::init_logging;
pub use genesis_core::neural::{MessageType, Neurotransmitter};
pub use genesis_core::organism::{LifecycleState, Organism, VitalSigns};
pub use genesis_core::PROTOCOL_VERSION;
pub use genesis_net::{NetworkDiscovery, NetworkTopology};
