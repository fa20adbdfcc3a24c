//! # Genesis Net
//!
//! Network discovery and topology analysis for organism networks.
//!
//! Discovery tracks peers as [`OrganismNode`]s and simulates the
//! handshake of a real transport. Topology mirrors the known peers
//! into an undirected graph and computes structural metrics over it.

/// Peer discovery and connection management
pub mod discovery;
/// Graph model of the organism network
pub mod topology;

pub use discovery::{NetworkDiscovery, NetworkError, NetworkStats, NodeStatus, OrganismNode};
pub use topology::{NetworkTopology, TopologyMetrics};
