//! Peer discovery and connection management.
//!
//! Discovery is simulated over loopback: each round finds a handful of
//! peers, records them as [`OrganismNode`]s, and mirrors them into the
//! topology graph. The shape of the API matches what a real transport
//! would need, so only the probe internals would change.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;

use genesis_core::clock;
use genesis_core::config::NetworkConfig;

use crate::topology::NetworkTopology;

/// Network-layer errors.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("organism not found: {0}")]
    OrganismNotFound(String),
    #[error("organism offline: {0}")]
    OrganismOffline(String),
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Status of a known peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeStatus {
    Online,
    Offline,
    Connecting,
    Disconnecting,
    Maintenance,
    Degraded,
}

/// Capabilities advertised by a peer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeCapabilities {
    pub max_organisms: usize,
    pub max_connections: usize,
    pub protocols: Vec<String>,
    pub computing_power: f64,
    pub memory_capacity: u64,
    pub bandwidth: u64,
}

impl Default for NodeCapabilities {
    fn default() -> Self {
        Self {
            max_organisms: 100,
            max_connections: 1000,
            protocols: vec!["genesis-neural".to_string()],
            computing_power: 1.0,
            memory_capacity: 1_000_000_000,
            bandwidth: 100_000_000,
        }
    }
}

/// A peer known to the discovery layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganismNode {
    pub organism_id: String,
    pub address: SocketAddr,
    pub capabilities: NodeCapabilities,
    pub status: NodeStatus,
    pub last_seen: u64,
    pub connection_quality: f64,
    pub trust_level: f64,
}

/// Discovery-layer counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryMetrics {
    pub total_discovered: usize,
    pub active_connections: usize,
    pub failed_connections: u64,
}

/// Point-in-time network summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkStats {
    pub total_organisms: usize,
    pub online_organisms: usize,
    pub total_connections: usize,
    /// Mean of availability and average connection quality.
    pub network_health: f64,
    pub average_connection_quality: f64,
}

/// Tracks known peers and the graph between them.
#[derive(Debug, Clone)]
pub struct NetworkDiscovery {
    pub known_organisms: HashMap<String, OrganismNode>,
    pub topology: NetworkTopology,
    pub metrics: DiscoveryMetrics,
    config: NetworkConfig,
}

impl NetworkDiscovery {
    #[must_use]
    pub fn new(config: NetworkConfig) -> Self {
        Self {
            known_organisms: HashMap::new(),
            topology: NetworkTopology::new(),
            metrics: DiscoveryMetrics::default(),
            config,
        }
    }

    /// Runs one discovery round, returning the ids of newly found
    /// peers. Finds one to five peers per round on loopback ports
    /// starting at the configured default port.
    pub async fn discover_organisms(
        &mut self,
        rng: &mut impl Rng,
    ) -> Result<Vec<String>, NetworkError> {
        let mut discovered = Vec::new();
        let count = rng.gen_range(1..=5usize);

        for i in 0..count {
            let organism_id = format!("peer_{}", self.known_organisms.len() + i);
            let port = self.config.default_port + (self.known_organisms.len() + i) as u16;
            let address: SocketAddr = format!("127.0.0.1:{port}")
                .parse()
                .map_err(|_| NetworkError::InvalidAddress(format!("127.0.0.1:{port}")))?;

            self.known_organisms.insert(
                organism_id.clone(),
                OrganismNode {
                    organism_id: organism_id.clone(),
                    address,
                    capabilities: NodeCapabilities::default(),
                    status: NodeStatus::Online,
                    last_seen: clock::unix_secs(),
                    connection_quality: 0.8,
                    trust_level: 0.5,
                },
            );
            discovered.push(organism_id);
        }

        self.metrics.total_discovered = self.known_organisms.len();
        tracing::debug!(found = discovered.len(), "discovery round complete");
        Ok(discovered)
    }

    /// Registers a locally created organism as an online peer.
    pub fn register_local(&mut self, organism_id: &str) {
        let port = self.config.default_port;
        let address: SocketAddr = format!("127.0.0.1:{port}").parse().unwrap_or_else(|_| {
            SocketAddr::from(([127, 0, 0, 1], port))
        });
        self.known_organisms.insert(
            organism_id.to_string(),
            OrganismNode {
                organism_id: organism_id.to_string(),
                address,
                capabilities: NodeCapabilities::default(),
                status: NodeStatus::Online,
                last_seen: clock::unix_secs(),
                connection_quality: 1.0,
                trust_level: 1.0,
            },
        );
        self.metrics.total_discovered = self.known_organisms.len();
    }

    /// Connects to a known peer, passing through the `Connecting`
    /// state and recording the edge in the topology.
    pub async fn connect_to_organism(&mut self, organism_id: &str) -> Result<(), NetworkError> {
        let Some(organism) = self.known_organisms.get_mut(organism_id) else {
            return Err(NetworkError::OrganismNotFound(organism_id.to_string()));
        };
        if organism.status == NodeStatus::Offline {
            self.metrics.failed_connections += 1;
            return Err(NetworkError::OrganismOffline(organism_id.to_string()));
        }

        organism.status = NodeStatus::Connecting;
        // Simulated handshake.
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
        organism.status = NodeStatus::Online;
        organism.connection_quality = 0.9;
        organism.last_seen = clock::unix_secs();

        self.metrics.active_connections += 1;
        self.topology.add_node(organism_id);
        Ok(())
    }

    /// Records a peer-to-peer link in the topology graph.
    pub fn record_link(&mut self, a: &str, b: &str) {
        let quality = match (self.known_organisms.get(a), self.known_organisms.get(b)) {
            (Some(na), Some(nb)) => (na.connection_quality + nb.connection_quality) / 2.0,
            _ => 0.5,
        };
        self.topology.connect(a, b, quality);
    }

    /// Refreshes graph vertices from known peers and recomputes the
    /// topology metrics.
    pub fn update_topology(&mut self) {
        let ids: Vec<String> = self.known_organisms.keys().cloned().collect();
        for id in ids {
            self.topology.add_node(&id);
        }
        self.topology.calculate_metrics();
    }

    /// Whether a peer's trust clears the configured threshold.
    #[must_use]
    pub fn is_trusted(&self, organism_id: &str) -> bool {
        self.known_organisms
            .get(organism_id)
            .is_some_and(|o| o.trust_level >= self.config.trust_threshold)
    }

    #[must_use]
    pub fn network_stats(&self) -> NetworkStats {
        let total = self.known_organisms.len();
        let online = self
            .known_organisms
            .values()
            .filter(|o| o.status == NodeStatus::Online)
            .count();
        let average_quality = if total == 0 {
            0.0
        } else {
            self.known_organisms
                .values()
                .map(|o| o.connection_quality)
                .sum::<f64>()
                / total as f64
        };
        let health = if total == 0 {
            0.0
        } else {
            (online as f64 / total as f64 + average_quality) / 2.0
        };

        NetworkStats {
            total_organisms: total,
            online_organisms: online,
            total_connections: self.topology.edge_count(),
            network_health: health,
            average_connection_quality: average_quality,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn discovery() -> NetworkDiscovery {
        NetworkDiscovery::new(NetworkConfig::default())
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(3)
    }

    #[test]
    fn test_new_discovery_is_empty() {
        let discovery = discovery();
        assert!(discovery.known_organisms.is_empty());
        assert_eq!(discovery.topology.node_count(), 0);
    }

    #[tokio::test]
    async fn test_discovery_round_finds_peers() {
        let mut discovery = discovery();
        let found = discovery.discover_organisms(&mut rng()).await.unwrap();

        assert!((1..=5).contains(&found.len()));
        assert_eq!(discovery.known_organisms.len(), found.len());
        assert_eq!(discovery.metrics.total_discovered, found.len());
        for id in &found {
            assert_eq!(discovery.known_organisms[id].status, NodeStatus::Online);
        }
    }

    #[tokio::test]
    async fn test_connect_transitions_to_online() {
        let mut discovery = discovery();
        let mut rng = rng();
        let found = discovery.discover_organisms(&mut rng).await.unwrap();
        let target = &found[0];

        discovery.connect_to_organism(target).await.unwrap();
        let peer = &discovery.known_organisms[target];
        assert_eq!(peer.status, NodeStatus::Online);
        assert!((peer.connection_quality - 0.9).abs() < 1e-9);
        assert_eq!(discovery.metrics.active_connections, 1);
    }

    #[tokio::test]
    async fn test_connect_unknown_peer() {
        let mut discovery = discovery();
        let err = discovery.connect_to_organism("peer_missing").await.unwrap_err();
        assert!(matches!(err, NetworkError::OrganismNotFound(_)));
    }

    #[tokio::test]
    async fn test_connect_offline_peer_counts_failure() {
        let mut discovery = discovery();
        discovery.register_local("org_1");
        discovery.known_organisms.get_mut("org_1").unwrap().status = NodeStatus::Offline;

        let err = discovery.connect_to_organism("org_1").await.unwrap_err();
        assert!(matches!(err, NetworkError::OrganismOffline(_)));
        assert_eq!(discovery.metrics.failed_connections, 1);
    }

    #[test]
    fn test_register_local_is_trusted() {
        let mut discovery = discovery();
        discovery.register_local("org_1");
        assert!(discovery.is_trusted("org_1"));
        assert!(!discovery.is_trusted("org_unknown"));
    }

    #[test]
    fn test_links_feed_topology_metrics() {
        let mut discovery = discovery();
        discovery.register_local("org_1");
        discovery.register_local("org_2");
        discovery.register_local("org_3");
        discovery.record_link("org_1", "org_2");
        discovery.record_link("org_2", "org_3");
        discovery.update_topology();

        assert_eq!(discovery.topology.metrics.total_nodes, 3);
        assert_eq!(discovery.topology.metrics.total_connections, 2);
        assert_eq!(discovery.topology.metrics.network_diameter, 2);
    }

    #[test]
    fn test_network_stats_health() {
        let mut discovery = discovery();
        discovery.register_local("org_1");
        discovery.register_local("org_2");
        discovery.known_organisms.get_mut("org_2").unwrap().status = NodeStatus::Offline;

        let stats = discovery.network_stats();
        assert_eq!(stats.total_organisms, 2);
        assert_eq!(stats.online_organisms, 1);
        // Availability 0.5, quality 1.0.
        assert!((stats.network_health - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_empty_network_stats() {
        let discovery = discovery();
        let stats = discovery.network_stats();
        assert_eq!(stats.network_health, 0.0);
        assert_eq!(stats.average_connection_quality, 0.0);
    }
}
