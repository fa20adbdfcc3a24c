//! The protocol facade.
//!
//! [`GenesisProtocol`] owns the organism population, the evolution
//! engine, the collective intelligence layer, and the network view,
//! and threads one seeded RNG through every stochastic operation.
//! With a configured seed and `deterministic = true`, two runs over
//! the same inputs produce the same population.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use genesis_core::config::GenesisConfig;
use genesis_core::dna::DigitalDna;
use genesis_core::evolution::{EvolutionEngine, EvolutionEvent};
use genesis_core::metrics::{Metrics, PhaseTimer};
use genesis_core::neural::MessageType;
use genesis_core::organism::{Organism, VitalSigns};
use genesis_core::CollectiveIntelligence;
use genesis_net::NetworkDiscovery;

use crate::error::GenesisError;

/// Population-level statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkStats {
    pub total_organisms: usize,
    pub active_organisms: usize,
    pub total_synapses: usize,
    pub average_fitness: f64,
    /// Mean of average health, energy, and fitness.
    pub network_health: f64,
}

/// Static protocol limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolInfo {
    pub version: String,
    pub protocol_version: String,
    pub max_organisms: usize,
    pub max_synapses: usize,
    pub target_latency_ns: u64,
    pub max_evolution_time_ms: u64,
}

impl ProtocolInfo {
    #[must_use]
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            protocol_version: genesis_core::PROTOCOL_VERSION.to_string(),
            max_organisms: genesis_core::MAX_ORGANISMS_PER_NETWORK,
            max_synapses: genesis_core::MAX_SYNAPSES_PER_ORGANISM,
            target_latency_ns: genesis_core::TARGET_NEURAL_LATENCY_NS,
            max_evolution_time_ms: genesis_core::MAX_EVOLUTION_TIME_MS,
        }
    }
}

impl Default for ProtocolInfo {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-level engine instance.
pub struct GenesisProtocol {
    pub config: GenesisConfig,
    pub organisms: HashMap<String, Organism>,
    pub network: NetworkDiscovery,
    pub collective: CollectiveIntelligence,
    pub evolution_engine: EvolutionEngine,
    pub metrics: Metrics,
    rng: ChaCha8Rng,
}

impl GenesisProtocol {
    /// Builds a protocol instance from a validated configuration.
    pub fn new(config: GenesisConfig) -> Result<Self, GenesisError> {
        config
            .validate()
            .map_err(|e| GenesisError::Config(e.to_string()))?;

        let rng = match config.protocol.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        tracing::info!(
            fingerprint = %config.fingerprint(),
            seeded = config.protocol.seed.is_some(),
            "protocol instance created"
        );

        Ok(Self {
            network: NetworkDiscovery::new(config.network.clone()),
            collective: CollectiveIntelligence::new(),
            evolution_engine: EvolutionEngine::new(config.evolution.clone()),
            metrics: Metrics::new(),
            organisms: HashMap::new(),
            rng,
            config,
        })
    }

    /// Births an organism, from supplied DNA or freshly generated.
    pub fn create_organism(
        &mut self,
        dna: Option<DigitalDna>,
    ) -> Result<String, GenesisError> {
        if self.organisms.len() >= self.config.protocol.max_organisms {
            return Err(GenesisError::CapacityReached(
                self.config.protocol.max_organisms,
            ));
        }

        let organism = match dna {
            Some(dna) => Organism::from_dna(dna),
            None => Organism::spawn(&mut self.rng),
        };
        let organism_id = organism.id.clone();

        self.network.register_local(&organism_id);
        self.organisms.insert(organism_id.clone(), organism);
        self.metrics.record_organism_created();
        tracing::debug!(organism = %organism_id, "organism born");

        Ok(organism_id)
    }

    #[must_use]
    pub fn organism(&self, organism_id: &str) -> Option<&Organism> {
        self.organisms.get(organism_id)
    }

    pub fn organism_mut(&mut self, organism_id: &str) -> Option<&mut Organism> {
        self.organisms.get_mut(organism_id)
    }

    /// Opens a synapse between two living organisms and records the
    /// link in the network topology.
    pub fn connect_organisms(
        &mut self,
        from_id: &str,
        to_id: &str,
    ) -> Result<String, GenesisError> {
        if !self.organisms.contains_key(to_id) {
            return Err(GenesisError::OrganismNotFound(to_id.to_string()));
        }
        let Some(organism) = self.organisms.get_mut(from_id) else {
            return Err(GenesisError::OrganismNotFound(from_id.to_string()));
        };

        let synapse_id = organism.neural_connect(to_id)?;
        self.network.record_link(from_id, to_id);
        Ok(synapse_id)
    }

    /// Sends a signed neural message over an established synapse,
    /// returning the measured latency in nanoseconds. Delivery raises
    /// the receiver's consciousness by a type-dependent boost.
    pub async fn send_message(
        &mut self,
        from_id: &str,
        to_id: &str,
        message_type: MessageType,
        payload: Vec<u8>,
    ) -> Result<u64, GenesisError> {
        let Some(organism) = self.organisms.get_mut(from_id) else {
            return Err(GenesisError::OrganismNotFound(from_id.to_string()));
        };

        let result = organism
            .send_message(to_id, message_type, payload, &self.config.neural, &mut self.rng)
            .await;
        match result {
            Ok(latency) => {
                self.metrics.record_message_sent();
                // The receiver may have died since the synapse opened;
                // the transmission itself still counts.
                if let Some(receiver) = self.organisms.get_mut(to_id) {
                    receiver.receive_message(message_type);
                }
                Ok(latency)
            }
            Err(e) => {
                self.metrics.record_message_failed();
                Err(e.into())
            }
        }
    }

    /// Evolves one organism through the engine.
    pub fn evolve_organism(
        &mut self,
        organism_id: &str,
    ) -> Result<EvolutionEvent, GenesisError> {
        let Some(organism) = self.organisms.get_mut(organism_id) else {
            return Err(GenesisError::OrganismNotFound(organism_id.to_string()));
        };

        let event = self
            .evolution_engine
            .evolve_organism(organism, &mut self.rng)?;
        self.metrics.record_mutations(1);
        Ok(event)
    }

    /// Runs a selection sweep over the whole population. Organisms
    /// below the engine's pressure die; survivors are reinserted.
    pub fn apply_selection(&mut self) -> Vec<String> {
        let timer = PhaseTimer::start("selection_sweep");
        let mut population: Vec<Organism> = self.organisms.drain().map(|(_, o)| o).collect();
        let eliminated = self.evolution_engine.apply_selection_pressure(&mut population);

        for organism in population {
            self.organisms.insert(organism.id.clone(), organism);
        }
        for id in &eliminated {
            self.metrics.record_organism_died();
            tracing::debug!(organism = %id, "eliminated by selection");
        }
        self.metrics.record_evolution_cycle();
        self.evolution_engine.advance_cycle();
        timer.finish();
        eliminated
    }

    /// Produces an offspring of two organisms and registers it.
    pub fn reproduce(
        &mut self,
        parent1_id: &str,
        parent2_id: &str,
    ) -> Result<String, GenesisError> {
        if self.organisms.len() >= self.config.protocol.max_organisms {
            return Err(GenesisError::CapacityReached(
                self.config.protocol.max_organisms,
            ));
        }
        let Some(parent1) = self.organisms.get(parent1_id) else {
            return Err(GenesisError::OrganismNotFound(parent1_id.to_string()));
        };
        let Some(parent2) = self.organisms.get(parent2_id) else {
            return Err(GenesisError::OrganismNotFound(parent2_id.to_string()));
        };

        let offspring = parent1.reproduce_with(parent2, &mut self.rng)?;
        let offspring_id = offspring.id.clone();
        self.network.register_local(&offspring_id);
        self.organisms.insert(offspring_id.clone(), offspring);
        self.metrics.record_organism_created();
        self.metrics.record_crossover();
        Ok(offspring_id)
    }

    /// Per-tick maintenance: vitals decay, memory consolidation, and
    /// closed-synapse cleanup for every organism.
    pub fn tick(&mut self) {
        for organism in self.organisms.values_mut() {
            organism.update();
            organism.cleanup_synapses();
        }
    }

    #[must_use]
    pub fn network_stats(&self) -> NetworkStats {
        let total = self.organisms.len();
        let active = self.organisms.values().filter(|o| o.is_alive()).count();
        let total_synapses = self.organisms.values().map(|o| o.synapses.len()).sum();

        let average_fitness = if total == 0 {
            0.0
        } else {
            self.organisms.values().map(|o| o.dna.fitness).sum::<f64>() / total as f64
        };

        NetworkStats {
            total_organisms: total,
            active_organisms: active,
            total_synapses,
            average_fitness,
            network_health: self.population_health(),
        }
    }

    fn population_health(&self) -> f64 {
        if self.organisms.is_empty() {
            return 0.0;
        }
        let count = self.organisms.len() as f64;
        let avg_health = self.organisms.values().map(|o| o.health).sum::<f64>() / count;
        let avg_energy = self.organisms.values().map(|o| o.energy).sum::<f64>() / count;
        let avg_fitness = self.organisms.values().map(|o| o.dna.fitness).sum::<f64>() / count;
        (avg_health + avg_energy + avg_fitness) / 3.0
    }

    #[must_use]
    pub fn all_vital_signs(&self) -> Vec<VitalSigns> {
        self.organisms.values().map(Organism::vital_signs).collect()
    }

    /// Removes dead organisms, returning how many were reaped.
    pub fn cleanup_dead_organisms(&mut self) -> usize {
        let before = self.organisms.len();
        self.organisms.retain(|_, organism| organism.is_alive());
        let removed = before - self.organisms.len();
        for _ in 0..removed {
            self.metrics.record_organism_died();
        }
        removed
    }

    pub(crate) fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    #[must_use]
    pub fn info(&self) -> ProtocolInfo {
        ProtocolInfo::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genesis_core::config::ProtocolConfig;
    use genesis_core::organism::LifecycleState;

    fn protocol() -> GenesisProtocol {
        let config = GenesisConfig {
            protocol: ProtocolConfig {
                seed: Some(42),
                deterministic: true,
                ..Default::default()
            },
            ..Default::default()
        };
        GenesisProtocol::new(config).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GenesisConfig::default();
        config.protocol.max_organisms = 0;
        assert!(matches!(
            GenesisProtocol::new(config),
            Err(GenesisError::Config(_))
        ));
    }

    #[test]
    fn test_create_organism() {
        let mut protocol = protocol();
        let id = protocol.create_organism(None).unwrap();
        assert!(protocol.organism(&id).is_some());
        assert_eq!(protocol.metrics.snapshot().organisms_created, 1);
        // The organism is also visible to the network layer.
        assert!(protocol.network.known_organisms.contains_key(&id));
    }

    #[test]
    fn test_capacity_limit() {
        let mut protocol = protocol();
        protocol.config.protocol.max_organisms = 2;
        protocol.create_organism(None).unwrap();
        protocol.create_organism(None).unwrap();
        assert!(matches!(
            protocol.create_organism(None),
            Err(GenesisError::CapacityReached(2))
        ));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut a = protocol();
        let mut b = protocol();
        let id_a = a.create_organism(None).unwrap();
        let id_b = b.create_organism(None).unwrap();
        assert_eq!(id_a, id_b);
    }

    #[test]
    fn test_connect_requires_both_organisms() {
        let mut protocol = protocol();
        let alpha = protocol.create_organism(None).unwrap();

        let err = protocol.connect_organisms(&alpha, "org_missing").unwrap_err();
        assert!(matches!(err, GenesisError::OrganismNotFound(_)));

        let beta = protocol.create_organism(None).unwrap();
        let synapse_id = protocol.connect_organisms(&alpha, &beta).unwrap();
        assert!(synapse_id.starts_with("synapse_"));
        assert_eq!(protocol.network.topology.edge_count(), 1);
    }

    #[tokio::test]
    async fn test_send_message_records_metrics() {
        let mut protocol = protocol();
        protocol.config.neural.failure_rate = 0.0;
        let alpha = protocol.create_organism(None).unwrap();
        let beta = protocol.create_organism(None).unwrap();
        protocol.connect_organisms(&alpha, &beta).unwrap();

        let latency = protocol
            .send_message(&alpha, &beta, MessageType::Consciousness, b"hello".to_vec())
            .await
            .unwrap();
        assert!(latency > 0);
        assert_eq!(protocol.metrics.snapshot().messages_sent, 1);
    }

    #[tokio::test]
    async fn test_delivery_raises_receiver_consciousness() {
        let mut protocol = protocol();
        protocol.config.neural.failure_rate = 0.0;
        let alpha = protocol.create_organism(None).unwrap();
        let beta = protocol.create_organism(None).unwrap();
        protocol.connect_organisms(&alpha, &beta).unwrap();
        let before = protocol.organism(&beta).unwrap().consciousness_level;

        protocol
            .send_message(&alpha, &beta, MessageType::Consciousness, b"wake".to_vec())
            .await
            .unwrap();
        assert!(protocol.organism(&beta).unwrap().consciousness_level > before);
    }

    #[tokio::test]
    async fn test_send_without_synapse_counts_failure() {
        let mut protocol = protocol();
        let alpha = protocol.create_organism(None).unwrap();
        let beta = protocol.create_organism(None).unwrap();

        let err = protocol
            .send_message(&alpha, &beta, MessageType::Stimulus, Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, GenesisError::Organism(_)));
        assert_eq!(protocol.metrics.snapshot().messages_failed, 1);
    }

    #[test]
    fn test_evolve_organism_through_engine() {
        let mut protocol = protocol();
        let id = protocol.create_organism(None).unwrap();

        let event = protocol.evolve_organism(&id).unwrap();
        assert_eq!(event.organism_id, id);
        assert_eq!(protocol.organism(&id).unwrap().dna.generation, 1);
        assert_eq!(protocol.metrics.snapshot().mutations_applied, 1);
    }

    #[test]
    fn test_selection_sweep_removes_unfit() {
        let mut protocol = protocol();
        for _ in 0..4 {
            protocol.create_organism(None).unwrap();
        }
        let victim = protocol.organisms.values_mut().next().unwrap();
        victim.dna.fitness = 0.1;
        protocol.evolution_engine.selection_pressure = 0.5;

        let eliminated = protocol.apply_selection();
        assert_eq!(eliminated.len(), 1);
        assert_eq!(protocol.organisms.len(), 3);
        assert_eq!(protocol.evolution_engine.current_cycle, 1);
        assert_eq!(protocol.metrics.snapshot().organisms_died, 1);
    }

    #[test]
    fn test_reproduce_registers_offspring() {
        let mut protocol = protocol();
        let alpha = protocol.create_organism(None).unwrap();
        // A near-identical genome passes the distance gate but hashes
        // to a distinct organism id.
        let mut dna = protocol.organism(&alpha).unwrap().dna.clone();
        dna.sequence[0] = dna.sequence[0].wrapping_add(1);
        let beta = protocol.create_organism(Some(dna)).unwrap();
        assert_ne!(alpha, beta);

        for id in [&alpha, &beta] {
            let organism = protocol.organism_mut(id).unwrap();
            organism.state = LifecycleState::Mature;
            organism.reproduction_readiness = 0.8;
        }

        let child = protocol.reproduce(&alpha, &beta).unwrap();
        assert_eq!(protocol.organisms.len(), 3);
        assert!(protocol.organism(&child).is_some());
        assert_eq!(protocol.metrics.snapshot().crossovers, 1);
    }

    #[test]
    fn test_network_stats() {
        let mut protocol = protocol();
        for _ in 0..5 {
            protocol.create_organism(None).unwrap();
        }

        let stats = protocol.network_stats();
        assert_eq!(stats.total_organisms, 5);
        assert_eq!(stats.active_organisms, 5);
        assert_eq!(stats.total_synapses, 0);
        assert!((stats.average_fitness - 1.0).abs() < 1e-9);
        assert!((stats.network_health - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_population_stats() {
        let protocol = protocol();
        let stats = protocol.network_stats();
        assert_eq!(stats.total_organisms, 0);
        assert_eq!(stats.average_fitness, 0.0);
        assert_eq!(stats.network_health, 0.0);
    }

    #[test]
    fn test_cleanup_dead_organisms() {
        let mut protocol = protocol();
        let id = protocol.create_organism(None).unwrap();
        protocol.organism_mut(&id).unwrap().state = LifecycleState::Dead;

        let removed = protocol.cleanup_dead_organisms();
        assert_eq!(removed, 1);
        assert!(protocol.organisms.is_empty());
        assert_eq!(protocol.metrics.snapshot().organisms_died, 1);
    }

    #[test]
    fn test_protocol_info() {
        let info = ProtocolInfo::new();
        assert_eq!(info.protocol_version, "1.0.0");
        assert_eq!(info.max_organisms, 1_000_000);
        assert_eq!(info.target_latency_ns, 10_000);
    }
}
