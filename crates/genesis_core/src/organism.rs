//! Living digital organisms.
//!
//! An [`Organism`] carries DNA, a lifecycle state driven by age and
//! vitals, synaptic connections, memory, learned behaviors, and a
//! social network. Organisms evolve under selection pressure and
//! reproduce through DNA crossover.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::clock;
use crate::config::NeuralConfig;
use crate::dna::{DigitalDna, DnaError};
use crate::memory::OrganismMemory;
use crate::neural::{MessageType, NeuralError, NeuralMessage, Synapse, SynapseState};
use crate::social::{RelationshipType, SocialNetwork};

/// Organism-level errors.
#[derive(Debug, thiserror::Error)]
pub enum OrganismError {
    #[error("synapse not found: {0}")]
    SynapseNotFound(String),
    #[error("synapse limit reached")]
    TooManySynapses,
    #[error("evolution failed: {0}")]
    EvolutionFailed(String),
    #[error("not ready to reproduce: {0}")]
    ReproductionNotReady(String),
    #[error("genetic distance too large for reproduction")]
    GeneticIncompatibility,
    #[error(transparent)]
    Dna(#[from] DnaError),
    #[error(transparent)]
    Neural(#[from] NeuralError),
}

/// Lifecycle states an organism passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    Birth,
    Growing,
    Mature,
    Reproducing,
    Aging,
    Dying,
    Dead,
}

/// Conditions that fire a learned behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BehaviorTrigger {
    NeuralMessage { message_type: MessageType },
    EnergyLevel { threshold: f64, above: bool },
    HealthLevel { threshold: f64, above: bool },
    SocialInteraction { interaction_type: String },
    TimeBased { interval_seconds: u64 },
}

/// What a fired behavior does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BehaviorAction {
    SeekResources,
    Rest,
    Evolve,
    Explore,
    Socialize { targets: Vec<String> },
    Learn { skill: String },
}

/// A learned behavior with its own track record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Behavior {
    pub behavior_id: String,
    pub name: String,
    pub trigger: BehaviorTrigger,
    pub action: BehaviorAction,
    pub success_rate: f64,
    pub learned_at: u64,
    pub usage_count: u64,
    pub confidence: f64,
}

impl Behavior {
    #[must_use]
    pub fn new(name: &str, trigger: BehaviorTrigger, action: BehaviorAction) -> Self {
        Self {
            behavior_id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            trigger,
            action,
            success_rate: 0.5,
            learned_at: clock::unix_secs(),
            usage_count: 0,
            confidence: 0.5,
        }
    }
}

/// Slowly-moving per-organism performance scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub task_success_rate: f64,
    pub communication_success: f64,
    pub learning_rate: f64,
    pub adaptation_speed: f64,
    pub social_effectiveness: f64,
    pub resource_efficiency: f64,
    pub problem_solving_score: f64,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            task_success_rate: 0.5,
            communication_success: 0.5,
            learning_rate: 0.1,
            adaptation_speed: 0.1,
            social_effectiveness: 0.3,
            resource_efficiency: 0.5,
            problem_solving_score: 0.3,
        }
    }
}

impl PerformanceMetrics {
    fn tick(&mut self) {
        self.learning_rate = self.learning_rate * 0.999 + 0.001 * 0.1;
        // Without activity the social scores slowly decay.
        self.task_success_rate *= 0.9999;
        self.communication_success *= 0.9999;
        self.social_effectiveness *= 0.9999;
    }
}

/// Point-in-time health summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalSigns {
    pub organism_id: String,
    pub age: u64,
    pub energy: f64,
    pub health: f64,
    pub neural_activity: f64,
    pub synapse_count: usize,
    pub memory_usage: f64,
    pub fitness: f64,
    pub state: LifecycleState,
    pub consciousness_level: f64,
    pub reproduction_readiness: f64,
    pub social_connections: usize,
    pub behavior_count: usize,
}

/// A living digital entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organism {
    /// Stable id derived from the DNA hash at birth.
    pub id: String,
    pub dna: DigitalDna,
    pub state: LifecycleState,
    /// Age in evolution cycles.
    pub age: u64,
    pub energy: f64,
    pub health: f64,
    pub synapses: HashMap<String, Synapse>,
    pub memory: OrganismMemory,
    pub behaviors: Vec<Behavior>,
    pub last_evolution: u64,
    pub neural_activity: f64,
    pub reproduction_readiness: f64,
    pub consciousness_level: f64,
    pub social_network: SocialNetwork,
    pub performance: PerformanceMetrics,
}

impl Organism {
    /// Wraps existing DNA in a newborn organism.
    #[must_use]
    pub fn from_dna(dna: DigitalDna) -> Self {
        let id = format!("org_{}", &dna.hash()[..16]);
        Self {
            id,
            dna,
            state: LifecycleState::Birth,
            age: 0,
            energy: 1.0,
            health: 1.0,
            synapses: HashMap::new(),
            memory: OrganismMemory::new(),
            behaviors: Vec::new(),
            last_evolution: 0,
            neural_activity: 0.1,
            reproduction_readiness: 0.0,
            consciousness_level: 0.1,
            social_network: SocialNetwork::new(),
            performance: PerformanceMetrics::default(),
        }
    }

    /// Births an organism with freshly generated DNA.
    pub fn spawn(rng: &mut impl Rng) -> Self {
        Self::from_dna(DigitalDna::generate(rng))
    }

    /// Opens a synaptic connection to another organism.
    pub fn neural_connect(&mut self, target_id: &str) -> Result<String, OrganismError> {
        if self.synapses.len() >= crate::MAX_SYNAPSES_PER_ORGANISM {
            return Err(OrganismError::TooManySynapses);
        }

        let mut synapse = Synapse::establish(&self.id, target_id);
        synapse.state = SynapseState::Active;
        let synapse_id = synapse.connection_id.clone();
        self.synapses.insert(target_id.to_string(), synapse);

        self.neural_activity = (self.neural_activity + 0.1).min(1.0);
        self.consciousness_level = (self.consciousness_level + 0.05).min(1.0);
        self.social_network
            .record_interaction(target_id, RelationshipType::Neutral, 0.1);

        Ok(synapse_id)
    }

    /// Sends a signed message over an existing synapse.
    pub async fn send_message(
        &mut self,
        target_id: &str,
        message_type: MessageType,
        payload: Vec<u8>,
        limits: &NeuralConfig,
        rng: &mut impl Rng,
    ) -> Result<u64, OrganismError> {
        let signature = self.dna.sign(&payload);
        let Some(synapse) = self.synapses.get_mut(target_id) else {
            return Err(OrganismError::SynapseNotFound(target_id.to_string()));
        };

        let mut message = NeuralMessage::direct(
            &self.id,
            target_id,
            message_type,
            synapse.neurotransmitter,
            payload,
            limits.default_ttl_secs,
        );
        message.signature = signature;

        let latency = synapse.transmit(&message, limits, rng).await?;
        self.performance.communication_success =
            self.performance.communication_success * 0.9 + 0.1;
        Ok(latency)
    }

    /// Applies the effect of a delivered message. Consciousness and
    /// neural activity rise by a type-dependent boost, then decay a
    /// step so repeated traffic cannot saturate them.
    pub fn receive_message(&mut self, message_type: MessageType) {
        let boost = message_type.consciousness_boost();
        self.consciousness_level = ((self.consciousness_level + boost) * 0.999).min(1.0);
        self.neural_activity = ((self.neural_activity + boost * 0.5) * 0.995).min(1.0);
    }

    /// Applies one random mutation if fitness clears the selection
    /// pressure, then advances age and lifecycle state.
    pub fn begin_evolution(
        &mut self,
        selection_pressure: f64,
        rng: &mut impl Rng,
    ) -> Result<(), OrganismError> {
        if self.dna.fitness < selection_pressure {
            return Err(OrganismError::EvolutionFailed(format!(
                "fitness {:.3} below pressure {:.3}",
                self.dna.fitness, selection_pressure
            )));
        }

        let mutation = self.dna.random_mutation(rng);
        self.dna
            .mutate(mutation)
            .map_err(|e| OrganismError::EvolutionFailed(e.to_string()))?;

        self.age += 1;
        self.last_evolution = clock::unix_secs();
        self.update_lifecycle_state();
        self.performance.adaptation_speed = self.performance.adaptation_speed * 0.9 + 0.1;

        self.memory.add_episode(
            "evolution cycle",
            vec![],
            0.8,
            vec!["adaptation improves survival".to_string()],
            0.8,
        );

        Ok(())
    }

    /// Recomputes the lifecycle state from age and vitals.
    ///
    /// Age bands: 0-10 growing, 11-50 mature when healthy, 51-80
    /// reproducing or aging, 81-100 aging or dying, beyond 100 dying.
    pub fn update_lifecycle_state(&mut self) {
        let previous = self.state;

        self.state = match self.age {
            0..=10 => LifecycleState::Growing,
            11..=50 => {
                if self.health > 0.8 && self.energy > 0.7 {
                    LifecycleState::Mature
                } else {
                    LifecycleState::Growing
                }
            }
            51..=80 => {
                if self.reproduction_readiness > 0.8 && self.health > 0.6 {
                    LifecycleState::Reproducing
                } else if self.health > 0.5 {
                    LifecycleState::Mature
                } else {
                    LifecycleState::Aging
                }
            }
            81..=100 => {
                if self.health > 0.3 {
                    LifecycleState::Aging
                } else {
                    LifecycleState::Dying
                }
            }
            _ => LifecycleState::Dying,
        };

        match self.state {
            LifecycleState::Mature => {
                self.reproduction_readiness = (self.reproduction_readiness + 0.1).min(1.0);
            }
            LifecycleState::Aging | LifecycleState::Dying => {
                self.reproduction_readiness *= 0.9;
            }
            _ => {}
        }

        if previous != self.state {
            self.memory.add_episode(
                "lifecycle change",
                vec![],
                0.6,
                vec![format!("reached {:?} at age {}", self.state, self.age)],
                0.7,
            );
        }
    }

    /// Produces an offspring with a partner through DNA crossover.
    ///
    /// Both sides must be mature or reproducing with readiness of at
    /// least 0.5, and genetic distance must not exceed 0.8.
    pub fn reproduce_with(
        &self,
        partner: &Organism,
        rng: &mut impl Rng,
    ) -> Result<Organism, OrganismError> {
        if self.state != LifecycleState::Reproducing && self.state != LifecycleState::Mature {
            return Err(OrganismError::ReproductionNotReady("self".to_string()));
        }
        if partner.state != LifecycleState::Reproducing
            && partner.state != LifecycleState::Mature
        {
            return Err(OrganismError::ReproductionNotReady("partner".to_string()));
        }
        if self.reproduction_readiness < 0.5 || partner.reproduction_readiness < 0.5 {
            return Err(OrganismError::ReproductionNotReady(
                "insufficient readiness".to_string(),
            ));
        }
        if self.dna.genetic_distance(&partner.dna) > 0.8 {
            return Err(OrganismError::GeneticIncompatibility);
        }

        let offspring_dna = self.dna.crossover(&partner.dna, rng)?;
        let mut offspring = Organism::from_dna(offspring_dna);

        offspring.inherit_behaviors(self, partner, rng);
        offspring.inherit_social_network(self, partner, rng);
        offspring.social_network.add_parent(&self.id);
        offspring.social_network.add_parent(&partner.id);

        Ok(offspring)
    }

    /// Inherits proven behaviors from both parents with reduced
    /// confidence.
    fn inherit_behaviors(&mut self, parent1: &Organism, parent2: &Organism, rng: &mut impl Rng) {
        for behavior in parent1.behaviors.iter().chain(&parent2.behaviors) {
            if behavior.success_rate > 0.7
                && rng.gen_bool(0.5)
                && !self.behaviors.iter().any(|b| b.name == behavior.name)
            {
                let mut inherited = behavior.clone();
                inherited.behavior_id = uuid::Uuid::new_v4().to_string();
                inherited.confidence *= 0.8;
                inherited.usage_count = 0;
                inherited.learned_at = clock::unix_secs();
                self.behaviors.push(inherited);
            }
        }
    }

    /// Inherits a weakened subset of the parents' friendships.
    fn inherit_social_network(
        &mut self,
        parent1: &Organism,
        parent2: &Organism,
        rng: &mut impl Rng,
    ) {
        self.social_network.default_trust = (parent1.social_network.default_trust
            + parent2.social_network.default_trust)
            / 2.0;

        for (friend_id, relationship) in parent1
            .social_network
            .friends
            .iter()
            .chain(&parent2.social_network.friends)
        {
            if relationship.strength > 0.6
                && rng.gen_bool(0.3)
                && !self.social_network.friends.contains_key(friend_id)
            {
                let mut inherited = relationship.clone();
                inherited.strength *= 0.3;
                inherited.trust *= 0.5;
                inherited.interactions = 0;
                inherited.last_interaction = 0;
                inherited.relationship_type = RelationshipType::Neutral;
                self.social_network
                    .friends
                    .insert(friend_id.clone(), inherited);
            }
        }
    }

    /// Runs all triggered behaviors, returning the names of those that
    /// executed successfully.
    pub fn process_behaviors(&mut self, rng: &mut impl Rng) -> Vec<String> {
        let triggered: Vec<(usize, BehaviorAction)> = self
            .behaviors
            .iter()
            .enumerate()
            .filter(|(_, b)| self.should_trigger(&b.trigger))
            .map(|(i, b)| (i, b.action.clone()))
            .collect();

        let mut executed = Vec::new();
        for (index, action) in triggered {
            let succeeded = self.execute_action(&action, rng).is_ok();
            if let Some(behavior) = self.behaviors.get_mut(index) {
                if succeeded {
                    behavior.usage_count += 1;
                    behavior.success_rate = behavior.success_rate * 0.9 + 0.1;
                    behavior.confidence = behavior.confidence * 0.95 + 0.05;
                    executed.push(behavior.name.clone());
                } else {
                    behavior.success_rate *= 0.9;
                    behavior.confidence *= 0.9;
                }
            }
        }
        executed
    }

    fn should_trigger(&self, trigger: &BehaviorTrigger) -> bool {
        match trigger {
            BehaviorTrigger::EnergyLevel { threshold, above } => {
                if *above {
                    self.energy > *threshold
                } else {
                    self.energy < *threshold
                }
            }
            BehaviorTrigger::HealthLevel { threshold, above } => {
                if *above {
                    self.health > *threshold
                } else {
                    self.health < *threshold
                }
            }
            BehaviorTrigger::TimeBased { interval_seconds } => {
                clock::unix_secs().saturating_sub(self.last_evolution) >= *interval_seconds
            }
            _ => false,
        }
    }

    fn execute_action(
        &mut self,
        action: &BehaviorAction,
        rng: &mut impl Rng,
    ) -> Result<(), OrganismError> {
        match action {
            BehaviorAction::SeekResources => {
                self.energy = (self.energy + 0.1).min(1.0);
                Ok(())
            }
            BehaviorAction::Rest => {
                self.health = (self.health + 0.1).min(1.0);
                self.energy = (self.energy + 0.05).min(1.0);
                Ok(())
            }
            BehaviorAction::Evolve => self.begin_evolution(0.5, rng),
            BehaviorAction::Explore => {
                self.consciousness_level = (self.consciousness_level + 0.02).min(1.0);
                self.performance.learning_rate += 0.01;
                Ok(())
            }
            BehaviorAction::Socialize { targets } => {
                for target in targets {
                    self.social_network
                        .record_interaction(target, RelationshipType::Friend, 0.05);
                }
                Ok(())
            }
            BehaviorAction::Learn { skill } => {
                self.memory.learn_skill(skill, 0.3);
                Ok(())
            }
        }
    }

    /// Per-tick decay of vitals, memory consolidation, and lifecycle
    /// refresh.
    pub fn update(&mut self) {
        self.health *= 0.9999;
        self.energy *= 0.999;
        self.neural_activity *= 0.99;

        self.memory.consolidate();
        self.performance.tick();
        self.update_lifecycle_state();
    }

    /// Drops closed synapses.
    pub fn cleanup_synapses(&mut self) -> usize {
        let before = self.synapses.len();
        self.synapses.retain(|_, s| s.state != SynapseState::Closed);
        before - self.synapses.len()
    }

    #[must_use]
    pub fn vital_signs(&self) -> VitalSigns {
        VitalSigns {
            organism_id: self.id.clone(),
            age: self.age,
            energy: self.energy,
            health: self.health,
            neural_activity: self.neural_activity,
            synapse_count: self.synapses.len(),
            memory_usage: self.memory.usage_percentage(),
            fitness: self.dna.fitness,
            state: self.state,
            consciousness_level: self.consciousness_level,
            reproduction_readiness: self.reproduction_readiness,
            social_connections: self.social_network.connection_count(),
            behavior_count: self.behaviors.len(),
        }
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.state != LifecycleState::Dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(11)
    }

    fn limits() -> NeuralConfig {
        NeuralConfig {
            failure_rate: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_spawn_newborn() {
        let organism = Organism::spawn(&mut rng());
        assert!(organism.id.starts_with("org_"));
        assert_eq!(organism.id.len(), 20);
        assert_eq!(organism.state, LifecycleState::Birth);
        assert_eq!(organism.age, 0);
        assert_eq!(organism.energy, 1.0);
        assert_eq!(organism.health, 1.0);
        assert!(organism.is_alive());
    }

    #[test]
    fn test_neural_connect_updates_activity() {
        let mut rng = rng();
        let mut alpha = Organism::spawn(&mut rng);
        let beta = Organism::spawn(&mut rng);

        let synapse_id = alpha.neural_connect(&beta.id).unwrap();
        assert!(!synapse_id.is_empty());
        assert!(alpha.synapses.contains_key(&beta.id));
        assert!(alpha.neural_activity > 0.1);
        assert_eq!(alpha.social_network.connection_count(), 1);
    }

    #[tokio::test]
    async fn test_send_message_over_synapse() {
        let mut rng = rng();
        let mut alpha = Organism::spawn(&mut rng);
        let beta = Organism::spawn(&mut rng);

        alpha.neural_connect(&beta.id).unwrap();
        let latency = alpha
            .send_message(
                &beta.id,
                MessageType::Consciousness,
                b"hello".to_vec(),
                &limits(),
                &mut rng,
            )
            .await
            .unwrap();
        assert!(latency > 0);
    }

    #[tokio::test]
    async fn test_send_message_without_synapse() {
        let mut rng = rng();
        let mut alpha = Organism::spawn(&mut rng);
        let err = alpha
            .send_message(
                "org_missing",
                MessageType::Stimulus,
                Vec::new(),
                &limits(),
                &mut rng,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OrganismError::SynapseNotFound(_)));
    }

    #[test]
    fn test_receive_message_raises_consciousness() {
        let mut organism = Organism::spawn(&mut rng());
        let before = organism.consciousness_level;

        organism.receive_message(MessageType::Consciousness);
        assert!(organism.consciousness_level > before);

        let after_big = organism.consciousness_level;
        organism.receive_message(MessageType::Maintenance);
        assert!(organism.consciousness_level - after_big < 0.011);
        assert!(organism.consciousness_level <= 1.0);
    }

    #[test]
    fn test_evolution_mutates_and_ages() {
        let mut rng = rng();
        let mut organism = Organism::spawn(&mut rng);
        let initial_fitness = organism.dna.fitness;

        organism.begin_evolution(0.5, &mut rng).unwrap();
        assert_eq!(organism.age, 1);
        assert_eq!(organism.dna.generation, 1);
        assert!(organism.dna.fitness < initial_fitness);
    }

    #[test]
    fn test_evolution_gated_by_fitness() {
        let mut rng = rng();
        let mut organism = Organism::spawn(&mut rng);
        organism.dna.fitness = 0.05;

        let err = organism.begin_evolution(0.5, &mut rng).unwrap_err();
        assert!(matches!(err, OrganismError::EvolutionFailed(_)));
        assert_eq!(organism.age, 0);
    }

    #[test]
    fn test_lifecycle_progression() {
        let mut rng = rng();
        let mut organism = Organism::spawn(&mut rng);
        for _ in 0..15 {
            organism.begin_evolution(0.3, &mut rng).unwrap();
        }
        assert_eq!(organism.age, 15);
        assert_eq!(organism.state, LifecycleState::Mature);
    }

    #[test]
    fn test_old_organism_declines() {
        let mut organism = Organism::spawn(&mut rng());
        organism.age = 120;
        organism.update_lifecycle_state();
        assert_eq!(organism.state, LifecycleState::Dying);
    }

    #[test]
    fn test_reproduction_produces_offspring() {
        let mut rng = rng();
        let mut alpha = Organism::spawn(&mut rng);
        let mut beta = Organism::spawn(&mut rng);

        // Make the sequences genetically close.
        beta.dna.sequence = alpha.dna.sequence.clone();
        alpha.state = LifecycleState::Reproducing;
        beta.state = LifecycleState::Reproducing;
        alpha.reproduction_readiness = 0.8;
        beta.reproduction_readiness = 0.8;

        let offspring = alpha.reproduce_with(&beta, &mut rng).unwrap();
        assert_ne!(offspring.id, alpha.id);
        assert_ne!(offspring.id, beta.id);
        assert_eq!(offspring.state, LifecycleState::Birth);
        assert!(offspring.social_network.family.contains_key(&alpha.id));
        assert!(offspring.social_network.family.contains_key(&beta.id));
    }

    #[test]
    fn test_reproduction_requires_readiness() {
        let mut rng = rng();
        let alpha = Organism::spawn(&mut rng);
        let beta = Organism::spawn(&mut rng);

        let err = alpha.reproduce_with(&beta, &mut rng).unwrap_err();
        assert!(matches!(err, OrganismError::ReproductionNotReady(_)));
    }

    #[test]
    fn test_reproduction_rejects_distant_genomes() {
        let mut rng = rng();
        let mut alpha = Organism::spawn(&mut rng);
        let mut beta = Organism::spawn(&mut rng);
        alpha.state = LifecycleState::Reproducing;
        beta.state = LifecycleState::Reproducing;
        alpha.reproduction_readiness = 0.8;
        beta.reproduction_readiness = 0.8;
        // Force maximal distance.
        beta.dna.sequence = alpha.dna.sequence.iter().map(|b| !b).collect();

        let err = alpha.reproduce_with(&beta, &mut rng).unwrap_err();
        assert!(matches!(err, OrganismError::GeneticIncompatibility));
    }

    #[test]
    fn test_behavior_fires_on_low_energy() {
        let mut rng = rng();
        let mut organism = Organism::spawn(&mut rng);
        organism.behaviors.push(Behavior::new(
            "seek energy",
            BehaviorTrigger::EnergyLevel {
                threshold: 0.3,
                above: false,
            },
            BehaviorAction::SeekResources,
        ));
        organism.energy = 0.2;

        let executed = organism.process_behaviors(&mut rng);
        assert_eq!(executed, vec!["seek energy".to_string()]);
        assert!(organism.energy > 0.2);
        assert_eq!(organism.behaviors[0].usage_count, 1);
    }

    #[test]
    fn test_behavior_does_not_fire_when_untriggered() {
        let mut rng = rng();
        let mut organism = Organism::spawn(&mut rng);
        organism.behaviors.push(Behavior::new(
            "seek energy",
            BehaviorTrigger::EnergyLevel {
                threshold: 0.3,
                above: false,
            },
            BehaviorAction::SeekResources,
        ));

        let executed = organism.process_behaviors(&mut rng);
        assert!(executed.is_empty());
        assert_eq!(organism.behaviors[0].usage_count, 0);
    }

    #[test]
    fn test_vital_signs_reflect_state() {
        let organism = Organism::spawn(&mut rng());
        let vitals = organism.vital_signs();
        assert_eq!(vitals.organism_id, organism.id);
        assert_eq!(vitals.age, organism.age);
        assert_eq!(vitals.fitness, organism.dna.fitness);
        assert_eq!(vitals.state, organism.state);
    }

    #[test]
    fn test_update_decays_vitals() {
        let mut organism = Organism::spawn(&mut rng());
        organism.update();
        assert!(organism.health < 1.0);
        assert!(organism.energy < 1.0);
    }
}
