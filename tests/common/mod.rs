#![allow(dead_code)]

//! Shared builders for the integration suite.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use genesis_lib::{GenesisConfig, GenesisProtocol, LifecycleState, Organism};

/// A deterministic config with failures and pacing disabled.
pub fn base_config(seed: u64) -> GenesisConfig {
    let mut config = GenesisConfig::default();
    config.protocol.seed = Some(seed);
    config.protocol.deterministic = true;
    config.neural.failure_rate = 0.0;
    config.demo.pacing = false;
    config
}

/// Builds a protocol instance with a prepared population.
pub struct ProtocolBuilder {
    config: GenesisConfig,
    population: usize,
}

impl ProtocolBuilder {
    pub fn new() -> Self {
        Self {
            config: base_config(1),
            population: 0,
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.protocol.seed = Some(seed);
        self
    }

    pub fn max_organisms(mut self, max: usize) -> Self {
        self.config.protocol.max_organisms = max;
        self
    }

    pub fn population(mut self, count: usize) -> Self {
        self.population = count;
        self
    }

    pub fn config(mut self, f: impl FnOnce(&mut GenesisConfig)) -> Self {
        f(&mut self.config);
        self
    }

    /// Builds the protocol and returns it with the created organism ids.
    pub fn build(self) -> (GenesisProtocol, Vec<String>) {
        let mut protocol = GenesisProtocol::new(self.config).expect("valid test config");
        let ids = (0..self.population)
            .map(|_| protocol.create_organism(None).expect("below capacity"))
            .collect();
        (protocol, ids)
    }
}

/// Builds a standalone organism with overridden vitals.
pub struct OrganismBuilder {
    seed: u64,
    state: Option<LifecycleState>,
    fitness: Option<f64>,
    readiness: Option<f64>,
    age: Option<u64>,
}

impl OrganismBuilder {
    pub fn new() -> Self {
        Self {
            seed: 7,
            state: None,
            fitness: None,
            readiness: None,
            age: None,
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn state(mut self, state: LifecycleState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn fitness(mut self, fitness: f64) -> Self {
        self.fitness = Some(fitness);
        self
    }

    pub fn readiness(mut self, readiness: f64) -> Self {
        self.readiness = Some(readiness);
        self
    }

    pub fn age(mut self, age: u64) -> Self {
        self.age = Some(age);
        self
    }

    pub fn build(self) -> Organism {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut organism = Organism::spawn(&mut rng);
        if let Some(state) = self.state {
            organism.state = state;
        }
        if let Some(fitness) = self.fitness {
            organism.dna.fitness = fitness;
        }
        if let Some(readiness) = self.readiness {
            organism.reproduction_readiness = readiness;
        }
        if let Some(age) = self.age {
            organism.age = age;
        }
        organism
    }
}
