//! # Genesis Core
//!
//! The core engine for Genesis - a digital-life protocol.
//!
//! This crate contains the deterministic organism engine, including:
//! - Digital DNA with a cryptographic identity that evolves biologically
//! - Organism lifecycle management (birth, growth, reproduction, death)
//! - Neural communication over synaptic connections
//! - An evolution engine driven by mutation and selection pressure
//! - Collective intelligence (groups, voting, shared memory)
//! - Configuration and metrics collection
//!
//! ## Determinism
//!
//! Every stochastic operation takes an explicit RNG. Seeding a
//! `ChaCha8Rng` from the configured `seed` yields reproducible runs.
//!
//! ## Example
//!
//! ```
//! use genesis_core::dna::DigitalDna;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let dna = DigitalDna::generate(&mut rng);
//! assert_eq!(dna.generation, 0);
//! ```

/// Wall-clock helpers shared across the engine
pub mod clock;
/// Collective intelligence: groups, decisions, swarm behavior
pub mod collective;
/// Configuration management for protocol parameters
pub mod config;
/// Digital DNA: sequence, mutation, crossover, signing identity
pub mod dna;
/// Evolution engine: mutation selection and population sweeps
pub mod evolution;
/// Organism memory system (short/long-term, episodic, procedural)
pub mod memory;
/// Performance metrics collection and logging
pub mod metrics;
/// Synapses, neural messages, and transmission delays
pub mod neural;
/// Organism lifecycle and behavior
pub mod organism;
/// Social relationships between organisms
pub mod social;

pub use collective::CollectiveIntelligence;
pub use config::GenesisConfig;
pub use dna::{DigitalDna, Mutation};
pub use evolution::EvolutionEngine;
pub use metrics::{init_logging, Metrics};
pub use neural::{MessageType, NeuralMessage, Neurotransmitter, Synapse};
pub use organism::{LifecycleState, Organism, VitalSigns};

/// Protocol wire/data format version.
pub const PROTOCOL_VERSION: &str = "1.0.0";

/// Hard cap on organisms tracked by a single protocol instance.
pub const MAX_ORGANISMS_PER_NETWORK: usize = 1_000_000;
/// Hard cap on synaptic connections held by one organism.
pub const MAX_SYNAPSES_PER_ORGANISM: usize = 100_000;
/// Target one-way synaptic latency in nanoseconds.
pub const TARGET_NEURAL_LATENCY_NS: u64 = 10_000;
/// Upper bound on a single evolution pass in milliseconds.
pub const MAX_EVOLUTION_TIME_MS: u64 = 1000;
