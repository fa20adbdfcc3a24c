//! Configuration management for protocol parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. All engine parameters can be customized through
//! this configuration system.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impl)
//! 2. `config.toml` file (overrides defaults)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [protocol]
//! max_organisms = 1000000
//! seed = 42
//! deterministic = true
//!
//! [evolution]
//! base_mutation_rate = 0.01
//! survival_threshold = 0.1
//!
//! [demo]
//! organisms = 5
//! generations = 3
//! ```

use serde::{Deserialize, Serialize};

/// Protocol-level limits and determinism controls.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ProtocolConfig {
    pub max_organisms: usize,
    pub max_synapses_per_organism: usize,
    pub target_neural_latency_ns: u64,
    pub max_evolution_time_ms: u64,
    pub seed: Option<u64>,
    pub deterministic: bool,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            max_organisms: crate::MAX_ORGANISMS_PER_NETWORK,
            max_synapses_per_organism: crate::MAX_SYNAPSES_PER_ORGANISM,
            target_neural_latency_ns: crate::TARGET_NEURAL_LATENCY_NS,
            max_evolution_time_ms: crate::MAX_EVOLUTION_TIME_MS,
            seed: None,
            deterministic: false,
        }
    }
}

/// Evolution engine thresholds and rates.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EvolutionConfig {
    pub base_mutation_rate: f64,
    pub max_mutations_per_cycle: usize,
    pub survival_threshold: f64,
    pub reproduction_threshold: f64,
    pub adaptation_factor: f64,
    pub sexual_selection_strength: f64,
    pub initial_selection_pressure: f64,
    /// Bounded evolution event history kept in memory.
    pub max_history_events: usize,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            base_mutation_rate: 0.01,
            max_mutations_per_cycle: 3,
            survival_threshold: 0.1,
            reproduction_threshold: 0.6,
            adaptation_factor: 0.8,
            sexual_selection_strength: 0.5,
            initial_selection_pressure: 0.5,
            max_history_events: 10_000,
        }
    }
}

/// Neural transmission parameters.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct NeuralConfig {
    /// Message time-to-live in seconds.
    pub default_ttl_secs: u64,
    /// Payload cap in bytes.
    pub max_payload_bytes: usize,
    /// Simulated transmission failure rate (0.0-1.0).
    pub failure_rate: f64,
}

impl Default for NeuralConfig {
    fn default() -> Self {
        Self {
            default_ttl_secs: 300,
            max_payload_bytes: 1_048_576,
            failure_rate: 0.001,
        }
    }
}

/// Network discovery parameters.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct NetworkConfig {
    pub discovery_interval_secs: u64,
    pub max_discovery_attempts: u32,
    pub connection_timeout_secs: u64,
    pub heartbeat_interval_secs: u64,
    pub trust_threshold: f64,
    pub default_port: u16,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            discovery_interval_secs: 30,
            max_discovery_attempts: 3,
            connection_timeout_secs: 10,
            heartbeat_interval_secs: 5,
            trust_threshold: 0.7,
            default_port: 8000,
        }
    }
}

/// Integrated demo staging parameters.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DemoConfig {
    /// Organisms created during the birth act.
    pub organisms: usize,
    /// Generations simulated during the evolution act.
    pub generations: u64,
    /// Neural connections established during the communication act.
    pub max_connections: usize,
    /// Pause between narrated steps for readability.
    pub pacing: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            organisms: 5,
            generations: 3,
            max_connections: 5,
            pacing: true,
        }
    }
}

/// Top-level configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct GenesisConfig {
    pub protocol: ProtocolConfig,
    pub evolution: EvolutionConfig,
    pub neural: NeuralConfig,
    pub network: NetworkConfig,
    pub demo: DemoConfig,
}

impl GenesisConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a
    /// description of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        // Protocol validation
        anyhow::ensure!(
            self.protocol.max_organisms > 0,
            "Max organisms must be positive"
        );
        anyhow::ensure!(
            self.protocol.max_organisms <= crate::MAX_ORGANISMS_PER_NETWORK,
            "Max organisms above protocol cap"
        );
        anyhow::ensure!(
            self.protocol.max_synapses_per_organism > 0,
            "Max synapses must be positive"
        );
        anyhow::ensure!(
            self.protocol.max_synapses_per_organism <= crate::MAX_SYNAPSES_PER_ORGANISM,
            "Max synapses above protocol cap"
        );
        anyhow::ensure!(
            self.protocol.target_neural_latency_ns > 0,
            "Target neural latency must be positive"
        );

        // Evolution validation
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.evolution.base_mutation_rate),
            "Base mutation rate must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            (0.0..=2.0).contains(&self.evolution.survival_threshold),
            "Survival threshold must be in [0.0, 2.0]"
        );
        anyhow::ensure!(
            (0.0..=2.0).contains(&self.evolution.reproduction_threshold),
            "Reproduction threshold must be in [0.0, 2.0]"
        );
        anyhow::ensure!(
            self.evolution.max_mutations_per_cycle > 0,
            "Max mutations per cycle must be positive"
        );
        anyhow::ensure!(
            self.evolution.max_history_events > 0,
            "Max history events must be positive"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.evolution.initial_selection_pressure),
            "Initial selection pressure must be in [0.0, 1.0]"
        );

        // Neural validation
        anyhow::ensure!(
            self.neural.default_ttl_secs > 0,
            "Message TTL must be positive"
        );
        anyhow::ensure!(
            self.neural.max_payload_bytes > 0,
            "Max payload must be positive"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.neural.failure_rate),
            "Failure rate must be in [0.0, 1.0]"
        );

        // Network validation
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.network.trust_threshold),
            "Trust threshold must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.network.max_discovery_attempts > 0,
            "Max discovery attempts must be positive"
        );

        // Demo validation
        anyhow::ensure!(self.demo.organisms > 0, "Demo organism count must be positive");
        anyhow::ensure!(
            self.demo.organisms <= 1000,
            "Demo organism count too large (max 1000)"
        );
        anyhow::ensure!(
            self.demo.generations > 0,
            "Demo generation count must be positive"
        );
        anyhow::ensure!(
            self.demo.max_connections > 0,
            "Demo connection cap must be positive"
        );

        Ok(())
    }

    /// Loads and validates configuration from TOML content.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Stable digest over the behavior-relevant sections.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.protocol).as_bytes());
        hasher.update(format!("{:?}", self.evolution).as_bytes());
        hasher.update(format!("{:?}", self.neural).as_bytes());
        hasher.update(format!("{:?}", self.network).as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = GenesisConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_mutation_rate() {
        let config = GenesisConfig {
            evolution: EvolutionConfig {
                base_mutation_rate: 1.5,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_organisms() {
        let config = GenesisConfig {
            protocol: ProtocolConfig {
                max_organisms: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_failure_rate() {
        let config = GenesisConfig {
            neural: NeuralConfig {
                failure_rate: -0.1,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_demo_connection_cap_rejected() {
        let config = GenesisConfig {
            demo: DemoConfig {
                max_connections: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = GenesisConfig::from_toml(
            r#"
            [protocol]
            seed = 42
            deterministic = true

            [demo]
            organisms = 3
            generations = 2
            max_connections = 5
            pacing = false
            "#,
        )
        .unwrap();
        assert_eq!(config.protocol.seed, Some(42));
        assert!(config.protocol.deterministic);
        assert_eq!(config.demo.organisms, 3);
        // Untouched sections fall back to defaults.
        assert_eq!(config.evolution.survival_threshold, 0.1);
    }

    #[test]
    fn test_fingerprint_consistency() {
        let config1 = GenesisConfig::default();
        let config2 = GenesisConfig::default();
        assert_eq!(config1.fingerprint(), config2.fingerprint());
    }

    #[test]
    fn test_fingerprint_ignores_demo_staging() {
        let mut config = GenesisConfig::default();
        let base = config.fingerprint();
        config.demo.pacing = false;
        assert_eq!(config.fingerprint(), base);
        config.evolution.base_mutation_rate = 0.02;
        assert_ne!(config.fingerprint(), base);
    }
}
