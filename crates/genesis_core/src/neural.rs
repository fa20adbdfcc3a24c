//! Synaptic communication between organisms.
//!
//! Messages travel over [`Synapse`] connections with a simulated
//! biological delay derived from the neurotransmitter type, the synapse
//! strength, and the message urgency. Delivery raises the receiving
//! organism's consciousness; the boost depends on the message type.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use uuid::Uuid;

use crate::clock;
use crate::config::NeuralConfig;

/// Neural communication errors.
#[derive(Debug, thiserror::Error)]
pub enum NeuralError {
    #[error("synapse is not active")]
    SynapseInactive,
    #[error("message endpoints do not match synapse")]
    EndpointMismatch,
    #[error("message expired")]
    MessageExpired,
    #[error("payload exceeds {0} bytes")]
    PayloadTooLarge(usize),
    #[error("transmission failed: {0}")]
    TransmissionFailed(String),
}

/// Kinds of neural messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    Consciousness,
    Stimulus,
    Response,
    Evolution,
    Collective,
    Reproduction,
    Apoptosis,
    Learning,
    Memory,
    Emotion,
    Social,
    Warning,
    Resource,
    Maintenance,
}

impl MessageType {
    /// Consciousness boost applied to the receiving organism.
    #[must_use]
    pub fn consciousness_boost(self) -> f64 {
        match self {
            Self::Consciousness => 0.1,
            Self::Learning => 0.05,
            Self::Emotion => 0.04,
            Self::Collective => 0.03,
            Self::Social => 0.02,
            _ => 0.01,
        }
    }
}

/// Simulated neurotransmitters, each with its own base delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Neurotransmitter {
    Glutamate,
    Gaba,
    Dopamine,
    Serotonin,
    Acetylcholine,
    Norepinephrine,
    Oxytocin,
    Endorphin,
    Histamine,
    Adenosine,
}

impl Neurotransmitter {
    /// Base synaptic release delay in nanoseconds.
    #[must_use]
    pub fn base_delay_ns(self) -> u64 {
        match self {
            Self::Glutamate => 500,
            Self::Gaba => 1_000,
            Self::Acetylcholine => 1_500,
            Self::Dopamine => 2_000,
            Self::Norepinephrine => 2_500,
            Self::Histamine => 3_000,
            Self::Serotonin => 5_000,
            Self::Adenosine => 8_000,
            Self::Oxytocin => 10_000,
            Self::Endorphin => 15_000,
        }
    }
}

/// Quality-of-service requirements attached to a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityOfService {
    pub max_latency_ns: u64,
    pub reliability: f64,
    pub bandwidth: u64,
    pub encryption: bool,
}

impl Default for QualityOfService {
    fn default() -> Self {
        Self {
            max_latency_ns: crate::TARGET_NEURAL_LATENCY_NS,
            reliability: 0.99,
            bandwidth: 1_000_000,
            encryption: true,
        }
    }
}

/// Routing metadata for a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingInfo {
    pub direct: bool,
    pub hop_count: u8,
    pub path: Vec<String>,
    pub qos: QualityOfService,
}

/// A message traveling over a synapse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeuralMessage {
    pub message_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub message_type: MessageType,
    pub neurotransmitter: Neurotransmitter,
    pub payload: Vec<u8>,
    /// Creation time in nanoseconds since the UNIX epoch.
    pub timestamp: u64,
    /// Time to live in seconds.
    pub ttl: u64,
    pub signature: Vec<u8>,
    /// Urgency in `0.0..=1.0`; urgent messages travel faster.
    pub urgency: f64,
    pub priority: u8,
    pub routing: RoutingInfo,
}

impl NeuralMessage {
    /// Builds a direct message between two organisms with default
    /// urgency and QoS.
    #[must_use]
    pub fn direct(
        sender_id: &str,
        receiver_id: &str,
        message_type: MessageType,
        neurotransmitter: Neurotransmitter,
        payload: Vec<u8>,
        ttl: u64,
    ) -> Self {
        Self {
            message_id: Uuid::new_v4().to_string(),
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            message_type,
            neurotransmitter,
            payload,
            timestamp: clock::unix_nanos(),
            ttl,
            signature: Vec::new(),
            urgency: 0.5,
            priority: 128,
            routing: RoutingInfo {
                direct: true,
                hop_count: 1,
                path: vec![sender_id.to_string(), receiver_id.to_string()],
                qos: QualityOfService::default(),
            },
        }
    }
}

/// Synapse lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SynapseState {
    Establishing,
    Active,
    Inactive,
    Potentiating,
    Depressing,
    Terminating,
    Closed,
}

/// Running latency statistics for one synapse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyStats {
    pub min_latency: u64,
    pub max_latency: u64,
    pub avg_latency: u64,
    pub last_latency: u64,
    pub measurement_count: u64,
    pub variance: f64,
}

impl Default for LatencyStats {
    fn default() -> Self {
        Self {
            min_latency: u64::MAX,
            max_latency: 0,
            avg_latency: 0,
            last_latency: 0,
            measurement_count: 0,
            variance: 0.0,
        }
    }
}

impl LatencyStats {
    pub fn record(&mut self, latency: u64) {
        self.last_latency = latency;
        self.measurement_count += 1;
        self.min_latency = self.min_latency.min(latency);
        self.max_latency = self.max_latency.max(latency);

        self.avg_latency =
            (self.avg_latency * (self.measurement_count - 1) + latency) / self.measurement_count;

        let diff = latency as f64 - self.avg_latency as f64;
        self.variance = (self.variance * (self.measurement_count - 1) as f64 + diff * diff)
            / self.measurement_count as f64;
    }
}

/// A synaptic connection between two organisms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Synapse {
    pub connection_id: String,
    pub presynaptic_id: String,
    pub postsynaptic_id: String,
    /// Connection strength in `0.0..=1.0`; below 0.1 the synapse
    /// closes.
    pub strength: f64,
    pub neurotransmitter: Neurotransmitter,
    pub last_activity: u64,
    pub total_messages: u64,
    pub success_rate: f64,
    pub created_at: u64,
    /// Ability to change strength; decays with use.
    pub plasticity: f64,
    pub latency_stats: LatencyStats,
    pub state: SynapseState,
    pub bidirectional: bool,
}

fn short(id: &str) -> &str {
    &id[..id.len().min(8)]
}

impl Synapse {
    /// Opens a connection between two organisms.
    #[must_use]
    pub fn establish(from_id: &str, to_id: &str) -> Self {
        let connection_id = format!(
            "synapse_{}_{}_{}",
            short(from_id),
            short(to_id),
            &Uuid::new_v4().to_string()[..8]
        );

        Self {
            connection_id,
            presynaptic_id: from_id.to_string(),
            postsynaptic_id: to_id.to_string(),
            strength: 0.5,
            neurotransmitter: Neurotransmitter::Glutamate,
            last_activity: 0,
            total_messages: 0,
            success_rate: 1.0,
            created_at: clock::unix_secs(),
            plasticity: 0.8,
            latency_stats: LatencyStats::default(),
            state: SynapseState::Establishing,
            bidirectional: true,
        }
    }

    /// Transmits a message, returning the observed latency in
    /// nanoseconds.
    ///
    /// The transmission sleeps for a delay derived from the
    /// neurotransmitter, synapse strength, and message urgency, plus up
    /// to 100ns of jitter. A small configured fraction of transmissions
    /// fails to model an unreliable medium.
    pub async fn transmit(
        &mut self,
        message: &NeuralMessage,
        limits: &NeuralConfig,
        rng: &mut impl rand::Rng,
    ) -> Result<u64, NeuralError> {
        if self.state != SynapseState::Active && self.state != SynapseState::Establishing {
            return Err(NeuralError::SynapseInactive);
        }
        self.validate_message(message, limits)?;

        let start = Instant::now();

        let delay = self.transmission_delay(message, rng);
        tokio::time::sleep(tokio::time::Duration::from_nanos(delay)).await;

        // Network leg: direct connections are near-instant, otherwise
        // each hop costs 500ns.
        let network_delay = if message.routing.direct {
            100
        } else {
            u64::from(message.routing.hop_count) * 500
        };
        tokio::time::sleep(tokio::time::Duration::from_nanos(network_delay)).await;

        self.total_messages += 1;
        self.last_activity = clock::unix_secs();

        if limits.failure_rate > 0.0 && rng.gen_bool(limits.failure_rate) {
            self.success_rate = self.success_rate * 0.95;
            return Err(NeuralError::TransmissionFailed(
                "simulated medium failure".to_string(),
            ));
        }

        let latency = u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX);
        self.latency_stats.record(latency);
        self.success_rate = self.success_rate * 0.95 + 0.05;

        tracing::debug!(
            sender = short(&message.sender_id),
            receiver = short(&message.receiver_id),
            latency_ns = latency,
            "neural message transmitted"
        );
        if latency > crate::TARGET_NEURAL_LATENCY_NS {
            tracing::warn!(
                latency_ns = latency,
                target_ns = crate::TARGET_NEURAL_LATENCY_NS,
                "transmission exceeded target latency"
            );
        }

        Ok(latency)
    }

    /// Hebbian strengthening; caps at 1.0 and consumes plasticity.
    pub fn strengthen(&mut self, factor: f64) {
        if self.plasticity > 0.0 && self.state == SynapseState::Active {
            self.state = SynapseState::Potentiating;
            self.strength = (self.strength + factor * self.plasticity).min(1.0);
            self.plasticity *= 0.995;
            self.state = SynapseState::Active;
        }
    }

    /// Weakens the connection; below 0.1 strength the synapse closes.
    pub fn weaken(&mut self, factor: f64) {
        if self.plasticity > 0.0 && self.state == SynapseState::Active {
            self.state = SynapseState::Depressing;
            self.strength = (self.strength - factor * self.plasticity).max(0.0);
            self.plasticity *= 0.995;
            self.state = if self.strength < 0.1 {
                SynapseState::Closed
            } else {
                SynapseState::Active
            };
        }
    }

    fn transmission_delay(&self, message: &NeuralMessage, rng: &mut impl rand::Rng) -> u64 {
        let base = message.neurotransmitter.base_delay_ns() as f64;
        let strength_factor = 2.0 - self.strength;
        let urgency_factor = 2.0 - message.urgency;
        let jitter = rng.gen_range(0..100u64);
        (base * strength_factor * urgency_factor) as u64 + jitter
    }

    fn validate_message(
        &self,
        message: &NeuralMessage,
        limits: &NeuralConfig,
    ) -> Result<(), NeuralError> {
        if message.sender_id != self.presynaptic_id
            || message.receiver_id != self.postsynaptic_id
        {
            return Err(NeuralError::EndpointMismatch);
        }
        let age_ns = clock::unix_nanos().saturating_sub(message.timestamp);
        if age_ns > message.ttl.saturating_mul(1_000_000_000) {
            return Err(NeuralError::MessageExpired);
        }
        if message.payload.len() > limits.max_payload_bytes {
            return Err(NeuralError::PayloadTooLarge(limits.max_payload_bytes));
        }
        Ok(())
    }

    #[must_use]
    pub fn performance(&self) -> SynapsePerformance {
        SynapsePerformance {
            connection_id: self.connection_id.clone(),
            strength: self.strength,
            success_rate: self.success_rate,
            total_messages: self.total_messages,
            avg_latency: self.latency_stats.avg_latency,
            min_latency: self.latency_stats.min_latency,
            max_latency: self.latency_stats.max_latency,
            plasticity: self.plasticity,
            state: self.state,
            uptime_seconds: clock::unix_secs().saturating_sub(self.created_at),
        }
    }
}

/// Snapshot of one synapse's performance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynapsePerformance {
    pub connection_id: String,
    pub strength: f64,
    pub success_rate: f64,
    pub total_messages: u64,
    pub avg_latency: u64,
    pub min_latency: u64,
    pub max_latency: u64,
    pub plasticity: f64,
    pub state: SynapseState,
    pub uptime_seconds: u64,
}
