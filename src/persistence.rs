//! Snapshot persistence for protocol state.
//!
//! Snapshots are gzip-compressed JSON. DNA secret keys are never
//! serialized, so organisms are re-keyed on restore; their ids, genomes,
//! and fitness survive, their signing identity does not.

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use genesis_core::clock;
use genesis_core::evolution::EvolutionStats;
use genesis_core::organism::Organism;

use crate::error::GenesisError;
use crate::protocol::GenesisProtocol;

/// Serialized protocol state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolSnapshot {
    pub protocol_version: String,
    pub config_fingerprint: String,
    pub saved_at: u64,
    pub organisms: Vec<Organism>,
    pub evolution: EvolutionStats,
}

/// Captures the current protocol state.
#[must_use]
pub fn snapshot(protocol: &GenesisProtocol) -> ProtocolSnapshot {
    ProtocolSnapshot {
        protocol_version: genesis_core::PROTOCOL_VERSION.to_string(),
        config_fingerprint: protocol.config.fingerprint(),
        saved_at: clock::unix_secs(),
        organisms: protocol.organisms.values().cloned().collect(),
        evolution: protocol.evolution_engine.stats(),
    }
}

/// Writes a gzip-compressed snapshot to disk.
pub fn save(protocol: &GenesisProtocol, path: &Path) -> Result<(), GenesisError> {
    let state = snapshot(protocol);
    let json = serde_json::to_vec(&state)?;

    let file = File::create(path)?;
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(&json)?;
    encoder.finish()?;

    tracing::info!(
        path = %path.display(),
        organisms = state.organisms.len(),
        "snapshot saved"
    );
    Ok(())
}

/// Reads and version-checks a snapshot from disk.
pub fn load(path: &Path) -> Result<ProtocolSnapshot, GenesisError> {
    let file = File::open(path)?;
    let mut decoder = GzDecoder::new(file);
    let mut json = Vec::new();
    decoder.read_to_end(&mut json)?;

    let state: ProtocolSnapshot = serde_json::from_slice(&json)?;
    if state.protocol_version != genesis_core::PROTOCOL_VERSION {
        return Err(GenesisError::SnapshotVersionMismatch(state.protocol_version));
    }
    Ok(state)
}

/// Replaces a protocol's population with a snapshot's.
///
/// Each organism is re-keyed because the secret half of its keypair
/// is not persisted. The evolution engine resumes at the saved cycle,
/// pressure, and mutation rate.
pub fn restore(protocol: &mut GenesisProtocol, state: ProtocolSnapshot) {
    protocol.organisms.clear();
    for mut organism in state.organisms {
        let rng = protocol.rng_mut();
        organism.dna.rekey(rng);
        protocol.network.register_local(&organism.id);
        protocol.organisms.insert(organism.id.clone(), organism);
    }

    protocol.evolution_engine.current_cycle = state.evolution.current_cycle;
    protocol.evolution_engine.selection_pressure = state.evolution.selection_pressure;
    protocol.evolution_engine.mutation_rate = state.evolution.mutation_rate;

    tracing::info!(
        organisms = protocol.organisms.len(),
        cycle = state.evolution.current_cycle,
        "snapshot restored"
    );
}
