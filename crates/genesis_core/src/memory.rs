//! Organism memory: short-term, long-term, episodic, and procedural.
//!
//! Short-term entries are promoted to long-term when they are strong,
//! frequently accessed, or emotionally weighted. Consolidation also
//! forgets stale low-value entries so usage stays bounded.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::clock;

/// Short-term entries older than this are candidates for forgetting.
const SHORT_TERM_RETENTION_SECS: u64 = 3600;
/// Episodic memories younger than this are always kept.
const EPISODIC_RETENTION_SECS: u64 = 86_400;

/// A single keyed memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub content: serde_json::Value,
    /// Strength in `0.0..=1.0`; strong entries resist forgetting.
    pub strength: f64,
    pub created_at: u64,
    pub last_accessed: u64,
    pub access_count: u64,
    pub emotional_weight: f64,
}

/// A remembered experience.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodicMemory {
    pub episode_id: String,
    pub description: String,
    pub participants: Vec<String>,
    pub timestamp: u64,
    pub emotional_impact: f64,
    pub lessons: Vec<String>,
    pub outcome_rating: f64,
}

/// A learned skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProceduralMemory {
    pub skill_id: String,
    pub skill_name: String,
    pub proficiency: f64,
    pub usage_frequency: f64,
    pub learned_at: u64,
    pub improvement_rate: f64,
}

/// The full memory system of one organism.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganismMemory {
    pub short_term: HashMap<String, MemoryEntry>,
    pub long_term: HashMap<String, MemoryEntry>,
    pub episodic: Vec<EpisodicMemory>,
    pub procedural: Vec<ProceduralMemory>,
    pub capacity: usize,
    pub usage: usize,
}

impl Default for OrganismMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl OrganismMemory {
    #[must_use]
    pub fn new() -> Self {
        Self {
            short_term: HashMap::new(),
            long_term: HashMap::new(),
            episodic: Vec::new(),
            procedural: Vec::new(),
            capacity: 10_000,
            usage: 0,
        }
    }

    /// Stores a keyed memory. Importance above 0.7 goes straight to
    /// long-term storage.
    pub fn store(&mut self, key: String, content: serde_json::Value, importance: f64) {
        let now = clock::unix_secs();
        let entry = MemoryEntry {
            content,
            strength: importance,
            created_at: now,
            last_accessed: now,
            access_count: 0,
            emotional_weight: 0.5,
        };

        if importance > 0.7 {
            self.long_term.insert(key, entry);
        } else {
            self.short_term.insert(key, entry);
        }
        self.refresh_usage();

        // Consolidate early when approaching capacity.
        if self.usage > self.capacity * 9 / 10 {
            self.consolidate();
        }
    }

    /// Looks up a memory in either store, bumping its access stats.
    pub fn recall(&mut self, key: &str) -> Option<&MemoryEntry> {
        let now = clock::unix_secs();
        let entry = self
            .short_term
            .get_mut(key)
            .or_else(|| self.long_term.get_mut(key))?;
        entry.access_count += 1;
        entry.last_accessed = now;
        Some(entry)
    }

    /// Records an experience.
    pub fn add_episode(
        &mut self,
        description: &str,
        participants: Vec<String>,
        emotional_impact: f64,
        lessons: Vec<String>,
        outcome_rating: f64,
    ) {
        self.episodic.push(EpisodicMemory {
            episode_id: uuid::Uuid::new_v4().to_string(),
            description: description.to_string(),
            participants,
            timestamp: clock::unix_secs(),
            emotional_impact,
            lessons,
            outcome_rating,
        });
        self.usage += 1;
    }

    /// Records a learned skill.
    pub fn learn_skill(&mut self, skill_name: &str, proficiency: f64) {
        self.procedural.push(ProceduralMemory {
            skill_id: uuid::Uuid::new_v4().to_string(),
            skill_name: skill_name.to_string(),
            proficiency,
            usage_frequency: 0.0,
            learned_at: clock::unix_secs(),
            improvement_rate: 0.1,
        });
        self.usage += 1;
    }

    /// Promotes valuable short-term entries to long-term and forgets
    /// stale low-value ones.
    pub fn consolidate(&mut self) {
        let now = clock::unix_secs();

        let to_promote: Vec<String> = self
            .short_term
            .iter()
            .filter(|(_, e)| e.access_count > 3 || e.strength > 0.7 || e.emotional_weight > 0.6)
            .map(|(k, _)| k.clone())
            .collect();
        for key in to_promote {
            if let Some(entry) = self.short_term.remove(&key) {
                self.long_term.insert(key, entry);
            }
        }

        let cutoff = now.saturating_sub(SHORT_TERM_RETENTION_SECS);
        self.short_term.retain(|_, e| {
            e.last_accessed > cutoff || e.strength > 0.5 || e.emotional_weight > 0.6
        });

        self.episodic.retain(|ep| {
            let age = now.saturating_sub(ep.timestamp);
            ep.emotional_impact > 0.3 || age < EPISODIC_RETENTION_SECS
        });

        self.refresh_usage();
    }

    #[must_use]
    pub fn usage_percentage(&self) -> f64 {
        self.usage as f64 / self.capacity as f64 * 100.0
    }

    fn refresh_usage(&mut self) {
        self.usage = self.short_term.len()
            + self.long_term.len()
            + self.episodic.len()
            + self.procedural.len();
    }
}
