//! Social relationships between organisms.
//!
//! Each organism carries a local view of its relationships, split into
//! friends, enemies, family, and colleagues. Reputation and default
//! trust shape how new connections start out.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationshipType {
    Friend,
    Enemy,
    Neutral,
    Mentor,
    Student,
    Competitor,
    Collaborator,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    /// Bond strength in `0.0..=1.0`.
    pub strength: f64,
    pub trust: f64,
    pub interactions: u64,
    pub last_interaction: u64,
    pub relationship_type: RelationshipType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FamilyType {
    Parent,
    Child,
    Sibling,
    Grandparent,
    Grandchild,
    Cousin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyRelation {
    pub relation_type: FamilyType,
    pub genetic_similarity: f64,
    pub bond_strength: f64,
}

/// One organism's view of its social world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialNetwork {
    pub friends: HashMap<String, Relationship>,
    pub enemies: HashMap<String, Relationship>,
    pub family: HashMap<String, FamilyRelation>,
    pub colleagues: HashMap<String, Relationship>,
    pub reputation: f64,
    /// Starting trust granted to unknown organisms.
    pub default_trust: f64,
}

impl Default for SocialNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl SocialNetwork {
    #[must_use]
    pub fn new() -> Self {
        Self {
            friends: HashMap::new(),
            enemies: HashMap::new(),
            family: HashMap::new(),
            colleagues: HashMap::new(),
            reputation: 0.5,
            default_trust: 0.3,
        }
    }

    /// Records an interaction, creating the relationship if needed.
    ///
    /// Friends and enemies go into their own maps; every other type is
    /// tracked as a colleague. Strength is clamped to `0.0..=1.0`.
    pub fn record_interaction(
        &mut self,
        organism_id: &str,
        relationship_type: RelationshipType,
        strength_change: f64,
    ) {
        let now = clock::unix_secs();
        let default_trust = self.default_trust;

        let (map, trust) = match relationship_type {
            RelationshipType::Friend => (&mut self.friends, default_trust),
            RelationshipType::Enemy => (&mut self.enemies, 0.0),
            _ => (&mut self.colleagues, default_trust),
        };

        let relationship = map
            .entry(organism_id.to_string())
            .or_insert(Relationship {
                strength: 0.0,
                trust,
                interactions: 0,
                last_interaction: now,
                relationship_type,
            });
        relationship.strength = (relationship.strength + strength_change).clamp(0.0, 1.0);
        relationship.interactions += 1;
        relationship.last_interaction = now;
    }

    /// Registers a parent, used when an offspring is created.
    pub fn add_parent(&mut self, parent_id: &str) {
        self.family.insert(
            parent_id.to_string(),
            FamilyRelation {
                relation_type: FamilyType::Parent,
                genetic_similarity: 0.5,
                bond_strength: 0.8,
            },
        );
    }

    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.friends.len() + self.enemies.len() + self.family.len() + self.colleagues.len()
    }
}
