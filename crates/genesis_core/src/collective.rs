//! Collective intelligence: groups, decisions, swarm behavior, and
//! shared memory.
//!
//! Groups of organisms can propose decisions, vote on options, and
//! accumulate shared knowledge. Votes are weighted by strength times
//! confidence; two resolution algorithms are implemented, simple
//! majority and fitness-weighted.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::clock;

/// Collective intelligence errors.
#[derive(Debug, thiserror::Error)]
pub enum CollectiveError {
    #[error("group not found: {0}")]
    GroupNotFound(String),
    #[error("decision not found: {0}")]
    DecisionNotFound(String),
    #[error("option not found: {0}")]
    OptionNotFound(String),
    #[error("decision is not open for voting")]
    DecisionNotVoting,
    #[error("no votes cast")]
    NoVotesCast,
    #[error("decision algorithm not implemented")]
    AlgorithmNotImplemented,
    #[error("organism is not a decision participant: {0}")]
    NotAParticipant(String),
}

/// A group of organisms working together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganismGroup {
    pub group_id: String,
    pub members: Vec<String>,
    pub purpose: String,
    pub intelligence_level: f64,
    /// Cohesion in `0.0..=1.0`; rises with successful decisions.
    pub cohesion: f64,
    pub created_at: u64,
}

/// How a decision is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionAlgorithm {
    /// Most votes wins.
    Majority,
    /// Highest accumulated weight wins.
    WeightedByFitness,
    Consensus,
    SwarmIntelligence,
    NeuralNetwork,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionStatus {
    Proposed,
    Voting,
    Decided,
    Cancelled,
    Executing,
    Complete,
}

/// One vote on a decision option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub organism_id: String,
    pub strength: f64,
    pub confidence: f64,
    pub timestamp: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionOption {
    pub option_id: String,
    pub description: String,
    pub votes: Vec<Vote>,
    /// Accumulated `strength * confidence` over all votes.
    pub weight: f64,
}

/// A decision being made collectively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectiveDecision {
    pub decision_id: String,
    pub question: String,
    pub participants: Vec<String>,
    pub options: Vec<DecisionOption>,
    pub algorithm: DecisionAlgorithm,
    pub status: DecisionStatus,
    pub result: Option<String>,
    pub confidence: f64,
    pub timestamp: u64,
}

/// Swarm behavior patterns a group can exhibit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwarmBehaviorType {
    Flocking,
    Foraging,
    ProblemSolving,
    InformationSharing,
    CoordinatedEvolution,
    Defense,
    Exploration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwarmBehavior {
    pub behavior_id: String,
    pub name: String,
    pub behavior_type: SwarmBehaviorType,
    pub participants: Vec<String>,
    pub parameters: HashMap<String, f64>,
    pub effectiveness: f64,
    pub created_at: u64,
}

/// A fact shared across the collective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedKnowledge {
    pub knowledge_id: String,
    pub content: String,
    pub contributors: Vec<String>,
    pub reliability: f64,
    pub created_at: u64,
    pub access_count: u64,
}

/// Knowledge shared by the whole collective.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectiveMemory {
    pub knowledge_base: HashMap<String, SharedKnowledge>,
}

/// Aggregate metrics for the collective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntelligenceMetrics {
    pub total_groups: usize,
    pub active_decisions: usize,
    pub successful_decisions: u64,
    pub failed_decisions: u64,
    pub collective_iq: f64,
}

impl Default for IntelligenceMetrics {
    fn default() -> Self {
        Self {
            total_groups: 0,
            active_decisions: 0,
            successful_decisions: 0,
            failed_decisions: 0,
            collective_iq: 100.0,
        }
    }
}

/// Coordinates groups, decisions, and swarm behavior.
#[derive(Debug, Clone, Default)]
pub struct CollectiveIntelligence {
    pub groups: HashMap<String, OrganismGroup>,
    pub active_decisions: Vec<CollectiveDecision>,
    pub swarm_behaviors: Vec<SwarmBehavior>,
    pub collective_memory: CollectiveMemory,
    pub metrics: IntelligenceMetrics,
}

impl CollectiveIntelligence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new group.
    pub fn create_group(&mut self, members: Vec<String>, purpose: String) -> String {
        let group_id = format!("group_{}", uuid::Uuid::new_v4());
        self.groups.insert(
            group_id.clone(),
            OrganismGroup {
                group_id: group_id.clone(),
                members,
                purpose,
                intelligence_level: 0.5,
                cohesion: 0.6,
                created_at: clock::unix_secs(),
            },
        );
        self.metrics.total_groups += 1;
        group_id
    }

    /// Proposes a decision. It must be opened for voting before votes
    /// are accepted.
    pub fn initiate_decision(
        &mut self,
        question: String,
        participants: Vec<String>,
        options: Vec<String>,
        algorithm: DecisionAlgorithm,
    ) -> String {
        let decision_id = format!("decision_{}", uuid::Uuid::new_v4());
        let options = options
            .into_iter()
            .map(|description| DecisionOption {
                option_id: uuid::Uuid::new_v4().to_string(),
                description,
                votes: Vec::new(),
                weight: 0.0,
            })
            .collect();

        self.active_decisions.push(CollectiveDecision {
            decision_id: decision_id.clone(),
            question,
            participants,
            options,
            algorithm,
            status: DecisionStatus::Proposed,
            result: None,
            confidence: 0.0,
            timestamp: clock::unix_secs(),
        });
        self.metrics.active_decisions += 1;
        decision_id
    }

    /// Moves a proposed decision into the voting phase.
    pub fn open_voting(&mut self, decision_id: &str) -> Result<(), CollectiveError> {
        let decision = self.decision_mut(decision_id)?;
        decision.status = DecisionStatus::Voting;
        Ok(())
    }

    /// Casts a vote. The decision must be open for voting and the
    /// voter must be a participant.
    pub fn cast_vote(
        &mut self,
        decision_id: &str,
        organism_id: &str,
        option_id: &str,
        strength: f64,
        confidence: f64,
    ) -> Result<(), CollectiveError> {
        let decision = self.decision_mut(decision_id)?;
        if decision.status != DecisionStatus::Voting {
            return Err(CollectiveError::DecisionNotVoting);
        }
        if !decision.participants.iter().any(|p| p == organism_id) {
            return Err(CollectiveError::NotAParticipant(organism_id.to_string()));
        }

        let option = decision
            .options
            .iter_mut()
            .find(|o| o.option_id == option_id)
            .ok_or_else(|| CollectiveError::OptionNotFound(option_id.to_string()))?;

        option.votes.push(Vote {
            organism_id: organism_id.to_string(),
            strength,
            confidence,
            timestamp: clock::unix_secs(),
        });
        option.weight += strength * confidence;
        Ok(())
    }

    /// Resolves a decision and returns the winning option description.
    ///
    /// Groups containing all participants get a cohesion boost from a
    /// successfully decided question.
    pub fn finalize_decision(&mut self, decision_id: &str) -> Result<String, CollectiveError> {
        let decision = self
            .active_decisions
            .iter_mut()
            .find(|d| d.decision_id == decision_id)
            .ok_or_else(|| CollectiveError::DecisionNotFound(decision_id.to_string()))?;

        let winner = match decision.algorithm {
            DecisionAlgorithm::Majority => decision
                .options
                .iter()
                .max_by_key(|o| o.votes.len())
                .filter(|o| !o.votes.is_empty()),
            DecisionAlgorithm::WeightedByFitness => decision
                .options
                .iter()
                .max_by(|a, b| {
                    a.weight
                        .partial_cmp(&b.weight)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .filter(|o| o.weight > 0.0),
            _ => return Err(CollectiveError::AlgorithmNotImplemented),
        };
        let Some(winner) = winner else {
            return Err(CollectiveError::NoVotesCast);
        };

        let result = winner.description.clone();
        decision.confidence = match decision.algorithm {
            DecisionAlgorithm::Majority => {
                winner.votes.len() as f64 / decision.participants.len().max(1) as f64
            }
            _ => winner.weight / decision.options.len().max(1) as f64,
        };
        decision.result = Some(result.clone());
        decision.status = DecisionStatus::Decided;

        let participants = decision.participants.clone();
        self.metrics.successful_decisions += 1;
        self.metrics.active_decisions = self.metrics.active_decisions.saturating_sub(1);

        for group in self.groups.values_mut() {
            if participants.iter().all(|p| group.members.contains(p)) {
                group.cohesion = (group.cohesion + 0.05).min(1.0);
                group.intelligence_level = (group.intelligence_level + 0.02).min(1.0);
            }
        }

        tracing::info!(decision = decision_id, result = %result, "decision finalized");
        Ok(result)
    }

    /// Registers a swarm behavior pattern for a set of organisms.
    pub fn register_swarm_behavior(
        &mut self,
        name: &str,
        behavior_type: SwarmBehaviorType,
        participants: Vec<String>,
        parameters: HashMap<String, f64>,
    ) -> String {
        let behavior_id = uuid::Uuid::new_v4().to_string();
        self.swarm_behaviors.push(SwarmBehavior {
            behavior_id: behavior_id.clone(),
            name: name.to_string(),
            behavior_type,
            participants,
            parameters,
            effectiveness: 0.5,
            created_at: clock::unix_secs(),
        });
        behavior_id
    }

    /// Contributes a fact to the shared knowledge base. Repeat
    /// contributions raise reliability.
    pub fn share_knowledge(&mut self, key: &str, content: &str, contributor: &str) {
        let entry = self
            .collective_memory
            .knowledge_base
            .entry(key.to_string())
            .or_insert_with(|| SharedKnowledge {
                knowledge_id: uuid::Uuid::new_v4().to_string(),
                content: content.to_string(),
                contributors: Vec::new(),
                reliability: 0.5,
                created_at: clock::unix_secs(),
                access_count: 0,
            });

        if !entry.contributors.iter().any(|c| c == contributor) {
            entry.contributors.push(contributor.to_string());
            entry.reliability = (entry.reliability + 0.1).min(1.0);
        }
    }

    /// Looks up shared knowledge, bumping its access count.
    pub fn recall_knowledge(&mut self, key: &str) -> Option<&SharedKnowledge> {
        let entry = self.collective_memory.knowledge_base.get_mut(key)?;
        entry.access_count += 1;
        Some(entry)
    }

    #[must_use]
    pub fn metrics(&self) -> IntelligenceMetrics {
        self.metrics.clone()
    }

    fn decision_mut(
        &mut self,
        decision_id: &str,
    ) -> Result<&mut CollectiveDecision, CollectiveError> {
        self.active_decisions
            .iter_mut()
            .find(|d| d.decision_id == decision_id)
            .ok_or_else(|| CollectiveError::DecisionNotFound(decision_id.to_string()))
    }
}
