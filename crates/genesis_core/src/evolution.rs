//! Evolution engine: mutation selection, population sweeps, and
//! fitness statistics.
//!
//! The engine evolves individual organisms by choosing a mutation
//! class from their current fitness band, sweeps populations against
//! the selection pressure, and adapts its own mutation rate to
//! population health over cycles.

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::config::EvolutionConfig;
use crate::dna::{DigitalDna, DnaError, Mutation};
use crate::organism::Organism;

/// Evolution-related errors.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionError {
    #[error("fitness {0} below survival threshold")]
    InsufficientFitness(f64),
    #[error("mutation failed: {0}")]
    MutationFailed(String),
    #[error("population extinct")]
    PopulationExtinct,
    #[error(transparent)]
    Dna(#[from] DnaError),
}

/// Mutation classes, chosen by fitness band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationClass {
    /// Drawn by organisms above 0.8 fitness.
    Beneficial,
    /// The default class.
    Neutral,
    Harmful,
    /// Drawn by organisms below 0.3 fitness.
    Adaptive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvolutionOutcome {
    Success,
    Failed,
    Extinct,
    Speciation,
}

/// One recorded evolution step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionEvent {
    pub event_id: String,
    pub organism_id: String,
    pub cycle: u64,
    pub mutation: Mutation,
    pub fitness_before: f64,
    pub fitness_after: f64,
    pub selection_pressure: f64,
    pub timestamp: u64,
    pub outcome: EvolutionOutcome,
}

/// Population fitness statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessStats {
    pub average_fitness: f64,
    pub max_fitness: f64,
    pub min_fitness: f64,
    pub fitness_variance: f64,
    pub organism_count: usize,
}

impl Default for FitnessStats {
    fn default() -> Self {
        Self {
            average_fitness: 0.0,
            max_fitness: 0.0,
            min_fitness: f64::INFINITY,
            fitness_variance: 0.0,
            organism_count: 0,
        }
    }
}

impl FitnessStats {
    /// Folds one fitness sample into the running aggregate.
    pub fn record(&mut self, fitness: f64) {
        self.organism_count += 1;
        self.max_fitness = self.max_fitness.max(fitness);
        self.min_fitness = self.min_fitness.min(fitness);
        self.average_fitness = (self.average_fitness * (self.organism_count - 1) as f64
            + fitness)
            / self.organism_count as f64;
    }
}

/// Summary view of the engine state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionStats {
    pub current_cycle: u64,
    pub total_events: usize,
    pub successful_evolutions: usize,
    pub failed_evolutions: usize,
    pub average_fitness: f64,
    pub max_fitness: f64,
    pub min_fitness: f64,
    pub selection_pressure: f64,
    pub mutation_rate: f64,
}

/// Drives evolution across cycles.
#[derive(Debug, Clone)]
pub struct EvolutionEngine {
    pub current_cycle: u64,
    pub selection_pressure: f64,
    pub mutation_rate: f64,
    pub evolution_history: Vec<EvolutionEvent>,
    pub fitness_stats: FitnessStats,
    config: EvolutionConfig,
}

impl EvolutionEngine {
    #[must_use]
    pub fn new(config: EvolutionConfig) -> Self {
        Self {
            current_cycle: 0,
            selection_pressure: config.initial_selection_pressure,
            mutation_rate: config.base_mutation_rate,
            evolution_history: Vec::new(),
            fitness_stats: FitnessStats::default(),
            config,
        }
    }

    /// Evolves one organism by a single mutation.
    ///
    /// Organisms below the survival threshold cannot evolve. The
    /// outcome compares fitness before and after; mutation cost means
    /// most single steps come out `Failed`, which is expected.
    pub fn evolve_organism(
        &mut self,
        organism: &mut Organism,
        rng: &mut impl Rng,
    ) -> Result<EvolutionEvent, EvolutionError> {
        let fitness_before = organism.dna.fitness;
        if fitness_before < self.config.survival_threshold {
            return Err(EvolutionError::InsufficientFitness(fitness_before));
        }

        let mutation = self.pick_mutation(&organism.dna, rng);
        organism
            .dna
            .mutate(mutation.clone())
            .map_err(|e| EvolutionError::MutationFailed(e.to_string()))?;
        organism.age += 1;
        organism.update_lifecycle_state();

        let fitness_after = organism.dna.fitness;
        let event = EvolutionEvent {
            event_id: uuid::Uuid::new_v4().to_string(),
            organism_id: organism.id.clone(),
            cycle: self.current_cycle,
            mutation,
            fitness_before,
            fitness_after,
            selection_pressure: self.selection_pressure,
            timestamp: clock::unix_secs(),
            outcome: if fitness_after > fitness_before {
                EvolutionOutcome::Success
            } else {
                EvolutionOutcome::Failed
            },
        };

        self.push_event(event.clone());
        self.fitness_stats.record(fitness_after);
        Ok(event)
    }

    /// Picks a mutation for the organism's fitness band.
    fn pick_mutation(&self, dna: &DigitalDna, rng: &mut impl Rng) -> Mutation {
        let class = if dna.fitness > 0.8 {
            MutationClass::Beneficial
        } else if dna.fitness < 0.3 {
            MutationClass::Adaptive
        } else {
            MutationClass::Neutral
        };

        match class {
            MutationClass::Beneficial => {
                // Rarely rotate keys; otherwise an ordinary mutation.
                if rng.gen_bool(0.1) {
                    Mutation::KeyEvolution {
                        old_generation: dna.keypair.key_generation,
                        new_generation: dna.keypair.key_generation + 1,
                        timestamp: clock::unix_secs(),
                    }
                } else {
                    dna.random_mutation(rng)
                }
            }
            MutationClass::Adaptive => {
                // Struggling organisms grow their genome.
                let len = dna.sequence.len();
                let start = rng.gen_range(0..len);
                let end = (start + rng.gen_range(1..=8)).min(len);
                Mutation::Duplication {
                    start,
                    end,
                    insert_at: rng.gen_range(0..=len),
                    timestamp: clock::unix_secs(),
                }
            }
            _ => dna.random_mutation(rng),
        }
    }

    /// Eliminates organisms below the selection pressure, returning
    /// their ids. Survivors are left sorted by descending fitness.
    pub fn apply_selection_pressure(&mut self, organisms: &mut Vec<Organism>) -> Vec<String> {
        organisms.sort_by(|a, b| {
            b.dna
                .fitness
                .partial_cmp(&a.dna.fitness)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let threshold = self.selection_pressure;
        let eliminated: Vec<String> = organisms
            .iter()
            .filter(|o| o.dna.fitness < threshold)
            .map(|o| o.id.clone())
            .collect();
        organisms.retain(|o| o.dna.fitness >= threshold);

        self.update_population_stats(organisms);
        eliminated
    }

    /// Recomputes aggregate fitness statistics over a population.
    pub fn update_population_stats(&mut self, organisms: &[Organism]) {
        if organisms.is_empty() {
            return;
        }

        let count = organisms.len();
        let sum: f64 = organisms.par_iter().map(|o| o.dna.fitness).sum();
        let max = organisms
            .par_iter()
            .map(|o| o.dna.fitness)
            .reduce(|| 0.0, f64::max);
        let min = organisms
            .par_iter()
            .map(|o| o.dna.fitness)
            .reduce(|| f64::INFINITY, f64::min);

        let mean = sum / count as f64;
        let variance = organisms
            .par_iter()
            .map(|o| (o.dna.fitness - mean).powi(2))
            .sum::<f64>()
            / count as f64;

        self.fitness_stats = FitnessStats {
            average_fitness: mean,
            max_fitness: max,
            min_fitness: min,
            fitness_variance: variance,
            organism_count: count,
        };
    }

    /// Advances the cycle and adapts the mutation rate to population
    /// health: healthy populations mutate less, struggling ones more.
    pub fn advance_cycle(&mut self) {
        self.current_cycle += 1;

        if self.fitness_stats.average_fitness > 0.8 {
            self.mutation_rate *= 0.9;
        } else if self.fitness_stats.average_fitness < 0.3 {
            self.mutation_rate *= 1.1;
        }
        self.mutation_rate = self.mutation_rate.clamp(0.001, 0.1);

        tracing::debug!(
            cycle = self.current_cycle,
            mutation_rate = self.mutation_rate,
            avg_fitness = self.fitness_stats.average_fitness,
            "evolution cycle advanced"
        );
    }

    #[must_use]
    pub fn stats(&self) -> EvolutionStats {
        EvolutionStats {
            current_cycle: self.current_cycle,
            total_events: self.evolution_history.len(),
            successful_evolutions: self
                .evolution_history
                .iter()
                .filter(|e| e.outcome == EvolutionOutcome::Success)
                .count(),
            failed_evolutions: self
                .evolution_history
                .iter()
                .filter(|e| e.outcome == EvolutionOutcome::Failed)
                .count(),
            average_fitness: self.fitness_stats.average_fitness,
            max_fitness: self.fitness_stats.max_fitness,
            // The running-min sentinel is not a valid JSON number and
            // must not leak into serialized stats.
            min_fitness: if self.fitness_stats.organism_count == 0 {
                0.0
            } else {
                self.fitness_stats.min_fitness
            },
            selection_pressure: self.selection_pressure,
            mutation_rate: self.mutation_rate,
        }
    }

    fn push_event(&mut self, event: EvolutionEvent) {
        self.evolution_history.push(event);
        // Bounded history; drop oldest first.
        let max = self.config.max_history_events;
        if self.evolution_history.len() > max {
            let excess = self.evolution_history.len() - max;
            self.evolution_history.drain(..excess);
        }
    }
}
