//! Digital DNA: the genetic and cryptographic identity of an organism.
//!
//! A DNA carries a byte sequence that mutates and recombines like
//! genetic material, plus an Ed25519 keypair used to sign and verify
//! messages. Fitness evolves with organism performance and decays
//! slightly with every mutation.
//!
//! All randomness is taken from an explicit [`rand::Rng`], so seeded
//! runs are fully reproducible.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::clock;

/// Errors raised by DNA operations.
#[derive(Debug, thiserror::Error)]
pub enum DnaError {
    #[error("invalid public key format")]
    InvalidPublicKey,
    #[error("invalid mutation position: {0}")]
    InvalidMutationPosition(usize),
    #[error("invalid mutation range: {0}..{1}")]
    InvalidMutationRange(usize, usize),
    #[error("crossover compatibility below threshold")]
    CrossoverIncompatible,
    #[error("sequence too short for crossover")]
    SequenceTooShort,
}

/// Ed25519 keypair embedded in DNA.
///
/// The secret key is never serialized; deserialized DNA must be
/// re-keyed before it can sign again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnaKeypair {
    pub public_key: [u8; 32],
    #[serde(skip)]
    pub secret_key: [u8; 32],
    /// Generation at which the current keys were derived.
    pub key_generation: u64,
    /// Hierarchical derivation path, one entry per key evolution.
    pub derivation_path: Vec<u32>,
}

/// Biological properties tracked alongside the sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnaMetadata {
    pub species: String,
    /// Age in evolution cycles.
    pub biological_age: u64,
    pub mutation_rate: f64,
    pub crossover_compatibility: f64,
    pub adaptation_score: f64,
    pub reproductive_success: f64,
    pub neural_complexity: f64,
}

/// Structural changes a sequence can undergo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Mutation {
    /// Single byte substitution.
    Point {
        position: usize,
        old_value: u8,
        new_value: u8,
        timestamp: u64,
    },
    /// New bytes spliced in at a position.
    Insertion {
        position: usize,
        sequence: Vec<u8>,
        timestamp: u64,
    },
    /// Contiguous bytes removed.
    Deletion {
        position: usize,
        length: usize,
        timestamp: u64,
    },
    /// A segment copied and inserted elsewhere.
    Duplication {
        start: usize,
        end: usize,
        insert_at: usize,
        timestamp: u64,
    },
    /// A segment reversed in place.
    Inversion {
        start: usize,
        end: usize,
        timestamp: u64,
    },
    /// A segment moved to a different position.
    Translocation {
        from_start: usize,
        from_end: usize,
        to_position: usize,
        timestamp: u64,
    },
    /// Deterministic rotation of the signing keys.
    KeyEvolution {
        old_generation: u64,
        new_generation: u64,
        timestamp: u64,
    },
}

/// Flat summary of a DNA, suitable for display and serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnaInfo {
    pub hash: String,
    pub generation: u64,
    pub sequence_length: usize,
    pub fitness: f64,
    pub mutation_count: usize,
    pub biological_age: u64,
    pub species: String,
    pub mutation_rate: f64,
    pub adaptation_score: f64,
    pub neural_complexity: f64,
    pub created_at: u64,
    pub key_generation: u64,
}

/// The genetic foundation of an organism.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigitalDna {
    /// The mutable genetic sequence, 64 bytes at birth.
    pub sequence: Vec<u8>,
    /// Generation counter, bumped by every mutation and crossover.
    pub generation: u64,
    /// History of applied mutations.
    pub mutations: Vec<Mutation>,
    /// Current fitness, clamped to `0.0..=2.0`.
    pub fitness: f64,
    /// Hash of the parent DNA when created through reproduction.
    pub parent_hash: Option<String>,
    pub created_at: u64,
    pub keypair: DnaKeypair,
    pub metadata: DnaMetadata,
}

impl DigitalDna {
    /// Generates fresh DNA with a new cryptographic identity.
    pub fn generate(rng: &mut impl Rng) -> Self {
        let mut secret_bytes = [0u8; 32];
        rng.fill_bytes(&mut secret_bytes);
        let signing_key = SigningKey::from_bytes(&secret_bytes);
        let verifying_key = signing_key.verifying_key();

        // The base sequence is derived from the public key plus fresh
        // entropy, then extended to 64 bytes by chained hashing.
        let mut hasher = Sha256::new();
        hasher.update(verifying_key.to_bytes());
        hasher.update(rng.gen::<u64>().to_le_bytes());
        let mut sequence = hasher.finalize().to_vec();

        for _ in 0..8 {
            let mut hasher = Sha256::new();
            hasher.update(&sequence);
            hasher.update(rng.gen::<u64>().to_le_bytes());
            sequence.extend_from_slice(&hasher.finalize()[..4]);
        }

        Self {
            sequence,
            generation: 0,
            mutations: Vec::new(),
            fitness: 1.0,
            parent_hash: None,
            created_at: clock::unix_secs(),
            keypair: DnaKeypair {
                public_key: verifying_key.to_bytes(),
                secret_key: signing_key.to_bytes(),
                key_generation: 0,
                derivation_path: vec![0],
            },
            metadata: DnaMetadata {
                species: "genesis".to_string(),
                biological_age: 0,
                mutation_rate: 0.01,
                crossover_compatibility: 0.8,
                adaptation_score: 0.5,
                reproductive_success: 0.0,
                neural_complexity: 0.1,
            },
        }
    }

    /// Applies a mutation, recording it in the history.
    ///
    /// Every mutation costs 2% fitness and bumps the generation. Range
    /// and position arguments are validated against the current
    /// sequence before anything is modified.
    pub fn mutate(&mut self, mutation: Mutation) -> Result<(), DnaError> {
        match &mutation {
            Mutation::Point {
                position,
                new_value,
                ..
            } => {
                if *position >= self.sequence.len() {
                    return Err(DnaError::InvalidMutationPosition(*position));
                }
                self.sequence[*position] = *new_value;
            }
            Mutation::Insertion {
                position, sequence, ..
            } => {
                if *position > self.sequence.len() {
                    return Err(DnaError::InvalidMutationPosition(*position));
                }
                self.sequence
                    .splice(*position..*position, sequence.iter().copied());
            }
            Mutation::Deletion {
                position, length, ..
            } => {
                if *position >= self.sequence.len()
                    || position + length > self.sequence.len()
                {
                    return Err(DnaError::InvalidMutationPosition(*position));
                }
                self.sequence.drain(*position..position + length);
            }
            Mutation::Duplication {
                start,
                end,
                insert_at,
                ..
            } => {
                if *start >= *end || *end > self.sequence.len() {
                    return Err(DnaError::InvalidMutationRange(*start, *end));
                }
                let segment = self.sequence[*start..*end].to_vec();
                let at = (*insert_at).min(self.sequence.len());
                self.sequence.splice(at..at, segment);
            }
            Mutation::Inversion { start, end, .. } => {
                if *start >= *end || *end > self.sequence.len() {
                    return Err(DnaError::InvalidMutationRange(*start, *end));
                }
                self.sequence[*start..*end].reverse();
            }
            Mutation::Translocation {
                from_start,
                from_end,
                to_position,
                ..
            } => {
                if *from_start >= *from_end || *from_end > self.sequence.len() {
                    return Err(DnaError::InvalidMutationRange(*from_start, *from_end));
                }
                let segment: Vec<u8> = self.sequence.drain(*from_start..*from_end).collect();
                let at = (*to_position).min(self.sequence.len());
                self.sequence.splice(at..at, segment);
            }
            Mutation::KeyEvolution { new_generation, .. } => {
                self.evolve_keys(*new_generation);
            }
        }

        self.mutations.push(mutation);
        self.generation += 1;
        self.metadata.biological_age += 1;

        // Mutation carries a small fitness cost.
        self.fitness *= 0.98;
        self.metadata.mutation_rate = self.metadata.mutation_rate * 0.9 + 0.1 * 0.01;
        self.metadata.adaptation_score *= 0.95;

        Ok(())
    }

    /// Draws a random mutation that is valid for the current sequence.
    pub fn random_mutation(&self, rng: &mut impl Rng) -> Mutation {
        let timestamp = clock::unix_secs();
        let len = self.sequence.len();
        debug_assert!(len > 0, "sequence is never empty");

        match rng.gen_range(0..7u8) {
            0 => {
                let position = rng.gen_range(0..len);
                Mutation::Point {
                    position,
                    old_value: self.sequence[position],
                    new_value: rng.gen(),
                    timestamp,
                }
            }
            1 => Mutation::Insertion {
                position: rng.gen_range(0..=len),
                sequence: (0..rng.gen_range(1..=8)).map(|_| rng.gen()).collect(),
                timestamp,
            },
            2 => {
                let position = rng.gen_range(0..len);
                let length = rng.gen_range(1..=4).min(len - position);
                Mutation::Deletion {
                    position,
                    length,
                    timestamp,
                }
            }
            3 => {
                let start = rng.gen_range(0..len);
                let end = (start + rng.gen_range(1..=8)).min(len);
                Mutation::Duplication {
                    start,
                    end,
                    insert_at: rng.gen_range(0..=len),
                    timestamp,
                }
            }
            4 => {
                let start = rng.gen_range(0..len);
                let end = (start + rng.gen_range(1..=8)).min(len);
                Mutation::Inversion {
                    start,
                    end,
                    timestamp,
                }
            }
            5 => {
                let from_start = rng.gen_range(0..len);
                let from_end = (from_start + rng.gen_range(1..=4)).min(len);
                Mutation::Translocation {
                    from_start,
                    from_end,
                    to_position: rng.gen_range(0..=len),
                    timestamp,
                }
            }
            _ => Mutation::KeyEvolution {
                old_generation: self.keypair.key_generation,
                new_generation: self.keypair.key_generation + 1,
                timestamp,
            },
        }
    }

    /// Two-point crossover with another DNA.
    ///
    /// Both parents must have crossover compatibility of at least 0.5
    /// and sequences of at least 4 bytes. The child takes the head and
    /// tail from `self` and the middle segment from `other`, inherits
    /// the fitter parent's fitness with a 5% regression, and averages
    /// the biological metadata.
    pub fn crossover(&self, other: &DigitalDna, rng: &mut impl Rng) -> Result<Self, DnaError> {
        if self.metadata.crossover_compatibility < 0.5
            || other.metadata.crossover_compatibility < 0.5
        {
            return Err(DnaError::CrossoverIncompatible);
        }

        let min_len = self.sequence.len().min(other.sequence.len());
        if min_len < 4 {
            return Err(DnaError::SequenceTooShort);
        }

        let point1 = rng.gen_range(0..min_len / 2);
        let point2 = min_len / 2 + rng.gen_range(0..min_len / 2);

        let mut sequence = Vec::with_capacity(self.sequence.len());
        sequence.extend_from_slice(&self.sequence[..point1]);
        sequence.extend_from_slice(&other.sequence[point1..point2]);
        sequence.extend_from_slice(&self.sequence[point2..]);

        let mut child = Self::generate(rng);
        child.sequence = sequence;
        child.generation = self.generation.max(other.generation) + 1;
        child.parent_hash = Some(self.hash());

        child.metadata.species = if rng.gen() {
            self.metadata.species.clone()
        } else {
            other.metadata.species.clone()
        };
        child.metadata.mutation_rate =
            (self.metadata.mutation_rate + other.metadata.mutation_rate) / 2.0;
        child.metadata.crossover_compatibility = (self.metadata.crossover_compatibility
            + other.metadata.crossover_compatibility)
            / 2.0;
        child.metadata.adaptation_score =
            (self.metadata.adaptation_score + other.metadata.adaptation_score) / 2.0;
        child.metadata.neural_complexity =
            (self.metadata.neural_complexity + other.metadata.neural_complexity) / 2.0;

        child.fitness = self.fitness.max(other.fitness) * 0.95;

        Ok(child)
    }

    /// Rotates the signing keys to a new generation.
    ///
    /// Derivation is deterministic: the new seed is a hash of the old
    /// secret, the target generation, and the current sequence, so the
    /// same DNA state always evolves to the same keys.
    pub fn evolve_keys(&mut self, new_generation: u64) {
        let mut hasher = Sha256::new();
        hasher.update(self.keypair.secret_key);
        hasher.update(new_generation.to_le_bytes());
        hasher.update(&self.sequence);
        let seed: [u8; 32] = hasher.finalize().into();

        let mut derived = ChaCha8Rng::from_seed(seed);
        let mut secret_bytes = [0u8; 32];
        derived.fill_bytes(&mut secret_bytes);
        let signing_key = SigningKey::from_bytes(&secret_bytes);

        let mut derivation_path = self.keypair.derivation_path.clone();
        derivation_path.push(new_generation as u32);

        self.keypair = DnaKeypair {
            public_key: signing_key.verifying_key().to_bytes(),
            secret_key: signing_key.to_bytes(),
            key_generation: new_generation,
            derivation_path,
        };
    }

    /// Regenerates the keypair in place after deserialization dropped
    /// the secret key.
    pub fn rekey(&mut self, rng: &mut impl Rng) {
        let mut secret_bytes = [0u8; 32];
        rng.fill_bytes(&mut secret_bytes);
        let signing_key = SigningKey::from_bytes(&secret_bytes);
        self.keypair.public_key = signing_key.verifying_key().to_bytes();
        self.keypair.secret_key = signing_key.to_bytes();
    }

    /// Content hash over sequence, generation, and public key.
    #[must_use]
    pub fn hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.sequence);
        hasher.update(self.generation.to_le_bytes());
        hasher.update(self.keypair.public_key);
        hex::encode(hasher.finalize())
    }

    /// Signs data with the embedded secret key.
    #[must_use]
    pub fn sign(&self, data: &[u8]) -> Vec<u8> {
        let signing_key = SigningKey::from_bytes(&self.keypair.secret_key);
        signing_key.sign(data).to_bytes().to_vec()
    }

    /// Verifies a signature against the embedded public key.
    #[must_use]
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.keypair.public_key) else {
            return false;
        };
        let Ok(sig_bytes) = <[u8; 64]>::try_from(signature) else {
            return false;
        };
        let sig = Signature::from_bytes(&sig_bytes);
        verifying_key.verify(data, &sig).is_ok()
    }

    /// Normalized genetic distance in `0.0..=1.0`.
    ///
    /// Hamming distance over the shared prefix plus the length delta,
    /// divided by the longer sequence length.
    #[must_use]
    pub fn genetic_distance(&self, other: &DigitalDna) -> f64 {
        let min_len = self.sequence.len().min(other.sequence.len());
        let max_len = self.sequence.len().max(other.sequence.len());
        if max_len == 0 {
            return 0.0;
        }

        let mut differences = max_len - min_len;
        for i in 0..min_len {
            if self.sequence[i] != other.sequence[i] {
                differences += 1;
            }
        }
        differences as f64 / max_len as f64
    }

    /// Folds a performance score into fitness as an exponential moving
    /// average, clamped to `0.0..=2.0`.
    pub fn update_fitness(&mut self, performance_score: f64) {
        self.fitness = self.fitness * 0.9 + performance_score * 0.1;
        self.metadata.adaptation_score =
            self.metadata.adaptation_score * 0.8 + performance_score * 0.2;
        self.fitness = self.fitness.clamp(0.0, 2.0);
    }

    #[must_use]
    pub fn info(&self) -> DnaInfo {
        DnaInfo {
            hash: self.hash(),
            generation: self.generation,
            sequence_length: self.sequence.len(),
            fitness: self.fitness,
            mutation_count: self.mutations.len(),
            biological_age: self.metadata.biological_age,
            species: self.metadata.species.clone(),
            mutation_rate: self.metadata.mutation_rate,
            adaptation_score: self.metadata.adaptation_score,
            neural_complexity: self.metadata.neural_complexity,
            created_at: self.created_at,
            key_generation: self.keypair.key_generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_generate_fresh_dna() {
        let mut rng = rng();
        let dna = DigitalDna::generate(&mut rng);
        assert_eq!(dna.sequence.len(), 64);
        assert_eq!(dna.generation, 0);
        assert_eq!(dna.fitness, 1.0);
        assert!(dna.mutations.is_empty());
        assert!(dna.parent_hash.is_none());
    }

    #[test]
    fn test_generate_is_seed_deterministic() {
        let a = DigitalDna::generate(&mut rng());
        let b = DigitalDna::generate(&mut rng());
        assert_eq!(a.sequence, b.sequence);
        assert_eq!(a.keypair.public_key, b.keypair.public_key);
    }

    #[test]
    fn test_hash_stable_and_hex() {
        let dna = DigitalDna::generate(&mut rng());
        let hash = dna.hash();
        assert_eq!(hash, dna.hash());
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_sign_and_verify() {
        let dna = DigitalDna::generate(&mut rng());
        let message = b"synaptic payload";
        let signature = dna.sign(message);
        assert!(dna.verify(message, &signature));
        assert!(!dna.verify(b"tampered payload", &signature));
        assert!(!dna.verify(message, &signature[..63]));
    }

    #[test]
    fn test_point_mutation_costs_fitness() {
        let mut dna = DigitalDna::generate(&mut rng());
        let old_value = dna.sequence[0];
        dna.mutate(Mutation::Point {
            position: 0,
            old_value,
            new_value: old_value.wrapping_add(1),
            timestamp: 0,
        })
        .unwrap();

        assert_eq!(dna.sequence[0], old_value.wrapping_add(1));
        assert_eq!(dna.generation, 1);
        assert_eq!(dna.mutations.len(), 1);
        assert!(dna.fitness < 1.0);
    }

    #[test]
    fn test_insertion_and_deletion() {
        let mut dna = DigitalDna::generate(&mut rng());
        let len = dna.sequence.len();

        dna.mutate(Mutation::Insertion {
            position: 0,
            sequence: vec![1, 2, 3],
            timestamp: 0,
        })
        .unwrap();
        assert_eq!(dna.sequence.len(), len + 3);
        assert_eq!(&dna.sequence[..3], &[1, 2, 3]);

        dna.mutate(Mutation::Deletion {
            position: 0,
            length: 3,
            timestamp: 0,
        })
        .unwrap();
        assert_eq!(dna.sequence.len(), len);
    }

    #[test]
    fn test_out_of_bounds_mutation_rejected() {
        let mut dna = DigitalDna::generate(&mut rng());
        let len = dna.sequence.len();
        let before = dna.sequence.clone();

        let err = dna
            .mutate(Mutation::Point {
                position: len,
                old_value: 0,
                new_value: 0,
                timestamp: 0,
            })
            .unwrap_err();
        assert!(matches!(err, DnaError::InvalidMutationPosition(_)));

        let err = dna
            .mutate(Mutation::Inversion {
                start: 10,
                end: 5,
                timestamp: 0,
            })
            .unwrap_err();
        assert!(matches!(err, DnaError::InvalidMutationRange(10, 5)));

        // Failed mutations must not touch state.
        assert_eq!(dna.sequence, before);
        assert_eq!(dna.generation, 0);
        assert!(dna.mutations.is_empty());
    }

    #[test]
    fn test_inversion_round_trips() {
        let mut dna = DigitalDna::generate(&mut rng());
        let before = dna.sequence.clone();
        for _ in 0..2 {
            dna.mutate(Mutation::Inversion {
                start: 4,
                end: 12,
                timestamp: 0,
            })
            .unwrap();
        }
        assert_eq!(dna.sequence, before);
    }

    #[test]
    fn test_crossover_child_lineage() {
        let mut rng = rng();
        let parent1 = DigitalDna::generate(&mut rng);
        let parent2 = DigitalDna::generate(&mut rng);

        let child = parent1.crossover(&parent2, &mut rng).unwrap();
        assert_eq!(
            child.generation,
            parent1.generation.max(parent2.generation) + 1
        );
        assert_eq!(child.parent_hash, Some(parent1.hash()));
        assert!(child.fitness <= parent1.fitness.max(parent2.fitness));
    }

    #[test]
    fn test_crossover_rejects_incompatible() {
        let mut rng = rng();
        let parent1 = DigitalDna::generate(&mut rng);
        let mut parent2 = DigitalDna::generate(&mut rng);
        parent2.metadata.crossover_compatibility = 0.2;

        let err = parent1.crossover(&parent2, &mut rng).unwrap_err();
        assert!(matches!(err, DnaError::CrossoverIncompatible));
    }

    #[test]
    fn test_genetic_distance_bounds() {
        let mut rng = rng();
        let a = DigitalDna::generate(&mut rng);
        let b = DigitalDna::generate(&mut rng);

        let distance = a.genetic_distance(&b);
        assert!((0.0..=1.0).contains(&distance));
        assert_eq!(a.genetic_distance(&a), 0.0);
    }

    #[test]
    fn test_fitness_clamped() {
        let mut dna = DigitalDna::generate(&mut rng());
        for _ in 0..100 {
            dna.update_fitness(5.0);
        }
        assert!(dna.fitness <= 2.0);
        for _ in 0..100 {
            dna.update_fitness(-5.0);
        }
        assert!(dna.fitness >= 0.0);
    }

    #[test]
    fn test_key_evolution_is_deterministic() {
        let mut rng = rng();
        let mut a = DigitalDna::generate(&mut rng);
        let mut b = a.clone();
        let original = a.keypair.public_key;

        a.evolve_keys(1);
        b.evolve_keys(1);

        assert_ne!(a.keypair.public_key, original);
        assert_eq!(a.keypair.public_key, b.keypair.public_key);
        assert_eq!(a.keypair.key_generation, 1);
        assert_eq!(a.keypair.derivation_path, vec![0, 1]);
    }

    #[test]
    fn test_random_mutations_always_apply() {
        let mut rng = rng();
        let mut dna = DigitalDna::generate(&mut rng);
        for _ in 0..50 {
            let mutation = dna.random_mutation(&mut rng);
            dna.mutate(mutation).unwrap();
        }
        assert_eq!(dna.generation, 50);
    }

    #[test]
    fn test_secret_key_not_serialized() {
        let dna = DigitalDna::generate(&mut rng());
        let json = serde_json::to_string(&dna).unwrap();
        let restored: DigitalDna = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.keypair.secret_key, [0u8; 32]);
        assert_eq!(restored.keypair.public_key, dna.keypair.public_key);
    }

    #[test]
    fn test_info_matches_state() {
        let dna = DigitalDna::generate(&mut rng());
        let info = dna.info();
        assert_eq!(info.hash, dna.hash());
        assert_eq!(info.sequence_length, dna.sequence.len());
        assert_eq!(info.species, "genesis");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn random_mutations_never_empty_the_sequence(seed in 0u64..1000) {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let mut dna = DigitalDna::generate(&mut rng);
                for _ in 0..20 {
                    let mutation = dna.random_mutation(&mut rng);
                    dna.mutate(mutation).unwrap();
                    prop_assert!(!dna.sequence.is_empty());
                }
            }

            #[test]
            fn fitness_stays_in_range(seed in 0u64..1000, scores in proptest::collection::vec(-10.0f64..10.0, 1..50)) {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let mut dna = DigitalDna::generate(&mut rng);
                for score in scores {
                    dna.update_fitness(score);
                    prop_assert!((0.0..=2.0).contains(&dna.fitness));
                }
            }

            #[test]
            fn genetic_distance_is_symmetric(seed in 0u64..1000) {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let a = DigitalDna::generate(&mut rng);
                let mut b = DigitalDna::generate(&mut rng);
                let mutation = b.random_mutation(&mut rng);
                b.mutate(mutation).unwrap();
                prop_assert!((a.genetic_distance(&b) - b.genetic_distance(&a)).abs() < 1e-12);
            }
        }
    }
}
