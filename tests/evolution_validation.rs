//! Evolution engine behavior over whole populations.

mod common;

use common::ProtocolBuilder;

#[test]
fn evolution_applies_mutations_with_fitness_cost() {
    let (mut protocol, ids) = ProtocolBuilder::new().population(4).build();

    for id in &ids {
        let event = protocol.evolve_organism(id).unwrap();
        assert_eq!(event.fitness_before, 1.0);
        assert!(event.fitness_after < event.fitness_before);
    }

    let stats = protocol.network_stats();
    assert!(stats.average_fitness < 1.0);
    assert!(stats.average_fitness > 0.9);
}

#[test]
fn selection_sweep_eliminates_below_pressure() {
    let (mut protocol, ids) = ProtocolBuilder::new().population(6).build();

    // Cripple half the population.
    for id in ids.iter().take(3) {
        protocol.organism_mut(id).unwrap().dna.fitness = 0.2;
    }
    protocol.evolution_engine.selection_pressure = 0.5;

    let eliminated = protocol.apply_selection();
    assert_eq!(eliminated.len(), 3);
    assert_eq!(protocol.organisms.len(), 3);
    for id in &eliminated {
        assert!(ids.contains(id));
        assert!(protocol.organism(id).is_none());
    }
}

#[test]
fn mutation_rate_adapts_over_cycles() {
    let (mut protocol, _) = ProtocolBuilder::new().population(5).build();
    let base_rate = protocol.evolution_engine.mutation_rate;

    // Healthy population drives the rate down.
    protocol.evolution_engine.fitness_stats.average_fitness = 0.9;
    protocol.evolution_engine.advance_cycle();
    assert!(protocol.evolution_engine.mutation_rate < base_rate);

    // Struggling population drives it back up, within the clamp.
    for _ in 0..100 {
        protocol.evolution_engine.fitness_stats.average_fitness = 0.1;
        protocol.evolution_engine.advance_cycle();
    }
    assert!(protocol.evolution_engine.mutation_rate <= 0.1);
    assert!(protocol.evolution_engine.mutation_rate >= 0.001);
}

#[test]
fn reproduction_through_facade_grows_population() {
    let (mut protocol, ids) = ProtocolBuilder::new().population(1).build();
    let alpha = ids[0].clone();

    // A near-identical genome passes the distance gate but hashes to a
    // distinct organism id.
    let mut dna = protocol.organism(&alpha).unwrap().dna.clone();
    dna.sequence[0] = dna.sequence[0].wrapping_add(1);
    let beta = protocol.create_organism(Some(dna)).unwrap();
    assert_ne!(alpha, beta);
    for id in [&alpha, &beta] {
        let organism = protocol.organism_mut(id).unwrap();
        organism.state = genesis_lib::LifecycleState::Mature;
        organism.reproduction_readiness = 0.8;
    }

    let child = protocol.reproduce(&alpha, &beta).unwrap();
    assert_eq!(protocol.organisms.len(), 3);

    let offspring = protocol.organism(&child).unwrap();
    assert_eq!(offspring.dna.parent_hash.as_deref(), Some(protocol.organism(&alpha).unwrap().dna.hash()).as_deref());
    assert!(offspring.dna.fitness <= 1.0);
}

#[test]
fn seeded_evolution_is_reproducible() {
    let run = |seed: u64| {
        let (mut protocol, ids) = ProtocolBuilder::new().seed(seed).population(3).build();
        for _ in 0..5 {
            for id in &ids {
                let _ = protocol.evolve_organism(id);
            }
        }
        let mut fitness: Vec<(String, u64)> = protocol
            .organisms
            .values()
            .map(|o| (o.id.clone(), o.dna.generation))
            .collect();
        fitness.sort();
        fitness
    };

    assert_eq!(run(99), run(99));
    assert_ne!(run(99), run(100));
}

#[test]
fn evolution_history_stays_bounded() {
    let (mut protocol, ids) = ProtocolBuilder::new()
        .population(1)
        .config(|c| c.evolution.max_history_events = 5)
        .build();

    for _ in 0..20 {
        protocol.organism_mut(&ids[0]).unwrap().dna.fitness = 1.0;
        protocol.evolve_organism(&ids[0]).unwrap();
    }
    assert_eq!(protocol.evolution_engine.evolution_history.len(), 5);
}
