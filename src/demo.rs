//! Staged console demonstration of the protocol.
//!
//! Four acts run against a real protocol instance: organism birth,
//! evolution under rising selection pressure, neural messaging over
//! live synapses, and a collective decision over candidate emergent
//! behaviors. Pacing sleeps are only for watchability and can be
//! disabled through `[demo]` config.

use std::time::Instant;

use rand::Rng;
use tokio::time::{sleep, Duration};

use genesis_core::collective::DecisionAlgorithm;
use genesis_core::config::GenesisConfig;
use genesis_core::neural::MessageType;

use crate::error::GenesisError;
use crate::protocol::{GenesisProtocol, NetworkStats, ProtocolInfo};

const SCRIPTED_MESSAGES: [&str; 5] = [
    "digital consciousness online",
    "sharing memories",
    "synchronizing states",
    "collective intelligence emerging",
    "neural protocol established",
];

const EMERGENT_BEHAVIORS: [&str; 5] = [
    "cooperative group formation",
    "consensus decision making",
    "functional specialization",
    "distributed optimization",
    "leadership emergence",
];

/// Outcome of a completed demo run.
#[derive(Debug, Clone)]
pub struct DemoReport {
    pub duration_secs: f64,
    pub organisms_created: usize,
    pub generations: u64,
    pub connections_established: usize,
    pub messages_exchanged: usize,
    pub decisions_resolved: usize,
    pub final_stats: NetworkStats,
}

fn print_header(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

fn print_section(title: &str) {
    println!("\n{}", "-".repeat(40));
    println!("{title}");
    println!("{}", "-".repeat(40));
}

fn print_network_stats(stats: &NetworkStats) {
    println!("network statistics:");
    println!("  total organisms:  {}", stats.total_organisms);
    println!("  active organisms: {}", stats.active_organisms);
    println!("  total synapses:   {}", stats.total_synapses);
    println!("  average fitness:  {:.3}", stats.average_fitness);
    println!("  network health:   {:.1}%", stats.network_health * 100.0);
}

fn print_protocol_info(info: &ProtocolInfo) {
    println!("protocol information:");
    println!("  version:            {}", info.version);
    println!("  protocol version:   {}", info.protocol_version);
    println!("  max organisms:      {}", info.max_organisms);
    println!("  max synapses:       {}", info.max_synapses);
    println!("  target latency:     {} ns", info.target_latency_ns);
    println!("  max evolution time: {} ms", info.max_evolution_time_ms);
}

async fn pace(enabled: bool, millis: u64) {
    if enabled {
        sleep(Duration::from_millis(millis)).await;
    }
}

/// Runs the full four-act demonstration.
pub async fn run(config: GenesisConfig) -> Result<DemoReport, GenesisError> {
    let started = Instant::now();
    let pacing = config.demo.pacing;
    let organism_count = config.demo.organisms;
    let generations = config.demo.generations;
    let max_connections = config.demo.max_connections;

    let mut protocol = GenesisProtocol::new(config)?;

    print_header("GENESIS PROTOCOL - INTEGRATED DEMONSTRATION");
    print_protocol_info(&protocol.info());

    let organism_ids = act_birth(&mut protocol, organism_count, pacing).await?;
    act_evolution(&mut protocol, &organism_ids, generations, pacing).await?;
    let (connections, messages) =
        act_neural_communication(&mut protocol, &organism_ids, max_connections, pacing).await?;
    let decisions = act_collective_intelligence(&mut protocol, &organism_ids, pacing).await?;

    print_header("FINAL SUMMARY");
    let final_stats = protocol.network_stats();
    let duration_secs = started.elapsed().as_secs_f64();
    println!("duration:           {duration_secs:.1}s");
    println!("organisms created:  {}", organism_ids.len());
    println!("connections opened: {connections}");
    println!("messages exchanged: {messages}");
    print_network_stats(&final_stats);
    protocol.metrics.report();

    Ok(DemoReport {
        duration_secs,
        organisms_created: organism_ids.len(),
        generations,
        connections_established: connections,
        messages_exchanged: messages,
        decisions_resolved: decisions,
        final_stats,
    })
}

/// Act 1: births the demo population.
async fn act_birth(
    protocol: &mut GenesisProtocol,
    count: usize,
    pacing: bool,
) -> Result<Vec<String>, GenesisError> {
    print_section("BIRTH OF DIGITAL ORGANISMS");
    println!("creating {count} organisms...");

    let mut ids = Vec::with_capacity(count);
    for index in 0..count {
        let id = protocol.create_organism(None)?;
        let organism = protocol
            .organism(&id)
            .ok_or_else(|| GenesisError::OrganismNotFound(id.clone()))?;
        println!(
            "  {:2}. {}  fitness {:.3}  generation {}",
            index + 1,
            id,
            organism.dna.fitness,
            organism.dna.generation
        );
        ids.push(id);
        pace(pacing, 200).await;
    }

    println!("\n{} organisms created", ids.len());
    print_network_stats(&protocol.network_stats());
    Ok(ids)
}

/// Act 2: evolves the population over rising selection pressure.
async fn act_evolution(
    protocol: &mut GenesisProtocol,
    organism_ids: &[String],
    generations: u64,
    pacing: bool,
) -> Result<(), GenesisError> {
    print_section("BIOLOGICAL EVOLUTION");
    println!("simulating {generations} generations...");

    for generation in 0..generations {
        let pressure = 0.1 + 0.1 * generation as f64;
        protocol.evolution_engine.selection_pressure = pressure;
        println!("\ngeneration {}:", generation + 1);
        println!("  selection pressure: {pressure:.1}");

        let mut evolved = 0usize;
        for id in organism_ids {
            if !protocol.organisms.contains_key(id) {
                continue;
            }
            if protocol.evolve_organism(id).is_ok() {
                evolved += 1;
            }
        }
        let eliminated = protocol.apply_selection();

        println!("  organisms evolved: {evolved}");
        if !eliminated.is_empty() {
            println!("  organisms eliminated: {}", eliminated.len());
        }
        let stats = protocol.network_stats();
        println!("  average fitness: {:.3}", stats.average_fitness);
        println!("  network health:  {:.1}%", stats.network_health * 100.0);
        pace(pacing, 500).await;
    }

    println!("\nevolution of {generations} generations complete");
    Ok(())
}

/// Act 3: opens synapses between pairs and exchanges the scripted
/// messages over them.
async fn act_neural_communication(
    protocol: &mut GenesisProtocol,
    organism_ids: &[String],
    max_connections: usize,
    pacing: bool,
) -> Result<(usize, usize), GenesisError> {
    print_section("NEURAL COMMUNICATION");

    let living: Vec<String> = organism_ids
        .iter()
        .filter(|id| protocol.organisms.contains_key(*id))
        .cloned()
        .collect();
    if living.len() < 2 {
        return Err(GenesisError::Config(
            "neural communication needs at least two living organisms".to_string(),
        ));
    }

    println!("establishing neural connections between {} organisms...", living.len());
    let mut connections: Vec<(String, String)> = Vec::new();
    'outer: for (i, from) in living.iter().enumerate() {
        for to in living.iter().skip(i + 1) {
            if connections.len() >= max_connections {
                break 'outer;
            }
            protocol.connect_organisms(from, to)?;
            println!("  {} <-> {}", &from[..16.min(from.len())], &to[..16.min(to.len())]);
            connections.push((from.clone(), to.clone()));
        }
    }

    println!("\nexchanging neural messages...");
    let mut exchanged = 0usize;
    for (index, text) in SCRIPTED_MESSAGES.iter().enumerate() {
        let (from, to) = &connections[index % connections.len()];
        match protocol
            .send_message(from, to, MessageType::Consciousness, text.as_bytes().to_vec())
            .await
        {
            Ok(latency) => {
                println!("  message {}: {text}  ({latency} ns)", index + 1);
                exchanged += 1;
            }
            Err(e) => println!("  message {}: {text}  (transmission lost: {e})", index + 1),
        }
        pace(pacing, 300).await;
    }

    println!("\nneural communication established");
    println!("  active connections: {}", connections.len());
    println!("  messages exchanged: {exchanged}");
    Ok((connections.len(), exchanged))
}

/// Act 4: forms a group of the whole population and resolves a
/// majority decision over the candidate emergent behaviors.
async fn act_collective_intelligence(
    protocol: &mut GenesisProtocol,
    organism_ids: &[String],
    pacing: bool,
) -> Result<usize, GenesisError> {
    print_section("COLLECTIVE INTELLIGENCE");

    let members: Vec<String> = organism_ids
        .iter()
        .filter(|id| protocol.organisms.contains_key(*id))
        .cloned()
        .collect();
    println!("activating collective intelligence across {} organisms...", members.len());

    let group_id = protocol
        .collective
        .create_group(members.clone(), "emergent behavior exploration".to_string());

    for (index, name) in EMERGENT_BEHAVIORS.iter().enumerate() {
        protocol.collective.register_swarm_behavior(
            name,
            genesis_core::collective::SwarmBehaviorType::ProblemSolving,
            members.clone(),
            std::collections::HashMap::new(),
        );
        println!("  behavior {}: {name}", index + 1);
        pace(pacing, 400).await;
    }

    let decision_id = protocol.collective.initiate_decision(
        "which emergent behavior to reinforce".to_string(),
        members.clone(),
        EMERGENT_BEHAVIORS.iter().map(|b| b.to_string()).collect(),
        DecisionAlgorithm::Majority,
    );
    protocol.collective.open_voting(&decision_id)?;

    let option_ids: Vec<String> = protocol
        .collective
        .active_decisions
        .iter()
        .find(|d| d.decision_id == decision_id)
        .map(|d| d.options.iter().map(|o| o.option_id.clone()).collect())
        .unwrap_or_default();

    for member in &members {
        let fitness = protocol
            .organisms
            .get(member)
            .map_or(0.5, |o| o.dna.fitness.min(1.0));
        let choice = protocol.rng_mut().gen_range(0..option_ids.len());
        protocol
            .collective
            .cast_vote(&decision_id, member, &option_ids[choice], fitness, 0.8)?;
    }

    let result = protocol.collective.finalize_decision(&decision_id)?;
    protocol.metrics.record_decision_resolved();

    let cohesion = protocol
        .collective
        .groups
        .get(&group_id)
        .map_or(0.0, |g| g.cohesion);
    let confidence = protocol
        .collective
        .active_decisions
        .iter()
        .find(|d| d.decision_id == decision_id)
        .map_or(0.0, |d| d.confidence);

    println!("\ncollective decision: {result}");
    println!("  cooperation: {cohesion:.2}");
    println!("  efficiency:  {confidence:.2}");

    println!("\ncollective intelligence active");
    print_network_stats(&protocol.network_stats());
    Ok(1)
}
