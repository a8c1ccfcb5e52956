//! Battle resolution throughput
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use fleet_combat::combat::{resolve_battle, BattleOrders, Engagement, HostilityDecl, SpeciesOrders};
use fleet_combat::core::config::CombatConfig;
use fleet_combat::core::types::{Coords, SpeciesId, TechLevels};
use fleet_combat::galaxy::{Colony, Galaxy, Ship, ShipClass, Species};

const HERE: Coords = Coords { x: 12, y: 4, z: 9 };

const CLASSES: [ShipClass; 5] = [
    ShipClass::Destroyer,
    ShipClass::StrikeCruiser,
    ShipClass::Battleship,
    ShipClass::Frigate,
    ShipClass::Dreadnought,
];

/// Four species, twenty ships each, one colony under attack
fn crowded_system() -> (Galaxy, BattleOrders) {
    let mut galaxy = Galaxy::new();
    let mut orders = Vec::new();

    for id in 1..=4u16 {
        let mut species = Species::new(SpeciesId(id), format!("S{}", id), TechLevels::uniform(10 + 5 * i64::from(id)));
        for i in 0..20 {
            species.fleet.push(Ship::warship(format!("Hull {}", i), CLASSES[i % CLASSES.len()], HERE));
        }
        if id == 4 {
            let mut colony = Colony::new("Bastion", HERE, 2);
            colony.pd_units = 4000;
            colony.mining_base = 300;
            species.colonies.push(colony);
        }
        galaxy.add_species(species);

        let mut species_orders = SpeciesOrders::idle(SpeciesId(id)).declare(HostilityDecl::attack_enemies());
        species_orders.engagements = if id == 4 {
            vec![Engagement::deep_space_defense()]
        } else {
            vec![Engagement::deep_space_fight(), Engagement::planet_attack(2)]
        };
        orders.push(species_orders);
    }

    for id in 1..=4u16 {
        let species = galaxy.species_mut(SpeciesId(id));
        species.enemies.extend((1..=4u16).filter(|&other| other != id).map(SpeciesId));
    }

    (galaxy, BattleOrders { location: HERE, species: orders })
}

fn bench_battle(c: &mut Criterion) {
    let config = CombatConfig::default();
    let mut group = c.benchmark_group("battle");
    group.sample_size(50);

    group.bench_function("four_species_eighty_ships", |b| {
        let mut seed = 0u64;
        b.iter_batched(
            crowded_system,
            |(mut galaxy, orders)| {
                seed += 1;
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                black_box(resolve_battle(&mut galaxy, &orders, &config, &mut rng))
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_battle);
criterion_main!(benches);
