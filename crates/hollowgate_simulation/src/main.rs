//! Headless симуляция HOLLOWGATE
//!
//! Арена: игрок идёт по прямой мимо двух патрульных, за стеной прячется
//! третий враг. Печатает состояния FSM каждые полсекунды.

use std::path::Path;

use bevy::prelude::*;
use hollowgate_simulation::{
    create_headless_app, log_info, log_warning, run_fixed_tick, spawn_enemy, ApplyDamage, Enemy, EnemyConfig,
    EnemySpawn, Health, Obstruction, Obstructions, Player, Targetable, COLLISION_LAYER_ENVIRONMENT,
    COLLISION_LAYER_PLAYER,
};

const TICKS: u32 = 1200; // 20 секунд при 60 Hz
const PLAYER_SPEED: f32 = 1.5;

fn load_config(name: &str) -> EnemyConfig {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/enemies").join(name);
    match EnemyConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            log_warning(&format!("⚠️ {}: {}, using defaults", name, e));
            EnemyConfig::default()
        }
    }
}

fn main() {
    let seed = 42;
    log_info(&format!("Starting HOLLOWGATE headless simulation (seed: {})", seed));

    let mut app = create_headless_app(seed);
    let grunt = load_config("grunt.ron");
    let stalker = load_config("stalker.ron");

    let world = app.world_mut();
    world.resource_mut::<Obstructions>().add(Obstruction::new(
        Vec3::new(-6.0, 1.0, -4.0),
        Vec3::new(0.5, 1.0, 3.0),
        COLLISION_LAYER_ENVIRONMENT,
    ));

    let player = world
        .spawn((
            Player,
            Health::new(200),
            Transform::from_xyz(0.0, 0.0, 12.0),
            Targetable::new(COLLISION_LAYER_PLAYER),
        ))
        .id();

    let enemies = [
        spawn_enemy(
            world,
            EnemySpawn::new(grunt.clone(), Vec3::new(3.0, 0.0, 0.0)).with_route(vec![
                Vec3::new(3.0, 0.0, 0.0),
                Vec3::new(3.0, 0.0, -6.0),
                Vec3::new(-2.0, 0.0, -6.0),
            ]),
        ),
        spawn_enemy(
            world,
            EnemySpawn::new(stalker, Vec3::new(-3.0, 0.0, 2.0))
                .with_route(vec![Vec3::new(-3.0, 0.0, 2.0), Vec3::new(-3.0, 0.0, 8.0)]),
        ),
        spawn_enemy(world, EnemySpawn::new(grunt, Vec3::new(-9.0, 0.0, -4.0))),
    ];

    for tick in 0..TICKS {
        // Игрок идёт на север через арену
        let delta = 1.0 / 60.0;
        if let Some(mut transform) = app.world_mut().get_mut::<Transform>(player) {
            transform.translation.z -= PLAYER_SPEED * delta;
        }

        // На десятой секунде игрок отвечает первому врагу
        if tick == 600 {
            app.world_mut().send_event(
                ApplyDamage::new(enemies[0], 40)
                    .from_source(player)
                    .with_knockback(Vec3::new(3.0, 0.0, -3.0)),
            );
        }

        run_fixed_tick(&mut app);

        if tick % 30 == 0 {
            report(&app, tick, player, &enemies);
        }
    }

    log_info("Simulation complete!");
}

fn report(app: &App, tick: u32, player: Entity, enemies: &[Entity]) {
    let world = app.world();
    let player_hp = world.get::<Health>(player).map(|h| h.current).unwrap_or(0);

    let states: Vec<String> = enemies
        .iter()
        .map(|&entity| match world.get::<Enemy>(entity) {
            Some(enemy) => format!("{:?}={}", entity, enemy.state().name()),
            None => format!("{:?}=despawned", entity),
        })
        .collect();

    log_info(&format!("Tick {}: player hp {} | {}", tick, player_hp, states.join(" ")));
}
