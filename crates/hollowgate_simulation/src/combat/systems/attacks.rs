//! Attack resolution: AttackIntent из Attack state → AttackPerformed + ApplyDamage

use bevy::prelude::*;

use crate::ai::{AttackPerformed, Enemy};
use crate::combat::ApplyDamage;
use crate::logger;

/// Допуск для проверки дистанции удара (цель могла сдвинуться за tick)
pub const ATTACK_REACH_TOLERANCE: f32 = 0.25;

/// true если цель ещё в зоне удара
pub fn within_reach(attacker: Vec3, target: Vec3, attack_radius: f32) -> bool {
    attacker.distance(target) <= attack_radius + ATTACK_REACH_TOLERANCE
}

/// Система: забирает outbox атак у врагов и превращает в урон
///
/// Melee area check упрощён до проверки дистанции.
pub fn resolve_enemy_attacks(
    mut attackers: Query<(Entity, &Transform, &mut Enemy)>,
    targets: Query<&Transform>,
    mut performed: EventWriter<AttackPerformed>,
    mut damage: EventWriter<ApplyDamage>,
) {
    for (attacker, transform, mut enemy) in attackers.iter_mut() {
        let attack_radius = enemy.config().attack_radius;

        for intent in enemy.take_attacks() {
            performed.write(AttackPerformed {
                attacker,
                target: intent.target,
                damage: intent.damage,
            });

            let Ok(target_transform) = targets.get(intent.target) else {
                continue;
            };

            if !within_reach(transform.translation, target_transform.translation, attack_radius) {
                logger::log(&format!("🗡️ {:?} swing missed {:?} (out of reach)", attacker, intent.target));
                continue;
            }

            logger::log(&format!("🗡️ {:?} hits {:?} for {}", attacker, intent.target, intent.damage));
            damage.write(ApplyDamage::new(intent.target, intent.damage).from_source(attacker));
        }
    }
}
