//! Brain tick: perception → blackboard → FSM → state change events.

use bevy::prelude::*;

use crate::ai::{Enemy, EnemyStateChanged, TargetInfo};
use crate::components::{Health, Targetable};
use crate::config::ConfigError;
use crate::logger;
use crate::perception::{emit_perception_event, FieldOfView, TargetDetected, TargetLost};

/// Система: FSM tick каждого врага
///
/// 1. nearest из FieldOfView → TargetInfo (stale / мёртвая цель → lose path)
/// 2. `Enemy::sense` + `Enemy::tick`
/// 3. накопленные смены состояния → EnemyStateChanged
///
/// Мёртвые враги не тикают, но их outbox (вход в Dead) дренируется.
pub fn tick_enemy_brains(
    time: Res<Time<Fixed>>,
    mut enemies: Query<(Entity, &Transform, &mut Enemy, Option<&mut FieldOfView>)>,
    targets: Query<(&Transform, Option<&Health>), With<Targetable>>,
    mut detected: EventWriter<TargetDetected>,
    mut lost: EventWriter<TargetLost>,
    mut changed: EventWriter<EnemyStateChanged>,
) {
    let delta = time.delta_secs();

    for (entity, transform, mut enemy, fov) in enemies.iter_mut() {
        if !enemy.is_dead() {
            let position = transform.translation;

            let target = match fov {
                Some(mut fov) => resolve_target(entity, position, &mut fov, &targets, &mut detected, &mut lost),
                None => {
                    if enemy.warn_missing_perception_once() {
                        logger::log_warning(&format!("⚠️ {:?}: {}", entity, ConfigError::MissingPerception));
                    }
                    None
                }
            };

            enemy.sense(position, target);
            enemy.tick(delta);
        }

        for change in enemy.drain_state_changes() {
            match change.from {
                Some(from) => logger::log(&format!(
                    "🧠 {:?}: {} → {}",
                    entity,
                    from.name(),
                    change.to.name()
                )),
                None => logger::log(&format!("🧠 {:?}: start in {}", entity, change.to.name())),
            }

            changed.write(EnemyStateChanged {
                entity,
                from: change.from,
                to: change.to,
            });
        }
    }
}

/// Nearest цель из FieldOfView, с проверкой что она ещё существует и жива
///
/// Цель пропала между сканами → `FieldOfView::forget` (обычный lose path),
/// следующая видимая (если есть) становится nearest.
fn resolve_target(
    observer: Entity,
    position: Vec3,
    fov: &mut FieldOfView,
    targets: &Query<(&Transform, Option<&Health>), With<Targetable>>,
    detected: &mut EventWriter<TargetDetected>,
    lost: &mut EventWriter<TargetLost>,
) -> Option<TargetInfo> {
    while let Some(nearest) = fov.nearest() {
        if let Ok((transform, health)) = targets.get(nearest) {
            if health.is_none_or(|h| h.is_alive()) {
                return Some(TargetInfo {
                    entity: nearest,
                    position: transform.translation,
                    distance: position.distance(transform.translation),
                });
            }
        }

        if let Some(event) = fov.forget(nearest) {
            emit_perception_event(observer, event, detected, lost);
        }
    }

    None
}
