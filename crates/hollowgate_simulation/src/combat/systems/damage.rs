//! Damage / heal / death systems.

use bevy::prelude::*;

use crate::ai::{DamageOutcome, Enemy};
use crate::combat::{ApplyDamage, EnemyDied, HealRequest, TookDamage};
use crate::components::Health;
use crate::logger;
use crate::perception::FieldOfView;
use crate::timers::{DeferredAction, DeferredTimers};

/// Компонент-маркер: деспавн entity после указанного времени
///
/// Вешается на труп врага если в конфиге задан `corpse_lifetime`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct DespawnAfter {
    /// Время деспавна (секунды fixed clock)
    pub despawn_time: f32,
}

/// Система: применяет ApplyDamage и HealRequest
///
/// Враги:
/// - урон → one-tick damage pulse (FSM увидит его в этом же FixedUpdate)
/// - knockback → follower preempt + таймер восстановления
/// - смерть → Dead, FieldOfView выключен, все таймеры отменены
///
/// Не-враги (игрок) — только Health + TookDamage.
pub fn apply_damage_requests(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    mut timers: ResMut<DeferredTimers>,
    mut requests: EventReader<ApplyDamage>,
    mut heals: EventReader<HealRequest>,
    mut targets: Query<(
        &mut Health,
        Option<&mut Enemy>,
        Option<&mut FieldOfView>,
        Option<&Transform>,
    )>,
    mut took_damage: EventWriter<TookDamage>,
    mut died: EventWriter<EnemyDied>,
) {
    for request in requests.read() {
        let Ok((mut health, enemy, fov, transform)) = targets.get_mut(request.target) else {
            logger::log_warning(&format!(
                "ApplyDamage: target {:?} has no Health (despawned?)",
                request.target
            ));
            continue;
        };

        let Some(mut enemy) = enemy else {
            let applied = health.take_damage(request.amount);
            if applied > 0 {
                took_damage.write(TookDamage {
                    target: request.target,
                    source: request.source,
                    amount: applied,
                    remaining: health.current,
                });
            }
            if health.is_dead() && applied > 0 {
                logger::log_info(&format!("💀 {:?} killed by {:?}", request.target, request.source));
            }
            continue;
        };

        match enemy.take_damage(&mut health, request.amount) {
            DamageOutcome::Ignored => {}
            DamageOutcome::Took { applied } => {
                logger::log(&format!(
                    "🩸 {:?} took {} damage ({} / {} HP)",
                    request.target, applied, health.current, health.max
                ));
                took_damage.write(TookDamage {
                    target: request.target,
                    source: request.source,
                    amount: applied,
                    remaining: health.current,
                });

                if let Some(impulse) = request.knockback {
                    let position = transform.map(|t| t.translation).unwrap_or_default();
                    enemy.begin_knockback(position, impulse);

                    // Повторный удар продлевает knockback, а не плодит таймеры
                    timers.cancel_action(request.target, DeferredAction::EndKnockback);
                    let delay = enemy.config().knockback_recovery_time;
                    timers.schedule(request.target, delay, DeferredAction::EndKnockback);
                    logger::log(&format!("💥 {:?} knocked back ({:?})", request.target, impulse));
                }
            }
            DamageOutcome::Died { applied } => {
                if let Some(mut fov) = fov {
                    fov.disable();
                }

                let cancelled = timers.cancel_owner(request.target);
                logger::log_info(&format!(
                    "💀 Enemy {:?} died ({} damage, {} timer(s) cancelled)",
                    request.target, applied, cancelled
                ));

                if let Some(lifetime) = enemy.config().corpse_lifetime {
                    commands.entity(request.target).insert(DespawnAfter {
                        despawn_time: time.elapsed_secs() + lifetime,
                    });
                }

                died.write(EnemyDied {
                    entity: request.target,
                    killer: request.source,
                });
            }
        }
    }

    for request in heals.read() {
        let Ok((mut health, enemy, _, _)) = targets.get_mut(request.target) else {
            continue;
        };

        let healed = match enemy {
            Some(mut enemy) => enemy.heal(&mut health, request.amount),
            None => health.heal(request.amount),
        };

        if healed > 0 {
            logger::log(&format!("💚 {:?} healed {} ({} HP)", request.target, healed, health.current));
        }
    }
}

/// Система: деспавн entities с истёкшим DespawnAfter timeout
pub fn despawn_after_timeout(
    mut commands: Commands,
    query: Query<(Entity, &DespawnAfter)>,
    time: Res<Time<Fixed>>,
) {
    let current_time = time.elapsed_secs();

    for (entity, despawn_after) in query.iter() {
        if current_time >= despawn_after.despawn_time {
            logger::log(&format!("⚰️ Despawning entity {:?} (timeout)", entity));
            commands.entity(entity).despawn();
        }
    }
}
