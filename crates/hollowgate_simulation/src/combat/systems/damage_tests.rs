//! Tests for damage and attack systems.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::prelude::*;

    use crate::ai::{Enemy, StateId};
    use crate::combat::systems::{apply_damage_requests, despawn_after_timeout, within_reach, DespawnAfter};
    use crate::combat::{ApplyDamage, EnemyDied, HealRequest, TookDamage};
    use crate::components::Health;
    use crate::config::EnemyConfig;
    use crate::perception::FieldOfView;
    use crate::timers::{DeferredAction, DeferredTimers};

    fn app() -> App {
        let mut app = App::new();
        app.insert_resource(Time::<Fixed>::from_hz(60.0))
            .insert_resource(DeferredTimers::new())
            .add_event::<ApplyDamage>()
            .add_event::<HealRequest>()
            .add_event::<TookDamage>()
            .add_event::<EnemyDied>()
            .add_systems(FixedUpdate, (apply_damage_requests, despawn_after_timeout).chain());
        app
    }

    fn step(app: &mut App) {
        app.world_mut()
            .resource_mut::<Time<Fixed>>()
            .advance_by(Duration::from_secs_f64(1.0 / 60.0));
        app.world_mut().run_schedule(FixedUpdate);
    }

    fn spawn_enemy(app: &mut App, config: EnemyConfig) -> Entity {
        let fov = FieldOfView::from_config(&config.perception);
        let health = Health::new(config.max_health);
        let enemy = Enemy::new(config, Vec3::ZERO, vec![Vec3::ZERO], 3);
        app.world_mut()
            .spawn((enemy, health, fov, Transform::default()))
            .id()
    }

    fn read_events<E: Event + Clone>(app: &App) -> Vec<E> {
        let events = app.world().resource::<Events<E>>();
        events.iter_current_update_events().cloned().collect()
    }

    #[test]
    fn test_within_reach_tolerance() {
        assert!(within_reach(Vec3::ZERO, Vec3::new(1.5, 0.0, 0.0), 1.5));
        assert!(within_reach(Vec3::ZERO, Vec3::new(1.7, 0.0, 0.0), 1.5));
        assert!(!within_reach(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), 1.5));
    }

    #[test]
    fn test_damage_emits_took_damage() {
        let mut app = app();
        let enemy = spawn_enemy(&mut app, EnemyConfig::default());

        app.world_mut().send_event(ApplyDamage::new(enemy, 30));
        step(&mut app);

        assert_eq!(app.world().get::<Health>(enemy).map(|h| h.current), Some(70));
        let took: Vec<TookDamage> = read_events(&app);
        assert_eq!(took.len(), 1);
        assert_eq!(took[0].amount, 30);
        assert_eq!(took[0].remaining, 70);
    }

    #[test]
    fn test_lethal_damage_kills_and_cancels_timers() {
        let mut app = app();
        let enemy = spawn_enemy(
            &mut app,
            EnemyConfig {
                corpse_lifetime: Some(0.05),
                ..Default::default()
            },
        );
        app.world_mut()
            .resource_mut::<DeferredTimers>()
            .schedule(enemy, 10.0, DeferredAction::EndKnockback);

        app.world_mut().send_event(ApplyDamage::new(enemy, 500));
        step(&mut app);

        let world = app.world();
        assert_eq!(world.get::<Enemy>(enemy).map(|e| e.state()), Some(StateId::Dead));
        assert_eq!(world.get::<FieldOfView>(enemy).map(|f| f.is_enabled()), Some(false));
        assert_eq!(world.resource::<DeferredTimers>().pending_for(enemy), 0);
        assert!(world.get::<DespawnAfter>(enemy).is_some());

        let died: Vec<EnemyDied> = read_events(&app);
        assert_eq!(died.len(), 1);
        let took: Vec<TookDamage> = read_events(&app);
        assert!(took.is_empty(), "death must not raise TookDamage");

        // Труп убирается после corpse_lifetime
        for _ in 0..5 {
            step(&mut app);
        }
        assert!(app.world().get_entity(enemy).is_err());
    }

    #[test]
    fn test_knockback_schedules_single_recovery_timer() {
        let mut app = app();
        let enemy = spawn_enemy(&mut app, EnemyConfig::default());

        app.world_mut()
            .send_event(ApplyDamage::new(enemy, 5).with_knockback(Vec3::new(3.0, 0.0, 0.0)));
        step(&mut app);
        app.world_mut()
            .send_event(ApplyDamage::new(enemy, 5).with_knockback(Vec3::new(3.0, 0.0, 0.0)));
        step(&mut app);

        let world = app.world();
        assert_eq!(world.resource::<DeferredTimers>().pending_for(enemy), 1);
        let follower = world.get::<Enemy>(enemy).map(|e| e.follower().is_knocked_back());
        assert_eq!(follower, Some(true));
    }

    #[test]
    fn test_heal_does_not_revive_dead_enemy() {
        let mut app = app();
        let enemy = spawn_enemy(&mut app, EnemyConfig::default());

        app.world_mut().send_event(ApplyDamage::new(enemy, 100));
        step(&mut app);
        app.world_mut().send_event(HealRequest { target: enemy, amount: 50 });
        step(&mut app);

        assert_eq!(app.world().get::<Health>(enemy).map(|h| h.current), Some(0));
        assert_eq!(app.world().get::<Enemy>(enemy).map(|e| e.is_dead()), Some(true));
    }

    #[test]
    fn test_heal_restores_living_enemy() {
        let mut app = app();
        let enemy = spawn_enemy(&mut app, EnemyConfig::default());

        app.world_mut().send_event(ApplyDamage::new(enemy, 40));
        step(&mut app);
        app.world_mut().send_event(HealRequest { target: enemy, amount: 25 });
        step(&mut app);

        assert_eq!(app.world().get::<Health>(enemy).map(|h| h.current), Some(85));
    }
}
