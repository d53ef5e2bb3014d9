//! Perception — Field of View скан для врагов
//!
//! Poll-based: у каждого observer'а свой countdown (`rescan_interval`),
//! по истечении — скан всех `Targetable` в радиусе. События
//! `TargetDetected` / `TargetLost` пишутся только на изменение nearest.

use bevy::prelude::*;

use crate::components::{Health, Targetable};
use crate::logger;

pub mod field_of_view;
pub mod obstruction;

pub use field_of_view::{Candidate, FieldOfView, PerceptionEvent};
pub use obstruction::{LineOfSight, Obstruction, Obstructions};

/// Observer нашёл новую ближайшую цель
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetDetected {
    pub observer: Entity,
    pub target: Entity,
}

/// Observer потерял цель (nearest стал None)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetLost {
    pub observer: Entity,
    pub target: Entity,
}

/// Пишет PerceptionEvent в соответствующий Bevy event
pub fn emit_perception_event(
    observer: Entity,
    event: PerceptionEvent,
    detected: &mut EventWriter<TargetDetected>,
    lost: &mut EventWriter<TargetLost>,
) {
    match event {
        PerceptionEvent::Detected(target) => {
            logger::log(&format!("👁️ {:?} detected {:?}", observer, target));
            detected.write(TargetDetected { observer, target });
        }
        PerceptionEvent::Lost(target) => {
            logger::log(&format!("🙈 {:?} lost {:?}", observer, target));
            lost.write(TargetLost { observer, target });
        }
    }
}

/// Система: скан FieldOfView по собственному countdown
pub fn scan_fields_of_view(
    time: Res<Time<Fixed>>,
    obstructions: Res<Obstructions>,
    mut observers: Query<(Entity, &Transform, &mut FieldOfView)>,
    targets: Query<(Entity, &Transform, &Targetable, Option<&Health>)>,
    mut detected: EventWriter<TargetDetected>,
    mut lost: EventWriter<TargetLost>,
) {
    let delta = time.delta_secs();

    for (observer, transform, mut fov) in observers.iter_mut() {
        if !fov.tick_countdown(delta) {
            continue;
        }

        let candidates = targets
            .iter()
            .filter(|(entity, ..)| *entity != observer)
            .map(|(entity, target_transform, targetable, health)| Candidate {
                entity,
                position: target_transform.translation,
                layer: targetable.layer,
                alive: health.is_none_or(|h| h.is_alive()),
            });

        let forward = transform.forward().as_vec3();
        if let Some(event) = fov.scan(transform.translation, forward, candidates, &*obstructions) {
            emit_perception_event(observer, event, &mut detected, &mut lost);
        }
    }
}
