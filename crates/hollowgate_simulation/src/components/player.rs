//! Player marker component

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// Враги видят игрока через `Targetable` (слой `COLLISION_LAYER_PLAYER`),
/// этот маркер нужен только input/camera стеку снаружи движка.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
