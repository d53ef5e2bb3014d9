//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: здоровье и видимость (Health, Targetable)
//! - layers: битовые маски слоёв
//! - player: player control marker (Player)
//!
//! Компоненты врага (Enemy, FieldOfView) живут в своих модулях
//! (`ai`, `perception`) рядом с системами.

pub mod actor;
pub mod layers;
pub mod player;

// Re-exports для удобного импорта
pub use actor::*;
pub use layers::*;
pub use player::*;
