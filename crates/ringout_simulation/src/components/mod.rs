//! ECS Components для акторов боевого ядра
//!
//! Организация по доменам:
//! - actor: маркеры Fighter/Damageable, Health
//! - locomotion: LocomotionState FSM, tuning, input axis, facing
//! - combat: hitbox слоты, rig config, knockback state
//! - physics: velocity интерфейс к host physics layer

pub mod actor;
pub mod combat;
pub mod locomotion;
pub mod physics;

// Re-exports для удобного импорта
pub use actor::*;
pub use combat::*;
pub use locomotion::*;
pub use physics::*;
