//! Combat module: attack windows, damage resolution, knockback
//!
//! ECS ответственность:
//! - Game state: Health, hitbox слоты, knockback state
//! - Combat rules: легальность атак, тайминг damage window, урон
//! - Events: DamageDealt, EntityDied, AnimationCueEvent
//!
//! Host ответственность:
//! - Collision detection (hitbox shapes, категории) → HitboxOverlap
//! - Animation playback (клипы, blend) ← AnimationCueEvent
//!
//! Flow: AttackIntent → trigger (gate по LocomotionState, постановка
//! arm/disarm таймеров от длительности клипа) → armed hitbox →
//! HitboxOverlap → урон + knockback → возможное поражение.

pub mod attack;
pub mod damage;
pub mod knockback;

// Re-export основных типов
pub use attack::{AttackIntent, AttackKind, HITBOX_ACTIVE_SECS};
pub use damage::{
    DamageDealt, Dead, DespawnAfter, EntityDied, HitboxOverlap, DESPAWN_GRACE_SECS,
};
pub use knockback::apply_knockback;
