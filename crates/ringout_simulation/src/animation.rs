//! Animation collaborator surface
//!
//! Host animation system владеет клипами и blend tree. Core:
//! - читает длительности атакующих клипов (`AnimationClips`, host-synced)
//! - шлёт fire-and-forget сигналы (`AnimationCueEvent`)
//! - пишет velocity-driven blend параметры (`AnimationBlend`)
//!
//! Обратной связи из анимации в логику нет — только длительности клипов,
//! от которых считается damage window.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::attack::AttackKind;

/// Длительности атакующих клипов (сек), host-synced.
///
/// На trigger атаки core читает длительность клипа, который будет
/// проигран, и от неё ставит arm/disarm таймеры.
#[derive(Component, Debug, Clone, Copy, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct AnimationClips {
    pub kick: f32,
    pub punch: f32,
    pub spear: f32,
    pub aerial_attack: f32,
}

impl Default for AnimationClips {
    fn default() -> Self {
        Self {
            kick: 0.4,
            punch: 0.5,
            spear: 0.6,
            aerial_attack: 0.5,
        }
    }
}

impl AnimationClips {
    pub fn duration(&self, kind: AttackKind) -> f32 {
        match kind {
            AttackKind::Kick => self.kick,
            AttackKind::Punch => self.punch,
            AttackKind::Spear => self.spear,
            AttackKind::AerialAttack => self.aerial_attack,
        }
    }
}

/// Однократный анимационный сигнал (trigger / bool host animator'а)
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationCue {
    /// Проиграть атакующий клип
    Attack(AttackKind),
    Dash,
    /// true на взлёте, false на приземлении
    Jumping(bool),
    /// Реакция на полученный удар
    HitReaction,
}

/// Событие для host animation layer. Чисто наблюдательное.
#[derive(Event, Debug, Clone)]
pub struct AnimationCueEvent {
    pub entity: Entity,
    pub cue: AnimationCue,
}

/// Velocity-driven blend параметры (animator floats), обновляются каждый
/// физический тик вне dash'а.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct AnimationBlend {
    /// |горизонтальная скорость| — run blend
    pub run_speed: f32,
    /// Вертикальная скорость — jump/fall blend
    pub vertical_speed: f32,
}
