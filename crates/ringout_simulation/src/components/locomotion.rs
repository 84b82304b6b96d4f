//! Locomotion компоненты: state machine, tuning, input axis

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Режим передвижения бойца
///
/// Переходы:
/// - Grounded → Airborne: jump команда
/// - Airborne → Grounded: контакт с землёй (событие физики)
/// - Grounded/Airborne → Dashing: dash команда
/// - Dashing → Grounded: по таймеру dash_duration, безусловно
///
/// Во время Dashing все команды (jump/dash/атаки) и горизонтальная ось
/// игнорируются.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum LocomotionState {
    #[default]
    Grounded,
    Airborne,
    Dashing,
}

/// Tuning передвижения (приходит из scene config)
#[derive(Component, Debug, Clone, Copy, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct LocomotionConfig {
    /// Горизонтальная скорость от оси ввода (m/s)
    pub move_speed: f32,
    /// Вертикальный импульс прыжка (m/s)
    pub jump_power: f32,
    /// Скорость dash'а (m/s)
    pub dash_speed: f32,
    /// Длительность dash'а (сек), фиксированная — не зависит от анимации
    pub dash_duration: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            jump_power: 7.0,
            dash_speed: 15.0,
            dash_duration: 0.2,
        }
    }
}

/// Горизонтальная ось ввода в [-1, 1] (host-synced каждый кадр)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MoveInput {
    pub axis: f32,
}

/// Направление взгляда бойца. Следует за знаком последней ненулевой оси,
/// задаёт направление dash'а.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}
