//! Velocity интерфейс к host physics layer

use bevy::prelude::*;

/// Скорость актора (m/s, 2D side-scroller план).
///
/// Core пишет velocity, host интегрирует её в позицию и возвращает
/// коллизии событиями. Позицию не дублируем — она принадлежит физике.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    pub velocity: Vec2,
}
