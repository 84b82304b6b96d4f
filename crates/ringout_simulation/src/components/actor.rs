//! Базовые компоненты акторов: маркеры ролей и Health

use bevy::prelude::*;

/// Управляемый боец — актор, способный атаковать.
///
/// Автоматически добавляет locomotion/physics/scheduler компоненты через
/// Required Components. `Hitboxes` и `AnimationClips` подключаются явно
/// при spawn'е (их значения приходят из scene config и host animation).
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(
    crate::components::LocomotionState,
    crate::components::MoveInput,
    crate::components::Facing,
    crate::components::LocomotionConfig,
    crate::animation::AnimationBlend,
    crate::components::PhysicsBody,
    crate::scheduler::ActionQueue
)]
pub struct Fighter;

/// Damageable-цель: актор, которому armed hitbox наносит урон.
///
/// Категорию на collision shape расставляет host physics layer,
/// этот маркер — её ECS-сторона.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(
    Health,
    crate::components::KnockbackState,
    crate::components::PhysicsBody,
    crate::scheduler::ActionQueue
)]
pub struct Damageable;

/// Здоровье актора
///
/// `current` знаковый: урон вычитается точно, финальное значение может
/// уйти ниже нуля (overkill виден во внешнем feedback'е).
/// Мутируется только damage resolution системой.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Поражение: health на нуле или ниже
    pub fn is_defeated(&self) -> bool {
        self.current <= 0
    }

    /// Точное вычитание, без clamp'а снизу.
    /// `amount` ожидается положительным (контракт вызывающего).
    pub fn take_damage(&mut self, amount: i32) {
        self.current -= amount;
    }
}
