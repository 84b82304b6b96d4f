//! Combat компоненты: hitbox слоты, rig config, knockback state

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Урон punch hitbox'а по умолчанию
pub const PUNCH_DAMAGE: i32 = 5;
/// Урон aerial hitbox'а по умолчанию
pub const AERIAL_DAMAGE: i32 = 10;

/// Вид hitbox'а атакующего бойца
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
pub enum HitboxKind {
    /// Наземные атаки (punch)
    Grounded,
    /// Воздушные атаки (aerial)
    Aerial,
}

/// Одиночный hitbox-слот.
///
/// `generation` растёт на каждый trigger с damage window: arm/disarm
/// таймеры несут номер поколения, под которое были поставлены, и
/// срабатывают вхолостую если слот уже переармлен новым trigger'ом.
#[derive(Debug, Clone, Copy, Reflect)]
pub struct Hitbox {
    pub damage: i32,
    pub armed: bool,
    pub generation: u32,
}

impl Hitbox {
    pub fn new(damage: i32) -> Self {
        Self {
            damage,
            armed: false,
            generation: 0,
        }
    }

    /// Открывает новое damage window: снимает arm (окно предыдущего
    /// trigger'а закрывается немедленно) и выдаёт номер нового поколения.
    pub fn begin_window(&mut self) -> u32 {
        self.armed = false;
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }
}

/// Hitbox-слоты бойца, по одному на kind.
///
/// `None` — слот отсутствовал в scene rig (ошибка конфигурации, репорт
/// один раз при setup'е); атаки этого вида навсегда отключены, но
/// анимация по trigger'у всё равно проигрывается.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Hitboxes {
    grounded: Option<Hitbox>,
    aerial: Option<Hitbox>,
}

impl Default for Hitboxes {
    fn default() -> Self {
        Self {
            grounded: Some(Hitbox::new(PUNCH_DAMAGE)),
            aerial: Some(Hitbox::new(AERIAL_DAMAGE)),
        }
    }
}

impl Hitboxes {
    /// Собирает слоты из scene rig. Отсутствующий spec репортится один
    /// раз и оставляет слот пустым вместо паники на каждый trigger.
    pub fn from_rig(owner: &str, rig: &HitboxRig) -> Self {
        let build = |kind: HitboxKind, spec: Option<HitboxSpec>| -> Option<Hitbox> {
            match spec {
                Some(spec) => Some(Hitbox::new(spec.damage)),
                None => {
                    crate::log_error(&format!(
                        "{}: {:?} hitbox not found in rig, attacks of that kind are disabled",
                        owner, kind
                    ));
                    None
                }
            }
        };

        Self {
            grounded: build(HitboxKind::Grounded, rig.grounded),
            aerial: build(HitboxKind::Aerial, rig.aerial),
        }
    }

    pub fn get(&self, kind: HitboxKind) -> Option<&Hitbox> {
        match kind {
            HitboxKind::Grounded => self.grounded.as_ref(),
            HitboxKind::Aerial => self.aerial.as_ref(),
        }
    }

    pub fn get_mut(&mut self, kind: HitboxKind) -> Option<&mut Hitbox> {
        match kind {
            HitboxKind::Grounded => self.grounded.as_mut(),
            HitboxKind::Aerial => self.aerial.as_mut(),
        }
    }
}

/// Описание hitbox'ов из scene wiring (host десериализует из сцены)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitboxRig {
    pub grounded: Option<HitboxSpec>,
    pub aerial: Option<HitboxSpec>,
}

impl Default for HitboxRig {
    fn default() -> Self {
        Self {
            grounded: Some(HitboxSpec {
                damage: PUNCH_DAMAGE,
            }),
            aerial: Some(HitboxSpec {
                damage: AERIAL_DAMAGE,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HitboxSpec {
    pub damage: i32,
}

/// Knockback состояние + tuning.
///
/// `active` — re-entrancy guard: пока не истёк cooldown, повторные
/// попадания не дают второго импульса (один визуально стабильный launch
/// вместо суммирования).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct KnockbackState {
    pub active: bool,
    /// Вертикальная скорость launch'а (m/s)
    pub launch_speed: f32,
    /// Длительность guard-окна (сек)
    pub cooldown: f32,
}

impl Default for KnockbackState {
    fn default() -> Self {
        Self {
            active: false,
            launch_speed: 10.0,
            cooldown: 0.5,
        }
    }
}
