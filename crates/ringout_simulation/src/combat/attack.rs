//! Attack lifecycle: trigger → timed damage window
//!
//! # Flow
//!
//! ```text
//! AttackIntent (input layer)
//!   ↓ gate: AttackKind::allowed_from(LocomotionState)
//! AnimationCue::Attack (всегда, даже для атак без hitbox'а)
//!   ↓ только Punch / AerialAttack
//! schedule: ArmHitbox на D×fraction, DisarmHitbox на D×fraction + 0.5s
//!   (D — длительность клипа из AnimationClips, host-synced)
//! ```
//!
//! Re-trigger до disarm'а: `begin_window` снимает arm и выдаёт новое
//! поколение, таймеры старого поколения срабатывают вхолостую — окно
//! всегда принадлежит последнему trigger'у.

use bevy::prelude::*;

use crate::animation::{AnimationClips, AnimationCue, AnimationCueEvent};
use crate::components::{Fighter, HitboxKind, Hitboxes, LocomotionState};
use crate::scheduler::{ActionDue, ActionQueue, DeferredAction};

/// Сколько секунд hitbox остаётся armed после включения
pub const HITBOX_ACTIVE_SECS: f32 = 0.5;

/// Вид атаки
///
/// | Kind         | Легальна из   | Hitbox        |
/// |--------------|---------------|---------------|
/// | Kick         | Grounded      | нет           |
/// | Punch        | кроме Dashing | Grounded kind |
/// | Spear        | Grounded      | нет           |
/// | AerialAttack | Airborne      | Aerial kind   |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
pub enum AttackKind {
    Kick,
    Punch,
    Spear,
    AerialAttack,
}

impl AttackKind {
    /// Допустима ли атака из данного locomotion state
    pub fn allowed_from(self, state: LocomotionState) -> bool {
        match self {
            AttackKind::Kick | AttackKind::Spear => state == LocomotionState::Grounded,
            AttackKind::Punch => state != LocomotionState::Dashing,
            AttackKind::AerialAttack => state == LocomotionState::Airborne,
        }
    }

    /// Какой hitbox арминится и на какой доле длительности клипа.
    /// None — атака чисто анимационная.
    pub fn damage_window(self) -> Option<(HitboxKind, f32)> {
        match self {
            AttackKind::Punch => Some((HitboxKind::Grounded, 0.9)),
            AttackKind::AerialAttack => Some((HitboxKind::Aerial, 0.6)),
            AttackKind::Kick | AttackKind::Spear => None,
        }
    }
}

/// Event: команда атаки от input layer
#[derive(Event, Debug, Clone)]
pub struct AttackIntent {
    pub entity: Entity,
    pub kind: AttackKind,
}

/// Система: trigger атак
///
/// Нелегальные intents (не тот LocomotionState) молча игнорируются —
/// это не ошибка. Для атак с hitbox'ом ставит пару arm/disarm таймеров
/// от длительности текущего клипа; для атаки с отсутствующим слотом
/// (setup error) проигрывается только анимация.
pub fn trigger_attacks(
    mut intents: EventReader<AttackIntent>,
    mut fighters: Query<
        (
            &LocomotionState,
            &AnimationClips,
            &mut Hitboxes,
            &mut ActionQueue,
        ),
        With<Fighter>,
    >,
    mut cues: EventWriter<AnimationCueEvent>,
) {
    for intent in intents.read() {
        let Ok((state, clips, mut hitboxes, mut queue)) = fighters.get_mut(intent.entity)
        else {
            continue;
        };
        if !intent.kind.allowed_from(*state) {
            continue;
        }

        cues.write(AnimationCueEvent {
            entity: intent.entity,
            cue: AnimationCue::Attack(intent.kind),
        });

        let Some((kind, fraction)) = intent.kind.damage_window() else {
            continue;
        };
        let Some(hitbox) = hitboxes.get_mut(kind) else {
            // Слот отключён при setup'е, анимация уже проиграна
            continue;
        };

        let generation = hitbox.begin_window();
        let arm_delay = clips.duration(intent.kind) * fraction;
        queue.schedule(arm_delay, DeferredAction::ArmHitbox { kind, generation });
        queue.schedule(
            arm_delay + HITBOX_ACTIVE_SECS,
            DeferredAction::DisarmHitbox { kind, generation },
        );

        crate::log(&format!(
            "🥊 {:?} triggered (entity: {:?}, window {:.2}s..{:.2}s, gen {})",
            intent.kind,
            intent.entity,
            arm_delay,
            arm_delay + HITBOX_ACTIVE_SECS,
            generation
        ));
    }
}

/// Система: arm/disarm hitbox'ов по истёкшим таймерам
///
/// Таймер от поколения, которое уже перекрыто новым trigger'ом — no-op.
pub fn apply_hitbox_windows(
    mut due: EventReader<ActionDue>,
    mut fighters: Query<&mut Hitboxes>,
) {
    for event in due.read() {
        let (kind, generation, armed) = match event.action {
            DeferredAction::ArmHitbox { kind, generation } => (kind, generation, true),
            DeferredAction::DisarmHitbox { kind, generation } => (kind, generation, false),
            _ => continue,
        };
        let Ok(mut hitboxes) = fighters.get_mut(event.entity) else {
            continue;
        };
        let Some(hitbox) = hitboxes.get_mut(kind) else {
            continue;
        };
        if hitbox.generation != generation {
            continue;
        }

        hitbox.armed = armed;
        crate::log(&format!(
            "{} {:?} hitbox (entity: {:?}, gen {})",
            if armed { "💥 Armed" } else { "✅ Disarmed" },
            kind,
            event.entity,
            generation
        ));
    }
}
