//! Damage resolution: armed hitbox overlap → урон + knockback + поражение
//!
//! Host collision layer присылает overlap-begin события с категориями
//! (какой hitbox kind, какая цель); armed-флаг и всё остальное
//! проверяется здесь, на момент события — не на момент постановки.

use bevy::prelude::*;

use crate::animation::{AnimationCue, AnimationCueEvent};
use crate::components::{Damageable, Health, HitboxKind, Hitboxes, KnockbackState, PhysicsBody};
use crate::scheduler::ActionQueue;

use super::knockback::apply_knockback;

/// Грейс до despawn'а побеждённого — host успевает проиграть реакцию
pub const DESPAWN_GRACE_SECS: f32 = 1.0;

/// Event: overlap-begin hitbox'а атакующего с damageable целью
/// (host collision layer)
#[derive(Event, Debug, Clone)]
pub struct HitboxOverlap {
    pub attacker: Entity,
    pub target: Entity,
    pub kind: HitboxKind,
}

/// Событие: урон нанесён
///
/// Используется host'ом для UI, звуков, эффектов.
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: i32,
    pub target_defeated: bool,
}

/// Событие: актор побеждён (health ≤ 0). Ровно один раз на актора.
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Маркер: побеждён. Дальнейшие попадания игнорируются.
#[derive(Component, Debug)]
pub struct Dead;

/// Отложенный despawn побеждённого актора
#[derive(Component, Debug, Clone, Copy)]
pub struct DespawnAfter {
    pub remaining: f32,
}

impl DespawnAfter {
    pub fn new(secs: f32) -> Self {
        Self { remaining: secs }
    }
}

/// Система: resolve overlap событий
///
/// 1. Unarmed hitbox / отсутствующий слот → игнор
/// 2. Урон цели (точное вычитание)
/// 3. HitReaction cue на каждое попадание; EntityDied ровно один раз
/// 4. Knockback, если не в активном cooldown окне
///
/// Несколько armed hitbox'ов по одной цели в один тик — каждый наносит
/// урон независимо; дедупликации нет, guard есть только у knockback'а.
pub fn resolve_hitbox_overlaps(
    mut overlaps: EventReader<HitboxOverlap>,
    attackers: Query<&Hitboxes>,
    mut targets: Query<
        (
            &mut Health,
            &mut KnockbackState,
            &mut PhysicsBody,
            &mut ActionQueue,
        ),
        With<Damageable>,
    >,
    mut cues: EventWriter<AnimationCueEvent>,
    mut dealt: EventWriter<DamageDealt>,
    mut died: EventWriter<EntityDied>,
) {
    for overlap in overlaps.read() {
        if overlap.attacker == overlap.target {
            continue;
        }
        let Ok(hitboxes) = attackers.get(overlap.attacker) else {
            continue;
        };
        let Some(hitbox) = hitboxes.get(overlap.kind) else {
            continue;
        };
        if !hitbox.armed {
            continue;
        }

        let Ok((mut health, mut knockback, mut body, mut queue)) =
            targets.get_mut(overlap.target)
        else {
            continue;
        };
        // Поражение терминально: добивание по лежащему игнорируется
        if health.is_defeated() {
            continue;
        }

        health.take_damage(hitbox.damage);

        cues.write(AnimationCueEvent {
            entity: overlap.target,
            cue: AnimationCue::HitReaction,
        });

        let defeated = health.is_defeated();
        dealt.write(DamageDealt {
            attacker: overlap.attacker,
            target: overlap.target,
            damage: hitbox.damage,
            target_defeated: defeated,
        });

        crate::log(&format!(
            "💥 {:?} hit {:?} ({} damage, HP: {})",
            overlap.attacker, overlap.target, hitbox.damage, health.current
        ));

        if defeated {
            died.write(EntityDied {
                entity: overlap.target,
                killer: Some(overlap.attacker),
            });
            crate::log_info(&format!(
                "Entity {:?} defeated by {:?}",
                overlap.target, overlap.attacker
            ));
        }

        apply_knockback(&mut knockback, &mut body, &mut queue);
    }
}

/// Система: оформление поражения (по EntityDied)
///
/// Обнуляет velocity (труп не улетает от последнего knockback'а),
/// ставит Dead + отложенный despawn.
pub fn handle_defeats(
    mut commands: Commands,
    mut died: EventReader<EntityDied>,
    mut bodies: Query<&mut PhysicsBody>,
) {
    for event in died.read() {
        if let Ok(mut body) = bodies.get_mut(event.entity) {
            body.velocity = Vec2::ZERO;
        }

        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.insert((Dead, DespawnAfter::new(DESPAWN_GRACE_SECS)));
        }
    }
}

/// Система: despawn по истечении grace-таймера
pub fn despawn_after_timeout(
    mut commands: Commands,
    mut query: Query<(Entity, &mut DespawnAfter)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut despawn) in query.iter_mut() {
        despawn.remaining -= delta;
        if despawn.remaining <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}
