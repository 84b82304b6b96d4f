//! Отложенные переходы: per-actor очередь (deadline, action)
//!
//! Контракт:
//! - `schedule(delay, action)` — action сработает не раньше чем через
//!   `delay` секунд simulated time; deadlines проверяются раз в тик.
//! - Отмены нет: поставленное действие срабатывает всегда. Каждый consumer
//!   перепроверяет свои предусловия на момент срабатывания (generation
//!   counters, текущий LocomotionState), а не на момент постановки.
//! - Очереди разных акторов независимы; порядок между ними не гарантирован.

use bevy::prelude::*;

use crate::components::HitboxKind;

/// Отложенное действие. Hitbox-варианты несут номер поколения, под
/// которое были поставлены — consumer отбрасывает таймеры перекрытых
/// trigger'ов.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DeferredAction {
    ArmHitbox { kind: HitboxKind, generation: u32 },
    DisarmHitbox { kind: HitboxKind, generation: u32 },
    EndDash,
    EndKnockback,
}

/// Событие: deadline истёк, действие пора применить
#[derive(Event, Debug, Clone)]
pub struct ActionDue {
    pub entity: Entity,
    pub action: DeferredAction,
}

#[derive(Debug, Clone, Copy)]
struct QueuedAction {
    remaining: f32,
    action: DeferredAction,
}

/// Очередь отложенных действий актора
#[derive(Component, Debug, Default, Clone)]
pub struct ActionQueue {
    entries: Vec<QueuedAction>,
}

impl ActionQueue {
    pub fn schedule(&mut self, delay_secs: f32, action: DeferredAction) {
        self.entries.push(QueuedAction {
            remaining: delay_secs,
            action,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Продвигает все deadlines на `delta` секунд; истёкшие действия
    /// отдаёт в `fire` в порядке постановки и убирает из очереди.
    pub fn tick(&mut self, delta: f32, mut fire: impl FnMut(DeferredAction)) {
        self.entries.retain_mut(|entry| {
            entry.remaining -= delta;
            if entry.remaining <= 0.0 {
                fire(entry.action);
                false
            } else {
                true
            }
        });
    }
}

/// Система: tick всех очередей, выпуск ActionDue событий
pub fn tick_action_queues(
    mut queues: Query<(Entity, &mut ActionQueue)>,
    time: Res<Time<Fixed>>,
    mut due: EventWriter<ActionDue>,
) {
    let delta = time.delta_secs();

    for (entity, mut queue) in queues.iter_mut() {
        queue.tick(delta, |action| {
            due.write(ActionDue { entity, action });
        });
    }
}
