//! Locomotion системы: jump/dash/landing + horizontal drive
//!
//! Состояние живёт в `LocomotionState` (Grounded/Airborne/Dashing),
//! скорость пишется в `PhysicsBody` — host интегрирует её в позицию.
//! Завершение dash'а — отложенный переход через scheduler: таймер
//! срабатывает безусловно, consumer перепроверяет state.

use bevy::prelude::*;

pub mod events;

pub use events::{DashIntent, GroundContact, JumpIntent};

use crate::animation::{AnimationBlend, AnimationCue, AnimationCueEvent};
use crate::components::{
    Facing, Fighter, LocomotionConfig, LocomotionState, MoveInput, PhysicsBody,
};
use crate::scheduler::{ActionDue, ActionQueue, DeferredAction};

/// Система: прыжок (только из Grounded)
///
/// Вертикальный импульс, Grounded → Airborne. Горизонтальная скорость
/// не трогается.
pub fn handle_jump_intents(
    mut intents: EventReader<JumpIntent>,
    mut fighters: Query<
        (&mut LocomotionState, &LocomotionConfig, &mut PhysicsBody),
        With<Fighter>,
    >,
    mut cues: EventWriter<AnimationCueEvent>,
) {
    for intent in intents.read() {
        let Ok((mut state, config, mut body)) = fighters.get_mut(intent.entity) else {
            continue;
        };
        if *state != LocomotionState::Grounded {
            continue;
        }

        body.velocity.y = config.jump_power;
        *state = LocomotionState::Airborne;
        cues.write(AnimationCueEvent {
            entity: intent.entity,
            cue: AnimationCue::Jumping(true),
        });
    }
}

/// Система: dash (из Grounded и Airborne)
///
/// Горизонталь = dash_speed в сторону взгляда, вертикаль не трогаем.
/// Повторный dash во время dash'а игнорируется; завершение ставится
/// на таймер.
pub fn handle_dash_intents(
    mut intents: EventReader<DashIntent>,
    mut fighters: Query<
        (
            &mut LocomotionState,
            &LocomotionConfig,
            &Facing,
            &mut PhysicsBody,
            &mut ActionQueue,
        ),
        With<Fighter>,
    >,
    mut cues: EventWriter<AnimationCueEvent>,
) {
    for intent in intents.read() {
        let Ok((mut state, config, facing, mut body, mut queue)) =
            fighters.get_mut(intent.entity)
        else {
            continue;
        };
        if *state == LocomotionState::Dashing {
            continue;
        }

        body.velocity.x = facing.sign() * config.dash_speed;
        *state = LocomotionState::Dashing;
        queue.schedule(config.dash_duration, DeferredAction::EndDash);
        cues.write(AnimationCueEvent {
            entity: intent.entity,
            cue: AnimationCue::Dash,
        });

        crate::log(&format!(
            "💨 Dash started (entity: {:?}, {:.2}s)",
            intent.entity, config.dash_duration
        ));
    }
}

/// Система: приземление по сигналу физики
///
/// Airborne → Grounded. Контакт во время dash'а отбрасывается: dash
/// завершается своим таймером и сам приземляет в Grounded.
pub fn handle_ground_contacts(
    mut contacts: EventReader<GroundContact>,
    mut fighters: Query<&mut LocomotionState, With<Fighter>>,
    mut cues: EventWriter<AnimationCueEvent>,
) {
    for contact in contacts.read() {
        let Ok(mut state) = fighters.get_mut(contact.entity) else {
            continue;
        };
        if *state != LocomotionState::Airborne {
            continue;
        }

        *state = LocomotionState::Grounded;
        cues.write(AnimationCueEvent {
            entity: contact.entity,
            cue: AnimationCue::Jumping(false),
        });
    }
}

/// Система: завершение dash'а по таймеру
///
/// Приземляет в Grounded безусловно — реальное airborne состояние на
/// момент истечения не проверяется (поведение закреплено тестом).
/// Горизонтальная скорость сбрасывается, вертикальная остаётся.
pub fn finish_dashes(
    mut due: EventReader<ActionDue>,
    mut fighters: Query<(&mut LocomotionState, &mut PhysicsBody), With<Fighter>>,
) {
    for event in due.read() {
        if event.action != DeferredAction::EndDash {
            continue;
        }
        let Ok((mut state, mut body)) = fighters.get_mut(event.entity) else {
            continue;
        };
        if *state != LocomotionState::Dashing {
            continue;
        }

        *state = LocomotionState::Grounded;
        body.velocity.x = 0.0;
    }
}

/// Система: horizontal drive + animation blend (каждый физический тик)
///
/// Вне dash'а горизонтальная скорость — мгновенно axis × move_speed,
/// без кривой разгона; facing следует за знаком оси. Во время dash'а
/// ось игнорируется полностью (скорость задана dash'ем).
pub fn drive_horizontal(
    mut fighters: Query<
        (
            &LocomotionState,
            &MoveInput,
            &LocomotionConfig,
            &mut Facing,
            &mut PhysicsBody,
            &mut AnimationBlend,
        ),
        With<Fighter>,
    >,
) {
    for (state, input, config, mut facing, mut body, mut blend) in fighters.iter_mut() {
        if *state == LocomotionState::Dashing {
            continue;
        }

        body.velocity.x = input.axis * config.move_speed;

        if input.axis > 0.01 {
            *facing = Facing::Right;
        } else if input.axis < -0.01 {
            *facing = Facing::Left;
        }

        blend.run_speed = body.velocity.x.abs();
        blend.vertical_speed = body.velocity.y;
    }
}
