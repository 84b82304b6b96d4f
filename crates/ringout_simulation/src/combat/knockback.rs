//! Knockback responder: одиночный вертикальный launch + cooldown guard

use bevy::prelude::*;

use crate::components::{KnockbackState, PhysicsBody};
use crate::scheduler::{ActionDue, ActionQueue, DeferredAction};

/// Вертикальный импульс от попадания.
///
/// No-op пока `active`: пересекающиеся попадания в окне cooldown дают
/// ровно один launch. Вертикальная скорость перезаписывается,
/// горизонтальная не трогается. Снятие guard'а — по таймеру.
pub fn apply_knockback(
    state: &mut KnockbackState,
    body: &mut PhysicsBody,
    queue: &mut ActionQueue,
) {
    if state.active {
        return;
    }

    state.active = true;
    body.velocity.y = state.launch_speed;
    queue.schedule(state.cooldown, DeferredAction::EndKnockback);
}

/// Система: снятие knockback guard'а по истёкшему таймеру
pub fn finish_knockbacks(
    mut due: EventReader<ActionDue>,
    mut targets: Query<&mut KnockbackState>,
) {
    for event in due.read() {
        if event.action != DeferredAction::EndKnockback {
            continue;
        }
        if let Ok(mut state) = targets.get_mut(event.entity) {
            state.active = false;
        }
    }
}
