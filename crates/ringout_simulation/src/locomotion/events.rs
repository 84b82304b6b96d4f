//! Locomotion events: input intents + контакт с землёй

use bevy::prelude::*;

/// Event: намерение прыгнуть
///
/// Генерируется host input layer. Легальность (только из Grounded)
/// проверяет `handle_jump_intents`; нелегальный intent молча игнорируется.
#[derive(Event, Debug, Clone)]
pub struct JumpIntent {
    pub entity: Entity,
}

/// Event: намерение сделать dash
#[derive(Event, Debug, Clone)]
pub struct DashIntent {
    pub entity: Entity,
}

/// Event: физика сообщила overlap-begin с ground geometry
#[derive(Event, Debug, Clone)]
pub struct GroundContact {
    pub entity: Entity,
}
