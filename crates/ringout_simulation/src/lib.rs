//! RINGOUT Simulation Core
//!
//! Боевое ядро 2D side-scroller файтинга: ECS-симуляция на Bevy 0.16
//! (strategic layer).
//!
//! HYBRID ARCHITECTURE:
//! - ECS = strategic layer (combat rules, state machines, таймеры)
//! - Host engine = tactical layer (physics integration, collision
//!   detection, animation playback, input polling, rendering)
//!
//! Весь обмен с host'ом — synced компоненты (`PhysicsBody.velocity`,
//! `AnimationClips`, `MoveInput`) и one-shot события (intents и
//! overlap'ы внутрь, cues и damage/defeat события наружу).

use bevy::prelude::*;
use std::time::Duration;

pub mod animation;
pub mod combat;
pub mod components;
pub mod locomotion;
pub mod logger;
pub mod scheduler;

// Re-export базовых типов для удобства
pub use animation::{AnimationBlend, AnimationClips, AnimationCue, AnimationCueEvent};
pub use combat::{
    AttackIntent, AttackKind, DamageDealt, Dead, DespawnAfter, EntityDied, HitboxOverlap,
    DESPAWN_GRACE_SECS, HITBOX_ACTIVE_SECS,
};
pub use components::*;
pub use locomotion::{DashIntent, GroundContact, JumpIntent};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, LogLevel, LogSink,
};
pub use scheduler::{ActionDue, ActionQueue, DeferredAction};

/// Частота simulation tick (Hz)
pub const SIMULATION_HZ: f64 = 60.0;

/// Главный plugin симуляции
///
/// Один chained pipeline в FixedUpdate — порядок внутри тика задаёт
/// корректность:
/// 1. Locomotion intents: jump, dash, landing
/// 2. Attack triggers: gate + постановка damage window таймеров
/// 3. Scheduler tick: выпуск истёкших действий
/// 4. Consumers: hitbox windows, dash expiry, knockback expiry
/// 5. Overlap resolution: урон + knockback
/// 6. Defeat handling + отложенный despawn
/// 7. Horizontal drive + animation blend
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Fixed timestep 60Hz для simulation tick
        app.insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ));

        // Регистрация событий
        app.add_event::<locomotion::JumpIntent>()
            .add_event::<locomotion::DashIntent>()
            .add_event::<locomotion::GroundContact>()
            .add_event::<combat::AttackIntent>()
            .add_event::<scheduler::ActionDue>()
            .add_event::<combat::HitboxOverlap>()
            .add_event::<animation::AnimationCueEvent>()
            .add_event::<combat::DamageDealt>()
            .add_event::<combat::EntityDied>();

        // Регистрация систем в FixedUpdate
        app.add_systems(
            FixedUpdate,
            (
                locomotion::handle_jump_intents,
                locomotion::handle_dash_intents,
                locomotion::handle_ground_contacts,
                combat::attack::trigger_attacks,
                scheduler::tick_action_queues,
                combat::attack::apply_hitbox_windows,
                locomotion::finish_dashes,
                combat::knockback::finish_knockbacks,
                combat::damage::resolve_hitbox_overlaps,
                combat::damage::handle_defeats,
                combat::damage::despawn_after_timeout,
                locomotion::drive_horizontal,
            )
                .chain(), // Последовательное выполнение
        );
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins).add_plugins(SimulationPlugin);

    app
}

/// Прогоняет ровно `ticks` fixed-тиков, вручную продвигая `Time<Fixed>`.
///
/// Wall-clock в simulated time не участвует: headless драйвер и тесты
/// получают точное время (тик = 1/SIMULATION_HZ сек) независимо от
/// скорости исполнения.
pub fn run_fixed_ticks(app: &mut App, ticks: u32) {
    let timestep = Duration::from_secs_f64(1.0 / SIMULATION_HZ);

    for _ in 0..ticks {
        app.world_mut()
            .resource_mut::<Time<Fixed>>()
            .advance_by(timestep);
        app.world_mut().run_schedule(FixedUpdate);
    }
}

/// Сколько тиков покрывает `seconds` simulated time (округление вверх)
pub fn ticks_for(seconds: f32) -> u32 {
    (seconds as f64 * SIMULATION_HZ).ceil() as u32
}

/// Snapshot компонента `T` по всем entities (для сравнения прогонов)
///
/// Entities сортируются по index — результат детерминирован для
/// одинаковой истории мира.
pub fn world_snapshot<T: Component + std::fmt::Debug>(world: &mut World) -> Vec<u8> {
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
