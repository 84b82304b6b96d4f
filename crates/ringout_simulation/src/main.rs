//! Headless скриптованный бой
//!
//! Прогоняет детерминированный сценарий без host engine: punch window,
//! aerial finisher, despawn побеждённого. Печатает исходы через logger.

use bevy::prelude::*;
use ringout_simulation::*;

fn main() {
    let mut app = create_headless_app();

    let fighter = app
        .world_mut()
        .spawn((
            Fighter,
            Hitboxes::from_rig("fighter", &HitboxRig::default()),
            AnimationClips {
                punch: 1.0,
                aerial_attack: 0.5,
                ..default()
            },
        ))
        .id();

    let dummy = app.world_mut().spawn((Damageable, Health::new(10))).id();
    log_info(&format!(
        "Scripted bout: fighter {:?} vs dummy {:?}",
        fighter, dummy
    ));

    // Punch: окно armed на 0.9..1.4s, overlap в середине окна
    app.world_mut().send_event(AttackIntent {
        entity: fighter,
        kind: AttackKind::Punch,
    });
    run_fixed_ticks(&mut app, ticks_for(1.0));
    app.world_mut().send_event(HitboxOverlap {
        attacker: fighter,
        target: dummy,
        kind: HitboxKind::Grounded,
    });
    run_fixed_ticks(&mut app, 1);

    let hp = app.world().get::<Health>(dummy).map(|h| h.current);
    log_info(&format!("After punch: dummy HP = {:?}", hp));

    // Aerial finisher: jump → AerialAttack, окно armed c 0.3s
    app.world_mut().send_event(JumpIntent { entity: fighter });
    app.world_mut().send_event(AttackIntent {
        entity: fighter,
        kind: AttackKind::AerialAttack,
    });
    run_fixed_ticks(&mut app, ticks_for(0.35));
    app.world_mut().send_event(HitboxOverlap {
        attacker: fighter,
        target: dummy,
        kind: HitboxKind::Aerial,
    });
    run_fixed_ticks(&mut app, 1);

    let hp = app.world().get::<Health>(dummy).map(|h| h.current);
    let defeated = app.world().get::<Dead>(dummy).is_some();
    log_info(&format!(
        "After aerial: dummy HP = {:?}, defeated = {}",
        hp, defeated
    ));

    // Despawn grace истекает
    run_fixed_ticks(&mut app, ticks_for(DESPAWN_GRACE_SECS + 0.1));
    log_info(&format!(
        "Dummy removed: {}",
        app.world().get_entity(dummy).is_err()
    ));
}
