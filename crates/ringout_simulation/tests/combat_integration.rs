//! Combat integration tests
//!
//! Headless App гоняется tick-accurate: `run_fixed_ticks` вручную
//! продвигает Time<Fixed>, wall-clock не участвует. Проверки тайминга
//! берутся с запасом в несколько тиков от границ окон — контракт
//! scheduler'а "не раньше deadline", точный тик срабатывания может
//! уехать на один из-за накопления f32.

use bevy::prelude::*;
use ringout_simulation::*;

// --- Helpers ---

fn spawn_fighter(app: &mut App, punch_clip: f32, aerial_clip: f32) -> Entity {
    app.world_mut()
        .spawn((
            Fighter,
            Hitboxes::from_rig("fighter", &HitboxRig::default()),
            AnimationClips {
                punch: punch_clip,
                aerial_attack: aerial_clip,
                ..default()
            },
        ))
        .id()
}

fn spawn_dummy(app: &mut App, hp: i32) -> Entity {
    app.world_mut().spawn((Damageable, Health::new(hp))).id()
}

fn attack(app: &mut App, entity: Entity, kind: AttackKind) {
    app.world_mut().send_event(AttackIntent { entity, kind });
}

fn overlap(app: &mut App, attacker: Entity, target: Entity, kind: HitboxKind) {
    app.world_mut().send_event(HitboxOverlap {
        attacker,
        target,
        kind,
    });
}

fn health(app: &App, entity: Entity) -> i32 {
    app.world().get::<Health>(entity).unwrap().current
}

fn state(app: &App, entity: Entity) -> LocomotionState {
    *app.world().get::<LocomotionState>(entity).unwrap()
}

fn velocity(app: &App, entity: Entity) -> Vec2 {
    app.world().get::<PhysicsBody>(entity).unwrap().velocity
}

fn armed(app: &App, entity: Entity, kind: HitboxKind) -> bool {
    app.world()
        .get::<Hitboxes>(entity)
        .unwrap()
        .get(kind)
        .map(|hitbox| hitbox.armed)
        .unwrap_or(false)
}

// События не вычищаются: First schedule в manual-tick режиме не гоняется,
// поэтому буфер накапливает всё с начала прогона.
fn died_count(app: &App) -> usize {
    let events = app.world().resource::<Events<EntityDied>>();
    events.iter_current_update_events().count()
}

fn cue_count(app: &App, wanted: AnimationCue) -> usize {
    let events = app.world().resource::<Events<AnimationCueEvent>>();
    events
        .iter_current_update_events()
        .filter(|event| event.cue == wanted)
        .count()
}

// --- Attack window timing ---

/// Punch с клипом 1.0s: armed на 0.9s..1.4s. Overlap до окна и после
/// окна не наносит урона, в окне — наносит.
#[test]
fn test_punch_window_timing() {
    let mut app = create_headless_app();
    let fighter = spawn_fighter(&mut app, 1.0, 1.0);
    let dummy = spawn_dummy(&mut app, 10);

    attack(&mut app, fighter, AttackKind::Punch);

    // t ≈ 0.53s — до arm'а
    run_fixed_ticks(&mut app, 31);
    overlap(&mut app, fighter, dummy, HitboxKind::Grounded);
    run_fixed_ticks(&mut app, 1);
    assert_eq!(health(&app, dummy), 10);
    assert!(!armed(&app, fighter, HitboxKind::Grounded));

    // t ≈ 1.03s — внутри окна
    run_fixed_ticks(&mut app, 29);
    assert!(armed(&app, fighter, HitboxKind::Grounded));
    overlap(&mut app, fighter, dummy, HitboxKind::Grounded);
    run_fixed_ticks(&mut app, 1);
    assert_eq!(health(&app, dummy), 5);

    // t ≈ 1.58s — после disarm'а
    run_fixed_ticks(&mut app, 32);
    assert!(!armed(&app, fighter, HitboxKind::Grounded));
    overlap(&mut app, fighter, dummy, HitboxKind::Grounded);
    run_fixed_ticks(&mut app, 1);
    assert_eq!(health(&app, dummy), 5);
}

/// AerialAttack с клипом 1.0s: armed на 0.6s..1.1s.
#[test]
fn test_aerial_window_timing() {
    let mut app = create_headless_app();
    let fighter = spawn_fighter(&mut app, 1.0, 1.0);
    let dummy = spawn_dummy(&mut app, 50);

    app.world_mut().send_event(JumpIntent { entity: fighter });
    attack(&mut app, fighter, AttackKind::AerialAttack);

    // t ≈ 0.35s — до arm'а
    run_fixed_ticks(&mut app, 20);
    overlap(&mut app, fighter, dummy, HitboxKind::Aerial);
    run_fixed_ticks(&mut app, 1);
    assert_eq!(health(&app, dummy), 50);

    // t ≈ 0.75s — внутри окна
    run_fixed_ticks(&mut app, 23);
    assert!(armed(&app, fighter, HitboxKind::Aerial));
    overlap(&mut app, fighter, dummy, HitboxKind::Aerial);
    run_fixed_ticks(&mut app, 1);
    assert_eq!(health(&app, dummy), 40);

    // t ≈ 1.33s — после disarm'а
    run_fixed_ticks(&mut app, 34);
    overlap(&mut app, fighter, dummy, HitboxKind::Aerial);
    run_fixed_ticks(&mut app, 1);
    assert_eq!(health(&app, dummy), 40);
}

/// Kick и Spear — чисто анимационные: окно не ставится никогда.
#[test]
fn test_kick_and_spear_never_arm() {
    let mut app = create_headless_app();
    let fighter = spawn_fighter(&mut app, 1.0, 1.0);
    let dummy = spawn_dummy(&mut app, 10);

    attack(&mut app, fighter, AttackKind::Kick);
    attack(&mut app, fighter, AttackKind::Spear);

    for _ in 0..4 {
        run_fixed_ticks(&mut app, 30);
        assert!(!armed(&app, fighter, HitboxKind::Grounded));
        assert!(!armed(&app, fighter, HitboxKind::Aerial));
        overlap(&mut app, fighter, dummy, HitboxKind::Grounded);
        overlap(&mut app, fighter, dummy, HitboxKind::Aerial);
    }
    run_fixed_ticks(&mut app, 1);
    assert_eq!(health(&app, dummy), 10);

    // Анимации при этом проигрались
    assert_eq!(cue_count(&app, AnimationCue::Attack(AttackKind::Kick)), 1);
    assert_eq!(cue_count(&app, AnimationCue::Attack(AttackKind::Spear)), 1);
}

// --- Locomotion gating ---

/// Нелегальные triggers игнорируются молча: ни анимации, ни окна.
#[test]
fn test_illegal_triggers_ignored() {
    let mut app = create_headless_app();
    let fighter = spawn_fighter(&mut app, 1.0, 1.0);
    let dummy = spawn_dummy(&mut app, 10);

    // AerialAttack с земли
    attack(&mut app, fighter, AttackKind::AerialAttack);
    run_fixed_ticks(&mut app, 1);
    assert_eq!(
        cue_count(&app, AnimationCue::Attack(AttackKind::AerialAttack)),
        0
    );

    // Kick в воздухе
    app.world_mut().send_event(JumpIntent { entity: fighter });
    run_fixed_ticks(&mut app, 1);
    assert_eq!(state(&app, fighter), LocomotionState::Airborne);
    attack(&mut app, fighter, AttackKind::Kick);
    run_fixed_ticks(&mut app, 1);
    assert_eq!(cue_count(&app, AnimationCue::Attack(AttackKind::Kick)), 0);

    // Приземление и Punch во время dash'а
    app.world_mut().send_event(GroundContact { entity: fighter });
    run_fixed_ticks(&mut app, 1);
    app.world_mut().send_event(DashIntent { entity: fighter });
    attack(&mut app, fighter, AttackKind::Punch);
    run_fixed_ticks(&mut app, 1);
    assert_eq!(state(&app, fighter), LocomotionState::Dashing);
    assert_eq!(cue_count(&app, AnimationCue::Attack(AttackKind::Punch)), 0);

    // Ничего из этого не нанесло урона
    run_fixed_ticks(&mut app, 90);
    overlap(&mut app, fighter, dummy, HitboxKind::Grounded);
    overlap(&mut app, fighter, dummy, HitboxKind::Aerial);
    run_fixed_ticks(&mut app, 1);
    assert_eq!(health(&app, dummy), 10);
}

/// Overlap с неактивным hitbox'ом никогда не меняет health.
#[test]
fn test_unarmed_overlap_never_damages() {
    let mut app = create_headless_app();
    let fighter = spawn_fighter(&mut app, 1.0, 1.0);
    let dummy = spawn_dummy(&mut app, 10);

    overlap(&mut app, fighter, dummy, HitboxKind::Grounded);
    overlap(&mut app, fighter, dummy, HitboxKind::Aerial);
    run_fixed_ticks(&mut app, 5);
    assert_eq!(health(&app, dummy), 10);
    assert_eq!(died_count(&app), 0);
}

// --- Knockback ---

/// Два попадания в окне cooldown: урон оба раза, импульс один раз.
#[test]
fn test_knockback_single_impulse_per_window() {
    let mut app = create_headless_app();
    let fighter = spawn_fighter(&mut app, 1.0, 1.0);
    let dummy = spawn_dummy(&mut app, 50);

    attack(&mut app, fighter, AttackKind::Punch);
    run_fixed_ticks(&mut app, 62);
    assert!(armed(&app, fighter, HitboxKind::Grounded));

    overlap(&mut app, fighter, dummy, HitboxKind::Grounded);
    run_fixed_ticks(&mut app, 1);
    assert_eq!(health(&app, dummy), 45);
    assert_eq!(velocity(&app, dummy).y, 10.0);
    assert!(app.world().get::<KnockbackState>(dummy).unwrap().active);

    // Сбрасываем вертикаль: второй импульс был бы виден
    app.world_mut()
        .get_mut::<PhysicsBody>(dummy)
        .unwrap()
        .velocity
        .y = 0.0;

    overlap(&mut app, fighter, dummy, HitboxKind::Grounded);
    run_fixed_ticks(&mut app, 1);
    assert_eq!(health(&app, dummy), 40); // урон прошёл
    assert_eq!(velocity(&app, dummy).y, 0.0); // импульса не было

    // Guard снимается по таймеру
    run_fixed_ticks(&mut app, ticks_for(0.5) + 3);
    assert!(!app.world().get::<KnockbackState>(dummy).unwrap().active);
}

// --- Dash ---

/// Dash всегда завершается в Grounded через dashDuration, горизонталь
/// сбрасывается в 0.
#[test]
fn test_dash_terminates_grounded() {
    let mut app = create_headless_app();
    let fighter = spawn_fighter(&mut app, 1.0, 1.0);

    app.world_mut().send_event(DashIntent { entity: fighter });
    run_fixed_ticks(&mut app, 1);
    assert_eq!(state(&app, fighter), LocomotionState::Dashing);
    assert_eq!(velocity(&app, fighter).x, 15.0);

    // dashDuration = 0.2s → к t=0.25s уже Grounded
    run_fixed_ticks(&mut app, 14);
    assert_eq!(state(&app, fighter), LocomotionState::Grounded);
    assert_eq!(velocity(&app, fighter).x, 0.0);
}

/// Dash из воздуха тоже завершается в Grounded — реальное airborne
/// состояние на момент истечения не проверяется.
#[test]
fn test_dash_expiry_ignores_airborne() {
    let mut app = create_headless_app();
    let fighter = spawn_fighter(&mut app, 1.0, 1.0);

    app.world_mut().send_event(JumpIntent { entity: fighter });
    run_fixed_ticks(&mut app, 1);
    assert_eq!(state(&app, fighter), LocomotionState::Airborne);
    assert_eq!(velocity(&app, fighter).y, 7.0);

    app.world_mut().send_event(DashIntent { entity: fighter });
    run_fixed_ticks(&mut app, 1);
    assert_eq!(state(&app, fighter), LocomotionState::Dashing);

    // GroundContact не приходил, но dash истёк → Grounded
    run_fixed_ticks(&mut app, 14);
    assert_eq!(state(&app, fighter), LocomotionState::Grounded);
    assert_eq!(velocity(&app, fighter).x, 0.0);
    // Вертикаль dash'ем и его завершением не трогается
    assert_eq!(velocity(&app, fighter).y, 7.0);
}

/// Во время dash'а команды и ось игнорируются; после — ось снова рулит.
#[test]
fn test_dash_suppresses_input() {
    let mut app = create_headless_app();
    let fighter = spawn_fighter(&mut app, 1.0, 1.0);

    app.world_mut().get_mut::<MoveInput>(fighter).unwrap().axis = 1.0;
    app.world_mut().send_event(DashIntent { entity: fighter });
    run_fixed_ticks(&mut app, 5);

    // Ось не перебивает dash-скорость
    assert_eq!(state(&app, fighter), LocomotionState::Dashing);
    assert_eq!(velocity(&app, fighter).x, 15.0);

    // Jump во время dash'а игнорируется
    app.world_mut().send_event(JumpIntent { entity: fighter });
    run_fixed_ticks(&mut app, 1);
    assert_eq!(state(&app, fighter), LocomotionState::Dashing);
    assert_eq!(velocity(&app, fighter).y, 0.0);

    // После завершения ось снова применяется
    run_fixed_ticks(&mut app, 10);
    assert_eq!(state(&app, fighter), LocomotionState::Grounded);
    assert_eq!(velocity(&app, fighter).x, 5.0);
}

// --- Locomotion misc ---

/// Приземление по сигналу физики + повторный прыжок в воздухе игнорируется.
#[test]
fn test_jump_and_landing() {
    let mut app = create_headless_app();
    let fighter = spawn_fighter(&mut app, 1.0, 1.0);

    app.world_mut().send_event(JumpIntent { entity: fighter });
    run_fixed_ticks(&mut app, 1);
    assert_eq!(state(&app, fighter), LocomotionState::Airborne);
    assert_eq!(cue_count(&app, AnimationCue::Jumping(true)), 1);

    // Второй прыжок в воздухе — молча игнорируется
    app.world_mut().send_event(JumpIntent { entity: fighter });
    run_fixed_ticks(&mut app, 1);
    assert_eq!(cue_count(&app, AnimationCue::Jumping(true)), 1);

    app.world_mut().send_event(GroundContact { entity: fighter });
    run_fixed_ticks(&mut app, 1);
    assert_eq!(state(&app, fighter), LocomotionState::Grounded);
    assert_eq!(cue_count(&app, AnimationCue::Jumping(false)), 1);
}

/// Horizontal drive: мгновенная скорость от оси, facing за знаком,
/// blend параметры обновляются.
#[test]
fn test_horizontal_drive_and_blend() {
    let mut app = create_headless_app();
    let fighter = spawn_fighter(&mut app, 1.0, 1.0);

    app.world_mut().get_mut::<MoveInput>(fighter).unwrap().axis = 1.0;
    run_fixed_ticks(&mut app, 1);
    assert_eq!(velocity(&app, fighter).x, 5.0);
    assert_eq!(*app.world().get::<Facing>(fighter).unwrap(), Facing::Right);

    app.world_mut().get_mut::<MoveInput>(fighter).unwrap().axis = -0.5;
    run_fixed_ticks(&mut app, 1);
    assert_eq!(velocity(&app, fighter).x, -2.5);
    assert_eq!(*app.world().get::<Facing>(fighter).unwrap(), Facing::Left);

    let blend = app.world().get::<AnimationBlend>(fighter).unwrap();
    assert_eq!(blend.run_speed, 2.5);
    assert_eq!(blend.vertical_speed, 0.0);
}

// --- Defeat ---

/// Сценарий: HP 10, punch −5 → жив; aerial −10 → −5, поражение ровно
/// один раз, добивание игнорируется, despawn после grace.
#[test]
fn test_defeat_fires_exactly_once() {
    let mut app = create_headless_app();
    let fighter = spawn_fighter(&mut app, 1.0, 1.0);
    let dummy = spawn_dummy(&mut app, 10);

    // Punch
    attack(&mut app, fighter, AttackKind::Punch);
    run_fixed_ticks(&mut app, 62);
    overlap(&mut app, fighter, dummy, HitboxKind::Grounded);
    run_fixed_ticks(&mut app, 1);
    assert_eq!(health(&app, dummy), 5);
    assert_eq!(died_count(&app), 0);

    // Aerial finisher
    app.world_mut().send_event(JumpIntent { entity: fighter });
    attack(&mut app, fighter, AttackKind::AerialAttack);
    run_fixed_ticks(&mut app, 45);
    overlap(&mut app, fighter, dummy, HitboxKind::Aerial);
    run_fixed_ticks(&mut app, 1);

    assert_eq!(health(&app, dummy), -5);
    assert_eq!(died_count(&app), 1);
    assert!(app.world().get::<Dead>(dummy).is_some());
    // Труп не улетает: velocity обнулена при оформлении поражения
    assert_eq!(velocity(&app, dummy), Vec2::ZERO);

    // Добивание в ещё открытом aerial окне: ни урона, ни повторного события
    overlap(&mut app, fighter, dummy, HitboxKind::Aerial);
    run_fixed_ticks(&mut app, 1);
    assert_eq!(health(&app, dummy), -5);
    assert_eq!(died_count(&app), 1);
    // Hit reaction был на каждое засчитанное попадание, не на добивание
    assert_eq!(cue_count(&app, AnimationCue::HitReaction), 2);

    // Despawn после grace-окна
    run_fixed_ticks(&mut app, ticks_for(DESPAWN_GRACE_SECS) + 3);
    assert!(app.world().get_entity(dummy).is_err());
}

// --- Double trigger ---

/// Re-trigger до disarm'а: окно принадлежит последнему trigger'у.
/// Таймеры первого поколения срабатывают вхолостую.
#[test]
fn test_double_trigger_last_generation_wins() {
    let mut app = create_headless_app();
    let fighter = spawn_fighter(&mut app, 1.0, 1.0);
    let dummy = spawn_dummy(&mut app, 10);

    attack(&mut app, fighter, AttackKind::Punch);
    run_fixed_ticks(&mut app, 30);
    // Второй trigger до arm'а первого
    attack(&mut app, fighter, AttackKind::Punch);

    // t ≈ 1.07s: первое окно было бы armed, но оно перекрыто
    run_fixed_ticks(&mut app, 33);
    assert!(!armed(&app, fighter, HitboxKind::Grounded));
    overlap(&mut app, fighter, dummy, HitboxKind::Grounded);
    run_fixed_ticks(&mut app, 1);
    assert_eq!(health(&app, dummy), 10);

    // t ≈ 1.52s: окно второго trigger'а (0.5 + 0.9 = 1.4s от старта)
    run_fixed_ticks(&mut app, 26);
    assert!(armed(&app, fighter, HitboxKind::Grounded));
    overlap(&mut app, fighter, dummy, HitboxKind::Grounded);
    run_fixed_ticks(&mut app, 1);
    assert_eq!(health(&app, dummy), 5);

    // t ≈ 2.1s: окно второго trigger'а закрылось
    run_fixed_ticks(&mut app, 35);
    assert!(!armed(&app, fighter, HitboxKind::Grounded));
    overlap(&mut app, fighter, dummy, HitboxKind::Grounded);
    run_fixed_ticks(&mut app, 1);
    assert_eq!(health(&app, dummy), 5);
}

// --- Setup errors ---

/// Отсутствующий hitbox в rig: атака вида навсегда отключена, но
/// анимация по trigger'у проигрывается.
#[test]
fn test_missing_rig_slot_disables_attack() {
    let mut app = create_headless_app();
    let rig = HitboxRig {
        grounded: Some(HitboxSpec { damage: 5 }),
        aerial: None,
    };
    let fighter = app
        .world_mut()
        .spawn((
            Fighter,
            Hitboxes::from_rig("fighter", &rig),
            AnimationClips {
                aerial_attack: 1.0,
                ..default()
            },
        ))
        .id();
    let dummy = spawn_dummy(&mut app, 10);

    app.world_mut().send_event(JumpIntent { entity: fighter });
    attack(&mut app, fighter, AttackKind::AerialAttack);

    run_fixed_ticks(&mut app, 45);
    overlap(&mut app, fighter, dummy, HitboxKind::Aerial);
    run_fixed_ticks(&mut app, 1);

    assert_eq!(health(&app, dummy), 10);
    assert_eq!(
        cue_count(&app, AnimationCue::Attack(AttackKind::AerialAttack)),
        1
    );
}
