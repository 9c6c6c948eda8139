//! End-to-end gameplay through the public session API

use glam::Vec2;
use sea_jump::sim::{
    AudioCue, Camera, GameEvent, GamePhase, GameSession, plan_hold, pointer_down, pointer_up, tick,
};
use sea_jump::tuning::{PlatformWidth, Tuning};

const FRAME_MS: f64 = 1000.0 / 60.0;

/// Session past the start screen, events cleared
fn started(seed: u64, tuning: Tuning) -> GameSession {
    let mut session = GameSession::new(seed, tuning).unwrap();
    pointer_down(&mut session, 0.0);
    session.drain_events().for_each(drop);
    session
}

/// Tick until the player stops flying, returning the clock
fn fly(session: &mut GameSession, mut now: f64) -> f64 {
    for _ in 0..2_000 {
        if session.phase != GamePhase::Airborne {
            break;
        }
        now += FRAME_MS;
        tick(session, now);
    }
    now
}

/// Every platform reachable from anywhere on the previous one
fn reachable() -> Tuning {
    Tuning {
        gap_min: 150.0,
        gap_max: 200.0,
        platform_width: PlatformWidth::Fixed { width: 100.0 },
        ..Default::default()
    }
}

#[test]
fn test_half_second_hold_launches_at_max() {
    let mut session = started(12345, Tuning::default());
    pointer_down(&mut session, 1_000.0);
    pointer_up(&mut session, 1_500.0);

    assert_eq!(session.phase, GamePhase::Airborne);
    assert_eq!(session.player.vel, Vec2::new(100.0, -40.0));
    let events: Vec<_> = session.drain_events().collect();
    assert_eq!(
        events,
        vec![
            GameEvent::Audio(AudioCue::PlayCharge),
            GameEvent::Audio(AudioCue::StopCharge),
            GameEvent::Audio(AudioCue::PlayLaunch),
        ]
    );
}

#[test]
fn test_center_landing_scores_two_and_advances() {
    let mut session = started(99, Tuning::default());
    let target = *session.window.target();

    session.phase = GamePhase::Airborne;
    session.player.is_jumping = true;
    session.player.pos = Vec2::new(target.center_x(), target.y - session.player.size - 1.0);
    session.player.vel = Vec2::new(0.0, 40.0);
    tick(&mut session, 0.0);

    assert_eq!(session.phase, GamePhase::Ready);
    assert_eq!(session.score, 2);
    assert_eq!(*session.window.current(), target);
    assert!(session.window.target().x > target.x);
    assert_eq!(session.player.pos.y, target.y - session.player.size);
    assert!(matches!(
        session.drain_events().next(),
        Some(GameEvent::Landed { points: 2, .. })
    ));
}

#[test]
fn test_fall_ends_run_once() {
    let mut session = started(7, Tuning::default());
    let home = *session.window.current();
    let target = *session.window.target();

    session.phase = GamePhase::Airborne;
    session.player.is_jumping = true;
    session.player.pos.x = (home.right() + target.x) / 2.0;
    session.player.vel = Vec2::ZERO;

    let mut now = 0.0;
    for _ in 0..500 {
        now += FRAME_MS;
        tick(&mut session, now);
    }

    assert!(session.is_game_over());
    let overs = session
        .drain_events()
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .count();
    assert_eq!(overs, 1);

    let frozen = session.snapshot();
    tick(&mut session, now + FRAME_MS);
    assert_eq!(session.snapshot(), frozen);
}

#[test]
fn test_restart_after_game_over() {
    let mut session = started(7, Tuning::default());
    session.score = 5;
    session.camera.pos.x = 800.0;
    session.phase = GamePhase::Airborne;
    session.player.is_jumping = true;
    session.player.pos = Vec2::new(-500.0, 410.0);
    tick(&mut session, 0.0);
    assert!(session.is_game_over());
    let old_target = *session.window.target();
    session.drain_events().for_each(drop);

    pointer_down(&mut session, 100.0);
    assert_eq!(session.phase, GamePhase::Ready);
    assert_eq!(session.score, 0);
    assert_eq!(session.player.pos, Vec2::new(150.0, 300.0));
    assert_eq!(session.camera, Camera::default());
    assert!(session.window.current().is_home);
    assert_ne!(*session.window.target(), old_target);
    assert_eq!(session.drain_events().collect::<Vec<_>>(), vec![GameEvent::Restarted]);

    // The restarting press does not charge; its release does nothing
    pointer_up(&mut session, 600.0);
    assert_eq!(session.phase, GamePhase::Ready);
}

#[test]
fn test_autopilot_long_run() {
    let mut session = started(2024, reachable());
    let mut now = 0.0;
    let jumps = 40;

    for _ in 0..jumps {
        let plan = plan_hold(&session).unwrap();
        assert!(plan.miss_by.is_some(), "every target should be reachable");
        pointer_down(&mut session, now);
        now += plan.hold_ms;
        pointer_up(&mut session, now);
        now = fly(&mut session, now);
        assert_eq!(session.phase, GamePhase::Ready);
    }

    let landed = session
        .drain_events()
        .filter(|e| matches!(e, GameEvent::Landed { .. }))
        .count();
    assert_eq!(landed, jumps);
    assert!(session.score >= jumps as u32);
    assert!(session.camera.pos.x > 0.0);
}

#[test]
fn test_same_seed_same_run() {
    let play = |seed| {
        let mut session = started(seed, Tuning::default());
        let mut now = 0.0;
        for hold in [180.0, 420.0, 90.0, 500.0] {
            pointer_down(&mut session, now);
            now += hold;
            pointer_up(&mut session, now);
            now = fly(&mut session, now);
            if session.is_game_over() {
                break;
            }
        }
        (session.snapshot(), session.drain_events().collect::<Vec<_>>())
    };

    assert_eq!(play(31), play(31));
}
