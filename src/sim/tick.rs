//! Per-frame simulation tick and input transitions
//!
//! The host calls [`tick`] once per logical frame and forwards pointer presses
//! through [`pointer_down`] / [`pointer_up`]. All three run on the same thread,
//! interleaved, and each validates the current phase before acting.

use super::charge::{jump_distance, launch_velocity, update_squash};
use super::landing::{self, Landing};
use super::projectile;
use super::state::{AudioCue, GameEvent, GamePhase, GameSession};

/// Advance the session by one tick. `now` is the host clock in milliseconds.
///
/// Does nothing on the start screen or after game over.
pub fn tick(session: &mut GameSession, now: f64) {
    if !session.phase.is_running() {
        return;
    }

    session.time_ticks += 1;

    if session.player.is_jumping {
        update_airborne(session);
        if session.phase == GamePhase::GameOver {
            return;
        }
    }

    session.player.squash = update_squash(
        session.player.squash,
        &session.charge,
        now,
        &session.tuning,
    );

    let view = session.view();
    let (smoothing, follow_y) = (session.tuning.camera_smoothing, session.tuning.camera_follow_y);
    session
        .camera
        .follow(session.player.pos, view, smoothing, follow_y);
}

/// Integrate the flight, then resolve a landing or a fall into the sea
fn update_airborne(session: &mut GameSession) {
    let tuning = &session.tuning;
    let player = &mut session.player;
    projectile::step(&mut player.pos, &mut player.vel, tuning.dt, tuning.gravity);

    let hit = landing::resolve(
        player.pos,
        player.size,
        &session.window,
        tuning.platform_thickness,
        tuning.accuracy_tolerance,
    );

    if let Some(hit) = hit {
        land(session, hit);
    } else if session.player.pos.y > session.tuning.view_height {
        session.phase = GamePhase::GameOver;
        session.player.is_jumping = false;
        log::info!(
            "Game over after {} ticks, score {}",
            session.time_ticks,
            session.score
        );
        let score = session.score;
        session.push_event(GameEvent::GameOver { score });
    }
}

fn land(session: &mut GameSession, hit: Landing) {
    let player = &mut session.player;
    player.pos.y = landing::rest_y(&hit.platform, player.size);
    player.vel = glam::Vec2::ZERO;
    player.is_jumping = false;
    session.phase = GamePhase::Ready;

    if hit.advances() {
        session.score += hit.points;
        let (x, y) = (player.pos.x, player.pos.y);
        log::debug!(
            "Landed on platform at x={} for {} points (score {})",
            hit.platform.x,
            hit.points,
            session.score
        );
        session.push_event(GameEvent::Landed {
            points: hit.points,
            x,
            y,
        });
        session.advance_window();
    } else {
        log::debug!("Landed back on platform at x={}", hit.platform.x);
    }
}

/// Pointer pressed at `now` (ms).
///
/// Starts the session from the start screen, restarts after game over, and
/// otherwise begins a charge when standing on a platform.
pub fn pointer_down(session: &mut GameSession, now: f64) {
    match session.phase {
        GamePhase::NotStarted => {
            session.phase = GamePhase::Ready;
            log::info!("Session started (seed {})", session.seed);
            session.push_event(GameEvent::Started);
            session.push_event(GameEvent::Audio(AudioCue::StartAmbientLoop));
        }
        GamePhase::GameOver => restart(session),
        GamePhase::Ready if !session.player.is_jumping => {
            session.charge.begin(now);
            session.phase = GamePhase::Charging;
            session.push_event(GameEvent::Audio(AudioCue::PlayCharge));
        }
        _ => {}
    }
}

/// Pointer released at `now` (ms). Launches if a charge is in progress.
pub fn pointer_up(session: &mut GameSession, now: f64) {
    if session.phase != GamePhase::Charging
        || session.player.is_jumping
        || !session.charge.is_charging
    {
        return;
    }

    let held = session.charge.release(now);
    let distance = jump_distance(held, &session.tuning);
    session.player.vel = launch_velocity(distance, &session.tuning);
    session.player.is_jumping = true;
    session.phase = GamePhase::Airborne;
    log::debug!("Launch after {:.3}s hold, distance {}", held, distance);

    session.push_event(GameEvent::Audio(AudioCue::StopCharge));
    session.push_event(GameEvent::Audio(AudioCue::PlayLaunch));
}

/// Start a fresh run: score, player, camera and platforms are reset together
pub fn restart(session: &mut GameSession) {
    session.reset();
    log::info!("Run {} started", session.runs);
    session.push_event(GameEvent::Restarted);
}
