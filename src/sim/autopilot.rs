//! Demo autopilot
//!
//! Picks a hold duration by simulating candidate jumps on a throwaway copy of
//! the session and keeping the one that lands closest to the target's center.
//! Drives the native headless binary and long-run tests.

use super::state::{GameEvent, GamePhase, GameSession};
use super::tick::{pointer_down, pointer_up, tick};

/// Finest hold spacing tried, in milliseconds
const CANDIDATE_STEP_MS: f64 = 5.0;
/// Upper bound on candidates per plan; slow charge tunings get a coarser step
const MAX_CANDIDATES: f64 = 400.0;
/// Upper bound on ticks a simulated flight may take
const MAX_FLIGHT_TICKS: u32 = 2_000;

/// Outcome of a simulated jump
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plan {
    pub hold_ms: f64,
    /// Distance from the target center at touchdown (None: missed the target)
    pub miss_by: Option<f32>,
}

/// Find the best hold for the next jump.
///
/// Returns `None` unless the session is standing on a platform.
pub fn plan_hold(session: &GameSession) -> Option<Plan> {
    if session.phase != GamePhase::Ready {
        return None;
    }

    let tuning = &session.tuning;
    // Holds beyond this all clamp to the same distance
    let max_hold_ms = f64::from(tuning.max_distance / tuning.speed_scale) * 1000.0;
    let target_center = session.window.target().center_x();
    let step_ms = candidate_step_ms(max_hold_ms);

    let mut best: Option<Plan> = None;
    let mut hold_ms = 0.0;
    while hold_ms <= max_hold_ms + step_ms {
        let plan = Plan {
            hold_ms,
            miss_by: simulate(session, hold_ms).map(|x| (x - target_center).abs()),
        };
        best = match (best, plan.miss_by) {
            (None, _) => Some(plan),
            (Some(b), Some(m)) if b.miss_by.is_none_or(|bm| m < bm) => Some(plan),
            (b, _) => b,
        };
        hold_ms += step_ms;
    }
    best
}

/// Spacing between candidate holds covering `[0, max_hold_ms]`
fn candidate_step_ms(max_hold_ms: f64) -> f64 {
    CANDIDATE_STEP_MS.max(max_hold_ms / MAX_CANDIDATES)
}

/// Fly a copy of the session and return the landing x if it scores
fn simulate(session: &GameSession, hold_ms: f64) -> Option<f32> {
    let mut probe = session.clone();
    probe.drain_events().for_each(drop);

    pointer_down(&mut probe, 0.0);
    pointer_up(&mut probe, hold_ms);

    let mut now = hold_ms;
    for _ in 0..MAX_FLIGHT_TICKS {
        if probe.phase != GamePhase::Airborne {
            break;
        }
        now += 1000.0 / 60.0;
        tick(&mut probe, now);
    }

    probe.drain_events().find_map(|event| match event {
        GameEvent::Landed { x, .. } => Some(x),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_plan_unless_ready() {
        let session = GameSession::with_seed(1);
        assert!(plan_hold(&session).is_none());
    }

    #[test]
    fn test_candidate_count_is_bounded() {
        // Default tuning: 500 ms of useful hold at the finest step
        assert_eq!(candidate_step_ms(500.0), CANDIDATE_STEP_MS);

        // speed_scale 0.01 needs 10_000 s of hold to reach max distance
        let max_hold_ms = 10_000_000.0;
        let step = candidate_step_ms(max_hold_ms);
        assert!((max_hold_ms + step) / step <= MAX_CANDIDATES + 1.0);
    }

    #[test]
    fn test_slow_charge_still_plans() {
        let tuning = crate::tuning::Tuning {
            speed_scale: 0.01,
            ..Default::default()
        };
        let mut session = GameSession::new(1, tuning).unwrap();
        pointer_down(&mut session, 0.0);

        let plan = plan_hold(&session).unwrap();
        assert!(plan.hold_ms <= 10_000_000.0 + candidate_step_ms(10_000_000.0));
    }

    #[test]
    fn test_plan_does_not_touch_session() {
        let mut session = GameSession::with_seed(1);
        pointer_down(&mut session, 0.0);
        let before = session.snapshot();
        let pending = session.pending_events().len();

        let plan = plan_hold(&session).unwrap();
        assert!(plan.hold_ms >= 0.0);
        assert_eq!(session.snapshot(), before);
        assert_eq!(session.pending_events().len(), pending);
    }
}
