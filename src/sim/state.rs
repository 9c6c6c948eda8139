//! Session state and core simulation types
//!
//! Everything a run mutates is owned by [`GameSession`]; the renderer only
//! ever sees a [`Snapshot`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::charge::Charge;
use super::platform::{Platform, PlatformStream, PlatformWindow, home_platform};
use crate::tuning::{Tuning, TuningError};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, waiting for the first press
    NotStarted,
    /// Standing on a platform, ready to charge
    Ready,
    /// Pointer held, charge accumulating
    Charging,
    /// In flight
    Airborne,
    /// Fell into the sea
    GameOver,
}

impl GamePhase {
    /// Whether ticks advance the simulation
    pub fn is_running(&self) -> bool {
        matches!(
            self,
            GamePhase::Ready | GamePhase::Charging | GamePhase::Airborne
        )
    }
}

/// Sounds the core asks the host to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCue {
    StartAmbientLoop,
    PlayCharge,
    StopCharge,
    PlayLaunch,
}

/// One-shot notifications for the host, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// First press on the start screen
    Started,
    Audio(AudioCue),
    /// Scoring landing at world position (x, y)
    Landed { points: u32, x: f32, y: f32 },
    GameOver { score: u32 },
    Restarted,
}

/// The player character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Box center in world space (y grows downward)
    pub pos: Vec2,
    pub vel: Vec2,
    /// Half-extent of the collision box
    pub size: f32,
    pub is_jumping: bool,
    /// Vertical sprite scale, visual only
    pub squash: f32,
}

impl Player {
    /// A player resting at the center of `platform`
    pub fn on_platform(platform: &Platform, size: f32) -> Self {
        Self {
            pos: Vec2::new(platform.center_x(), platform.y - size),
            vel: Vec2::ZERO,
            size,
            is_jumping: false,
            squash: 1.0,
        }
    }
}

/// Read-only view handed to the renderer and HUD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player: Player,
    pub platforms: [Platform; 2],
    pub camera: Camera,
    pub score: u32,
    pub phase: GamePhase,
}

/// A complete game session
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    pub camera: Camera,
    pub window: PlatformWindow,
    pub charge: Charge,
    pub score: u32,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    /// Number of runs started (restarts reseed the platform stream from this)
    pub runs: u32,
    stream: PlatformStream,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a session on the start screen. Fails if the tuning is invalid.
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    /// Session with the canonical tuning
    pub fn with_seed(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let mut stream = PlatformStream::new(seed, &tuning);
        let home = home_platform(&tuning);
        let window = PlatformWindow::new(home, &mut stream);

        Self {
            seed,
            player: Player::on_platform(&home, tuning.player_size),
            camera: Camera::default(),
            window,
            charge: Charge::default(),
            score: 0,
            time_ticks: 0,
            runs: 0,
            phase: GamePhase::NotStarted,
            stream,
            events: Vec::new(),
            tuning,
        }
    }

    /// Reinitialize player, camera, score and platforms for a new run.
    ///
    /// Each run draws a different platform stream, derived from the session
    /// seed and the run count so replays stay reproducible.
    pub fn reset(&mut self) {
        self.runs += 1;
        let run_seed = self
            .seed
            .wrapping_add(u64::from(self.runs).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        self.stream = PlatformStream::new(run_seed, &self.tuning);

        let home = home_platform(&self.tuning);
        self.window = PlatformWindow::new(home, &mut self.stream);
        self.player = Player::on_platform(&home, self.tuning.player_size);
        self.camera = Camera::default();
        self.charge = Charge::default();
        self.score = 0;
        self.time_ticks = 0;
        self.phase = GamePhase::Ready;
    }

    /// Move the window forward after a scoring landing
    pub(crate) fn advance_window(&mut self) {
        self.window.advance(&mut self.stream);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Queued events without consuming them
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// View extent in world units
    pub fn view(&self) -> Vec2 {
        Vec2::new(self.tuning.view_width, self.tuning.view_height)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: self.player,
            platforms: *self.window.platforms(),
            camera: self.camera,
            score: self.score,
            phase: self.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_on_start_screen() {
        let session = GameSession::with_seed(12345);
        assert_eq!(session.phase, GamePhase::NotStarted);
        assert_eq!(session.score, 0);
        assert_eq!(session.player.pos, Vec2::new(150.0, 300.0));
        assert!(!session.player.is_jumping);
        assert_eq!(session.player.squash, 1.0);
        assert!(session.window.current().is_home);
        assert_eq!(session.camera, Camera::default());
    }

    #[test]
    fn test_new_matches_with_seed() {
        let a = GameSession::new(77, Tuning::default()).unwrap();
        let b = GameSession::with_seed(77);
        assert_eq!(a.window, b.window);
        assert_eq!(a.player, b.player);
    }

    #[test]
    fn test_new_rejects_invalid_tuning() {
        let tuning = Tuning {
            min_distance: 500.0,
            ..Default::default()
        };
        assert!(GameSession::new(1, tuning).is_err());
    }

    #[test]
    fn test_reset_returns_to_home() {
        let mut session = GameSession::with_seed(3);
        session.score = 9;
        session.player.pos = Vec2::new(2_000.0, 500.0);
        session.camera.pos = Vec2::new(1_700.0, 0.0);
        session.window.advance(&mut PlatformStream::new(0, &session.tuning));

        session.reset();
        assert_eq!(session.runs, 1);
        assert_eq!(session.phase, GamePhase::Ready);
        assert_eq!(session.score, 0);
        assert_eq!(session.player.pos, Vec2::new(150.0, 300.0));
        assert_eq!(session.camera, Camera::default());
        assert!(session.window.current().is_home);
        assert!(!session.window.target().is_home);
    }

    #[test]
    fn test_reset_is_reproducible() {
        let mut a = GameSession::with_seed(3);
        let mut b = GameSession::with_seed(3);
        a.reset();
        b.reset();
        assert_eq!(a.window, b.window);
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = GameSession::with_seed(5);
        let json = serde_json::to_string(&session.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"NotStarted\""));
        assert!(json.contains("\"score\":0"));
    }
}
