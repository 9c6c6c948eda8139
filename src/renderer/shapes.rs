//! Shape generation for the scene
//!
//! Everything is built in world coordinates; the pipeline applies the camera.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::{Vertex, colors};
use crate::settings::Settings;
use crate::sim::{GamePhase, Platform, Player, Snapshot};
use crate::tuning::Tuning;

/// Width of one wave segment along the sea surface
const WAVE_SEGMENT: f32 = 20.0;
/// Shadow offset under platforms
const SHADOW_OFFSET: Vec2 = Vec2::new(2.0, 2.0);
/// Charge meter size, above the player
const METER_SIZE: Vec2 = Vec2::new(40.0, 6.0);

/// Axis-aligned rectangle with a vertical color gradient
pub fn rect(min: Vec2, max: Vec2, top: [f32; 4], bottom: [f32; 4]) -> [Vertex; 6] {
    [
        Vertex::new(min.x, min.y, top),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(max.x, min.y, top),
        Vertex::new(max.x, min.y, top),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(max.x, max.y, bottom),
    ]
}

/// Sky and sea filling the visible area
pub fn backdrop(camera: Vec2, view: Vec2, sea_level: f32, time: f32) -> Vec<Vertex> {
    let left = camera.x;
    let right = camera.x + view.x;
    let bottom = camera.y + view.y;

    let mut vertices = Vec::new();
    vertices.extend(rect(
        camera,
        Vec2::new(right, sea_level),
        colors::SKY_TOP,
        colors::SKY_HORIZON,
    ));
    vertices.extend(rect(
        Vec2::new(left, sea_level),
        Vec2::new(right, bottom.max(sea_level)),
        colors::SEA_SURFACE,
        colors::SEA_DEEP,
    ));

    // Wave crests, aligned to world x so they scroll with the camera
    let first = (left / WAVE_SEGMENT).floor() as i32;
    let last = (right / WAVE_SEGMENT).ceil() as i32;
    for i in first..last {
        let x = i as f32 * WAVE_SEGMENT;
        let phase = x / (WAVE_SEGMENT * 4.0) * TAU + time * 2.0;
        let crest = sea_level - 3.0 - phase.sin() * 2.0;
        vertices.extend(rect(
            Vec2::new(x, crest),
            Vec2::new(x + WAVE_SEGMENT * 0.6, crest + 2.0),
            colors::WAVE_CREST,
            colors::WAVE_CREST,
        ));
    }

    vertices
}

/// A platform strip with its drop shadow
pub fn platform(platform: &Platform, thickness: f32) -> Vec<Vertex> {
    let min = Vec2::new(platform.x, platform.y);
    let max = Vec2::new(platform.right(), platform.y + thickness);

    let mut vertices = Vec::with_capacity(12);
    vertices.extend(rect(
        min + SHADOW_OFFSET,
        max + SHADOW_OFFSET,
        colors::SHADOW,
        colors::SHADOW,
    ));
    vertices.extend(rect(
        min,
        max,
        colors::PLATFORM_TOP,
        colors::PLATFORM_BOTTOM,
    ));
    vertices
}

/// The player body, squashed toward its feet
pub fn player(player: &Player, squash: f32) -> Vec<Vertex> {
    let half_w = player.size;
    let height = player.size * 2.0 * squash;
    let feet = player.pos.y + player.size;
    let top = feet - height;

    let mut vertices = Vec::with_capacity(18);
    vertices.extend(rect(
        Vec2::new(player.pos.x - half_w, top),
        Vec2::new(player.pos.x + half_w, feet),
        colors::PLAYER,
        colors::PLAYER,
    ));

    // Eyes sit a quarter of the way down the body
    let eye_y = top + height * 0.25;
    for dx in [-0.4, 0.4] {
        let c = Vec2::new(player.pos.x + dx * half_w, eye_y);
        vertices.extend(rect(
            c - Vec2::splat(2.5),
            c + Vec2::splat(2.5),
            colors::PLAYER_EYE,
            colors::PLAYER_EYE,
        ));
    }
    vertices
}

/// Charge meter filled by how far the squash has progressed to its floor
pub fn charge_meter(player: &Player, squash_min: f32) -> Vec<Vertex> {
    let fill = ((1.0 - player.squash) / (1.0 - squash_min)).clamp(0.0, 1.0);
    let min = Vec2::new(
        player.pos.x - METER_SIZE.x / 2.0,
        player.pos.y - player.size - 14.0,
    );
    let color = lerp_color(colors::CHARGE_LOW, colors::CHARGE_HIGH, fill);

    let mut vertices = Vec::with_capacity(12);
    vertices.extend(rect(min, min + METER_SIZE, colors::SHADOW, colors::SHADOW));
    if fill > 0.0 {
        let filled = Vec2::new(METER_SIZE.x * fill, METER_SIZE.y);
        vertices.extend(rect(min, min + filled, color, color));
    }
    vertices
}

fn lerp_color(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    std::array::from_fn(|i| a[i] + (b[i] - a[i]) * t)
}

/// Build the full frame for a snapshot
pub fn scene(snapshot: &Snapshot, tuning: &Tuning, settings: &Settings, time: f32) -> Vec<Vertex> {
    let view = Vec2::new(tuning.view_width, tuning.view_height);
    let sea_level = tuning.ground_y + tuning.platform_thickness * 3.0;

    let mut vertices = backdrop(snapshot.camera.pos, view, sea_level, time);
    for p in &snapshot.platforms {
        vertices.extend(platform(p, tuning.platform_thickness));
    }

    let squash = settings.effective_squash(snapshot.player.squash);
    vertices.extend(player(&snapshot.player, squash));
    if snapshot.phase == GamePhase::Charging {
        vertices.extend(charge_meter(&snapshot.player, tuning.squash_min));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameSession;

    fn height_of(vertices: &[Vertex]) -> f32 {
        let ys = vertices[..6].iter().map(|v| v.position[1]);
        let (lo, hi) = ys.fold((f32::MAX, f32::MIN), |(lo, hi), y| (lo.min(y), hi.max(y)));
        hi - lo
    }

    #[test]
    fn test_rect_gradient() {
        let r = rect(Vec2::ZERO, Vec2::new(10.0, 5.0), [1.0; 4], [0.0; 4]);
        for v in r {
            let expected = if v.position[1] == 0.0 { [1.0; 4] } else { [0.0; 4] };
            assert_eq!(v.color, expected);
        }
    }

    #[test]
    fn test_player_squash_keeps_feet_planted() {
        let session = GameSession::with_seed(1);
        let p = session.player;
        let full = player(&p, 1.0);
        let squashed = player(&p, 0.7);

        assert!((height_of(&full) - 40.0).abs() < 1e-4);
        assert!((height_of(&squashed) - 28.0).abs() < 1e-4);
        let feet = |vs: &[Vertex]| vs[..6].iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert_eq!(feet(&full[..]), feet(&squashed[..]));
    }

    #[test]
    fn test_meter_only_while_charging() {
        let tuning = Tuning::default();
        let settings = Settings::default();
        let mut session = GameSession::with_seed(1);
        let idle = scene(&session.snapshot(), &tuning, &settings, 0.0);

        session.phase = GamePhase::Charging;
        session.player.squash = 0.85;
        let charging = scene(&session.snapshot(), &tuning, &settings, 0.0);
        // Meter background plus a half-filled bar
        assert_eq!(charging.len(), idle.len() + 12);
    }

    #[test]
    fn test_platforms_included() {
        let tuning = Tuning::default();
        let session = GameSession::with_seed(1);
        let snap = session.snapshot();
        let vertices = scene(&snap, &tuning, &Settings::default(), 0.0);

        let home = snap.platforms[0];
        assert!(vertices.iter().any(|v| v.position == [home.x, home.y]
            && v.color == colors::PLATFORM_TOP));
    }
}
