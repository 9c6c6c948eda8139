//! Audio system using Web Audio API
//!
//! Procedurally generated sea ambience and jump sounds - no external files
//! needed. Any failure just leaves the game silent.

use web_sys::{AudioContext, BiquadFilterType, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::{AudioCue, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ordinary landing
    Land,
    /// Landing within the center tolerance
    PerfectLand,
    /// Launch off a platform
    Launch,
    /// Fell into the sea
    Splash,
}

/// Ambient sea loop: a filtered sawtooth swelling under a slow LFO
struct Ambient {
    source: OscillatorNode,
    lfo: OscillatorNode,
    gain: GainNode,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    sfx_gain: f32,
    music_gain: f32,
    muted: bool,
    ambient: Option<Ambient>,
    /// Rising tone while charging
    charge: Option<(OscillatorNode, GainNode)>,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            sfx_gain: settings.sfx_gain(),
            music_gain: settings.music_gain(),
            muted: false,
            ambient: None,
            charge: None,
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let (Some(ctx), Some(ambient)) = (&self.ctx, &self.ambient) {
            let level = if muted { 0.0 } else { self.music_gain };
            ambient
                .gain
                .gain()
                .set_target_at_time(level, ctx.current_time(), 0.1)
                .ok();
        }
    }

    fn sfx_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_gain }
    }

    /// React to a core event
    pub fn handle(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Audio(AudioCue::StartAmbientLoop) => self.start_ambient(),
            GameEvent::Audio(AudioCue::PlayCharge) => self.start_charge(),
            GameEvent::Audio(AudioCue::StopCharge) => self.stop_charge(),
            GameEvent::Audio(AudioCue::PlayLaunch) => self.play(SoundEffect::Launch),
            GameEvent::Landed { points, .. } if points > 1 => self.play(SoundEffect::PerfectLand),
            GameEvent::Landed { .. } => self.play(SoundEffect::Land),
            GameEvent::GameOver { .. } => {
                self.stop_charge();
                self.play(SoundEffect::Splash);
            }
            GameEvent::Started | GameEvent::Restarted => {}
        }
    }

    /// Resume the context; browsers keep it suspended until a user gesture
    fn resume(&self) -> Option<&AudioContext> {
        let ctx = self.ctx.as_ref()?;
        if ctx.state() == web_sys::AudioContextState::Suspended {
            if let Err(e) = ctx.resume() {
                log::warn!("AudioContext resume failed: {:?}", e);
            }
        }
        Some(ctx)
    }

    fn start_ambient(&mut self) {
        if self.ambient.is_some() {
            return;
        }
        let Some(ctx) = self.resume() else { return };
        match build_ambient(ctx, if self.muted { 0.0 } else { self.music_gain }) {
            Some(ambient) => {
                log::info!("Ambient sea loop started");
                self.ambient = Some(ambient);
            }
            None => log::warn!("Could not start ambient sea loop"),
        }
    }

    fn start_charge(&mut self) {
        self.stop_charge();
        let vol = self.sfx_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = self.resume() else { return };
        let Some((osc, gain)) = create_osc(ctx, 180.0, OscillatorType::Triangle) else {
            log::warn!("Could not create charge tone");
            return;
        };
        let t = ctx.current_time();

        // Rises over the same second it takes the squash to bottom out
        gain.gain().set_value_at_time(vol * 0.25, t).ok();
        osc.frequency().set_value_at_time(180.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(720.0, t + 1.0)
            .ok();

        osc.start().ok();
        self.charge = Some((osc, gain));
    }

    fn stop_charge(&mut self) {
        let Some((osc, gain)) = self.charge.take() else {
            return;
        };
        if let Some(ctx) = &self.ctx {
            let t = ctx.current_time();
            gain.gain().set_target_at_time(0.0, t, 0.02).ok();
            osc.stop_with_when(t + 0.1).ok();
        }
    }

    /// Play a one-shot sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.sfx_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = self.resume() else { return };

        match effect {
            SoundEffect::Land => play_land(ctx, vol, &[330.0]),
            SoundEffect::PerfectLand => play_land(ctx, vol, &[523.0, 784.0]),
            SoundEffect::Launch => play_launch(ctx, vol),
            SoundEffect::Splash => play_splash(ctx, vol),
        }
    }
}

/// Create an oscillator with gain envelope
fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    osc_type: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((osc, gain))
}

fn build_ambient(ctx: &AudioContext, level: f32) -> Option<Ambient> {
    let source = ctx.create_oscillator().ok()?;
    let filter = ctx.create_biquad_filter().ok()?;
    let gain = ctx.create_gain().ok()?;
    let lfo = ctx.create_oscillator().ok()?;
    let lfo_depth = ctx.create_gain().ok()?;

    source.set_type(OscillatorType::Sawtooth);
    source.frequency().set_value(55.0);
    filter.set_type(BiquadFilterType::Lowpass);
    filter.frequency().set_value(300.0);
    gain.gain().set_value(level);

    // Slow swell on the filter cutoff, like waves rolling in
    lfo.frequency().set_value(0.15);
    lfo_depth.gain().set_value(200.0);

    source.connect_with_audio_node(&filter).ok()?;
    filter.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;
    lfo.connect_with_audio_node(&lfo_depth).ok()?;
    lfo_depth.connect_with_audio_param(&filter.frequency()).ok()?;

    source.start().ok()?;
    lfo.start().ok()?;
    Some(Ambient { source, lfo, gain })
}

impl Drop for Ambient {
    fn drop(&mut self) {
        self.source.stop().ok();
        self.lfo.stop().ok();
    }
}

/// Landing - short bell notes, one per pitch
fn play_land(ctx: &AudioContext, vol: f32, pitches: &[f32]) {
    let t0 = ctx.current_time();
    for (i, &pitch) in pitches.iter().enumerate() {
        let Some((osc, gain)) = create_osc(ctx, pitch, OscillatorType::Sine) else {
            log::warn!("Could not create landing tone");
            return;
        };
        let t = t0 + i as f64 * 0.08;
        gain.gain().set_value_at_time(0.0, t0).ok();
        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.25)
            .ok();
        osc.start_with_when(t).ok();
        osc.stop_with_when(t + 0.3).ok();
    }
}

/// Launch - quick upward whoosh
fn play_launch(ctx: &AudioContext, vol: f32) {
    let Some((osc, gain)) = create_osc(ctx, 200.0, OscillatorType::Square) else {
        log::warn!("Could not create launch tone");
        return;
    };
    let t = ctx.current_time();

    gain.gain().set_value_at_time(vol * 0.2, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + 0.2)
        .ok();
    osc.frequency().set_value_at_time(200.0, t).ok();
    osc.frequency()
        .exponential_ramp_to_value_at_time(900.0, t + 0.15)
        .ok();

    osc.start().ok();
    osc.stop_with_when(t + 0.25).ok();
}

/// Splash - falling tone into the sea
fn play_splash(ctx: &AudioContext, vol: f32) {
    let Some((osc, gain)) = create_osc(ctx, 400.0, OscillatorType::Sawtooth) else {
        log::warn!("Could not create splash tone");
        return;
    };
    let t = ctx.current_time();

    gain.gain().set_value_at_time(vol * 0.35, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + 0.8)
        .ok();
    osc.frequency().set_value_at_time(400.0, t).ok();
    osc.frequency()
        .exponential_ramp_to_value_at_time(60.0, t + 0.7)
        .ok();

    osc.start().ok();
    osc.stop_with_when(t + 0.9).ok();
}
