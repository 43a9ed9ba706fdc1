//! Audio cues using Web Audio API
//!
//! Procedurally generated tones - no external files needed! Every cue is
//! described as a list of `ToneSpec`s so the sound design is plain data;
//! only the browser build turns them into oscillators. Any failure to play
//! is swallowed and never reaches the simulation.

use crate::sim::GameEvent;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One oscillator with a frequency sweep and decaying gain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    pub waveform: Waveform,
    pub start_hz: f32,
    /// Exponential sweep target (same as `start_hz` for a flat tone)
    pub end_hz: f32,
    /// Seconds after the cue starts
    pub delay: f64,
    pub duration: f64,
    /// Peak gain before volume scaling
    pub gain: f32,
}

impl ToneSpec {
    const fn flat(waveform: Waveform, hz: f32, delay: f64, duration: f64, gain: f32) -> Self {
        Self {
            waveform,
            start_hz: hz,
            end_hz: hz,
            delay,
            duration,
            gain,
        }
    }
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Star collected; pitch rises with the combo
    Collect { combo: u32 },
    /// Manual boost
    Boost,
    /// Any UI button
    Click,
    /// Every star collected
    Win,
    /// Time ran out
    Lose,
}

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match *event {
            GameEvent::StarCollected { combo, .. } => Some(SoundEffect::Collect { combo }),
            GameEvent::BoostActivated => Some(SoundEffect::Boost),
            GameEvent::SessionEnded { won: true } => Some(SoundEffect::Win),
            GameEvent::SessionEnded { won: false } => Some(SoundEffect::Lose),
            GameEvent::Paused | GameEvent::Resumed => None,
        }
    }

    /// Oscillators making up this cue
    pub fn tones(&self) -> Vec<ToneSpec> {
        match *self {
            SoundEffect::Collect { combo } => vec![ToneSpec {
                waveform: Waveform::Sine,
                start_hz: 800.0 + combo as f32 * 100.0,
                end_hz: 400.0,
                delay: 0.0,
                duration: 0.3,
                gain: 0.3,
            }],
            SoundEffect::Boost => vec![ToneSpec {
                waveform: Waveform::Sawtooth,
                start_hz: 220.0,
                end_hz: 660.0,
                delay: 0.0,
                duration: 0.2,
                gain: 0.2,
            }],
            SoundEffect::Click => vec![ToneSpec::flat(Waveform::Sine, 300.0, 0.0, 0.1, 0.1)],
            // C major arpeggio
            SoundEffect::Win => [523.25, 659.25, 783.99, 1046.5]
                .iter()
                .enumerate()
                .map(|(i, &hz)| ToneSpec::flat(Waveform::Triangle, hz, i as f64 * 0.1, 0.25, 0.25))
                .collect(),
            SoundEffect::Lose => vec![ToneSpec {
                waveform: Waveform::Square,
                start_hz: 300.0,
                end_hz: 80.0,
                delay: 0.0,
                duration: 0.6,
                gain: 0.15,
            }],
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<web_sys::AudioContext>,
    volume: f32,
}

impl AudioManager {
    pub fn new(volume: f32) -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            // May fail outside a secure context
            let ctx = web_sys::AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: volume.clamp(0.0, 1.0),
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self {
                volume: volume.clamp(0.0, 1.0),
            }
        }
    }

    /// Play every cue belonging to `events`
    pub fn play_events(&self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }
        #[cfg(target_arch = "wasm32")]
        {
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            for tone in effect.tones() {
                // Individual oscillator failures are ignored
                let _ = play_tone(ctx, &tone, self.volume);
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        log::trace!("Sound cue {:?} (no audio backend)", effect);
    }
}

#[cfg(target_arch = "wasm32")]
fn play_tone(ctx: &web_sys::AudioContext, tone: &ToneSpec, volume: f32) -> Option<()> {
    use web_sys::OscillatorType;

    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;
    osc.set_type(match tone.waveform {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Square => OscillatorType::Square,
        Waveform::Sawtooth => OscillatorType::Sawtooth,
        Waveform::Triangle => OscillatorType::Triangle,
    });
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    let t = ctx.current_time() + tone.delay;
    let end = t + tone.duration;
    osc.frequency().set_value_at_time(tone.start_hz, t).ok()?;
    if tone.end_hz != tone.start_hz {
        osc.frequency()
            .exponential_ramp_to_value_at_time(tone.end_hz, end)
            .ok()?;
    }
    gain.gain().set_value_at_time(tone.gain * volume, t).ok()?;
    gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok()?;

    osc.start_with_when(t).ok()?;
    osc.stop_with_when(end).ok()?;
    Some(())
}
