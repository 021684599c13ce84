//! Web Audio sound cues
//!
//! Every cue is a single oscillator with a pitch sweep and a gain envelope,
//! synthesized on the fly.

use web_sys::{AudioContext, AudioParam, OscillatorType};

use crate::settings::Settings;
use crate::sim::SoundCue;

/// How a parameter moves between its scheduled points
#[derive(Debug, Clone, Copy)]
enum Ramp {
    Step,
    Linear,
    Exponential,
}

/// One synthesized cue: pitch points, then a gain fade from `peak` to `tail`
#[derive(Debug, Clone, Copy)]
struct Tone {
    wave: OscillatorType,
    pitch: &'static [(f64, f32)],
    pitch_ramp: Ramp,
    peak: f32,
    tail: f32,
    fade: Ramp,
    length: f64,
}

const JUMP: Tone = Tone {
    wave: OscillatorType::Square,
    pitch: &[(0.0, 150.0), (0.1, 300.0)],
    pitch_ramp: Ramp::Exponential,
    peak: 0.05,
    tail: 0.01,
    fade: Ramp::Exponential,
    length: 0.1,
};

const HIT: Tone = Tone {
    wave: OscillatorType::Sawtooth,
    pitch: &[(0.0, 100.0), (0.2, 50.0)],
    pitch_ramp: Ramp::Linear,
    peak: 0.1,
    tail: 0.01,
    fade: Ramp::Exponential,
    length: 0.3,
};

/// A major arpeggio
const WIN: Tone = Tone {
    wave: OscillatorType::Triangle,
    pitch: &[(0.0, 440.0), (0.1, 554.0), (0.2, 659.0)],
    pitch_ramp: Ramp::Step,
    peak: 0.1,
    tail: 0.0,
    fade: Ramp::Linear,
    length: 0.6,
};

fn tone_for(cue: SoundCue) -> &'static Tone {
    match cue {
        SoundCue::Jump => &JUMP,
        SoundCue::Hit => &HIT,
        SoundCue::Win => &WIN,
    }
}

fn schedule(param: &AudioParam, ramp: Ramp, value: f32, at: f64) {
    let _ = match ramp {
        Ramp::Step => param.set_value_at_time(value, at),
        Ramp::Linear => param.linear_ramp_to_value_at_time(value, at),
        Ramp::Exponential => param.exponential_ramp_to_value_at_time(value, at),
    };
}

/// Plays `SoundCue`s at the player's volume
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Unavailable outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("No AudioContext, sound disabled");
        }
        Self { ctx, volume: 1.0 }
    }

    /// Browsers keep the context suspended until a user gesture
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    /// Pick up volume and mute from the player's settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
    }

    /// Play every cue raised by the latest tick
    pub fn play_cues(&self, cues: &[SoundCue]) {
        for &cue in cues {
            self.play(cue);
        }
    }

    pub fn play(&self, cue: SoundCue) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        self.resume();

        if self.voice(ctx, tone_for(cue)).is_none() {
            log::debug!("Could not voice {cue:?}");
        }
    }

    /// Wire oscillator -> gain -> speakers and schedule the whole cue
    fn voice(&self, ctx: &AudioContext, tone: &Tone) -> Option<()> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;
        osc.set_type(tone.wave);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        let now = ctx.current_time();
        let freq = osc.frequency();
        for (i, &(offset, hz)) in tone.pitch.iter().enumerate() {
            let ramp = if i == 0 { Ramp::Step } else { tone.pitch_ramp };
            schedule(&freq, ramp, hz, now + offset);
        }

        let level = gain.gain();
        schedule(&level, Ramp::Step, tone.peak * self.volume, now);
        schedule(&level, tone.fade, tone.tail, now + tone.length);

        osc.start().ok()?;
        osc.stop_with_when(now + tone.length).ok()
    }
}
