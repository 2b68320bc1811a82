//! One sounding tone layer: creation parameters, envelope, and
//! per-sample oscillator state.

use std::f64::consts::TAU;
use std::time::Instant;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_FREQUENCY, MIN_FADE_SECS, MIN_FREQUENCY, REFERENCE_FREQUENCY};

/// Fraction of a layer's lifetime spent in each fade ramp.
const FADE_RATIO: f32 = 0.3;

/// Longest fade ramp in seconds.
const MAX_FADE_SECS: f32 = 1.0;

/// Relative detune of the upper and lower pad partials.
const PAD_DETUNE: f64 = 0.005;

/// Phase wrap period. A multiple of 2π shared by the pad partials
/// (detuned by 1 ± 1/200), so wrapping keeps every partial continuous.
const PHASE_WRAP: f64 = 200.0 * TAU;

/// Oscillator shape of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Waveform {
    Sine,
    Triangle,
    /// Three averaged sines at relative rates {1.0, 1.005, 0.995},
    /// producing a slow chorus-like beating.
    Pad,
}

/// One independently-timed synthesized tone.
///
/// Creation parameters are fixed at construction; the only mutable
/// state is the running `phase`, which the render context alone
/// advances once the layer is registered.
#[derive(Debug, Clone)]
pub struct Layer {
    frequency: f32,
    duration: f32,
    volume: f32,
    pan: f32,
    waveform: Waveform,
    created_at: Instant,
    fade_in: f32,
    fade_out: f32,
    phase: f64,
}

impl Layer {
    /// Create a layer, clamping malformed parameters to safe values.
    ///
    /// A single bad layer must degrade, not abort: non-finite
    /// frequencies fall back to the reference pitch, out-of-range
    /// volume/pan values are clamped, and non-positive durations
    /// collapse to the fade floor.
    pub fn new(
        frequency: f32,
        duration: f32,
        volume: f32,
        pan: f32,
        waveform: Waveform,
        created_at: Instant,
    ) -> Self {
        let frequency = if frequency.is_finite() {
            frequency.clamp(MIN_FREQUENCY, MAX_FREQUENCY)
        } else {
            warn!("layer created with non-finite frequency, using reference pitch");
            REFERENCE_FREQUENCY
        };
        let duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            warn!("layer created with invalid duration {}, clamping", duration);
            MIN_FADE_SECS
        };
        let volume = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let pan = if pan.is_finite() { pan.clamp(-1.0, 1.0) } else { 0.0 };
        let fade = (duration * FADE_RATIO).min(MAX_FADE_SECS).max(MIN_FADE_SECS);

        Self {
            frequency,
            duration,
            volume,
            pan,
            waveform,
            created_at,
            fade_in: fade,
            fade_out: fade,
            phase: 0.0,
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn pan(&self) -> f32 {
        self.pan
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Seconds since this layer was created.
    pub fn elapsed_secs(&self, now: Instant) -> f32 {
        now.saturating_duration_since(self.created_at).as_secs_f32()
    }

    /// True once the layer's lifetime has fully elapsed.
    pub fn is_expired(&self, now: Instant) -> bool {
        self.elapsed_secs(now) >= self.duration
    }

    /// Amplitude multiplier in `[0, 1]` at `elapsed` seconds of life:
    /// a linear fade-in, a sustain at 1.0, and a linear fade-out.
    ///
    /// Fade-out dominates near end of life: on layers too short for
    /// both ramps, the fade-out branch wins once triggered.
    pub fn envelope_at(&self, elapsed: f32) -> f32 {
        if elapsed <= 0.0 || elapsed >= self.duration {
            return 0.0;
        }
        if elapsed > self.duration - self.fade_out {
            return ((self.duration - elapsed) / self.fade_out).clamp(0.0, 1.0);
        }
        if elapsed < self.fade_in {
            return (elapsed / self.fade_in).clamp(0.0, 1.0);
        }
        1.0
    }

    /// Oscillator value `frames_ahead` frames past the stored phase.
    ///
    /// Does not mutate the phase; callers advance it once per block
    /// with [`advance_phase`](Self::advance_phase).
    pub fn sample_at(&self, frames_ahead: usize, sample_rate: u32) -> f32 {
        let p = self.phase
            + TAU * self.frequency as f64 * frames_ahead as f64 / sample_rate as f64;
        match self.waveform {
            Waveform::Sine => p.sin() as f32,
            Waveform::Triangle => triangle(p),
            Waveform::Pad => {
                let sum = p.sin()
                    + (p * (1.0 + PAD_DETUNE)).sin()
                    + (p * (1.0 - PAD_DETUNE)).sin();
                (sum / 3.0) as f32
            }
        }
    }

    /// Advance the stored phase by one rendered block of `frames`.
    ///
    /// The phase wraps at [`PHASE_WRAP`] so it never grows without
    /// bound while every waveform stays continuous across the wrap.
    pub fn advance_phase(&mut self, frames: usize, sample_rate: u32) {
        let step = TAU * self.frequency as f64 * frames as f64 / sample_rate as f64;
        self.phase = (self.phase + step).rem_euclid(PHASE_WRAP);
    }
}

/// Sine-aligned bipolar triangle: 0 at phase 0, peak at π/2, trough at 3π/2.
fn triangle(phase: f64) -> f32 {
    let t = (phase / TAU).rem_euclid(1.0);
    let value = if t < 0.25 {
        4.0 * t
    } else if t < 0.75 {
        2.0 - 4.0 * t
    } else {
        4.0 * t - 4.0
    };
    value as f32
}

/// Serializable snapshot of a layer's creation parameters, for
/// reporting and factory-output inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerPlan {
    pub frequency: f32,
    pub duration: f32,
    pub volume: f32,
    pub pan: f32,
    pub waveform: Waveform,
}

impl From<&Layer> for LayerPlan {
    fn from(layer: &Layer) -> Self {
        Self {
            frequency: layer.frequency,
            duration: layer.duration,
            volume: layer.volume,
            pan: layer.pan,
            waveform: layer.waveform,
        }
    }
}
