//! Maps one set of sentiment scores to a batch of new layers.
//!
//! Pure apart from RNG consumption: the same scores and the same
//! seeded generator always produce the same layer set.

use std::time::Instant;

use log::debug;
use rand::Rng;

use crate::constants::REFERENCE_FREQUENCY;
use crate::score::SentimentScores;

use super::layer::{Layer, Waveform};

/// Harmonic multipliers a layer may sit on, relative to the base pitch.
pub const HARMONICS: [f32; 6] = [0.5, 1.0, 1.5, 2.0, 2.5, 3.0];

/// Maximum random detune applied per layer (Hz).
const DETUNE_HZ: f32 = 5.0;

/// Relative jitter applied to each layer's duration so lifetimes
/// decorrelate and the texture never gates on and off in step.
const DURATION_JITTER: f32 = 0.2;

/// Waveform pool when the input leans positive: brighter timbres.
const BRIGHT_WAVEFORMS: [Waveform; 4] = [
    Waveform::Triangle,
    Waveform::Triangle,
    Waveform::Sine,
    Waveform::Pad,
];

/// Waveform pool otherwise: darker, rounder timbres.
const DARK_WAVEFORMS: [Waveform; 4] = [
    Waveform::Pad,
    Waveform::Pad,
    Waveform::Sine,
    Waveform::Sine,
];

/// Base pitch for a compound score: a half-octave swing around 220 Hz.
pub fn base_frequency(compound: f32) -> f32 {
    REFERENCE_FREQUENCY * (0.5 * compound).exp2()
}

/// Number of layers for one scored input; more intense input (higher
/// combined positive and negative mass) yields a denser texture.
pub fn layer_count(positive: f32, negative: f32) -> usize {
    let intensity = positive + negative;
    ((2.0 + intensity * 3.0).floor() as usize).max(1)
}

/// Create the layers for one scored input, stamped with the current time.
pub fn create_layers<R: Rng>(scores: &SentimentScores, rng: &mut R) -> Vec<Layer> {
    create_layers_at(scores, rng, Instant::now())
}

/// Same as [`create_layers`] with an explicit creation timestamp.
pub fn create_layers_at<R: Rng>(
    scores: &SentimentScores,
    rng: &mut R,
    created_at: Instant,
) -> Vec<Layer> {
    let scores = scores.clamped();
    let base = base_frequency(scores.compound);
    // Higher neutrality -> longer sustained layers.
    let base_duration = 3.0 + scores.neutral * 5.0 + rng.gen_range(-0.5..=0.5_f32);
    let count = layer_count(scores.positive, scores.negative);
    let bright = scores.positive > scores.negative;
    let pool: &[Waveform] = if bright {
        &BRIGHT_WAVEFORMS
    } else {
        &DARK_WAVEFORMS
    };

    let mut layers = Vec::with_capacity(count);
    for _ in 0..count {
        let harmonic = HARMONICS[rng.gen_range(0..HARMONICS.len())];
        let detune = rng.gen_range(-DETUNE_HZ..=DETUNE_HZ);
        let frequency = base * harmonic + detune;
        let volume = if bright {
            rng.gen_range(0.2..=0.5_f32)
        } else {
            rng.gen_range(0.1..=0.35_f32)
        };
        let waveform = pool[rng.gen_range(0..pool.len())];
        let pan = rng.gen_range(-0.7..=0.7_f32);
        let duration =
            base_duration * rng.gen_range(1.0 - DURATION_JITTER..=1.0 + DURATION_JITTER);
        layers.push(Layer::new(
            frequency, duration, volume, pan, waveform, created_at,
        ));
    }

    debug!(
        "created {} layers around {:.1} Hz for compound {:.2}",
        layers.len(),
        base,
        scores.compound
    );
    layers
}
