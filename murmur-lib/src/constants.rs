//! Shared constants for synthesis and playback defaults.

/// Output sample rate used by the engine (Hz).
pub const SAMPLE_RATE: u32 = 44_100;

/// Output channel count; the engine always renders interleaved stereo.
pub const CHANNELS: u16 = 2;

/// Frames rendered per callback block (~23 ms at 44.1 kHz).
pub const BLOCK_FRAMES: usize = 1024;

/// Reference pitch the compound score swings around (Hz).
pub const REFERENCE_FREQUENCY: f32 = 220.0;

/// Audible range layer frequencies are clamped into (Hz).
pub const MIN_FREQUENCY: f32 = 20.0;
pub const MAX_FREQUENCY: f32 = 18_000.0;

/// Floor for envelope fade durations (seconds), guarding the fade
/// ramps against division by zero on very short layers.
pub const MIN_FADE_SECS: f32 = 1e-3;
