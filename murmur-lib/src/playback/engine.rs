//! Real-time rendering engine and rodio output plumbing.

use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{info, warn};
use rodio::source::SeekError;
use rodio::{OutputStream, OutputStreamBuilder, Sink, Source};

use crate::constants::{BLOCK_FRAMES, CHANNELS, SAMPLE_RATE};
use crate::playback::registry::LayerRegistry;

/// Pan law scale; a centered layer plays at 0.7 gain per side.
const PAN_SCALE: f32 = 0.7;

/// Error type for engine lifecycle failures.
#[derive(Debug)]
pub enum EngineError {
    StreamOpen(rodio::StreamError),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StreamOpen(err) => write!(f, "failed to open output stream: {}", err),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<rodio::StreamError> for EngineError {
    fn from(value: rodio::StreamError) -> Self {
        Self::StreamOpen(value)
    }
}

/// Engine lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Stopped,
    Running,
}

/// Infinite stereo source summing every live layer.
///
/// One instance is appended to the sink on `start()` and is pulled
/// from the audio thread until the engine stops. All synthesis state
/// — the scratch block and each layer's running phase — stays on this
/// side, so the control context never touches it.
pub struct SoundscapeSource {
    registry: Arc<LayerRegistry>,
    block: Vec<f32>,
    cursor: usize,
}

impl SoundscapeSource {
    pub fn new(registry: Arc<LayerRegistry>) -> Self {
        Self {
            registry,
            block: Vec::new(),
            cursor: 0,
        }
    }

    /// Render one block of interleaved stereo frames at `now`.
    ///
    /// Takes a pruned snapshot of the live layers, synthesizes each
    /// one with a per-sample envelope, pans it into the stereo sum,
    /// advances its phase by the block length, and finally soft-clips
    /// the sum with tanh so the output stays inside (-1, 1) no matter
    /// how many layers overlap.
    pub fn render_block(&mut self, frames: usize, now: Instant) -> &[f32] {
        self.block.clear();
        self.block.resize(frames * CHANNELS as usize, 0.0);
        self.cursor = 0;

        let mut layers = self.registry.render_snapshot(now);
        for layer in layers.iter_mut() {
            let elapsed = layer.elapsed_secs(now);
            let left = (1.0 - layer.pan().max(0.0)) * PAN_SCALE;
            let right = (1.0 + layer.pan().min(0.0)) * PAN_SCALE;
            let volume = layer.volume();

            for frame in 0..frames {
                let env = layer.envelope_at(elapsed + frame as f32 / SAMPLE_RATE as f32);
                if env <= 0.0 {
                    continue;
                }
                let sample = layer.sample_at(frame, SAMPLE_RATE) * env * volume;
                self.block[frame * 2] += sample * left;
                self.block[frame * 2 + 1] += sample * right;
            }
            layer.advance_phase(frames, SAMPLE_RATE);
        }
        drop(layers);

        for sample in &mut self.block {
            *sample = sample.tanh();
        }
        &self.block
    }
}

impl Iterator for SoundscapeSource {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.block.len() {
            self.render_block(BLOCK_FRAMES, Instant::now());
        }
        let sample = self.block[self.cursor];
        self.cursor += 1;
        Some(sample)
    }
}

impl Source for SoundscapeSource {
    fn current_span_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        CHANNELS
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }

    fn try_seek(&mut self, _pos: Duration) -> Result<(), SeekError> {
        Err(SeekError::NotSupported {
            underlying_source: "SoundscapeSource",
        })
    }
}

/// Owns the output stream and the soundscape source feeding it.
///
/// Two-state lifecycle: `Stopped -> Running -> Stopped`. Constructed
/// and owned by the orchestrator; nothing here is process-global.
pub struct AudioEngine {
    registry: Arc<LayerRegistry>,
    state: EngineState,
    stream: Option<OutputStream>,
    sink: Option<Sink>,
}

impl AudioEngine {
    pub fn new(registry: Arc<LayerRegistry>) -> Self {
        Self {
            registry,
            state: EngineState::Stopped,
            stream: None,
            sink: None,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Open the default output device and begin rendering.
    ///
    /// Fails fatally if no output stream can be opened; the engine
    /// never runs without a valid stream. Starting a running engine is
    /// a warned no-op.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.state == EngineState::Running {
            warn!("audio engine already running");
            return Ok(());
        }

        let stream = OutputStreamBuilder::open_default_stream()?;
        let sink = Sink::connect_new(stream.mixer());
        sink.append(SoundscapeSource::new(self.registry.clone()));
        sink.play();

        self.stream = Some(stream);
        self.sink = Some(sink);
        self.state = EngineState::Running;
        info!(
            "audio engine running: {} Hz stereo, {}-frame blocks",
            SAMPLE_RATE, BLOCK_FRAMES
        );
        Ok(())
    }

    /// Stop rendering and close the output stream.
    ///
    /// Stopping the sink detaches the soundscape source; dropping the
    /// stream closes the device once any in-flight callback completes,
    /// so no render call runs after this returns.
    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.stream = None;
        if self.state == EngineState::Running {
            info!("audio engine stopped");
        }
        self.state = EngineState::Stopped;
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        self.stop();
    }
}
