//! High-level controller tying scored input to the audio engine.

use std::sync::Arc;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::playback::engine::{AudioEngine, EngineError, EngineState};
use crate::playback::registry::LayerRegistry;
use crate::score::SentimentScores;
use crate::synth::factory;
use crate::synth::layer::LayerPlan;

/// Orchestrates the soundscape: owns the registry, the engine, and the
/// random source feeding the layer factory.
///
/// `hear` is the sole mutating entry point exposed to surrounding
/// CLI/GUI glue; everything else is lifecycle.
pub struct Soundscape {
    registry: Arc<LayerRegistry>,
    engine: AudioEngine,
    rng: StdRng,
}

impl Soundscape {
    /// Create a soundscape with an entropy-seeded random source.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a soundscape with a fixed seed for reproducible layer
    /// parameters (the audible waveform still depends on timing).
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let registry = Arc::new(LayerRegistry::new());
        let engine = AudioEngine::new(registry.clone());
        Self {
            registry,
            engine,
            rng,
        }
    }

    /// Open the output stream and begin rendering.
    pub fn start(&mut self) -> Result<(), EngineError> {
        self.engine.start()
    }

    /// Stop rendering and close the output stream.
    pub fn stop(&mut self) {
        self.engine.stop()
    }

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    /// Turn one scored input into sounding layers.
    ///
    /// Returns the plans describing what was added, for reporting.
    pub fn hear(&mut self, scores: &SentimentScores) -> Vec<LayerPlan> {
        let layers = factory::create_layers(scores, &mut self.rng);
        let plans: Vec<LayerPlan> = layers.iter().map(LayerPlan::from).collect();
        info!(
            "adding {} layers ({} already registered)",
            layers.len(),
            self.registry.len()
        );
        self.registry.add_all(layers);
        plans
    }

    /// Registry handle, for control-side inspection such as waiting
    /// for the last layers to play out.
    pub fn registry(&self) -> &Arc<LayerRegistry> {
        &self.registry
    }
}

impl Default for Soundscape {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hear_registers_layers_without_starting_audio() {
        let mut soundscape = Soundscape::with_seed(11);
        let scores = SentimentScores::new(0.8, 0.0, 0.2, 0.75);

        let plans = soundscape.hear(&scores);
        assert_eq!(plans.len(), 4);
        assert_eq!(soundscape.registry().len(), 4);
        assert_eq!(soundscape.state(), EngineState::Stopped);
    }

    #[test]
    fn seeded_soundscapes_plan_identically() {
        let scores = SentimentScores::new(0.3, 0.3, 0.4, -0.2);
        let a = Soundscape::with_seed(7).hear(&scores);
        let b = Soundscape::with_seed(7).hear(&scores);
        assert_eq!(a, b);
    }

    #[test]
    fn layer_plans_serialize_for_reporting() {
        let mut soundscape = Soundscape::with_seed(3);
        let plans = soundscape.hear(&SentimentScores::new(0.0, 0.0, 1.0, 0.0));
        let json = serde_json::to_string(&plans).expect("serialize plans");
        assert!(json.contains("\"waveform\""));
        assert!(json.contains("\"frequency\""));
    }
}
