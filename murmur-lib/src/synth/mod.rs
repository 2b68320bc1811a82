//! Tone layer model and the score-to-layer factory.

pub mod factory;
pub mod layer;
