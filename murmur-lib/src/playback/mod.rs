//! Live layer ownership and the real-time rendering engine.

pub mod engine;
pub mod registry;
