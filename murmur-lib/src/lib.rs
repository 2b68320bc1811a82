//! # Murmur Audio Library
//!
//! Core synthesis and mixing engine for the murmur ambient soundscape
//! generator. Sentiment scores flow in, short-lived synthesized tone
//! layers come out: the factory maps each scored input to a handful of
//! layers, the registry owns the live ones, and the engine sums and
//! envelopes them into the output stream in real time.

pub mod constants;
pub mod playback;
pub mod score;
pub mod soundscape;
pub mod synth;
