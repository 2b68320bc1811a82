//! Sentiment score carrier consumed by the layer factory.
//!
//! Scoring itself is an external concern; the library only defines the
//! shape of the result and keeps it inside its documented bounds.

use serde::{Deserialize, Serialize};

/// One scored input: positive/negative/neutral fractions in `[0, 1]`
/// and a combined polarity in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub positive: f32,
    pub negative: f32,
    pub neutral: f32,
    pub compound: f32,
}

impl SentimentScores {
    /// Build a score set, forcing every component into bounds.
    pub fn new(positive: f32, negative: f32, neutral: f32, compound: f32) -> Self {
        Self {
            positive,
            negative,
            neutral,
            compound,
        }
        .clamped()
    }

    /// Copy with every component inside its documented range.
    /// Non-finite values collapse to zero.
    pub fn clamped(self) -> Self {
        Self {
            positive: unit(self.positive),
            negative: unit(self.negative),
            neutral: unit(self.neutral),
            compound: if self.compound.is_finite() {
                self.compound.clamp(-1.0, 1.0)
            } else {
                0.0
            },
        }
    }
}

fn unit(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_out_of_range_components() {
        let scores = SentimentScores::new(1.5, -0.2, 0.4, -3.0);
        assert_eq!(scores.positive, 1.0);
        assert_eq!(scores.negative, 0.0);
        assert_eq!(scores.neutral, 0.4);
        assert_eq!(scores.compound, -1.0);
    }

    #[test]
    fn non_finite_components_collapse_to_zero() {
        let scores = SentimentScores::new(f32::NAN, f32::INFINITY, 0.5, f32::NAN);
        assert_eq!(scores.positive, 0.0);
        assert_eq!(scores.negative, 0.0);
        assert_eq!(scores.neutral, 0.5);
        assert_eq!(scores.compound, 0.0);
    }
}
