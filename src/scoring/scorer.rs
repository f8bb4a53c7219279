use crate::core::config::Weights;
use crate::core::types::{Attribute, Movie};

/// Scorer trait
pub trait Scorer: Send + Sync {
    /// Contribution of one matched criterion to a movie's score.
    fn score(&self, attribute: Attribute, movie: &Movie) -> u32;

    fn name(&self) -> &str;
}

/// Fixed per-attribute weights; a movie matching a criterion gains that
/// criterion's weight regardless of its other fields.
pub struct WeightedScorer {
    pub weights: Weights,
}

impl WeightedScorer {
    pub fn new(weights: Weights) -> Self {
        WeightedScorer { weights }
    }
}

impl Default for WeightedScorer {
    fn default() -> Self {
        WeightedScorer::new(Weights::default())
    }
}

impl Scorer for WeightedScorer {
    fn score(&self, attribute: Attribute, _movie: &Movie) -> u32 {
        self.weights.get(attribute)
    }

    fn name(&self) -> &str {
        "weighted"
    }
}
