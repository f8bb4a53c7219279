pub mod hierarchical;
pub mod inverted;
pub mod posting;

use crate::core::stats::IndexStats;
use crate::core::types::{EngineKind, MovieRef};
use crate::query::criteria::Criteria;

/// A movie index answering "find similar" queries.
///
/// Queries are total: missing keys and empty criteria degrade to smaller or
/// empty results, never to errors.
pub trait SimilarityIndex: Send + Sync {
    fn kind(&self) -> EngineKind;

    /// Ids must be unique per index; `MovieSearch` assigns them.
    fn insert(&mut self, movie: MovieRef);

    fn find_similar(&self, criteria: &Criteria, max_results: usize) -> Vec<MovieRef>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn stats(&self) -> IndexStats;
}
