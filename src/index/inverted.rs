use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::debug;
use crate::core::config::{Config, TieBreak};
use crate::core::stats::IndexStats;
use crate::core::types::{Attribute, EngineKind, MovieId, MovieRef};
use crate::index::SimilarityIndex;
use crate::index::posting::{PostingList, intersect_sorted};
use crate::query::criteria::Criteria;
use crate::scoring::scorer::{Scorer, WeightedScorer};
use crate::search::results::{ScoredMovie, TopKCollector};

/// Inverted index structure: (attribute, value) → movies carrying that value.
///
/// Every genre, director and lead actor of a movie is indexed, not only the
/// primary ones. Keys are typed, so a director named like a genre never
/// matches a genre criterion.
pub struct InvertedIndex {
    pub postings: HashMap<Attribute, HashMap<String, PostingList>>,
    pub scorer: Box<dyn Scorer>,
    pub tie_break: TieBreak,
    records: usize,
    entries: usize,
}

impl Default for InvertedIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::with_scorer(Box::new(WeightedScorer::default()), TieBreak::default())
    }

    pub fn with_config(config: &Config) -> Self {
        Self::with_scorer(Box::new(WeightedScorer::new(config.weights)), config.tie_break)
    }

    pub fn with_scorer(scorer: Box<dyn Scorer>, tie_break: TieBreak) -> Self {
        InvertedIndex {
            postings: HashMap::new(),
            scorer,
            tie_break,
            records: 0,
            entries: 0,
        }
    }

    /// Movies indexed under one attribute value, in id order.
    pub fn postings(&self, attribute: Attribute, value: &str) -> &[MovieRef] {
        self.postings
            .get(&attribute)
            .and_then(|values| values.get(value))
            .map(PostingList::as_slice)
            .unwrap_or(&[])
    }

    /// Scores every movie matching at least one supplied criterion and
    /// returns the best `max_results`, ranked by score then tie-break.
    pub fn score(&self, criteria: &Criteria, max_results: usize) -> Vec<ScoredMovie> {
        if max_results == 0 || criteria.is_empty() {
            return Vec::new();
        }

        let mut slots: HashMap<MovieId, usize> = HashMap::new();
        let mut scored: Vec<ScoredMovie> = Vec::new();
        for (attribute, value) in criteria.supplied() {
            for movie in self.postings(attribute, value) {
                let weight = self.scorer.score(attribute, movie);
                match slots.entry(movie.id()) {
                    Entry::Occupied(slot) => scored[*slot.get()].score += weight,
                    Entry::Vacant(slot) => {
                        let seen = scored.len();
                        slot.insert(seen);
                        scored.push(ScoredMovie {
                            movie: movie.clone(),
                            score: weight,
                            seen,
                        });
                    }
                }
            }
        }

        let mut collector = TopKCollector::new(max_results, self.tie_break);
        for candidate in scored {
            collector.collect(candidate);
        }
        let candidates = collector.total_collected();
        let hits = collector.get_results();

        debug!(
            engine = "inverted",
            scorer = self.scorer.name(),
            candidates,
            hits = hits.len(),
            "find_similar"
        );
        hits
    }

    /// Movies present under every supplied criterion, in id order.
    pub fn find_all(&self, criteria: &Criteria) -> Vec<MovieRef> {
        let mut lists: Vec<&[MovieRef]> = criteria
            .supplied()
            .map(|(attribute, value)| self.postings(attribute, value))
            .collect();
        if lists.is_empty() {
            return Vec::new();
        }
        lists.sort_by_key(|list| list.len());

        let mut result = lists[0].to_vec();
        for list in &lists[1..] {
            if result.is_empty() {
                break;
            }
            result = intersect_sorted(&result, list);
        }
        result
    }

    pub fn key_count(&self) -> usize {
        self.postings.values().map(HashMap::len).sum()
    }
}

impl SimilarityIndex for InvertedIndex {
    fn kind(&self) -> EngineKind {
        EngineKind::Inverted
    }

    fn insert(&mut self, movie: MovieRef) {
        let mut added = false;
        for attribute in Attribute::ALL {
            let values = self.postings.entry(attribute).or_default();
            for value in movie.values(attribute) {
                if values.entry(value.clone()).or_default().add(movie.clone()) {
                    self.entries += 1;
                    added = true;
                }
            }
        }
        if added {
            self.records += 1;
        }
    }

    fn find_similar(&self, criteria: &Criteria, max_results: usize) -> Vec<MovieRef> {
        self.score(criteria, max_results)
            .into_iter()
            .map(|scored| scored.movie)
            .collect()
    }

    fn len(&self) -> usize {
        self.records
    }

    fn stats(&self) -> IndexStats {
        IndexStats {
            engine: EngineKind::Inverted,
            records: self.records,
            keys: self.key_count(),
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Movie;

    fn movie(id: u64, genres: &[&str], directors: &[&str], actors: &[&str], rating: f64) -> MovieRef {
        Movie::new(
            MovieId(id),
            format!("m{}", id),
            genres.iter().copied(),
            directors.iter().copied(),
            actors.iter().copied(),
            rating,
        )
        .into_ref()
    }

    fn ids(movies: &[MovieRef]) -> Vec<u64> {
        movies.iter().map(|m| m.id().value()).collect()
    }

    fn sample(tie_break: TieBreak) -> InvertedIndex {
        let mut index = InvertedIndex::with_scorer(Box::new(WeightedScorer::default()), tie_break);
        index.insert(movie(1, &["Drama"], &["Renoir"], &["Gabin", "Morgan"], 7.0));
        index.insert(movie(2, &["Comedy", "Drama"], &["Tati"], &["Tati"], 7.9));
        index.insert(movie(3, &["Comedy"], &["Renoir"], &["Gabin"], 8.1));
        index.insert(movie(4, &["War"], &["Renoir"], &["Gabin"], 8.0));
        index
    }

    #[test]
    fn every_value_is_indexed_once() {
        let mut index = InvertedIndex::new();
        index.insert(movie(1, &["Drama", "Drama"], &["Tati"], &["Tati", "Tati"], 7.0));
        assert_eq!(index.postings(Attribute::Genre, "Drama").len(), 1);
        assert_eq!(index.postings(Attribute::Director, "Tati").len(), 1);
        assert_eq!(index.postings(Attribute::LeadActor, "Tati").len(), 1);
        let stats = index.stats();
        assert_eq!(stats.records, 1);
        assert_eq!(stats.keys, 3);
        assert_eq!(stats.entries, 3);
    }

    #[test]
    fn attribute_kinds_do_not_collide() {
        let mut index = InvertedIndex::new();
        index.insert(movie(1, &["Drama"], &["Comedy"], &["Someone"], 7.0));
        assert!(index.find_similar(&Criteria::new().genre("Comedy"), 10).is_empty());
        assert_eq!(ids(&index.find_similar(&Criteria::new().director("Comedy"), 10)), vec![1]);
    }

    #[test]
    fn scores_sum_matched_weights() {
        let index = sample(TieBreak::Rating);
        let criteria = Criteria::new().genre("Drama").director("Renoir").lead_actor("Gabin");
        let scored = index.score(&criteria, 10);
        let pairs: Vec<(u64, u32)> = scored.iter().map(|s| (s.movie.id().value(), s.score)).collect();
        // 1: 3+2+1, 3 and 4: 2+1, 2: genre only
        assert_eq!(pairs, vec![(1, 6), (3, 3), (4, 3), (2, 3)]);
    }

    #[test]
    fn equal_scores_follow_tie_break() {
        let criteria = Criteria::new().genre("Drama").director("Renoir").lead_actor("Gabin");
        assert_eq!(ids(&sample(TieBreak::InsertionOrder).find_similar(&criteria, 10)), vec![1, 2, 3, 4]);
        // first scored through the genre list, then director
        assert_eq!(ids(&sample(TieBreak::FirstSeen).find_similar(&criteria, 10)), vec![1, 2, 3, 4]);

        let genre_and_actor = Criteria::new().genre("Comedy").lead_actor("Gabin");
        // 3: 3+1; 2: 3; 1 and 4: 1
        assert_eq!(ids(&sample(TieBreak::Rating).find_similar(&genre_and_actor, 10)), vec![3, 2, 4, 1]);
        assert_eq!(ids(&sample(TieBreak::FirstSeen).find_similar(&genre_and_actor, 10)), vec![3, 2, 1, 4]);
    }

    #[test]
    fn empty_criteria_or_zero_cap_yield_nothing() {
        let index = sample(TieBreak::Rating);
        assert!(index.find_similar(&Criteria::new(), 10).is_empty());
        assert!(index.find_similar(&Criteria::new().genre("Drama"), 0).is_empty());
        assert!(index.find_similar(&Criteria::new().genre("Western"), 10).is_empty());
    }

    #[test]
    fn cap_truncates_ranked_list() {
        let index = sample(TieBreak::Rating);
        let criteria = Criteria::new().director("Renoir");
        assert_eq!(ids(&index.find_similar(&criteria, 2)), vec![3, 4]);
    }

    #[test]
    fn find_all_intersects_supplied_criteria() {
        let index = sample(TieBreak::Rating);
        assert_eq!(ids(&index.find_all(&Criteria::new().director("Renoir").lead_actor("Gabin"))), vec![1, 3, 4]);
        assert_eq!(ids(&index.find_all(&Criteria::new().genre("Comedy").director("Renoir"))), vec![3]);
        assert!(index.find_all(&Criteria::new().genre("Comedy").director("Nobody")).is_empty());
        assert!(index.find_all(&Criteria::new()).is_empty());
    }
}
