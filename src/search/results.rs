use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::time::Duration;
use crate::core::config::TieBreak;
use crate::core::error::Result;
use crate::core::types::{EngineKind, MovieId, MovieRef};

/// Movie with its accumulated score
#[derive(Debug, Clone)]
pub struct ScoredMovie {
    pub movie: MovieRef,
    pub score: u32,
    pub seen: usize,  // position at which the movie first received a score
}

impl ScoredMovie {
    /// Total order used for ranking: score descending, then the tie-break.
    /// Ends on a unique key so the order is fully deterministic.
    pub fn rank_cmp(&self, other: &Self, tie_break: TieBreak) -> Ordering {
        other.score.cmp(&self.score).then_with(|| match tie_break {
            TieBreak::Rating => other
                .movie
                .rating()
                .total_cmp(&self.movie.rating())
                .then_with(|| self.movie.id().cmp(&other.movie.id())),
            TieBreak::InsertionOrder => self.movie.id().cmp(&other.movie.id()),
            TieBreak::FirstSeen => self.seen.cmp(&other.seen),
        })
    }
}

/// Top-K collector for scored candidates
pub struct TopKCollector {
    pub candidates: Vec<ScoredMovie>,
    pub k: usize,
    pub tie_break: TieBreak,
}

impl TopKCollector {
    pub fn new(k: usize, tie_break: TieBreak) -> Self {
        TopKCollector {
            candidates: Vec::new(),
            k,
            tie_break,
        }
    }

    pub fn collect(&mut self, scored: ScoredMovie) {
        self.candidates.push(scored);
    }

    pub fn total_collected(&self) -> usize {
        self.candidates.len()
    }

    pub fn get_results(self) -> Vec<ScoredMovie> {
        let TopKCollector { mut candidates, k, tie_break } = self;
        if k == 0 {
            return Vec::new();
        }
        if candidates.len() > k {
            candidates.select_nth_unstable_by(k - 1, |a, b| a.rank_cmp(b, tie_break));
            candidates.truncate(k);
        }
        candidates.sort_by(|a, b| a.rank_cmp(b, tie_break));
        candidates
    }
}

/// One line of rendered output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMovie {
    pub rank: usize,
    pub title: String,
    pub rating: f64,
}

/// Search results container
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub engine: EngineKind,
    pub movies: Vec<MovieRef>,
    pub took: Duration,
}

impl SearchResults {
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn ids(&self) -> Vec<MovieId> {
        self.movies.iter().map(|m| m.id()).collect()
    }

    pub fn ranked(&self) -> Vec<RankedMovie> {
        self.movies
            .iter()
            .enumerate()
            .map(|(i, movie)| RankedMovie {
                rank: i + 1,
                title: movie.title().to_string(),
                rating: movie.rating(),
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        #[derive(Serialize)]
        struct Rendered<'a> {
            engine: EngineKind,
            elapsed_secs: f64,
            results: &'a [RankedMovie],
        }

        let ranked = self.ranked();
        Ok(serde_json::to_string(&Rendered {
            engine: self.engine,
            elapsed_secs: self.took.as_secs_f64(),
            results: &ranked,
        })?)
    }
}

/// Both engines' answers to the same query
#[derive(Debug, Clone)]
pub struct Comparison {
    pub hierarchical: SearchResults,
    pub inverted: SearchResults,
}

impl Comparison {
    /// Number of movies returned by both engines.
    pub fn overlap(&self) -> usize {
        let ids: HashSet<MovieId> = self.hierarchical.movies.iter().map(|m| m.id()).collect();
        self.inverted.movies.iter().filter(|m| ids.contains(&m.id())).count()
    }

    pub fn faster(&self) -> EngineKind {
        if self.inverted.took < self.hierarchical.took {
            EngineKind::Inverted
        } else {
            EngineKind::Hierarchical
        }
    }
}
