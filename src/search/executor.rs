use std::time::{Duration, Instant};
use tracing::debug;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::stats::SearchStats;
use crate::core::types::{EngineKind, Movie, MovieId, MovieRef};
use crate::index::SimilarityIndex;
use crate::index::hierarchical::HierarchicalIndex;
use crate::index::inverted::InvertedIndex;
use crate::query::cache::{QueryCache, QueryKey};
use crate::query::criteria::Criteria;
use crate::search::results::{Comparison, SearchResults};

/// Runs `f` and reports its wall-clock duration.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}

/// Holds both engines over the same catalog and routes queries to one of
/// them. Built once, then queried; `&MovieSearch` can be shared across
/// threads for concurrent reads.
pub struct MovieSearch {
    pub config: Config,
    hierarchical: HierarchicalIndex,
    inverted: InvertedIndex,
    cache: Option<QueryCache>,
    next_id: u64,
}

impl MovieSearch {
    pub fn new(config: Config) -> Self {
        MovieSearch {
            hierarchical: HierarchicalIndex::new(),
            inverted: InvertedIndex::with_config(&config),
            cache: QueryCache::new(config.query_cache_size),
            config,
            next_id: 0,
        }
    }

    pub fn with_movies(config: Config, movies: impl IntoIterator<Item = Movie>) -> Self {
        let mut search = MovieSearch::new(config);
        search.extend(movies);
        search
    }

    /// Inserts into both engines; they share the record. The record is
    /// renumbered with the next insertion sequence number, so ids coming
    /// from separate catalogs never collide.
    pub fn insert(&mut self, movie: Movie) -> MovieRef {
        let movie = movie.with_id(MovieId::new(self.next_id)).into_ref();
        self.next_id += 1;
        self.hierarchical.insert(movie.clone());
        self.inverted.insert(movie.clone());
        if let Some(cache) = &self.cache {
            cache.clear();
        }
        movie
    }

    pub fn extend(&mut self, movies: impl IntoIterator<Item = Movie>) {
        for movie in movies {
            self.insert(movie);
        }
    }

    pub fn engine(&self, kind: EngineKind) -> &dyn SimilarityIndex {
        match kind {
            EngineKind::Hierarchical => &self.hierarchical,
            EngineKind::Inverted => &self.inverted,
        }
    }

    pub fn hierarchical(&self) -> &HierarchicalIndex {
        &self.hierarchical
    }

    pub fn inverted(&self) -> &InvertedIndex {
        &self.inverted
    }

    pub fn len(&self) -> usize {
        self.hierarchical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hierarchical.is_empty()
    }

    pub fn search(&self, kind: EngineKind, criteria: &Criteria, max_results: usize) -> SearchResults {
        let (movies, took) = timed(|| self.find(kind, criteria, max_results));
        debug!(engine = %kind, hits = movies.len(), took_us = took.as_micros() as u64, "search");
        SearchResults { engine: kind, movies, took }
    }

    /// `search` with the configured default cap.
    pub fn search_default(&self, kind: EngineKind, criteria: &Criteria) -> SearchResults {
        self.search(kind, criteria, self.config.default_max_results)
    }

    /// Resolves an engine token (e.g. from a form field) before searching.
    /// Unknown tokens fail without touching either engine.
    pub fn search_named(&self, engine: &str, criteria: &Criteria, max_results: usize) -> Result<SearchResults> {
        let kind = engine.parse::<EngineKind>()?;
        Ok(self.search(kind, criteria, max_results))
    }

    /// Runs the same query on both engines.
    pub fn compare(&self, criteria: &Criteria, max_results: usize) -> Comparison {
        Comparison {
            hierarchical: self.search(EngineKind::Hierarchical, criteria, max_results),
            inverted: self.search(EngineKind::Inverted, criteria, max_results),
        }
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            hierarchical: self.hierarchical.stats(),
            inverted: self.inverted.stats(),
            cache: self.cache.as_ref().map(QueryCache::stats),
        }
    }

    fn find(&self, kind: EngineKind, criteria: &Criteria, max_results: usize) -> Vec<MovieRef> {
        let Some(cache) = &self.cache else {
            return self.engine(kind).find_similar(criteria, max_results);
        };

        let key = QueryKey {
            engine: kind,
            criteria: criteria.clone(),
            max_results,
        };
        if let Some(movies) = cache.get(&key) {
            return movies;
        }
        let movies = self.engine(kind).find_similar(criteria, max_results);
        cache.put(key, movies.clone());
        movies
    }
}
