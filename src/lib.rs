pub mod core;
pub mod query;
pub mod index;
pub mod scoring;
pub mod search;
pub mod ingest;

pub use crate::core::config::Config;
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::types::{Attribute, EngineKind, Movie, MovieId, MovieRef};
pub use crate::index::SimilarityIndex;
pub use crate::index::hierarchical::HierarchicalIndex;
pub use crate::index::inverted::InvertedIndex;
pub use crate::query::criteria::Criteria;
pub use crate::search::executor::MovieSearch;
pub use crate::search::results::SearchResults;

/*
┌──────────────────────────────────────────────────────────────────────────────┐
│                             CINEDEX ARCHITECTURE                             │
└──────────────────────────────────────────────────────────────────────────────┘

  ingest::reader::CatalogReader          pipe-delimited catalog, header row
        │  rayon: split + decode rows (ingest::row::MovieDecoder)
        ▼
  Vec<Movie>  ── ids assigned in file order
        │
        ▼
  search::executor::MovieSearch          owns both engines, routes queries
        │  insert(Movie) → Arc<Movie> shared by both engines
        ├───────────────────────────────┬───────────────────────────────────┐
        ▼                               ▼                                   │
  index::hierarchical::HierarchicalIndex  index::inverted::InvertedIndex     │
  ┌────────────────────────────────┐    ┌──────────────────────────────────┐ │
  │ arena of nodes                 │    │ Attribute → value → PostingList  │ │
  │ genre → director → lead actor  │    │ PostingList: Vec<MovieRef>, ids  │ │
  │ leaf: Vec<MovieRef> rating ↓   │    │ ascending, no duplicates         │ │
  │                                │    │                                  │ │
  │ find_similar: exact path →     │    │ find_similar: Scorer weights     │ │
  │ genre+director → genre → all,  │    │ (3/2/1) summed per movie,        │ │
  │ dedup by MovieId, cap          │    │ TopKCollector + TieBreak         │ │
  └────────────────────────────────┘    └──────────────────────────────────┘ │
                                                                             │
  query::cache::QueryCache (optional LRU) ◄──────────────────────────────────┘
  search::results::SearchResults { engine, movies, took } → RankedMovie / JSON
*/
