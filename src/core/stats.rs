use serde::{Serialize, Deserialize};
use crate::core::types::EngineKind;

pub use crate::query::cache::CacheStats;

/// Size snapshot of one engine, for monitoring and benchmark reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub engine: EngineKind,
    pub records: usize,
    pub keys: usize,      // distinct paths (hierarchical) or attribute values (inverted)
    pub entries: usize,   // total record references held
}

/// Statistics for the façade holding both engines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchStats {
    pub hierarchical: IndexStats,
    pub inverted: IndexStats,
    pub cache: Option<CacheStats>,
}
