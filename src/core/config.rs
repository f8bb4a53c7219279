use serde::{Serialize, Deserialize};
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::Attribute;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_max_results: usize,
    pub weights: Weights,
    pub tie_break: TieBreak,
    pub query_cache_size: usize,                // 0 disables the façade result cache
    pub ingest: IngestConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_max_results: 10,
            weights: Weights::default(),
            tie_break: TieBreak::default(),
            query_cache_size: 0,
            ingest: IngestConfig::default(),
        }
    }
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_max_results == 0 {
            return Err(Error::new(ErrorKind::InvalidArgument, "default_max_results must be positive"));
        }
        if self.ingest.max_directors == 0 || self.ingest.max_lead_actors == 0 {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                "ingest limits for directors and lead actors must be positive",
            ));
        }
        Ok(())
    }
}

/// Per-criterion score contributions of the inverted engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub genre: u32,
    pub director: u32,
    pub lead_actor: u32,
}

impl Default for Weights {
    fn default() -> Self {
        Weights { genre: 3, director: 2, lead_actor: 1 }
    }
}

impl Weights {
    pub fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Genre => self.genre,
            Attribute::Director => self.director,
            Attribute::LeadActor => self.lead_actor,
        }
    }
}

/// Ordering between inverted-engine hits with equal score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Higher rating first, then earlier insertion.
    #[default]
    Rating,
    /// Earlier insertion first.
    InsertionOrder,
    /// Order in which the record first received a score.
    FirstSeen,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub delimiter: char,
    pub max_directors: usize,
    pub max_lead_actors: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        IngestConfig {
            delimiter: '|',
            max_directors: 2,
            max_lead_actors: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_weights() {
        let config = Config::default();
        assert_eq!(config.default_max_results, 10);
        assert_eq!(config.weights.get(Attribute::Genre), 3);
        assert_eq!(config.weights.get(Attribute::Director), 2);
        assert_eq!(config.weights.get(Attribute::LeadActor), 1);
        assert_eq!(config.tie_break, TieBreak::Rating);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = Config::from_json_str(r#"{"tie_break": "first_seen", "weights": {"genre": 5}}"#).unwrap();
        assert_eq!(config.tie_break, TieBreak::FirstSeen);
        assert_eq!(config.weights.genre, 5);
        assert_eq!(config.weights.director, 2);
        assert_eq!(config.ingest.delimiter, '|');
    }

    #[test]
    fn zero_limits_are_rejected() {
        let err = Config::from_json_str(r#"{"default_max_results": 0}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = Config::from_json_str(r#"{"ingest": {"max_directors": 0}}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
