use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use crate::core::error::{Error, ErrorKind};

/// Placeholder for a missing genre, director or lead actor.
pub const UNKNOWN: &str = "Unknown";
/// Placeholder for a missing title.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

/// Insertion sequence number; the identity of a movie inside both engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MovieId(pub u64);

impl MovieId {
    pub fn new(id: u64) -> Self {
        MovieId(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// The attribute kinds a movie is indexed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attribute {
    Genre,
    Director,
    LeadActor,
}

impl Attribute {
    pub const ALL: [Attribute; 3] = [Attribute::Genre, Attribute::Director, Attribute::LeadActor];
}

/// An immutable movie record.
///
/// The constructor enforces the record invariants, so every `Movie` in the
/// system has a rating in `[0.0, 10.0]`, a non-empty title and non-empty
/// genre, director and lead actor lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    id: MovieId,
    title: String,
    genres: Vec<String>,
    directors: Vec<String>,
    lead_actors: Vec<String>,
    rating: f64,
}

/// Records are shared read-only between the engines.
pub type MovieRef = Arc<Movie>;

impl Movie {
    pub fn new<T, G, D, A>(id: MovieId, title: T, genres: G, directors: D, lead_actors: A, rating: f64) -> Self
    where
        T: Into<String>,
        G: IntoIterator,
        G::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        let title = title.into().trim().to_string();
        Movie {
            id,
            title: if title.is_empty() { UNKNOWN_TITLE.to_string() } else { title },
            genres: or_unknown(genres),
            directors: or_unknown(directors),
            lead_actors: or_unknown(lead_actors),
            rating: clamp_rating(rating),
        }
    }

    pub fn id(&self) -> MovieId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn directors(&self) -> &[String] {
        &self.directors
    }

    pub fn lead_actors(&self) -> &[String] {
        &self.lead_actors
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn values(&self, attribute: Attribute) -> &[String] {
        match attribute {
            Attribute::Genre => &self.genres,
            Attribute::Director => &self.directors,
            Attribute::LeadActor => &self.lead_actors,
        }
    }

    pub fn primary_genre(&self) -> &str {
        &self.genres[0]
    }

    pub fn primary_director(&self) -> &str {
        &self.directors[0]
    }

    pub fn primary_lead_actor(&self) -> &str {
        &self.lead_actors[0]
    }

    /// The same record under another identity.
    pub fn with_id(self, id: MovieId) -> Self {
        Movie { id, ..self }
    }

    pub fn into_ref(self) -> MovieRef {
        Arc::new(self)
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.rating)
    }
}

/// Out-of-range and non-finite ratings collapse to 0.0, as does -0.0.
pub fn clamp_rating(rating: f64) -> f64 {
    if rating.is_finite() && (MIN_RATING..=MAX_RATING).contains(&rating) {
        rating + 0.0
    } else {
        MIN_RATING
    }
}

fn or_unknown<I>(values: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut out: Vec<String> = values
        .into_iter()
        .map(|v| v.into().trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();
    if out.is_empty() {
        out.push(UNKNOWN.to_string());
    }
    out
}

/// Which of the two engines a query goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineKind {
    Hierarchical,
    Inverted,
}

impl EngineKind {
    pub const ALL: [EngineKind; 2] = [EngineKind::Hierarchical, EngineKind::Inverted];

    pub fn name(&self) -> &'static str {
        match self {
            EngineKind::Hierarchical => "hierarchical",
            EngineKind::Inverted => "inverted",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EngineKind {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_lowercase().as_str() {
            "hierarchical" | "tree" | "tree structure" => Ok(EngineKind::Hierarchical),
            "inverted" | "dict" | "dictionary of lists" => Ok(EngineKind::Inverted),
            other => Err(Error::new(
                ErrorKind::InvalidEngineSelector,
                format!("unknown engine '{}'", other),
            )),
        }
    }
}
