use serde::Deserialize;
use crate::core::config::IngestConfig;
use crate::core::types::{Movie, MovieId, clamp_rating};

/// The raw catalog columns a movie is decoded from. Blank cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMovieRow {
    pub title: Option<String>,
    pub genres: Option<String>,
    pub directors: Option<String>,
    pub cast: Option<String>,
    pub vote_average: Option<String>,
}

/// Decoded field values of a row, waiting for an id.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieFields {
    pub title: String,
    pub genres: Vec<String>,
    pub directors: Vec<String>,
    pub lead_actors: Vec<String>,
    pub rating: f64,
}

impl MovieFields {
    pub fn into_movie(self, id: MovieId) -> Movie {
        Movie::new(id, self.title, self.genres, self.directors, self.lead_actors, self.rating)
    }
}

/// Row → movie decoding with the catalog's coercion rules: unparseable
/// lists become empty (and so `"Unknown"`), bad ratings become 0.0.
pub struct MovieDecoder {
    pub config: IngestConfig,
}

impl MovieDecoder {
    pub fn new(config: IngestConfig) -> Self {
        MovieDecoder { config }
    }

    pub fn decode(&self, id: MovieId, row: &RawMovieRow) -> Movie {
        self.decode_fields(row).into_movie(id)
    }

    pub fn decode_fields(&self, row: &RawMovieRow) -> MovieFields {
        let mut directors = parse_names(row.directors.as_deref());
        directors.truncate(self.config.max_directors);
        let mut lead_actors = parse_names(row.cast.as_deref());
        lead_actors.truncate(self.config.max_lead_actors);

        MovieFields {
            title: row.title.clone().unwrap_or_default(),
            genres: parse_names(row.genres.as_deref()),
            directors,
            lead_actors,
            rating: parse_rating(row.vote_average.as_deref()),
        }
    }
}

impl Default for MovieDecoder {
    fn default() -> Self {
        MovieDecoder::new(IngestConfig::default())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListEntry {
    Named { name: Option<String> },
    Plain(String),
    Other(serde_json::Value),
}

/// Names from a list cell such as `[{"id": 18, "name": "Drama"}]`.
/// Python-literal cells (`[{'name': 'Drama'}]`) are read as well.
pub fn parse_names(cell: Option<&str>) -> Vec<String> {
    let Some(cell) = cell.map(str::trim).filter(|c| !c.is_empty()) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<ListEntry>>(cell) {
        Ok(entries) => entries
            .into_iter()
            .filter_map(|entry| match entry {
                ListEntry::Named { name } => name,
                ListEntry::Plain(name) => Some(name),
                ListEntry::Other(_) => None,
            })
            .collect(),
        Err(_) => scan_literal_names(cell),
    }
}

/// Values of every quoted `name` key, honouring either quote style.
fn scan_literal_names(cell: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = cell;
    while let Some(pos) = rest.find("name") {
        let before = rest[..pos].chars().next_back();
        let after = &rest[pos + 4..];
        rest = after;

        let Some(quote) = before.filter(|q| *q == '\'' || *q == '"') else { continue };
        let Some(after_key) = after.strip_prefix(quote) else { continue };
        let Some(value) = after_key.trim_start().strip_prefix(':') else { continue };
        let value = value.trim_start();
        let Some(open) = value.chars().next().filter(|q| *q == '\'' || *q == '"') else { continue };

        let (name, consumed) = read_quoted(&value[open.len_utf8()..], open);
        names.push(name);
        rest = &value[open.len_utf8() + consumed..];
    }
    names
}

/// Reads up to the closing `quote`, unescaping backslashes. Returns the text
/// and the number of bytes consumed including the closing quote.
fn read_quoted(input: &str, quote: char) -> (String, usize) {
    let mut out = String::new();
    let mut escaped = false;
    for (i, c) in input.char_indices() {
        if escaped {
            out.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return (out, i + c.len_utf8());
        } else {
            out.push(c);
        }
    }
    (out, input.len())
}

pub fn parse_rating(cell: Option<&str>) -> f64 {
    cell.and_then(|c| c.trim().parse::<f64>().ok())
        .map(clamp_rating)
        .unwrap_or(0.0)
}
