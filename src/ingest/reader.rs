use rayon::prelude::*;
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use crate::core::config::IngestConfig;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{Movie, MovieId};
use crate::ingest::row::{MovieDecoder, MovieFields, RawMovieRow};

pub const TITLE_COLUMN: &str = "title";
pub const GENRES_COLUMN: &str = "genres";
pub const DIRECTORS_COLUMN: &str = "directors";
pub const CAST_COLUMN: &str = "cast";
pub const RATING_COLUMN: &str = "vote_average";

/// Decoded movies, ids assigned in file order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub movies: Vec<Movie>,
    pub skipped: usize,
}

/// Column positions of the fields we read; other columns are ignored.
#[derive(Debug, Clone, Copy)]
struct Layout {
    width: usize,
    title: usize,
    genres: usize,
    directors: usize,
    cast: usize,
    rating: usize,
}

impl Layout {
    fn from_header(header: &str, delimiter: char) -> Result<Self> {
        let columns: Vec<&str> = header.split(delimiter).map(str::trim).collect();
        let find = |name: &str| {
            columns
                .iter()
                .position(|c| *c == name)
                .ok_or_else(|| Error::new(ErrorKind::Parse, format!("missing column '{}' in header", name)))
        };
        Ok(Layout {
            width: columns.len(),
            title: find(TITLE_COLUMN)?,
            genres: find(GENRES_COLUMN)?,
            directors: find(DIRECTORS_COLUMN)?,
            cast: find(CAST_COLUMN)?,
            rating: find(RATING_COLUMN)?,
        })
    }

    fn row(&self, line: &str, delimiter: char) -> Result<RawMovieRow> {
        let fields: Vec<&str> = line.split(delimiter).collect();
        if fields.len() != self.width {
            return Err(Error::new(
                ErrorKind::MalformedRecord,
                format!("expected {} fields, found {}", self.width, fields.len()),
            ));
        }
        let cell = |i: usize| Some(fields[i].trim()).filter(|f| !f.is_empty()).map(str::to_string);
        Ok(RawMovieRow {
            title: cell(self.title),
            genres: cell(self.genres),
            directors: cell(self.directors),
            cast: cell(self.cast),
            vote_average: cell(self.rating),
        })
    }
}

/// Reads a delimited movie catalog with a header row.
///
/// Rows are split and decoded in parallel; rows with the wrong number of
/// fields are skipped and counted.
pub struct CatalogReader {
    pub config: IngestConfig,
    decoder: MovieDecoder,
}

impl CatalogReader {
    pub fn new(config: IngestConfig) -> Self {
        CatalogReader {
            decoder: MovieDecoder::new(config.clone()),
            config,
        }
    }

    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<Catalog> {
        let text = fs::read_to_string(path.as_ref())?;
        self.read_str(&text)
    }

    pub fn read_str(&self, text: &str) -> Result<Catalog> {
        let delimiter = self.config.delimiter;
        let mut lines = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        let Some((_, header)) = lines.next() else {
            return Err(Error::new(ErrorKind::Parse, "catalog has no header row"));
        };
        let layout = Layout::from_header(header, delimiter)?;
        let rows: Vec<(usize, &str)> = lines.collect();

        let decoded: Vec<(usize, Result<MovieFields>)> = rows
            .par_iter()
            .map(|(index, line)| {
                let fields = layout
                    .row(line, delimiter)
                    .map(|row| self.decoder.decode_fields(&row));
                (*index, fields)
            })
            .collect();

        let mut catalog = Catalog::default();
        for (index, fields) in decoded {
            match fields {
                Ok(fields) => {
                    let id = MovieId(catalog.movies.len() as u64);
                    catalog.movies.push(fields.into_movie(id));
                }
                Err(err) => {
                    warn!(line = index + 1, error = %err, "skipping catalog row");
                    catalog.skipped += 1;
                }
            }
        }

        info!(loaded = catalog.movies.len(), skipped = catalog.skipped, "catalog loaded");
        Ok(catalog)
    }
}

impl Default for CatalogReader {
    fn default() -> Self {
        CatalogReader::new(IngestConfig::default())
    }
}
