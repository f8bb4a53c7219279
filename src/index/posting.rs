use crate::core::types::MovieRef;

/// Movies indexed under one attribute value
/// Note: Sorted by movie id, which is insertion order for ingested catalogs
#[derive(Debug, Clone, Default)]
pub struct PostingList {
    pub movies: Vec<MovieRef>,
}

impl PostingList {
    pub fn new() -> Self {
        PostingList { movies: Vec::new() }
    }

    /// Adds a movie unless one with the same id is already present.
    /// Returns whether the list changed.
    pub fn add(&mut self, movie: MovieRef) -> bool {
        // Appending is the common case: ids arrive in increasing order
        if self.movies.last().is_none_or(|last| last.id() < movie.id()) {
            self.movies.push(movie);
            return true;
        }
        match self.movies.binary_search_by_key(&movie.id(), |m| m.id()) {
            Ok(_) => false,
            Err(pos) => {
                self.movies.insert(pos, movie);
                true
            }
        }
    }

    pub fn as_slice(&self) -> &[MovieRef] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Intersect two posting lists (linear merge on ids)
    pub fn intersect(&self, other: &PostingList) -> Vec<MovieRef> {
        intersect_sorted(&self.movies, &other.movies)
    }
}

pub(crate) fn intersect_sorted(left: &[MovieRef], right: &[MovieRef]) -> Vec<MovieRef> {
    let mut result = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < left.len() && j < right.len() {
        let id1 = left[i].id();
        let id2 = right[j].id();

        if id1 == id2 {
            result.push(left[i].clone());
            i += 1;
            j += 1;
        } else if id1 < id2 {
            i += 1;
        } else {
            j += 1;
        }
    }

    result
}
