use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;
use crate::core::stats::IndexStats;
use crate::core::types::{EngineKind, Movie, MovieRef};
use crate::index::SimilarityIndex;
use crate::query::criteria::Criteria;

type NodeId = usize;

const ROOT: NodeId = 0;
/// genre → director → lead actor
const DEPTH: usize = 3;

enum Node {
    Branch {
        children: HashMap<String, NodeId>,
        order: Vec<NodeId>,  // first-insertion order of the child keys
    },
    Leaf(Vec<MovieRef>),     // rating descending, stable for equal ratings
}

impl Node {
    fn branch() -> Self {
        Node::Branch {
            children: HashMap::new(),
            order: Vec::new(),
        }
    }
}

/// Genre → director → lead actor tree over the primary attributes of each
/// movie, stored as an arena of nodes.
///
/// Subtree traversal visits children in the order their keys were first
/// inserted, so every query result is reproducible for a given insert
/// sequence.
pub struct HierarchicalIndex {
    nodes: Vec<Node>,
    records: usize,
    leaves: usize,
}

impl Default for HierarchicalIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchicalIndex {
    pub fn new() -> Self {
        HierarchicalIndex {
            nodes: vec![Node::branch()],
            records: 0,
            leaves: 0,
        }
    }

    /// Records stored under the exact primary path, best rated first.
    pub fn leaf(&self, genre: &str, director: &str, lead_actor: &str) -> &[MovieRef] {
        match self.path(&[genre, director, lead_actor]).map(|id| &self.nodes[id]) {
            Some(Node::Leaf(movies)) => movies,
            _ => &[],
        }
    }

    /// Every record under the given path prefix, in traversal order.
    /// An empty prefix yields the whole index; a missing key yields nothing.
    pub fn collect(&self, prefix: &[&str]) -> Vec<MovieRef> {
        let mut movies = Vec::new();
        if let Some(node) = self.path(prefix) {
            self.visit(node, |movie| {
                movies.push(movie.clone());
                true
            });
        }
        movies
    }

    /// Records whose primary path matches every supplied criterion, with
    /// unset criteria acting as wildcards. No relaxation is applied.
    pub fn find_exact(&self, criteria: &Criteria, max_results: usize) -> Vec<MovieRef> {
        let mut movies = Vec::new();
        if max_results == 0 {
            return movies;
        }
        let keys: [Option<&str>; DEPTH] = [
            criteria.genre.as_deref(),
            criteria.director.as_deref(),
            criteria.lead_actor.as_deref(),
        ];

        let mut stack = vec![(ROOT, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match &self.nodes[id] {
                Node::Leaf(leaf) => {
                    for movie in leaf {
                        movies.push(movie.clone());
                        if movies.len() == max_results {
                            return movies;
                        }
                    }
                }
                Node::Branch { children, order } => match keys[depth] {
                    Some(key) => {
                        if let Some(&child) = children.get(key) {
                            stack.push((child, depth + 1));
                        }
                    }
                    None => stack.extend(order.iter().rev().map(|&child| (child, depth + 1))),
                },
            }
        }
        movies
    }

    fn path(&self, keys: &[&str]) -> Option<NodeId> {
        keys.iter().try_fold(ROOT, |node, key| self.child(node, key))
    }

    fn child(&self, parent: NodeId, key: &str) -> Option<NodeId> {
        match &self.nodes[parent] {
            Node::Branch { children, .. } => children.get(key).copied(),
            Node::Leaf(_) => None,
        }
    }

    fn child_or_insert(&mut self, parent: NodeId, key: &str, leaf: bool) -> NodeId {
        if let Some(id) = self.child(parent, key) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(if leaf { Node::Leaf(Vec::new()) } else { Node::branch() });
        if leaf {
            self.leaves += 1;
        }
        if let Node::Branch { children, order } = &mut self.nodes[parent] {
            children.insert(key.to_string(), id);
            order.push(id);
        }
        id
    }

    /// Pre-order walk of a subtree with an explicit stack. `f` returns
    /// `false` to stop the walk.
    fn visit(&self, start: NodeId, mut f: impl FnMut(&MovieRef) -> bool) {
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            match &self.nodes[id] {
                Node::Leaf(movies) => {
                    for movie in movies {
                        if !f(movie) {
                            return;
                        }
                    }
                }
                Node::Branch { order, .. } => stack.extend(order.iter().rev().copied()),
            }
        }
    }
}

/// Accumulates relaxation stages. Later stages run while the raw count of
/// collected records, repeats included, is below the cap; the output keeps
/// the first occurrence of each inserted record.
struct StageCollector {
    seen: HashSet<*const Movie>,
    movies: Vec<MovieRef>,
    raw: usize,
    max_results: usize,
}

impl StageCollector {
    fn new(max_results: usize) -> Self {
        StageCollector {
            seen: HashSet::new(),
            movies: Vec::new(),
            raw: 0,
            max_results,
        }
    }

    /// Returns `false` once the output is full; nothing later can change it.
    fn push(&mut self, movie: &MovieRef) -> bool {
        self.raw += 1;
        if self.seen.insert(Arc::as_ptr(movie)) {
            self.movies.push(movie.clone());
        }
        self.movies.len() < self.max_results
    }

    fn wants_more(&self) -> bool {
        self.raw < self.max_results
    }
}

impl SimilarityIndex for HierarchicalIndex {
    fn kind(&self) -> EngineKind {
        EngineKind::Hierarchical
    }

    fn insert(&mut self, movie: MovieRef) {
        let genre = self.child_or_insert(ROOT, movie.primary_genre(), false);
        let director = self.child_or_insert(genre, movie.primary_director(), false);
        let lead_actor = self.child_or_insert(director, movie.primary_lead_actor(), true);

        if let Node::Leaf(movies) = &mut self.nodes[lead_actor] {
            let pos = movies.partition_point(|m| m.rating() >= movie.rating());
            movies.insert(pos, movie);
            self.records += 1;
        }
    }

    /// Relaxes the query from the full path to genre+director, then genre
    /// alone, then the whole index. A stage runs only while fewer than
    /// `max_results` records have been collected so far, counting repeats.
    /// Stages whose criteria are not all supplied are skipped.
    fn find_similar(&self, criteria: &Criteria, max_results: usize) -> Vec<MovieRef> {
        if max_results == 0 {
            return Vec::new();
        }
        let genre = criteria.genre.as_deref();
        let director = criteria.director.as_deref();
        let lead_actor = criteria.lead_actor.as_deref();

        let stages: [Option<Vec<&str>>; 4] = [
            match (genre, director, lead_actor) {
                (Some(g), Some(d), Some(a)) => Some(vec![g, d, a]),
                _ => None,
            },
            match (genre, director) {
                (Some(g), Some(d)) => Some(vec![g, d]),
                _ => None,
            },
            genre.map(|g| vec![g]),
            Some(Vec::new()),
        ];

        let mut hits = StageCollector::new(max_results);
        let mut per_stage = [0usize; 4];
        for (stage, prefix) in stages.iter().enumerate() {
            if !hits.wants_more() {
                break;
            }
            let Some(prefix) = prefix else { continue };
            // a missing key only empties this stage
            if let Some(node) = self.path(prefix) {
                let before = hits.movies.len();
                self.visit(node, |movie| hits.push(movie));
                per_stage[stage] = hits.movies.len() - before;
            }
        }

        debug!(
            engine = "hierarchical",
            exact = per_stage[0],
            genre_director = per_stage[1],
            genre = per_stage[2],
            global = per_stage[3],
            hits = hits.movies.len(),
            "find_similar"
        );
        hits.movies
    }

    fn len(&self) -> usize {
        self.records
    }

    fn stats(&self) -> IndexStats {
        IndexStats {
            engine: EngineKind::Hierarchical,
            records: self.records,
            keys: self.leaves,
            entries: self.records,
        }
    }
}
