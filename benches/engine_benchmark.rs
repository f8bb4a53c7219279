use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cinedex::{Config, Criteria, EngineKind, HierarchicalIndex, InvertedIndex, Movie, MovieId, MovieSearch, SimilarityIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const GENRES: [&str; 8] = ["Drama", "Comedy", "Action", "Thriller", "Horror", "Romance", "Science Fiction", "Documentary"];

/// Helper to create a reproducible random catalog
fn create_catalog(size: usize) -> Vec<Movie> {
    let mut rng = StdRng::seed_from_u64(42);
    let director_pool = (size / 8).max(1);
    let actor_pool = (size / 3).max(1);

    (0..size)
        .map(|i| {
            let genres: Vec<&str> = (0..rng.gen_range(1..=3))
                .map(|_| GENRES[rng.gen_range(0..GENRES.len())])
                .collect();
            let directors: Vec<String> = (0..rng.gen_range(1..=2))
                .map(|_| format!("director_{}", rng.gen_range(0..director_pool)))
                .collect();
            let cast: Vec<String> = (0..rng.gen_range(1..=4))
                .map(|_| format!("actor_{}", rng.gen_range(0..actor_pool)))
                .collect();
            Movie::new(MovieId(i as u64), format!("Movie {}", i), genres, directors, cast, rng.gen_range(0.0..10.0))
        })
        .collect()
}

fn query_shapes(sample: &Movie) -> Vec<(&'static str, Criteria)> {
    vec![
        ("empty", Criteria::new()),
        ("genre", Criteria::new().genre(sample.primary_genre())),
        ("genre_director", Criteria::new().genre(sample.primary_genre()).director(sample.primary_director())),
        (
            "full_path",
            Criteria::new()
                .genre(sample.primary_genre())
                .director(sample.primary_director())
                .lead_actor(sample.primary_lead_actor()),
        ),
        ("missing_path", Criteria::new().genre("Western").director("nobody").lead_actor("nobody")),
    ]
}

/// Benchmark building each engine from the same catalog
fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for size in [1_000, 10_000].iter() {
        let refs: Vec<_> = create_catalog(*size).into_iter().map(Movie::into_ref).collect();

        group.bench_with_input(BenchmarkId::new("hierarchical", size), &refs, |b, refs| {
            b.iter(|| {
                let mut index = HierarchicalIndex::new();
                for movie in refs {
                    index.insert(movie.clone());
                }
                black_box(index.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("inverted", size), &refs, |b, refs| {
            b.iter(|| {
                let mut index = InvertedIndex::new();
                for movie in refs {
                    index.insert(movie.clone());
                }
                black_box(index.len())
            });
        });
    }
    group.finish();
}

/// Benchmark find_similar on both engines for identical queries
fn bench_find_similar(c: &mut Criterion) {
    for size in [1_000, 10_000, 50_000] {
        let catalog = create_catalog(size);
        let sample = catalog[size / 2].clone();
        let search = MovieSearch::with_movies(Config::default(), catalog);

        let mut group = c.benchmark_group(format!("find_similar/{}", size));
        for (shape, criteria) in query_shapes(&sample) {
            for kind in EngineKind::ALL {
                group.bench_with_input(BenchmarkId::new(kind.name(), shape), &criteria, |b, criteria| {
                    b.iter(|| black_box(search.engine(kind).find_similar(black_box(criteria), 10)));
                });
            }
        }
        group.finish();
    }
}

/// Benchmark the effect of the result cap
fn bench_max_results(c: &mut Criterion) {
    let catalog = create_catalog(10_000);
    let sample = catalog[0].clone();
    let search = MovieSearch::with_movies(Config::default(), catalog);
    let criteria = Criteria::new().genre(sample.primary_genre()).director(sample.primary_director());

    let mut group = c.benchmark_group("max_results");
    for max_results in [1, 10, 100, 1_000].iter() {
        for kind in EngineKind::ALL {
            group.bench_with_input(BenchmarkId::new(kind.name(), max_results), max_results, |b, &max_results| {
                b.iter(|| black_box(search.search(kind, &criteria, max_results)));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_find_similar, bench_max_results);
criterion_main!(benches);
