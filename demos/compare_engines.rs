/// Engine comparison demo
///
/// Loads a small catalog, then runs the same queries through the
/// hierarchical and the inverted engine and prints both rankings.

use cinedex::ingest::reader::CatalogReader;
use cinedex::{Config, Criteria, EngineKind, MovieSearch};

const CATALOG: &str = "\
title|genres|directors|cast|vote_average
Alien|[{'name': 'Science Fiction'}, {'name': 'Horror'}]|[{'name': 'Ridley Scott'}]|[{'name': 'Sigourney Weaver'}, {'name': 'Tom Skerritt'}]|8.4
Blade Runner|[{'name': 'Science Fiction'}]|[{'name': 'Ridley Scott'}]|[{'name': 'Harrison Ford'}]|8.1
Dune|[{'name': 'Science Fiction'}]|[{'name': 'Denis Villeneuve'}]|[{'name': 'Timothée Chalamet'}]|8.0
Arrival|[{'name': 'Science Fiction'}, {'name': 'Drama'}]|[{'name': 'Denis Villeneuve'}]|[{'name': 'Amy Adams'}]|7.9
Witness|[{'name': 'Thriller'}]|[{'name': 'Peter Weir'}]|[{'name': 'Harrison Ford'}]|7.4
Gladiator|[{'name': 'Action'}]|[{'name': 'Ridley Scott'}]|[{'name': 'Russell Crowe'}]|8.5
Dune|[{'name': 'Science Fiction'}]|[{'name': 'David Lynch'}]|[{'name': 'Kyle MacLachlan'}]|6.3
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = Config::default();
    let catalog = CatalogReader::new(config.ingest.clone()).read_str(CATALOG)?;
    let search = MovieSearch::with_movies(config, catalog.movies);
    println!("Loaded {} movies ({} rows skipped)\n", search.len(), catalog.skipped);

    let queries = [
        Criteria::from_form("Science Fiction", "", ""),
        Criteria::from_form("Science Fiction", "Ridley Scott", "Harrison Ford"),
        Criteria::from_form("", "", "Harrison Ford"),
        Criteria::from_form("", "", ""),
    ];

    for criteria in &queries {
        println!("Query: {:?}", criteria);
        let comparison = search.compare(criteria, 5);
        for results in [&comparison.hierarchical, &comparison.inverted] {
            println!("  {} ({:.6}s)", results.engine, results.took.as_secs_f64());
            for line in results.ranked() {
                println!("    {}. {} ({})", line.rank, line.title, line.rating);
            }
        }
        println!("  overlap: {}, faster: {}\n", comparison.overlap(), comparison.faster());
    }

    // the form layer rejects unknown engines before querying
    match search.search_named("btree", &queries[0], 5) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("Rejected: {}", e),
    }
    println!("{}", search.search(EngineKind::Inverted, &queries[0], 3).to_json()?);

    Ok(())
}
