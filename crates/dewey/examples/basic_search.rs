//! Basic library search functionality
//!
//! This example walks through the everyday search calls:
//! - Creating a searcher over the bundled in-memory datastore
//! - Geographic searches (postcode, city, state)
//! - Library-name searches, including misspelled input

use dewey::{LibrarySearcher, MemoryDatastore, SearchHits};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The sample datastore covers a handful of Brooklyn-area libraries
    let searcher = LibrarySearcher::new(MemoryDatastore::sample());

    // A bare postcode ranks the libraries serving and surrounding it
    println!("Searching for '11212':");
    let hits = searcher.search("11212", None)?;
    print_hits(&hits, 3);

    // A state query falls back to an alphabetical roll call of members
    println!("\nSearching for 'new york':");
    let hits = searcher.search("new york", None)?;
    print_hits(&hits, 5);

    // Naming more than one place unions their member libraries
    println!("\nSearching for 'brooklyn ny':");
    let hits = searcher.search("brooklyn ny", None)?;
    print_hits(&hits, 5);

    // Library names match even when misspelled
    println!("\nSearching for 'Brooklyn Public Libary' (sic):");
    let hits = searcher.search("Brooklyn Public Libary", None)?;
    print_hits(&hits, 3);

    Ok(())
}

fn print_hits(hits: &SearchHits, limit: usize) {
    if hits.is_empty() {
        println!("  (no results)");
        return;
    }

    for (i, hit) in hits.iter().take(limit).enumerate() {
        match hit.distance_m {
            Some(distance) => println!(
                "  {}. {} - {:.1} km away",
                i + 1,
                hit.library,
                distance / 1000.0
            ),
            None => println!("  {}. {}", i + 1, hit.library),
        }
    }

    if hits.len() > limit {
        println!("  ... and {} more results", hits.len() - limit);
    }
}
