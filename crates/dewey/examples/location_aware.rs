//! Location-aware searching
//!
//! This example demonstrates how a patron location changes the plan:
//! - Several named places collapse to the nearest one
//! - Name matches are ordered by distance from the patron
//! - A single named place ignores the location entirely

use dewey::{LibrarySearcher, MemoryDatastore, SearchHits};

// Somewhere in central Brooklyn
const PATRON: (f64, f64) = (40.67, -73.95);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let searcher = LibrarySearcher::new(MemoryDatastore::sample());

    // Without a location, naming two places unions their members
    println!("Searching for 'brooklyn ny' with no location:");
    let hits = searcher.search("brooklyn ny", None)?;
    print_hits(&hits, 4);

    // With one, the nearest of the named places wins outright
    println!("\nSearching for 'brooklyn ny' from central Brooklyn:");
    let hits = searcher.search("brooklyn ny", Some(PATRON))?;
    print_hits(&hits, 4);

    // Name searches gain distances and distance ordering
    println!("\nSearching for 'brooklyn public library' from central Brooklyn:");
    let hits = searcher.search("brooklyn public library", Some(PATRON))?;
    print_hits(&hits, 4);

    // A single place is authoritative; the patron location is ignored
    println!("\nSearching for '11212' from central Brooklyn:");
    let query = searcher.parse("11212", Some(PATRON));
    println!("  query classified as {}", query.search_type());
    let hits = searcher.run(&query)?;
    print_hits(&hits, 4);

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
