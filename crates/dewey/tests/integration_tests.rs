//! Integration tests for Dewey search query understanding
//!
//! These tests run against the full public API over the bundled in-memory
//! datastore and verify that normalization, classification, and every
//! search strategy hold together end to end.

use dewey::{
    FocusArea, Geotarget, GeotargetKind, LibraryEntry, LibraryRecord, LibrarySearcher, Location,
    MAX_SEARCH_STRING_LEN, MemoryDatastore, Place, SearchConfigBuilder, SearchHits, SearchType,
};

fn setup_test_env() {
    let _ = dewey::init_logging(tracing::Level::WARN);
}

fn sample_searcher() -> LibrarySearcher<MemoryDatastore> {
    LibrarySearcher::new(MemoryDatastore::sample())
}

fn hit_ids(hits: &SearchHits) -> Vec<u64> {
    hits.iter().map(|hit| hit.library.id).collect()
}

#[test]
fn test_full_workflow() {
    setup_test_env();

    let searcher = sample_searcher();

    // 1. Parse without executing
    let query = searcher.parse("Brooklyn Public Libary", None);
    assert_eq!(query.search_type(), SearchType::LibraryTarget);
    assert_eq!(
        query.cleaned(),
        "brooklyn public library",
        "Misspelling should be corrected during normalization"
    );

    // 2. Run the parsed query
    let hits = searcher.run(&query).expect("Run should work");
    assert_eq!(hit_ids(&hits), [2]);

    // 3. The one-call form gives the same answer
    let direct = searcher
        .search("Brooklyn Public Libary", None)
        .expect("Search should work");
    assert_eq!(hit_ids(&direct), hit_ids(&hits));

    // 4. Geographic search: serving library first, then ranked neighbors
    let hits = searcher.search("11212", None).expect("Search should work");
    assert_eq!(hit_ids(&hits), [1, 5, 2]);
    assert!(
        hits.iter().all(|hit| hit.distance_m.is_some()),
        "Ranked geographic hits should carry distances"
    );
}

#[test]
fn test_search_type_classification() {
    setup_test_env();

    let searcher = sample_searcher();

    let cases = vec![
        ("11212", SearchType::SingleGeotarget),
        ("new york", SearchType::SingleGeotarget),
        ("city of yonkers", SearchType::SingleGeotarget),
        ("brooklyn ny", SearchType::MultipleGeotargets),
        ("11212 11226", SearchType::MultipleGeotargets),
        ("dekalb county ga", SearchType::MultipleGeotargets),
        ("brooklyn public library", SearchType::LibraryTarget),
        ("11212 public library", SearchType::LibraryTarget),
        ("alpha bravo", SearchType::LibraryTarget),
        ("", SearchType::Indeterminate),
        ("?!.", SearchType::Indeterminate),
    ];

    for (raw, expected) in cases {
        let query = searcher.parse(raw, None);
        assert_eq!(
            query.search_type(),
            expected,
            "Classification for '{raw}' (tokens: {})",
            query.tokens()
        );
    }
}

#[test]
fn test_single_geotarget_ranking() {
    setup_test_env();

    let searcher = sample_searcher();

    // The library serving 11212 leads even though others sit closer to
    // downtown, then the nearest supra-local lender, then the next nearest
    let hits = searcher.search("11212", None).expect("Search should work");
    assert_eq!(hit_ids(&hits), [1, 5, 2]);

    // Nobody serves 11226 directly, so the list just shortens
    let hits = searcher.search("11226", None).expect("Search should work");
    assert_eq!(hit_ids(&hits), [5, 2]);

    // A patron location does not change a single-place answer
    let located = searcher
        .search("11212", Some((40.9312, -73.8987)))
        .expect("Search should work");
    assert_eq!(hit_ids(&located), [1, 5, 2]);
}

#[test]
fn test_state_targets_roll_call() {
    setup_test_env();

    let searcher = sample_searcher();

    // A state query answers with an alphabetical roll call of every member
    let by_abbreviation = searcher.search("ny", None).expect("Search should work");
    assert_eq!(hit_ids(&by_abbreviation), [2, 1, 3, 4, 6, 5, 8, 7]);
    assert!(
        by_abbreviation.iter().all(|hit| hit.distance_m.is_none()),
        "Roll-call hits carry no distances"
    );

    // The full state name answers identically
    let by_name = searcher
        .search("new york", None)
        .expect("Search should work");
    assert_eq!(hit_ids(&by_name), hit_ids(&by_abbreviation));
}

#[test]
fn test_multiple_places() {
    setup_test_env();

    let searcher = sample_searcher();

    // Without a location, naming two places unions their members
    let unioned = searcher
        .search("brooklyn ny", None)
        .expect("Search should work");
    assert_eq!(hit_ids(&unioned), [2, 1, 3, 4, 6, 5, 8, 7]);

    // With one, only the nearest place answers
    let nearest = searcher
        .search("brooklyn ny", Some((40.67, -73.95)))
        .expect("Search should work");
    assert_eq!(hit_ids(&nearest), [2, 1, 3, 4, 6]);

    // A patron in 11226 collapses two postcodes to the unserved one,
    // which still answers with its ranked neighbors
    let collapsed = searcher
        .search("11212 11226", Some((40.64, -73.955)))
        .expect("Search should work");
    assert_eq!(hit_ids(&collapsed), [5, 2]);
}

#[test]
fn test_name_matching() {
    setup_test_env();

    let searcher = sample_searcher();

    // Exact name
    let hits = searcher
        .search("queens public library", None)
        .expect("Search should work");
    assert_eq!(hit_ids(&hits), [8]);

    // Misspelling within edit distance (not in the correction table)
    let hits = searcher
        .search("brooklyn publik library", None)
        .expect("Search should work");
    assert_eq!(hit_ids(&hits), [2]);

    // Alias
    let hits = searcher.search("bpl", None).expect("Search should work");
    assert_eq!(hit_ids(&hits), [2]);

    // A single description word
    let hits = searcher
        .search("genealogy", None)
        .expect("Search should work");
    assert_eq!(hit_ids(&hits), [3]);

    // With a patron location, matches come back distance-ordered
    let hits = searcher
        .search("brooklyn public library", Some((40.67, -73.95)))
        .expect("Search should work");
    assert_eq!(hit_ids(&hits), [2]);
    let distance = hits[0].distance_m.expect("Located match carries distance");
    assert!(
        distance < 5_000.0,
        "Grand Army Plaza is nearby, got {distance} m"
    );
}

#[test]
fn test_configuration_presets() {
    setup_test_env();

    let presets = vec![
        ("default", SearchConfigBuilder::new().build()),
        ("focused", SearchConfigBuilder::focused().build()),
        ("expansive", SearchConfigBuilder::expansive().build()),
    ];

    for (name, config) in presets {
        let broad_limit = config.broad_result_limit;
        let searcher = LibrarySearcher::builder(MemoryDatastore::sample())
            .config(config)
            .build();

        let results = searcher
            .search("new york", None)
            .unwrap_or_else(|_| panic!("{name} preset should work"));

        println!("{} preset: found {} results", name, results.len());
        assert!(
            results.len() <= broad_limit,
            "Should respect limit for {name}"
        );
    }
}

#[test]
fn test_input_bounding() {
    setup_test_env();

    let searcher = sample_searcher();

    // The parser holds its line even against megabyte input
    let flood = "brooklyn ".repeat(100_000);
    let query = searcher.parse(&flood, None);
    assert!(query.raw().chars().count() <= MAX_SEARCH_STRING_LEN * 3);
    assert!(query.normalized().chars().count() <= MAX_SEARCH_STRING_LEN);
}

#[test]
fn test_error_handling() {
    setup_test_env();

    let searcher = sample_searcher();

    // Edge cases that should not panic or error
    let long_string = "library ".repeat(500);
    let edge_cases = vec![
        "",           // Empty string
        "   ",        // Whitespace only
        "?!.",        // Punctuation only
        "zzqqxx",     // Nonsense word
        &long_string, // Very long input
    ];

    for case in edge_cases {
        let result = searcher.search(case, None);
        assert!(
            result.is_ok(),
            "Search should not error for edge case: {case:?}"
        );

        let located = searcher.search(case, Some((40.67, -73.95)));
        assert!(
            located.is_ok(),
            "Located search should not error for edge case: {case:?}"
        );
    }

    // Out-of-range coordinates degrade to an unlocated search
    let hits = searcher
        .search("brooklyn public library", Some((200.0, 500.0)))
        .expect("Search should work");
    assert_eq!(hit_ids(&hits), [2]);
    assert!(
        hits[0].distance_m.is_none(),
        "Unusable location should yield no distances"
    );
}

#[test]
fn test_custom_datastore() {
    setup_test_env();

    // A small Vermont fixture: one town, one local library, one
    // nationwide digital lender
    let town_box = [
        (44.25, -72.60),
        (44.29, -72.60),
        (44.29, -72.54),
        (44.25, -72.54),
    ];
    let state_box = [
        (42.73, -73.44),
        (45.01, -73.44),
        (45.01, -71.46),
        (42.73, -71.46),
    ];

    let datastore = MemoryDatastore::new()
        .with_place(Place::new(GeotargetKind::City, "montpelier", town_box))
        .with_place(Place::new(GeotargetKind::Postcode, "05602", town_box))
        .with_place(Place::new(GeotargetKind::State, "vt", state_box))
        .with_library(LibraryEntry::new(
            LibraryRecord::new(1, "Kellogg-Hubbard Library"),
            Location::new(44.2626, -72.5754).expect("valid coordinates"),
            FocusArea::Place(Geotarget::new(GeotargetKind::Postcode, "05602")),
        ))
        .with_library(LibraryEntry::new(
            LibraryRecord::new(2, "Green Mountain Digital Library"),
            Location::new(44.0, -72.7).expect("valid coordinates"),
            FocusArea::Everywhere,
        ));

    let searcher = LibrarySearcher::new(datastore);

    // Single postcode: the serving library leads, the digital lender follows
    let hits = searcher.search("05602", None).expect("Search should work");
    assert_eq!(hit_ids(&hits), [1, 2]);

    // City plus state unions both members, alphabetically
    let hits = searcher
        .search("montpelier vt", None)
        .expect("Search should work");
    assert_eq!(hit_ids(&hits), [2, 1]);

    // Name matching shrugs off the missing hyphen
    let hits = searcher
        .search("kellogg hubbard library", None)
        .expect("Search should work");
    assert_eq!(hit_ids(&hits), [1]);
}
