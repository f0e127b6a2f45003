//! Custom classification vocabulary
//!
//! This example demonstrates swapping out the built-in US/English lexicon:
//! - How vocabulary changes what counts as a library name
//! - Registering misspelling corrections
//! - Loading a lexicon from a JSON document

use dewey::{Lexicon, LibrarySearcher, MemoryDatastore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // With the stock vocabulary, "athenaeum" is just residue: the words
    // stay separate and each one matches on its own
    let searcher = LibrarySearcher::new(MemoryDatastore::sample());
    let query = searcher.parse("boston athenaeum", None);
    println!("Stock lexicon:  {:?}", query.name_terms());

    // Teaching the lexicon the keyword makes the whole phrase one name
    let lexicon = Lexicon::builder()
        .library_keywords(["athenaeum"])
        .build();
    let searcher = LibrarySearcher::builder(MemoryDatastore::sample())
        .lexicon(lexicon)
        .build();
    let query = searcher.parse("boston athenaeum", None);
    println!("Custom lexicon: {:?}", query.name_terms());

    // Corrections rewrite known misspellings during normalization
    let lexicon = Lexicon::builder()
        .library_keywords(["athenaeum"])
        .correction("athenaum", "athenaeum")
        .build();
    let searcher = LibrarySearcher::builder(MemoryDatastore::sample())
        .lexicon(lexicon)
        .build();
    let query = searcher.parse("boston athenaum", None);
    println!("Corrected:      '{}'", query.normalized());

    // Vocabularies can also live in configuration files
    let document = r#"{
        "state_abbreviations": ["ma"],
        "state_names": ["massachusetts"],
        "library_keywords": ["athenaeum", "library"],
        "county_words": ["county"],
        "corrections": [["athenaum", "athenaeum"]]
    }"#;
    let lexicon = Lexicon::from_json_str(document)?;
    println!(
        "From JSON:      'ma' is a state abbreviation: {}",
        lexicon.is_state_abbreviation("ma")
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_env() {
        let _ = dewey::init_logging(tracing::Level::WARN);
    }

    #[test]
    fn test_custom_lexicon_example() {
        setup_test_env();
        assert!(
            main().is_ok(),
            "Custom lexicon example should run successfully"
        );
    }
}
