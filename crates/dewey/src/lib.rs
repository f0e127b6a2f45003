//! Dewey - Library Search Query Understanding
//!
//! Dewey turns free-text library-registry searches into typed queries and runs
//! the matching lookup strategy against a pluggable datastore. A fixed battery
//! of rule-based classifiers types each word or phrase of the input (postcode,
//! state, city, county, or library name), the typed tokens decide what kind of
//! search the patron meant, and the chosen strategy ranks, unions, or
//! name-matches libraries accordingly.
//!
//! # Quick Start
//!
//! ```rust
//! use dewey::{LibrarySearcher, MemoryDatastore};
//!
//! // Create a searcher over the bundled in-memory fixture
//! let searcher = LibrarySearcher::new(MemoryDatastore::sample());
//!
//! // Geographic search: a bare postcode ranks the libraries around it
//! let hits = searcher.search("11212", None)?;
//! assert_eq!(hits[0].library.name, "Brownsville Community Library");
//!
//! // Name search: a misspelled library name still finds its library
//! let hits = searcher.search("Brooklyn Public Libary", None)?;
//! assert_eq!(hits[0].library.name, "Brooklyn Public Library");
//!
//! // Parse without executing to inspect the classification
//! let query = searcher.parse("dekalb county ga", None);
//! println!("{} -> {}", query.normalized(), query.search_type());
//! # Ok::<(), dewey::error::DeweyError>(())
//! ```
//!
//! # Features
//!
//! - **Typed queries**: Rule-based token classification with no model to train
//!   or host, so results are deterministic and explainable
//! - **Search strategies**: Each query shape maps to a concrete plan, from
//!   radius-ranked geotarget lookups to fuzzy name matching
//! - **Location aware**: An optional patron location breaks ties between
//!   ambiguous targets and orders name matches by distance
//! - **Pluggable storage**: Implement [`LibraryDatastore`] over any backend;
//!   an in-memory store with point-in-polygon focus areas is included
//! - **Forgiving input**: Length bounding, punctuation stripping, misspelling
//!   correction, and edit-distance name matching absorb messy patron typing
//!
//! # Data
//!
//! Dewey ships with a built-in US/English lexicon (state names and
//! abbreviations, library keywords, county designators, common misspellings)
//! so classification works out of the box. Hosts serving other vocabularies
//! can assemble their own tables with [`Lexicon::builder`] or load them from
//! a JSON document.
use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod config;
mod core;
mod data;
mod datastore;
pub mod error;
mod location;
mod query;
mod search;

pub use core::{LibrarySearcher, LibrarySearcherBuilder};

pub use config::{MAX_SEARCH_STRING_LEN, SearchConfig, SearchConfigBuilder};
pub use data::{Lexicon, LexiconBuilder, LexiconError};
pub use datastore::{
    DatastoreError, FUZZY_MAX_EDIT_DISTANCE, FUZZY_MIN_FIELD_LEN, FocusArea, Geotarget,
    GeotargetCandidate, GeotargetKind, LibraryDatastore, LibraryEntry, LibraryRecord, MatchTier,
    MemoryDatastore, NameMatch, Place, ServiceScope, fuzzy_field_match,
};
pub use location::{InvalidLocationError, Location};
pub use query::{
    SearchQuery, SearchStrategy, SearchType,
    classify::{BoxedClassifier, ClassifierPipeline, TokenClassifier},
    sequence::{MAX_MULTIWORD_TOKEN_LEN, TokenSequence},
    token::{InvalidTokenError, Token, TokenType},
};
pub use search::{SearchError, SearchHit, SearchHits};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging for the Dewey library.
///
/// Installs a `tracing` subscriber with span-close timing events. Call it
/// once, early; later calls are no-ops. The `RUST_LOG` environment
/// variable, when set, overrides the supplied level.
///
/// # Arguments
///
/// * `level` - Fallback log level when `RUST_LOG` is unset
///
/// # Examples
///
/// ```rust
/// use dewey::init_logging;
/// use tracing::Level;
///
/// // Initialize with info-level logging
/// init_logging(Level::INFO)?;
/// # Ok::<(), dewey::error::DeweyError>(())
/// ```
pub fn init_logging(level: impl Into<LevelFilter>) -> Result<&'static (), error::DeweyError> {
    LOGGER_INIT.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level.into().to_string()))?;

        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .init();
        Ok(())
    })
}
