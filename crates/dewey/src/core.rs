use std::time::Instant;

use tracing::{info, instrument};

use crate::{
    config::SearchConfig,
    data::Lexicon,
    datastore::LibraryDatastore,
    error::Result,
    query::{SearchQuery, classify::ClassifierPipeline},
    search::SearchHits,
    search::strategies,
};

/// The main searcher: parses free-text queries and runs them against a
/// library datastore.
///
/// Parsing is pure and infallible; only executing a search can fail, and
/// only with whatever the datastore reports.
///
/// # Examples
///
/// Basic usage:
/// ```rust
/// use dewey::{LibrarySearcher, MemoryDatastore};
///
/// let searcher = LibrarySearcher::new(MemoryDatastore::sample());
/// let hits = searcher.search("11212", None)?;
/// println!("Found {} libraries", hits.len());
/// # Ok::<(), dewey::error::DeweyError>(())
/// ```
///
/// With custom configuration:
/// ```rust
/// use dewey::{LibrarySearcher, MemoryDatastore, SearchConfig};
///
/// let config = SearchConfig::builder().broad_result_limit(5).build();
/// let searcher = LibrarySearcher::builder(MemoryDatastore::sample())
///     .config(config)
///     .build();
///
/// let hits = searcher.search("new york", None)?;
/// assert!(hits.len() <= 5);
/// # Ok::<(), dewey::error::DeweyError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LibrarySearcher<D> {
    datastore: D,
    lexicon: Lexicon,
    config: SearchConfig,
    pipeline: ClassifierPipeline,
}

impl<D: LibraryDatastore> LibrarySearcher<D> {
    /// Create a searcher with the US-English lexicon and default limits.
    pub fn new(datastore: D) -> Self {
        let lexicon = Lexicon::us_english();
        let pipeline = ClassifierPipeline::standard(&lexicon);
        Self {
            datastore,
            lexicon,
            config: SearchConfig::default(),
            pipeline,
        }
    }

    /// Start building a searcher with a custom lexicon or configuration.
    pub fn builder(datastore: D) -> LibrarySearcherBuilder<D> {
        LibrarySearcherBuilder::new(datastore)
    }

    /// Parse a search string without touching the datastore.
    ///
    /// Always succeeds; an unusable string parses to an empty query whose
    /// strategy is to do nothing. An invalid location is treated as no
    /// location.
    ///
    /// ```rust
    /// use dewey::{LibrarySearcher, MemoryDatastore, SearchType};
    ///
    /// let searcher = LibrarySearcher::new(MemoryDatastore::sample());
    /// let query = searcher.parse("brooklyn public library", None);
    /// assert_eq!(query.search_type(), SearchType::LibraryTarget);
    /// ```
    #[must_use]
    pub fn parse(&self, raw: &str, location: Option<(f64, f64)>) -> SearchQuery {
        SearchQuery::parse_with_pipeline(raw, location, &self.lexicon, &self.pipeline, &self.config)
    }

    /// Execute an already-parsed query.
    pub fn run(&self, query: &SearchQuery) -> Result<SearchHits> {
        let strategy = query.strategy();
        Ok(strategies::execute(&self.datastore, &strategy, &self.config)?)
    }

    /// Parse and execute in one step.
    #[instrument(name = "Library Search", level = "debug", skip_all)]
    pub fn search(&self, raw: &str, location: Option<(f64, f64)>) -> Result<SearchHits> {
        let started = Instant::now();
        let query = self.parse(raw, location);
        let hits = self.run(&query)?;
        info!(
            search_type = %query.search_type(),
            results = hits.len(),
            elapsed_seconds = started.elapsed().as_secs_f64(),
            "search complete"
        );
        Ok(hits)
    }

    pub fn datastore(&self) -> &D {
        &self.datastore
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

// === Builder Pattern (Optional) ===

/// Builder for creating a `LibrarySearcher` with custom parts.
#[derive(Debug, Clone)]
pub struct LibrarySearcherBuilder<D> {
    datastore: D,
    lexicon: Option<Lexicon>,
    config: Option<SearchConfig>,
}

impl<D: LibraryDatastore> LibrarySearcherBuilder<D> {
    #[must_use]
    pub fn new(datastore: D) -> Self {
        Self {
            datastore,
            lexicon: None,
            config: None,
        }
    }

    /// Use a custom lexicon instead of the US-English tables.
    #[must_use]
    pub fn lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = Some(lexicon);
        self
    }

    /// Use custom search limits.
    #[must_use]
    pub fn config(mut self, config: SearchConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the `LibrarySearcher`.
    pub fn build(self) -> LibrarySearcher<D> {
        let lexicon = self.lexicon.unwrap_or_else(Lexicon::us_english);
        let pipeline = ClassifierPipeline::standard(&lexicon);
        LibrarySearcher {
            datastore: self.datastore,
            lexicon,
            config: self.config.unwrap_or_default(),
            pipeline,
        }
    }
}
