//! Reference data for classification, injected rather than hardcoded.
//!
//! Every lookup table the classifiers and the normalizer consult lives in a
//! [`Lexicon`]: state abbreviations and names, library keywords, county
//! words, and the misspelling-correction table. The built-in
//! [`Lexicon::us_english`] tables cover the US/English locale; tests and
//! hosts with different vocabularies build their own via
//! [`Lexicon::builder`] or load one from JSON.

mod us;

use std::sync::Arc;

use ahash::AHashSet;
use itertools::Itertools;
use once_cell::sync::OnceCell;
use serde::Deserialize;

pub use self::error::LexiconError;

mod error {
    use thiserror::Error;

    /// Errors raised while loading lexicon documents.
    #[derive(Error, Debug)]
    pub enum LexiconError {
        #[error("Invalid lexicon document: {0}")]
        Parse(#[from] serde_json::Error),
    }
}

static US_ENGLISH: OnceCell<Lexicon> = OnceCell::new();

/// Immutable classification vocabulary shared by the classifier pipeline and
/// the query normalizer.
///
/// Cloning is cheap (the tables sit behind an [`Arc`]), so a lexicon can be
/// handed to every classifier and to concurrently running searchers without
/// copying the tables themselves.
///
/// # Examples
///
/// ```
/// use dewey::Lexicon;
///
/// let lexicon = Lexicon::us_english();
/// assert!(lexicon.is_state_abbreviation("ny"));
/// assert!(lexicon.is_state_name("new york"));
/// assert!(lexicon.is_library_keyword("bookmobile"));
/// assert_eq!(lexicon.correct("Libary"), Some("library"));
/// ```
#[derive(Debug, Clone)]
pub struct Lexicon {
    inner: Arc<LexiconInner>,
}

#[derive(Debug)]
struct LexiconInner {
    state_abbreviations: AHashSet<String>,
    state_names: AHashSet<String>,
    multiword_state_names: Vec<String>,
    max_state_name_words: usize,
    library_keywords: AHashSet<String>,
    county_words: AHashSet<String>,
    corrections: Vec<(String, String)>,
}

impl Lexicon {
    /// The built-in US-English tables (50 states plus DC and territories,
    /// the standard library keyword list, "county"/"parish", and the known
    /// misspelling corrections).
    #[must_use]
    pub fn us_english() -> Self {
        US_ENGLISH
            .get_or_init(|| {
                Self::builder()
                    .state_abbreviations(us::STATE_ABBREVIATIONS.iter().copied())
                    .state_names(us::STATE_NAMES.iter().copied())
                    .library_keywords(us::LIBRARY_KEYWORDS.iter().copied())
                    .county_words(us::COUNTY_WORDS.iter().copied())
                    .corrections(us::COMMON_MISSPELLINGS.iter().copied())
                    .build()
            })
            .clone()
    }

    #[must_use]
    pub fn builder() -> LexiconBuilder {
        LexiconBuilder::default()
    }

    /// Loads a lexicon from a JSON document with any of the keys
    /// `state_abbreviations`, `state_names`, `library_keywords`,
    /// `county_words`, and `corrections` (an array of `[wrong, right]`
    /// pairs). Missing keys yield empty tables.
    pub fn from_json_str(document: &str) -> Result<Self, LexiconError> {
        let tables: LexiconTables = serde_json::from_str(document)?;
        Ok(Self::builder()
            .state_abbreviations(tables.state_abbreviations)
            .state_names(tables.state_names)
            .library_keywords(tables.library_keywords)
            .county_words(tables.county_words)
            .corrections(tables.corrections)
            .build())
    }

    #[must_use]
    pub fn is_state_abbreviation(&self, word: &str) -> bool {
        self.inner.state_abbreviations.contains(word)
    }

    #[must_use]
    pub fn is_state_name(&self, value: &str) -> bool {
        self.inner.state_names.contains(value)
    }

    #[must_use]
    pub fn is_library_keyword(&self, word: &str) -> bool {
        self.inner.library_keywords.contains(word)
    }

    #[must_use]
    pub fn is_county_word(&self, word: &str) -> bool {
        self.inner.county_words.contains(word)
    }

    /// State names spanning more than one word, for the state-name merge.
    #[must_use]
    pub fn multiword_state_names(&self) -> &[String] {
        &self.inner.multiword_state_names
    }

    /// Word count of the longest multi-word state name.
    pub(crate) fn max_state_name_words(&self) -> usize {
        self.inner.max_state_name_words
    }

    /// The correction for a known misspelling, matched case-insensitively
    /// against the whole word.
    #[must_use]
    pub fn correct(&self, word: &str) -> Option<&str> {
        let lowered = word.to_lowercase();
        self.inner
            .corrections
            .iter()
            .find(|(wrong, _)| *wrong == lowered)
            .map(|(_, right)| right.as_str())
    }
}

#[derive(Debug, Default, Deserialize)]
struct LexiconTables {
    #[serde(default)]
    state_abbreviations: Vec<String>,
    #[serde(default)]
    state_names: Vec<String>,
    #[serde(default)]
    library_keywords: Vec<String>,
    #[serde(default)]
    county_words: Vec<String>,
    #[serde(default)]
    corrections: Vec<(String, String)>,
}

/// Assembles a [`Lexicon`], normalizing every entry (lowercased, whitespace
/// collapsed) so membership tests line up with cleaned query tokens.
#[derive(Debug, Default)]
#[must_use]
pub struct LexiconBuilder {
    state_abbreviations: Vec<String>,
    state_names: Vec<String>,
    library_keywords: Vec<String>,
    county_words: Vec<String>,
    corrections: Vec<(String, String)>,
}

impl LexiconBuilder {
    pub fn state_abbreviations<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state_abbreviations
            .extend(items.into_iter().map(Into::into));
        self
    }

    pub fn state_names<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state_names.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn library_keywords<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.library_keywords
            .extend(items.into_iter().map(Into::into));
        self
    }

    pub fn county_words<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.county_words.extend(items.into_iter().map(Into::into));
        self
    }

    /// Registers one misspelling and its replacement.
    pub fn correction(mut self, wrong: impl Into<String>, right: impl Into<String>) -> Self {
        self.corrections.push((wrong.into(), right.into()));
        self
    }

    pub fn corrections<I, W, R>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = (W, R)>,
        W: Into<String>,
        R: Into<String>,
    {
        self.corrections
            .extend(items.into_iter().map(|(w, r)| (w.into(), r.into())));
        self
    }

    #[must_use]
    pub fn build(self) -> Lexicon {
        let state_abbreviations: AHashSet<String> = self
            .state_abbreviations
            .iter()
            .map(|entry| normalize_entry(entry))
            .collect();
        let state_names: AHashSet<String> = self
            .state_names
            .iter()
            .map(|entry| normalize_entry(entry))
            .collect();
        let multiword_state_names: Vec<String> = state_names
            .iter()
            .filter(|name| name.contains(' '))
            .cloned()
            .sorted()
            .collect();
        let max_state_name_words = multiword_state_names
            .iter()
            .map(|name| name.split(' ').count())
            .max()
            .unwrap_or(2);
        let library_keywords: AHashSet<String> = self
            .library_keywords
            .iter()
            .map(|entry| normalize_entry(entry))
            .collect();
        let county_words: AHashSet<String> = self
            .county_words
            .iter()
            .map(|entry| normalize_entry(entry))
            .collect();
        let corrections: Vec<(String, String)> = self
            .corrections
            .iter()
            .map(|(wrong, right)| (normalize_entry(wrong), normalize_entry(right)))
            .collect();

        Lexicon {
            inner: Arc::new(LexiconInner {
                state_abbreviations,
                state_names,
                multiword_state_names,
                max_state_name_words,
                library_keywords,
                county_words,
                corrections,
            }),
        }
    }
}

fn normalize_entry(entry: &str) -> String {
    entry.split_whitespace().join(" ").to_lowercase()
}
