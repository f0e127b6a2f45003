//! Query parsing: from a raw search string to a typed, classified query.
//!
//! [`SearchQuery::parse`] never fails. Whatever the input looks like, it is
//! normalized, cleaned, tokenized, and run through the classifier battery;
//! the result carries a [`SearchType`] and can name the [`SearchStrategy`]
//! a datastore-backed search should execute.

pub mod classify;
pub mod sequence;
pub mod token;

use std::fmt;

use ahash::AHashSet;
use itertools::Itertools;
use tracing::debug;

use self::{
    classify::ClassifierPipeline,
    sequence::TokenSequence,
    token::{Token, TokenType},
};
use crate::{config::SearchConfig, data::Lexicon, datastore::Geotarget, location::Location};

/// What kind of thing a query is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Exactly one place, no library named.
    SingleGeotarget,
    /// Two or more distinct places.
    MultipleGeotargets,
    /// A library by name, possibly with one place alongside.
    LibraryTarget,
    /// Nothing usable in the query.
    Indeterminate,
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::SingleGeotarget => "SINGLE_GEOTARGET",
            Self::MultipleGeotargets => "MULTIPLE_GEOTARGETS",
            Self::LibraryTarget => "LIBRARY_TARGET",
            Self::Indeterminate => "NONE",
        };
        f.write_str(label)
    }
}

/// The concrete plan a parsed query selects, pairing the search type with
/// whether a location is known. Execution lives with the searcher; this
/// type only says what should happen.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchStrategy {
    /// Rank libraries around one place.
    SingleGeotarget { target: Geotarget },
    /// Collapse to the place nearest the location, then rank around it.
    NearestOfMultiple {
        targets: Vec<Geotarget>,
        location: Location,
    },
    /// Everyone serving any of the places, alphabetically.
    UnionOfMultiple { targets: Vec<Geotarget> },
    /// Name matches ordered by distance from the location.
    LibrariesNear {
        terms: Vec<String>,
        location: Location,
    },
    /// Name matches ordered by match quality.
    LibrariesByName { terms: Vec<String> },
    /// Nothing to search for.
    Nothing,
}

/// A parsed search string.
///
/// Construction is total: any input produces a query, possibly an empty
/// one. The raw string is kept (bounded) for diagnostics; `normalized` is
/// whitespace-collapsed, length-capped, and spelling-corrected; `cleaned`
/// additionally drops punctuation and case, and is what gets tokenized.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    raw: String,
    normalized: String,
    cleaned: String,
    tokens: TokenSequence,
    location: Option<Location>,
    search_type: SearchType,
}

impl SearchQuery {
    /// Parses with the standard classifier battery and default limits.
    #[must_use]
    pub fn parse(raw: &str, location: Option<(f64, f64)>, lexicon: &Lexicon) -> Self {
        let pipeline = ClassifierPipeline::standard(lexicon);
        Self::parse_with_pipeline(raw, location, lexicon, &pipeline, &SearchConfig::default())
    }

    /// Parses with a caller-supplied pipeline and configuration.
    ///
    /// An invalid location degrades to no location rather than failing;
    /// the query itself is always built.
    #[must_use]
    pub fn parse_with_pipeline(
        raw: &str,
        location: Option<(f64, f64)>,
        lexicon: &Lexicon,
        pipeline: &ClassifierPipeline,
        config: &SearchConfig,
    ) -> Self {
        let max_len = config.max_search_string_len;
        let bounded: String = raw.chars().take(max_len * 3).collect();
        let normalized = normalize_search_string(&bounded, max_len, lexicon);
        let cleaned = clean_search_string(&normalized);

        let tokens: TokenSequence = cleaned
            .split_whitespace()
            .filter_map(|word| Token::new(word).ok())
            .collect();
        let tokens = pipeline.classify(&tokens);

        let location = location.and_then(|pair| Location::try_from(pair).ok());
        let search_type = determine_search_type(&tokens);

        debug!(
            query = %normalized,
            %search_type,
            tokens = %tokens,
            location_known = location.is_some(),
            "parsed search query"
        );

        Self {
            raw: bounded,
            normalized,
            cleaned,
            tokens,
            location,
            search_type,
        }
    }

    /// True when the raw input was an empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    #[must_use]
    pub fn cleaned(&self) -> &str {
        &self.cleaned
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenSequence {
        &self.tokens
    }

    #[must_use]
    pub const fn location(&self) -> Option<Location> {
        self.location
    }

    #[must_use]
    pub const fn search_type(&self) -> SearchType {
        self.search_type
    }

    /// The distinct places the query names, in reading order. Duplicate
    /// mentions of the same place count once.
    #[must_use]
    pub fn geotargets(&self) -> Vec<Geotarget> {
        let mut seen = AHashSet::new();
        let mut targets = Vec::new();
        for token in self.tokens.iter() {
            if let Some(target) = Geotarget::from_token(token) {
                if seen.insert(target.clone()) {
                    targets.push(target);
                }
            }
        }
        targets
    }

    /// The terms a name search should run with: library-name tokens plus
    /// any unclassified residue.
    #[must_use]
    pub fn name_terms(&self) -> Vec<String> {
        self.tokens
            .iter()
            .filter(|token| {
                token.kind() == Some(TokenType::LibraryName) || token.is_unclassified()
            })
            .map(|token| token.value().to_owned())
            .collect()
    }

    /// The plan this query calls for.
    #[must_use]
    pub fn strategy(&self) -> SearchStrategy {
        match (self.search_type, self.location) {
            // A single geotarget ignores any supplied location.
            (SearchType::SingleGeotarget, _) => match self.geotargets().into_iter().next() {
                Some(target) => SearchStrategy::SingleGeotarget { target },
                None => SearchStrategy::Nothing,
            },
            (SearchType::MultipleGeotargets, Some(location)) => {
                SearchStrategy::NearestOfMultiple {
                    targets: self.geotargets(),
                    location,
                }
            }
            (SearchType::MultipleGeotargets, None) => SearchStrategy::UnionOfMultiple {
                targets: self.geotargets(),
            },
            (SearchType::LibraryTarget, Some(location)) => SearchStrategy::LibrariesNear {
                terms: self.name_terms(),
                location,
            },
            (SearchType::LibraryTarget, None) => SearchStrategy::LibrariesByName {
                terms: self.name_terms(),
            },
            (SearchType::Indeterminate, _) => SearchStrategy::Nothing,
        }
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} [{}]", self.normalized, self.search_type)
    }
}

fn determine_search_type(tokens: &TokenSequence) -> SearchType {
    let mut seen = AHashSet::new();
    let mut distinct = 0usize;
    for token in tokens.iter() {
        if let Some(target) = Geotarget::from_token(token) {
            if seen.insert(target) {
                distinct += 1;
            }
        }
    }
    let has_library_name = tokens
        .iter()
        .any(|token| token.kind() == Some(TokenType::LibraryName));
    let has_residue = tokens.iter().any(Token::is_unclassified);

    match distinct {
        0 if has_library_name || has_residue => SearchType::LibraryTarget,
        0 => SearchType::Indeterminate,
        1 if has_library_name => SearchType::LibraryTarget,
        1 => SearchType::SingleGeotarget,
        _ => SearchType::MultipleGeotargets,
    }
}

/// Collapses whitespace, caps the length without cutting a word in half,
/// and fixes known misspellings. The input is already bounded to three
/// times the cap, so regex-free splitting here stays cheap on hostile
/// input.
fn normalize_search_string(bounded: &str, max_len: usize, lexicon: &Lexicon) -> String {
    let collapsed = bounded.split_whitespace().join(" ");
    if collapsed.is_empty() {
        return String::new();
    }
    let truncated: String = collapsed.chars().take(max_len).collect();

    let full_words: Vec<&str> = collapsed.split(' ').collect();
    let mut words: Vec<&str> = truncated.split(' ').collect();
    // A last word that no longer matches its counterpart was cut by the
    // length cap; drop it entirely.
    if let Some(last) = words.last() {
        if full_words.get(words.len() - 1) != Some(last) {
            words.pop();
        }
    }

    words
        .iter()
        .map(|word| lexicon.correct(word).unwrap_or(word))
        .join(" ")
}

/// Strips ASCII punctuation and lowercases.
fn clean_search_string(normalized: &str) -> String {
    normalized
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect::<String>()
        .to_lowercase()
}
