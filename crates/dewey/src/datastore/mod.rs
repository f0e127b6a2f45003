//! The library datastore contract and its collaborator types.
//!
//! Parsing turns a search string into typed targets; everything that knows
//! where libraries actually are lives behind [`LibraryDatastore`]. The
//! bundled [`MemoryDatastore`] backs tests and examples; production callers
//! plug in their own implementation.

pub use error::DatastoreError;
use error::Result;
pub use memory::{FocusArea, LibraryEntry, MemoryDatastore, Place};

mod memory;

use std::fmt;

use itertools::Itertools;
use rapidfuzz::distance::levenshtein;
use serde::{Deserialize, Serialize};

use crate::{
    location::Location,
    query::token::{Token, TokenType},
};

mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum DatastoreError {
        #[error("datastore backend error: {0}")]
        Backend(String),
        #[error(transparent)]
        Other(#[from] anyhow::Error),
    }
    pub type Result<T> = std::result::Result<T, DatastoreError>;
}

/// Fields shorter than this only match exactly.
pub const FUZZY_MIN_FIELD_LEN: usize = 6;
/// Largest edit distance an inexact match may have.
pub const FUZZY_MAX_EDIT_DISTANCE: usize = 2;

/// The canonical fuzzy rule for matching a search term against a stored
/// field: exact match ignoring case, or an edit distance of at most
/// [`FUZZY_MAX_EDIT_DISTANCE`] when the field has at least
/// [`FUZZY_MIN_FIELD_LEN`] characters. Short fields never match inexactly,
/// so "cat" does not swallow "car".
#[must_use]
pub fn fuzzy_field_match(field: &str, term: &str) -> bool {
    let field_lower = field.to_lowercase();
    let term_lower = term.to_lowercase();
    if field_lower == term_lower {
        return true;
    }
    if field.chars().count() < FUZZY_MIN_FIELD_LEN {
        return false;
    }
    levenshtein::distance(field_lower.chars(), term_lower.chars()) <= FUZZY_MAX_EDIT_DISTANCE
}

/// A library as the datastore describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl LibraryRecord {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            aliases: Vec::new(),
            description: None,
        }
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl fmt::Display for LibraryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}

/// The kinds of place a classified token can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeotargetKind {
    Postcode,
    City,
    County,
    State,
}

impl fmt::Display for GeotargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Postcode => "postcode",
            Self::City => "city",
            Self::County => "county",
            Self::State => "state",
        };
        f.write_str(label)
    }
}

/// A named place a search resolves against, for example postcode "11212" or
/// city "brooklyn". Names are stored whitespace-collapsed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Geotarget {
    kind: GeotargetKind,
    name: String,
}

impl Geotarget {
    pub fn new(kind: GeotargetKind, name: impl AsRef<str>) -> Self {
        Self {
            kind,
            name: name.as_ref().split_whitespace().join(" ").to_lowercase(),
        }
    }

    /// The geotarget a classified token denotes, or `None` for library and
    /// unclassified tokens. Both state forms collapse to the state kind.
    pub fn from_token(token: &Token) -> Option<Self> {
        let kind = match token.kind()? {
            TokenType::Postcode => GeotargetKind::Postcode,
            TokenType::CityName => GeotargetKind::City,
            TokenType::CountyName => GeotargetKind::County,
            TokenType::StateAbbr | TokenType::StateName => GeotargetKind::State,
            TokenType::LibraryKeyword | TokenType::LibraryName => return None,
        };
        Some(Self::new(kind, token.value()))
    }

    #[must_use]
    pub const fn kind(&self) -> GeotargetKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Geotarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

/// How widely a library serves: a local focus (postcode, city, county) or a
/// supra-local one (a whole state, or everywhere).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceScope {
    Local,
    SupraLocal,
}

impl fmt::Display for ServiceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Local => "local",
            Self::SupraLocal => "supra-local",
        };
        f.write_str(label)
    }
}

/// A library within range of a geotarget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeotargetCandidate {
    pub library: LibraryRecord,
    pub scope: ServiceScope,
    /// Distance from the geotarget to the library, in meters. Zero when the
    /// library sits inside the target area.
    pub distance_m: f64,
    /// Whether the target area is exactly the one this library serves.
    pub serves_target: bool,
}

/// Which field of a library record a search term matched, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Name,
    Alias,
    Description,
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Name => "name",
            Self::Alias => "alias",
            Self::Description => "description",
        };
        f.write_str(label)
    }
}

/// A library whose record matched a name search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameMatch {
    pub library: LibraryRecord,
    pub tier: MatchTier,
    /// Distance from the caller's location in meters, when one was given.
    pub distance_m: Option<f64>,
}

/// Everything the search strategies need to know about libraries and the
/// places they serve. Implementations own geography; callers own parsing
/// and ranking.
pub trait LibraryDatastore {
    /// Libraries within `radius_m` meters of the target area, each with its
    /// distance, service scope, and whether it serves exactly that area.
    /// Unknown targets yield an empty list.
    fn geotarget_candidates(
        &self,
        target: &Geotarget,
        radius_m: f64,
    ) -> Result<Vec<GeotargetCandidate>>;

    /// Libraries serving the target area, regardless of distance: those
    /// focused on it, located inside it, or serving everywhere.
    fn geotarget_members(&self, target: &Geotarget) -> Result<Vec<LibraryRecord>>;

    /// Distance in meters from `location` to the target area's edge, zero
    /// inside it, or `None` when the target is unknown.
    fn geotarget_distance(&self, target: &Geotarget, location: Location) -> Result<Option<f64>>;

    /// Libraries whose name, alias, or description matches any of `terms`
    /// under [`fuzzy_field_match`], reporting the best tier per library.
    /// When a location is given each match carries its distance from it.
    fn libraries_matching(
        &self,
        terms: &[String],
        location: Option<Location>,
    ) -> Result<Vec<NameMatch>>;
}
