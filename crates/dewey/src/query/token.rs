//! Tokens: the atoms of a parsed search string.
//!
//! A [`Token`] is a normalized word (or, after merging, a multi-word phrase)
//! with an optional semantic type. Classification never mutates a token in
//! place; classifiers build new tokens and new sequences.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a token would carry no text at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("token value must contain at least one non-whitespace character")]
pub struct InvalidTokenError;

/// Semantic categories a classified token can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    /// Five- or nine-digit US postal code.
    Postcode,
    /// Two-letter state or territory abbreviation.
    StateAbbr,
    /// Full state name, possibly multi-word.
    StateName,
    /// County (or parish) name including the county word itself.
    CountyName,
    /// City name, possibly multi-word.
    CityName,
    /// A single word from the library keyword list ("library", "archive", ...).
    LibraryKeyword,
    /// A merged phrase naming a library.
    LibraryName,
}

impl TokenType {
    /// True for the types that name a place rather than a library.
    #[must_use]
    pub const fn is_geographic(self) -> bool {
        matches!(
            self,
            Self::Postcode | Self::StateAbbr | Self::StateName | Self::CountyName | Self::CityName
        )
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Postcode => "POSTCODE",
            Self::StateAbbr => "STATE_ABBR",
            Self::StateName => "STATE_NAME",
            Self::CountyName => "COUNTY_NAME",
            Self::CityName => "CITY_NAME",
            Self::LibraryKeyword => "LIBRARY_KEYWORD",
            Self::LibraryName => "LIBRARY_NAME",
        };
        f.write_str(name)
    }
}

/// A single normalized word or merged phrase from a search string.
///
/// The value is trimmed and internal whitespace runs are collapsed to single
/// spaces at construction. Full equality ([`PartialEq`]) compares both value
/// and type; the merge machinery intentionally compares text alone, which is
/// exposed as [`Token::same_text`].
///
/// # Examples
///
/// ```
/// use dewey::{Token, TokenType};
///
/// let token = Token::new("  Springfield  ")?;
/// assert_eq!(token.value(), "Springfield");
/// assert!(token.is_unclassified());
///
/// let typed = Token::with_kind("11212", Some(TokenType::Postcode))?;
/// assert!(typed.is_classified());
/// # Ok::<(), dewey::InvalidTokenError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    value: String,
    kind: Option<TokenType>,
}

impl Token {
    /// Builds an unclassified token from raw text.
    ///
    /// Fails with [`InvalidTokenError`] when the text is empty or whitespace
    /// only.
    pub fn new(value: impl AsRef<str>) -> Result<Self, InvalidTokenError> {
        Self::with_kind(value, None)
    }

    /// Builds a token with an explicit type (or `None` for unclassified).
    pub fn with_kind(
        value: impl AsRef<str>,
        kind: Option<TokenType>,
    ) -> Result<Self, InvalidTokenError> {
        let value = value.as_ref().split_whitespace().join(" ");
        if value.is_empty() {
            return Err(InvalidTokenError);
        }
        Ok(Self { value, kind })
    }

    /// Internal constructor for merge results. The value must already be
    /// normalized and non-empty (joins of existing token values always are).
    pub(crate) const fn classified(value: String, kind: TokenType) -> Self {
        Self {
            value,
            kind: Some(kind),
        }
    }

    /// A copy of this token carrying the given type.
    #[must_use]
    pub(crate) fn retyped(&self, kind: TokenType) -> Self {
        Self {
            value: self.value.clone(),
            kind: Some(kind),
        }
    }

    /// The normalized text of the token.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The semantic type, or `None` while unclassified.
    #[must_use]
    pub const fn kind(&self) -> Option<TokenType> {
        self.kind
    }

    #[must_use]
    pub const fn is_classified(&self) -> bool {
        self.kind.is_some()
    }

    #[must_use]
    pub const fn is_unclassified(&self) -> bool {
        self.kind.is_none()
    }

    /// True iff the normalized value spans more than one word.
    #[must_use]
    pub fn is_multiword(&self) -> bool {
        self.value.contains(' ')
    }

    /// Text-only comparison, ignoring the assigned type.
    ///
    /// The merge algorithm treats tokens as interchangeable when their text
    /// matches; callers that care about the type should use `==` instead.
    #[must_use]
    pub fn same_text(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
