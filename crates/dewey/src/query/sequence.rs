//! Ordered token sequences and the multi-word merge machinery.
//!
//! A [`TokenSequence`] keeps tokens in reading order and supports collapsing
//! runs of adjacent unclassified tokens into a single typed multi-word token.
//! Every operation returns a new sequence; sequences are never mutated in
//! place, so a failed or partial classification can never corrupt the state
//! an earlier stage produced.

use std::{
    fmt,
    ops::{Deref, Range},
};

use ahash::AHashSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::token::{InvalidTokenError, Token, TokenType};
use crate::data::Lexicon;

/// Longest phrase, in words, any merge attempt will consider.
///
/// Target phrases wider than this can never match, whatever the caller
/// passes for `max_words`.
pub const MAX_MULTIWORD_TOKEN_LEN: usize = 5;

/// An ordered sequence of [`Token`]s.
///
/// Joining all token values with single spaces always reproduces the cleaned
/// search string the sequence was built from; merges replace tokens but never
/// drop or duplicate words.
///
/// # Examples
///
/// ```
/// use dewey::{TokenSequence, TokenType};
///
/// let sequence = TokenSequence::from_words(["new", "york"])?;
/// let merged =
///     sequence.merge_multiword_tokens(["new york"], TokenType::StateName, 2);
///
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].value(), "new york");
/// assert_eq!(merged[0].kind(), Some(TokenType::StateName));
/// # Ok::<(), dewey::InvalidTokenError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSequence {
    tokens: Vec<Token>,
}

impl TokenSequence {
    /// Builds a sequence from existing tokens.
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }

    /// Wraps each word in an unclassified [`Token`].
    ///
    /// Fails if any word is empty or whitespace only.
    pub fn from_words<I, S>(words: I) -> Result<Self, InvalidTokenError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<Token> = words
            .into_iter()
            .map(|word| Token::new(word.as_ref()))
            .collect::<Result<_, _>>()?;
        Ok(Self { tokens })
    }

    /// True when every token carries a type.
    #[must_use]
    pub fn all_classified(&self) -> bool {
        self.tokens.iter().all(Token::is_classified)
    }

    /// Number of tokens still lacking a type.
    #[must_use]
    pub fn unclassified_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_unclassified()).count()
    }

    /// Length of the longest contiguous run of unclassified tokens.
    ///
    /// Bounds how many words a merge attempt may scan from any position.
    #[must_use]
    pub fn longest_unclassified_run(&self) -> usize {
        let mut longest = 0;
        let mut current = 0;
        for token in &self.tokens {
            if token.is_unclassified() {
                current += 1;
                longest = longest.max(current);
            } else {
                current = 0;
            }
        }
        longest
    }

    /// All token values joined by single spaces.
    #[must_use]
    pub fn text(&self) -> String {
        self.tokens.iter().map(Token::value).join(" ")
    }

    /// Collapses runs of adjacent unclassified tokens that spell out one of
    /// the target phrases into a single token of `merged_kind`.
    ///
    /// Targets are normalized (lowercased, whitespace collapsed) before
    /// matching, and only targets of two up to the effective scan width
    /// words are eligible. The scan width is `max_words` clamped to at least
    /// two and at most the shorter of the longest unclassified run and
    /// [`MAX_MULTIWORD_TOKEN_LEN`].
    ///
    /// The scan is greedy left to right with the shortest match winning at
    /// each position: a merge can only start at an unclassified token whose
    /// immediate successor is also unclassified, compounds are tried at
    /// increasing lengths (further bounded by the local run of unclassified
    /// tokens), and the first compound found in the target set is taken.
    /// Compounds join existing token values, so a token that is already
    /// multi-word matches only as a whole unit; no target can split it.
    #[must_use]
    pub fn merge_multiword_tokens<I, S>(
        &self,
        targets: I,
        merged_kind: TokenType,
        max_words: usize,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.all_classified() {
            return self.clone();
        }
        let longest_run = self.longest_unclassified_run();
        if longest_run <= 1 {
            return self.clone();
        }

        // longest_run >= 2 here, so the clamp bounds stay ordered.
        let width = max_words.clamp(2, longest_run.min(MAX_MULTIWORD_TOKEN_LEN));
        let eligible: AHashSet<String> = targets
            .into_iter()
            .map(|target| target.as_ref().split_whitespace().join(" ").to_lowercase())
            .filter(|target| (2..=width).contains(&target.split(' ').count()))
            .collect();
        if eligible.is_empty() {
            return self.clone();
        }

        let total = self.tokens.len();
        let mut merged: Vec<Token> = Vec::with_capacity(total);
        let mut idx = 0;
        while idx < total {
            let token = &self.tokens[idx];
            let next_is_open = self
                .tokens
                .get(idx + 1)
                .is_some_and(Token::is_unclassified);
            if token.is_classified() || !next_is_open {
                merged.push(token.clone());
                idx += 1;
                continue;
            }

            // Never scan further than the tokens left or the local run of
            // unclassified tokens starting here.
            let mut local_width = width.min(total - idx);
            let mut local_run = 2;
            for lookahead in &self.tokens[idx + 2..idx + local_width] {
                if lookahead.is_classified() {
                    break;
                }
                local_run += 1;
            }
            local_width = local_width.min(local_run);

            let mut consumed = 0;
            for span in 2..=local_width {
                let compound = self.tokens[idx..idx + span]
                    .iter()
                    .map(Token::value)
                    .join(" ");
                if eligible.contains(&compound) {
                    merged.push(Token::classified(compound, merged_kind));
                    consumed = span;
                    break;
                }
            }
            if consumed == 0 {
                merged.push(token.clone());
                idx += 1;
            } else {
                idx += consumed;
            }
        }

        Self { tokens: merged }
    }

    /// Merges runs spelling out a multi-word state name ("new york",
    /// "district of columbia", ...) into single `STATE_NAME` tokens.
    #[must_use]
    pub fn merge_multiword_state_names(&self, lexicon: &Lexicon) -> Self {
        self.merge_multiword_tokens(
            lexicon.multiword_state_names(),
            TokenType::StateName,
            lexicon.max_state_name_words(),
        )
    }

    /// Replaces the tokens in `span` with one token of `merged_kind` whose
    /// value joins their values. The span must be non-empty and in bounds.
    pub(crate) fn merge_span(&self, span: Range<usize>, merged_kind: TokenType) -> Self {
        debug_assert!(!span.is_empty() && span.end <= self.tokens.len());
        let compound = self.tokens[span.clone()]
            .iter()
            .map(Token::value)
            .join(" ");

        let mut tokens: Vec<Token> = Vec::with_capacity(self.tokens.len() - span.len() + 1);
        tokens.extend_from_slice(&self.tokens[..span.start]);
        tokens.push(Token::classified(compound, merged_kind));
        tokens.extend_from_slice(&self.tokens[span.end..]);
        Self { tokens }
    }

    /// A copy with the token at `index` carrying `kind`.
    pub(crate) fn retyped(&self, index: usize, kind: TokenType) -> Self {
        let mut tokens = self.tokens.clone();
        tokens[index] = tokens[index].retyped(kind);
        Self { tokens }
    }
}

impl Deref for TokenSequence {
    type Target = [Token];

    fn deref(&self) -> &Self::Target {
        &self.tokens
    }
}

impl FromIterator<Token> for TokenSequence {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for TokenSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
