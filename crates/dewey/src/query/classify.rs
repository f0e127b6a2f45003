//! Rule-based token classification.
//!
//! Five pattern families inspect a [`TokenSequence`] and produce augmented
//! copies: single-word lexical matches, multi-word state names, city names,
//! county names, and library names. [`ClassifierPipeline`] runs them in a
//! fixed order, repeating until everything is classified or a full pass
//! changes nothing.

use std::{fmt, sync::Arc};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{
    sequence::TokenSequence,
    token::{Token, TokenType},
};
use crate::data::Lexicon;

/// Exactly five or exactly nine digits.
static POSTCODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9]{5}|[0-9]{9})$").expect("postcode pattern compiles")
});

/// A single classification rule family.
///
/// `work_to_do` is a cheap pre-check so the pipeline can skip families that
/// cannot apply. `classify` returns an augmented copy and must leave its
/// input untouched; when `work_to_do` is false it returns an unchanged copy.
pub trait TokenClassifier {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    fn work_to_do(&self, sequence: &TokenSequence) -> bool;

    fn classify(&self, sequence: &TokenSequence) -> TokenSequence;
}

/// A classifier behind a pointer, as the pipeline stores them.
pub type BoxedClassifier = Box<dyn TokenClassifier + Send + Sync>;

fn is_state_token(token: &Token) -> bool {
    matches!(
        token.kind(),
        Some(TokenType::StateAbbr | TokenType::StateName)
    )
}

/// Types unclassified single words by lexical lookup.
///
/// Precedence per word: postcode pattern, then state abbreviation, then full
/// state name, then library keyword. Multi-word and already classified
/// tokens are skipped.
#[derive(Debug, Clone)]
pub struct SingleWordClassifier {
    lexicon: Lexicon,
}

impl SingleWordClassifier {
    #[must_use]
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    fn word_kind(&self, word: &str) -> Option<TokenType> {
        if POSTCODE_RE.is_match(word) {
            Some(TokenType::Postcode)
        } else if self.lexicon.is_state_abbreviation(word) {
            Some(TokenType::StateAbbr)
        } else if self.lexicon.is_state_name(word) {
            Some(TokenType::StateName)
        } else if self.lexicon.is_library_keyword(word) {
            Some(TokenType::LibraryKeyword)
        } else {
            None
        }
    }
}

impl TokenClassifier for SingleWordClassifier {
    fn name(&self) -> &'static str {
        "single_word"
    }

    fn work_to_do(&self, sequence: &TokenSequence) -> bool {
        !sequence.all_classified()
    }

    fn classify(&self, sequence: &TokenSequence) -> TokenSequence {
        if !self.work_to_do(sequence) {
            return sequence.clone();
        }
        sequence
            .iter()
            .map(|token| {
                if token.is_classified() || token.is_multiword() {
                    return token.clone();
                }
                match self.word_kind(token.value()) {
                    Some(kind) => token.retyped(kind),
                    None => token.clone(),
                }
            })
            .collect()
    }
}

/// Types full state names, single- and multi-word.
///
/// Single tokens whose value is a complete state name are retyped first;
/// remaining unclassified runs are then merged against the multi-word state
/// names ("new york", "district of columbia", ...).
#[derive(Debug, Clone)]
pub struct StateNameClassifier {
    lexicon: Lexicon,
}

impl StateNameClassifier {
    #[must_use]
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }
}

impl TokenClassifier for StateNameClassifier {
    fn name(&self) -> &'static str {
        "state_name"
    }

    fn work_to_do(&self, sequence: &TokenSequence) -> bool {
        !sequence.all_classified()
    }

    fn classify(&self, sequence: &TokenSequence) -> TokenSequence {
        if !self.work_to_do(sequence) {
            return sequence.clone();
        }
        let retyped: TokenSequence = sequence
            .iter()
            .map(|token| {
                if token.is_unclassified() && self.lexicon.is_state_name(token.value()) {
                    token.retyped(TokenType::StateName)
                } else {
                    token.clone()
                }
            })
            .collect();
        retyped.merge_multiword_state_names(&self.lexicon)
    }
}

/// Detects city names from three ordered patterns.
///
/// 1. "city of X ..." merges "city", "of", and the following unclassified
///    run.
/// 2. A bareword "city" merges with the unclassified run preceding it
///    ("paradise city").
/// 3. A state token preceded by an unclassified run marks that run as a city
///    ("yreka ca"); a run of one is retyped rather than merged.
///
/// The first pattern whose trigger appears in the sequence is the only one
/// tried, and at most one merge happens per call; the pipeline re-runs the
/// battery until nothing changes. Runs containing a county word are left for
/// the county classifier.
#[derive(Debug, Clone)]
pub struct CityNameClassifier {
    lexicon: Lexicon,
}

impl CityNameClassifier {
    #[must_use]
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    fn has_city_of_trigger(sequence: &TokenSequence) -> bool {
        sequence.iter().enumerate().any(|(idx, token)| {
            token.is_unclassified()
                && token.value() == "city"
                && sequence
                    .get(idx + 1)
                    .is_some_and(|next| next.is_unclassified() && next.value() == "of")
                && sequence.get(idx + 2).is_some_and(Token::is_unclassified)
        })
    }

    fn has_city_word(sequence: &TokenSequence) -> bool {
        sequence
            .iter()
            .any(|token| token.is_unclassified() && token.value() == "city")
    }

    /// Start of the unclassified run that ends just before `idx`.
    fn run_start(sequence: &TokenSequence, idx: usize) -> usize {
        let mut start = idx;
        while start > 0 && sequence[start - 1].is_unclassified() {
            start -= 1;
        }
        start
    }

    fn run_has_county_word(&self, sequence: &TokenSequence, span: std::ops::Range<usize>) -> bool {
        sequence[span]
            .iter()
            .any(|token| self.lexicon.is_county_word(token.value()))
    }

    fn merge_city_of(&self, sequence: &TokenSequence) -> TokenSequence {
        for (idx, token) in sequence.iter().enumerate() {
            let trigger = token.is_unclassified()
                && token.value() == "city"
                && sequence
                    .get(idx + 1)
                    .is_some_and(|next| next.is_unclassified() && next.value() == "of")
                && sequence.get(idx + 2).is_some_and(Token::is_unclassified);
            if !trigger {
                continue;
            }
            let mut end = idx + 3;
            while end < sequence.len() && sequence[end].is_unclassified() {
                end += 1;
            }
            return self.merge_as_city(sequence, idx..end);
        }
        sequence.clone()
    }

    fn merge_preceding_city(&self, sequence: &TokenSequence) -> TokenSequence {
        for idx in 1..sequence.len() {
            let token = &sequence[idx];
            if !(token.is_unclassified() && token.value() == "city")
                || sequence[idx - 1].is_classified()
            {
                continue;
            }
            let start = Self::run_start(sequence, idx);
            if self.run_has_county_word(sequence, start..idx) {
                continue;
            }
            return self.merge_as_city(sequence, start..idx + 1);
        }
        sequence.clone()
    }

    fn merge_before_state(&self, sequence: &TokenSequence) -> TokenSequence {
        for idx in 1..sequence.len() {
            if !is_state_token(&sequence[idx]) || sequence[idx - 1].is_classified() {
                continue;
            }
            let start = Self::run_start(sequence, idx);
            if self.run_has_county_word(sequence, start..idx) {
                continue;
            }
            if idx - start == 1 {
                return sequence.retyped(idx - 1, TokenType::CityName);
            }
            return self.merge_as_city(sequence, start..idx);
        }
        sequence.clone()
    }

    fn merge_as_city(&self, sequence: &TokenSequence, span: std::ops::Range<usize>) -> TokenSequence {
        let compound = sequence[span]
            .iter()
            .map(Token::value)
            .collect::<Vec<_>>()
            .join(" ");
        let width = compound.split(' ').count();
        sequence.merge_multiword_tokens([compound.as_str()], TokenType::CityName, width)
    }
}

impl TokenClassifier for CityNameClassifier {
    fn name(&self) -> &'static str {
        "city_name"
    }

    fn work_to_do(&self, sequence: &TokenSequence) -> bool {
        sequence.len() > 1
            && !sequence.all_classified()
            && (Self::has_city_word(sequence) || sequence.iter().any(is_state_token))
    }

    fn classify(&self, sequence: &TokenSequence) -> TokenSequence {
        if !self.work_to_do(sequence) {
            return sequence.clone();
        }
        if Self::has_city_of_trigger(sequence) {
            self.merge_city_of(sequence)
        } else if Self::has_city_word(sequence) {
            self.merge_preceding_city(sequence)
        } else {
            self.merge_before_state(sequence)
        }
    }
}

/// Merges "<run> county" (or parish) into a county name.
#[derive(Debug, Clone)]
pub struct CountyNameClassifier {
    lexicon: Lexicon,
}

impl CountyNameClassifier {
    #[must_use]
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }
}

impl TokenClassifier for CountyNameClassifier {
    fn name(&self) -> &'static str {
        "county_name"
    }

    fn work_to_do(&self, sequence: &TokenSequence) -> bool {
        sequence
            .iter()
            .any(|token| self.lexicon.is_county_word(token.value()))
    }

    fn classify(&self, sequence: &TokenSequence) -> TokenSequence {
        if !self.work_to_do(sequence) {
            return sequence.clone();
        }
        for idx in 1..sequence.len() {
            let token = &sequence[idx];
            let ends_county = token.is_unclassified()
                && self.lexicon.is_county_word(token.value())
                && sequence[idx - 1].is_unclassified();
            if !ends_county {
                continue;
            }
            let start = CityNameClassifier::run_start(sequence, idx);
            let compound = sequence[start..=idx]
                .iter()
                .map(Token::value)
                .collect::<Vec<_>>()
                .join(" ");
            let width = compound.split(' ').count();
            return sequence.merge_multiword_tokens(
                [compound.as_str()],
                TokenType::CountyName,
                width,
            );
        }
        sequence.clone()
    }
}

/// Merges keyword-anchored runs into library names.
///
/// Every `LIBRARY_KEYWORD` occurrence extends backward and forward through
/// tokens that are unclassified or themselves keywords; the whole span
/// becomes one `LIBRARY_NAME` token. A keyword with nothing to extend over
/// is retyped on its own, so a bare "library" query still names a library.
#[derive(Debug, Clone)]
pub struct LibraryNameClassifier {
    lexicon: Lexicon,
}

impl LibraryNameClassifier {
    #[must_use]
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    fn is_keyword(&self, token: &Token) -> bool {
        token.kind() == Some(TokenType::LibraryKeyword)
            || self.lexicon.is_library_keyword(token.value())
    }

    fn extends_span(token: &Token) -> bool {
        token.is_unclassified() || token.kind() == Some(TokenType::LibraryKeyword)
    }
}

impl TokenClassifier for LibraryNameClassifier {
    fn name(&self) -> &'static str {
        "library_name"
    }

    fn work_to_do(&self, sequence: &TokenSequence) -> bool {
        sequence.iter().any(|token| self.is_keyword(token))
    }

    fn classify(&self, sequence: &TokenSequence) -> TokenSequence {
        if !self.work_to_do(sequence) {
            return sequence.clone();
        }
        let total = sequence.len();
        let mut out: Vec<Token> = Vec::with_capacity(total);
        let mut idx = 0;
        while idx < total {
            let token = &sequence[idx];
            if !self.is_keyword(token) {
                out.push(token.clone());
                idx += 1;
                continue;
            }

            // Pull already-emitted extendable tokens back off the output;
            // spans never reach across a previous merge because merged
            // library names do not extend.
            let mut leading: Vec<Token> = Vec::new();
            while matches!(out.last(), Some(prev) if Self::extends_span(prev)) {
                if let Some(prev) = out.pop() {
                    leading.push(prev);
                }
            }
            leading.reverse();

            let mut end = idx + 1;
            while end < total && Self::extends_span(&sequence[end]) {
                end += 1;
            }

            let compound = leading
                .iter()
                .chain(sequence[idx..end].iter())
                .map(Token::value)
                .collect::<Vec<_>>()
                .join(" ");
            out.push(Token::classified(compound, TokenType::LibraryName));
            idx = end;
        }
        TokenSequence::new(out)
    }
}

/// The classifier battery, in its fixed order.
///
/// Single words first (states and keywords anchor the later patterns), then
/// multi-word state names, then cities, then counties, with library names
/// last so a keyword never swallows a place token that another family would
/// have claimed. The battery repeats until the sequence is fully classified
/// or a complete pass changes nothing.
#[derive(Clone)]
pub struct ClassifierPipeline {
    classifiers: Arc<[BoxedClassifier]>,
}

impl ClassifierPipeline {
    /// The standard five-family battery over the given lexicon.
    #[must_use]
    pub fn standard(lexicon: &Lexicon) -> Self {
        Self::new(vec![
            Box::new(SingleWordClassifier::new(lexicon.clone())),
            Box::new(StateNameClassifier::new(lexicon.clone())),
            Box::new(CityNameClassifier::new(lexicon.clone())),
            Box::new(CountyNameClassifier::new(lexicon.clone())),
            Box::new(LibraryNameClassifier::new(lexicon.clone())),
        ])
    }

    /// A pipeline over a custom classifier list, applied in the given order.
    #[must_use]
    pub fn new(classifiers: Vec<BoxedClassifier>) -> Self {
        Self {
            classifiers: classifiers.into(),
        }
    }

    /// Runs the battery to its fixed point and returns the final sequence.
    #[must_use]
    pub fn classify(&self, sequence: &TokenSequence) -> TokenSequence {
        let mut current = sequence.clone();
        loop {
            if current.all_classified() {
                break;
            }
            let mut changed = false;
            for classifier in self.classifiers.iter() {
                if current.all_classified() {
                    break;
                }
                if !classifier.work_to_do(&current) {
                    continue;
                }
                let next = classifier.classify(&current);
                if next != current {
                    debug!(
                        classifier = classifier.name(),
                        tokens = %next,
                        "classifier updated sequence"
                    );
                    current = next;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        current
    }
}

impl fmt::Debug for ClassifierPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierPipeline")
            .field(
                "classifiers",
                &self
                    .classifiers
                    .iter()
                    .map(|c| c.name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::us_english()
    }

    fn words(values: &[&str]) -> TokenSequence {
        TokenSequence::from_words(values).expect("test words are non-empty")
    }

    fn typed(value: &str, kind: TokenType) -> Token {
        Token::with_kind(value, Some(kind)).expect("test token has text")
    }

    fn plain(value: &str) -> Token {
        Token::new(value).expect("test token has text")
    }

    fn kinds(sequence: &TokenSequence) -> Vec<(String, Option<TokenType>)> {
        sequence
            .iter()
            .map(|t| (t.value().to_owned(), t.kind()))
            .collect()
    }

    #[test]
    fn test_single_word_lexical_precedence() {
        let classifier = SingleWordClassifier::new(lexicon());
        let classified = classifier.classify(&words(&[
            "11212", "ny", "nevada", "library", "gibberish",
        ]));

        assert_eq!(
            kinds(&classified),
            [
                ("11212".to_owned(), Some(TokenType::Postcode)),
                ("ny".to_owned(), Some(TokenType::StateAbbr)),
                ("nevada".to_owned(), Some(TokenType::StateName)),
                ("library".to_owned(), Some(TokenType::LibraryKeyword)),
                ("gibberish".to_owned(), None),
            ]
        );
    }

    #[test]
    fn test_single_word_postcode_boundaries() {
        let classifier = SingleWordClassifier::new(lexicon());
        let cases = [
            ("1234", None),
            ("12345", Some(TokenType::Postcode)),
            ("123456", None),
            ("123456789", Some(TokenType::Postcode)),
            ("1234567890", None),
            ("1234a", None),
        ];
        for (word, expected) in cases {
            let classified = classifier.classify(&words(&[word]));
            assert_eq!(classified[0].kind(), expected, "classifying {word:?}");
        }
    }

    #[test]
    fn test_single_word_skips_multiword_and_classified() {
        let classifier = SingleWordClassifier::new(lexicon());
        let sequence = TokenSequence::new([
            plain("new york"),
            typed("ca", TokenType::CityName),
        ]);
        let classified = classifier.classify(&sequence);

        // "new york" is multi-word and the mistyped "ca" is already claimed.
        assert_eq!(classified, sequence);
    }

    #[test]
    fn test_state_name_classifier() {
        let classifier = StateNameClassifier::new(lexicon());

        let cases: &[(&[&str], &[(&str, Option<TokenType>)])] = &[
            (&["nevada"], &[("nevada", Some(TokenType::StateName))]),
            (&["new", "york"], &[("new york", Some(TokenType::StateName))]),
            (
                &["north", "carolina", "alpha"],
                &[
                    ("north carolina", Some(TokenType::StateName)),
                    ("alpha", None),
                ],
            ),
            (
                &["district", "of", "columbia"],
                &[("district of columbia", Some(TokenType::StateName))],
            ),
            (&["alpha", "bravo"], &[("alpha", None), ("bravo", None)]),
        ];
        for (input, expected) in cases {
            let classified = classifier.classify(&words(input));
            let got = kinds(&classified);
            let want: Vec<(String, Option<TokenType>)> = expected
                .iter()
                .map(|(v, k)| ((*v).to_owned(), *k))
                .collect();
            assert_eq!(got, want, "classifying {input:?}");
        }
    }

    #[test]
    fn test_state_single_word_claim_preempts_merge() {
        // "virginia" is a complete state name on its own, so the retype pass
        // claims it and "west virginia" never merges.
        let classifier = StateNameClassifier::new(lexicon());
        let classified = classifier.classify(&words(&["west", "virginia"]));
        assert_eq!(
            kinds(&classified),
            [
                ("west".to_owned(), None),
                ("virginia".to_owned(), Some(TokenType::StateName)),
            ]
        );
    }

    #[test]
    fn test_city_work_to_do() {
        let classifier = CityNameClassifier::new(lexicon());

        let no_work = [
            words(&["city"]),                       // single token
            words(&["alpha", "bravo"]),             // no trigger at all
            TokenSequence::new([
                typed("yreka", TokenType::CityName),
                typed("ca", TokenType::StateAbbr),
            ]),                                     // fully classified
        ];
        for sequence in &no_work {
            assert!(!classifier.work_to_do(sequence), "no work for {sequence}");
        }

        let work = [
            words(&["city", "of", "industry"]),
            TokenSequence::new([plain("yreka"), typed("ca", TokenType::StateAbbr)]),
            TokenSequence::new([plain("paradise"), plain("city")]),
        ];
        for sequence in &work {
            assert!(classifier.work_to_do(sequence), "work for {sequence}");
        }
    }

    #[test]
    fn test_city_of_pattern() {
        let classifier = CityNameClassifier::new(lexicon());

        let classified = classifier.classify(&words(&["city", "of", "industry"]));
        assert_eq!(
            kinds(&classified),
            [("city of industry".to_owned(), Some(TokenType::CityName))]
        );

        // The run after "of" extends to the next classified token.
        let sequence = TokenSequence::new([
            plain("city"),
            plain("of"),
            plain("bell"),
            plain("gardens"),
            typed("ca", TokenType::StateAbbr),
        ]);
        let classified = classifier.classify(&sequence);
        assert_eq!(
            kinds(&classified),
            [
                ("city of bell gardens".to_owned(), Some(TokenType::CityName)),
                ("ca".to_owned(), Some(TokenType::StateAbbr)),
            ]
        );
    }

    #[test]
    fn test_city_preceding_run_pattern() {
        let classifier = CityNameClassifier::new(lexicon());

        let classified = classifier.classify(&words(&["paradise", "city"]));
        assert_eq!(
            kinds(&classified),
            [("paradise city".to_owned(), Some(TokenType::CityName))]
        );

        let classified =
            classifier.classify(&words(&["wonderful", "multiword", "paradise", "city"]));
        assert_eq!(
            kinds(&classified),
            [(
                "wonderful multiword paradise city".to_owned(),
                Some(TokenType::CityName)
            )]
        );

        // "city" with a classified predecessor has no run to merge.
        let sequence = TokenSequence::new([typed("11212", TokenType::Postcode), plain("city")]);
        assert_eq!(classifier.classify(&sequence), sequence);
    }

    #[test]
    fn test_city_before_state_pattern() {
        let classifier = CityNameClassifier::new(lexicon());

        // A single preceding token is retyped, not merged.
        let sequence = TokenSequence::new([plain("yreka"), typed("ca", TokenType::StateAbbr)]);
        let classified = classifier.classify(&sequence);
        assert_eq!(
            kinds(&classified),
            [
                ("yreka".to_owned(), Some(TokenType::CityName)),
                ("ca".to_owned(), Some(TokenType::StateAbbr)),
            ]
        );

        // A longer run merges, and tokens before the run stay put.
        let sequence = TokenSequence::new([
            typed("12345", TokenType::Postcode),
            plain("los"),
            plain("angeles"),
            typed("ca", TokenType::StateAbbr),
        ]);
        let classified = classifier.classify(&sequence);
        assert_eq!(
            kinds(&classified),
            [
                ("12345".to_owned(), Some(TokenType::Postcode)),
                ("los angeles".to_owned(), Some(TokenType::CityName)),
                ("ca".to_owned(), Some(TokenType::StateAbbr)),
            ]
        );
    }

    #[test]
    fn test_city_pattern_families_do_not_fall_through() {
        let classifier = CityNameClassifier::new(lexicon());

        // "city" picks the preceding-run family; with no run to claim, the
        // state pattern must not fire as a substitute.
        let sequence = TokenSequence::new([
            plain("city"),
            plain("hall"),
            typed("ca", TokenType::StateAbbr),
        ]);
        assert_eq!(classifier.classify(&sequence), sequence);
    }

    #[test]
    fn test_city_defers_county_runs_to_county_classifier() {
        let classifier = CityNameClassifier::new(lexicon());
        let sequence = TokenSequence::new([
            plain("dekalb"),
            plain("county"),
            typed("ga", TokenType::StateAbbr),
        ]);
        assert_eq!(classifier.classify(&sequence), sequence);
    }

    #[test]
    fn test_county_classifier() {
        let classifier = CountyNameClassifier::new(lexicon());

        let sequence = TokenSequence::new([
            plain("dekalb"),
            plain("county"),
            typed("ga", TokenType::StateAbbr),
        ]);
        let classified = classifier.classify(&sequence);
        assert_eq!(
            kinds(&classified),
            [
                ("dekalb county".to_owned(), Some(TokenType::CountyName)),
                ("ga".to_owned(), Some(TokenType::StateAbbr)),
            ]
        );

        let classified = classifier.classify(&words(&["terrebonne", "parish"]));
        assert_eq!(
            kinds(&classified),
            [("terrebonne parish".to_owned(), Some(TokenType::CountyName))]
        );

        // A leading county word has no preceding run.
        let sequence = words(&["county", "roads"]);
        assert_eq!(classifier.classify(&sequence), sequence);

        assert!(!classifier.work_to_do(&words(&["alpha", "bravo"])));
        assert!(classifier.work_to_do(&words(&["washington", "county"])));
    }

    #[test]
    fn test_library_name_classifier() {
        let classifier = LibraryNameClassifier::new(lexicon());

        let sequence = TokenSequence::new([
            plain("alpha"),
            typed("library", TokenType::LibraryKeyword),
        ]);
        let classified = classifier.classify(&sequence);
        assert_eq!(
            kinds(&classified),
            [("alpha library".to_owned(), Some(TokenType::LibraryName))]
        );
    }

    #[test]
    fn test_library_name_spans_multiple_keywords() {
        let classifier = LibraryNameClassifier::new(lexicon());

        let sequence = TokenSequence::new([
            plain("springfield"),
            typed("public", TokenType::LibraryKeyword),
            typed("library", TokenType::LibraryKeyword),
            plain("system"),
        ]);
        let classified = classifier.classify(&sequence);
        assert_eq!(
            kinds(&classified),
            [(
                "springfield public library system".to_owned(),
                Some(TokenType::LibraryName)
            )]
        );
    }

    #[test]
    fn test_library_name_separate_spans() {
        let classifier = LibraryNameClassifier::new(lexicon());

        let sequence = TokenSequence::new([
            plain("alpha"),
            typed("library", TokenType::LibraryKeyword),
            typed("ny", TokenType::StateAbbr),
            plain("central"),
            typed("archive", TokenType::LibraryKeyword),
        ]);
        let classified = classifier.classify(&sequence);
        assert_eq!(
            kinds(&classified),
            [
                ("alpha library".to_owned(), Some(TokenType::LibraryName)),
                ("ny".to_owned(), Some(TokenType::StateAbbr)),
                ("central archive".to_owned(), Some(TokenType::LibraryName)),
            ]
        );
    }

    #[test]
    fn test_library_name_lone_keyword_is_retyped() {
        let classifier = LibraryNameClassifier::new(lexicon());

        let sequence =
            TokenSequence::new([typed("library", TokenType::LibraryKeyword)]);
        let classified = classifier.classify(&sequence);
        assert_eq!(
            kinds(&classified),
            [("library".to_owned(), Some(TokenType::LibraryName))]
        );
    }

    #[test]
    fn test_pipeline_scenarios() {
        let pipeline = ClassifierPipeline::standard(&lexicon());

        let cases: &[(&[&str], &[(&str, Option<TokenType>)])] = &[
            (&["11212"], &[("11212", Some(TokenType::Postcode))]),
            (
                &["alpha", "bravo", "charlie"],
                &[("alpha", None), ("bravo", None), ("charlie", None)],
            ),
            (&["new", "york"], &[("new york", Some(TokenType::StateName))]),
            (
                &["city", "of", "industry"],
                &[("city of industry", Some(TokenType::CityName))],
            ),
            (
                &["dekalb", "county", "ga"],
                &[
                    ("dekalb county", Some(TokenType::CountyName)),
                    ("ga", Some(TokenType::StateAbbr)),
                ],
            ),
            (
                &["alpha", "library"],
                &[("alpha library", Some(TokenType::LibraryName))],
            ),
            (
                &["library", "of", "congress"],
                &[("library of congress", Some(TokenType::LibraryName))],
            ),
            (
                &["12345", "los", "angeles", "ca"],
                &[
                    ("12345", Some(TokenType::Postcode)),
                    ("los angeles", Some(TokenType::CityName)),
                    ("ca", Some(TokenType::StateAbbr)),
                ],
            ),
        ];
        for (input, expected) in cases {
            let classified = pipeline.classify(&words(input));
            let got = kinds(&classified);
            let want: Vec<(String, Option<TokenType>)> = expected
                .iter()
                .map(|(v, k)| ((*v).to_owned(), *k))
                .collect();
            assert_eq!(got, want, "pipeline on {input:?}");
        }
    }

    #[test]
    fn test_pipeline_reaches_fixed_point() {
        let pipeline = ClassifierPipeline::standard(&lexicon());

        // The city classifier keeps reporting work here but can never act;
        // the pipeline must still terminate.
        let classified = pipeline.classify(&words(&["city", "hall", "ca"]));
        assert_eq!(
            kinds(&classified),
            [
                ("city".to_owned(), None),
                ("hall".to_owned(), None),
                ("ca".to_owned(), Some(TokenType::StateAbbr)),
            ]
        );
    }

    #[test]
    fn test_pipeline_is_idempotent_on_classified_input() {
        let pipeline = ClassifierPipeline::standard(&lexicon());

        let first = pipeline.classify(&words(&["dekalb", "county", "ga"]));
        let second = pipeline.classify(&first);
        assert_eq!(first, second);
    }

    #[test]
    fn test_pipeline_county_takes_entire_preceding_run() {
        let pipeline = ClassifierPipeline::standard(&lexicon());

        // The city pattern defers to the county word, which then claims the
        // whole open run in front of it.
        let classified = pipeline.classify(&words(&["houston", "harris", "county", "tx"]));
        assert_eq!(
            kinds(&classified),
            [
                (
                    "houston harris county".to_owned(),
                    Some(TokenType::CountyName)
                ),
                ("tx".to_owned(), Some(TokenType::StateAbbr)),
            ]
        );
    }

    #[test]
    fn test_pipeline_city_claims_token_before_merged_state() {
        let pipeline = ClassifierPipeline::standard(&lexicon());

        // The state merge has to land first; only then does "brooklyn" sit
        // directly in front of a state token.
        let classified = pipeline.classify(&words(&["brooklyn", "new", "york"]));
        assert_eq!(
            kinds(&classified),
            [
                ("brooklyn".to_owned(), Some(TokenType::CityName)),
                ("new york".to_owned(), Some(TokenType::StateName)),
            ]
        );
    }
}
