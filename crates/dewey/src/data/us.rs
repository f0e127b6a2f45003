//! Embedded US-English reference tables.
//!
//! These back [`Lexicon::us_english`](super::Lexicon::us_english). Entries
//! are stored lowercase because classification runs over the cleaned
//! (lowercased) search string.

/// Two-letter USPS state and territory abbreviations.
pub(super) const STATE_ABBREVIATIONS: &[&str] = &[
    "al", "ak", "as", "az", "ar", "ca", "co", "ct", "de", "dc", "fl", "fm", "ga", "gu", "hi",
    "id", "il", "in", "ia", "ks", "ky", "la", "me", "md", "ma", "mh", "mi", "mn", "ms", "mo",
    "mp", "mt", "ne", "nv", "nh", "nj", "nm", "ny", "nc", "nd", "oh", "ok", "or", "pa", "pr",
    "pw", "ri", "sc", "sd", "tn", "tx", "ut", "vt", "va", "vi", "wa", "wv", "wi", "wy",
];

/// Full state names, including the multi-word ones the state-name merge
/// relies on.
pub(super) const STATE_NAMES: &[&str] = &[
    "alabama",
    "alaska",
    "arizona",
    "arkansas",
    "california",
    "colorado",
    "connecticut",
    "delaware",
    "district of columbia",
    "florida",
    "georgia",
    "hawaii",
    "idaho",
    "illinois",
    "indiana",
    "iowa",
    "kansas",
    "kentucky",
    "louisiana",
    "maine",
    "maryland",
    "massachusetts",
    "michigan",
    "minnesota",
    "mississippi",
    "missouri",
    "montana",
    "nebraska",
    "nevada",
    "new hampshire",
    "new jersey",
    "new mexico",
    "new york",
    "north carolina",
    "north dakota",
    "ohio",
    "oklahoma",
    "oregon",
    "pennsylvania",
    "puerto rico",
    "rhode island",
    "south carolina",
    "south dakota",
    "tennessee",
    "texas",
    "utah",
    "vermont",
    "virginia",
    "washington",
    "west virginia",
    "wisconsin",
    "wyoming",
];

/// Words that mark a token run as (part of) a library name.
pub(super) const LIBRARY_KEYWORDS: &[&str] = &[
    "archive",
    "bookmobile",
    "college",
    "free",
    "library",
    "memorial",
    "public",
    "regional",
    "research",
    "university",
];

/// Words that mark the end of a county-style place name.
pub(super) const COUNTY_WORDS: &[&str] = &["county", "parish"];

/// Whole-word misspelling corrections applied during normalization.
pub(super) const COMMON_MISSPELLINGS: &[(&str, &str)] = &[("libary", "library")];
