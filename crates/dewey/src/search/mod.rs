//! Search execution: turning a selected strategy into ranked results.

pub use error::SearchError;
pub(crate) mod strategies;

use serde::{Deserialize, Serialize};

use crate::datastore::LibraryRecord;

mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum SearchError {
        #[error("datastore error: {0}")]
        Datastore(#[from] crate::datastore::DatastoreError),
    }
    pub type Result<T> = std::result::Result<T, SearchError>;
}

/// One ranked result: a library and, when the strategy computed one, a
/// distance in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub library: LibraryRecord,
    pub distance_m: Option<f64>,
}

pub type SearchHits = Vec<SearchHit>;
