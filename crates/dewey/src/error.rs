use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeweyError {
    #[error("Search error: {0}")]
    Search(#[from] crate::search::SearchError),
    #[error("Datastore error: {0}")]
    Datastore(#[from] crate::datastore::DatastoreError),
    #[error("Token error: {0}")]
    Token(#[from] crate::query::token::InvalidTokenError),
    #[error("Location error: {0}")]
    Location(#[from] crate::location::InvalidLocationError),
    #[error("Lexicon error: {0}")]
    Lexicon(#[from] crate::data::LexiconError),
    #[error("Init Logging error: {0}")]
    InitLogging(#[from] tracing_subscriber::filter::ParseError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DeweyError>;
