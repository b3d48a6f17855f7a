use thiserror::Error as ThisError;

pub type Result<T> = core::result::Result<T, Error>;

/// Failures surfaced by the HTTP client, fetchers and controllers.
///
/// The type is `Clone` because a copy of the last error lives inside every
/// published `FetchState` snapshot.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// The backend could not be reached (connect, DNS, reset, ...)
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status
    #[error("HTTP {status}: {body_text}")]
    HttpStatus { status: u16, body_text: String },

    /// First member of a joined fetch set to fail
    #[error("aggregate member `{member}` failed: {source}")]
    Aggregate {
        member: String,
        #[source]
        source: Box<Error>,
    },

    /// Request body could not be serialized
    #[error("failed to encode request body: {0}")]
    Encode(String),

    /// Invalid client configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("{0} already initialized")]
    AlreadyInitialized(&'static str),
}

impl Error {
    #[must_use]
    pub fn aggregate(member: &str, source: Self) -> Self {
        Self::Aggregate {
            member: member.to_string(),
            source: Box::new(source),
        }
    }

    /// HTTP status carried by this error, looking through aggregate wrappers
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Aggregate { source, .. } => source.status(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_network(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Aggregate { source, .. } => source.is_network(),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err.to_string())
    }
}
