use thiserror::Error;

/// Failures of index construction, persistence, and query answering.
///
/// A query whose every token is absent from the corpus is *not* an error:
/// its ranking is defined as empty and `answer` returns `Ok` with no hits.
#[derive(Debug, Error)]
pub enum Error {
    /// `finalize` was called before any document was ingested.
    #[error("cannot finalize an index over an empty corpus")]
    EmptyCorpus,

    /// The query tokenized to nothing, so there is no maximum occurrence
    /// count to normalize term frequencies by.
    #[error("query contains no tokens after tokenization")]
    EmptyQuery,

    /// The persisted index is missing required fields or structurally
    /// invalid.
    #[error("malformed index: {reason}")]
    MalformedIndex { reason: String },

    /// An underlying I/O operation failed while reading or writing an index.
    #[error("i/o failure while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io { context: context.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
