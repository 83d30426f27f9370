// ⚠️ Error types - the only failures that ever reach a caller
//
// Everything else in the pipeline degrades to "show less data".

use std::path::PathBuf;

/// Loading the competitor CSV failed.
///
/// The dashboard never surfaces this to the analyst: it is logged and the
/// dataset falls back to empty.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read competitor data from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Login form validation. This is the one user-visible validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("Please enter both email and password")]
    MissingCredentials,
}
