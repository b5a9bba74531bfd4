//! Error types for the editor

use sprout_language::LanguageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Language error: {0}")]
    Language(#[from] LanguageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("{0} cannot be the root of a document")]
    NotARootType(String),

    #[error("Document is not file-backed")]
    NotFileBacked,
}
