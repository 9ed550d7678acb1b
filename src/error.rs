use std::path::PathBuf;

use thiserror::Error;

/// Failures of a single post creation. Dismissed prompts are not errors.
#[derive(Error, Debug)]
pub(crate) enum PostError {
    #[error("Title is required.")]
    EmptyTitle,

    #[error("No workspace folder open")]
    NoWorkspace,

    #[error("Failed to create directory {path:?}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write post {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Created {path:?} but could not open it: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Custom field key cannot be empty if value \"{value}\" is provided.")]
    CustomFieldKeyMissing { value: String },
}
