//! Error types for ingestion.

use thiserror::Error;

/// Errors raised while loading, splitting and indexing documents.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Filesystem failures.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A PDF or DOCX could not be turned into text.
    #[error("Text extraction error: {message}")]
    TextExtraction {
        /// Detailed error message
        message: String,
    },

    /// The splitter rejected its settings.
    #[error("Text splitting error: {message}")]
    TextSplitting {
        /// Detailed error message
        message: String,
    },

    /// Extension outside `.pdf`, `.txt`, `.docx`.
    #[error("Unsupported file format: {format}")]
    UnsupportedFormat {
        /// The offending extension or path
        format: String,
    },

    /// A single file that does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Missing path
        path: String,
    },

    /// The data folder does not exist.
    #[error("Directory not found: {path}")]
    DirectoryNotFound {
        /// Missing path
        path: String,
    },

    /// The data folder exists but holds nothing.
    #[error("Directory is empty: {path}")]
    EmptyDirectory {
        /// Empty folder
        path: String,
    },

    /// Nothing could be loaded from the data folder.
    #[error("No documents were loaded from {path}; add PDF, TXT or DOCX files")]
    NoDocuments {
        /// Data folder
        path: String,
    },

    /// Invalid settings.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Detailed error message
        message: String,
    },

    /// Embedding or storage failures surfaced from the core traits.
    #[error("Core error: {0}")]
    Core(#[from] sungbat_core::SungbatError),
}

/// Result alias for ingestion.
pub type Result<T> = std::result::Result<T, IndexingError>;

impl IndexingError {
    /// Create a text extraction error.
    pub fn text_extraction<S: Into<String>>(message: S) -> Self {
        Self::TextExtraction {
            message: message.into(),
        }
    }

    /// Create a text splitting error.
    pub fn text_splitting<S: Into<String>>(message: S) -> Self {
        Self::TextSplitting {
            message: message.into(),
        }
    }

    /// Create an unsupported format error.
    pub fn unsupported_format<S: Into<String>>(format: S) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Create a file not found error.
    pub fn file_not_found<S: Into<String>>(path: S) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a directory not found error.
    pub fn directory_not_found<S: Into<String>>(path: S) -> Self {
        Self::DirectoryNotFound { path: path.into() }
    }

    /// Create a configuration error.
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl From<IndexingError> for sungbat_core::SungbatError {
    fn from(err: IndexingError) -> Self {
        match err {
            IndexingError::Io(e) => Self::Io(e),
            IndexingError::Core(e) => e,
            IndexingError::Configuration { message } => Self::Configuration { message },
            IndexingError::FileNotFound { path } | IndexingError::DirectoryNotFound { path } => {
                Self::NotFound { resource: path }
            }
            IndexingError::EmptyDirectory { .. } | IndexingError::NoDocuments { .. } => {
                Self::Configuration {
                    message: err.to_string(),
                }
            }
            _ => Self::pipeline(err.to_string()),
        }
    }
}
