//! Error types for pdfstack.
//!
//! Collection misuse, merge failures and file system problems all surface as
//! a single [`Error`]. Page counting failures are not errors: they are folded
//! into [`PageCount::Unknown`](crate::collection::PageCount::Unknown) and only
//! logged.

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfstack operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pdfstack operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// None of the offered files declared a PDF media type.
    #[error("No PDF files among the selection ({rejected} file(s) ignored)")]
    InvalidInput {
        /// Number of files that were rejected.
        rejected: usize,
    },

    /// A list position does not exist.
    #[error("Position {index} is out of range (collection holds {len} item(s))")]
    IndexOutOfRange {
        /// Requested zero-based position.
        index: usize,
        /// Collection length at the time of the call.
        len: usize,
    },

    /// An item id is not (or no longer) part of the collection.
    #[error("No item with id {id} in the collection")]
    UnknownItem {
        /// The missing id.
        id: u64,
    },

    /// Fewer than two sources were handed to the merge pipeline.
    #[error("Select at least 2 PDF files to merge (got {count})")]
    InsufficientInput {
        /// Number of sources supplied.
        count: usize,
    },

    /// A source could not be opened while merging.
    #[error("Failed to open source #{} ({name}) while merging\n  Reason: {reason}", .index + 1)]
    SourceUnreadable {
        /// Zero-based position of the source in the merge snapshot.
        index: usize,
        /// Display name of the source.
        name: String,
        /// Parser message.
        reason: String,
    },

    /// The merged document could not be serialized.
    #[error("Failed to assemble the merged PDF: {reason}")]
    SerializationFailed {
        /// Underlying failure.
        reason: String,
    },

    /// A merge was requested while another one is still running.
    #[error("A merge is already in progress")]
    JobInProgress,

    /// Files were added outside a tokio runtime, so their pages cannot be counted.
    #[error("Adding files requires a running tokio runtime")]
    NoRuntime,

    /// Input file was not found.
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {}", .path.display())]
    NotAFile {
        /// Offending path.
        path: PathBuf,
    },

    /// Input file is not accessible (permission denied, etc.).
    #[error("Cannot access file: {}\n  Reason: {source}", .path.display())]
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  Use --force to overwrite or choose a different name",
        .path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", .path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", .path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// A session command could not be understood.
    #[error("Invalid command: {message}")]
    InvalidCommand {
        /// Description of the problem, usually with a usage hint.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl Error {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create a SourceUnreadable error.
    pub fn source_unreadable(index: usize, name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceUnreadable {
            index,
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationFailed error.
    pub fn serialization_failed(reason: impl Into<String>) -> Self {
        Self::SerializationFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an InvalidCommand error.
    pub fn invalid_command(message: impl Into<String>) -> Self {
        Self::InvalidCommand {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error came from misusing the collection or the session.
    ///
    /// The interactive session reports these and keeps running.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. }
                | Self::IndexOutOfRange { .. }
                | Self::UnknownItem { .. }
                | Self::InsufficientInput { .. }
                | Self::InvalidCommand { .. }
        )
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput { .. } => 1,
            Self::IndexOutOfRange { .. } => 1,
            Self::UnknownItem { .. } => 1,
            Self::InsufficientInput { .. } => 1,
            Self::SourceUnreadable { .. } => 3,
            Self::SerializationFailed { .. } => 6,
            Self::JobInProgress => 6,
            Self::NoRuntime => 6,
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FileNotAccessible { .. } => 2,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::InvalidConfig { .. } => 1,
            Self::InvalidCommand { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
