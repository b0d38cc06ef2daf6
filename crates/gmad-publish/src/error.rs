//! Error types for the publish boundary

use thiserror::Error;

/// Errors that can occur while preparing or submitting a publish request
#[derive(Error, Debug)]
pub enum PublishError {
    /// The addon package could not be read
    #[error("addon package error: {0}")]
    Format(#[from] gmad_formats::gma::GmaError),

    /// Remote storage did not accept an upload
    #[error("remote storage rejected upload of '{name}'")]
    UploadRejected {
        /// Cloud file name of the rejected upload
        name: String,
    },

    /// The remote service reported a failure
    #[error("remote service error: {0}")]
    Remote(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for publish operation results
pub type Result<T> = std::result::Result<T, PublishError>;
