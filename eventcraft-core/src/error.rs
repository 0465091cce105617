//! Domain-specific error types for eventcraft

use thiserror::Error;

/// Errors raised by local work: configuration, files, images and archives
#[derive(Error, Debug)]
pub enum StudioError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Image error: {message}")]
    Image { message: String },

    #[error("Document error: {message}")]
    Document { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<std::io::Error> for StudioError {
    fn from(err: std::io::Error) -> Self {
        StudioError::Io { message: err.to_string() }
    }
}

impl From<image::ImageError> for StudioError {
    fn from(err: image::ImageError) -> Self {
        StudioError::Image { message: err.to_string() }
    }
}

impl From<zip::result::ZipError> for StudioError {
    fn from(err: zip::result::ZipError) -> Self {
        StudioError::Document { message: err.to_string() }
    }
}

impl From<quick_xml::Error> for StudioError {
    fn from(err: quick_xml::Error) -> Self {
        StudioError::Document { message: err.to_string() }
    }
}

impl From<serde_json::Error> for StudioError {
    fn from(err: serde_json::Error) -> Self {
        StudioError::Serialization { message: err.to_string() }
    }
}

/// Result type alias for eventcraft operations
pub type Result<T> = std::result::Result<T, StudioError>;
