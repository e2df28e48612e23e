// --- File: crates/tourly_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared across Tourly crates.
///
/// Feature crates define their own error enums for domain failures; this
/// type covers the cross-cutting cases (transport, parsing, configuration,
/// upstream services) and gives them a uniform HTTP mapping.
#[derive(Error, Debug)]
pub enum TourlyError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a timeout
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
///
/// Implemented by error types that cross the HTTP boundary so handlers can
/// map them uniformly.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for TourlyError {
    fn status_code(&self) -> u16 {
        match self {
            TourlyError::HttpError(_) => 500,
            TourlyError::ParseError(_) => 400,
            TourlyError::ConfigError(_) => 500,
            TourlyError::ExternalServiceError { .. } => 502,
            TourlyError::TimeoutError(_) => 504,
            TourlyError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for TourlyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TourlyError::TimeoutError(err.to_string())
        } else {
            TourlyError::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TourlyError {
    fn from(err: serde_json::Error) -> Self {
        TourlyError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for TourlyError {
    fn from(err: std::io::Error) -> Self {
        TourlyError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> TourlyError {
    TourlyError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}
