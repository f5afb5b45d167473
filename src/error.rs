//! # Error Handling
//!
//! This module defines the centralized error type for the `app-jre` library.
//! It uses the `thiserror` library to create an `Error` enum that covers every
//! failure mode of the image pipeline, with enough context to tell which stage
//! went wrong and what the user can do about it.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. The four stage variants (`Extraction`,
//!   `Analysis`, `FilterConfig`, `Link`) map one-to-one onto the pipeline
//!   stages; the remaining variants cover configuration loading and wrapped
//!   library errors.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Stage variants carry a `message` and an optional `hint`. Hints are printed
//! on their own line underneath the message.

use thiserror::Error;

fn render_hint(hint: &Option<String>) -> String {
    hint.as_ref()
        .map(|h| format!("\n  hint: {}", h))
        .unwrap_or_default()
}

/// Main error type for app-jre operations
#[derive(Error, Debug)]
pub enum Error {
    /// The `.app-jre.yaml` configuration file or a CLI override is invalid.
    #[error("Configuration error: {message}{}", render_hint(hint))]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The bundle could not be opened or the working directory could not be
    /// written.
    #[error("Extraction error for {bundle}: {message}{}", render_hint(hint))]
    Extraction {
        bundle: String,
        message: String,
        hint: Option<String>,
    },

    /// The analysis classpath could not be read or the dependency analyzer
    /// exited with a failure.
    ///
    /// Unresolvable symbols never produce this error.
    #[error("Analysis error: {message}{}", render_hint(hint))]
    Analysis {
        message: String,
        hint: Option<String>,
    },

    /// A module name or exclusion rule is malformed.
    #[error("Module filter configuration error: {message}{}", render_hint(hint))]
    FilterConfig {
        message: String,
        hint: Option<String>,
    },

    /// The runtime image could not be linked.
    #[error("Link error: {message}{}", render_hint(hint))]
    Link {
        message: String,
        hint: Option<String>,
    },

    /// A pipeline was driven out of order.
    #[error("Invalid pipeline state: {message}")]
    InvalidState { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Shorthand for a `FilterConfig` error without a hint.
    pub fn filter_config(message: impl Into<String>) -> Self {
        Error::FilterConfig {
            message: message.into(),
            hint: None,
        }
    }

    /// Shorthand for a `Link` error without a hint.
    pub fn link(message: impl Into<String>) -> Self {
        Error::Link {
            message: message.into(),
            hint: None,
        }
    }

    /// Shorthand for an `Analysis` error without a hint.
    pub fn analysis(message: impl Into<String>) -> Self {
        Error::Analysis {
            message: message.into(),
            hint: None,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
