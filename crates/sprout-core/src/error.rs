//! Errors raised while talking to a Spring Initializr instance or writing its output

use std::path::PathBuf;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum InitializrError {
    #[error("Invalid Spring Initializr URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("URL cannot have path segments: {0}")]
    CannotBeABase(Url),

    #[error("Request to {url} failed: HTTP {status}")]
    HttpStatus {
        url: Url,
        status: reqwest::StatusCode,
    },

    #[error("'{}' already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Project name '{0}' must be a single path component")]
    InvalidProjectName(String),

    #[error("Archive entry '{0}' points outside the project directory")]
    UnsafeEntry(String),

    #[error("Dependencies not available for Spring Boot {boot_version}: {}", .ids.join(", "))]
    IncompatibleDependencies {
        boot_version: String,
        ids: Vec<String>,
    },
}
