//! Sprout Core - Spring project generation from a Spring Initializr instance
//!
//! This library provides the pieces behind the `sprout` CLI: it reads the
//! project form published by a Spring Initializr service, decides which
//! dependencies fit the chosen Spring Boot version, and unpacks the generated
//! `starter.zip`.
//!
//! # Architecture
//!
//! - **Layer 1: Version Ordering** - Spring version comparison and range checks ([`version`])
//! - **Layer 2: Service Access** - Metadata, options, HTTP client and archive writing ([`initializr`])
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use sprout_core::{InitializrClient, InitializrConfig, ProjectOptions};
//!
//! let client = InitializrClient::new(InitializrConfig::default());
//! let metadata = client.fetch_metadata().await?;
//!
//! let mut options = ProjectOptions::from_metadata(&metadata);
//! options.dependencies = metadata
//!     .dependencies
//!     .compatible_values(&options.boot_version)
//!     .iter()
//!     .filter(|v| v.id == "web")
//!     .map(|v| v.id.clone())
//!     .collect();
//!
//! let archive = client.download_starter(&options).await?;
//! ```

pub mod config;
pub mod error;
pub mod initializr;
pub mod version;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::InitializrConfig;
pub use error::InitializrError;
pub use initializr::{
    list_dependencies, write_project, GeneratedProject, InitializrClient, Metadata, OutputMode,
    ProjectOptions,
};
pub use version::{compare, extract_qualifier, satisfies, Qualifier, VersionRange};

#[cfg(feature = "tui")]
pub use tui::run;
