//! Spring Initializr integration
//!
//! This module provides:
//! - Metadata types describing the project form
//! - Project options and their query encoding
//! - An HTTP client for metadata and `starter.zip`
//! - Writing the generated archive to disk

pub mod client;
pub mod generate;
pub mod metadata;
pub mod options;

use anyhow::Result;
use colored::Colorize;

pub use client::InitializrClient;
pub use generate::{write_project, GeneratedProject, OutputMode};
pub use metadata::{
    Metadata, MetadataGroup, MetadataMultiSelect, MetadataSelect, MetadataText, MetadataType,
    MetadataValue,
};
pub use options::ProjectOptions;

/// Print the dependency catalogue for a Spring Boot version
///
/// Uses the service's default Spring Boot version when `boot_version` is `None`.
/// Incompatible dependencies are hidden unless `show_all` is set, in which
/// case they are listed with their version range.
pub async fn list_dependencies(
    client: &InitializrClient,
    boot_version: Option<&str>,
    show_all: bool,
) -> Result<()> {
    let metadata = client.fetch_metadata().await?;
    let boot_version = boot_version.unwrap_or(&metadata.boot_version.default);

    println!(
        "{}",
        format!("Dependencies for Spring Boot {}", boot_version)
            .cyan()
            .bold()
    );

    let mut compatible = 0;
    let mut hidden = 0;

    for group in &metadata.dependencies.values {
        let lines: Vec<String> = group
            .values
            .iter()
            .filter_map(|value| {
                if value.is_compatible_with(boot_version) {
                    compatible += 1;
                    Some(format!("  {} {}", "->".blue(), dependency_line(value)))
                } else if show_all {
                    let mut line =
                        format!("  {} {}", "x ".red(), dependency_line(value).dimmed());
                    if value.has_version_range() {
                        let requires = format!("requires {}", value.version_range);
                        line = format!("{} {}", line, requires.yellow());
                    }
                    Some(line)
                } else {
                    hidden += 1;
                    None
                }
            })
            .collect();

        if lines.is_empty() {
            continue;
        }

        println!();
        println!("{}", group.name.bold());
        for line in lines {
            println!("{}", line);
        }
    }

    println!();
    print!("{} {} compatible", "Found".green().bold(), compatible);
    if hidden > 0 {
        print!(" ({} hidden, use --all to show them)", hidden);
    }
    println!();

    Ok(())
}

fn dependency_line(value: &MetadataValue) -> String {
    format!("{} ({})", value.name, value.id)
}
