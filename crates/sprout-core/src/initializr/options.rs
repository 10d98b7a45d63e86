//! Project generation options

use super::metadata::Metadata;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters sent to `starter.zip`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectOptions {
    pub artifact_id: String,
    pub boot_version: String,
    pub dependencies: Vec<String>,
    pub description: String,
    pub group_id: String,
    pub java_version: String,
    pub language: String,
    pub name: String,
    pub package_name: String,
    pub packaging: String,
    #[serde(rename = "type")]
    pub project_type: String,
    pub version: String,
}

impl ProjectOptions {
    /// Options pre-filled with the service defaults and no dependencies
    pub fn from_metadata(metadata: &Metadata) -> Self {
        Self {
            artifact_id: metadata.artifact_id.default.clone(),
            boot_version: metadata.boot_version.default.clone(),
            dependencies: Vec::new(),
            description: metadata.description.default.clone(),
            group_id: metadata.group_id.default.clone(),
            java_version: metadata.java_version.default.clone(),
            language: metadata.language.default.clone(),
            name: metadata.name.default.clone(),
            package_name: metadata.package_name.default.clone(),
            packaging: metadata.packaging.default.clone(),
            project_type: metadata.project_type.default.clone(),
            version: metadata.version.default.clone(),
        }
    }

    /// Load options from a JSON or YAML file (chosen by extension, JSON otherwise)
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        if is_yaml {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse options from {}", path.display()))
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse options from {}", path.display()))
        }
    }

    /// Fill empty fields from the metadata defaults.
    ///
    /// An empty `name` falls back to the artifact id and an empty package name
    /// to `groupId.artifactId`, matching what the prompts suggest.
    pub fn merge_defaults(&mut self, metadata: &Metadata) {
        fn fill(field: &mut String, default: &str) {
            if field.is_empty() {
                *field = default.to_string();
            }
        }

        fill(&mut self.group_id, &metadata.group_id.default);
        fill(&mut self.artifact_id, &metadata.artifact_id.default);
        fill(&mut self.boot_version, &metadata.boot_version.default);
        fill(&mut self.description, &metadata.description.default);
        fill(&mut self.java_version, &metadata.java_version.default);
        fill(&mut self.language, &metadata.language.default);
        fill(&mut self.packaging, &metadata.packaging.default);
        fill(&mut self.project_type, &metadata.project_type.default);
        fill(&mut self.version, &metadata.version.default);

        let artifact_id = self.artifact_id.clone();
        fill(&mut self.name, &artifact_id);
        fill(&mut self.name, &metadata.name.default);

        if let Some(package_name) = self.derived_package_name() {
            fill(&mut self.package_name, &package_name);
        }
        fill(&mut self.package_name, &metadata.package_name.default);
    }

    /// `groupId.artifactId`, when both are set.
    ///
    /// Dashes are not valid in Java package names and are dropped.
    pub fn derived_package_name(&self) -> Option<String> {
        if self.group_id.is_empty() || self.artifact_id.is_empty() {
            return None;
        }
        Some(format!("{}.{}", self.group_id, self.artifact_id).replace('-', ""))
    }

    /// Non-empty parameters as query pairs, dependencies comma-joined
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let pairs = [
            ("type", self.project_type.clone()),
            ("language", self.language.clone()),
            ("bootVersion", self.boot_version.clone()),
            ("groupId", self.group_id.clone()),
            ("artifactId", self.artifact_id.clone()),
            ("name", self.name.clone()),
            ("version", self.version.clone()),
            ("description", self.description.clone()),
            ("packageName", self.package_name.clone()),
            ("packaging", self.packaging.clone()),
            ("javaVersion", self.java_version.clone()),
            ("dependencies", self.dependencies.join(",")),
        ];

        pairs
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .collect()
    }

    /// Requested dependency ids that are unknown or not usable with `boot_version`
    pub fn incompatible_dependencies(&self, metadata: &Metadata) -> Vec<String> {
        self.dependencies
            .iter()
            .filter(|id| {
                metadata
                    .dependencies
                    .find(id)
                    .map_or(true, |value| !value.is_compatible_with(&self.boot_version))
            })
            .cloned()
            .collect()
    }
}
