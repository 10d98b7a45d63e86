//! Spring Initializr metadata types
//!
//! The service describes its web form as JSON: text fields, single selects and
//! one hierarchical multi-select for dependencies. See
//! <https://docs.spring.io/initializr/docs/current/reference/html/#api-guide>.

use crate::version;
use serde::{Deserialize, Serialize};

/// Kind of form element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetadataType {
    Action,
    HierarchicalMultiSelect,
    SingleSelect,
    Text,
    #[default]
    #[serde(other)]
    Other,
}

/// Root metadata document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    pub artifact_id: MetadataText,
    pub boot_version: MetadataSelect,
    pub dependencies: MetadataMultiSelect,
    pub description: MetadataText,
    pub group_id: MetadataText,
    pub java_version: MetadataSelect,
    pub language: MetadataSelect,
    pub name: MetadataText,
    pub package_name: MetadataText,
    pub packaging: MetadataSelect,
    #[serde(rename = "type")]
    pub project_type: MetadataSelect,
    pub version: MetadataText,
}

/// Free-text field with a default
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataText {
    #[serde(rename = "type")]
    pub kind: MetadataType,
    pub default: String,
}

/// Single choice among `values`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataSelect {
    #[serde(rename = "type")]
    pub kind: MetadataType,
    pub default: String,
    pub values: Vec<MetadataValue>,
}

impl MetadataSelect {
    /// Index of the default value, if it is one of the choices
    pub fn default_index(&self) -> Option<usize> {
        self.values.iter().position(|v| v.id == self.default)
    }

    pub fn find(&self, id: &str) -> Option<&MetadataValue> {
        self.values.iter().find(|v| v.id == id)
    }
}

/// Grouped multiple choice (dependencies)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataMultiSelect {
    #[serde(rename = "type")]
    pub kind: MetadataType,
    pub values: Vec<MetadataGroup>,
}

impl MetadataMultiSelect {
    /// All values across every group
    pub fn all_values(&self) -> impl Iterator<Item = &MetadataValue> {
        self.values.iter().flat_map(|group| group.values.iter())
    }

    /// Values usable with `boot_version`, sorted by display name
    pub fn compatible_values(&self, boot_version: &str) -> Vec<&MetadataValue> {
        let mut values: Vec<&MetadataValue> = self
            .all_values()
            .filter(|value| value.is_compatible_with(boot_version))
            .collect();
        values.sort_by(|a, b| a.name.cmp(&b.name));
        values
    }

    pub fn find(&self, id: &str) -> Option<&MetadataValue> {
        self.all_values().find(|value| value.id == id)
    }
}

/// Named group of values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataGroup {
    pub name: String,
    pub values: Vec<MetadataValue>,
}

/// A single choice
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetadataValue {
    pub id: String,
    pub name: String,
    pub description: String,
    pub version_range: String,
}

impl MetadataValue {
    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }

    pub fn has_version_range(&self) -> bool {
        !self.version_range.is_empty()
    }

    /// Whether this value may be selected alongside `boot_version`
    pub fn is_compatible_with(&self, boot_version: &str) -> bool {
        version::satisfies(boot_version, &self.version_range)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Trimmed-down response from start.spring.io
    pub(crate) const SAMPLE_METADATA: &str = r#"{
        "_links": { "maven-project": { "href": "https://start.spring.io/pom.xml" } },
        "dependencies": {
            "type": "hierarchical-multi-select",
            "values": [
                {
                    "name": "Web",
                    "values": [
                        { "id": "web", "name": "Spring Web", "description": "Build web applications." },
                        { "id": "webflux", "name": "Spring Reactive Web" }
                    ]
                },
                {
                    "name": "Developer Tools",
                    "values": [
                        {
                            "id": "native",
                            "name": "GraalVM Native Support",
                            "versionRange": "[3.0.0,3.4.0-M1)"
                        },
                        {
                            "id": "legacy-starter",
                            "name": "Legacy Starter",
                            "versionRange": "[2.5.0,3.0.0-M1)"
                        },
                        { "id": "broken", "name": "Broken Range", "versionRange": "3.0.0" }
                    ]
                }
            ]
        },
        "type": {
            "type": "action",
            "default": "maven-project",
            "values": [
                { "id": "gradle-project", "name": "Gradle - Groovy", "action": "/starter.zip" },
                { "id": "maven-project", "name": "Maven", "action": "/starter.zip" }
            ]
        },
        "packaging": {
            "type": "single-select",
            "default": "jar",
            "values": [ { "id": "jar", "name": "Jar" }, { "id": "war", "name": "War" } ]
        },
        "javaVersion": {
            "type": "single-select",
            "default": "17",
            "values": [ { "id": "21", "name": "21" }, { "id": "17", "name": "17" } ]
        },
        "language": {
            "type": "single-select",
            "default": "java",
            "values": [ { "id": "java", "name": "Java" }, { "id": "kotlin", "name": "Kotlin" } ]
        },
        "bootVersion": {
            "type": "single-select",
            "default": "3.3.4",
            "values": [
                { "id": "3.4.0-SNAPSHOT", "name": "3.4.0 (SNAPSHOT)" },
                { "id": "3.4.0-M3", "name": "3.4.0 (M3)" },
                { "id": "3.3.4", "name": "3.3.4" },
                { "id": "2.7.18", "name": "2.7.18" }
            ]
        },
        "groupId": { "type": "text", "default": "com.example" },
        "artifactId": { "type": "text", "default": "demo" },
        "version": { "type": "text", "default": "0.0.1-SNAPSHOT" },
        "name": { "type": "text", "default": "demo" },
        "description": { "type": "text", "default": "Demo project for Spring Boot" },
        "packageName": { "type": "text", "default": "com.example.demo" }
    }"#;

    pub(crate) fn sample_metadata() -> Metadata {
        serde_json::from_str(SAMPLE_METADATA).unwrap()
    }

    #[test]
    fn test_parse_sample_metadata() {
        let metadata = sample_metadata();
        assert_eq!(metadata.project_type.kind, MetadataType::Action);
        assert_eq!(metadata.boot_version.kind, MetadataType::SingleSelect);
        assert_eq!(
            metadata.dependencies.kind,
            MetadataType::HierarchicalMultiSelect
        );
        assert_eq!(metadata.group_id.kind, MetadataType::Text);
        assert_eq!(metadata.boot_version.default, "3.3.4");
        assert_eq!(metadata.dependencies.values.len(), 2);
        assert_eq!(metadata.package_name.default, "com.example.demo");
    }

    #[test]
    fn test_missing_fields_default() {
        let metadata: Metadata =
            serde_json::from_str(r#"{ "groupId": { "type": "surprise", "default": "org.acme" } }"#)
                .unwrap();
        assert_eq!(metadata.group_id.kind, MetadataType::Other);
        assert_eq!(metadata.group_id.default, "org.acme");
        assert!(metadata.boot_version.values.is_empty());
        assert!(metadata.dependencies.values.is_empty());
    }

    #[test]
    fn test_default_index() {
        let metadata = sample_metadata();
        assert_eq!(metadata.boot_version.default_index(), Some(2));
        assert_eq!(metadata.project_type.default_index(), Some(1));

        let select = MetadataSelect {
            default: "missing".to_string(),
            ..metadata.packaging.clone()
        };
        assert_eq!(select.default_index(), None);
    }

    #[test]
    fn test_value_helpers() {
        let metadata = sample_metadata();
        let web = metadata.dependencies.find("web").unwrap();
        assert!(web.has_description());
        assert!(!web.has_version_range());

        let native = metadata.dependencies.find("native").unwrap();
        assert!(!native.has_description());
        assert!(native.has_version_range());
        assert!(native.is_compatible_with("3.3.4"));
        assert!(!native.is_compatible_with("3.4.0-SNAPSHOT"));
    }

    #[test]
    fn test_compatible_values_filtered_and_sorted() {
        let metadata = sample_metadata();

        let names: Vec<&str> = metadata
            .dependencies
            .compatible_values("3.3.4")
            .iter()
            .map(|v| v.name.as_str())
            .collect();
        assert_eq!(
            names,
            ["GraalVM Native Support", "Spring Reactive Web", "Spring Web"]
        );

        let ids: Vec<&str> = metadata
            .dependencies
            .compatible_values("2.7.18")
            .iter()
            .map(|v| v.id.as_str())
            .collect();
        assert_eq!(ids, ["legacy-starter", "webflux", "web"]);
    }

    #[test]
    fn test_milestone_boot_version_excluded_by_milestone_upper_bound() {
        let metadata = sample_metadata();
        let native = metadata.dependencies.find("native").unwrap();
        // 3.4.0-M3 ties numerically with the 3.4.0-M1 bound, and M ranks equal to M
        assert!(!native.is_compatible_with("3.4.0-M3"));
    }
}
