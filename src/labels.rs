//! Per-task label schema.
//!
//! Labels populate the attribute side panel's selector. Schemas are normally
//! fetched per task from the external collaborator; this module also loads
//! them from YAML for offline use, with the same fallback chain the rest of
//! the configuration uses.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, WorkspaceError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,
}

/// A node in an optional label hierarchy. Leaves carry a label name; interior
/// nodes only group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelNode {
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LabelNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelSchema {
    pub labels: Vec<LabelDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hierarchy: Vec<LabelNode>,
}

impl LabelSchema {
    pub fn contains(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.name == name)
    }

    pub fn color_of(&self, name: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|l| l.name == name)
            .and_then(|l| l.color.as_deref())
    }
}

/// Flatten a hierarchy into the flat label list, leaves only.
pub fn flatten_hierarchy(nodes: &[LabelNode]) -> Vec<LabelDefinition> {
    let mut labels = Vec::new();
    for node in nodes {
        if let Some(name) = &node.name {
            labels.push(LabelDefinition {
                name: name.clone(),
                color: node.color.clone(),
                shortcut: None,
            });
        }
        labels.extend(flatten_hierarchy(&node.children));
    }
    labels
}

/// Load a label schema from YAML.
///
/// Search order: the explicit path if given, then `./labels.yaml`, then the
/// user config dir. Unparsable candidates are skipped with a warning so a
/// stale file does not shadow a good one further down the chain.
pub fn load_labels(path: Option<&str>) -> LabelSchema {
    let mut candidates: Vec<String> = Vec::new();
    if let Some(p) = path {
        candidates.push(p.to_string());
    }
    candidates.push("./labels.yaml".to_string());
    if let Some(dirs) = directories::ProjectDirs::from("", "", "labelbench") {
        candidates.push(dirs.config_dir().join("labels.yaml").display().to_string());
    }

    for candidate in candidates {
        let expanded = shellexpand::tilde(&candidate);
        let file = Path::new(expanded.as_ref());
        if !file.exists() {
            continue;
        }
        match try_load_label_file(file) {
            Ok(schema) => return schema,
            Err(e) => warn!(path = %file.display(), error = %e, "skipping label file"),
        }
    }

    LabelSchema::default()
}

fn try_load_label_file(path: &Path) -> Result<LabelSchema> {
    let content = std::fs::read_to_string(path)?;
    parse_label_content(&content)
}

/// Parse label YAML, accepting either a bare hierarchy array or a full
/// schema document.
pub fn parse_label_content(content: &str) -> Result<LabelSchema> {
    if let Ok(hierarchy) = serde_yaml::from_str::<Vec<LabelNode>>(content) {
        let labels = flatten_hierarchy(&hierarchy);
        return Ok(LabelSchema { labels, hierarchy });
    }

    match serde_yaml::from_str::<LabelSchema>(content) {
        Ok(mut schema) => {
            if schema.labels.is_empty() && !schema.hierarchy.is_empty() {
                schema.labels = flatten_hierarchy(&schema.hierarchy);
            }
            Ok(schema)
        }
        Err(e) => Err(WorkspaceError::Schema(format!("yaml parse: {e}"))),
    }
}

/// Save a label schema as YAML.
pub fn save_labels(schema: &LabelSchema, path: &str) -> Result<()> {
    let expanded = shellexpand::tilde(path);
    if let Some(parent) = Path::new(expanded.as_ref()).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let yaml = serde_yaml::to_string(schema)
        .map_err(|e| WorkspaceError::Schema(format!("serialize: {e}")))?;
    std::fs::write(expanded.as_ref(), yaml)?;
    Ok(())
}
