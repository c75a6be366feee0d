//! Import and export of the whole project mapping.
//!
//! Both directions use the persisted shape: a JSON object keyed by project
//! id. Imports are only checked for being a JSON object; referential
//! integrity of the projects inside is not validated.

use crate::{
    domain::{Project, ProjectId},
    error::{Result, TaskflowError},
};
use indexmap::IndexMap;
use serde_json::Value;
use std::{path::Path, sync::Arc};
use tokio::fs;
use tracing::info;

/// Serializes `projects` as a pretty-printed export document
pub fn export_projects(projects: &IndexMap<ProjectId, Arc<Project>>) -> Result<String> {
    Ok(serde_json::to_string_pretty(projects)?)
}

/// Parses an export document back into a project mapping
pub fn import_projects(json: &str) -> Result<IndexMap<ProjectId, Project>> {
    // Parsed straight into the map; going through `Value` would lose key order
    if !json.trim_start().starts_with('{') {
        let value: Value = serde_json::from_str(json)?;
        return Err(TaskflowError::InvalidImport(format!(
            "expected an object of projects, found {}",
            kind_of(&value)
        )));
    }
    Ok(serde_json::from_str(json)?)
}

/// Writes an export document to `path`
pub async fn export_to_file(
    path: impl AsRef<Path>,
    projects: &IndexMap<ProjectId, Arc<Project>>,
) -> Result<()> {
    let json = export_projects(projects)?;
    fs::write(path.as_ref(), json).await?;
    info!(path = %path.as_ref().display(), projects = projects.len(), "exported projects");
    Ok(())
}

/// Reads an export document from `path`
pub async fn import_from_file(path: impl AsRef<Path>) -> Result<IndexMap<ProjectId, Project>> {
    let contents = fs::read_to_string(path.as_ref()).await?;
    let projects = import_projects(&contents)?;
    info!(path = %path.as_ref().display(), projects = projects.len(), "read import file");
    Ok(projects)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
