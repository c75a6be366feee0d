use crate::{
    domain::{BoardState, Project, ProjectId},
    error::Result,
};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[cfg(feature = "file-storage")]
pub mod file_storage;
pub mod memory_storage;

#[cfg(feature = "file-storage")]
pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

/// Key-value backend the board store persists its state through
#[async_trait]
pub trait Storage: Send + Sync {
    /// Reads the value stored under `key`, or `None` if nothing is stored
    async fn load(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value
    async fn save(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the value under `key`; removing a missing key is not an error
    async fn remove(&self, key: &str) -> Result<()>;
}

/// The persisted shape of the board: everything except the search filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub projects: IndexMap<ProjectId, Arc<Project>>,
    pub current_project_id: Option<ProjectId>,
}

impl PersistedState {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<&BoardState> for PersistedState {
    fn from(state: &BoardState) -> Self {
        Self {
            projects: state.projects.clone(),
            current_project_id: state.current_project_id.clone(),
        }
    }
}

impl From<PersistedState> for BoardState {
    fn from(persisted: PersistedState) -> Self {
        BoardState::new(persisted.projects, persisted.current_project_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_state_excludes_search_query() {
        let mut state = BoardState::default();
        state.search_query = "secret".to_string();

        let json = PersistedState::from(&state).to_json().unwrap();
        assert!(!json.contains("searchQuery"));
        assert!(!json.contains("secret"));
        assert!(json.contains("\"currentProjectId\":\"project-1\""));
    }

    #[test]
    fn test_persisted_state_round_trip() {
        let mut state = BoardState::default();
        state.search_query = "filter".to_string();

        let json = PersistedState::from(&state).to_json().unwrap();
        let restored = BoardState::from(PersistedState::from_json(&json).unwrap());

        assert_eq!(restored.projects, state.projects);
        assert_eq!(restored.current_project_id, state.current_project_id);
        assert!(restored.search_query.is_empty());
    }

    #[test]
    fn test_null_current_project() {
        let json = r#"{"projects": {}, "currentProjectId": null}"#;
        let state = BoardState::from(PersistedState::from_json(json).unwrap());

        assert!(state.projects.is_empty());
        assert_eq!(state.current_project_id, None);
    }

    #[test]
    fn test_incompatible_shape_fails_to_parse() {
        assert!(PersistedState::from_json(r#"{"boards": []}"#).is_err());
        assert!(PersistedState::from_json("not json").is_err());
    }
}
