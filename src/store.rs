//! The board store: canonical state plus persistence at each transition.

use crate::{
    domain::{BoardConfig, BoardState, Project, ProjectId},
    engine::{apply, reorder::DragGesture, Action},
    error::Result,
    storage::{PersistedState, Storage},
    transfer,
};
use indexmap::IndexMap;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Owns the board state and the storage backend it is persisted to
///
/// Every mutation goes through [`BoardStore::dispatch`], which takes
/// `&mut self`; transitions and their saves therefore never interleave.
pub struct BoardStore {
    state: BoardState,
    storage: Box<dyn Storage>,
    config: BoardConfig,
}

impl BoardStore {
    /// Loads the persisted board, falling back to the built-in dataset
    ///
    /// Read and parse failures are logged and never surfaced.
    pub async fn load(storage: Box<dyn Storage>, config: BoardConfig) -> Self {
        let state = match Self::read_state(storage.as_ref(), &config.storage_key).await {
            Ok(Some(state)) => {
                info!(
                    key = %config.storage_key,
                    projects = state.projects.len(),
                    "loaded board from storage"
                );
                state
            }
            Ok(None) => {
                info!(key = %config.storage_key, "no stored board; using default dataset");
                BoardState::default()
            }
            Err(e) => {
                warn!(key = %config.storage_key, error = %e, "failed to load board; using default dataset");
                BoardState::default()
            }
        };

        Self {
            state,
            storage,
            config,
        }
    }

    /// Creates a store around an existing state without reading storage
    pub fn with_state(state: BoardState, storage: Box<dyn Storage>, config: BoardConfig) -> Self {
        Self {
            state,
            storage,
            config,
        }
    }

    async fn read_state(storage: &dyn Storage, key: &str) -> Result<Option<BoardState>> {
        match storage.load(key).await? {
            Some(json) => Ok(Some(PersistedState::from_json(&json)?.into())),
            None => Ok(None),
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.state.current_project()
    }

    /// Applies `action` and persists the result
    ///
    /// A failed save is logged; the new state is kept in memory.
    pub async fn dispatch(&mut self, action: Action) -> &BoardState {
        let persistent = action.is_persistent();
        debug!(action = action.name(), "dispatching");
        self.state = apply(&self.state, action);

        if persistent {
            if let Err(e) = self.try_save().await {
                error!(key = %self.config.storage_key, error = %e, "failed to save board");
            }
        }
        &self.state
    }

    /// Resolves a finished drag against the current project and applies it
    ///
    /// Returns whether a move was dispatched. Aborted or no-op drags leave
    /// the state and storage untouched.
    pub async fn drop_task(&mut self, gesture: &DragGesture) -> bool {
        let action = self
            .state
            .current_project()
            .and_then(|project| gesture.resolve(project));

        match action {
            Some(action) => {
                self.dispatch(action).await;
                true
            }
            None => false,
        }
    }

    /// Writes the current state to storage, unless persistence is disabled
    pub async fn try_save(&self) -> Result<()> {
        if !self.config.persist {
            return Ok(());
        }
        let json = PersistedState::from(&self.state).to_json()?;
        self.storage.save(&self.config.storage_key, &json).await
    }

    /// Serializes every project as an export document
    pub fn export_json(&self) -> Result<String> {
        transfer::export_projects(&self.state.projects)
    }

    /// Replaces all projects with those in an export document
    pub async fn import_json(&mut self, json: &str) -> Result<()> {
        let projects = transfer::import_projects(json)?;
        self.import_projects(projects).await;
        Ok(())
    }

    pub async fn export_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        transfer::export_to_file(path, &self.state.projects).await
    }

    pub async fn import_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let projects = transfer::import_from_file(path).await?;
        self.import_projects(projects).await;
        Ok(())
    }

    async fn import_projects(&mut self, projects: IndexMap<ProjectId, Project>) {
        info!(projects = projects.len(), "importing projects");
        self.dispatch(Action::ImportData { projects }).await;
    }
}
