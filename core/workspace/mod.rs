//! # Finding and opening workspaces.
//!
//! Turns a `Config` into a `Project`: the workspace root is either given or found by walking up
//! from the invocation directory, and synced project data is loaded when available.
//!

mod finder;
pub use finder::*;

use crate::model::{BuildInfo, Project, ProjectData, ProjectDataError};
use crate::Config;
use thiserror::*;
use tracing::*;

#[tracing::instrument(name = "workspace::open_project", skip(config))]
pub async fn open_project(config: &Config) -> Result<Project, OpenProjectError> {
    let root = match config.workspace_root() {
        Some(root) => root.clone(),
        None => WorkspaceFinder::find_upwards(config.invocation_dir()).await?,
    };

    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| root.to_string_lossy().to_string());

    let data = match (config.project_data_path(), config.bin_dir()) {
        (Some(path), bin_dir) => {
            let mut data = ProjectData::load(path).await?;
            if let Some(bin_dir) = bin_dir {
                data.build_info = BuildInfo::new(bin_dir);
            }
            Some(data)
        }
        (None, Some(bin_dir)) => Some(ProjectData::new(BuildInfo::new(bin_dir), vec![])),
        (None, None) => None,
    };

    debug!(
        "Opened project {} at {:?} (synced: {})",
        name,
        root,
        data.is_some()
    );

    let project = Project::new(name, root);
    Ok(match data {
        Some(data) => project.with_data(data),
        None => project,
    })
}

#[derive(Error, Debug)]
pub enum OpenProjectError {
    #[error(transparent)]
    WorkspaceFinderError(WorkspaceFinderError),

    #[error(transparent)]
    ProjectDataError(ProjectDataError),
}

impl From<WorkspaceFinderError> for OpenProjectError {
    fn from(err: WorkspaceFinderError) -> Self {
        Self::WorkspaceFinderError(err)
    }
}

impl From<ProjectDataError> for OpenProjectError {
    fn from(err: ProjectDataError) -> Self {
        Self::ProjectDataError(err)
    }
}
