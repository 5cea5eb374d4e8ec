use super::{TargetIdeInfo, WorkspacePath};
use crate::sync::Arc;
use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use thiserror::*;
use tokio::process::Command;
use tracing::*;

/// A handle to an open project. Cheap to clone, so it can be handed to every lookup.
///
#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    workspace_root: PathBuf,
    data: Option<Arc<ProjectData>>,
}

impl Project {
    pub fn new<N, P>(name: N, workspace_root: P) -> Self
    where
        N: Into<String>,
        P: Into<PathBuf>,
    {
        Self {
            name: name.into(),
            workspace_root: workspace_root.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: ProjectData) -> Self {
        self.data = Some(Arc::new(data));
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// The data from the last sync, if the project has been synced at all.
    pub fn data(&self) -> Option<&ProjectData> {
        self.data.as_deref()
    }
}

/// Where the build tool places its outputs.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    pub bin_dir: PathBuf,
}

#[derive(Error, Debug)]
pub enum BuildInfoError {
    #[error("Could not run {build_tool:?}: {err}")]
    CouldNotSpawn {
        build_tool: PathBuf,
        err: std::io::Error,
    },

    #[error("{build_tool:?} info exited with {status}: {stderr}")]
    CommandFailed {
        build_tool: PathBuf,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("{build_tool:?} info did not print a bin directory")]
    EmptyOutput { build_tool: PathBuf },
}

impl BuildInfo {
    pub fn new<P>(bin_dir: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            bin_dir: bin_dir.into(),
        }
    }

    /// Ask the build tool for its `bazel-bin` directory. `env` is set for the build tool on top
    /// of the inherited environment.
    ///
    #[tracing::instrument(name = "BuildInfo::query", skip(env))]
    pub async fn query(
        build_tool: &Path,
        workspace_root: &Path,
        env: &HashMap<String, String>,
    ) -> Result<Self, BuildInfoError> {
        let output = Command::new(build_tool)
            .arg("info")
            .arg("bazel-bin")
            .current_dir(workspace_root)
            .envs(env)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|err| BuildInfoError::CouldNotSpawn {
                build_tool: build_tool.to_path_buf(),
                err,
            })?;

        if !output.status.success() {
            return Err(BuildInfoError::CommandFailed {
                build_tool: build_tool.to_path_buf(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let bin_dir = stdout.lines().map(str::trim).find(|l| !l.is_empty());
        match bin_dir {
            Some(bin_dir) => {
                debug!("Found bin directory at {}", bin_dir);
                Ok(Self::new(bin_dir))
            }
            None => Err(BuildInfoError::EmptyOutput {
                build_tool: build_tool.to_path_buf(),
            }),
        }
    }
}

/// The data obtained from syncing a project with the build tool.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectData {
    pub build_info: BuildInfo,

    #[serde(default)]
    pub targets: Vec<TargetIdeInfo>,
}

#[derive(Error, Debug)]
pub enum ProjectDataError {
    #[error("Could not read project data at {path:?}: {err}")]
    CouldNotReadFile { path: PathBuf, err: std::io::Error },

    #[error("Could not parse project data at {path:?}: {err}")]
    CouldNotParseFile {
        path: PathBuf,
        err: serde_json::Error,
    },
}

impl ProjectData {
    pub fn new(build_info: BuildInfo, targets: Vec<TargetIdeInfo>) -> Self {
        Self {
            build_info,
            targets,
        }
    }

    #[tracing::instrument(name = "ProjectData::load")]
    pub async fn load(path: &Path) -> Result<Self, ProjectDataError> {
        let bytes =
            tokio::fs::read(path)
                .await
                .map_err(|err| ProjectDataError::CouldNotReadFile {
                    path: path.to_path_buf(),
                    err,
                })?;

        serde_json::from_slice(&bytes).map_err(|err| ProjectDataError::CouldNotParseFile {
            path: path.to_path_buf(),
            err,
        })
    }

    /// All the targets listing `source` among their sources, in target map order.
    pub fn targets_building(&self, source: &WorkspacePath) -> Vec<&TargetIdeInfo> {
        self.targets.iter().filter(|t| t.builds(source)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[tokio::test]
    async fn loads_project_data_from_a_json_file() {
        let dir = assert_fs::TempDir::new().unwrap();
        let file = dir.child("project.json");
        file.write_str(
            r#"
            {
              "build_info": { "bin_dir": "/out/bin" },
              "targets": [
                {
                  "label": "//app:MainApp",
                  "kind": "scala_binary",
                  "sources": ["app/Main.scala"]
                },
                {
                  "label": "//lib:util",
                  "kind": "scala_library"
                }
              ]
            }
            "#,
        )
        .unwrap();

        let data = ProjectData::load(file.path()).await.unwrap();
        assert_eq!(data.build_info.bin_dir, PathBuf::from("/out/bin"));
        assert_eq!(data.targets.len(), 2);
        assert!(data.targets[1].sources.is_empty());

        let main = WorkspacePath::new("app/Main.scala").unwrap();
        let building = data.targets_building(&main);
        assert_eq!(building.len(), 1);
        assert_eq!(building[0].label.to_string(), "//app:MainApp");
    }

    #[tokio::test]
    async fn invalid_labels_make_the_project_data_unreadable() {
        let dir = assert_fs::TempDir::new().unwrap();
        let file = dir.child("project.json");
        file.write_str(
            r#"{ "build_info": { "bin_dir": "/out" }, "targets": [ { "label": "app", "kind": "x" } ] }"#,
        )
        .unwrap();

        assert_matches!(
            ProjectData::load(file.path()).await,
            Err(ProjectDataError::CouldNotParseFile { .. })
        );
    }

    #[tokio::test]
    async fn missing_project_data_is_an_error() {
        let dir = assert_fs::TempDir::new().unwrap();
        assert_matches!(
            ProjectData::load(&dir.path().join("nope.json")).await,
            Err(ProjectDataError::CouldNotReadFile { .. })
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn asks_the_build_tool_for_the_bin_directory() {
        use std::os::unix::fs::PermissionsExt;

        let dir = assert_fs::TempDir::new().unwrap();
        let tool = dir.child("bazel");
        tool.write_str("#!/bin/sh\necho /cache/execroot/bazel-out/k8-fastbuild/bin\n")
            .unwrap();
        std::fs::set_permissions(tool.path(), std::fs::Permissions::from_mode(0o755)).unwrap();

        let info = BuildInfo::query(tool.path(), dir.path(), &HashMap::new())
            .await
            .unwrap();
        assert_eq!(
            info.bin_dir,
            PathBuf::from("/cache/execroot/bazel-out/k8-fastbuild/bin")
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn a_failing_build_tool_is_reported() {
        use std::os::unix::fs::PermissionsExt;

        let dir = assert_fs::TempDir::new().unwrap();
        let tool = dir.child("bazel");
        tool.write_str("#!/bin/sh\necho 'no workspace' >&2\nexit 2\n")
            .unwrap();
        std::fs::set_permissions(tool.path(), std::fs::Permissions::from_mode(0o755)).unwrap();

        assert_matches!(
            BuildInfo::query(tool.path(), dir.path(), &HashMap::new()).await,
            Err(BuildInfoError::CommandFailed { stderr, .. }) if stderr == "no workspace"
        );
    }
}
