use futures::StreamExt;
use std::path::{Path, PathBuf};
use thiserror::*;
use tokio::fs;
use tracing::*;

/// Files that mark the root of a Bazel workspace, in order of preference.
pub const WORKSPACE_MARKERS: &[&str] = &["MODULE.bazel", "WORKSPACE.bazel", "WORKSPACE"];

pub struct WorkspaceFinder;

/// The WorkspaceFinder implements the heuristics for finding a workspace from an invocation
/// directory.
///
/// This allows us to run `blazelink` anywhere within a workspace and still find its root.
///
impl WorkspaceFinder {
    #[tracing::instrument(name = "WorkspaceFinder::find_upwards")]
    pub async fn find_upwards(cwd: &Path) -> Result<PathBuf, WorkspaceFinderError> {
        let start = fs::canonicalize(cwd)
            .await
            .map_err(|err| WorkspaceFinderError::CouldNotReadDirectory {
                path: cwd.to_path_buf(),
                err,
            })?;

        let mut dirs = Box::pin(Self::walk_uptree(start));
        while let Some(path) = dirs.next().await {
            for marker in WORKSPACE_MARKERS {
                if fs::metadata(path.join(marker)).await.is_ok() {
                    debug!("Found {} at {:?}", marker, path);
                    return Ok(path);
                }
            }
        }
        Err(WorkspaceFinderError::WorkspaceFileNotFound {
            path: cwd.to_path_buf(),
        })
    }

    fn walk_uptree(start: PathBuf) -> impl futures::Stream<Item = PathBuf> {
        let mut cwd = start;
        async_stream::stream! {
            yield cwd.clone();
            while let Some(parent) = cwd.parent() {
                cwd = parent.to_path_buf();
                yield cwd.clone();
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum WorkspaceFinderError {
    #[error("Could not read directory {path:?}: {err}")]
    CouldNotReadDirectory { path: PathBuf, err: std::io::Error },

    #[error("Could not find a MODULE.bazel or WORKSPACE file while walking upwards from {path:?}. Are you sure we are in a Bazel workspace?")]
    WorkspaceFileNotFound { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[tokio::test]
    async fn finds_the_workspace_from_a_nested_directory() {
        let root = assert_fs::TempDir::new().unwrap();
        root.child("MODULE.bazel").touch().unwrap();
        let nested = root.child("app/src/main/scala");
        nested.create_dir_all().unwrap();

        let found = WorkspaceFinder::find_upwards(nested.path()).await.unwrap();
        assert_eq!(found, root.path().canonicalize().unwrap());
    }

    #[tokio::test]
    async fn the_innermost_workspace_wins() {
        let root = assert_fs::TempDir::new().unwrap();
        root.child("WORKSPACE").touch().unwrap();
        let inner = root.child("third_party/lib");
        inner.create_dir_all().unwrap();
        inner.child("WORKSPACE.bazel").touch().unwrap();

        let found = WorkspaceFinder::find_upwards(inner.path()).await.unwrap();
        assert_eq!(found, inner.path().canonicalize().unwrap());
    }

    #[tokio::test]
    async fn missing_directories_are_an_error() {
        let root = assert_fs::TempDir::new().unwrap();
        assert_matches!(
            WorkspaceFinder::find_upwards(&root.path().join("nope")).await,
            Err(WorkspaceFinderError::CouldNotReadDirectory { .. })
        );
    }
}
