use serde_derive::{Deserialize, Serialize};
use std::path::{Component, Path};
use thiserror::*;

/// A path to a source file, relative to the root of the workspace.
///
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkspacePath(String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkspacePathError {
    #[error("Workspace paths can't be empty")]
    Empty,

    #[error("Workspace path {0:?} must be relative to the workspace root")]
    Absolute(String),

    #[error("Workspace path {0:?} escapes the workspace root")]
    EscapesWorkspace(String),
}

impl WorkspacePath {
    pub fn new<S>(path: S) -> Result<Self, WorkspacePathError>
    where
        S: Into<String>,
    {
        let path: String = path.into();
        if path.is_empty() {
            return Err(WorkspacePathError::Empty);
        }

        let as_path = Path::new(&path);
        if as_path.is_absolute() || path.starts_with('/') {
            return Err(WorkspacePathError::Absolute(path));
        }

        if as_path.components().any(|c| c == Component::ParentDir) {
            return Err(WorkspacePathError::EscapesWorkspace(path));
        }

        Ok(Self(path))
    }

    /// Build a workspace path from a path that may be absolute, as long as it lives under
    /// `workspace_root`.
    ///
    pub fn from_path(path: &Path, workspace_root: &Path) -> Result<Self, WorkspacePathError> {
        let relative = if path.is_absolute() {
            path.strip_prefix(workspace_root)
                .map_err(|_| WorkspacePathError::EscapesWorkspace(path.to_string_lossy().into()))?
        } else {
            path
        };
        Self::new(relative.to_string_lossy().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }
}

impl TryFrom<String> for WorkspacePath {
    type Error = WorkspacePathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for WorkspacePath {
    type Error = WorkspacePathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WorkspacePath> for String {
    fn from(path: WorkspacePath) -> Self {
        path.0
    }
}

impl AsRef<str> for WorkspacePath {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl std::fmt::Display for WorkspacePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_relative_paths() {
        let path = WorkspacePath::new("src/main/scala/Main.scala").unwrap();
        assert_eq!(path.as_str(), "src/main/scala/Main.scala");
    }

    #[test]
    fn rejects_paths_outside_of_the_workspace() {
        assert_eq!(WorkspacePath::new(""), Err(WorkspacePathError::Empty));
        assert_matches!(
            WorkspacePath::new("/etc/passwd"),
            Err(WorkspacePathError::Absolute(_))
        );
        assert_matches!(
            WorkspacePath::new("src/../../secret"),
            Err(WorkspacePathError::EscapesWorkspace(_))
        );
    }

    #[test]
    fn strips_the_workspace_root_from_absolute_paths() {
        let root = Path::new("/home/me/project");
        let path =
            WorkspacePath::from_path(Path::new("/home/me/project/foo/Bar.scala"), root).unwrap();
        assert_eq!(path.as_str(), "foo/Bar.scala");
    }

    #[test]
    fn absolute_paths_outside_the_workspace_are_rejected() {
        let root = Path::new("/home/me/project");
        assert_matches!(
            WorkspacePath::from_path(Path::new("/tmp/Bar.scala"), root),
            Err(WorkspacePathError::EscapesWorkspace(_))
        );
    }
}
