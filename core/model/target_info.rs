use super::{Label, WorkspacePath};
use serde_derive::{Deserialize, Serialize};

pub static SCALA_BINARY: &str = "scala_binary";

/// A build target as reported by a `SourceToTargetProvider`.
///
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TargetInfo {
    label: Label,

    /// The rule kind (`scala_binary`, `java_library`, ...) when the provider knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
}

impl TargetInfo {
    pub fn new(label: Label, kind: Option<String>) -> Self {
        Self { label, kind }
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }
}

impl From<Label> for TargetInfo {
    fn from(label: Label) -> Self {
        Self { label, kind: None }
    }
}

/// A target as recorded in the synced project data, with the sources it compiles.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetIdeInfo {
    pub label: Label,
    pub kind: String,
    #[serde(default)]
    pub sources: Vec<WorkspacePath>,
}

impl TargetIdeInfo {
    pub fn builds(&self, source: &WorkspacePath) -> bool {
        self.sources.iter().any(|s| s == source)
    }

    pub fn is_scala_binary(&self) -> bool {
        self.kind == SCALA_BINARY
    }
}

impl From<&TargetIdeInfo> for TargetInfo {
    fn from(info: &TargetIdeInfo) -> Self {
        Self::new(info.label.clone(), Some(info.kind.clone()))
    }
}
