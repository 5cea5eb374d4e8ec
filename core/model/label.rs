use serde_derive::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::*;

static ROOT_MARKER: &str = "//";

/// A Bazel label of the form `[@repo]//package/path:name`.
///
/// The short form `//package/path` is accepted and names the target after the last package
/// segment, so `//foo/bar` and `//foo/bar:bar` are the same label.
///
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Label {
    repository: Option<String>,
    package: String,
    name: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    #[error("Label {0:?} must be absolute and start with // or @repo//")]
    NotAbsolute(String),

    #[error("Label {0:?} has an empty target name")]
    EmptyName(String),

    #[error("Label {0:?} has more than one ':' separator")]
    TooManySeparators(String),
}

impl Label {
    pub fn repository(&self) -> Option<&str> {
        self.repository.as_deref()
    }

    pub fn package(&self) -> &str {
        self.package.as_ref()
    }

    /// The short name of the target, without package or repository.
    pub fn target_name(&self) -> &str {
        self.name.as_ref()
    }
}

impl FromStr for Label {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (repository, rest) = match s.find(ROOT_MARKER) {
            Some(0) => (None, &s[ROOT_MARKER.len()..]),
            Some(idx) if s.starts_with('@') => {
                (Some(s[..idx].to_string()), &s[idx + ROOT_MARKER.len()..])
            }
            _ => return Err(LabelError::NotAbsolute(s.to_string())),
        };

        let (package, name) = match rest.split_once(':') {
            Some((_, name)) if name.contains(':') => {
                return Err(LabelError::TooManySeparators(s.to_string()))
            }
            Some((package, name)) => (package, name),
            None => (rest, rest.rsplit('/').next().unwrap_or_default()),
        };

        if name.is_empty() {
            return Err(LabelError::EmptyName(s.to_string()));
        }

        Ok(Self {
            repository,
            package: package.to_string(),
            name: name.to_string(),
        })
    }
}

impl TryFrom<String> for Label {
    type Error = LabelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.to_string()
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(repo) = &self.repository {
            write!(f, "{}", repo)?;
        }
        write!(f, "{}{}:{}", ROOT_MARKER, self.package, self.name)
    }
}
