use super::SourceToTargetProvider;
use crate::model::{Label, Project, TargetInfo, WorkspacePath};
use crate::resolver::LookupError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::*;

/// Answers by asking the build tool which rules in the file's package list it as a direct
/// dependency.
///
/// Declines when the build tool isn't installed. The query process is killed if the lookup is
/// cancelled.
///
#[derive(Debug, Clone)]
pub struct QueryProvider {
    build_tool: PathBuf,
    env: HashMap<String, String>,
}

impl QueryProvider {
    pub fn new<P>(build_tool: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            build_tool: build_tool.into(),
            env: HashMap::new(),
        }
    }

    /// Variables to set for the query process, on top of the inherited environment.
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    pub fn build_tool(&self) -> &Path {
        &self.build_tool
    }

    /// The query language has no escapes inside quoted words, so paths holding a `'` are
    /// double-quoted instead. Paths holding both kinds of quotes can't be queried at all.
    ///
    pub fn query_expression(source: &WorkspacePath) -> Option<String> {
        let path = source.as_str();
        let quote = match (path.contains('\''), path.contains('"')) {
            (false, _) => '\'',
            (true, false) => '"',
            (true, true) => return None,
        };
        Some(format!(
            "kind(rule, same_pkg_direct_rdeps({quote}{path}{quote}))"
        ))
    }

    /// Parse the output of `query --output=label_kind`. Each line looks like
    /// `scala_binary rule //app:MainApp`.
    ///
    pub fn parse_label_kind_output(output: &str) -> Vec<TargetInfo> {
        output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| {
                let parts: Vec<&str> = line.split_whitespace().collect();
                let parsed = match parts.as_slice() {
                    [kind, "rule", label] => label
                        .parse::<Label>()
                        .map(|label| TargetInfo::new(label, Some(kind.to_string()))),
                    [label] => label.parse::<Label>().map(TargetInfo::from),
                    _ => {
                        warn!("Skipping unexpected query output: {:?}", line);
                        return None;
                    }
                };
                parsed
                    .map_err(|err| warn!("Skipping unexpected query output {:?}: {}", line, err))
                    .ok()
            })
            .collect()
    }
}

#[async_trait]
impl SourceToTargetProvider for QueryProvider {
    fn name(&self) -> &str {
        "query"
    }

    #[tracing::instrument(name = "QueryProvider::lookup", skip(self, project))]
    async fn targets_building_source_file(
        &self,
        project: &Project,
        source: &WorkspacePath,
    ) -> Result<Option<Vec<TargetInfo>>, LookupError> {
        let Some(expression) = Self::query_expression(source) else {
            debug!("{} can't be quoted in a query, skipping", source);
            return Ok(None);
        };
        let mut cmd = Command::new(&self.build_tool);
        cmd.arg("query")
            .arg("--output=label_kind")
            .arg(&expression)
            .current_dir(project.workspace_root())
            .envs(&self.env)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        trace!("Executing {:?}", &cmd);

        let output = match cmd.output().await {
            Ok(output) => output,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("{:?} is not available, skipping", self.build_tool);
                return Ok(None);
            }
            Err(err) => {
                return Err(LookupError::CouldNotSpawn {
                    command: self.build_tool.to_string_lossy().to_string(),
                    err,
                })
            }
        };

        if !output.status.success() {
            return Err(LookupError::CommandFailed {
                command: format!("{} query {}", self.build_tool.to_string_lossy(), expression),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let targets = Self::parse_label_kind_output(&stdout);
        if targets.is_empty() {
            trace!("No rule in the package of {} depends on it", source);
            return Ok(None);
        }
        Ok(Some(targets))
    }
}
