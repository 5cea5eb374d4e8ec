use crate::events::EventChannel;
use crate::resolver::FailurePolicy;
use crate::sync::Arc;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::*;

pub const DEFAULT_BUILD_TOOL: &str = "bazel";

/// Environment variable used to pick a build tool other than `bazel`, like `blaze` or a wrapper
/// script.
pub const BUILD_TOOL_ENV: &str = "BLAZELINK_BUILD_TOOL";

/// A collection of flags and options that affect how lookups and run configurations behave.
///
#[derive(Builder, Debug, Clone)]
#[builder(build_fn(error = "ConfigError"))]
pub struct Config {
    /// The directory blazelink was invoked from.
    #[builder(default = "self.default_invocation_dir()")]
    invocation_dir: PathBuf,

    /// The root of the workspace. When missing, it is found by walking up from the invocation
    /// directory.
    #[builder(setter(into, strip_option), default = "None")]
    workspace_root: Option<PathBuf>,

    /// The environment at the time this config was created. This is separated to assist with
    /// testing.
    #[builder(default = "self.default_env()")]
    env: HashMap<String, String>,

    /// The build tool binary used to run queries.
    #[builder(setter(into), default = "self.default_build_tool()")]
    build_tool: PathBuf,

    /// Overrides the output directory reported by the build tool.
    #[builder(setter(into, strip_option), default = "None")]
    bin_dir: Option<PathBuf>,

    /// A JSON file with synced project data.
    #[builder(setter(into, strip_option), default = "None")]
    project_data_path: Option<PathBuf>,

    /// What to report when every lookup failed.
    #[builder(default)]
    failure_policy: FailurePolicy,

    /// The Event Channel be used across the application.
    /// NOTE: this is safe to clone since it is really an [Arc] to the event bus.
    #[builder(default = "self.default_event_channel()")]
    event_channel: Arc<EventChannel>,
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build().unwrap()
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn invocation_dir(&self) -> &PathBuf {
        &self.invocation_dir
    }

    pub fn workspace_root(&self) -> Option<&PathBuf> {
        self.workspace_root.as_ref()
    }

    pub fn env(&self) -> &HashMap<String, String> {
        &self.env
    }

    pub fn build_tool(&self) -> &PathBuf {
        &self.build_tool
    }

    pub fn bin_dir(&self) -> Option<&PathBuf> {
        self.bin_dir.as_ref()
    }

    pub fn project_data_path(&self) -> Option<&PathBuf> {
        self.project_data_path.as_ref()
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    pub fn event_channel(&self) -> Arc<EventChannel> {
        self.event_channel.clone()
    }
}

impl ConfigBuilder {
    fn _env(&self) -> HashMap<String, String> {
        self.env.clone().unwrap_or_else(|| self.default_env())
    }

    fn default_invocation_dir(&self) -> PathBuf {
        PathBuf::from(".")
    }

    fn default_build_tool(&self) -> PathBuf {
        self._env()
            .get(BUILD_TOOL_ENV)
            .filter(|tool| !tool.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_TOOL))
    }

    fn default_event_channel(&self) -> Arc<EventChannel> {
        EventChannel::new().into()
    }

    fn default_env(&self) -> HashMap<String, String> {
        std::env::vars_os()
            .filter_map(|(k, v)| match (k.into_string(), v.into_string()) {
                (Ok(k), Ok(v)) => Some((k, v)),
                _ => None,
            })
            .collect()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Attempted to build a Config struct while missing fields: {0:?}")]
    BuilderError(derive_builder::UninitializedFieldError),
}

impl From<derive_builder::UninitializedFieldError> for ConfigError {
    fn from(err: derive_builder::UninitializedFieldError) -> Self {
        Self::BuilderError(err)
    }
}
