use crate::model::Label;
use serde_derive::{Deserialize, Serialize};

/// Work the editor has to do before launching a configuration.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeforeRunTask {
    /// Build the `_deploy.jar` of the configuration's target.
    GenerateDeployableJar,
}

/// A plain JVM application launch: a main class plus the VM parameters to run it with.
///
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfiguration {
    pub name: String,

    /// Set once a user renames the configuration, so it isn't renamed back automatically.
    #[serde(default)]
    pub name_changed_by_user: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_class_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vm_parameters: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// The target this configuration was created for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_label: Option<Label>,

    #[serde(default)]
    pub before_run_tasks: Vec<BeforeRunTask>,
}

impl ApplicationConfiguration {
    pub fn new<S>(name: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
