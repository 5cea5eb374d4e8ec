use super::{
    ApplicationConfiguration, BeforeRunTask, ConfigurationContext, MainObject,
    RunConfigurationProducer,
};
use crate::model::{Label, ProjectData, TargetIdeInfo, WorkspacePath};
use std::path::{Path, PathBuf};
use tracing::*;

/// Where the build tool places the deploy jar of `label`.
pub fn deploy_jar_path(bin_dir: &Path, label: &Label) -> PathBuf {
    bin_dir.join(format!("{}_deploy.jar", label.target_name()))
}

/// All the `scala_binary` targets compiling `source`.
pub fn find_scala_binary_targets<'a>(
    data: &'a ProjectData,
    source: &WorkspacePath,
) -> Vec<&'a TargetIdeInfo> {
    data.targets_building(source)
        .into_iter()
        .filter(|t| t.is_scala_binary())
        .collect()
}

/// Creates application configurations that run a Scala main object out of the deploy jar of the
/// `scala_binary` that compiles it.
///
#[derive(Debug, Default, Clone, Copy)]
pub struct DeployableJarRunConfigurationProducer;

/// Everything a configuration is derived from, recomputed from the context every time.
struct Expected<'a> {
    main_object: &'a MainObject,
    label: Label,
    jar: PathBuf,
}

impl Expected<'_> {
    fn classpath(&self) -> String {
        format!("-cp {}", self.jar.to_string_lossy())
    }
}

impl DeployableJarRunConfigurationProducer {
    pub fn new() -> Self {
        Self
    }

    fn expected<'a>(&self, context: &'a ConfigurationContext) -> Option<Expected<'a>> {
        let main_object = context.main_object.as_ref()?;
        let Some(source) = main_object.source() else {
            trace!("{} has no source file", main_object.qualified_name());
            return None;
        };

        let Some(data) = context.project.data() else {
            debug!(
                "Project {} has no synced data, so there is no deploy jar to run",
                context.project.name()
            );
            return None;
        };

        let target = find_scala_binary_targets(data, source).into_iter().next()?;
        let label = target.label.clone();
        let jar = deploy_jar_path(&data.build_info.bin_dir, &label);

        Some(Expected {
            main_object,
            label,
            jar,
        })
    }
}

impl RunConfigurationProducer for DeployableJarRunConfigurationProducer {
    #[tracing::instrument(
        name = "DeployableJarRunConfigurationProducer::setup",
        skip(self, configuration, context)
    )]
    fn setup_configuration_from_context(
        &self,
        configuration: &mut ApplicationConfiguration,
        context: &ConfigurationContext,
    ) -> bool {
        let Some(expected) = self.expected(context) else {
            return false;
        };

        configuration.vm_parameters = Some(expected.classpath());
        configuration.main_class_name =
            Some(expected.main_object.truncated_qualified_name().to_string());
        configuration.module = context.module.clone();
        configuration.target_label = Some(expected.label.clone());
        configuration.name = expected.main_object.name().to_string();
        configuration.name_changed_by_user = true;
        configuration.before_run_tasks = vec![BeforeRunTask::GenerateDeployableJar];

        debug!(
            "Set up {} to run {} from {:?}",
            configuration.name, expected.label, expected.jar
        );
        true
    }

    fn is_configuration_from_context(
        &self,
        configuration: &ApplicationConfiguration,
        context: &ConfigurationContext,
    ) -> bool {
        let (Some(main_class), Some(vm_parameters)) = (
            configuration.main_class_name.as_deref(),
            configuration.vm_parameters.as_deref(),
        ) else {
            return false;
        };

        let Some(expected) = self.expected(context) else {
            return false;
        };

        main_class == expected.main_object.truncated_qualified_name()
            && vm_parameters.contains(&expected.classpath())
    }
}
