use crate::flags::Flags;
use anyhow::bail;
use blazelink_core::run::{
    ApplicationConfiguration, ConfigurationContext, DeployableJarRunConfigurationProducer,
    MainObject, RunConfigurationProducer,
};
use blazelink_core::workspace::open_project;
use blazelink_core::*;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug, Clone)]
#[structopt(
    name = "run-config",
    setting = structopt::clap::AppSettings::ColoredHelp,
    about = "Sets up a configuration running a Scala main object out of its deploy jar"
)]
pub struct RunConfigCommand {
    #[structopt(help = r"The simple name of the main object.", long = "main-object")]
    main_object: String,

    #[structopt(
        help = r"The fully qualified name of the main object, as the compiler names it.

Example: com.example.Main$
",
        long = "qualified-name"
    )]
    qualified_name: String,

    #[structopt(help = r"The file the main object is defined in.", long = "source")]
    source: PathBuf,

    #[structopt(help = r"The module the configuration belongs to.", long = "module")]
    module: Option<String>,

    #[structopt(flatten)]
    flags: Flags,
}

impl RunConfigCommand {
    pub async fn run(self) -> Result<(), anyhow::Error> {
        let config: Config = self.flags.try_into()?;
        if config.project_data_path().is_none() {
            bail!("run-config needs synced project data, pass it with --project-data");
        }

        let project = open_project(&config).await?;
        let source = WorkspacePath::from_path(&self.source, project.workspace_root())?;

        let main_object = MainObject::new(self.main_object, self.qualified_name, Some(source));
        let mut context = ConfigurationContext::new(project).with_main_object(main_object);
        if let Some(module) = self.module {
            context = context.with_module(module);
        }

        let producer = DeployableJarRunConfigurationProducer::new();
        let mut configuration = ApplicationConfiguration::default();
        if !producer.setup_configuration_from_context(&mut configuration, &context) {
            bail!(
                "No scala_binary target builds {}, so there is no deploy jar to run it from",
                self.source.to_string_lossy()
            );
        }

        println!("{}", serde_json::to_string_pretty(&configuration)?);
        Ok(())
    }
}
