use crate::flags::Flags;
use blazelink_core::model::BuildInfo;
use blazelink_core::run::deploy_jar_path;
use blazelink_core::workspace::WorkspaceFinder;
use blazelink_core::*;
use structopt::StructOpt;

#[derive(StructOpt, Debug, Clone)]
#[structopt(
    name = "deploy-jar",
    setting = structopt::clap::AppSettings::ColoredHelp,
    about = "Prints where the deploy jar of a target is built"
)]
pub struct DeployJarCommand {
    #[structopt(help = r"The label of the target.

Example: //app:MainApp
")]
    label: Label,

    #[structopt(flatten)]
    flags: Flags,
}

impl DeployJarCommand {
    pub async fn run(self) -> Result<(), anyhow::Error> {
        let config: Config = self.flags.try_into()?;

        let bin_dir = match config.bin_dir() {
            Some(bin_dir) => bin_dir.clone(),
            None => {
                let root = match config.workspace_root() {
                    Some(root) => root.clone(),
                    None => WorkspaceFinder::find_upwards(config.invocation_dir()).await?,
                };
                BuildInfo::query(config.build_tool(), &root, config.env())
                    .await?
                    .bin_dir
            }
        };

        println!("{}", deploy_jar_path(&bin_dir, &self.label).to_string_lossy());
        Ok(())
    }
}
