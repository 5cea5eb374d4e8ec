mod commands;
pub mod flags;
mod reporter;

use commands::*;
use structopt::StructOpt;
use tracing::{error, log};

#[derive(StructOpt, Debug, Clone)]
#[structopt(
    name = "blazelink",
    setting = structopt::clap::AppSettings::ColoredHelp,
    about = "Find the targets building a source file, and run Scala main objects out of their deploy jars"
)]
struct Blazelink {
    #[structopt(subcommand, help = "the command to run")]
    cmd: Command,
}

impl Blazelink {
    async fn run(self) -> Result<(), anyhow::Error> {
        human_panic::setup_panic!(Metadata {
            name: "blazelink".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            authors: "blazelink contributors".into(),
            homepage: "".into(),
        });

        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .format_timestamp_micros()
            .format_module_path(false)
            .parse_env("BLAZELINK_LOG")
            .try_init()?;

        let result = self.cmd.run().await;

        if let Err(ref err) = result {
            error!("{:?}", &err);
        };

        result
    }
}

#[derive(StructOpt, Debug, Clone)]
enum Command {
    Targets(TargetsCommand),
    DeployJar(DeployJarCommand),
    RunConfig(RunConfigCommand),
}

impl Command {
    async fn run(self) -> Result<(), anyhow::Error> {
        match self {
            Command::Targets(x) => x.run().await,
            Command::DeployJar(x) => x.run().await,
            Command::RunConfig(x) => x.run().await,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    Blazelink::from_args().run().await
}
