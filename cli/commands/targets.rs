use crate::flags::Flags;
use crate::reporter::LookupReporter;
use anyhow::bail;
use blazelink_core::workspace::open_project;
use blazelink_core::*;
use std::path::PathBuf;
use std::time::Duration;
use structopt::StructOpt;
use tracing::debug;

#[derive(StructOpt, Debug, Clone)]
#[structopt(
    name = "targets",
    setting = structopt::clap::AppSettings::ColoredHelp,
    about = "Prints the targets that build a source file"
)]
pub struct TargetsCommand {
    #[structopt(help = r"The source file to look up.

Either relative to the workspace root, or an absolute path
inside the workspace.

Example: app/src/main/scala/Main.scala
")]
    source: PathBuf,

    #[structopt(
        help = r"Give up on lookups that take longer than this many milliseconds.",
        long = "timeout-ms"
    )]
    timeout_ms: Option<u64>,

    #[structopt(flatten)]
    flags: Flags,
}

impl TargetsCommand {
    pub async fn run(self) -> Result<(), anyhow::Error> {
        let config: Config = self.flags.try_into()?;
        let project = open_project(&config).await?;
        let source = WorkspacePath::from_path(&self.source, project.workspace_root())?;

        let map = SourceToTargetMap::with_default_providers(&config);
        let mut reporter = LookupReporter::new(config.event_channel());

        let mut lookup = map.find_targets_building_source_file(&project, &source);
        let cancel = lookup.cancel_handle();

        let result = match self.timeout_ms {
            Some(ms) => {
                let timeout = Duration::from_millis(ms);
                match tokio::time::timeout(timeout, &mut lookup).await {
                    Ok(result) => result,
                    Err(_) => {
                        cancel.cancel();
                        reporter.flush();
                        bail!("Timed out after {}ms looking up targets for {}", ms, source);
                    }
                }
            }
            None => (&mut lookup).await,
        };

        reporter.flush();
        if reporter.failures() > 0 {
            debug!("{} lookups failed for {}", reporter.failures(), source);
        }

        match result? {
            Some(targets) => {
                for target in targets {
                    println!("{}", target.label());
                }
            }
            None => debug!("No provider knows of a target building {}", source),
        }

        Ok(())
    }
}
