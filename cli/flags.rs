use blazelink_core::{Config, ConfigError, FailurePolicy};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Default, Debug, Clone, StructOpt)]
pub struct Flags {
    #[structopt(
        help = r"The root of the workspace.

When missing, it is found by walking up from the current directory
until a MODULE.bazel, WORKSPACE.bazel or WORKSPACE file shows up.
",
        long = "workspace-root"
    )]
    pub(crate) workspace_root: Option<PathBuf>,

    #[structopt(
        help = r"A JSON file with the synced project data: the output directory and the targets of the workspace.",
        long = "project-data"
    )]
    pub(crate) project_data: Option<PathBuf>,

    #[structopt(
        help = r"The build tool used for queries. Defaults to $BLAZELINK_BUILD_TOOL, or bazel.",
        long = "build-tool"
    )]
    pub(crate) build_tool: Option<PathBuf>,

    #[structopt(
        help = r"Use this output directory instead of the one in the project data.",
        long = "bin-dir"
    )]
    pub(crate) bin_dir: Option<PathBuf>,

    #[structopt(
        help = r"Fail when every lookup failed, instead of reporting that nothing was found.",
        long = "strict"
    )]
    pub(crate) strict: bool,
}

impl TryFrom<Flags> for Config {
    type Error = ConfigError;

    fn try_from(flags: Flags) -> Result<Self, Self::Error> {
        let mut config = Config::builder();

        config.failure_policy(if flags.strict {
            FailurePolicy::Strict
        } else {
            FailurePolicy::Quiet
        });

        if let Ok(cwd) = std::env::current_dir() {
            config.invocation_dir(cwd);
        }

        if let Some(root) = flags.workspace_root {
            config.workspace_root(root);
        }

        if let Some(path) = flags.project_data {
            config.project_data_path(path);
        }

        if let Some(tool) = flags.build_tool {
            config.build_tool(tool);
        }

        if let Some(bin_dir) = flags.bin_dir {
            config.bin_dir(bin_dir);
        }

        config.build()
    }
}
