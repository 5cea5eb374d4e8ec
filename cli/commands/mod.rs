mod deploy_jar;
mod run_config;
mod targets;

pub use deploy_jar::*;
pub use run_config::*;
pub use targets::*;
