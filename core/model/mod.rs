mod label;
mod project;
mod target_info;
mod workspace_path;

pub use label::*;
pub use project::*;
pub use target_info::*;
pub use workspace_path::*;
