//! # Run configurations
//!
//! Producers turn whatever is under the cursor into a launchable configuration, and later tell
//! whether an existing configuration is still the one they would produce.
//!
mod configuration;
mod context;
mod deploy_jar;

pub use configuration::*;
pub use context::*;
pub use deploy_jar::*;

pub trait RunConfigurationProducer {
    /// Fill in `configuration` from `context`. Returns `false`, leaving the configuration
    /// untouched, when this producer doesn't apply.
    fn setup_configuration_from_context(
        &self,
        configuration: &mut ApplicationConfiguration,
        context: &ConfigurationContext,
    ) -> bool;

    /// Whether `configuration` matches what this producer would set up for `context` right now.
    fn is_configuration_from_context(
        &self,
        configuration: &ApplicationConfiguration,
        context: &ConfigurationContext,
    ) -> bool;
}
