use config_tree_core::ConfigValue;

use crate::error::ConfigError;

/// One post-processing pass over a backend configuration tree.
///
/// Passes consume the tree and return the transformed tree; a returned
/// error aborts processing of the whole backend configuration.
pub trait ConfigPass {
    /// Stable pass name, used in reports and diagnostics.
    fn name(&self) -> &'static str;

    fn process(&self, config: ConfigValue) -> Result<ConfigValue, ConfigError>;
}

/// Run `passes` in order, stopping at the first error.
pub fn apply_passes(
    passes: &[&dyn ConfigPass],
    mut config: ConfigValue,
) -> Result<ConfigValue, ConfigError> {
    for pass in passes {
        config = pass.process(config)?;
    }
    Ok(config)
}
