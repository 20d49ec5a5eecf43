use anyhow::{Context, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;

use super::store::ConfigStore;
use crate::domain::models::{ConfigValue, LogConfig, LogOverrides};

/// Key of the logger section in a config document.
pub const LOGGER_SECTION: &str = "logger";

/// Prefix of environment variables overriding logger settings.
pub const ENV_PREFIX: &str = "CONFKIT_LOG_";

/// Builds logger settings from a loaded configuration.
pub struct LogConfigLoader;

impl LogConfigLoader {
    /// Resolve [`LogConfig`] for `store`.
    ///
    /// Precedence (lowest to highest):
    /// 1. `LogConfig::default()`
    /// 2. the `logger` section of the document
    /// 3. `CONFKIT_LOG_*` environment variables
    ///
    /// Zero and empty values in layers 2 and 3 keep the default.
    pub fn from_store(store: &ConfigStore) -> Result<LogConfig> {
        let overrides = Self::overrides(store)?;
        Ok(LogConfig::default().with_overrides(&overrides))
    }

    /// The merged override layers, before they are applied to the defaults.
    pub fn overrides(store: &ConfigStore) -> Result<LogOverrides> {
        let section = store
            .get(LOGGER_SECTION)
            .cloned()
            .unwrap_or_else(|| ConfigValue::Mapping(Default::default()));

        Figment::new()
            .merge(Serialized::defaults(section))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .with_context(|| format!("invalid `{LOGGER_SECTION}` configuration"))
    }
}
