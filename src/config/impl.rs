use std::sync::OnceLock;

use super::StaticConfig;

static CONFIG: OnceLock<StaticConfig> = OnceLock::new();

/// Get the global configuration instance
pub fn get_config() -> &'static StaticConfig {
    CONFIG
        .get()
        .expect("Config not initialized. Call init_config() first.")
}

/// Initialize the global configuration
///
/// Loads configuration from "config.toml" in the current directory,
/// then applies `TIKARAM__*` environment overrides. Missing file means
/// in-memory defaults.
pub fn init_config() {
    CONFIG.get_or_init(StaticConfig::load);
}
