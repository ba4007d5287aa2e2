use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml},
};
use lunar_tiles_application::error::{AppError, AppResult};
use lunar_tiles_application::infrastructure_config::Config;
use std::path::Path;

pub const ENV_PREFIX: &str = "LUNAR_TILES_";

/// Defaults, then `config.toml`, then `config.json`, then `LUNAR_TILES_*` variables.
pub fn load_config() -> AppResult<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if Path::new("config.toml").exists() {
        figment = figment.merge(Toml::file("config.toml"));
    }

    if Path::new("config.json").exists() {
        figment = figment.merge(Json::file("config.json"));
    }

    let config: Config = figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| AppError::ConfigError {
            message: format!("Failed to load configuration: {e}"),
        })?;

    config.validate()?;
    Ok(config)
}
