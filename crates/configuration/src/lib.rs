use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::Settings;

/// Prefix for environment overrides, e.g. `SCALE_DECAY_HOST=127.0.0.1`.
pub const ENV_PREFIX: &str = "SCALE_DECAY";

/// Loads the service settings.
///
/// Sources, lowest precedence first: built-in defaults, an optional
/// `config.toml` in the working directory, `SCALE_DECAY_*` environment
/// variables, and finally the plain `PORT` variable.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_with_port(std::env::var("PORT").ok())
}

fn load_config_with_port(port: Option<String>) -> Result<Settings, ConfigError> {
    let defaults = Settings::default();

    let builder = config::Config::builder()
        .set_default("host", defaults.host.to_string())?
        .set_default("port", i64::from(defaults.port))?
        .set_default("body_limit_bytes", defaults.body_limit_bytes as i64)?
        // Tells the builder to look for an optional file named `config.toml`
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX))
        .set_override_option("port", port)?
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;

    if settings.body_limit_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "body_limit_bytes must be greater than zero".to_string(),
        ));
    }

    tracing::debug!(addr = %settings.addr(), "Configuration loaded.");
    Ok(settings)
}
