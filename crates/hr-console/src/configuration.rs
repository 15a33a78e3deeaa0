use anyhow::Context;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::{convert::TryFrom, path::PathBuf};

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Configuration {
    pub client: ClientSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ClientSettings {
    /// Origin of the account backend, without a trailing slash
    pub base_url: String,
    /// Where the session is kept between runs
    pub storage_path: PathBuf,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub page_size: u32,
}

impl ClientSettings {
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

pub fn get_configuration() -> anyhow::Result<Configuration> {
    let base_path = std::env::current_dir().context("failed to determine the current directory")?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(|e: String| anyhow::anyhow!(e))
        .context("failed to parse APP_ENVIRONMENT")?;
    let environment_filename = format!("{}.toml", environment.as_str());
    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.toml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_CLIENT__BASE_URL=http://10.0.0.5:8080` would set `Settings.client.base_url`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("failed to read configuration")?;

    settings
        .try_deserialize::<Configuration>()
        .context("configuration is not valid")
}

/// The possible runtime environment for our application.
#[derive(Debug, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{other} is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}
