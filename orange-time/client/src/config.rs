use config::{Environment, Map};
use serde::Deserialize;

const ENV_PREFIX: &str = "ORANGE_TIME";

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the task server, without the `/api/tasks` path.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl ClientConfig {
    /// Loads configuration from `ORANGE_TIME_*` environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    /// Loads configuration from the given variables instead of the process environment.
    pub fn from_source(variables: Map<String, String>) -> anyhow::Result<Self> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX).source(Some(variables)))
    }

    fn from_environment(environment: Environment) -> anyhow::Result<Self> {
        let settings = config::Config::builder().add_source(environment).build()?;
        Ok(settings.try_deserialize()?)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

fn default_api_url() -> String {
    "http://localhost:3001".to_string()
}
