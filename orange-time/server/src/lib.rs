pub mod config {
    use config::{Environment, Map};
    use serde::Deserialize;
    use std::path::PathBuf;

    const ENV_PREFIX: &str = "ORANGE_TIME";

    #[derive(Deserialize, Debug, Clone, PartialEq)]
    pub struct Config {
        #[serde(default = "default_port")]
        pub port: u16,
        #[serde(default = "default_data_file")]
        pub data_file: PathBuf,
        #[serde(default = "default_body_limit_bytes")]
        pub body_limit_bytes: usize,
    }

    impl Config {
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

            let config: Config = settings.try_deserialize()?;
            Ok(config)
        }
    }

    impl Default for Config {
        fn default() -> Self {
            Self {
                port: default_port(),
                data_file: default_data_file(),
                body_limit_bytes: default_body_limit_bytes(),
            }
        }
    }

    fn default_port() -> u16 {
        3001
    }

    fn default_data_file() -> PathBuf {
        PathBuf::from("tasks.json")
    }

    fn default_body_limit_bytes() -> usize {
        50 * 1024 * 1024
    }

}

pub mod storage;
pub mod web;
