pub mod config {
    use serde::Deserialize;
    use std::path::{Path, PathBuf};

    #[derive(Deserialize, Debug, Clone)]
    pub struct Config {
        #[serde(default = "default_port")]
        pub port: u16,
        /// JSON array file holding every task.
        #[serde(default = "default_data_file")]
        pub data_file: PathBuf,
        /// Directory of browser assets served at `/`. Nothing is served
        /// when unset.
        #[serde(default)]
        pub static_dir: Option<PathBuf>,
        /// Reject new tasks whose due date is before today.
        #[serde(default = "default_enforce_future_due_dates")]
        pub enforce_future_due_dates: bool,
    }

    impl Config {
        /// Loads configuration from environment variables
        /// (`PORT`, `DATA_FILE`, `STATIC_DIR`, `ENFORCE_FUTURE_DUE_DATES`).
        pub fn from_env() -> anyhow::Result<Self> {
            let settings = config::Config::builder()
                .add_source(config::Environment::default().try_parsing(true))
                .build()?;

            let config: Config = settings.try_deserialize()?;
            Ok(config)
        }

        /// The static asset directory, treating `STATIC_DIR=""` as unset.
        pub fn static_dir(&self) -> Option<&Path> {
            self.static_dir
                .as_deref()
                .filter(|dir| !dir.as_os_str().is_empty())
        }
    }

    fn default_port() -> u16 {
        3000
    }

    fn default_data_file() -> PathBuf {
        PathBuf::from("data.json")
    }

    fn default_enforce_future_due_dates() -> bool {
        true
    }
}

pub mod api;
pub mod web;
