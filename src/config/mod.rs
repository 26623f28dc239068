#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::adapters::http::{DEFAULT_BIO_ENDPOINT, DEFAULT_USER_AGENT};
use crate::core::pipeline::DEFAULT_FETCH_TIMEOUT;
use crate::core::scanner::DEFAULT_MARKERS;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_email, validate_endpoint_template, validate_markers, validate_path, validate_range,
    Validate,
};
use std::time::Duration;

pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const DEFAULT_SENDER: &str = "no-reply@profile-guard.local";
pub const MAX_FETCH_TIMEOUT_SECS: u64 = 120;

/// Effective settings after defaults, the TOML file and command line
/// overrides have been layered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    pub markers: Vec<String>,
    pub fetch_timeout: Duration,
    pub bio_endpoint: String,
    pub user_agent: String,
    pub output_path: String,
    pub sender: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            markers: DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            bio_endpoint: DEFAULT_BIO_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            sender: DEFAULT_SENDER.to_string(),
        }
    }
}

impl ConfigProvider for GuardConfig {
    fn markers(&self) -> &[String] {
        &self.markers
    }

    fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    fn bio_endpoint(&self) -> &str {
        &self.bio_endpoint
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn sender_address(&self) -> &str {
        &self.sender
    }
}

impl Validate for GuardConfig {
    fn validate(&self) -> Result<()> {
        validate_markers("markers", &self.markers)?;
        validate_range(
            "fetch_timeout_secs",
            self.fetch_timeout.as_secs(),
            1,
            MAX_FETCH_TIMEOUT_SECS,
        )?;
        validate_endpoint_template("bio_endpoint", &self.bio_endpoint)?;
        validate_path("output_path", &self.output_path)?;
        validate_email("sender", &self.sender)?;
        Ok(())
    }
}
