use crate::config::{GuardConfig, TomlConfig};
use crate::utils::error::{GuardError, Result};
use crate::utils::validation::{validate_email, validate_required_field, Validate};
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "profile-guard")]
#[command(about = "Checks a social profile for risky bio links and emails a security report")]
pub struct CliConfig {
    /// Email address of the submitter; the report is sent here
    #[arg(long)]
    pub email: Option<String>,

    /// Profile URL, e.g. https://instagram.com/alice
    #[arg(long)]
    pub url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long, value_delimiter = ',', help = "Suspicious link markers, comma separated")]
    pub markers: Vec<String>,

    #[arg(long)]
    pub fetch_timeout_secs: Option<u64>,

    #[arg(long, help = "Bio endpoint template containing {handle}")]
    pub bio_endpoint: Option<String>,

    #[arg(long)]
    pub user_agent: Option<String>,

    #[arg(long, env = "EMAIL_ADDRESS", help = "Sender address for report emails")]
    pub sender: Option<String>,

    #[arg(long, help = "List stored analyses, newest first")]
    pub history: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Defaults, then the TOML file, then command line flags.
    pub fn resolve(&self) -> Result<GuardConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.apply_to(GuardConfig::default()),
            None => GuardConfig::default(),
        };

        if !self.markers.is_empty() {
            config.markers = self.markers.clone();
        }
        if let Some(secs) = self.fetch_timeout_secs {
            config.fetch_timeout = Duration::from_secs(secs);
        }
        if let Some(endpoint) = &self.bio_endpoint {
            config.bio_endpoint = endpoint.clone();
        }
        if let Some(agent) = &self.user_agent {
            config.user_agent = agent.clone();
        }
        if let Some(path) = &self.output_path {
            config.output_path = path.clone();
        }
        if let Some(sender) = &self.sender {
            config.sender = sender.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Submitter email and profile URL for an analysis run.
    pub fn analysis_target(&self) -> Result<(&str, &str)> {
        let email = validate_required_field("email", &self.email)?;
        let url = validate_required_field("url", &self.url)?;
        validate_email("email", email)?;

        if url.trim().is_empty() {
            return Err(GuardError::InvalidConfigValueError {
                field: "url".to_string(),
                value: url.clone(),
                reason: "Profile URL cannot be empty".to_string(),
            });
        }

        Ok((email.as_str(), url.as_str()))
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if !self.history {
            self.analysis_target()?;
        }
        self.resolve().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> CliConfig {
        let mut argv = vec!["profile-guard"];
        argv.extend_from_slice(args);
        CliConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = parse(&[
            "--email",
            "alice@example.com",
            "--url",
            "https://instagram.com/alice",
            "--markers",
            "bit.ly,tinyurl.com",
            "--fetch-timeout-secs",
            "2",
            "--sender",
            "team@analyzer.example",
        ]);

        let config = cli.resolve().unwrap();
        assert_eq!(config.markers, vec!["bit.ly", "tinyurl.com"]);
        assert_eq!(config.fetch_timeout, Duration::from_secs(2));
        assert_eq!(config.sender, "team@analyzer.example");
        assert_eq!(
            cli.analysis_target().unwrap(),
            ("alice@example.com", "https://instagram.com/alice")
        );
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_flags_win_over_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[fetch]\ntimeout_seconds = 9\n[storage]\noutput_path = \"./from-file\"\n")
            .unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();

        let cli = parse(&["--config", &path, "--fetch-timeout-secs", "4", "--sender", "a@b.io"]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.fetch_timeout, Duration::from_secs(4));
        assert_eq!(config.output_path, "./from-file");
    }

    #[test]
    fn test_analysis_requires_email_and_url() {
        let cli = parse(&["--url", "https://instagram.com/alice", "--sender", "a@b.io"]);
        assert!(matches!(
            cli.analysis_target(),
            Err(GuardError::MissingConfigError { .. })
        ));
        assert!(cli.validate().is_err());

        let cli = parse(&["--email", "not-an-email", "--url", "x", "--sender", "a@b.io"]);
        assert!(cli.analysis_target().is_err());
    }

    #[test]
    fn test_history_needs_no_target() {
        let cli = parse(&["--history", "--sender", "a@b.io"]);
        assert!(cli.validate().is_ok());
    }
}
