//! Configuration file support and CLI merging.
//!
//! Settings come from three layers: built-in defaults, an optional
//! `.speedcheck.toml` file, and CLI flags. Later layers win.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::DeviceProfile;
use crate::core::constants::{audit_filters, layout, timeouts};
use crate::core::error::{Result, SpeedcheckError};
use crate::output::{AuditFilter, RenderOptions};

/// File-backed configuration. Every field is optional so that a file can
/// set only what it cares about.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Concurrent fetch workers; defaults to the CPU count
    pub workers: Option<usize>,
    /// Silent retries per URL after the first attempt
    pub retry: Option<u32>,
    /// Delay between retries, in milliseconds
    pub retry_delay: Option<u64>,
    /// Per-request timeout, in seconds
    pub timeout: Option<u64>,
    /// Simulate a mobile device instead of desktop
    pub mobile: Option<bool>,
    /// Show URL paths instead of full URLs in the summary
    pub path_only: Option<bool>,
    /// Audit filter: "all", "failed" or "none"
    pub audits: Option<String>,
    /// Detail line cap; negative means unlimited, 0 drops details
    pub max_details: Option<i64>,
    /// Detail cell width before elision; 0 disables elision
    pub detail_width: Option<usize>,
    /// PageSpeed Insights API key
    pub api_key: Option<String>,
    /// Override for the PSI endpoint
    pub api_endpoint: Option<String>,
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: None,
            retry: Some(0),
            retry_delay: Some(timeouts::DEFAULT_RETRY_DELAY_MS),
            timeout: Some(timeouts::DEFAULT_TIMEOUT_SECONDS),
            mobile: Some(false),
            path_only: Some(false),
            audits: Some(audit_filters::DEFAULT.to_string()),
            max_details: Some(layout::DEFAULT_DETAIL_LINES),
            detail_width: Some(layout::DEFAULT_DETAIL_WIDTH),
            api_key: None,
            api_endpoint: None,
            verbose: Some(false),
        }
    }
}

/// Settings collected from the command line, merged over [`Config`].
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub workers: Option<usize>,
    pub retry: Option<u32>,
    pub retry_delay: Option<u64>,
    pub timeout: Option<u64>,
    pub mobile: Option<bool>,
    pub path_only: Option<bool>,
    pub audits: Option<String>,
    pub max_details: Option<i64>,
    pub detail_width: Option<usize>,
    pub api_key: Option<String>,
    pub api_endpoint: Option<String>,
    pub verbose: Option<bool>,
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            SpeedcheckError::Config(format!("invalid config file {}: {e}", path.display()))
        })?;
        Ok(config)
    }

    /// Looks for `.speedcheck.toml` in the current directory and up to
    /// three parent directories. Returns defaults when none is found.
    pub fn load_from_standard_locations() -> Self {
        let mut dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        for _ in 0..=3 {
            let candidate = dir.join(".speedcheck.toml");
            if candidate.is_file()
                && let Ok(config) = Self::load_from_file(&candidate)
            {
                return Self::default().merged_over(&config);
            }
            if !dir.pop() {
                break;
            }
        }
        Self::default()
    }

    /// Returns `self` with any fields set in `other` taking precedence.
    fn merged_over(&self, other: &Config) -> Self {
        Self {
            workers: other.workers.or(self.workers),
            retry: other.retry.or(self.retry),
            retry_delay: other.retry_delay.or(self.retry_delay),
            timeout: other.timeout.or(self.timeout),
            mobile: other.mobile.or(self.mobile),
            path_only: other.path_only.or(self.path_only),
            audits: other.audits.clone().or_else(|| self.audits.clone()),
            max_details: other.max_details.or(self.max_details),
            detail_width: other.detail_width.or(self.detail_width),
            api_key: other.api_key.clone().or_else(|| self.api_key.clone()),
            api_endpoint: other
                .api_endpoint
                .clone()
                .or_else(|| self.api_endpoint.clone()),
            verbose: other.verbose.or(self.verbose),
        }
    }

    /// Applies CLI flags on top of this configuration.
    pub fn merge_with_cli(&self, cli: &CliConfig) -> Self {
        Self {
            workers: cli.workers.or(self.workers),
            retry: cli.retry.or(self.retry),
            retry_delay: cli.retry_delay.or(self.retry_delay),
            timeout: cli.timeout.or(self.timeout),
            mobile: cli.mobile.or(self.mobile),
            path_only: cli.path_only.or(self.path_only),
            audits: cli.audits.clone().or_else(|| self.audits.clone()),
            max_details: cli.max_details.or(self.max_details),
            detail_width: cli.detail_width.or(self.detail_width),
            api_key: cli.api_key.clone().or_else(|| self.api_key.clone()),
            api_endpoint: cli
                .api_endpoint
                .clone()
                .or_else(|| self.api_endpoint.clone()),
            verbose: cli.verbose.or(self.verbose),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == Some(0) {
            return Err(SpeedcheckError::Config(
                "workers must be positive".to_string(),
            ));
        }
        if let Some(timeout) = self.timeout {
            if timeout == 0 || timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(SpeedcheckError::Config(format!(
                    "timeout must be between 1 and {} seconds",
                    timeouts::MAX_TIMEOUT_SECONDS
                )));
            }
        }
        if let Some(ref audits) = self.audits
            && !audit_filters::ALL_FILTERS.contains(&audits.as_str())
        {
            return Err(SpeedcheckError::Config(format!(
                "audits must be one of {:?}",
                audit_filters::ALL_FILTERS
            )));
        }
        Ok(())
    }

    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }

    pub fn retry_budget(&self) -> u32 {
        self.retry.unwrap_or(0)
    }

    pub fn retry_delay_duration(&self) -> Duration {
        Duration::from_millis(self.retry_delay.unwrap_or(timeouts::DEFAULT_RETRY_DELAY_MS))
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(timeouts::DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn device_profile(&self) -> DeviceProfile {
        if self.mobile.unwrap_or(false) {
            DeviceProfile::Mobile
        } else {
            DeviceProfile::Desktop
        }
    }

    pub fn audit_filter(&self) -> Result<AuditFilter> {
        match self.audits {
            Some(ref s) => AuditFilter::parse(s),
            None => Ok(AuditFilter::default()),
        }
    }

    pub fn render_options(&self) -> Result<RenderOptions> {
        let max_detail_lines = match self.max_details.unwrap_or(layout::DEFAULT_DETAIL_LINES) {
            n if n < 0 => None,
            n => Some(n as usize),
        };
        Ok(RenderOptions {
            full_urls: !self.path_only.unwrap_or(false),
            audits: self.audit_filter()?,
            max_detail_lines,
            detail_width: self.detail_width.unwrap_or(layout::DEFAULT_DETAIL_WIDTH),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.retry, Some(0));
        assert_eq!(config.timeout, Some(60));
        assert_eq!(config.audits.as_deref(), Some("failed"));
        assert_eq!(config.max_details, Some(5));
        assert_eq!(config.device_profile(), DeviceProfile::Desktop);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
workers = 4
retry = 2
mobile = true
audits = "all"
max_details = -1
api_key = "secret"
"#
        )
        .unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.workers, Some(4));
        assert_eq!(config.retry, Some(2));
        assert_eq!(config.mobile, Some(true));
        assert_eq!(config.audits.as_deref(), Some("all"));
        assert_eq!(config.max_details, Some(-1));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        // Fields absent from the file stay unset.
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_load_from_file__rejects_unknown_keys() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "retires = 3").unwrap();

        let err = Config::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, SpeedcheckError::Config(_)));
    }

    #[test]
    fn test_merge_with_cli__cli_wins() {
        let config = Config {
            workers: Some(2),
            retry: Some(1),
            ..Default::default()
        };
        let cli = CliConfig {
            workers: Some(8),
            mobile: Some(true),
            ..Default::default()
        };

        let merged = config.merge_with_cli(&cli);
        assert_eq!(merged.workers, Some(8));
        assert_eq!(merged.retry, Some(1));
        assert_eq!(merged.mobile, Some(true));
    }

    #[test]
    fn test_validate__rejects_zero_workers() {
        let config = Config {
            workers: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SpeedcheckError::Config(_))
        ));
    }

    #[test]
    fn test_validate__rejects_bad_timeout() {
        let config = Config {
            timeout: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            timeout: Some(timeouts::MAX_TIMEOUT_SECONDS + 1),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate__rejects_unknown_audit_filter() {
        let config = Config {
            audits: Some("some".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_render_options__max_details_mapping() {
        let unlimited = Config {
            max_details: Some(-1),
            ..Default::default()
        };
        assert_eq!(unlimited.render_options().unwrap().max_detail_lines, None);

        let none = Config {
            max_details: Some(0),
            ..Default::default()
        };
        assert_eq!(none.render_options().unwrap().max_detail_lines, Some(0));

        let capped = Config {
            max_details: Some(7),
            ..Default::default()
        };
        assert_eq!(capped.render_options().unwrap().max_detail_lines, Some(7));
    }

    #[test]
    fn test_render_options__path_only_disables_full_urls() {
        let config = Config {
            path_only: Some(true),
            ..Default::default()
        };
        assert!(!config.render_options().unwrap().full_urls);
    }

    #[test]
    fn test_device_profile__mobile() {
        let config = Config {
            mobile: Some(true),
            ..Default::default()
        };
        assert_eq!(config.device_profile(), DeviceProfile::Mobile);
    }

    #[test]
    fn test_durations() {
        let config = Config {
            timeout: Some(30),
            retry_delay: Some(250),
            ..Default::default()
        };
        assert_eq!(config.timeout_duration(), Duration::from_secs(30));
        assert_eq!(config.retry_delay_duration(), Duration::from_millis(250));
    }
}
