// Command-line interface definitions and parsing for speedcheck

use clap::Parser;

use crate::config::CliConfig;
use crate::core::constants::audit_filters;

#[derive(Parser, Debug)]
#[command(author, version, about = "Analyze web page performance via the PageSpeed Insights API", long_about = None)]
pub struct Cli {
    /// URLs to analyze
    #[arg(required = true)]
    pub urls: Vec<String>,

    // Analysis Options
    /// Simulate a mobile device instead of desktop
    #[arg(short = 'm', long, help_heading = "Analysis Options")]
    pub mobile: bool,

    /// PageSpeed Insights API key
    #[arg(long, value_name = "KEY", help_heading = "Analysis Options")]
    pub api_key: Option<String>,

    /// Override the PageSpeed Insights API endpoint
    #[arg(long, value_name = "URL", help_heading = "Analysis Options")]
    pub api_endpoint: Option<String>,

    // Fetch Options
    /// Concurrent requests (default: CPU cores)
    #[arg(long, value_name = "COUNT", help_heading = "Fetch Options")]
    pub workers: Option<usize>,

    /// Retry attempts per URL after a failed request (default: 0)
    #[arg(long, value_name = "COUNT", help_heading = "Fetch Options")]
    pub retry: Option<u32>,

    /// Delay between retries in ms (default: 0)
    #[arg(long, value_name = "MS", help_heading = "Fetch Options")]
    pub retry_delay: Option<u64>,

    /// Request timeout in seconds (default: 60)
    #[arg(short = 't', long, value_name = "SECONDS", help_heading = "Fetch Options")]
    pub timeout: Option<u64>,

    // Report Options
    /// Show URL paths instead of full URLs in the summary
    #[arg(long, help_heading = "Report Options")]
    pub path_only: bool,

    /// Audits to include in reports
    #[arg(long, value_name = "FILTER", value_parser = audit_filters::ALL_FILTERS, help_heading = "Report Options")]
    pub audits: Option<String>,

    /// Max lines per audit detail table; negative for unlimited, 0 to drop
    /// details (default: 5)
    #[arg(long, value_name = "COUNT", allow_hyphen_values = true, help_heading = "Report Options")]
    pub max_details: Option<i64>,

    /// Width budget for detail cells before elision; 0 disables (default: 40)
    #[arg(long, value_name = "CHARS", help_heading = "Report Options")]
    pub detail_width: Option<usize>,

    // Output & Verbosity
    /// Suppress progress output
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Disable progress bars
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

/// Collect CLI flags into the structure merged over file configuration.
/// Boolean flags only carry through when set, so a config file can still
/// enable them.
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        workers: cli.workers,
        retry: cli.retry,
        retry_delay: cli.retry_delay,
        timeout: cli.timeout,
        mobile: cli.mobile.then_some(true),
        path_only: cli.path_only.then_some(true),
        audits: cli.audits.clone(),
        max_details: cli.max_details,
        detail_width: cli.detail_width,
        api_key: cli.api_key.clone(),
        api_endpoint: cli.api_endpoint.clone(),
        verbose: cli.verbose.then_some(true),
    }
}
