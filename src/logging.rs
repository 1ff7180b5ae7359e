use crate::config::Config;
use log::{debug, error, info, warn};

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Only show structured logs in verbose mode
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log effective configuration
pub fn log_config_info(config: &Config, actual_workers: usize) {
    let timeout = config.timeout.unwrap_or(60);
    let retry = config.retry.unwrap_or(0);
    let retry_delay = config.retry_delay.unwrap_or(0);
    let strategy = config.device_profile().strategy();

    info!("Configuration: workers={actual_workers}, timeout={timeout}s, strategy={strategy}");
    info!("Retry: attempts={retry}, delay={retry_delay}ms");
    info!(
        "API key: {}",
        if config.api_key.is_some() {
            "set"
        } else {
            "not set"
        }
    );
}

/// Log the start of an analysis run
pub fn log_run_start(url_count: usize) {
    info!("Starting analysis of {url_count} URL(s)");
}

/// Log completion of an analysis run
pub fn log_run_complete(url_count: usize, failures: usize, duration_ms: u128) {
    if failures == 0 {
        info!("Analysis complete: {url_count}/{url_count} URLs analyzed ({duration_ms}ms)");
    } else {
        warn!(
            "Analysis complete: {}/{} URLs analyzed, {} failed ({}ms)",
            url_count - failures,
            url_count,
            failures,
            duration_ms
        );
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}
