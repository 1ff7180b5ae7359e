use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use speedcheck::cli::{Cli, cli_to_config};
use speedcheck::client::PsiClient;
use speedcheck::config::{CliConfig, Config};
use speedcheck::logging;
use speedcheck::output;
use speedcheck::progress::ProgressReporter;
use speedcheck::runner::Runner;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: &Cli) -> speedcheck::Result<i32> {
    let cli_config = cli_to_config(cli);
    let config = load_and_merge_config(cli, &cli_config)?;

    logging::init_logger(config.verbose.unwrap_or(false), cli.quiet);
    config.validate()?;

    let render_opts = config.render_options()?;
    let workers = config.worker_count().min(cli.urls.len().max(1));
    logging::log_config_info(&config, workers);

    let client = Arc::new(PsiClient::new(
        config.timeout_duration(),
        config.api_key.clone(),
        config.api_endpoint.clone(),
    )?);
    let runner = Runner::new(
        workers,
        config.retry_budget(),
        config.retry_delay_duration(),
        config.device_profile(),
    );

    let mut progress = ProgressReporter::new(!cli.quiet && !cli.no_progress);
    progress.start(cli.urls.len());

    let started = Instant::now();
    logging::log_run_start(cli.urls.len());
    let reports = runner.run(&cli.urls, client, Some(&progress)).await?;
    let failures = reports.iter().filter(|r| r.is_failed()).count();
    logging::log_run_complete(reports.len(), failures, started.elapsed().as_millis());
    progress.finish(reports.len() - failures, reports.len());

    for line in output::render_summary(&reports, &render_opts) {
        println!("{line}");
    }
    println!();
    for line in output::render_reports(&reports, &render_opts) {
        println!("{line}");
    }
    println!();
    println!("{}", output::render_footer(chrono::Local::now()));

    Ok(if failures > 0 { 1 } else { 0 })
}

/// Load configuration from file or standard locations and merge with CLI
/// flags (CLI takes precedence).
fn load_and_merge_config(cli: &Cli, cli_config: &CliConfig) -> speedcheck::Result<Config> {
    let config = if cli.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli.config {
        Config::load_from_file(Path::new(config_file)).inspect_err(|e| {
            logging::log_error(&format!("Could not load config file '{config_file}'"), Some(e));
        })?
    } else {
        Config::load_from_standard_locations()
    };

    Ok(config.merge_with_cli(cli_config))
}
