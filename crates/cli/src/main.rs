//! ECS Wait - Main Entry Point
//! Waits for ECS services to become stable within a deadline

mod config;
mod logging;
mod output;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};

// Import workspace crates
use ecswait_core::application::{Report, StabilityService};
use ecswait_core::port::time_provider::SystemTimeProvider;
use ecswait_infra_ecs::{connect, EcsReadinessProbe, EcsServiceCatalog};

use config::{Cli, Settings};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> ExitCode {
    // 1. Initialize logging
    let cli = Cli::parse();
    logging::init(cli.log_format);

    info!("ECS Wait v{} starting...", VERSION);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "Wait failed");
            output::fail(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the services became stable
async fn run(cli: Cli) -> Result<bool> {
    // 2. Validate configuration (no AWS call before this succeeds)
    let settings = Settings::from_cli(cli)?;
    let verbose = settings.request.verbose;

    // 3. Setup dependencies (DI wiring)
    let client = connect(&settings.credentials);
    let service = StabilityService::new(
        Arc::new(EcsServiceCatalog::new(client.clone())),
        Arc::new(EcsReadinessProbe::new(client)),
        Arc::new(SystemTimeProvider),
    );

    // 4. Poll
    let run = service.run(settings.request).await?;

    // 5. Report
    let report = run.report();
    match &report {
        Report::Stable { minutes, .. } => {
            if verbose {
                info!("Service is stable after {} minutes!", minutes);
            }
            output::write_outputs(&report.outputs())?;
            eprintln!("{}", "✓ Services are stable".green().bold());
            Ok(true)
        }
        Report::Unstable {
            message,
            never_attempted,
        } => {
            if *never_attempted {
                warn!(
                    cluster = %run.target.cluster,
                    "Timeout budget is not positive; stability was never checked"
                );
            }
            output::fail(message);
            Ok(false)
        }
    }
}
