//! AAD Sync Controller
//!
//! One-shot batch job that mirrors Azure AD group membership into
//! `AADGroupSync` custom resources:
//! - creates or updates one AADGroupSync per configured group id
//! - deletes AADGroupSyncs for groups that are no longer configured
//!
//! Errors for individual groups are logged and skipped; only configuration,
//! authentication and cluster connection errors abort the run.

mod cluster;
mod config;
mod controller;
mod error;
mod logging;
mod mapper;
mod reconciler;
mod resource_client;
#[cfg(test)]
mod test_utils;

use crate::config::ControllerConfig;
use crate::error::ControllerError;
use crate::logging::LogLevel;
use clap::Parser;
use controller::Controller;
use tracing::{info, warn};

/// Mirror Azure AD groups into AADGroupSync resources
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Valid values are Debug, Info, Warning, Error
    #[arg(long = "loglevel", default_value = "Info", value_parser = logging::parse_log_level)]
    log_level: LogLevel,
}

#[tokio::main]
async fn main() -> Result<(), ControllerError> {
    let args = Args::parse();
    logging::init(args.log_level);

    // kube and reqwest both use rustls; pin the process-wide provider to ring
    if rustls::crypto::ring::default_provider().install_default().is_err() {
        warn!("rustls crypto provider was already installed");
    }

    info!("####################################################");
    info!("AAD Sync Controller");
    info!("####################################################");

    let config = ControllerConfig::load()?;

    let controller = Controller::new(config).await?;
    let report = controller.run().await;

    if !report.is_clean() {
        warn!("{} sync steps failed:", report.failures.len());
        for failure in &report.failures {
            warn!(
                "  {} {}: {}",
                failure.stage,
                failure.name.as_deref().unwrap_or("aadgroupsyncs"),
                failure.error
            );
        }
    }

    Ok(())
}
