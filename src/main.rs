//! wheel - project scaffolding CLI
//!
//! Runs the startup checks, then reports whether a newer release is
//! published without delaying the command itself.

use std::process::ExitCode;
use std::sync::Arc;

use tracing::{debug, error};
use wheel::config::StartupSettings;
use wheel::domain::{LogLevel, LOG_LEVEL_VAR};
use wheel::logging::{self, LogHandle};
use wheel::registry::{HttpClient, NpmRegistry};
use wheel::startup::{ProcessEnv, StartupValidator};
use wheel::update::spawn_update_advisory;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let initial = LogLevel::from_env_value(std::env::var(LOG_LEVEL_VAR).ok().as_deref());
    let log = match logging::init(initial) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("wheel: failed to initialize logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(log).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(log: LogHandle) -> anyhow::Result<ExitCode> {
    let settings = StartupSettings::from_env()?;
    let validator = StartupValidator::new(settings.clone());

    let outcome = validator.run(&ProcessEnv::capture());
    let config = match outcome.result {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    log.set_level(config.log_level)?;

    if config.print_version {
        println!("{}", settings.current_version);
        return Ok(ExitCode::SUCCESS);
    }

    for (key, value) in config.exported_vars() {
        std::env::set_var(key, value);
    }
    debug!("startup complete, config home {}", config.config_home.display());

    if settings.update_check {
        let registry = Arc::new(NpmRegistry::new(HttpClient::new()?, settings.mirror.clone()));
        let advisory = spawn_update_advisory(registry, settings.advisory_request());

        // Commands run here while the advisory is in flight.

        if let Err(e) = advisory.await {
            debug!("update advisory task ended abnormally: {}", e);
        }
    }

    Ok(ExitCode::SUCCESS)
}
