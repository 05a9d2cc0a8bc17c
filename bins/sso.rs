use std::process::ExitCode;

use clap::Parser;
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

/// Single sign-on service: user registration, login and admin checks.
#[derive(Parser, Debug)]
#[command(name = "sso", version, about)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, env = "CONFIG_PATH", default_value = "config.toml")]
    config: String,
}

fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();

    let cfg = match configs::AppConfig::load_and_validate_from(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            // no env yet, so fall back to text output
            common::utils::logging::init_logging_default();
            error!(service = "sso", event = "config_invalid", path = %cli.config, error = %e, "cannot load configuration");
            return ExitCode::FAILURE;
        }
    };
    common::utils::logging::init_for_env(&cfg.env);
    info!(service = "sso", event = "logger_init", env = %cfg.env, "tracing subscriber initialized");

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "sso",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "sso", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "sso",
        event = "start",
        %service_id,
        pid,
        version,
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "sso service starting"
    );

    // run() owns graceful shutdown on Ctrl+C and SIGTERM
    match rt.block_on(server::run(cfg)) {
        Ok(()) => {
            info!(service = "sso", event = "stop", %service_id, pid, "sso stopped normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "sso", event = "run_failed", error = %e, "server::run returned error");
            ExitCode::FAILURE
        }
    }
}
