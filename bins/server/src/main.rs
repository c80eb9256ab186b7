use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};

fn main() -> ExitCode {
    dotenv().ok();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |panic| {
        error!(service = "marketplace", event = "panic", pid, message = %panic, "unhandled panic occurred");
    }));

    // Thread count: config.toml first, then TOKIO_WORKER_THREADS
    let worker_threads = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg.server.worker_threads,
        Err(_) => std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()),
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            // Logging is not initialised yet at this point.
            common::utils::logging::init_logging_default();
            error!(service = "marketplace", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    rt.block_on(async move {
        match server::run().await {
            Ok(()) => {
                info!(service = "marketplace", event = "stop", pid, version, "server stopped normally");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = "marketplace", event = "run_failed", error = %e, "server::run returned error");
                eprintln!("marketplace-server: {e:#}");
                ExitCode::FAILURE
            }
        }
    })
}
