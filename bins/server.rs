use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    // .env must be loaded before the filter reads RUST_LOG
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    info!(service = "catalog", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> ExitCode {
    init_logging();

    let instance_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "catalog",
            event = "panic",
            %instance_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let config = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "catalog", event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    let worker_threads = config.server.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "catalog", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "catalog",
        event = "start",
        %instance_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "service catalog starting"
    );

    // run() owns graceful shutdown on Ctrl+C
    match rt.block_on(server::run(config)) {
        Ok(()) => {
            info!(service = "catalog", event = "stop", %instance_id, pid, "server stopped normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "catalog", event = "run_failed", error = %e, "server::run returned error");
            ExitCode::FAILURE
        }
    }
}
