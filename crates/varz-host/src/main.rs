//! varz host binary.
//!
//! Reads one JSON operation record per line from stdin and writes read
//! results (and error lines) to stdout. Logs go to stderr.
//!
//! Usage: `varz [config.yaml]`; without a path the built-in defaults apply.

use std::sync::Arc;

use tokio::io::BufReader;
use tracing_subscriber::{fmt, EnvFilter};

use varz_core::time::SystemClock;
use varz_host::{app_state, config, transport};

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cfg = match std::env::args().nth(1) {
        Some(path) => config::load_from_file(&path).expect("config load failed"),
        None => config::VarzConfig::default(),
    };

    let (state, engine_task) =
        app_state::AppState::new(cfg, Arc::new(SystemClock)).expect("engine start failed");
    tracing::info!(
        slot_count = state.cfg().engine.slot_count,
        "varz host reading operations from stdin"
    );

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    let res = transport::stdio::run_session(&state, stdin, stdout).await;

    drop(state);
    let _ = engine_task.await;

    if let Err(e) = res {
        tracing::error!(error = %e, "session failed");
        std::process::exit(1);
    }
}
