//! Shared application state for the varz host.
//!
//! Builds the executor from config, hands it to the engine task, and keeps
//! the config plus a handle to that task.

use std::sync::Arc;

use tokio::task::JoinHandle;

use varz_core::error::Result;
use varz_core::time::Clock;
use varz_core::Executor;

use crate::config::VarzConfig;
use crate::engine::EngineHandle;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    engine: EngineHandle,
}

struct AppStateInner {
    cfg: VarzConfig,
}

impl AppState {
    /// Build application state and start the engine task.
    /// Must run inside a tokio runtime. The returned task finishes once every
    /// clone of the state (and every engine handle) is dropped.
    pub fn new(cfg: VarzConfig, clock: Arc<dyn Clock>) -> Result<(Self, JoinHandle<()>)> {
        cfg.validate()?;

        let executor = Executor::with_options(cfg.engine.options(), clock);
        let (engine, task) = EngineHandle::spawn(executor, cfg.worker.queue_depth);

        Ok((
            Self {
                inner: Arc::new(AppStateInner { cfg }),
                engine,
            },
            task,
        ))
    }

    pub fn cfg(&self) -> &VarzConfig {
        &self.inner.cfg
    }

    pub fn engine(&self) -> EngineHandle {
        self.engine.clone()
    }
}
