//! Engine worker.
//!
//! The executor is not synchronized, so exactly one task owns it. Everything
//! else talks to that task through a cloneable [`EngineHandle`]: requests go
//! over a bounded mpsc queue, each reply comes back on its own oneshot.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use varz_core::error::{Result, VarzError};
use varz_core::{Executor, OperationDescriptor};

struct Request {
    desc: OperationDescriptor,
    reply: oneshot::Sender<Result<Option<String>>>,
}

#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<Request>,
}

impl EngineHandle {
    /// Move `executor` into a new task. The task ends once every handle is dropped.
    pub fn spawn(executor: Executor, queue_depth: usize) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(queue_depth.max(1));
        let task = tokio::spawn(run(executor, rx));
        (Self { tx }, task)
    }

    /// Run one operation on the engine task and wait for its result.
    pub async fn execute(&self, desc: OperationDescriptor) -> Result<Option<String>> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Request { desc, reply })
            .await
            .map_err(|_| VarzError::Internal("engine task closed".into()))?;
        rx.await
            .map_err(|_| VarzError::Internal("engine task dropped reply".into()))?
    }
}

async fn run(mut executor: Executor, mut rx: mpsc::Receiver<Request>) {
    let opts = executor.options();
    tracing::info!(
        slot_count = opts.slot_count,
        sampler_capacity = opts.sampler_capacity,
        start_time = executor.metadata().start_time,
        "engine task started"
    );

    while let Some(req) = rx.recv().await {
        let kind = req.desc.kind();
        let res = executor.execute(&req.desc);
        if let Err(e) = &res {
            tracing::warn!(op = kind.as_str(), error = %e, "operation failed");
        }
        // Caller may have stopped waiting; the operation still applied.
        let _ = req.reply.send(res);
    }

    tracing::info!(
        counters = executor.counters().len(),
        samplers = executor.samplers().len(),
        "engine task stopped"
    );
}
