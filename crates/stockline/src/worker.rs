//! Running pipelines off the calling thread.
//!
//! Each run gets its own named OS thread. The result comes back over a
//! bounded `async_channel`, so it can be awaited from any executor or polled
//! once per frame with [`PipelineTask::try_finish`].

use std::thread::JoinHandle;

use async_channel::{Receiver, TryRecvError};
use stockline_mesh::MeshResult;

use crate::error::{Error, Result};
use crate::pipeline::{Pipeline, Surface};

/// A pipeline run in progress on a worker thread.
///
/// Dropping the task discards the run: the worker finishes its current
/// stage work and its result is thrown away.
#[derive(Debug)]
pub struct PipelineTask {
    name: String,
    result_rx: Receiver<MeshResult<Surface>>,
    worker: JoinHandle<()>,
}

impl PipelineTask {
    /// Name of the stockline being built.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the worker thread has exited.
    ///
    /// The result may still be waiting to be taken.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Wait for the run to complete.
    ///
    /// # Errors
    ///
    /// Returns the pipeline's error, or [`Error::WorkerLost`] if the worker
    /// stopped without reporting.
    pub async fn finish(self) -> Result<Surface> {
        match self.result_rx.recv().await {
            Ok(result) => result.map_err(Error::from),
            Err(_) => Err(Error::WorkerLost),
        }
    }

    /// Take the result if the run has completed, without blocking.
    pub fn try_finish(&self) -> Option<Result<Surface>> {
        match self.result_rx.try_recv() {
            Ok(result) => Some(result.map_err(Error::from)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(Error::WorkerLost)),
        }
    }
}

/// Run `pipeline` over `bytes` on a new worker thread.
///
/// # Errors
///
/// Returns an error if the thread cannot be spawned.
pub fn spawn(pipeline: Pipeline, bytes: Vec<u8>) -> Result<PipelineTask> {
    let (result_tx, result_rx) = async_channel::bounded(1);
    let name = pipeline.name.clone();

    let worker = std::thread::Builder::new()
        .name(format!("stockline-{name}"))
        .spawn(move || {
            let result = pipeline.run(&bytes);
            if let Err(e) = &result {
                tracing::error!(name = %pipeline.name, "Failed to build stockline: {e}");
            }
            if result_tx.send_blocking(result).is_err() {
                tracing::debug!(name = %pipeline.name, "Stockline task dropped, discarding result");
            }
        })
        .map_err(|e| Error::Worker {
            message: e.to_string(),
        })?;

    Ok(PipelineTask {
        name,
        result_rx,
        worker,
    })
}
