//! Command orchestration helpers from UI actions to backend command queue.

use client_core::GenerationError;
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd` for the worker.
///
/// A full or disconnected queue comes back as [`GenerationError::WorkerUnavailable`]
/// so the caller can settle the pending generation instead of waiting forever.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), GenerationError> {
    let cmd_name = cmd.name();
    tracing::debug!(command = cmd_name, "queueing ui->backend command");

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            Err(GenerationError::WorkerUnavailable(
                "UI command queue is full".to_string(),
            ))
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
            Err(GenerationError::WorkerUnavailable(
                "backend command processor disconnected".to_string(),
            ))
        }
    }
}
