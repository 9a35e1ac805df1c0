//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::EmailGenerator;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Spawns the worker thread that owns the async runtime and runs commands in order.
///
/// The thread exits once every command sender is dropped or the UI stops listening.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    generator: Arc<dyn EmailGenerator>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::WorkerStopped(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                return;
            }
        };
        tracing::debug!("backend worker started");

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::Generate {
                    request_id,
                    request,
                } => {
                    let outcome = runtime.block_on(generator.generate(&request));
                    if let Err(err) = &outcome {
                        tracing::debug!(%request_id, "backend: generate failed: {err}");
                    }
                    if ui_tx
                        .send(UiEvent::GenerationFinished {
                            request_id,
                            outcome,
                        })
                        .is_err()
                    {
                        tracing::debug!("ui event receiver dropped; stopping backend worker");
                        break;
                    }
                }
            }
        }
        tracing::debug!("backend worker stopped");
    })
}
