//! Events posted from the backend worker back to the UI thread.

use client_core::GenerationError;
use uuid::Uuid;

#[derive(Debug)]
pub enum UiEvent {
    GenerationFinished {
        request_id: Uuid,
        outcome: Result<String, GenerationError>,
    },
    /// The worker exited and will not answer outstanding commands.
    WorkerStopped(String),
}
