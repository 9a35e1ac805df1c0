//! Backend commands queued from UI to backend worker.

use shared::protocol::GenerateRequest;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Generate {
        request_id: Uuid,
        request: GenerateRequest,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Generate { .. } => "generate",
        }
    }
}
