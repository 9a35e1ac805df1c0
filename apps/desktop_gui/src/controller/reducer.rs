//! Form state and the transitions driven by user actions and backend events.

use client_core::{FailureKind, GenerationError};
use shared::{
    domain::{validate_context, EmailType},
    error::ValidationError,
    protocol::GenerateRequest,
};
use uuid::Uuid;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub const GENERATE_LABEL: &str = "Generate Email";
pub const GENERATING_LABEL: &str = "Generating...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading,
    Result,
}

/// Observable view, derived only from the loading flag and the response text.
pub fn derive_view_state(loading: bool, generated_response: &str) -> ViewState {
    if loading {
        ViewState::Loading
    } else if generated_response.is_empty() {
        ViewState::Idle
    } else {
        ViewState::Result
    }
}

#[derive(Debug, Default)]
pub struct FormState {
    selected_type: EmailType,
    context: String,
    generated_response: String,
    loading: bool,

    alert: Option<ValidationError>,
    in_flight: Option<Uuid>,
    last_failure: Option<FailureKind>,
}

impl FormState {
    pub fn selected_type(&self) -> EmailType {
        self.selected_type
    }

    pub fn select_type(&mut self, email_type: EmailType) {
        self.selected_type = email_type;
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn edit_context(&mut self, context: impl Into<String>) {
        self.context = context.into();
    }

    pub fn generated_response(&self) -> &str {
        &self.generated_response
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn alert(&self) -> Option<&ValidationError> {
        self.alert.as_ref()
    }

    pub fn last_failure(&self) -> Option<FailureKind> {
        self.last_failure
    }

    pub fn view_state(&self) -> ViewState {
        derive_view_state(self.loading, &self.generated_response)
    }

    pub fn trigger_enabled(&self) -> bool {
        !self.loading && self.alert.is_none()
    }

    pub fn trigger_label(&self) -> &'static str {
        if self.loading {
            GENERATING_LABEL
        } else {
            GENERATE_LABEL
        }
    }

    /// Starts a generation, or raises the context alert when there is nothing to send.
    ///
    /// Returns the command to hand to the worker; `None` means no request goes out.
    pub fn begin_generate(&mut self) -> Option<BackendCommand> {
        if self.loading {
            tracing::debug!(request_id = ?self.in_flight, "generation already in flight");
            return None;
        }
        if self.alert.is_some() {
            return None;
        }
        if let Err(err) = validate_context(&self.context) {
            tracing::debug!("generation blocked: {err}");
            self.alert = Some(err);
            return None;
        }

        let request_id = Uuid::new_v4();
        self.loading = true;
        self.generated_response.clear();
        self.last_failure = None;
        self.in_flight = Some(request_id);
        tracing::info!(
            %request_id,
            email_type = self.selected_type.label(),
            "starting email generation"
        );

        Some(BackendCommand::Generate {
            request_id,
            request: GenerateRequest::new(self.selected_type, &self.context),
        })
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn finish_generate(&mut self, request_id: Uuid, outcome: Result<String, GenerationError>) {
        if self.in_flight != Some(request_id) {
            tracing::warn!(%request_id, "ignoring outcome for a generation that is not in flight");
            return;
        }
        self.settle(request_id, outcome);
    }

    /// The command never reached the worker.
    pub fn fail_dispatch(&mut self, err: GenerationError) {
        if let Some(request_id) = self.in_flight {
            self.settle(request_id, Err(err));
        }
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::GenerationFinished {
                request_id,
                outcome,
            } => self.finish_generate(request_id, outcome),
            UiEvent::WorkerStopped(reason) => {
                tracing::error!("backend worker stopped: {reason}");
                if let Some(request_id) = self.in_flight {
                    self.settle(request_id, Err(GenerationError::WorkerUnavailable(reason)));
                }
            }
        }
    }

    fn settle(&mut self, request_id: Uuid, outcome: Result<String, GenerationError>) {
        match outcome {
            Ok(email) => {
                tracing::info!(%request_id, chars = email.chars().count(), "email generated");
                self.generated_response = email;
            }
            Err(err) => {
                tracing::error!(
                    %request_id,
                    kind = ?err.kind(),
                    error = %err,
                    "email generation failed"
                );
                self.generated_response = err.user_message().to_string();
                self.last_failure = Some(err.kind());
            }
        }
        self.in_flight = None;
        self.loading = false;
    }
}
