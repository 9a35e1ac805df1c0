use serde::{Deserialize, Serialize};

use crate::domain::EmailType;

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub context: String,
}

impl GenerateRequest {
    pub fn new(email_type: EmailType, context: &str) -> Self {
        Self {
            context: format!("{}: {context}", email_type.label()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub email: Option<String>,
}
