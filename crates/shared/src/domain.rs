use std::{fmt, str::FromStr};

use crate::error::ValidationError;

/// Category prefixed onto the user's context before it is sent for generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EmailType {
    #[default]
    ColdEmail,
    ClientFollowUp,
    ApologyEmail,
    FeedbackRequest,
    ThankYouEmail,
}

impl EmailType {
    /// Display order of the selector.
    pub const ALL: [EmailType; 5] = [
        EmailType::ColdEmail,
        EmailType::ClientFollowUp,
        EmailType::ApologyEmail,
        EmailType::FeedbackRequest,
        EmailType::ThankYouEmail,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EmailType::ColdEmail => "Cold Email",
            EmailType::ClientFollowUp => "Client Follow-up",
            EmailType::ApologyEmail => "Apology Email",
            EmailType::FeedbackRequest => "Feedback Request",
            EmailType::ThankYouEmail => "Thank You Email",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            EmailType::ColdEmail => "cold-email",
            EmailType::ClientFollowUp => "client-follow-up",
            EmailType::ApologyEmail => "apology-email",
            EmailType::FeedbackRequest => "feedback-request",
            EmailType::ThankYouEmail => "thank-you-email",
        }
    }
}

impl fmt::Display for EmailType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EmailType {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let needle = raw.trim();
        EmailType::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(needle) || t.slug().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ValidationError::UnknownEmailType(raw.to_string()))
    }
}

/// Rejects context that is empty once surrounding whitespace is ignored.
///
/// The context itself is never rewritten; callers send the raw text.
pub fn validate_context(context: &str) -> Result<(), ValidationError> {
    if context.trim().is_empty() {
        return Err(ValidationError::EmptyContext);
    }
    Ok(())
}
