pub mod seeded;

use std::future::Future;

use crate::Profile;

pub use seeded::SeededProvider;

/// Failures surfaced to callers before any scoring happens.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("invalid profile id '{value}': {reason}")]
    InvalidInput { value: String, reason: String },
    #[error("profile fetch failed: {0}")]
    FetchFailed(String),
}

impl ProviderError {
    pub fn invalid(value: impl Into<String>, reason: impl Into<String>) -> Self {
        ProviderError::InvalidInput {
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ProviderError::InvalidInput { .. })
    }
}

/// Source of profile snapshots. Implementations may block or await on I/O; the
/// scoring engine only sees the `Profile` they eventually return.
pub trait ProfileProvider {
    fn fetch_profile(
        &self,
        id: u64,
    ) -> impl Future<Output = Result<Profile, ProviderError>> + Send;
}

/// Parses a user-supplied account id. Ids are positive integers.
pub fn parse_profile_id(raw: &str) -> Result<u64, ProviderError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ProviderError::invalid(raw, "id is required"));
    }
    let id = trimmed
        .parse::<u64>()
        .map_err(|err| ProviderError::invalid(raw, err.to_string()))?;
    if id == 0 {
        return Err(ProviderError::invalid(raw, "id must be positive"));
    }
    Ok(id)
}
