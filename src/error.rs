use thiserror::Error;

use crate::services::CompletionError;

#[derive(Debug, Error)]
pub enum LeadError {
    #[error("OpenAI API key is missing. Please add it to the configuration before generating leads.")]
    MissingCredential,
    #[error("The provided OpenAI API key is invalid. Please check and try again.")]
    InvalidCredential,
    #[error("Invalid response format from AI: {0}")]
    MalformedResponse(String),
    #[error("Failed to generate leads: {0}")]
    Provider(String),
    #[error("An unknown error occurred while generating leads.")]
    Unknown,
    #[error("{0}")]
    Validation(String),
}

impl From<CompletionError> for LeadError {
    fn from(error: CompletionError) -> Self {
        match error {
            CompletionError::InvalidCredential(_) => LeadError::InvalidCredential,
            CompletionError::Provider(message) => LeadError::Provider(message),
            CompletionError::Unknown(_) => LeadError::Unknown,
        }
    }
}
