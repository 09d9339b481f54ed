use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
        ResponseFormatJsonSchema,
    },
    Client,
};
use async_trait::async_trait;

use super::{CompletionError, CompletionModel, CompletionRequest};

const MAX_COMPLETION_TOKENS: u32 = 4096;

// The key arrives with each call, so the client is configured per request.
pub struct OpenaiClient;

impl OpenaiClient {
    pub fn new() -> Self {
        OpenaiClient
    }
}

impl Default for OpenaiClient {
    fn default() -> Self {
        OpenaiClient::new()
    }
}

#[async_trait]
impl CompletionModel for OpenaiClient {
    async fn complete(
        &self,
        credential: &str,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError> {
        let config = OpenAIConfig::new().with_api_key(credential);
        let client = Client::with_config(config);

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(request.model.as_str())
            .messages([ChatCompletionRequestUserMessageArgs::default()
                .content(request.prompt.as_str())
                .build()
                .map_err(map_openai_error)?
                .into()])
            .response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    name: "lead_batch".to_string(),
                    description: Some("A batch of generated business leads.".to_string()),
                    schema: Some(request.schema.clone()),
                    strict: Some(true),
                },
            })
            .temperature(request.temperature)
            .max_tokens(MAX_COMPLETION_TOKENS)
            .build()
            .map_err(map_openai_error)?;

        let response = client
            .chat()
            .create(chat_request)
            .await
            .map_err(map_openai_error)?;
        log::info!("Response: {:?}", response);

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| CompletionError::Provider("No content in Openai response".to_string()))
    }
}

fn map_openai_error(error: OpenAIError) -> CompletionError {
    match error {
        OpenAIError::ApiError(api_error) => {
            log::error!("Openai api error: {:?}", api_error);
            if signals_invalid_credential(&api_error.message) {
                CompletionError::InvalidCredential(api_error.message)
            } else {
                CompletionError::Provider(api_error.message)
            }
        }
        OpenAIError::Reqwest(inner) => CompletionError::Provider(inner.to_string()),
        OpenAIError::JSONDeserialize(inner) => CompletionError::Provider(inner.to_string()),
        OpenAIError::InvalidArgument(message) => CompletionError::Provider(message),
        other => CompletionError::Unknown(other.to_string()),
    }
}

fn signals_invalid_credential(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("incorrect api key")
        || message.contains("invalid api key")
        || message.contains("api key not valid")
        || message.contains("invalid_api_key")
}

#[cfg(test)]
mod tests {
    use super::signals_invalid_credential;

    #[test]
    fn recognizes_rejected_key_messages() {
        let messages = [
            "Incorrect API key provided: sk-abc123. You can find your API key at https://platform.openai.com/account/api-keys.",
            "invalid_api_key",
            "API key not valid. Please pass a valid API key.",
        ];

        for message in messages {
            assert!(signals_invalid_credential(message), "missed: {}", message);
        }
    }

    #[test]
    fn leaves_other_provider_failures_alone() {
        let messages = [
            "You exceeded your current quota, please check your plan and billing details.",
            "The model `gpt-4o-mini` does not exist or you do not have access to it.",
            "Rate limit reached for requests",
        ];

        for message in messages {
            assert!(!signals_invalid_credential(message), "misfired: {}", message);
        }
    }
}
