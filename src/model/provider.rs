//! [`ModelInvoker`] backed by a `genai` chat client.

use std::time::Duration;

use async_trait::async_trait;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use genai::resolver::{AuthData, AuthResolver};
use genai::{Client, ModelIden};
use tracing::{debug, warn};

use super::error::ModelError;
use super::{ModelInvoker, with_deadline};
use crate::constants::{MODEL_MAX_TOKENS, MODEL_TEMPERATURE};

/// Chat-completion invoker. One instance is shared by all requests.
pub struct GenaiInvoker {
    client: Client,
    model: String,
    options: ChatOptions,
}

impl GenaiInvoker {
    /// Builds a client that authenticates every call with `api_key`.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let api_key = api_key.into();
        let auth_resolver = AuthResolver::from_resolver_fn(
            move |_model_iden: ModelIden| -> Result<Option<AuthData>, genai::resolver::Error> {
                Ok(Some(AuthData::from_single(api_key.clone())))
            },
        );
        let client = Client::builder().with_auth_resolver(auth_resolver).build();
        Self::with_client(client, model)
    }

    /// Wraps an existing client, e.g. one that resolves keys from the environment.
    pub fn with_client(client: Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            options: ChatOptions::default()
                .with_temperature(MODEL_TEMPERATURE)
                .with_max_tokens(MODEL_MAX_TOKENS),
        }
    }

    async fn call(&self, instruction: &str, payload: &str) -> Result<String, ModelError> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(instruction),
            ChatMessage::user(payload),
        ]);

        let response = self
            .client
            .exec_chat(&self.model, request, Some(&self.options))
            .await
            .map_err(|e| {
                let err = ModelError::from_provider_message(e.to_string());
                warn!(model = %self.model, kind = err.kind(), error = %e, "Provider call failed");
                err
            })?;

        let text = reply_text(response.first_text())?;
        debug!(model = %self.model, chars = text.len(), "Provider call returned");
        Ok(text)
    }
}

/// A reply with no text content is a failed call, not an unparseable one.
fn reply_text(text: Option<&str>) -> Result<String, ModelError> {
    match text {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        _ => Err(ModelError::Transport("empty response".to_string())),
    }
}

#[async_trait]
impl ModelInvoker for GenaiInvoker {
    async fn invoke(
        &self,
        instruction: &str,
        payload: &str,
        deadline: Duration,
    ) -> Result<String, ModelError> {
        with_deadline(deadline, self.call(instruction, payload)).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

impl std::fmt::Debug for GenaiInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiInvoker")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}
