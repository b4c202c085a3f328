//! Grounded answering: question + retrieved documents → answer text.

use std::{future::Future, pin::Pin, sync::Arc};

use tracing::{debug, error, info};

use crate::api_types::{AnswerOutcome, ERROR_ANSWER_PREFIX};
use crate::error::ContextorError;
use crate::llm::ChatCompletion;
use crate::prompt::{SYSTEM_PROMPT, build_user_prompt};

/// Gateway-facing answering seam.
///
/// [`Answerer::generate`] never fails; failures come back as answer text.
pub trait Answerer: Send + Sync {
    fn generate<'a>(
        &'a self,
        question: &'a str,
        docs: &'a [String],
    ) -> Pin<Box<dyn Future<Output = String> + Send + 'a>>;
}

/// Answerer that grounds a completion call on the retrieved documents.
#[derive(Clone)]
pub struct GroundedAnswerer {
    chat: Arc<dyn ChatCompletion>,
}

impl GroundedAnswerer {
    pub fn new(chat: Arc<dyn ChatCompletion>) -> Self {
        Self { chat }
    }

    /// Answer `question` from `docs`, keeping the failure visible.
    ///
    /// Empty `docs` short-circuit to [`AnswerOutcome::NoContext`] without any
    /// completion call.
    ///
    /// # Errors
    /// Returns [`ContextorError::Completion`] when the completion call fails.
    pub async fn try_generate(
        &self,
        question: &str,
        docs: &[String],
    ) -> Result<AnswerOutcome, ContextorError> {
        if docs.is_empty() {
            info!(target: "contextor", "no documents retrieved; skipping completion");
            return Ok(AnswerOutcome::NoContext);
        }

        let prompt = build_user_prompt(question, docs);
        debug!(target: "contextor", docs = docs.len(), prompt_len = prompt.len(), "prompt built");

        let text = self.chat.complete(&prompt, Some(SYSTEM_PROMPT)).await?;
        Ok(AnswerOutcome::Generated(text))
    }
}

impl Answerer for GroundedAnswerer {
    fn generate<'a>(
        &'a self,
        question: &'a str,
        docs: &'a [String],
    ) -> Pin<Box<dyn Future<Output = String> + Send + 'a>> {
        Box::pin(async move {
            match self.try_generate(question, docs).await {
                Ok(outcome) => outcome.into_answer(),
                Err(err) => {
                    error!(target: "contextor", error = %err, "completion error");
                    format!("{ERROR_ANSWER_PREFIX} {err}")
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use ai_llm_service::error_handler::{Provider, ProviderError, ProviderErrorKind};
    use ai_llm_service::{AiLlmError, ChatCompletionService, LlmModelConfig, LlmProvider};
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api_types::NO_DOCUMENTS_ANSWER;

    /// Records every call and answers from a fixed script.
    struct ScriptedChat {
        calls: AtomicUsize,
        last: Mutex<Option<(String, Option<String>)>>,
        fail: bool,
    }

    impl ScriptedChat {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::ok()
            }
        }
    }

    impl ChatCompletion for ScriptedChat {
        fn complete<'a>(
            &'a self,
            prompt: &'a str,
            system: Option<&'a str>,
        ) -> Pin<Box<dyn Future<Output = Result<String, AiLlmError>> + Send + 'a>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                *self.last.lock().unwrap() = Some((prompt.to_string(), system.map(str::to_string)));
                if self.fail {
                    Err(ProviderError::new(Provider::AzureOpenAI, ProviderErrorKind::EmptyChoices).into())
                } else {
                    Ok("stub answer".to_string())
                }
            })
        }
    }

    #[tokio::test]
    async fn empty_docs_short_circuit_without_completion_call() {
        let chat = Arc::new(ScriptedChat::ok());
        let answerer = GroundedAnswerer::new(chat.clone());

        let outcome = answerer.try_generate("What is GDPR?", &[]).await.unwrap();
        assert_eq!(outcome, AnswerOutcome::NoContext);

        let answer = answerer.generate("What is GDPR?", &[]).await;
        assert_eq!(answer, NO_DOCUMENTS_ANSWER);
        assert_eq!(chat.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn prompt_carries_docs_in_order_and_question() {
        let chat = Arc::new(ScriptedChat::ok());
        let answerer = GroundedAnswerer::new(chat.clone());
        let docs = vec!["doc A".to_string(), "doc B".to_string()];

        let answer = answerer.generate("What is GDPR?", &docs).await;
        assert_eq!(answer, "stub answer");
        assert_eq!(chat.calls.load(Ordering::SeqCst), 1);

        let (prompt, system) = chat.last.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("doc A\n\ndoc B"));
        assert!(prompt.contains("What is GDPR?"));
        assert_eq!(system.as_deref(), Some(SYSTEM_PROMPT));
    }

    #[tokio::test]
    async fn completion_failure_becomes_error_answer() {
        let chat = Arc::new(ScriptedChat::failing());
        let answerer = GroundedAnswerer::new(chat);
        let docs = vec!["doc".to_string()];

        assert!(answerer.try_generate("q", &docs).await.is_err());

        let answer = answerer.generate("q", &docs).await;
        assert!(answer.starts_with("Error generating answer:"), "{answer}");
    }

    #[tokio::test]
    async fn real_client_quota_error_becomes_error_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_json(json!({ "error": { "code": "429", "message": "Rate limit" } })),
            )
            .mount(&server)
            .await;

        let svc = ChatCompletionService::new(LlmModelConfig {
            provider: LlmProvider::AzureOpenAI,
            model: "gpt-4o-mini".into(),
            endpoint: server.uri(),
            api_key: "k".into(),
            api_version: Some("2024-02-01".into()),
            max_tokens: Some(800),
            temperature: Some(0.3),
            timeout_secs: Some(5),
        })
        .unwrap();
        let answerer = GroundedAnswerer::new(Arc::new(svc));

        let answer = answerer.generate("q", &["doc".to_string()]).await;
        assert!(answer.starts_with("Error generating answer:"), "{answer}");
        assert!(answer.contains("429"), "{answer}");
    }
}
