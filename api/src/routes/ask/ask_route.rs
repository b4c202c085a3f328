//! POST /ask: retrieves supporting documents, then answers from them.

use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::info;

use crate::{
    core::app_state::AppState,
    routes::ask::ask_request::{AskRequest, AskResponse},
};

/// Handler: POST /ask
///
/// Always answers 200; retrieval and completion failures surface as answer text.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/ask \
///   -H 'content-type: application/json' \
///   -d '{"question":"What is GDPR?"}'
/// ```
pub async fn ask(State(state): State<Arc<AppState>>, Json(body): Json<AskRequest>) -> Json<AskResponse> {
    let docs = state.retriever.retrieve(&body.question, state.top_k).await;
    info!(
        target: "api::ask",
        question_len = body.question.len(),
        docs = docs.len(),
        "retrieval finished"
    );

    let answer = state.answerer.generate(&body.question, &docs).await;
    Json(AskResponse { answer })
}
