//! # Handlers HTTP — Os Endpoints da API
//!
//! Cada função pública é um handler Axum mapeado em
//! [`super::create_router()`]. Todas respondem JSON.
//!
//! | Handler | Método | Rota | Retorno |
//! |---------|--------|------|---------|
//! | `index` | GET | `/` | Informações da API |
//! | `chat` | POST | `/chat` | [`ChatReply`] |
//! | `health` | GET | `/health` | Estado do modelo |
//! | `session_history` | GET | `/session/{user_id}` | Log de sessão |
//! | `clear_session` | DELETE | `/session/{user_id}` | Confirmação |
//! | `analytics` | GET | `/analytics` | Contadores de uso |
//!
//! ## Contrato do `/chat`
//!
//! A resposta sempre traz os quatro campos `response`, `intent`,
//! `confidence` e `sentiment`, inclusive para mensagem vazia
//! (`intent = "Empty"`) e corpo JSON inválido (`intent = "Error"`).

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::analytics::AnalyticsSnapshot;
use super::state::AppState;
use crate::core::{ChatReply, Sentiment, SessionEntry};
use crate::orchestrator::error_reply;

/// Corpo do `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_user_id() -> String {
    "anonymous".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

/// Resposta do `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// `true` depois que o treino em background terminou.
    pub model_trained: bool,
    pub timestamp: String,
}

/// GET `/` — descrição da API.
pub async fn index() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "message": "Welcome to the Intent Chat API!",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /chat": "Main chat endpoint",
            "GET /analytics": "Usage analytics",
            "GET /health": "Health check",
            "GET /session/{user_id}": "Get session history",
            "DELETE /session/{user_id}": "Clear session"
        },
        "status": "running"
    }))
}

/// POST `/chat` — processa uma mensagem.
///
/// Mensagem em branco responde `"Please enter a message."` sem passar pelo
/// engine nem pelos analytics.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> (StatusCode, Json<ChatReply>) {
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Corpo de /chat inválido");
            return (StatusCode::BAD_REQUEST, Json(error_reply()));
        }
    };

    if request.message.trim().is_empty() {
        return (
            StatusCode::OK,
            Json(ChatReply {
                response: "Please enter a message.".to_string(),
                intent: "Empty".to_string(),
                confidence: 0.0,
                sentiment: Sentiment::Neutral,
            }),
        );
    }

    let reply = state
        .chatbot
        .respond(&request.message, &request.user_id, &request.language)
        .await;
    state.analytics.record(&reply, &request.language);

    tracing::info!(
        user_id = %request.user_id,
        intent = %reply.intent,
        confidence = reply.confidence,
        sentiment = %reply.sentiment,
        "Mensagem respondida"
    );

    (StatusCode::OK, Json(reply))
}

/// GET `/health` — o frontend/monitoria faz polling até `model_trained`.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model_trained: state.chatbot.is_trained(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// GET `/session/{user_id}` — últimas trocas do usuário (`[]` se nenhuma).
pub async fn session_history(State(state): State<AppState>, Path(user_id): Path<String>) -> Json<Vec<SessionEntry>> {
    Json(state.chatbot.session(&user_id))
}

/// DELETE `/session/{user_id}`.
pub async fn clear_session(State(state): State<AppState>, Path(user_id): Path<String>) -> Json<Value> {
    state.chatbot.clear_session(&user_id);
    Json(json!({ "message": "Session cleared" }))
}

/// GET `/analytics`.
pub async fn analytics(State(state): State<AppState>) -> Json<AnalyticsSnapshot> {
    Json(state.analytics.snapshot())
}
