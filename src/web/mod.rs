//! # Módulo Web — API HTTP do Chatbot
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │ Axum Router (este módulo)                             │
//! │  ├── GET    /                   → info da API          │
//! │  ├── POST   /chat               → ChatReply (JSON)     │
//! │  ├── GET    /health             → modelo treinado?     │
//! │  ├── GET    /session/{user_id}  → log de sessão        │
//! │  ├── DELETE /session/{user_id}  → limpa sessão         │
//! │  └── GET    /analytics          → contadores de uso    │
//! ├───────────────────────────────────────────────────────┤
//! │ CORS permissivo (tower_http) para integração web      │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! ## Submódulos
//!
//! | Módulo | Responsabilidade |
//! |--------|------------------|
//! | [`state`] | Estado compartilhado (`AppState`) |
//! | [`handlers`] | Handlers Axum para cada rota |
//! | [`analytics`] | Agregação de uso |

pub mod analytics;
pub mod handlers;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use state::AppState;

/// Cria o router Axum com todas as rotas da API.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/chat", post(handlers::chat))
        .route("/health", get(handlers::health))
        .route(
            "/session/{user_id}",
            get(handlers::session_history).delete(handlers::clear_session),
        )
        .route("/analytics", get(handlers::analytics))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::EngineConfig;
    use crate::core::TrainingExample;
    use crate::orchestrator::Chatbot;

    fn trained_state() -> AppState {
        let bot = Chatbot::new(EngineConfig::default());
        bot.train(&[
            TrainingExample::new("what courses do you offer", "Courses", "We offer AI, ML and Data Science courses."),
            TrainingExample::new("how much are the fees", "Fees", "Fees start at 5000."),
        ])
        .unwrap();
        AppState::new(Arc::new(bot))
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        let request = builder
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn chat_returns_four_fields() {
        let state = trained_state();
        let app = create_router(state.clone());
        let (status, json) = send(
            app,
            "POST",
            "/chat",
            Some(r#"{"message": "What courses do you offer?", "user_id": "web"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["intent"], "Courses");
        assert_eq!(json["response"], "We offer AI, ML and Data Science courses.");
        assert_eq!(json["sentiment"], "neutral");
        assert!(json["confidence"].as_f64().unwrap() > 0.3);
        assert_eq!(state.analytics.snapshot().total_conversations, 1);
    }

    #[tokio::test]
    async fn blank_message_short_circuits() {
        let state = trained_state();
        let (status, json) = send(create_router(state.clone()), "POST", "/chat", Some(r#"{"message": "   "}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["intent"], "Empty");
        assert_eq!(json["response"], "Please enter a message.");
        assert_eq!(state.analytics.snapshot().total_conversations, 0);
        assert!(state.chatbot.session("anonymous").is_empty());
    }

    #[tokio::test]
    async fn invalid_body_gets_error_reply() {
        let (status, json) = send(create_router(trained_state()), "POST", "/chat", Some("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["intent"], "Error");
        assert_eq!(json["confidence"], 0.0);
        assert_eq!(json["sentiment"], "neutral");
    }

    #[tokio::test]
    async fn health_reports_training_state() {
        let untrained = AppState::new(Arc::new(Chatbot::new(EngineConfig::default())));
        let (_, json) = send(create_router(untrained), "GET", "/health", None).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["model_trained"], false);

        let (_, json) = send(create_router(trained_state()), "GET", "/health", None).await;
        assert_eq!(json["model_trained"], true);
    }

    #[tokio::test]
    async fn session_read_and_clear() {
        let state = trained_state();
        send(
            create_router(state.clone()),
            "POST",
            "/chat",
            Some(r#"{"message": "how much are the fees", "user_id": "carol"}"#),
        )
        .await;

        let (_, json) = send(create_router(state.clone()), "GET", "/session/carol", None).await;
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["intent"], "Fees");
        assert!(entries[0]["timestamp"].is_string());

        let (_, json) = send(create_router(state.clone()), "DELETE", "/session/carol", None).await;
        assert_eq!(json["message"], "Session cleared");

        let (_, json) = send(create_router(state), "GET", "/session/carol", None).await;
        assert_eq!(json, serde_json::json!([]));
    }

    #[tokio::test]
    async fn analytics_and_index() {
        let state = trained_state();
        let (_, json) = send(create_router(state.clone()), "GET", "/analytics", None).await;
        assert_eq!(json["total_conversations"], 0);
        assert_eq!(json["sentiment_counts"], serde_json::json!({"negative": 0, "neutral": 0, "positive": 0}));

        send(
            create_router(state.clone()),
            "POST",
            "/chat",
            Some(r#"{"message": "what courses do you offer", "language": "en"}"#),
        )
        .await;
        let (_, json) = send(create_router(state), "GET", "/analytics", None).await;
        assert_eq!(json["total_conversations"], 1);
        assert_eq!(json["intent_counts"]["Courses"], 1);
        assert_eq!(json["language_usage"]["en"], 1);

        let (status, json) = send(create_router(trained_state()), "GET", "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "running");
    }
}
