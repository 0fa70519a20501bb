//! # Estado da Aplicação Web
//!
//! ```text
//! AppState (clonado por handler)
//!  ├── chatbot: Arc<Chatbot>     ← treinado em background, OnceLock interno
//!  └── analytics: Arc<Analytics> ← contadores de uso
//! ```
//!
//! O servidor aceita conexões antes do treino terminar; o próprio
//! [`Chatbot`] responde `"Unknown"` até o modelo ser publicado.

use std::sync::Arc;

use crate::orchestrator::Chatbot;
use crate::web::analytics::Analytics;

/// Estado compartilhado da aplicação Axum.
#[derive(Clone)]
pub struct AppState {
    /// Engine de conversa compartilhado.
    pub chatbot: Arc<Chatbot>,
    /// Agregados de uso para `/analytics`.
    pub analytics: Arc<Analytics>,
}

impl AppState {
    pub fn new(chatbot: Arc<Chatbot>) -> Self {
        Self {
            chatbot,
            analytics: Arc::new(Analytics::default()),
        }
    }
}
