//! # Core — Tipos Fundamentais do Chatbot
//!
//! Tipos compartilhados por todas as camadas (NLU, orquestrador, web):
//!
//! | Tipo | Papel |
//! |------|-------|
//! | [`Sentiment`] | Polaridade discreta de uma mensagem |
//! | [`ChatReply`] | Resultado de um ciclo de conversa (4 campos estáveis) |
//! | [`TrainingExample`] | Linha do dataset de treino |
//! | [`ResponseTable`] | Intent → resposta canônica |
//! | [`SessionMemory`] | Log FIFO das últimas trocas por usuário |

pub mod dataset;
pub mod session;

pub use dataset::{ResponseTable, TrainingExample};
pub use session::{SessionEntry, SessionMemory};

use serde::{Deserialize, Serialize};

/// Intent reportado quando o modelo ainda não foi treinado.
pub const UNKNOWN_INTENT: &str = "Unknown";

/// Intent reportado quando o ciclo de conversa falha internamente.
pub const ERROR_INTENT: &str = "Error";

/// Intent forçado pelo fallback de saudação.
pub const GREETING_INTENT: &str = "Greeting";

/// Polaridade discreta de uma mensagem.
///
/// Serializa em minúsculas (`"positive"`, `"negative"`, `"neutral"`),
/// que é o formato consumido pela API HTTP e pelo shell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    /// Discretiza uma polaridade contínua em [-1, 1].
    ///
    /// `> 0.1` → positivo, `< -0.1` → negativo, senão neutro.
    pub fn from_polarity(polarity: f32) -> Self {
        if polarity > 0.1 {
            Sentiment::Positive
        } else if polarity < -0.1 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resultado de um ciclo de conversa.
///
/// Os quatro campos são o contrato estável com a camada HTTP/CLI — são
/// preenchidos em **todos** os caminhos, inclusive nos de erro.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Texto final entregue ao usuário (já traduzido, se for o caso).
    pub response: String,
    /// Intent classificado (ou `"Unknown"` / `"Error"` / `"Greeting"`).
    pub intent: String,
    /// Probabilidade do intent, em [0, 1].
    pub confidence: f64,
    /// Polaridade da mensagem de entrada.
    pub sentiment: Sentiment,
}
