//! # Seletor de Respostas
//!
//! Mapeia intent → resposta canônica e, quando o sentimento é negativo,
//! antepõe uma frase empática escolhida ao acaso entre três fixas.
//!
//! ## Aleatoriedade
//!
//! A escolha do prefixo **não é determinística** entre chamadas. A fonte
//! aleatória é injetável: [`ResponseSelector::with_seed`] fixa a
//! sequência (testes), [`ResponseSelector::new`] usa entropia do SO.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::{ResponseTable, Sentiment};

/// Resposta quando o intent não está na tabela.
pub const CLARIFICATION_RESPONSE: &str = "I'm sorry, I didn't understand that. Could you please rephrase?";

/// Prefixos empáticos para mensagens com sentimento negativo.
pub const EMPATHY_PREFIXES: [&str; 3] = [
    "I understand your concern. ",
    "I'm here to help with that. ",
    "Let me clarify that for you. ",
];

pub struct ResponseSelector {
    table: ResponseTable,
    rng: Mutex<StdRng>,
}

impl ResponseSelector {
    pub fn new(table: ResponseTable) -> Self {
        Self {
            table,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Seletor com sequência de prefixos reprodutível.
    pub fn with_seed(table: ResponseTable, seed: u64) -> Self {
        Self {
            table,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Escolhe a resposta para `intent`.
    ///
    /// `user_id` ainda não influencia a escolha; fica disponível para
    /// respostas contextuais por usuário.
    pub fn select(&self, intent: &str, sentiment: Sentiment, _user_id: Option<&str>) -> String {
        let base = self.table.get(intent).unwrap_or(CLARIFICATION_RESPONSE);

        if sentiment == Sentiment::Negative {
            let idx = self.rng.lock().random_range(0..EMPATHY_PREFIXES.len());
            return format!("{}{}", EMPATHY_PREFIXES[idx], base);
        }

        base.to_string()
    }
}
