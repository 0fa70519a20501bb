//! # Pipeline NLU — Da Mensagem ao Intent e Sentimento
//!
//! O [`NluPipeline`] junta os estágios sem estado mutável do chatbot:
//!
//! ```text
//! Mensagem (já em inglês)
//!   ├── 1. Normalizar            (Normalizer)
//!   ├── 2. Vetorizar + classificar (IntentModel + IntentClassifier)
//!   └── 3. Sentimento            (SentimentScorer, sobre o texto original)
//! ```
//!
//! O modelo treinado é passado por referência a cada chamada (`Option`):
//! o pipeline em si não sabe se o treino já terminou.
//!
//! ## Sub-módulos
//!
//! | Módulo | Responsabilidade |
//! |--------|-----------------|
//! | [`normalizer`] | Limpeza canônica do texto |
//! | [`vectorizer`] | Espaço de features TF-IDF |
//! | [`classifier`] | Naive Bayes + fallback de saudação |
//! | [`sentiment`] | Polaridade por léxico |

pub mod classifier;
pub mod normalizer;
pub mod sentiment;
pub mod vectorizer;

use crate::config::EngineConfig;
use crate::core::Sentiment;
use crate::error::ClassifierError;

use classifier::{IntentClassifier, IntentModel};
use normalizer::Normalizer;
use sentiment::SentimentScorer;

/// Resultado da análise NLU de uma mensagem.
#[derive(Clone, Debug, PartialEq)]
pub struct NluResult {
    /// Texto normalizado usado na classificação.
    pub normalized: String,
    pub intent: String,
    pub confidence: f64,
    pub sentiment: Sentiment,
}

/// Pipeline NLU — imutável após criação, seguro para uso concorrente.
pub struct NluPipeline {
    normalizer: Normalizer,
    classifier: IntentClassifier,
    sentiment: SentimentScorer,
}

impl NluPipeline {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_sentiment(config, SentimentScorer::default())
    }

    /// Pipeline com um analisador de sentimento específico.
    pub fn with_sentiment(config: &EngineConfig, sentiment: SentimentScorer) -> Self {
        Self {
            normalizer: Normalizer::new(),
            classifier: IntentClassifier::new(config.fallback_threshold, config.greeting_confidence),
            sentiment,
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Analisa uma mensagem contra o modelo (se já treinado).
    pub fn analyze(&self, text: &str, model: Option<&IntentModel>) -> Result<NluResult, ClassifierError> {
        let normalized = self.normalizer.normalize(text);
        let prediction = self.classifier.classify(model, &normalized)?;
        let sentiment = self.sentiment.score(text);

        tracing::debug!(
            intent = %prediction.intent,
            confidence = prediction.confidence,
            sentiment = %sentiment,
            "Mensagem analisada"
        );

        Ok(NluResult {
            normalized,
            intent: prediction.intent,
            confidence: prediction.confidence,
            sentiment,
        })
    }
}
