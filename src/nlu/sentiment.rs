//! # Analisador de Sentimento — Polaridade por Léxico
//!
//! Estimador sem estado: texto → polaridade em [-1, 1] → [`Sentiment`].
//!
//! ## Estimador Léxico
//!
//! ```text
//! "I am not very happy with the fees"
//!          │   │    └── happy = +0.8
//!          │   └─────── very  → × 1.3  → +1.0 (limitado a ±1)
//!          └─────────── not   → × -0.5 → -0.5
//! polaridade = média dos termos polares = -0.5 → negative
//! ```
//!
//! O [`SentimentScorer`] nunca falha: qualquer erro do estimador (ou valor
//! não finito / fora do intervalo) vira `neutral`.

use crate::core::Sentiment;
use crate::error::SentimentError;

/// Léxico de polaridade (palavra, valor em [-1, 1]).
const LEXICON: &[(&str, f32)] = &[
    // positivas
    ("amazing", 0.6),
    ("appreciate", 0.5),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("brilliant", 0.9),
    ("cool", 0.35),
    ("excellent", 1.0),
    ("excited", 0.4),
    ("fantastic", 0.4),
    ("fine", 0.4),
    ("glad", 0.5),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("helpful", 0.5),
    ("interested", 0.25),
    ("interesting", 0.5),
    ("love", 0.5),
    ("lovely", 0.5),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("pleased", 0.5),
    ("satisfied", 0.5),
    ("super", 0.33),
    ("thank", 0.3),
    ("thanks", 0.3),
    ("useful", 0.3),
    ("welcome", 0.8),
    ("wonderful", 1.0),
    // negativas
    ("angry", -0.5),
    ("annoyed", -0.4),
    ("annoying", -0.8),
    ("awful", -1.0),
    ("bad", -0.7),
    ("boring", -1.0),
    ("broken", -0.4),
    ("confused", -0.4),
    ("confusing", -0.3),
    ("difficult", -0.5),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("expensive", -0.5),
    ("frustrated", -0.7),
    ("frustrating", -0.7),
    ("hard", -0.3),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("poor", -0.4),
    ("problem", -0.3),
    ("sad", -0.5),
    ("slow", -0.3),
    ("stupid", -0.8),
    ("terrible", -1.0),
    ("upset", -0.6),
    ("useless", -0.5),
    ("worried", -0.4),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
];

/// Intensificadores: multiplicam a palavra polar seguinte.
const INTENSIFIERS: &[(&str, f32)] = &[
    ("extremely", 1.5),
    ("quite", 1.1),
    ("really", 1.3),
    ("so", 1.3),
    ("super", 1.3),
    ("too", 1.3),
    ("totally", 1.4),
    ("very", 1.3),
];

/// Negadores olham até 3 tokens para trás.
const NEGATORS: &[&str] = &["not", "no", "never", "nor", "neither", "hardly", "cannot"];
const NEGATION_WINDOW: usize = 3;

/// Estimador de polaridade plugável.
pub trait PolarityEstimator: Send + Sync {
    /// Polaridade em [-1, 1].
    fn polarity(&self, text: &str) -> Result<f32, SentimentError>;
}

/// Estimador padrão baseado em [`LEXICON`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LexiconEstimator;

fn lookup(table: &[(&str, f32)], word: &str) -> Option<f32> {
    table.iter().find(|(w, _)| *w == word).map(|(_, v)| *v)
}

fn is_negator(token: &str) -> bool {
    NEGATORS.contains(&token) || token.ends_with("n't")
}

impl PolarityEstimator for LexiconEstimator {
    fn polarity(&self, text: &str) -> Result<f32, SentimentError> {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|t| !t.is_empty())
            .collect();

        let mut scores = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            let Some(mut score) = lookup(LEXICON, token) else {
                continue;
            };

            if i > 0 {
                if let Some(multiplier) = lookup(INTENSIFIERS, tokens[i - 1]) {
                    score = (score * multiplier).clamp(-1.0, 1.0);
                }
            }

            let window = &tokens[i.saturating_sub(NEGATION_WINDOW)..i];
            if window.iter().any(|t| is_negator(t)) {
                score *= -0.5;
            }
            scores.push(score);
        }

        if scores.is_empty() {
            return Ok(0.0);
        }
        let mean = scores.iter().sum::<f32>() / scores.len() as f32;
        Ok(mean.clamp(-1.0, 1.0))
    }
}

/// Analisador de sentimento à prova de falhas.
pub struct SentimentScorer {
    estimator: Box<dyn PolarityEstimator>,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new(Box::new(LexiconEstimator))
    }
}

impl SentimentScorer {
    pub fn new(estimator: Box<dyn PolarityEstimator>) -> Self {
        Self { estimator }
    }

    /// Classifica a polaridade do texto. Sempre devolve um valor.
    pub fn score(&self, text: &str) -> Sentiment {
        let polarity = self.estimator.polarity(text).and_then(|p| {
            if p.is_finite() && (-1.0..=1.0).contains(&p) {
                Ok(p)
            } else {
                Err(SentimentError::OutOfRange(p))
            }
        });

        match polarity {
            Ok(p) => Sentiment::from_polarity(p),
            Err(e) => {
                tracing::warn!(error = %e, "Falha na análise de sentimento, usando neutral");
                Sentiment::Neutral
            }
        }
    }
}
