//! # Analytics — Contadores de Uso da API
//!
//! Agregados em memória (perdidos ao reiniciar o processo), atualizados
//! a cada `POST /chat` que chega ao engine:
//!
//! - total de conversas
//! - contagem por intent, por sentimento, por idioma
//! - conversas por dia (`YYYY-MM-DD`, UTC)

use std::collections::BTreeMap;

use chrono::Utc;
use parking_lot::Mutex;
use serde::Serialize;

use crate::core::{ChatReply, Sentiment};

/// Fotografia serializável dos contadores.
///
/// `sentiment_counts` começa com as três polaridades zeradas.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalyticsSnapshot {
    pub total_conversations: u64,
    pub intent_counts: BTreeMap<String, u64>,
    pub sentiment_counts: BTreeMap<String, u64>,
    pub language_usage: BTreeMap<String, u64>,
    pub daily_stats: BTreeMap<String, u64>,
}

impl Default for AnalyticsSnapshot {
    fn default() -> Self {
        let sentiment_counts = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral]
            .iter()
            .map(|s| (s.to_string(), 0))
            .collect();
        Self {
            total_conversations: 0,
            intent_counts: BTreeMap::new(),
            sentiment_counts,
            language_usage: BTreeMap::new(),
            daily_stats: BTreeMap::new(),
        }
    }
}

#[derive(Default)]
pub struct Analytics {
    inner: Mutex<AnalyticsSnapshot>,
}

impl Analytics {
    /// Registra uma conversa respondida.
    pub fn record(&self, reply: &ChatReply, language: &str) {
        let today = Utc::now().format("%Y-%m-%d").to_string();
        let mut data = self.inner.lock();
        data.total_conversations += 1;
        *data.intent_counts.entry(reply.intent.clone()).or_insert(0) += 1;
        *data.sentiment_counts.entry(reply.sentiment.to_string()).or_insert(0) += 1;
        *data.language_usage.entry(language.to_string()).or_insert(0) += 1;
        *data.daily_stats.entry(today).or_insert(0) += 1;
    }

    pub fn snapshot(&self) -> AnalyticsSnapshot {
        self.inner.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(intent: &str, sentiment: Sentiment) -> ChatReply {
        ChatReply {
            response: String::new(),
            intent: intent.into(),
            confidence: 1.0,
            sentiment,
        }
    }

    #[test]
    fn counts_by_every_dimension() {
        let analytics = Analytics::default();
        analytics.record(&reply("Courses", Sentiment::Neutral), "en");
        analytics.record(&reply("Courses", Sentiment::Negative), "hi");
        analytics.record(&reply("Fees", Sentiment::Neutral), "en");

        let snap = analytics.snapshot();
        assert_eq!(snap.total_conversations, 3);
        assert_eq!(snap.intent_counts["Courses"], 2);
        assert_eq!(snap.intent_counts["Fees"], 1);
        assert_eq!(snap.sentiment_counts["neutral"], 2);
        assert_eq!(snap.sentiment_counts["negative"], 1);
        assert_eq!(snap.language_usage["hi"], 1);
        assert_eq!(snap.daily_stats.values().sum::<u64>(), 3);
    }

    #[test]
    fn fresh_snapshot_has_zeroed_sentiments() {
        let snap = Analytics::default().snapshot();
        assert_eq!(snap.total_conversations, 0);
        assert_eq!(snap.sentiment_counts.len(), 3);
        for key in ["positive", "negative", "neutral"] {
            assert_eq!(snap.sentiment_counts[key], 0);
        }
        assert!(snap.intent_counts.is_empty());
    }
}
