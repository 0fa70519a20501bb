//! # Configuração — Linha de Comando e Parâmetros do Engine
//!
//! Dois níveis de configuração:
//!
//! - [`Cli`] — flags de linha de comando (também lidas do ambiente,
//!   prefixo `INTENT_CHAT_`), parseadas com `clap` em `main()`
//! - [`EngineConfig`] — parâmetros do engine de conversa, com os limiares
//!   fixos do classificador e da memória de sessão em [`Default`]
//!
//! ```bash
//! # Servidor HTTP na porta padrão (5000)
//! cargo run -- serve
//!
//! # Shell interativo com detalhes de intent/confiança
//! cargo run -- chat --debug
//!
//! # Com tradução via LibreTranslate local
//! INTENT_CHAT_TRANSLATE_URL=http://localhost:5001/translate cargo run -- serve
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

/// Caminho padrão do dataset de treino (relativo à raiz do projeto).
pub const DEFAULT_DATA_PATH: &str = "data/intents.csv";

/// Argumentos de linha de comando.
#[derive(Debug, Parser)]
#[command(name = "intent-chat", version, about = "Chatbot de intents com sentimento e memória de sessão")]
pub struct Cli {
    /// CSV de treino com colunas Text, Intent, Response.
    #[arg(long, env = "INTENT_CHAT_DATA", default_value = DEFAULT_DATA_PATH, global = true)]
    pub data: PathBuf,

    /// Tamanho máximo do vocabulário TF-IDF.
    #[arg(long, env = "INTENT_CHAT_MAX_FEATURES", default_value_t = 1000, global = true)]
    pub max_features: usize,

    /// Endpoint compatível com LibreTranslate. Sem ele, tradução é pass-through.
    #[arg(long, env = "INTENT_CHAT_TRANSLATE_URL", global = true)]
    pub translate_url: Option<String>,

    /// Timeout de cada chamada de tradução, em milissegundos.
    #[arg(long, env = "INTENT_CHAT_TRANSLATION_TIMEOUT_MS", default_value_t = 3000, global = true)]
    pub translation_timeout_ms: u64,

    /// Semente dos prefixos empáticos (respostas reprodutíveis).
    #[arg(long, env = "INTENT_CHAT_RESPONSE_SEED", global = true)]
    pub response_seed: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sobe a API HTTP (treina em background).
    Serve {
        #[arg(long, env = "INTENT_CHAT_ADDR", default_value = "0.0.0.0:5000")]
        addr: String,
    },
    /// Shell interativo no terminal.
    Chat {
        /// Mostra intent, confiança e sentimento após cada resposta.
        #[arg(long)]
        debug: bool,

        #[arg(long, default_value = "cli_user")]
        user_id: String,
    },
}

impl Cli {
    /// Monta a [`EngineConfig`] a partir das flags.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_features: self.max_features,
            translation_timeout: Duration::from_millis(self.translation_timeout_ms),
            ..EngineConfig::default()
        }
    }
}

/// Parâmetros do engine de conversa.
///
/// Os valores padrão reproduzem o comportamento de referência:
///
/// | Campo | Padrão |
/// |-------|--------|
/// | `max_features` | 1000 |
/// | `fallback_threshold` | 0.3 |
/// | `greeting_confidence` | 0.8 |
/// | `session_capacity` | 5 |
/// | `translation_timeout` | 3s |
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Limite do vocabulário do espaço de features.
    pub max_features: usize,
    /// Abaixo desta confiança o fallback de saudação é avaliado.
    pub fallback_threshold: f64,
    /// Confiança reportada quando o fallback de saudação dispara.
    pub greeting_confidence: f64,
    /// Máximo de entradas por usuário na memória de sessão.
    pub session_capacity: usize,
    /// Limite de tempo por chamada ao tradutor.
    pub translation_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_features: 1000,
            fallback_threshold: 0.3,
            greeting_confidence: 0.8,
            session_capacity: 5,
            translation_timeout: Duration::from_secs(3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_subcommand() {
        let cli = Cli::parse_from(["intent-chat"]);
        assert_eq!(cli.data, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(cli.max_features, 1000);
        assert!(cli.command.is_none());
        assert!(cli.translate_url.is_none());
        assert!(cli.response_seed.is_none());
    }

    #[test]
    fn chat_subcommand_flags() {
        let cli = Cli::parse_from(["intent-chat", "--max-features", "50", "chat", "--debug", "--response-seed", "9"]);
        assert_eq!(cli.engine_config().max_features, 50);
        assert_eq!(cli.response_seed, Some(9));
        match cli.command {
            Some(Command::Chat { debug, user_id }) => {
                assert!(debug);
                assert_eq!(user_id, "cli_user");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn engine_config_keeps_fixed_thresholds() {
        let cli = Cli::parse_from(["intent-chat", "--translation-timeout-ms", "250"]);
        let config = cli.engine_config();
        assert_eq!(config.translation_timeout, Duration::from_millis(250));
        assert_eq!(config.fallback_threshold, 0.3);
        assert_eq!(config.greeting_confidence, 0.8);
        assert_eq!(config.session_capacity, 5);
    }
}
