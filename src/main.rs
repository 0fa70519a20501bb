//! # Intent Chat — Chatbot de Intents
//!
//! **Ponto de entrada principal.** Parseia a linha de comando, configura o
//! tracing e sobe uma das duas superfícies sobre o mesmo [`Chatbot`]:
//!
//! | Subcomando | Superfície |
//! |------------|------------|
//! | `serve` (padrão) | API HTTP em `0.0.0.0:5000` |
//! | `chat` | Shell interativo no terminal |
//!
//! ## Fluxo de Inicialização (`serve`)
//!
//! ```text
//! main()
//!   ├── Configura tracing/logging
//!   ├── Monta Chatbot (tradutor HTTP se --translate-url)
//!   ├── Monta AppState e Router
//!   ├── Inicia servidor TCP
//!   └── Spawn background:
//!       ├── Carrega data/intents.csv
//!       ├── Ajusta TF-IDF + Naive Bayes
//!       └── Publica em OnceLock (model_trained = true)
//! ```
//!
//! Enquanto o treino não termina, `/chat` responde `"Unknown"` com
//! confiança 0.0 e `/health` reporta `model_trained: false`.
//!
//! ```bash
//! RUST_LOG=debug cargo run -- serve --addr 127.0.0.1:8080
//! ```

mod cli;
mod config;
mod core;
mod error;
mod nlu;
mod orchestrator;
mod response;
mod translation;
mod web;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::{Cli, Command};
use crate::orchestrator::Chatbot;
use crate::translation::{HttpTranslator, PassthroughTranslator, Translator};
use crate::web::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.engine_config();

    let translator: Arc<dyn Translator> = match &cli.translate_url {
        Some(url) => {
            tracing::info!(endpoint = %url, "Tradução habilitada");
            Arc::new(
                HttpTranslator::new(url.clone(), config.translation_timeout)
                    .context("failed to build translation client")?,
            )
        }
        None => Arc::new(PassthroughTranslator),
    };
    let mut chatbot = Chatbot::new(config).with_translator(translator);
    if let Some(seed) = cli.response_seed {
        chatbot = chatbot.with_response_seed(seed);
    }
    let chatbot = Arc::new(chatbot);

    match cli.command {
        Some(Command::Chat { debug, user_id }) => {
            // No terminal não há o que servir antes do treino.
            cli::prepare(&chatbot, &cli.data)?;
            let options = cli::ShellOptions {
                user_id,
                debug,
                language: "en".to_string(),
            };
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            cli::run(&chatbot, &options, stdin, std::io::stdout())
                .await
                .context("shell I/O failed")?;
        }
        command => {
            let addr = match command {
                Some(Command::Serve { addr }) => addr,
                _ => "0.0.0.0:5000".to_string(),
            };
            serve(chatbot, cli.data, &addr).await?;
        }
    }

    Ok(())
}

/// Sobe a API imediatamente e treina o modelo em background.
async fn serve(chatbot: Arc<Chatbot>, data: std::path::PathBuf, addr: &str) -> Result<()> {
    tracing::info!("🤖 Intent Chat — Starting...");

    let app = web::create_router(AppState::new(chatbot.clone()));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "🚀 Server running");

    // Treino é CPU-bound: fora do runtime.
    tokio::task::spawn_blocking(move || {
        if chatbot.initialize(&data) {
            tracing::info!("✅ Model ready!");
        }
    });

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
