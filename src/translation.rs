//! # Tradução — Colaborador Externo de Melhor Esforço
//!
//! O chatbot só entende inglês. Para outros idiomas, a mensagem é traduzida
//! para `en` antes da análise e a resposta é traduzida de volta.
//!
//! | Implementação | Uso |
//! |---------------|-----|
//! | [`PassthroughTranslator`] | padrão, devolve o texto intacto |
//! | [`HttpTranslator`] | API compatível com LibreTranslate (`POST /translate`) |
//!
//! Falhas e timeouts nunca chegam ao usuário: o orquestrador cai para o
//! texto original (ver [`translate_or_passthrough`]).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TranslationError;

/// Tradução texto → texto para um idioma alvo (código ISO, ex: `"hi"`).
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslationError>;
}

/// Tradutor nulo: devolve o texto original.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughTranslator;

#[async_trait]
impl Translator for PassthroughTranslator {
    async fn translate(&self, text: &str, _target_language: &str) -> Result<String, TranslationError> {
        Ok(text.to_string())
    }
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
}

/// Cliente HTTP para um endpoint compatível com LibreTranslate.
pub struct HttpTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTranslator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, TranslationError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslationError> {
        let body = TranslateRequest {
            q: text,
            source: "auto",
            target: target_language,
            format: "text",
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::InvalidResponse(e.to_string()))?;
        Ok(parsed.translated_text)
    }
}

/// Traduz com limite de tempo; qualquer falha devolve o texto original.
pub async fn translate_or_passthrough(
    translator: &dyn Translator,
    text: &str,
    target_language: &str,
    timeout: Duration,
) -> String {
    let result = match tokio::time::timeout(timeout, translator.translate(text, target_language)).await {
        Ok(result) => result,
        Err(_) => Err(TranslationError::Timeout(timeout)),
    };

    match result {
        Ok(translated) => translated,
        Err(e) => {
            tracing::warn!(error = %e, target = target_language, "Tradução falhou, mantendo texto original");
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    #[async_trait]
    impl Translator for Upper {
        async fn translate(&self, text: &str, _target: &str) -> Result<String, TranslationError> {
            Ok(text.to_uppercase())
        }
    }

    struct Broken;

    #[async_trait]
    impl Translator for Broken {
        async fn translate(&self, _text: &str, _target: &str) -> Result<String, TranslationError> {
            Err(TranslationError::InvalidResponse("no body".into()))
        }
    }

    struct Stuck;

    #[async_trait]
    impl Translator for Stuck {
        async fn translate(&self, text: &str, _target: &str) -> Result<String, TranslationError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(text.to_string())
        }
    }

    #[tokio::test]
    async fn successful_translation_is_used() {
        let out = translate_or_passthrough(&Upper, "hello", "en", Duration::from_secs(1)).await;
        assert_eq!(out, "HELLO");
    }

    #[tokio::test]
    async fn failure_passes_text_through() {
        let out = translate_or_passthrough(&Broken, "namaste", "en", Duration::from_secs(1)).await;
        assert_eq!(out, "namaste");
    }

    #[tokio::test]
    async fn timeout_passes_text_through() {
        let out = translate_or_passthrough(&Stuck, "namaste", "en", Duration::from_millis(20)).await;
        assert_eq!(out, "namaste");
    }

    #[tokio::test]
    async fn unreachable_endpoint_passes_text_through() {
        let translator = HttpTranslator::new("http://127.0.0.1:9/translate", Duration::from_millis(200)).unwrap();
        let out = translate_or_passthrough(&translator, "hola", "en", Duration::from_secs(1)).await;
        assert_eq!(out, "hola");
    }
}
