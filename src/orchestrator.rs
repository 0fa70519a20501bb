//! # Orquestrador — O Engine de Conversa
//!
//! O [`Chatbot`] é o objeto central do sistema: possui o modelo treinado,
//! o pipeline NLU, o seletor de respostas e a memória de sessão. É criado
//! uma vez em `main()` e compartilhado via `Arc` com a API HTTP e o shell.
//!
//! ## Ciclo de Conversa
//!
//! ```text
//! (message, user_id, language)
//!   │
//!   ├── 1. language != "en" → traduz para inglês (melhor esforço)
//!   ├── 2. normaliza → vetoriza → classifica (com fallback)
//!   ├── 3. sentimento sobre o texto (possivelmente traduzido)
//!   ├── 4. seleciona resposta (prefixo empático se negativo)
//!   ├── 5. registra (intent, resposta) na memória de sessão
//!   ├── 6. language != "en" → traduz a resposta de volta
//!   └── 7. ChatReply { response, intent, confidence, sentiment }
//! ```
//!
//! ## Treino Antes de Servir
//!
//! O modelo ajustado (espaço de features + Naive Bayes + tabela de
//! respostas) é publicado de uma só vez num `OnceLock`. Enquanto ele está
//! vazio, toda mensagem recebe `("Unknown", 0.0)` — nunca um modelo
//! parcialmente ajustado. O treino acontece **exatamente uma vez**.
//!
//! ## Falhas
//!
//! Cada estágio devolve um erro tipado; [`Chatbot::respond`] aplica uma
//! única política: qualquer falha vira a resposta fixa de erro
//! (`intent = "Error"`, confiança 0.0, sentimento neutro). Tradução é
//! recuperada localmente e nunca conta como falha.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::config::EngineConfig;
use crate::core::{
    dataset, ChatReply, ResponseTable, Sentiment, SessionEntry, SessionMemory, TrainingExample, ERROR_INTENT,
};
use crate::error::{ChatError, TrainingError};
use crate::nlu::classifier::IntentModel;
use crate::nlu::NluPipeline;
use crate::response::ResponseSelector;
use crate::translation::{translate_or_passthrough, PassthroughTranslator, Translator};

/// Resposta entregue quando o ciclo de conversa falha internamente.
pub const ERROR_RESPONSE: &str = "I'm sorry, I encountered an error. Please try again.";

/// Idioma nativo do modelo.
const BASE_LANGUAGE: &str = "en";

/// Tudo que só existe depois do treino, publicado atomicamente.
struct TrainedState {
    model: IntentModel,
    selector: ResponseSelector,
}

/// Resumo de um treino bem-sucedido.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingSummary {
    pub examples: usize,
    pub intents: usize,
    pub features: usize,
}

/// Engine de conversa.
pub struct Chatbot {
    config: EngineConfig,
    nlu: NluPipeline,
    trained: OnceLock<TrainedState>,
    sessions: SessionMemory,
    /// Seletor sem tabela, usado enquanto não há modelo.
    untrained_selector: ResponseSelector,
    translator: Arc<dyn Translator>,
    /// Semente fixa para os prefixos empáticos (testes).
    response_seed: Option<u64>,
}

impl Chatbot {
    /// Cria um engine não treinado, com tradução pass-through.
    pub fn new(config: EngineConfig) -> Self {
        let nlu = NluPipeline::new(&config);
        let sessions = SessionMemory::new(config.session_capacity);
        Self {
            config,
            nlu,
            trained: OnceLock::new(),
            sessions,
            untrained_selector: ResponseSelector::new(ResponseTable::default()),
            translator: Arc::new(PassthroughTranslator),
            response_seed: None,
        }
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    /// Fixa a sequência dos prefixos empáticos.
    pub fn with_response_seed(mut self, seed: u64) -> Self {
        self.response_seed = Some(seed);
        self
    }

    /// Troca o pipeline NLU (ex: outro estimador de sentimento).
    #[cfg(test)]
    pub(crate) fn with_nlu(mut self, nlu: NluPipeline) -> Self {
        self.nlu = nlu;
        self
    }

    /// Publica um modelo já montado, sem passar por [`train`](Self::train).
    #[cfg(test)]
    pub(crate) fn with_model(self, model: IntentModel, table: ResponseTable) -> Self {
        let selector = ResponseSelector::new(table);
        if self.trained.set(TrainedState { model, selector }).is_err() {
            panic!("model already published");
        }
        self
    }

    /// `true` depois que o modelo foi publicado.
    pub fn is_trained(&self) -> bool {
        self.trained.get().is_some()
    }

    /// Treina o modelo a partir de exemplos já carregados.
    ///
    /// # Erros
    ///
    /// - [`TrainingError::AlreadyTrained`] em qualquer chamada após a primeira
    ///   bem-sucedida
    /// - erros de ajuste do espaço de features (dataset/vocabulário vazio)
    pub fn train(&self, examples: &[TrainingExample]) -> Result<TrainingSummary, TrainingError> {
        if self.is_trained() {
            return Err(TrainingError::AlreadyTrained);
        }

        let model = IntentModel::train(examples, self.nlu.normalizer(), self.config.max_features)?;
        let table = ResponseTable::from_examples(examples);
        let selector = match self.response_seed {
            Some(seed) => ResponseSelector::with_seed(table, seed),
            None => ResponseSelector::new(table),
        };

        let summary = TrainingSummary {
            examples: examples.len(),
            intents: model.labels().len(),
            features: model.features().dimension(),
        };

        // Dois treinos concorrentes: só o primeiro `set` publica
        self.trained
            .set(TrainedState { model, selector })
            .map_err(|_| TrainingError::AlreadyTrained)?;

        Ok(summary)
    }

    /// Carrega o CSV e treina.
    pub fn train_from_csv(&self, path: impl AsRef<Path>) -> Result<TrainingSummary, TrainingError> {
        let examples = dataset::load_csv(path)?;
        self.train(&examples)
    }

    /// Treina a partir do CSV e reporta só sucesso/falha.
    ///
    /// Em caso de falha o engine continua servindo no estado não treinado.
    pub fn initialize(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        match self.train_from_csv(path) {
            Ok(summary) => {
                tracing::info!(
                    path = %path.display(),
                    examples = summary.examples,
                    intents = summary.intents,
                    features = summary.features,
                    "✅ Model trained successfully"
                );
                true
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Falha ao treinar modelo");
                false
            }
        }
    }

    /// Processa uma mensagem. Nunca falha: erros viram a resposta fixa.
    pub async fn respond(&self, message: &str, user_id: &str, language: &str) -> ChatReply {
        match self.try_respond(message, user_id, language).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, user_id, "Falha no ciclo de conversa");
                error_reply()
            }
        }
    }

    /// Ciclo de conversa com erros explícitos.
    pub async fn try_respond(&self, message: &str, user_id: &str, language: &str) -> Result<ChatReply, ChatError> {
        let translate = language != BASE_LANGUAGE;
        let timeout = self.config.translation_timeout;

        let text = if translate {
            translate_or_passthrough(self.translator.as_ref(), message, BASE_LANGUAGE, timeout).await
        } else {
            message.to_string()
        };

        let mut reply = self.converse(&text, user_id)?;

        if translate {
            reply.response = translate_or_passthrough(self.translator.as_ref(), &reply.response, language, timeout).await;
        }

        Ok(reply)
    }

    /// Passos síncronos do ciclo (texto já em inglês).
    fn converse(&self, text: &str, user_id: &str) -> Result<ChatReply, ChatError> {
        let trained = self.trained.get();
        let analysis = self.nlu.analyze(text, trained.map(|t| &t.model))?;
        tracing::debug!(user_id, normalized = %analysis.normalized, "Texto normalizado");

        let selector = trained.map_or(&self.untrained_selector, |t| &t.selector);
        let response = selector.select(&analysis.intent, analysis.sentiment, Some(user_id));

        self.sessions.update(user_id, &analysis.intent, &response);

        Ok(ChatReply {
            response,
            intent: analysis.intent,
            confidence: analysis.confidence,
            sentiment: analysis.sentiment,
        })
    }

    /// Log de sessão do usuário (vazio se desconhecido).
    pub fn session(&self, user_id: &str) -> Vec<SessionEntry> {
        self.sessions.get(user_id)
    }

    pub fn clear_session(&self, user_id: &str) {
        self.sessions.clear(user_id);
    }
}

/// Resposta fixa dos caminhos de erro.
pub fn error_reply() -> ChatReply {
    ChatReply {
        response: ERROR_RESPONSE.to_string(),
        intent: ERROR_INTENT.to_string(),
        confidence: 0.0,
        sentiment: Sentiment::Neutral,
    }
}
