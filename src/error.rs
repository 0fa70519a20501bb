//! # Erros Tipados por Estágio
//!
//! Cada estágio do pipeline devolve seu próprio erro. O
//! [`Chatbot`](crate::orchestrator::Chatbot) é o único ponto que decide o que
//! fazer com eles:
//!
//! | Erro | Estágio | Política no orquestrador |
//! |------|---------|--------------------------|
//! | [`TrainingError`] | carga do CSV + fit | reportado a quem treinou; engine segue "Unknown" |
//! | [`ClassifierError`] | inferência | vira resposta fixa de erro (`intent = "Error"`) |
//! | [`TranslationError`] | tradução | recuperado localmente, texto original segue |
//! | [`SentimentError`] | polaridade | recuperado localmente como `neutral` |

use thiserror::Error;

/// Falhas da fase de treinamento (carga do dataset + fit do modelo).
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("falha ao ler dataset de treino: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV inválido: {0}")]
    Csv(#[from] csv::Error),

    #[error("coluna obrigatória ausente no CSV: {0}")]
    MissingColumn(&'static str),

    #[error("nenhum exemplo de treino válido")]
    EmptyDataset,

    #[error("vocabulário vazio após remoção de stop-words")]
    EmptyVocabulary,

    #[error("modelo já foi treinado")]
    AlreadyTrained,
}

/// Falhas na inferência do classificador.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("dimensão do vetor ({got}) difere do espaço de features ({expected})")]
    DimensionMismatch { expected: usize, got: usize },
}

/// Falhas do colaborador de tradução.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("tradução excedeu o timeout de {0:?}")]
    Timeout(std::time::Duration),

    #[error("falha HTTP na tradução: {0}")]
    Http(#[from] reqwest::Error),

    #[error("resposta de tradução inválida: {0}")]
    InvalidResponse(String),
}

/// Falhas do estimador de polaridade.
#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("polaridade fora do intervalo: {0}")]
    OutOfRange(f32),

    #[error("estimador de polaridade falhou: {0}")]
    Estimator(String),
}

/// Falha de um ciclo de conversa, vista pelo orquestrador.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}
