//! # Dataset de Treino — Carga do CSV e Tabela de Respostas
//!
//! O dataset é um CSV com cabeçalho contendo (em qualquer ordem, sem
//! diferenciar maiúsculas) as colunas `Text`, `Intent` e `Response`:
//!
//! ```csv
//! Text,Intent,Response
//! hello,Greeting,Hello! How can I help you today?
//! what courses do you offer,Courses,"We offer AI, ML and Data Science courses."
//! ```
//!
//! ## Linhas Malformadas
//!
//! Uma linha com qualquer campo ausente ou vazio é **descartada**, nunca
//! fatal. Só falta de colunas no cabeçalho, erro de I/O ou dataset sem
//! nenhuma linha válida abortam o treino.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::TrainingError;

/// Uma linha válida do dataset de treino.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingExample {
    /// Texto cru do usuário (antes da normalização).
    pub text: String,
    /// Rótulo de intent.
    pub intent: String,
    /// Resposta canônica associada ao intent.
    pub response: String,
}

impl TrainingExample {
    pub fn new(text: impl Into<String>, intent: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            intent: intent.into(),
            response: response.into(),
        }
    }
}

/// Carrega exemplos de treino de um arquivo CSV.
///
/// # Erros
///
/// - [`TrainingError::Io`] se o arquivo não puder ser aberto
/// - [`TrainingError::MissingColumn`] se o cabeçalho não tiver as 3 colunas
/// - [`TrainingError::EmptyDataset`] se nenhuma linha sobreviver à limpeza
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<TrainingExample>, TrainingError> {
    let file = std::fs::File::open(path.as_ref())?;
    from_reader(file)
}

/// Lê exemplos de qualquer fonte CSV (arquivo, buffer em memória...).
pub fn from_reader<R: Read>(reader: R) -> Result<Vec<TrainingExample>, TrainingError> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let text_idx = column_index(&headers, "text")?;
    let intent_idx = column_index(&headers, "intent")?;
    let response_idx = column_index(&headers, "response")?;

    let mut examples = Vec::new();
    let mut dropped = 0usize;

    for record in rdr.records() {
        let Ok(record) = record else {
            dropped += 1;
            continue;
        };
        let field = |idx: usize| record.get(idx).filter(|v| !v.is_empty());
        match (field(text_idx), field(intent_idx), field(response_idx)) {
            (Some(text), Some(intent), Some(response)) => {
                examples.push(TrainingExample::new(text, intent, response));
            }
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::warn!(dropped, kept = examples.len(), "Linhas malformadas descartadas do dataset");
    }

    if examples.is_empty() {
        return Err(TrainingError::EmptyDataset);
    }

    Ok(examples)
}

/// Procura a coluna pelo nome, sem diferenciar maiúsculas.
fn column_index(headers: &StringRecord, name: &'static str) -> Result<usize, TrainingError> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or(TrainingError::MissingColumn(name))
}

/// Mapeamento intent → resposta canônica.
///
/// Quando um intent se repete no dataset, a **primeira** resposta (na ordem
/// das linhas) vence.
#[derive(Clone, Debug, Default)]
pub struct ResponseTable {
    responses: HashMap<String, String>,
}

impl ResponseTable {
    pub fn from_examples(examples: &[TrainingExample]) -> Self {
        let mut responses = HashMap::new();
        for example in examples {
            responses
                .entry(example.intent.clone())
                .or_insert_with(|| example.response.clone());
        }
        Self { responses }
    }

    pub fn get(&self, intent: &str) -> Option<&str> {
        self.responses.get(intent).map(String::as_str)
    }

}
