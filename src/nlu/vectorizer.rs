//! # Espaço de Features — TF-IDF Ajustado Uma Única Vez
//!
//! O [`FeatureSpace`] é construído a partir do corpus de treino completo
//! (textos já normalizados) e depois só é lido. Ele transforma qualquer
//! texto normalizado em um vetor denso de dimensão fixa.
//!
//! ## Fit
//!
//! ```text
//! corpus normalizado
//!   ├── 1. Tokeniza (tokens com ≥ 2 chars, sem stop-words)
//!   ├── 2. Conta frequência total de cada termo no corpus
//!   ├── 3. Mantém os `max_features` mais frequentes (empate: ordem alfabética)
//!   ├── 4. Índices atribuídos em ordem alfabética
//!   └── 5. IDF suavizado: ln((1 + n) / (1 + df)) + 1
//! ```
//!
//! ## Transform
//!
//! Contagem bruta × IDF, normalizado em L2. Termos fora do vocabulário
//! contribuem zero; um texto só com termos desconhecidos vira o vetor
//! nulo (não é erro).

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;

use crate::error::TrainingError;

/// Stop-words em inglês removidas do vocabulário.
///
/// Palavras funcionais (artigos, pronomes, preposições, auxiliares) que
/// aparecem em quase toda frase e não ajudam a separar intents.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "almost", "alone", "along",
    "already", "also", "although", "always", "am", "among", "an", "and", "another", "any",
    "anyhow", "anyone", "anything", "anyway", "anywhere", "are", "around", "as", "at", "be",
    "became", "because", "become", "been", "before", "being", "below", "beside", "besides",
    "between", "beyond", "both", "but", "by", "can", "cannot", "could", "did", "do", "does",
    "doing", "done", "down", "during", "each", "either", "else", "elsewhere", "enough", "etc",
    "even", "ever", "every", "everyone", "everything", "everywhere", "except", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "hence", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "however", "i", "ie", "if", "in", "indeed",
    "into", "is", "it", "its", "itself", "just", "least", "less", "many", "may", "me",
    "meanwhile", "might", "mine", "more", "moreover", "most", "mostly", "much", "must", "my",
    "myself", "neither", "nevertheless", "next", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "per", "perhaps", "rather", "re", "same", "several", "she", "should", "since", "so",
    "some", "somehow", "someone", "something", "sometime", "sometimes", "somewhere", "still",
    "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then", "thence",
    "there", "thereafter", "thereby", "therefore", "therein", "these", "they", "this", "those",
    "though", "through", "throughout", "thru", "thus", "to", "together", "too", "toward",
    "towards", "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well",
    "were", "what", "whatever", "when", "whence", "whenever", "where", "whereas", "whereby",
    "wherein", "whether", "which", "while", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Quebra um texto normalizado em termos candidatos ao vocabulário.
fn tokenize<'a>(text: &'a str, stop_words: &HashSet<&'static str>) -> Vec<&'a str> {
    text.split_whitespace()
        .filter(|t| t.chars().count() >= 2)
        .filter(|t| !stop_words.contains(t))
        .collect()
}

fn stop_word_set() -> HashSet<&'static str> {
    STOP_WORDS.iter().copied().collect()
}

/// Transformação texto → vetor ajustada sobre o corpus de treino.
#[derive(Clone, Debug)]
pub struct FeatureSpace {
    /// termo → índice da dimensão
    vocabulary: HashMap<String, usize>,
    /// IDF suavizado por dimensão
    idf: Vec<f64>,
    stop_words: HashSet<&'static str>,
}

impl FeatureSpace {
    /// Ajusta o vocabulário e os pesos IDF sobre o corpus.
    ///
    /// # Erros
    ///
    /// - [`TrainingError::EmptyDataset`] para corpus vazio
    /// - [`TrainingError::EmptyVocabulary`] se nenhum termo sobreviver
    ///   ao filtro de stop-words
    pub fn fit(documents: &[String], max_features: usize) -> Result<Self, TrainingError> {
        if documents.is_empty() {
            return Err(TrainingError::EmptyDataset);
        }
        let stop_words = stop_word_set();

        // Tokenização em paralelo — cada documento é independente
        let tokenized: Vec<Vec<&str>> = documents
            .par_iter()
            .map(|doc| tokenize(doc, &stop_words))
            .collect();

        let mut term_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            for &token in tokens {
                *term_freq.entry(token).or_insert(0) += 1;
            }
        }

        // Top-N por frequência, empate resolvido pela ordem alfabética
        let mut ranked: Vec<(&str, usize)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(max_features);

        let mut terms: Vec<&str> = ranked.into_iter().map(|(t, _)| t).collect();
        if terms.is_empty() {
            return Err(TrainingError::EmptyVocabulary);
        }
        terms.sort_unstable();

        let vocabulary: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.to_string(), idx))
            .collect();

        let mut doc_freq = vec![0usize; vocabulary.len()];
        for tokens in &tokenized {
            let unique: HashSet<&str> = tokens.iter().copied().collect();
            for token in unique {
                if let Some(&idx) = vocabulary.get(token) {
                    doc_freq[idx] += 1;
                }
            }
        }

        let n = documents.len() as f64;
        let idf = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        tracing::debug!(terms = vocabulary.len(), documents = documents.len(), "Espaço de features ajustado");

        Ok(Self {
            vocabulary,
            idf,
            stop_words,
        })
    }

    /// Vetoriza um texto normalizado (L2 = 1, ou vetor nulo).
    pub fn transform(&self, text: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.dimension()];
        for token in tokenize(text, &self.stop_words) {
            if let Some(&idx) = self.vocabulary.get(token) {
                vector[idx] += 1.0;
            }
        }
        for (value, idf) in vector.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|v| *v /= norm);
        }
        vector
    }

    /// Vetoriza um lote de textos em paralelo.
    pub fn transform_batch(&self, texts: &[String]) -> Vec<Vec<f64>> {
        texts.par_iter().map(|t| self.transform(t)).collect()
    }

    /// Número de dimensões (tamanho do vocabulário).
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }
}
