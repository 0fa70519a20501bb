//! # Classificador de Intent — Naive Bayes Multinomial + Fallback
//!
//! Duas camadas:
//!
//! - [`IntentModel`] — o modelo ajustado ([`FeatureSpace`] + [`NaiveBayes`]),
//!   imutável depois do treino. Devolve o arg-max e sua probabilidade.
//! - [`IntentClassifier`] — a política sobre o modelo: estado não treinado
//!   e fallback de saudação para baixa confiança.
//!
//! ## Política de Classificação
//!
//! ```text
//! texto normalizado
//!   ├── modelo ausente?          → ("Unknown", 0.0)
//!   ├── NB: arg-max + prob
//!   ├── prob ≥ 0.3               → (arg-max, prob)
//!   └── prob < 0.3
//!       ├── contém saudação?     → ("Greeting", 0.8)
//!       └── senão                → (arg-max, prob)
//! ```
//!
//! O fallback existe porque saudações curtas ("hi", "hlo") quase não têm
//! peso no espaço TF-IDF e tendem a ser classificadas com confiança baixa.

use std::collections::BTreeSet;

use crate::core::{TrainingExample, GREETING_INTENT, UNKNOWN_INTENT};
use crate::error::{ClassifierError, TrainingError};

use super::normalizer::Normalizer;
use super::vectorizer::FeatureSpace;

/// Palavras de saudação testadas por contenção de substring.
const GREETING_WORDS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "hii",
    "hlo",
    "good morning",
    "good afternoon",
    "good evening",
];

/// Suavização de Laplace.
const ALPHA: f64 = 1.0;

/// Intent previsto com sua confiança.
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    pub intent: String,
    pub confidence: f64,
}

impl Prediction {
    fn new(intent: impl Into<String>, confidence: f64) -> Self {
        Self {
            intent: intent.into(),
            confidence,
        }
    }
}

/// Naive Bayes multinomial sobre vetores de pesos não negativos.
///
/// Parâmetros por classe:
/// - `class_log_prior[c] = ln(count(c) / n)`
/// - `feature_log_prob[c][i] = ln((Σ x_i + α) / (Σ_j Σ x_j + α·d))`
#[derive(Clone, Debug)]
pub struct NaiveBayes {
    /// Rótulos em ordem alfabética (define o desempate do arg-max).
    labels: Vec<String>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
    dimension: usize,
}

impl NaiveBayes {
    /// Ajusta o modelo. `vectors` e `labels` têm o mesmo comprimento (≥ 1).
    pub fn fit(vectors: &[Vec<f64>], labels: &[String], dimension: usize) -> Self {
        let classes: Vec<String> = labels.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect();

        let mut class_count = vec![0usize; classes.len()];
        let mut feature_count = vec![vec![0.0f64; dimension]; classes.len()];

        for (vector, label) in vectors.iter().zip(labels) {
            // classes vem de labels, a busca sempre encontra
            let Ok(c) = classes.binary_search(label) else {
                continue;
            };
            class_count[c] += 1;
            for (acc, &x) in feature_count[c].iter_mut().zip(vector) {
                *acc += x;
            }
        }

        let n = labels.len() as f64;
        let class_log_prior = class_count.iter().map(|&count| (count as f64 / n).ln()).collect();

        let feature_log_prob = feature_count
            .iter()
            .map(|counts| {
                let total: f64 = counts.iter().sum::<f64>() + ALPHA * dimension as f64;
                counts.iter().map(|&count| ((count + ALPHA) / total).ln()).collect()
            })
            .collect();

        Self {
            labels: classes,
            class_log_prior,
            feature_log_prob,
            dimension,
        }
    }

    /// Distribuição de probabilidade sobre os rótulos (mesma ordem de [`labels`](Self::labels)).
    pub fn predict_proba(&self, vector: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        if vector.len() != self.dimension {
            return Err(ClassifierError::DimensionMismatch {
                expected: self.dimension,
                got: vector.len(),
            });
        }

        let joint: Vec<f64> = self
            .class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_probs)| {
                prior + vector.iter().zip(log_probs).map(|(x, lp)| x * lp).sum::<f64>()
            })
            .collect();

        // softmax estável (log-sum-exp)
        let max = joint.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = joint.iter().map(|j| (j - max).exp()).collect();
        let sum: f64 = exps.iter().sum();
        Ok(exps.into_iter().map(|e| e / sum).collect())
    }

    /// Arg-max da distribuição; empate resolvido pelo primeiro rótulo.
    pub fn predict(&self, vector: &[f64]) -> Result<Prediction, ClassifierError> {
        let proba = self.predict_proba(vector)?;
        let mut best = 0;
        for (idx, &p) in proba.iter().enumerate() {
            if p > proba[best] {
                best = idx;
            }
        }
        Ok(Prediction::new(self.labels[best].clone(), proba[best]))
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Modelo de intents ajustado: espaço de features + Naive Bayes.
#[derive(Clone, Debug)]
pub struct IntentModel {
    features: FeatureSpace,
    bayes: NaiveBayes,
}

impl IntentModel {
    /// Treina sobre exemplos crus (o texto é normalizado aqui).
    pub fn train(
        examples: &[TrainingExample],
        normalizer: &Normalizer,
        max_features: usize,
    ) -> Result<Self, TrainingError> {
        if examples.is_empty() {
            return Err(TrainingError::EmptyDataset);
        }

        let texts: Vec<String> = examples.iter().map(|e| normalizer.normalize(&e.text)).collect();
        let labels: Vec<String> = examples.iter().map(|e| e.intent.clone()).collect();

        let features = FeatureSpace::fit(&texts, max_features)?;
        let vectors = features.transform_batch(&texts);
        let bayes = NaiveBayes::fit(&vectors, &labels, features.dimension());

        tracing::info!(
            examples = examples.len(),
            intents = bayes.labels().len(),
            features = features.dimension(),
            "Modelo de intents treinado"
        );

        Ok(Self { features, bayes })
    }

    /// Arg-max cru do modelo para um texto já normalizado.
    pub fn predict(&self, normalized: &str) -> Result<Prediction, ClassifierError> {
        let vector = self.features.transform(normalized);
        self.bayes.predict(&vector)
    }

    pub fn labels(&self) -> &[String] {
        self.bayes.labels()
    }

    pub fn features(&self) -> &FeatureSpace {
        &self.features
    }
}

#[cfg(test)]
impl IntentModel {
    /// Monta um modelo a partir de partes ajustadas separadamente.
    pub(crate) fn from_parts(features: FeatureSpace, bayes: NaiveBayes) -> Self {
        Self { features, bayes }
    }
}

/// Política de classificação sobre um [`IntentModel`] opcional.
#[derive(Clone, Debug)]
pub struct IntentClassifier {
    fallback_threshold: f64,
    greeting_confidence: f64,
}

impl IntentClassifier {
    pub fn new(fallback_threshold: f64, greeting_confidence: f64) -> Self {
        Self {
            fallback_threshold,
            greeting_confidence,
        }
    }

    /// Classifica um texto normalizado.
    ///
    /// `model = None` (ainda não treinado) devolve `("Unknown", 0.0)` sem
    /// tentar inferência.
    pub fn classify(&self, model: Option<&IntentModel>, normalized: &str) -> Result<Prediction, ClassifierError> {
        let Some(model) = model else {
            return Ok(Prediction::new(UNKNOWN_INTENT, 0.0));
        };

        let prediction = model.predict(normalized)?;
        if prediction.confidence < self.fallback_threshold && contains_greeting(normalized) {
            tracing::debug!(
                raw_intent = %prediction.intent,
                raw_confidence = prediction.confidence,
                "Fallback de saudação aplicado"
            );
            return Ok(Prediction::new(GREETING_INTENT, self.greeting_confidence));
        }

        Ok(prediction)
    }
}

/// Contenção de substring, como no vocabulário de saudações.
///
/// Note que "hi" casa dentro de "this" — a checagem só roda com confiança
/// baixa, então o efeito prático é pequeno.
fn contains_greeting(normalized: &str) -> bool {
    let lower = normalized.to_lowercase();
    GREETING_WORDS.iter().any(|word| lower.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(text: &str, intent: &str) -> TrainingExample {
        TrainingExample::new(text, intent, format!("{intent} response"))
    }

    fn sample_model() -> IntentModel {
        let examples = vec![
            example("what courses do you offer", "Courses"),
            example("which courses are available", "Courses"),
            example("list of courses", "Courses"),
            example("what are the fees", "Fees"),
            example("how much does the course cost", "Fees"),
            example("fee structure and price", "Fees"),
            example("tell me about internships", "Internships"),
            example("do you offer internship programs", "Internships"),
        ];
        IntentModel::train(&examples, &Normalizer::new(), 1000).unwrap()
    }

    #[test]
    fn untrained_always_returns_unknown() {
        let classifier = IntentClassifier::new(0.3, 0.8);
        for text in ["", "hi", "what courses do you offer"] {
            let p = classifier.classify(None, text).unwrap();
            assert_eq!(p, Prediction::new("Unknown", 0.0));
        }
    }

    #[test]
    fn predicts_arg_max_above_threshold() {
        let model = sample_model();
        let classifier = IntentClassifier::new(0.3, 0.8);
        let p = classifier.classify(Some(&model), "what courses do you offer").unwrap();
        assert_eq!(p.intent, "Courses");
        assert!(p.confidence >= 0.3);

        // o resultado final coincide com o arg-max cru do modelo
        assert_eq!(p, model.predict("what courses do you offer").unwrap());
    }

    #[test]
    fn probabilities_sum_to_one() {
        let model = sample_model();
        let vector = model.features().transform("internship fees");
        let proba = model.bayes.predict_proba(&vector).unwrap();
        assert_eq!(proba.len(), 3);
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(proba.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn single_class_model_is_fully_confident() {
        let examples = vec![example("what courses do you offer", "Courses")];
        let model = IntentModel::train(&examples, &Normalizer::new(), 1000).unwrap();
        let p = model.predict("anything at all").unwrap();
        assert_eq!(p, Prediction::new("Courses", 1.0));
    }

    #[test]
    fn duplicate_labels_are_tolerated() {
        let examples: Vec<_> = (0..20).map(|_| example("course fees", "Fees")).chain([example("hello", "Greeting")]).collect();
        let model = IntentModel::train(&examples, &Normalizer::new(), 1000).unwrap();
        assert_eq!(model.labels(), &["Fees".to_string(), "Greeting".to_string()]);
    }

    #[test]
    fn greeting_fallback_applies_below_threshold() {
        // 4 classes equilibradas e um texto fora do vocabulário: cada
        // classe fica com 0.25 < 0.3
        let examples = vec![
            example("course list", "Courses"),
            example("fee amount", "Fees"),
            example("internship program", "Internships"),
            example("certificate validity", "Certificates"),
        ];
        let model = IntentModel::train(&examples, &Normalizer::new(), 1000).unwrap();
        let raw = model.predict("hlo").unwrap();
        assert!(raw.confidence < 0.3);

        let classifier = IntentClassifier::new(0.3, 0.8);
        let p = classifier.classify(Some(&model), "hlo").unwrap();
        assert_eq!(p, Prediction::new("Greeting", 0.8));

        let p = classifier.classify(Some(&model), "good evening everyone").unwrap();
        assert_eq!(p.intent, "Greeting");

        // sem palavra de saudação, o arg-max cru segue
        let p = classifier.classify(Some(&model), "zzz").unwrap();
        assert_eq!(p, raw);
    }

    #[test]
    fn greeting_fallback_ignored_when_confident() {
        let model = sample_model();
        let classifier = IntentClassifier::new(0.3, 0.8);
        let p = classifier.classify(Some(&model), "hey what courses do you offer").unwrap();
        assert_eq!(p.intent, "Courses");
    }

    #[test]
    fn equal_probabilities_pick_first_label() {
        let examples = vec![example("beta words", "Beta"), example("alpha words", "Alpha")];
        let model = IntentModel::train(&examples, &Normalizer::new(), 1000).unwrap();
        assert_eq!(model.predict("").unwrap().intent, "Alpha");
    }

    #[test]
    fn wrong_dimension_is_an_error() {
        let model = sample_model();
        assert!(matches!(
            model.bayes.predict(&[1.0, 2.0]),
            Err(ClassifierError::DimensionMismatch { got: 2, .. })
        ));
    }
}
