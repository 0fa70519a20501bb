//! # Normalizador de Texto
//!
//! Transforma texto cru em uma string canônica de tokens, antes da
//! vetorização e do fallback de saudação.
//!
//! ## Etapas
//!
//! ```text
//! "  Hi!!  What COURSES do you offer? "
//!   ├── 1. lowercase                → "  hi!!  what courses do you offer? "
//!   ├── 2. NFC (Unicode)            → (forma canônica dos acentos)
//!   ├── 3. não-alfanumérico → " "   → "  hi    what courses do you offer  "
//!   ├── 4. colapsa espaços          → " hi what courses do you offer "
//!   └── 5. trim                     → "hi what courses do you offer"
//! ```
//!
//! A saída contém apenas caracteres alfanuméricos e espaços simples, e
//! a função é idempotente: `normalize(normalize(x)) == normalize(x)`.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Normalizador com regexes compiladas uma única vez.
pub struct Normalizer {
    /// Tudo que não é letra, dígito ou espaço.
    non_alnum_re: Regex,
    /// Sequências de espaços (qualquer espaço Unicode).
    whitespace_re: Regex,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            non_alnum_re: Regex::new(r"[^\p{Alphabetic}\p{N}\s]").unwrap(),
            whitespace_re: Regex::new(r"\s+").unwrap(),
        }
    }

    /// Normaliza um texto arbitrário. Nunca falha; pode devolver `""`.
    pub fn normalize(&self, text: &str) -> String {
        let lowered: String = text.to_lowercase().nfc().collect();
        let cleaned = self.non_alnum_re.replace_all(&lowered, " ");
        let collapsed = self.whitespace_re.replace_all(&cleaned, " ");
        // Resultado com menos de 2 chars (inclusive "") segue como está:
        // nenhuma etapa posterior tenta "consertar" entrada degenerada.
        collapsed.trim().to_string()
    }
}
