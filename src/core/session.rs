//! # Memória de Sessão — As Últimas Trocas de Cada Usuário
//!
//! Guarda, por `user_id`, um log ordenado das trocas mais recentes
//! (intent + resposta + instante). Cada log tem capacidade fixa
//! (5 por padrão) com **evicção FIFO**: a entrada mais antiga sai primeiro.
//!
//! ## Concorrência
//!
//! Um único `parking_lot::Mutex` protege o mapa inteiro. Atualizações
//! para o mesmo usuário são serializadas, o que preserva o invariante de
//! truncamento; a contenção esperada é baixa (uma operação O(1) por turno).
//!
//! ## ⚠️ Crescimento
//!
//! O número de usuários distintos **não tem limite**: o mapa cresce com
//! cada `user_id` novo durante toda a vida do processo. A evicção é
//! responsabilidade de quem chama, via [`SessionMemory::clear`].

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

/// Uma troca registrada na memória de sessão.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionEntry {
    pub intent: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

/// Memória de curto prazo por usuário.
pub struct SessionMemory {
    capacity: usize,
    logs: Mutex<HashMap<String, VecDeque<SessionEntry>>>,
}

impl SessionMemory {
    /// Cria uma memória vazia com `capacity` entradas por usuário.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            logs: Mutex::new(HashMap::new()),
        }
    }

    /// Registra uma troca para `user_id`, descartando as mais antigas
    /// além da capacidade.
    pub fn update(&self, user_id: &str, intent: &str, response: &str) {
        let entry = SessionEntry {
            intent: intent.to_string(),
            response: response.to_string(),
            timestamp: Utc::now(),
        };

        let mut logs = self.logs.lock();
        let log = logs.entry(user_id.to_string()).or_default();
        log.push_back(entry);
        while log.len() > self.capacity {
            log.pop_front();
        }
    }

    /// Log do usuário em ordem de inserção (vazio se desconhecido).
    pub fn get(&self, user_id: &str) -> Vec<SessionEntry> {
        self.logs
            .lock()
            .get(user_id)
            .map(|log| log.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Remove o log do usuário. Sem efeito se ele não existir.
    pub fn clear(&self, user_id: &str) {
        if self.logs.lock().remove(user_id).is_some() {
            tracing::debug!(user_id, "Sessão removida");
        }
    }
}
