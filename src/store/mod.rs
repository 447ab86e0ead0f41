// =============================================================================
// STORE — Là où vivent les réponses entre deux passes de scoring
// =============================================================================
//
// L'Answer Store est le SEUL propriétaire des réponses. Le cœur ne voit
// qu'un instantané (`Answers`) passé par valeur ; il ne connaît aucun store.
//
// Deux implémentations :
//   - MemoryStore   → tout en mémoire (tests, intégration embarquée)
//   - JsonFileStore → un objet JSON plat sur disque { "q1": 5, ... }
//
// Un store illisible ne casse jamais le test : `load` se replie sur un
// instantané vide (ou partiel) et le signale dans les logs.
//
// =============================================================================

pub mod file;

pub use file::JsonFileStore;

use thiserror::Error;

use crate::core::answers::{AnswerValue, Answers};

/// Erreur d'écriture d'un store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store {path} : {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("sérialisation des réponses : {0}")]
    Json(#[from] serde_json::Error),
}

/// Trait abstrait pour la persistance des réponses.
pub trait AnswerStore {
    /// Instantané courant. Ne doit jamais échouer : repli sur vide.
    fn load(&self) -> Answers;

    /// Remplace l'ensemble des réponses persistées
    fn save(&mut self, answers: &Answers) -> Result<(), StoreError>;

    /// Efface toutes les réponses
    fn clear(&mut self) -> Result<(), StoreError>;

    /// Enregistre une seule réponse (lecture, modification, écriture)
    fn record(&mut self, question_id: &str, value: AnswerValue) -> Result<Answers, StoreError> {
        let mut answers = self.load();
        answers.set(question_id, value);
        self.save(&answers)?;
        Ok(answers)
    }

    /// Nom du store (pour les logs)
    fn name(&self) -> &str;
}

/// Store en mémoire
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    answers: Answers,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn with_answers(answers: Answers) -> Self {
        MemoryStore { answers }
    }
}

impl AnswerStore for MemoryStore {
    fn load(&self) -> Answers {
        self.answers.clone()
    }

    fn save(&mut self, answers: &Answers) -> Result<(), StoreError> {
        self.answers = answers.clone();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.answers = Answers::new();
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
