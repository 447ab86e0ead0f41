// =============================================================================
// STORE FILE — Réponses persistées dans un fichier JSON
// =============================================================================
//
// Format : un objet plat { "question-id": valeur, ... }.
//
// Lecture tolérante :
//   - fichier absent          → instantané vide
//   - fichier illisible/corrompu → instantané vide + warn!
//   - valeur hors 1..=7 ou non entière → entrée ignorée + warn!
//
// =============================================================================

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use super::{AnswerStore, StoreError};
use crate::core::answers::{AnswerValue, Answers};

/// Store adossé à un fichier JSON
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Garde les entrées valides d'un objet JSON brut
fn lenient_answers(raw: BTreeMap<String, Value>, path: &Path) -> Answers {
    raw.into_iter()
        .filter_map(|(id, value)| {
            let parsed = value.as_i64().and_then(|v| AnswerValue::try_from(v).ok());
            if parsed.is_none() {
                warn!(path = %path.display(), question = %id, %value, "réponse ignorée (hors échelle)");
            }
            parsed.map(|v| (id, v))
        })
        .collect()
}

impl AnswerStore for JsonFileStore {
    fn load(&self) -> Answers {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Answers::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "store illisible, réponses vides");
                return Answers::new();
            }
        };

        match serde_json::from_str::<BTreeMap<String, Value>>(&text) {
            Ok(raw) => lenient_answers(raw, &self.path),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "store corrompu, réponses vides");
                Answers::new()
            }
        }
    }

    fn save(&mut self, answers: &Answers) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let text = serde_json::to_string_pretty(answers)?;
        std::fs::write(&self.path, text).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), count = answers.len(), "réponses enregistrées");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn name(&self) -> &str {
        "json-file"
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested/answers.json"));
        let answers = Answers::from_pairs(&[("q1", 2), ("c1", 7)]).unwrap();
        store.save(&answers).unwrap();
        assert_eq!(store.load(), answers);

        store.clear().unwrap();
        assert!(store.load().is_empty());
        // effacer deux fois n'est pas une erreur
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.json");
        std::fs::write(&path, "{ pas du json").unwrap();
        assert!(JsonFileStore::new(&path).load().is_empty());
    }

    #[test]
    fn test_out_of_range_entries_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.json");
        std::fs::write(&path, r#"{"q1": 5, "q2": 0, "q3": 12, "q4": "x", "q5": 1}"#).unwrap();
        let answers = JsonFileStore::new(&path).load();
        let ids: Vec<_> = answers.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["q1", "q5"]);
    }
}
