// =============================================================================
// DATA — Le référentiel complet du test
// =============================================================================
//
// QuizData regroupe toute la configuration immuable :
//   questions    → la banque de questions (ordinaires + calibration)
//   axes         → la base canonique des vecteurs
//   schools      → les écoles, dans leur ordre de déclaration
//   ideals       → école → vecteur idéal (même forme qu'une AxisVector)
//   options      → poids de calibration + seuils de mix
//   encyclopedia → école → fiche de référence
//
// Sur disque, c'est un répertoire de quatre fichiers JSON :
//
//   questions.json     [ {id, type, axis?, schoolWeights?, text, left, right} ]
//   schools.json       [ {id, name, oneLiner, tags, color} ]
//   ideals.json        { axes: [...], schoolVectors: {...},
//                        calibrationWeight?, mixRule?: {ratio?, gap?} }
//   encyclopedia.json  { école: { modules: [ {title, body} ] } }   (optionnel)
//
// Tout chargement passe par `validate_data` : un référentiel incohérent
// est refusé immédiatement.
//
// =============================================================================

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use super::model::{Axis, EncyclopediaEntry, Question, School};
use super::options::ScoringOptions;
use super::validate::{join_errors, validate_data, ValidationError};

pub const QUESTIONS_FILE: &str = "questions.json";
pub const SCHOOLS_FILE: &str = "schools.json";
pub const IDEALS_FILE: &str = "ideals.json";
pub const ENCYCLOPEDIA_FILE: &str = "encyclopedia.json";

/// Erreur de chargement du référentiel
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("lecture de {path} impossible : {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON invalide dans {path} : {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("référentiel invalide ({} erreur(s)) : {}", .0.len(), join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

/// Contenu de ideals.json
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdealsFile {
    axes: Vec<Axis>,
    #[serde(default)]
    school_vectors: HashMap<String, Vec<f64>>,
    #[serde(flatten)]
    options: ScoringOptions,
}

/// Le référentiel complet, immuable une fois chargé.
#[derive(Debug, Clone, Default)]
pub struct QuizData {
    pub questions: Vec<Question>,
    pub axes: Vec<Axis>,
    pub schools: Vec<School>,
    pub ideals: HashMap<String, Vec<f64>>,
    pub options: ScoringOptions,
    pub encyclopedia: HashMap<String, EncyclopediaEntry>,
}

impl QuizData {
    /// Crée un référentiel vide (options par défaut)
    pub fn new() -> Self {
        QuizData::default()
    }

    /// Ajoute un axe (à la fin : l'ordre d'ajout est l'ordre des composantes)
    pub fn add_axis(&mut self, axis: Axis) -> &mut Self {
        self.axes.push(axis);
        self
    }

    /// Ajoute une école et son vecteur idéal
    pub fn add_school(&mut self, school: School, ideal: Vec<f64>) -> &mut Self {
        self.ideals.insert(school.id.clone(), ideal);
        self.schools.push(school);
        self
    }

    pub fn add_question(&mut self, question: Question) -> &mut Self {
        self.questions.push(question);
        self
    }

    pub fn add_entry(&mut self, school_id: &str, entry: EncyclopediaEntry) -> &mut Self {
        self.encyclopedia.insert(school_id.to_string(), entry);
        self
    }

    pub fn set_options(&mut self, options: ScoringOptions) -> &mut Self {
        self.options = options;
        self
    }

    /// Vérifie les invariants du référentiel
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        validate_data(self)
    }

    /// Construit un référentiel à partir du contenu des fichiers JSON, puis le valide.
    pub fn from_json(
        questions: &str,
        schools: &str,
        ideals: &str,
        encyclopedia: Option<&str>,
    ) -> Result<Self, LoadError> {
        let questions: Vec<Question> = parse(QUESTIONS_FILE, questions)?;
        let schools: Vec<School> = parse(SCHOOLS_FILE, schools)?;
        let ideals: IdealsFile = parse(IDEALS_FILE, ideals)?;
        let encyclopedia = match encyclopedia {
            Some(text) => parse(ENCYCLOPEDIA_FILE, text)?,
            None => HashMap::new(),
        };

        let data = QuizData {
            questions,
            axes: ideals.axes,
            schools,
            ideals: ideals.school_vectors,
            options: ideals.options,
            encyclopedia,
        };
        data.validate().map_err(LoadError::Invalid)?;
        debug!(
            questions = data.questions.len(),
            axes = data.axes.len(),
            schools = data.schools.len(),
            "référentiel validé"
        );
        Ok(data)
    }

    /// Charge un référentiel depuis un répertoire (voir l'en-tête du module).
    ///
    /// `encyclopedia.json` est optionnel ; les trois autres fichiers sont requis.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        let dir = dir.as_ref();
        let questions = read(&dir.join(QUESTIONS_FILE))?;
        let schools = read(&dir.join(SCHOOLS_FILE))?;
        let ideals = read(&dir.join(IDEALS_FILE))?;
        let encyclopedia_path = dir.join(ENCYCLOPEDIA_FILE);
        let encyclopedia = if encyclopedia_path.exists() {
            Some(read(&encyclopedia_path)?)
        } else {
            None
        };

        let data = Self::from_json(&questions, &schools, &ideals, encyclopedia.as_deref())
            .map_err(|e| with_dir(e, dir))?;
        info!(dir = %dir.display(), "référentiel chargé");
        Ok(data)
    }

    pub fn school(&self, id: &str) -> Option<&School> {
        self.schools.iter().find(|s| s.id == id)
    }

    pub fn entry(&self, school_id: &str) -> Option<&EncyclopediaEntry> {
        self.encyclopedia.get(school_id)
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

fn parse<T: for<'de> Deserialize<'de>>(file: &str, text: &str) -> Result<T, LoadError> {
    serde_json::from_str(text).map_err(|source| LoadError::Json {
        path: PathBuf::from(file),
        source,
    })
}

fn read(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Préfixe le nom de fichier d'une erreur JSON par le répertoire chargé
fn with_dir(err: LoadError, dir: &Path) -> LoadError {
    match err {
        LoadError::Json { path, source } => LoadError::Json {
            path: dir.join(path),
            source,
        },
        other => other,
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::QuestionKind;

    const QUESTIONS: &str = r#"[
        {"id":"q1","type":"情境题","axis":"A","text":"?","left":"non","right":"oui"},
        {"id":"c1","type":"calibration","schoolWeights":{"S1":1.0,"S2":-1.0}}
    ]"#;
    const SCHOOLS: &str = r##"[
        {"id":"S1","name":"Un","oneLiner":"premier","tags":["x"],"color":"#123456"},
        {"id":"S2","name":"Deux"}
    ]"##;
    const IDEALS: &str = r#"{
        "axes":[{"id":"A","short":"Alpha"}],
        "schoolVectors":{"S1":[90],"S2":[10]},
        "mixRule":{"ratio":0.9}
    }"#;

    #[test]
    fn test_from_json() {
        let d = QuizData::from_json(QUESTIONS, SCHOOLS, IDEALS, None).unwrap();
        assert_eq!(d.questions.len(), 2);
        assert_eq!(d.questions[1].kind, QuestionKind::Calibration);
        assert_eq!(d.school("S1").unwrap().color.as_deref(), Some("#123456"));
        assert_eq!(d.options.calibration_weight, 0.4);
        assert_eq!(d.options.mix_rule.ratio, 0.9);
        assert_eq!(d.options.mix_rule.gap, 0.06);
        assert!(d.encyclopedia.is_empty());
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        let ideals = r#"{"axes":[{"id":"B","short":"Beta"}],"schoolVectors":{"S1":[1],"S2":[2]}}"#;
        match QuizData::from_json(QUESTIONS, SCHOOLS, ideals, None) {
            Err(LoadError::Invalid(errs)) => {
                assert_eq!(errs.len(), 1);
                assert!(matches!(errs[0], ValidationError::UnknownAxis { .. }));
            }
            other => panic!("attendu Invalid, obtenu {:?}", other),
        }
    }

    #[test]
    fn test_from_json_reports_file() {
        let err = QuizData::from_json("[", SCHOOLS, IDEALS, None).unwrap_err();
        assert!(err.to_string().contains(QUESTIONS_FILE));
    }

    #[test]
    fn test_encyclopedia_json() {
        let ency = r#"{"S1":{"modules":[{"title":"Origines","body":"- a\n- b"}]}}"#;
        let d = QuizData::from_json(QUESTIONS, SCHOOLS, IDEALS, Some(ency)).unwrap();
        assert_eq!(d.entry("S1").unwrap().modules.len(), 1);
        assert!(d.entry("S2").is_none());
    }

    #[test]
    fn test_builder_keeps_axis_order() {
        let mut d = QuizData::new();
        d.add_axis(Axis::new("Z", "Zed")).add_axis(Axis::new("A", "Alpha"));
        let ids: Vec<_> = d.axes.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["Z", "A"]);
    }
}
