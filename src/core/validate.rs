// =============================================================================
// VALIDATE — Vérification du référentiel au chargement
// =============================================================================
//
// Le scoring ne lève jamais d'erreur : réponses manquantes, calibration
// absente, vecteurs nuls... tout se replie sur une valeur neutre.
//
// La SEULE erreur fatale est un référentiel incohérent (bug de saisie
// des données) :
//   - un axe référencé par une question mais absent de la liste des axes
//   - une question de calibration sans poids, ou qui a aussi un axe
//   - un poids ou un vecteur idéal pour une école inconnue
//   - une école sans vecteur idéal, ou un vecteur de mauvaise dimension
//   - des identifiants dupliqués
//
// On refuse alors le référentiel dès le chargement plutôt que de
// calculer silencieusement un résultat faux.
//
// =============================================================================

use std::collections::HashSet;

use thiserror::Error;

use super::data::QuizData;
use super::model::QuestionKind;

/// Erreur de validation du référentiel
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("axe '{0}' déclaré plusieurs fois")]
    DuplicateAxis(String),

    #[error("question '{0}' déclarée plusieurs fois")]
    DuplicateQuestion(String),

    #[error("école '{0}' déclarée plusieurs fois")]
    DuplicateSchool(String),

    #[error("question '{question}' : l'axe '{axis}' n'existe pas")]
    UnknownAxis { question: String, axis: String },

    #[error("question de calibration '{0}' sans poids par école")]
    MissingSchoolWeights(String),

    #[error("question '{0}' : une question a au plus un rôle (axe OU poids par école)")]
    ConflictingRoles(String),

    #[error("question '{question}' : poids pour l'école inconnue '{school}'")]
    UnknownWeightedSchool { question: String, school: String },

    #[error("question '{question}' : poids non fini pour l'école '{school}'")]
    NonFiniteWeight { question: String, school: String },

    #[error("école '{0}' sans vecteur idéal")]
    MissingIdeal(String),

    #[error("vecteur idéal pour l'école inconnue '{0}'")]
    UnknownIdealSchool(String),

    #[error("école '{school}' : vecteur idéal de dimension {actual}, {expected} axes attendus")]
    IdealDimension { school: String, expected: usize, actual: usize },

    #[error("école '{school}' : composante {index} = {value} hors de [0, 100]")]
    IdealOutOfRange { school: String, index: usize, value: f64 },

    #[error("option '{name}' invalide : {value}")]
    InvalidOption { name: &'static str, value: f64 },
}

/// Une liste d'erreurs sur une ligne, séparées par "; "
pub fn join_errors(errors: &[ValidationError]) -> String {
    errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ")
}

/// Vérifie qu'un référentiel est bien formé.
///
/// Renvoie TOUTES les erreurs trouvées, pas seulement la première.
pub fn validate_data(data: &QuizData) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut axis_ids = HashSet::new();
    for axis in &data.axes {
        if !axis_ids.insert(axis.id.as_str()) {
            errors.push(ValidationError::DuplicateAxis(axis.id.clone()));
        }
    }

    let mut school_ids = HashSet::new();
    for school in &data.schools {
        if !school_ids.insert(school.id.as_str()) {
            errors.push(ValidationError::DuplicateSchool(school.id.clone()));
        }
    }

    // --- Questions ---
    let mut question_ids = HashSet::new();
    for q in &data.questions {
        if !question_ids.insert(q.id.as_str()) {
            errors.push(ValidationError::DuplicateQuestion(q.id.clone()));
        }

        match q.kind {
            QuestionKind::Calibration => {
                if q.axis.is_some() {
                    errors.push(ValidationError::ConflictingRoles(q.id.clone()));
                }
                match &q.school_weights {
                    None => errors.push(ValidationError::MissingSchoolWeights(q.id.clone())),
                    Some(weights) => {
                        for (school, w) in weights {
                            if !school_ids.contains(school.as_str()) {
                                errors.push(ValidationError::UnknownWeightedSchool {
                                    question: q.id.clone(),
                                    school: school.clone(),
                                });
                            }
                            if !w.is_finite() {
                                errors.push(ValidationError::NonFiniteWeight {
                                    question: q.id.clone(),
                                    school: school.clone(),
                                });
                            }
                        }
                    }
                }
            }
            QuestionKind::Ordinary => {
                if q.school_weights.is_some() {
                    errors.push(ValidationError::ConflictingRoles(q.id.clone()));
                }
                if let Some(axis) = &q.axis {
                    if !axis_ids.contains(axis.as_str()) {
                        errors.push(ValidationError::UnknownAxis {
                            question: q.id.clone(),
                            axis: axis.clone(),
                        });
                    }
                }
            }
        }
    }

    // --- Vecteurs idéaux ---
    for school in &data.schools {
        match data.ideals.get(&school.id) {
            None => errors.push(ValidationError::MissingIdeal(school.id.clone())),
            Some(ideal) => {
                if ideal.len() != data.axes.len() {
                    errors.push(ValidationError::IdealDimension {
                        school: school.id.clone(),
                        expected: data.axes.len(),
                        actual: ideal.len(),
                    });
                }
                for (index, &value) in ideal.iter().enumerate() {
                    if !(0.0..=100.0).contains(&value) {
                        errors.push(ValidationError::IdealOutOfRange {
                            school: school.id.clone(),
                            index,
                            value,
                        });
                    }
                }
            }
        }
    }
    // ordre déterministe pour les messages
    let mut unknown: Vec<_> = data
        .ideals
        .keys()
        .filter(|id| !school_ids.contains(id.as_str()))
        .collect();
    unknown.sort();
    for id in unknown {
        errors.push(ValidationError::UnknownIdealSchool(id.clone()));
    }

    // --- Options ---
    if let Err(option_errors) = data.options.validate() {
        errors.extend(option_errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
