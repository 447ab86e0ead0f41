// =============================================================================
// CALIBRATION — Ajustement direct par école
// =============================================================================
//
// Les questions de calibration court-circuitent le modèle d'axes : chacune
// porte des poids par école. L'algorithme :
//
//   t = ((v-1)/6)*2 - 1                  (1 → -1, 4 → 0, 7 → +1)
//   raw[école] += t * poids[école]       (pour chaque question répondue)
//   maxAbs = max(ε, max |raw[école]|)
//   norm[école] = (raw[école]/maxAbs + 1) / 2   ∈ [0, 1]
//
// La normalisation est RELATIVE aux réponses du moment (pas à un maximum
// théorique) : la calibration départage les écoles entre elles.
// Sans aucune réponse de calibration, tout vaut 0.5 (neutre).
//
// =============================================================================

use std::collections::BTreeMap;

use super::answers::{AnswerValue, Answers};
use super::model::{Question, School};

/// Plancher de maxAbs (évite la division par zéro)
pub const CALIBRATION_EPSILON: f64 = 1e-4;

/// Valeur normalisée neutre (aucun décalage du score)
pub const NEUTRAL_CALIBRATION: f64 = 0.5;

/// Résultat de l'agrégation de calibration.
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    /// Coefficient de mélange (repris tel quel de la configuration)
    pub weight: f64,
    /// école → valeur normalisée dans [0, 1]
    pub normalized: BTreeMap<String, f64>,
    /// école → accumulateur brut avant normalisation
    pub raw: BTreeMap<String, f64>,
}

impl Calibration {
    /// Calibration neutre : toutes les écoles à 0.5
    pub fn neutral(schools: &[School], weight: f64) -> Self {
        Calibration {
            weight,
            normalized: schools.iter().map(|s| (s.id.clone(), NEUTRAL_CALIBRATION)).collect(),
            raw: schools.iter().map(|s| (s.id.clone(), 0.0)).collect(),
        }
    }

    /// Valeur normalisée d'une école ; 0.5 si l'école est inconnue
    pub fn normalized_for(&self, school_id: &str) -> f64 {
        self.normalized.get(school_id).copied().unwrap_or(NEUTRAL_CALIBRATION)
    }

    /// Décalage appliqué au score total : weight * (norm - 0.5)
    pub fn shift_for(&self, school_id: &str) -> f64 {
        self.weight * (self.normalized_for(school_id) - NEUTRAL_CALIBRATION)
    }
}

/// Réponse ramenée à un signal signé dans [-1, +1] (4 = neutre)
pub fn signed_value(value: AnswerValue) -> f64 {
    value.unit() * 2.0 - 1.0
}

/// Agrège les questions de calibration en un score normalisé par école.
pub fn compute_calibration(
    questions: &[Question],
    schools: &[School],
    answers: &Answers,
    weight: f64,
) -> Calibration {
    let mut raw: BTreeMap<String, f64> = schools.iter().map(|s| (s.id.clone(), 0.0)).collect();

    for q in questions.iter().filter(|q| q.is_calibration()) {
        let Some(value) = answers.get(&q.id) else { continue };
        let Some(weights) = &q.school_weights else { continue };
        let t = signed_value(value);
        for (school_id, w) in weights {
            // les écoles inconnues sont rejetées au chargement ; on les ignore ici
            if let Some(acc) = raw.get_mut(school_id) {
                *acc += t * w;
            }
        }
    }

    let max_abs = raw.values().fold(CALIBRATION_EPSILON, |m, r| m.max(r.abs()));

    let normalized = raw
        .iter()
        .map(|(id, r)| (id.clone(), (r / max_abs + 1.0) / 2.0))
        .collect();

    Calibration {
        weight,
        normalized,
        raw,
    }
}
