// =============================================================================
// AXIS — Agrégation des réponses ordinaires en un vecteur d'axes
// =============================================================================
//
// Pour chaque axe (dans l'ordre de la liste des axes) :
//   1. on prend les questions ORDINAIRES rattachées à cet axe et répondues
//   2. chaque réponse v ∈ 1..=7 devient (v-1)/6 * 100 ∈ [0, 100]
//   3. la valeur de l'axe = moyenne arithmétique de ces contributions
//   4. aucune réponse sur l'axe → 50 (neutre)
//
// Le repli à 50 permet à un questionnaire incomplet de produire quand
// même un vecteur exploitable.
//
// =============================================================================

use std::collections::HashMap;

use super::answers::{AnswerValue, Answers};
use super::model::{Axis, AxisVector, Question};

/// Valeur d'un axe sans aucune réponse
pub const NEUTRAL_AXIS_VALUE: f64 = 50.0;

/// Contribution d'une réponse à son axe : 1 → 0 (gauche), 7 → 100 (droite)
pub fn axis_score_from_value(value: AnswerValue) -> f64 {
    value.unit() * 100.0
}

/// Calcule le vecteur utilisateur sur les axes.
///
/// Les questions de calibration et les questions sans axe sont ignorées.
/// Le résultat a exactement `axes.len()` composantes, dans l'ordre des axes.
pub fn compute_axis_vector(questions: &[Question], axes: &[Axis], answers: &Answers) -> AxisVector {
    // axe → (somme, nombre)
    let mut acc: HashMap<&str, (f64, usize)> = axes
        .iter()
        .map(|a| (a.id.as_str(), (0.0, 0)))
        .collect();

    for q in questions.iter().filter(|q| !q.is_calibration()) {
        let Some(axis_id) = q.axis.as_deref() else { continue };
        let Some(value) = answers.get(&q.id) else { continue };
        if let Some((sum, count)) = acc.get_mut(axis_id) {
            *sum += axis_score_from_value(value);
            *count += 1;
        }
    }

    axes.iter()
        .map(|a| match acc.get(a.id.as_str()) {
            Some(&(sum, count)) if count > 0 => sum / count as f64,
            _ => NEUTRAL_AXIS_VALUE,
        })
        .collect()
}
