// =============================================================================
// ENGINE — Le pipeline de scoring complet
// =============================================================================
//
//   Answers ──▶ compute_axis_vector ──▶ AxisVector ─┐
//      │                                            ├─▶ rank_schools ──▶ decide_mix
//      └────▶ compute_calibration ──▶ Calibration ──┘
//
// Fonction pure : même référentiel + même instantané de réponses
// → résultat identique au bit près. Rien n'est mis en cache, tout est
// recalculé à chaque appel (coût linéaire en nombre de questions).
//
// =============================================================================

use tracing::debug;

use super::answers::Answers;
use super::axis::compute_axis_vector;
use super::calibration::{compute_calibration, Calibration};
use super::data::QuizData;
use super::mix::{decide_mix, MixDecision};
use super::model::{AxisVector, School};
use super::options::ScoringOptions;
use super::similarity::{rank_schools, ScoreEntry};

/// Sortie du cœur, consommée par la couche de présentation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringResult {
    /// Vecteur utilisateur, dans l'ordre des axes
    pub vector: AxisVector,
    /// Détail de la calibration utilisée pour le classement
    pub calibration: Calibration,
    /// Écoles triées par total décroissant
    pub ranking: Vec<ScoreEntry>,
    pub mix: MixDecision,
}

impl ScoringResult {
    /// L'école principale, résolue dans le référentiel
    pub fn primary<'a>(&self, data: &'a QuizData) -> Option<&'a School> {
        self.mix.primary_id.as_deref().and_then(|id| data.school(id))
    }

    /// L'école secondaire, seulement si le mix est retenu
    pub fn secondary<'a>(&self, data: &'a QuizData) -> Option<&'a School> {
        self.mix.secondary_id.as_deref().and_then(|id| data.school(id))
    }
}

/// Score un instantané avec les options du référentiel.
pub fn evaluate(data: &QuizData, answers: &Answers) -> ScoringResult {
    evaluate_with(data, answers, &data.options)
}

/// Score un instantané avec des options fournies par l'appelant.
pub fn evaluate_with(data: &QuizData, answers: &Answers, options: &ScoringOptions) -> ScoringResult {
    let vector = compute_axis_vector(&data.questions, &data.axes, answers);
    debug!(?vector, "vecteur d'axes");

    let calibration = compute_calibration(
        &data.questions,
        &data.schools,
        answers,
        options.calibration_weight,
    );
    debug!(normalized = ?calibration.normalized, "calibration");

    let ranking = rank_schools(&vector, &data.schools, &data.ideals, &calibration);
    let mix = decide_mix(&ranking, &options.mix_rule);
    debug!(%mix, "décision de mix");

    ScoringResult {
        vector,
        calibration,
        ranking,
        mix,
    }
}
