// =============================================================================
// MIX — Faut-il annoncer une école secondaire ?
// =============================================================================
//
// On compare les deux premiers totaux du classement (top, second).
// Une école secondaire est retenue si L'UNE des deux règles passe :
//
//   règle relative : second >= top * ratio      (défaut ratio = 0.85)
//   règle absolue  : top - second <= gap        (défaut gap   = 0.06)
//
// La règle relative se comporte mal près de zéro ou en négatif, la règle
// absolue se comporte mal pour des totaux élevés : l'une OU l'autre suffit.
//
// =============================================================================

use std::fmt;

use super::options::MixRule;
use super::similarity::ScoreEntry;

/// Décision primaire / secondaire (jamais persistée)
#[derive(Debug, Clone, PartialEq)]
pub struct MixDecision {
    pub has_secondary: bool,
    /// None uniquement si le classement est vide
    pub primary_id: Option<String>,
    pub secondary_id: Option<String>,
    pub top_score: Option<f64>,
    pub second_score: Option<f64>,
}

impl MixDecision {
    fn single(primary: Option<&ScoreEntry>) -> Self {
        MixDecision {
            has_secondary: false,
            primary_id: primary.map(|e| e.school_id.clone()),
            secondary_id: None,
            top_score: primary.map(|e| e.total),
            second_score: None,
        }
    }
}

impl fmt::Display for MixDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let primary = self.primary_id.as_deref().unwrap_or("—");
        match &self.secondary_id {
            Some(secondary) => write!(f, "{} + {} (mix)", primary, secondary),
            None => write!(f, "{}", primary),
        }
    }
}

/// Vrai si les deux totaux sont assez proches pour annoncer un mix
pub fn is_close(top: f64, second: f64, rule: &MixRule) -> bool {
    let by_ratio = second >= top * rule.ratio;
    let by_gap = (top - second) <= rule.gap;
    by_ratio || by_gap
}

/// Décide du mix à partir d'un classement trié par total décroissant.
pub fn decide_mix(ranked: &[ScoreEntry], rule: &MixRule) -> MixDecision {
    let (top, second) = match ranked {
        [top, second, ..] => (top, second),
        _ => return MixDecision::single(ranked.first()),
    };

    let has_secondary = is_close(top.total, second.total, rule);
    MixDecision {
        has_secondary,
        primary_id: Some(top.school_id.clone()),
        secondary_id: has_secondary.then(|| second.school_id.clone()),
        top_score: Some(top.total),
        second_score: Some(second.total),
    }
}
