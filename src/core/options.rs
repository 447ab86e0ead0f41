// =============================================================================
// OPTIONS — Les paramètres de scoring, avec leurs valeurs par défaut
// =============================================================================
//
// Trois nombres pilotent tout le classement :
//   calibration_weight → amplitude maximale du coup de pouce de calibration
//   mix_rule.ratio     → règle relative : second >= top * ratio
//   mix_rule.gap       → règle absolue  : top - second <= gap
//
// Les valeurs viennent du référentiel (ideals.json) mais l'appelant
// peut toujours les surcharger (CLI, tests...).
//
// =============================================================================

use serde::{Deserialize, Serialize};

use super::validate::ValidationError;

pub const DEFAULT_CALIBRATION_WEIGHT: f64 = 0.4;
pub const DEFAULT_MIX_RATIO: f64 = 0.85;
pub const DEFAULT_MIX_GAP: f64 = 0.06;

fn default_calibration_weight() -> f64 {
    DEFAULT_CALIBRATION_WEIGHT
}

fn default_ratio() -> f64 {
    DEFAULT_MIX_RATIO
}

fn default_gap() -> f64 {
    DEFAULT_MIX_GAP
}

/// Seuils de la décision de mix (école secondaire)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixRule {
    #[serde(default = "default_ratio")]
    pub ratio: f64,
    #[serde(default = "default_gap")]
    pub gap: f64,
}

impl Default for MixRule {
    fn default() -> Self {
        MixRule {
            ratio: DEFAULT_MIX_RATIO,
            gap: DEFAULT_MIX_GAP,
        }
    }
}

/// Paramètres complets d'une passe de scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringOptions {
    #[serde(default = "default_calibration_weight")]
    pub calibration_weight: f64,
    #[serde(default)]
    pub mix_rule: MixRule,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        ScoringOptions {
            calibration_weight: DEFAULT_CALIBRATION_WEIGHT,
            mix_rule: MixRule::default(),
        }
    }
}

impl ScoringOptions {
    pub fn with_calibration_weight(mut self, weight: f64) -> Self {
        self.calibration_weight = weight;
        self
    }

    pub fn with_mix_ratio(mut self, ratio: f64) -> Self {
        self.mix_rule.ratio = ratio;
        self
    }

    pub fn with_mix_gap(mut self, gap: f64) -> Self {
        self.mix_rule.gap = gap;
        self
    }

    /// Applique les surcharges présentes, garde le reste
    pub fn overridden(
        self,
        calibration_weight: Option<f64>,
        ratio: Option<f64>,
        gap: Option<f64>,
    ) -> Self {
        ScoringOptions {
            calibration_weight: calibration_weight.unwrap_or(self.calibration_weight),
            mix_rule: MixRule {
                ratio: ratio.unwrap_or(self.mix_rule.ratio),
                gap: gap.unwrap_or(self.mix_rule.gap),
            },
        }
    }

    /// Vérifie les trois paramètres.
    ///
    /// Le poids de calibration doit être fini et positif ; ratio et écart
    /// doivent seulement être finis (des valeurs extrêmes rendent le mix
    /// plus rare ou plus fréquent, sans casser le classement).
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        if !self.calibration_weight.is_finite() || self.calibration_weight < 0.0 {
            errors.push(ValidationError::InvalidOption {
                name: "calibrationWeight",
                value: self.calibration_weight,
            });
        }
        if !self.mix_rule.ratio.is_finite() {
            errors.push(ValidationError::InvalidOption {
                name: "mixRule.ratio",
                value: self.mix_rule.ratio,
            });
        }
        if !self.mix_rule.gap.is_finite() {
            errors.push(ValidationError::InvalidOption {
                name: "mixRule.gap",
                value: self.mix_rule.gap,
            });
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
