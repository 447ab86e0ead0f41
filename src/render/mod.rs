// =============================================================================
// RENDER — Couche de présentation
// =============================================================================
//
// Le rendu traduit la sortie du cœur (AxisVector + classement + mix) en
// quelque chose de lisible. Grâce au trait Renderer, on peut supporter :
//   - TextRenderer     → rapport terminal + résumé à partager
//   - MarkdownRenderer → rapport et fiches encyclopédiques en Markdown
//   - SvgRadarRenderer → le radar des axes en SVG
//
// Le cœur (module core) ne connaît JAMAIS les renderers.
//
// =============================================================================

pub mod markdown;
pub mod svg;
pub mod text;

pub use markdown::MarkdownRenderer;
pub use svg::SvgRadarRenderer;
pub use text::TextRenderer;

use crate::core::data::QuizData;
use crate::core::engine::ScoringResult;
use crate::core::model::Axis;

/// Au-delà de ce seuil, l'axe penche à droite
pub const RIGHT_LEAN_THRESHOLD: f64 = 62.0;
/// En deçà de ce seuil, l'axe penche à gauche
pub const LEFT_LEAN_THRESHOLD: f64 = 38.0;

/// Trait abstrait pour tous les formats de sortie.
pub trait Renderer {
    /// Rend le résultat d'une passe de scoring
    fn render_result(&self, data: &QuizData, result: &ScoringResult) -> String;

    /// Nom du format
    fn name(&self) -> &str;
}

/// De quel côté penche un axe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lean {
    Left,
    Center,
    Right,
}

impl Lean {
    pub fn of(value: f64) -> Self {
        if value >= RIGHT_LEAN_THRESHOLD {
            Lean::Right
        } else if value <= LEFT_LEAN_THRESHOLD {
            Lean::Left
        } else {
            Lean::Center
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Lean::Left => "plutôt à gauche",
            Lean::Center => "plutôt centré",
            Lean::Right => "plutôt à droite",
        }
    }

    /// Indication associée : le libellé de l'extrémité, ou les deux au centre
    pub fn hint(self, axis: &Axis) -> &str {
        match self {
            Lean::Left => axis.left_label.as_str(),
            Lean::Center => "les deux extrémités servent",
            Lean::Right => axis.right_label.as_str(),
        }
    }
}

/// Arrondi au dixième
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Le "chemin de compréhension" : une ligne par axe
pub fn path_lines(axes: &[Axis], vector: &[f64]) -> Vec<String> {
    axes.iter()
        .zip(vector)
        .map(|(axis, &v)| {
            let lean = Lean::of(v);
            format!("- {}: {} ({})", axis.short, lean.label(), lean.hint(axis))
        })
        .collect()
}

/// Phrase décrivant l'école secondaire (ou son absence)
pub fn mix_narrative(data: &QuizData, result: &ScoringResult) -> String {
    match result.secondary(data) {
        Some(secondary) => format!(
            "Votre école secondaire est « {} ». Elle est proche de l'école principale : \
             selon la situation, vous passez d'une boîte à outils à l'autre.",
            secondary.name
        ),
        None => "L'écart avec la deuxième école est important : le résultat \
                 s'en tient à l'école principale."
            .to_string(),
    }
}
