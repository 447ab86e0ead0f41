// =============================================================================
// RENDER TEXT — Rapport terminal et résumé à partager
// =============================================================================

use std::fmt::Write;

use super::{mix_narrative, path_lines, round1, Renderer};
use crate::core::data::QuizData;
use crate::core::engine::ScoringResult;

/// Largeur des barres d'axes (en caractères)
const BAR_WIDTH: usize = 20;

/// Renderer texte brut
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    /// Afficher aussi le classement détaillé de toutes les écoles
    pub show_ranking: bool,
}

impl TextRenderer {
    pub fn new() -> Self {
        TextRenderer::default()
    }

    pub fn with_ranking(mut self) -> Self {
        self.show_ranking = true;
        self
    }

    /// Le résumé court, prêt à copier-coller
    pub fn summary(data: &QuizData, result: &ScoringResult) -> String {
        let mut lines = vec!["Résultat du test de lignée des écoles :".to_string()];
        lines.push(format!(
            "École principale : {}",
            result.primary(data).map(|s| s.name.as_str()).unwrap_or("—")
        ));
        lines.push(match result.secondary(data) {
            Some(s) => format!("École secondaire : {}", s.name),
            None => "École secondaire : aucune (écart important)".to_string(),
        });
        lines.push("Parcours (0-100, plus haut = plus à droite) :".to_string());
        for (axis, v) in data.axes.iter().zip(&result.vector) {
            lines.push(format!("- {}: {}", axis.short, round1(*v)));
        }
        lines.join("\n")
    }
}

/// Barre proportionnelle à une valeur 0..100
fn bar(value: f64) -> String {
    let filled = ((value.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "·".repeat(BAR_WIDTH - filled))
}

impl Renderer for TextRenderer {
    fn render_result(&self, data: &QuizData, result: &ScoringResult) -> String {
        let mut out = String::new();
        let primary = result.primary(data);

        let badge = if result.mix.has_secondary {
            "École principale (profil mixte)"
        } else {
            "École principale"
        };
        let _ = writeln!(out, "[{}]", badge);
        let _ = writeln!(out, "{}", primary.map(|s| s.name.as_str()).unwrap_or("—"));
        if let Some(p) = primary {
            if !p.one_liner.is_empty() {
                let _ = writeln!(out, "{}", p.one_liner);
            }
            if !p.tags.is_empty() {
                let _ = writeln!(out, "#{}", p.tags.join(" #"));
            }
        }

        let _ = writeln!(out, "\nAxes :");
        let width = data.axes.iter().map(|a| a.short.chars().count()).max().unwrap_or(0);
        for (axis, v) in data.axes.iter().zip(&result.vector) {
            let pad = width - axis.short.chars().count();
            let _ = writeln!(
                out,
                "  {}{} {} {:>5.1}",
                axis.short,
                " ".repeat(pad),
                bar(*v),
                v
            );
        }

        let _ = writeln!(out, "\nChemin de compréhension :");
        for line in path_lines(&data.axes, &result.vector) {
            let _ = writeln!(out, "{}", line);
        }

        let _ = writeln!(out, "\n{}", mix_narrative(data, result));

        if self.show_ranking {
            let _ = writeln!(out, "\nClassement :");
            for (i, e) in result.ranking.iter().enumerate() {
                let name = data.school(&e.school_id).map(|s| s.name.as_str()).unwrap_or(e.school_id.as_str());
                let _ = writeln!(
                    out,
                    "  {}. {} total={:.4} sim={:.4} cal={:.3}",
                    i + 1,
                    name,
                    e.total,
                    e.similarity,
                    e.calibration
                );
            }
        }
        out
    }

    fn name(&self) -> &str {
        "text"
    }
}
