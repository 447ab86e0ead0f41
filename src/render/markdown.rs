// =============================================================================
// RENDER MARKDOWN — Rapport et encyclopédie en Markdown
// =============================================================================
//
// Les corps des modules encyclopédiques sont du texte quasi-markdown :
// si une ligne commence par "- ", le corps devient des paragraphes suivis
// d'UNE liste à puces (les lignes "- " regroupées) ; sinon chaque saut
// de ligne est conservé tel quel.
//
// =============================================================================

use std::fmt::Write;

use super::{mix_narrative, path_lines, round1, Renderer};
use crate::core::data::QuizData;
use crate::core::engine::ScoringResult;
use crate::core::model::{EncyclopediaEntry, School};

/// Renderer Markdown
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        MarkdownRenderer
    }

    /// Liste de toutes les écoles (index de l'encyclopédie)
    pub fn render_index(&self, data: &QuizData) -> String {
        let mut out = String::from("# Encyclopédie des écoles\n");
        for s in &data.schools {
            let _ = write!(out, "\n## {}\n\n{}\n", s.name, s.one_liner);
            // l'index ne montre que les trois premiers tags
            let tags: Vec<_> = s.tags.iter().take(3).map(|t| format!("`{}`", t)).collect();
            if !tags.is_empty() {
                let _ = writeln!(out, "\n{}", tags.join(" "));
            }
        }
        out
    }

    /// Fiche complète d'une école ; None si l'école est inconnue
    pub fn render_entry(&self, data: &QuizData, school_id: &str) -> Option<String> {
        let school = data.school(school_id)?;
        let mut out = String::new();
        let _ = write!(out, "{}", school_header(school, 1));
        if let Some(entry) = data.entry(school_id) {
            out.push_str(&modules(entry));
        }
        Some(out)
    }
}

fn school_header(school: &School, level: usize) -> String {
    let mut out = format!("{} {}\n", "#".repeat(level), school.name);
    if !school.one_liner.is_empty() {
        let _ = write!(out, "\n> {}\n", school.one_liner);
    }
    if !school.tags.is_empty() {
        let tags: Vec<_> = school.tags.iter().map(|t| format!("`{}`", t)).collect();
        let _ = write!(out, "\n{}\n", tags.join(" "));
    }
    out
}

fn modules(entry: &EncyclopediaEntry) -> String {
    let mut out = String::new();
    for m in entry.visible_modules() {
        let _ = write!(out, "\n## {}\n\n{}\n", m.title, format_body(&m.body));
    }
    out
}

/// Met en forme le corps d'un module (voir l'en-tête du module)
pub fn format_body(body: &str) -> String {
    let lines: Vec<&str> = body.lines().map(str::trim).collect();
    let has_list = lines.iter().any(|l| l.starts_with("- "));
    if !has_list {
        // saut de ligne Markdown explicite
        return body.lines().collect::<Vec<_>>().join("  \n");
    }

    let paragraphs: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|l| !l.is_empty() && !l.starts_with("- "))
        .collect();
    let items: Vec<String> = lines
        .iter()
        .filter_map(|l| l.strip_prefix("- "))
        .map(|item| format!("- {}", item))
        .collect();

    let mut blocks: Vec<String> = paragraphs.into_iter().map(String::from).collect();
    blocks.push(items.join("\n"));
    blocks.join("\n\n")
}

impl Renderer for MarkdownRenderer {
    fn render_result(&self, data: &QuizData, result: &ScoringResult) -> String {
        let mut out = String::new();
        let badge = if result.mix.has_secondary {
            "École principale (profil mixte)"
        } else {
            "École principale"
        };
        let _ = writeln!(out, "*{}*\n", badge);

        match result.primary(data) {
            Some(primary) => out.push_str(&school_header(primary, 1)),
            None => out.push_str("# —\n"),
        }

        let _ = writeln!(out, "\n## Axes\n");
        let _ = writeln!(out, "| Axe | Valeur |");
        let _ = writeln!(out, "|---|---:|");
        for (axis, v) in data.axes.iter().zip(&result.vector) {
            let _ = writeln!(out, "| {} | {} |", axis.short, round1(*v));
        }

        let _ = writeln!(out, "\n## Chemin de compréhension\n");
        for line in path_lines(&data.axes, &result.vector) {
            let _ = writeln!(out, "{}", line);
        }

        let _ = writeln!(out, "\n## École secondaire\n\n{}", mix_narrative(data, result));

        if let Some(entry) = result.mix.primary_id.as_deref().and_then(|id| data.entry(id)) {
            out.push_str(&modules(entry));
        }
        out
    }

    fn name(&self) -> &str {
        "markdown"
    }
}
