// =============================================================================
// MODEL — Les briques de configuration du test
// =============================================================================
//
// Tout ce qui est chargé UNE fois au démarrage et ne bouge plus ensuite :
//   - Axis     → une dimension de l'espace (un spectre gauche ↔ droite)
//   - Question → une question ordinaire (rattachée à un axe)
//                ou de calibration (pondérations par école)
//   - School   → un archétype ("école") avec son nom, ses tags, sa couleur
//   - EncyclopediaEntry → les fiches de référence d'une école
//
// L'ORDRE de la liste des axes est la base canonique : toute AxisVector
// (utilisateur ou idéale) suit cet ordre, composante par composante.
//
// =============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Vecteur sur les axes, valeurs dans [0, 100], dans l'ordre de la liste des axes.
/// 50 = neutre / inconnu.
pub type AxisVector = Vec<f64>;

/// Libellé gauche par défaut quand le référentiel n'en fournit aucun
pub const DEFAULT_LEFT_LABEL: &str = "côté gauche";
/// Libellé droit par défaut
pub const DEFAULT_RIGHT_LABEL: &str = "côté droit";

fn default_left_label() -> String {
    DEFAULT_LEFT_LABEL.to_string()
}

fn default_right_label() -> String {
    DEFAULT_RIGHT_LABEL.to_string()
}

/// Une dimension de l'espace de correspondance.
///
/// En JSON, `short` retombe sur `name`, et chaque libellé d'extrémité
/// retombe sur `leftHint` / `rightHint` puis sur le libellé par défaut.
/// Une chaîne vide compte comme absente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawAxis")]
pub struct Axis {
    pub id: String,
    pub short: String,
    #[serde(rename = "leftShort")]
    pub left_label: String,
    #[serde(rename = "rightShort")]
    pub right_label: String,
}

/// Forme brute d'un axe dans ideals.json, avant résolution des replis
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAxis {
    id: String,
    short: Option<String>,
    name: Option<String>,
    left_short: Option<String>,
    left_hint: Option<String>,
    right_short: Option<String>,
    right_hint: Option<String>,
}

/// Premier libellé non vide de la chaîne de repli
fn first_label(candidates: [Option<String>; 2]) -> Option<String> {
    candidates.into_iter().flatten().find(|s| !s.trim().is_empty())
}

impl From<RawAxis> for Axis {
    fn from(raw: RawAxis) -> Self {
        Axis {
            short: first_label([raw.short, raw.name]).unwrap_or_else(|| raw.id.clone()),
            left_label: first_label([raw.left_short, raw.left_hint]).unwrap_or_else(default_left_label),
            right_label: first_label([raw.right_short, raw.right_hint])
                .unwrap_or_else(default_right_label),
            id: raw.id,
        }
    }
}

impl Axis {
    pub fn new(id: &str, short: &str) -> Self {
        Axis {
            id: id.to_string(),
            short: short.to_string(),
            left_label: default_left_label(),
            right_label: default_right_label(),
        }
    }

    /// Remplace les libellés des deux extrémités
    pub fn with_labels(mut self, left: &str, right: &str) -> Self {
        self.left_label = left.to_string();
        self.right_label = right.to_string();
        self
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} ↔ {}]", self.short, self.left_label, self.right_label)
    }
}

/// Rôle d'une question.
///
/// Dans les fichiers, c'est un champ `type` libre : seul "calibration"
/// (ou l'ancien libellé "校准题") désigne une question de calibration,
/// tout le reste est ordinaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionKind {
    #[default]
    Ordinary,
    Calibration,
}

impl From<String> for QuestionKind {
    fn from(tag: String) -> Self {
        match tag.trim() {
            "calibration" | "校准题" => QuestionKind::Calibration,
            _ => QuestionKind::Ordinary,
        }
    }
}

impl From<QuestionKind> for String {
    fn from(kind: QuestionKind) -> Self {
        match kind {
            QuestionKind::Ordinary => "ordinary".to_string(),
            QuestionKind::Calibration => "calibration".to_string(),
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::Ordinary => write!(f, "ordinaire"),
            QuestionKind::Calibration => write!(f, "calibration"),
        }
    }
}

/// Une question du test.
///
/// Invariant (vérifié par `validate`) :
/// - calibration → `school_weights` présent, pas d'`axis`
/// - ordinaire   → éventuellement un `axis`, jamais de `school_weights`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: QuestionKind,
    #[serde(default)]
    pub axis: Option<String>,
    #[serde(default)]
    pub school_weights: Option<BTreeMap<String, f64>>,
    /// Énoncé et libellés des extrémités de l'échelle (présentation uniquement)
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub left: String,
    #[serde(default)]
    pub right: String,
}

impl Question {
    /// Question ordinaire rattachée à un axe
    pub fn ordinary(id: &str, axis: &str) -> Self {
        Question {
            id: id.to_string(),
            kind: QuestionKind::Ordinary,
            axis: Some(axis.to_string()),
            school_weights: None,
            text: String::new(),
            left: String::new(),
            right: String::new(),
        }
    }

    /// Question de calibration : pondérations directes par école
    pub fn calibration(id: &str, weights: &[(&str, f64)]) -> Self {
        Question {
            id: id.to_string(),
            kind: QuestionKind::Calibration,
            axis: None,
            school_weights: Some(
                weights.iter().map(|(s, w)| (s.to_string(), *w)).collect(),
            ),
            text: String::new(),
            left: String::new(),
            right: String::new(),
        }
    }

    /// Ajoute l'énoncé et les libellés de l'échelle
    pub fn with_text(mut self, text: &str, left: &str, right: &str) -> Self {
        self.text = text.to_string();
        self.left = left.to_string();
        self.right = right.to_string();
        self
    }

    pub fn is_calibration(&self) -> bool {
        self.kind == QuestionKind::Calibration
    }
}

/// Un archétype ("école") vers lequel on classe l'utilisateur.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub one_liner: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl School {
    pub fn new(id: &str, name: &str) -> Self {
        School {
            id: id.to_string(),
            name: name.to_string(),
            one_liner: String::new(),
            tags: Vec::new(),
            color: None,
        }
    }
}

impl fmt::Display for School {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Un module de fiche encyclopédique (titre + corps en texte quasi-markdown)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncyclopediaModule {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// La fiche d'une école : une suite ordonnée de modules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncyclopediaEntry {
    #[serde(default)]
    pub modules: Vec<EncyclopediaModule>,
}

impl EncyclopediaEntry {
    /// Modules affichables : ceux dont le corps n'est pas vide
    pub fn visible_modules(&self) -> impl Iterator<Item = &EncyclopediaModule> {
        self.modules.iter().filter(|m| !m.body.trim().is_empty())
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_kind_from_tag() {
        assert_eq!(QuestionKind::from("calibration".to_string()), QuestionKind::Calibration);
        assert_eq!(QuestionKind::from("校准题".to_string()), QuestionKind::Calibration);
        assert_eq!(QuestionKind::from("情境题".to_string()), QuestionKind::Ordinary);
        assert_eq!(QuestionKind::from(String::new()), QuestionKind::Ordinary);
    }

    #[test]
    fn test_axis_label_fallbacks() {
        let ax: Axis = serde_json::from_str(r#"{"id":"a","name":"Méthode"}"#).unwrap();
        assert_eq!(ax.short, "Méthode");
        assert_eq!(ax.left_label, DEFAULT_LEFT_LABEL);
        assert_eq!(ax.right_label, DEFAULT_RIGHT_LABEL);

        let ax: Axis = serde_json::from_str(
            r#"{"id":"a","short":"M","leftHint":"intuition","rightShort":"mesure"}"#,
        )
        .unwrap();
        assert_eq!(ax.left_label, "intuition");
        assert_eq!(ax.right_label, "mesure");
    }

    #[test]
    fn test_axis_short_wins_over_name() {
        let ax: Axis =
            serde_json::from_str(r#"{"id":"a","name":"Méthode longue","short":"Méthode"}"#).unwrap();
        assert_eq!(ax.short, "Méthode");

        let ax: Axis = serde_json::from_str(
            r#"{"id":"a","short":"M","leftShort":"x","leftHint":"y","rightHint":"z"}"#,
        )
        .unwrap();
        assert_eq!(ax.left_label, "x");
        assert_eq!(ax.right_label, "z");
    }

    #[test]
    fn test_axis_empty_labels_fall_back() {
        let ax: Axis = serde_json::from_str(
            r#"{"id":"a","short":"","name":"Nom","leftShort":" ","leftHint":"gauche","rightShort":""}"#,
        )
        .unwrap();
        assert_eq!(ax.short, "Nom");
        assert_eq!(ax.left_label, "gauche");
        assert_eq!(ax.right_label, DEFAULT_RIGHT_LABEL);

        // sans aucun libellé, l'identifiant sert de nom court
        let ax: Axis = serde_json::from_str(r#"{"id":"a"}"#).unwrap();
        assert_eq!(ax.short, "a");
    }

    #[test]
    fn test_axis_json_roundtrip_keeps_labels() {
        let ax = Axis::new("a", "Méthode").with_labels("intuition", "mesure");
        let back: Axis = serde_json::from_str(&serde_json::to_string(&ax).unwrap()).unwrap();
        assert_eq!(back, ax);
    }

    #[test]
    fn test_question_json() {
        let q: Question = serde_json::from_str(
            r#"{"id":"c1","type":"校准题","schoolWeights":{"s1":1.0,"s2":-0.5}}"#,
        )
        .unwrap();
        assert!(q.is_calibration());
        assert_eq!(q.axis, None);
        assert_eq!(q.school_weights.unwrap().get("s2"), Some(&-0.5));

        let q: Question = serde_json::from_str(r#"{"id":"q1","axis":"a"}"#).unwrap();
        assert_eq!(q.kind, QuestionKind::Ordinary);
        assert_eq!(q.axis.as_deref(), Some("a"));
    }

    #[test]
    fn test_visible_modules_skip_empty_bodies() {
        let entry = EncyclopediaEntry {
            modules: vec![
                EncyclopediaModule { title: "Origines".into(), body: "texte".into() },
                EncyclopediaModule { title: "Vide".into(), body: "  ".into() },
            ],
        };
        let titles: Vec<_> = entry.visible_modules().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Origines"]);
    }
}
