// =============================================================================
// ANSWERS — L'instantané des réponses fourni au cœur
// =============================================================================
//
// Les réponses appartiennent à l'Answer Store (hors du cœur). Le cœur
// ne reçoit qu'un instantané en lecture : question-id → valeur 1..=7.
// Une entrée absente = question non répondue.
//
// La plage 1..=7 est garantie par le type AnswerValue : impossible de
// construire une réponse hors échelle.
//
// =============================================================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::Question;

/// Borne basse de l'échelle de Likert
pub const MIN_ANSWER: u8 = 1;
/// Borne haute de l'échelle de Likert
pub const MAX_ANSWER: u8 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("réponse hors échelle : {0} (attendu 1..=7)")]
pub struct AnswerError(pub i64);

/// Une valeur de réponse, toujours dans 1..=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct AnswerValue(u8);

impl AnswerValue {
    pub fn new(value: u8) -> Result<Self, AnswerError> {
        if (MIN_ANSWER..=MAX_ANSWER).contains(&value) {
            Ok(AnswerValue(value))
        } else {
            Err(AnswerError(value as i64))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Position sur l'échelle ramenée à [0, 1] : 1 → 0.0, 7 → 1.0
    pub fn unit(self) -> f64 {
        (self.0 - MIN_ANSWER) as f64 / (MAX_ANSWER - MIN_ANSWER) as f64
    }

    /// Toutes les valeurs valides, dans l'ordre
    pub fn all() -> impl Iterator<Item = AnswerValue> {
        (MIN_ANSWER..=MAX_ANSWER).map(AnswerValue)
    }
}

impl TryFrom<i64> for AnswerValue {
    type Error = AnswerError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| AnswerError(value))
            .and_then(AnswerValue::new)
    }
}

impl From<AnswerValue> for u8 {
    fn from(value: AnswerValue) -> Self {
        value.0
    }
}

impl std::fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Instantané des réponses : question-id → valeur.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers {
    values: BTreeMap<String, AnswerValue>,
}

impl Answers {
    pub fn new() -> Self {
        Answers::default()
    }

    /// Construit un instantané à partir de paires brutes (échoue à la première valeur hors échelle)
    pub fn from_pairs(pairs: &[(&str, u8)]) -> Result<Self, AnswerError> {
        let mut answers = Answers::new();
        for (id, v) in pairs {
            answers.set(id, AnswerValue::new(*v)?);
        }
        Ok(answers)
    }

    /// Enregistre (ou remplace) une réponse
    pub fn set(&mut self, question_id: &str, value: AnswerValue) -> &mut Self {
        self.values.insert(question_id.to_string(), value);
        self
    }

    /// Retire une réponse ; renvoie l'ancienne valeur
    pub fn remove(&mut self, question_id: &str) -> Option<AnswerValue> {
        self.values.remove(question_id)
    }

    pub fn get(&self, question_id: &str) -> Option<AnswerValue> {
        self.values.get(question_id).copied()
    }

    pub fn is_answered(&self, question_id: &str) -> bool {
        self.values.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, AnswerValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, AnswerValue)> for Answers {
    fn from_iter<I: IntoIterator<Item = (String, AnswerValue)>>(iter: I) -> Self {
        Answers {
            values: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// PROGRESSION — où en est l'utilisateur dans le questionnaire
// =============================================================================

/// Avancement du questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Questions connues ayant une réponse
    pub answered: usize,
    /// Nombre total de questions
    pub total: usize,
    /// Pourcentage arrondi, borné à [0, 100]
    pub percent: u8,
    /// Index de la première question sans réponse (None si tout est répondu)
    pub first_unanswered: Option<usize>,
}

impl Progress {
    pub fn compute(questions: &[Question], answers: &Answers) -> Self {
        let answered = questions.iter().filter(|q| answers.is_answered(&q.id)).count();
        let total = questions.len();
        let percent = if total == 0 {
            0
        } else {
            (answered as f64 / total as f64 * 100.0).round().clamp(0.0, 100.0) as u8
        };
        let first_unanswered = questions.iter().position(|q| !answers.is_answered(&q.id));
        Progress {
            answered,
            total,
            percent,
            first_unanswered,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.first_unanswered.is_none()
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {} ({}%)", self.answered, self.total, self.percent)
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_value_range() {
        assert!(AnswerValue::new(0).is_err());
        assert!(AnswerValue::new(8).is_err());
        assert_eq!(AnswerValue::all().count(), 7);
        assert_eq!(AnswerValue::new(1).unwrap().unit(), 0.0);
        assert_eq!(AnswerValue::new(7).unwrap().unit(), 1.0);
    }

    #[test]
    fn test_answers_json_rejects_out_of_range() {
        let ok: Answers = serde_json::from_str(r#"{"q1": 3, "q2": 7}"#).unwrap();
        assert_eq!(ok.get("q1").map(AnswerValue::get), Some(3));
        assert!(serde_json::from_str::<Answers>(r#"{"q1": 9}"#).is_err());
        assert!(serde_json::from_str::<Answers>(r#"{"q1": -1}"#).is_err());
    }

    #[test]
    fn test_set_and_remove() {
        let mut a = Answers::new();
        a.set("q1", AnswerValue::new(4).unwrap())
         .set("q1", AnswerValue::new(5).unwrap());
        assert_eq!(a.len(), 1);
        assert_eq!(a.remove("q1").map(AnswerValue::get), Some(5));
        assert!(a.is_empty());
    }

    #[test]
    fn test_progress() {
        let qs = vec![
            Question::ordinary("q1", "A"),
            Question::ordinary("q2", "A"),
            Question::ordinary("q3", "B"),
        ];
        let answers = Answers::from_pairs(&[("q1", 2), ("q3", 6), ("ghost", 1)]).unwrap();
        let p = Progress::compute(&qs, &answers);
        assert_eq!(p.answered, 2);
        assert_eq!(p.percent, 67);
        assert_eq!(p.first_unanswered, Some(1));
        assert!(!p.is_complete());
    }

    #[test]
    fn test_progress_empty_bank() {
        let p = Progress::compute(&[], &Answers::new());
        assert_eq!(p.percent, 0);
        assert!(p.is_complete());
    }
}
