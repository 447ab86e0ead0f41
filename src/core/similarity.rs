// =============================================================================
// SIMILARITY — Classement des écoles
// =============================================================================
//
// Pour chaque école, dans l'ordre de déclaration :
//   sim   = cos(vecteur utilisateur, vecteur idéal de l'école)
//   total = sim + weight * (calibration[école] - 0.5)
//
// Le recentrage -0.5 fait qu'une calibration neutre ne décale rien ;
// `weight` borne le décalage à ±weight/2, la similarité reste le signal
// principal.
//
// Tri décroissant par total, STABLE : à égalité, l'ordre de déclaration
// des écoles est conservé. Chaque école est calculée indépendamment des
// autres, le résultat ne dépend que des entrées.
//
// =============================================================================

use std::collections::HashMap;
use std::fmt;

use super::calibration::Calibration;
use super::model::School;

/// Score d'une école pour une passe de scoring (jamais persisté)
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEntry {
    pub school_id: String,
    /// Similarité cosinus dans [-1, 1]
    pub similarity: f64,
    /// Calibration normalisée dans [0, 1]
    pub calibration: f64,
    pub total: f64,
}

impl fmt::Display for ScoreEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} total={:.4} (sim={:.4}, cal={:.3})",
            self.school_id, self.total, self.similarity, self.calibration
        )
    }
}

/// Similarité cosinus.
///
/// Si l'un des vecteurs est de norme nulle, la similarité vaut 0.
/// Les composantes en trop du vecteur le plus long sont ignorées
/// (le chargement garantit des longueurs égales).
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let (mut dot, mut na, mut nb) = (0.0, 0.0, 0.0);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot / (na.sqrt() * nb.sqrt())
}

/// Classe les écoles par score total décroissant.
///
/// Une école sans vecteur idéal obtient une similarité de 0 (cas exclu
/// par la validation du référentiel).
pub fn rank_schools(
    axis_vector: &[f64],
    schools: &[School],
    ideals: &HashMap<String, Vec<f64>>,
    calibration: &Calibration,
) -> Vec<ScoreEntry> {
    let mut scores: Vec<ScoreEntry> = schools
        .iter()
        .map(|s| {
            let similarity = ideals
                .get(&s.id)
                .map(|ideal| cosine(axis_vector, ideal))
                .unwrap_or(0.0);
            let cal = calibration.normalized_for(&s.id);
            ScoreEntry {
                school_id: s.id.clone(),
                similarity,
                calibration: cal,
                total: similarity + calibration.shift_for(&s.id),
            }
        })
        .collect();

    // sort_by est stable : l'ordre de déclaration départage les égalités
    scores.sort_by(|a, b| b.total.total_cmp(&a.total));
    scores
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn samples() -> Vec<Vec<f64>> {
        vec![
            vec![50.0, 50.0, 50.0],
            vec![100.0, 0.0, 25.0],
            vec![12.5, 80.0, 66.0],
            vec![0.0, 0.0, 0.0],
            vec![-3.0, 4.0, 0.0],
        ]
    }

    #[test]
    fn test_cosine_symmetric() {
        for a in samples() {
            for b in samples() {
                assert_eq!(cosine(&a, &b), cosine(&b, &a));
            }
        }
    }

    #[test]
    fn test_cosine_self_is_one() {
        for a in samples().into_iter().filter(|v| v.iter().any(|x| *x != 0.0)) {
            assert!((cosine(&a, &a) - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_cosine_zero_magnitude() {
        assert_eq!(cosine(&[0.0, 0.0], &[3.0, 4.0]), 0.0);
        assert_eq!(cosine(&[3.0, 4.0], &[0.0, 0.0]), 0.0);
        assert_eq!(cosine(&[], &[]), 0.0);
    }

    #[test]
    fn test_single_axis_scenario() {
        let schools = vec![School::new("S1", "Un"), School::new("S2", "Deux")];
        let ideals = HashMap::from([
            ("S1".to_string(), vec![100.0]),
            ("S2".to_string(), vec![0.0]),
        ]);
        let cal = Calibration::neutral(&schools, 0.4);
        let ranking = rank_schools(&[100.0], &schools, &ideals, &cal);
        assert_eq!(ranking[0].school_id, "S1");
        assert_eq!(ranking[0].similarity, 1.0);
        assert_eq!(ranking[1].similarity, 0.0);
    }

    #[test]
    fn test_neutral_calibration_total_equals_similarity() {
        let schools = vec![School::new("S1", "Un"), School::new("S2", "Deux")];
        let ideals = HashMap::from([
            ("S1".to_string(), vec![80.0, 20.0]),
            ("S2".to_string(), vec![30.0, 90.0]),
        ]);
        let cal = Calibration::neutral(&schools, 0.4);
        for e in rank_schools(&[60.0, 40.0], &schools, &ideals, &cal) {
            assert_eq!(e.total, e.similarity);
        }
    }

    #[test]
    fn test_calibration_shifts_ranking() {
        let schools = vec![School::new("S1", "Un"), School::new("S2", "Deux")];
        // idéaux identiques → similarités égales, la calibration départage
        let ideals = HashMap::from([
            ("S1".to_string(), vec![50.0, 50.0]),
            ("S2".to_string(), vec![50.0, 50.0]),
        ]);
        let mut cal = Calibration::neutral(&schools, 0.4);
        cal.normalized.insert("S2".into(), 1.0);
        let ranking = rank_schools(&[50.0, 50.0], &schools, &ideals, &cal);
        assert_eq!(ranking[0].school_id, "S2");
        assert!((ranking[0].total - 1.2).abs() < EPS);
    }

    #[test]
    fn test_ties_keep_declaration_order() {
        let schools = vec![
            School::new("Z", "Zed"),
            School::new("A", "Alpha"),
            School::new("M", "Mu"),
        ];
        let ideals: HashMap<String, Vec<f64>> = schools
            .iter()
            .map(|s| (s.id.clone(), vec![10.0, 10.0]))
            .collect();
        let cal = Calibration::neutral(&schools, 0.4);
        let ids: Vec<_> = rank_schools(&[50.0, 50.0], &schools, &ideals, &cal)
            .into_iter()
            .map(|e| e.school_id)
            .collect();
        assert_eq!(ids, vec!["Z", "A", "M"]);
    }
}
