// =============================================================================
// Scénarios de bout en bout sur le référentiel livré dans data/
// =============================================================================

use std::path::PathBuf;

use lignee::core::answers::{AnswerValue, Answers, Progress};
use lignee::core::data::QuizData;
use lignee::core::engine::{evaluate, evaluate_with};
use lignee::render::{MarkdownRenderer, Renderer, SvgRadarRenderer, TextRenderer};
use lignee::store::{AnswerStore, JsonFileStore};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn sample() -> QuizData {
    QuizData::load_dir(data_dir()).unwrap()
}

/// Même valeur pour les trois questions de chaque axe (m, l, o, a, u)
fn profile(values: [u8; 5], extra: &[(&str, u8)]) -> Answers {
    let mut answers = Answers::new();
    for (prefix, v) in ["m", "l", "o", "a", "u"].iter().zip(values) {
        for i in 1..=3 {
            answers.set(&format!("{}{}", prefix, i), AnswerValue::new(v).unwrap());
        }
    }
    for (id, v) in extra {
        answers.set(id, AnswerValue::new(*v).unwrap());
    }
    answers
}

fn ranked_ids(data: &QuizData, answers: &Answers) -> Vec<String> {
    evaluate(data, answers).ranking.into_iter().map(|e| e.school_id).collect()
}

#[test]
fn test_sample_loads() {
    let d = sample();
    assert_eq!(d.axes.len(), 5);
    assert_eq!(d.schools.len(), 5);
    assert_eq!(d.questions.len(), 18);
    assert_eq!(d.questions.iter().filter(|q| q.is_calibration()).count(), 3);
    // repli des libellés : "name" → short, "leftHint" → left_label
    let unit = d.axes.iter().find(|a| a.id == "unit").unwrap();
    assert_eq!(unit.short, "Unité");
    assert_eq!(unit.left_label, "le comportement");
}

#[test]
fn test_behaviorist_profile_with_secondary() {
    let d = sample();
    let r = evaluate(&d, &profile([7, 6, 7, 2, 1], &[]));
    assert_eq!(r.mix.primary_id.as_deref(), Some("behaviorism"));
    // 0.889 >= 0.997 * 0.85
    assert!(r.mix.has_secondary);
    assert_eq!(r.mix.secondary_id.as_deref(), Some("neuroscience"));
}

#[test]
fn test_humanist_profile_without_secondary() {
    let d = sample();
    let r = evaluate(&d, &profile([2, 1, 6, 7, 5], &[]));
    assert_eq!(r.mix.primary_id.as_deref(), Some("humanism"));
    assert!(!r.mix.has_secondary);
    assert!(TextRenderer::summary(&d, &r).contains("aucune (écart important)"));
}

#[test]
fn test_empty_answers_are_neutral() {
    let d = sample();
    let r = evaluate(&d, &Answers::new());
    assert_eq!(r.vector, vec![50.0; 5]);
    for e in &r.ranking {
        assert_eq!(e.total, e.similarity);
    }
    assert_eq!(r.ranking[0].school_id, "cognitivism");
}

#[test]
fn test_calibration_reorders_runner_up() {
    let d = sample();
    let axes_only = profile([1, 3, 1, 2, 6], &[]);
    assert_eq!(&ranked_ids(&d, &axes_only)[..2], &["psychoanalysis", "cognitivism"]);

    let calibrated = profile([1, 3, 1, 2, 6], &[("c1", 7), ("c2", 1), ("c3", 5)]);
    assert_eq!(&ranked_ids(&d, &calibrated)[..2], &["psychoanalysis", "humanism"]);

    // poids de calibration nul : on retrouve le classement par axes seuls
    let opts = d.options.with_calibration_weight(0.0);
    let flat: Vec<_> = evaluate_with(&d, &calibrated, &opts)
        .ranking
        .into_iter()
        .map(|e| e.school_id)
        .collect();
    assert_eq!(flat, ranked_ids(&d, &axes_only));
}

#[test]
fn test_calibration_alone_changes_primary() {
    let d = sample();
    let r = evaluate(&d, &Answers::from_pairs(&[("c2", 7)]).unwrap());
    assert_eq!(r.mix.primary_id.as_deref(), Some("neuroscience"));
    assert_eq!(r.mix.secondary_id.as_deref(), Some("cognitivism"));
}

#[test]
fn test_store_roundtrip_drives_scoring() {
    let d = sample();
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("answers.json"));
    store.record("m1", AnswerValue::new(4).unwrap()).unwrap();
    assert_eq!(store.load().len(), 1);
    let expected = profile([2, 1, 6, 7, 5], &[]);
    store.save(&expected).unwrap();

    let snapshot = store.load();
    assert_eq!(snapshot, expected);
    let progress = Progress::compute(&d.questions, &snapshot);
    assert_eq!(progress.answered, 15);
    assert_eq!(progress.first_unanswered, Some(15));
    assert_eq!(evaluate(&d, &snapshot).mix.primary_id.as_deref(), Some("humanism"));
}

#[test]
fn test_renderers_on_sample() {
    let d = sample();
    let r = evaluate(&d, &profile([7, 6, 7, 2, 1], &[]));

    let text = TextRenderer::new().render_result(&d, &r);
    assert!(text.contains("profil mixte"));
    assert!(text.contains("« Neurosciences »"));

    let md = MarkdownRenderer::new().render_result(&d, &r);
    assert!(md.contains("# Behaviorisme"));
    assert!(md.contains("- John B. Watson"));
    assert!(!md.contains("## Limites"));

    let svg = SvgRadarRenderer::default().render_result(&d, &r);
    assert!(svg.contains(r##"stroke="#e4572e""##));

    for school in &d.schools {
        assert!(MarkdownRenderer::new().render_entry(&d, &school.id).is_some());
    }
}
