// =============================================================================
// LIGNEE — Moteur de scoring du test de lignée des écoles
// =============================================================================
//
// Lignee transforme les réponses à un questionnaire (échelle 1..=7) en
// un profil sur plusieurs axes, puis rapproche ce profil d'un petit
// ensemble d'écoles archétypes.
//
// Architecture :
//   core/    → Le cœur de scoring pur (aucune E/S pendant le calcul)
//   store/   → Persistance des réponses (mémoire, fichier JSON)
//   render/  → Présentation du résultat (texte, Markdown, SVG)
//
// Concepts fondamentaux :
//   AxisVector  = position de l'utilisateur, une valeur 0..100 par axe
//   Calibration = coup de pouce direct par école, normalisé dans [0, 1]
//   ScoreEntry  = cosinus(vecteur, idéal) + calibration recentrée
//   MixDecision = école principale, et secondaire si assez proche
//
// =============================================================================

pub mod core;
pub mod store;
pub mod render;
