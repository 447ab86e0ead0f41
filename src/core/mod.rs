// =============================================================================
// CORE — Le moteur de scoring pur
// =============================================================================
//
// Ce module regroupe toute la logique de classement :
// pas de fichiers de réponses, pas de rendu — uniquement des données
// immuables en entrée et des valeurs fraîchement calculées en sortie.
//
// Architecture :
//   model       → axes, questions, écoles, fiches (la configuration)
//   options     → poids de calibration + seuils de mix
//   data        → le référentiel complet (chargement JSON + validation)
//   validate    → les invariants du référentiel
//   answers     → l'instantané des réponses, l'avancement
//   axis        → réponses ordinaires → vecteur d'axes
//   calibration → réponses de calibration → ajustement par école
//   similarity  → cosinus + calibration → classement
//   mix         → école secondaire ou pas
//   engine      → le pipeline complet
//
// =============================================================================

pub mod model;
pub mod options;
pub mod data;
pub mod validate;
pub mod answers;
pub mod axis;
pub mod calibration;
pub mod similarity;
pub mod mix;
pub mod engine;
