//! Noyau de la calculatrice (aucune dépendance à l’UI)
//!
//! Organisation interne :
//! - normalisation.rs : réécritures de la saisie (2x, 3(…), sin30, ^, log)
//! - jetons.rs        : tokenisation (décimaux exacts)
//! - rpn.rs           : shunting-yard + construction Expr (profondeur bornée)
//! - expr.rs          : AST exact + simplifier
//! - trig.rs          : angles spéciaux (sin/cos/tan en radians)
//! - fonctions.rs     : fonctions reconnues + mode d’angle
//! - compile.rs       : Expr -> fermeture f64
//! - eval.rs          : pipeline d’évaluation
//! - trace.rs         : échantillonnage de la courbe (degrés)
//! - export.rs        : PNG (natif)
//! - format.rs        : affichage des résultats
//! - erreurs.rs       : erreurs typées + journal

pub mod compile;
pub mod erreurs;
pub mod eval;
#[cfg(not(target_arch = "wasm32"))]
pub mod export;
pub mod expr;
pub mod fonctions;
pub mod format;
pub mod jetons;
pub mod normalisation;
pub mod rpn;
pub mod trace;
pub mod trig;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreurs::ErreurCalcul;
pub use eval::{evaluer, Resultat};
#[cfg(not(target_arch = "wasm32"))]
pub use export::exporter_png;
pub use normalisation::normaliser;
pub use trace::{tracer, Courbe, Domaine};
