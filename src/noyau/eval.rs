//! Noyau: évaluation (pipeline réel)
//!
//! preparer -> jetons -> RPN -> Expr -> simplifier (exact) -> lecture f64 (radians)
//!
//! Remarques :
//! - `analyser` est partagé avec le tracé (qui ne simplifie pas).
//! - Une expression qui contient encore x reste symbolique : aucune valeur inventée.

use super::compile::compiler;
use super::erreurs::ErreurCalcul;
use super::expr::Expr;
use super::fonctions::ModeAngle;
use super::jetons::{format_tokens, tokenize};
use super::normalisation::preparer;
use super::rpn::{format_rpn, from_rpn, to_rpn};

/// Issue réussie d’une évaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum Resultat {
    /// Valeur finie (jamais NaN ni ±inf).
    Valeur(f64),
    /// Forme simplifiée qui dépend encore de x.
    Symbolique(Expr),
}

/// Lecture seule : chaîne normalisée -> arbre, sans simplification.
pub fn analyser(normalise: &str) -> Result<Expr, ErreurCalcul> {
    let prepare = preparer(normalise);

    let jetons = tokenize(&prepare)?;
    tracing::debug!(jetons = %format_tokens(&jetons), "jetons");

    let rpn = to_rpn(&jetons)?;
    tracing::debug!(rpn = %format_rpn(&rpn), "rpn");

    from_rpn(&rpn)
}

/// API publique : évalue une chaîne déjà normalisée.
pub fn evaluer(normalise: &str) -> Result<Resultat, ErreurCalcul> {
    let expr = analyser(normalise)?.simplifier()?;

    if expr.contient_var() {
        return Ok(Resultat::Symbolique(expr));
    }

    // Constante : x n’apparaît pas, la valeur d’appel est sans effet.
    let v = compiler(&expr, ModeAngle::Radians)?.appeler(0.0);

    if v.is_nan() {
        return Err(ErreurCalcul::domaine(format!("résultat non réel pour {expr}")));
    }
    if v.is_infinite() {
        return Err(ErreurCalcul::domaine(format!("dépassement ou pôle pour {expr}")));
    }

    Ok(Resultat::Valeur(v))
}
