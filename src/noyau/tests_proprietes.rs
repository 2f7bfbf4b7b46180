//! Tests de propriétés (campagne) : le contrat observable du noyau.
//!
//! - normalisation : les quatre passes, dans l’ordre
//! - évaluation    : valeur / symbolique / erreurs classées
//! - tracé         : degrés, bornes incluses, tout ou rien
//! - relecture     : le texte d’un résultat symbolique se relit à l’identique

use approx::assert_abs_diff_eq;

use super::erreurs::{ErreurCalcul, Genre, MSG_DOMAINE, MSG_SYNTAXE};
use super::eval::{evaluer, Resultat};
use super::normalisation::normaliser;
use super::trace::{tracer, Domaine};

fn eval_brut(brut: &str) -> Result<Resultat, ErreurCalcul> {
    evaluer(&normaliser(brut))
}

/* ------------------------ Normalisation ------------------------ */

#[test]
fn prop_normalisation_exemples() {
    assert_eq!(normaliser("2x"), "2*x");
    assert_eq!(normaliser("3(4+1)"), "3*(4+1)");
    assert_eq!(normaliser("(x+1)y"), "(x+1)*y");
    assert_eq!(normaliser("sin30"), "sin(30)");
}

#[test]
fn prop_normalisation_nom_precede_d_un_mot_intact() {
    for s in ["asin30", "bcos45", "_exp2", "xsqrt9"] {
        assert_eq!(normaliser(s), s);
    }
}

#[test]
fn prop_normalisation_idempotente_sur_exemples() {
    for s in ["2x+3(x-1)", "(x+1)(x-1)", "2sin30", "sqrt16+log100", "x^2"] {
        let une = normaliser(s);
        assert_eq!(normaliser(&une), une, "{s:?}");
    }
}

/* ------------------------ Évaluation ------------------------ */

#[test]
fn prop_evaluation_numerique() {
    assert_eq!(eval_brut("2+3*4"), Ok(Resultat::Valeur(14.0)));
}

#[test]
fn prop_evaluation_symbolique() {
    assert!(matches!(eval_brut("x+1"), Ok(Resultat::Symbolique(_))));
}

#[test]
fn prop_erreurs_classees() {
    let e = eval_brut("2++").unwrap_err();
    assert_eq!(e.genre(), Genre::Syntaxe);
    assert_eq!(e.message_utilisateur(), MSG_SYNTAXE);

    let e = eval_brut("1/0").unwrap_err();
    assert_eq!(e.genre(), Genre::Domaine);
    assert_eq!(e.message_utilisateur(), MSG_DOMAINE);
}

#[test]
fn prop_relecture_du_symbolique() {
    for brut in ["x+1", "2x^2-3x", "sin(x)/x", "-(x+1)^3", "x^(1/2)", "log(x)*E", "(x-1)/(x+1)"] {
        let premier = match eval_brut(brut) {
            Ok(Resultat::Symbolique(e)) => e,
            autre => panic!("{brut:?}: symbolique attendu, obtenu {autre:?}"),
        };
        // Le texte affiché passe par preparer (^ -> **, log10 reste log10)
        let texte = premier.to_string().replace("log10", "log");
        let second = match eval_brut(&texte) {
            Ok(Resultat::Symbolique(e)) => e,
            autre => panic!("{texte:?}: symbolique attendu, obtenu {autre:?}"),
        };
        assert_eq!(premier, second, "{brut:?} -> {texte:?}");
    }
}

/* ------------------------ Tracé ------------------------ */

#[test]
fn prop_trace_en_degres() {
    let d = Domaine::new(0.0, 90.0).unwrap();
    let c = tracer("sin(x)", d).unwrap();
    let (x, y) = c.points[c.points.len() - 1];
    assert_eq!(x, 90.0);
    assert_abs_diff_eq!(y, 1.0, epsilon = 1e-12);
}

#[test]
fn prop_trace_independant_de_l_evaluation() {
    // symbolique à l’évaluation, tracé en degrés
    assert!(matches!(eval_brut("tan(x)"), Ok(Resultat::Symbolique(_))));
    assert!(tracer("tan(x)", Domaine::new(-80.0, 80.0).unwrap()).is_ok());

    // un seul échantillon hors domaine suffit : aucune courbe
    assert!(tracer("sqrt(x)", Domaine::new(-0.5, 10.0).unwrap()).is_err());
    assert!(tracer("sqrt(x)", Domaine::new(0.0, 10.0).unwrap()).is_ok());
}
