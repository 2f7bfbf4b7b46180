// src/noyau/format.rs

use std::fmt;

use num_rational::BigRational;
use num_traits::{One, Signed};

use super::eval::Resultat;
use super::expr::{avec_pile, Expr, NOM_VARIABLE};

/// Chiffres significatifs affichés pour une valeur numérique.
pub const CHIFFRES_SIGNIFICATIFS: usize = 15;

/* ------------------------ Nombres ------------------------ */

/// Affiche un flottant avec CHIFFRES_SIGNIFICATIFS chiffres, zéros de queue retirés.
/// - 14.0       -> "14"
/// - 1/3        -> "0.333333333333333"
/// - 1e20       -> "1e20"
pub fn format_nombre(v: f64) -> String {
    if v == 0.0 {
        // couvre aussi -0.0
        return "0".to_string();
    }
    if !v.is_finite() {
        return v.to_string();
    }

    let abs = v.abs();
    if (1e-6..1e15).contains(&abs) {
        // chiffres avant la virgule (<= 0 pour |v| < 1)
        let entiers = abs.log10().floor() as i32 + 1;
        let decimales = (CHIFFRES_SIGNIFICATIFS as i32 - entiers).clamp(0, 20) as usize;
        return retirer_zeros(&format!("{v:.decimales$}"));
    }

    let s = format!("{:.*e}", CHIFFRES_SIGNIFICATIFS - 1, v);
    match s.split_once('e') {
        Some((mantisse, exposant)) => format!("{}e{exposant}", retirer_zeros(mantisse)),
        None => s,
    }
}

fn retirer_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/* ------------------------ Expressions ------------------------ */

// Niveaux de priorité pour le parenthésage minimal.
const P_ADD: u8 = 1;
const P_MUL: u8 = 2;
const P_NEG: u8 = 3;
const P_POW: u8 = 4;
const P_ATOME: u8 = 5;

fn priorite(e: &Expr) -> u8 {
    use Expr::*;
    match e {
        Add(_, _) | Sub(_, _) => P_ADD,
        Mul(_, _) | Div(_, _) => P_MUL,
        Neg(_) => P_NEG,
        Pow(_, _) => P_POW,
        Rat(r) => priorite_rat(r),
        Pi | E | Var | App(_, _) => P_ATOME,
    }
}

fn priorite_rat(r: &BigRational) -> u8 {
    if !r.denom().is_one() {
        P_MUL
    } else if r.is_negative() {
        P_NEG
    } else {
        P_ATOME
    }
}

fn ecrire(f: &mut fmt::Formatter<'_>, e: &Expr, min: u8) -> fmt::Result {
    avec_pile(|| {
        if priorite(e) < min {
            write!(f, "(")?;
            ecrire_nu(f, e)?;
            write!(f, ")")
        } else {
            ecrire_nu(f, e)
        }
    })
}

fn ecrire_nu(f: &mut fmt::Formatter<'_>, e: &Expr) -> fmt::Result {
    use Expr::*;
    match e {
        Rat(r) => {
            if r.denom().is_one() {
                write!(f, "{}", r.numer())
            } else {
                write!(f, "{}/{}", r.numer(), r.denom())
            }
        }
        Pi => write!(f, "pi"),
        E => write!(f, "E"),
        Var => write!(f, "{NOM_VARIABLE}"),

        Neg(a) => {
            write!(f, "-")?;
            ecrire(f, a, P_NEG)
        }

        Add(a, b) => {
            ecrire(f, a, P_ADD)?;
            write!(f, " + ")?;
            ecrire(f, b, P_ADD)
        }
        // a - (b + c) : le membre droit doit être plus fort que +
        Sub(a, b) => {
            ecrire(f, a, P_ADD)?;
            write!(f, " - ")?;
            ecrire(f, b, P_MUL)
        }
        Mul(a, b) => {
            ecrire(f, a, P_MUL)?;
            write!(f, "*")?;
            ecrire(f, b, P_NEG + 1)
        }
        Div(a, b) => {
            ecrire(f, a, P_MUL)?;
            write!(f, "/")?;
            ecrire(f, b, P_NEG + 1)
        }
        // base atomique ; exposant à droite (associativité à droite)
        Pow(a, b) => {
            ecrire(f, a, P_ATOME)?;
            write!(f, "^")?;
            ecrire(f, b, P_POW)
        }

        App(fonction, a) => {
            write!(f, "{fonction}(")?;
            ecrire(f, a, 0)?;
            write!(f, ")")
        }
    }
}

/// Affichage lisible, relisible par le noyau (`^` redevient `**` via preparer).
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ecrire(f, self, 0)
    }
}

/// Texte affiché dans la zone résultat.
impl fmt::Display for Resultat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resultat::Valeur(v) => f.write_str(&format_nombre(*v)),
            Resultat::Symbolique(e) => write!(f, "{e}"),
        }
    }
}
