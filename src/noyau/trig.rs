// src/noyau/trig.rs
//
// Trig spéciale (angles exactement reconnus, radians) pour sin/cos/tan
// -------------------------------------------------------------------
// - Extraction coeff·π via coeff_pi()
// - Réduction modulo période via mod_rationnel() (sin/cos: 2 ; tan: 1)
// - Table limitée aux valeurs RATIONNELLES (0, ±1/2, ±1) + tan indéfini
//   Les valeurs en √2/2, √3/3… passent par la lecture flottante.
//
// Le tracé (mode degrés) n’utilise jamais ce fichier.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};

use super::erreurs::ErreurCalcul;
use super::expr::Expr;
use super::fonctions::Fonction;

/// Valeur exacte de f(x) si x = coeff·π avec un angle de la table.
///
/// Retour:
/// - Some(Ok(expr_exact)) si reconnu
/// - Some(Err(Domaine)) si indéfini (tan(π/2 + kπ))
/// - None si non reconnu (ou f hors sin/cos/tan)
pub fn valeur_speciale(f: Fonction, x: &Expr) -> Option<Result<Expr, ErreurCalcul>> {
    let periode = match f {
        Fonction::Sin | Fonction::Cos => 2,
        Fonction::Tan => 1,
        _ => return None,
    };

    // 1) extraire coeff·π
    let coeff = coeff_pi(x)?;

    // 2) réduire modulo période, puis k/n "petit"
    let (k, n) = rational_to_small_kn(&mod_rationnel(&coeff, periode))?;

    // 3) k mod 2n : table codée sur [0, 2π)
    let a = (k.rem_euclid(2 * n), n);

    let v = match f {
        Fonction::Sin => match a {
            (0, _) | (1, 1) => Expr::entier(0),
            (1, 6) | (5, 6) => Expr::fraction(1, 2),
            (7, 6) | (11, 6) => Expr::fraction(-1, 2),
            (1, 2) => Expr::entier(1),
            (3, 2) => Expr::entier(-1),
            _ => return None,
        },

        Fonction::Cos => match a {
            (0, _) => Expr::entier(1),
            (1, 1) => Expr::entier(-1),
            (1, 3) | (5, 3) => Expr::fraction(1, 2),
            (2, 3) | (4, 3) => Expr::fraction(-1, 2),
            (1, 2) | (3, 2) => Expr::entier(0),
            _ => return None,
        },

        Fonction::Tan => match a {
            (0, _) => Expr::entier(0),
            (1, 4) => Expr::entier(1),
            (3, 4) => Expr::entier(-1),
            (1, 2) => {
                return Some(Err(ErreurCalcul::domaine(format!(
                    "tan({}) indéfini",
                    format_angle_kn_pi(a.0, a.1)
                ))))
            }
            _ => return None,
        },

        _ => return None,
    };

    Some(Ok(v))
}

/// Détecte x = coeff·π (forme simplifiée : Pi, Mul, Div, Neg, Add/Sub de tels termes, 0).
///
/// SAFE: Var => None (on ne “devine” rien).
pub fn coeff_pi(x: &Expr) -> Option<BigRational> {
    use Expr::*;

    match x {
        Pi => Some(BigRational::one()),
        Rat(r) if r.is_zero() => Some(BigRational::zero()),

        Neg(a) => coeff_pi(a).map(|c| -c),

        Mul(a, b) => match (a.as_ref(), b.as_ref()) {
            (Rat(r), e) | (e, Rat(r)) => coeff_pi(e).map(|c| c * r.clone()),
            _ => None,
        },

        Div(a, b) => match b.as_ref() {
            Rat(r) if !r.is_zero() => coeff_pi(a).map(|c| c / r.clone()),
            _ => None,
        },

        Add(a, b) => Some(coeff_pi(a)? + coeff_pi(b)?),
        Sub(a, b) => Some(coeff_pi(a)? - coeff_pi(b)?),

        _ => None,
    }
}

/* ------------------------ Modulo rationnel exact (sans flottants) ------------------------ */

/// Réduction modulo `periode` sur un coefficient rationnel.
/// Retourne un rationnel dans [0, periode).
///
/// Si coeff = n/d, alors coeff mod periode = (n mod (periode*d))/d.
pub(crate) fn mod_rationnel(coeff: &BigRational, periode: i64) -> BigRational {
    if periode <= 0 || coeff.is_zero() {
        return coeff.clone();
    }

    let d = coeff.denom().clone(); // denom > 0 (num_rational)
    let m = BigInt::from(periode) * &d;

    let mut r = coeff.numer() % &m;
    if r < BigInt::zero() {
        r += &m;
    }
    BigRational::new(r, d)
}

/* ------------------------ Outils ------------------------ */

fn format_angle_kn_pi(k: i64, n: i64) -> String {
    match (k, n) {
        (0, _) => "0".to_string(),
        (1, 1) => "π".to_string(),
        (_, 1) => format!("{k}π"),
        (1, _) => format!("π/{n}"),
        _ => format!("{k}π/{n}"),
    }
}

/// Convertit un rationnel en (k,n) i64 réduit.
/// Accepte seulement n ∈ {1,2,3,4,6}.
fn rational_to_small_kn(r: &BigRational) -> Option<(i64, i64)> {
    // num_rational garde la fraction réduite
    let k = r.numer().to_i64()?;
    let n = r.denom().to_i64()?;

    if [1, 2, 3, 4, 6].contains(&n) {
        Some((k, n))
    } else {
        None
    }
}
