// src/noyau/expr.rs
//
// AST (feuilles exactes, sans flottants).
// - Rat : rationnel exact (les décimaux saisis arrivent ici sans perte)
// - Pi, E : constantes symboliques
// - Var : la variable libre x (seul identifiant libre admis)
// - App : fonction unaire reconnue (sin, log10, sqrt…)
//
// IMPORTANT (SAFE):
// - simplifier() ne doit jamais “inventer” une valeur pour Var.
// - Les erreurs de domaine démontrables exactement (÷0, √ négative, tan(π/2))
//   sortent ici, avant tout flottant.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::erreurs::ErreurCalcul;
use super::fonctions::Fonction;
use super::trig::valeur_speciale;

/// Nom de la seule variable libre.
pub const NOM_VARIABLE: &str = "x";

/// Au-delà, x^n reste symbolique (la lecture flottante s’en charge).
const EXPOSANT_EXACT_MAX: i64 = 1024;

/// Garde-fou taille : bits(base) * |n| au-delà duquel on ne développe pas.
const BITS_PUISSANCE_MAX: u64 = 1 << 16;

/// Marge de pile sous laquelle un parcours récursif ouvre un nouveau segment.
#[cfg(not(target_arch = "wasm32"))]
const PILE_RESERVE: usize = 64 * 1024;
#[cfg(not(target_arch = "wasm32"))]
const PILE_SEGMENT: usize = 2 * 1024 * 1024;

/// Enveloppe des parcours récursifs de l’arbre (simplifier, compiler, affichage).
/// La profondeur est bornée par `from_rpn`, mais une longue chaîne penchée
/// dépasse vite la pile d’un fil secondaire.
#[inline]
pub(crate) fn avec_pile<R>(f: impl FnOnce() -> R) -> R {
    #[cfg(not(target_arch = "wasm32"))]
    {
        stacker::maybe_grow(PILE_RESERVE, PILE_SEGMENT, f)
    }
    #[cfg(target_arch = "wasm32")]
    {
        f()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Rat(BigRational),
    Pi,
    E,
    Var,

    Neg(Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),

    App(Fonction, Box<Expr>),
}

impl Expr {
    pub fn entier(n: i64) -> Expr {
        Expr::Rat(BigRational::from_integer(BigInt::from(n)))
    }

    pub fn fraction(n: i64, d: i64) -> Expr {
        Expr::Rat(BigRational::new(BigInt::from(n), BigInt::from(d)))
    }

    fn zero() -> Expr {
        Expr::Rat(BigRational::zero())
    }

    fn un() -> Expr {
        Expr::Rat(BigRational::one())
    }

    /// Détecte si l’expression dépend de x.
    /// Itératif : pas de récursion sur la pile d’appel.
    pub fn contient_var(&self) -> bool {
        use Expr::*;

        let mut pile: Vec<&Expr> = Vec::with_capacity(32);
        pile.push(self);

        while let Some(e) = pile.pop() {
            match e {
                Var => return true,
                Rat(_) | Pi | E => {}
                Neg(a) | App(_, a) => pile.push(a.as_ref()),
                Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) | Pow(a, b) => {
                    pile.push(a.as_ref());
                    pile.push(b.as_ref());
                }
            }
        }

        false
    }

    /// Simplification locale exacte, sans heuristiques.
    /// Objectif: plier ce qui est strictement rationnel, sans réordonner l’arbre.
    pub fn simplifier(self) -> Result<Expr, ErreurCalcul> {
        avec_pile(|| self.simplifier_local())
    }

    fn simplifier_local(self) -> Result<Expr, ErreurCalcul> {
        use Expr::*;

        let out = match self {
            // Feuilles: aucune simplification à faire
            Rat(_) | Pi | E | Var => self,

            Neg(a) => match a.simplifier()? {
                Rat(r) => Rat(-r),
                Neg(b) => *b,
                a => Neg(Box::new(a)),
            },

            Add(a, b) => {
                let a = a.simplifier()?;
                let b = b.simplifier()?;
                match (a, b) {
                    (Rat(x), Rat(y)) => Rat(x + y),
                    (Rat(x), b) if x.is_zero() => b,
                    (a, Rat(y)) if y.is_zero() => a,
                    // x + (-3) => x - 3 (rendu propre)
                    (a, Rat(y)) if y.is_negative() => Sub(Box::new(a), Box::new(Rat(-y))),
                    (a, Neg(b)) => Sub(Box::new(a), b),
                    (a, b) => Add(Box::new(a), Box::new(b)),
                }
            }

            Sub(a, b) => {
                let a = a.simplifier()?;
                let b = b.simplifier()?;

                // a - a => 0 (même structure, donc même valeur)
                if a == b {
                    return Ok(Expr::zero());
                }

                match (a, b) {
                    (Rat(x), Rat(y)) => Rat(x - y),
                    (a, Rat(y)) if y.is_zero() => a,
                    (Rat(x), b) if x.is_zero() => Neg(Box::new(b)),
                    (a, Neg(b)) => Add(Box::new(a), b),
                    (a, b) => Sub(Box::new(a), Box::new(b)),
                }
            }

            Mul(a, b) => {
                let a = a.simplifier()?;
                let b = b.simplifier()?;
                match (a, b) {
                    (Rat(x), Rat(y)) => Rat(x * y),
                    (Rat(x), _) if x.is_zero() => Expr::zero(),
                    (_, Rat(y)) if y.is_zero() => Expr::zero(),
                    (Rat(x), b) if x.is_one() => b,
                    (a, Rat(y)) if y.is_one() => a,
                    (a, b) => Mul(Box::new(a), Box::new(b)),
                }
            }

            Div(a, b) => {
                let a = a.simplifier()?;
                let b = b.simplifier()?;

                if matches!(&b, Rat(y) if y.is_zero()) {
                    return Err(ErreurCalcul::domaine("division par zéro"));
                }

                match (a, b) {
                    (Rat(x), Rat(y)) => Rat(x / y),
                    (a, Rat(y)) if y.is_one() => a,
                    (Rat(x), _) if x.is_zero() => Expr::zero(),
                    (a, b) => Div(Box::new(a), Box::new(b)),
                }
            }

            Pow(a, b) => {
                let a = a.simplifier()?;
                let b = b.simplifier()?;
                simplifier_puissance(a, b)?
            }

            App(f, a) => {
                let a = a.simplifier()?;
                simplifier_fonction(f, a)?
            }
        };

        Ok(out)
    }
}

fn simplifier_puissance(a: Expr, b: Expr) -> Result<Expr, ErreurCalcul> {
    use Expr::*;

    // 0 ^ (négatif) : pôle
    if let (Rat(base), Rat(exp)) = (&a, &b) {
        if base.is_zero() && exp.is_negative() {
            return Err(ErreurCalcul::domaine("zéro élevé à une puissance négative"));
        }
    }

    if matches!(&b, Rat(n) if n.is_zero()) {
        return Ok(Expr::un());
    }
    if matches!(&b, Rat(n) if n.is_one()) {
        return Ok(a);
    }
    if matches!(&a, Rat(r) if r.is_one()) {
        return Ok(Expr::un());
    }

    if let (Rat(base), Rat(exp)) = (&a, &b) {
        if let Some(n) = exposant_entier(exp) {
            if puissance_raisonnable(base, n) {
                return Ok(Rat(rational_pow_int(base.clone(), n)));
            }
        }
    }

    Ok(Pow(Box::new(a), Box::new(b)))
}

fn simplifier_fonction(f: Fonction, a: Expr) -> Result<Expr, ErreurCalcul> {
    use Expr::*;

    match (f, &a) {
        (Fonction::Sqrt, Rat(r)) => {
            if r.is_negative() {
                return Err(ErreurCalcul::domaine("racine carrée d’un nombre négatif"));
            }
            if let Some(s) = rational_sqrt_exact(r) {
                return Ok(Rat(s));
            }
        }
        (Fonction::Log10 | Fonction::Ln, Rat(r)) if !r.is_positive() => {
            return Err(ErreurCalcul::domaine(format!("{f} d’un nombre négatif ou nul")));
        }
        (Fonction::Abs, Rat(r)) => return Ok(Rat(r.abs())),
        (Fonction::Sin | Fonction::Cos | Fonction::Tan, _) => {
            if let Some(v) = valeur_speciale(f, &a) {
                return v;
            }
        }
        _ => {}
    }

    Ok(App(f, Box::new(a)))
}

/* ------------------------ Outils rationnels (utilisés par simplifier) ------------------------ */

fn exposant_entier(r: &BigRational) -> Option<i64> {
    if !r.denom().is_one() {
        return None;
    }
    let n = r.numer().to_i64()?;
    if n.abs() > EXPOSANT_EXACT_MAX {
        return None;
    }
    Some(n)
}

fn puissance_raisonnable(base: &BigRational, n: i64) -> bool {
    let bits = base.numer().bits().max(base.denom().bits()).max(1);
    bits.saturating_mul(n.unsigned_abs()) <= BITS_PUISSANCE_MAX
}

fn rational_pow_int(base: BigRational, exp: i64) -> BigRational {
    if exp == 0 {
        return BigRational::one();
    }
    if exp < 0 {
        let pos = rational_pow_int(base, -exp);
        return BigRational::one() / pos;
    }

    let mut e = exp as u64;
    let mut acc = BigRational::one();
    let mut b = base;

    while e > 0 {
        if (e & 1) == 1 {
            acc *= b.clone();
        }
        e >>= 1;
        if e > 0 {
            b *= b.clone();
        }
    }
    acc
}

/// √(p/q) exacte si p et q sont des carrés parfaits (r >= 0).
fn rational_sqrt_exact(r: &BigRational) -> Option<BigRational> {
    if r.is_negative() {
        return None;
    }
    let p = sqrt_entier_exact(r.numer())?;
    let q = sqrt_entier_exact(r.denom())?;
    Some(BigRational::new(p, q))
}

fn sqrt_entier_exact(n: &BigInt) -> Option<BigInt> {
    let s = n.sqrt();
    if &s * &s == *n {
        Some(s)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::erreurs::Genre;

    fn b(e: Expr) -> Box<Expr> {
        Box::new(e)
    }

    #[test]
    fn pliage_rationnel_exact() {
        // 0.1 + 0.2 = 3/10 exactement
        let e = Expr::Add(b(Expr::fraction(1, 10)), b(Expr::fraction(2, 10)));
        assert_eq!(e.simplifier().unwrap(), Expr::fraction(3, 10));
    }

    #[test]
    fn var_jamais_inventee() {
        let e = Expr::Add(b(Expr::Var), b(Expr::entier(1)));
        let s = e.simplifier().unwrap();
        assert!(s.contient_var());
        assert_eq!(s, Expr::Add(b(Expr::Var), b(Expr::entier(1))));
    }

    #[test]
    fn neutres_et_annulation() {
        let e = Expr::Mul(b(Expr::entier(1)), b(Expr::Var));
        assert_eq!(e.simplifier().unwrap(), Expr::Var);

        let e = Expr::Sub(b(Expr::Var), b(Expr::Var));
        assert_eq!(e.simplifier().unwrap(), Expr::entier(0));

        let e = Expr::Add(b(Expr::Var), b(Expr::entier(-3)));
        assert_eq!(
            e.simplifier().unwrap(),
            Expr::Sub(b(Expr::Var), b(Expr::entier(3)))
        );
    }

    #[test]
    fn division_par_zero_exacte() {
        let e = Expr::Div(
            b(Expr::entier(1)),
            b(Expr::Sub(b(Expr::entier(2)), b(Expr::entier(2)))),
        );
        assert_eq!(e.simplifier().unwrap_err().genre(), Genre::Domaine);

        // même avec x au numérateur
        let e = Expr::Div(b(Expr::Var), b(Expr::entier(0)));
        assert_eq!(e.simplifier().unwrap_err().genre(), Genre::Domaine);
    }

    #[test]
    fn puissances() {
        let e = Expr::Pow(b(Expr::fraction(2, 3)), b(Expr::entier(-2)));
        assert_eq!(e.simplifier().unwrap(), Expr::fraction(9, 4));

        let e = Expr::Pow(b(Expr::entier(0)), b(Expr::entier(-1)));
        assert_eq!(e.simplifier().unwrap_err().genre(), Genre::Domaine);

        // exposant non entier : reste symbolique (lecture flottante plus tard)
        let e = Expr::Pow(b(Expr::entier(2)), b(Expr::fraction(1, 2)));
        assert!(matches!(e.simplifier().unwrap(), Expr::Pow(_, _)));

        // exposant énorme : pas développé
        let e = Expr::Pow(b(Expr::entier(10)), b(Expr::entier(100_000)));
        assert!(matches!(e.simplifier().unwrap(), Expr::Pow(_, _)));
    }

    #[test]
    fn racines_exactes() {
        let e = Expr::App(Fonction::Sqrt, b(Expr::fraction(9, 4)));
        assert_eq!(e.simplifier().unwrap(), Expr::fraction(3, 2));

        let e = Expr::App(Fonction::Sqrt, b(Expr::entier(2)));
        assert!(matches!(e.simplifier().unwrap(), Expr::App(Fonction::Sqrt, _)));

        let e = Expr::App(Fonction::Sqrt, b(Expr::entier(-4)));
        assert_eq!(e.simplifier().unwrap_err().genre(), Genre::Domaine);
    }

    #[test]
    fn logarithme_hors_domaine() {
        let e = Expr::App(Fonction::Log10, b(Expr::entier(-1)));
        assert_eq!(e.simplifier().unwrap_err().genre(), Genre::Domaine);

        let e = Expr::App(Fonction::Ln, b(Expr::entier(0)));
        assert_eq!(e.simplifier().unwrap_err().genre(), Genre::Domaine);
    }
}
