// src/noyau/compile.rs
//
// Compilation Expr -> fermeture f64 -> f64
// ----------------------------------------
// Sert aux deux usages numériques :
// - évaluation (ModeAngle::Radians, appel unique en x = 0)
// - tracé     (ModeAngle::Degres, 400 appels)
//
// Les feuilles rationnelles sont converties une seule fois, ici.
// Aucune vérification de domaine : NaN/±inf remontent tels quels, l’appelant trie.

use num_rational::BigRational;
use num_traits::ToPrimitive;

use super::erreurs::ErreurCalcul;
use super::expr::{avec_pile, Expr};
use super::fonctions::ModeAngle;

type Fermeture = Box<dyn Fn(f64) -> f64>;

/// Fonction numérique d’une variable, prête à être appelée.
pub struct FonctionCompilee {
    f: Fermeture,
    mode: ModeAngle,
}

impl FonctionCompilee {
    pub fn appeler(&self, x: f64) -> f64 {
        (self.f)(x)
    }
}

impl std::fmt::Debug for FonctionCompilee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FonctionCompilee")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

/// Compile l’arbre. La profondeur est déjà bornée par `from_rpn`.
pub fn compiler(e: &Expr, mode: ModeAngle) -> Result<FonctionCompilee, ErreurCalcul> {
    Ok(FonctionCompilee {
        f: fermeture(e, mode)?,
        mode,
    })
}

fn fermeture(e: &Expr, mode: ModeAngle) -> Result<Fermeture, ErreurCalcul> {
    avec_pile(|| fermeture_locale(e, mode))
}

fn fermeture_locale(e: &Expr, mode: ModeAngle) -> Result<Fermeture, ErreurCalcul> {
    use Expr::*;

    let f: Fermeture = match e {
        Rat(r) => {
            let v = vers_f64(r)?;
            Box::new(move |_: f64| v)
        }
        Pi => Box::new(|_: f64| std::f64::consts::PI),
        E => Box::new(|_: f64| std::f64::consts::E),
        Var => Box::new(|x: f64| x),

        Neg(a) => {
            let a = fermeture(a, mode)?;
            Box::new(move |x: f64| -a(x))
        }

        Add(a, b) => {
            let (a, b) = (fermeture(a, mode)?, fermeture(b, mode)?);
            Box::new(move |x: f64| a(x) + b(x))
        }
        Sub(a, b) => {
            let (a, b) = (fermeture(a, mode)?, fermeture(b, mode)?);
            Box::new(move |x: f64| a(x) - b(x))
        }
        Mul(a, b) => {
            let (a, b) = (fermeture(a, mode)?, fermeture(b, mode)?);
            Box::new(move |x: f64| a(x) * b(x))
        }
        Div(a, b) => {
            let (a, b) = (fermeture(a, mode)?, fermeture(b, mode)?);
            Box::new(move |x: f64| a(x) / b(x))
        }
        Pow(a, b) => {
            let (a, b) = (fermeture(a, mode)?, fermeture(b, mode)?);
            Box::new(move |x: f64| a(x).powf(b(x)))
        }

        App(fonction, a) => {
            let fonction = *fonction;
            let a = fermeture(a, mode)?;
            Box::new(move |x: f64| fonction.appliquer(a(x), mode))
        }
    };

    Ok(f)
}

fn vers_f64(r: &BigRational) -> Result<f64, ErreurCalcul> {
    r.to_f64()
        .ok_or_else(|| ErreurCalcul::interne(format!("rationnel non convertible en f64: {r}")))
}
