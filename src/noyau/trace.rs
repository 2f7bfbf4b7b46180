// src/noyau/trace.rs
//
// Tracé : chaîne normalisée + domaine -> courbe échantillonnée
// ------------------------------------------------------------
// - Relecture indépendante de l’évaluation (analyser, sans simplifier)
// - Compilation en mode degrés (sin/cos/tan en entrée, asin/acos/atan en sortie)
// - N_ECHANTILLONS points sur [min, max], bornes incluses
// - Tout ou rien : un seul échantillon non fini => ErreurRendu

use super::compile::compiler;
use super::erreurs::ErreurRendu;
use super::eval::analyser;
use super::fonctions::ModeAngle;
use crate::reglages::{DOMAINE_DEFAUT, N_ECHANTILLONS};

/// Intervalle [min, max] du tracé. Toujours fini (largeur comprise), toujours min < max.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domaine {
    min: f64,
    max: f64,
}

impl Domaine {
    pub fn new(min: f64, max: f64) -> Result<Self, ErreurRendu> {
        if !min.is_finite() || !max.is_finite() || min >= max || !(max - min).is_finite() {
            return Err(ErreurRendu::DomaineInvalide { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl Default for Domaine {
    fn default() -> Self {
        Self {
            min: DOMAINE_DEFAUT.0,
            max: DOMAINE_DEFAUT.1,
        }
    }
}

/// Courbe complète, prête à dessiner.
#[derive(Clone, Debug, PartialEq)]
pub struct Courbe {
    pub points: Vec<(f64, f64)>,
    /// Expression telle que lue (ex: "sin(x)").
    pub legende: String,
}

impl Courbe {
    pub fn bornes_x(&self) -> (f64, f64) {
        bornes(self.points.iter().map(|p| p.0))
    }

    /// Bornes y avec une marge de 5 % ; une courbe constante est élargie de ±1.
    pub fn bornes_y(&self) -> (f64, f64) {
        let (a, b) = bornes(self.points.iter().map(|p| p.1));
        let marge = (b - a) * 0.05;
        if marge > 0.0 {
            (a - marge, b + marge)
        } else {
            (a - 1.0, b + 1.0)
        }
    }
}

fn bornes(valeurs: impl Iterator<Item = f64>) -> (f64, f64) {
    let (a, b) = valeurs.fold((f64::INFINITY, f64::NEG_INFINITY), |(a, b), v| {
        (a.min(v), b.max(v))
    });
    if a.is_finite() && b.is_finite() {
        (a, b)
    } else {
        (0.0, 0.0)
    }
}

/// Au plus ce nombre de traits par axe.
const GRADUATIONS_MAX: usize = 100;

/// Au-delà, k + 1 n’est plus distinct de k en f64.
const INDICE_GRADUATION_MAX: f64 = (1u64 << 52) as f64;

/// Graduations “rondes” (pas 1, 2 ou 5 × 10^k) couvrant [a, b], environ 10 traits.
/// Vide quand l’axe ne se gradue pas (intervalle trop étroit devant sa valeur, ou non fini).
pub fn graduations(a: f64, b: f64) -> Vec<f64> {
    if !a.is_finite() || !b.is_finite() || a >= b {
        return Vec::new();
    }

    let brut = (b - a) / 10.0;
    if !brut.is_finite() || brut <= 0.0 {
        return Vec::new();
    }
    let puissance = 10f64.powf(brut.log10().floor());
    let pas = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * puissance)
        .find(|p| *p >= brut)
        .unwrap_or(10.0 * puissance);
    if !pas.is_finite() || pas <= 0.0 {
        return Vec::new();
    }

    let premier = (a / pas).ceil();
    let dernier = (b / pas).floor();
    if !premier.is_finite()
        || !dernier.is_finite()
        || premier.abs().max(dernier.abs()) > INDICE_GRADUATION_MAX
    {
        return Vec::new();
    }

    let n = dernier - premier;
    if n < 0.0 || n >= GRADUATIONS_MAX as f64 {
        return Vec::new();
    }

    (0..=n as usize).map(|i| (premier + i as f64) * pas).collect()
}

/// API publique : échantillonne la courbe sur le domaine.
pub fn tracer(normalise: &str, domaine: Domaine) -> Result<Courbe, ErreurRendu> {
    tracer_avec(normalise, domaine, N_ECHANTILLONS)
}

pub(crate) fn tracer_avec(
    normalise: &str,
    domaine: Domaine,
    n: usize,
) -> Result<Courbe, ErreurRendu> {
    let expr = analyser(normalise)?;
    let f = compiler(&expr, ModeAngle::Degres)?;

    let n = n.max(2);
    let pas = (domaine.max - domaine.min) / (n - 1) as f64;

    let mut points = Vec::with_capacity(n);
    for i in 0..n {
        let x = if i == n - 1 {
            domaine.max
        } else {
            domaine.min + pas * i as f64
        };
        let y = f.appeler(x);
        if !y.is_finite() {
            return Err(ErreurRendu::Echantillon { x, valeur: y });
        }
        points.push((x, y));
    }

    let courbe = Courbe {
        points,
        legende: expr.to_string(),
    };

    // Marges comprises, l’échelle y doit rester représentable.
    let (y0, y1) = courbe.bornes_y();
    if !(y1 - y0).is_finite() {
        let (min, max) = bornes(courbe.points.iter().map(|p| p.1));
        return Err(ErreurRendu::Echelle { min, max });
    }

    tracing::debug!(
        expression = normalise,
        min = domaine.min,
        max = domaine.max,
        n,
        "courbe échantillonnée"
    );

    Ok(courbe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::erreurs::{ErreurCalcul, Genre};
    use approx::assert_abs_diff_eq;

    fn y_en(c: &Courbe, x: f64) -> f64 {
        c.points
            .iter()
            .find(|p| (p.0 - x).abs() < 1e-9)
            .unwrap_or_else(|| panic!("pas d’échantillon en x = {x}"))
            .1
    }

    #[test]
    fn domaine_valide() {
        assert!(Domaine::new(-1.0, 1.0).is_ok());
        assert!(Domaine::new(1.0, 1.0).is_err());
        assert!(Domaine::new(2.0, 1.0).is_err());
        assert!(Domaine::new(f64::NAN, 1.0).is_err());
        assert!(Domaine::new(0.0, f64::INFINITY).is_err());

        let d = Domaine::default();
        assert_eq!((d.min(), d.max()), DOMAINE_DEFAUT);
    }

    #[test]
    fn sin_en_degres() {
        let d = Domaine::new(0.0, 180.0).unwrap();
        // 181 points : pas de 1°
        let c = tracer_avec("sin(x)", d, 181).unwrap();
        assert_abs_diff_eq!(y_en(&c, 90.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y_en(&c, 30.0), 0.5, epsilon = 1e-12);
        assert_eq!(c.legende, "sin(x)");
    }

    #[test]
    fn asin_rend_des_degres() {
        let d = Domaine::new(-1.0, 1.0).unwrap();
        let c = tracer_avec("asin(x)", d, 3).unwrap();
        assert_abs_diff_eq!(y_en(&c, 1.0), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(y_en(&c, -1.0), -90.0, epsilon = 1e-9);
    }

    #[test]
    fn quatre_cents_points_bornes_incluses() {
        let c = tracer("x^2", Domaine::default()).unwrap();
        assert_eq!(c.points.len(), N_ECHANTILLONS);
        assert_eq!(c.points[0].0, -10.0);
        assert_eq!(c.points[N_ECHANTILLONS - 1].0, 10.0);
        assert!(c.points.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn inverse_sans_zero_echantillonne() {
        // 400 points sur [-10, 10] : x = 0 n’est pas un échantillon
        let c = tracer("1/x", Domaine::default()).unwrap();
        assert_eq!(c.points.len(), N_ECHANTILLONS);
    }

    #[test]
    fn jamais_de_courbe_partielle() {
        let e = tracer("sqrt(x)", Domaine::default()).unwrap_err();
        assert!(matches!(e, ErreurRendu::Echantillon { x, .. } if x == -10.0));

        let d = Domaine::new(-1.0, 1.0).unwrap();
        assert!(tracer_avec("1/x", d, 3).is_err());
    }

    #[test]
    fn lecture_impossible() {
        match tracer("2+*x", Domaine::default()) {
            Err(ErreurRendu::Lecture(e)) => assert_eq!(e.genre(), Genre::Syntaxe),
            autre => panic!("erreur de lecture attendue, obtenu {autre:?}"),
        }
        assert_eq!(
            tracer("", Domaine::default()),
            Err(ErreurRendu::Lecture(ErreurCalcul::syntaxe("expression vide")))
        );
    }

    #[test]
    fn bornes_et_graduations() {
        let c = Courbe {
            points: vec![(0.0, 3.0), (1.0, 3.0)],
            legende: "3".into(),
        };
        assert_eq!(c.bornes_x(), (0.0, 1.0));
        assert_eq!(c.bornes_y(), (2.0, 4.0));

        assert_eq!(graduations(-10.0, 10.0), vec![
            -10.0, -8.0, -6.0, -4.0, -2.0, 0.0, 2.0, 4.0, 6.0, 8.0, 10.0
        ]);
        assert!(graduations(1.0, 1.0).is_empty());
    }

    #[test]
    fn graduations_grandes_valeurs_terminent() {
        // pas de 0.2 autour de 3e15 : indices au-delà de 2^52, axe non gradué
        assert!(graduations(3e15 - 1.0, 3e15 + 1.0).is_empty());
        assert!(graduations(-f64::MAX, f64::MAX).is_empty());
        assert!(graduations(0.0, f64::MIN_POSITIVE).len() <= GRADUATIONS_MAX);

        // grande valeur, mais pas encore représentable : traits normaux
        let g = graduations(1e12, 1e12 + 10.0);
        assert_eq!(g.len(), 11);
        assert_eq!(g[0], 1e12);
        assert_eq!(g[10], 1e12 + 10.0);
    }

    #[test]
    fn courbe_quasi_constante_de_grande_valeur() {
        let c = tracer("3000000000000000+x-x", Domaine::default()).unwrap();
        let (y0, y1) = c.bornes_y();
        assert!(y0 <= 3e15 && 3e15 <= y1 && y0 < y1);
        assert!(graduations(y0, y1).len() <= GRADUATIONS_MAX);
        let (x0, x1) = c.bornes_x();
        assert_eq!(graduations(x0, x1).len(), 11);
    }

    #[test]
    fn echelle_y_non_representable() {
        // y de -1e308 à 1e308 : la largeur déborde f64
        match tracer("10^307*x", Domaine::default()) {
            Err(ErreurRendu::Echelle { min, max }) => {
                assert!(min < -1e307 && max > 1e307);
            }
            autre => panic!("erreur d’échelle attendue, obtenu {autre:?}"),
        }
        assert!(Domaine::new(-f64::MAX, f64::MAX).is_err());
    }
}
