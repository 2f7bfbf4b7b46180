//! Tests fuzz safe : robustesse + déterminisme + classement des erreurs.
//!
//! But : marteler normaliser -> evaluer -> tracer avec des saisies “boutons”.
//! - RNG déterministe (seed fixe)
//! - longueur bornée
//! - budget temps global
//! - invariant clé : jamais de panique, toute issue est Ok ou une erreur classée

use std::time::{Duration, Instant};

use super::erreurs::{ErreurRendu, Genre};
use super::eval::{evaluer, Resultat};
use super::normalisation::normaliser;
use super::rpn::PROFONDEUR_MAX;
use super::trace::{tracer, Domaine};
use crate::reglages::N_ECHANTILLONS;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Saisies “boutons” ------------------------ */

// Ce que les boutons insèrent (π et e déjà traduits en pi / E).
const TOUCHES: [&str; 34] = [
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", "x", "+", "-", "*", "/", "(", ")",
    "^", "sin", "cos", "tan", "log", "asin", "acos", "atan", "sqrt", "sinh", "cosh", "tanh",
    "exp", "pi", "E", "x",
];

fn gen_saisie(rng: &mut Rng, longueur_max: u32) -> String {
    let n = 1 + rng.pick(longueur_max);
    (0..n)
        .map(|_| TOUCHES[rng.pick(TOUCHES.len() as u32) as usize])
        .collect()
}

/// Saisie “raisonnable” : petits polynômes/fonctions en x, bien parenthésés.
fn gen_bien_formee(rng: &mut Rng, profondeur: usize) -> String {
    let atome = |rng: &mut Rng| match rng.pick(4) {
        0 => "x".to_string(),
        1 => format!("{}", 1 + rng.pick(9)),
        2 => "pi".to_string(),
        _ => format!("{}x", 1 + rng.pick(5)),
    };

    if profondeur == 0 {
        return atome(rng);
    }

    let a = gen_bien_formee(rng, profondeur - 1);
    let b = gen_bien_formee(rng, profondeur - 1);
    match rng.pick(7) {
        0 => format!("({a}+{b})"),
        1 => format!("({a}-{b})"),
        2 => format!("({a}*{b})"),
        3 => format!("({a})^2"),
        4 => format!("sin({a})"),
        5 => format!("cos{}", 1 + rng.pick(90)),
        _ => atome(rng),
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_saisies_boutons_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut vus = [0usize; 4]; // ok, syntaxe, domaine, interne

    for _ in 0..600 {
        budget(t0, max);

        let brut = gen_saisie(&mut rng, 12);
        let normalise = normaliser(&brut);

        match evaluer(&normalise) {
            Ok(Resultat::Valeur(v)) => {
                assert!(v.is_finite(), "valeur non finie: {brut:?} -> {v}");
                vus[0] += 1;
            }
            Ok(Resultat::Symbolique(e)) => {
                assert!(e.contient_var(), "symbolique sans x: {brut:?}");
                vus[0] += 1;
            }
            Err(e) => match e.genre() {
                Genre::Syntaxe => vus[1] += 1,
                Genre::Domaine => vus[2] += 1,
                Genre::Interne => vus[3] += 1,
            },
        }
    }

    // Des saisies aléatoires : surtout des erreurs de syntaxe, mais pas seulement.
    assert!(vus[1] > 0, "aucune erreur de syntaxe: {vus:?}");
    assert!(vus[0] > 0, "aucun succès: {vus:?}");
    // Longueur bornée : la garde de profondeur ne doit jamais se déclencher.
    assert_eq!(vus[3], 0, "erreur interne inattendue: {vus:?}");
}

#[test]
fn fuzz_safe_determinisme() {
    let mut a = Rng::new(0xBADC0DE_u64);
    let mut b = Rng::new(0xBADC0DE_u64);

    for _ in 0..200 {
        let sa = normaliser(&gen_saisie(&mut a, 10));
        let sb = normaliser(&gen_saisie(&mut b, 10));
        assert_eq!(sa, sb);
        assert_eq!(evaluer(&sa), evaluer(&sb), "saisie {sa:?}");
    }
}

#[test]
fn fuzz_safe_trace_tout_ou_rien() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0x5EED_u64);
    let domaine = Domaine::default();

    let mut courbes = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let normalise = normaliser(&gen_bien_formee(&mut rng, 3));

        match tracer(&normalise, domaine) {
            Ok(c) => {
                assert_eq!(c.points.len(), N_ECHANTILLONS, "saisie {normalise:?}");
                assert!(
                    c.points.iter().all(|p| p.0.is_finite() && p.1.is_finite()),
                    "point non fini: {normalise:?}"
                );
                courbes += 1;
            }
            // Bien formées : seules des valeurs hors de portée des f64 peuvent échouer.
            Err(ErreurRendu::Echantillon { .. } | ErreurRendu::Echelle { .. }) => {}
            Err(e) => panic!("erreur inattendue pour {normalise:?}: {e}"),
        }
    }

    assert!(courbes > 50, "trop peu de courbes: {courbes}");
}

#[test]
fn fuzz_safe_imbrication_profonde_refusee() {
    let t0 = Instant::now();

    for n in [10usize, 100, PROFONDEUR_MAX, PROFONDEUR_MAX + 1, 300, 2000] {
        let s = format!("{}x{}", "(-".repeat(n), ")".repeat(n));
        let r = evaluer(&s);
        if n <= PROFONDEUR_MAX {
            assert!(r.is_ok(), "n={n}: {r:?}");
        } else {
            assert_eq!(r.unwrap_err().genre(), Genre::Interne, "n={n}");
        }
    }

    budget(t0, Duration::from_secs(2));
}
