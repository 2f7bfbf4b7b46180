// src/noyau/normalisation.rs
//
// Normalisation de la saisie (réécriture de texte, sans lecture)
// --------------------------------------------------------------
// Passes, dans cet ordre (chacune voit la sortie de la précédente) :
//   1) chiffre·lettre     : 2x      -> 2*x
//   2) chiffre·(          : 3(4+1)  -> 3*(4+1)
//   3) )·lettre           : (x+1)y  -> (x+1)*y
//   4) fonction·chiffres  : sin30   -> sin(30)   (pas si précédé d’un \w)
//
// Puis `preparer` : ^ -> **  et  log -> log10 (toujours, partout).
//
// Le crate regex n’a pas de look-behind : la passe 4 capture le caractère
// précédent (ou le début du texte) et le réémet tel quel.

use std::sync::OnceLock;

use regex::Regex;

/// Fonctions dont l’argument numérique “nu” est entouré de parenthèses.
pub const FONCTIONS_ARGUMENT_NU: [&str; 9] = [
    "sin", "cos", "tan", "log", "sqrt", "exp", "sinh", "cosh", "tanh",
];

struct Passes {
    chiffre_lettre: Regex,
    chiffre_parenthese: Regex,
    parenthese_lettre: Regex,
    fonction_chiffres: Regex,
}

fn passes() -> &'static Passes {
    static PASSES: OnceLock<Passes> = OnceLock::new();
    PASSES.get_or_init(|| {
        let noms = FONCTIONS_ARGUMENT_NU.join("|");
        Passes {
            chiffre_lettre: motif(r"(\d)([a-zA-Z])"),
            chiffre_parenthese: motif(r"(\d)\("),
            parenthese_lettre: motif(r"\)([a-zA-Z])"),
            fonction_chiffres: motif(&format!(r"(^|[^\w])({noms})(\d+)")),
        }
    })
}

fn motif(src: &str) -> Regex {
    // Motifs constants : un échec ici est un bug de ce fichier (couvert par les tests).
    Regex::new(src).unwrap_or_else(|e| panic!("motif de normalisation invalide {src:?}: {e}"))
}

/// Réécrit la saisie brute en syntaxe lisible par le noyau.
/// Totale : ne rate jamais (la sortie peut rester illisible en aval).
pub fn normaliser(brut: &str) -> String {
    let p = passes();

    let s = p.chiffre_lettre.replace_all(brut, "${1}*${2}");
    let s = p.chiffre_parenthese.replace_all(&s, "${1}*(");
    let s = p.parenthese_lettre.replace_all(&s, ")*${1}");
    let s = p.fonction_chiffres.replace_all(&s, "${1}${2}(${3})");

    s.into_owned()
}

/// Substitutions appliquées juste avant la lecture :
/// - `^` (bouton puissance) devient `**`
/// - `log` devient `log10` (logarithme décimal, pas népérien)
pub fn preparer(normalise: &str) -> String {
    normalise.replace('^', "**").replace("log", "log10")
}
