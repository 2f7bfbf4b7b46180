// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name):
//    - si name est une fonction reconnue => fonction unaire (postfixée en RPN),
//      obligatoirement suivie de '('
//    - sinon => atome (x, pi, E ; tout autre nom est refusé dans from_rpn)
// - Signes unaires (quand on n’attend PAS une valeur) :
//    - '+' est ignoré
//    - '-' devient Neg, opérateur préfixe
// - Précédences : + - (1) < * / (2) < moins unaire (3) < ** (4, associatif à droite)
//   donc -x**2 = -(x**2) et 2**-1 = 2**(-1).

use super::erreurs::ErreurCalcul;
use super::expr::{Expr, NOM_VARIABLE};
use super::fonctions::Fonction;
use super::jetons::Tok;

/// Imbrication maximale de parenthèses (celles des fonctions comprises).
pub const PROFONDEUR_MAX: usize = 256;

/// Profondeur maximale de l’arbre construit. Les chaînes à plat (`1+1+…+1`)
/// penchent l’arbre sans rien imbriquer : la borne est donc bien plus large
/// que PROFONDEUR_MAX, hors de portée d’une saisie au clavier.
pub const PROFONDEUR_ARBRE_MAX: usize = 4096;

/// Élément de RPN : un jeton, ou le moins unaire (qui n’existe pas en entrée).
#[derive(Clone, Debug, PartialEq)]
pub enum Rpn {
    Tok(Tok),
    Neg,
}

/// Élément de la pile d’opérateurs.
#[derive(Clone, Debug, PartialEq)]
enum Op {
    Binaire(Tok),
    Neg,
    Fonction(Fonction),
    LPar,
}

fn precedence(op: &Op) -> i32 {
    match op {
        Op::Binaire(Tok::Plus | Tok::Minus) => 1,
        Op::Binaire(Tok::Star | Tok::Slash) => 2,
        Op::Neg => 3,
        Op::Binaire(Tok::Puissance) => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Puissance)
}

fn vers_rpn(op: Op) -> Rpn {
    match op {
        Op::Binaire(t) => Rpn::Tok(t),
        Op::Neg => Rpn::Neg,
        Op::Fonction(f) => Rpn::Tok(Tok::Ident(f.nom().to_string())),
        // jamais poussé en sortie (filtré par les appelants)
        Op::LPar => Rpn::Tok(Tok::LPar),
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Ident("pi"), Slash, Num(2), RPar]
///   rpn:    [pi, 2, /, sin]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Rpn>, ErreurCalcul> {
    if tokens.is_empty() {
        return Err(ErreurCalcul::syntaxe("expression vide"));
    }

    let mut out: Vec<Rpn> = Vec::new();
    let mut ops: Vec<Op> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter les signes unaires et les opérateurs orphelins.
    let mut prev_was_value = false;

    // Une fonction doit être immédiatement suivie de '('.
    let mut attend_lpar: Option<Fonction> = None;

    // Parenthèses ouvertes non refermées.
    let mut imbrication = 0usize;

    for tok in tokens.iter().cloned() {
        if let Some(f) = attend_lpar.take() {
            if tok != Tok::LPar {
                return Err(ErreurCalcul::syntaxe(format!(
                    "fonction {f} sans parenthèse"
                )));
            }
        }

        match tok {
            Tok::Num(_) => {
                if prev_was_value {
                    return Err(ErreurCalcul::syntaxe("deux valeurs sans opérateur"));
                }
                out.push(Rpn::Tok(tok));
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if prev_was_value {
                    return Err(ErreurCalcul::syntaxe(format!(
                        "'{name}' suit une valeur sans opérateur"
                    )));
                }
                if let Some(f) = Fonction::depuis_nom(&name) {
                    // fonction : on la garde sur la pile (elle sortira après son argument)
                    ops.push(Op::Fonction(f));
                    attend_lpar = Some(f);
                    prev_was_value = false;
                } else {
                    // atome : sortie directe (validé dans from_rpn)
                    out.push(Rpn::Tok(Tok::Ident(name)));
                    prev_was_value = true;
                }
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(ErreurCalcul::syntaxe("'(' suit une valeur sans opérateur"));
                }
                imbrication += 1;
                if imbrication > PROFONDEUR_MAX {
                    return Err(ErreurCalcul::interne(format!(
                        "imbrication trop profonde (> {PROFONDEUR_MAX})"
                    )));
                }
                ops.push(Op::LPar);
                prev_was_value = false;
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(ErreurCalcul::syntaxe("')' inattendue"));
                }

                // dépile jusqu’à '('
                let mut fermee = false;
                while let Some(top) = ops.pop() {
                    if top == Op::LPar {
                        fermee = true;
                        break;
                    }
                    out.push(vers_rpn(top));
                }
                if !fermee {
                    return Err(ErreurCalcul::syntaxe("parenthèse fermante sans ouvrante"));
                }
                imbrication -= 1;

                // si une fonction est au sommet, on la sort aussi
                if matches!(ops.last(), Some(Op::Fonction(_))) {
                    if let Some(f) = ops.pop() {
                        out.push(vers_rpn(f));
                    }
                }

                prev_was_value = true;
            }

            Tok::Plus | Tok::Minus if !prev_was_value => {
                if tok == Tok::Minus {
                    // préfixe : ne dépile rien
                    ops.push(Op::Neg);
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Puissance => {
                if !prev_was_value {
                    return Err(ErreurCalcul::syntaxe("opérateur sans opérande gauche"));
                }

                let courant = Op::Binaire(tok.clone());

                // dépile tant que:
                // - on n'est pas bloqué par '(' ou une fonction (collée à son argument)
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Op::LPar | Op::Fonction(_)) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&courant);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(vers_rpn(op));
                    }
                }

                ops.push(courant);
                prev_was_value = false;
            }
        }
    }

    if let Some(f) = attend_lpar {
        return Err(ErreurCalcul::syntaxe(format!("fonction {f} sans argument")));
    }
    if !prev_was_value {
        return Err(ErreurCalcul::syntaxe("expression incomplète"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if op == Op::LPar {
            return Err(ErreurCalcul::syntaxe("parenthèses non fermées"));
        }
        out.push(vers_rpn(op));
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
///
/// - Ident(name):
///     - fonction reconnue => application unaire
///     - x / pi / E => atome
///     - sinon => erreur de syntaxe (seul x est une variable libre)
pub fn from_rpn(rpn: &[Rpn]) -> Result<Expr, ErreurCalcul> {
    // (sous-arbre, profondeur)
    let mut st: Vec<(Expr, usize)> = Vec::new();

    fn depiler(st: &mut Vec<(Expr, usize)>) -> Result<(Expr, usize), ErreurCalcul> {
        st.pop()
            .ok_or_else(|| ErreurCalcul::syntaxe("opérande manquant"))
    }

    for item in rpn.iter().cloned() {
        let (e, prof) = match item {
            Rpn::Tok(Tok::Num(r)) => (Expr::Rat(r), 1),

            Rpn::Neg => {
                let (a, pa) = depiler(&mut st)?;
                (Expr::Neg(Box::new(a)), pa + 1)
            }

            Rpn::Tok(
                tok @ (Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Puissance),
            ) => {
                let (b, pb) = depiler(&mut st)?;
                let (a, pa) = depiler(&mut st)?;
                let (a, b) = (Box::new(a), Box::new(b));

                let e = match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    _ => Expr::Pow(a, b),
                };
                (e, pa.max(pb) + 1)
            }

            Rpn::Tok(Tok::Ident(name)) => {
                if let Some(f) = Fonction::depuis_nom(&name) {
                    let (x, px) = depiler(&mut st)
                        .map_err(|_| ErreurCalcul::syntaxe(format!("{f} sans argument")))?;
                    (Expr::App(f, Box::new(x)), px + 1)
                } else {
                    let atome = match name.as_str() {
                        NOM_VARIABLE => Expr::Var,
                        "pi" => Expr::Pi,
                        "E" => Expr::E,
                        _ => {
                            return Err(ErreurCalcul::syntaxe(format!(
                                "symbole inconnu: '{name}'"
                            )))
                        }
                    };
                    (atome, 1)
                }
            }

            Rpn::Tok(Tok::LPar | Tok::RPar) => {
                return Err(ErreurCalcul::interne("parenthèse inattendue en RPN"))
            }
        };

        if prof > PROFONDEUR_ARBRE_MAX {
            return Err(ErreurCalcul::interne(format!(
                "expression trop profonde (> {PROFONDEUR_ARBRE_MAX})"
            )));
        }
        st.push((e, prof));
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        (None, _) => Err(ErreurCalcul::syntaxe("expression vide")),
        (Some(_), false) => Err(ErreurCalcul::syntaxe("valeurs sans opérateur")),
    }
}

/// Format utilitaire (journal debug) : RPN en texte.
pub fn format_rpn(rpn: &[Rpn]) -> String {
    rpn.iter()
        .map(|r| match r {
            Rpn::Tok(t) => super::jetons::format_tokens(std::slice::from_ref(t)),
            Rpn::Neg => "neg".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
