// src/noyau/jetons.rs

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use super::erreurs::ErreurCalcul;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(BigRational),

    // Identifiants : x, pi, E, noms de fonctions, ou inconnus.
    // NOTE: le parse (RPN->Expr) décide du sens ; un inconnu y devient une erreur de syntaxe.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Puissance, // ** (ou ^ si la chaîne n’est pas passée par preparer)

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - décimaux exacts (ex: 12, 3.5, .5, 5.) -> Num(rationnel)
/// - opérateurs + - * / ** ^
/// - parenthèses ( )
/// - π (équivaut à ident("pi"))
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (sensibles à la casse : E ≠ e)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurCalcul> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Parenthèses
        if c == '(' {
            out.push(Tok::LPar);
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Tok::RPar);
            i += 1;
            continue;
        }

        // Opérateurs ("**" avant "*")
        match c {
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' => {
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    out.push(Tok::Puissance);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Tok::Puissance);
                i += 1;
                continue;
            }
            _ => {}
        }

        if c == 'π' {
            out.push(Tok::Ident("pi".to_string()));
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            out.push(Tok::Ident(chars[start..i].iter().collect()));
            continue;
        }

        // Décimal : chiffres [ . chiffres ]  ou  . chiffres
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let entier: String = chars[start..i].iter().collect();

            let mut frac = String::new();
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                let start_f = i;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
                frac = chars[start_f..i].iter().collect();

                // "1.2.3"
                if i < chars.len() && chars[i] == '.' {
                    return Err(ErreurCalcul::syntaxe("nombre avec plusieurs points"));
                }
            }

            if entier.is_empty() && frac.is_empty() {
                return Err(ErreurCalcul::syntaxe("point isolé"));
            }

            out.push(Tok::Num(decimal_exact(&entier, &frac)?));
            continue;
        }

        return Err(ErreurCalcul::syntaxe(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

/// "12" + "34" -> 1234/100 (réduit). Aucune perte : pas de flottant ici.
fn decimal_exact(entier: &str, frac: &str) -> Result<BigRational, ErreurCalcul> {
    let chiffres = format!("{entier}{frac}");
    let n = BigInt::parse_bytes(chiffres.as_bytes(), 10)
        .ok_or_else(|| ErreurCalcul::syntaxe(format!("nombre invalide: {entier}.{frac}")))?;

    let mut d = BigInt::one();
    for _ in 0..frac.len() {
        d *= 10;
    }

    if d.is_zero() {
        return Err(ErreurCalcul::interne("dénominateur décimal nul"));
    }
    Ok(BigRational::new(n, d))
}

/// Format utilitaire (journal debug) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    fn format_rat(r: &BigRational) -> String {
        let n = r.numer();
        let d = r.denom();
        if d.is_one() {
            format!("{n}")
        } else {
            format!("{n}/{d}")
        }
    }

    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(r) => format_rat(r),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Puissance => "**".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
