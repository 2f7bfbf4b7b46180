//! src/noyau/erreurs.rs
//!
//! Erreurs typées du noyau (valeurs de retour, jamais levées).
//!
//! - `Display` : détail technique (pour le journal)
//! - `message_utilisateur()` : texte localisé affiché à l’écran

use thiserror::Error;

pub const MSG_SYNTAXE: &str = "Le format de l’expression est invalide.";
pub const MSG_DOMAINE: &str = "Erreur de calcul : vérifiez votre saisie.";
pub const MSG_INTERNE: &str = "Une erreur interne est survenue.";
pub const MSG_RENDU: &str = "Impossible de tracer le graphe.";

/// Genre d’erreur (utile pour les tests et le journal).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Genre {
    Syntaxe,
    Domaine,
    Interne,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    /// La chaîne ne se lit pas comme une expression (jeton inconnu, parenthèses…).
    #[error("syntaxe : {0}")]
    Syntaxe(String),

    /// Lecture correcte, mais opération numérique invalide (÷0, √ négative…).
    #[error("domaine : {0}")]
    Domaine(String),

    /// Tout le reste (garde-fous, conversions impossibles).
    #[error("interne : {0}")]
    Interne(String),
}

impl ErreurCalcul {
    pub fn syntaxe(msg: impl Into<String>) -> Self {
        ErreurCalcul::Syntaxe(msg.into())
    }

    pub fn domaine(msg: impl Into<String>) -> Self {
        ErreurCalcul::Domaine(msg.into())
    }

    pub fn interne(msg: impl Into<String>) -> Self {
        ErreurCalcul::Interne(msg.into())
    }

    pub fn genre(&self) -> Genre {
        match self {
            ErreurCalcul::Syntaxe(_) => Genre::Syntaxe,
            ErreurCalcul::Domaine(_) => Genre::Domaine,
            ErreurCalcul::Interne(_) => Genre::Interne,
        }
    }

    pub fn message_utilisateur(&self) -> &'static str {
        match self.genre() {
            Genre::Syntaxe => MSG_SYNTAXE,
            Genre::Domaine => MSG_DOMAINE,
            Genre::Interne => MSG_INTERNE,
        }
    }

    /// Une ligne de journal par erreur, avec l’entrée brute (avant normalisation).
    pub fn journaliser(&self, entree: &str) {
        match self {
            ErreurCalcul::Syntaxe(detail) => {
                tracing::warn!(entree, detail = %detail, "format d’expression invalide")
            }
            ErreurCalcul::Domaine(detail) => {
                tracing::warn!(entree, detail = %detail, "erreur de calcul")
            }
            ErreurCalcul::Interne(detail) => {
                tracing::error!(entree, detail = %detail, "erreur interne inconnue")
            }
        }
    }
}

/// Échec du tracé : jamais de courbe partielle.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurRendu {
    #[error("domaine de tracé invalide : [{min}, {max}]")]
    DomaineInvalide { min: f64, max: f64 },

    #[error("lecture de l’expression : {0}")]
    Lecture(#[from] ErreurCalcul),

    #[error("valeur non numérique en x = {x} ({valeur})")]
    Echantillon { x: f64, valeur: f64 },

    #[error("échelle y non représentable : [{min}, {max}]")]
    Echelle { min: f64, max: f64 },

    #[error("export PNG : {0}")]
    Export(String),
}

impl ErreurRendu {
    pub fn message_utilisateur(&self) -> &'static str {
        MSG_RENDU
    }

    pub fn journaliser(&self, entree: &str) {
        tracing::error!(entree, detail = %self, "échec du tracé du graphe");
    }
}
