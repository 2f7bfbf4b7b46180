//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir la session de la calculatrice (expression, résultat, domaine, courbe)
//! et offrir les opérations de saisie (ajout, DEL, C) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de normalisation, pas de parsing).
//! - Actions déterministes, sans effet de bord caché.
//! - Le domaine de tracé respecte toujours min < max.

use crate::noyau::{Courbe, Domaine, ErreurCalcul, Resultat};
use crate::reglages::BORNES_CURSEUR;

/// Dernier tracé connu.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum EtatTrace {
    /// Rien à tracer (pas de x, pas d’évaluation réussie, ou saisie modifiée).
    #[default]
    Aucun,
    Courbe(Courbe),
    /// Message utilisateur (ErreurRendu::message_utilisateur).
    Erreur(&'static str),
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub expression: String,

    // --- sorties ---
    /// Issue de la dernière évaluation terminée (None : rien évalué depuis C).
    pub resultat: Option<Result<Resultat, ErreurCalcul>>,
    /// Expression (brute) de la dernière évaluation réussie.
    pub evaluee: Option<String>,
    /// L’arbre lu lors de cette évaluation contient x (lu une fois, au "=").
    pub evaluee_avec_x: bool,

    // --- tracé ---
    pub domaine: Domaine,
    pub trace: EtatTrace,
    /// Clé du tracé courant : on ne rééchantillonne que si elle change.
    pub cle_trace: Option<(String, Domaine)>,

    // --- export ---
    /// Bandeau “graphe enregistré” / échec d’export.
    pub note_export: Option<String>,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            expression: String::new(),
            resultat: None,
            evaluee: None,
            evaluee_avec_x: false,
            domaine: Domaine::default(),
            trace: EtatTrace::Aucun,
            cle_trace: None,
            note_export: None,
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// Ajoute le texte d’une touche. π et e s’écrivent `pi` et `E`.
    pub fn ajouter(&mut self, valeur: &str) {
        match valeur {
            "π" => self.expression.push_str("pi"),
            "e" => self.expression.push('E'),
            v => self.expression.push_str(v),
        }
    }

    /// DEL : retire le dernier caractère (sans effet sur une expression vide).
    pub fn effacer_dernier(&mut self) {
        self.expression.pop();
    }

    /// C : remise à zéro de la session (le domaine choisi est conservé).
    pub fn tout_effacer(&mut self) {
        self.expression.clear();
        self.resultat = None;
        self.evaluee = None;
        self.evaluee_avec_x = false;
        self.trace = EtatTrace::Aucun;
        self.cle_trace = None;
        self.note_export = None;
    }

    /// Curseurs : bornes ramenées dans BORNES_CURSEUR ; un couple min >= max est ignoré.
    pub fn set_domaine(&mut self, min: f64, max: f64) {
        let (bas, haut) = BORNES_CURSEUR;
        if let Ok(d) = Domaine::new(min.clamp(bas, haut), max.clamp(bas, haut)) {
            self.domaine = d;
        }
    }

    /// Texte de la zone résultat (vide tant que rien n’est évalué).
    pub fn texte_resultat(&self) -> String {
        match &self.resultat {
            None => String::new(),
            Some(Ok(r)) => r.to_string(),
            Some(Err(e)) => e.message_utilisateur().to_string(),
        }
    }

    pub fn resultat_en_erreur(&self) -> bool {
        matches!(self.resultat, Some(Err(_)))
    }
}
