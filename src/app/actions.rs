//! src/app/actions.rs
//!
//! Actions de session : relient l’état (etat.rs) au noyau.
//!
//! - touche()           : un libellé de bouton -> une action
//! - evaluer()          : normaliser + évaluer, journaliser, déposer le résultat
//! - rafraichir_trace() : rééchantillonner seulement si (expression, domaine) change
//! - exporter()         : PNG de la courbe courante (natif)

use crate::noyau::eval::analyser;
use crate::noyau::{evaluer, normaliser, tracer};

use super::etat::{AppCalc, EtatTrace};

impl AppCalc {
    /// Dispatch d’un bouton, libellé tel qu’affiché.
    pub fn touche(&mut self, libelle: &str) {
        match libelle {
            "C" => self.tout_effacer(),
            "DEL" => self.effacer_dernier(),
            "=" => self.evaluer(),
            autre => self.ajouter(autre),
        }
    }

    /// "=" : sans effet sur une expression vide.
    pub fn evaluer(&mut self) {
        if self.expression.is_empty() {
            return;
        }

        let normalise = normaliser(&self.expression);
        let r = evaluer(&normalise);

        match &r {
            Ok(v) => {
                tracing::info!(
                    entree = %self.expression,
                    normalise = %normalise,
                    resultat = %v,
                    "expression évaluée"
                );
                self.evaluee = Some(self.expression.clone());
                self.evaluee_avec_x = analyser(&normalise)
                    .map(|e| e.contient_var())
                    .unwrap_or(false);
            }
            Err(e) => {
                e.journaliser(&self.expression);
                self.evaluee = None;
                self.evaluee_avec_x = false;
            }
        }

        self.resultat = Some(r);
    }

    /// Traçable : dernière évaluation réussie sur l’expression affichée, et x présent.
    /// Aucune relecture ici : appelé à chaque image.
    pub fn tracable(&self) -> bool {
        self.evaluee.as_deref() == Some(self.expression.as_str())
            && matches!(self.resultat, Some(Ok(_)))
            && self.evaluee_avec_x
    }

    /// À appeler à chaque image : ne rééchantillonne que si la clé change.
    pub fn rafraichir_trace(&mut self) {
        if !self.tracable() {
            self.trace = EtatTrace::Aucun;
            self.cle_trace = None;
            return;
        }

        let cle = (self.expression.clone(), self.domaine);
        if self.cle_trace.as_ref() == Some(&cle) {
            return;
        }

        self.trace = match tracer(&normaliser(&self.expression), self.domaine) {
            Ok(c) => EtatTrace::Courbe(c),
            Err(e) => {
                e.journaliser(&self.expression);
                EtatTrace::Erreur(e.message_utilisateur())
            }
        };
        self.cle_trace = Some(cle);
        self.note_export = None;
    }

    /// Écrit la courbe courante dans FICHIER_GRAPHE (répertoire courant).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn exporter(&mut self) {
        use crate::noyau::exporter_png;
        use crate::reglages::FICHIER_GRAPHE;

        let EtatTrace::Courbe(courbe) = &self.trace else {
            return;
        };

        self.note_export = Some(match exporter_png(courbe, std::path::Path::new(FICHIER_GRAPHE)) {
            Ok(()) => format!("Graphe enregistré : {FICHIER_GRAPHE}"),
            Err(e) => {
                e.journaliser(&self.expression);
                e.message_utilisateur().to_string()
            }
        });
    }
}
