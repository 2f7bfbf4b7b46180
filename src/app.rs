// src/app.rs
//
// Calculatrice graphique: module App (racine)
// --------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + actions.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Clavier (aucun champ texte : la saisie passe par les mêmes actions que les boutons) :
// - caractères tapés => ajout verbatim, '=' évalue
// - Enter => "=" ; Backspace => "DEL" ; Escape => "C"

pub mod actions;
pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

impl AppCalc {
    fn clavier(&mut self, ctx: &egui::Context) {
        let evenements = ctx.input(|i| i.events.clone());

        for ev in evenements {
            match ev {
                egui::Event::Text(t) => self.touche_texte(&t),
                egui::Event::Key {
                    key, pressed: true, ..
                } => match key {
                    egui::Key::Enter => self.touche("="),
                    egui::Key::Backspace => self.touche("DEL"),
                    egui::Key::Escape => self.touche("C"),
                    _ => {}
                },
                _ => {}
            }
        }
    }

    /// Texte tapé : ajouté caractère par caractère, sans traduction (un `e` reste `e`).
    /// Seul `=` déclenche une action.
    fn touche_texte(&mut self, t: &str) {
        for c in t.chars().filter(|c| !c.is_control()) {
            match c {
                '=' => self.evaluer(),
                c => self.expression.push(c),
            }
        }
    }
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.clavier(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }
}
