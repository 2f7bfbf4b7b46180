// src/app/vue.rs
//
// Vue (UI egui): natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Expression et résultat en gros, au centre
// - Trois colonnes de boutons : Nombres / Opérations / Fonctions
// - Curseurs x min / x max, courbe dessinée au painter (pas de widget de tracé externe)
// - Export PNG (natif seulement)

use eframe::egui;

use super::etat::{AppCalc, EtatTrace};
use crate::noyau::trace::graduations;
use crate::noyau::Courbe;
use crate::reglages::{BORNES_CURSEUR, PAS_CURSEUR};

const NOMBRES: [&[&str]; 4] = [
    &["7", "8", "9"],
    &["4", "5", "6"],
    &["1", "2", "3"],
    &["0", ".", "x"],
];

const OPERATIONS: [&[&str]; 3] = [
    &["+", "-", "*", "/"],
    &["(", ")", "^", "="],
    &["C", "DEL"],
];

const FONCTIONS: [&[&str]; 4] = [
    &["sin", "cos", "tan", "log"],
    &["asin", "acos", "atan", "sqrt"],
    &["sinh", "cosh", "tanh", "exp"],
    &["π", "e"],
];

const TAILLE_BOUTON: [f32; 2] = [46.0, 30.0];
const HAUTEUR_GRAPHE: f32 = 300.0;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice graphique");
                ui.add_space(6.0);

                self.ui_affichage(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_boutons(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_graphe(ui);
            });
    }

    fn ui_affichage(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            let expression = if self.expression.is_empty() {
                " ".to_string()
            } else {
                self.expression.clone()
            };
            ui.label(egui::RichText::new(expression).size(24.0).monospace());

            let couleur = if self.resultat_en_erreur() {
                ui.visuals().error_fg_color
            } else {
                egui::Color32::from_rgb(231, 76, 60)
            };
            let texte = self.texte_resultat();
            let texte = if texte.is_empty() { " ".to_string() } else { texte };
            ui.label(egui::RichText::new(texte).size(30.0).strong().color(couleur));
        });
    }

    fn ui_boutons(&mut self, ui: &mut egui::Ui) {
        ui.columns(3, |cols| {
            self.colonne(&mut cols[0], "Nombres", "pave_nombres", &NOMBRES);
            self.colonne(&mut cols[1], "Opérations", "pave_operations", &OPERATIONS);
            self.colonne(&mut cols[2], "Fonctions", "pave_fonctions", &FONCTIONS);
        });
    }

    fn colonne(&mut self, ui: &mut egui::Ui, titre: &str, id: &str, lignes: &[&[&str]]) {
        ui.label(egui::RichText::new(titre).strong());
        egui::Grid::new(id).spacing([4.0, 4.0]).show(ui, |ui| {
            for ligne in lignes {
                for libelle in ligne.iter() {
                    if ui
                        .add_sized(TAILLE_BOUTON, egui::Button::new(*libelle))
                        .clicked()
                    {
                        self.touche(libelle);
                    }
                }
                ui.end_row();
            }
        });
    }

    fn ui_graphe(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Graphe").strong());

        let (bas, haut) = BORNES_CURSEUR;
        let mut min = self.domaine.min();
        let mut max = self.domaine.max();

        let r_min = ui.add(
            egui::Slider::new(&mut min, bas..=haut)
                .step_by(PAS_CURSEUR)
                .text("x min"),
        );
        let r_max = ui.add(
            egui::Slider::new(&mut max, bas..=haut)
                .step_by(PAS_CURSEUR)
                .text("x max"),
        );
        if r_min.changed() || r_max.changed() {
            // min >= max : ignoré par set_domaine, le curseur revient à la frame suivante
            self.set_domaine(min, max);
        }

        self.rafraichir_trace();

        let dessinee = match &self.trace {
            EtatTrace::Aucun => {
                ui.weak("Évaluez une expression en x pour afficher sa courbe.");
                false
            }
            EtatTrace::Erreur(msg) => {
                ui.colored_label(ui.visuals().error_fg_color, *msg);
                false
            }
            EtatTrace::Courbe(courbe) => {
                Self::dessiner(ui, courbe);
                true
            }
        };
        if dessinee {
            self.ui_export(ui);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn ui_export(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Télécharger le graphe (PNG)").clicked() {
                self.exporter();
            }
            if let Some(note) = &self.note_export {
                ui.label(note);
            }
        });
    }

    #[cfg(target_arch = "wasm32")]
    fn ui_export(&mut self, _ui: &mut egui::Ui) {}

    /// Courbe au painter : fond, grille, axes, trait, légende.
    fn dessiner(ui: &mut egui::Ui, courbe: &Courbe) {
        let largeur = ui.available_width();
        let (resp, painter) =
            ui.allocate_painter(egui::vec2(largeur, HAUTEUR_GRAPHE), egui::Sense::hover());
        let rect = resp.rect;

        let (x0, x1) = courbe.bornes_x();
        let (y0, y1) = courbe.bornes_y();
        if x1 <= x0 || y1 <= y0 || !(y1 - y0).is_finite() {
            return;
        }

        let ecran = |x: f64, y: f64| {
            egui::pos2(
                rect.left() + ((x - x0) / (x1 - x0)) as f32 * rect.width(),
                rect.bottom() - ((y - y0) / (y1 - y0)) as f32 * rect.height(),
            )
        };

        painter.rect_filled(rect, 4.0, egui::Color32::WHITE);

        let grille = egui::Stroke::new(1.0, egui::Color32::from_gray(225));
        for g in graduations(x0, x1) {
            painter.line_segment([ecran(g, y0), ecran(g, y1)], grille);
        }
        for g in graduations(y0, y1) {
            painter.line_segment([ecran(x0, g), ecran(x1, g)], grille);
        }

        let axes = egui::Stroke::new(1.0, egui::Color32::from_gray(40));
        if (y0..=y1).contains(&0.0) {
            painter.line_segment([ecran(x0, 0.0), ecran(x1, 0.0)], axes);
        }
        if (x0..=x1).contains(&0.0) {
            painter.line_segment([ecran(0.0, y0), ecran(0.0, y1)], axes);
        }

        let points: Vec<egui::Pos2> = courbe.points.iter().map(|&(x, y)| ecran(x, y)).collect();
        painter.add(egui::Shape::line(
            points,
            egui::Stroke::new(2.0, egui::Color32::from_rgb(31, 119, 180)),
        ));

        painter.text(
            rect.left_top() + egui::vec2(8.0, 6.0),
            egui::Align2::LEFT_TOP,
            &courbe.legende,
            egui::FontId::monospace(13.0),
            egui::Color32::from_gray(40),
        );
        painter.text(
            rect.right_bottom() - egui::vec2(8.0, 6.0),
            egui::Align2::RIGHT_BOTTOM,
            format!("x : [{x0}, {x1}]"),
            egui::FontId::monospace(11.0),
            egui::Color32::from_gray(110),
        );
    }
}
