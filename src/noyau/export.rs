// src/noyau/export.rs
//
// Export PNG d’une courbe déjà échantillonnée (natif seulement).
// Aucun texte dessiné : plotters est compilé sans polices.

use std::path::Path;

use plotters::prelude::*;

use super::erreurs::ErreurRendu;
use super::trace::{graduations, Courbe};
use crate::reglages::TAILLE_GRAPHE_PNG;

const GRILLE: RGBColor = RGBColor(225, 225, 225);
const AXES: RGBColor = RGBColor(40, 40, 40);
const TRAIT: RGBColor = RGBColor(31, 119, 180);

fn export<E: std::fmt::Display>(e: E) -> ErreurRendu {
    ErreurRendu::Export(e.to_string())
}

/// Écrit `courbe` en PNG (fond blanc, grille, axes x = 0 et y = 0, trait bleu).
pub fn exporter_png(courbe: &Courbe, chemin: &Path) -> Result<(), ErreurRendu> {
    if courbe.points.is_empty() {
        return Err(ErreurRendu::Export("courbe vide".into()));
    }

    let (x0, x1) = courbe.bornes_x();
    let (y0, y1) = courbe.bornes_y();
    if !(y1 - y0).is_finite() {
        return Err(ErreurRendu::Echelle { min: y0, max: y1 });
    }

    let racine = BitMapBackend::new(chemin, TAILLE_GRAPHE_PNG).into_drawing_area();
    racine.fill(&WHITE).map_err(export)?;

    let mut chart = ChartBuilder::on(&racine)
        .margin(16)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(export)?;

    // grille
    let verticales = graduations(x0, x1)
        .into_iter()
        .map(|g| PathElement::new(vec![(g, y0), (g, y1)], GRILLE));
    let horizontales = graduations(y0, y1)
        .into_iter()
        .map(|g| PathElement::new(vec![(x0, g), (x1, g)], GRILLE));
    chart.draw_series(verticales).map_err(export)?;
    chart.draw_series(horizontales).map_err(export)?;

    // axes, seulement s’ils tombent dans la fenêtre
    let mut axes = Vec::new();
    if (y0..=y1).contains(&0.0) {
        axes.push(PathElement::new(vec![(x0, 0.0), (x1, 0.0)], AXES.stroke_width(1)));
    }
    if (x0..=x1).contains(&0.0) {
        axes.push(PathElement::new(vec![(0.0, y0), (0.0, y1)], AXES.stroke_width(1)));
    }
    chart.draw_series(axes).map_err(export)?;

    chart
        .draw_series(LineSeries::new(
            courbe.points.iter().copied(),
            TRAIT.stroke_width(2),
        ))
        .map_err(export)?;

    racine.present().map_err(export)?;

    tracing::info!(
        fichier = %chemin.display(),
        expression = %courbe.legende,
        "graphe exporté"
    );
    Ok(())
}
