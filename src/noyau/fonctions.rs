// src/noyau/fonctions.rs
//
// Fonctions unaires reconnues + application numérique.
//
// Mode d’angle (tracé seulement) :
// - Radians : définitions usuelles (évaluation)
// - Degres  : sin/cos/tan convertissent l’argument degrés -> radians,
//             asin/acos/atan convertissent le résultat radians -> degrés.
//   Les autres fonctions ne changent pas.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Sqrt,
    Exp,
    Log10,
    Ln,
    Abs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ModeAngle {
    #[default]
    Radians,
    Degres,
}

impl Fonction {
    pub const TOUTES: [Fonction; 14] = [
        Fonction::Sin,
        Fonction::Cos,
        Fonction::Tan,
        Fonction::Asin,
        Fonction::Acos,
        Fonction::Atan,
        Fonction::Sinh,
        Fonction::Cosh,
        Fonction::Tanh,
        Fonction::Sqrt,
        Fonction::Exp,
        Fonction::Log10,
        Fonction::Ln,
        Fonction::Abs,
    ];

    /// Nom tel qu’il arrive au lecteur (après `preparer`, donc `log10` et pas `log`).
    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Asin => "asin",
            Fonction::Acos => "acos",
            Fonction::Atan => "atan",
            Fonction::Sinh => "sinh",
            Fonction::Cosh => "cosh",
            Fonction::Tanh => "tanh",
            Fonction::Sqrt => "sqrt",
            Fonction::Exp => "exp",
            Fonction::Log10 => "log10",
            Fonction::Ln => "ln",
            Fonction::Abs => "abs",
        }
    }

    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        Fonction::TOUTES.into_iter().find(|f| f.nom() == nom)
    }

    /// Application numérique. Peut rendre NaN/±inf : c’est à l’appelant de trier.
    pub fn appliquer(self, v: f64, mode: ModeAngle) -> f64 {
        let degres = mode == ModeAngle::Degres;
        match self {
            Fonction::Sin => entree_angle(v, degres).sin(),
            Fonction::Cos => entree_angle(v, degres).cos(),
            Fonction::Tan => entree_angle(v, degres).tan(),
            Fonction::Asin => sortie_angle(v.asin(), degres),
            Fonction::Acos => sortie_angle(v.acos(), degres),
            Fonction::Atan => sortie_angle(v.atan(), degres),
            Fonction::Sinh => v.sinh(),
            Fonction::Cosh => v.cosh(),
            Fonction::Tanh => v.tanh(),
            Fonction::Sqrt => v.sqrt(),
            Fonction::Exp => v.exp(),
            Fonction::Log10 => v.log10(),
            Fonction::Ln => v.ln(),
            Fonction::Abs => v.abs(),
        }
    }
}

fn entree_angle(v: f64, degres: bool) -> f64 {
    if degres {
        v.to_radians()
    } else {
        v
    }
}

fn sortie_angle(v: f64, degres: bool) -> f64 {
    if degres {
        v.to_degrees()
    } else {
        v
    }
}

impl fmt::Display for Fonction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nom())
    }
}
