//! src/reglages.rs
//!
//! Réglages figés à la compilation (pas de fichier de config).
//! Seul le niveau du journal se règle à l’exécution, via `RUST_LOG`.

/// Domaine de tracé au lancement (x min, x max).
pub const DOMAINE_DEFAUT: (f64, f64) = (-10.0, 10.0);

/// Bornes des curseurs x min / x max.
pub const BORNES_CURSEUR: (f64, f64) = (-20.0, 20.0);

/// Pas des curseurs.
pub const PAS_CURSEUR: f64 = 0.5;

/// Nombre de points échantillonnés sur [min, max] (bornes incluses).
pub const N_ECHANTILLONS: usize = 400;

/// Journal en ajout (jamais tronqué au démarrage).
pub const FICHIER_JOURNAL: &str = "app.log";

/// Filtre utilisé si `RUST_LOG` est absent ou illisible.
pub const FILTRE_JOURNAL_DEFAUT: &str = "info";

/// Nom fixe du graphe exporté.
pub const FICHIER_GRAPHE: &str = "graph.png";

/// Taille du PNG exporté (pixels).
pub const TAILLE_GRAPHE_PNG: (u32, u32) = (640, 480);
