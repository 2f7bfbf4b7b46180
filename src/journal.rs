// src/journal.rs
//
// Journal : console (stderr) + fichier app.log en ajout.
// - Niveau : RUST_LOG si présent, sinon FILTRE_JOURNAL_DEFAUT
// - Fichier illisible => console seule (on ne bloque pas le lancement)
// - wasm32 : aucun abonné (les événements tracing sont ignorés)

#[cfg(not(target_arch = "wasm32"))]
pub fn installer() {
    use std::fs::OpenOptions;
    use std::sync::Mutex;

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{fmt, EnvFilter};

    use crate::reglages::{FICHIER_JOURNAL, FILTRE_JOURNAL_DEFAUT};

    let filtre = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(FILTRE_JOURNAL_DEFAUT));

    let console = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let fichier = OpenOptions::new()
        .create(true)
        .append(true)
        .open(FICHIER_JOURNAL);

    let (couche_fichier, echec) = match fichier {
        Ok(f) => (
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(f))
                    .with_ansi(false)
                    .with_target(false),
            ),
            None,
        ),
        Err(e) => (None, Some(e)),
    };

    let installe = tracing_subscriber::registry()
        .with(filtre)
        .with(console)
        .with(couche_fichier)
        .try_init();

    if installe.is_err() {
        // Déjà installé (tests, double appel) : rien à faire.
        return;
    }

    if let Some(e) = echec {
        tracing::warn!(
            fichier = FICHIER_JOURNAL,
            detail = %e,
            "journal fichier indisponible, console seule"
        );
    }
}

#[cfg(target_arch = "wasm32")]
pub fn installer() {}

/// Abonné de test : retient chaque événement (niveau + champs) émis dans `capturer`.
#[cfg(all(test, not(target_arch = "wasm32")))]
pub(crate) mod capture {
    use std::collections::BTreeMap;
    use std::fmt;
    use std::sync::{Arc, Mutex};

    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    #[derive(Clone, Debug)]
    pub struct Ligne {
        pub niveau: Level,
        champs: BTreeMap<String, String>,
    }

    impl Ligne {
        pub fn champ(&self, nom: &str) -> Option<&str> {
            self.champs.get(nom).map(String::as_str)
        }

        pub fn message(&self) -> &str {
            self.champ("message").unwrap_or("")
        }
    }

    struct Champs<'a>(&'a mut BTreeMap<String, String>);

    impl Visit for Champs<'_> {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_string(), value.to_string());
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_string(), format!("{value:?}"));
        }
    }

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<Ligne>>>);

    impl<S: Subscriber> Layer<S> for Capture {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut champs = BTreeMap::new();
            event.record(&mut Champs(&mut champs));
            if let Ok(mut lignes) = self.0.lock() {
                lignes.push(Ligne {
                    niveau: *event.metadata().level(),
                    champs,
                });
            }
        }
    }

    /// Exécute `f` sous un abonné local au fil courant et rend les lignes émises.
    pub fn capturer(f: impl FnOnce()) -> Vec<Ligne> {
        let capture = Capture::default();
        let abonne = tracing_subscriber::registry().with(capture.clone());
        tracing::subscriber::with_default(abonne, f);

        let lignes = capture.0.lock().map(|l| l.clone()).unwrap_or_default();
        lignes
    }
}
