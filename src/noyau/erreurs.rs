// src/noyau/erreurs.rs
//
// Erreurs numériques détectées pendant la réduction.
// Jamais propagées hors de `evaluate` : le message part dans `Evaluation::erreur`.
//
// `origine` : d’où vient la valeur, déjà rendue
// ("résultat de √(-1)" pour une fonction, "entrée x" pour une valeur saisie).

use num_traits::Float;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurNumerique {
    #[error("Pas un nombre ! {origine}")]
    PasUnNombre { origine: String },

    #[error("Infini ! {origine}")]
    Infini { origine: String, negatif: bool },
}

impl ErreurNumerique {
    /// Valeur forcée dans l’accumulateur (NaN ou ±∞) pour que l’affichage distingue les cas.
    pub fn sentinelle(&self) -> f64 {
        match self {
            Self::PasUnNombre { .. } => f64::NAN,
            Self::Infini { negatif: true, .. } => f64::NEG_INFINITY,
            Self::Infini { negatif: false, .. } => f64::INFINITY,
        }
    }
}

/// Contrôle une valeur ; `origine` n’est rendue qu’en cas d’erreur.
pub fn controler<T: Float>(
    valeur: T,
    origine: impl FnOnce() -> String,
) -> Result<T, ErreurNumerique> {
    if valeur.is_nan() {
        return Err(ErreurNumerique::PasUnNombre {
            origine: origine(),
        });
    }
    if valeur.is_infinite() {
        return Err(ErreurNumerique::Infini {
            origine: origine(),
            negatif: valeur.is_sign_negative(),
        });
    }
    Ok(valeur)
}
