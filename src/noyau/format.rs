// src/noyau/format.rs
//
// Rendu borné des nombres (historique + affichage) :
// - au plus `max_chiffres_entiers` chiffres entiers (on garde les chiffres de poids faible)
// - entre `min_chiffres_fraction` et `max_chiffres_fraction` décimales, zéros inutiles retirés
// - jamais de "-0"

/// Garde-fou : f64 n’a pas plus de ~17 chiffres significatifs.
const FRACTION_MAX: usize = 17;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatNombre {
    max_chiffres_entiers: usize,
    min_chiffres_fraction: usize,
    max_chiffres_fraction: usize,
}

impl Default for FormatNombre {
    fn default() -> Self {
        Self {
            max_chiffres_entiers: 9,
            min_chiffres_fraction: 0,
            max_chiffres_fraction: 6,
        }
    }
}

impl FormatNombre {
    /// Bornes normalisées : au moins 1 chiffre entier, min <= max <= FRACTION_MAX.
    pub fn new(
        max_chiffres_entiers: usize,
        min_chiffres_fraction: usize,
        max_chiffres_fraction: usize,
    ) -> Self {
        let max_chiffres_fraction = max_chiffres_fraction.min(FRACTION_MAX);
        Self {
            max_chiffres_entiers: max_chiffres_entiers.max(1),
            min_chiffres_fraction: min_chiffres_fraction.min(max_chiffres_fraction),
            max_chiffres_fraction,
        }
    }

    pub fn max_chiffres_fraction(&self) -> usize {
        self.max_chiffres_fraction
    }

    pub fn formater(&self, valeur: f64) -> String {
        if valeur.is_nan() {
            return "nan".to_string();
        }
        if valeur.is_infinite() {
            return if valeur.is_sign_negative() { "-inf" } else { "inf" }.to_string();
        }

        let brut = format!("{:.*}", self.max_chiffres_fraction, valeur.abs());
        let (entier, fraction) = brut.split_once('.').unwrap_or((brut.as_str(), ""));

        // chiffres entiers : on garde les derniers, puis on retire les zéros de tête
        let debut = entier.len().saturating_sub(self.max_chiffres_entiers);
        let entier = entier[debut..].trim_start_matches('0');
        let entier = if entier.is_empty() { "0" } else { entier };

        let mut fraction = fraction.trim_end_matches('0').to_string();
        while fraction.len() < self.min_chiffres_fraction {
            fraction.push('0');
        }

        let nul = entier == "0" && fraction.bytes().all(|b| b == b'0');
        let signe = if valeur.is_sign_negative() && !nul {
            "-"
        } else {
            ""
        };

        if fraction.is_empty() {
            format!("{signe}{entier}")
        } else {
            format!("{signe}{entier}.{fraction}")
        }
    }
}

/// Nombre de caractères (pas d’octets) : les symboles sont multi-octets (√, π, 𝑦ⁿ…).
pub fn longueur_rendu(texte: &str) -> usize {
    texte.chars().count()
}

/// Retire les `n` derniers caractères de `texte` (saturant).
pub fn retirer_fin(texte: &mut String, n: usize) {
    if n == 0 {
        return;
    }
    let coupe = texte
        .char_indices()
        .rev()
        .nth(n - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    texte.truncate(coupe);
}
