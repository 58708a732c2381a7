//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de l’écran (affichage, historique, mémoire, erreur),
//! la saisie en cours, et traduire chaque touche en appels au moteur
//! (push_* puis evaluate) avant de rafraîchir l’écran.
//!
//! Contrats :
//! - Aucune réduction ici : tout passe par `noyau::Calculatrice`.
//! - Défense en profondeur : saisie bornée (longueur, décimales).

use std::collections::HashMap;

use tracing::warn;

use crate::noyau::operations::ANNULER;
use crate::noyau::{Calculatrice, Evaluation};

/// Longueur maximale de la saisie affichée.
const LONGUEUR_AFFICHAGE: usize = 16;

/// Touche effacement arrière.
pub const RETOUR: &str = "⬅︎";

/// Nom de la variable mémoire (touches "M" et "→M").
pub const MEMOIRE: &str = "M";

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- sorties ---
    pub affichage: String,  // saisie OU résultat
    pub historique: String, // description + "..." / "="
    pub memoire: String,    // valeur liée à M
    pub erreur: String,

    // --- saisie ---
    saisie_en_cours: bool,
    caracteres_saisis: usize,
    decimales_saisies: usize,

    moteur: Calculatrice,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::avec_moteur(Calculatrice::new())
    }
}

impl AppCalc {
    pub fn avec_moteur(moteur: Calculatrice) -> Self {
        Self {
            affichage: "0".to_string(),
            historique: " ".to_string(),
            memoire: "0".to_string(),
            erreur: String::new(),
            saisie_en_cours: false,
            caracteres_saisis: 0,
            decimales_saisies: 0,
            moteur,
        }
    }

    pub fn saisie_en_cours(&self) -> bool {
        self.saisie_en_cours
    }

    /// Valeur de l’affichage ("nan"/"inf" compris).
    pub fn valeur_affichee(&self) -> f64 {
        self.affichage.parse().unwrap_or_else(|_| {
            warn!(affichage = %self.affichage, "affichage illisible: 0");
            0.0
        })
    }

    fn max_decimales(&self) -> usize {
        self.moteur.format().max_chiffres_fraction()
    }

    /* ------------------------ Touches ------------------------ */

    /// Chiffre, point décimal ou retour arrière.
    pub fn touche_chiffre(&mut self, touche: &str) {
        if !self.saisie_en_cours {
            match touche {
                "." => {
                    self.affichage = "0.".to_string();
                    self.saisie_en_cours = true;
                    self.decimales_saisies = 0;
                    self.caracteres_saisis += 2;
                }
                RETOUR => {}
                _ => {
                    self.affichage = touche.to_string();
                    self.saisie_en_cours = true;
                    self.caracteres_saisis += 1;
                }
            }
            return;
        }

        if touche != RETOUR && self.caracteres_saisis >= LONGUEUR_AFFICHAGE {
            return;
        }

        let avec_point = self.affichage.contains('.');
        let ajoute = match touche {
            RETOUR => {
                self.retour_arriere();
                self.caracteres_saisis = self.caracteres_saisis.saturating_sub(1);
                false
            }
            // un seul point décimal
            "." if avec_point => false,
            "." => {
                self.affichage.push('.');
                self.decimales_saisies = 0;
                true
            }
            // zéro après le point : on le garde tel quel (sinon le format le mangerait)
            "0" if avec_point && self.decimales_saisies < self.max_decimales() => {
                self.affichage.push('0');
                self.decimales_saisies += 1;
                true
            }
            _ => self.ajouter_chiffre(touche, avec_point),
        };
        if ajoute {
            self.caracteres_saisis += 1;
        }
    }

    fn retour_arriere(&mut self) {
        self.affichage.pop();
        if self.affichage.is_empty() {
            self.affichage = "0".to_string();
        }
        if self.affichage.contains('.') {
            self.decimales_saisies = self.decimales_saisies.saturating_sub(1);
        }
    }

    /// Vrai si le chiffre a été pris.
    fn ajouter_chiffre(&mut self, chiffre: &str, avec_point: bool) -> bool {
        if avec_point && self.decimales_saisies >= self.max_decimales() {
            return false;
        }

        let brut = format!("{}{}", self.affichage, chiffre);
        let Ok(valeur) = brut.parse::<f64>() else {
            warn!(brut = %brut, "saisie illisible: ignorée");
            return false;
        };
        self.affichage = self.moteur.format().formater(valeur);
        if avec_point {
            self.decimales_saisies += 1;
        }
        true
    }

    /// Opération (constante, fonction, binaire, =, ∁) : la saisie en cours part d’abord.
    pub fn touche_operation(&mut self, symbole: &str) {
        if self.saisie_en_cours {
            let valeur = self.valeur_affichee();
            self.moteur.push_literal(valeur);
            self.saisie_en_cours = false;
        }
        self.moteur.push_opcode(symbole);
        let r = self.moteur.evaluate(None);
        self.rafraichir(r);
    }

    /// Touche variable ("M") : la saisie en cours est abandonnée.
    pub fn inserer_variable(&mut self, nom: &str) {
        self.saisie_en_cours = false;
        self.moteur.push_variable(nom);
        let r = self.moteur.evaluate(None);
        self.rafraichir(r);
    }

    /// Touche "→M" : lie la valeur affichée à la variable (dernier caractère du libellé).
    pub fn memoriser(&mut self, libelle: &str) {
        let Some(nom) = libelle.chars().last() else {
            return;
        };
        self.saisie_en_cours = false;

        let valeur = self.valeur_affichee();
        self.memoire = self.moteur.format().formater(valeur);

        let liaisons = HashMap::from([(nom.to_string(), valeur)]);
        let r = self.moteur.evaluate(Some(&liaisons));
        self.rafraichir(r);
    }

    /// Undo : retour arrière pendant la saisie, sinon annulation en deux évaluations.
    pub fn annuler(&mut self) {
        if self.saisie_en_cours {
            self.touche_chiffre(RETOUR);
            return;
        }
        self.moteur.push_opcode(ANNULER);
        // marquage puis retrait
        self.moteur.evaluate(None);
        let r = self.moteur.evaluate(None);
        self.rafraichir(r);
    }

    pub fn effacer_memoire(&mut self) {
        self.memoire = "0".to_string();
    }

    /* ------------------------ Écran ------------------------ */

    fn rafraichir(&mut self, r: Evaluation) {
        self.caracteres_saisis = 0;
        match r.resultat {
            Some(v) => {
                self.affichage = self.moteur.format().formater(v);
                let suffixe = if r.en_attente { "..." } else { "=" };
                self.historique = format!("{}{suffixe}", r.description);
                self.erreur = r.erreur.unwrap_or_default();
            }
            None => {
                self.affichage = "0".to_string();
                self.historique = " ".to_string();
                self.erreur.clear();
            }
        }
    }
}
