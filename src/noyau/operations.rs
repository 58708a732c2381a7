// src/noyau/operations.rs
//
// Table des opérations : symbole -> nature de l’opération.
// Construite une fois par moteur, lue seulement pendant les passes.

use std::collections::HashMap;
use std::f64::consts::{E, PI};

/* ------------------------ Symboles (touches) ------------------------ */

pub const PI_SYMBOLE: &str = "π";
pub const E_SYMBOLE: &str = "e";
pub const ALEATOIRE: &str = "RND";
pub const RACINE: &str = "√";
pub const PUISSANCE: &str = "𝑦ⁿ";
pub const PUISSANCE_10: &str = "10ⁿ";
pub const LOG: &str = "log";
pub const COS: &str = "cos";
pub const SIN: &str = "sin";
pub const OPPOSE: &str = "±";
pub const FOIS: &str = "×";
pub const DIVISE: &str = "÷";
pub const PLUS: &str = "+";
/// U+2212 (signe moins typographique), pas le tiret ASCII.
pub const MOINS: &str = "−";
pub const EGAL: &str = "=";
pub const EFFACER: &str = "∁";
pub const ANNULER: &str = "Undo";

pub type FonctionUnaire = fn(f64) -> f64;
pub type FonctionBinaire = fn(f64, f64) -> f64;

#[derive(Clone, Copy, Debug)]
pub enum Operation {
    Constante(f64),
    Aleatoire,
    Unaire(FonctionUnaire),
    Binaire {
        fonction: FonctionBinaire,
        // × et ÷ : l’historique met le membre gauche entre parenthèses
        parenthese_gauche: bool,
    },
    Egal,
    EffacerHistorique,
    Annuler,
}

fn puissance_10(x: f64) -> f64 {
    10f64.powf(x)
}

fn oppose(x: f64) -> f64 {
    -x
}

fn fois(a: f64, b: f64) -> f64 {
    a * b
}

fn divise(a: f64, b: f64) -> f64 {
    a / b
}

fn plus(a: f64, b: f64) -> f64 {
    a + b
}

fn moins(a: f64, b: f64) -> f64 {
    a - b
}

#[derive(Clone, Debug)]
pub struct TableOperations {
    operations: HashMap<&'static str, Operation>,
}

impl Default for TableOperations {
    fn default() -> Self {
        use Operation::*;

        let binaire = |fonction: FonctionBinaire| Binaire {
            fonction,
            parenthese_gauche: false,
        };
        let binaire_prioritaire = |fonction: FonctionBinaire| Binaire {
            fonction,
            parenthese_gauche: true,
        };

        let operations = HashMap::from([
            (ALEATOIRE, Aleatoire),
            (PI_SYMBOLE, Constante(PI)),
            (E_SYMBOLE, Constante(E)),
            (RACINE, Unaire(f64::sqrt)),
            (PUISSANCE, binaire(f64::powf)),
            (PUISSANCE_10, Unaire(puissance_10)),
            // log = logarithme naturel (comportement historique de la touche)
            (LOG, Unaire(f64::ln)),
            (COS, Unaire(f64::cos)),
            (SIN, Unaire(f64::sin)),
            (OPPOSE, Unaire(oppose)),
            (FOIS, binaire_prioritaire(fois)),
            (DIVISE, binaire_prioritaire(divise)),
            (PLUS, binaire(plus)),
            (MOINS, binaire(moins)),
            (EGAL, Egal),
            (EFFACER, EffacerHistorique),
            (ANNULER, Annuler),
        ]);

        Self { operations }
    }
}

impl TableOperations {
    /// Recherche exacte par symbole. `None` = opcode inconnu (ignoré par la réduction).
    pub fn get(&self, symbole: &str) -> Option<Operation> {
        self.operations.get(symbole).copied()
    }

    pub fn contient(&self, symbole: &str) -> bool {
        self.operations.contains_key(symbole)
    }
}
