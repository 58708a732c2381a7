// src/noyau/journal.rs
//
// Journal des entrées (la “pile” de saisie).
// - ajout seulement (nombre, variable, opcode)
// - annulation en deux temps : marquage `Supprimee` par paire, retrait à la passe suivante
// - tirage RND figé dans son entrée à la première réduction (rejeu identique)

#[derive(Clone, Debug, PartialEq)]
pub enum Entree {
    Nombre(f64),
    Variable(String),
    Operation(String),
    /// Opcode aléatoire déjà tiré : la valeur reste attachée à l’entrée.
    Tirage { symbole: String, valeur: f64 },
    /// Place marquée par une annulation ; jamais produite par la saisie.
    Supprimee,
}

#[derive(Clone, Debug, Default)]
pub struct Journal {
    entrees: Vec<Entree>,
}

impl Journal {
    pub fn push(&mut self, entree: Entree) {
        self.entrees.push(entree);
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Entree> {
        self.entrees.get(position)
    }

    pub fn entrees(&self) -> &[Entree] {
        &self.entrees
    }

    /// Copie figée pour une passe : les marques posées pendant la passe
    /// ne sont vues qu’à la passe suivante.
    pub fn instantane(&self) -> Vec<Entree> {
        self.entrees.clone()
    }

    /// Marque l’opcode d’annulation et l’entrée qui le précède.
    /// `position` doit être > 0 (sinon: `vider`).
    pub fn marquer_annulation(&mut self, position: usize) {
        debug_assert!(position > 0);
        if position == 0 || position >= self.entrees.len() {
            return;
        }
        self.entrees[position] = Entree::Supprimee;
        self.entrees[position - 1] = Entree::Supprimee;
    }

    /// Remplace l’opcode aléatoire en `position` par son tirage.
    pub fn figer_tirage(&mut self, position: usize, valeur: f64) {
        if let Some(entree) = self.entrees.get_mut(position) {
            if let Entree::Operation(symbole) = &mut *entree {
                let symbole = std::mem::take(symbole);
                *entree = Entree::Tirage { symbole, valeur };
            }
        }
    }

    /// Retire la paire marquée qui commence à `position` (bornes tolérées).
    pub fn retirer_paire(&mut self, position: usize) {
        let fin = (position + 2).min(self.entrees.len());
        if position < fin {
            self.entrees.drain(position..fin);
        }
    }

    /// Retire tout jusqu’à `position` incluse (effacement d’historique).
    pub fn retirer_jusqua(&mut self, position: usize) {
        let fin = (position + 1).min(self.entrees.len());
        self.entrees.drain(..fin);
    }

    pub fn vider(&mut self) {
        self.entrees.clear();
    }
}
