//! Noyau — évaluation (réduction du journal)
//!
//! Chaque appel à `evaluate` rejoue tout le journal depuis l’entrée 0 :
//! accumulateur + une seule opération binaire en attente + description reconstruite.
//!
//! Annulation en deux temps :
//! - passe N   : l’opcode `Undo` marque sa place et la précédente (`Supprimee`)
//! - passe N+1 : la première marque rencontrée retire la paire et arrête la passe
//!
//! RND : tiré une seule fois, à la première réduction de l’opcode, puis figé dans le journal.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace, warn};

use super::erreurs::controler;
use super::format::{longueur_rendu, retirer_fin, FormatNombre};
use super::journal::{Entree, Journal};
use super::operations::{FonctionBinaire, FonctionUnaire, Operation, TableOperations};

/// Sortie d’une évaluation (sans identité propre).
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub resultat: Option<f64>,
    pub en_attente: bool,
    pub description: String,
    pub erreur: Option<String>,
}

impl Evaluation {
    /// Journal vide : description = un espace (case stable côté affichage).
    pub fn vide() -> Self {
        Self {
            resultat: None,
            en_attente: false,
            description: " ".to_string(),
            erreur: None,
        }
    }
}

/// Opérateur binaire capturé avec son premier opérande.
#[derive(Clone, Debug)]
struct OperationEnAttente {
    fonction: FonctionBinaire,
    premier_operande: f64,
    symbole: String,
}

/// État d’une passe de réduction (recalculé à chaque `evaluate`).
struct Passe<'a> {
    format: &'a FormatNombre,
    resultat: Option<f64>,
    en_attente: bool,
    description: String,
    second_operande: Option<f64>,
    attente: Option<OperationEnAttente>,
    profondeur: usize,
    sous_expression: String,
    erreur: Option<String>,
}

impl<'a> Passe<'a> {
    fn new(format: &'a FormatNombre) -> Self {
        Self {
            format,
            resultat: None,
            en_attente: false,
            description: " ".to_string(),
            second_operande: None,
            attente: None,
            profondeur: 0,
            sous_expression: String::new(),
            erreur: None,
        }
    }

    fn terminer(self) -> Evaluation {
        Evaluation {
            resultat: self.resultat,
            en_attente: self.en_attente,
            description: self.description,
            erreur: self.erreur,
        }
    }

    /// Valeur entrante (nombre, variable, constante, aléatoire) :
    /// second opérande si une opération attend, sinon nouvel accumulateur.
    fn affecter(&mut self, valeur: f64, texte: &str) {
        let valeur = self.controler(valeur, || format!("entrée {texte}"));
        // attente périmée : un second opérande existe déjà
        if self.en_attente && self.second_operande.is_some() {
            self.en_attente = false;
        }
        if self.en_attente {
            self.second_operande = Some(valeur);
            self.description.push_str(texte);
        } else {
            self.resultat = Some(valeur);
            self.description = texte.to_string();
        }
    }

    /// Erreur NaN / infini : message conservé, accumulateur forcé à la sentinelle.
    fn verifier(&mut self, valeur: f64, symbole: &str, operande: f64) -> f64 {
        let format = self.format;
        self.controler(valeur, || {
            format!("résultat de {symbole}({})", format.formater(operande))
        })
    }

    fn controler(&mut self, valeur: f64, origine: impl FnOnce() -> String) -> f64 {
        match controler(valeur, origine) {
            Ok(v) => v,
            Err(e) => {
                debug!(erreur = %e, "erreur numérique");
                self.erreur = Some(e.to_string());
                e.sentinelle()
            }
        }
    }

    /// `precedente` : rendu de l’entrée vivante qui précède l’opcode (None si marquée).
    fn appliquer_unaire(&mut self, fonction: FonctionUnaire, symbole: &str, precedente: Option<String>) {
        let Some(courant) = self.resultat else {
            return;
        };

        if self.en_attente {
            let Some(operande) = self.second_operande else {
                warn!(symbole, "fonction sur un second opérande absent: ignorée");
                return;
            };

            // premier habillage depuis le dernier binaire : on reprend le rendu de l’entrée précédente
            if self.profondeur == 0 {
                self.sous_expression = precedente.unwrap_or_default();
            }
            retirer_fin(&mut self.description, longueur_rendu(&self.sous_expression));
            self.sous_expression = format!("{symbole}({})", self.sous_expression);
            self.description.push_str(&self.sous_expression);

            let valeur = self.verifier(fonction(operande), symbole, operande);
            self.resultat = Some(valeur);
            // un second habillage immédiat compose sur ce résultat
            self.second_operande = Some(valeur);
        } else {
            self.description = format!("{symbole}({})", self.description);
            self.resultat = Some(self.verifier(fonction(courant), symbole, courant));
        }

        self.profondeur += 1;
    }

    fn appliquer_binaire(&mut self, fonction: FonctionBinaire, symbole: &str, parenthese_gauche: bool) {
        if self.resultat.is_none() {
            return;
        }
        if self.en_attente {
            self.resoudre_attente();
            self.second_operande = None;
        }
        let Some(premier_operande) = self.resultat else {
            return;
        };

        self.attente = Some(OperationEnAttente {
            fonction,
            premier_operande,
            symbole: symbole.to_string(),
        });

        if parenthese_gauche {
            self.description = format!("({}){symbole}", self.description);
        } else {
            self.description.push_str(symbole);
        }
        self.en_attente = true;
        self.profondeur = 0;
    }

    /// Exécute l’opération en attente avec le second opérande puis la referme.
    fn resoudre_attente(&mut self) {
        let Some(attente) = self.attente.take() else {
            return;
        };
        match self.second_operande {
            Some(second) => {
                let valeur = (attente.fonction)(attente.premier_operande, second);
                self.resultat = Some(self.verifier(valeur, &attente.symbole, second));
            }
            None => {
                warn!(symbole = %attente.symbole, "opération sans second opérande: abandonnée");
            }
        }
    }

    fn egal(&mut self) {
        if self.attente.is_some() {
            self.resoudre_attente();
        }
        self.en_attente = false;
        self.attente = None;
        self.second_operande = None;
        self.sous_expression.clear();
        self.profondeur = 0;
    }
}

/// Texte d’une entrée tel qu’il apparaît dans la description.
fn rendu_entree(entree: &Entree, format: &FormatNombre) -> Option<String> {
    match entree {
        Entree::Nombre(v) => Some(format.formater(*v)),
        Entree::Variable(nom) => Some(nom.clone()),
        Entree::Operation(symbole) | Entree::Tirage { symbole, .. } => Some(symbole.clone()),
        Entree::Supprimee => None,
    }
}

/// Moteur de calcul : journal + variables + table, possédés par une seule session.
#[derive(Clone, Debug)]
pub struct Calculatrice {
    journal: Journal,
    variables: HashMap<String, f64>,
    operations: TableOperations,
    format: FormatNombre,
    /// Source de la touche RND ; chaque tirage est ensuite figé dans son entrée.
    alea: StdRng,
}

impl Default for Calculatrice {
    fn default() -> Self {
        Self::avec_alea(StdRng::from_entropy())
    }
}

impl Calculatrice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tirages reproductibles d’une session à l’autre (tests).
    pub fn avec_graine(graine: u64) -> Self {
        Self::avec_alea(StdRng::seed_from_u64(graine))
    }

    fn avec_alea(alea: StdRng) -> Self {
        Self {
            journal: Journal::default(),
            variables: HashMap::new(),
            operations: TableOperations::default(),
            format: FormatNombre::default(),
            alea,
        }
    }

    pub fn avec_format(format: FormatNombre) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn format(&self) -> &FormatNombre {
        &self.format
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn variable(&self, nom: &str) -> Option<f64> {
        self.variables.get(nom).copied()
    }

    /* ------------------------ Saisie (ajout seulement) ------------------------ */

    pub fn push_literal(&mut self, valeur: f64) {
        self.journal.push(Entree::Nombre(valeur));
    }

    pub fn push_variable(&mut self, nom: impl Into<String>) {
        self.journal.push(Entree::Variable(nom.into()));
    }

    /// N’évalue rien : la réduction se fait dans `evaluate`.
    pub fn push_opcode(&mut self, symbole: impl Into<String>) {
        self.journal.push(Entree::Operation(symbole.into()));
    }

    /* ------------------------ Réduction ------------------------ */

    /// Fusionne `liaisons` dans les variables puis rejoue tout le journal.
    pub fn evaluate(&mut self, liaisons: Option<&HashMap<String, f64>>) -> Evaluation {
        if let Some(liaisons) = liaisons {
            for (nom, valeur) in liaisons {
                self.variables.insert(nom.clone(), *valeur);
            }
        }

        if self.journal.is_empty() {
            return Evaluation::vide();
        }

        debug!(entrees = self.journal.len(), "évaluation");

        let instantane = self.journal.instantane();
        let mut passe = Passe::new(&self.format);
        // entrées de l’instantané déjà retirées du journal vivant par un effacement
        let mut decalage = 0;

        for (index, entree) in instantane.iter().enumerate() {
            let position = index - decalage;
            trace!(position, ?entree, "entrée");

            match entree {
                Entree::Supprimee => {
                    self.journal.retirer_paire(position);
                    return passe.terminer();
                }
                Entree::Variable(nom) => {
                    let valeur = self.variables.get(nom).copied().unwrap_or(0.0);
                    passe.affecter(valeur, nom);
                }
                Entree::Tirage { symbole, valeur } => passe.affecter(*valeur, symbole),
                Entree::Nombre(valeur) => {
                    let texte = self.format.formater(*valeur);
                    passe.affecter(*valeur, &texte);
                }
                Entree::Operation(symbole) => {
                    let Some(operation) = self.operations.get(symbole) else {
                        trace!(symbole = %symbole, "opcode inconnu: ignoré");
                        continue;
                    };

                    match operation {
                        Operation::Annuler => {
                            if position > 0 {
                                self.journal.marquer_annulation(position);
                            } else {
                                self.journal.vider();
                                return passe.terminer();
                            }
                        }
                        Operation::Aleatoire => {
                            let tirage: f64 = self.alea.gen();
                            self.journal.figer_tirage(position, tirage);
                            passe.affecter(tirage, symbole);
                        }
                        Operation::Constante(valeur) => passe.affecter(valeur, symbole),
                        Operation::Unaire(fonction) => {
                            let precedente = position
                                .checked_sub(1)
                                .and_then(|p| self.journal.get(p))
                                .and_then(|e| rendu_entree(e, &self.format));
                            if precedente.is_none() && passe.en_attente && passe.profondeur == 0 {
                                warn!(symbole = %symbole, "entrée précédente déjà marquée");
                            }
                            passe.appliquer_unaire(fonction, symbole, precedente);
                        }
                        Operation::Binaire {
                            fonction,
                            parenthese_gauche,
                        } => passe.appliquer_binaire(fonction, symbole, parenthese_gauche),
                        Operation::Egal => passe.egal(),
                        Operation::EffacerHistorique => {
                            passe = Passe::new(&self.format);
                            self.variables.clear();
                            self.journal.retirer_jusqua(position);
                            decalage = index + 1;
                        }
                    }
                }
            }
        }

        passe.terminer()
    }

    /* ------------------------ Accès directs (une évaluation chacun) ------------------------ */

    pub fn resultat(&mut self) -> Option<f64> {
        self.evaluate(None).resultat
    }

    pub fn historique(&mut self) -> String {
        self.evaluate(None).description
    }

    /// "..." pendant une opération en attente, sinon None.
    pub fn marqueur_attente(&mut self) -> Option<&'static str> {
        self.evaluate(None).en_attente.then_some("...")
    }
}
