//! Calculatrice à pile : moteur de réduction (`noyau`) + façade egui (`app`).
//!
//! Le noyau ne dépend pas de l’UI : journal d’entrées, variables, table
//! d’opérations, réduction gauche-droite avec un opérateur en attente.

pub mod app;
pub mod noyau;
