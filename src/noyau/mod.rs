//! Noyau de la calculatrice à pile
//!
//! Organisation interne :
//! - operations.rs : table symbole -> opération (constante, RND, unaire, binaire, =, ∁, Undo)
//! - journal.rs    : journal des entrées + marques d’annulation
//! - format.rs     : rendu borné des nombres + comptage de caractères (historique)
//! - erreurs.rs    : NaN / infini
//! - eval.rs       : moteur + réduction complète du journal

pub mod erreurs;
pub mod eval;
pub mod format;
pub mod journal;
pub mod operations;


#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreurs::ErreurNumerique;
pub use eval::{Calculatrice, Evaluation};
pub use format::FormatNombre;
