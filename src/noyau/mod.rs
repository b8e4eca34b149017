//! Noyau d'évaluation
//!
//! Organisation interne :
//! - erreur.rs   : ErreurCalcul (une variante par échec)
//! - valeur.rs   : Valeur hybride (rationnel exact / f64) + opérateurs
//! - lecture.rs  : lecture exacte des littéraux décimaux
//! - format.rs   : affichage (entier, décimal le plus court, "p/q")
//! - symboles.rs : constantes (e, pi, ans, utilisateur) + fonctions unaires
//! - signes.rs   : moins unaires -> soustractions depuis 0
//! - jetons.rs   : découpage en blocs (niveau, priorité)
//! - pile.rs     : évaluation à deux piles, de droite à gauche
//! - eval.rs     : façade Solveur (solve / resolve / constantes) + Reglages

pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod lecture;
pub mod pile;
pub mod signes;
pub mod symboles;
pub mod valeur;

#[cfg(test)]
mod tests_scientifiques;


// API publique minimale
pub use erreur::ErreurCalcul;
pub use eval::{Reglages, Solveur};
pub use valeur::Valeur;
