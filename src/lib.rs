// src/lib.rs
//
// Calculatrice d'expressions - bibliothèque (noyau seul, sans interface).
// Le binaire (src/main.rs) ajoute l'interface egui native + web.

pub mod noyau;

pub use noyau::{ErreurCalcul, Reglages, Solveur, Valeur};
