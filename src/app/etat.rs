//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l'état de la calculatrice (entrée, résultat, erreur, démarche,
//! constantes en cours de saisie) et le solveur qui porte les liaisons.
//! Offre des opérations simples (C/CLR/AC) sans logique d'affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (solve/resolve sont appelés par vue.rs).
//! - Actions déterministes, sans effet de bord caché.
//! - La profondeur d'imbrication est bornée par `Reglages`.

use calculatrice_expr::noyau::eval::{Reglages, PROFONDEUR_DEFAUT};
use calculatrice_expr::{Solveur, Valeur};

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub normalisee: String,
    pub blocs: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- moteur (porte les constantes et `ans`) ---
    pub solveur: Solveur,

    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String, // affichage principal
    pub exact: String,    // forme p/q si rationnel
    pub erreur: String,   // message d'erreur (si l'évaluation échoue)

    // --- démarche (panneau d'explication) ---
    pub demarche: Demarche,

    // --- constantes (saisie) ---
    pub nom_constante: String,
    pub valeur_constante: String,

    // --- paramètres ---
    pub profondeur: usize,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l'entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            solveur: Solveur::new(),
            entree: String::new(),
            resultat: String::new(),
            exact: String::new(),
            erreur: String::new(),
            demarche: Demarche::default(),
            nom_constante: String::new(),
            valeur_constante: String::new(),
            profondeur: PROFONDEUR_DEFAUT,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions "boutons" (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + constantes + `ans`).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.nom_constante.clear();
        self.valeur_constante.clear();
        self.profondeur = PROFONDEUR_DEFAUT;
        self.solveur = Solveur::new();
        self.focus_entree = true;
    }

    /// C : effacer seulement l'entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    fn clear_demarche(&mut self) {
        self.demarche = Demarche::default();
    }

    /// CLR : effacer résultats + erreur + démarche (sans toucher à l'entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.exact.clear();
        self.erreur.clear();
        self.clear_demarche();
        self.focus_entree = true;
    }

    /// Utilitaire : placer une erreur.
    ///
    /// On CONSERVE le dernier résultat affiché ; la démarche est effacée.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.clear_demarche();
        self.focus_entree = true;
    }

    /// Utilitaire : déposer un résultat complet (valeur + démarche).
    pub fn set_resultat(&mut self, v: Valeur, demarche: Demarche) {
        self.erreur.clear();
        self.resultat = v.to_display_string();
        self.exact = v.en_fraction();
        self.demarche = demarche;
        self.focus_entree = true;
    }

    /// Garde-fou : borne la profondeur (les constantes sont conservées).
    pub fn set_profondeur(&mut self, profondeur: usize) {
        let reglages = Reglages::avec_profondeur(profondeur);
        self.profondeur = reglages.profondeur_max;
        self.solveur.set_reglages(reglages);
        self.focus_entree = true;
    }
}
