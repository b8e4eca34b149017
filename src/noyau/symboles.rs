// src/noyau/symboles.rs
//
// Tables de symboles (par instance de solveur, jamais globales).
// - liaisons  : nom -> valeur (constantes prédéfinies + constantes utilisateur)
// - fonctions : nom -> fn(f64) -> f64 (unaires, fixes)
//
// Ordre d'insertion conservé (Vec) : les tables sont petites.

use super::valeur::Valeur;

/// Nom lié à une valeur. `None` : existe mais pas encore défini (ex. `ans`).
#[derive(Clone, Debug)]
pub struct Liaison {
    pub nom: String,
    pub valeur: Option<Valeur>,
}

#[derive(Clone, Debug)]
pub struct Fonction {
    pub nom: &'static str,
    pub f: fn(f64) -> f64,
}

/// Ce qu'un identifiant désigne.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sorte {
    Fonction,
    Constante,
}

/// Nom du dernier résultat.
pub const NOM_ANS: &str = "ans";

const FONCTIONS: [Fonction; 11] = [
    Fonction { nom: "sin", f: f64::sin },
    Fonction { nom: "cos", f: f64::cos },
    Fonction { nom: "tan", f: f64::tan },
    Fonction { nom: "exp", f: f64::exp },
    Fonction { nom: "sqrt", f: f64::sqrt },
    Fonction { nom: "floor", f: f64::floor },
    Fonction { nom: "ceil", f: f64::ceil },
    Fonction { nom: "round", f: f64::round },
    Fonction { nom: "ln", f: f64::ln },
    Fonction { nom: "log", f: f64::log10 },
    Fonction { nom: "abs", f: f64::abs },
];

#[derive(Clone, Debug)]
pub struct TableSymboles {
    liaisons: Vec<Liaison>,
    fonctions: Vec<Fonction>,
}

impl Default for TableSymboles {
    fn default() -> Self {
        Self::new()
    }
}

impl TableSymboles {
    /// Table avec les prédéfinis : e, pi, ans (vide) + 11 fonctions.
    pub fn new() -> Self {
        let liaisons = vec![
            Liaison {
                nom: "e".into(),
                valeur: Some(Valeur::Decimale(std::f64::consts::E)),
            },
            Liaison {
                nom: "pi".into(),
                valeur: Some(Valeur::Decimale(std::f64::consts::PI)),
            },
            Liaison {
                nom: NOM_ANS.into(),
                valeur: None,
            },
        ];

        Self {
            liaisons,
            fonctions: FONCTIONS.to_vec(),
        }
    }

    /// Fonctions d'abord, puis liaisons.
    pub fn sorte(&self, nom: &str) -> Option<Sorte> {
        if self.fonction(nom).is_some() {
            return Some(Sorte::Fonction);
        }
        if self.liaison(nom).is_some() {
            return Some(Sorte::Constante);
        }
        None
    }

    pub fn fonction(&self, nom: &str) -> Option<&Fonction> {
        self.fonctions.iter().find(|f| f.nom == nom)
    }

    pub fn liaison(&self, nom: &str) -> Option<&Liaison> {
        self.liaisons.iter().find(|l| l.nom == nom)
    }

    /// Écrase la valeur si le nom existe, sinon ajoute en fin de table.
    pub fn lier(&mut self, nom: &str, valeur: Valeur) {
        match self.liaisons.iter_mut().find(|l| l.nom == nom) {
            Some(l) => l.valeur = Some(valeur),
            None => self.liaisons.push(Liaison {
                nom: nom.to_string(),
                valeur: Some(valeur),
            }),
        }
    }

    pub fn liaisons(&self) -> &[Liaison] {
        &self.liaisons
    }

    pub fn fonctions(&self) -> &[Fonction] {
        &self.fonctions
    }
}
