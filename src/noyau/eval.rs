//! Noyau - façade (pipeline réel)
//!
//! texte -> sans espaces -> signes (moins unaires) -> blocs -> pile (droite -> gauche)
//!
//! Le solveur garde la dernière expression réussie (texte normalisé + blocs)
//! pour `resolve()`, et le dernier diagnostic pour `error_message()`.

use log::debug;

use super::erreur::ErreurCalcul;
use super::jetons::{self, grouper, Bloc};
use super::pile::Evaluation;
use super::signes::normaliser;
use super::symboles::{TableSymboles, NOM_ANS};
use super::valeur::Valeur;

/* ------------------------ Réglages ------------------------ */

/// Profondeur d'imbrication par défaut (parenthèses, moins unaires en chaîne).
pub const PROFONDEUR_DEFAUT: usize = 64;
/// Borne haute acceptée par `Reglages::avec_profondeur`.
pub const PROFONDEUR_MAX: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reglages {
    pub profondeur_max: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            profondeur_max: PROFONDEUR_DEFAUT,
        }
    }
}

impl Reglages {
    /// Clamp 1..=PROFONDEUR_MAX.
    pub fn avec_profondeur(n: usize) -> Self {
        Self {
            profondeur_max: n.clamp(1, PROFONDEUR_MAX),
        }
    }
}

/* ------------------------ Solveur ------------------------ */

#[derive(Clone, Debug)]
struct Memoire {
    normalisee: String,
    blocs: Vec<Bloc>,
}

#[derive(Clone, Debug, Default)]
pub struct Solveur {
    table: TableSymboles,
    reglages: Reglages,
    derniere: Option<Memoire>,
    erreurs: String,
}

impl Solveur {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn avec_reglages(reglages: Reglages) -> Self {
        Self {
            reglages,
            ..Self::default()
        }
    }

    pub fn reglages(&self) -> Reglages {
        self.reglages
    }

    /// Liaisons conservées ; l'expression mémorisée aussi (ses blocs restent valides).
    pub fn set_reglages(&mut self, reglages: Reglages) {
        self.reglages = reglages;
    }

    pub fn table(&self) -> &TableSymboles {
        &self.table
    }

    /// Évalue un texte. Succès : mémorise l'expression et lie `ans`.
    /// Échec : oublie l'expression mémorisée.
    pub fn solve(&mut self, expression: &str) -> Result<Valeur, ErreurCalcul> {
        self.erreurs.clear();

        match self.preparer_et_calculer(expression) {
            Ok((memoire, v)) => {
                debug!("solve {expression:?} = {v}");
                self.derniere = Some(memoire);
                self.table.lier(NOM_ANS, v);
                Ok(v)
            }
            Err(e) => {
                debug!("solve {expression:?} : {e}");
                self.derniere = None;
                self.noter(&e);
                Err(e)
            }
        }
    }

    /// Ré-évalue la dernière expression avec les liaisons actuelles.
    /// Ne touche pas `ans` : deux appels successifs donnent le même résultat.
    pub fn resolve(&mut self) -> Result<Valeur, ErreurCalcul> {
        self.erreurs.clear();

        let res = match &self.derniere {
            None => Err(ErreurCalcul::AucuneExpression),
            Some(m) => Evaluation {
                exp: &m.normalisee,
                blocs: &m.blocs,
                table: &self.table,
                profondeur_max: self.reglages.profondeur_max,
            }
            .evaluer(),
        };

        match &res {
            Ok(v) => debug!("resolve = {v}"),
            Err(e) => {
                debug!("resolve : {e}");
                self.noter(e);
            }
        }
        res
    }

    /// Lie (ou écrase) une constante. Le nom doit être un identifiant
    /// qui ne désigne pas une fonction ; la valeur est remise sous forme
    /// canonique (fraction réduite, flottant fini, flottant entier -> exact).
    pub fn define_constant(&mut self, nom: &str, valeur: Valeur) -> Result<(), ErreurCalcul> {
        let res = if !est_identifiant(nom) || self.table.fonction(nom).is_some() {
            Err(ErreurCalcul::NomInvalide(nom.to_string()))
        } else {
            canonique(valeur)
        };

        match res {
            Ok(v) => {
                debug!("constante {nom} = {v}");
                self.table.lier(nom, v);
                Ok(())
            }
            Err(e) => {
                debug!("constante {nom} refusée : {e}");
                self.noter(&e);
                Err(e)
            }
        }
    }

    /// Dernier diagnostic ("" si le dernier calcul a réussi).
    pub fn error_message(&self) -> &str {
        &self.erreurs
    }

    /* ---------- Démarche ---------- */

    pub fn expression_normalisee(&self) -> Option<&str> {
        self.derniere.as_ref().map(|m| m.normalisee.as_str())
    }

    pub fn blocs(&self) -> &[Bloc] {
        self.derniere
            .as_ref()
            .map(|m| m.blocs.as_slice())
            .unwrap_or(&[])
    }

    pub fn format_blocs(&self) -> String {
        self.derniere
            .as_ref()
            .map(|m| jetons::format_blocs(&m.normalisee, &m.blocs))
            .unwrap_or_default()
    }

    /* ---------- interne ---------- */

    fn preparer_et_calculer(&self, expression: &str) -> Result<(Memoire, Valeur), ErreurCalcul> {
        let brut: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
        if brut.is_empty() {
            return Err(ErreurCalcul::ExpressionVide);
        }

        let max = self.reglages.profondeur_max;
        let normalisee = normaliser(&brut, max)?;
        let blocs = grouper(&normalisee, &self.table, max)?;

        let v = Evaluation {
            exp: &normalisee,
            blocs: &blocs,
            table: &self.table,
            profondeur_max: max,
        }
        .evaluer()?;

        Ok((Memoire { normalisee, blocs }, v))
    }

    fn noter(&mut self, e: &ErreurCalcul) {
        self.erreurs = format!("Calcul interrompu : {e}");
    }
}

/// Les variantes de `Valeur` sont publiques : on repasse par les constructeurs.
fn canonique(valeur: Valeur) -> Result<Valeur, ErreurCalcul> {
    match valeur {
        Valeur::Exacte(r) => Valeur::fraction(*r.numer(), *r.denom()),
        Valeur::Decimale(v) => Valeur::depuis_f64(v),
    }
}

/// [A-Za-z_][A-Za-z0-9_]*
fn est_identifiant(nom: &str) -> bool {
    let mut car = nom.chars();
    match car.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    car.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
