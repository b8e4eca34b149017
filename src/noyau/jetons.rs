// src/noyau/jetons.rs
//
// Tokenisation en "blocs" (découpage lexical).
//
// Un bloc = une plage [debut, fin) d'octets dans l'expression normalisée,
// avec son genre, son niveau de parenthèses et (symboles) son rang de priorité.
//
// Règles de découpage (un seul passage, gauche -> droite):
// - classes : lettre/_ (identifiant), chiffre/. (nombre), '(' , ')', symbole, inconnu
// - nouveau bloc si : le bloc précédent est une parenthèse, la classe change,
//   fin du texte, ou le caractère est '~' (jamais collé aux autres symboles)
// - PAS de coupure identifiant -> chiffres ("a1" reste un seul bloc)
// - niveau : +1 avant de pousser un bloc '(' ; -1 après avoir poussé un bloc ')'

use log::trace;

use super::erreur::ErreurCalcul;
use super::signes::est_symbole;
use super::symboles::{Sorte, TableSymboles};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenreBloc {
    Nombre,
    Symbole,
    Fonction,
    Constante,
    ParOuvrante,
    ParFermante,
    /// Caractère hors alphabet : rejeté à l'évaluation.
    Inconnu,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bloc {
    pub debut: usize,
    pub fin: usize,
    pub niveau: usize,
    pub genre: GenreBloc,
    /// Rang (0 = lie le plus fort). None : pas un symbole, ou symbole inconnu.
    pub priorite: Option<u8>,
}

impl Bloc {
    pub fn texte<'a>(&self, exp: &'a str) -> &'a str {
        &exp[self.debut..self.fin]
    }
}

/// Table des priorités (0 = la plus forte).
const PRIORITES: [&[&str]; 8] = [
    &["**"],
    &["~"],
    &["*", "/", "//", "%"],
    &["+", "-"],
    &["<<", ">>"],
    &["&"],
    &["^"],
    &["|"],
];

pub fn priorite(symbole: &str) -> Option<u8> {
    PRIORITES
        .iter()
        .position(|rang| rang.contains(&symbole))
        .map(|r| r as u8)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Classe {
    Identifiant,
    Nombre,
    ParOuvrante,
    ParFermante,
    Symbole,
    Inconnu,
}

fn classe_de(c: char) -> Classe {
    if c == '_' || c.is_ascii_alphabetic() {
        Classe::Identifiant
    } else if c == '.' || c.is_ascii_digit() {
        Classe::Nombre
    } else if c == '(' {
        Classe::ParOuvrante
    } else if c == ')' {
        Classe::ParFermante
    } else if est_symbole(c) {
        Classe::Symbole
    } else {
        Classe::Inconnu
    }
}

/// Identifiant -> fonction / constante, sinon erreur.
fn genre_identifiant(nom: &str, table: &TableSymboles) -> Result<GenreBloc, ErreurCalcul> {
    match table.sorte(nom) {
        Some(Sorte::Fonction) => Ok(GenreBloc::Fonction),
        Some(Sorte::Constante) => Ok(GenreBloc::Constante),
        None => Err(ErreurCalcul::IdentifiantInconnu(nom.to_string())),
    }
}

/// Découpe l'expression normalisée (sans espaces) en blocs.
pub fn grouper(
    exp: &str,
    table: &TableSymboles,
    profondeur_max: usize,
) -> Result<Vec<Bloc>, ErreurCalcul> {
    let mut blocs: Vec<Bloc> = Vec::new();
    let mut debut = 0usize;
    let mut niveau = 0usize;
    let mut derniere: Option<Classe> = None;

    let mut car = exp.char_indices().map(|(p, c)| (p, Some(c)));

    loop {
        // sentinelle de fin : (len, None)
        let (pos, c) = car.next().unwrap_or((exp.len(), None));
        let classe = c.map(classe_de);

        let mut nouveau = matches!(derniere, Some(Classe::ParOuvrante | Classe::ParFermante))
            || classe != derniere
            || c.is_none()
            || c == Some('~');
        // "a1" : l'identifiant garde ses chiffres
        if classe == Some(Classe::Nombre) && derniere == Some(Classe::Identifiant) {
            nouveau = false;
        }

        if nouveau {
            if let Some(classe_bloc) = derniere {
                let texte = &exp[debut..pos];
                let genre = match classe_bloc {
                    Classe::Identifiant => genre_identifiant(texte, table)?,
                    Classe::Nombre => GenreBloc::Nombre,
                    Classe::ParOuvrante => GenreBloc::ParOuvrante,
                    Classe::ParFermante => GenreBloc::ParFermante,
                    Classe::Symbole => GenreBloc::Symbole,
                    Classe::Inconnu => GenreBloc::Inconnu,
                };
                let bloc = Bloc {
                    debut,
                    fin: pos,
                    niveau,
                    genre,
                    priorite: if genre == GenreBloc::Symbole {
                        priorite(texte)
                    } else {
                        None
                    },
                };
                trace!("bloc {texte:?} {genre:?} niveau {niveau}");
                blocs.push(bloc);

                if classe_bloc == Classe::ParFermante {
                    niveau = niveau
                        .checked_sub(1)
                        .ok_or(ErreurCalcul::ParenthesesDesequilibrees)?;
                }
            }
            derniere = classe;
            debut = pos;
        }

        if classe == Some(Classe::ParOuvrante) {
            niveau += 1;
            if niveau > profondeur_max {
                return Err(ErreurCalcul::ImbricationTropProfonde(profondeur_max));
            }
        }

        if c.is_none() {
            break;
        }
    }

    if niveau != 0 {
        return Err(ErreurCalcul::ParenthesesDesequilibrees);
    }

    Ok(blocs)
}

/// Format utilitaire ("démarche") : blocs en texte, rang des symboles entre crochets.
pub fn format_blocs(exp: &str, blocs: &[Bloc]) -> String {
    let mut out = Vec::with_capacity(blocs.len());
    for b in blocs {
        let t = b.texte(exp);
        let s = match (b.genre, b.priorite) {
            (GenreBloc::Symbole, Some(r)) => format!("{t}[{r}]"),
            (GenreBloc::Symbole, None) => format!("{t}[?]"),
            _ => t.to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
