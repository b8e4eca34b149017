// src/noyau/pile.rs
//
// Évaluation à deux piles (valeurs + opérateurs en attente), de DROITE à GAUCHE.
//
// Règles:
// - Nombre / Constante : empilés.
// - ')' : on cherche la '(' appariée, on évalue l'intérieur (récursion, bornée),
//         puis on applique la fonction qui précède la '(' s'il y en a une.
// - Symbole : tant que l'opérateur en haut de pile lie STRICTEMENT plus fort,
//             on le dépile et on l'applique ; puis on empile le symbole.
//   Application : v1 = sommet (opérande gauche), v2 = suivant (opérande droite),
//   résultat = v1 OP v2 ; '~' ne prend qu'une valeur.
// - Fin : on vide la pile d'opérateurs. Succès <=> exactement une valeur.
//
// NOTE: à rang égal, le vidage se fait de gauche à droite (2**3**2 = 64).
// La récursion n'existe que pour les parenthèses ; les opérateurs binaires
// passent uniquement par les piles.

use log::debug;

use super::erreur::ErreurCalcul;
use super::jetons::{Bloc, GenreBloc};
use super::symboles::TableSymboles;
use super::valeur::Valeur;

/// Rang d'un symbole inconnu : ne lie jamais plus fort qu'un autre.
const RANG_INCONNU: u8 = u8::MAX;

fn rang(bloc: &Bloc) -> u8 {
    bloc.priorite.unwrap_or(RANG_INCONNU)
}

/// Tout ce qu'une évaluation lit (rien n'est modifié).
pub struct Evaluation<'a> {
    pub exp: &'a str,
    pub blocs: &'a [Bloc],
    pub table: &'a TableSymboles,
    pub profondeur_max: usize,
}

impl Evaluation<'_> {
    /// Évalue toute l'expression.
    pub fn evaluer(&self) -> Result<Valeur, ErreurCalcul> {
        self.calculer(0, self.blocs.len(), 0)
    }

    /// Évalue les blocs [debut, fin).
    fn calculer(&self, debut: usize, fin: usize, profondeur: usize) -> Result<Valeur, ErreurCalcul> {
        if profondeur > self.profondeur_max {
            return Err(ErreurCalcul::ImbricationTropProfonde(self.profondeur_max));
        }

        let mut valeurs: Vec<Valeur> = Vec::new();
        let mut ops: Vec<Bloc> = Vec::new();

        let mut i = fin;
        while i > debut {
            i -= 1;
            let bloc = self.blocs[i];
            let texte = bloc.texte(self.exp);

            match bloc.genre {
                GenreBloc::Nombre => valeurs.push(Valeur::lire(texte)?),

                // une fonction suivie de '(' est consommée avec sa parenthèse
                GenreBloc::Fonction => {
                    return Err(ErreurCalcul::ParenthesesManquantes(texte.to_string()))
                }

                GenreBloc::Constante => {
                    let liaison = self
                        .table
                        .liaison(texte)
                        .ok_or_else(|| ErreurCalcul::IdentifiantInconnu(texte.to_string()))?;
                    let v = liaison
                        .valeur
                        .ok_or_else(|| ErreurCalcul::ReferenceIndefinie(texte.to_string()))?;
                    valeurs.push(v);
                }

                GenreBloc::ParFermante => {
                    let ouvrante = self.trouver_ouvrante(debut, i)?;
                    let interieur = self.calculer(ouvrante + 1, i, profondeur + 1)?;

                    let fonction = ouvrante
                        .checked_sub(1)
                        .filter(|&k| k >= debut && self.blocs[k].genre == GenreBloc::Fonction);

                    match fonction {
                        Some(k) => {
                            let nom = self.blocs[k].texte(self.exp);
                            valeurs.push(self.appeler(nom, interieur)?);
                            i = k;
                        }
                        None => {
                            valeurs.push(interieur);
                            i = ouvrante;
                        }
                    }
                }

                GenreBloc::Symbole => {
                    let r = rang(&bloc);
                    while let Some(&haut) = ops.last() {
                        if rang(&haut) >= r {
                            break;
                        }
                        ops.pop();
                        self.appliquer(&haut, &mut valeurs)?;
                    }
                    ops.push(bloc);
                }

                GenreBloc::ParOuvrante | GenreBloc::Inconnu => {
                    return Err(ErreurCalcul::JetonInattendu(texte.to_string()))
                }
            }
        }

        // opérateurs restants
        while let Some(op) = ops.pop() {
            self.appliquer(&op, &mut valeurs)?;
        }

        match (valeurs.pop(), valeurs.is_empty()) {
            (Some(v), true) => Ok(v),
            _ => Err(ErreurCalcul::ExpressionMalformee),
        }
    }

    /// Dépile le(s) opérande(s) et empile le résultat.
    fn appliquer(&self, op: &Bloc, valeurs: &mut Vec<Valeur>) -> Result<(), ErreurCalcul> {
        let symbole = op.texte(self.exp);
        let v1 = valeurs.pop().ok_or(ErreurCalcul::ExpressionMalformee)?;

        let res = if symbole == "~" {
            v1.non_binaire()?
        } else {
            let v2 = valeurs.pop().ok_or(ErreurCalcul::ExpressionMalformee)?;
            v1.operer(symbole, v2)?
        };

        valeurs.push(res);
        Ok(())
    }

    /// Fonction native unaire, avec contrôle de domaine.
    fn appeler(&self, nom: &str, argument: Valeur) -> Result<Valeur, ErreurCalcul> {
        let fonction = self
            .table
            .fonction(nom)
            .ok_or_else(|| ErreurCalcul::IdentifiantInconnu(nom.to_string()))?;

        let x = argument.en_f64();
        if nom == "sqrt" && x < 0.0 {
            return Err(ErreurCalcul::RacineNegative);
        }

        let y = (fonction.f)(x);
        debug!("{nom}({x}) = {y}");

        Valeur::depuis_f64(y).map_err(|e| match e {
            ErreurCalcul::HorsDomaine(_) => ErreurCalcul::HorsDomaine(format!("{nom}({x})")),
            autre => autre,
        })
    }

    /// '(' appariée : la plus proche à gauche, au même niveau, dans [debut, fermante).
    fn trouver_ouvrante(&self, debut: usize, fermante: usize) -> Result<usize, ErreurCalcul> {
        let niveau = self.blocs[fermante].niveau;
        (debut..fermante)
            .rev()
            .find(|&k| {
                let b = &self.blocs[k];
                b.genre == GenreBloc::ParOuvrante && b.niveau == niveau
            })
            .ok_or(ErreurCalcul::ExpressionMalformee)
    }
}
