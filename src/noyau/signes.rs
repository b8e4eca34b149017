// src/noyau/signes.rs
//
// Normalisation des moins unaires (avant tokenisation).
//
// Un '-' est unaire s'il suit : le début, '(' ou un caractère opérateur.
// - début + nombre        : "-2*3"   -> "(0-2)*3"
// - début ou '(' sinon    : "-(1+1)" -> "0-(1+1)",  "(-2)+1" -> "(0-2)+1"
// - après un opérateur    : "3*-2"   -> "3*(0-2)"   (l'opérande est enveloppé)
// - en chaîne             : "--1"    -> "0-(0-1)"
//
// Après ce passage, jetons.rs et pile.rs n'ont plus de moins unaire à traiter.
// Le texte reçu est déjà sans espaces.

use log::trace;

use super::erreur::ErreurCalcul;

/// Caractères opérateurs (même classe que dans jetons.rs).
pub const CARACTERES_SYMBOLES: &str = "+-*/^%&|<>~";

pub fn est_symbole(c: char) -> bool {
    CARACTERES_SYMBOLES.contains(c)
}

/// Ce qui précède le début de la tranche en cours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Contexte {
    /// Début de l'expression.
    Debut,
    /// Opérande d'un moins unaire : comme après un opérateur.
    Operande,
}

/// Réécrit chaque moins unaire en soustraction binaire depuis 0.
pub fn normaliser(exp: &str, profondeur_max: usize) -> Result<String, ErreurCalcul> {
    let chars: Vec<char> = exp.chars().collect();
    let mut out = String::with_capacity(exp.len() + 8);

    normaliser_tranche(&chars, Contexte::Debut, 0, profondeur_max, &mut out)?;

    trace!("normalisée : {exp} -> {out}");
    Ok(out)
}

fn normaliser_tranche(
    src: &[char],
    contexte: Contexte,
    profondeur: usize,
    profondeur_max: usize,
    out: &mut String,
) -> Result<(), ErreurCalcul> {
    if profondeur > profondeur_max {
        return Err(ErreurCalcul::ImbricationTropProfonde(profondeur_max));
    }

    let mut i = 0;
    while i < src.len() {
        let c = src[i];
        if c != '-' {
            out.push(c);
            i += 1;
            continue;
        }

        let apres_operateur = match i.checked_sub(1).map(|p| src[p]) {
            None => contexte == Contexte::Operande,
            Some(p) if est_symbole(p) => true,
            Some('(') => false,
            // moins binaire : inchangé
            Some(_) => {
                out.push('-');
                i += 1;
                continue;
            }
        };

        if apres_operateur {
            // "(0-" opérande ")" ; sans opérande, on laisse le '-' tel quel
            match fin_operande(src, i + 1) {
                Some(fin) => {
                    out.push_str("(0-");
                    normaliser_tranche(
                        &src[i + 1..fin],
                        Contexte::Operande,
                        profondeur + 1,
                        profondeur_max,
                        out,
                    )?;
                    out.push(')');
                    i = fin;
                }
                None => {
                    out.push('-');
                    i += 1;
                }
            }
            continue;
        }

        // début de l'expression ou juste après '('
        let fin = fin_nombre(src, i + 1);
        if i == 0 && fin > i + 1 {
            out.push_str("(0-");
            out.extend(&src[i + 1..fin]);
            out.push(')');
            i = fin;
        } else {
            out.push_str("0-");
            i += 1;
        }
    }

    Ok(())
}

/* ------------------------ Étendue d'un opérande ------------------------ */

fn fin_nombre(src: &[char], mut i: usize) -> usize {
    while i < src.len() && (src[i].is_ascii_digit() || src[i] == '.') {
        i += 1;
    }
    i
}

/// Index après la ')' appariée ; fin du texte si elle manque
/// (le déséquilibre est signalé par la tokenisation).
fn fin_groupe(src: &[char], ouvrante: usize) -> usize {
    let mut niveau = 0usize;
    for (j, &c) in src.iter().enumerate().skip(ouvrante) {
        match c {
            '(' => niveau += 1,
            ')' => {
                niveau -= 1;
                if niveau == 0 {
                    return j + 1;
                }
            }
            _ => {}
        }
    }
    src.len()
}

/// Fin de l'opérande qui commence en `i` : nombre, groupe, identifiant
/// (avec son appel), précédé d'éventuels '-' / '~' unaires.
fn fin_operande(src: &[char], i: usize) -> Option<usize> {
    let mut j = i;
    while j < src.len() && matches!(src[j], '-' | '~') {
        j += 1;
    }

    let c = *src.get(j)?;
    if c.is_ascii_digit() || c == '.' {
        return Some(fin_nombre(src, j));
    }
    if c == '(' {
        return Some(fin_groupe(src, j));
    }
    if c.is_ascii_alphabetic() || c == '_' {
        let mut k = j;
        while k < src.len() && (src[k].is_ascii_alphanumeric() || src[k] == '_') {
            k += 1;
        }
        if src.get(k) == Some(&'(') {
            return Some(fin_groupe(src, k));
        }
        return Some(k);
    }
    None
}
