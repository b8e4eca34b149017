// src/noyau/lecture.rs
//
// Lecture d'un littéral numérique non signé ("12", "3.14", ".5", "2.").
// Le signe est traité en amont (normalisation des moins unaires).
//
// Le littéral est d'abord lu EXACTEMENT (BigRational), puis rétréci en Ratio<i64>
// si possible ; sinon on retombe sur un f64.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};

use super::erreur::ErreurCalcul;
use super::valeur::Valeur;

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Chiffres décimaux -> BigInt (chaîne vide => 0).
fn lire_chiffres(s: &str) -> Result<BigInt, ErreurCalcul> {
    if s.is_empty() {
        return Ok(BigInt::zero());
    }
    BigInt::parse_bytes(s.as_bytes(), 10).ok_or_else(|| ErreurCalcul::ErreurLecture(s.into()))
}

/// Rétrécit un rationnel exact en (i64, i64) s'il tient.
fn retrecir(r: &BigRational) -> Option<(i64, i64)> {
    Some((r.numer().to_i64()?, r.denom().to_i64()?))
}

impl Valeur {
    /// Lit un littéral décimal non signé.
    ///
    /// - pas de '.' : entier exact, dépassement i64 => NombreTropGrand
    /// - avec '.'   : fraction exacte si elle tient en i64/i64, sinon f64
    pub fn lire(texte: &str) -> Result<Valeur, ErreurCalcul> {
        let valide = texte.chars().all(|c| c.is_ascii_digit() || c == '.');
        if !valide || !texte.chars().any(|c| c.is_ascii_digit()) {
            return Err(ErreurCalcul::ErreurLecture(texte.into()));
        }

        let (gauche, droite) = match texte.split_once('.') {
            None => (texte, ""),
            Some((_, d)) if d.contains('.') => {
                return Err(ErreurCalcul::ErreurLecture(format!(
                    "plus d'un '.' dans {texte}"
                )))
            }
            Some((g, d)) => (g, d),
        };

        let partie_entiere = lire_chiffres(gauche)?;
        if partie_entiere.to_i64().is_none() {
            return Err(ErreurCalcul::NombreTropGrand);
        }

        // zéros finaux de la partie fractionnaire : sans effet
        let droite = droite.trim_end_matches('0');
        if droite.is_empty() {
            return partie_entiere
                .to_i64()
                .map(Valeur::entier)
                .ok_or(ErreurCalcul::NombreTropGrand);
        }

        let echelle = pow10(droite.len());
        let numer = partie_entiere * &echelle + lire_chiffres(droite)?;
        let exact = BigRational::new(numer, echelle);

        match retrecir(&exact) {
            Some((n, d)) => Valeur::fraction(n, d),
            None => texte
                .parse::<f64>()
                .map_err(|e| ErreurCalcul::ErreurLecture(format!("{texte} ({e})")))
                .and_then(Valeur::depuis_f64),
        }
    }
}
