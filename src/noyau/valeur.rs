// src/noyau/valeur.rs
//
// Valeur numérique hybride : rationnel exact (i64/i64) ou décimal (f64).
//
// Règles:
// - Exacte : toujours réduite, dénominateur > 0.
// - Decimale : toujours finie (NaN / ∞ refusés à la construction).
// - Chaque opérateur choisit sa politique :
//     + - * /      -> exact si les deux sont exacts, sinon f64
//     //           -> quotient f64 puis plancher
//     % << >> & ^ | ~ -> entiers seulement (i64)
//     **           -> exact si base exacte et exposant entier, sinon powf
// - Un dépassement i64 en exact bascule en f64 (pas d'erreur).
//
// NOTE: une valeur "non calculable" n'existe pas ici : c'est un Err(ErreurCalcul).

use log::debug;
use num_rational::Ratio;
use num_traits::{checked_pow, CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, Zero};

use super::erreur::ErreurCalcul;

/// Rationnel exact du noyau.
pub type Rationnel = Ratio<i64>;

/// Bornes de l'i64 en f64 (2^63 est exactement représentable).
const I64_MIN_F: f64 = -9_223_372_036_854_775_808.0;
const I64_FIN_F: f64 = 9_223_372_036_854_775_808.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Valeur {
    Exacte(Rationnel),
    Decimale(f64),
}

impl From<i64> for Valeur {
    fn from(n: i64) -> Self {
        Valeur::entier(n)
    }
}

impl Valeur {
    /* ------------------------ Construction ------------------------ */

    pub fn entier(n: i64) -> Valeur {
        Valeur::Exacte(Rationnel::from_integer(n))
    }

    /// n/d réduit. d = 0 => division par zéro.
    pub fn fraction(n: i64, d: i64) -> Result<Valeur, ErreurCalcul> {
        if d == 0 {
            return Err(ErreurCalcul::DivisionParZero);
        }
        // i64::MIN n'a pas d'opposé : la normalisation du signe déborderait.
        if n == i64::MIN || d == i64::MIN {
            return Valeur::depuis_f64(n as f64 / d as f64);
        }
        Ok(Valeur::Exacte(Rationnel::new(n, d)))
    }

    /// f64 -> Valeur. Un flottant entier (dans la plage i64) devient exact.
    pub fn depuis_f64(v: f64) -> Result<Valeur, ErreurCalcul> {
        if v.is_nan() {
            return Err(ErreurCalcul::HorsDomaine("résultat indéterminé".into()));
        }
        if v.is_infinite() {
            return Err(ErreurCalcul::NombreTropGrand);
        }
        if v.trunc() == v && (I64_MIN_F..I64_FIN_F).contains(&v) {
            return Ok(Valeur::entier(v as i64));
        }
        Ok(Valeur::Decimale(v))
    }

    /* ------------------------ Propriétés ------------------------ */

    pub fn is_decimal(&self) -> bool {
        matches!(self, Valeur::Decimale(_))
    }

    pub fn is_integer(&self) -> bool {
        match self {
            Valeur::Exacte(r) => r.is_integer(),
            Valeur::Decimale(v) => v.trunc() == *v,
        }
    }

    pub fn en_f64(&self) -> f64 {
        match self {
            Valeur::Exacte(r) => *r.numer() as f64 / *r.denom() as f64,
            Valeur::Decimale(v) => *v,
        }
    }

    pub fn est_nul(&self) -> bool {
        match self {
            Valeur::Exacte(r) => r.is_zero(),
            Valeur::Decimale(v) => *v == 0.0,
        }
    }

    pub fn est_negatif(&self) -> bool {
        match self {
            Valeur::Exacte(r) => *r.numer() < 0,
            Valeur::Decimale(v) => *v < 0.0,
        }
    }

    /// Entier 64 bits pour les opérateurs binaires (bits, modulo, décalages).
    fn en_i64(&self, operateur: &str) -> Result<i64, ErreurCalcul> {
        match self {
            Valeur::Exacte(r) if r.is_integer() => Ok(*r.numer()),
            Valeur::Decimale(v) if v.trunc() == *v => {
                if (I64_MIN_F..I64_FIN_F).contains(v) {
                    Ok(*v as i64)
                } else {
                    Err(ErreurCalcul::NombreTropGrand)
                }
            }
            _ => Err(ErreurCalcul::non_entier(operateur)),
        }
    }

    fn entiers(self, autre: Valeur, operateur: &str) -> Result<(i64, i64), ErreurCalcul> {
        Ok((self.en_i64(operateur)?, autre.en_i64(operateur)?))
    }

    /* ------------------------ Dispatch ------------------------ */

    /// Applique l'opérateur binaire `op` : `self op autre`.
    pub fn operer(self, op: &str, autre: Valeur) -> Result<Valeur, ErreurCalcul> {
        let res = match op {
            "**" => self.puissance(autre),
            "*" => self.fois(autre),
            "/" => self.diviser(autre),
            "//" => self.diviser_entier(autre),
            "%" => self.modulo(autre),
            "+" => self.plus(autre),
            "-" => self.moins(autre),
            "<<" => self.decaler_gauche(autre),
            ">>" => self.decaler_droite(autre),
            "&" => self.et_binaire(autre),
            "^" => self.xor_binaire(autre),
            "|" => self.ou_binaire(autre),
            _ => Err(ErreurCalcul::OperateurInvalide(op.to_string())),
        };
        debug!("{self:?} {op} {autre:?} => {res:?}");
        res
    }

    /* ------------------------ Arithmétique ------------------------ */

    /// Politique commune : exact (checked) si possible, sinon f64.
    fn arith(
        self,
        autre: Valeur,
        exact: impl FnOnce(&Rationnel, &Rationnel) -> Option<Rationnel>,
        flottant: impl FnOnce(f64, f64) -> f64,
    ) -> Result<Valeur, ErreurCalcul> {
        if let (Valeur::Exacte(a), Valeur::Exacte(b)) = (self, autre) {
            if let Some(r) = exact(&a, &b) {
                return Ok(Valeur::Exacte(r));
            }
            debug!("dépassement i64 sur {a} et {b} : bascule en f64");
        }
        Valeur::depuis_f64(flottant(self.en_f64(), autre.en_f64()))
    }

    pub fn plus(self, autre: Valeur) -> Result<Valeur, ErreurCalcul> {
        self.arith(autre, |a, b| a.checked_add(b), |a, b| a + b)
    }

    pub fn moins(self, autre: Valeur) -> Result<Valeur, ErreurCalcul> {
        self.arith(autre, |a, b| a.checked_sub(b), |a, b| a - b)
    }

    pub fn fois(self, autre: Valeur) -> Result<Valeur, ErreurCalcul> {
        self.arith(autre, |a, b| a.checked_mul(b), |a, b| a * b)
    }

    pub fn diviser(self, autre: Valeur) -> Result<Valeur, ErreurCalcul> {
        if autre.est_nul() {
            return Err(ErreurCalcul::DivisionParZero);
        }
        self.arith(autre, |a, b| a.checked_div(b), |a, b| a / b)
    }

    /// Division plancher : quotient en f64, puis floor.
    pub fn diviser_entier(self, autre: Valeur) -> Result<Valeur, ErreurCalcul> {
        let q = self.diviser(autre)?;
        Valeur::depuis_f64(q.en_f64().floor())
    }

    /// Reste tronqué vers zéro (signe du dividende).
    pub fn modulo(self, autre: Valeur) -> Result<Valeur, ErreurCalcul> {
        let (a, b) = self.entiers(autre, "%")?;
        if b == 0 {
            return Err(ErreurCalcul::DivisionParZero);
        }
        Ok(Valeur::entier(a.wrapping_rem(b)))
    }

    pub fn puissance(self, exposant: Valeur) -> Result<Valeur, ErreurCalcul> {
        if self.est_negatif() && !exposant.is_integer() {
            return Err(ErreurCalcul::BaseNegativeExposantFractionnaire);
        }
        if self.est_nul() && exposant.est_negatif() {
            return Err(ErreurCalcul::DivisionParZero);
        }

        // base exacte, exposant entier : numérateur et dénominateur séparément
        if let Valeur::Exacte(base) = self {
            if let Ok(n) = exposant.en_i64("**") {
                let puissances = usize::try_from(n.unsigned_abs()).ok().and_then(|e| {
                    Some((checked_pow(*base.numer(), e)?, checked_pow(*base.denom(), e)?))
                });
                match puissances {
                    Some((num, den)) if n < 0 => return Valeur::fraction(den, num),
                    Some((num, den)) => return Valeur::fraction(num, den),
                    None => debug!("dépassement i64 sur {base}**{n} : bascule en f64"),
                }
            }
        }

        Valeur::depuis_f64(self.en_f64().powf(exposant.en_f64()))
    }

    /* ------------------------ Opérateurs entiers ------------------------ */

    pub fn decaler_gauche(self, autre: Valeur) -> Result<Valeur, ErreurCalcul> {
        let (a, b) = self.entiers(autre, "<<")?;
        if b < 0 {
            return Err(ErreurCalcul::DecalageNegatif);
        }
        let r = u32::try_from(b)
            .ok()
            .and_then(|s| a.checked_shl(s))
            .unwrap_or(0);
        Ok(Valeur::entier(r))
    }

    pub fn decaler_droite(self, autre: Valeur) -> Result<Valeur, ErreurCalcul> {
        let (a, b) = self.entiers(autre, ">>")?;
        if b < 0 {
            return Err(ErreurCalcul::DecalageNegatif);
        }
        let remplissage = if a < 0 { -1 } else { 0 };
        let r = u32::try_from(b)
            .ok()
            .and_then(|s| a.checked_shr(s))
            .unwrap_or(remplissage);
        Ok(Valeur::entier(r))
    }

    pub fn et_binaire(self, autre: Valeur) -> Result<Valeur, ErreurCalcul> {
        let (a, b) = self.entiers(autre, "&")?;
        Ok(Valeur::entier(a & b))
    }

    pub fn ou_binaire(self, autre: Valeur) -> Result<Valeur, ErreurCalcul> {
        let (a, b) = self.entiers(autre, "|")?;
        Ok(Valeur::entier(a | b))
    }

    pub fn xor_binaire(self, autre: Valeur) -> Result<Valeur, ErreurCalcul> {
        let (a, b) = self.entiers(autre, "^")?;
        Ok(Valeur::entier(a ^ b))
    }

    /// `~` : complément à deux sur 64 bits.
    pub fn non_binaire(self) -> Result<Valeur, ErreurCalcul> {
        let a = self.en_i64("~")?;
        Ok(Valeur::entier(!a))
    }
}
