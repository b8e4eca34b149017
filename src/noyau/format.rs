// src/noyau/format.rs
//
// Affichage des valeurs.
// - entier exact         -> "42"
// - sinon                -> f64, représentation la plus courte qui relit la même valeur
// - forme exacte (UI)    -> "p/q" pour un rationnel, sinon l'affichage décimal

use std::fmt;

use super::valeur::Valeur;

impl Valeur {
    /// Affichage principal (résultat).
    pub fn to_display_string(&self) -> String {
        match self {
            Valeur::Exacte(r) if r.is_integer() => format!("{}", r.numer()),
            // `Display` de f64 : plus court aller-retour, pas de ".0" final
            _ => format!("{}", self.en_f64()),
        }
    }

    /// Forme EXACT : "p/q" si rationnel non entier.
    pub fn en_fraction(&self) -> String {
        match self {
            Valeur::Exacte(r) if !r.is_integer() => format!("{}/{}", r.numer(), r.denom()),
            _ => self.to_display_string(),
        }
    }
}

impl fmt::Display for Valeur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}
