// src/noyau/erreur.rs
//
// Erreurs du noyau.
// Toute erreur est locale (détectée là où elle se produit) puis remonte par `?`.
// Rien n'est fatal : le solveur reste utilisable après n'importe quelle erreur.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErreurCalcul {
    #[error("expression vide")]
    ExpressionVide,

    #[error("parenthèses non appariées")]
    ParenthesesDesequilibrees,

    #[error("identifiant inconnu : \"{0}\"")]
    IdentifiantInconnu(String),

    #[error("parenthèses manquantes après la fonction \"{0}\"")]
    ParenthesesManquantes(String),

    #[error("\"{0}\" n'a pas de valeur pour l'instant")]
    ReferenceIndefinie(String),

    #[error("racine carrée d'un nombre négatif")]
    RacineNegative,

    #[error("puissance non entière d'un nombre négatif")]
    BaseNegativeExposantFractionnaire,

    #[error("l'opérateur '{operateur}' exige des entiers")]
    OperandeNonEntier { operateur: String },

    #[error("décalage par un nombre négatif")]
    DecalageNegatif,

    #[error("division par zéro")]
    DivisionParZero,

    #[error("nombre trop grand")]
    NombreTropGrand,

    #[error("nombre invalide : {0}")]
    ErreurLecture(String),

    #[error("opérateur invalide : '{0}'")]
    OperateurInvalide(String),

    #[error("caractère inattendu : \"{0}\"")]
    JetonInattendu(String),

    #[error("expression invalide")]
    ExpressionMalformee,

    #[error("imbrication trop profonde (max {0})")]
    ImbricationTropProfonde(usize),

    #[error("aucune expression : appeler solve d'abord")]
    AucuneExpression,

    #[error("hors domaine : {0}")]
    HorsDomaine(String),

    #[error("nom invalide : \"{0}\"")]
    NomInvalide(String),
}

impl ErreurCalcul {
    pub(crate) fn non_entier(operateur: &str) -> Self {
        ErreurCalcul::OperandeNonEntier {
            operateur: operateur.to_string(),
        }
    }
}
