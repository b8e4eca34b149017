//! Tests scientifiques (campagne) : expressions simples, fautives, complexes, priorités.
//!
//! But : couvrir tout le pipeline (signes -> blocs -> pile) par la façade `Solveur`,
//! sans faire chauffer la machine.
//! - budget temps global sur les stress
//! - tailles bornées (profondeur, longueur)
//!
//! Notes :
//! - Les résultats flottants sont comparés avec une tolérance relative.
//! - "1---1" est ACCEPTÉ (moins unaires en chaîne) : vaut 0.
//! - À rang égal, évaluation de gauche à droite : 2**3**2 = 64.

use std::time::{Duration, Instant};

use super::erreur::ErreurCalcul;
use super::eval::Solveur;
use super::valeur::Valeur;

fn eval_ok(s: &mut Solveur, expr: &str) -> Valeur {
    s.solve(expr)
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_f64(s: &mut Solveur, expr: &str, attendu: f64) {
    let v = eval_ok(s, expr).en_f64();
    let tol = 1e-12 * attendu.abs().max(1.0);
    assert!(
        (v - attendu).abs() <= tol,
        "expr={expr:?} obtenu={v} attendu={attendu}"
    );
}

fn assert_affiche(s: &mut Solveur, expr: &str, attendu: &str) {
    let v = eval_ok(s, expr);
    assert_eq!(v.to_display_string(), attendu, "expr={expr:?}");
}

fn assert_erreur(s: &mut Solveur, expr: &str, attendue: ErreurCalcul) {
    assert_eq!(s.solve(expr), Err(attendue), "expr={expr:?}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Expressions simples ------------------------ */

#[test]
fn sci_operateurs_simples() {
    let mut s = Solveur::new();

    assert_affiche(&mut s, "1+1", "2");
    assert_affiche(&mut s, "1-1", "0");
    assert_affiche(&mut s, "-1", "-1");
    assert_affiche(&mut s, "-1-1", "-2");
    assert_affiche(&mut s, "-(1+1)", "-2");
    assert_affiche(&mut s, "1*3", "3");
    assert_f64(&mut s, "1/3", 1.0 / 3.0);
    assert_affiche(&mut s, "4%3", "1");
    assert_affiche(&mut s, "7//3", "2");
    assert_affiche(&mut s, "2**3", "8");
    assert_affiche(&mut s, "1**-0.1", "1");
    assert_f64(&mut s, "3**(-1)", 1.0 / 3.0);
}

#[test]
fn sci_operateurs_binaires() {
    let mut s = Solveur::new();

    assert_affiche(&mut s, "1&2", "0");
    assert_affiche(&mut s, "1|2", "3");
    assert_affiche(&mut s, "1^2", "3");
    assert_affiche(&mut s, "~1", "-2");
    assert_affiche(&mut s, "1<<1", "2");
    assert_affiche(&mut s, "1>>1", "0");
}

#[test]
fn sci_fonctions() {
    let mut s = Solveur::new();

    assert_f64(&mut s, "sin(2*pi)", (2.0 * std::f64::consts::PI).sin());
    assert_affiche(&mut s, "ceil(3.14)", "4");
    assert_affiche(&mut s, "floor(3.14)", "3");
    assert_affiche(&mut s, "round(3.14)", "3");
    assert_affiche(&mut s, "ln(e)", "1");
    assert_f64(&mut s, "exp(2)", 2f64.exp());
    assert_affiche(&mut s, "sqrt(9)", "3");
    assert_affiche(&mut s, "log(100)", "2");
    assert_affiche(&mut s, "abs(-2)", "2");
}

#[test]
fn sci_decimaux_exacts() {
    let mut s = Solveur::new();

    assert_affiche(&mut s, "2+0.02", "2.02");
    assert_affiche(&mut s, "2+0.0200", "2.02");
    assert_affiche(&mut s, "2+0.00002", "2.00002");
    assert_affiche(&mut s, "2+0.0000002", "2.0000002");
    assert_affiche(&mut s, "5.66666+9.333333", "14.999993");
    // 0.1+0.2 reste exact (3/10)
    assert_eq!(eval_ok(&mut s, "0.1+0.2"), Valeur::fraction(3, 10).unwrap());

    assert_f64(&mut s, "9999.9999*9999.9999", 99_999_998.000_000_01);
    assert_f64(&mut s, "9999.9999*7777.7777", 77_777_776.222_222_23);
    assert_f64(&mut s, "99999.9999*77777.7777", 7_777_777_762.222_222);
}

#[test]
fn sci_depassement_bascule_en_flottant() {
    let mut s = Solveur::new();

    let v = eval_ok(&mut s, "10**19");
    assert!(v.is_decimal());
    assert_eq!(v.to_display_string(), "10000000000000000000");

    let v = eval_ok(&mut s, "9223372036854775807+1");
    assert!(v.is_decimal());
    assert_f64(&mut s, "9223372036854775807+1", 9.223_372_036_854_776e18);

    assert_erreur(&mut s, "10**400", ErreurCalcul::NombreTropGrand);
    assert_erreur(&mut s, "99999999999999999999", ErreurCalcul::NombreTropGrand);
}

/* ------------------------ Expressions fautives ------------------------ */

#[test]
fn sci_fautives_symboles() {
    let mut s = Solveur::new();

    assert_erreur(&mut s, "", ErreurCalcul::ExpressionVide);
    assert_erreur(&mut s, "1++1", ErreurCalcul::OperateurInvalide("++".into()));
    assert_erreur(&mut s, "1<>1", ErreurCalcul::OperateurInvalide("<>".into()));
    assert_erreur(&mut s, "-1=1", ErreurCalcul::JetonInattendu("=".into()));
    assert_erreur(&mut s, "1///1", ErreurCalcul::OperateurInvalide("///".into()));
    assert_erreur(&mut s, "1$1", ErreurCalcul::JetonInattendu("$".into()));

    // moins unaires en chaîne : acceptés
    assert_affiche(&mut s, "1---1", "0");
    assert_affiche(&mut s, "--1/1", "1");
}

#[test]
fn sci_fautives_identifiants() {
    let mut s = Solveur::new();

    assert_erreur(&mut s, "epsaa", ErreurCalcul::IdentifiantInconnu("epsaa".into()));
    assert_erreur(&mut s, "ppp-1", ErreurCalcul::IdentifiantInconnu("ppp".into()));
    assert_erreur(&mut s, "1ii", ErreurCalcul::IdentifiantInconnu("ii".into()));
}

#[test]
fn sci_fautives_regles() {
    let mut s = Solveur::new();
    let non_entier = |op: &str| ErreurCalcul::OperandeNonEntier {
        operateur: op.to_string(),
    };

    assert_erreur(&mut s, "-1**-0.1", ErreurCalcul::BaseNegativeExposantFractionnaire);
    assert_erreur(&mut s, "(-1)**0.5", ErreurCalcul::BaseNegativeExposantFractionnaire);
    assert_erreur(&mut s, "1.1&1", non_entier("&"));
    assert_erreur(&mut s, "1.1|1", non_entier("|"));
    assert_erreur(&mut s, "1.1^1", non_entier("^"));
    assert_erreur(&mut s, "1.1<<1", non_entier("<<"));
    assert_erreur(&mut s, "1.1>>1", non_entier(">>"));
    assert_erreur(&mut s, "~1.1", non_entier("~"));
    assert_erreur(&mut s, "1>>-1", ErreurCalcul::DecalageNegatif);
    assert_erreur(&mut s, "sqrt(-1)", ErreurCalcul::RacineNegative);
    assert_erreur(&mut s, "1/0", ErreurCalcul::DivisionParZero);
    assert_erreur(&mut s, "1%0", ErreurCalcul::DivisionParZero);
    assert_erreur(&mut s, "0**-1", ErreurCalcul::DivisionParZero);
}

#[test]
fn sci_fautives_incompletes() {
    let mut s = Solveur::new();

    assert_erreur(&mut s, "exp", ErreurCalcul::ParenthesesManquantes("exp".into()));
    assert_erreur(&mut s, "exp()", ErreurCalcul::ExpressionMalformee);
    assert_erreur(&mut s, "(1+1", ErreurCalcul::ParenthesesDesequilibrees);
    assert_erreur(&mut s, "1+1)", ErreurCalcul::ParenthesesDesequilibrees);
    assert_erreur(&mut s, "1+", ErreurCalcul::ExpressionMalformee);
    assert_erreur(&mut s, "+1", ErreurCalcul::ExpressionMalformee);
    assert!(matches!(s.solve("1.2.3"), Err(ErreurCalcul::ErreurLecture(_))));
}

/* ------------------------ Expressions complexes ------------------------ */

#[test]
fn sci_complexes() {
    let mut s = Solveur::new();

    assert_affiche(&mut s, "1+((2-3*4)/5)**6%4", "1");
    assert_affiche(&mut s, "floor(ln(exp(e))+cos(2*pi))", "3");
    assert_affiche(
        &mut s,
        "f l o o r ( l n ( e x p ( e ) ) + c o s (  2*  pi  ) )",
        "3",
    );
}

#[test]
fn sci_constantes_utilisateur() {
    let mut s = Solveur::new();

    s.define_constant("x", Valeur::entier(1)).unwrap();
    s.define_constant("y", Valeur::entier(2)).unwrap();
    assert_affiche(&mut s, "x+y*x/y", "2");

    s.define_constant("x", Valeur::entier(3)).unwrap();
    s.define_constant("y", Valeur::entier(4)).unwrap();
    assert_affiche(&mut s, "(x+y)*x+y", "25");

    s.define_constant("x", Valeur::entier(5)).unwrap();
    s.define_constant("y", Valeur::entier(6)).unwrap();
    assert_eq!(s.resolve(), Ok(Valeur::entier(61)));

    s.define_constant("a1", Valeur::entier(6)).unwrap();
    assert_affiche(&mut s, "a1 + 1", "7");
}

/* ------------------------ Priorités ------------------------ */

#[test]
fn sci_priorites_puissance_et_unaires() {
    let mut s = Solveur::new();

    assert_affiche(&mut s, "~2**3", "-9");
    assert_affiche(&mut s, "-2**3", "-8");
    assert_affiche(&mut s, "2**3**2", "64");
}

#[test]
fn sci_priorites_multiplicatives() {
    let mut s = Solveur::new();

    assert_affiche(&mut s, "3*-2", "-6");
    assert_affiche(&mut s, "3*~2", "-9");
    assert_affiche(&mut s, "3/-2", "-1.5");
    assert_affiche(&mut s, "3//-2", "-2");
    assert_affiche(&mut s, "3%-2", "1");
}

#[test]
fn sci_priorites_additives_et_bits() {
    let mut s = Solveur::new();

    assert_affiche(&mut s, "3-2*4", "-5");
    assert_affiche(&mut s, "3-2*4-1/8+9%2+1", "-3.125");
    assert_affiche(&mut s, "3<<2+4", "192");
    assert_affiche(&mut s, "15>>1+1", "3");
    assert_affiche(&mut s, "1&1<<1", "0");
    assert_affiche(&mut s, "5^2&3", "7");
    assert_affiche(&mut s, "5|2^3", "5");
    // du plus faible au plus fort
    assert_affiche(&mut s, "5|2^3<<2+2*2**2", "3079");
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut expr = String::new();
    for k in 0..400 {
        if k > 0 {
            expr.push_str(" + ");
        }
        expr.push_str("1/2");
        budget(t0, max);
    }

    let mut s = Solveur::new();
    assert_affiche(&mut s, &expr, "200");
    budget(t0, max);
}

#[test]
fn sci_stress_profondeur_bornee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut s = Solveur::new();

    // 60 niveaux : sous la borne par défaut (64)
    let expr = format!("{}1{}", "(".repeat(60), ")".repeat(60));
    assert_affiche(&mut s, &expr, "1");

    // 60 fonctions imbriquées
    let mut expr = "16".to_string();
    for _ in 0..60 {
        expr = format!("abs({expr})");
    }
    assert_affiche(&mut s, &expr, "16");

    // au-delà : erreur propre, pas de débordement de pile
    let expr = format!("{}1{}", "(".repeat(5000), ")".repeat(5000));
    assert_erreur(&mut s, &expr, ErreurCalcul::ImbricationTropProfonde(64));

    let expr = format!("1*{}1", "-".repeat(5000));
    assert_erreur(&mut s, &expr, ErreurCalcul::ImbricationTropProfonde(64));

    budget(t0, max);
}

#[test]
fn sci_stress_performance_repetee() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut s = Solveur::new();
    for _ in 0..2000 {
        assert_eq!(s.solve("1+((2-3*4)/5)**6%4"), Ok(Valeur::entier(1)));
    }
    budget(t0, max);
}
