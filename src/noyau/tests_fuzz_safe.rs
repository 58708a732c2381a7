//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le moteur comme le ferait la façade (push puis evaluate à chaque touche).
//! - RNG déterministe (seed fixe)
//! - longueur de séquence bornée
//! - budget temps global
//! - entrées non finies (littéraux et liaisons) mêlées aux valeurs usuelles
//! - invariants : description jamais vide, résultat non fini => erreur,
//!   réévaluation identique tant qu’aucune marque d’annulation n’est en jeu

use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::journal::Entree;
use super::operations::*;
use super::{Calculatrice, Evaluation};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération de touches ------------------------ */

const OPCODES: [&str; 19] = [
    PI_SYMBOLE,
    E_SYMBOLE,
    ALEATOIRE,
    RACINE,
    PUISSANCE,
    PUISSANCE_10,
    LOG,
    COS,
    SIN,
    OPPOSE,
    FOIS,
    DIVISE,
    PLUS,
    MOINS,
    EGAL,
    EFFACER,
    ANNULER,
    // inconnus : doivent être ignorés
    "tan",
    "",
];

const NOMBRES: [f64; 12] = [
    0.0,
    1.0,
    2.0,
    3.5,
    -4.0,
    10.0,
    0.000001,
    123456789.0,
    1e12,
    // non finis : doivent toujours porter une erreur
    f64::INFINITY,
    f64::NEG_INFINITY,
    f64::NAN,
];

/// Valeurs liées à "x" selon le cas.
const LIAISONS_X: [f64; 4] = [2.0, -0.5, f64::NAN, f64::NEG_INFINITY];

fn touche_au_hasard(rng: &mut Rng, c: &mut Calculatrice) {
    match rng.pick(10) {
        0..=3 => c.push_literal(NOMBRES[rng.pick(NOMBRES.len() as u32) as usize]),
        4 => c.push_variable(if rng.pick(2) == 0 { "x" } else { "M" }),
        _ => c.push_opcode(OPCODES[rng.pick(OPCODES.len() as u32) as usize]),
    }
}

fn contient_marque(c: &Calculatrice) -> bool {
    c.journal().entrees().contains(&Entree::Supprimee)
}

/// Égalité qui accepte NaN == NaN.
fn meme_tuple(a: &Evaluation, b: &Evaluation) -> bool {
    let meme_resultat = match (a.resultat, b.resultat) {
        (Some(x), Some(y)) => x.to_bits() == y.to_bits(),
        (None, None) => true,
        _ => false,
    };
    meme_resultat
        && a.en_attente == b.en_attente
        && a.description == b.description
        && a.erreur == b.erreur
}

fn check_invariants(r: &Evaluation) {
    assert!(!r.description.is_empty(), "description vide");
    if let Some(v) = r.resultat {
        if !v.is_finite() {
            assert!(r.erreur.is_some(), "résultat {v} sans erreur: {r:?}");
        }
    }
}

/* ------------------------ Campagnes ------------------------ */

#[test]
fn fuzz_sequences_touche_par_touche() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(0xC0FFEE);

    for cas in 0..300u64 {
        budget(t0, max);

        let mut c = Calculatrice::avec_graine(cas);
        let x = LIAISONS_X[(cas % LIAISONS_X.len() as u64) as usize];
        let liaisons = HashMap::from([("x".to_string(), x)]);
        let longueur = 1 + rng.pick(40);

        for _ in 0..longueur {
            touche_au_hasard(&mut rng, &mut c);

            let marque_avant = contient_marque(&c);
            let r = c.evaluate(Some(&liaisons));
            check_invariants(&r);

            if !marque_avant && !contient_marque(&c) {
                let r2 = c.evaluate(None);
                assert!(meme_tuple(&r, &r2), "cas {cas}: {r:?} != {r2:?}");
            }
        }
    }
}

#[test]
fn fuzz_annulation_double_appel_vide_le_journal() {
    // la façade envoie Undo puis évalue deux fois : chaque appui retire une entrée + l’Undo
    let t0 = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(7);

    for cas in 0..100u64 {
        budget(t0, max);

        let mut c = Calculatrice::avec_graine(cas);
        for _ in 0..(1 + rng.pick(20)) {
            match rng.pick(3) {
                0 => c.push_variable("x"),
                1 => c.push_opcode(OPCODES[rng.pick(15) as usize]),
                _ => c.push_literal(NOMBRES[rng.pick(NOMBRES.len() as u32) as usize]),
            }
        }
        let mut restant = c.journal().len();

        while restant > 0 {
            c.push_opcode(ANNULER);
            c.evaluate(None);
            let r = c.evaluate(None);
            check_invariants(&r);

            assert_eq!(c.journal().len(), restant - 1, "cas {cas}");
            assert!(!contient_marque(&c));
            restant -= 1;
        }
        assert_eq!(c.evaluate(None), Evaluation::vide());
    }
}
