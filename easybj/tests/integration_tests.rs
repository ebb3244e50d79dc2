use easybj::code::{DEALER_CODES, DEALER_ODDS_CODES, DEALER_OUTCOMES, PLAYER_CODES};
use easybj::{calculate, Code, Decision, Tables};
use std::sync::OnceLock;

fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(|| calculate().unwrap())
}

fn label(player: Code, dealer: Code) -> String {
    tables().strategy.get(player, dealer).unwrap().to_string()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-12,
        "{} != {}",
        actual,
        expected
    );
}

#[test]
fn every_table_is_complete() {
    let tables = tables();
    assert!(tables.initial.is_complete());
    assert!(tables.dealer_odds.is_complete());
    assert!(tables.stand.is_complete());
    assert!(tables.hit.is_complete());
    assert!(tables.double.is_complete());
    assert!(tables.split0.is_complete());
    assert!(tables.split1.is_complete());
    assert!(tables.split2.is_complete());
    assert!(tables.split3.is_complete());
    assert!(tables.optimal.is_complete());
    assert!(tables.strategy.is_complete());
}

#[test]
fn probability_tables_sum_to_one() {
    let tables = tables();
    assert!((tables.initial.sum() - 1.0).abs() < 1e-9);
    for state in DEALER_ODDS_CODES {
        let sum: f64 = DEALER_OUTCOMES
            .iter()
            .map(|outcome| tables.dealer_odds.get(state, *outcome).unwrap())
            .sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }
}

#[test]
fn advantage() {
    let advantage = tables().advantage;
    assert!((0.10..0.13).contains(&advantage));
    assert!((advantage - 0.1166847041845088).abs() < 1e-9);
}

#[test]
fn double_hard_eleven_against_five_and_six() {
    assert_eq!(label(Code::Hard11, Code::Hard5), "Dh");
    assert_eq!(label(Code::Hard11, Code::Hard6), "Dh");
    assert_close(
        *tables().optimal.get(Code::Hard11, Code::Hard6).unwrap(),
        0.6646634091889256,
    );
    assert_eq!(label(Code::Hard11, Code::Hard10), "H");
    assert_eq!(label(Code::Hard11, Code::Hard20), "H");
}

#[test]
fn split_aces_unless_the_dealer_stands() {
    for dealer in DEALER_CODES {
        let expected = match dealer {
            Code::Hard17 | Code::Hard18 | Code::Hard19 | Code::Hard20 => "H",
            _ => "P",
        };
        assert_eq!(label(Code::PairAces, dealer), expected, "{}", dealer);
    }
}

#[test]
fn never_hit_twelve_against_a_stiff_dealer() {
    let tables = tables();
    for dealer in [
        Code::Hard12,
        Code::Hard13,
        Code::Hard14,
        Code::Hard15,
        Code::Hard16,
    ] {
        let hit = tables.hit.get(Code::Hard12, dealer).unwrap();
        let stand = tables.stand.get(Code::Hard12, dealer).unwrap();
        assert!(hit - stand < 1e-3, "{}", dealer);
        assert_eq!(label(Code::Hard12, dealer), "S");
    }
}

#[test]
fn hard_sixteen() {
    let expected = [
        "S", "S", "S", "H", "H", "Rh", "Rh", "Rs", "S", "S", "S", "S", "S", "H", "H", "Rh", "Rh",
        "S", "S", "S", "S", "S", "H",
    ];
    for (dealer, expected) in DEALER_CODES.iter().zip(expected) {
        assert_eq!(label(Code::Hard16, *dealer), expected, "{}", dealer);
    }
    assert_close(
        *tables().optimal.get(Code::Hard16, Code::Hard20).unwrap(),
        -0.5,
    );
}

#[test]
fn tens_are_split_against_a_stiff_dealer() {
    assert_eq!(label(Code::PairTens, Code::Hard13), "P");
    assert_close(
        *tables().optimal.get(Code::PairTens, Code::Hard13).unwrap(),
        0.7974624770624712,
    );
}

#[test]
fn optimal_is_the_best_candidate() {
    let tables = tables();
    for player in PLAYER_CODES {
        let single = player.as_single_hand();
        for dealer in DEALER_CODES {
            let optimal = *tables.optimal.get(player, dealer).unwrap();
            assert!(optimal >= -0.5);
            assert!(optimal >= *tables.stand.get(single, dealer).unwrap());
            assert!(optimal >= *tables.hit.get(single, dealer).unwrap());
            assert!(optimal >= *tables.double.get(single, dealer).unwrap());
            if player.is_pair() {
                assert!(optimal >= *tables.split3.get(player, dealer).unwrap());
            }

            let action = tables.strategy.get(player, dealer).unwrap();
            let chosen = match action.decision {
                Decision::Split => *tables.split3.get(player, dealer).unwrap(),
                Decision::Stand => *tables.stand.get(single, dealer).unwrap(),
                Decision::Hit => *tables.hit.get(single, dealer).unwrap(),
                Decision::Double => *tables.double.get(single, dealer).unwrap(),
                Decision::Surrender => -0.5,
            };
            assert_eq!(chosen, optimal);
        }
    }
}

#[test]
#[ignore]
fn print_strategy() {
    let tables = tables();
    print!("{:>4}", "");
    for dealer in DEALER_CODES {
        print!("{:>4}", dealer.to_string());
    }
    println!();
    for player in PLAYER_CODES {
        print!("{:>4}", player.to_string());
        for dealer in DEALER_CODES {
            print!("{:>4}", label(player, dealer));
        }
        println!();
    }
    println!("Advantage: {}", tables.advantage);
}
