use easybj::code::{DEALER_CODES, PLAYER_CODES, SPLIT_CODES};
use easybj::simulation::hand::PlayedHand;
use easybj::simulation::shoe::RandomShoe;
use easybj::simulation::strategy::{ChartStrategy, Strategy};
use easybj::simulation::Simulator;
use easybj::{calculate, representative_hand, Code, Decision, Role, Tables};
use std::sync::OnceLock;

const GAMES: u64 = 200_000;

fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(|| calculate().unwrap())
}

fn hand(code: Code, role: Role) -> PlayedHand {
    let (card0, card1) = representative_hand(code).unwrap();
    PlayedHand::new(card0, card1, role).unwrap()
}

/// What the chart says for `row`, with the suffix applied when `allowed` lacks the action.
fn resolved(row: Code, dealer: Code, allowed: &[Decision]) -> Decision {
    let action = tables().strategy.get(row, dealer).unwrap();
    if allowed.contains(&action.decision) {
        action.decision
    } else {
        action.fallback.unwrap()
    }
}

#[test]
fn fallbacks_follow_the_chart() {
    let mut strategy = ChartStrategy::new(&tables().strategy);
    let after_hit = [Decision::Stand, Decision::Hit];
    let after_split = [Decision::Stand, Decision::Hit, Decision::Double];
    for player in PLAYER_CODES.into_iter().filter(|code| !code.is_pair()) {
        for dealer in DEALER_CODES {
            let (hand, dealer_hand) = (hand(player, Role::Player), hand(dealer, Role::Dealer));
            assert_eq!(dealer_hand.code(), dealer);
            for allowed in [&after_hit[..], &after_split[..]] {
                let decision = strategy
                    .make_decision(&hand, &dealer_hand, allowed)
                    .unwrap();
                assert_eq!(decision, resolved(player, dealer, allowed), "{} {}", player, dealer);
                assert!(allowed.contains(&decision));
            }
        }
    }
}

#[test]
fn pairs_past_the_cap_use_the_hard_row() {
    let mut strategy = ChartStrategy::new(&tables().strategy);
    let capped = [
        Decision::Stand,
        Decision::Hit,
        Decision::Double,
        Decision::Surrender,
    ];
    let open = [
        Decision::Stand,
        Decision::Hit,
        Decision::Double,
        Decision::Split,
        Decision::Surrender,
    ];
    for pair in SPLIT_CODES {
        for dealer in DEALER_CODES {
            let (hand, dealer_hand) = (hand(pair, Role::Player), hand(dealer, Role::Dealer));
            let decision = strategy
                .make_decision(&hand, &dealer_hand, &capped)
                .unwrap();
            assert_eq!(decision, resolved(pair.split_to_hard(), dealer, &capped));

            let decision = strategy.make_decision(&hand, &dealer_hand, &open).unwrap();
            assert_eq!(decision, tables().strategy.get(pair, dealer).unwrap().decision);
        }
    }
}

#[test]
fn simulated_return_converges_to_the_advantage() {
    let tables = tables();
    let mut strategy = ChartStrategy::new(&tables.strategy);
    let mut simulator = Simulator::new(RandomShoe::with_seed(2019));
    for _ in 0..GAMES {
        simulator.play_game(&mut strategy, &mut ()).unwrap();
    }
    assert_eq!(simulator.games_played(), GAMES);
    let average = simulator.average_return();
    assert!(
        (average - tables.advantage).abs() < 0.02,
        "simulated {} against {}",
        average,
        tables.advantage
    );
}
