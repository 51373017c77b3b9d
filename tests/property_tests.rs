mod common;

use common::new_ctx;
use proptest::prelude::*;
use rallytrack::score::{apply_point_win, tiebreak_server, GameScore, Player, ScoreState};

// --- STRATEGIES ---

fn arb_player() -> impl Strategy<Value = Player> {
    prop_oneof![Just(Player::A), Just(Player::B)]
}

prop_compose! {
    fn arb_winners(max: usize)(winners in prop::collection::vec(arb_player(), 0..max)) -> Vec<Player> {
        winners
    }
}

fn assert_score_bounds(s: &ScoreState) {
    match s.game() {
        GameScore::Regular(p) => {
            if p.a >= 3 && p.b >= 3 {
                assert!(p.lead() <= 1, "open game with lead {}", p.lead());
            } else {
                assert!(p.max() <= 3, "open game at {}-{}", p.a, p.b);
            }
        }
        GameScore::Tiebreak { points, .. } => {
            assert!(points.max() < 7 || points.lead() <= 1);
            assert_eq!((s.games().a, s.games().b), (6, 6));
        }
    }
    let games = s.games();
    assert!(games.max() <= 6);
    assert!(games.max() < 6 || games.lead() <= 1);
    assert_eq!(s.sets().total() as usize, s.set_history().len());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_score_stays_in_bounds(winners in arb_winners(400), first in arb_player()) {
        let mut s = ScoreState::new(first);
        for w in winners {
            apply_point_win(&mut s, w);
            assert_score_bounds(&s);
        }
    }

    #[test]
    fn prop_redo_walks_back_exactly(winners in arb_winners(120), back in 0usize..20) {
        let mut ctx = new_ctx();
        let mut states = vec![ctx.clone()];
        for w in &winners {
            ctx.end_point(*w, "Point").unwrap();
            states.push(ctx.clone());
        }

        let back = back.min(winners.len());
        for _ in 0..back {
            prop_assert!(ctx.redo_last_point());
        }
        prop_assert_eq!(&ctx, &states[winners.len() - back]);
    }

    #[test]
    fn prop_tiebreak_serve_changes_in_pairs(start in arb_player(), k in 0u32..50) {
        let first = tiebreak_server(start, 2 * k + 1);
        prop_assert_eq!(first, tiebreak_server(start, 2 * k + 2));
        prop_assert_ne!(first, tiebreak_server(start, 2 * k + 3));
    }

    #[test]
    fn prop_points_played_decides_side(winners in arb_winners(40)) {
        let mut ctx = new_ctx();
        for w in winners {
            ctx.end_point(w, "Point").unwrap();
            let played = ctx.score().game().points_played();
            let expected = if played % 2 == 0 { "SD" } else { "SV" };
            prop_assert_eq!(ctx.point().side().to_string(), expected);
        }
    }
}
