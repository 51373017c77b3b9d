mod common;

use common::{level_games, tiebreak_state, win_game, win_points};
use rallytrack::score::labels::{point_text, score_label, snapshot_line};
use rallytrack::score::{
    apply_point_win, tiebreak_server, GameScore, Player, PointOutcome, ScoreState, ServeSide,
    SetRecord, Tally,
};
use rstest::rstest;

#[test]
fn test_love_game_flips_server() {
    let mut s = ScoreState::new(Player::A);
    assert_eq!(win_points(&mut s, Player::A, 3), PointOutcome::Point);
    assert_eq!(s.game(), GameScore::Regular(Tally::new(3, 0)));

    let out = apply_point_win(&mut s, Player::A);
    assert_eq!(out, PointOutcome::Game { winner: Player::A });
    assert_eq!(s.games(), Tally::new(1, 0));
    assert_eq!(s.game().points(), Tally::ZERO);
    assert_eq!(s.current_server(), Player::B);
}

#[test]
fn test_deuce_needs_two_clear_points() {
    let mut s = ScoreState::new(Player::A);
    win_points(&mut s, Player::A, 3);
    win_points(&mut s, Player::B, 3);
    assert_eq!(score_label(&s), "DEUCE");

    apply_point_win(&mut s, Player::A);
    assert_eq!(score_label(&s), "AD A");
    apply_point_win(&mut s, Player::B);
    assert_eq!(score_label(&s), "DEUCE");
    assert_eq!(s.game(), GameScore::Regular(Tally::new(4, 4)));

    apply_point_win(&mut s, Player::B);
    assert_eq!(score_label(&s), "AD B");
    let out = apply_point_win(&mut s, Player::B);
    assert_eq!(out, PointOutcome::Game { winner: Player::B });
    assert_eq!(s.games(), Tally::new(0, 1));
}

#[test]
fn test_forty_thirty_closes_without_deuce_rules() {
    let mut s = ScoreState::new(Player::A);
    win_points(&mut s, Player::A, 3);
    win_points(&mut s, Player::B, 2);
    assert_eq!(
        apply_point_win(&mut s, Player::A),
        PointOutcome::Game { winner: Player::A }
    );
}

#[test]
fn test_set_six_four() {
    let mut s = ScoreState::new(Player::A);
    level_games(&mut s, 4);
    win_game(&mut s, Player::A);
    let out = win_game(&mut s, Player::A);

    let record = SetRecord {
        a: 6,
        b: 4,
        tb: None,
    };
    assert_eq!(
        out,
        PointOutcome::Set {
            winner: Player::A,
            record: record.clone()
        }
    );
    assert_eq!(s.sets(), Tally::new(1, 0));
    assert_eq!(s.games(), Tally::ZERO);
    assert_eq!(s.set_history(), &[record]);
}

#[test]
fn test_six_five_is_not_a_set() {
    let mut s = ScoreState::new(Player::A);
    level_games(&mut s, 5);
    assert_eq!(win_game(&mut s, Player::B), PointOutcome::Game { winner: Player::B });
    assert_eq!(s.games(), Tally::new(5, 6));

    assert_eq!(
        win_game(&mut s, Player::B),
        PointOutcome::Set {
            winner: Player::B,
            record: SetRecord {
                a: 5,
                b: 7,
                tb: None
            }
        }
    );
}

#[test]
fn test_six_all_enters_tiebreak() {
    let mut s = ScoreState::new(Player::A);
    level_games(&mut s, 5);
    win_game(&mut s, Player::A);
    let out = win_game(&mut s, Player::B);

    // Twelve games played, so the first server is due again.
    assert_eq!(
        out,
        PointOutcome::TiebreakStarted {
            starting_server: Player::A
        }
    );
    assert!(s.is_tiebreak());
    assert_eq!(s.games(), Tally::new(6, 6));
    assert_eq!(score_label(&s), "TB 0-0");
    assert!(s.set_history().is_empty());
}

#[test]
fn test_tiebreak_serve_rotation() {
    let mut s = tiebreak_state();
    let mut servers = Vec::new();
    for i in 0..7 {
        servers.push(s.current_server());
        let winner = if i % 2 == 0 { Player::A } else { Player::B };
        apply_point_win(&mut s, winner);
    }
    use Player::{A, B};
    assert_eq!(servers, vec![A, B, B, A, A, B, B]);
}

#[rstest]
#[case(0, Player::A)]
#[case(1, Player::B)]
#[case(2, Player::B)]
#[case(3, Player::A)]
#[case(4, Player::A)]
#[case(5, Player::B)]
#[case(6, Player::B)]
#[case(7, Player::A)]
fn test_tiebreak_server_sequence(#[case] index: u32, #[case] expected: Player) {
    assert_eq!(tiebreak_server(Player::A, index), expected);
    assert_eq!(tiebreak_server(Player::B, index), expected.other());
}

#[test]
fn test_tiebreak_serve_side_follows_points_played() {
    let mut s = tiebreak_state();
    assert_eq!(s.serve_side(), ServeSide::Deuce);
    apply_point_win(&mut s, Player::A);
    assert_eq!(s.serve_side(), ServeSide::Ad);
    apply_point_win(&mut s, Player::A);
    assert_eq!(s.serve_side(), ServeSide::Deuce);
}

#[test]
fn test_tiebreak_won_eight_six() {
    let mut s = tiebreak_state();
    for _ in 0..6 {
        apply_point_win(&mut s, Player::A);
        apply_point_win(&mut s, Player::B);
    }
    assert_eq!(score_label(&s), "TB 6-6");
    assert_eq!(apply_point_win(&mut s, Player::A), PointOutcome::Point);
    assert_eq!(score_label(&s), "TB 7-6");

    let out = apply_point_win(&mut s, Player::A);
    let record = SetRecord {
        a: 7,
        b: 6,
        tb: Some("8-6".to_string()),
    };
    assert_eq!(
        out,
        PointOutcome::Set {
            winner: Player::A,
            record: record.clone()
        }
    );
    assert!(!s.is_tiebreak());
    assert_eq!(s.sets(), Tally::new(1, 0));
    assert_eq!(s.games(), Tally::ZERO);
    assert_eq!(s.set_history(), &[record]);
}

#[test]
fn test_tiebreak_seven_love() {
    let mut s = tiebreak_state();
    assert_eq!(win_points(&mut s, Player::B, 6), PointOutcome::Point);
    assert!(matches!(
        apply_point_win(&mut s, Player::B),
        PointOutcome::Set {
            winner: Player::B,
            ..
        }
    ));
    assert_eq!(s.set_history()[0].tb.as_deref(), Some("0-7"));
    assert_eq!((s.set_history()[0].a, s.set_history()[0].b), (6, 7));
}

#[rstest]
#[case(0, 0, "0-0")]
#[case(1, 0, "15-0")]
#[case(1, 2, "15-30")]
#[case(3, 2, "40-30")]
#[case(0, 3, "0-40")]
#[case(3, 3, "DEUCE")]
#[case(5, 5, "DEUCE")]
#[case(4, 3, "AD A")]
#[case(6, 7, "AD B")]
fn test_score_label(#[case] a: u32, #[case] b: u32, #[case] expected: &str) {
    let mut s = ScoreState::new(Player::A);
    // Reach the count without closing the game: level first, then lead.
    let common = a.min(b);
    for _ in 0..common {
        apply_point_win(&mut s, Player::A);
        apply_point_win(&mut s, Player::B);
    }
    win_points(&mut s, Player::A, a - common);
    win_points(&mut s, Player::B, b - common);
    assert_eq!(score_label(&s), expected);
}

#[rstest]
#[case(3, 3, "40", "40")]
#[case(4, 3, "AD", "40")]
#[case(2, 1, "30", "15")]
fn test_point_text(#[case] a: u32, #[case] b: u32, #[case] text_a: &str, #[case] text_b: &str) {
    let mut s = ScoreState::new(Player::A);
    let common = a.min(b);
    for _ in 0..common {
        apply_point_win(&mut s, Player::A);
        apply_point_win(&mut s, Player::B);
    }
    win_points(&mut s, Player::A, a - common);
    win_points(&mut s, Player::B, b - common);
    assert_eq!(point_text(&s, Player::A), text_a);
    assert_eq!(point_text(&s, Player::B), text_b);
}

#[test]
fn test_snapshot_line() {
    let mut s = ScoreState::new(Player::A);
    win_game(&mut s, Player::A);
    apply_point_win(&mut s, Player::B);
    assert_eq!(
        snapshot_line(&s, s.current_server(), s.serve_side()),
        "S 0-0 · G 1-0 · P 0-15 · Srv B SV"
    );
}

#[test]
fn test_score_serializes_with_flat_field_names() {
    let s = tiebreak_state();
    let json = serde_json::to_value(&s).unwrap();
    assert_eq!(json["isTiebreak"], true);
    assert_eq!(json["tbStartingServer"], "A");
    assert_eq!(json["games"]["A"], 6);
    assert_eq!(json["points"]["B"], 0);
    assert_eq!(json["matchFinished"], false);

    let back: ScoreState = serde_json::from_value(json).unwrap();
    assert_eq!(back, s);
}

#[test]
fn test_score_loads_without_optional_fields() {
    let raw = r#"{
        "sets": {"A": 0, "B": 1},
        "games": {"A": 2, "B": 3},
        "points": {"A": 1, "B": 0},
        "isTiebreak": false,
        "tb": {"A": 0, "B": 0},
        "tbStartingServer": "A",
        "currentServer": "B"
    }"#;
    let s: ScoreState = serde_json::from_str(raw).unwrap();
    assert_eq!(s.sets(), Tally::new(0, 1));
    assert_eq!(s.current_server(), Player::B);
    assert!(s.set_history().is_empty());
    assert!(!s.is_finished());
    assert_eq!(score_label(&s), "15-0");
}
