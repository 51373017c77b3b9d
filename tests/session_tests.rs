mod common;

use common::{hit, new_ctx, play_point, serve_in};
use rallytrack::config::MatchOptions;
use rallytrack::export::export_rows;
use rallytrack::ledger::filter::HistoryFilter;
use rallytrack::point::{
    FinishDetail, FinishKind, FinishStyle, Rejection, ServeTarget, Stroke, TapOutcome, WinnerShot,
};
use rallytrack::score::{GameScore, Player, PointOutcome, ServeSide, Tally};
use rallytrack::session::MatchContext;

#[test]
fn test_end_point_captures_score_entering_the_point() {
    let mut ctx = new_ctx();
    play_point(&mut ctx, Player::A);
    play_point(&mut ctx, Player::B);

    let p = &ctx.history()[1];
    assert_eq!(p.n, 2);
    assert_eq!(p.snapshot, "S 0-0 · G 0-0 · P 15-0 · Srv A SV");
    assert_eq!(p.server, Player::A);
    assert_eq!(p.side, ServeSide::Ad);
    assert_eq!(p.pattern(true), "A-S SV T - B-R CC - A-MP");
    assert_eq!(p.pattern(false), "B-R CC - A-MP");
    assert_eq!(ctx.score().game().points(), Tally::new(1, 1));
}

#[test]
fn test_points_are_numbered_in_order() {
    let mut ctx = new_ctx();
    for _ in 0..5 {
        play_point(&mut ctx, Player::B);
    }
    let numbers: Vec<u32> = ctx.history().iter().map(|p| p.n).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    assert_eq!(ctx.score().games(), Tally::new(0, 1));
    assert_eq!(ctx.point().server(), Player::B);
}

#[test]
fn test_redo_last_point_restores_everything() {
    let mut ctx = new_ctx();
    for _ in 0..3 {
        play_point(&mut ctx, Player::A);
    }
    let before = ctx.score().clone();
    let history_len = ctx.ledger().len();

    let out = play_point(&mut ctx, Player::A);
    assert_eq!(out, PointOutcome::Game { winner: Player::A });
    assert_eq!(ctx.score().current_server(), Player::B);

    assert!(ctx.redo_last_point());
    assert_eq!(ctx.score(), &before);
    assert_eq!(ctx.ledger().len(), history_len);
    assert_eq!(ctx.point().server(), Player::A);
    assert!(ctx.point().events().is_empty());
}

#[test]
fn test_redo_across_a_set_restores_set_history() {
    let mut ctx = new_ctx();
    // 6-0 set for A.
    for _ in 0..23 {
        ctx.end_point(Player::A, "Point").unwrap();
    }
    let before = ctx.score().clone();
    let out = ctx.end_point(Player::A, "Point").unwrap();
    assert!(matches!(out, PointOutcome::Set { winner: Player::A, .. }));
    assert_eq!(ctx.score().set_history().len(), 1);

    assert!(ctx.redo_last_point());
    assert_eq!(ctx.score(), &before);
    assert!(ctx.score().set_history().is_empty());
    assert_eq!(ctx.score().games(), Tally::new(5, 0));
}

#[test]
fn test_redo_with_empty_ledger() {
    let mut ctx = new_ctx();
    let before = ctx.clone();
    assert!(!ctx.redo_last_point());
    assert_eq!(ctx, before);
}

#[test]
fn test_redo_discards_the_point_in_progress() {
    let mut ctx = new_ctx();
    play_point(&mut ctx, Player::B);
    serve_in(&mut ctx, ServeTarget::Body);
    assert!(ctx.redo_last_point());
    assert!(ctx.point().events().is_empty());
    assert_eq!(ctx.point().side(), ServeSide::Deuce);
}

#[test]
fn test_finished_match_refuses_input() {
    let mut ctx = new_ctx();
    play_point(&mut ctx, Player::A);
    ctx.finish_match();
    let before = ctx.clone();

    assert_eq!(
        ctx.end_point(Player::B, "Point"),
        Err(Rejection::MatchFinished)
    );
    assert_eq!(
        serve_in(&mut ctx, ServeTarget::Tee),
        TapOutcome::Rejected(Rejection::MatchFinished)
    );
    assert_eq!(
        ctx.fault(),
        TapOutcome::Rejected(Rejection::MatchFinished)
    );
    assert_eq!(
        ctx.finish_action(FinishKind::Winner, Player::A, None),
        Err(Rejection::MatchFinished)
    );
    assert_eq!(ctx, before);

    ctx.resume_match();
    assert!(ctx.end_point(Player::B, "Point").is_ok());
    assert_eq!(ctx.ledger().len(), 2);
}

#[test]
fn test_finished_match_keeps_its_server() {
    let mut ctx = new_ctx();
    play_point(&mut ctx, Player::A);
    ctx.finish_match();
    let before = ctx.clone();

    assert_eq!(ctx.set_server(Player::B), Err(Rejection::MatchFinished));
    assert_eq!(ctx.score().current_server(), Player::A);
    assert_eq!(ctx.point().server(), Player::A);
    assert_eq!(ctx, before);
}

#[test]
fn test_finished_match_keeps_point_in_progress() {
    let mut ctx = new_ctx();
    serve_in(&mut ctx, ServeTarget::Tee);
    ctx.finish_match();
    let before = ctx.clone();

    assert_eq!(ctx.undo(), TapOutcome::Rejected(Rejection::MatchFinished));
    assert_eq!(ctx.reset_point(), Err(Rejection::MatchFinished));
    assert_eq!(ctx.point().events().len(), 1);
    assert_eq!(ctx.point().events()[0].token(), "A-S SD T");
    assert_eq!(ctx, before);

    ctx.resume_match();
    assert!(ctx.undo().is_accepted());
    assert!(ctx.point().events().is_empty());
}

#[test]
fn test_redo_reopens_a_finished_match() {
    let mut ctx = new_ctx();
    play_point(&mut ctx, Player::A);
    ctx.finish_match();
    assert!(ctx.redo_last_point());
    assert!(!ctx.score().is_finished());
}

#[test]
fn test_finish_action_unforced_error() {
    let mut ctx = new_ctx();
    serve_in(&mut ctx, ServeTarget::Tee);
    hit(&mut ctx, 1, 1);

    let out = ctx.finish_action(
        FinishKind::UnforcedError,
        Player::B,
        Some(FinishStyle::Stroke(Stroke::Backhand)),
    );
    assert_eq!(out, Ok(PointOutcome::Point));

    let p = &ctx.history()[0];
    assert_eq!(p.winner, Player::A);
    assert_eq!(p.reason, "Unforced error (B)");
    assert_eq!(
        p.finish_detail,
        Some(FinishDetail {
            kind: FinishKind::UnforcedError,
            offender: Player::B,
            style: Some(FinishStyle::Stroke(Stroke::Backhand)),
        })
    );
    assert!(ctx.point().finish_detail().is_none());
}

#[test]
fn test_finish_action_winner_scores_for_hitter() {
    let mut ctx = new_ctx();
    serve_in(&mut ctx, ServeTarget::Tee);
    ctx.finish_action(
        FinishKind::Winner,
        Player::A,
        Some(FinishStyle::WinnerShot(WinnerShot::Ace)),
    )
    .unwrap();
    let p = &ctx.history()[0];
    assert_eq!(p.winner, Player::A);
    assert_eq!(p.reason, "Winner (A)");
    assert_eq!(p.finish_detail.as_ref().and_then(|d| d.label()), Some("Ace"));
}

#[test]
fn test_finish_action_forced_error_without_detail() {
    let mut ctx = new_ctx();
    ctx.finish_action(FinishKind::ForcedError, Player::A, None)
        .unwrap();
    let p = &ctx.history()[0];
    assert_eq!(p.winner, Player::B);
    assert_eq!(p.reason, "Forced error (A)");
    assert_eq!(p.finish_detail.as_ref().and_then(|d| d.label()), None);
}

#[test]
fn test_finish_action_rejects_mismatched_style() {
    let mut ctx = new_ctx();
    let out = ctx.finish_action(
        FinishKind::Winner,
        Player::A,
        Some(FinishStyle::Stroke(Stroke::Forehand)),
    );
    assert_eq!(
        out,
        Err(Rejection::StyleMismatch {
            kind: FinishKind::Winner
        })
    );
    assert!(ctx.ledger().is_empty());
}

#[test]
fn test_set_server_only_before_first_event() {
    let mut ctx = new_ctx();
    assert_eq!(ctx.set_server(Player::B), Ok(()));
    assert_eq!(ctx.score().current_server(), Player::B);
    assert_eq!(ctx.point().server(), Player::B);

    ctx.fault();
    assert_eq!(ctx.set_server(Player::A), Err(Rejection::PointInProgress));
    assert_eq!(ctx.point().server(), Player::B);
}

#[test]
fn test_reset_point_keeps_score() {
    let mut ctx = new_ctx();
    play_point(&mut ctx, Player::A);
    serve_in(&mut ctx, ServeTarget::Tee);
    hit(&mut ctx, 0, 0);
    let score = ctx.score().clone();

    assert_eq!(ctx.reset_point(), Ok(()));
    assert!(ctx.point().events().is_empty());
    assert_eq!(ctx.score(), &score);
    assert_eq!(ctx.ledger().len(), 1);
}

#[test]
fn test_new_match_keeps_names() {
    let opts = MatchOptions {
        name_a: "Rafa".to_string(),
        name_b: "Roger".to_string(),
        first_server: Player::A,
    };
    let mut ctx = MatchContext::new(&opts);
    play_point(&mut ctx, Player::A);
    ctx.finish_match();

    ctx.new_match(Player::B);
    assert_eq!(ctx.names().get(Player::A), "Rafa");
    assert!(ctx.ledger().is_empty());
    assert!(!ctx.score().is_finished());
    assert_eq!(ctx.score().current_server(), Player::B);
    assert_eq!(ctx.score().game(), GameScore::Regular(Tally::ZERO));
}

#[test]
fn test_rename_falls_back_to_default() {
    let mut ctx = new_ctx();
    ctx.rename(Player::B, "  Serena ");
    assert_eq!(ctx.names().get(Player::B), "Serena");
    ctx.rename(Player::B, "   ");
    assert_eq!(ctx.names().get(Player::B), "Player B");
}

#[test]
fn test_history_filter() {
    let mut ctx = new_ctx();
    play_point(&mut ctx, Player::A);
    ctx.fault();
    ctx.fault();
    ctx.finish_action(FinishKind::Winner, Player::B, None).unwrap();

    let by_winner = HistoryFilter {
        winner: Some(Player::B),
        ..Default::default()
    };
    let numbers: Vec<u32> = by_winner.apply(ctx.history()).iter().map(|p| p.n).collect();
    assert_eq!(numbers, vec![2, 3]);

    let double_faults = HistoryFilter {
        reason_prefix: Some("Double fault".to_string()),
        ..Default::default()
    };
    assert_eq!(double_faults.apply(ctx.history()).len(), 1);

    let search = HistoryFilter {
        search: Some("b-r cc".to_string()),
        side: Some(ServeSide::Deuce),
        ..Default::default()
    };
    let hits = search.apply(ctx.history());
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].n, 1);

    assert_eq!(HistoryFilter::default().apply(ctx.history()).len(), 3);
}

#[test]
fn test_export_rows() {
    let mut ctx = new_ctx();
    play_point(&mut ctx, Player::A);
    ctx.fault();
    ctx.fault();

    let table = export_rows(ctx.history(), true, true);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.max_shots, 3);
    assert_eq!(table.rows[0].server, "A (SD)");
    assert_eq!(table.rows[1].server, "A (SV)");
    assert_eq!(table.rows[1].shots, vec!["A-S SV F", "A-S SV DF"]);

    let without_serve = export_rows(ctx.history(), false, false);
    assert_eq!(without_serve.max_shots, 0);
    assert_eq!(without_serve.rows[0].pattern, "B-R CC - A-MP");
    assert!(without_serve.rows[1].shots.is_empty());
}

#[test]
fn test_snapshot_round_trip_through_json() {
    let mut ctx = new_ctx();
    ctx.rename(Player::A, "Iga");
    play_point(&mut ctx, Player::A);
    serve_in(&mut ctx, ServeTarget::Wide);

    let raw = ctx.to_json().unwrap();
    let back = MatchContext::from_json(&raw).unwrap();
    assert_eq!(back, ctx);
}

#[test]
fn test_from_json_rejects_mismatched_ledger() {
    let mut ctx = new_ctx();
    play_point(&mut ctx, Player::A);
    let mut json: serde_json::Value = serde_json::from_str(&ctx.to_json().unwrap()).unwrap();
    json["ledger"]["undoStack"] = serde_json::json!([]);

    let err = MatchContext::from_json(&json.to_string()).unwrap_err();
    assert!(err.to_string().contains("1 points but 0 undo snapshots"));
}
