#![allow(dead_code)]

use rallytrack::config::MatchOptions;
use rallytrack::point::{CourtHalf, ServeBox, ServeTarget, TapOutcome};
use rallytrack::score::{apply_point_win, Player, PointOutcome, ScoreState};
use rallytrack::session::MatchContext;

pub fn new_ctx() -> MatchContext {
    MatchContext::new(&MatchOptions::default())
}

/// Awards `n` points in a row to `player`, returning the last outcome.
pub fn win_points(state: &mut ScoreState, player: Player, n: u32) -> PointOutcome {
    let mut last = PointOutcome::Point;
    for _ in 0..n {
        last = apply_point_win(state, player);
    }
    last
}

/// Awards a love game to `player`.
pub fn win_game(state: &mut ScoreState, player: Player) -> PointOutcome {
    win_points(state, player, 4)
}

/// Plays games alternately (A first) until the set reaches `games`-`games`.
pub fn level_games(state: &mut ScoreState, games: u32) -> PointOutcome {
    let mut last = PointOutcome::Point;
    for _ in 0..games {
        win_game(state, Player::A);
        last = win_game(state, Player::B);
    }
    last
}

/// State sitting at 6-6, tiebreak 0-0.
pub fn tiebreak_state() -> ScoreState {
    let mut s = ScoreState::new(Player::A);
    level_games(&mut s, 6);
    assert!(s.is_tiebreak());
    s
}

/// The legal serve box for whoever is serving right now.
pub fn legal_serve(ctx: &MatchContext) -> (CourtHalf, ServeBox) {
    let half = CourtHalf::landing_for(ctx.point().server());
    (half, ServeBox::required(half, ctx.point().side()))
}

pub fn serve_in(ctx: &mut MatchContext, target: ServeTarget) -> TapOutcome {
    let (half, serve_box) = legal_serve(ctx);
    ctx.serve(half, serve_box, target)
}

/// Tap for the next rally shot at `(row, col)` in the correct half.
pub fn hit(ctx: &mut MatchContext, row: u8, col: u8) -> TapOutcome {
    let half = CourtHalf::landing_for(ctx.point().next_hitter());
    ctx.rally(half, row, col)
}

/// Serve, return, one more shot, then the point goes to `winner`.
pub fn play_point(ctx: &mut MatchContext, winner: Player) -> PointOutcome {
    assert!(serve_in(ctx, ServeTarget::Tee).is_accepted());
    assert!(hit(ctx, 0, 0).is_accepted());
    assert!(hit(ctx, 1, 2).is_accepted());
    ctx.end_point(winner, "Point").expect("match is live")
}
