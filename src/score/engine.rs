use super::{
    GameScore, Player, ScoreState, SetRecord, Tally, GAME_POINTS, SET_GAMES, TIEBREAK_POINTS,
};
use tracing::{debug, info};

/// What a single point did to the score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointOutcome {
    /// Counts moved, no game closed (includes deuce/advantage swings).
    Point,
    Game { winner: Player },
    /// A game closed at 5-6 / 6-5 and the set went to 6-6.
    TiebreakStarted { starting_server: Player },
    Set { winner: Player, record: SetRecord },
}

/// Server of the tiebreak point at `index` (0-based).
///
/// Point 0 goes to the starting server, then the serve changes hands after
/// the first point and every two points after that: A,B,B,A,A,B,B,...
///
/// This is deliberately not the `(index - 2) / 2` block formula, which
/// yields A,B,A,A,B,B and hands the starting server a second serve at index 2.
pub fn tiebreak_server(starting_server: Player, index: u32) -> Player {
    if index == 0 {
        return starting_server;
    }
    let block = (index - 1) / 2;
    if block % 2 == 0 {
        starting_server.other()
    } else {
        starting_server
    }
}

/// The only score-mutating operation.
///
/// Works on a copy and assigns it back once every rule has been applied.
pub fn apply_point_win(state: &mut ScoreState, winner: Player) -> PointOutcome {
    let mut next = state.clone();
    let outcome = match next.game {
        GameScore::Tiebreak {
            points,
            starting_server,
        } => tiebreak_point(&mut next, points, starting_server, winner),
        GameScore::Regular(points) => regular_point(&mut next, points, winner),
    };
    *state = next;
    outcome
}

fn tiebreak_point(
    next: &mut ScoreState,
    mut points: Tally,
    starting_server: Player,
    winner: Player,
) -> PointOutcome {
    points.bump(winner);
    next.current_server = tiebreak_server(starting_server, points.total());

    if points.max() >= TIEBREAK_POINTS && points.lead() >= 2 {
        let mut final_games = next.games;
        final_games.bump(winner);
        let record = SetRecord {
            a: final_games.a,
            b: final_games.b,
            tb: Some(format!("{}-{}", points.a, points.b)),
        };
        close_set(next, winner, record.clone());
        info!(
            "Set to {} via tiebreak {} ({}-{})",
            winner, record.tb.as_deref().unwrap_or_default(), record.a, record.b
        );
        return PointOutcome::Set { winner, record };
    }

    next.game = GameScore::Tiebreak {
        points,
        starting_server,
    };
    PointOutcome::Point
}

fn regular_point(next: &mut ScoreState, mut points: Tally, winner: Player) -> PointOutcome {
    let deuce_zone = points.a >= 3 && points.b >= 3;
    points.bump(winner);

    let closes = if deuce_zone {
        points.lead() >= 2 && points.max() >= GAME_POINTS
    } else {
        points.get(winner) >= GAME_POINTS
    };

    if !closes {
        next.game = GameScore::Regular(points);
        return PointOutcome::Point;
    }

    next.games.bump(winner);
    next.game = GameScore::Regular(Tally::ZERO);
    next.current_server = next.current_server.other();
    debug!(
        "Game to {} (games {}-{})",
        winner, next.games.a, next.games.b
    );

    if next.games == Tally::new(SET_GAMES, SET_GAMES) {
        let starting_server = next.current_server;
        next.game = GameScore::Tiebreak {
            points: Tally::ZERO,
            starting_server,
        };
        info!("Tiebreak at 6-6, {} serves first", starting_server);
        return PointOutcome::TiebreakStarted { starting_server };
    }

    if next.games.max() >= SET_GAMES && next.games.lead() >= 2 {
        let record = SetRecord {
            a: next.games.a,
            b: next.games.b,
            tb: None,
        };
        close_set(next, winner, record.clone());
        info!("Set to {} ({}-{})", winner, record.a, record.b);
        return PointOutcome::Set { winner, record };
    }

    PointOutcome::Game { winner }
}

fn close_set(next: &mut ScoreState, winner: Player, record: SetRecord) {
    next.set_history.push(record);
    next.sets.bump(winner);
    next.games = Tally::ZERO;
    next.game = GameScore::Regular(Tally::ZERO);
    next.current_server = next.current_server.other();
}
