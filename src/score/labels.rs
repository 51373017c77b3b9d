//! Human-readable renderings of the score used by the ledger snapshot,
//! the CLI and any other rendering collaborator.

use super::{GameScore, Player, ScoreState, ServeSide};

const CALLS: [&str; 4] = ["0", "15", "30", "40"];

fn call(points: u32) -> String {
    CALLS
        .get(points as usize)
        .map(|s| s.to_string())
        .unwrap_or_else(|| points.to_string())
}

/// Badge label: `TB 3-2`, `DEUCE`, `AD A`, `15-30`.
pub fn score_label(state: &ScoreState) -> String {
    match state.game() {
        GameScore::Tiebreak { points, .. } => format!("TB {}-{}", points.a, points.b),
        GameScore::Regular(p) => {
            if p.a >= 3 && p.b >= 3 {
                match p.leader() {
                    None => "DEUCE".to_string(),
                    Some(leader) => format!("AD {}", leader),
                }
            } else {
                format!("{}-{}", call(p.a), call(p.b))
            }
        }
    }
}

/// Scoreboard text for one player's points in the current game.
pub fn point_text(state: &ScoreState, player: Player) -> String {
    match state.game() {
        GameScore::Tiebreak { points, .. } => points.get(player).to_string(),
        GameScore::Regular(p) => {
            if p.a >= 3 && p.b >= 3 {
                if p.leader() == Some(player) {
                    "AD".to_string()
                } else {
                    "40".to_string()
                }
            } else {
                call(p.get(player))
            }
        }
    }
}

/// One-line score entering a point, stored on every completed point.
pub fn snapshot_line(state: &ScoreState, server: Player, side: ServeSide) -> String {
    let sets = state.sets();
    let games = state.games();
    format!(
        "S {}-{} · G {}-{} · P {} · Srv {} {}",
        sets.a,
        sets.b,
        games.a,
        games.b,
        score_label(state),
        server,
        side
    )
}
