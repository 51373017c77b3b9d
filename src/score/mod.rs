pub mod engine;
pub mod labels;

pub use self::engine::{apply_point_win, tiebreak_server, PointOutcome};

use crate::error::{RallyError, RtResult};
use serde::{Deserialize, Serialize};
use std::ops::Index;
use strum_macros::{Display, EnumIter, EnumString};

/// Points needed to take a regular game before deuce rules kick in.
pub const GAME_POINTS: u32 = 4;
/// Games needed to take a set (with a two-game lead).
pub const SET_GAMES: u32 = 6;
/// Minimum points to win a tiebreak (with a two-point lead).
pub const TIEBREAK_POINTS: u32 = 7;
/// Largest counter value a stored score may carry.
pub const COUNTER_LIMIT: u32 = 1 << 16;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Player {
    A,
    B,
}

impl Player {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// Deuce (`SD`) or ad (`SV`) court, by parity of points played.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum ServeSide {
    #[serde(rename = "SD")]
    #[strum(serialize = "SD")]
    Deuce,
    #[serde(rename = "SV")]
    #[strum(serialize = "SV")]
    Ad,
}

impl ServeSide {
    pub fn from_points_played(played: u32) -> Self {
        if played % 2 == 0 {
            Self::Deuce
        } else {
            Self::Ad
        }
    }
}

/// A per-player counter pair, serialized as `{"A": .., "B": ..}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tally {
    #[serde(rename = "A")]
    pub a: u32,
    #[serde(rename = "B")]
    pub b: u32,
}

impl Tally {
    pub const ZERO: Tally = Tally { a: 0, b: 0 };

    pub const fn new(a: u32, b: u32) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn get(&self, p: Player) -> u32 {
        match p {
            Player::A => self.a,
            Player::B => self.b,
        }
    }

    #[inline]
    pub fn bump(&mut self, p: Player) {
        match p {
            Player::A => self.a += 1,
            Player::B => self.b += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.a + self.b
    }

    pub fn max(&self) -> u32 {
        self.a.max(self.b)
    }

    /// Absolute difference between the two sides.
    pub fn lead(&self) -> u32 {
        self.a.abs_diff(self.b)
    }

    /// The side ahead, or `None` when level.
    pub fn leader(&self) -> Option<Player> {
        match self.a.cmp(&self.b) {
            std::cmp::Ordering::Greater => Some(Player::A),
            std::cmp::Ordering::Less => Some(Player::B),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl Index<Player> for Tally {
    type Output = u32;

    fn index(&self, p: Player) -> &u32 {
        match p {
            Player::A => &self.a,
            Player::B => &self.b,
        }
    }
}

/// Final game count of a completed set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRecord {
    #[serde(rename = "A")]
    pub a: u32,
    #[serde(rename = "B")]
    pub b: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tb: Option<String>,
}

/// Score of the game in progress. Only one representation is ever live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameScore {
    Regular(Tally),
    Tiebreak {
        points: Tally,
        starting_server: Player,
    },
}

impl GameScore {
    pub fn is_tiebreak(&self) -> bool {
        matches!(self, Self::Tiebreak { .. })
    }

    pub fn points(&self) -> Tally {
        match self {
            Self::Regular(p) => *p,
            Self::Tiebreak { points, .. } => *points,
        }
    }

    pub fn points_played(&self) -> u32 {
        self.points().total()
    }
}

/// Whole-match score. Mutated only through [`engine::apply_point_win`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ScoreRecord", into = "ScoreRecord")]
pub struct ScoreState {
    pub(crate) sets: Tally,
    pub(crate) games: Tally,
    pub(crate) game: GameScore,
    pub(crate) current_server: Player,
    pub(crate) set_history: Vec<SetRecord>,
    pub(crate) match_finished: bool,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new(Player::A)
    }
}

impl ScoreState {
    pub fn new(first_server: Player) -> Self {
        Self {
            sets: Tally::ZERO,
            games: Tally::ZERO,
            game: GameScore::Regular(Tally::ZERO),
            current_server: first_server,
            set_history: Vec::new(),
            match_finished: false,
        }
    }

    pub fn sets(&self) -> Tally {
        self.sets
    }

    pub fn games(&self) -> Tally {
        self.games
    }

    pub fn game(&self) -> GameScore {
        self.game
    }

    pub fn is_tiebreak(&self) -> bool {
        self.game.is_tiebreak()
    }

    pub fn current_server(&self) -> Player {
        self.current_server
    }

    pub fn set_history(&self) -> &[SetRecord] {
        &self.set_history
    }

    pub fn is_finished(&self) -> bool {
        self.match_finished
    }

    pub fn serve_side(&self) -> ServeSide {
        ServeSide::from_points_played(self.game.points_played())
    }

    pub(crate) fn set_finished(&mut self, finished: bool) {
        self.match_finished = finished;
    }

    pub(crate) fn set_current_server(&mut self, server: Player) {
        self.current_server = server;
    }

    /// Checks a deserialized score for a state the engine can reach.
    pub fn validate(&self) -> RtResult<()> {
        let points = self.game.points();
        for (what, t) in [("sets", self.sets), ("games", self.games), ("points", points)] {
            if t.max() > COUNTER_LIMIT {
                return Err(invalid(format!("{} {}-{} out of range", what, t.a, t.b)));
            }
        }

        match self.game {
            GameScore::Regular(p) => {
                let deuce = p.a.min(p.b) >= GAME_POINTS - 1;
                if (deuce && p.lead() > 1) || (!deuce && p.max() >= GAME_POINTS) {
                    return Err(invalid(format!("game {}-{} is already decided", p.a, p.b)));
                }
                let g = self.games;
                if g.max() > SET_GAMES || (g.max() == SET_GAMES && g.lead() != 1) {
                    return Err(invalid(format!(
                        "games {}-{} outside a regular set",
                        g.a, g.b
                    )));
                }
            }
            GameScore::Tiebreak { points: p, .. } => {
                if self.games != Tally::new(SET_GAMES, SET_GAMES) {
                    return Err(invalid(format!(
                        "tiebreak at games {}-{}",
                        self.games.a, self.games.b
                    )));
                }
                if p.max() >= TIEBREAK_POINTS && p.lead() >= 2 {
                    return Err(invalid(format!("tiebreak {}-{} is already decided", p.a, p.b)));
                }
            }
        }

        if self.set_history.len() as u64 > u64::from(self.sets.total()) {
            return Err(invalid(format!(
                "{} set records for {} sets",
                self.set_history.len(),
                self.sets.total()
            )));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> RallyError {
    RallyError::Validation(msg)
}

/// Flat on-disk shape of [`ScoreState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub sets: Tally,
    pub games: Tally,
    pub points: Tally,
    pub is_tiebreak: bool,
    pub tb: Tally,
    pub tb_starting_server: Player,
    pub current_server: Player,
    #[serde(default)]
    pub set_history: Vec<SetRecord>,
    #[serde(default)]
    pub match_finished: bool,
}

impl From<ScoreRecord> for ScoreState {
    fn from(r: ScoreRecord) -> Self {
        let game = if r.is_tiebreak {
            GameScore::Tiebreak {
                points: r.tb,
                starting_server: r.tb_starting_server,
            }
        } else {
            GameScore::Regular(r.points)
        };
        Self {
            sets: r.sets,
            games: r.games,
            game,
            current_server: r.current_server,
            set_history: r.set_history,
            match_finished: r.match_finished,
        }
    }
}

impl From<ScoreState> for ScoreRecord {
    fn from(s: ScoreState) -> Self {
        let (points, tb, is_tiebreak, tb_starting_server) = match s.game {
            GameScore::Regular(p) => (p, Tally::ZERO, false, s.current_server),
            GameScore::Tiebreak {
                points,
                starting_server,
            } => (Tally::ZERO, points, true, starting_server),
        };
        Self {
            sets: s.sets,
            games: s.games,
            points,
            is_tiebreak,
            tb,
            tb_starting_server,
            current_server: s.current_server,
            set_history: s.set_history,
            match_finished: s.match_finished,
        }
    }
}
