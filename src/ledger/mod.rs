pub mod filter;

pub use self::filter::HistoryFilter;

use crate::error::{RallyError, RtResult};
use crate::point::{FinishDetail, Point, ShotEvent, ShotKind};
use crate::score::labels::snapshot_line;
use crate::score::{Player, ScoreState, ServeSide};
use serde::{Deserialize, Serialize};

/// A finished point as it entered the history. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedPoint {
    pub n: u32,
    pub winner: Player,
    pub reason: String,
    pub server: Player,
    pub side: ServeSide,
    /// Score entering the point.
    pub snapshot: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_detail: Option<FinishDetail>,
    pub events: Vec<ShotEvent>,
}

impl CompletedPoint {
    /// Copies `point` out; must run before the score is advanced.
    pub fn capture(
        n: u32,
        point: &Point,
        state: &ScoreState,
        winner: Player,
        reason: String,
    ) -> Self {
        Self {
            n,
            winner,
            reason,
            server: point.server(),
            side: point.side(),
            snapshot: snapshot_line(state, point.server(), point.side()),
            finish_detail: point.finish_detail().cloned(),
            events: point.events().to_vec(),
        }
    }

    /// Event tokens, optionally without serve/fault tokens.
    pub fn tokens(&self, include_serve: bool) -> Vec<String> {
        self.events
            .iter()
            .filter(|e| include_serve || e.kind != ShotKind::Serve)
            .map(ShotEvent::token)
            .collect()
    }

    /// Pattern key: tokens joined with ` - `. Empty when no event qualifies.
    pub fn pattern(&self, include_serve: bool) -> String {
        self.tokens(include_serve).join(" - ")
    }
}

/// Completed points plus the score before each of them.
///
/// Both stacks grow and shrink together; `points[i]` was played from
/// `undo_stack[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchLedger {
    match_points: Vec<CompletedPoint>,
    undo_stack: Vec<ScoreState>,
}

impl MatchLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[CompletedPoint] {
        &self.match_points
    }

    pub fn len(&self) -> usize {
        self.match_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.match_points.is_empty()
    }

    pub fn last(&self) -> Option<&CompletedPoint> {
        self.match_points.last()
    }

    pub fn next_number(&self) -> u32 {
        self.match_points.len() as u32 + 1
    }

    pub(crate) fn record(&mut self, before: ScoreState, point: CompletedPoint) {
        self.undo_stack.push(before);
        self.match_points.push(point);
    }

    /// Removes the newest point together with the score it was played from.
    pub(crate) fn pop_last(&mut self) -> Option<(CompletedPoint, ScoreState)> {
        if self.match_points.is_empty() || self.undo_stack.is_empty() {
            return None;
        }
        let point = self.match_points.pop()?;
        let before = self.undo_stack.pop()?;
        Some((point, before))
    }

    /// Checks a deserialized ledger before it is trusted.
    pub fn validate(&self) -> RtResult<()> {
        if self.match_points.len() != self.undo_stack.len() {
            return Err(RallyError::Validation(format!(
                "ledger holds {} points but {} undo snapshots",
                self.match_points.len(),
                self.undo_stack.len()
            )));
        }
        for (i, p) in self.match_points.iter().enumerate() {
            let expected = i as u32 + 1;
            if p.n != expected {
                return Err(RallyError::Validation(format!(
                    "point #{} is numbered {}",
                    expected, p.n
                )));
            }
        }
        for before in &self.undo_stack {
            before.validate()?;
        }
        Ok(())
    }
}
