//! The explicitly owned state of one match and every operation on it.

use crate::config::MatchOptions;
use crate::error::{RallyError, RtResult};
use crate::ledger::{CompletedPoint, MatchLedger};
use crate::point::finish::double_fault_reason;
use crate::point::recorder::{self, constraints};
use crate::point::{
    CourtHalf, FinishDetail, FinishKind, FinishStyle, Point, Rejection, ServeBox, ServeTarget, Tap,
    TapConstraints, TapOutcome,
};
use crate::score::{apply_point_win, Player, PointOutcome, ScoreState};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Names {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
}

impl Names {
    pub fn get(&self, p: Player) -> &str {
        match p {
            Player::A => &self.a,
            Player::B => &self.b,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchContext {
    names: Names,
    score: ScoreState,
    point: Point,
    ledger: MatchLedger,
}

impl MatchContext {
    pub fn new(opts: &MatchOptions) -> Self {
        let score = ScoreState::new(opts.first_server);
        let point = Point::start(&score);
        Self {
            names: Names {
                a: opts.name_a.clone(),
                b: opts.name_b.clone(),
            },
            score,
            point,
            ledger: MatchLedger::new(),
        }
    }

    /// Restores a serialized match, refusing one whose score, point or
    /// ledger is inconsistent.
    pub fn from_json(raw: &str) -> RtResult<Self> {
        let ctx: MatchContext = serde_json::from_str(raw)?;
        ctx.score.validate()?;
        if ctx.point.server() != ctx.score.current_server() {
            return Err(RallyError::Validation(format!(
                "point served by {} but score has {} serving",
                ctx.point.server(),
                ctx.score.current_server()
            )));
        }
        if ctx.point.side() != ctx.score.serve_side() {
            return Err(RallyError::Validation(format!(
                "point served from {} but score is on {}",
                ctx.point.side(),
                ctx.score.serve_side()
            )));
        }
        ctx.ledger.validate()?;
        Ok(ctx)
    }

    pub fn to_json(&self) -> RtResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn names(&self) -> &Names {
        &self.names
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn point(&self) -> &Point {
        &self.point
    }

    pub fn ledger(&self) -> &MatchLedger {
        &self.ledger
    }

    pub fn history(&self) -> &[CompletedPoint] {
        self.ledger.points()
    }

    pub fn constraints(&self) -> TapConstraints {
        constraints(&self.point)
    }

    /// Fresh score and history; player names are kept.
    pub fn new_match(&mut self, first_server: Player) {
        self.score = ScoreState::new(first_server);
        self.ledger = MatchLedger::new();
        self.point = Point::start(&self.score);
        info!(
            "New match: {} vs {}, {} serves first",
            self.names.a, self.names.b, first_server
        );
    }

    pub fn rename(&mut self, player: Player, name: &str) {
        let name = name.trim();
        let fallback = match player {
            Player::A => "Player A",
            Player::B => "Player B",
        };
        let name = if name.is_empty() { fallback } else { name };
        match player {
            Player::A => self.names.a = name.to_string(),
            Player::B => self.names.b = name.to_string(),
        }
    }

    /// Manual server change; only before the first event of a point.
    pub fn set_server(&mut self, server: Player) -> Result<(), Rejection> {
        if self.score.is_finished() {
            return Err(Rejection::MatchFinished);
        }
        if !self.point.log().is_empty() {
            return Err(Rejection::PointInProgress);
        }
        self.score.set_current_server(server);
        self.point.set_server(server);
        Ok(())
    }

    pub fn tap(&mut self, tap: Tap) -> TapOutcome {
        if self.score.is_finished() {
            return TapOutcome::Rejected(Rejection::MatchFinished);
        }
        recorder::apply(&mut self.point, tap)
    }

    pub fn serve(&mut self, half: CourtHalf, serve_box: ServeBox, target: ServeTarget) -> TapOutcome {
        self.tap(Tap::Serve {
            half,
            serve_box,
            target,
        })
    }

    pub fn rally(&mut self, half: CourtHalf, row: u8, col: u8) -> TapOutcome {
        self.tap(Tap::Rally { half, row, col })
    }

    /// Records a fault; a second fault ends the point for the receiver.
    pub fn fault(&mut self) -> TapOutcome {
        if self.score.is_finished() {
            return TapOutcome::Rejected(Rejection::MatchFinished);
        }
        let server = self.point.server();
        let outcome = recorder::fault(&mut self.point);
        if let TapOutcome::DoubleFault { winner } = outcome {
            self.close_point(winner, double_fault_reason(server));
        }
        outcome
    }

    pub fn undo(&mut self) -> TapOutcome {
        if self.score.is_finished() {
            return TapOutcome::Rejected(Rejection::MatchFinished);
        }
        recorder::undo(&mut self.point)
    }

    /// Throws away the point in progress; the score is untouched.
    pub fn reset_point(&mut self) -> Result<(), Rejection> {
        if self.score.is_finished() {
            return Err(Rejection::MatchFinished);
        }
        self.point = Point::start(&self.score);
        debug!("Point reset");
        Ok(())
    }

    /// Closes the point in progress. Refused once the match is finished.
    pub fn end_point(
        &mut self,
        winner: Player,
        reason: impl Into<String>,
    ) -> Result<PointOutcome, Rejection> {
        if self.score.is_finished() {
            return Err(Rejection::MatchFinished);
        }
        Ok(self.close_point(winner, reason.into()))
    }

    /// Ends the rally with an error or a winner hit by `offender`.
    pub fn finish_action(
        &mut self,
        kind: FinishKind,
        offender: Player,
        style: Option<FinishStyle>,
    ) -> Result<PointOutcome, Rejection> {
        if self.score.is_finished() {
            return Err(Rejection::MatchFinished);
        }
        let detail = FinishDetail::new(kind, offender, style)?;
        self.point.set_finish_detail(detail);
        Ok(self.close_point(kind.point_winner(offender), kind.reason(offender)))
    }

    fn close_point(&mut self, winner: Player, reason: String) -> PointOutcome {
        let before = self.score.clone();
        let entry = CompletedPoint::capture(
            self.ledger.next_number(),
            &self.point,
            &before,
            winner,
            reason,
        );
        let mut after = before.clone();
        let outcome = apply_point_win(&mut after, winner);

        debug!("Point #{} to {}: {}", entry.n, winner, entry.reason);
        self.ledger.record(before, entry);
        self.score = after;
        self.point = Point::start(&self.score);
        outcome
    }

    /// Takes back the most recent completed point. Returns false when
    /// there is nothing to take back.
    pub fn redo_last_point(&mut self) -> bool {
        let Some((removed, before)) = self.ledger.pop_last() else {
            return false;
        };
        self.score = before;
        self.score.set_finished(false);
        self.point = Point::start(&self.score);
        info!("Point #{} removed, score restored", removed.n);
        true
    }

    pub fn finish_match(&mut self) {
        self.score.set_finished(true);
        info!("Match finished");
    }

    pub fn resume_match(&mut self) {
        self.score.set_finished(false);
        info!("Match resumed");
    }
}
