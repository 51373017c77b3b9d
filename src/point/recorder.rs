use super::court::{CourtHalf, ServeBox, ServeTarget, ZoneCode};
use super::finish::FinishKind;
use super::{Phase, Point, ShotEvent, ShotKind, ShotMeta};
use crate::score::Player;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// A tap reported by the input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Tap {
    #[serde(rename_all = "camelCase")]
    Serve {
        half: CourtHalf,
        serve_box: ServeBox,
        target: ServeTarget,
    },
    Rally { half: CourtHalf, row: u8, col: u8 },
}

/// Why a tap or command was refused. The point is left untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("match is finished")]
    MatchFinished,
    #[error("not allowed during the {0} phase")]
    WrongPhase(Phase),
    #[error("serve must land in the {expected} half")]
    WrongServeHalf { expected: CourtHalf },
    #[error("serve is always crosscourt: use the {required} box")]
    WrongServeBox { required: ServeBox },
    #[error("tap the {expected} half, where the ball lands")]
    WrongRallyHalf { expected: CourtHalf },
    #[error("cell ({row},{col}) is outside the 3x3 grid")]
    CellOutOfRange { row: u8, col: u8 },
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("server cannot change once the point has started")]
    PointInProgress,
    #[error("finish detail does not match a {kind} finish")]
    StyleMismatch { kind: FinishKind },
}

/// Which regions the input collaborator should leave enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TapConstraints {
    pub phase: Phase,
    pub serve_half: Option<CourtHalf>,
    pub serve_box: Option<ServeBox>,
    pub rally_half: Option<CourtHalf>,
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapOutcome {
    Accepted(TapConstraints),
    Rejected(Rejection),
    /// Second fault: the point is over and the receiver won it.
    DoubleFault { winner: Player },
}

impl TapOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Rejected(r) => Some(*r),
            _ => None,
        }
    }
}

pub fn constraints(point: &Point) -> TapConstraints {
    match point.phase() {
        Phase::Serve => {
            let half = CourtHalf::landing_for(point.server());
            TapConstraints {
                phase: Phase::Serve,
                serve_half: Some(half),
                serve_box: Some(ServeBox::required(half, point.side())),
                rally_half: None,
                hint: format!(
                    "SERVE ({}) · side {} · tap T/C/A",
                    point.server(),
                    point.side()
                ),
            }
        }
        Phase::Rally => TapConstraints {
            phase: Phase::Rally,
            serve_half: None,
            serve_box: None,
            rally_half: Some(CourtHalf::landing_for(point.next_hitter())),
            hint: "RALLY · tap direction (P/M/C)".to_string(),
        },
    }
}

pub fn apply(point: &mut Point, tap: Tap) -> TapOutcome {
    match tap {
        Tap::Serve {
            half,
            serve_box,
            target,
        } => serve_tap(point, half, serve_box, target),
        Tap::Rally { half, row, col } => rally_tap(point, half, row, col),
    }
}

fn reject(r: Rejection) -> TapOutcome {
    warn!("Tap rejected: {}", r);
    TapOutcome::Rejected(r)
}

pub fn serve_tap(
    point: &mut Point,
    half: CourtHalf,
    serve_box: ServeBox,
    target: ServeTarget,
) -> TapOutcome {
    let Some(next_phase) = point.phase.on_serve_in() else {
        return reject(Rejection::WrongPhase(point.phase));
    };

    let expected = CourtHalf::landing_for(point.server);
    if half != expected {
        return reject(Rejection::WrongServeHalf { expected });
    }
    let required = ServeBox::required(expected, point.side);
    if serve_box != required {
        return reject(Rejection::WrongServeBox { required });
    }

    let event = ShotEvent {
        kind: ShotKind::Serve,
        player: point.server,
        code: format!("S {} {}", point.side, target),
        meta: ShotMeta::Serve {
            half,
            serve_box,
            target,
        },
    };
    debug!("Serve in: {}", event.token());
    point.events.push(event);
    point.phase = next_phase;
    TapOutcome::Accepted(constraints(point))
}

pub fn rally_tap(point: &mut Point, half: CourtHalf, row: u8, col: u8) -> TapOutcome {
    if point.phase != Phase::Rally {
        return reject(Rejection::WrongPhase(point.phase));
    }

    let hitter = point.next_hitter();
    let expected = CourtHalf::landing_for(hitter);
    if half != expected {
        return reject(Rejection::WrongRallyHalf { expected });
    }
    let Some(zone) = ZoneCode::from_tap(half, row, col) else {
        return reject(Rejection::CellOutOfRange { row, col });
    };

    let is_return = point.events.rally_count() == 0;
    let code = if is_return {
        format!("R {}", zone)
    } else {
        zone.to_string()
    };

    let event = ShotEvent {
        kind: ShotKind::Rally,
        player: hitter,
        code,
        meta: ShotMeta::Rally {
            half,
            row,
            col,
            from_col: point.events.last_rally_col(),
        },
    };
    debug!("Rally shot: {}", event.token());
    point.events.push(event);
    TapOutcome::Accepted(constraints(point))
}

/// First call records a fault, the second a double fault that ends the point.
pub fn fault(point: &mut Point) -> TapOutcome {
    if point.phase != Phase::Serve {
        return reject(Rejection::WrongPhase(point.phase));
    }

    let (code, meta) = if point.first_serve_fault {
        (format!("S {} DF", point.side), ShotMeta::DoubleFault)
    } else {
        (format!("S {} F", point.side), ShotMeta::Fault)
    };
    point.events.push(ShotEvent {
        kind: ShotKind::Serve,
        player: point.server,
        code,
        meta,
    });

    if meta == ShotMeta::DoubleFault {
        let winner = point.receiver();
        debug!("Double fault by {}, point to {}", point.server, winner);
        return TapOutcome::DoubleFault { winner };
    }

    point.first_serve_fault = true;
    debug!("Fault by {}, second serve", point.server);
    TapOutcome::Accepted(constraints(point))
}

/// Pops the last event and re-derives phase and fault state from the rest.
pub fn undo(point: &mut Point) -> TapOutcome {
    if point.events.pop().is_none() {
        return TapOutcome::Rejected(Rejection::NothingToUndo);
    }
    point.phase = Phase::from_log(&point.events);
    point.first_serve_fault = point.events.has_fault();
    TapOutcome::Accepted(constraints(point))
}
