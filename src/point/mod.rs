pub mod court;
pub mod finish;
pub mod recorder;

pub use self::court::{CourtHalf, ServeBox, ServeTarget, ZoneCode};
pub use self::finish::{FinishDetail, FinishKind, FinishStyle, Stroke, WinnerShot};
pub use self::recorder::{Rejection, Tap, TapConstraints, TapOutcome};

use crate::score::{Player, ScoreState, ServeSide};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ShotKind {
    Serve,
    Rally,
}

/// Where the tap that produced an event landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ShotMeta {
    #[serde(rename_all = "camelCase")]
    Serve {
        half: CourtHalf,
        serve_box: ServeBox,
        target: ServeTarget,
    },
    Fault,
    DoubleFault,
    #[serde(rename_all = "camelCase")]
    Rally {
        half: CourtHalf,
        row: u8,
        col: u8,
        /// Column of the previous bounce, for drawing the shot arrow.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from_col: Option<u8>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotEvent {
    #[serde(rename = "type")]
    pub kind: ShotKind,
    pub player: Player,
    pub code: String,
    pub meta: ShotMeta,
}

impl ShotEvent {
    /// Compact `player-code` token, e.g. `A-S SD T` or `B-R CP`.
    pub fn token(&self) -> String {
        format!("{}-{}", self.player, self.code)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// True for a serve that went in (not a fault).
    pub fn is_serve_in(&self) -> bool {
        matches!(self.meta, ShotMeta::Serve { .. })
    }

    pub fn is_fault(&self) -> bool {
        matches!(self.meta, ShotMeta::Fault)
    }
}

/// Ordered event log of the point in progress. Grows at the end and is
/// truncated from the end by undo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointLog(Vec<ShotEvent>);

impl PointLog {
    pub fn events(&self) -> &[ShotEvent] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_serve_in(&self) -> bool {
        self.0.iter().any(ShotEvent::is_serve_in)
    }

    pub fn has_fault(&self) -> bool {
        self.0.iter().any(ShotEvent::is_fault)
    }

    pub fn rally_count(&self) -> usize {
        self.0.iter().filter(|e| e.kind == ShotKind::Rally).count()
    }

    pub fn last_rally_col(&self) -> Option<u8> {
        self.0.iter().rev().find_map(|e| match e.meta {
            ShotMeta::Rally { col, .. } => Some(col),
            _ => None,
        })
    }

    pub(crate) fn push(&mut self, event: ShotEvent) {
        self.0.push(event);
    }

    pub(crate) fn pop(&mut self) -> Option<ShotEvent> {
        self.0.pop()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Phase {
    Serve,
    Rally,
}

impl Phase {
    /// A serve landed in: the only way into the rally.
    pub fn on_serve_in(self) -> Option<Phase> {
        match self {
            Self::Serve => Some(Self::Rally),
            Self::Rally => None,
        }
    }

    /// Phase implied by what is left in the log.
    pub fn from_log(log: &PointLog) -> Phase {
        if log.has_serve_in() {
            Self::Rally
        } else {
            Self::Serve
        }
    }
}

/// The point currently being played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    server: Player,
    side: ServeSide,
    phase: Phase,
    first_serve_fault: bool,
    events: PointLog,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    finish_detail: Option<FinishDetail>,
}

impl Point {
    pub fn start(state: &ScoreState) -> Self {
        Self {
            server: state.current_server(),
            side: state.serve_side(),
            phase: Phase::Serve,
            first_serve_fault: false,
            events: PointLog::default(),
            finish_detail: None,
        }
    }

    pub fn server(&self) -> Player {
        self.server
    }

    pub fn receiver(&self) -> Player {
        self.server.other()
    }

    pub fn side(&self) -> ServeSide {
        self.side
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn first_serve_fault(&self) -> bool {
        self.first_serve_fault
    }

    pub fn log(&self) -> &PointLog {
        &self.events
    }

    pub fn events(&self) -> &[ShotEvent] {
        self.events.events()
    }

    pub fn finish_detail(&self) -> Option<&FinishDetail> {
        self.finish_detail.as_ref()
    }

    /// Player expected to strike the next rally shot.
    pub fn next_hitter(&self) -> Player {
        if self.events.rally_count() % 2 == 0 {
            self.receiver()
        } else {
            self.server
        }
    }

    pub(crate) fn set_server(&mut self, server: Player) {
        self.server = server;
    }

    pub(crate) fn set_finish_detail(&mut self, detail: FinishDetail) {
        self.finish_detail = Some(detail);
    }
}
