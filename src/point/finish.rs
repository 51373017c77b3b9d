use super::recorder::Rejection;
use crate::score::Player;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// How a rally ended, from the offender's point of view.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum FinishKind {
    #[serde(rename = "UE")]
    #[strum(serialize = "UE")]
    UnforcedError,
    #[serde(rename = "FE")]
    #[strum(serialize = "FE")]
    ForcedError,
    #[serde(rename = "WINNER")]
    #[strum(to_string = "WINNER", serialize = "W")]
    Winner,
}

impl FinishKind {
    /// A winner scores for its hitter, an error for the opponent.
    pub fn point_winner(self, offender: Player) -> Player {
        match self {
            Self::Winner => offender,
            Self::UnforcedError | Self::ForcedError => offender.other(),
        }
    }

    pub fn reason(self, offender: Player) -> String {
        match self {
            Self::UnforcedError => format!("Unforced error ({})", offender),
            Self::ForcedError => format!("Forced error ({})", offender),
            Self::Winner => format!("Winner ({})", offender),
        }
    }
}

pub fn double_fault_reason(server: Player) -> String {
    format!("Double fault ({})", server)
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Stroke {
    #[serde(rename = "FH")]
    #[strum(serialize = "FH")]
    Forehand,
    #[serde(rename = "BH")]
    #[strum(serialize = "BH")]
    Backhand,
    #[serde(rename = "VOL")]
    #[strum(serialize = "VOL")]
    Volley,
    #[serde(rename = "SM")]
    #[strum(serialize = "SM")]
    Smash,
    #[serde(rename = "OTHER")]
    #[strum(serialize = "OTHER")]
    Other,
}

impl Stroke {
    pub fn label(self) -> &'static str {
        match self {
            Self::Forehand => "Forehand",
            Self::Backhand => "Backhand",
            Self::Volley => "Volley",
            Self::Smash => "Smash",
            Self::Other => "Other",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum WinnerShot {
    #[serde(rename = "ACE")]
    #[strum(serialize = "ACE")]
    Ace,
    #[serde(rename = "PASS")]
    #[strum(serialize = "PASS")]
    Passing,
    #[serde(rename = "DROP")]
    #[strum(serialize = "DROP")]
    DropShot,
    #[serde(rename = "VOL")]
    #[strum(serialize = "VOL")]
    Volley,
    #[serde(rename = "WIN")]
    #[strum(serialize = "WIN")]
    Winner,
    #[serde(rename = "OTHER")]
    #[strum(serialize = "OTHER")]
    Other,
}

impl WinnerShot {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ace => "Ace",
            Self::Passing => "Passing shot",
            Self::DropShot => "Drop shot",
            Self::Volley => "Volley winner",
            Self::Winner => "Winner",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FinishStyle {
    Stroke(Stroke),
    WinnerShot(WinnerShot),
}

/// Advanced finish annotation copied onto the completed point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishDetail {
    pub kind: FinishKind,
    pub offender: Player,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<FinishStyle>,
}

impl FinishDetail {
    /// Winners take a winner type, errors take a stroke type.
    pub fn new(
        kind: FinishKind,
        offender: Player,
        style: Option<FinishStyle>,
    ) -> Result<Self, Rejection> {
        match (kind, style) {
            (_, None)
            | (FinishKind::Winner, Some(FinishStyle::WinnerShot(_)))
            | (
                FinishKind::UnforcedError | FinishKind::ForcedError,
                Some(FinishStyle::Stroke(_)),
            ) => Ok(Self {
                kind,
                offender,
                style,
            }),
            (kind, Some(_)) => Err(Rejection::StyleMismatch { kind }),
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        match self.style? {
            FinishStyle::Stroke(s) => Some(s.label()),
            FinishStyle::WinnerShot(w) => Some(w.label()),
        }
    }
}
