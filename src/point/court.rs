//! Court regions the input collaborator reports taps in, and the
//! direction/depth code table for rally shots.
//!
//! Regions are named by where the ball lands. Player A plays from the
//! bottom of the diagram, so A's serves and shots land in the top half and
//! B's land in the bottom half.

use crate::score::{Player, ServeSide};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

pub const GRID_SIZE: u8 = 3;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CourtHalf {
    Top,
    Bottom,
}

impl CourtHalf {
    /// Half in which a ball struck by `hitter` lands.
    pub fn landing_for(hitter: Player) -> Self {
        match hitter {
            Player::A => Self::Top,
            Player::B => Self::Bottom,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ServeBox {
    Left,
    Right,
}

impl ServeBox {
    /// The single diagonally-correct box for a serve landing in `half`.
    pub fn required(half: CourtHalf, side: ServeSide) -> Self {
        match (half, side) {
            (CourtHalf::Top, ServeSide::Deuce) => Self::Left,
            (CourtHalf::Top, ServeSide::Ad) => Self::Right,
            (CourtHalf::Bottom, ServeSide::Deuce) => Self::Right,
            (CourtHalf::Bottom, ServeSide::Ad) => Self::Left,
        }
    }
}

/// Placement inside the service box: T, body (C) or wide (A).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum ServeTarget {
    #[serde(rename = "T")]
    #[strum(serialize = "T")]
    Tee,
    #[serde(rename = "C")]
    #[strum(serialize = "C")]
    Body,
    #[serde(rename = "A")]
    #[strum(serialize = "A")]
    Wide,
}

/// Depth relative to the baseline of the half the ball lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Depth {
    #[strum(serialize = "P")]
    Deep,
    #[strum(serialize = "M")]
    Mid,
    #[strum(serialize = "C")]
    Short,
}

impl Depth {
    /// Row 0 is the top edge of the diagram in both halves, so the top half
    /// reads deep→short and the bottom half short→deep.
    pub fn from_row(half: CourtHalf, row: u8) -> Option<Self> {
        let depth = match (half, row) {
            (CourtHalf::Top, 0) | (CourtHalf::Bottom, 2) => Self::Deep,
            (_, 1) => Self::Mid,
            (CourtHalf::Top, 2) | (CourtHalf::Bottom, 0) => Self::Short,
            _ => return None,
        };
        Some(depth)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Lane {
    #[strum(serialize = "C")]
    Cross,
    #[strum(serialize = "M")]
    Middle,
    #[strum(serialize = "P")]
    Parallel,
}

impl Lane {
    pub fn from_col(col: u8) -> Option<Self> {
        match col {
            0 => Some(Self::Cross),
            1 => Some(Self::Middle),
            2 => Some(Self::Parallel),
            _ => None,
        }
    }
}

/// Two-letter rally code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum ZoneCode {
    #[serde(rename = "CC")]
    #[strum(serialize = "CC")]
    ShortCross,
    #[serde(rename = "MC")]
    #[strum(serialize = "MC")]
    MidCross,
    #[serde(rename = "PC")]
    #[strum(serialize = "PC")]
    DeepCross,
    #[serde(rename = "PP")]
    #[strum(serialize = "PP")]
    DeepLine,
    #[serde(rename = "MP")]
    #[strum(serialize = "MP")]
    MidLine,
    #[serde(rename = "CP")]
    #[strum(serialize = "CP")]
    ShortLine,
    #[serde(rename = "MM")]
    #[strum(serialize = "MM")]
    MidMiddle,
    #[serde(rename = "PM")]
    #[strum(serialize = "PM")]
    DeepMiddle,
    #[serde(rename = "CM")]
    #[strum(serialize = "CM")]
    ShortMiddle,
}

impl ZoneCode {
    pub fn classify(depth: Depth, lane: Lane) -> Self {
        match (lane, depth) {
            (Lane::Cross, Depth::Short) => Self::ShortCross,
            (Lane::Cross, Depth::Mid) => Self::MidCross,
            (Lane::Cross, Depth::Deep) => Self::DeepCross,
            (Lane::Parallel, Depth::Deep) => Self::DeepLine,
            (Lane::Parallel, Depth::Mid) => Self::MidLine,
            (Lane::Parallel, Depth::Short) => Self::ShortLine,
            (Lane::Middle, Depth::Mid) => Self::MidMiddle,
            (Lane::Middle, Depth::Deep) => Self::DeepMiddle,
            (Lane::Middle, Depth::Short) => Self::ShortMiddle,
        }
    }

    /// Code for a tap at `(row, col)` of the 3×3 grid in `half`.
    pub fn from_tap(half: CourtHalf, row: u8, col: u8) -> Option<Self> {
        let depth = Depth::from_row(half, row)?;
        let lane = Lane::from_col(col)?;
        Some(Self::classify(depth, lane))
    }
}
