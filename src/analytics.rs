//! Shot-pattern statistics over the completed points of a match.
//!
//! Everything here is a read-only projection of the ledger: the same points
//! always produce the same statistics and rankings.

use crate::config::AnalyticsParams;
use crate::ledger::CompletedPoint;
use crate::score::{Player, ServeSide, Tally};
use serde::Serialize;
use std::collections::BTreeMap;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternStats {
    pub key: String,
    pub count: u32,
    pub wins: Tally,
    /// Point numbers (`n`) in which the pattern occurred.
    pub points: Vec<u32>,
    /// Occurrences served from the deuce (`SD`) and ad (`SV`) side.
    pub sides: Tally,
    /// Occurrences served by A and by B.
    pub servers: Tally,
}

impl PatternStats {
    fn new(key: String) -> Self {
        Self {
            key,
            count: 0,
            wins: Tally::ZERO,
            points: Vec::new(),
            sides: Tally::ZERO,
            servers: Tally::ZERO,
        }
    }

    pub fn win_rate(&self, player: Player) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        f64::from(self.wins.get(player)) / f64::from(self.count)
    }

    /// `max(winsA, winsB) / count`.
    pub fn dominance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        f64::from(self.wins.max()) / f64::from(self.count)
    }

    /// Player who wins the pattern more often; `None` on a tie.
    pub fn dominant(&self) -> Option<Player> {
        self.wins.leader()
    }
}

/// Groups points by pattern key. Points with an empty key are skipped.
pub fn compute_pattern_stats(
    points: &[CompletedPoint],
    include_serve: bool,
) -> BTreeMap<String, PatternStats> {
    let mut map: BTreeMap<String, PatternStats> = BTreeMap::new();
    for p in points {
        let key = p.pattern(include_serve);
        if key.is_empty() {
            continue;
        }
        let it = map
            .entry(key)
            .or_insert_with_key(|k| PatternStats::new(k.clone()));
        it.count += 1;
        it.wins.bump(p.winner);
        it.points.push(p.n);
        match p.side {
            ServeSide::Deuce => it.sides.a += 1,
            ServeSide::Ad => it.sides.b += 1,
        }
        it.servers.bump(p.server);
    }
    map
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum PatternView {
    /// Most repeated patterns.
    #[strum(to_string = "frequent", serialize = "freq")]
    Frequent,
    /// Patterns one player wins most reliably.
    Effective,
    /// Most repeated by serving side.
    DeuceAd,
    /// Most repeated by server.
    Server,
}

/// Ranks patterns for one view and keeps the top `params.top` entries.
///
/// The frequency view ranks every pattern; the other views first drop
/// patterns seen fewer than `params.min_occurrences` times. Ties keep key
/// order.
pub fn rank(
    stats: &BTreeMap<String, PatternStats>,
    view: PatternView,
    params: &AnalyticsParams,
) -> Vec<PatternStats> {
    let mut items: Vec<PatternStats> = stats
        .values()
        .filter(|it| view == PatternView::Frequent || it.count >= params.min_occurrences)
        .cloned()
        .collect();

    match view {
        PatternView::Frequent => items.sort_by(|a, b| b.count.cmp(&a.count)),
        PatternView::Effective => items.sort_by(|a, b| b.dominance().total_cmp(&a.dominance())),
        PatternView::DeuceAd => items.sort_by(|a, b| b.sides.total().cmp(&a.sides.total())),
        PatternView::Server => items.sort_by(|a, b| b.servers.total().cmp(&a.servers.total())),
    }

    items.truncate(params.top);
    items
}

pub fn most_frequent(points: &[CompletedPoint], params: &AnalyticsParams) -> Vec<PatternStats> {
    let stats = compute_pattern_stats(points, params.include_serve());
    rank(&stats, PatternView::Frequent, params)
}

pub fn most_effective(points: &[CompletedPoint], params: &AnalyticsParams) -> Vec<PatternStats> {
    let stats = compute_pattern_stats(points, params.include_serve());
    rank(&stats, PatternView::Effective, params)
}
