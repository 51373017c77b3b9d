use super::CompletedPoint;
use crate::score::{Player, ServeSide};

/// History view filters. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub server: Option<Player>,
    pub side: Option<ServeSide>,
    pub winner: Option<Player>,
    /// Matches the start of the point's reason, e.g. `Winner` or `Double fault`.
    pub reason_prefix: Option<String>,
    /// Case-insensitive substring of the full pattern (serves included).
    pub search: Option<String>,
}

impl HistoryFilter {
    pub fn matches(&self, p: &CompletedPoint) -> bool {
        if self.server.is_some_and(|s| s != p.server) {
            return false;
        }
        if self.side.is_some_and(|s| s != p.side) {
            return false;
        }
        if self.winner.is_some_and(|w| w != p.winner) {
            return false;
        }
        if let Some(prefix) = self.reason_prefix.as_deref() {
            if !p.reason.starts_with(prefix) {
                return false;
            }
        }
        if let Some(needle) = self.search.as_deref() {
            let needle = needle.trim().to_lowercase();
            if !needle.is_empty() && !p.pattern(true).to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, points: &'a [CompletedPoint]) -> Vec<&'a CompletedPoint> {
        points.iter().filter(|p| self.matches(p)).collect()
    }
}
