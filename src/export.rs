use crate::ledger::CompletedPoint;
use crate::point::FinishDetail;
use crate::score::Player;
use serde::Serialize;

/// One point, flattened for an export collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub n: u32,
    pub snapshot: String,
    /// `A (SD)`
    pub server: String,
    pub winner: Player,
    pub reason: String,
    pub finish_detail: Option<FinishDetail>,
    pub shots: Vec<String>,
    pub pattern: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTable {
    pub rows: Vec<ExportRow>,
    /// Longest shot list, for one-column-per-shot layouts. Zero unless
    /// split shots were requested.
    pub max_shots: usize,
}

pub fn export_rows(points: &[CompletedPoint], include_serve: bool, split_shots: bool) -> ExportTable {
    let rows: Vec<ExportRow> = points
        .iter()
        .map(|p| {
            let shots = p.tokens(include_serve);
            ExportRow {
                n: p.n,
                snapshot: p.snapshot.clone(),
                server: format!("{} ({})", p.server, p.side),
                winner: p.winner,
                reason: p.reason.clone(),
                finish_detail: p.finish_detail.clone(),
                pattern: shots.join(" - "),
                shots,
            }
        })
        .collect();

    let max_shots = if split_shots {
        rows.iter().map(|r| r.shots.len()).max().unwrap_or(0)
    } else {
        0
    };

    ExportTable { rows, max_shots }
}
