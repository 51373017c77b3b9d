use crate::reports;
use clap::Args;
use rallytrack::analytics::{compute_pattern_stats, rank, PatternView};
use rallytrack::config::AnalyticsParams;
use rallytrack::error::RtResult;
use rallytrack::export::export_rows;
use rallytrack::ledger::filter::HistoryFilter;
use rallytrack::score::{Player, ServeSide};
use rallytrack::session::MatchContext;
use strum::IntoEnumIterator;

#[derive(Args, Debug, Clone)]
pub struct HistoryArgs {
    #[arg(long)]
    pub server: Option<Player>,
    /// SD or SV
    #[arg(long)]
    pub side: Option<ServeSide>,
    #[arg(long)]
    pub winner: Option<Player>,
    /// Start of the reason, e.g. "Winner" or "Double fault"
    #[arg(long)]
    pub reason: Option<String>,
    /// Substring of the pattern, serves included
    #[arg(long)]
    pub search: Option<String>,
}

impl From<&HistoryArgs> for HistoryFilter {
    fn from(args: &HistoryArgs) -> Self {
        Self {
            server: args.server,
            side: args.side,
            winner: args.winner,
            reason_prefix: args.reason.clone(),
            search: args.search.clone(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct PatternArgs {
    #[command(flatten)]
    pub analytics: AnalyticsParams,

    /// frequent, effective, deuce-ad or server. All views when omitted.
    #[arg(long)]
    pub view: Option<PatternView>,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[arg(long, default_value_t = false)]
    pub exclude_serve: bool,
    /// One column per shot instead of a joined pattern
    #[arg(long, default_value_t = false)]
    pub split_shots: bool,
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn status(ctx: &MatchContext) {
    let names = ctx.names();
    println!("\n🎾 {} vs {}", names.a, names.b);
    reports::print_scoreboard(ctx);
    if let Some(last) = ctx.ledger().last() {
        println!("Last point: #{} {} · {}", last.n, last.reason, last.snapshot);
    }
}

pub fn history(ctx: &MatchContext, args: &HistoryArgs) {
    let filter = HistoryFilter::from(args);
    let rows = filter.apply(ctx.history());
    reports::print_history(ctx, &rows);
}

pub fn patterns(ctx: &MatchContext, params: &AnalyticsParams, view: Option<PatternView>) {
    let stats = compute_pattern_stats(ctx.history(), params.include_serve());
    println!(
        "\n{} points · {} distinct patterns · min {} · top {}{}",
        ctx.ledger().len(),
        stats.len(),
        params.min_occurrences,
        params.top,
        if params.include_serve() { "" } else { " · serves excluded" }
    );

    let views: Vec<PatternView> = match view {
        Some(v) => vec![v],
        None => PatternView::iter().collect(),
    };
    for v in views {
        let items = rank(&stats, v, params);
        reports::print_patterns(ctx, v, &items);
    }
}

pub fn export(ctx: &MatchContext, args: &ExportArgs) -> RtResult<()> {
    let table = export_rows(ctx.history(), !args.exclude_serve, args.split_shots);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        reports::print_export(ctx, &table);
    }
    Ok(())
}
