use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use rallytrack::analytics::{PatternStats, PatternView};
use rallytrack::api::PersistWarning;
use rallytrack::export::ExportTable;
use rallytrack::ledger::CompletedPoint;
use rallytrack::point::{Rejection, TapOutcome};
use rallytrack::score::labels::{point_text, score_label};
use rallytrack::score::{Player, PointOutcome};
use rallytrack::session::MatchContext;
use strum::IntoEnumIterator;

pub fn print_warning(warning: &Option<PersistWarning>) {
    if let Some(w) = warning {
        eprintln!("⚠️  {}", w.message);
    }
}

pub fn print_rejection(r: &Rejection) {
    println!("❌ Rejected: {}", r);
}

pub fn print_tap_outcome(outcome: &TapOutcome) {
    match outcome {
        TapOutcome::Accepted(c) => println!("✅ {}", c.hint),
        TapOutcome::Rejected(r) => print_rejection(r),
        TapOutcome::DoubleFault { winner } => println!("🎾 Double fault. Point to {}", winner),
    }
}

pub fn print_point_outcome(outcome: &PointOutcome) {
    match outcome {
        PointOutcome::Point => {}
        PointOutcome::Game { winner } => println!("🎾 Game {}", winner),
        PointOutcome::TiebreakStarted { starting_server } => {
            println!("🎾 Tiebreak! {} serves first", starting_server)
        }
        PointOutcome::Set { winner, record } => match &record.tb {
            Some(tb) => println!("🏆 Set {} {}-{} ({})", winner, record.a, record.b, tb),
            None => println!("🏆 Set {} {}-{}", winner, record.a, record.b),
        },
    }
}

pub fn print_scoreboard(ctx: &MatchContext) {
    let score = ctx.score();
    let history = score.set_history();

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("Player").add_attribute(Attribute::Bold), Cell::new("")];
    for i in 0..=history.len() {
        header.push(Cell::new(i + 1).set_alignment(CellAlignment::Center));
    }
    header.push(Cell::new("Pts").fg(Color::Cyan));
    table.add_row(header);

    for p in Player::iter() {
        let serving = if score.current_server() == p { "●" } else { "" };
        let mut row = vec![
            Cell::new(ctx.names().get(p)).add_attribute(Attribute::Bold),
            Cell::new(serving).fg(Color::Yellow),
        ];
        for set in history {
            let games = match p {
                Player::A => set.a,
                Player::B => set.b,
            };
            row.push(Cell::new(games).set_alignment(CellAlignment::Center));
        }
        row.push(
            Cell::new(score.games().get(p))
                .set_alignment(CellAlignment::Center)
                .add_attribute(Attribute::Bold),
        );
        row.push(Cell::new(point_text(score, p)).fg(Color::Cyan));
        table.add_row(row);
    }
    println!("\n{}", table);

    let c = ctx.constraints();
    println!(
        "Score: {} · Side: {} · Phase: {}{}",
        score_label(score),
        score.serve_side(),
        c.phase,
        if score.is_finished() { " · FINISHED" } else { "" }
    );
    let tokens: Vec<String> = ctx.point().events().iter().map(|e| e.token()).collect();
    if !tokens.is_empty() {
        println!("Point: {}", tokens.join(" - "));
    }
    if !score.is_finished() {
        println!("Hint: {}", c.hint);
    }
}

pub fn print_history(ctx: &MatchContext, rows: &[&CompletedPoint]) {
    println!("\n{} points", ctx.ledger().len());
    if rows.is_empty() {
        println!("No points. Change the filters or record some points.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Score"),
        Cell::new("Reason"),
        Cell::new("Winner"),
        Cell::new("Pattern"),
    ]);

    for p in rows {
        let reason = match p.finish_detail.as_ref().and_then(|d| d.label()) {
            Some(label) => format!("{} · {}", p.reason, label),
            None => p.reason.clone(),
        };
        let color = if p.winner == Player::A {
            Color::Green
        } else {
            Color::Yellow
        };
        table.add_row(vec![
            Cell::new(p.n).set_alignment(CellAlignment::Right),
            Cell::new(&p.snapshot),
            Cell::new(reason),
            Cell::new(ctx.names().get(p.winner)).fg(color),
            Cell::new(p.pattern(true)),
        ]);
    }
    println!("{}", table);
}

pub fn print_patterns(ctx: &MatchContext, view: PatternView, items: &[PatternStats]) {
    println!("\n📊 Patterns · view: {}", view);
    if items.is_empty() {
        println!("Not enough data. Lower the minimum occurrences or record more points.");
        return;
    }

    let names = ctx.names();
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec![
        Cell::new("Pattern").add_attribute(Attribute::Bold),
        Cell::new("Count"),
        Cell::new(names.get(Player::A)),
        Cell::new(names.get(Player::B)),
        Cell::new("Dominant"),
        Cell::new("SD/SV"),
        Cell::new("Points"),
    ]);
    for i in 1..=5 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for it in items {
        let dominant = match it.dominant() {
            Some(p) => names.get(p).to_string(),
            None => "Even".to_string(),
        };
        let points: Vec<String> = it.points.iter().map(|n| n.to_string()).collect();
        table.add_row(vec![
            Cell::new(&it.key),
            Cell::new(it.count),
            Cell::new(format!(
                "{} ({:.0}%)",
                it.wins.a,
                it.win_rate(Player::A) * 100.0
            )),
            Cell::new(format!(
                "{} ({:.0}%)",
                it.wins.b,
                it.win_rate(Player::B) * 100.0
            )),
            Cell::new(format!("{} {:.0}%", dominant, it.dominance() * 100.0)).fg(Color::Green),
            Cell::new(format!("{}/{}", it.sides.a, it.sides.b)),
            Cell::new(points.join(", ")),
        ]);
    }
    println!("{}", table);
}

pub fn print_export(ctx: &MatchContext, export: &ExportTable) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![
        Cell::new("Point").add_attribute(Attribute::Bold),
        Cell::new("Score"),
        Cell::new("Server"),
        Cell::new("Winner"),
        Cell::new("Reason"),
        Cell::new("Detail"),
        Cell::new("Shots"),
    ];
    if export.max_shots == 0 {
        header.push(Cell::new("Pattern"));
    }
    for i in 0..export.max_shots {
        header.push(Cell::new(format!("Shot{}", i + 1)));
    }
    table.add_row(header);

    for r in &export.rows {
        let detail = r
            .finish_detail
            .as_ref()
            .and_then(|d| d.label())
            .unwrap_or("");
        let mut row = vec![
            Cell::new(r.n),
            Cell::new(&r.snapshot),
            Cell::new(&r.server),
            Cell::new(ctx.names().get(r.winner)),
            Cell::new(&r.reason),
            Cell::new(detail),
            Cell::new(r.shots.len()),
        ];
        if export.max_shots == 0 {
            row.push(Cell::new(&r.pattern));
        }
        for i in 0..export.max_shots {
            row.push(Cell::new(r.shots.get(i).map(String::as_str).unwrap_or("")));
        }
        table.add_row(row);
    }
    println!("\n{}", table);
}
