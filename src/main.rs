use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use rallytrack::api::MatchService;
use rallytrack::config::Config;
use rallytrack::store::JsonFileStore;
use std::process;
use tracing::Level;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Live tennis point tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Match snapshot, created on first save
    #[arg(global = true, short, long, default_value = "data/match_state.json")]
    state: String,

    /// JSON file with match and analytics defaults
    #[arg(global = true, short, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start a new match
    New(cmd::play::NewArgs),
    Rename(cmd::play::RenameArgs),
    /// Change the server before the point starts
    Server(cmd::play::ServerArgs),
    /// Serve landing in a service box
    Serve(cmd::play::ServeArgs),
    /// Rally shot landing at a grid cell
    Rally(cmd::play::RallyArgs),
    /// Serve fault; the second one is a double fault
    Fault,
    /// Take back the last event of the point
    Undo,
    ResetPoint,
    /// End the point for a player
    Point(cmd::play::PointArgs),
    /// End the point with an error or a winner
    Finish(cmd::play::FinishArgs),
    /// Remove the last completed point and restore the score
    RedoPoint,
    EndMatch,
    Resume,
    Status,
    History(cmd::review::HistoryArgs),
    Patterns(cmd::review::PatternArgs),
    Export(cmd::review::ExportArgs),
}

fn main() {
    // 1. Parse raw matches (to tell user input from defaults)
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    // 2. Config file, then explicit CLI overrides
    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path).unwrap_or_else(|e| {
            eprintln!("❌ {}", e);
            process::exit(1);
        }),
        None => Config::default(),
    };
    match &cli.command {
        Commands::New(args) => {
            if let Some(sub) = matches.subcommand_matches("new") {
                config.match_opts.merge_from_cli(&args.opts, sub);
            }
        }
        Commands::Patterns(args) => {
            if let Some(sub) = matches.subcommand_matches("patterns") {
                config.analytics.merge_from_cli(&args.analytics, sub);
            }
        }
        _ => {}
    }

    // 3. Resume the stored match
    let mut svc = MatchService::open(JsonFileStore::new(&cli.state), &config.match_opts);

    // 4. Execute
    match &cli.command {
        Commands::New(_) => cmd::play::new_match(&mut svc, &config.match_opts),
        Commands::Rename(args) => cmd::play::rename(&mut svc, args),
        Commands::Server(args) => cmd::play::set_server(&mut svc, args),
        Commands::Serve(args) => cmd::play::serve(&mut svc, args),
        Commands::Rally(args) => cmd::play::rally(&mut svc, args),
        Commands::Fault => cmd::play::fault(&mut svc),
        Commands::Undo => cmd::play::undo(&mut svc),
        Commands::ResetPoint => cmd::play::reset_point(&mut svc),
        Commands::Point(args) => cmd::play::point(&mut svc, args),
        Commands::Finish(args) => cmd::play::finish(&mut svc, args),
        Commands::RedoPoint => cmd::play::redo_point(&mut svc),
        Commands::EndMatch => cmd::play::end_match(&mut svc),
        Commands::Resume => cmd::play::resume(&mut svc),
        Commands::Status => cmd::review::status(svc.context()),
        Commands::History(args) => cmd::review::history(svc.context(), args),
        Commands::Patterns(args) => {
            cmd::review::patterns(svc.context(), &config.analytics, args.view)
        }
        Commands::Export(args) => {
            if let Err(e) = cmd::review::export(svc.context(), args) {
                eprintln!("❌ {}", e);
                process::exit(1);
            }
        }
    }
}
