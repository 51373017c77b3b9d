use crate::reports;
use clap::Args;
use rallytrack::api::MatchService;
use rallytrack::config::MatchOptions;
use rallytrack::point::court::GRID_SIZE;
use rallytrack::point::{
    CourtHalf, FinishKind, FinishStyle, ServeBox, ServeTarget, Stroke, TapOutcome, WinnerShot,
};
use rallytrack::score::Player;
use rallytrack::session::MatchContext;
use rallytrack::store::MatchStore;

#[derive(Args, Debug, Clone)]
pub struct NewArgs {
    #[command(flatten)]
    pub opts: MatchOptions,
}

#[derive(Args, Debug, Clone)]
pub struct RenameArgs {
    pub player: Player,
    pub name: String,
}

#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    pub player: Player,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Half the serve lands in (top|bottom)
    pub half: CourtHalf,
    /// Service box (left|right)
    #[arg(value_name = "BOX")]
    pub serve_box: ServeBox,
    /// T, C (body) or A (wide)
    pub target: ServeTarget,
}

#[derive(Args, Debug, Clone)]
pub struct RallyArgs {
    /// Half the ball lands in (top|bottom)
    pub half: CourtHalf,
    #[arg(value_parser = clap::value_parser!(u8).range(0..GRID_SIZE as i64))]
    pub row: u8,
    #[arg(value_parser = clap::value_parser!(u8).range(0..GRID_SIZE as i64))]
    pub col: u8,
}

#[derive(Args, Debug, Clone)]
pub struct PointArgs {
    pub winner: Player,
    #[arg(long, default_value = "Point")]
    pub reason: String,
}

#[derive(Args, Debug, Clone)]
pub struct FinishArgs {
    /// UE, FE or W
    pub kind: FinishKind,
    /// Player who made the error or hit the winner
    pub offender: Player,
    /// Stroke that produced the error (FH|BH|VOL|SM|OTHER)
    #[arg(long, conflicts_with = "shot")]
    pub stroke: Option<Stroke>,
    /// Type of winner (ACE|PASS|DROP|VOL|WIN|OTHER)
    #[arg(long)]
    pub shot: Option<WinnerShot>,
}

impl FinishArgs {
    fn style(&self) -> Option<FinishStyle> {
        match (self.stroke, self.shot) {
            (Some(s), _) => Some(FinishStyle::Stroke(s)),
            (None, Some(w)) => Some(FinishStyle::WinnerShot(w)),
            (None, None) => None,
        }
    }
}

pub fn new_match<S: MatchStore>(svc: &mut MatchService<S>, opts: &MatchOptions) {
    let res = svc.apply(|ctx| {
        ctx.rename(Player::A, &opts.name_a);
        ctx.rename(Player::B, &opts.name_b);
        ctx.new_match(opts.first_server);
    });
    reports::print_warning(&res.warning);
    let names = svc.context().names();
    println!("\n🎾 New match: {} vs {}", names.a, names.b);
    reports::print_scoreboard(svc.context());
}

pub fn rename<S: MatchStore>(svc: &mut MatchService<S>, args: &RenameArgs) {
    let res = svc.apply(|ctx| ctx.rename(args.player, &args.name));
    reports::print_warning(&res.warning);
    println!(
        "✅ Player {} is now {}",
        args.player,
        svc.context().names().get(args.player)
    );
}

pub fn set_server<S: MatchStore>(svc: &mut MatchService<S>, args: &ServerArgs) {
    let res = svc.apply(|ctx| ctx.set_server(args.player));
    reports::print_warning(&res.warning);
    match res.value {
        Ok(()) => reports::print_scoreboard(svc.context()),
        Err(r) => reports::print_rejection(&r),
    }
}

pub fn serve<S: MatchStore>(svc: &mut MatchService<S>, args: &ServeArgs) {
    tap(svc, |ctx| ctx.serve(args.half, args.serve_box, args.target));
}

pub fn rally<S: MatchStore>(svc: &mut MatchService<S>, args: &RallyArgs) {
    tap(svc, |ctx| ctx.rally(args.half, args.row, args.col));
}

pub fn fault<S: MatchStore>(svc: &mut MatchService<S>) {
    tap(svc, MatchContext::fault);
}

pub fn undo<S: MatchStore>(svc: &mut MatchService<S>) {
    tap(svc, MatchContext::undo);
}

fn tap<S: MatchStore>(svc: &mut MatchService<S>, op: impl FnOnce(&mut MatchContext) -> TapOutcome) {
    let res = svc.apply(op);
    reports::print_warning(&res.warning);
    reports::print_tap_outcome(&res.value);
    if !matches!(res.value, TapOutcome::Rejected(_)) {
        reports::print_scoreboard(svc.context());
    }
}

pub fn reset_point<S: MatchStore>(svc: &mut MatchService<S>) {
    let res = svc.apply(MatchContext::reset_point);
    reports::print_warning(&res.warning);
    match res.value {
        Ok(()) => {
            println!("🔄 Point cleared");
            reports::print_scoreboard(svc.context());
        }
        Err(r) => reports::print_rejection(&r),
    }
}

pub fn point<S: MatchStore>(svc: &mut MatchService<S>, args: &PointArgs) {
    let res = svc.apply(|ctx| ctx.end_point(args.winner, args.reason.clone()));
    reports::print_warning(&res.warning);
    match res.value {
        Ok(outcome) => {
            println!("✅ Point to {}", svc.context().names().get(args.winner));
            reports::print_point_outcome(&outcome);
            reports::print_scoreboard(svc.context());
        }
        Err(r) => reports::print_rejection(&r),
    }
}

pub fn finish<S: MatchStore>(svc: &mut MatchService<S>, args: &FinishArgs) {
    let style = args.style();
    let res = svc.apply(|ctx| ctx.finish_action(args.kind, args.offender, style));
    reports::print_warning(&res.warning);
    match res.value {
        Ok(outcome) => {
            let winner = args.kind.point_winner(args.offender);
            println!(
                "✅ {} · point to {}",
                args.kind.reason(args.offender),
                svc.context().names().get(winner)
            );
            reports::print_point_outcome(&outcome);
            reports::print_scoreboard(svc.context());
        }
        Err(r) => reports::print_rejection(&r),
    }
}

pub fn redo_point<S: MatchStore>(svc: &mut MatchService<S>) {
    let res = svc.apply(MatchContext::redo_last_point);
    reports::print_warning(&res.warning);
    if res.value {
        println!("↩️  Last point removed");
        reports::print_scoreboard(svc.context());
    } else {
        println!("No completed point to remove.");
    }
}

pub fn end_match<S: MatchStore>(svc: &mut MatchService<S>) {
    let res = svc.apply(MatchContext::finish_match);
    reports::print_warning(&res.warning);
    println!("🏁 Match finished");
    reports::print_scoreboard(svc.context());
}

pub fn resume<S: MatchStore>(svc: &mut MatchService<S>) {
    let res = svc.apply(MatchContext::resume_match);
    reports::print_warning(&res.warning);
    println!("▶️  Match resumed");
    reports::print_scoreboard(svc.context());
}
