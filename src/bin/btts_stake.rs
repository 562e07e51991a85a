use std::env;
use std::error::Error;

use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use btts::print::tabulate_stake;
use btts::stake::{KellyStaker, DEFAULT_CAP};

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// available bankroll
    #[clap(short = 'b', long)]
    bankroll: f64,

    /// decimal odds of the selection
    #[clap(short = 'o', long)]
    odds: f64,

    /// win probability, in percent
    #[clap(short = 'p', long)]
    prob: f64,

    /// largest fraction of the bankroll to stake
    #[clap(short = 'c', long, default_value_t = DEFAULT_CAP)]
    cap: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    debug!("args: {args:?}");

    let staker = KellyStaker::new(args.cap);
    let rec = staker.stake(args.bankroll, args.odds, args.prob)?;
    if rec.fraction == 0.0 {
        info!("no edge at {} with {}% probability", args.odds, args.prob);
    }
    println!(
        "{}",
        Console::default().render(&tabulate_stake(args.bankroll, args.odds, args.prob, &rec))
    );
    Ok(())
}
