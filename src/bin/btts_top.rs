use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use btts::catalog::LeagueCatalog;
use btts::domain::StatField;
use btts::file::{create_buffered, open_buffered};
use btts::merge::merge;
use btts::print::tabulate_pair_stats;
use btts::rank::{top_n, DEFAULT_MIN_GAMES, DEFAULT_TOP_N};
use btts::table_io::{read_fixtures, write_pair_stats};

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// directory holding the country tables
    #[clap(short = 'd', long, default_value = ".")]
    data: PathBuf,

    /// JSON catalog layout; the built-in layout is used if omitted
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// CSV feed of today's fixtures
    #[clap(short = 'f', long)]
    fixtures: PathBuf,

    /// statistic to rank by
    #[clap(short = 's', long, default_value = "BTTS %")]
    stat: String,

    /// fewest head-to-head games a fixture needs to be ranked
    #[clap(short = 'm', long, default_value_t = DEFAULT_MIN_GAMES)]
    min_games: u32,

    /// number of fixtures to show
    #[clap(short = 'n', default_value_t = DEFAULT_TOP_N)]
    n: usize,

    /// write the leaders to a CSV file
    #[clap(short = 'o', long)]
    out: Option<PathBuf>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.n == 0 {
            bail!("-n must be positive");
        }
        Ok(())
    }
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
    args.validate()?;
    debug!("args: {args:?}");

    let catalog = LeagueCatalog::load_from(args.config.as_deref(), &args.data)?;
    let fixtures = read_fixtures(open_buffered(&args.fixtures)?)?;
    let merged = merge(&fixtures, &catalog);
    let leaders = top_n(&merged.schema, &merged.rows, args.min_games, &args.stat, args.n)?;
    info!(
        "top {} of {} merged fixtures by {} (at least {} games)",
        leaders.len(),
        merged.len(),
        args.stat,
        args.min_games
    );

    let field: StatField = args.stat.parse()?;
    println!("{}", Console::default().render(&tabulate_pair_stats(&field, &leaders)));
    if let Some(path) = &args.out {
        write_pair_stats(create_buffered(path)?, &field, &leaders)?;
        info!("wrote {}", path.display());
    }
    Ok(())
}
