use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::{anyhow, bail};
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info, warn};

use btts::catalog::{CatalogConfig, LeagueCatalog};
use btts::domain::{Column, StatTable};
use btts::file::{create_buffered, ReadJsonFile};
use btts::filter;
use btts::format::format_all;
use btts::print::tabulate_rows;
use btts::table_io::write_stat_table;

const PREVIEW_ROWS: usize = 10;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// directory holding the country tables
    #[clap(short = 'd', long, default_value = ".")]
    data: PathBuf,

    /// JSON catalog layout; the built-in layout is used if omitted
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// country to show
    country: String,

    /// league to show
    league: Option<String>,

    /// show only the fixtures of this team
    #[clap(short = 't', long)]
    team: Option<String>,

    /// list the teams of the country instead of its fixtures
    #[clap(long)]
    teams: bool,

    /// number of rows to show
    #[clap(short = 'r', long, default_value_t = PREVIEW_ROWS)]
    rows: usize,

    /// show every row
    #[clap(short = 'a', long)]
    all: bool,

    /// write the whole view to a CSV file
    #[clap(short = 'o', long)]
    out: Option<PathBuf>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if !self.teams && self.league.is_none() && self.team.is_none() {
            bail!("a league, a --team or --teams must be specified");
        }
        if self.rows == 0 {
            bail!("--rows must be positive");
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

    let mut config = match &args.config {
        Some(path) => CatalogConfig::read_json_file(path)?,
        None => CatalogConfig::default(),
    };
    config
        .countries
        .retain(|country| country.name.eq_ignore_ascii_case(args.country.trim()));
    if config.countries.is_empty() {
        return Err(anyhow!("unknown country '{}'", args.country).into());
    }
    let catalog = LeagueCatalog::load(&config, &args.data)?;
    let country = catalog
        .country(&args.country)
        .ok_or_else(|| anyhow!("unknown country '{}'", args.country))?;
    let leagues = catalog.leagues(&country.name).unwrap_or_default();
    info!("{} leagues: {}", country.name, leagues.join(", "));

    if args.teams {
        for team in filter::teams(&country.table) {
            println!("{team}");
        }
        return Ok(());
    }

    let mut view = format_all(&country.table);
    if let Some(league) = &args.league {
        if !leagues.contains(league) {
            warn!("league '{league}' is not one of: {}", leagues.join(", "));
        }
        view = filter::by_league(&view, league);
    }
    if let Some(team) = &args.team {
        view = filter::by_team(&view, team);
    }
    info!("{} rows", view.len());
    if args.all {
        println!("{}", render(&view, args.league.is_some()));
    } else {
        println!("{}", render(&filter::head(&view, args.rows), args.league.is_some()));
    }

    if let Some(path) = &args.out {
        write_stat_table(create_buffered(path)?, &view)?;
        info!("wrote {}", path.display());
    }
    Ok(())
}

fn render(view: &StatTable, single_league: bool) -> String {
    let omit = if single_league { vec![Column::League] } else { vec![] };
    Console::default()
        .render(&tabulate_rows(view.schema(), view.rows(), &omit))
        .to_string()
}
