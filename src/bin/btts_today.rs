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
use btts::filter::{rankable_fields, stat_column};
use btts::merge::merge;
use btts::print::{tabulate_pair_stats, tabulate_rows};
use btts::table_io::{read_fixtures, write_merged, write_pair_stats};

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

    /// show a single statistic, e.g. "BTTS %"
    #[clap(short = 's', long)]
    stat: Option<String>,

    /// write the merged fixtures to a CSV file
    #[clap(short = 'o', long)]
    out: Option<PathBuf>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if let Some(stat) = &self.stat {
            if stat.trim().is_empty() {
                bail!("--stat must name a statistic");
            }
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
    info!(
        "{} of {} fixtures have head-to-head statistics",
        merged.len(),
        fixtures.len()
    );

    match &args.stat {
        Some(stat) => {
            let column = stat_column(&merged.schema, &merged.rows, stat)?;
            let field: StatField = stat.parse()?;
            println!("{}", Console::default().render(&tabulate_pair_stats(&field, &column)));
            if let Some(path) = &args.out {
                write_pair_stats(create_buffered(path)?, &field, &column)?;
                info!("wrote {}", path.display());
            }
        }
        None => {
            println!(
                "{}",
                Console::default().render(&tabulate_rows(&merged.schema, &merged.rows, &[]))
            );
            let fields: Vec<_> = rankable_fields(&merged.schema)
                .iter()
                .map(ToString::to_string)
                .collect();
            debug!("available statistics: {}", fields.join(", "));
            if let Some(path) = &args.out {
                write_merged(create_buffered(path)?, &merged)?;
                info!("wrote {}", path.display());
            }
        }
    }
    Ok(())
}
