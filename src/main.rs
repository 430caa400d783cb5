//! Evaluation probe
//!
//! Loads a position from FEN and prints its pawn-structure, king-safety,
//! piece-square and material terms.
//!
//! ```text
//! eval-probe --fen "6k1/5ppp/8/8/8/8/5PPP/6K1 w - - 0 1" --json
//! ```
//!
//! Logging follows `RUST_LOG` when set, otherwise the `log_filter` setting.
//! While the settings file itself is read, a bootstrap subscriber with the
//! default filter is active so its messages are not lost.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chess_eval::config::DEFAULT_LOG_FILTER;
use chess_eval::constants::STARTING_FEN;
use chess_eval::evaluation::{material, psqt};
use chess_eval::{evaluate_structure, EvalConfig, PawnTable, Position, Score, StructureReport};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "eval-probe", about = "Print the static evaluation terms of a position")]
struct Args {
    /// Position to evaluate
    #[arg(long, default_value = STARTING_FEN)]
    fen: String,

    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ProbeReport {
    fen: String,
    structure: StructureReport,
    psqt: Score,
    non_pawn_material_white: i32,
    non_pawn_material_black: i32,
}

/// Subscriber used until the configured log filter is known
fn bootstrap_subscriber<W>(make_writer: W, filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(make_writer)
        .finish()
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EvalConfig> {
    match path {
        Some(path) => EvalConfig::load_or_default(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(EvalConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let bootstrap_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let config = tracing::subscriber::with_default(
        bootstrap_subscriber(std::io::stderr, bootstrap_filter),
        || load_config(args.config.as_deref()),
    )?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .context("Invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    chess_eval::init();

    let board = Position::from_fen(&args.fen).context("Failed to parse position")?;
    let mut table = PawnTable::new(config.pawn_table_entries).context("Failed to allocate pawn table")?;

    let entry = table.probe(&board);
    let structure = evaluate_structure(&board, entry);
    let non_pawn = material().non_pawn_material(&board);

    let report = ProbeReport {
        fen: args.fen.clone(),
        structure,
        psqt: psqt().score(&board),
        non_pawn_material_white: non_pawn.white,
        non_pawn_material_black: non_pawn.black,
    };
    tracing::debug!("[PROBE] Pawn table stats: {:?}", table.stats());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Position:       {}", report.fen);
        println!("Pawns:          {}", report.structure.pawns);
        println!("White king:     {}", report.structure.white_king);
        println!("Black king:     {}", report.structure.black_king);
        println!("Structure:      {}", report.structure.total);
        println!("Passed pawns:   {}", report.structure.passed_count);
        println!("Open files:     {}", report.structure.open_files);
        println!("PSQT:           {}", report.psqt);
        println!(
            "Non-pawn mat.:  white {} / black {}",
            report.non_pawn_material_white, report.non_pawn_material_black
        );
    }

    Ok(())
}
