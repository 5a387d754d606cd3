//! Command-line interface wiring for the `bingo-cards` binary.
//!
//! This module owns the clap definition, resolves the second positional
//! argument into a card naming scheme and drives the generation loop.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use bingo_cards::{
    BingoError, CardConfig, CardRenderer, DEFAULT_GRID_SIZE, DEFAULT_PHYSICAL_SIZE_IN, ItemPool,
    ParseOptions, PreviewOptions, RenderOptions, Sampler,
};
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

pub mod common;
pub mod logging;

use common::{parse_delimiter, parse_size, resolve_cards};

const INPUT_HELP: &str = "\
The input file is a delimited table (comma-separated by default) with one
category heading per column and, under each heading, any number of facts that
belong to it. Columns do not need to be the same length. The delimiter cannot
appear inside a fact; use --delimiter to pick another one.

The second argument is either the number of cards to make, written to
bingo_card_001.pdf, bingo_card_002.pdf, ..., or a text file with one label per
line, written to bingo_card_<label>.pdf.

Both files should be UTF-8. Files that are not valid UTF-8 are read as
Latin-1, which covers most spreadsheet exports.";

/// Parsed CLI entrypoint for the `bingo-cards` binary.
#[derive(Parser, Debug)]
#[command(
    name = "bingo-cards",
    version,
    allow_negative_numbers = true,
    about = "Make get-to-know-you bingo cards from a table of categories and facts",
    after_help = INPUT_HELP
)]
pub struct Cli {
    /// Delimited table whose first line holds the category headings.
    pub input: PathBuf,

    /// Number of cards to make, or a file with one card label per line.
    pub cards: String,

    /// Column delimiter of the input table (a single character, or `tab`).
    #[arg(short = 'd', long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: char,

    /// Cells per side of the bingo grid.
    #[arg(long = "grid-size", default_value_t = DEFAULT_GRID_SIZE as u8, value_parser = clap::value_parser!(u8).range(2..=10))]
    pub grid_size: u8,

    /// Side of the square page, in inches (1 to 48).
    #[arg(long, default_value_t = DEFAULT_PHYSICAL_SIZE_IN, value_parser = parse_size)]
    pub size: f32,

    /// Seed for the card shuffler, for reproducible sets.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory receiving the generated cards.
    #[arg(short = 'o', long = "output-dir", default_value = ".")]
    pub output_dir: PathBuf,

    /// Also write a PNG preview beside each PDF.
    #[arg(long)]
    pub preview: bool,

    /// Dots per inch used when rasterising previews.
    #[arg(long, default_value_t = 150)]
    pub dpi: u32,

    /// Log progress to stderr (repeat for more detail).
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors.
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

/// Generate every requested card, stopping at the first failure.
pub fn run(cli: Cli) -> Result<()> {
    if !cli.input.is_file() {
        return Err(BingoError::InputNotFound(cli.input.clone()).into());
    }
    let naming = resolve_cards(&cli.cards)?;

    let pool = ItemPool::load(
        &cli.input,
        &ParseOptions {
            delimiter: cli.delimiter,
        },
    )?;
    info!(
        items = pool.len(),
        categories = pool.categories().len(),
        input = %cli.input.display(),
        "parsed input table"
    );

    let config = CardConfig {
        grid_size: usize::from(cli.grid_size),
        physical_size_in: cli.size,
    };
    let sampler = Sampler::new(&config);
    let options = RenderOptions {
        preview: cli.preview.then_some(PreviewOptions { dpi: cli.dpi }),
    };
    let renderer = CardRenderer::new(config, options);

    fs::create_dir_all(&cli.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            cli.output_dir.display()
        )
    })?;

    let mut rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let count = naming.card_count();
    for (idx, name) in naming.file_names().enumerate() {
        let card = sampler.draw(&pool, &mut rng)?;
        let path = cli.output_dir.join(name);
        let rendered = renderer.render(&card, &path)?;
        info!(card = idx + 1, path = %rendered.pdf.display(), "rendered card");
    }

    debug!(count, "run complete");
    if !cli.quiet {
        println!(
            "Rendered {} bingo card(s) into {}",
            count,
            cli.output_dir.display()
        );
    }
    Ok(())
}

/// Report a failed run on stdout and pick the exit status.
pub fn report_failure(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<BingoError>() {
        Some(failure) => {
            println!("\nERROR: {}\n", failure);
            if failure.shows_usage() {
                print_usage();
            }
        }
        None => eprintln!("error: {:#}", err),
    }
    ExitCode::FAILURE
}

/// Handle a command line clap could not parse. Help and version requests exit normally.
pub fn reject_arguments(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        ErrorKind::MissingRequiredArgument | ErrorKind::UnknownArgument => {
            report_failure(&BingoError::ArgumentCount.into())
        }
        _ => {
            println!("\n{}", err.render());
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    Cli::command().print_help().ok();
    println!();
}
