//! A simple CLI for the narcissus library.

#![warn(clippy::all, clippy::pedantic)]

mod report;
mod timing;

use narcissus_common::base_codec::{MAX_BASE, MIN_BASE};
use narcissus_common::{
    Base, CLIENT_VERSION, DEFAULT_BASE, DEFAULT_CHUNK_SIZE, DEFAULT_MAX, SearchRequest,
    SearchTarget, run_search,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The base to search in
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_BASE,
        value_parser = clap::value_parser!(u32).range(i64::from(MIN_BASE)..=i64::from(MAX_BASE)),
        env = "NARCISSUS_BASE"
    )]
    base: u32,

    /// Search every value below this bound
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_MAX,
        value_parser = clap::value_parser!(i64).range(0..),
        env = "NARCISSUS_MAX"
    )]
    max: i64,

    /// The number of values handed to each job
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_CHUNK_SIZE,
        value_parser = clap::value_parser!(u64).range(1..),
        env = "NARCISSUS_CHUNK_SIZE"
    )]
    chunk_size: u64,

    /// Check only these values instead of a range, overrides --max
    #[arg(
        short,
        long,
        num_args = 1..,
        value_delimiter = ',',
        allow_negative_numbers = true,
        env = "NARCISSUS_NUMBERS"
    )]
    numbers: Option<Vec<i64>>,

    /// Run parallel with this many threads, zero uses every core
    #[arg(short, long, default_value_t = 0, env = "NARCISSUS_THREADS")]
    threads: usize,

    /// Suppress all output except the results
    #[arg(short, long, env = "NARCISSUS_QUIET")]
    quiet: bool,

    /// Show additional output
    #[arg(short, long, env = "NARCISSUS_VERBOSE")]
    verbose: bool,

    /// Print the results as JSON
    #[arg(long, env = "NARCISSUS_JSON")]
    json: bool,
}

impl Cli {
    /// Build the search request these arguments describe.
    /// A list of numbers takes priority over the range bound.
    fn request(&self) -> narcissus_common::Result<SearchRequest> {
        let target = match &self.numbers {
            Some(values) => SearchTarget::List {
                values: values.clone(),
            },
            None => SearchTarget::Range {
                max: self.max,
                chunk_size: self.chunk_size,
            },
        };
        Ok(SearchRequest {
            base: Base::new(self.base)?,
            target,
            threads: self.threads,
        })
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Set up logger
    env_logger::init();

    let request = cli.request()?;
    let human = !cli.json;

    if human && !cli.quiet {
        println!("Narcissus Client v{CLIENT_VERSION}");
        println!("{}", report::preamble(&request)?);
    }
    if cli.verbose {
        println!("CLI Inputs: {cli:?}");
    }

    let start_time = std::time::Instant::now();
    let results = run_search(&request).context("Search failed")?;
    let elapsed = start_time.elapsed();
    debug!("Search finished in {elapsed:?}");

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("{}", report::findings(&results)?);
    }

    if cli.verbose {
        println!(
            "Search took {}",
            timing::format_duration(elapsed, true, true)
        );
    }

    if results.aborted_chunks > 0 {
        anyhow::bail!(
            "{} of {} chunks stopped before finishing",
            results.aborted_chunks,
            results.chunks
        );
    }
    Ok(())
}
