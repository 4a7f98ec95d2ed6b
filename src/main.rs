//! tocsv CLI: convert a directory of DynamoDB dump files into one gzip CSV.

use anyhow::Result;
use clap::Parser;
use std::time::Instant;
use tocsv::engine::arg_parser::Cli;
use tocsv::engine::handle_run;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
