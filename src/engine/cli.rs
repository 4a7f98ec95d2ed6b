//! CLI command handler: merge config, install the Ctrl-C handler, run the conversion.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::sync::Arc;

use crate::engine::arg_parser::Cli;
use crate::pipeline::Halt;
use crate::utils::setup_logging;
use crate::utils::tocsv_toml::{apply_file_to_opts, load_tocsv_toml};
use crate::{ConvertOpts, Summary, convert_dir_with_halt};

/// Apply CLI flags over opts (CLI wins over `.tocsv.toml`).
fn apply_cli_to_opts(cli: &Cli, opts: &mut ConvertOpts) {
    if cli.workers.is_some() {
        opts.num_workers = cli.workers;
    }
    if !cli.exclude.is_empty() {
        opts.exclude = cli.exclude.clone();
    }
    if let Some(v) = cli.follow_links {
        opts.follow_links = v;
    }
    if let Some(v) = cli.level {
        opts.level = v;
    }
    if let Some(v) = cli.record_cap {
        opts.record_cap = v;
    }
    if let Some(v) = cli.path_cap {
        opts.path_cap = v;
    }
    if let Some(v) = cli.verbose {
        opts.verbose = v;
    }
}

/// Defaults, then `.tocsv.toml` from the input directory, then CLI flags. Also sets up logging.
pub fn setup_opts(cli: &Cli) -> ConvertOpts {
    let file = load_tocsv_toml(&cli.input_dir);
    let mut opts = ConvertOpts::default();
    if let Ok(Some(f)) = &file {
        apply_file_to_opts(f, &mut opts);
    }
    apply_cli_to_opts(cli, &mut opts);
    setup_logging(opts.verbose);
    match file {
        Ok(Some(_)) => debug!("Loaded config from {}", cli.input_dir.display()),
        Ok(None) => {}
        Err(e) => warn!("ignoring config file: {:#}", e),
    }
    opts
}

/// Run the conversion described by `cli`. Ctrl-C trips the pipeline's halt so the work file is cleaned up.
pub fn handle_run(cli: &Cli) -> Result<Summary> {
    let opts = setup_opts(cli);
    let halt = Arc::new(Halt::new());
    let halt_handler = Arc::clone(&halt);
    ctrlc::set_handler(move || {
        halt_handler.fail(anyhow::anyhow!("interrupted"));
    })
    .context("set Ctrl+C handler")?;

    convert_dir_with_halt(&cli.input_dir, &cli.output_file, &opts, halt)
}
